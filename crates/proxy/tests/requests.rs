use decoy_primitives::{CatalogError, MemberRef, TypeCatalog, TypeRef};
use decoy_proxy::{CacheKey, GenerationOptions, ProxyCache, ProxyError, ProxyRequest, Target};

struct Fixture {
	catalog: TypeCatalog,
	ifoo: TypeRef,
	ibar: TypeRef,
	base: TypeRef,
	echo: MemberRef,
	run: MemberRef,
	other: MemberRef,
}

/// `IFoo.Echo`, `IBar`, `Base : IFoo` with `Base.Run`, and an unrelated `IOther.Ping`.
fn fixture() -> Fixture {
	let mut catalog = TypeCatalog::new();
	let ifoo = catalog.declare_interface("IFoo", &[]).unwrap();
	let ibar = catalog.declare_interface("IBar", &[]).unwrap();
	let iother = catalog.declare_interface("IOther", &[]).unwrap();
	let base = catalog.declare_class("Base", None, &[ifoo]).unwrap();
	let echo = catalog.declare_method(ifoo, "Echo", &[TypeRef::INT], TypeRef::INT).unwrap();
	let run = catalog.declare_method(base, "Run", &[], TypeRef::BOOL).unwrap();
	let other = catalog.declare_method(iother, "Ping", &[], TypeRef::BOOL).unwrap();
	Fixture {
		catalog,
		ifoo,
		ibar,
		base,
		echo,
		run,
		other,
	}
}

#[test]
fn method_declared_on_interface_or_base_is_accepted() {
	let f = fixture();
	let req = ProxyRequest::new(&f.catalog);

	let key = req.for_method(f.echo, None, &[f.ibar, f.ifoo], None).unwrap();
	assert_eq!(key, CacheKey::for_method(f.echo, None, [f.ibar, f.ifoo], None));
	assert_eq!(key.target(), Target::Member(f.echo));

	assert!(req.for_method(f.run, Some(f.base), &[], None).is_ok());
	assert!(req.for_method(f.echo, Some(f.base), &[], None).is_ok());
}

#[test]
fn method_outside_request_is_missing() {
	let f = fixture();
	let req = ProxyRequest::new(&f.catalog);

	let err = req.for_method(f.other, Some(f.base), &[f.ifoo], None).unwrap_err();
	assert_eq!(err.to_string(), "IOther.Ping() is not declared on Base, IFoo");

	let err = req.for_method(f.echo, None, &[], None).unwrap_err();
	assert!(matches!(err, ProxyError::MissingMember { .. }));
}

#[test]
fn request_shapes_are_checked() {
	let f = fixture();
	let req = ProxyRequest::new(&f.catalog);

	assert!(matches!(
		req.for_type(f.ifoo, &[f.base], None),
		Err(ProxyError::Catalog(CatalogError::NotAnInterface(name))) if name == "Base"
	));
	assert!(matches!(
		req.for_type_with_base(f.ifoo, f.ibar, &[], None),
		Err(ProxyError::Catalog(CatalogError::NotAClass(name))) if name == "IBar"
	));
	assert!(matches!(
		req.for_type(TypeRef::INT, &[], None),
		Err(ProxyError::Catalog(CatalogError::NotAnOwner(name))) if name == "Int"
	));
}

#[test]
fn validated_keys_share_cache_entries_with_plain_keys() {
	let f = fixture();
	let req = ProxyRequest::new(&f.catalog);
	let opts = GenerationOptions::new().mirror_attribute("Obsolete");
	let cache = ProxyCache::<String>::new();

	let validated = req
		.for_type_with_base(f.ifoo, f.base, &[f.ibar], Some(opts.clone()))
		.unwrap();
	cache
		.get_or_create(&validated, |_| Ok::<_, String>("IFooProxy".to_string()))
		.unwrap();

	let plain = CacheKey::for_type_with_base(f.ifoo, f.base, [f.ibar], Some(opts));
	assert_eq!(cache.get(&plain).as_deref(), Some("IFooProxy"));
}
