use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::catalog::TypeCatalog;
use crate::ids::TypeRef;


/// A dynamic argument or return value flowing through a mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	/// Sequence tagged with its element type.
	Seq { elem: TypeRef, items: Vec<Value> },
	Object(ObjectRef),
}

impl Value {
	/// Builds a sequence value.
	pub fn seq(elem: TypeRef, items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
		Self::Seq {
			elem,
			items: items.into_iter().map(Into::into).collect(),
		}
	}

	/// Returns the canonical runtime type of this value.
	///
	/// A sequence whose type was never interned in `catalog` reports `Object`:
	/// no declared parameter can name such a type, so only `Object` accepts it.
	pub fn runtime_type(&self, catalog: &TypeCatalog) -> TypeRef {
		match self {
			Value::Null => TypeRef::NULL,
			Value::Bool(_) => TypeRef::BOOL,
			Value::Int(_) => TypeRef::INT,
			Value::Float(_) => TypeRef::FLOAT,
			Value::Str(_) => TypeRef::STR,
			Value::Seq { elem, .. } => catalog.find_sequence(*elem).unwrap_or(TypeRef::OBJECT),
			Value::Object(obj) => obj.ty(),
		}
	}

	/// Compares two values under their natural ordering.
	///
	/// Integers and floats compare numerically with each other, strings
	/// lexically, booleans with `false < true`. Any other pairing has no
	/// ordering and yields `None`.
	pub fn natural_cmp(&self, other: &Value) -> Option<Ordering> {
		match (self, other) {
			(Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
			(Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
			(Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
			(Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
			(Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
			(Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_items(&self) -> Option<&[Value]> {
		match self {
			Value::Seq { items, .. } => Some(items),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&ObjectRef> {
		match self {
			Value::Object(obj) => Some(obj),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(v.into())
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v)
	}
}

impl From<ObjectRef> for Value {
	fn from(v: ObjectRef) -> Self {
		Value::Object(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::Null, Into::into)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => write!(f, "null"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Int(i) => write!(f, "{i}"),
			Value::Float(x) => write!(f, "{x:?}"),
			Value::Str(s) => write!(f, "{s:?}"),
			Value::Seq { items, .. } => {
				write!(f, "[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{item}")?;
				}
				write!(f, "]")
			}
			Value::Object(obj) => write!(f, "object#{}", obj.ty().as_u32()),
		}
	}
}

#[derive(Debug, PartialEq)]
struct ObjectData {
	ty: TypeRef,
	fields: BTreeMap<String, Value>,
}

/// Shared handle to an object instance.
///
/// Cloning the handle keeps the instance identity: [`same_instance`](Self::same_instance)
/// holds between clones but not between two separately constructed objects,
/// even when their fields are equal. `PartialEq` is value equality.
#[derive(Debug, Clone)]
pub struct ObjectRef(Arc<ObjectData>);

impl ObjectRef {
	/// Creates a new object instance of class `ty`.
	pub fn new<K, V>(ty: TypeRef, fields: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		Self(Arc::new(ObjectData {
			ty,
			fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}))
	}

	/// Creates an object with no fields.
	pub fn empty(ty: TypeRef) -> Self {
		Self::new::<String, Value>(ty, [])
	}

	/// Runtime type of the instance.
	pub fn ty(&self) -> TypeRef {
		self.0.ty
	}

	pub fn field(&self, name: &str) -> Option<&Value> {
		self.0.fields.get(name)
	}

	/// Returns true if both handles point at the same instance.
	pub fn same_instance(&self, other: &ObjectRef) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for ObjectRef {
	fn eq(&self, other: &Self) -> bool {
		self.same_instance(other) || self.0 == other.0
	}
}
