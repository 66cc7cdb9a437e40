use decoy_primitives::{TypeCatalog, TypeRef, Value};
use serde::{Deserialize, Serialize};

use crate::error::MockError;

/// How a mock treats calls that no setup matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
	/// Unmatched calls fail with [`Reason::NoSetup`](crate::Reason::NoSetup).
	Strict,
	/// Unmatched calls return the default value of the member's return type.
	#[default]
	Loose,
}

/// What a loose mock returns for a call no setup matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultValue {
	/// Zero, `false`, or an empty sequence where the return type allows; null otherwise.
	#[default]
	Empty,
	/// Zero or `false` for value types, null for every reference type including sequences.
	Null,
}

impl DefaultValue {
	/// The value returned for an unmatched call whose return type is `ty`.
	pub fn value_for(self, catalog: &TypeCatalog, ty: TypeRef) -> Value {
		match (self, catalog.default_value(ty)) {
			(DefaultValue::Null, Value::Seq { .. }) => Value::Null,
			(_, value) => value,
		}
	}
}

/// Per-mock configuration, supplied at construction.
///
/// ```toml
/// behavior = "strict"
/// default_value = "null"
/// name = "repo"
/// record_invocations = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockSettings {
	pub behavior: Behavior,
	/// Fallback policy for unmatched calls on a loose mock.
	pub default_value: DefaultValue,
	/// Label used in diagnostics and tracing. Defaults to the mocked type name.
	pub name: Option<String>,
	/// Keep a history of received calls for [`Mock::verify`](crate::Mock::verify).
	pub record_invocations: bool,
}

impl Default for MockSettings {
	fn default() -> Self {
		Self {
			behavior: Behavior::default(),
			default_value: DefaultValue::default(),
			name: None,
			record_invocations: true,
		}
	}
}

impl MockSettings {
	pub fn strict() -> Self {
		Self::with_behavior(Behavior::Strict)
	}

	pub fn loose() -> Self {
		Self::with_behavior(Behavior::Loose)
	}

	pub fn with_behavior(behavior: Behavior) -> Self {
		Self {
			behavior,
			..Self::default()
		}
	}

	/// Sets the diagnostics label.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Parses settings from a TOML document; missing keys take their defaults.
	pub fn from_toml(source: &str) -> Result<Self, MockError> {
		Ok(toml::from_str(source)?)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		assert_eq!(MockSettings::from_toml("").unwrap(), MockSettings::default());
		assert_eq!(MockSettings::default().behavior, Behavior::Loose);
	}

	#[test]
	fn parses_all_keys() {
		let settings = MockSettings::from_toml(
			r#"
behavior = "strict"
default_value = "null"
name = "repo"
record_invocations = false
"#,
		)
		.unwrap();
		assert_eq!(
			settings,
			MockSettings {
				behavior: Behavior::Strict,
				default_value: DefaultValue::Null,
				name: Some("repo".into()),
				record_invocations: false,
			}
		);
	}

	#[test]
	fn rejects_unknown_behavior() {
		let err = MockSettings::from_toml(r#"behavior = "lenient""#).unwrap_err();
		assert!(matches!(err, MockError::Settings(_)));

		let err = MockSettings::from_toml(r#"default_value = "mock""#).unwrap_err();
		assert!(matches!(err, MockError::Settings(_)));
	}

	#[test]
	fn default_value_policies() {
		let mut catalog = TypeCatalog::new();
		let strs = catalog.sequence_of(TypeRef::STR).unwrap();
		assert_eq!(DefaultValue::Empty.value_for(&catalog, strs), Value::seq(TypeRef::STR, Vec::<Value>::new()));
		assert_eq!(DefaultValue::Null.value_for(&catalog, strs), Value::Null);
		assert_eq!(DefaultValue::Null.value_for(&catalog, TypeRef::FLOAT), Value::Float(0.0));
		assert_eq!(DefaultValue::Empty.value_for(&catalog, TypeRef::STR), Value::Null);
		assert_eq!(MockSettings::from_toml("").unwrap().default_value, DefaultValue::Empty);
	}
}
