//! Schema registry.
//!
//! Every record and every operation's parameters have a JSON schema, compiled once and checked at
//! the edge: parameters before a request is built and responses before anything reads them. A
//! value that passes its schema is then deserialized into its typed record. That step is where
//! loose JSON gets coerced (numeric ids become strings, `null` optionals become `None`).

use jsonschema::{Draft, JSONSchema};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

mod entities;
mod params;

pub use entities::{Action, ActionType, Attachment, CardMembership, Notification, User};
pub(crate) use params::{
	CardParams, IdParams, MembershipParams, NotificationIdsParams, Params, SearchParams,
	UploadFromUrlParams, UploadParams,
};

const MAX_ACTUAL_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{schema} failed validation at '{path}': {expected} (got {actual})")]
pub struct ValidationError {
	/// Name of the schema that rejected the value
	pub schema: &'static str,
	/// JSON pointer to the offending value, `/` for the root
	pub path: String,
	pub expected: String,
	pub actual: String,
}

impl ValidationError {
	pub(crate) fn new(
		schema: &'static str,
		path: impl Into<String>,
		expected: impl Into<String>,
		actual: &Value,
	) -> Self {
		let path = path.into();

		Self {
			schema,
			path: if path.is_empty() { "/".to_string() } else { path },
			expected: expected.into(),
			actual: truncate(actual.to_string()),
		}
	}

	fn coercion(schema: &'static str, error: &serde_json::Error) -> Self {
		Self {
			schema,
			path: "/".to_string(),
			expected: error.to_string(),
			actual: "a value of the wrong shape".to_string(),
		}
	}
}

fn truncate(mut actual: String) -> String {
	if actual.len() > MAX_ACTUAL_LEN {
		let mut cut = MAX_ACTUAL_LEN;
		while !actual.is_char_boundary(cut) {
			cut -= 1;
		}
		actual.truncate(cut);
		actual.push('…');
	}

	actual
}

/// A compiled JSON schema with a human readable name.
pub struct Schema {
	name: &'static str,
	compiled: JSONSchema,
}

impl Schema {
	/// Compiles a schema definition. Definitions are static, so a broken one is a programming error.
	#[must_use]
	pub fn compile(name: &'static str, definition: &Value) -> Self {
		let compiled = JSONSchema::options()
			.with_draft(Draft::Draft7)
			.compile(definition)
			.unwrap_or_else(|e| panic!("invalid schema definition for {name}: {e}"));

		Self { name, compiled }
	}

	#[must_use]
	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Checks `value` against the schema, reporting the first violation.
	pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
		self.compiled.validate(value).map_err(|mut errors| {
			errors.next().map_or_else(
				|| ValidationError::new(self.name, "", "a value matching the schema", value),
				|e| {
					ValidationError::new(
						self.name,
						e.instance_path.to_string(),
						e.to_string(),
						&e.instance,
					)
				},
			)
		})
	}

	/// Checks `value` and coerces it into `T`.
	pub fn validate<T: DeserializeOwned>(&self, value: Value) -> Result<T, ValidationError> {
		self.check(&value)?;

		serde_json::from_value(value).map_err(|e| ValidationError::coercion(self.name, &e))
	}
}

/// Free-standing form of [`Schema::validate`].
pub fn validate<T: DeserializeOwned>(schema: &Schema, value: Value) -> Result<T, ValidationError> {
	schema.validate(value)
}

/// The schemas derived from one record definition.
pub struct RecordSchemas {
	pub record: Schema,
	pub list: Schema,
	pub item: Schema,
	pub items: Schema,
}

impl RecordSchemas {
	#[must_use]
	pub fn new(name: &'static str, definition: &Value) -> Self {
		Self {
			record: Schema::compile(name, definition),
			list: Schema::compile(name, &list_of(definition)),
			item: Schema::compile(name, &item_envelope(definition)),
			items: Schema::compile(name, &items_envelope(definition)),
		}
	}
}

/// A record the server returns, either on its own or side-loaded under `included`.
pub trait Record: DeserializeOwned + Send + 'static {
	/// Plural key under which the server side-loads this record
	const INCLUDED_KEY: &'static str;

	fn definition() -> Value;

	fn schemas() -> &'static RecordSchemas;
}

macro_rules! impl_record {
	($record:ty, $included_key:literal, $definition:expr) => {
		impl $crate::schema::Record for $record {
			const INCLUDED_KEY: &'static str = $included_key;

			fn definition() -> ::serde_json::Value {
				$definition
			}

			fn schemas() -> &'static $crate::schema::RecordSchemas {
				static SCHEMAS: ::once_cell::sync::Lazy<$crate::schema::RecordSchemas> =
					::once_cell::sync::Lazy::new(|| {
						$crate::schema::RecordSchemas::new(
							stringify!($record),
							&<$record as $crate::schema::Record>::definition(),
						)
					});

				&SCHEMAS
			}
		}
	};
}

pub(crate) use impl_record;

fn list_of(definition: &Value) -> Value {
	json!({ "type": "array", "items": definition })
}

fn item_envelope(definition: &Value) -> Value {
	json!({
		"type": "object",
		"required": ["item"],
		"properties": {
			"item": definition,
			"included": { "type": "object" },
		},
	})
}

fn items_envelope(definition: &Value) -> Value {
	json!({
		"type": "object",
		"required": ["items"],
		"properties": {
			"items": list_of(definition),
			"included": { "type": "object" },
		},
	})
}

#[derive(Deserialize)]
struct ItemEnvelope<T> {
	item: T,
}

/// Collection envelope: the records plus whatever the server side-loaded with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
	pub items: Vec<T>,
	#[serde(default)]
	pub included: Included,
}

/// Validates a `{ item }` envelope and unwraps the record.
pub fn item<T: Record>(response: Value) -> Result<T, ValidationError> {
	T::schemas()
		.item
		.validate::<ItemEnvelope<T>>(response)
		.map(|envelope| envelope.item)
}

/// Validates an `{ items, included? }` envelope.
pub fn items<T: Record>(response: Value) -> Result<Collection<T>, ValidationError> {
	T::schemas().items.validate(response)
}

/// Side-loaded records keyed by plural entity-type name (`users`, `cardMemberships`, ...).
///
/// Keys nobody asks for are kept untouched; a requested key is validated against the schema of the
/// record it is asked as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Included(Map<String, Value>);

impl Included {
	/// Typed side-list for `T`, empty when the server did not send one.
	pub fn list<T: Record>(&self) -> Result<Vec<T>, ValidationError> {
		match self.0.get(T::INCLUDED_KEY) {
			None | Some(Value::Null) => Ok(Vec::new()),
			Some(list) => T::schemas().list.validate(list.clone()),
		}
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Map<String, Value>> for Included {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}
