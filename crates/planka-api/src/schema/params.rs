use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use super::{Schema, ValidationError};

/// Outbound parameters, checked before any request is built.
pub trait Params: Serialize {
	fn schema() -> &'static Schema;

	fn validate(&self) -> Result<(), ValidationError> {
		let value = serde_json::to_value(self).map_err(|e| {
			ValidationError::new(
				Self::schema().name(),
				"",
				"serializable parameters",
				&Value::String(e.to_string()),
			)
		})?;

		Self::schema().check(&value)
	}
}

macro_rules! impl_params {
	($params:ty, $name:literal, $definition:expr) => {
		impl Params for $params {
			fn schema() -> &'static Schema {
				static SCHEMA: ::once_cell::sync::Lazy<Schema> =
					::once_cell::sync::Lazy::new(|| Schema::compile($name, &$definition));

				&SCHEMA
			}
		}
	};
}

fn non_empty() -> Value {
	json!({ "type": "string", "minLength": 1, "pattern": "\\S" })
}

/// Ids are spliced into request paths, so they must stay within one segment.
fn path_segment() -> Value {
	json!({ "type": "string", "minLength": 1, "pattern": "^[^/?#\\s]+$" })
}

#[derive(Debug, Serialize)]
pub struct IdParams<'a> {
	pub id: &'a str,
}

impl_params!(
	IdParams<'_>,
	"id parameters",
	json!({
		"type": "object",
		"required": ["id"],
		"properties": { "id": path_segment() },
	})
);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParams<'a> {
	pub card_id: &'a str,
}

impl_params!(
	CardParams<'_>,
	"card parameters",
	json!({
		"type": "object",
		"required": ["cardId"],
		"properties": { "cardId": path_segment() },
	})
);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadParams<'a> {
	pub card_id: &'a str,
	pub file_path: &'a Path,
}

impl_params!(
	UploadParams<'_>,
	"upload parameters",
	json!({
		"type": "object",
		"required": ["cardId", "filePath"],
		"properties": {
			"cardId": path_segment(),
			"filePath": non_empty(),
		},
	})
);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFromUrlParams<'a> {
	pub card_id: &'a str,
	pub url: &'a str,
	pub file_name: Option<&'a str>,
}

impl_params!(
	UploadFromUrlParams<'_>,
	"upload from URL parameters",
	json!({
		"type": "object",
		"required": ["cardId", "url"],
		"properties": {
			"cardId": path_segment(),
			"url": { "type": "string", "pattern": "^[Hh][Tt][Tt][Pp][Ss]?://\\S+$" },
			"fileName": { "type": ["string", "null"] },
		},
	})
);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipParams<'a> {
	pub card_id: &'a str,
	pub user_id: &'a str,
}

impl_params!(
	MembershipParams<'_>,
	"card membership parameters",
	json!({
		"type": "object",
		"required": ["cardId", "userId"],
		"properties": {
			"cardId": path_segment(),
			"userId": path_segment(),
		},
	})
);

#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
	pub query: &'a str,
}

impl_params!(
	SearchParams<'_>,
	"user search parameters",
	json!({
		"type": "object",
		"required": ["query"],
		"properties": { "query": non_empty() },
	})
);

#[derive(Debug, Serialize)]
pub struct NotificationIdsParams<'a> {
	pub ids: &'a [String],
}

impl_params!(
	NotificationIdsParams<'_>,
	"notification ids parameters",
	json!({
		"type": "object",
		"required": ["ids"],
		"properties": {
			"ids": { "type": "array", "items": path_segment() },
		},
	})
);
