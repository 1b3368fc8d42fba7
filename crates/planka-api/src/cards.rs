//! Card detail, the carrier of side-loaded attachments and memberships.

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::json;

use crate::{
	schema::{Attachment, CardMembership, Included, Record, Schema, User},
	Error, Request, RequestConfig,
};

static CARD_DETAIL: Lazy<Schema> = Lazy::new(|| {
	Schema::compile(
		"card detail",
		&json!({
			"type": "object",
			"required": ["item"],
			"properties": {
				"item": {
					"type": "object",
					"required": ["id"],
					"properties": { "id": { "type": ["string", "integer"] } },
				},
				"included": {
					"type": "object",
					"properties": {
						"attachments": { "type": "array", "items": Attachment::definition() },
						"cardMemberships": { "type": "array", "items": CardMembership::definition() },
						"users": { "type": "array", "items": User::definition() },
					},
				},
			},
		}),
	)
});

/// Only the side-loaded records are read; the card itself is checked but not kept.
#[derive(Debug, Deserialize)]
pub(crate) struct CardDetail {
	#[serde(default)]
	pub included: Included,
}

pub(crate) async fn fetch(config: &RequestConfig, card_id: &str) -> Result<CardDetail, Error> {
	let response = config
		.call(Request::get(format!("/api/cards/{card_id}")))
		.await?;

	Ok(CARD_DETAIL.validate(response)?)
}
