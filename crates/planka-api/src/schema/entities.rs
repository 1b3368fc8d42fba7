use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::impl_record;

/// Ids are opaque strings; older servers send them as bare numbers.
fn id() -> Value {
	json!({ "type": ["string", "integer"] })
}

fn nullable(kind: &str) -> Value {
	json!({ "type": [kind, "null"] })
}

mod coerce {
	use serde::{Deserialize, Deserializer};

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawId {
		Text(String),
		Number(u64),
	}

	impl From<RawId> for String {
		fn from(raw: RawId) -> Self {
			match raw {
				RawId::Text(text) => text,
				RawId::Number(number) => number.to_string(),
			}
		}
	}

	pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
		RawId::deserialize(deserializer).map(Into::into)
	}

	pub fn optional_id<'de, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Option<String>, D::Error> {
		Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(Into::into))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
	#[serde(deserialize_with = "coerce::id")]
	pub id: String,
	#[serde(deserialize_with = "coerce::id")]
	pub card_id: String,
	#[serde(default, deserialize_with = "coerce::optional_id")]
	pub creator_user_id: Option<String>,
	pub name: String,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub cover_url: Option<String>,
	/// Image dimensions, only present for images
	#[serde(default)]
	pub image: Option<Value>,
	#[serde(default)]
	pub size: Option<u64>,
	pub created_at: DateTime<Utc>,
	#[serde(default)]
	pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(
	Attachment,
	"attachments",
	json!({
		"type": "object",
		"required": ["id", "cardId", "name", "createdAt"],
		"properties": {
			"id": id(),
			"cardId": id(),
			"creatorUserId": { "type": ["string", "integer", "null"] },
			"name": { "type": "string" },
			"url": nullable("string"),
			"coverUrl": nullable("string"),
			"image": nullable("object"),
			"size": { "type": ["integer", "null"], "minimum": 0 },
			"createdAt": { "type": "string" },
			"updatedAt": nullable("string"),
		},
	})
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
	CreateCard,
	MoveCard,
	CommentCard,
}

impl ActionType {
	pub const ALL: [Self; 3] = [Self::CreateCard, Self::MoveCard, Self::CommentCard];

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::CreateCard => "createCard",
			Self::MoveCard => "moveCard",
			Self::CommentCard => "commentCard",
		}
	}
}

/// Entry of a card's activity log. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
	#[serde(deserialize_with = "coerce::id")]
	pub id: String,
	#[serde(rename = "type")]
	pub kind: ActionType,
	/// Payload whose shape depends on `kind`
	pub data: Map<String, Value>,
	#[serde(deserialize_with = "coerce::id")]
	pub card_id: String,
	#[serde(deserialize_with = "coerce::id")]
	pub user_id: String,
	pub created_at: DateTime<Utc>,
	#[serde(default)]
	pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(
	Action,
	"actions",
	json!({
		"type": "object",
		"required": ["id", "type", "data", "cardId", "userId", "createdAt"],
		"properties": {
			"id": id(),
			"type": { "enum": ActionType::ALL.map(ActionType::as_str) },
			"data": { "type": "object" },
			"cardId": id(),
			"userId": id(),
			"createdAt": { "type": "string" },
			"updatedAt": nullable("string"),
		},
	})
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMembership {
	#[serde(deserialize_with = "coerce::id")]
	pub id: String,
	#[serde(deserialize_with = "coerce::id")]
	pub card_id: String,
	#[serde(deserialize_with = "coerce::id")]
	pub user_id: String,
	#[serde(default)]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(
	CardMembership,
	"cardMemberships",
	json!({
		"type": "object",
		"required": ["id", "cardId", "userId"],
		"properties": {
			"id": id(),
			"cardId": id(),
			"userId": id(),
			"createdAt": nullable("string"),
			"updatedAt": nullable("string"),
		},
	})
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	#[serde(deserialize_with = "coerce::id")]
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
}

impl_record!(
	User,
	"users",
	json!({
		"type": "object",
		"required": ["id", "name"],
		"properties": {
			"id": id(),
			"name": { "type": "string" },
			"username": nullable("string"),
			"email": nullable("string"),
		},
	})
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
	#[serde(deserialize_with = "coerce::id")]
	pub id: String,
	#[serde(deserialize_with = "coerce::id")]
	pub user_id: String,
	#[serde(deserialize_with = "coerce::id")]
	pub action_id: String,
	#[serde(deserialize_with = "coerce::id")]
	pub card_id: String,
	pub is_read: bool,
	pub created_at: DateTime<Utc>,
	#[serde(default)]
	pub updated_at: Option<DateTime<Utc>>,
}

impl_record!(
	Notification,
	"notifications",
	json!({
		"type": "object",
		"required": ["id", "userId", "actionId", "cardId", "isRead", "createdAt"],
		"properties": {
			"id": id(),
			"userId": id(),
			"actionId": id(),
			"cardId": id(),
			"isRead": { "type": "boolean" },
			"createdAt": { "type": "string" },
			"updatedAt": nullable("string"),
		},
	})
);
