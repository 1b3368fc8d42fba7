use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
	join::{count_by_type, recent, user_names, UNKNOWN_USER},
	schema::{self, Action, ActionType, CardParams, Collection, IdParams, Params, User},
	Error, Request, RequestConfig,
};

/// How many actions a summary lists as recent.
pub const RECENT_ACTIONS: usize = 10;

/// An action flattened for display, with its author resolved to a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: ActionType,
	pub user: String,
	pub user_id: String,
	pub data: Map<String, Value>,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
	pub card_id: String,
	pub total_actions: usize,
	pub by_type: BTreeMap<ActionType, usize>,
	pub recent_actions: Vec<ActionView>,
	pub actions: Vec<ActionView>,
}

pub use list::exec as list;
pub mod list {
	use super::*;

	/// The card's actions as the server orders them, plus side-loaded users.
	pub async fn exec(config: &RequestConfig, card_id: &str) -> Result<Collection<Action>, Error> {
		inner(config, card_id)
			.await
			.map_err(Error::operation("get card actions"))
	}

	pub(super) async fn inner(
		config: &RequestConfig,
		card_id: &str,
	) -> Result<Collection<Action>, Error> {
		CardParams { card_id }.validate()?;

		let response = config
			.call(Request::get(format!("/api/cards/{card_id}/actions")))
			.await?;

		Ok(schema::items(response)?)
	}
}

pub use get::exec as get;
pub mod get {
	use super::*;

	pub async fn exec(config: &RequestConfig, id: &str) -> Result<Action, Error> {
		async fn inner(config: &RequestConfig, id: &str) -> Result<Action, Error> {
			IdParams { id }.validate()?;

			let response = config
				.call(Request::get(format!("/api/actions/{id}")))
				.await?;

			Ok(schema::item(response)?)
		}

		inner(config, id)
			.await
			.map_err(Error::operation("get action"))
	}
}

pub use summary::exec as summary;
pub mod summary {
	use super::*;

	pub async fn exec(config: &RequestConfig, card_id: &str) -> Result<ActivitySummary, Error> {
		async fn inner(config: &RequestConfig, card_id: &str) -> Result<ActivitySummary, Error> {
			let actions = list::inner(config, card_id).await?;
			let users = actions.included.list::<User>()?;

			Ok(summarize(card_id, actions.items, &users))
		}

		inner(config, card_id)
			.await
			.map_err(Error::operation("get card activity summary"))
	}
}

/// Builds a summary from actions in newest-first order; the order is not changed.
#[must_use]
pub fn summarize(card_id: &str, actions: Vec<Action>, users: &[User]) -> ActivitySummary {
	let names = user_names(users);

	let by_type = count_by_type(actions.iter().map(|action| action.kind));

	let actions = actions
		.into_iter()
		.map(|action| ActionView {
			user: names
				.get(action.user_id.as_str())
				.cloned()
				.unwrap_or_else(|| UNKNOWN_USER.to_string()),
			id: action.id,
			kind: action.kind,
			user_id: action.user_id,
			data: action.data,
			created_at: action.created_at,
		})
		.collect::<Vec<_>>();

	ActivitySummary {
		card_id: card_id.to_string(),
		total_actions: actions.len(),
		by_type,
		recent_actions: recent(&actions, RECENT_ACTIONS),
		actions,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn action(id: usize, kind: &str, user_id: &str) -> Action {
		serde_json::from_value(json!({
			"id": id.to_string(),
			"type": kind,
			"data": { "text": format!("action {id}") },
			"cardId": "c1",
			"userId": user_id,
			"createdAt": "2024-05-01T10:00:00.000Z",
			"updatedAt": null,
		}))
		.unwrap()
	}

	#[test]
	fn counts_every_type_and_caps_recent() {
		let actions = (0..12)
			.map(|i| action(i, if i % 3 == 0 { "commentCard" } else { "moveCard" }, "u1"))
			.collect::<Vec<_>>();

		let summary = summarize("c1", actions, &[]);

		assert_eq!(summary.total_actions, 12);
		assert_eq!(summary.by_type[&ActionType::CommentCard], 4);
		assert_eq!(summary.by_type[&ActionType::MoveCard], 8);
		assert_eq!(summary.by_type[&ActionType::CreateCard], 0);
		assert_eq!(summary.recent_actions.len(), RECENT_ACTIONS);
		assert_eq!(summary.recent_actions[0].id, "0");
		assert_eq!(summary.actions.len(), 12);
	}

	#[test]
	fn resolves_authors_with_fallback() {
		let users = [User {
			id: "u1".to_string(),
			name: String::new(),
			username: Some("ada".to_string()),
			email: None,
		}];

		let summary = summarize(
			"c1",
			vec![action(1, "createCard", "u1"), action(2, "commentCard", "ghost")],
			&users,
		);

		assert_eq!(summary.actions[0].user, "ada");
		assert_eq!(summary.actions[1].user, UNKNOWN_USER);
	}

	#[test]
	fn serializes_with_wire_names() {
		let summary = summarize("c1", vec![action(1, "createCard", "u1")], &[]);
		let value = serde_json::to_value(&summary).unwrap();

		assert_eq!(value["totalActions"], 1);
		assert_eq!(value["byType"]["createCard"], 1);
		assert_eq!(value["recentActions"][0]["type"], "createCard");
		assert_eq!(value["recentActions"][0]["userId"], "u1");
	}
}
