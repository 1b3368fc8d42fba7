use serde::Serialize;
use serde_json::json;

use crate::{
	cards,
	join::left_join,
	schema::{self, CardMembership, CardParams, MembershipParams, Params, User},
	Error, Request, RequestConfig,
};

/// A membership paired with its user, when the server side-loaded one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardMember {
	pub membership: CardMembership,
	pub user: Option<User>,
}

pub use add::exec as add;
pub mod add {
	use super::*;

	pub async fn exec(
		config: &RequestConfig,
		card_id: &str,
		user_id: &str,
	) -> Result<CardMembership, Error> {
		async fn inner(
			config: &RequestConfig,
			card_id: &str,
			user_id: &str,
		) -> Result<CardMembership, Error> {
			MembershipParams { card_id, user_id }.validate()?;

			let response = config
				.call(Request::post(
					format!("/api/cards/{card_id}/card-memberships"),
					json!({ "userId": user_id }),
				))
				.await?;

			Ok(schema::item(response)?)
		}

		inner(config, card_id, user_id)
			.await
			.map_err(Error::operation("add card member"))
	}
}

pub use remove::exec as remove;
pub mod remove {
	use super::*;

	/// Memberships are addressed by user on removal, not by membership id.
	pub async fn exec(
		config: &RequestConfig,
		card_id: &str,
		user_id: &str,
	) -> Result<CardMembership, Error> {
		async fn inner(
			config: &RequestConfig,
			card_id: &str,
			user_id: &str,
		) -> Result<CardMembership, Error> {
			MembershipParams { card_id, user_id }.validate()?;

			let response = config
				.call(Request::delete(format!(
					"/api/cards/{card_id}/card-memberships/userId:{user_id}"
				)))
				.await?;

			Ok(schema::item(response)?)
		}

		inner(config, card_id, user_id)
			.await
			.map_err(Error::operation("remove card member"))
	}
}

pub use list::exec as list;
pub mod list {
	use super::*;

	pub async fn exec(config: &RequestConfig, card_id: &str) -> Result<Vec<CardMember>, Error> {
		async fn inner(config: &RequestConfig, card_id: &str) -> Result<Vec<CardMember>, Error> {
			CardParams { card_id }.validate()?;

			let card = cards::fetch(config, card_id).await?;

			Ok(join_members(
				card.included.list::<CardMembership>()?,
				&card.included.list::<User>()?,
			))
		}

		inner(config, card_id)
			.await
			.map_err(Error::operation("get card members"))
	}
}

/// Left join on `userId`; memberships whose user was not side-loaded keep `user: None`.
#[must_use]
pub fn join_members(memberships: Vec<CardMembership>, users: &[User]) -> Vec<CardMember> {
	left_join(
		memberships,
		users,
		|membership| membership.user_id.as_str(),
		|user| user.id.as_str(),
	)
	.into_iter()
	.map(|(membership, user)| CardMember { membership, user })
	.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn membership(id: &str, user_id: &str) -> CardMembership {
		CardMembership {
			id: id.to_string(),
			card_id: "c1".to_string(),
			user_id: user_id.to_string(),
			created_at: None,
			updated_at: None,
		}
	}

	#[test]
	fn unmatched_membership_keeps_empty_user() {
		let users = [User {
			id: "u1".to_string(),
			name: "A".to_string(),
			username: None,
			email: None,
		}];

		let members = join_members(vec![membership("m1", "u1"), membership("m2", "u2")], &users);

		assert_eq!(members.len(), 2);
		assert_eq!(members[0].user.as_ref().map(|u| u.name.as_str()), Some("A"));
		assert_eq!(members[1].membership.id, "m2");
		assert_eq!(members[1].user, None);
	}
}
