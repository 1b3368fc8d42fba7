//! User directory. The server returns every user in one call, so searches filter locally.

use crate::{
	join::{contains_ignore_case, eq_ignore_case},
	schema::{self, IdParams, Params, SearchParams, User},
	Error, Request, RequestConfig,
};

async fn fetch_all(config: &RequestConfig) -> Result<Vec<User>, Error> {
	let response = config.call(Request::get("/api/users")).await?;

	Ok(schema::items::<User>(response)?.items)
}

async fn search(
	config: &RequestConfig,
	query: &str,
	matches: impl Fn(&User, &str) -> bool,
) -> Result<Vec<User>, Error> {
	SearchParams { query }.validate()?;

	Ok(fetch_all(config)
		.await?
		.into_iter()
		.filter(|user| matches(user, query))
		.collect())
}

pub use list::exec as list;
pub mod list {
	use super::*;

	pub async fn exec(config: &RequestConfig) -> Result<Vec<User>, Error> {
		fetch_all(config)
			.await
			.map_err(Error::operation("get users"))
	}
}

pub use get::exec as get;
pub mod get {
	use super::*;

	pub async fn exec(config: &RequestConfig, id: &str) -> Result<User, Error> {
		async fn inner(config: &RequestConfig, id: &str) -> Result<User, Error> {
			IdParams { id }.validate()?;

			let response = config
				.call(Request::get(format!("/api/users/{id}")))
				.await?;

			Ok(schema::item(response)?)
		}

		inner(config, id)
			.await
			.map_err(Error::operation("get user"))
	}
}

pub use search_by_name::exec as search_by_name;
pub mod search_by_name {
	use super::*;

	/// Case-insensitive substring match on the display name.
	pub async fn exec(config: &RequestConfig, name: &str) -> Result<Vec<User>, Error> {
		search(config, name, |user, query| contains_ignore_case(&user.name, query))
			.await
			.map_err(Error::operation("search users by name"))
	}
}

pub use search_by_email::exec as search_by_email;
pub mod search_by_email {
	use super::*;

	/// Case-insensitive exact match.
	pub async fn exec(config: &RequestConfig, email: &str) -> Result<Vec<User>, Error> {
		search(config, email, |user, query| {
			user.email
				.as_deref()
				.is_some_and(|email| eq_ignore_case(email, query))
		})
		.await
		.map_err(Error::operation("search users by email"))
	}
}

pub use search_by_username::exec as search_by_username;
pub mod search_by_username {
	use super::*;

	/// Case-insensitive exact match.
	pub async fn exec(config: &RequestConfig, username: &str) -> Result<Vec<User>, Error> {
		search(config, username, |user, query| {
			user.username
				.as_deref()
				.is_some_and(|username| eq_ignore_case(username, query))
		})
		.await
		.map_err(Error::operation("search users by username"))
	}
}

pub use get_id_by_name::exec as get_id_by_name;
pub mod get_id_by_name {
	use super::*;

	/// Id of the first user whose name matches; later matches are ignored.
	pub async fn exec(config: &RequestConfig, name: &str) -> Result<Option<String>, Error> {
		search(config, name, |user, query| contains_ignore_case(&user.name, query))
			.await
			.map(|users| users.into_iter().next().map(|user| user.id))
			.map_err(Error::operation("get user id by name"))
	}
}
