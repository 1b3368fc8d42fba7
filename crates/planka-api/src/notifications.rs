use futures_concurrency::future::Join;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::{
	schema::{self, Collection, IdParams, Notification, NotificationIdsParams, Params},
	Error, Request, RequestConfig,
};

async fn fetch_all(config: &RequestConfig) -> Result<Collection<Notification>, Error> {
	let response = config.call(Request::get("/api/notifications")).await?;

	Ok(schema::items(response)?)
}

/// One PATCH per id, all awaited to completion. The first failure in input order fails the batch.
#[instrument(skip_all, fields(count = ids.len()), err)]
async fn mark_each(config: &RequestConfig, ids: &[String]) -> Result<Vec<Notification>, Error> {
	NotificationIdsParams { ids }.validate()?;

	if ids.is_empty() {
		return Ok(Vec::new());
	}

	ids.iter()
		.map(|id| async move {
			let response = config
				.call(Request::patch(
					format!("/api/notifications/{id}"),
					json!({ "isRead": true }),
				))
				.await
				.and_then(|response| schema::item::<Notification>(response).map_err(Into::into));

			response.map_err(|e| {
				warn!(%id, ?e, "Failed to mark notification as read");

				Error::BatchItem {
					id: id.clone(),
					source: Box::new(e),
				}
			})
		})
		.collect::<Vec<_>>()
		.join()
		.await
		.into_iter()
		.collect()
}

pub use list::exec as list;
pub mod list {
	use super::*;

	/// Notifications of the authenticated user, with the raw side-loaded records.
	pub async fn exec(config: &RequestConfig) -> Result<Collection<Notification>, Error> {
		fetch_all(config)
			.await
			.map_err(Error::operation("get notifications"))
	}
}

pub use get::exec as get;
pub mod get {
	use super::*;

	pub async fn exec(config: &RequestConfig, id: &str) -> Result<Notification, Error> {
		async fn inner(config: &RequestConfig, id: &str) -> Result<Notification, Error> {
			IdParams { id }.validate()?;

			let response = config
				.call(Request::get(format!("/api/notifications/{id}")))
				.await?;

			Ok(schema::item(response)?)
		}

		inner(config, id)
			.await
			.map_err(Error::operation("get notification"))
	}
}

pub use mark_read::exec as mark_read;
pub mod mark_read {
	use super::*;

	/// Marks every notification in `ids` as read, returning them in the order given.
	///
	/// There is no bulk endpoint, so this is all or nothing from the caller's point of view: a
	/// single failed update fails the whole call and no partial result is returned.
	pub async fn exec(config: &RequestConfig, ids: &[String]) -> Result<Vec<Notification>, Error> {
		mark_each(config, ids)
			.await
			.map_err(Error::operation("mark notifications as read"))
	}
}

pub use unread_count::exec as unread_count;
pub mod unread_count {
	use super::*;

	pub async fn exec(config: &RequestConfig) -> Result<usize, Error> {
		fetch_all(config)
			.await
			.map(|notifications| {
				notifications
					.items
					.iter()
					.filter(|notification| !notification.is_read)
					.count()
			})
			.map_err(Error::operation("get unread notifications count"))
	}
}

pub use mark_all_read::exec as mark_all_read;
pub mod mark_all_read {
	use super::*;

	pub async fn exec(config: &RequestConfig) -> Result<Vec<Notification>, Error> {
		async fn inner(config: &RequestConfig) -> Result<Vec<Notification>, Error> {
			let unread = fetch_all(config)
				.await?
				.items
				.into_iter()
				.filter(|notification| !notification.is_read)
				.map(|notification| notification.id)
				.collect::<Vec<_>>();

			debug!(count = unread.len(), "Marking unread notifications as read");

			mark_each(config, &unread).await
		}

		inner(config)
			.await
			.map_err(Error::operation("mark all notifications as read"))
	}
}
