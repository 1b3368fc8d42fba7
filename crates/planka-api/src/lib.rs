//!
//! # Planka API
//!
//! Typed client operations for a Planka kanban server. Every operation follows the same pipeline:
//! the parameters are validated against their schema, the request goes through a [`Transport`],
//! the JSON response is validated against the matching envelope schema and the resulting records
//! are joined with whatever the server side-loaded under `included`.
//!
//! ## Basic example
//!
//! ```no_run
//! use planka_api::{users, Config, RequestConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), planka_api::Error> {
//!     let config = Config::from_env()?;
//!     let request_config = RequestConfig::from_config(&config)?;
//!
//!     if let Some(id) = users::get_id_by_name(&request_config, "ada").await? {
//!         println!("found user {id}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::{path::PathBuf, sync::Arc};

use serde_json::Value;
use tracing::debug;

mod cards;
mod config;
mod error;

pub mod actions;
pub mod attachments;
pub mod card_memberships;
pub mod join;
pub mod notifications;
pub mod schema;
pub mod transport;
pub mod users;

pub use config::{default_temp_dir, Config, Credentials, DEFAULT_USER_AGENT};
pub use error::{Error, FileIOError, TransportError};
pub use schema::{
	Action, ActionType, Attachment, CardMembership, Collection, Included, Notification, User,
	ValidationError,
};
pub use transport::{Download, HttpTransport, Request, Transport};

/// Everything an operation needs to reach the server.
#[derive(Clone)]
pub struct RequestConfig {
	pub transport: Arc<dyn Transport>,
	/// Root under which URL uploads stage their downloads
	pub temp_dir: PathBuf,
}

impl RequestConfig {
	pub fn new(transport: Arc<dyn Transport>, temp_dir: impl Into<PathBuf>) -> Self {
		Self {
			transport,
			temp_dir: temp_dir.into(),
		}
	}

	/// Builds a config backed by the HTTP transport described by `config`.
	pub fn from_config(config: &Config) -> Result<Self, Error> {
		Ok(Self::new(
			Arc::new(HttpTransport::new(config)?),
			config.temp_dir.clone(),
		))
	}

	pub(crate) async fn call(&self, request: Request) -> Result<Value, Error> {
		debug!(method = %request.method, path = %request.path, "Calling Planka API");

		self.transport.request(request).await.map_err(Into::into)
	}
}
