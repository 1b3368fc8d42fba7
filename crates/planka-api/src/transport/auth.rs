use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{Credentials, TransportError};

#[derive(Deserialize)]
struct AccessToken {
	item: String,
}

/// Bearer token obtained once from `/api/access-tokens` and reused for the life of the transport.
pub struct TokenCache {
	credentials: Credentials,
	token: RwLock<Option<String>>,
}

impl TokenCache {
	#[must_use]
	pub fn new(credentials: Credentials) -> Self {
		Self {
			credentials,
			token: RwLock::new(None),
		}
	}

	pub async fn get(
		&self,
		client: &reqwest::Client,
		api_root: &str,
	) -> Result<String, TransportError> {
		if let Some(token) = self.token.read().await.as_ref() {
			return Ok(token.clone());
		}

		let mut slot = self.token.write().await;
		// Another caller may have logged in while we waited for the write lock
		if let Some(token) = slot.as_ref() {
			return Ok(token.clone());
		}

		let token = self.acquire(client, api_root).await?;
		*slot = Some(token.clone());

		Ok(token)
	}

	#[instrument(skip_all, fields(user = %self.credentials.email_or_username), err)]
	async fn acquire(
		&self,
		client: &reqwest::Client,
		api_root: &str,
	) -> Result<String, TransportError> {
		let response = client
			.post(format!("{api_root}/api/access-tokens"))
			.json(&json!({
				"emailOrUsername": self.credentials.email_or_username,
				"password": self.credentials.password,
			}))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::Auth(format!("HTTP {}: {body}", status.as_u16())));
		}

		let AccessToken { item } = response
			.json()
			.await
			.map_err(|e| TransportError::Auth(format!("unexpected token response: {e}")))?;

		debug!("Acquired Planka access token");

		Ok(item)
	}
}
