use std::path::Path;

use async_trait::async_trait;
use reqwest::{
	header::{CONTENT_TYPE, USER_AGENT},
	multipart::{Form, Part},
	Body, RequestBuilder, Response,
};
use serde_json::Value;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, instrument};
use url::Url;

use crate::{Config, FileIOError, TransportError};

use super::{Download, Request, TokenCache, Transport};

/// [`Transport`] over HTTP, logging in lazily with the configured credentials.
pub struct HttpTransport {
	client: reqwest::Client,
	api_root: String,
	user_agent: String,
	tokens: TokenCache,
}

trait WithAuth {
	fn with_auth(self, token: &str) -> Self;
}

impl WithAuth for RequestBuilder {
	fn with_auth(self, token: &str) -> Self {
		self.bearer_auth(token)
	}
}

impl HttpTransport {
	pub fn new(config: &Config) -> Result<Self, TransportError> {
		Ok(Self {
			client: reqwest::Client::builder().build()?,
			api_root: config.api_root(),
			user_agent: config.user_agent.clone(),
			tokens: TokenCache::new(config.credentials.clone()),
		})
	}

	async fn token(&self) -> Result<String, TransportError> {
		self.tokens.get(&self.client, &self.api_root).await
	}

	fn url(&self, path: &str) -> String {
		format!("{}{path}", self.api_root)
	}
}

/// Turns non-2xx statuses into errors and decodes the body, mapping an empty body to `null`.
async fn into_json(response: Response) -> Result<Value, TransportError> {
	let status = response.status();
	let body = response.text().await?;

	if !status.is_success() {
		return Err(TransportError::Status {
			status: status.as_u16(),
			body,
		});
	}

	if body.trim().is_empty() {
		return Ok(Value::Null);
	}

	serde_json::from_str(&body).map_err(Into::into)
}

#[async_trait]
impl Transport for HttpTransport {
	#[instrument(skip_all, fields(method = %request.method, path = %request.path))]
	async fn request(&self, request: Request) -> Result<Value, TransportError> {
		let Request { method, path, body } = request;

		let mut builder = self
			.client
			.request(method, self.url(&path))
			.with_auth(&self.token().await?);

		if let Some(body) = body {
			builder = builder.json(&body);
		}

		into_json(builder.send().await?).await
	}

	#[instrument(skip(self, file), fields(source = %file.display()))]
	async fn upload(
		&self,
		path: &str,
		file: &Path,
		file_name: &str,
	) -> Result<Value, TransportError> {
		let token = self.token().await?;

		let source = File::open(file)
			.await
			.map_err(|e| FileIOError::from((file, e, "Failed to open upload source")))?;
		let size = source
			.metadata()
			.await
			.map_err(|e| FileIOError::from((file, e, "Failed to read upload source metadata")))?
			.len();

		debug!(size, "Streaming attachment");

		let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(source)), size)
			.file_name(file_name.to_string());
		let form = Form::new()
			.text("name", file_name.to_string())
			.part("file", part);

		let response = self
			.client
			.post(self.url(path))
			.with_auth(&token)
			.multipart(form)
			.send()
			.await?;

		into_json(response).await
	}

	#[instrument(skip_all, fields(url = %url))]
	async fn download(&self, url: &Url) -> Result<Download, TransportError> {
		let response = self
			.client
			.get(url.clone())
			.header(USER_AGENT, &self.user_agent)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				body: response.text().await.unwrap_or_default(),
			});
		}

		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_string);

		Ok(Download {
			bytes: response.bytes().await?.to_vec(),
			content_type,
		})
	}
}
