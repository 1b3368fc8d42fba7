use std::path::Path;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::TransportError;

mod auth;
mod http;

pub use auth::TokenCache;
pub use http::HttpTransport;

/// A JSON call against the API; `path` is relative to the server root (`/api/...`).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
	pub method: Method,
	pub path: String,
	pub body: Option<Value>,
}

impl Request {
	pub fn get(path: impl Into<String>) -> Self {
		Self {
			method: Method::GET,
			path: path.into(),
			body: None,
		}
	}

	pub fn post(path: impl Into<String>, body: Value) -> Self {
		Self {
			method: Method::POST,
			path: path.into(),
			body: Some(body),
		}
	}

	pub fn patch(path: impl Into<String>, body: Value) -> Self {
		Self {
			method: Method::PATCH,
			path: path.into(),
			body: Some(body),
		}
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self {
			method: Method::DELETE,
			path: path.into(),
			body: None,
		}
	}
}

/// Raw body of a remote resource.
#[derive(Debug, Clone, Default)]
pub struct Download {
	pub bytes: Vec<u8>,
	pub content_type: Option<String>,
}

/// Authenticated access to the server, plus the plain download URL uploads need.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Sends an authenticated JSON request and returns the decoded body (`null` when empty).
	async fn request(&self, request: Request) -> Result<Value, TransportError>;

	/// Streams `file` as the multipart `file` part of an authenticated POST to `path`.
	async fn upload(
		&self,
		path: &str,
		file: &Path,
		file_name: &str,
	) -> Result<Value, TransportError>;

	/// Fetches an arbitrary URL, unauthenticated.
	async fn download(&self, url: &Url) -> Result<Download, TransportError>;
}
