#![allow(dead_code)]

use std::{
	collections::HashMap,
	path::{Path, PathBuf},
	sync::{Arc, Mutex},
};

use async_trait::async_trait;
use planka_api::{Download, Request, RequestConfig, Transport, TransportError};
use reqwest::Method;
use serde_json::{json, Value};
use url::Url;

#[derive(Debug, Clone)]
pub enum Reply {
	Json(Value),
	Status(u16, &'static str),
}

/// What the transport saw of one upload, captured while the staged file still existed.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
	pub path: String,
	pub file: PathBuf,
	pub file_name: String,
	pub contents: Option<Vec<u8>>,
}

/// In-memory [`Transport`] answering from canned replies and recording every call.
#[derive(Default)]
pub struct MockTransport {
	routes: Mutex<HashMap<(Method, String), Reply>>,
	upload_reply: Mutex<Option<Reply>>,
	download_reply: Mutex<Option<Result<Download, u16>>>,
	calls: Mutex<Vec<Request>>,
	uploads: Mutex<Vec<RecordedUpload>>,
	downloads: Mutex<Vec<Url>>,
}

impl MockTransport {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
		self.routes
			.lock()
			.unwrap()
			.insert((method, path.to_string()), reply);
		self
	}

	pub fn on_upload(&self, reply: Reply) -> &Self {
		*self.upload_reply.lock().unwrap() = Some(reply);
		self
	}

	pub fn on_download(&self, bytes: &[u8], content_type: Option<&str>) -> &Self {
		*self.download_reply.lock().unwrap() = Some(Ok(Download {
			bytes: bytes.to_vec(),
			content_type: content_type.map(str::to_string),
		}));
		self
	}

	pub fn on_download_status(&self, status: u16) -> &Self {
		*self.download_reply.lock().unwrap() = Some(Err(status));
		self
	}

	pub fn calls(&self) -> Vec<Request> {
		self.calls.lock().unwrap().clone()
	}

	pub fn uploads(&self) -> Vec<RecordedUpload> {
		self.uploads.lock().unwrap().clone()
	}

	pub fn downloads(&self) -> Vec<Url> {
		self.downloads.lock().unwrap().clone()
	}

	/// Calls of every kind, uploads and downloads included.
	pub fn total_calls(&self) -> usize {
		self.calls().len() + self.uploads().len() + self.downloads().len()
	}
}

fn answer(reply: Option<Reply>) -> Result<Value, TransportError> {
	match reply {
		Some(Reply::Json(value)) => Ok(value),
		Some(Reply::Status(status, body)) => Err(TransportError::Status {
			status,
			body: body.to_string(),
		}),
		None => Err(TransportError::Status {
			status: 404,
			body: "no canned reply".to_string(),
		}),
	}
}

#[async_trait]
impl Transport for MockTransport {
	async fn request(&self, request: Request) -> Result<Value, TransportError> {
		let reply = self
			.routes
			.lock()
			.unwrap()
			.get(&(request.method.clone(), request.path.clone()))
			.cloned();

		self.calls.lock().unwrap().push(request);

		answer(reply)
	}

	async fn upload(
		&self,
		path: &str,
		file: &Path,
		file_name: &str,
	) -> Result<Value, TransportError> {
		self.uploads.lock().unwrap().push(RecordedUpload {
			path: path.to_string(),
			file: file.to_path_buf(),
			file_name: file_name.to_string(),
			contents: std::fs::read(file).ok(),
		});

		answer(self.upload_reply.lock().unwrap().clone())
	}

	async fn download(&self, url: &Url) -> Result<Download, TransportError> {
		self.downloads.lock().unwrap().push(url.clone());

		match self.download_reply.lock().unwrap().clone() {
			Some(Ok(download)) => Ok(download),
			Some(Err(status)) => Err(TransportError::Status {
				status,
				body: "download failed".to_string(),
			}),
			None => Ok(Download::default()),
		}
	}
}

pub fn request_config(transport: &Arc<MockTransport>, temp_dir: &Path) -> RequestConfig {
	RequestConfig::new(transport.clone(), temp_dir)
}

pub fn user(id: &str, name: &str, username: &str, email: &str) -> Value {
	json!({ "id": id, "name": name, "username": username, "email": email })
}

pub fn attachment(id: &str, card_id: &str, name: &str) -> Value {
	json!({
		"id": id,
		"cardId": card_id,
		"creatorUserId": "u1",
		"name": name,
		"url": format!("https://planka.test/attachments/{id}/download/{name}"),
		"coverUrl": null,
		"image": null,
		"createdAt": "2024-05-01T10:00:00.000Z",
		"updatedAt": null,
	})
}

pub fn notification(id: &str, is_read: bool) -> Value {
	json!({
		"id": id,
		"userId": "u1",
		"actionId": format!("a-{id}"),
		"cardId": "c1",
		"isRead": is_read,
		"createdAt": "2024-05-01T10:00:00.000Z",
		"updatedAt": null,
	})
}

pub fn action(id: &str, kind: &str, user_id: &str) -> Value {
	json!({
		"id": id,
		"type": kind,
		"data": {},
		"cardId": "c1",
		"userId": user_id,
		"createdAt": "2024-05-01T10:00:00.000Z",
	})
}
