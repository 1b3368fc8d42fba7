use std::{io, path::Path};

use tokio::{fs, task::spawn_blocking};
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::{
	cards,
	schema::{self, Attachment, CardParams, IdParams, Params, UploadFromUrlParams, UploadParams},
	Error, FileIOError, Request, RequestConfig, ValidationError,
};

mod file_name;

pub use upload::exec as upload;
pub mod upload {
	use super::*;

	/// Streams a local file to the card as a new attachment.
	pub async fn exec(
		config: &RequestConfig,
		card_id: &str,
		file_path: &Path,
	) -> Result<Attachment, Error> {
		inner(config, card_id, file_path, None)
			.await
			.map_err(Error::operation("upload attachment"))
	}

	#[instrument(skip(config, file_path), fields(file_path = %file_path.display()), err)]
	pub(super) async fn inner(
		config: &RequestConfig,
		card_id: &str,
		file_path: &Path,
		file_name: Option<&str>,
	) -> Result<Attachment, Error> {
		UploadParams { card_id, file_path }.validate()?;

		match fs::metadata(file_path).await {
			Ok(metadata) if metadata.is_file() => {}
			Ok(_) => return Err(Error::NotFoundLocal(file_path.to_path_buf())),
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(Error::NotFoundLocal(file_path.to_path_buf()))
			}
			Err(e) => {
				return Err(FileIOError::from((file_path, e, "Failed to inspect upload source")).into())
			}
		}

		let file_name = file_name.map_or_else(
			|| {
				file_path
					.file_name()
					.map_or_else(|| "upload.bin".to_string(), |name| name.to_string_lossy().into_owned())
			},
			str::to_string,
		);

		let response = config
			.transport
			.upload(&format!("/api/cards/{card_id}/attachments"), file_path, &file_name)
			.await?;

		Ok(schema::item(response)?)
	}
}

pub use upload_from_url::exec as upload_from_url;
pub mod upload_from_url {
	use super::*;

	/// Downloads `url` into a scoped temporary directory and uploads it to the card.
	///
	/// The staged copy is removed whatever the outcome.
	pub async fn exec(
		config: &RequestConfig,
		card_id: &str,
		url: &str,
		file_name: Option<&str>,
	) -> Result<Attachment, Error> {
		inner(config, card_id, url, file_name)
			.await
			.map_err(Error::operation("upload attachment from URL"))
	}

	#[instrument(skip(config), err)]
	async fn inner(
		config: &RequestConfig,
		card_id: &str,
		url: &str,
		file_name: Option<&str>,
	) -> Result<Attachment, Error> {
		UploadFromUrlParams {
			card_id,
			url,
			file_name,
		}
		.validate()?;

		let parsed = Url::parse(url).map_err(|e| {
			ValidationError::new(
				"upload from URL parameters",
				"/url",
				format!("a valid URL ({e})"),
				&url.into(),
			)
		})?;

		let download = config.transport.download(&parsed).await?;
		if download.bytes.is_empty() {
			return Err(Error::EmptyDownload(url.to_string()));
		}

		let file_name = file_name::resolve(
			file_name,
			&parsed,
			download.content_type.as_deref(),
			chrono::Utc::now().timestamp_millis(),
		);

		debug!(%file_name, size = download.bytes.len(), "Staging downloaded attachment");

		let scratch = ScratchDir::create(&config.temp_dir).await?;
		let staged = scratch.path().join(&file_name);

		let result = match fs::write(&staged, &download.bytes).await {
			Ok(()) => upload::inner(config, card_id, &staged, Some(&file_name)).await,
			Err(e) => Err(FileIOError::from((&staged, e, "Failed to stage download")).into()),
		};

		scratch.close().await;

		result
	}
}

pub use delete::exec as delete;
pub mod delete {
	use super::*;

	pub async fn exec(config: &RequestConfig, id: &str) -> Result<(), Error> {
		async fn inner(config: &RequestConfig, id: &str) -> Result<(), Error> {
			IdParams { id }.validate()?;

			config
				.call(Request::delete(format!("/api/attachments/{id}")))
				.await
				.map(|_| ())
		}

		inner(config, id)
			.await
			.map_err(Error::operation("delete attachment"))
	}
}

pub use list::exec as list;
pub mod list {
	use super::*;

	/// Attachments side-loaded with the card; there is no dedicated endpoint for them.
	pub async fn exec(config: &RequestConfig, card_id: &str) -> Result<Vec<Attachment>, Error> {
		async fn inner(config: &RequestConfig, card_id: &str) -> Result<Vec<Attachment>, Error> {
			CardParams { card_id }.validate()?;

			let card = cards::fetch(config, card_id).await?;

			Ok(card.included.list()?)
		}

		inner(config, card_id)
			.await
			.map_err(Error::operation("get card attachments"))
	}
}

/// Per-call directory under the configured temp root, removed on [`ScratchDir::close`] or drop.
struct ScratchDir(tempfile::TempDir);

impl ScratchDir {
	async fn create(root: &Path) -> Result<Self, Error> {
		fs::create_dir_all(root)
			.await
			.map_err(|e| FileIOError::from((root, e, "Failed to create temp directory")))?;

		let owned_root = root.to_path_buf();

		spawn_blocking(move || {
			tempfile::Builder::new()
				.prefix("upload-")
				.tempdir_in(owned_root)
		})
		.await
		.unwrap_or_else(|e| Err(io::Error::other(e)))
		.map(Self)
		.map_err(|e| FileIOError::from((root, e, "Failed to create scratch directory")).into())
	}

	fn path(&self) -> &Path {
		self.0.path()
	}

	/// Cleanup problems are only logged, they must not mask the upload result.
	async fn close(self) {
		let path = self.0.path().to_path_buf();

		match spawn_blocking(move || self.0.close()).await {
			Ok(Ok(())) => {}
			Ok(Err(e)) => {
				warn!(path = %path.display(), ?e, "Failed to remove temporary upload directory");
			}
			Err(e) => error!(path = %path.display(), ?e, "Join error on temporary upload clean up"),
		}
	}
}
