use std::{
	fmt::{self, Display},
	io,
	path::{Path, PathBuf},
};

use thiserror::Error;

use crate::schema::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
	/// Failure of a public operation, prefixed with what the operation was trying to do
	#[error("Failed to {action}: {source}")]
	Operation {
		action: &'static str,
		#[source]
		source: Box<Error>,
	},

	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error(transparent)]
	Transport(#[from] TransportError),
	#[error("local file not found <path='{}'>", .0.display())]
	NotFoundLocal(PathBuf),
	#[error("downloaded resource is empty <url='{0}'>")]
	EmptyDownload(String),
	#[error("notification <id='{id}'> could not be marked as read: {source}")]
	BatchItem {
		id: String,
		#[source]
		source: Box<Error>,
	},
	#[error(transparent)]
	FileIO(#[from] FileIOError),
	#[error("invalid configuration: {0}")]
	Config(String),
}

impl Error {
	pub(crate) fn operation(action: &'static str) -> impl FnOnce(Self) -> Self {
		move |source| Self::Operation {
			action,
			source: Box::new(source),
		}
	}

	/// The innermost error, looking through operation wrappers.
	#[must_use]
	pub fn root(&self) -> &Self {
		match self {
			Self::Operation { source, .. } => source.root(),
			other => other,
		}
	}

	/// HTTP status of the underlying transport failure, if there was one.
	#[must_use]
	pub fn status(&self) -> Option<u16> {
		match self.root() {
			Self::Transport(e) => e.status(),
			Self::BatchItem { source, .. } => source.status(),
			_ => None,
		}
	}
}

#[derive(Debug, Error)]
pub enum TransportError {
	#[error("HTTP {status}: {body}")]
	Status { status: u16, body: String },
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),
	#[error("failed to decode response body: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("authentication failed: {0}")]
	Auth(String),
	#[error(transparent)]
	FileIO(#[from] FileIOError),
}

impl TransportError {
	#[must_use]
	pub const fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// File I/O error that includes the path that caused the error
#[derive(Error, Debug)]
pub struct FileIOError {
	pub path: Box<Path>,
	#[source]
	pub source: io::Error,
	pub maybe_context: Option<&'static str>,
}

impl Display for FileIOError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"file I/O error{}: {}; path: '{}'",
			self.maybe_context
				.map(|ctx| format!(" ({ctx})"))
				.unwrap_or_default(),
			self.source,
			self.path.display()
		)
	}
}

impl<P: AsRef<Path>> From<(P, io::Error)> for FileIOError {
	fn from((path, source): (P, io::Error)) -> Self {
		Self {
			path: path.as_ref().into(),
			source,
			maybe_context: None,
		}
	}
}

impl<P: AsRef<Path>> From<(P, io::Error, &'static str)> for FileIOError {
	fn from((path, source, context): (P, io::Error, &'static str)) -> Self {
		Self {
			path: path.as_ref().into(),
			source,
			maybe_context: Some(context),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn operation_prefix_keeps_cause() {
		let error = Error::operation("delete attachment")(Error::Transport(
			TransportError::Status {
				status: 404,
				body: "Attachment not found".to_string(),
			},
		));

		assert_eq!(
			error.to_string(),
			"Failed to delete attachment: HTTP 404: Attachment not found"
		);
		assert_eq!(error.status(), Some(404));
		assert!(matches!(error.root(), Error::Transport(_)));
	}

	#[test]
	fn file_io_error_mentions_context_and_path() {
		let error = FileIOError::from((
			"/tmp/missing.png",
			io::Error::from(io::ErrorKind::PermissionDenied),
			"Failed to stage download",
		));

		let message = error.to_string();
		assert!(message.contains("(Failed to stage download)"));
		assert!(message.contains("/tmp/missing.png"));
	}
}
