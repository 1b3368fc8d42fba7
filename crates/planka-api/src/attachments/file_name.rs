use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const FALLBACK_EXTENSION: &str = ".bin";

const MIME_EXTENSIONS: &[(&str, &str)] = &[
	("image/jpeg", ".jpg"),
	("image/jpg", ".jpg"),
	("image/png", ".png"),
	("image/gif", ".gif"),
	("image/webp", ".webp"),
	("image/svg+xml", ".svg"),
	("image/bmp", ".bmp"),
	("image/tiff", ".tiff"),
	("image/x-icon", ".ico"),
	("application/pdf", ".pdf"),
	("application/zip", ".zip"),
	("application/gzip", ".gz"),
	("application/json", ".json"),
	("application/xml", ".xml"),
	("application/msword", ".doc"),
	(
		"application/vnd.openxmlformats-officedocument.wordprocessingml.document",
		".docx",
	),
	("application/vnd.ms-excel", ".xls"),
	(
		"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
		".xlsx",
	),
	("application/vnd.ms-powerpoint", ".ppt"),
	(
		"application/vnd.openxmlformats-officedocument.presentationml.presentation",
		".pptx",
	),
	("text/plain", ".txt"),
	("text/html", ".html"),
	("text/css", ".css"),
	("text/csv", ".csv"),
	("text/markdown", ".md"),
	("audio/mpeg", ".mp3"),
	("audio/wav", ".wav"),
	("audio/ogg", ".ogg"),
	("video/mp4", ".mp4"),
	("video/webm", ".webm"),
	("video/quicktime", ".mov"),
];

static BASENAME_EXTENSION: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\.[A-Za-z0-9]{2,4}$").expect("valid basename extension regex"));

static URL_EXTENSION: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"\.([A-Za-z0-9]{2,4})(?:[?#]|$)").expect("valid URL extension regex")
});

/// Picks the name an attachment downloaded from `url` is uploaded under.
///
/// In order: the explicit name, the URL basename when it already carries a 2-4 character
/// extension, then a generated `download_<millis>` with an extension taken from the content type,
/// from anything extension-like in the URL, or `.bin`. Extensions keep the case they were found in.
pub(crate) fn resolve(
	explicit: Option<&str>,
	url: &Url,
	content_type: Option<&str>,
	now_millis: i64,
) -> String {
	if let Some(name) = explicit.map(str::trim).filter(|name| !name.is_empty()) {
		return sanitize(name);
	}

	if let Some(name) = basename(url).filter(|name| BASENAME_EXTENSION.is_match(name)) {
		return sanitize(name);
	}

	let extension = content_type
		.and_then(extension_for_mime)
		.map(str::to_string)
		.or_else(|| {
			URL_EXTENSION
				.captures(url.as_str())
				.map(|captures| format!(".{}", &captures[1]))
		})
		.unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

	format!("download_{now_millis}{extension}")
}

fn basename(url: &Url) -> Option<&str> {
	url.path_segments()
		.and_then(Iterator::last)
		.filter(|segment| !segment.is_empty())
}

/// Extension for a `Content-Type` value, ignoring parameters such as `charset`.
pub(crate) fn extension_for_mime(content_type: &str) -> Option<&'static str> {
	let mime = content_type
		.split(';')
		.next()
		.unwrap_or_default()
		.trim()
		.to_ascii_lowercase();

	MIME_EXTENSIONS
		.iter()
		.find(|(known, _)| *known == mime)
		.map(|(_, extension)| *extension)
}

fn sanitize(name: &str) -> String {
	name.chars()
		.map(|c| match c {
			'/' | '\\' | '\0' => '_',
			c => c,
		})
		.collect()
}
