use std::{
	env, fmt,
	path::{Path, PathBuf},
};

use url::Url;

use crate::Error;

/// Some hosts refuse downloads from unknown agents, so URL uploads present themselves as a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
	AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const BASE_URL_VAR: &str = "PLANKA_BASE_URL";
const EMAIL_VAR: &str = "PLANKA_AGENT_EMAIL";
const PASSWORD_VAR: &str = "PLANKA_AGENT_PASSWORD";
const TEMP_DIR_VAR: &str = "PLANKA_TEMP_DIR";

#[derive(Clone)]
pub struct Credentials {
	pub email_or_username: String,
	pub password: String,
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("email_or_username", &self.email_or_username)
			.field("password", &"<redacted>")
			.finish()
	}
}

#[derive(Debug, Clone)]
pub struct Config {
	pub base_url: Url,
	pub credentials: Credentials,
	/// Root for the scoped directories URL uploads stage their downloads in
	pub temp_dir: PathBuf,
	pub user_agent: String,
}

/// `<os temp dir>/planka-client`
#[must_use]
pub fn default_temp_dir() -> PathBuf {
	env::temp_dir().join("planka-client")
}

impl Config {
	#[must_use]
	pub fn new(base_url: Url, credentials: Credentials) -> Self {
		Self {
			base_url,
			credentials,
			temp_dir: default_temp_dir(),
			user_agent: DEFAULT_USER_AGENT.to_string(),
		}
	}

	/// Reads `PLANKA_BASE_URL`, `PLANKA_AGENT_EMAIL`, `PLANKA_AGENT_PASSWORD` and the optional
	/// `PLANKA_TEMP_DIR`.
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let required = |key: &str| {
			lookup(key)
				.filter(|value| !value.trim().is_empty())
				.ok_or_else(|| Error::Config(format!("'${key}' is not set")))
		};

		let base_url = required(BASE_URL_VAR)?;
		let base_url = Url::parse(&base_url)
			.map_err(|e| Error::Config(format!("'${BASE_URL_VAR}' is not a valid URL: {e}")))?;

		let config = Self::new(
			base_url,
			Credentials {
				email_or_username: required(EMAIL_VAR)?,
				password: required(PASSWORD_VAR)?,
			},
		);

		Ok(match lookup(TEMP_DIR_VAR).filter(|dir| !dir.trim().is_empty()) {
			Some(dir) => config.with_temp_dir(dir),
			None => config,
		})
	}

	#[must_use]
	pub fn with_temp_dir(mut self, temp_dir: impl AsRef<Path>) -> Self {
		self.temp_dir = temp_dir.as_ref().to_path_buf();
		self
	}

	#[must_use]
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();
		self
	}

	/// Base URL without a trailing slash, ready to have `/api/...` appended.
	pub(crate) fn api_root(&self) -> String {
		self.base_url.as_str().trim_end_matches('/').to_string()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars = vars
			.iter()
			.map(|(k, v)| ((*k).to_string(), (*v).to_string()))
			.collect::<HashMap<_, _>>();

		move |key| vars.get(key).cloned()
	}

	#[test]
	fn reads_all_variables() {
		let config = Config::from_lookup(lookup(&[
			(BASE_URL_VAR, "https://planka.example/"),
			(EMAIL_VAR, "agent@planka.example"),
			(PASSWORD_VAR, "hunter2"),
			(TEMP_DIR_VAR, "/var/tmp/planka"),
		]))
		.unwrap();

		assert_eq!(config.api_root(), "https://planka.example");
		assert_eq!(config.credentials.email_or_username, "agent@planka.example");
		assert_eq!(config.temp_dir, PathBuf::from("/var/tmp/planka"));
		assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
	}

	#[test]
	fn temp_dir_defaults_to_os_temp() {
		let config = Config::from_lookup(lookup(&[
			(BASE_URL_VAR, "http://localhost:1337"),
			(EMAIL_VAR, "agent"),
			(PASSWORD_VAR, "secret"),
		]))
		.unwrap();

		assert_eq!(config.temp_dir, default_temp_dir());
	}

	#[test]
	fn missing_password_is_reported() {
		let error = Config::from_lookup(lookup(&[
			(BASE_URL_VAR, "http://localhost:1337"),
			(EMAIL_VAR, "agent"),
		]))
		.unwrap_err();

		assert!(error.to_string().contains(PASSWORD_VAR));
	}

	#[test]
	fn invalid_base_url_is_reported() {
		let error = Config::from_lookup(lookup(&[
			(BASE_URL_VAR, "not a url"),
			(EMAIL_VAR, "agent"),
			(PASSWORD_VAR, "secret"),
		]))
		.unwrap_err();

		assert!(matches!(error, Error::Config(_)));
	}

	#[test]
	fn password_is_not_printed() {
		let credentials = Credentials {
			email_or_username: "agent".to_string(),
			password: "hunter2".to_string(),
		};

		assert!(!format!("{credentials:?}").contains("hunter2"));
	}
}
