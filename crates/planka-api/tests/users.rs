use std::sync::Arc;

use planka_api::{users, Error};

use reqwest::Method;
use serde_json::json;
use tempfile::{tempdir, TempDir};
use tracing_test::traced_test;

mod common;

use common::{request_config, user, MockTransport, Reply};

fn directory() -> (TempDir, Arc<MockTransport>) {
	let transport = MockTransport::new();
	transport.on(
		Method::GET,
		"/api/users",
		Reply::Json(json!({
			"items": [
				user("1", "Ada Lovelace", "ada", "x@y.com"),
				user("2", "Grace Hopper", "grace", "x@y.com.au"),
				user("3", "Ada Byron", "ADA.B", "ada@byron.test"),
				{ "id": 4, "name": "No Mail", "username": null, "email": null },
			],
		})),
	);

	(tempdir().unwrap(), transport)
}

#[tokio::test]
#[traced_test]
async fn list_is_idempotent() {
	let (temp, transport) = directory();
	let config = request_config(&transport, temp.path());

	let first = users::list(&config).await.unwrap();
	let second = users::list(&config).await.unwrap();

	assert_eq!(first, second);
	assert_eq!(first.len(), 4);
	assert_eq!(first[3].id, "4");
	assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
#[traced_test]
async fn email_search_is_exact_and_case_insensitive() {
	let (temp, transport) = directory();
	let config = request_config(&transport, temp.path());

	let found = users::search_by_email(&config, "X@Y.com").await.unwrap();

	assert_eq!(found.len(), 1);
	assert_eq!(found[0].id, "1");
}

#[tokio::test]
#[traced_test]
async fn username_search_is_exact_and_case_insensitive() {
	let (temp, transport) = directory();
	let config = request_config(&transport, temp.path());

	let found = users::search_by_username(&config, "ada.b").await.unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].id, "3");

	assert!(users::search_by_username(&config, "ad")
		.await
		.unwrap()
		.is_empty());
}

#[tokio::test]
#[traced_test]
async fn name_search_matches_substrings() {
	let (temp, transport) = directory();
	let config = request_config(&transport, temp.path());

	let found = users::search_by_name(&config, "ada").await.unwrap();

	assert_eq!(
		found.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(),
		["1", "3"]
	);
}

#[tokio::test]
#[traced_test]
async fn id_by_name_takes_first_match() {
	let (temp, transport) = directory();
	let config = request_config(&transport, temp.path());

	assert_eq!(
		users::get_id_by_name(&config, "ADA").await.unwrap(),
		Some("1".to_string())
	);
	assert_eq!(users::get_id_by_name(&config, "Linus").await.unwrap(), None);
}

#[tokio::test]
#[traced_test]
async fn blank_query_is_rejected_without_a_call() {
	let (temp, transport) = directory();
	let config = request_config(&transport, temp.path());

	let error = users::search_by_name(&config, "  ").await.unwrap_err();

	assert!(matches!(error.root(), Error::Validation(_)));
	assert!(error.to_string().starts_with("Failed to search users by name: "));
	assert!(transport.calls().is_empty());
}

#[tokio::test]
#[traced_test]
async fn get_fetches_single_user() {
	let (temp, transport) = directory();
	transport.on(
		Method::GET,
		"/api/users/2",
		Reply::Json(json!({ "item": user("2", "Grace Hopper", "grace", "x@y.com.au") })),
	);
	let config = request_config(&transport, temp.path());

	let grace = users::get(&config, "2").await.unwrap();

	assert_eq!(grace.username.as_deref(), Some("grace"));
}

#[tokio::test]
#[traced_test]
async fn get_surfaces_http_status() {
	let (temp, transport) = directory();
	transport.on(Method::GET, "/api/users/9", Reply::Status(404, "User not found"));
	let config = request_config(&transport, temp.path());

	let error = users::get(&config, "9").await.unwrap_err();

	assert_eq!(error.status(), Some(404));
	assert_eq!(error.to_string(), "Failed to get user: HTTP 404: User not found");
}
