use planka_api::{card_memberships, Error};

use reqwest::Method;
use serde_json::json;
use tempfile::tempdir;
use tracing_test::traced_test;

mod common;

use common::{request_config, user, MockTransport, Reply};

fn membership(id: &str, user_id: &str) -> serde_json::Value {
	json!({
		"id": id,
		"cardId": "c1",
		"userId": user_id,
		"createdAt": "2024-05-01T10:00:00.000Z",
		"updatedAt": null,
	})
}

#[tokio::test]
#[traced_test]
async fn add_posts_user_id() {
	let temp = tempdir().unwrap();
	let transport = MockTransport::new();
	transport.on(
		Method::POST,
		"/api/cards/c1/card-memberships",
		Reply::Json(json!({ "item": membership("m1", "u1") })),
	);
	let config = request_config(&transport, temp.path());

	let added = card_memberships::add(&config, "c1", "u1").await.unwrap();

	assert_eq!(added.user_id, "u1");
	assert_eq!(transport.calls()[0].body, Some(json!({ "userId": "u1" })));
}

#[tokio::test]
#[traced_test]
async fn remove_addresses_membership_by_user() {
	let temp = tempdir().unwrap();
	let transport = MockTransport::new();
	transport.on(
		Method::DELETE,
		"/api/cards/c1/card-memberships/userId:u1",
		Reply::Json(json!({ "item": membership("m1", "u1") })),
	);
	let config = request_config(&transport, temp.path());

	let removed = card_memberships::remove(&config, "c1", "u1").await.unwrap();

	assert_eq!(removed.id, "m1");

	let calls = transport.calls();
	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].method, Method::DELETE);
	assert_eq!(calls[0].path, "/api/cards/c1/card-memberships/userId:u1");
}

#[tokio::test]
#[traced_test]
async fn blank_user_is_rejected_without_a_call() {
	let temp = tempdir().unwrap();
	let transport = MockTransport::new();
	let config = request_config(&transport, temp.path());

	let error = card_memberships::add(&config, "c1", "").await.unwrap_err();

	assert!(matches!(error.root(), Error::Validation(e) if e.path == "/userId"));
	assert_eq!(transport.total_calls(), 0);
}

#[tokio::test]
#[traced_test]
async fn list_left_joins_users() {
	let temp = tempdir().unwrap();
	let transport = MockTransport::new();
	transport.on(
		Method::GET,
		"/api/cards/c1",
		Reply::Json(json!({
			"item": { "id": "c1" },
			"included": {
				"cardMemberships": [membership("m1", "u1"), membership("m2", "u2")],
				"users": [{ "id": "u1", "name": "A" }],
			},
		})),
	);
	let config = request_config(&transport, temp.path());

	let members = card_memberships::list(&config, "c1").await.unwrap();

	assert_eq!(members.len(), 2);
	assert_eq!(members[0].membership.user_id, "u1");
	assert_eq!(members[0].user.as_ref().map(|u| u.name.as_str()), Some("A"));
	assert_eq!(members[1].membership.user_id, "u2");
	assert_eq!(members[1].user, None);

	let value = serde_json::to_value(&members[1]).unwrap();
	assert_eq!(value["membership"]["userId"], "u2");
	assert!(value["user"].is_null());
}

#[tokio::test]
#[traced_test]
async fn list_rejects_malformed_side_loaded_user() {
	let temp = tempdir().unwrap();
	let transport = MockTransport::new();
	transport.on(
		Method::GET,
		"/api/cards/c1",
		Reply::Json(json!({
			"item": { "id": "c1" },
			"included": {
				"cardMemberships": [membership("m1", "u1")],
				"users": [user("u1", "A", "a", "a@example.com"), { "id": "u2" }],
			},
		})),
	);
	let config = request_config(&transport, temp.path());

	let error = card_memberships::list(&config, "c1").await.unwrap_err();

	assert!(matches!(error.root(), Error::Validation(e) if e.path == "/included/users/1"));
	assert!(error.to_string().starts_with("Failed to get card members: "));
}
