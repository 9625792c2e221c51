use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

#[test]
fn builds_bearer_auth_header() {
	let headers =
		arca_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn adds_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("OpenAI-Organization".to_string(), Value::String("org-1".to_string()));

	let headers =
		arca_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	assert_eq!(headers.get("openai-organization").expect("Missing default header."), "org-1");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("X-Retries".to_string(), Value::from(3));

	let err = arca_providers::auth_headers("secret", &defaults)
		.expect_err("Expected non-string header to be rejected.");

	assert!(matches!(err, arca_providers::Error::NonStringHeader { ref name } if name == "X-Retries"));
}
