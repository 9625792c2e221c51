use serde_json::{Value, json};

use arca_domain::{
	ArtifactId, ArtifactRecord, ContextItem, Intent, QueryContext, RecordError, SearchHit,
	SyncStatus, artifact, context,
};

fn record(raw: Value) -> ArtifactRecord {
	ArtifactRecord::from_json(raw).expect("Failed to decode artifact record.")
}

fn hit(id: u64, score: f32, payload: Value) -> SearchHit {
	let Value::Object(payload) = payload else { panic!("Payload must be an object.") };

	SearchHit { id, score, payload }
}

fn mixed_hits() -> Vec<SearchHit> {
	vec![
		hit(
			1,
			0.93,
			json!({
				"name": "user-service",
				"version": "1.0.0",
				"type": "service",
				"lastUpdated": "2024-05-01T00:00:00Z",
				"status": "deployed",
				"commitHash": "abc123",
				"branchName": "main",
			}),
		),
		hit(2, 0.81, json!({ "name": "billing", "version": "2.1.0", "metadata": { "issues": ["CVE-1"] } })),
		hit(3, 0.77, json!({ "name": "gateway", "version": "0.9.0", "lastUpdated": "2024-04-01T00:00:00Z" })),
		hit(4, 0.52, json!({ "name": "docs", "version": "3.0.0", "commitHash": null })),
		hit(5, 0.31, json!({ "name": "legacy", "metadata": { "owner": "ops" } })),
	]
}

#[test]
fn decodes_registry_record_and_keeps_unknown_fields() {
	let record = record(json!({
		"id": "17",
		"name": "user-service",
		"type": "service",
		"sizeBytes": 2048,
		"isSynced": false,
		"commitHash": "abc123",
	}));

	assert_eq!(record.id, ArtifactId(17));
	assert_eq!(record.kind.as_deref(), Some("service"));
	assert_eq!(record.size_bytes, Some(2_048));
	assert_eq!(record.extra.get("commitHash"), Some(&json!("abc123")));
	assert_eq!(record.extra.get("isSynced"), Some(&json!(false)));
}

#[test]
fn rejects_records_without_usable_id() {
	assert_eq!(ArtifactRecord::from_json(json!([1, 2])).unwrap_err(), RecordError::NotAnObject);
	assert!(matches!(
		ArtifactRecord::from_json(json!({ "name": "x" })),
		Err(RecordError::Decode { .. })
	));
	assert!(matches!(
		ArtifactRecord::from_json(json!({ "id": "not-a-number", "name": "x" })),
		Err(RecordError::Decode { .. })
	));
	assert_eq!(artifact::raw_id(&json!({ "id": "not-a-number" })), json!("not-a-number"));
	assert_eq!(artifact::raw_id(&json!("scalar")), Value::Null);
}

#[test]
fn embedding_text_follows_fixed_field_order() {
	let record = record(json!({
		"id": 1,
		"name": "user-service",
		"description": "auth service",
		"type": "service",
		"version": "1.0.0",
		"createdAt": "2024-01-01T10:00:00",
		"updatedAt": "2024-01-02T10:00:00",
		"filePath": "/artifacts/user-service.jar",
		"sizeBytes": 2048,
		"metadata": { "team": "identity" },
	}));
	let text = record.embedding_text(8_000).expect("Expected embedding text.");

	assert_eq!(
		text,
		"user-service auth service service 1.0.0 Created: 2024-01-01T10:00:00 \
		 Updated: 2024-01-02T10:00:00 Path: /artifacts/user-service.jar Size: 2048 \
		 {\"team\":\"identity\"}"
	);
}

#[test]
fn embedding_text_skips_absent_and_blank_fields() {
	let record =
		record(json!({ "id": 1, "name": "user-service", "description": "  ", "metadata": {} }));

	assert_eq!(record.embedding_text(8_000).expect("Expected embedding text."), "user-service");
}

#[test]
fn embedding_text_is_capped() {
	let record = record(json!({ "id": 1, "name": "x".repeat(100) }));

	assert_eq!(record.embedding_text(10).expect("Expected embedding text.").chars().count(), 10);
}

#[test]
fn embedding_text_requires_some_content() {
	let record = record(json!({ "id": 1 }));

	assert_eq!(record.embedding_text(8_000).unwrap_err(), RecordError::EmptyText);
}

#[test]
fn payload_copies_record_and_adds_derived_sections() {
	let record = record(json!({
		"id": 9,
		"name": "user-service",
		"createdAt": "2024-01-01T10:00:00",
		"sizeBytes": 10,
		"checksum": "sha256:abc",
		"status": "deployed",
	}));
	let payload = record.payload("2024-06-01T00:00:00Z").expect("Expected payload.");

	assert_eq!(payload.get("id"), Some(&json!(9)));
	assert_eq!(payload.get("status"), Some(&json!("deployed")));
	assert_eq!(
		payload.get("timeInfo"),
		Some(&json!({
			"created": "2024-01-01T10:00:00",
			"updated": null,
			"synced": "2024-06-01T00:00:00Z",
		}))
	);
	assert_eq!(
		payload.get("stats"),
		Some(&json!({ "size": 10, "hasChecksum": true, "hasMetadata": false }))
	);
	assert!(payload.get("lastUpdated").is_none());
}

#[test]
fn filtering_intents_narrow_without_reordering() {
	let hits = mixed_hits();

	for intent in Intent::ALL {
		let items = context::shape(intent, &hits);

		assert!(items.len() <= hits.len());

		let names: Vec<_> = items.iter().filter_map(ContextItem::name).collect();
		let ranked: Vec<_> = hits
			.iter()
			.filter_map(|hit| hit.payload.get("name").and_then(Value::as_str))
			.filter(|name| names.contains(name))
			.collect();

		assert_eq!(names, ranked, "{intent:?} reordered hits");
	}

	assert_eq!(context::shape(Intent::ArtifactSearch, &hits).len(), 5);
}

#[test]
fn every_shaped_item_satisfies_its_presence_predicate() {
	let hits = mixed_hits();

	for item in context::shape(Intent::DeploymentInfo, &hits) {
		let ContextItem::Deployment(item) = item else { panic!("Expected deployment summary.") };

		assert!(context::present(Some(&item.deployed_at)).is_some());
	}
	for item in context::shape(Intent::IssueQuery, &hits) {
		let ContextItem::Issue(item) = item else { panic!("Expected issue summary.") };

		assert!(context::present(Some(&item.issues)).is_some());
	}
	for item in context::shape(Intent::CommitInfo, &hits) {
		let ContextItem::Commit(item) = item else { panic!("Expected commit summary.") };

		assert!(context::present(Some(&item.commit_hash)).is_some());
	}

	let deployments: Vec<_> = context::shape(Intent::DeploymentInfo, &hits)
		.iter()
		.filter_map(|item| item.name().map(str::to_string))
		.collect();

	assert_eq!(deployments, vec!["user-service", "gateway"]);
	assert_eq!(context::shape(Intent::IssueQuery, &hits).len(), 1);
	assert_eq!(context::shape(Intent::CommitInfo, &hits).len(), 1);
}

#[test]
fn query_context_serializes_with_lowercase_type() {
	let ctx = QueryContext::from_hits(Intent::CommitInfo, "which commit?", &mixed_hits());
	let json = serde_json::to_value(&ctx).expect("Failed to serialize context.");

	assert_eq!(json["type"], json!("commit_info"));
	assert_eq!(json["totalResults"], json!(1));
	assert_eq!(
		json["data"][0],
		json!({
			"name": "user-service",
			"version": "1.0.0",
			"commitHash": "abc123",
			"branchName": "main",
		})
	);
}

#[test]
fn sync_status_is_three_way() {
	assert_eq!(SyncStatus::classify(3, 3), SyncStatus::FullSuccess);
	assert_eq!(SyncStatus::classify(2, 3), SyncStatus::Partial);
	assert_eq!(SyncStatus::classify(0, 3), SyncStatus::Failure);
	assert_eq!(serde_json::to_value(SyncStatus::Partial).expect("serialize"), json!("partial"));
}
