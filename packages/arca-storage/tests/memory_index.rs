use serde_json::{Map, Value, json};

use arca_storage::{Error, LAST_UPDATED_FIELD, VectorIndex, memory::MemoryIndex};

fn payload(value: Value) -> Map<String, Value> {
	let Value::Object(map) = value else { panic!("Payload must be an object.") };

	map
}

async fn seeded_index() -> MemoryIndex {
	let index = MemoryIndex::new("artifacts", 3);

	for (id, vector) in [
		(1, vec![1.0, 0.0, 0.0]),
		(2, vec![0.9, 0.1, 0.0]),
		(3, vec![0.0, 1.0, 0.0]),
		(4, vec![0.0, 0.0, 1.0]),
		(5, vec![0.5, 0.5, 0.0]),
		(6, vec![-1.0, 0.0, 0.0]),
	] {
		index
			.upsert(id, vector, payload(json!({ "name": format!("artifact-{id}") })))
			.await
			.expect("Upsert failed.");
	}

	index
}

#[tokio::test]
async fn search_on_empty_index_returns_no_hits() {
	let index = MemoryIndex::new("artifacts", 3);
	let hits = index.search(&[1.0, 0.0, 0.0], 5).await.expect("Search failed.");

	assert!(hits.is_empty());
}

#[tokio::test]
async fn search_returns_at_most_limit_hits_by_descending_score() {
	let index = seeded_index().await;

	for limit in [1, 3, 5, 10] {
		let hits = index.search(&[1.0, 0.2, 0.0], limit).await.expect("Search failed.");

		assert!(hits.len() <= limit as usize);
		assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
	}

	let top = index.search(&[1.0, 0.0, 0.0], 1).await.expect("Search failed.");

	assert_eq!(top[0].id, 1);
	assert!((top[0].score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn upsert_overwrites_by_id() {
	let index = MemoryIndex::new("artifacts", 3);

	index.upsert(7, vec![1.0, 0.0, 0.0], payload(json!({ "version": "1.0.0" }))).await.expect("Upsert failed.");
	index.upsert(7, vec![0.0, 1.0, 0.0], payload(json!({ "version": "2.0.0" }))).await.expect("Upsert failed.");

	assert_eq!(index.len(), 1);

	let stored = index.payload(7).expect("Point must exist.");

	assert_eq!(stored.get("version"), Some(&json!("2.0.0")));

	let hits = index.search(&[0.0, 1.0, 0.0], 5).await.expect("Search failed.");

	assert_eq!(hits.len(), 1);
	assert!((hits[0].score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn upsert_stamps_last_updated() {
	let index = MemoryIndex::new("artifacts", 3);

	index
		.upsert(1, vec![1.0, 0.0, 0.0], payload(json!({ "lastUpdated": "stale" })))
		.await
		.expect("Upsert failed.");

	let stamped = index.payload(1).and_then(|p| p.get(LAST_UPDATED_FIELD).cloned());

	assert!(matches!(stamped, Some(Value::String(ref ts)) if ts != "stale" && ts.ends_with('Z')));
}

#[tokio::test]
async fn dimension_mismatch_is_rejected() {
	let index = MemoryIndex::new("artifacts", 3);
	let err = index.upsert(1, vec![1.0, 0.0], Map::new()).await.expect_err("Expected mismatch.");

	assert!(matches!(err, Error::InvalidArgument(_)));
	assert!(index.is_empty());

	let err = index.search(&[1.0], 5).await.expect_err("Expected mismatch.");

	assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn zero_limit_is_rejected() {
	let index = seeded_index().await;
	let err = index.search(&[1.0, 0.0, 0.0], 0).await.expect_err("Expected limit error.");

	assert!(err.to_string().contains("Search limit must be greater than zero."));
}

#[tokio::test]
async fn memory_index_is_always_healthy() {
	assert!(MemoryIndex::new("artifacts", 3).health_check().await);
}
