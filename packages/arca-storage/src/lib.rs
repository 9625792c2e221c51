//! The vector index: id → (vector, payload) with idempotent upsert and k-nearest-neighbour search.

pub mod gate;
pub mod memory;
pub mod qdrant;

mod error;

pub use arca_domain::SearchHit;
pub use error::Error;

use std::{future::Future, pin::Pin};

use serde_json::{Map, Value};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const LAST_UPDATED_FIELD: &str = "lastUpdated";

pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn collection(&self) -> &str;

	/// Inserts or overwrites the point `id`, stamping `lastUpdated`. Returns once the write is
	/// acknowledged as durable.
	fn upsert<'a>(
		&'a self,
		id: u64,
		vector: Vec<f32>,
		payload: Map<String, Value>,
	) -> BoxFuture<'a, Result<()>>;

	/// Up to `limit` nearest points, best first. An empty index yields an empty list.
	fn search<'a>(&'a self, vector: &'a [f32], limit: u64) -> BoxFuture<'a, Result<Vec<SearchHit>>>;

	/// Liveness probe. Never fails; an unreachable backend reports `false`.
	fn health_check(&self) -> BoxFuture<'_, bool>;
}

pub(crate) fn stamp_last_updated(payload: &mut Map<String, Value>) {
	payload.insert(
		LAST_UPDATED_FIELD.to_string(),
		Value::String(arca_domain::timestamp::now_rfc3339()),
	);
}

pub(crate) fn check_dimension(expected: usize, vector: &[f32]) -> Result<()> {
	if vector.len() != expected {
		return Err(Error::InvalidArgument(format!(
			"Vector dimension mismatch: expected {expected}, got {}.",
			vector.len()
		)));
	}

	Ok(())
}

pub(crate) fn check_limit(limit: u64) -> Result<()> {
	if limit == 0 {
		return Err(Error::InvalidArgument("Search limit must be greater than zero.".to_string()));
	}

	Ok(())
}
