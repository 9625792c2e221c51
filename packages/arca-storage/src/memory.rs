//! In-process [`VectorIndex`] with brute-force cosine search.
//!
//! Used by tests and local runs that have no Qdrant available.

use std::{cmp::Ordering, collections::BTreeMap, sync::RwLock};

use serde_json::{Map, Value};

use crate::{BoxFuture, Result, SearchHit, VectorIndex};

struct StoredPoint {
	vector: Vec<f32>,
	payload: Map<String, Value>,
}

pub struct MemoryIndex {
	collection: String,
	vector_dim: usize,
	points: RwLock<BTreeMap<u64, StoredPoint>>,
}
impl MemoryIndex {
	pub fn new(collection: impl Into<String>, vector_dim: usize) -> Self {
		Self { collection: collection.into(), vector_dim, points: RwLock::new(BTreeMap::new()) }
	}

	pub fn len(&self) -> usize {
		self.points.read().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn payload(&self, id: u64) -> Option<Map<String, Value>> {
		let points = self.points.read().unwrap_or_else(|err| err.into_inner());

		points.get(&id).map(|point| point.payload.clone())
	}

	fn upsert_point(&self, id: u64, vector: Vec<f32>, mut payload: Map<String, Value>) -> Result<()> {
		crate::check_dimension(self.vector_dim, &vector)?;
		crate::stamp_last_updated(&mut payload);

		let mut points = self.points.write().unwrap_or_else(|err| err.into_inner());

		points.insert(id, StoredPoint { vector, payload });

		Ok(())
	}

	fn search_points(&self, vector: &[f32], limit: u64) -> Result<Vec<SearchHit>> {
		crate::check_limit(limit)?;
		crate::check_dimension(self.vector_dim, vector)?;

		let points = self.points.read().unwrap_or_else(|err| err.into_inner());
		let mut hits: Vec<SearchHit> = points
			.iter()
			.map(|(id, point)| SearchHit {
				id: *id,
				score: cosine_sim(vector, &point.vector),
				payload: point.payload.clone(),
			})
			.collect();

		hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
		hits.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

		Ok(hits)
	}
}
impl VectorIndex for MemoryIndex {
	fn collection(&self) -> &str {
		&self.collection
	}

	fn upsert<'a>(
		&'a self,
		id: u64,
		vector: Vec<f32>,
		payload: Map<String, Value>,
	) -> BoxFuture<'a, Result<()>> {
		let result = self.upsert_point(id, vector, payload);

		Box::pin(async move { result })
	}

	fn search<'a>(&'a self, vector: &'a [f32], limit: u64) -> BoxFuture<'a, Result<Vec<SearchHit>>> {
		let result = self.search_points(vector, limit);

		Box::pin(async move { result })
	}

	fn health_check(&self) -> BoxFuture<'_, bool> {
		Box::pin(async { true })
	}
}

fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
	if a.len() != b.len() || a.is_empty() {
		return 0.0;
	}

	let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
	let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
	let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

	if mag_a < f32::EPSILON || mag_b < f32::EPSILON { 0.0 } else { dot / (mag_a * mag_b) }
}
