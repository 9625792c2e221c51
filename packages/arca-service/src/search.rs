use arca_domain::SearchHit;
use serde::{Deserialize, Serialize};

use crate::{ArcaService, Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub text: String,
	#[serde(default)]
	pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchHit>,
}

impl ArcaService {
	/// Free-text similarity search over the synced artifacts.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		if req.text.trim().is_empty() {
			return Err(Error::invalid("text is required."));
		}

		let limit = self.resolve_limit(req.limit)?;
		let vector = self.embed(&req.text).await?;
		let results = self.search_vector(&vector, limit).await?;

		tracing::debug!(limit, hits = results.len(), "Search completed.");

		Ok(SearchResponse { results })
	}

	/// Nearest neighbours of `vector`, at most `limit`, best first.
	pub async fn search_vector(&self, vector: &[f32], limit: u64) -> Result<Vec<SearchHit>> {
		self.index.search(vector, limit).await.map_err(Error::index_query)
	}

	fn resolve_limit(&self, requested: Option<i64>) -> Result<u64> {
		let search = &self.cfg.search;
		let Some(limit) = requested else { return Ok(u64::from(search.default_limit)) };

		if limit <= 0 {
			return Err(Error::invalid("limit must be a positive integer."));
		}
		if limit > i64::from(search.max_limit) {
			return Err(Error::invalid(format!("limit must not exceed {}.", search.max_limit)));
		}

		Ok(limit as u64)
	}
}
