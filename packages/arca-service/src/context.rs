use arca_domain::{Intent, QueryContext};

use crate::{ArcaService, Result};

/// Nearest neighbours fetched per chat query, before intent filtering.
pub const CONTEXT_FAN_OUT: u64 = 5;

impl ArcaService {
	pub async fn assemble_context(&self, query: &str, intent: Intent) -> Result<QueryContext> {
		let vector = self.embed(query).await?;
		let hits = self.search_vector(&vector, CONTEXT_FAN_OUT).await?;
		let context = QueryContext::from_hits(intent, query, &hits);

		tracing::debug!(
			intent = intent.as_str(),
			hits = hits.len(),
			kept = context.total_results,
			"Query context assembled."
		);

		Ok(context)
	}
}
