use arca_domain::{Intent, QueryContext};
use serde::{Deserialize, Serialize};

use crate::{ArcaService, Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
	#[serde(default)]
	pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
	pub response: String,
	pub context: QueryContext,
	pub intent: Intent,
}

impl ArcaService {
	/// Classify, retrieve, then answer. Classification problems degrade to the default intent;
	/// retrieval and generation failures are returned.
	pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::invalid("query is required."));
		}

		let intent = self.classify(query).await;

		tracing::info!(intent = intent.as_str(), "Answering chat query.");

		let context = self.assemble_context(query, intent).await?;
		let response = self.generate_response(query, &context, intent).await?;

		Ok(ChatResponse { response, context, intent })
	}
}
