use arca_domain::Intent;
use arca_providers::chat::ChatMessage;

use crate::ArcaService;

/// Classification is deterministic regardless of the configured answer temperature.
pub const CLASSIFIER_TEMPERATURE: f32 = 0.0;

pub const CLASSIFIER_PROMPT: &str = "\
Classify the intent of the user's question about build artifacts.
Possible intents:
- ARTIFACT_SEARCH: looking for artifacts by name, type, or description
- DEPLOYMENT_INFO: asking when or where an artifact was deployed, or its deployment status
- ISSUE_QUERY: asking about known issues or problems with an artifact
- COMMIT_INFO: asking which commit or branch produced an artifact
Reply with the intent label only.";

impl ArcaService {
	/// Never fails: unreadable model output and provider errors both yield the default intent.
	pub async fn classify(&self, query: &str) -> Intent {
		let messages = [ChatMessage::system(CLASSIFIER_PROMPT), ChatMessage::user(query)];
		let raw = match self
			.providers
			.chat
			.complete(&self.cfg.providers.llm, &messages, CLASSIFIER_TEMPERATURE)
			.await
		{
			Ok(raw) => raw,
			Err(err) => {
				tracing::warn!(error = %err, "Intent classification failed. Using the default intent.");

				return Intent::default();
			},
		};

		match Intent::parse_label(&raw) {
			Some(intent) => intent,
			None => {
				tracing::warn!(output = %raw, "Unrecognized intent label. Using the default intent.");

				Intent::default()
			},
		}
	}
}
