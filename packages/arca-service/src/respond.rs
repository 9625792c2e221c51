use std::fmt::Write as _;

use arca_domain::{
	ArtifactSummary, CommitSummary, ContextItem, DeploymentSummary, Intent, IssueSummary,
	QueryContext,
};
use arca_providers::chat::ChatMessage;
use serde_json::Value;

use crate::{ArcaService, Result};

impl ArcaService {
	/// Asks the answer model to reply to `query` using only the assembled context.
	pub async fn generate_response(
		&self,
		query: &str,
		context: &QueryContext,
		intent: Intent,
	) -> Result<String> {
		let llm = &self.cfg.providers.llm;
		let messages =
			[ChatMessage::system(system_prompt(intent)), ChatMessage::user(user_prompt(query, context))];

		self.providers.chat.complete(llm, &messages, llm.temperature).await
	}
}

pub fn system_prompt(intent: Intent) -> &'static str {
	match intent {
		Intent::ArtifactSearch =>
			"You help engineers find build artifacts. Using only the artifacts listed, recommend \
			 the ones that best match the request and explain briefly why each fits.",
		Intent::DeploymentInfo =>
			"You answer questions about artifact deployments. Using only the artifacts listed, \
			 report when each was last deployed and its current status.",
		Intent::IssueQuery =>
			"You answer questions about known artifact issues. Using only the artifacts listed, \
			 summarize the reported issues and which versions they affect.",
		Intent::CommitInfo =>
			"You answer questions about the source of artifacts. Using only the artifacts listed, \
			 report the commit and branch each was built from.",
	}
}

pub fn user_prompt(query: &str, context: &QueryContext) -> String {
	let mut prompt = format!("User asked: \"{query}\"\n\n");

	if context.items.is_empty() {
		prompt.push_str("Available artifacts: none matched the question.");

		return prompt;
	}

	prompt.push_str("Available artifacts:");

	for (idx, item) in context.items.iter().enumerate() {
		let _ = write!(prompt, "\n{}. {}", idx + 1, prompt_line(item));
	}

	prompt
}

fn prompt_line(item: &ContextItem) -> String {
	let head = format!(
		"{} ({})",
		item.name().unwrap_or("unnamed artifact"),
		item.version().unwrap_or("unknown version")
	);

	match item {
		ContextItem::Artifact(ArtifactSummary { kind, description, relevance, .. }) => {
			let mut line = head;

			if let Some(kind) = kind {
				let _ = write!(line, " [{kind}]");
			}
			if let Some(description) = description {
				let _ = write!(line, ": {description}");
			}

			let _ = write!(line, " (relevance {relevance}%)");

			line
		},
		ContextItem::Deployment(DeploymentSummary { deployed_at, status, .. }) => {
			let mut line = format!("{head} - deployed at {}", value_text(deployed_at));

			if let Some(status) = status {
				let _ = write!(line, ", status: {}", value_text(status));
			}

			line
		},
		ContextItem::Issue(IssueSummary { issues, .. }) =>
			format!("{head} - issues: {}", value_text(issues)),
		ContextItem::Commit(CommitSummary { commit_hash, branch_name, .. }) => {
			let mut line = format!("{head} - commit {}", value_text(commit_hash));

			if let Some(branch) = branch_name {
				let _ = write!(line, " on branch {}", value_text(branch));
			}

			line
		},
	}
}

fn value_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use arca_domain::SearchHit;

	use super::*;

	fn context(intent: Intent, payloads: Vec<Value>) -> QueryContext {
		let hits: Vec<SearchHit> = payloads
			.into_iter()
			.enumerate()
			.map(|(idx, payload)| {
				let Value::Object(payload) = payload else { panic!("Payload must be an object.") };

				SearchHit { id: idx as u64, score: 0.9, payload }
			})
			.collect();

		QueryContext::from_hits(intent, "q", &hits)
	}

	#[test]
	fn empty_context_is_stated() {
		let prompt = user_prompt("anything", &context(Intent::ArtifactSearch, Vec::new()));

		assert!(prompt.starts_with("User asked: \"anything\""));
		assert!(prompt.contains("none matched"));
	}

	#[test]
	fn one_numbered_line_per_item() {
		let ctx = context(
			Intent::ArtifactSearch,
			vec![
				serde_json::json!({ "name": "auth", "version": "1.0.0", "type": "docker" }),
				serde_json::json!({ "name": "billing" }),
			],
		);
		let prompt = user_prompt("q", &ctx);

		assert!(prompt.contains("\n1. auth (1.0.0) [docker] (relevance 90%)"));
		assert!(prompt.contains("\n2. billing (unknown version) (relevance 90%)"));
	}

	#[test]
	fn commit_line_names_hash_and_branch() {
		let ctx = context(
			Intent::CommitInfo,
			vec![serde_json::json!({ "name": "api", "commitHash": "abc123", "branchName": "main" })],
		);

		assert!(user_prompt("q", &ctx).contains("api (unknown version) - commit abc123 on branch main"));
	}

	#[test]
	fn every_intent_has_a_distinct_system_prompt() {
		let prompts: Vec<&str> = Intent::ALL.iter().map(|intent| system_prompt(*intent)).collect();

		for (idx, prompt) in prompts.iter().enumerate() {
			assert!(!prompts[idx + 1..].contains(prompt));
		}
	}
}
