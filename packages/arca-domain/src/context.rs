//! Per-intent reshaping of retrieved payloads into the context handed to the answer model.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::Intent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
	pub id: u64,
	/// Cosine similarity, higher is closer.
	pub score: f32,
	pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryContext {
	#[serde(rename = "type", serialize_with = "serialize_context_type")]
	pub intent: Intent,
	pub query: String,
	#[serde(rename = "data")]
	pub items: Vec<ContextItem>,
	#[serde(rename = "totalResults")]
	pub total_results: usize,
}
impl QueryContext {
	pub fn new(intent: Intent, query: impl Into<String>, items: Vec<ContextItem>) -> Self {
		Self { intent, query: query.into(), total_results: items.len(), items }
	}

	/// Shapes `hits` for `intent`, keeping their rank order.
	pub fn from_hits(intent: Intent, query: impl Into<String>, hits: &[SearchHit]) -> Self {
		Self::new(intent, query, shape(intent, hits))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextItem {
	Artifact(ArtifactSummary),
	Deployment(DeploymentSummary),
	Issue(IssueSummary),
	Commit(CommitSummary),
}
impl ContextItem {
	pub fn name(&self) -> Option<&str> {
		match self {
			Self::Artifact(item) => item.name.as_deref(),
			Self::Deployment(item) => item.name.as_deref(),
			Self::Issue(item) => item.name.as_deref(),
			Self::Commit(item) => item.name.as_deref(),
		}
	}

	pub fn version(&self) -> Option<&str> {
		match self {
			Self::Artifact(item) => item.version.as_deref(),
			Self::Deployment(item) => item.version.as_deref(),
			Self::Issue(item) => item.version.as_deref(),
			Self::Commit(item) => item.version.as_deref(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactSummary {
	pub name: Option<String>,
	pub version: Option<String>,
	#[serde(rename = "type")]
	pub kind: Option<String>,
	pub description: Option<String>,
	/// `round(score * 100)`.
	pub relevance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
	pub name: Option<String>,
	pub version: Option<String>,
	pub deployed_at: Value,
	pub status: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueSummary {
	pub name: Option<String>,
	pub version: Option<String>,
	pub issues: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
	pub name: Option<String>,
	pub version: Option<String>,
	pub commit_hash: Value,
	pub branch_name: Option<Value>,
}

pub fn shape(intent: Intent, hits: &[SearchHit]) -> Vec<ContextItem> {
	match intent {
		Intent::ArtifactSearch => hits.iter().map(artifact_summary).collect(),
		Intent::DeploymentInfo => hits.iter().filter_map(deployment_summary).collect(),
		Intent::IssueQuery => hits.iter().filter_map(issue_summary).collect(),
		Intent::CommitInfo => hits.iter().filter_map(commit_summary).collect(),
	}
}

fn artifact_summary(hit: &SearchHit) -> ContextItem {
	ContextItem::Artifact(ArtifactSummary {
		name: payload_text(&hit.payload, "name"),
		version: payload_text(&hit.payload, "version"),
		kind: payload_text(&hit.payload, "type"),
		description: payload_text(&hit.payload, "description"),
		relevance: (f64::from(hit.score) * 100.0).round() as i64,
	})
}

fn deployment_summary(hit: &SearchHit) -> Option<ContextItem> {
	let deployed_at = present(hit.payload.get("lastUpdated"))?;

	Some(ContextItem::Deployment(DeploymentSummary {
		name: payload_text(&hit.payload, "name"),
		version: payload_text(&hit.payload, "version"),
		deployed_at: deployed_at.clone(),
		status: present(hit.payload.get("status")).cloned(),
	}))
}

fn issue_summary(hit: &SearchHit) -> Option<ContextItem> {
	let issues = hit.payload.get("metadata").and_then(|metadata| present(metadata.get("issues")))?;

	Some(ContextItem::Issue(IssueSummary {
		name: payload_text(&hit.payload, "name"),
		version: payload_text(&hit.payload, "version"),
		issues: issues.clone(),
	}))
}

fn commit_summary(hit: &SearchHit) -> Option<ContextItem> {
	let commit_hash = present(hit.payload.get("commitHash"))?;

	Some(ContextItem::Commit(CommitSummary {
		name: payload_text(&hit.payload, "name"),
		version: payload_text(&hit.payload, "version"),
		commit_hash: commit_hash.clone(),
		branch_name: present(hit.payload.get("branchName")).cloned(),
	}))
}

/// A payload value counts as present unless it is missing, null, `false`, or an empty string.
pub fn present(value: Option<&Value>) -> Option<&Value> {
	match value? {
		Value::Null | Value::Bool(false) => None,
		Value::String(text) if text.is_empty() => None,
		value => Some(value),
	}
}

fn payload_text(payload: &Map<String, Value>, key: &str) -> Option<String> {
	match present(payload.get(key))? {
		Value::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}

fn serialize_context_type<S>(intent: &Intent, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(intent.context_type())
}
