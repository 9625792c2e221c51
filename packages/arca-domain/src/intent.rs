use serde::{Deserialize, Serialize};

/// Coarse query category that selects retrieval shaping and the answer prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
	#[default]
	ArtifactSearch,
	DeploymentInfo,
	IssueQuery,
	CommitInfo,
}
impl Intent {
	pub const ALL: [Self; 4] =
		[Self::ArtifactSearch, Self::DeploymentInfo, Self::IssueQuery, Self::CommitInfo];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::ArtifactSearch => "ARTIFACT_SEARCH",
			Self::DeploymentInfo => "DEPLOYMENT_INFO",
			Self::IssueQuery => "ISSUE_QUERY",
			Self::CommitInfo => "COMMIT_INFO",
		}
	}

	/// Lowercase label used as the `type` of a serialized query context.
	pub fn context_type(self) -> &'static str {
		match self {
			Self::ArtifactSearch => "artifact_search",
			Self::DeploymentInfo => "deployment_info",
			Self::IssueQuery => "issue_query",
			Self::CommitInfo => "commit_info",
		}
	}

	/// Reads a label out of free-form model output.
	///
	/// Accepts the bare label in any case, wrapped in quotes or punctuation, written with spaces
	/// or hyphens, or mentioned once inside a sentence. Output naming two different labels is
	/// ambiguous and yields `None`.
	pub fn parse_label(raw: &str) -> Option<Self> {
		let whole = raw
			.trim()
			.trim_matches(|ch: char| !ch.is_ascii_alphanumeric())
			.to_ascii_uppercase()
			.replace([' ', '-'], "_");

		if let Some(intent) = Self::from_exact(&whole) {
			return Some(intent);
		}

		let mut found = None;

		for token in raw.split(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_')) {
			let Some(intent) = Self::from_exact(&token.to_ascii_uppercase()) else {
				continue;
			};

			match found {
				Some(previous) if previous != intent => return None,
				_ => found = Some(intent),
			}
		}

		found
	}

	fn from_exact(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|intent| intent.as_str() == label)
	}
}
