//! Artifact records as delivered by the external registry, and everything derived from them
//! before they reach the vector index.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

/// Point key in the vector index. Registry ids arrive as integers or numeric strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArtifactId(pub u64);
impl ArtifactId {
	pub fn coerce(raw: &Value) -> Option<Self> {
		match raw {
			Value::Number(number) => number.as_u64().map(Self),
			Value::String(text) => text.trim().parse().ok().map(Self),
			_ => None,
		}
	}
}
impl<'de> Deserialize<'de> for ArtifactId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = Value::deserialize(deserializer)?;

		Self::coerce(&raw).ok_or_else(|| {
			D::Error::custom(format!("artifact id must be a non-negative integer, got {raw}"))
		})
	}
}
impl fmt::Display for ArtifactId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
	pub id: ArtifactId,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size_bytes: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub checksum: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub metadata: Option<Map<String, Value>>,
	/// Registry fields this crate does not model, e.g. `status` or `commitHash`.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl ArtifactRecord {
	/// Decodes one element of a sync batch.
	pub fn from_json(raw: Value) -> Result<Self, RecordError> {
		if !raw.is_object() {
			return Err(RecordError::NotAnObject);
		}

		serde_json::from_value(raw).map_err(|err| RecordError::Decode { message: err.to_string() })
	}

	/// Text handed to the embedding model, capped at `max_chars` characters.
	pub fn embedding_text(&self, max_chars: usize) -> Result<String, RecordError> {
		let mut parts: Vec<String> = Vec::new();

		for field in [&self.name, &self.description, &self.kind, &self.version] {
			if let Some(value) = non_blank(field.as_deref()) {
				parts.push(value.to_string());
			}
		}
		for (label, value) in [
			("Created", non_blank(self.created_at.as_deref()).map(str::to_string)),
			("Updated", non_blank(self.updated_at.as_deref()).map(str::to_string)),
			("Path", non_blank(self.file_path.as_deref()).map(str::to_string)),
			("Size", self.size_bytes.map(|size| size.to_string())),
		] {
			if let Some(value) = value {
				parts.push(format!("{label}: {value}"));
			}
		}

		if let Some(metadata) = self.metadata.as_ref().filter(|map| !map.is_empty()) {
			parts.push(Value::Object(metadata.clone()).to_string());
		}

		let text = truncate_chars(&parts.join(" "), max_chars);

		if text.trim().is_empty() {
			return Err(RecordError::EmptyText);
		}

		Ok(text)
	}

	/// Index payload: the record's own fields plus `timeInfo` and `stats`.
	///
	/// `lastUpdated` is left to the index, which stamps it on every write.
	pub fn payload(&self, synced_at: &str) -> Result<Map<String, Value>, RecordError> {
		let mut payload = match serde_json::to_value(self) {
			Ok(Value::Object(map)) => map,
			Ok(_) => return Err(RecordError::NotAnObject),
			Err(err) => return Err(RecordError::Encode { message: err.to_string() }),
		};
		let has_checksum = non_blank(self.checksum.as_deref()).is_some();
		let has_metadata = self.metadata.as_ref().map(|map| !map.is_empty()).unwrap_or(false);

		payload.insert(
			"timeInfo".to_string(),
			serde_json::json!({
				"created": self.created_at,
				"updated": self.updated_at,
				"synced": synced_at,
			}),
		);
		payload.insert(
			"stats".to_string(),
			serde_json::json!({
				"size": self.size_bytes,
				"hasChecksum": has_checksum,
				"hasMetadata": has_metadata,
			}),
		);

		Ok(payload)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
	#[error("Artifact record must be a JSON object.")]
	NotAnObject,
	#[error("Artifact record is malformed: {message}")]
	Decode { message: String },
	#[error("Artifact payload could not be encoded: {message}")]
	Encode { message: String },
	#[error("Artifact record has no text to embed.")]
	EmptyText,
}

/// The `id` of a raw record as it was sent, for echoing back in per-record results.
pub fn raw_id(raw: &Value) -> Value {
	raw.get("id").cloned().unwrap_or(Value::Null)
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((idx, _)) => text[..idx].to_string(),
		None => text.to_string(),
	}
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn coerces_numeric_ids() {
		assert_eq!(ArtifactId::coerce(&serde_json::json!(42)), Some(ArtifactId(42)));
		assert_eq!(ArtifactId::coerce(&serde_json::json!(" 7 ")), Some(ArtifactId(7)));
		assert_eq!(ArtifactId::coerce(&serde_json::json!(-1)), None);
		assert_eq!(ArtifactId::coerce(&serde_json::json!("abc")), None);
		assert_eq!(ArtifactId::coerce(&serde_json::json!(1.5)), None);
		assert_eq!(ArtifactId::coerce(&Value::Null), None);
	}

	#[test]
	fn truncates_on_char_boundary() {
		assert_eq!(truncate_chars("héllo", 2), "hé");
		assert_eq!(truncate_chars("abc", 10), "abc");
		assert_eq!(truncate_chars("abc", 0), "");
	}
}
