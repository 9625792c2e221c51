use std::collections::HashMap;

use arca_domain::{ArtifactId, ArtifactRecord, SyncStatus, artifact, timestamp};
use futures::{StreamExt, stream};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ArcaService, Error, Result};

/// Sync body: either one artifact object or an array of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum SyncInput {
	One(Value),
	Many(Vec<Value>),
}
impl SyncInput {
	pub fn into_records(self) -> Vec<Value> {
		match self {
			Self::One(record) => vec![record],
			Self::Many(records) => records,
		}
	}
}
impl From<Value> for SyncInput {
	fn from(value: Value) -> Self {
		match value {
			Value::Array(records) => Self::Many(records),
			record => Self::One(record),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncItemResult {
	pub success: bool,
	/// The record's `id` exactly as it was sent.
	pub artifact_id: Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
	pub success: bool,
	pub status: SyncStatus,
	pub message: String,
	pub success_count: usize,
	pub failure_count: usize,
	pub results: Vec<SyncItemResult>,
}
impl SyncReport {
	fn from_results(results: Vec<SyncItemResult>) -> Self {
		let total = results.len();
		let success_count = results.iter().filter(|result| result.success).count();
		let status = SyncStatus::classify(success_count, total);

		Self {
			success: status == SyncStatus::FullSuccess,
			status,
			message: format!("Synced {success_count}/{total} artifacts."),
			success_count,
			failure_count: total - success_count,
			results,
		}
	}
}

impl ArcaService {
	/// Embeds and upserts every record. A failing record never stops the others, and records
	/// sharing an id are written in input order so the last one wins.
	pub async fn sync(&self, input: SyncInput) -> Result<SyncReport> {
		let records = input.into_records();

		if records.is_empty() {
			return Err(Error::invalid("Sync input must contain at least one artifact."));
		}

		let concurrency = self.cfg.sync.concurrency.max(1) as usize;

		tracing::info!(records = records.len(), concurrency, "Syncing artifacts.");

		let chains = chain_by_id(records);
		let mut indexed: Vec<(usize, SyncItemResult)> = stream::iter(chains)
			.map(|chain| self.sync_chain(chain))
			.buffer_unordered(concurrency)
			.collect::<Vec<_>>()
			.await
			.into_iter()
			.flatten()
			.collect();

		indexed.sort_by_key(|(position, _)| *position);

		let report = SyncReport::from_results(indexed.into_iter().map(|(_, result)| result).collect());

		tracing::info!(
			status = ?report.status,
			succeeded = report.success_count,
			failed = report.failure_count,
			"Artifact sync finished."
		);

		Ok(report)
	}

	/// Runs one chain in order so a later record with the same id is always written last.
	async fn sync_chain(&self, chain: Vec<(usize, Value)>) -> Vec<(usize, SyncItemResult)> {
		let mut results = Vec::with_capacity(chain.len());

		for (position, raw) in chain {
			results.push((position, self.sync_one(raw).await));
		}

		results
	}

	async fn sync_one(&self, raw: Value) -> SyncItemResult {
		let artifact_id = artifact::raw_id(&raw);

		match self.index_record(raw).await {
			Ok(id) => {
				tracing::debug!(artifact_id = %id, "Artifact indexed.");

				SyncItemResult { success: true, artifact_id, error: None }
			},
			Err(err) => {
				tracing::warn!(artifact_id = %artifact_id, error = %err, "Artifact sync failed.");

				SyncItemResult { success: false, artifact_id, error: Some(err.to_string()) }
			},
		}
	}

	async fn index_record(&self, raw: Value) -> Result<ArtifactId> {
		let record = ArtifactRecord::from_json(raw)?;
		let text = record.embedding_text(self.cfg.sync.max_embedding_chars as usize)?;
		let vector = self.embed(&text).await?;
		let payload = record.payload(&timestamp::now_rfc3339())?;

		self.index.upsert(record.id.0, vector, payload).await.map_err(Error::index_write)?;

		Ok(record.id)
	}
}

/// Groups records by point id, keeping each input position. Records without a usable id cannot
/// collide and get a chain of their own.
fn chain_by_id(records: Vec<Value>) -> Vec<Vec<(usize, Value)>> {
	let mut chains: Vec<Vec<(usize, Value)>> = Vec::new();
	let mut chain_of: HashMap<ArtifactId, usize> = HashMap::new();

	for (position, raw) in records.into_iter().enumerate() {
		let Some(id) = raw.get("id").and_then(ArtifactId::coerce) else {
			chains.push(vec![(position, raw)]);

			continue;
		};
		let chain = *chain_of.entry(id).or_insert_with(|| {
			chains.push(Vec::new());

			chains.len() - 1
		});

		chains[chain].push((position, raw));
	}

	chains
}
