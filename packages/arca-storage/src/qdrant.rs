use qdrant_client::{
	Payload, Qdrant,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, Query, QueryPointsBuilder, ScoredPoint,
		UpsertPointsBuilder, VectorParamsBuilder, point_id::PointIdOptions,
	},
};
use serde_json::{Map, Value};

use crate::{BoxFuture, Result, SearchHit, VectorIndex, gate::ReadyGate};

pub struct QdrantStore {
	pub client: Qdrant,
	pub collection: String,
	pub vector_dim: u32,
	ready: ReadyGate,
}
impl QdrantStore {
	pub fn new(cfg: &arca_config::Qdrant) -> Result<Self> {
		let client = Qdrant::from_url(&cfg.url).api_key(cfg.api_key.clone()).build()?;
		let ready = crate::gate::ready_gate(&cfg.url, &cfg.collection);

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim, ready })
	}

	/// Makes sure the collection exists. Runs the check at most once per collection per process.
	pub async fn ensure_ready(&self) -> Result<()> {
		self.ready.get_or_try_init(|| self.ensure_collection()).await?;

		Ok(())
	}

	async fn ensure_collection(&self) -> Result<()> {
		if self.collection_exists().await? {
			tracing::debug!(collection = %self.collection, "Vector collection already exists.");

			return Ok(());
		}

		tracing::info!(
			collection = %self.collection,
			vector_dim = self.vector_dim,
			"Creating vector collection."
		);

		let create = CreateCollectionBuilder::new(self.collection.clone())
			.vectors_config(VectorParamsBuilder::new(u64::from(self.vector_dim), Distance::Cosine));

		match self.client.create_collection(create).await {
			Ok(_) => {
				tracing::info!(collection = %self.collection, "Vector collection created.");

				Ok(())
			},
			// Another process may have created it between the check and the create.
			Err(err) =>
				if self.collection_exists().await? {
					Ok(())
				} else {
					Err(err.into())
				},
		}
	}

	async fn collection_exists(&self) -> Result<bool> {
		let existing = self.client.list_collections().await?;

		Ok(existing.collections.iter().any(|collection| collection.name == self.collection))
	}

	async fn upsert_point(
		&self,
		id: u64,
		vector: Vec<f32>,
		mut payload: Map<String, Value>,
	) -> Result<()> {
		crate::check_dimension(self.vector_dim as usize, &vector)?;

		self.ensure_ready().await?;

		crate::stamp_last_updated(&mut payload);

		let point = PointStruct::new(id, vector, Payload::from(payload));

		self.client
			.upsert_points(
				UpsertPointsBuilder::new(self.collection.clone(), vec![point]).wait(true),
			)
			.await?;

		tracing::debug!(collection = %self.collection, point_id = id, "Point upserted.");

		Ok(())
	}

	async fn search_points(&self, vector: &[f32], limit: u64) -> Result<Vec<SearchHit>> {
		crate::check_limit(limit)?;
		crate::check_dimension(self.vector_dim as usize, vector)?;

		self.ensure_ready().await?;

		let search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector.to_vec()))
			.limit(limit)
			.with_payload(true);
		let response = self.client.query(search).await?;
		let hits: Vec<SearchHit> = response.result.into_iter().filter_map(scored_point_to_hit).collect();

		tracing::debug!(collection = %self.collection, limit, hits = hits.len(), "Search completed.");

		Ok(hits)
	}
}
impl VectorIndex for QdrantStore {
	fn collection(&self) -> &str {
		&self.collection
	}

	fn upsert<'a>(
		&'a self,
		id: u64,
		vector: Vec<f32>,
		payload: Map<String, Value>,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.upsert_point(id, vector, payload))
	}

	fn search<'a>(&'a self, vector: &'a [f32], limit: u64) -> BoxFuture<'a, Result<Vec<SearchHit>>> {
		Box::pin(self.search_points(vector, limit))
	}

	fn health_check(&self) -> BoxFuture<'_, bool> {
		Box::pin(async move {
			match self.client.health_check().await {
				Ok(_) => true,
				Err(err) => {
					tracing::warn!(error = %err, "Qdrant health check failed.");

					false
				},
			}
		})
	}
}

fn scored_point_to_hit(point: ScoredPoint) -> Option<SearchHit> {
	let id = match point.id.as_ref().and_then(|id| id.point_id_options.as_ref()) {
		Some(PointIdOptions::Num(id)) => *id,
		other => {
			tracing::warn!(point_id = ?other, "Skipping search hit without a numeric point id.");

			return None;
		},
	};
	let payload = point.payload.into_iter().map(|(key, value)| (key, value.into_json())).collect();

	Some(SearchHit { id, score: point.score, payload })
}
