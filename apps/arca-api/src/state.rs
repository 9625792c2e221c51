use std::sync::Arc;

use arca_service::ArcaService;
use arca_storage::qdrant::QdrantStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ArcaService>,
}
impl AppState {
	pub async fn new(config: arca_config::Config) -> color_eyre::Result<Self> {
		let qdrant = QdrantStore::new(&config.storage.qdrant)?;

		// The collection is created on first write if Qdrant is unreachable at startup.
		if let Err(err) = qdrant.ensure_ready().await {
			tracing::warn!(error = %err, collection = %qdrant.collection, "Vector index is not ready yet.");
		}

		Ok(Self::from_service(ArcaService::new(config, Arc::new(qdrant))))
	}

	pub fn from_service(service: ArcaService) -> Self {
		Self { service: Arc::new(service) }
	}
}
