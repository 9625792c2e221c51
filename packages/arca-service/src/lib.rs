pub mod chat;
pub mod context;
pub mod embed;
pub mod intent;
pub mod respond;
pub mod search;
pub mod sync;

mod error;

pub use arca_domain::SyncStatus;
pub use arca_storage::BoxFuture;
pub use chat::{ChatRequest, ChatResponse};
pub use error::{Error, Result};
pub use search::{SearchRequest, SearchResponse};
pub use sync::{SyncInput, SyncItemResult, SyncReport};

use std::sync::Arc;

use arca_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use arca_providers::{chat::ChatMessage, embedding};
use arca_storage::VectorIndex;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
		temperature: f32,
	) -> BoxFuture<'a, Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub chat: Arc<dyn ChatProvider>,
}
impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>, chat: Arc<dyn ChatProvider>) -> Self {
		Self { embedding, chat }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), chat: provider }
	}
}

pub struct ArcaService {
	pub cfg: Config,
	pub index: Arc<dyn VectorIndex>,
	pub providers: Providers,
}
impl ArcaService {
	pub fn new(cfg: Config, index: Arc<dyn VectorIndex>) -> Self {
		Self { cfg, index, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, index: Arc<dyn VectorIndex>, providers: Providers) -> Self {
		Self { cfg, index, providers }
	}

	pub async fn health_check(&self) -> bool {
		self.index.health_check().await
	}
}

struct DefaultProviders;
impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			embedding::embed(cfg, texts)
				.await
				.map_err(|err| Error::Embedding { message: err.to_string() })
		})
	}
}
impl ChatProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
		temperature: f32,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			arca_providers::chat::complete(cfg, messages, temperature)
				.await
				.map_err(|err| Error::Generation { message: err.to_string() })
		})
	}
}
