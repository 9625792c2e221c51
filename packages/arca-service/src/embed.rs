use futures::future;

use crate::{ArcaService, Error, Result};

impl ArcaService {
	/// Turns `text` into one dense vector with the configured embedding model.
	pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
		if text.trim().is_empty() {
			return Err(Error::invalid("Embedding input must be non-empty."));
		}

		let texts = [text.to_string()];
		let mut vectors = self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		match vectors.pop() {
			Some(vector) if vectors.is_empty() => Ok(vector),
			_ => Err(Error::Embedding {
				message: "Embedding provider must return exactly one vector per input.".to_string(),
			}),
		}
	}

	/// Embeds every text, keeping input order. Any single failure fails the whole batch.
	pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
		future::try_join_all(texts.iter().map(|text| self.embed(text))).await
	}
}
