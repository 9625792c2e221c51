//! Helpers for tests that talk to a live Qdrant. Set `ARCA_QDRANT_URL` (and optionally
//! `ARCA_QDRANT_API_KEY`) to enable them.

mod error;

pub use error::{Error, Result};

use std::{env, thread, time::Duration};

use qdrant_client::Qdrant;
use tokio::{runtime::Builder, time};
use uuid::Uuid;

pub fn env_qdrant_url() -> Option<String> {
	env::var("ARCA_QDRANT_URL").ok()
}

pub fn env_qdrant_api_key() -> Option<String> {
	env::var("ARCA_QDRANT_API_KEY").ok().filter(|key| !key.trim().is_empty())
}

/// A uniquely named collection that is deleted when the test finishes.
pub struct TestCollection {
	url: String,
	name: String,
	cleaned: bool,
}
impl TestCollection {
	pub fn new(url: impl Into<String>, prefix: &str) -> Self {
		let name = format!("{prefix}_{}", Uuid::new_v4().simple());

		Self { url: url.into(), name, cleaned: false }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn qdrant_config(&self, vector_dim: u32) -> arca_config::Qdrant {
		arca_config::Qdrant {
			url: self.url.clone(),
			api_key: env_qdrant_api_key(),
			collection: self.name.clone(),
			vector_dim,
		}
	}

	pub async fn cleanup(mut self) -> Result<()> {
		delete_collection(&self.url, &self.name).await?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestCollection {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let url = self.url.clone();
		let name = self.name.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test collection cleanup failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(delete_collection(&url, &name)) {
				eprintln!("Test collection cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

async fn delete_collection(url: &str, name: &str) -> Result<()> {
	let client = Qdrant::from_url(url)
		.api_key(env_qdrant_api_key())
		.build()?;
	let max_attempts = 6;
	let mut backoff = Duration::from_millis(100);

	for attempt in 1..=max_attempts {
		let existing = time::timeout(Duration::from_secs(10), client.list_collections())
			.await
			.map_err(|_| Error::Message("Qdrant list_collections timed out.".to_string()))?
			.map_err(|err| Error::Message(format!("Failed to list Qdrant collections: {err}.")))?;

		if !existing.collections.iter().any(|collection| collection.name == name) {
			return Ok(());
		}

		match time::timeout(Duration::from_secs(10), client.delete_collection(name.to_string()))
			.await
		{
			Ok(Ok(_)) => return Ok(()),
			Ok(Err(err)) =>
				if attempt == max_attempts {
					return Err(Error::Message(format!(
						"Failed to delete Qdrant collection {name:?} after {attempt} attempts: {err}."
					)));
				},
			Err(_) =>
				if attempt == max_attempts {
					return Err(Error::Message(format!(
						"Timed out deleting Qdrant collection {name:?} after {attempt} attempts."
					)));
				},
		}

		time::sleep(backoff).await;

		backoff = backoff.saturating_mul(2).min(Duration::from_secs(2));
	}

	Ok(())
}
