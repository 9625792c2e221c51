use serde::{Deserialize, Serialize};

/// Outcome of a sync batch, derived from how many records made it into the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
	FullSuccess,
	Partial,
	Failure,
}
impl SyncStatus {
	pub fn classify(succeeded: usize, total: usize) -> Self {
		if succeeded >= total {
			Self::FullSuccess
		} else if succeeded == 0 {
			Self::Failure
		} else {
			Self::Partial
		}
	}
}
