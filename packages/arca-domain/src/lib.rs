pub mod artifact;
pub mod context;
pub mod intent;
pub mod sync_status;
pub mod timestamp;

pub use artifact::{ArtifactId, ArtifactRecord, RecordError};
pub use context::{
	ArtifactSummary, CommitSummary, ContextItem, DeploymentSummary, IssueSummary, QueryContext,
	SearchHit,
};
pub use intent::Intent;
pub use sync_status::SyncStatus;
