//! The pluggable processing seam.
//!
//! [`SimulatedCompression`] is an explicit placeholder: it renames the file
//! and shrinks the reported size by a fixed ratio.  A real document engine
//! slots in by implementing [`Transform`]; the session state machine never
//! looks inside.

use papermint_shared::constants::{PROCESSED_NAME_PREFIX, SIMULATED_SIZE_RATIO_PERCENT};
use papermint_shared::models::{ProcessedArtifact, UploadItem};

/// Maps one accepted file to its processed artifact.
pub trait Transform: Send + Sync {
    fn apply(&self, item: &UploadItem) -> ProcessedArtifact;
}

/// Placeholder transform: `name` gains the `processed_` prefix and the size
/// drops to a fixed percentage of the input, floor-rounded.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedCompression {
    ratio_percent: u64,
}

impl SimulatedCompression {
    pub fn new(ratio_percent: u64) -> Self {
        Self { ratio_percent }
    }
}

impl Default for SimulatedCompression {
    fn default() -> Self {
        Self::new(SIMULATED_SIZE_RATIO_PERCENT)
    }
}

impl Transform for SimulatedCompression {
    fn apply(&self, item: &UploadItem) -> ProcessedArtifact {
        let size_bytes = (item.size_bytes as u128 * self.ratio_percent as u128 / 100) as u64;
        ProcessedArtifact {
            name: format!("{PROCESSED_NAME_PREFIX}{}", item.name),
            size_bytes,
            data: item.data.clone(),
        }
    }
}
