//! Error types for .bvh export.

use std::path::PathBuf;

use crate::types::Frame;

/// Everything that can abort an export. Every variant is fatal: the export
/// stops at the first error and nothing is retried, so a written file is
/// always internally consistent.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ExportError {
    /// Rotation order string is not one of the six axis permutations.
    #[error("invalid rotation order {order:?} (expected one of XYZ, XZY, YXZ, YZX, ZXY, ZYX)")]
    InvalidRotationOrder { order: String },

    /// The joint graph is not a tree rooted at a single joint, or a joint
    /// could not be resolved while walking it.
    #[error("invalid topology at joint {joint:?}")]
    InvalidTopology { joint: String },

    /// The pose source could not produce a transform for a joint/frame pair.
    #[error("pose unavailable for joint {joint:?} at frame {frame}")]
    PoseUnavailable { joint: String, frame: Frame },

    /// The output file could not be written.
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
