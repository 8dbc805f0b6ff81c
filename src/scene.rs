//! Interfaces onto the host animation session.
//!
//! The exporter never talks to a scene directly; it only consumes these three
//! sources. Frame numbers are passed explicitly so the core stays referentially
//! transparent: an adapter backed by a real host will typically advance the
//! host's process-wide "current evaluation frame" cursor inside
//! [`PoseSource::world_matrix`], which is a documented side effect of sampling.
//! Because that cursor is shared with the host session, at most one export may
//! be in flight per session (precondition, not enforced by a lock).

use crate::types::{Frame, Matrix4, Position};

/// Static joint-tree queries used to build a [`Skeleton`](crate::types::Skeleton).
pub trait TopologySource {
    /// Ordered child joint identifiers. `None` if the joint is unknown.
    /// The order is preserved verbatim and fixes the channel layout.
    fn children(&self, joint: &str) -> Option<Vec<String>>;

    /// Translation relative to the parent at the bind/first-frame pose.
    fn local_translation(&self, joint: &str) -> Option<Position>;
}

/// Per-frame pose queries.
pub trait PoseSource {
    /// World transform (4x4 affine) of the joint at the given frame.
    fn world_matrix(&mut self, joint: &str, frame: Frame) -> Option<Matrix4>;

    /// Local translation of the joint at the given frame.
    /// Only queried for the root joint.
    fn translation(&mut self, joint: &str, frame: Frame) -> Option<Position>;
}

/// Session playback parameters.
pub trait PlaybackSource {
    /// Configured start/end frame of the session, both inclusive.
    fn playback_range(&self) -> (Frame, Frame);

    /// Frames per second. `0.0` means unconfigured; the exporter then falls
    /// back to 24 fps.
    fn frames_per_second(&self) -> f64;
}
