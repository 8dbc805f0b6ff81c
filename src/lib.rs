//! Export an animated skeletal joint hierarchy to a .bvh (Biovision Hierarchy)
//! file: a HIERARCHY block describing the skeleton followed by a MOTION block
//! with one row of channel values per frame.
//!
//! The crate never talks to an animation host itself. A host adapter
//! implements the source traits in [`scene`] (topology, per-frame pose,
//! playback parameters) and the exporter samples through them:
//!
//! ```ignore
//! let skeleton = Skeleton::from_topology(&scene, "hips")?;
//! export_bvh_to_file("walk.bvh", &skeleton, &mut scene, 1, 120, "ZXY")?;
//! ```

pub mod error;
pub mod export;
pub mod scene;
pub mod types;
mod utils;

pub use error::ExportError;
pub use export::{
    export_bvh_to_file, export_bvh_to_string, export_playback_range, format_motion, sample_motion,
    write_hierarchy,
};
pub use scene::{PlaybackSource, PoseSource, TopologySource};
pub use types::{
    Depth, Frame, Index, Joint, Matrix4, MotionTable, ParentIndex, Position, Quaternion,
    RotationOrder, Skeleton,
};
