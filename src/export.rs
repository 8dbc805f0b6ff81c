use std::path::Path;

use cgmath::SquareMatrix;

use crate::error::ExportError;
use crate::scene::{PlaybackSource, PoseSource};
use crate::types::{Depth, Frame, Index, Matrix4, MotionTable, RotationOrder, Skeleton};
use crate::utils;

/// Frames-per-second substituted when the host session reports 0.
const FALLBACK_FPS: f64 = 24.0;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Serialize the static skeleton into the HIERARCHY block.
///
/// Pre-order traversal with tab indentation per nesting depth. Joints with no
/// children close with an `End Site` placeholder. Pure function of its inputs.
pub fn write_hierarchy(skeleton: &Skeleton, rot_order: RotationOrder) -> String {
    fn __process_joint(
        skeleton: &Skeleton,
        index: Index,
        indent: Depth,
        rot_order: RotationOrder,
        lines: &mut Vec<String>,
    ) {
        let joint = &skeleton.joints[index];
        let name = utils::__strip_joint_name(&joint.name);
        let tabs = "\t".repeat(indent);
        let [a, b, c] = rot_order.channels();

        if indent == 0 {
            lines.push(format!("{}ROOT {}", tabs, name));
        } else {
            lines.push(format!("{}JOINT {}", tabs, name));
        }
        lines.push(format!("{}{{", tabs));
        lines.push(format!(
            "{}\tOFFSET {:.6} {:.6} {:.6}",
            tabs, joint.offset.x, joint.offset.y, joint.offset.z
        ));
        if indent == 0 {
            lines.push(format!(
                "{}\tCHANNELS 6 Xposition Yposition Zposition {}rotation {}rotation {}rotation",
                tabs, a, b, c
            ));
        } else {
            lines.push(format!(
                "{}\tCHANNELS 3 {}rotation {}rotation {}rotation",
                tabs, a, b, c
            ));
        }

        if joint.children.is_empty() {
            lines.push(format!("{}\tEnd Site", tabs));
            lines.push(format!("{}\t{{", tabs));
            lines.push(format!("{}\t\tOFFSET 0.0 0.0 0.0", tabs));
            lines.push(format!("{}\t}}", tabs));
        } else {
            for &child in &joint.children {
                __process_joint(skeleton, child, indent + 1, rot_order, lines);
            }
        }

        lines.push(format!("{}}}", tabs));
    }

    let mut lines = vec!["HIERARCHY".to_string()];
    if !skeleton.joints.is_empty() {
        __process_joint(skeleton, 0, 0, rot_order, &mut lines);
    }
    lines.join("\n") + "\n"
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Local rotation of one joint at one frame, reordered into emission order.
fn __bone_rotation<P: PoseSource>(
    skeleton: &Skeleton,
    pose: &mut P,
    index: Index,
    frame: Frame,
    rot_order: RotationOrder,
) -> Result<[f64; 3], ExportError> {
    let joint = &skeleton.joints[index];
    let pose_unavailable = || ExportError::PoseUnavailable {
        joint: joint.name.clone(),
        frame,
    };

    let world = pose
        .world_matrix(&joint.name, frame)
        .ok_or_else(pose_unavailable)?;
    // the root is local to the world frame, i.e. its parent is the identity
    let parent_world = if joint.parent_index == -1 {
        Matrix4::identity()
    } else {
        let parent = skeleton
            .joints
            .get(joint.parent_index as Index)
            .ok_or_else(|| ExportError::InvalidTopology {
                joint: joint.name.clone(),
            })?;
        pose.world_matrix(&parent.name, frame)
            .ok_or_else(|| ExportError::PoseUnavailable {
                joint: parent.name.clone(),
                frame,
            })?
    };

    let local = utils::__local_rotation(&world, &parent_world).ok_or_else(pose_unavailable)?;
    Ok(utils::__reorder_vector(
        utils::__quat_to_euler_xyz(local),
        rot_order,
    ))
}

/// Sample one motion row per frame over the inclusive range `[start_frame, end_frame]`.
///
/// Each row is the root's local translation triple followed by every joint's
/// local rotation triple in pre-order. Local rotation is the joint's world
/// transform composed with the inverse of its parent's, decomposed as
/// intrinsic XYZ euler angles in degrees and reordered by `rot_order`.
/// A reversed range produces an empty table, not an error.
pub fn sample_motion<P: PoseSource>(
    skeleton: &Skeleton,
    pose: &mut P,
    start_frame: Frame,
    end_frame: Frame,
    rot_order: RotationOrder,
) -> Result<MotionTable, ExportError> {
    let mut motion: MotionTable = Vec::new();

    for frame in start_frame..=end_frame {
        let mut row: Vec<f64> = Vec::with_capacity(3 * skeleton.joints.len() + 3);
        for joint in skeleton.joints.iter() {
            //// the root carries its translation channels in front of its rotation
            if joint.parent_index == -1 {
                let loc = pose.translation(&joint.name, frame).ok_or_else(|| {
                    ExportError::PoseUnavailable {
                        joint: joint.name.clone(),
                        frame,
                    }
                })?;
                row.extend([loc.x, loc.y, loc.z]);
            }
            row.extend(__bone_rotation(
                skeleton, pose, joint.index, frame, rot_order,
            )?);
        }
        motion.push(row);
    }

    Ok(motion)
}

/// Format motion rows the way the MOTION block expects them: 6-decimal fixed
/// point, space-separated, one line per frame.
pub fn format_motion(motion: &MotionTable) -> String {
    let mut out = String::new();
    for row in motion {
        for value in row {
            out.push_str(&format!("{:.6} ", value));
        }
        out.push('\n');
    }
    out
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn __export_bvh<S: PoseSource + PlaybackSource>(
    skeleton: &Skeleton,
    scene: &mut S,
    start_frame: Frame,
    end_frame: Frame,
    rot_order: &str,
) -> Result<String, ExportError> {
    //// rotation order is validated before anything else runs
    let rot_order: RotationOrder = rot_order.parse()?;

    let hierarchy = write_hierarchy(skeleton, rot_order);
    let motion = sample_motion(skeleton, scene, start_frame, end_frame, rot_order)?;

    // a reversed range passes through as a non-positive frame count
    let num_frames = end_frame - start_frame + 1;
    let mut frame_rate = scene.frames_per_second();
    if frame_rate == 0.0 {
        frame_rate = FALLBACK_FPS;
    }
    let frame_time = 1.0 / frame_rate;
    tracing::debug!(
        "sampled {} joints over frames [{}, {}]",
        skeleton.joints.len(),
        start_frame,
        end_frame
    );

    let mut contents = hierarchy;
    contents.push_str(&format!(
        "MOTION\nFrames: {}\nFrame Time: {:.6}\n",
        num_frames, frame_time
    ));
    contents.push_str(&format_motion(&motion));
    Ok(contents)
}

//////////////////////////////////////////////////////////////// PUBLIC ////////////////////////////////////////////////////////////////

/// export a bvh animation to a file path (whole file written at once, overwriting)
pub fn export_bvh_to_file<S: PoseSource + PlaybackSource, P: AsRef<Path>>(
    output_path: P,
    skeleton: &Skeleton,
    scene: &mut S,
    start_frame: Frame,
    end_frame: Frame,
    rot_order: &str,
) -> Result<(), ExportError> {
    let contents = __export_bvh(skeleton, scene, start_frame, end_frame, rot_order)?;
    std::fs::write(&output_path, contents).map_err(|source| ExportError::Io {
        path: output_path.as_ref().to_path_buf(),
        source,
    })?;
    tracing::info!(
        "exported {} joints, frames [{}, {}] to {:?}",
        skeleton.joints.len(),
        start_frame,
        end_frame,
        output_path.as_ref()
    );
    Ok(())
}

/// export a bvh animation to a string (the no-I/O variant)
pub fn export_bvh_to_string<S: PoseSource + PlaybackSource>(
    skeleton: &Skeleton,
    scene: &mut S,
    start_frame: Frame,
    end_frame: Frame,
    rot_order: &str,
) -> Result<String, ExportError> {
    return __export_bvh(skeleton, scene, start_frame, end_frame, rot_order);
}

/// export a bvh animation over the frame range the host session is configured to play
pub fn export_playback_range<S: PoseSource + PlaybackSource, P: AsRef<Path>>(
    output_path: P,
    skeleton: &Skeleton,
    scene: &mut S,
    rot_order: &str,
) -> Result<(), ExportError> {
    let (start_frame, end_frame) = scene.playback_range();
    return export_bvh_to_file(output_path, skeleton, scene, start_frame, end_frame, rot_order);
}
