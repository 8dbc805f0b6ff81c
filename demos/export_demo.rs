use bvh_anim_exporter::{
    export_bvh_to_string, export_playback_range, Frame, Matrix4, PlaybackSource, PoseSource,
    Position, Quaternion, Skeleton, TopologySource,
};
use cgmath::{Deg, Rotation3};

////////////////////////////// a stand-in animation host ///////////////////////////////////////
// A real adapter would answer these queries from a live scene (and advance the
// host's current-frame cursor inside `world_matrix`). This one animates a
// three-joint arm in memory: hips -> spine -> head, everything waving around Z.
struct DemoScene;

const JOINTS: [&str; 3] = ["demo:hips", "demo:spine", "demo:head"];

impl DemoScene {
    fn index(joint: &str) -> Option<usize> {
        JOINTS.iter().position(|j| *j == joint)
    }

    fn world(i: usize, frame: Frame) -> Matrix4 {
        let swing = Quaternion::from_angle_z(Deg(10.0 * frame as f64 + 5.0 * i as f64));
        let local = Matrix4::from_translation(Position::new(0.0, 1.0, 0.0)) * Matrix4::from(swing);
        if i == 0 {
            local
        } else {
            Self::world(i - 1, frame) * local
        }
    }
}

impl TopologySource for DemoScene {
    fn children(&self, joint: &str) -> Option<Vec<String>> {
        let i = Self::index(joint)?;
        Some(JOINTS.get(i + 1).map(|j| j.to_string()).into_iter().collect())
    }

    fn local_translation(&self, joint: &str) -> Option<Position> {
        Self::index(joint)?;
        Some(Position::new(0.0, 1.0, 0.0))
    }
}

impl PoseSource for DemoScene {
    fn world_matrix(&mut self, joint: &str, frame: Frame) -> Option<Matrix4> {
        Some(Self::world(Self::index(joint)?, frame))
    }

    fn translation(&mut self, joint: &str, frame: Frame) -> Option<Position> {
        Self::index(joint)?;
        Some(Position::new(0.0, 1.0, 0.01 * frame as f64))
    }
}

impl PlaybackSource for DemoScene {
    fn playback_range(&self) -> (Frame, Frame) {
        (1, 24)
    }

    fn frames_per_second(&self) -> f64 {
        24.0
    }
}

fn main() {
    let mut scene = DemoScene;

    ////////////////////////////// building the skeleton ///////////////////////////////////////
    // flattened pre-order list, root first
    let skeleton = Skeleton::from_topology(&scene, "demo:hips").unwrap();
    assert_eq!(skeleton.joints.len(), 3);
    assert_eq!(skeleton.find_joint_by_index(0).parent_index, -1);
    assert_eq!(skeleton.find_joint_by_name("demo:head").unwrap().depth, 2);

    ////////////////////////////// exporting to a string ///////////////////////////////////////
    let bvh = export_bvh_to_string(&skeleton, &mut scene, 1, 24, "ZXY").unwrap();

    // namespaces are stripped from the emitted names
    assert!(bvh.contains("ROOT hips"));
    assert!(bvh.contains("JOINT spine"));
    // root gets 6 channels, everything else 3, in the requested order
    assert!(bvh.contains("CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation"));
    assert!(bvh.contains("CHANNELS 3 Zrotation Xrotation Yrotation"));
    assert!(bvh.contains("MOTION\nFrames: 24\nFrame Time: 0.041667\n"));

    println!("{}", bvh);

    ////////////////////////////// exporting to a file /////////////////////////////////////////
    // or let the session's playback range pick the frames
    let path = std::env::temp_dir().join("demo_wave.bvh");
    export_playback_range(&path, &skeleton, &mut scene, "ZXY").unwrap();
    println!("wrote {:?}", path);
}
