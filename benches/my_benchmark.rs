use bvh_anim_exporter::export::export_bvh_to_string;
use bvh_anim_exporter::scene::{PlaybackSource, PoseSource, TopologySource};
use bvh_anim_exporter::types::{Frame, Matrix4, Position, Quaternion, Skeleton};
use cgmath::{Deg, Rotation3};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Synthetic host: a single kinematic chain, every joint spinning around X.
struct ChainScene {
    num_joints: usize,
}

impl ChainScene {
    fn name(i: usize) -> String {
        format!("joint_{}", i)
    }

    fn index(joint: &str) -> Option<usize> {
        joint.strip_prefix("joint_")?.parse().ok()
    }

    fn world(&self, i: usize, frame: Frame) -> Matrix4 {
        let local = Matrix4::from_translation(Position::new(0.0, 1.0, 0.0))
            * Matrix4::from(Quaternion::from_angle_x(Deg(frame as f64 + i as f64)));
        if i == 0 {
            local
        } else {
            self.world(i - 1, frame) * local
        }
    }
}

impl TopologySource for ChainScene {
    fn children(&self, joint: &str) -> Option<Vec<String>> {
        let i = Self::index(joint)?;
        if i + 1 < self.num_joints {
            Some(vec![Self::name(i + 1)])
        } else {
            Some(Vec::new())
        }
    }

    fn local_translation(&self, joint: &str) -> Option<Position> {
        Self::index(joint)?;
        Some(Position::new(0.0, 1.0, 0.0))
    }
}

impl PoseSource for ChainScene {
    fn world_matrix(&mut self, joint: &str, frame: Frame) -> Option<Matrix4> {
        Some(self.world(Self::index(joint)?, frame))
    }

    fn translation(&mut self, joint: &str, frame: Frame) -> Option<Position> {
        Self::index(joint)?;
        Some(Position::new(0.0, 1.0 + frame as f64 * 0.1, 0.0))
    }
}

impl PlaybackSource for ChainScene {
    fn playback_range(&self) -> (Frame, Frame) {
        (1, 120)
    }

    fn frames_per_second(&self) -> f64 {
        30.0
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    fn export_chain(num_joints: usize, num_frames: Frame) -> String {
        let mut scene = ChainScene { num_joints };
        let skeleton = Skeleton::from_topology(&scene, "joint_0").unwrap();
        export_bvh_to_string(&skeleton, &mut scene, 1, num_frames, "ZXY").unwrap()
    }

    let mut group = c.benchmark_group("sample-size-example");
    group.sample_size(10);
    group.bench_function("30 joints x 120 frames", |b| {
        b.iter(|| black_box(export_chain(30, 120)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
