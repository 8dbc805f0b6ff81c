use cgmath::{Matrix4 as CgMatrix4, Quaternion as CgQuaternion, Vector3};
use std::str::FromStr;

use crate::error::ExportError;
use crate::scene::TopologySource;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Index = usize;
pub type ParentIndex = isize; // can be -1 if joint has no parent
pub type Depth = usize;
pub type Frame = i64; // host frame numbers can be negative
pub type Position = Vector3<f64>;
pub type Quaternion = CgQuaternion<f64>;
pub type Matrix4 = CgMatrix4<f64>;

/// One row of channel values per frame.
/// Row length is 6 + 3 * (num_joints - 1) and identical across all frames.
pub type MotionTable = Vec<Vec<f64>>;

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    pub index: Index,
    pub parent_index: ParentIndex,
    pub depth: Depth,
    pub children: Vec<Index>,
    /// translation relative to the parent at the bind/first-frame pose
    pub offset: Position,
}

/// Flattened pre-order joint list (root first). Child order is
/// traversal-significant: it fixes the channel layout of the motion block.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub joints: Vec<Joint>,
}

impl Skeleton {
    /// Build the flattened joint list by walking the host hierarchy from `root`.
    /// Fails with `InvalidTopology` if a joint id repeats (cycle or shared
    /// subtree) or the topology source doesn't know a requested joint.
    pub fn from_topology<T: TopologySource>(
        topology: &T,
        root: &str,
    ) -> Result<Skeleton, ExportError> {
        fn __collect<T: TopologySource>(
            topology: &T,
            name: &str,
            parent_index: ParentIndex,
            depth: Depth,
            joints: &mut Vec<Joint>,
        ) -> Result<Index, ExportError> {
            if joints.iter().any(|j| j.name == name) {
                return Err(ExportError::InvalidTopology {
                    joint: name.to_string(),
                });
            }
            let offset =
                topology
                    .local_translation(name)
                    .ok_or_else(|| ExportError::InvalidTopology {
                        joint: name.to_string(),
                    })?;
            let index = joints.len();
            joints.push(Joint {
                name: name.to_string(),
                index,
                parent_index,
                depth,
                children: Vec::new(),
                offset,
            });
            let children =
                topology
                    .children(name)
                    .ok_or_else(|| ExportError::InvalidTopology {
                        joint: name.to_string(),
                    })?;
            for child in children {
                let child_index =
                    __collect(topology, &child, index as ParentIndex, depth + 1, joints)?;
                joints[index].children.push(child_index);
            }
            Ok(index)
        }

        let mut joints = Vec::new();
        __collect(topology, root, -1, 0, &mut joints)?;
        Ok(Skeleton { joints })
    }

    pub fn find_joint_by_index(&self, index: Index) -> &Joint {
        &self.joints[index]
    }

    pub fn find_joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.name == name)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// The six orders the euler rotation channels of a joint can be emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    /// Which of the raw XYZ euler components is emitted first/second/third.
    pub fn permutation(self) -> [usize; 3] {
        match self {
            RotationOrder::Xyz => [0, 1, 2],
            RotationOrder::Xzy => [0, 2, 1],
            RotationOrder::Yxz => [1, 0, 2],
            RotationOrder::Yzx => [1, 2, 0],
            RotationOrder::Zxy => [2, 0, 1],
            RotationOrder::Zyx => [2, 1, 0],
        }
    }

    /// Axis letters for the `<axis>rotation` channel tokens, in emission order.
    pub fn channels(self) -> [char; 3] {
        match self {
            RotationOrder::Xyz => ['X', 'Y', 'Z'],
            RotationOrder::Xzy => ['X', 'Z', 'Y'],
            RotationOrder::Yxz => ['Y', 'X', 'Z'],
            RotationOrder::Yzx => ['Y', 'Z', 'X'],
            RotationOrder::Zxy => ['Z', 'X', 'Y'],
            RotationOrder::Zyx => ['Z', 'Y', 'X'],
        }
    }
}

impl Default for RotationOrder {
    fn default() -> Self {
        RotationOrder::Zxy
    }
}

impl FromStr for RotationOrder {
    type Err = ExportError;

    /// Accepts exactly the six canonical uppercase names ("XYZ", "ZXY", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XYZ" => Ok(RotationOrder::Xyz),
            "XZY" => Ok(RotationOrder::Xzy),
            "YXZ" => Ok(RotationOrder::Yxz),
            "YZX" => Ok(RotationOrder::Yzx),
            "ZXY" => Ok(RotationOrder::Zxy),
            "ZYX" => Ok(RotationOrder::Zyx),
            _ => Err(ExportError::InvalidRotationOrder {
                order: s.to_string(),
            }),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_orders_are_the_six_permutations() {
        let orders = [
            RotationOrder::Xyz,
            RotationOrder::Xzy,
            RotationOrder::Yxz,
            RotationOrder::Yzx,
            RotationOrder::Zxy,
            RotationOrder::Zyx,
        ];
        for order in orders {
            let mut p = order.permutation();
            p.sort();
            assert_eq!(p, [0, 1, 2]);
        }
        // all six are distinct
        for (i, a) in orders.iter().enumerate() {
            for b in orders.iter().skip(i + 1) {
                assert_ne!(a.permutation(), b.permutation());
            }
        }
    }

    #[test]
    fn channels_match_permutation() {
        // the letter emitted at slot k names the component permutation()[k] picks
        for order in ["XYZ", "XZY", "YXZ", "YZX", "ZXY", "ZYX"] {
            let order: RotationOrder = order.parse().unwrap();
            let perm = order.permutation();
            let chans = order.channels();
            for k in 0..3 {
                assert_eq!(chans[k], ['X', 'Y', 'Z'][perm[k]]);
            }
        }
    }

    #[test]
    fn rotation_order_rejects_garbage() {
        for bad in ["QQQ", "xyz", "XY", "XYZW", ""] {
            assert!(matches!(
                bad.parse::<RotationOrder>(),
                Err(ExportError::InvalidRotationOrder { .. })
            ));
        }
    }
}
