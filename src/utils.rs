use cgmath::{InnerSpace, Matrix3, SquareMatrix};

use crate::types::{Matrix4, Quaternion, RotationOrder};

/// reorder an XYZ euler angle triple into the emission order
pub(crate) fn __reorder_vector(e: [f64; 3], order: RotationOrder) -> [f64; 3] {
    let p = order.permutation();
    [e[p[0]], e[p[1]], e[p[2]]]
}

/// Strip hierarchical path and namespace qualifiers from a raw host joint id,
/// e.g. "|rig|spine|char:chest" -> "chest".
pub(crate) fn __strip_joint_name(raw: &str) -> &str {
    let leaf = raw.rsplit('|').next().unwrap_or(raw);
    leaf.rsplit(':').next().unwrap_or(leaf)
}

/// Rotation of `world` relative to `parent_world`, as a quaternion.
/// `None` if the parent matrix is not invertible.
pub(crate) fn __local_rotation(world: &Matrix4, parent_world: &Matrix4) -> Option<Quaternion> {
    let local = parent_world.invert()? * world;
    // upper-left 3x3 carries the rotation; columns are normalized to shed
    // any scale the host keeps on the joints
    let m = Matrix3::from_cols(
        local.x.truncate().normalize(),
        local.y.truncate().normalize(),
        local.z.truncate().normalize(),
    );
    Some(Quaternion::from(m))
}

/// Decompose a rotation quaternion into intrinsic XYZ euler angles in DEGREES
/// (column-vector convention, R = Rx * Ry * Rz). This is the one decomposition
/// used everywhere; rotation orders only reorder the resulting triple.
pub(crate) fn __quat_to_euler_xyz(q: Quaternion) -> [f64; 3] {
    let q = q.normalize();
    let (w, x, y, z) = (q.s, q.v.x, q.v.y, q.v.z);

    // rotation matrix elements (row r, column c) of R = Rx * Ry * Rz
    let m11 = 1.0 - 2.0 * (y * y + z * z);
    let m12 = 2.0 * (x * y - z * w);
    let m13 = 2.0 * (x * z + y * w);
    let m22 = 1.0 - 2.0 * (x * x + z * z);
    let m23 = 2.0 * (y * z - x * w);
    let m32 = 2.0 * (y * z + x * w);
    let m33 = 1.0 - 2.0 * (x * x + y * y);

    let ey = m13.clamp(-1.0, 1.0).asin();
    let (ex, ez) = if m13.abs() < 0.999_999_9 {
        ((-m23).atan2(m33), (-m12).atan2(m11))
    } else {
        // gimbal lock: Y is at +-90 degrees, X and Z collapse onto one axis
        (m32.atan2(m22), 0.0)
    };

    [ex.to_degrees(), ey.to_degrees(), ez.to_degrees()]
}

/////////////////////////////////////////////////////////////////////////////////////////////////
