//! Explicit model-matrix composition.
//!
//! Every helper takes the current matrix by reference and returns the
//! composed one, so a caller that keeps its own copy is unaffected by
//! whatever a callee does with the result. This stands in for a push/pop
//! matrix stack: scoping is just ownership.
//!
//! Composition follows the fixed-function convention: each operation is
//! post-multiplied, so the last operation applied is the first one a vertex
//! goes through. Angles are in degrees.

use nalgebra::{
    Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3,
};

pub fn rotated(m: &Matrix4<f32>, degrees: f32, axis: &Vector3<f32>) -> Matrix4<f32> {
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), degrees.to_radians());
    m * rotation.to_homogeneous()
}

pub fn translated(m: &Matrix4<f32>, offset: &Vector3<f32>) -> Matrix4<f32> {
    m * Matrix4::new_translation(offset)
}

pub fn scaled(m: &Matrix4<f32>, factors: &Vector3<f32>) -> Matrix4<f32> {
    m * Matrix4::new_nonuniform_scaling(factors)
}

/// Where the local origin of `m` lands in world space.
pub fn origin_of(m: &Matrix4<f32>) -> Point3<f32> {
    m.transform_point(&Point3::origin())
}

/// Extracts the rigid part of a matrix built only from rotations and
/// translations.
pub fn to_isometry(m: &Matrix4<f32>) -> Isometry3<f32> {
    let linear: Matrix3<f32> = m.fixed_slice::<3, 3>(0, 0).into_owned();
    let rotation = Rotation3::from_matrix_unchecked(linear);
    Isometry3::from_parts(
        Translation3::from(origin_of(m).coords),
        UnitQuaternion::from_rotation_matrix(&rotation),
    )
}
