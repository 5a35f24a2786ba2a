use nalgebra::Vector3;

/// Vectors shorter than this are treated as degenerate.
pub const DEGENERATE_NORM: f32 = 1e-12;

pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

/// Scales v to unit length. Passing a zero vector is a contract violation;
/// debug builds catch it here rather than letting NaNs leak into the pose.
pub fn normalize(v: &Vector3<f32>) -> Vector3<f32> {
    let norm = v.norm();
    debug_assert!(
        norm > DEGENERATE_NORM,
        "Tried to normalize a degenerate vector {:?}",
        v
    );
    v / norm
}

/// Turns `along` by `angle` radians toward `toward`, within the plane the two
/// vectors span. Both should be unit length and mutually orthogonal; the
/// result is renormalized either way.
pub fn translate_in_basis(along: &Vector3<f32>, toward: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    normalize(&(along * angle.cos() + toward * angle.sin()))
}

/// Wraps value into [0, period). Handles negative values (retrograde motion),
/// and never returns `period` itself, which `rem_euclid` can do for tiny
/// negative inputs.
pub fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::TAU;

    #[test]
    fn test_cross_is_right_handed() {
        assert_relative_eq!(cross(&Vector3::x(), &Vector3::y()), Vector3::z());
        assert_relative_eq!(cross(&-Vector3::z(), &Vector3::y()), Vector3::x());
    }

    #[test]
    fn test_translate_in_basis() {
        let turned = translate_in_basis(&Vector3::x(), &Vector3::y(), std::f32::consts::FRAC_PI_2);
        assert_abs_diff_eq!(turned, Vector3::y(), epsilon = 1e-6);

        // Non-unit inputs still come out unit length
        let turned = translate_in_basis(&(Vector3::x() * 3.0), &(Vector3::z() * 2.0), 0.3);
        assert_relative_eq!(turned.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_normalize_zero_vector() {
        normalize(&Vector3::zeros());
    }

    #[test]
    fn test_wrap() {
        assert_relative_eq!(wrap(7.0, TAU), 7.0 - TAU);
        assert_relative_eq!(wrap(-1.0, 360.0), 359.0);
        assert_eq!(wrap(TAU, TAU), 0.0);
        assert_eq!(wrap(0.0, 360.0), 0.0);

        let tiny = wrap(-1e-20, TAU);
        assert!((0.0..TAU).contains(&tiny));
    }
}
