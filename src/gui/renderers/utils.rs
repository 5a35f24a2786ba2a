use kiss3d::renderer::LineRenderer;

use nalgebra::{Matrix4, Point3};

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Points around a circle of `radius` in the local xz-plane, closed (the last
/// point repeats the first), carried into world space by `transform`.
pub fn ring_points(
    transform: Matrix4<f32>,
    radius: f32,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>> {
    let f = move |theta: f32| {
        let local = Point3::new(radius * theta.cos(), 0.0, radius * theta.sin());
        transform.transform_point(&local)
    };
    path_iter_parametric(f, 0.0, std::f32::consts::TAU, num_segments)
}

pub fn draw_path<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, *color);
        }
        prev_pt = Some(pt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_ring_points_close_up() {
        let transform = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, 0.5));
        let points: Vec<_> = ring_points(transform, 2.0, 4).collect();

        assert_eq!(points.len(), 5);
        assert_abs_diff_eq!(points[0], Point3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(points[1], Point3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
        assert_abs_diff_eq!(points[4], points[0], epsilon = 1e-5);
    }
}
