use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::Point3;

use self::utils::{draw_path, ring_points};
use crate::orrery::RingDraw;

mod utils;

const RING_SEGMENTS: usize = 180;

pub struct CompoundRenderer {
    line_renderer: LineRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            line_renderer: LineRenderer::new(),
        }
    }

    /// Queues a ring for this frame. Lines are flushed on render.
    pub fn draw_ring(&mut self, ring: &RingDraw, color: Point3<f32>) {
        draw_path(
            &mut self.line_renderer,
            ring_points(ring.transform, ring.radius, RING_SEGMENTS),
            &color,
        );
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.line_renderer.render(pass, camera);
    }
}
