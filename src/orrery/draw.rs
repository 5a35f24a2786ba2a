use nalgebra::Matrix4;

use crate::texture::TextureHandle;

/// Which side of a sphere faces the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Outside,
    /// Seen from within, like the star map.
    Inside,
}

/// A textured sphere. The transform follows the fixed-function convention:
/// the texture's poles lie on the local z-axis.
#[derive(Debug, Clone)]
pub struct SphereDraw {
    pub label: String,
    pub transform: Matrix4<f32>,
    pub radius: f32,
    pub texture: TextureHandle,
    /// RGBA emission for self-lit bodies
    pub emission: Option<[f32; 4]>,
    pub facing: Facing,
}

/// A circle of `radius` in the local xz-plane. Any flattening into an ellipse
/// is already baked into `transform`.
#[derive(Debug, Clone)]
pub struct RingDraw {
    pub label: String,
    pub transform: Matrix4<f32>,
    pub radius: f32,
}

/// The host's side of rendering. Draws arrive in scene order, each with its
/// model matrix fully composed.
pub trait RenderTarget {
    fn draw_sphere(&mut self, sphere: SphereDraw);

    fn draw_ring(&mut self, ring: RingDraw);
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Sphere(SphereDraw),
    Ring(RingDraw),
}

/// Records draws in order. Hosts replay it against their scene graph.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn spheres(&self) -> impl Iterator<Item = &SphereDraw> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sphere(s) => Some(s),
            DrawCommand::Ring(_) => None,
        })
    }

    pub fn rings(&self) -> impl Iterator<Item = &RingDraw> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Ring(r) => Some(r),
            DrawCommand::Sphere(_) => None,
        })
    }

    pub fn sphere(&self, label: &str) -> Option<&SphereDraw> {
        self.spheres().find(|s| s.label == label)
    }

    pub fn ring(&self, label: &str) -> Option<&RingDraw> {
        self.rings().find(|r| r.label == label)
    }
}

impl RenderTarget for DrawList {
    fn draw_sphere(&mut self, sphere: SphereDraw) {
        self.commands.push(DrawCommand::Sphere(sphere));
    }

    fn draw_ring(&mut self, ring: RingDraw) {
        self.commands.push(DrawCommand::Ring(ring));
    }
}
