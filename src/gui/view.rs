use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};
use tracing::{debug, info};

use super::camera::FlyCamera;
use super::controller::Controller;
use super::renderers::CompoundRenderer;
use super::textures::KissTextureProvider;
use crate::camera::CameraController;
use crate::config::SimConfig;
use crate::hud::{help_text, HudStats};
use crate::math::transform::to_isometry;
use crate::orrery::{DrawCommand, DrawList, Facing, Scene, SphereDraw, ECLIPTIC_LABEL};

const ORBIT_COLOR: [f32; 3] = [0.5, 0.5, 0.5];
const ECLIPTIC_COLOR: [f32; 3] = [0.2, 0.3, 0.6];
const TEXT_SIZE: f32 = 60.0;

pub struct View {
    scene: Scene,
    textures: KissTextureProvider,
    body_spheres: HashMap<String, SceneNode>,
    // Camera
    camera: FlyCamera,
    // Misc
    draws: DrawList,
    renderer: CompoundRenderer,
}

impl View {
    pub fn new(config: &SimConfig, window: &mut Window) -> Self {
        let mut textures = KissTextureProvider::new();
        let scene = Scene::initialize(config, &mut textures);

        let mut view = View {
            scene,
            textures,
            body_spheres: HashMap::new(),
            camera: FlyCamera::new(),
            draws: DrawList::new(),
            renderer: CompoundRenderer::new(),
        };
        view.update_scene_objects(window, config.show_orbits);
        view
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        self.camera.controller_mut()
    }

    pub fn tick(&mut self, step_millis: f64) {
        self.scene.tick(step_millis);
    }

    pub fn look_at(&mut self, index: usize) {
        match self.scene.body_frame(index) {
            Some(frame) => {
                info!(body = %frame.name, "looking at");
                self.camera.controller_mut().look_at(&frame);
            }
            None => debug!(index, "no body to look at"),
        }
    }

    /// Releases GPU resources. The view should not be rendered afterwards.
    pub fn teardown(&mut self, window: &mut Window) {
        self.scene.teardown(&mut self.textures);
        for (_, mut node) in self.body_spheres.drain() {
            window.remove_node(&mut node);
        }
    }

    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        self.update_scene_objects(window, controller.show_orbits());

        let font = Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        let stats = HudStats::new(
            self.scene.clock(),
            controller.fps(),
            controller.time_acceleration(),
        );
        window.draw_text(
            &stats.to_string(),
            &Point2::origin(),
            TEXT_SIZE,
            &font,
            &text_color,
        );
        if controller.show_help() {
            window.draw_text(
                &help_text(),
                // no idea why i have to multiply by 2.0, but there it is
                &Point2::new(window.width() as f32 * 2.0 - 900.0, 0.0),
                TEXT_SIZE,
                &font,
                &text_color,
            );
        }
    }

    // Replays this frame's draws onto the kiss3d scene graph
    fn update_scene_objects(&mut self, window: &mut Window, show_orbits: bool) {
        self.draws.clear();
        self.scene.render_all(show_orbits, &mut self.draws);

        for command in self.draws.commands() {
            match command {
                DrawCommand::Sphere(sphere) => {
                    if !self.body_spheres.contains_key(&sphere.label) {
                        let node = create_sphere_object(window, sphere, &self.textures);
                        self.body_spheres.insert(sphere.label.clone(), node);
                    }
                    if let Some(node) = self.body_spheres.get_mut(&sphere.label) {
                        // kiss3d spheres have their poles on y, ours on z
                        let pole_fix = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
                        node.set_local_transformation(to_isometry(&sphere.transform) * pole_fix);
                    }
                }
                DrawCommand::Ring(ring) => {
                    let color = if ring.label == ECLIPTIC_LABEL {
                        ECLIPTIC_COLOR
                    } else {
                        ORBIT_COLOR
                    };
                    self.renderer.draw_ring(ring, Point3::from(color));
                }
            }
        }
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

fn create_sphere_object(
    window: &mut Window,
    sphere: &SphereDraw,
    textures: &KissTextureProvider,
) -> SceneNode {
    let mut node = window.add_sphere(sphere.radius);
    match textures.texture_name(sphere.texture) {
        Some(name) => node.set_texture_with_name(name),
        None => node.set_color(0.8, 0.8, 0.8),
    }
    // Emission has no direct equivalent in kiss3d's default material; tint
    // with its color instead, like the fixed-function glColor it came with.
    if let Some([r, g, b, _]) = sphere.emission {
        node.set_color(r.min(1.0), g.min(1.0), b.min(1.0));
    }
    if sphere.facing == Facing::Inside {
        node.enable_backface_culling(false);
    }
    node
}
