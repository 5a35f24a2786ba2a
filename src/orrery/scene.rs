use std::path::Path;

use nalgebra::{Matrix4, Vector3};
use tracing::info;

use super::body::{BodyFrame, FrameKind, OrbitingBody};
use super::clock::SceneClock;
use super::draw::{Facing, RenderTarget, RingDraw, SphereDraw};
use crate::config::SimConfig;
use crate::consts::{
    ECLIPTIC_INCLINATION, PLANETS, SKY_RADIUS, SKY_TEXTURE, SUN_EMISSION, SUN_RADIUS,
    SUN_SIDEREAL_PERIOD, SUN_TEXTURE,
};
use crate::math::transform::rotated;
use crate::texture::{load_or_fallback, TextureHandle, TextureProvider};

pub const SKY_LABEL: &str = "Sky";
pub const SUN_LABEL: &str = "Sun";
pub const ECLIPTIC_LABEL: &str = "Ecliptic";

/// How far past the outermost orbit the ecliptic reference ring reaches.
const ECLIPTIC_RING_MARGIN: f32 = 1.2;

/// The sun, everything orbiting it, and the simulated time.
#[derive(Debug)]
pub struct Scene {
    planets: Vec<OrbitingBody>,
    clock: SceneClock,
    days_per_second: f64,
    sun_texture: TextureHandle,
    sky_texture: TextureHandle,
}

impl Scene {
    /// A scene with only the sun in it.
    pub fn new(days_per_second: f64) -> Self {
        Scene {
            planets: vec![],
            clock: SceneClock::new(),
            days_per_second,
            sun_texture: TextureHandle::None,
            sky_texture: TextureHandle::None,
        }
    }

    /// The full solar system from the catalog, with textures loaded from
    /// `config.texture_dir`.
    pub fn initialize(config: &SimConfig, provider: &mut dyn TextureProvider) -> Self {
        let mut scene = Scene::new(config.days_per_second);
        for spec in PLANETS {
            scene.add_planet(OrbitingBody::from_spec(spec));
        }
        scene.load_textures(provider, &config.texture_dir);

        info!(
            bodies = scene.body_count(),
            days_per_second = scene.days_per_second,
            "scene initialized"
        );
        scene
    }

    pub fn add_planet(&mut self, planet: OrbitingBody) {
        self.planets.push(planet);
    }

    pub fn load_textures(&mut self, provider: &mut dyn TextureProvider, dir: &Path) {
        self.sun_texture = load_or_fallback(provider, &dir.join(SUN_TEXTURE));
        self.sky_texture = load_or_fallback(provider, &dir.join(SKY_TEXTURE));
        for planet in self.planets.iter_mut() {
            planet.load_textures(provider, dir);
        }
    }

    pub fn planets(&self) -> &[OrbitingBody] {
        &self.planets
    }

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn days_per_second(&self) -> f64 {
        self.days_per_second
    }

    /// Planets and moons, not counting the sun.
    pub fn body_count(&self) -> usize {
        self.planets.iter().map(OrbitingBody::count).sum()
    }

    /// One fixed physics step.
    pub fn tick(&mut self, elapsed_millis: f64) {
        for planet in self.planets.iter_mut() {
            planet.advance(elapsed_millis, self.days_per_second);
        }
        self.clock
            .advance(elapsed_millis, self.days_per_second, SUN_SIDEREAL_PERIOD);
    }

    pub fn render_all(&self, show_orbits: bool, target: &mut dyn RenderTarget) {
        let root = Matrix4::identity();

        target.draw_sphere(SphereDraw {
            label: SKY_LABEL.to_owned(),
            transform: rotated(&root, 90.0, &-Vector3::x()),
            radius: SKY_RADIUS,
            texture: self.sky_texture,
            emission: None,
            facing: Facing::Inside,
        });

        if show_orbits {
            target.draw_ring(RingDraw {
                label: ECLIPTIC_LABEL.to_owned(),
                transform: rotated(&root, ECLIPTIC_INCLINATION, &Vector3::x()),
                radius: self.outermost_orbit() * ECLIPTIC_RING_MARGIN,
            });
        }

        self.render_sun(&root, target);

        for planet in self.planets.iter() {
            planet.render(&root, show_orbits, FrameKind::Ecliptic, target);
        }
    }

    fn render_sun(&self, root: &Matrix4<f32>, target: &mut dyn RenderTarget) {
        let m = rotated(root, 90.0, &Vector3::y());
        let m = rotated(&m, self.clock.sun_phase() as f32, &Vector3::y());
        let m = rotated(&m, 90.0, &-Vector3::x());

        target.draw_sphere(SphereDraw {
            label: SUN_LABEL.to_owned(),
            transform: m,
            radius: SUN_RADIUS,
            texture: self.sun_texture,
            emission: Some(SUN_EMISSION),
            facing: Facing::Outside,
        });
    }

    fn outermost_orbit(&self) -> f32 {
        self.planets
            .iter()
            .map(|p| p.elements().semimajor_axis as f32)
            .fold(1.0, f32::max)
    }

    /// World-space centers of every body, planets and moons depth-first. This
    /// walks the same transform chain as rendering, so it always agrees with
    /// what was last drawn.
    pub fn body_frames(&self) -> Vec<BodyFrame> {
        let mut frames = Vec::with_capacity(self.body_count());
        for planet in self.planets.iter() {
            planet.collect_frames(&Matrix4::identity(), FrameKind::Ecliptic, &mut frames);
        }
        frames
    }

    pub fn body_frame(&self, index: usize) -> Option<BodyFrame> {
        self.body_frames().into_iter().nth(index)
    }

    /// Releases every texture the scene holds. The scene can still be ticked
    /// and rendered afterwards, untextured.
    pub fn teardown(&mut self, provider: &mut dyn TextureProvider) {
        self.sun_texture.release(provider);
        self.sky_texture.release(provider);
        for planet in self.planets.iter_mut() {
            planet.release_textures(provider);
        }
    }
}
