use std::f64::consts::TAU;
use std::path::Path;

use nalgebra::{Matrix4, Point3, Vector2, Vector3};

use super::draw::{Facing, RenderTarget, RingDraw, SphereDraw};
use crate::consts::ECLIPTIC_INCLINATION;
use crate::math::geometry::wrap;
use crate::math::transform::{origin_of, rotated, scaled, translated};
use crate::texture::{load_or_fallback, TextureHandle, TextureProvider};

/// Which reference frame a body's orbit is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Orbits the sun; the orbit is measured against the ecliptic.
    Ecliptic,
    /// Orbits another body, inside that body's (untilted) orbital frame.
    Moon,
}

/// Fixed orbital elements. Angles are in degrees, periods in days. A negative
/// period means retrograde motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semimajor_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub arg_periapsis: f64,
    pub sidereal_year: f64,
    pub sidereal_day: f64,
    pub axial_tilt: f64,
}

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub radius: f32,
    pub texture_file: Option<String>,
}

/// Static description of a body and its moons, as found in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct BodySpec {
    pub name: &'static str,
    pub radius: f32,
    pub elements: OrbitalElements,
    /// Image file under the texture directory; untextured bodies render grey
    pub texture_file: Option<&'static str>,
    /// Initial orbital phase, radians
    pub phi: f64,
    pub moons: &'static [BodySpec],
}

/// Where a body currently is in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFrame {
    pub name: String,
    pub radius: f32,
    pub center: Point3<f32>,
}

/// A planet or moon. Owns its moons; they are moved in and never shared.
#[derive(Debug)]
pub struct OrbitingBody {
    info: BodyInfo,
    elements: OrbitalElements,
    semiminor_axis: f64,
    texture: TextureHandle,
    // -- dynamic state --
    phi: f64,            // radians, in [0, 2pi)
    rotation_phase: f64, // degrees, in [0, 360)
    offset: Vector2<f64>,
    moons: Vec<OrbitingBody>,
}

impl OrbitalElements {
    /// Circular, uninclined orbit with no axial tilt.
    pub fn circular(semimajor_axis: f64, sidereal_year: f64, sidereal_day: f64) -> Self {
        OrbitalElements {
            semimajor_axis,
            eccentricity: 0.0,
            inclination: 0.0,
            ascending_node: 0.0,
            arg_periapsis: 0.0,
            sidereal_year,
            sidereal_day,
            axial_tilt: 0.0,
        }
    }

    pub fn semiminor_axis(&self) -> f64 {
        self.semimajor_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }
}

impl OrbitingBody {
    pub fn new(info: BodyInfo, elements: OrbitalElements, phi: f64) -> Self {
        assert!(
            (0.0..1.0).contains(&elements.eccentricity),
            "Currently can only model elliptic orbits, got e = {}",
            elements.eccentricity
        );
        assert!(
            elements.sidereal_year != 0.0 && elements.sidereal_day != 0.0,
            "Sidereal periods of {} must be non-zero",
            info.name
        );

        let mut body = OrbitingBody {
            info,
            elements,
            semiminor_axis: elements.semiminor_axis(),
            texture: TextureHandle::None,
            phi: wrap(phi, TAU),
            rotation_phase: 0.0,
            offset: Vector2::zeros(),
            moons: vec![],
        };
        body.update_offset();
        body
    }

    /// Builds the body and, recursively, its moons.
    pub fn from_spec(spec: &BodySpec) -> Self {
        let info = BodyInfo {
            name: spec.name.to_owned(),
            radius: spec.radius,
            texture_file: spec.texture_file.map(str::to_owned),
        };
        let mut body = OrbitingBody::new(info, spec.elements, spec.phi);
        for moon in spec.moons {
            body.add_moon(OrbitingBody::from_spec(moon));
        }
        body
    }

    pub fn add_moon(&mut self, moon: OrbitingBody) {
        self.moons.push(moon);
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn semiminor_axis(&self) -> f64 {
        self.semiminor_axis
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn rotation_phase(&self) -> f64 {
        self.rotation_phase
    }

    /// Position in the orbital plane, (x, z), relative to the parent.
    pub fn orbit_offset(&self) -> Vector2<f64> {
        self.offset
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn moons(&self) -> &[OrbitingBody] {
        &self.moons
    }

    /// Number of bodies in this subtree, self included.
    pub fn count(&self) -> usize {
        1 + self.moons.iter().map(OrbitingBody::count).sum::<usize>()
    }

    /// Moves the body (and its moons) forward by one physics step. Must be
    /// driven by a fixed timestep to stay frame-rate independent.
    pub fn advance(&mut self, elapsed_millis: f64, days_per_second: f64) {
        let days = days_per_second * elapsed_millis / 1000.0;

        self.phi = wrap(self.phi + TAU * days / self.elements.sidereal_year, TAU);
        self.rotation_phase = wrap(
            self.rotation_phase + 360.0 * days / self.elements.sidereal_day,
            360.0,
        );
        self.update_offset();

        for moon in self.moons.iter_mut() {
            moon.advance(elapsed_millis, days_per_second);
        }
    }

    fn update_offset(&mut self) {
        // '-' for counterclockwise orbiting, seen from above
        self.offset = Vector2::new(
            self.elements.semimajor_axis * (-self.phi).cos(),
            self.semiminor_axis * (-self.phi).sin(),
        );
    }

    /// The frame the orbit lies in: its xz-plane is the orbital plane, with the
    /// parent at the origin.
    pub fn orbital_frame(&self, parent: &Matrix4<f32>, frame: FrameKind) -> Matrix4<f32> {
        let mut m = *parent;
        if frame == FrameKind::Ecliptic {
            m = rotated(&m, ECLIPTIC_INCLINATION, &Vector3::x());
        }
        m = rotated(&m, self.elements.ascending_node as f32, &Vector3::y());
        m = rotated(&m, self.elements.inclination as f32, &Vector3::x());
        rotated(&m, self.elements.arg_periapsis as f32, &Vector3::y())
    }

    /// The orbital frame moved to the body's center. Moons orbit in this frame.
    pub fn center_frame(&self, parent: &Matrix4<f32>, frame: FrameKind) -> Matrix4<f32> {
        let offset = Vector3::new(self.offset.x as f32, 0.0, self.offset.y as f32);
        translated(&self.orbital_frame(parent, frame), &offset)
    }

    /// The center frame with axial tilt and daily spin applied, corrected so the
    /// texture's poles line up with the spin axis.
    pub fn surface_frame(&self, center: &Matrix4<f32>) -> Matrix4<f32> {
        let m = rotated(center, self.elements.axial_tilt as f32, &Vector3::x());
        let m = rotated(&m, self.rotation_phase as f32, &Vector3::y());
        rotated(&m, 90.0, &-Vector3::x())
    }

    pub fn render(
        &self,
        parent: &Matrix4<f32>,
        show_orbit: bool,
        frame: FrameKind,
        target: &mut dyn RenderTarget,
    ) {
        let orbit = self.orbital_frame(parent, frame);

        if show_orbit {
            let flattening = (self.semiminor_axis / self.elements.semimajor_axis) as f32;
            target.draw_ring(RingDraw {
                label: self.info.name.clone(),
                transform: scaled(&orbit, &Vector3::new(1.0, 1.0, flattening)),
                radius: self.elements.semimajor_axis as f32,
            });
        }

        // Moons go first: they orbit the center of the orbital frame, and must
        // not pick up this body's tilt or spin.
        let center = self.center_frame(parent, frame);
        for moon in self.moons.iter() {
            moon.render(&center, show_orbit, FrameKind::Moon, target);
        }

        target.draw_sphere(SphereDraw {
            label: self.info.name.clone(),
            transform: self.surface_frame(&center),
            radius: self.info.radius,
            texture: self.texture,
            emission: None,
            facing: Facing::Outside,
        });
    }

    /// Appends this body and its moons, depth-first, with their world-space
    /// centers.
    pub fn collect_frames(&self, parent: &Matrix4<f32>, frame: FrameKind, out: &mut Vec<BodyFrame>) {
        let center = self.center_frame(parent, frame);
        out.push(BodyFrame {
            name: self.info.name.clone(),
            radius: self.info.radius,
            center: origin_of(&center),
        });
        for moon in self.moons.iter() {
            moon.collect_frames(&center, FrameKind::Moon, out);
        }
    }

    pub fn load_textures(&mut self, provider: &mut dyn TextureProvider, dir: &Path) {
        if let Some(file) = &self.info.texture_file {
            self.texture = load_or_fallback(provider, &dir.join(file));
        }
        for moon in self.moons.iter_mut() {
            moon.load_textures(provider, dir);
        }
    }

    pub fn release_textures(&mut self, provider: &mut dyn TextureProvider) {
        self.texture.release(provider);
        for moon in self.moons.iter_mut() {
            moon.release_textures(provider);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orrery::draw::DrawList;
    use crate::texture::NullTextureProvider;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn make_body(name: &str, elements: OrbitalElements, phi: f64) -> OrbitingBody {
        let info = BodyInfo {
            name: name.to_owned(),
            radius: 0.1,
            texture_file: Some(format!("{}.bmp", name)),
        };
        OrbitingBody::new(info, elements, phi)
    }

    fn planet_with_moon(tilt: f64) -> OrbitingBody {
        let mut elements = OrbitalElements::circular(1.0, 365.0, 1.0);
        elements.axial_tilt = tilt;
        elements.inclination = 3.0;
        elements.ascending_node = 40.0;
        let mut planet = make_body("planet", elements, 0.3);

        let mut moon_elements = OrbitalElements::circular(0.2, 27.0, 27.0);
        moon_elements.inclination = 5.0;
        moon_elements.eccentricity = 0.05;
        planet.add_moon(make_body("moon", moon_elements, 1.0));
        planet
    }

    #[test]
    fn test_semiminor_axis() {
        let body = make_body("circle", OrbitalElements::circular(2.5, 10.0, 1.0), 0.0);
        assert_relative_eq!(body.semiminor_axis(), 2.5);

        // e = 3/5, so b = a * 4/5
        let mut elements = OrbitalElements::circular(10.0, 10.0, 1.0);
        elements.eccentricity = 0.6;
        let body = make_body("ellipse", elements, 0.0);
        assert_relative_eq!(body.semiminor_axis(), 8.0, max_relative = 1e-12);
    }

    #[test]
    #[should_panic]
    fn test_rejects_open_orbits() {
        let mut elements = OrbitalElements::circular(1.0, 10.0, 1.0);
        elements.eccentricity = 1.0;
        make_body("comet", elements, 0.0);
    }

    #[test]
    fn test_quarter_orbit() {
        let mut body = make_body("quarter", OrbitalElements::circular(1.0, 360.0, 360.0), 0.0);
        body.advance(90000.0, 1.0);

        assert_relative_eq!(body.phi(), FRAC_PI_2, max_relative = 1e-12);
        assert_relative_eq!(body.rotation_phase(), 90.0, max_relative = 1e-12);
        assert_abs_diff_eq!(body.orbit_offset().x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.orbit_offset().y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_full_year_in_fixed_steps() {
        let start_phi = 0.7;
        let mut elements = OrbitalElements::circular(1.0, 87.9, 58.6);
        elements.eccentricity = 0.2;
        let mut body = make_body("mercury", elements, start_phi);

        // 1000 * 87.9 ms at one day per second, in 10 ms steps
        for _ in 0..8790 {
            body.advance(10.0, 1.0);
        }
        assert_abs_diff_eq!(body.phi(), start_phi, epsilon = 1e-9);
    }

    #[test]
    fn test_phases_stay_wrapped() {
        let mut elements = OrbitalElements::circular(0.7, -224.7, -243.0);
        elements.eccentricity = 0.006;
        let mut body = make_body("retrograde", elements, -std::f64::consts::PI);
        body.add_moon(make_body("fast", OrbitalElements::circular(0.1, 0.3, 0.05), 6.0));

        let steps = [1.0, 16.0, 333.0, 10.0, 5000.0, 0.5, 123456.0];
        for (i, elapsed) in steps.iter().cycle().take(500).enumerate() {
            body.advance(*elapsed, (i % 7) as f64 + 0.5);
            for b in std::iter::once(&body).chain(body.moons()) {
                assert!((0.0..TAU).contains(&b.phi()), "phi = {}", b.phi());
                assert!(
                    (0.0..360.0).contains(&b.rotation_phase()),
                    "phase = {}",
                    b.rotation_phase()
                );
            }
        }
    }

    #[test]
    fn test_orbit_ring_is_flattened() {
        let mut elements = OrbitalElements::circular(10.0, 100.0, 1.0);
        elements.eccentricity = 0.6;
        let body = make_body("ellipse", elements, 0.0);

        let mut list = DrawList::new();
        body.render(&Matrix4::identity(), true, FrameKind::Moon, &mut list);
        let ring = list.ring("ellipse").expect("orbit ring was not drawn");
        assert_relative_eq!(ring.radius, 10.0);

        let far_x = ring.transform.transform_point(&Point3::new(10.0, 0.0, 0.0));
        let far_z = ring.transform.transform_point(&Point3::new(0.0, 0.0, 10.0));
        assert_abs_diff_eq!(far_x, Point3::new(10.0, 0.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(far_z, Point3::new(0.0, 0.0, 8.0), epsilon = 1e-5);

        // The body sits on its ring
        let mut list = DrawList::new();
        body.render(&Matrix4::identity(), false, FrameKind::Moon, &mut list);
        assert!(list.ring("ellipse").is_none());
        let sphere = list.sphere("ellipse").unwrap();
        assert_abs_diff_eq!(origin_of(&sphere.transform), Point3::new(10.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_moons_drawn_before_parent() {
        let planet = planet_with_moon(20.0);
        let mut list = DrawList::new();
        planet.render(&Matrix4::identity(), false, FrameKind::Ecliptic, &mut list);

        let labels: Vec<_> = list.spheres().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["moon", "planet"]);
    }

    #[test]
    fn test_moon_ignores_parent_tilt_and_spin() {
        let mut upright = planet_with_moon(0.0);
        let mut tilted = planet_with_moon(60.0);
        // Spin only the tilted one's surface a bit further
        tilted.rotation_phase = 123.0;
        upright.rotation_phase = 0.0;

        let render = |body: &OrbitingBody| {
            let mut list = DrawList::new();
            body.render(&Matrix4::identity(), true, FrameKind::Ecliptic, &mut list);
            list
        };
        let upright = render(&upright);
        let tilted = render(&tilted);

        assert_abs_diff_eq!(
            upright.sphere("moon").unwrap().transform,
            tilted.sphere("moon").unwrap().transform,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            upright.ring("moon").unwrap().transform,
            tilted.ring("moon").unwrap().transform,
            epsilon = 1e-6
        );
        // ...whereas the planet itself does change
        let diff = upright.sphere("planet").unwrap().transform - tilted.sphere("planet").unwrap().transform;
        assert!(diff.norm() > 0.1);
    }

    #[test]
    fn test_moon_frame_skips_ecliptic() {
        let planet = planet_with_moon(10.0);
        let moon = &planet.moons()[0];
        let center = planet.center_frame(&Matrix4::identity(), FrameKind::Ecliptic);

        let mut list = DrawList::new();
        planet.render(&Matrix4::identity(), true, FrameKind::Ecliptic, &mut list);
        let expected = scaled(
            &moon.orbital_frame(&center, FrameKind::Moon),
            &Vector3::new(1.0, 1.0, (moon.semiminor_axis() / 0.2) as f32),
        );
        assert_abs_diff_eq!(list.ring("moon").unwrap().transform, expected, epsilon = 1e-6);

        // And the ecliptic rotation really is a different frame
        let with_ecliptic = moon.orbital_frame(&center, FrameKind::Ecliptic);
        assert!((with_ecliptic - moon.orbital_frame(&center, FrameKind::Moon)).norm() > 1e-3);
    }

    #[test]
    fn test_frames_match_rendered_centers() {
        let mut planet = planet_with_moon(25.0);
        planet.advance(12345.0, 3.0);

        let mut frames = vec![];
        planet.collect_frames(&Matrix4::identity(), FrameKind::Ecliptic, &mut frames);
        assert_eq!(frames.len(), planet.count());
        assert_eq!(frames[0].name, "planet");
        assert_eq!(frames[1].name, "moon");

        let mut list = DrawList::new();
        planet.render(&Matrix4::identity(), false, FrameKind::Ecliptic, &mut list);
        for frame in frames.iter() {
            let sphere = list.sphere(&frame.name).unwrap();
            assert_abs_diff_eq!(origin_of(&sphere.transform), frame.center, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_untextured_body_loads_nothing() {
        let info = BodyInfo {
            name: "rock".to_owned(),
            radius: 0.01,
            texture_file: None,
        };
        let mut rock = OrbitingBody::new(info, OrbitalElements::circular(0.5, 100.0, 3.0), 0.0);
        rock.add_moon(make_body("pebble", OrbitalElements::circular(0.05, 5.0, 5.0), 0.0));

        let mut provider = NullTextureProvider::new();
        rock.load_textures(&mut provider, Path::new("textures"));
        // Only the moon has a file to load
        assert_eq!(provider.live_count(), 1);
        assert_eq!(rock.texture(), TextureHandle::None);
        assert!(rock.moons()[0].texture().is_loaded());

        rock.release_textures(&mut provider);
        assert_eq!(provider.live_count(), 0);
    }

    #[test]
    fn test_texture_lifecycle() {
        let mut provider = NullTextureProvider::new();
        let mut planet = planet_with_moon(0.0);
        planet.load_textures(&mut provider, Path::new("textures"));
        assert_eq!(provider.live_count(), 2);
        assert!(planet.texture().is_loaded());
        assert!(planet.moons()[0].texture().is_loaded());

        planet.release_textures(&mut provider);
        assert_eq!(provider.live_count(), 0);
        assert_eq!(planet.texture(), TextureHandle::None);
        assert_eq!(planet.moons()[0].texture(), TextureHandle::None);
    }
}
