use std::io;
use std::path::Path;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use solar_orrery::camera::CameraController;
use solar_orrery::config::SimConfig;
use solar_orrery::consts::SIDEREAL_YEAR;
use solar_orrery::orrery::{DrawList, FixedTimestep, Scene, SKY_LABEL, SUN_LABEL};
use solar_orrery::texture::{
    NullTextureProvider, TextureError, TextureHandle, TextureId, TextureProvider,
};

const FRAME_MILLIS: f64 = 1000.0 / 60.0;

fn run_frame(scene: &mut Scene, stepper: &mut FixedTimestep, frame_millis: f64) {
    for _ in 0..stepper.accumulate(frame_millis) {
        scene.tick(stepper.step_millis());
    }
}

// Feeds `millis` of wall time in 60 fps frames
fn run_for(scene: &mut Scene, stepper: &mut FixedTimestep, millis: f64) {
    let mut remaining = millis;
    while remaining > 0.0 {
        let frame = remaining.min(FRAME_MILLIS);
        run_frame(scene, stepper, frame);
        remaining -= frame;
    }
}

/// Frames of uneven length still add up to the same simulated time, as long
/// as the total is the same.
#[test]
fn test_frame_rate_independence() {
    let config = SimConfig::default();
    let mut smooth = Scene::initialize(&config, &mut NullTextureProvider::new());
    let mut choppy = Scene::initialize(&config, &mut NullTextureProvider::new());
    let mut smooth_stepper = FixedTimestep::new(config.step_millis);
    let mut choppy_stepper = FixedTimestep::new(config.step_millis);

    run_for(&mut smooth, &mut smooth_stepper, 10_000.0);
    for frame_millis in [3.0, 47.5, 16.0, 33.5].iter().cycle().take(400) {
        run_frame(&mut choppy, &mut choppy_stepper, *frame_millis);
    }
    // Both ran 10 s, modulo at most one leftover step each
    assert_relative_eq!(
        smooth.clock().elapsed_days(),
        choppy.clock().elapsed_days(),
        epsilon = 2.0 * config.step_millis * config.days_per_second / 1000.0
    );

    for (a, b) in smooth.body_frames().iter().zip(choppy.body_frames().iter()) {
        assert_eq!(a.name, b.name);
        assert_abs_diff_eq!(a.center, b.center, epsilon = 1e-2);
    }
}

#[test]
fn test_earth_returns_after_one_year() {
    let config = SimConfig::default();
    let mut scene = Scene::initialize(&config, &mut NullTextureProvider::new());
    let start = scene.body_frame(0).unwrap();
    assert_eq!(start.name, "Earth");

    let mut stepper = FixedTimestep::new(config.step_millis);
    run_for(
        &mut scene,
        &mut stepper,
        SIDEREAL_YEAR / config.days_per_second * 1000.0,
    );

    let end = scene.body_frame(0).unwrap();
    assert_abs_diff_eq!(start.center, end.center, epsilon = 1e-3);
    assert_relative_eq!(scene.clock().elapsed_days(), SIDEREAL_YEAR, epsilon = 0.1);
}

#[test]
fn test_look_at_every_body() {
    let config = SimConfig::default();
    let mut scene = Scene::initialize(&config, &mut NullTextureProvider::new());
    let mut stepper = FixedTimestep::new(config.step_millis);
    run_for(&mut scene, &mut stepper, 12_345.0);

    let mut camera = CameraController::new();
    for frame in scene.body_frames() {
        camera.look_at(&frame);
        let pose = camera.pose();

        let to_target = (frame.center - pose.position).normalize();
        assert_relative_eq!(pose.sight.dot(&to_target), 1.0, epsilon = 1e-5);
        assert_relative_eq!(pose.up.norm(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(pose.sight.dot(&pose.up), 0.0, epsilon = 1e-5);

        // Parked outside the body, a handful of radii away
        let distance = (frame.center - pose.position).norm();
        assert!(distance > 3.0 * frame.radius, "{} too close", frame.name);
        assert!(distance < 10.0 * frame.radius, "{} too far", frame.name);
    }
}

struct MissingFiles;

impl TextureProvider for MissingFiles {
    fn load(&mut self, path: &Path) -> Result<TextureId, TextureError> {
        Err(TextureError::Io {
            path: path.to_owned(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })
    }

    fn release(&mut self, _id: TextureId) {
        panic!("nothing was ever loaded");
    }
}

#[test]
fn test_missing_textures_do_not_stop_the_scene() {
    let mut scene = Scene::initialize(&SimConfig::default(), &mut MissingFiles);
    scene.tick(10.0);

    let mut draws = DrawList::new();
    scene.render_all(false, &mut draws);
    assert!(draws.sphere(SKY_LABEL).is_some());
    assert!(draws.sphere(SUN_LABEL).is_some());
    assert_eq!(draws.spheres().count(), 2 + scene.body_count());
    assert!(draws
        .spheres()
        .all(|sphere| sphere.texture == TextureHandle::Fallback));

    scene.teardown(&mut MissingFiles);
}

/// A long stall costs simulated time instead of a frozen frame.
#[test]
fn test_stall_is_bounded() {
    let config = SimConfig::default();
    let mut scene = Scene::initialize(&config, &mut NullTextureProvider::new());
    let mut stepper = FixedTimestep::with_max_steps(config.step_millis, 20);

    run_frame(&mut scene, &mut stepper, 60.0 * 60.0 * 1000.0);
    let max_days = 20.0 * config.step_millis * config.days_per_second / 1000.0;
    assert_relative_eq!(scene.clock().elapsed_days(), max_days, epsilon = 1e-9);

    // Back to normal on the next frame
    run_frame(&mut scene, &mut stepper, FRAME_MILLIS);
    assert!(scene.clock().elapsed_days() > max_days);
}
