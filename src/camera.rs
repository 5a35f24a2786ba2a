//! Free-flying camera pose and the navigation commands that move it.
//!
//! The pose is a position plus a (sight, up, side) basis. Every transition
//! leaves that basis orthonormal and right-handed, with `side = sight x up`.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::command::Command;
use crate::math::geometry::{cross, normalize, translate_in_basis, DEGENERATE_NORM};
use crate::orrery::BodyFrame;

const INITIAL_POSITION: [f32; 3] = [0.0, 1.2, 3.5];
const INITIAL_SIGHT: [f32; 3] = [0.0, -1.2, -3.5];
const INITIAL_UP: [f32; 3] = [0.0, 1.0, 0.0];

pub const MOVE_STEP: f32 = 0.01;
pub const LOOK_STEP_DEGREES: f32 = 1.0;
pub const ROLL_STEP_DEGREES: f32 = 1.0;
/// Sight never gets steeper than this above or below the horizon.
pub const PITCH_LIMIT_DEGREES: f32 = 60.0;

// Where look-at parks the camera, in radii of the target body
pub const LOOK_AT_RADIAL_RADII: f32 = 6.0;
pub const LOOK_AT_VERTICAL_RADII: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3<f32>,
    pub sight: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl CameraPose {
    pub fn side(&self) -> Vector3<f32> {
        normalize(&cross(&self.sight, &self.up))
    }

    /// Angle of the sight vector above the horizontal plane, in radians.
    pub fn elevation(&self) -> f32 {
        elevation(&self.sight)
    }
}

fn elevation(v: &Vector3<f32>) -> f32 {
    v.y.clamp(-1.0, 1.0).asin()
}

pub struct CameraController {
    pose: CameraPose,
    // -- knobs to fiddle with --
    move_step: f32,
    look_step: f32, // radians
    roll_step: f32, // radians
    pitch_limit: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        let mut camera = CameraController {
            pose: initial_pose(),
            move_step: MOVE_STEP,
            look_step: LOOK_STEP_DEGREES.to_radians(),
            roll_step: ROLL_STEP_DEGREES.to_radians(),
            pitch_limit: PITCH_LIMIT_DEGREES.to_radians(),
        };
        camera.reset();
        camera
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn eye(&self) -> Point3<f32> {
        self.pose.position
    }

    pub fn view_transform(&self) -> Isometry3<f32> {
        let target = self.pose.position + self.pose.sight;
        Isometry3::look_at_rh(&self.pose.position, &target, &self.pose.up)
    }

    /// Applies one navigation command. `multiplier` scales translation only;
    /// rotations always turn by a fixed step. Non-camera commands are ignored.
    pub fn apply(&mut self, command: Command, multiplier: f32) {
        let step = self.move_step * multiplier;
        let pose = self.pose;
        match command {
            Command::MoveForward => self.dolly(&pose.sight, step),
            Command::MoveBack => self.dolly(&pose.sight, -step),
            Command::StrafeRight => self.dolly(&pose.side(), step),
            Command::StrafeLeft => self.dolly(&pose.side(), -step),
            Command::MoveUp => self.dolly(&pose.up, step),
            Command::MoveDown => self.dolly(&pose.up, -step),
            Command::YawRight => self.yaw(self.look_step),
            Command::YawLeft => self.yaw(-self.look_step),
            Command::PitchUp => self.pitch(self.look_step),
            Command::PitchDown => self.pitch(-self.look_step),
            Command::RollRight => self.roll(self.roll_step),
            Command::RollLeft => self.roll(-self.roll_step),
            Command::Reset => self.reset(),
            _ => {}
        }
    }

    pub fn dolly(&mut self, direction: &Vector3<f32>, distance: f32) {
        self.pose.position += direction * distance;
    }

    /// Turns sight toward the side vector. Up is untouched. Once the camera
    /// is rolled, side is no longer horizontal, so yaw obeys the pitch limit
    /// too.
    pub fn yaw(&mut self, angle: f32) {
        let side = self.pose.side();
        let sight = translate_in_basis(&self.pose.sight, &side, angle);
        if self.steepens_past_limit(&sight) {
            return;
        }
        self.pose.sight = sight;
    }

    /// Turns sight toward up, refusing to steepen past the pitch limit.
    pub fn pitch(&mut self, angle: f32) {
        let side = self.pose.side();
        let sight = translate_in_basis(&self.pose.sight, &self.pose.up, angle);
        if self.steepens_past_limit(&sight) {
            return;
        }

        self.pose.sight = sight;
        self.pose.up = normalize(&cross(&side, &sight));
    }

    // Moving back toward the horizon is always allowed
    fn steepens_past_limit(&self, sight: &Vector3<f32>) -> bool {
        let old_elevation = self.pose.elevation().abs();
        let new_elevation = elevation(sight).abs();
        new_elevation > self.pitch_limit && new_elevation > old_elevation
    }

    /// Turns up toward the side vector. Sight is untouched.
    pub fn roll(&mut self, angle: f32) {
        let side = self.pose.side();
        self.pose.up = translate_in_basis(&self.pose.up, &side, angle);
    }

    pub fn reset(&mut self) {
        self.pose = initial_pose();
        self.orthonormalize();
    }

    /// Parks the camera above and outside the target, looking at its center.
    pub fn look_at(&mut self, target: &BodyFrame) {
        let radial = if target.center.coords.norm() > DEGENERATE_NORM {
            normalize(&target.center.coords)
        } else {
            // Target sits on the sun; any horizontal direction will do
            Vector3::x()
        };
        let position = target.center
            + radial * (LOOK_AT_RADIAL_RADII * target.radius)
            + Vector3::y() * (LOOK_AT_VERTICAL_RADII * target.radius);
        let sight = normalize(&(target.center - position));

        // Keep as much of the old up as we can. If it happens to be parallel to
        // the new sight, fall back to world up, which sight can't be parallel to
        // since it always has a radial component.
        let mut reference_up = self.pose.up;
        if cross(&sight, &reference_up).norm() < 1e-4 {
            reference_up = Vector3::y();
        }
        let side = cross(&sight, &reference_up);

        self.pose = CameraPose {
            position,
            sight,
            up: normalize(&cross(&side, &sight)),
        };
    }

    fn orthonormalize(&mut self) {
        self.pose.sight = normalize(&self.pose.sight);
        let side = self.pose.side();
        self.pose.up = normalize(&cross(&side, &self.pose.sight));
    }
}

fn initial_pose() -> CameraPose {
    CameraPose {
        position: Point3::from(INITIAL_POSITION),
        sight: Vector3::from(INITIAL_SIGHT),
        up: Vector3::from(INITIAL_UP),
    }
}
