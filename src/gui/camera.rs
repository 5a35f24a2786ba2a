use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3};

use crate::camera::CameraController;

// The free-flying camera, as kiss3d sees it. All the navigation logic lives in
// CameraController; this only adds the projection and the kiss3d plumbing.
//
// Key handling is not done here: keys arrive as Commands from the Controller,
// so that held keys and look-at targeting go through one path.
pub struct FlyCamera {
    controller: CameraController,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    // Everything, including the star map, lives within a few dozen AU
    z_near: f32,
    z_far: f32,
}

impl FlyCamera {
    pub fn new() -> Self {
        FlyCamera {
            controller: CameraController::new(),
            width: 800,
            height: 600,
            fovy: PI / 4.0,
            z_near: 0.005,
            z_far: 200.0,
        }
    }

    pub fn controller_mut(&mut self) -> &mut CameraController {
        &mut self.controller
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.z_near,
            self.z_far,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for FlyCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.width = w.max(1);
            self.height = h.max(1);
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.controller.eye()
    }

    fn view_transform(&self) -> Isometry3<f32> {
        self.controller.view_transform()
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.z_near, self.z_far)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
