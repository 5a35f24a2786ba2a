use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::config::SimConfig;
use crate::orrery::FixedTimestep;

mod camera;
mod controller;
mod renderers;
mod textures;
mod view;

pub struct Simulation {
    view: View,
    controller: Controller,
    stepper: FixedTimestep,
    last_frame: Instant,
}

impl Simulation {
    pub fn new(config: &SimConfig, window: &mut Window) -> Self {
        Self {
            view: View::new(config, window),
            controller: Controller::new(config),
            stepper: FixedTimestep::with_max_steps(config.step_millis, config.max_steps_per_frame),
            last_frame: Instant::now(),
        }
    }

    fn process_user_input(&mut self, window: &mut Window) {
        for event in window.events().iter() {
            self.controller.process_event(event, &mut self.view);
        }
        self.controller.process_held_keys(window, &mut self.view);
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        let now = Instant::now();
        let frame_millis = now.duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.last_frame = now;

        self.process_user_input(window);
        if self.controller.should_quit() {
            self.view.teardown(window);
            window.close();
            return;
        }

        // Physics runs in fixed steps no matter how long the frame took
        let simulated_millis = frame_millis * self.controller.time_multiplier();
        for _ in 0..self.stepper.accumulate(simulated_millis) {
            self.view.tick(self.stepper.step_millis());
        }

        self.view.prerender_scene(window, &self.controller);
        self.controller.increment_frame_counter(frame_millis);
    }
}
