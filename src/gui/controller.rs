use kiss3d::event::{Action, Event, Key, WindowEvent};
use kiss3d::window::Window;
use tracing::{debug, info};

use super::view::View;
use crate::command::Command;
use crate::config::SimConfig;
use crate::orrery::FpsCounter;

// Key config, all in one place
const KEY_BINDINGS: &[(Key, Command)] = &[
    (Key::W, Command::MoveForward),
    (Key::S, Command::MoveBack),
    (Key::A, Command::StrafeLeft),
    (Key::D, Command::StrafeRight),
    (Key::Z, Command::MoveUp),
    (Key::X, Command::MoveDown),
    (Key::Left, Command::YawLeft),
    (Key::Right, Command::YawRight),
    (Key::Up, Command::PitchUp),
    (Key::Down, Command::PitchDown),
    (Key::Q, Command::RollLeft),
    (Key::E, Command::RollRight),
    (Key::R, Command::Reset),
    (Key::Key1, Command::LookAt(0)),
    (Key::Key2, Command::LookAt(1)),
    (Key::Key3, Command::LookAt(2)),
    (Key::Key4, Command::LookAt(3)),
    (Key::Key5, Command::LookAt(4)),
    (Key::Key6, Command::LookAt(5)),
    (Key::Key7, Command::LookAt(6)),
    (Key::Key8, Command::LookAt(7)),
    (Key::Key9, Command::LookAt(8)),
    (Key::T, Command::ToggleTimeAcceleration),
    (Key::O, Command::ToggleOrbits),
    (Key::H, Command::ToggleHelp),
    (Key::Escape, Command::Quit),
];

pub struct Controller {
    time_acceleration: f64,
    accelerated: bool,
    show_orbits: bool,
    show_help: bool,
    quit: bool,
    fps_counter: FpsCounter,
}

fn command_for_key(key: Key) -> Option<Command> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, command)| *command)
}

impl Controller {
    pub fn new(config: &SimConfig) -> Self {
        Controller {
            time_acceleration: config.time_acceleration,
            accelerated: false,
            show_orbits: config.show_orbits,
            show_help: false,
            quit: false,
            fps_counter: FpsCounter::new(1000.0),
        }
    }

    /// One-shot commands fire on key press. Continuous ones are polled every
    /// frame instead, see `process_held_keys`.
    pub fn process_event(&mut self, event: Event, view: &mut View) {
        if let WindowEvent::Key(key, Action::Press, _) = event.value {
            match command_for_key(key) {
                Some(command) if !command.is_continuous() => self.dispatch(command, view),
                _ => {}
            }
        }
    }

    pub fn process_held_keys(&mut self, window: &Window, view: &mut View) {
        for (key, command) in KEY_BINDINGS.iter() {
            if command.is_continuous() && window.get_key(*key) == Action::Press {
                self.dispatch(*command, view);
            }
        }
    }

    pub fn dispatch(&mut self, command: Command, view: &mut View) {
        debug!(?command, "dispatching");
        match command {
            Command::LookAt(index) => view.look_at(index),
            Command::ToggleTimeAcceleration => {
                self.accelerated = !self.accelerated;
                info!("Time runs at x{}", self.time_multiplier());
            }
            Command::ToggleOrbits => self.show_orbits = !self.show_orbits,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::Quit => self.quit = true,
            camera_command => view
                .camera_mut()
                .apply(camera_command, self.time_multiplier() as f32),
        }
    }

    pub fn time_multiplier(&self) -> f64 {
        if self.accelerated {
            self.time_acceleration
        } else {
            1.0
        }
    }

    pub fn time_acceleration(&self) -> Option<f64> {
        if self.accelerated {
            Some(self.time_acceleration)
        } else {
            None
        }
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self, frame_millis: f64) {
        self.fps_counter.increment(frame_millis)
    }
}
