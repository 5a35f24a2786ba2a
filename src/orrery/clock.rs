use tracing::debug;

use crate::math::geometry::wrap;

/// Catch-up steps allowed in one frame before the rest is dropped.
pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 250;

/// Simulated time, derived only from fed-in physics steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneClock {
    elapsed_days: f64,
    sun_phase: f64, // degrees
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, elapsed_millis: f64, days_per_second: f64, sun_period: f64) {
        let days = days_per_second * elapsed_millis / 1000.0;
        self.elapsed_days += days;
        self.sun_phase = wrap(self.sun_phase + 360.0 * days / sun_period, 360.0);
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    pub fn sun_phase(&self) -> f64 {
        self.sun_phase
    }

    /// Whole sidereal months elapsed so far.
    pub fn sidereal_months(&self, month_length: f64) -> u32 {
        (self.elapsed_days / month_length).floor() as u32
    }
}

/// Turns variable frame deltas into a whole number of fixed physics steps.
/// Whatever is left over carries into the next frame. After a stall (window
/// dragged, debugger attached) at most `max_steps` run in one frame, and the
/// time owed beyond that is dropped: the simulation slows down instead of
/// freezing the frame.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    step_millis: f64,
    max_steps: u32,
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(step_millis: f64) -> Self {
        Self::with_max_steps(step_millis, DEFAULT_MAX_STEPS_PER_FRAME)
    }

    pub fn with_max_steps(step_millis: f64, max_steps: u32) -> Self {
        assert!(step_millis > 0.0, "Physics step must be positive");
        assert!(max_steps > 0, "Must allow at least one step per frame");
        FixedTimestep {
            step_millis,
            max_steps,
            accumulator: 0.0,
        }
    }

    pub fn step_millis(&self) -> f64 {
        self.step_millis
    }

    pub fn leftover_millis(&self) -> f64 {
        self.accumulator
    }

    /// Adds the frame's elapsed time, and returns how many steps to run now.
    pub fn accumulate(&mut self, elapsed_millis: f64) -> u32 {
        self.accumulator += elapsed_millis.max(0.0);
        let owed = (self.accumulator / self.step_millis).floor();
        self.accumulator -= owed * self.step_millis;

        if owed > self.max_steps as f64 {
            debug!(
                dropped_millis = (owed - self.max_steps as f64) * self.step_millis,
                "falling behind, skipping physics steps"
            );
            self.max_steps
        } else {
            owed as u32
        }
    }
}

pub struct FpsCounter {
    window_millis: f64,
    elapsed_millis: f64,
    counter: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_millis: f64) -> Self {
        FpsCounter {
            window_millis,
            elapsed_millis: 0.0,
            counter: 0,
            previous_fps: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_millis = 0.0;
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    /// Counts one rendered frame that took `frame_millis`.
    pub fn increment(&mut self, frame_millis: f64) {
        self.counter += 1;
        self.elapsed_millis += frame_millis;

        if self.elapsed_millis > self.window_millis {
            self.previous_fps = 1000.0 * self.counter as f64 / self.elapsed_millis;
            self.reset();
        }
    }
}
