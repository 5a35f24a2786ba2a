use std::fmt;

use crate::consts::SIDEREAL_MONTH;
use crate::orrery::SceneClock;

/// The numbers shown in the corner of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStats {
    pub days: f64,
    pub months: u32,
    pub fps: f64,
    /// Speed multiplier, when time acceleration is on
    pub time_acceleration: Option<f64>,
}

impl HudStats {
    pub fn new(clock: &SceneClock, fps: f64, time_acceleration: Option<f64>) -> Self {
        HudStats {
            days: clock.elapsed_days(),
            months: clock.sidereal_months(SIDEREAL_MONTH),
            fps,
            time_acceleration,
        }
    }
}

impl fmt::Display for HudStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Days elapsed: {:.2}", self.days)?;
        writeln!(f, "Sidereal months elapsed: {}", self.months)?;
        write!(f, "FPS: {:.0}", self.fps)?;
        if let Some(factor) = self.time_acceleration {
            write!(f, "\nTime acceleration: x{}", factor)?;
        }
        Ok(())
    }
}

/// Key bindings, one per line, as `(keys, action)` pairs.
pub const HELP: &[(&str, &str)] = &[
    ("W / S", "Move forward / back"),
    ("A / D", "Strafe left / right"),
    ("Z / X", "Move up / down"),
    ("Left / Right", "Yaw"),
    ("Up / Down", "Pitch"),
    ("Q / E", "Roll"),
    ("1-9", "Look at body"),
    ("R", "Reset camera"),
    ("T", "Toggle time acceleration"),
    ("O", "Toggle orbits"),
    ("H", "Toggle this help"),
    ("Esc", "Quit"),
];

pub fn help_text() -> String {
    let width = HELP.iter().map(|(keys, _)| keys.len()).max().unwrap_or(0);
    HELP.iter()
        .map(|(keys, action)| format!("{:width$}  {}", keys, action, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
