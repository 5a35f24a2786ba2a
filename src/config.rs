use std::path::PathBuf;

use clap::Parser;

use crate::consts::DAYS_PER_SECOND;
use crate::orrery::DEFAULT_MAX_STEPS_PER_FRAME;

/// Runtime knobs. The bodies themselves are fixed data in `consts`.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Real-time orrery of the inner solar system")]
pub struct SimConfig {
    /// Directory holding the body textures
    #[arg(long, default_value = "textures")]
    pub texture_dir: PathBuf,

    /// Simulated days per real second
    #[arg(long, default_value_t = DAYS_PER_SECOND, value_parser = parse_positive)]
    pub days_per_second: f64,

    /// Length of one fixed physics step, in milliseconds
    #[arg(long, default_value_t = 10.0, value_parser = parse_positive)]
    pub step_millis: f64,

    /// Most physics steps run in a single frame; time owed beyond that is dropped
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS_PER_FRAME, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_steps_per_frame: u32,

    /// Speed multiplier applied while time acceleration is toggled on
    #[arg(long, default_value_t = 10.0, value_parser = parse_positive)]
    pub time_acceleration: f64,

    /// Start with orbit paths visible
    #[arg(long)]
    pub show_orbits: bool,

    /// Frame rate cap
    #[arg(long, default_value_t = 60)]
    pub framerate: u64,
}

fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a positive number, got {}", value))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig::parse_from(["solar-orrery"])
    }
}
