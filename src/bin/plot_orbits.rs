use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use plotters::prelude::*;
use solar_orrery::config::SimConfig;
use solar_orrery::consts::SIDEREAL_YEAR;
use solar_orrery::orrery::Scene;
use solar_orrery::texture::NullTextureProvider;

/// Traces every body's path seen from above the ecliptic, without opening a window.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Where to write the image
    #[arg(short, long, default_value = "plots/orbits.png")]
    output: PathBuf,

    /// How many days to simulate
    #[arg(short, long, default_value_t = SIDEREAL_YEAR)]
    days: f64,

    /// Days between samples
    #[arg(short, long, default_value_t = 0.5)]
    step: f64,
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let tracks = sample_tracks(args.days, args.step);
    draw_plot(&args.output, &tracks)
}

fn sample_tracks(days: f64, step_days: f64) -> BTreeMap<String, Vec<(f32, f32)>> {
    let config = SimConfig::default();
    let mut scene = Scene::initialize(&config, &mut NullTextureProvider::new());

    let step_millis = step_days / scene.days_per_second() * 1000.0;
    let n_steps = (days / step_days).ceil() as usize;

    let mut tracks: BTreeMap<String, Vec<(f32, f32)>> = BTreeMap::new();
    for _ in 0..=n_steps {
        for frame in scene.body_frames() {
            tracks
                .entry(frame.name)
                .or_default()
                .push((frame.center.x, frame.center.z));
        }
        scene.tick(step_millis);
    }
    tracks
}

fn draw_plot(
    name: &Path,
    tracks: &BTreeMap<String, Vec<(f32, f32)>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let extent = tracks
        .values()
        .flatten()
        .map(|(x, z)| x.abs().max(z.abs()))
        .fold(0.0f32, f32::max)
        * 1.1;

    let root = BitMapBackend::new(name, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Orbits from above", ("sans-serif", 24))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart.configure_mesh().draw()?;

    for (i, (body, track)) in tracks.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(track.iter().copied(), &color))?
            .label(body.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
