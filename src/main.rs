use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use tracing::info;

use solar_orrery::config::SimConfig;
use solar_orrery::gui::Simulation;

fn main() {
    tracing_subscriber::fmt::init();
    let config = SimConfig::parse();
    info!(?config, "starting");

    let mut window = Window::new("Solar System");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(config.framerate));

    let simulation = Simulation::new(&config, &mut window);
    window.render_loop(simulation);
}
