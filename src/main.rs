use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::env;

use solar_accretion::config::{self, CONFIG_PATH};
use solar_accretion::graphics;
use solar_accretion::rendering::{to_color, RenderingPlugin};
use solar_accretion::simulation::{HeadlessRun, SimulationPlugin};
use solar_accretion::viewport::Viewport;

/// Read an unsigned integer environment variable, ignoring malformed values.
fn env_u64(name: &str) -> Option<u64> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            eprintln!("⚠ Ignoring {name}={value}: expected an unsigned integer");
            None
        }
    }
}

fn main() {
    let mut app_config = config::load_or_default(CONFIG_PATH);
    if let Some(seed) = env_u64("SOLAR_SIM_SEED") {
        app_config.simulation.seed = Some(seed);
    }
    let display = app_config.display.clone();

    let mut app = App::new();
    app.insert_resource(app_config.simulation)
        .insert_resource(app_config.display);

    // Headless mode: step the simulation without a window and exit after N ticks.
    if let Some(max_ticks) = env_u64("SOLAR_SIM_HEADLESS") {
        app.add_plugins((MinimalPlugins, LogPlugin::default()))
            .add_plugins(SimulationPlugin {
                tick_hz: None,
                stats_log_interval: display.stats_log_interval,
            })
            .insert_resource(HeadlessRun { max_ticks });

        println!("Running headless for {max_ticks} ticks");
    } else {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Simplified Solar System Formation Simulation".into(),
                resolution: WindowResolution::new(display.window_width, display.window_height),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(to_color(display.background_color)))
        .insert_resource(Viewport::new(display.zoom_step))
        // The fixed timestep doubles as the frame-rate ceiling for the simulation.
        .add_plugins(SimulationPlugin {
            tick_hz: Some(display.frame_rate),
            stats_log_interval: display.stats_log_interval,
        })
        .add_plugins(RenderingPlugin)
        .add_systems(Startup, graphics::setup_camera);
    }

    app.run();
}
