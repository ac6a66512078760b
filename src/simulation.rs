//! Simulation plugin and systems for Bevy ECS
//!
//! Owns the [`SolarSystem`] resource and steps it. Rendering and input live in
//! [`crate::rendering`] so this plugin also runs headless under `MinimalPlugins`.

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::constants::STATS_LOG_INTERVAL;
use crate::solar_system::{SolarSystem, TickReport};

pub struct SimulationPlugin {
    /// Fixed tick rate in Hz. `None` steps once per `Update` (headless runs, tests).
    pub tick_hz: Option<f64>,
    /// Ticks between stats log lines. 0 disables them.
    pub stats_log_interval: u64,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            tick_hz: None,
            stats_log_interval: STATS_LOG_INTERVAL,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .init_resource::<SimulationStats>()
            .insert_resource(StatsLogInterval(self.stats_log_interval))
            .add_systems(Startup, setup_solar_system);

        match self.tick_hz {
            Some(hz) => {
                app.insert_resource(Time::<Fixed>::from_hz(hz))
                    .add_systems(
                        FixedUpdate,
                        (step_simulation_system, log_stats_system).chain(),
                    )
                    .add_systems(Update, headless_exit_system);
            }
            None => {
                app.add_systems(
                    Update,
                    (
                        step_simulation_system,
                        log_stats_system,
                        headless_exit_system,
                    )
                        .chain(),
                );
            }
        }
    }
}

/// Running totals shown by the HUD and the periodic log line.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub tick: u64,
    pub live_bodies: usize,
    pub merged_total: usize,
    pub absorbed_total: usize,
    pub total_mass: f64,
}

impl SimulationStats {
    pub fn record(&mut self, report: &TickReport, total_mass: f64) {
        self.tick = report.tick;
        self.live_bodies = report.live_bodies;
        self.merged_total += report.collisions.merges.len();
        self.absorbed_total += report.collisions.absorbed_by_anchor.len();
        self.total_mass = total_mass;
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct StatsLogInterval(pub u64);

/// Present only in headless runs: exit once this many ticks have completed.
#[derive(Resource, Debug, Clone, Copy)]
pub struct HeadlessRun {
    pub max_ticks: u64,
}

/// Startup system: build the solar system from the [`SimConfig`] resource.
///
/// An invalid config is logged and replaced by the compiled defaults.
pub fn setup_solar_system(mut commands: Commands, config: Res<SimConfig>) {
    let system = match SolarSystem::new(config.clone()) {
        Ok(system) => system,
        Err(e) => {
            warn!("{e}; falling back to default simulation config");
            match SolarSystem::new(SimConfig::default()) {
                Ok(system) => system,
                Err(e) => {
                    error!("default simulation config rejected: {e}");
                    return;
                }
            }
        }
    };
    commands.insert_resource(SimulationStats {
        live_bodies: system.bodies().len(),
        total_mass: system.total_mass(),
        ..Default::default()
    });
    commands.insert_resource(system);
}

/// Advance the simulation one tick and fold the result into the stats.
pub fn step_simulation_system(
    system: Option<ResMut<SolarSystem>>,
    mut stats: ResMut<SimulationStats>,
) {
    let Some(mut system) = system else {
        return;
    };

    let report = system.tick();
    for merge in &report.collisions.merges {
        debug!(
            "body {} absorbed body {} (mass now {:.2})",
            merge.survivor.0,
            merge.absorbed.0,
            merge.mass
        );
    }
    let total_mass = system.total_mass();
    stats.record(&report, total_mass);
}

pub fn log_stats_system(stats: Res<SimulationStats>, interval: Res<StatsLogInterval>) {
    if interval.0 == 0 || stats.tick == 0 || stats.tick % interval.0 != 0 {
        return;
    }
    info!(
        "tick {}: {} bodies | merged {} | absorbed by sun {} | total mass {:.1}",
        stats.tick, stats.live_bodies, stats.merged_total, stats.absorbed_total, stats.total_mass
    );
}

/// Print a summary and exit once the headless tick budget is spent.
pub fn headless_exit_system(
    run: Option<Res<HeadlessRun>>,
    stats: Res<SimulationStats>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(run) = run else {
        return;
    };
    if stats.tick < run.max_ticks {
        return;
    }
    println!(
        "✓ Headless run finished after {} ticks: {} bodies, {} merges, {} absorbed by sun",
        stats.tick, stats.live_bodies, stats.merged_total, stats.absorbed_total
    );
    exit.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionReport, MergeEvent};
    use crate::body::BodyId;

    fn world_with_system(particle_count: usize) -> World {
        let mut world = World::new();
        world.insert_resource(SimConfig {
            particle_count,
            seed: Some(11),
            ..Default::default()
        });
        world.insert_resource(SimulationStats::default());
        world
    }

    #[test]
    fn setup_inserts_solar_system_and_initial_stats() {
        let mut world = world_with_system(8);

        let mut schedule = Schedule::default();
        schedule.add_systems(setup_solar_system);
        schedule.run(&mut world);

        let system = world.resource::<SolarSystem>();
        assert_eq!(system.bodies().len(), 9);
        assert_eq!(world.resource::<SimulationStats>().live_bodies, 9);
    }

    #[test]
    fn setup_falls_back_to_defaults_on_invalid_config() {
        let mut world = World::new();
        world.insert_resource(SimConfig {
            gravity_const: -1.0,
            ..Default::default()
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(setup_solar_system);
        schedule.run(&mut world);

        let system = world.resource::<SolarSystem>();
        assert_eq!(system.config().gravity_const, SimConfig::default().gravity_const);
    }

    #[test]
    fn step_system_ticks_and_records_stats() {
        let mut world = world_with_system(5);
        let system = SolarSystem::new(world.resource::<SimConfig>().clone()).unwrap();
        world.insert_resource(system);

        let mut schedule = Schedule::default();
        schedule.add_systems(step_simulation_system);
        schedule.run(&mut world);
        schedule.run(&mut world);

        assert_eq!(world.resource::<SolarSystem>().tick_count(), 2);
        assert_eq!(world.resource::<SimulationStats>().tick, 2);
    }

    #[test]
    fn step_system_without_solar_system_is_a_no_op() {
        let mut world = world_with_system(5);
        let mut schedule = Schedule::default();
        schedule.add_systems(step_simulation_system);
        schedule.run(&mut world);
        assert_eq!(world.resource::<SimulationStats>().tick, 0);
    }

    #[test]
    fn stats_accumulate_across_reports() {
        let mut stats = SimulationStats::default();
        let report = TickReport {
            tick: 1,
            collisions: CollisionReport {
                merges: vec![MergeEvent {
                    survivor: BodyId(1),
                    absorbed: BodyId(2),
                    mass: 3.0,
                }],
                absorbed_by_anchor: vec![BodyId(4)],
            },
            live_bodies: 7,
        };
        stats.record(&report, 100.0);
        stats.record(&TickReport { tick: 2, ..report.clone() }, 99.0);

        assert_eq!(stats.tick, 2);
        assert_eq!(stats.merged_total, 2);
        assert_eq!(stats.absorbed_total, 2);
        assert_eq!(stats.total_mass, 99.0);
    }
}
