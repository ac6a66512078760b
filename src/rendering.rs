//! Presentation adapter: keyboard commands, body meshes, trails, and the HUD.
//!
//! ## Design
//!
//! Every body is drawn by one entity carrying a [`BodySprite`], a shared unit
//! circle [`Mesh2d`], and its own [`ColorMaterial`]. Each frame
//! `sync_body_sprites_system` positions and scales the entities through the
//! [`Viewport`], recolours sprites whose body changed mass bucket, despawns
//! sprites whose body was merged away, and spawns sprites for bodies that do
//! not have one yet.
//!
//! Trails and the sun's outline ring are immediate-mode gizmos.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::body::{Body, BodyId, Rgb};
use crate::config::DisplayConfig;
use crate::simulation::SimulationStats;
use crate::solar_system::SolarSystem;
use crate::viewport::Viewport;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisplayConfig>()
            .init_resource::<Viewport>()
            .add_systems(Startup, (init_body_mesh, setup_stats_text))
            .add_systems(
                Update,
                (
                    view_input_system,
                    exit_on_stop_system,
                    sync_body_sprites_system,
                    draw_trails_system,
                    stats_display_system,
                )
                    .chain(),
            );
    }
}

// ── Resources / components ────────────────────────────────────────────────────

/// Shared unit-circle mesh used by every body entity (created once at startup).
#[derive(Resource)]
pub struct BodyMesh(pub Handle<Mesh>);

/// Links a rendered entity to the body it draws.
#[derive(Component, Debug)]
pub struct BodySprite {
    pub id: BodyId,
    /// Colour currently written to `material`.
    pub color: Rgb,
    pub material: Handle<ColorMaterial>,
}

/// Marker for the stats overlay node.
#[derive(Component)]
pub struct StatsTextDisplay;

pub fn to_color(rgb: Rgb) -> Color {
    Color::srgb_u8(rgb.0, rgb.1, rgb.2)
}

// ── Startup systems ───────────────────────────────────────────────────────────

fn init_body_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(Circle::new(1.0));
    commands.insert_resource(BodyMesh(handle));
}

pub fn setup_stats_text(mut commands: Commands, display: Res<DisplayConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            StatsTextDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Tick: 0"),
                TextFont {
                    font_size: display.stats_font_size,
                    ..default()
                },
                TextColor(to_color(display.hud_text_color)),
            ));
        });
}

// ── Update: input ─────────────────────────────────────────────────────────────

/// ↑ zooms in, ↓ zooms out, Esc requests a stop.
pub fn view_input_system(keys: Res<ButtonInput<KeyCode>>, mut viewport: ResMut<Viewport>) {
    if keys.just_pressed(KeyCode::ArrowUp) {
        viewport.zoom_in();
        debug!("zoom in: scale {:.3}", viewport.scale);
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        viewport.zoom_out();
        debug!("zoom out: scale {:.3}", viewport.scale);
    }
    if keys.just_pressed(KeyCode::Escape) {
        viewport.request_stop();
    }
}

/// Translate a stop request into a single [`AppExit`].
pub fn exit_on_stop_system(
    viewport: Res<Viewport>,
    mut exit: MessageWriter<AppExit>,
    mut sent: Local<bool>,
) {
    if viewport.is_running() || *sent {
        return;
    }
    info!("stop requested; exiting");
    exit.write(AppExit::Success);
    *sent = true;
}

// ── Update: bodies ────────────────────────────────────────────────────────────

fn body_transform(body: &Body, viewport: &Viewport) -> Transform {
    let z = if body.is_anchor { 1.0 } else { 0.5 };
    Transform::from_translation(viewport.to_screen(body.position).extend(z))
        .with_scale(Vec3::splat(viewport.screen_radius(body.radius)))
}

/// Keep one sprite entity per live body, positioned through the viewport.
pub fn sync_body_sprites_system(
    mut commands: Commands,
    system: Option<Res<SolarSystem>>,
    body_mesh: Option<Res<BodyMesh>>,
    viewport: Res<Viewport>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut sprites: Query<(Entity, &mut BodySprite, &mut Transform)>,
) {
    let (Some(system), Some(body_mesh)) = (system, body_mesh) else {
        return;
    };

    let live: HashMap<BodyId, &Body> = system.bodies().iter().map(|b| (b.id, b)).collect();
    let mut drawn: HashSet<BodyId> = HashSet::with_capacity(live.len());

    for (entity, mut sprite, mut transform) in sprites.iter_mut() {
        let Some(body) = live.get(&sprite.id) else {
            commands.entity(entity).despawn();
            continue;
        };
        drawn.insert(sprite.id);
        *transform = body_transform(body, &viewport);

        if sprite.color != body.color {
            sprite.color = body.color;
            if let Some(mat) = materials.get_mut(&sprite.material) {
                mat.color = to_color(body.color);
            }
        }
    }

    for body in system.bodies().iter().filter(|b| !drawn.contains(&b.id)) {
        let material = materials.add(ColorMaterial::from_color(to_color(body.color)));
        commands.spawn((
            BodySprite {
                id: body.id,
                color: body.color,
                material: material.clone(),
            },
            Mesh2d(body_mesh.0.clone()),
            MeshMaterial2d(material),
            body_transform(body, &viewport),
        ));
    }
}

/// Draw each body's trail as a line strip, plus the sun's outline ring.
pub fn draw_trails_system(
    mut gizmos: Gizmos,
    system: Option<Res<SolarSystem>>,
    viewport: Res<Viewport>,
    display: Res<DisplayConfig>,
) {
    let Some(system) = system else {
        return;
    };

    for body in system.bodies() {
        if body.trail.len() > 1 {
            gizmos.linestrip_2d(
                body.trail.iter().map(|p| viewport.to_screen(p)),
                to_color(body.color),
            );
        }
        if body.is_anchor {
            gizmos.circle_2d(
                viewport.to_screen(body.position),
                viewport.screen_radius(body.radius) + display.sun_outline_offset,
                to_color(display.sun_outline_color),
            );
        }
    }
}

// ── Update: stats text ────────────────────────────────────────────────────────

pub fn stats_display_system(
    stats: Res<SimulationStats>,
    viewport: Res<Viewport>,
    parent_query: Query<&Children, With<StatsTextDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!(
                    "Tick: {} | Bodies: {} | Merged: {} | Absorbed: {} | Zoom: {:.2}x",
                    stats.tick,
                    stats.live_bodies,
                    stats.merged_total,
                    stats.absorbed_total,
                    viewport.scale
                ));
            }
        }
    }
}
