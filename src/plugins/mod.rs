//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod caster;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod hud;
pub mod navigation;
pub mod physics;
pub mod projectiles;
pub mod spawner;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    effects::plugin(app);
    navigation::plugin(app);
    hud::plugin(app);
    caster::plugin(app);
    enemies::plugin(app);
    spawner::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}
