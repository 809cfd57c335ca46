//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `arena_caster::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use arena_caster::common::tunables::Tunables;
use bevy::asset::AssetPlugin;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

/// Simulated frame length. Each `app.update()` advances time by exactly this.
pub const FRAME: f32 = 1.0 / 60.0;

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists; InputPlugin for ButtonInput.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        InputPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(FRAME)));
    app.insert_resource(tunables);

    arena_caster::game::configure_headless(&mut app);
    // `App::run` would do this; tests drive `app.update()` directly, so finish
    // plugin setup here (avian registers its diagnostics resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}
