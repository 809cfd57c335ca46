//! Core plugin: shared resources and global settings.
//!
//! `Tunables` loaded by the binary are inserted before plugins build; anything
//! else (tests, headless runs) gets the compiled-in defaults.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
