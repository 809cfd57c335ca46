//! Lighting plugin (Firefly) (render-only).
//!
//! One warm point light rides on the caster. Enemies carry `Occluder2d`, so
//! the horde casts shadows into the arena.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::caster::Caster;

#[derive(Component)]
pub struct CasterLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, follow_caster_light.run_if(in_state(GameState::InGame)));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("CasterLight"),
        CasterLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

/// The light stays where the caster fell once it is gone.
fn follow_caster_light(
    caster: Option<Single<&Transform, (With<Caster>, Without<CasterLight>)>>,
    light: Option<Single<&mut Transform, (With<CasterLight>, Without<Caster>)>>,
) {
    let (Some(caster), Some(mut light)) = (caster, light) else {
        return;
    };

    light.translation.x = caster.translation.x;
    light.translation.y = caster.translation.y;
}
