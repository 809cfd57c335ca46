//! World plugin: arena walls, floor, and the ground aim surface.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

const TILE: i32 = 64;
pub const HALF_W: i32 = TILE * 16;
pub const HALF_H: i32 = TILE * 9;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_arena, spawn_floor, spawn_ground),
    );
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let thickness = 30.0;

    let wall_layers = CollisionLayers::new(
        Layer::World,
        [Layer::Caster, Layer::Enemy, Layer::Projectile],
    );

    let mut spawn_wall = |name: &str, pos: Vec3, size: Vec2| {
        commands.spawn((
            Name::new(name.to_owned()),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let (w, h) = (HALF_W as f32, HALF_H as f32);

    spawn_wall(
        "WallTop",
        Vec3::new(0.0, h + thickness * 0.5, 0.0),
        Vec2::new(w * 2.0 + thickness * 2.0, thickness),
    );
    spawn_wall(
        "WallBottom",
        Vec3::new(0.0, -h - thickness * 0.5, 0.0),
        Vec2::new(w * 2.0 + thickness * 2.0, thickness),
    );
    spawn_wall(
        "WallLeft",
        Vec3::new(-w - thickness * 0.5, 0.0, 0.0),
        Vec2::new(thickness, h * 2.0),
    );
    spawn_wall(
        "WallRight",
        Vec3::new(w + thickness * 0.5, 0.0, 0.0),
        Vec2::new(thickness, h * 2.0),
    );
}

/// Checkerboard of plain sprites, no assets needed.
fn spawn_floor(mut commands: Commands) {
    (-(HALF_H / TILE)..=HALF_H / TILE)
        .flat_map(|y| (-(HALF_W / TILE)..=HALF_W / TILE).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let world_pos = Vec3::new(x as f32 * TILE as f32, y as f32 * TILE as f32, 0.0);
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(world_pos),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

/// Sensor covering the floor. Collides with nothing; the caster's aim query
/// accepts a cursor point only if it lands inside this.
fn spawn_ground(mut commands: Commands) {
    commands.spawn((
        Name::new("Ground"),
        Transform::default(),
        RigidBody::Static,
        Collider::rectangle(HALF_W as f32 * 2.0, HALF_H as f32 * 2.0),
        Sensor,
        CollisionLayers::new(Layer::Ground, LayerMask::NONE),
        DespawnOnExit(GameState::InGame),
    ));
}
