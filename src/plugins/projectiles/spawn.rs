//! Spawn consumer + lifetime expiry.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::effects::{dormant_effect, EffectKind};

use super::components::{ImpactSparks, Lifetime, Projectile};
use super::messages::FireProjectile;

#[inline]
pub fn projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [Layer::World, Layer::Enemy])
}

pub fn spawn_requested_projectiles(
    mut commands: Commands,
    mut requests: MessageReader<FireProjectile>,
    tunables: Res<Tunables>,
) {
    let cfg = &tunables.projectile;

    for req in requests.read() {
        commands
            .spawn((
                Name::new("Projectile"),
                Projectile::default(),
                Lifetime(Timer::from_seconds(cfg.lifetime, TimerMode::Once)),
                Sprite {
                    color: Color::srgb(0.55, 0.8, 1.0),
                    custom_size: Some(Vec2::splat(cfg.radius * 2.0)),
                    ..default()
                },
                Transform::from_translation(req.origin.extend(2.0)),
                RigidBody::Dynamic,
                Collider::circle(cfg.radius),
                projectile_layers(),
                LinearVelocity(req.velocity),
                // Avian only emits CollisionStart/End if one collider opts in.
                CollisionEventsEnabled,
                DespawnOnExit(GameState::InGame),
            ))
            .with_children(|p| {
                p.spawn((ImpactSparks, dormant_effect(EffectKind::Sparks)));
            });
    }
}

/// Resolve and remove projectiles that outlived their budget without hitting anything.
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifetime, &mut Projectile)>,
) {
    for (e, mut lifetime, mut projectile) in &mut q {
        lifetime.tick(time.delta());
        if lifetime.is_finished() && projectile.resolve() {
            commands.entity(e).despawn();
        }
    }
}
