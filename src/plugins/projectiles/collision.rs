//! Projectile impact resolution.
//!
//! A projectile resolves on its first `CollisionStart`. Avian can report several
//! contacts for the same body in one step (and a despawn is deferred, so a
//! later step may still see it), which is why the guard is the projectile's own
//! state rather than event de-duplication.
//!
//! The impact point is the first contact point avian reports for the pair,
//! falling back to the projectile's centre when the pair has no manifold yet.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::plugins::effects::{release_effect, EffectKind};
use crate::plugins::enemies::Enemy;

use super::components::{ImpactSparks, Projectile};
use super::messages::EnemyHit;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    /// Compound bodies report the child collider; gameplay state lives on the body.
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

/// First contact point of the first manifold, in world space.
#[inline]
pub fn first_contact_point(manifolds: &[ContactManifold]) -> Option<Vec2> {
    manifolds
        .first()
        .and_then(|m| m.points.first())
        .map(|p| p.point)
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

pub fn process_projectile_hits(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut hits: MessageWriter<EnemyHit>,
    collisions: Collisions,
    mut q_projectiles: Query<(&mut Projectile, &Transform, Option<&Children>)>,
    q_sparks: Query<(), With<ImpactSparks>>,
    q_enemies: Query<(), With<Enemy>>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let (projectile_side, other_side) = if q_projectiles.contains(t1.gameplay_owner()) {
            (t1, t2)
        } else if q_projectiles.contains(t2.gameplay_owner()) {
            (t2, t1)
        } else {
            continue;
        };

        let projectile_e = projectile_side.gameplay_owner();
        let Ok((mut projectile, tf, children)) = q_projectiles.get_mut(projectile_e) else {
            continue;
        };

        if !projectile.resolve() {
            continue;
        }

        let point = collisions
            .get(ev.collider1, ev.collider2)
            .and_then(|pair| first_contact_point(&pair.manifolds))
            .map_or(tf.translation, |p| p.extend(tf.translation.z));

        if let Some(children) = children {
            for child in children.iter().filter(|c| q_sparks.contains(*c)) {
                release_effect(&mut commands, child, EffectKind::Sparks, point, Vec3::ONE);
            }
        }

        let struck = other_side.gameplay_owner();
        if q_enemies.contains(struck) {
            hits.write(EnemyHit {
                enemy: struck,
                point: point.truncate(),
            });
        }

        commands.entity(projectile_e).despawn();
    }
}
