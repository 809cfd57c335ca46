//! Buffered projectile traffic.
//!
//! Producers write intent; a single consumer applies it:
//! - the caster writes `FireProjectile`, the spawn consumer creates the body
//! - collision resolution writes `EnemyHit`, the enemies plugin applies damage

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug)]
pub struct FireProjectile {
    /// World position of the muzzle.
    pub origin: Vec2,
    pub velocity: Vec2,
}

/// One projectile struck one enemy. Each projectile writes at most one of these.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct EnemyHit {
    pub enemy: Entity,
    /// Impact point in world space.
    pub point: Vec2,
}
