//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    /// Walkable floor. Only used as an aim target, never collides.
    Ground,
    Caster,
    Enemy,
    Projectile,
}
