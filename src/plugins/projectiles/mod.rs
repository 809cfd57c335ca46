//! Projectiles plugin: message-based producer → consumer spawning, state-guarded impacts.
//!
//! # Data flow
//! ```text
//!   Update
//!┌──────────────────────────────────────────────────────────────────┐
//!│ (A) Producer: caster::drive_caster                               │
//!│     - writes: FireProjectile { origin, velocity }                │
//!│                                                                  │
//!│ (B) Consumer: spawn_requested_projectiles                        │
//!│     - spawns: Projectile + Lifetime + body + dormant sparks child│
//!└──────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedUpdate / FixedPostUpdate
//!┌──────────────────────────────────────────────────────────────────┐
//!│ (C) expire_projectiles: lifetime out -> Resolved -> despawn      │
//!│                                                                  │
//!│ (D) Avian emits CollisionStart                                   │
//!│                                                                  │
//!│ (E) process_projectile_hits                                      │
//!│     - Alive -> Resolved (once, guarded by state)                 │
//!│     - releases sparks into the scene                             │
//!│     - writes: EnemyHit (enemy targets only)                      │
//!│     - despawns the projectile                                    │
//!│                                                                  │
//!│ (F) enemies::apply_enemy_hits consumes EnemyHit                  │
//!└──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Invariant
//! A projectile applies damage at most once. `Projectile::resolve` is the only
//! way out of `Alive` and reports the transition exactly once; everything with a
//! side effect sits behind it.

pub mod collision;
pub mod components;
pub mod messages;
pub mod spawn;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub use components::{ImpactSparks, Lifetime, Projectile, ProjectileState};
pub use messages::{EnemyHit, FireProjectile};

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FireProjectile>().add_message::<EnemyHit>();

        app.add_systems(
            Update,
            spawn::spawn_requested_projectiles
                .after(crate::plugins::caster::drive_caster)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            spawn::expire_projectiles.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            collision::process_projectile_hits
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
