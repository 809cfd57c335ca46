//! Enemies plugin: monsters that chase the caster and die to projectiles.
//!
//! ```text
//! FixedUpdate:     chase_caster -> navigation::steer_agents
//! FixedPostUpdate: projectiles::process_projectile_hits -> apply_enemy_hits
//! ```
//!
//! An enemy's gameplay truth is the `Enemy` component. Damage arrives only as
//! `EnemyHit` messages and every hit goes through `Enemy::damage`, which reports
//! the killing blow exactly once. Score and the death effect hang off that
//! single `Killed` outcome.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::{layers::Layer, state::GameState, tunables::EnemyArchetype};
use crate::plugins::caster::Caster;
use crate::plugins::effects::{spawn_effect, EffectKind};
use crate::plugins::hud::GameSession;
use crate::plugins::navigation::{steer_agents, NavAgent};
use crate::plugins::projectiles::{collision::process_projectile_hits, EnemyHit};

/// Death effect size relative to the enemy.
const DEATH_EFFECT_SCALE: f32 = 1.5;

/// What a single hit did to an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already dead.
    Ignored,
    Hurt,
    /// This hit was the killing blow.
    Killed,
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    health: i32,
    strength: i32,
    score: u32,
    dead: bool,
}

impl Enemy {
    pub fn new(health: i32, strength: i32, score: u32) -> Self {
        Self {
            health,
            strength,
            score,
            dead: false,
        }
    }

    pub fn from_archetype(archetype: &EnemyArchetype) -> Self {
        Self::new(archetype.health, archetype.strength, archetype.score)
    }

    /// Contact damage dealt to the caster.
    #[inline]
    pub fn strength(&self) -> i32 {
        self.strength
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Take one point of damage.
    pub fn damage(&mut self) -> HitOutcome {
        if self.dead {
            return HitOutcome::Ignored;
        }

        self.health -= 1;
        if self.health <= 0 {
            self.dead = true;
            HitOutcome::Killed
        } else {
            HitOutcome::Hurt
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        chase_caster
            .before(steer_agents)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedPostUpdate,
        apply_enemy_hits
            .after(process_projectile_hits)
            .run_if(in_state(GameState::InGame)),
    );
}

#[inline]
pub fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Caster, Layer::Projectile, Layer::Enemy],
    )
}

/// Instantiate one enemy from its archetype.
///
/// `yaw` is in radians around the view axis. Rotation is locked on the body so
/// the spawn yaw sticks.
pub fn spawn_enemy(commands: &mut Commands, archetype: &EnemyArchetype, position: Vec2, yaw: f32) -> Entity {
    let r = EnemyArchetype::BASE_RADIUS;

    commands
        .spawn((
            Name::new(archetype.name.clone()),
            Enemy::from_archetype(archetype),
            NavAgent::new(archetype.speed),
            Sprite {
                color: archetype.color(),
                custom_size: Some(Vec2::splat(r * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(1.0))
                .with_rotation(Quat::from_rotation_z(yaw))
                .with_scale(Vec3::splat(archetype.scale)),
            RigidBody::Dynamic,
            Collider::circle(r),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::ZERO,
            enemy_layers(),
            Occluder2d::circle(r),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Point every agent at the caster, or park them if there is none.
pub fn chase_caster(
    caster: Option<Single<&Transform, With<Caster>>>,
    mut q_agents: Query<&mut NavAgent, With<Enemy>>,
) {
    match caster {
        Some(tf) => {
            let goal = tf.translation.truncate();
            for mut agent in &mut q_agents {
                if agent.enabled {
                    agent.destination = Some(goal);
                }
            }
        }
        None => {
            for mut agent in &mut q_agents {
                if agent.enabled {
                    agent.disable();
                }
            }
        }
    }
}

pub fn apply_enemy_hits(
    mut commands: Commands,
    mut hits: MessageReader<EnemyHit>,
    mut session: ResMut<GameSession>,
    mut q_enemies: Query<(&mut Enemy, &Transform)>,
) {
    for hit in hits.read() {
        let Ok((mut enemy, tf)) = q_enemies.get_mut(hit.enemy) else {
            continue;
        };

        let outcome = enemy.damage();
        if outcome == HitOutcome::Ignored {
            continue;
        }

        spawn_effect(
            &mut commands,
            EffectKind::Damage,
            hit.point.extend(tf.translation.z + 1.0),
            tf.scale,
        );

        if outcome == HitOutcome::Killed {
            spawn_effect(
                &mut commands,
                EffectKind::Death,
                tf.translation,
                tf.scale * DEATH_EFFECT_SCALE,
            );
            session.add_score(enemy.score());
            debug!("enemy {} killed, +{}", hit.enemy, enemy.score());
            commands.entity(hit.enemy).despawn();
        }
    }
}
