//! Spawner plugin: periodic monster waves.
//!
//! A `MonsterSpawner` owns a set of `SpawnPoint` children. Every `period`
//! seconds it drops one random archetype from the `Bestiary` on each point.
//! When the caster falls, every spawner is switched off for the rest of the
//! session.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::common::{
    state::GameState,
    timer::Cooldown,
    tunables::{EnemyArchetype, Tunables},
};
use crate::plugins::caster::CasterDefeated;
use crate::plugins::enemies::spawn_enemy;

#[derive(Component, Debug, Clone)]
pub struct MonsterSpawner {
    period: f32,
    timer: Cooldown,
    active: bool,
}

impl MonsterSpawner {
    /// First wave arrives after one full period.
    pub fn new(period: f32) -> Self {
        Self {
            period,
            timer: Cooldown::armed(period),
            active: true,
        }
    }

    /// Stop for good. There is no way to turn a spawner back on.
    pub fn turn_off(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `dt`. Returns `true` when a wave is due, re-arming the timer.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }

        self.timer.tick(dt);
        if self.timer.is_ready() {
            self.timer.reset(self.period);
            return true;
        }
        false
    }
}

#[derive(Component)]
pub struct SpawnPoint;

/// Archetypes a spawner picks from, uniformly.
#[derive(Resource, Debug, Clone, Default, Deref)]
pub struct Bestiary(pub Vec<EnemyArchetype>);

#[derive(Resource, Deref, DerefMut)]
pub struct SpawnRng(pub StdRng);

impl SpawnRng {
    /// Seeded for reproducible waves, otherwise from the thread RNG.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random_range(0..u64::MAX));
        Self(StdRng::seed_from_u64(seed))
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), setup_spawning)
        .add_systems(
            FixedUpdate,
            (disable_spawners_on_defeat, spawn_monsters)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

fn setup_spawning(mut commands: Commands, tunables: Res<Tunables>) {
    let cfg = &tunables.spawner;

    commands.insert_resource(Bestiary(tunables.bestiary.clone()));
    commands.insert_resource(SpawnRng::new(cfg.seed));

    commands
        .spawn((
            Name::new("MonsterSpawner"),
            MonsterSpawner::new(cfg.period),
            Transform::default(),
            Visibility::default(),
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|s| {
            for (i, &(x, y)) in cfg.points.iter().enumerate() {
                s.spawn((
                    Name::new(format!("SpawnPoint{i}")),
                    SpawnPoint,
                    Transform::from_xyz(x, y, 0.0),
                ));
            }
        });
}

pub fn spawn_monsters(
    mut commands: Commands,
    time: Res<Time>,
    bestiary: Option<Res<Bestiary>>,
    mut rng: ResMut<SpawnRng>,
    mut q_spawners: Query<(&mut MonsterSpawner, &Transform, Option<&Children>)>,
    q_points: Query<&Transform, (With<SpawnPoint>, Without<MonsterSpawner>)>,
) {
    let dt = time.delta_secs();

    for (mut spawner, spawner_tf, children) in &mut q_spawners {
        if !spawner.tick(dt) {
            continue;
        }

        let Some(bestiary) = bestiary.as_deref().filter(|b| !b.is_empty()) else {
            warn!("spawner fired with an empty bestiary");
            continue;
        };

        let mut spawned = 0;
        for point in children.into_iter().flatten() {
            let Ok(point_tf) = q_points.get(*point) else {
                continue;
            };

            let archetype = &bestiary[rng.random_range(0..bestiary.len())];
            let yaw = rng.random_range(0.0..360.0_f32).to_radians();
            let at = spawner_tf.transform_point(point_tf.translation).truncate();

            spawn_enemy(&mut commands, archetype, at, yaw);
            spawned += 1;
        }
        debug!("spawned a wave of {spawned}");
    }
}

pub fn disable_spawners_on_defeat(
    mut defeated: MessageReader<CasterDefeated>,
    mut q_spawners: Query<&mut MonsterSpawner>,
) {
    if defeated.read().count() == 0 {
        return;
    }

    for mut spawner in &mut q_spawners {
        spawner.turn_off();
    }
    info!("spawners off");
}
