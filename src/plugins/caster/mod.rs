//! Caster plugin: the player-controlled mage.
//!
//! Pipeline:
//! - Update: sample keys/mouse into `CasterInput`, pick the aim point on the
//!   ground, then `drive_caster` (move, face, shoot, tick immunity)
//! - FixedPostUpdate: `take_contact_damage` reads sustained enemy contacts
//!
//! The caster never touches health directly. Contact damage goes through
//! `GameSession::apply_damage`, whose return value is the only signal that the
//! caster has died.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::window::PrimaryWindow;

use crate::common::{layers::Layer, state::GameState, timer::Cooldown, tunables::Tunables};
use crate::plugins::camera::MainCamera;
use crate::plugins::effects::{dormant_effect, release_effect, EffectKind};
use crate::plugins::enemies::Enemy;
use crate::plugins::hud::GameSession;
use crate::plugins::projectiles::FireProjectile;

const WALK_COLOR: Color = Color::srgb(0.35, 0.85, 1.0);
const IDLE_COLOR: Color = Color::srgb(0.2, 0.65, 0.9);

#[derive(Component)]
pub struct Caster;

/// Unit direction the caster looks and shoots along.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec2::Y)
    }
}

#[derive(Component, Debug, Clone, Default, Deref, DerefMut)]
pub struct FireControl(pub Cooldown);

/// Damage immunity after a contact hit. Ready means vulnerable.
#[derive(Component, Debug, Clone, Default, Deref, DerefMut)]
pub struct Immunity(pub Cooldown);

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CasterAnimation {
    pub walking: bool,
}

/// Where projectiles leave from. Child of the caster, offset along local +x.
#[derive(Component)]
pub struct Muzzle;

/// Dormant effect the caster leaves behind when it dies.
#[derive(Component)]
pub struct DeathBurst;

/// Emitted once, when contact damage kills the caster.
#[derive(Message, Clone, Copy, Debug)]
pub struct CasterDefeated {
    pub position: Vec2,
}

#[derive(Resource, Default, Debug, Clone)]
pub struct CasterInput {
    pub move_axis: Vec2,
    pub fire: bool,
    /// Cursor on the ground, `None` when it points anywhere else.
    pub aim_point: Option<Vec2>,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<CasterInput>()
        .add_message::<CasterDefeated>()
        .add_systems(OnEnter(GameState::InGame), spawn_caster)
        .add_systems(
            Update,
            (gather_input, gather_aim, drive_caster, animate_caster)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            take_contact_damage
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

#[inline]
pub fn caster_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Caster, [Layer::World, Layer::Enemy])
}

fn spawn_caster(mut commands: Commands, tunables: Res<Tunables>) {
    let cfg = &tunables.caster;

    commands
        .spawn((
            Name::new("Caster"),
            Caster,
            Facing::default(),
            FireControl(Cooldown::ready()),
            Immunity(Cooldown::ready()),
            CasterAnimation::default(),
            Sprite {
                color: IDLE_COLOR,
                custom_size: Some(Vec2::splat(cfg.radius * 2.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0)
                .with_rotation(Quat::from_rotation_z(facing_angle(Vec2::Y))),
            RigidBody::Dynamic,
            Collider::circle(cfg.radius),
            LockedAxes::ROTATION_LOCKED,
            caster_layers(),
            LinearVelocity::ZERO,
            CollidingEntities::default(),
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|c| {
            c.spawn((
                Name::new("Muzzle"),
                Muzzle,
                Transform::from_xyz(cfg.muzzle_offset, 0.0, 0.0),
            ));
            c.spawn((DeathBurst, dormant_effect(EffectKind::CasterDeath)));
        });
}

/// WASD or arrows, normalized so diagonals are not faster.
pub fn move_axis_from_keys(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let held = |a: KeyCode, b: KeyCode| keys.pressed(a) || keys.pressed(b);

    let mut axis = Vec2::ZERO;
    if held(KeyCode::KeyW, KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if held(KeyCode::KeyS, KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if held(KeyCode::KeyA, KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if held(KeyCode::KeyD, KeyCode::ArrowRight) {
        axis.x += 1.0;
    }

    axis.normalize_or_zero()
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut input: ResMut<CasterInput>,
) {
    input.move_axis = keys.as_deref().map_or(Vec2::ZERO, move_axis_from_keys);
    input.fire = buttons.is_some_and(|b| b.pressed(MouseButton::Left))
        || keys.is_some_and(|k| k.pressed(KeyCode::Space));
}

/// Project the cursor onto the world plane; keep it only if it lands on ground.
fn gather_aim(
    window: Option<Single<&Window, With<PrimaryWindow>>>,
    camera: Option<Single<(&Camera, &GlobalTransform), With<MainCamera>>>,
    spatial: SpatialQuery,
    mut input: ResMut<CasterInput>,
) {
    let (Some(window), Some(camera)) = (window, camera) else {
        input.aim_point = None;
        return;
    };
    let (camera, camera_tf) = camera.into_inner();

    input.aim_point = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_tf, cursor).ok())
        .filter(|p| on_ground(&spatial, *p));
}

/// Whether `point` lies inside a `Ground`-layer collider. Other layers never count.
pub fn on_ground(spatial: &SpatialQuery, point: Vec2) -> bool {
    let ground = SpatialQueryFilter::from_mask(Layer::Ground);
    !spatial.point_intersections(point, &ground).is_empty()
}

#[inline]
fn facing_angle(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

#[allow(clippy::type_complexity)]
pub fn drive_caster(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<CasterInput>,
    mut fire: MessageWriter<FireProjectile>,
    caster: Option<
        Single<
            (
                &mut Transform,
                &mut LinearVelocity,
                &mut Facing,
                &mut FireControl,
                &mut Immunity,
                &mut CasterAnimation,
                Option<&Children>,
            ),
            With<Caster>,
        >,
    >,
    q_muzzle: Query<&Transform, (With<Muzzle>, Without<Caster>)>,
) {
    let Some(caster) = caster else {
        return;
    };
    let (mut tf, mut vel, mut facing, mut fire_control, mut immunity, mut anim, children) =
        caster.into_inner();
    let cfg = &tunables.caster;
    let dt = time.delta_secs();

    let axis = input.move_axis.normalize_or_zero();

    if let Some(aim) = input.aim_point {
        let to_aim = aim - tf.translation.truncate();
        if to_aim.length_squared() > f32::EPSILON {
            facing.0 = to_aim.normalize();
        }
    }

    vel.0 = axis * cfg.speed;
    anim.walking = axis != Vec2::ZERO;

    tf.rotation = Quat::from_rotation_z(facing_angle(facing.0));

    fire_control.tick(dt);
    if fire_control.is_ready() && input.fire {
        let muzzle_local = children
            .into_iter()
            .flatten()
            .find_map(|c| q_muzzle.get(*c).ok())
            .map_or(Vec3::ZERO, |m| m.translation);

        fire.write(FireProjectile {
            origin: tf.transform_point(muzzle_local).truncate(),
            velocity: facing.0 * cfg.bullet_speed,
        });
        fire_control.reset(cfg.fire_period);
    }

    immunity.tick(dt);
}

fn animate_caster(mut q: Query<(&CasterAnimation, &mut Sprite), (With<Caster>, Changed<CasterAnimation>)>) {
    for (anim, mut sprite) in &mut q {
        sprite.color = if anim.walking { WALK_COLOR } else { IDLE_COLOR };
    }
}

/// Sustained enemy contact hurts, at most once per immunity window.
#[allow(clippy::type_complexity)]
pub fn take_contact_damage(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut session: ResMut<GameSession>,
    mut defeated: MessageWriter<CasterDefeated>,
    caster: Option<
        Single<(Entity, &Transform, &CollidingEntities, &mut Immunity, Option<&Children>), With<Caster>>,
    >,
    q_enemies: Query<&Enemy>,
    q_burst: Query<(), With<DeathBurst>>,
) {
    let Some(caster) = caster else {
        return;
    };
    let (caster_e, tf, contacts, mut immunity, children) = caster.into_inner();

    for other in contacts.iter() {
        let Ok(enemy) = q_enemies.get(*other) else {
            continue;
        };
        if !immunity.is_ready() || enemy.is_dead() {
            continue;
        }

        if session.apply_damage(enemy.strength()) {
            for burst in children.into_iter().flatten().filter(|c| q_burst.contains(**c)) {
                release_effect(&mut commands, *burst, EffectKind::CasterDeath, tf.translation, Vec3::ONE);
            }
            defeated.write(CasterDefeated {
                position: tf.translation.truncate(),
            });
            info!("caster defeated at {}", tf.translation.truncate());
            commands.entity(caster_e).despawn();
            return;
        }

        immunity.reset(tunables.caster.immune_time);
    }
}

#[cfg(test)]
mod tests;
