use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once, set_delta};
use crate::plugins::effects::{DormantEffect, VisualEffect};

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

/// World with a freshly spawned caster and everything its systems read.
fn caster_world() -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(GameSession::new(100));
    world.insert_resource(CasterInput::default());
    ensure_messages::<FireProjectile>(&mut world);
    ensure_messages::<CasterDefeated>(&mut world);
    set_delta(&mut world, 0.0);

    run_system_once(&mut world, spawn_caster);
    let caster = world
        .query_filtered::<Entity, With<Caster>>()
        .single(&world)
        .unwrap();
    (world, caster)
}

fn touch(world: &mut World, caster: Entity, other: Entity) {
    world.get_mut::<CollidingEntities>(caster).unwrap().0.insert(other);
}

fn tick(world: &mut World, dt: f32) {
    set_delta(world, dt);
    run_system_once(world, drive_caster);
    run_system_once(world, take_contact_damage);
}

// -----------------------------------------------------------------------------
// Input
// -----------------------------------------------------------------------------

#[test]
fn diagonal_input_is_normalized() {
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyW);
    keys.press(KeyCode::ArrowRight);

    let axis = move_axis_from_keys(&keys);
    assert!((axis.length() - 1.0).abs() < 1e-6);
    assert!(axis.x > 0.0 && axis.y > 0.0);

    keys.press(KeyCode::KeyS);
    keys.press(KeyCode::KeyA);
    assert_eq!(move_axis_from_keys(&keys), Vec2::ZERO);
}

#[test]
fn gather_input_reads_fire_buttons() {
    let mut world = World::new();
    world.insert_resource(CasterInput::default());
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Space);
    keys.press(KeyCode::KeyD);
    world.insert_resource(keys);

    run_system_once(&mut world, gather_input);

    let input = world.resource::<CasterInput>();
    assert!(input.fire);
    assert_eq!(input.move_axis, Vec2::X);
}

// -----------------------------------------------------------------------------
// Movement + facing
// -----------------------------------------------------------------------------

#[test]
fn caster_moves_and_turns_toward_aim() {
    let (mut world, caster) = caster_world();
    *world.resource_mut::<CasterInput>() = CasterInput {
        move_axis: Vec2::new(3.0, 0.0),
        fire: false,
        aim_point: Some(Vec2::new(-50.0, 0.0)),
    };

    run_system_once(&mut world, drive_caster);

    let speed = Tunables::default().caster.speed;
    assert_eq!(world.get::<LinearVelocity>(caster).unwrap().0, Vec2::new(speed, 0.0));
    assert!(world.get::<CasterAnimation>(caster).unwrap().walking);
    assert_eq!(world.get::<Facing>(caster).unwrap().0, Vec2::NEG_X);

    let forward = world.get::<Transform>(caster).unwrap().rotation * Vec3::X;
    assert!((forward - Vec3::NEG_X).length() < 1e-5);
}

#[test]
fn aim_miss_keeps_previous_facing() {
    let (mut world, caster) = caster_world();
    world.resource_mut::<CasterInput>().aim_point = Some(Vec2::new(10.0, 0.0));
    run_system_once(&mut world, drive_caster);
    assert_eq!(world.get::<Facing>(caster).unwrap().0, Vec2::X);

    world.resource_mut::<CasterInput>().aim_point = None;
    run_system_once(&mut world, drive_caster);
    assert_eq!(world.get::<Facing>(caster).unwrap().0, Vec2::X);

    // Aiming at our own feet is a zero-length direction: ignored too.
    world.resource_mut::<CasterInput>().aim_point = Some(Vec2::ZERO);
    run_system_once(&mut world, drive_caster);
    assert_eq!(world.get::<Facing>(caster).unwrap().0, Vec2::X);
}

#[test]
fn idle_caster_stops() {
    let (mut world, caster) = caster_world();
    world.get_mut::<LinearVelocity>(caster).unwrap().0 = Vec2::ONE;

    run_system_once(&mut world, drive_caster);

    assert_eq!(world.get::<LinearVelocity>(caster).unwrap().0, Vec2::ZERO);
    assert!(!world.get::<CasterAnimation>(caster).unwrap().walking);
}

// -----------------------------------------------------------------------------
// Firing
// -----------------------------------------------------------------------------

#[test]
fn held_fire_respects_the_fire_period() {
    let (mut world, _) = caster_world();
    world.resource_mut::<CasterInput>().fire = true;

    // 0.125 and 0.25 are exact in binary, so the cadence is exact too.
    let mut shots = 0;
    for _ in 0..8 {
        set_delta(&mut world, 0.125);
        run_system_once(&mut world, drive_caster);
        shots += drain_messages::<FireProjectile>(&mut world).len();
    }
    assert_eq!(shots, 4);
}

#[test]
fn no_fire_without_trigger() {
    let (mut world, _) = caster_world();
    for _ in 0..10 {
        set_delta(&mut world, 0.5);
        run_system_once(&mut world, drive_caster);
    }
    assert!(drain_messages::<FireProjectile>(&mut world).is_empty());
}

#[test]
fn projectile_leaves_from_the_muzzle_along_facing() {
    let (mut world, _) = caster_world();
    *world.resource_mut::<CasterInput>() = CasterInput {
        move_axis: Vec2::ZERO,
        fire: true,
        aim_point: Some(Vec2::new(0.0, 100.0)),
    };

    run_system_once(&mut world, drive_caster);

    let cfg = Tunables::default().caster;
    let shots = drain_messages::<FireProjectile>(&mut world);
    assert_eq!(shots.len(), 1);
    assert!((shots[0].origin - Vec2::new(0.0, cfg.muzzle_offset)).length() < 1e-3);
    assert!((shots[0].velocity - Vec2::new(0.0, cfg.bullet_speed)).length() < 1e-3);
}

// -----------------------------------------------------------------------------
// Contact damage
// -----------------------------------------------------------------------------

#[test]
fn sustained_contact_hurts_once_per_immunity_window() {
    // 100 hp, 1 s immunity, strength 10, 3 s of contact at 60 Hz.
    let (mut world, caster) = caster_world();
    let enemy = world.spawn(Enemy::new(5, 10, 100)).id();
    touch(&mut world, caster, enemy);

    for _ in 0..180 {
        tick(&mut world, 1.0 / 60.0);
    }

    let session = world.resource::<GameSession>();
    assert_eq!(session.health(), 70);
    assert!(!session.is_dead());
    assert!(world.get_entity(caster).is_ok());
}

#[test]
fn overlapping_enemies_do_not_stack_damage() {
    let (mut world, caster) = caster_world();
    let a = world.spawn(Enemy::new(5, 10, 100)).id();
    let b = world.spawn(Enemy::new(5, 20, 100)).id();
    touch(&mut world, caster, a);
    touch(&mut world, caster, b);

    tick(&mut world, 0.0);

    let health = world.resource::<GameSession>().health();
    assert!(health == 90 || health == 80, "took {}", 100 - health);
    assert!(!world.get::<Immunity>(caster).unwrap().is_ready());
}

#[test]
fn non_enemy_contacts_are_harmless() {
    let (mut world, caster) = caster_world();
    let wall = world.spawn(Transform::default()).id();
    touch(&mut world, caster, wall);

    tick(&mut world, 0.1);

    assert_eq!(world.resource::<GameSession>().health(), 100);
}

#[test]
fn lethal_contact_runs_death_sequence_once() {
    let (mut world, caster) = caster_world();
    world.insert_resource(GameSession::new(10));
    let burst = world
        .query_filtered::<Entity, With<DeathBurst>>()
        .single(&world)
        .unwrap();
    let enemy = world.spawn(Enemy::new(5, 25, 100)).id();
    touch(&mut world, caster, enemy);

    tick(&mut world, 0.016);

    assert!(world.resource::<GameSession>().is_dead());
    assert!(world.get_entity(caster).is_err());
    assert_eq!(drain_messages::<CasterDefeated>(&mut world).len(), 1);

    // The burst outlives the caster.
    assert!(world.get_entity(burst).is_ok());
    assert!(world.get::<DormantEffect>(burst).is_none());
    assert_eq!(world.get::<VisualEffect>(burst).unwrap().kind, EffectKind::CasterDeath);

    // Nothing left to hurt or announce.
    tick(&mut world, 2.0);
    assert!(drain_messages::<CasterDefeated>(&mut world).is_empty());
}

#[test]
fn systems_are_no_ops_without_a_caster() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(GameSession::new(100));
    world.insert_resource(CasterInput {
        fire: true,
        ..default()
    });
    ensure_messages::<FireProjectile>(&mut world);
    ensure_messages::<CasterDefeated>(&mut world);

    tick(&mut world, 0.5);

    assert!(drain_messages::<FireProjectile>(&mut world).is_empty());
    assert_eq!(world.resource::<GameSession>().health(), 100);
}
