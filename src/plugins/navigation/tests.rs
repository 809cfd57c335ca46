use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;

#[test]
fn steers_toward_destination_at_speed() {
    let mut world = World::new();
    let mut agent = NavAgent::new(50.0);
    agent.destination = Some(Vec2::new(100.0, 0.0));
    let e = world.spawn((agent, Transform::default(), LinearVelocity::ZERO)).id();

    run_system_once(&mut world, steer_agents);

    let v = world.get::<LinearVelocity>(e).unwrap().0;
    assert!((v - Vec2::new(50.0, 0.0)).length() < 1e-4);
}

#[test]
fn stops_inside_stopping_distance() {
    let agent = NavAgent { destination: Some(Vec2::new(2.0, 0.0)), ..NavAgent::new(50.0) };
    assert_eq!(agent.desired_velocity(Vec2::ZERO), Vec2::ZERO);
}

#[test]
fn disabled_agent_is_stationary() {
    let mut world = World::new();
    let mut agent = NavAgent::new(50.0);
    agent.destination = Some(Vec2::new(100.0, 0.0));
    agent.disable();
    let e = world
        .spawn((agent, Transform::default(), LinearVelocity(Vec2::new(9.0, 9.0))))
        .id();

    run_system_once(&mut world, steer_agents);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);
    let agent = world.get::<NavAgent>(e).unwrap();
    assert!(!agent.enabled);
    assert!(agent.destination.is_none());
}

#[test]
fn no_destination_means_no_motion() {
    assert_eq!(NavAgent::new(80.0).desired_velocity(Vec2::new(3.0, 4.0)), Vec2::ZERO);
}
