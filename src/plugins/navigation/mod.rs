//! Navigation: straight-line steering toward a destination.
//!
//! Actors only ever *ask* to go somewhere by writing `NavAgent::destination`.
//! This plugin owns turning that request into a rigid-body velocity. There is no
//! path planning; agents steer directly and rely on the physics solver to slide
//! them around each other and along walls.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    pub destination: Option<Vec2>,
    pub speed: f32,
    /// Agents closer than this to their destination stop.
    pub stopping_distance: f32,
    pub enabled: bool,
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            destination: None,
            speed,
            stopping_distance: 4.0,
            enabled: true,
        }
    }

    /// Stop and drop the destination. The agent stays stationary until enabled again.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.destination = None;
    }

    /// Desired planar velocity from `position`.
    pub fn desired_velocity(&self, position: Vec2) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }
        let Some(dest) = self.destination else {
            return Vec2::ZERO;
        };

        let to = dest - position;
        if to.length() <= self.stopping_distance {
            return Vec2::ZERO;
        }
        to.normalize() * self.speed
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, steer_agents.run_if(in_state(GameState::InGame)));
}

pub fn steer_agents(mut q: Query<(&NavAgent, &Transform, &mut LinearVelocity)>) {
    for (agent, tf, mut vel) in &mut q {
        vel.0 = agent.desired_velocity(tf.translation.truncate());
    }
}

#[cfg(test)]
mod tests;
