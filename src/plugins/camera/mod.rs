//! Camera plugin (render-only).
//!
//! The camera trails the caster with critically damped smoothing.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera + CameraRig
//! PostUpdate:      follow_caster (snap on first sight, smooth_damp after)
//! ```
//!
//! A system cannot hold `&Transform` and `&mut Transform` on overlapping
//! entities (B0001), so the caster and rig queries are made disjoint with
//! `Without<...>` filters.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::{
    state::GameState,
    tunables::{CameraTunables, Tunables},
};
use crate::plugins::caster::Caster;

#[derive(Component)]
pub struct MainCamera;

#[derive(Component, Debug, Clone)]
pub struct CameraRig {
    /// Height above the target along z. The ground plane is XY, so this
    /// is draw depth on top of the target's own layer.
    pub altitude: f32,
    /// Offset along y, so the caster sits off-centre.
    pub depth_offset: f32,
    /// Roughly the time to reach the goal.
    pub smooth_time: f32,
    pub velocity: Vec3,
    /// Set once the rig has jumped onto its first goal.
    pub snapped: bool,
}

impl From<&CameraTunables> for CameraRig {
    fn from(cfg: &CameraTunables) -> Self {
        Self {
            altitude: cfg.altitude,
            depth_offset: cfg.depth_offset,
            smooth_time: cfg.smooth_time,
            velocity: Vec3::ZERO,
            snapped: false,
        }
    }
}

impl CameraRig {
    /// Where the camera wants to be for a target at `target`.
    #[inline]
    pub fn goal(&self, target: Vec3) -> Vec3 {
        target + Vec3::new(0.0, self.depth_offset, self.altitude)
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_caster
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let rig = CameraRig::from(&tunables.camera);

    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, rig.depth_offset, rig.altitude),
        rig,
        FireflyConfig::default(),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Critically damped spring toward `target`.
///
/// The usual game-engine `SmoothDamp` curve without a speed cap: never overshoots,
/// and `velocity` carries the spring state between calls. `dt == 0` leaves
/// everything unchanged.
pub fn smooth_damp(current: Vec3, target: Vec3, velocity: &mut Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let out = target + (change + temp) * decay;

    // Passed the target: clamp onto it.
    if (target - current).dot(out - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }
    out
}

pub fn follow_caster(
    time: Res<Time>,
    caster: Option<Single<&Transform, (With<Caster>, Without<CameraRig>)>>,
    rig: Option<Single<(&mut Transform, &mut CameraRig), Without<Caster>>>,
) {
    let (Some(caster), Some(rig)) = (caster, rig) else {
        return;
    };
    let (mut tf, mut rig) = rig.into_inner();
    let goal = rig.goal(caster.translation);

    if !rig.snapped {
        tf.translation = goal;
        rig.velocity = Vec3::ZERO;
        rig.snapped = true;
        return;
    }

    let smooth_time = rig.smooth_time;
    tf.translation = smooth_damp(tf.translation, goal, &mut rig.velocity, smooth_time, time.delta_secs());
}
