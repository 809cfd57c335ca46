//! Session bookkeeping: health, score, defeat.
//!
//! `GameSession` is the only owner of these numbers. Other plugins go through
//! `apply_damage` / `add_score`; nothing writes the fields directly.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameSession {
    health: i32,
    max_health: i32,
    score: u32,
    dead: bool,
    /// Set by `apply_damage`, consumed by `update_overlay`.
    damaged: bool,
    overlay_alpha: f32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(100)
    }
}

impl GameSession {
    pub fn new(max_health: i32) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            score: 0,
            dead: false,
            damaged: false,
            overlay_alpha: 0.0,
        }
    }

    /// Subtract `amount` from health (never below zero).
    ///
    /// Returns `true` only for the call that brings health to zero. Once dead,
    /// further calls change nothing and return `false`.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if self.dead {
            return false;
        }

        self.health = (self.health - amount.max(0)).max(0);
        self.damaged = true;

        if self.health == 0 {
            self.dead = true;
            return true;
        }
        false
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Advance the damage overlay by `dt` and return the new opacity.
    ///
    /// A pending hit snaps the overlay to `max_alpha`; otherwise it eases toward
    /// zero by `fade_speed * dt` of the remaining distance.
    pub fn update_overlay(&mut self, dt: f32, max_alpha: f32, fade_speed: f32) -> f32 {
        if self.damaged {
            self.damaged = false;
            self.overlay_alpha = max_alpha;
        } else {
            let t = (fade_speed * dt).clamp(0.0, 1.0);
            self.overlay_alpha += (0.0 - self.overlay_alpha) * t;
        }
        self.overlay_alpha
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[inline]
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    #[inline]
    pub fn overlay_alpha(&self) -> f32 {
        self.overlay_alpha
    }

    #[inline]
    pub fn just_damaged(&self) -> bool {
        self.damaged
    }
}
