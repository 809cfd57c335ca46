use bevy::prelude::*;

/// Projectile lifecycle. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Alive,
    Resolved,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Projectile {
    state: ProjectileState,
}

impl Projectile {
    #[inline]
    pub fn state(&self) -> ProjectileState {
        self.state
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == ProjectileState::Alive
    }

    /// Move to `Resolved`. Returns `true` only for the call that made the transition.
    #[inline]
    pub fn resolve(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.state = ProjectileState::Resolved;
        was_alive
    }
}

/// Time left before the projectile fizzles out on its own.
#[derive(Component, Debug, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

/// Marks the dormant sparks child a projectile carries until impact.
#[derive(Component, Debug, Clone, Copy)]
pub struct ImpactSparks;
