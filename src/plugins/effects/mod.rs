//! Short-lived visual effects: impact sparks, hit puffs, death bursts.
//!
//! Effects live in the scene, not under the actor that caused them. An actor that
//! carries a pre-built effect as a child (projectile sparks, the caster's death
//! burst) hands it over with [`release_effect`] before it is despawned, so the
//! effect keeps playing after its source is gone.
//!
//! Presentation is asset-free: a coloured sprite that grows and fades over the
//! effect's lifetime.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Projectile impact.
    Sparks,
    /// Enemy took a hit.
    Damage,
    /// Enemy died.
    Death,
    /// Caster died.
    CasterDeath,
}

impl EffectKind {
    pub fn lifetime_secs(self) -> f32 {
        match self {
            Self::Sparks => 0.25,
            Self::Damage => 0.35,
            Self::Death => 0.8,
            Self::CasterDeath => 1.4,
        }
    }

    /// Sprite edge length at scale 1.
    pub fn base_size(self) -> f32 {
        match self {
            Self::Sparks => 10.0,
            Self::Damage => 18.0,
            Self::Death => 36.0,
            Self::CasterDeath => 64.0,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Sparks => Color::srgb(1.0, 0.85, 0.3),
            Self::Damage => Color::srgb(1.0, 0.4, 0.3),
            Self::Death => Color::srgb(0.7, 0.2, 0.6),
            Self::CasterDeath => Color::srgb(0.3, 0.85, 1.0),
        }
    }

    /// How much the sprite grows by the end of its lifetime.
    fn growth(self) -> f32 {
        match self {
            Self::Sparks => 1.5,
            Self::Damage => 1.8,
            Self::Death | Self::CasterDeath => 2.5,
        }
    }
}

/// A playing effect. Only effects with this component are animated and expired.
#[derive(Component, Debug, Clone)]
pub struct VisualEffect {
    pub kind: EffectKind,
    pub timer: Timer,
    /// Scale the effect started with; animation multiplies on top of it.
    pub base_scale: Vec3,
}

impl VisualEffect {
    pub fn new(kind: EffectKind, base_scale: Vec3) -> Self {
        Self {
            kind,
            timer: Timer::from_seconds(kind.lifetime_secs(), TimerMode::Once),
            base_scale,
        }
    }
}

/// A dormant effect carried as a child. Hidden and not ticking until released.
#[derive(Component, Debug, Clone, Copy)]
pub struct DormantEffect(pub EffectKind);

pub fn plugin(app: &mut App) {
    app.add_systems(Update, animate_effects.run_if(in_state(GameState::InGame)));
}

fn effect_sprite(kind: EffectKind) -> Sprite {
    Sprite {
        color: kind.color(),
        custom_size: Some(Vec2::splat(kind.base_size())),
        ..default()
    }
}

/// Spawn a playing effect directly in the scene.
pub fn spawn_effect(commands: &mut Commands, kind: EffectKind, position: Vec3, scale: Vec3) -> Entity {
    commands
        .spawn((
            Name::new(format!("{kind:?}Effect")),
            VisualEffect::new(kind, scale),
            effect_sprite(kind),
            Transform::from_translation(position).with_scale(scale),
            Visibility::Visible,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Bundle for an effect that rides along as a child until released.
pub fn dormant_effect(kind: EffectKind) -> impl Bundle {
    (
        Name::new(format!("{kind:?}Effect(Dormant)")),
        DormantEffect(kind),
        effect_sprite(kind),
        Transform::default(),
        Visibility::Hidden,
    )
}

/// Detach a dormant child effect into the scene and start playing it.
///
/// `position` is the world position the effect should appear at; the caller
/// passes its own translation since the child's world transform is about to lose
/// its parent.
pub fn release_effect(commands: &mut Commands, effect: Entity, kind: EffectKind, position: Vec3, scale: Vec3) {
    commands
        .entity(effect)
        .remove::<(ChildOf, DormantEffect)>()
        .insert((
            VisualEffect::new(kind, scale),
            Transform::from_translation(position).with_scale(scale),
            Visibility::Visible,
            DespawnOnExit(GameState::InGame),
        ));
}

/// Grow + fade, then despawn.
fn animate_effects(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut VisualEffect, &mut Transform, &mut Sprite)>,
) {
    for (e, mut fx, mut tf, mut sprite) in &mut q {
        fx.timer.tick(time.delta());

        if fx.timer.is_finished() {
            commands.entity(e).despawn();
            continue;
        }

        let t = fx.timer.fraction();
        tf.scale = fx.base_scale * (1.0 + (fx.kind.growth() - 1.0) * t);

        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();
    }
}
