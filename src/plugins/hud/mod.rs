//! HUD + session control.
//!
//! ```text
//! OnEnter(InGame):     reset GameSession, spawn HUD tree
//! Update:              overlay fade -> sync readouts -> restart input (dead only)
//! OnEnter(Restarting): go straight back to InGame
//! ```
//!
//! Restarting works like reloading a scene: every session entity carries
//! `DespawnOnExit(GameState::InGame)`, so bouncing through `Restarting` tears the
//! arena down and the `OnEnter(InGame)` systems of every plugin build it again.

mod session;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::caster::CasterDefeated;

pub use session::GameSession;

#[derive(Component)]
pub struct HealthText;

#[derive(Component)]
pub struct HealthBarFill;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct DamageOverlay;

#[derive(Component)]
pub struct GameOverText;

pub fn plugin(app: &mut App) {
    app.init_resource::<GameSession>()
        .add_systems(OnEnter(GameState::InGame), (reset_session, spawn_hud).chain())
        .add_systems(OnEnter(GameState::Restarting), resume_game)
        .add_systems(
            Update,
            (
                update_damage_overlay,
                sync_hud.after(update_damage_overlay),
                announce_game_over,
                restart_on_input.run_if(session_over),
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn session_over(session: Res<GameSession>) -> bool {
    session.is_dead()
}

fn reset_session(tunables: Res<Tunables>, mut session: ResMut<GameSession>) {
    *session = GameSession::new(tunables.caster.max_health);
}

fn spawn_hud(mut commands: Commands, session: Res<GameSession>) {
    let bar_track = Color::srgba(0.1, 0.1, 0.12, 0.85);
    let bar_fill = Color::srgb(0.8, 0.2, 0.25);
    let text_color = TextColor(Color::srgb(0.92, 0.92, 0.95));

    commands
        .spawn((
            Name::new("Hud"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|ui| {
            // Full-screen tint, transparent until the caster gets hit.
            ui.spawn((
                DamageOverlay,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    position_type: PositionType::Absolute,
                    ..default()
                },
                BackgroundColor(Color::srgba(0.9, 0.1, 0.1, 0.0)),
            ));

            ui.spawn(Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            })
            .with_children(|col| {
                col.spawn((
                    Node {
                        width: Val::Px(240.0),
                        height: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(bar_track),
                ))
                .with_children(|track| {
                    track.spawn((
                        HealthBarFill,
                        Node {
                            width: Val::Percent(session.health_fraction() * 100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(bar_fill),
                    ));
                });

                col.spawn((
                    HealthText,
                    Text::new(health_label(&session)),
                    TextFont { font_size: 18.0, ..default() },
                    text_color,
                ));

                col.spawn((
                    ScoreText,
                    Text::new(score_label(&session)),
                    TextFont { font_size: 22.0, ..default() },
                    text_color,
                ));
            });

            ui.spawn((
                GameOverText,
                Text::new("GAME OVER\nclick to play again"),
                TextFont { font_size: 48.0, ..default() },
                TextColor(Color::srgb(1.0, 0.85, 0.3)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Percent(40.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                Visibility::Hidden,
            ));
        });
}

fn health_label(session: &GameSession) -> String {
    format!("{}/{}", session.health(), session.max_health())
}

fn score_label(session: &GameSession) -> String {
    format!("Score: {}", session.score())
}

/// Snap or fade the damage tint.
///
/// Fading touches the session every frame, so it bypasses change detection to
/// keep `sync_hud` from rewriting text that did not change.
fn update_damage_overlay(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut session: ResMut<GameSession>,
    mut q_overlay: Query<&mut BackgroundColor, With<DamageOverlay>>,
) {
    let alpha = session.bypass_change_detection().update_overlay(
        time.delta_secs(),
        tunables.hud.overlay_max_alpha,
        tunables.hud.overlay_fade_speed,
    );

    for mut bg in &mut q_overlay {
        bg.0.set_alpha(alpha);
    }
}

#[allow(clippy::type_complexity)]
fn sync_hud(
    session: Res<GameSession>,
    mut q_text: Query<(&mut Text, Has<HealthText>, Has<ScoreText>)>,
    mut q_bar: Query<&mut Node, With<HealthBarFill>>,
    mut q_game_over: Query<&mut Visibility, With<GameOverText>>,
) {
    if !session.is_changed() {
        return;
    }

    for (mut text, is_health, is_score) in &mut q_text {
        if is_health {
            text.0 = health_label(&session);
        } else if is_score {
            text.0 = score_label(&session);
        }
    }

    for mut node in &mut q_bar {
        node.width = Val::Percent(session.health_fraction() * 100.0);
    }

    for mut vis in &mut q_game_over {
        *vis = if session.is_dead() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

fn announce_game_over(mut defeated: MessageReader<CasterDefeated>, session: Res<GameSession>) {
    for _ in defeated.read() {
        info!("game over, final score {}", session.score());
    }
}

fn restart_on_input(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let clicked = mouse.is_some_and(|m| m.just_pressed(MouseButton::Left));
    let pressed = keys.is_some_and(|k| k.just_pressed(KeyCode::KeyR));

    if clicked || pressed {
        info!("restarting session");
        next.set(GameState::Restarting);
    }
}

fn resume_game(mut next: ResMut<NextState<GameState>>) {
    next.set(GameState::InGame);
}
