use bevy::prelude::*;

use crate::components::{
    Drone, Enemy, HealPickup, Player, PlayerStats, Projectile,
};
use crate::events::{EnemyKilled, GameOverEvent, LevelUpStarted};
use crate::progression::level_up_due;
use crate::resources::{AppState, AutoShoot, GameClock, GameSession, RegenClock, SpawnDirector};
use crate::buffs::BuffRegistry;
use crate::persistence::Profile;
use crate::systems::audio::SoundEffect;

/// One-second clock behind the elapsed-time counter. Not ticked during the
/// buff pause, so survival time is honest.
pub fn tick_game_clock(
    mut clock: ResMut<GameClock>,
    mut session: ResMut<GameSession>,
    time: Res<Time>,
) {
    clock.timer.tick(time.delta());
    if clock.timer.just_finished() {
        session.elapsed_secs += 1;
    }
}

/// Kill accounting keeps reading through the buff pause, so notifications
/// written on the transition frame are folded in before the message buffer
/// drops them.
pub fn kill_accounting_active(state: Res<State<AppState>>) -> bool {
    matches!(state.get(), AppState::InGame | AppState::LevelUp)
}

/// Progression tracker: fold kill notifications into the session, then check
/// the level threshold once for the whole batch. The level trigger itself
/// only fires from the live game, one buff choice per level-up.
pub fn handle_kills(
    mut session: ResMut<GameSession>,
    mut killed: MessageReader<EnemyKilled>,
    mut player: Query<&mut PlayerStats, With<Player>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut level_up: MessageWriter<LevelUpStarted>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let mut any = false;
    for kill in killed.read() {
        any = true;
        session.score += kill.score;
        session.kills += 1;

        if let Ok(mut stats) = player.single_mut() {
            if stats.vampirism > 0.0 {
                let amount = stats.vampirism;
                stats.heal(amount);
            }
        }
    }

    if any
        && *state.get() == AppState::InGame
        && level_up_due(session.level, session.kills)
    {
        session.level += 1;
        info!(
            "level up! level {} at {} kills",
            session.level, session.kills
        );
        level_up.write(LevelUpStarted {
            level: session.level,
        });
        sounds.write(SoundEffect::LevelUp);
        next_state.set(AppState::LevelUp);
    }
}

/// Exactly one game-over transition; the state switch stops every combat
/// and damage system afterwards.
pub fn check_game_over(
    session: Res<GameSession>,
    player: Query<&PlayerStats, With<Player>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut game_over: MessageWriter<GameOverEvent>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Ok(stats) = player.single() else {
        return;
    };
    if stats.health > 0.0 {
        return;
    }

    info!(
        "game over: score {} kills {} level {} time {}s",
        session.score, session.kills, session.level, session.elapsed_secs
    );
    game_over.write(GameOverEvent {
        score: session.score,
        kills: session.kills,
        level: session.level,
        elapsed_secs: session.elapsed_secs,
    });
    sounds.write(SoundEffect::GameOver);
    next_state.set(AppState::GameOver);
}

#[derive(Component)]
pub struct GameOverScreen;

#[derive(Component)]
pub struct BackToMenuButton;

/// Final screen: run stats plus the persisted best score.
pub fn setup_game_over_screen(
    mut commands: Commands,
    session: Res<GameSession>,
    mut game_over: MessageReader<GameOverEvent>,
    mut profile: ResMut<Profile>,
) {
    let (score, kills, level, elapsed_secs) = game_over
        .read()
        .last()
        .map(|event| (event.score, event.kills, event.level, event.elapsed_secs))
        .unwrap_or((
            session.score,
            session.kills,
            session.level,
            session.elapsed_secs,
        ));

    let new_best = profile.data.record_score(score);
    profile.persist();

    let minutes = elapsed_secs / 60;
    let seconds = elapsed_secs % 60;

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, 0.8)),
            GameOverScreen,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 80.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.2, 0.2)),
            ));
            parent.spawn((
                Text::new(format!("Survived {minutes}:{seconds:02}")),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.3)),
            ));
            parent.spawn((
                Text::new(format!("Score: {score}   Kills: {kills}   Level: {level}")),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            let best_line = if new_best {
                format!("NEW BEST SCORE: {}", profile.data.high_score)
            } else {
                format!("Best score: {}", profile.data.high_score)
            };
            parent.spawn((
                Text::new(best_line),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 1.0, 0.6)),
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(28.0), Val::Px(12.0)),
                        margin: UiRect::top(Val::Px(20.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.35, 0.15)),
                    BackToMenuButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("BACK TO MENU"),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

pub fn game_over_interaction(
    query: Query<&Interaction, (Changed<Interaction>, With<BackToMenuButton>)>,
    mut next_state: ResMut<NextState<AppState>>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    for interaction in &query {
        if *interaction == Interaction::Pressed {
            sounds.write(SoundEffect::ButtonClick);
            next_state.set(AppState::MainMenu);
        }
    }
}

pub fn cleanup_game_over_screen(mut commands: Commands, query: Query<Entity, With<GameOverScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

/// Tear the run down when returning to the menu, so PLAY always starts
/// fresh.
pub fn cleanup_world(
    mut commands: Commands,
    entities: Query<
        Entity,
        Or<(
            With<Player>,
            With<Enemy>,
            With<Projectile>,
            With<Drone>,
            With<HealPickup>,
        )>,
    >,
    mut session: ResMut<GameSession>,
    mut registry: ResMut<BuffRegistry>,
    mut director: ResMut<SpawnDirector>,
    mut clock: ResMut<GameClock>,
    mut auto_shoot: ResMut<AutoShoot>,
    mut regen: ResMut<RegenClock>,
) {
    for entity in &entities {
        commands.entity(entity).despawn();
    }
    session.reset();
    registry.reset();
    *director = SpawnDirector::default();
    *clock = GameClock::default();
    *auto_shoot = AutoShoot::default();
    *regen = RegenClock::default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn kill(score: u32) -> EnemyKilled {
        EnemyKilled {
            archetype_id: "assault".to_string(),
            score,
            position: Vec2::ZERO,
        }
    }

    fn write_kills(app: &mut App, count: u32) {
        let mut messages = app.world_mut().resource_mut::<Messages<EnemyKilled>>();
        for _ in 0..count {
            messages.write(kill(10));
        }
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin);
        app.insert_state(AppState::InGame);
        app.init_resource::<GameSession>();
        app.add_message::<EnemyKilled>();
        app.add_message::<LevelUpStarted>();
        app.add_message::<SoundEffect>();
        app.add_systems(Update, handle_kills.run_if(kill_accounting_active));
        app
    }

    #[test]
    fn kills_written_on_the_transition_frame_still_count() {
        let mut app = test_app();

        write_kills(&mut app, 10);
        app.update();
        {
            let session = app.world().resource::<GameSession>();
            assert_eq!(session.kills, 10);
            assert_eq!(session.score, 100);
            assert_eq!(session.level, 2);
        }

        // A kill landing on the trigger frame is only readable once the
        // pause has already begun
        write_kills(&mut app, 1);
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::LevelUp
        );
        {
            let session = app.world().resource::<GameSession>();
            assert_eq!(session.kills, 11);
            assert_eq!(session.score, 110);
            assert_eq!(session.level, 2);
        }

        // And it is not counted twice on later frames
        app.update();
        assert_eq!(app.world().resource::<GameSession>().kills, 11);
    }

    #[test]
    fn threshold_crossed_during_the_pause_waits_for_the_live_game() {
        let mut app = test_app();
        write_kills(&mut app, 10);
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::LevelUp
        );

        // Kills folded during the pause never open a second buff menu
        write_kills(&mut app, 20);
        app.update();
        {
            let session = app.world().resource::<GameSession>();
            assert_eq!(session.kills, 30);
            assert_eq!(session.level, 2);
        }

        // Back in the live game the pending threshold fires on the next kill
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::InGame);
        app.update();
        write_kills(&mut app, 1);
        app.update();
        assert_eq!(app.world().resource::<GameSession>().level, 3);
    }
}
