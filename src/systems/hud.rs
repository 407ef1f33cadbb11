use bevy::prelude::*;

use crate::components::{Player, PlayerStats};
use crate::events::{AchievementUnlocked, BuffApplied};
use crate::resources::GameSession;

#[derive(Component)]
pub struct GameHud;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct KillsText;

#[derive(Component)]
pub struct LevelText;

#[derive(Component)]
pub struct TimerText;

#[derive(Component)]
pub struct HealthBarFill;

#[derive(Component)]
pub struct HealthText;

#[derive(Component)]
pub struct NotificationArea;

/// Short-lived toast in the notification column.
#[derive(Component)]
pub struct Notification {
    pub timer: Timer,
}

const HEALTH_BAR_WIDTH: f32 = 220.0;

pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            GameHud,
        ))
        .with_children(|parent| {
            // Health bar with the number on top
            parent
                .spawn((
                    Node {
                        width: Val::Px(HEALTH_BAR_WIDTH),
                        height: Val::Px(22.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.25, 0.05, 0.05)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(0.0),
                            top: Val::Px(0.0),
                            width: Val::Px(HEALTH_BAR_WIDTH),
                            height: Val::Px(22.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.2, 0.8, 0.3)),
                        HealthBarFill,
                    ));
                    bar.spawn((
                        Text::new("100 / 100"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        HealthText,
                    ));
                });

            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.3)),
                ScoreText,
            ));
            parent.spawn((
                Text::new("Kills: 0"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                KillsText,
            ));
            parent.spawn((
                Text::new("Level: 1"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.9, 1.0)),
                LevelText,
            ));
            parent.spawn((
                Text::new("Time: 0:00"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                TimerText,
            ));
        });

    // Toasts stack under the top edge, centered
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            left: Val::Percent(0.0),
            width: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(4.0),
            ..default()
        },
        GameHud,
        NotificationArea,
    ));
}

pub fn update_hud(
    session: Res<GameSession>,
    mut score: Query<&mut Text, (With<ScoreText>, Without<KillsText>, Without<LevelText>, Without<TimerText>)>,
    mut kills: Query<&mut Text, (With<KillsText>, Without<LevelText>, Without<TimerText>)>,
    mut level: Query<&mut Text, (With<LevelText>, Without<TimerText>)>,
    mut timer: Query<&mut Text, With<TimerText>>,
) {
    if !session.is_changed() {
        return;
    }
    if let Ok(mut text) = score.single_mut() {
        **text = format!("Score: {}", session.score);
    }
    if let Ok(mut text) = kills.single_mut() {
        **text = format!("Kills: {}", session.kills);
    }
    if let Ok(mut text) = level.single_mut() {
        **text = format!("Level: {}", session.level);
    }
    if let Ok(mut text) = timer.single_mut() {
        let minutes = session.elapsed_secs / 60;
        let seconds = session.elapsed_secs % 60;
        **text = format!("Time: {minutes}:{seconds:02}");
    }
}

pub fn update_health_display(
    player: Query<&PlayerStats, With<Player>>,
    mut fill: Query<(&mut Node, &mut BackgroundColor), With<HealthBarFill>>,
    mut label: Query<&mut Text, With<HealthText>>,
) {
    let Ok(stats) = player.single() else {
        return;
    };
    let fraction = (stats.health / stats.max_health).clamp(0.0, 1.0);

    if let Ok((mut node, mut color)) = fill.single_mut() {
        node.width = Val::Px(HEALTH_BAR_WIDTH * fraction);
        *color = BackgroundColor(if fraction > 0.5 {
            Color::srgb(0.2, 0.8, 0.3)
        } else if fraction > 0.25 {
            Color::srgb(0.9, 0.8, 0.2)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        });
    }
    if let Ok(mut text) = label.single_mut() {
        let shield = if stats.shield_charges > 0 {
            format!("  [{}x shield]", stats.shield_charges)
        } else {
            String::new()
        };
        **text = format!(
            "{:.0} / {:.0}{shield}",
            stats.health.max(0.0),
            stats.max_health
        );
    }
}

/// Buff confirmations and achievement unlocks show up as toasts.
pub fn spawn_notifications(
    mut commands: Commands,
    area: Query<Entity, With<NotificationArea>>,
    mut buffs: MessageReader<BuffApplied>,
    mut achievements: MessageReader<AchievementUnlocked>,
) {
    let Ok(area) = area.single() else {
        return;
    };

    for buff in buffs.read() {
        spawn_toast(
            &mut commands,
            area,
            buff.summary.clone(),
            Color::srgb(0.4, 1.0, 0.6),
        );
    }
    for achievement in achievements.read() {
        spawn_toast(
            &mut commands,
            area,
            format!("Achievement: {} - {}", achievement.name, achievement.description),
            Color::srgb(1.0, 0.85, 0.3),
        );
    }
}

fn spawn_toast(commands: &mut Commands, area: Entity, message: String, color: Color) {
    let toast = commands
        .spawn((
            Node {
                padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, 0.6)),
            Notification {
                timer: Timer::from_seconds(2.5, TimerMode::Once),
            },
        ))
        .with_children(|node| {
            node.spawn((
                Text::new(message),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(color),
            ));
        })
        .id();
    commands.entity(area).add_child(toast);
}

pub fn expire_notifications(
    mut commands: Commands,
    mut toasts: Query<(Entity, &mut Notification)>,
    time: Res<Time>,
) {
    for (entity, mut toast) in toasts.iter_mut() {
        toast.timer.tick(time.delta());
        if toast.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}

pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<GameHud>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
