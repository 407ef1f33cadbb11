use bevy::prelude::*;

use crate::buffs::BuffRegistry;
use crate::components::{Player, PlayerStats};
use crate::events::{BuffApplied, LevelUpStarted};
use crate::resources::{AppState, GameSession, PendingBuffChoices};
use crate::systems::audio::SoundEffect;

#[derive(Component)]
pub struct BuffMenuRoot;

/// Marks one of the three selectable cards; carries the buff id it applies.
#[derive(Component)]
pub struct BuffCard {
    pub id: &'static str,
}

const CARD_COLOR: Color = Color::srgb(0.12, 0.12, 0.22);
const CARD_HOVER_COLOR: Color = Color::srgb(0.2, 0.2, 0.38);

/// Build the frozen-world overlay with three random buff cards.
pub fn setup_buff_menu(
    mut commands: Commands,
    registry: Res<BuffRegistry>,
    session: Res<GameSession>,
    mut pending: ResMut<PendingBuffChoices>,
    mut level_ups: MessageReader<LevelUpStarted>,
) {
    let level = level_ups
        .read()
        .last()
        .map(|event| event.level)
        .unwrap_or(session.level);

    let mut rng = rand::thread_rng();
    pending.choices = registry.random_buffs(&mut rng, 3);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, 0.7)),
            BuffMenuRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format!("LEVEL {level}")),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.3)),
            ));
            parent.spawn((
                Text::new("Choose an upgrade"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(20.0),
                    ..default()
                })
                .with_children(|row| {
                    for choice in &pending.choices {
                        row.spawn((
                            Button,
                            Node {
                                width: Val::Px(240.0),
                                height: Val::Px(200.0),
                                flex_direction: FlexDirection::Column,
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                row_gap: Val::Px(10.0),
                                padding: UiRect::all(Val::Px(14.0)),
                                ..default()
                            },
                            BackgroundColor(CARD_COLOR),
                            BuffCard { id: choice.id },
                        ))
                        .with_children(|card| {
                            card.spawn((
                                Text::new(choice.icon),
                                TextFont {
                                    font_size: 48.0,
                                    ..default()
                                },
                            ));
                            card.spawn((
                                Text::new(choice.name),
                                TextFont {
                                    font_size: 24.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(1.0, 0.9, 0.3)),
                            ));
                            card.spawn((
                                Text::new(choice.description),
                                TextFont {
                                    font_size: 16.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                            ));
                        });
                    }
                });
        });
}

/// Apply the picked buff and resume the run. Only the first press counts;
/// the state switch tears the overlay down before a second one can land.
pub fn buff_card_interaction(
    mut cards: Query<
        (&Interaction, &BuffCard, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut registry: ResMut<BuffRegistry>,
    mut player: Query<&mut PlayerStats, With<Player>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut applied: MessageWriter<BuffApplied>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    for (interaction, card, mut color) in cards.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                let Ok(mut stats) = player.single_mut() else {
                    continue;
                };
                if let Some(summary) = registry.apply(card.id, &mut stats) {
                    applied.write(BuffApplied {
                        id: card.id,
                        summary,
                    });
                }
                sounds.write(SoundEffect::ButtonClick);
                next_state.set(AppState::InGame);
                return;
            }
            Interaction::Hovered => *color = BackgroundColor(CARD_HOVER_COLOR),
            Interaction::None => *color = BackgroundColor(CARD_COLOR),
        }
    }
}

pub fn cleanup_buff_menu(
    mut commands: Commands,
    query: Query<Entity, With<BuffMenuRoot>>,
    mut pending: ResMut<PendingBuffChoices>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
    pending.choices.clear();
}
