use bevy::prelude::*;

use crate::persistence::Profile;
use crate::resources::AppState;
use crate::systems::audio::SoundEffect;

#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub enum MenuButton {
    Play,
    Quit,
}

const BUTTON_COLOR: Color = Color::srgb(0.15, 0.15, 0.25);
const BUTTON_HOVER_COLOR: Color = Color::srgb(0.25, 0.25, 0.4);

pub fn setup_menu(mut commands: Commands, profile: Res<Profile>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(18.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.04, 0.04, 0.1)),
            MainMenuRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("FUTURE SURVIVORS"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.9, 1.0)),
            ));
            parent.spawn((
                Text::new("Survive the swarm. Level up. Choose your build."),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.8)),
            ));
            if profile.data.high_score > 0 {
                parent.spawn((
                    Text::new(format!("Best score: {}", profile.data.high_score)),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(1.0, 0.9, 0.3)),
                ));
            }

            spawn_menu_button(parent, "PLAY", MenuButton::Play);
            spawn_menu_button(parent, "QUIT", MenuButton::Quit);
        });
}

fn spawn_menu_button(parent: &mut ChildSpawnerCommands, label: &str, action: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(56.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                margin: UiRect::top(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            action,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn menu_interaction(
    mut buttons: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    for (interaction, button, mut color) in buttons.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                sounds.write(SoundEffect::ButtonClick);
                match button {
                    MenuButton::Play => next_state.set(AppState::InGame),
                    MenuButton::Quit => {
                        exit.write(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => *color = BackgroundColor(BUTTON_HOVER_COLOR),
            Interaction::None => *color = BackgroundColor(BUTTON_COLOR),
        }
    }
}

pub fn cleanup_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
