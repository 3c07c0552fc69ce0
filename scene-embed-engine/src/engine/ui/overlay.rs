use bevy::prelude::*;

use crate::engine::assets::model_source::ModelFetchStats;
use crate::engine::loading::progress::progress_fraction;
use crate::rpc::host_rpc::HostRpcInterface;
use constants::viewer::{
    OVERLAY_TEXT_COLOR, PROGRESS_FILL_COLOR, PROGRESS_TRACK_COLOR, RELOAD_BUTTON_COLOR,
    RELOAD_LABEL_COLOR,
};

#[derive(Component)]
pub struct LoadingOverlay;

#[derive(Component)]
pub struct ProgressFill;

#[derive(Component)]
pub struct ReloadOverlay;

#[derive(Component)]
pub struct ReloadButton;

/// Centered loading card with a slim progress bar.
pub fn spawn_loading_overlay(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            LoadingOverlay,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        width: Val::Px(200.0),
                        padding: UiRect::all(Val::Px(15.0)),
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                    BorderRadius::all(Val::Px(5.0)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("Loading"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(OVERLAY_TEXT_COLOR),
                    ));
                    card.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(4.0),
                            margin: UiRect::vertical(Val::Px(10.0)),
                            overflow: Overflow::clip(),
                            ..default()
                        },
                        BackgroundColor(PROGRESS_TRACK_COLOR),
                    ))
                    .with_children(|track| {
                        track.spawn((
                            Node {
                                width: Val::Percent(0.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(PROGRESS_FILL_COLOR),
                            ProgressFill,
                        ));
                    });
                });
        });
}

/// Reflect fetched bytes in the bar and mirror the fraction to the host.
pub fn update_load_progress(
    stats: Res<ModelFetchStats>,
    mut fills: Query<&mut Node, With<ProgressFill>>,
    mut rpc: ResMut<HostRpcInterface>,
    mut last_sent: Local<f32>,
) {
    let fraction = progress_fraction(stats.loaded_bytes(), None);
    for mut node in &mut fills {
        node.width = Val::Percent(fraction * 100.0);
    }
    if (fraction - *last_sent).abs() >= 0.01 {
        *last_sent = fraction;
        rpc.send_notification(
            "loading_progress",
            serde_json::json!({ "fraction": fraction }),
        );
    }
}

pub fn show_loading_overlay(
    mut overlays: Query<&mut Visibility, With<LoadingOverlay>>,
    mut fills: Query<&mut Node, With<ProgressFill>>,
) {
    for mut visibility in &mut overlays {
        *visibility = Visibility::Inherited;
    }
    for mut node in &mut fills {
        node.width = Val::Percent(0.0);
    }
}

pub fn hide_loading_overlay(mut overlays: Query<&mut Visibility, With<LoadingOverlay>>) {
    for mut visibility in &mut overlays {
        *visibility = Visibility::Hidden;
    }
}

/// Swap the loading card for the manual reload affordance. No automatic
/// recovery exists past this point.
pub fn show_reload_affordance(
    mut commands: Commands,
    mut overlays: Query<&mut Visibility, With<LoadingOverlay>>,
) {
    for mut visibility in &mut overlays {
        *visibility = Visibility::Hidden;
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ReloadOverlay,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                        ..default()
                    },
                    BackgroundColor(RELOAD_BUTTON_COLOR),
                    BorderRadius::all(Val::Px(4.0)),
                    ReloadButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Reload"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(RELOAD_LABEL_COLOR),
                    ));
                });
        });
}

pub fn clear_reload_affordance(
    mut commands: Commands,
    overlays: Query<Entity, With<ReloadOverlay>>,
) {
    for entity in &overlays {
        commands.entity(entity).despawn();
    }
}

pub fn reload_on_click(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ReloadButton>)>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            trigger_page_reload();
        }
    }
}

fn trigger_page_reload() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    warn!("page reload requested outside a browser host");
}
