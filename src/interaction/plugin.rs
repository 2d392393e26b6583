//! Board interaction plugin
//!
//! Registers the interactive-surface side of the board with a Bevy app.
//!
//! # Resources
//!
//! - [`SelectionResource`] - the selection state machine
//! - [`ThemeService`] - palettes and theme subscribers
//! - [`InteractionSettings`] - defaults until [`crate::core::CorePlugin`] loads the saved file
//! - [`IllegalMoveFeedback`] - flash window after a refused move
//! - [`PromotionPrompt`] - promotion request awaiting the human
//! - [`BoardViewport`] - panel geometry for pointer mapping
//!
//! The host inserts [`GameLink`] once a game starts. Every system that
//! talks to the mutator runs only while it exists.
//!
//! # Messages
//!
//! In: [`BoardClicked`], [`SquareActivated`], [`PromotionChosen`], [`BoardFlipped`].
//! Out: [`BoardStateChanged`], plus [`SquareActivated`] for resolved clicks.

use super::events::{BoardClicked, BoardFlipped, BoardStateChanged, PromotionChosen, SquareActivated};
use super::feedback::IllegalMoveFeedback;
use super::pointer::BoardViewport;
use super::resources::{GameLink, PromotionPrompt, SelectionResource};
use super::system_sets::InteractionSystems;
use super::systems::{
    apply_promotion_choices, clear_orphaned_prompt, drain_state_changes, handle_board_flips,
    handle_square_activation, poll_decision_requests, resolve_board_clicks, sync_settings,
};
use super::theme::ThemeService;
use crate::core::InteractionSettings;
use crate::game::PieceColor;
use bevy::prelude::*;

/// Interactive-surface wiring for one local player
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardInteractionPlugin {
    /// Colour the local player controls
    pub local_color: PieceColor,
}

impl BoardInteractionPlugin {
    pub fn new(local_color: PieceColor) -> Self {
        Self { local_color }
    }
}

impl Plugin for BoardInteractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = InteractionSettings::default();

        app.insert_resource(SelectionResource::new(
            self.local_color,
            settings.opponent_preview,
        ))
        .insert_resource(ThemeService::new(settings.theme))
        .insert_resource(IllegalMoveFeedback::new(settings.illegal_move_flash()))
        .insert_resource(BoardViewport {
            white_at_bottom: settings.white_at_bottom,
            ..BoardViewport::default()
        })
        .init_resource::<PromotionPrompt>()
        .init_resource::<InteractionSettings>();

        app.add_message::<BoardClicked>()
            .add_message::<SquareActivated>()
            .add_message::<BoardStateChanged>()
            .add_message::<PromotionChosen>()
            .add_message::<BoardFlipped>();

        app.configure_sets(
            Update,
            (
                InteractionSystems::Input,
                InteractionSystems::Notifications,
                InteractionSystems::Decisions,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                (
                    sync_settings,
                    resolve_board_clicks,
                    handle_board_flips,
                    handle_square_activation.run_if(resource_exists::<GameLink>),
                )
                    .chain()
                    .in_set(InteractionSystems::Input),
                drain_state_changes
                    .run_if(resource_exists::<GameLink>)
                    .in_set(InteractionSystems::Notifications),
                (poll_decision_requests, apply_promotion_choices)
                    .chain()
                    .run_if(resource_exists::<GameLink>)
                    .in_set(InteractionSystems::Decisions),
                clear_orphaned_prompt
                    .run_if(not(resource_exists::<GameLink>))
                    .in_set(InteractionSystems::Decisions),
            ),
        );
    }
}
