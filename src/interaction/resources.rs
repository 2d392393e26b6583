//! Bevy resources owned by the interactive context

use crate::core::{InteractionSettings, OpponentPreview};
use crate::game::{
    EngineChannels, GameEngine, GameResult, GameSnapshot, MoveSender, PieceColor,
    PromotionRequest, PromotionResponder, SnapshotSource, StateChange,
};
use crate::interaction::selection::SelectionController;
use bevy::prelude::*;
use crossbeam_channel::Receiver;
use std::sync::Arc;

/// The selection state machine for the local board
#[derive(Resource, Debug, Clone)]
pub struct SelectionResource {
    pub controller: SelectionController,
}

impl SelectionResource {
    pub fn new(local_color: PieceColor, opponent_preview: OpponentPreview) -> Self {
        Self {
            controller: SelectionController::new(local_color, opponent_preview),
        }
    }
}

/// Promotion request currently shown to the human, if any
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PromotionPrompt {
    pub current: Option<PromotionRequest>,
}

impl PromotionPrompt {
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

/// Connection to the game-state mutator, inserted by the host
///
/// Interaction systems only run while this resource exists. Removing it (or
/// dropping the app) drops the decision responder, which resolves every
/// outstanding promotion with its default.
#[derive(Resource)]
pub struct GameLink {
    pub snapshots: SnapshotSource,
    pub moves: MoveSender,
    pub notifications: Receiver<StateChange>,
    pub decisions: PromotionResponder,
}

impl GameLink {
    /// Spawn an engine for `initial` using the timeout from `settings`
    ///
    /// The caller keeps the [`GameEngine`] alive for as long as the game runs.
    pub fn spawn(
        initial: GameSnapshot,
        settings: &InteractionSettings,
    ) -> GameResult<(GameEngine, GameLink)> {
        let (engine, channels) = GameEngine::spawn(initial, settings.decision_timeout())?;
        Ok((engine, channels.into()))
    }

    pub fn latest(&self) -> Arc<GameSnapshot> {
        self.snapshots.latest()
    }
}

impl From<EngineChannels> for GameLink {
    fn from(channels: EngineChannels) -> Self {
        Self {
            snapshots: channels.snapshots,
            moves: channels.moves,
            notifications: channels.notifications,
            decisions: channels.decisions,
        }
    }
}
