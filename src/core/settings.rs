//! User-facing interaction preferences
//!
//! [`InteractionSettings`] is a Bevy resource and is persisted as JSON by
//! [`super::settings_persistence`]. Every field has a serde default so
//! settings files written by older versions keep loading.

use crate::interaction::ThemeId;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What selecting a piece of the side not to move does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpponentPreview {
    /// Select it and show its destinations; moving it is still refused
    #[default]
    ShowDestinations,
    /// Ignore the click entirely
    Disabled,
}

/// Interaction preferences
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Highlight legal destinations of the selected piece
    pub show_available_moves: bool,

    pub opponent_preview: OpponentPreview,

    /// Draw White's back rank at the bottom of the panel
    pub white_at_bottom: bool,

    pub theme: ThemeId,

    /// How long the board flashes after a move that would leave the king in check
    pub illegal_move_flash_ms: u64,

    /// Give up on a promotion prompt after this long (None = wait until teardown)
    pub decision_timeout_ms: Option<u64>,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            show_available_moves: true,
            opponent_preview: OpponentPreview::ShowDestinations,
            white_at_bottom: true,
            theme: ThemeId::Classic,
            illegal_move_flash_ms: 750,
            decision_timeout_ms: None,
        }
    }
}

impl InteractionSettings {
    pub fn illegal_move_flash(&self) -> Duration {
        Duration::from_millis(self.illegal_move_flash_ms)
    }

    pub fn decision_timeout(&self) -> Option<Duration> {
        self.decision_timeout_ms.map(Duration::from_millis)
    }
}
