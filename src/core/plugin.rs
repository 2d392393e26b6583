//! Core plugin
//!
//! Wires settings persistence into an app:
//! - [`SettingsPath`] is initialised (hosts may insert their own first)
//! - settings are loaded in `PreStartup`, before any `Startup` system reads them
//! - edits to [`InteractionSettings`](super::InteractionSettings) are saved at the end of each frame
//!
//! # Plugin Order
//!
//! Order relative to [`crate::interaction::BoardInteractionPlugin`] does not
//! matter: the loaded settings replace its defaults during `PreStartup`.

use super::settings_persistence::{load_settings_system, save_settings_system, SettingsPath};
use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SettingsPath>()
            .add_systems(PreStartup, load_settings_system)
            .add_systems(Last, save_settings_system);
    }
}
