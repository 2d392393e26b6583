//! Core module - errors, settings, persistence and logging
//!
//! Infrastructure shared by the game and interaction modules.
//!
//! # Module Organization
//!
//! - `error` - [`CoreError`] for settings I/O and serialization
//! - `settings` - [`InteractionSettings`] resource and [`OpponentPreview`]
//! - `settings_persistence` - JSON load/save and the Bevy systems around it
//! - `logging` - [`init_tracing`] for hosts without a subscriber
//! - `plugin` - [`CorePlugin`]
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use checkmates::core::CorePlugin;
//! use checkmates::interaction::BoardInteractionPlugin;
//!
//! checkmates::core::init_tracing("info");
//! App::new()
//!     .add_plugins(CorePlugin)
//!     .add_plugins(BoardInteractionPlugin::default())
//!     .run();
//! ```

pub mod error;
pub mod logging;
pub mod plugin;
pub mod settings;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use logging::init_tracing;
pub use plugin::CorePlugin;
pub use settings::{InteractionSettings, OpponentPreview};
pub use settings_persistence::{
    default_settings_path, load_settings, load_settings_or_default, save_settings, SettingsPath,
};
