//! Interaction module - the interactive-surface side of the board
//!
//! Turns pointer input into square selections, commits moves through the
//! mutator's entry point, and answers the mutator's decision requests
//! without ever blocking the interactive schedule.
//!
//! # Module Organization
//!
//! - `board_view` - [`BoardView`] and [`MoveRequester`], the seams to the game state
//! - `selection` - [`SelectionController`] state machine
//! - `handshake` - generic cross-thread decision handshake
//! - `pointer` - [`BoardViewport`] pixel mapping and orientation
//! - `feedback` - [`IllegalMoveFeedback`] flash window
//! - `theme` - [`ThemeService`] and the named palettes
//! - `events`, `resources`, `systems`, `system_sets`, `plugin` - Bevy wiring
//!
//! # Data Flow
//!
//! ```text
//! BoardClicked -> SquareActivated -> SelectionController -> MoveSender
//!                                                               |
//!       BoardStateChanged <- notifications <- GameEngine thread <-+
//!                                                   |
//!       PromotionPrompt <- DecisionResponder <- DecisionRequester
//! ```

pub mod board_view;
pub mod events;
pub mod feedback;
pub mod handshake;
pub mod plugin;
pub mod pointer;
pub mod resources;
pub mod selection;
pub mod system_sets;
pub mod systems;
pub mod theme;

pub use board_view::{BoardView, MoveRequester};
pub use events::{BoardClicked, BoardFlipped, BoardStateChanged, PromotionChosen, SquareActivated};
pub use feedback::IllegalMoveFeedback;
pub use handshake::{
    decision_channel, DecisionRequest, DecisionRequester, DecisionResponder, HandshakeError,
    HandshakeResult, RequestId,
};
pub use plugin::BoardInteractionPlugin;
pub use pointer::{AxisLabels, BoardViewport};
pub use resources::{GameLink, PromotionPrompt, SelectionResource};
pub use selection::{ActivationOutcome, HighlightKind, SelectionController, SelectionState};
pub use system_sets::InteractionSystems;
pub use theme::{ColorScheme, Rgba, SubscriptionId, ThemeId, ThemeService};
