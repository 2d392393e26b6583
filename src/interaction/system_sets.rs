//! System organization using SystemSets
//!
//! # Execution Order
//!
//! Systems run in this order each frame:
//! 1. **Input** - settings sync, pointer resolution, board flips, square activation
//! 2. **Notifications** - drain mutator notifications into messages and feedback
//! 3. **Decisions** - surface promotion requests and deliver the human's choice

use bevy::prelude::*;

/// System execution order for board interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum InteractionSystems {
    /// Pointer and keyboard handling
    ///
    /// Systems: settings sync, click resolution, flips, selection
    Input,

    /// Mutator notifications
    ///
    /// Systems: notification drain, illegal-move feedback
    Notifications,

    /// Decision handshake
    ///
    /// Systems: request polling, choice delivery
    Decisions,
}
