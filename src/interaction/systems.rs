//! Interaction systems
//!
//! All of these run on the interactive schedule. None of them blocks: the
//! mutator is only reached through channels, and decision requests are
//! polled with `try_recv`.

use super::events::{BoardClicked, BoardFlipped, BoardStateChanged, PromotionChosen, SquareActivated};
use super::feedback::IllegalMoveFeedback;
use super::pointer::BoardViewport;
use super::resources::{GameLink, PromotionPrompt, SelectionResource};
use super::theme::ThemeService;
use crate::core::InteractionSettings;
use crate::game::StateChange;
use bevy::prelude::*;
use tracing::{debug, info, warn};

/// Push setting edits into the resources that mirror them
pub fn sync_settings(
    settings: Res<InteractionSettings>,
    mut selection: ResMut<SelectionResource>,
    mut feedback: ResMut<IllegalMoveFeedback>,
    mut viewport: ResMut<BoardViewport>,
    mut theme: ResMut<ThemeService>,
) {
    if !settings.is_changed() {
        return;
    }
    selection
        .controller
        .set_opponent_preview(settings.opponent_preview);
    feedback.set_duration(settings.illegal_move_flash());
    if viewport.white_at_bottom != settings.white_at_bottom {
        viewport.white_at_bottom = settings.white_at_bottom;
        selection.controller.clear();
    }
    if theme.current() != settings.theme {
        theme.switch_theme(settings.theme);
    }
}

/// Resolve pixel clicks to squares; clicks off the board are dropped
pub fn resolve_board_clicks(
    mut clicks: MessageReader<BoardClicked>,
    viewport: Res<BoardViewport>,
    mut activations: MessageWriter<SquareActivated>,
) {
    for click in clicks.read() {
        match viewport.pixel_to_square(click.x, click.y) {
            Some(position) => {
                activations.write(SquareActivated { position });
            }
            None => debug!("[INPUT] No square at ({}, {})", click.x, click.y),
        }
    }
}

/// Flip the board; any selection is dropped
pub fn handle_board_flips(
    mut flips: MessageReader<BoardFlipped>,
    mut viewport: ResMut<BoardViewport>,
    mut selection: ResMut<SelectionResource>,
    mut settings: ResMut<InteractionSettings>,
) {
    let count = flips.read().count();
    if count == 0 {
        return;
    }
    for _ in 0..count {
        viewport.flip();
    }
    selection.controller.clear();
    settings.white_at_bottom = viewport.white_at_bottom;
    info!("[INPUT] Board flipped (white at bottom: {})", viewport.white_at_bottom);
}

/// Feed activations to the selection controller against the latest snapshot
pub fn handle_square_activation(
    mut activations: MessageReader<SquareActivated>,
    mut selection: ResMut<SelectionResource>,
    link: Res<GameLink>,
) {
    for activation in activations.read() {
        let snapshot = link.latest();
        selection
            .controller
            .activate(activation.position, snapshot.as_ref(), &link.moves);
    }
}

/// Drain mutator notifications onto this schedule
pub fn drain_state_changes(
    link: Res<GameLink>,
    mut selection: ResMut<SelectionResource>,
    mut feedback: ResMut<IllegalMoveFeedback>,
    mut changes: MessageWriter<BoardStateChanged>,
) {
    for change in link.notifications.try_iter() {
        match &change {
            StateChange::IllegalMoveFromCheck { color, .. } => feedback.trigger(*color),
            StateChange::GameOver { status } => {
                info!("[GAME] {:?}", status);
                selection.controller.clear();
            }
            _ => {}
        }
        changes.write(BoardStateChanged { change });
    }
}

/// Pick up new promotion requests and show the oldest one
pub fn poll_decision_requests(mut link: ResMut<GameLink>, mut prompt: ResMut<PromotionPrompt>) {
    for request in link.decisions.poll() {
        info!(
            "[PROMOTION] {} to choose a piece on {}",
            request.subject.color, request.subject.square
        );
    }
    refresh_prompt(&link, &mut prompt);
}

/// Keep the shown request if it is still open, otherwise show the oldest
fn refresh_prompt(link: &GameLink, prompt: &mut ResMut<PromotionPrompt>) {
    let pending = link.decisions.pending();
    let still_open = prompt
        .current
        .as_ref()
        .is_some_and(|shown| pending.iter().any(|r| r.id == shown.id));
    if still_open {
        return;
    }
    let next = pending.first().map(|r| (*r).clone());
    if prompt.current != next {
        prompt.current = next;
    }
}

/// Deliver the human's promotion choice
pub fn apply_promotion_choices(
    mut choices: MessageReader<PromotionChosen>,
    mut link: ResMut<GameLink>,
    mut prompt: ResMut<PromotionPrompt>,
) {
    let mut answered = false;
    for chosen in choices.read() {
        answered = true;
        match link.decisions.resolve(chosen.request, chosen.choice) {
            Ok(()) => info!("[PROMOTION] Chose {:?}", chosen.choice),
            Err(e) => warn!("[PROMOTION] {}", e),
        }
    }
    if answered {
        refresh_prompt(&link, &mut prompt);
    }
}

/// Without a link there is nothing to choose for
pub fn clear_orphaned_prompt(mut prompt: ResMut<PromotionPrompt>) {
    if prompt.current.is_some() {
        prompt.current = None;
    }
}
