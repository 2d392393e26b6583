//! Illegal-move feedback window
//!
//! When the mutator reports that a move would leave the king in check, the
//! board flashes for a short while. The resource only tracks the window; the
//! renderer decides how to draw it.

use crate::game::PieceColor;
use bevy::prelude::*;
use std::time::Duration;
use web_time::Instant;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct IllegalMoveFeedback {
    started: Option<Instant>,
    duration: Duration,
    color: Option<PieceColor>,
}

impl Default for IllegalMoveFeedback {
    fn default() -> Self {
        Self::new(Duration::from_millis(750))
    }
}

impl IllegalMoveFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            started: None,
            duration,
            color: None,
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Start (or restart) the window for the side whose move was refused
    pub fn trigger(&mut self, color: PieceColor) {
        self.trigger_at(color, Instant::now());
    }

    pub fn trigger_at(&mut self, color: PieceColor, now: Instant) {
        self.started = Some(now);
        self.color = Some(color);
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }

    pub fn is_active_at(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.duration)
    }

    /// Side whose move triggered the current window
    pub fn color(&self) -> Option<PieceColor> {
        self.color.filter(|_| self.is_active())
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.color = None;
    }
}
