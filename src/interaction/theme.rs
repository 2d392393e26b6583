//! Theme service
//!
//! Colour palettes for the board and its surrounding panels, plus an explicit
//! subscription list so presentation pieces can restyle themselves when the
//! theme changes.
//!
//! The service is an ordinary value (inserted as a Bevy resource by the
//! interaction plugin), never a process-wide global. Subscriptions are removed
//! with [`ThemeService::unsubscribe`] or all at once with
//! [`ThemeService::clear`] when the board is torn down.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components scaled to `0.0..=1.0`, the form most renderers expect
    pub fn to_f32_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }
}

/// Every colour a theme provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub board_light: Rgba,
    pub board_dark: Rgba,
    pub background: Rgba,
    pub surface: Rgba,
    pub text: Rgba,
    pub text_muted: Rgba,
    pub border: Rgba,
    /// Legal-destination overlay
    pub move_highlight: Rgba,
    /// Origin-square overlay
    pub selection_highlight: Rgba,
}

const CLASSIC: ColorScheme = ColorScheme {
    board_light: Rgba::rgb(0xFF, 0xFD, 0xE0),
    board_dark: Rgba::rgb(0x35, 0x34, 0x33),
    background: Rgba::rgb(0xF7, 0xF3, 0xED),
    surface: Rgba::rgb(0xFE, 0xFB, 0xF7),
    text: Rgba::rgb(0x2C, 0x2C, 0x2C),
    text_muted: Rgba::rgb(0x80, 0x80, 0x80),
    border: Rgba::rgb(0xD4, 0xCF, 0xC7),
    move_highlight: Rgba::rgba(0xFF, 0x64, 0x64, 200),
    selection_highlight: Rgba::rgba(0xDB, 0xCC, 0xBD, 150),
};

const ROCK_CLIMBING: ColorScheme = ColorScheme {
    board_light: Rgba::rgb(0xE8, 0xDC, 0xC7),
    board_dark: Rgba::rgb(0x6B, 0x5B, 0x54),
    background: Rgba::rgb(0xF5, 0xEE, 0xE6),
    surface: Rgba::rgb(0xFA, 0xF4, 0xED),
    text: Rgba::rgb(0x3E, 0x2E, 0x26),
    text_muted: Rgba::rgb(0x7C, 0x6F, 0x64),
    border: Rgba::rgb(0xC9, 0xB7, 0xA7),
    move_highlight: Rgba::rgba(0xFF, 0xD7, 0x00, 200),
    selection_highlight: Rgba::rgba(0x8B, 0xC3, 0x4A, 150),
};

const PIZZA_PARTY: ColorScheme = ColorScheme {
    board_light: Rgba::rgb(0xFF, 0xF8, 0xE7),
    board_dark: Rgba::rgb(0x8B, 0x2C, 0x1B),
    background: Rgba::rgb(0xD4, 0xA5, 0x74),
    surface: Rgba::rgb(0xE5, 0xB8, 0x8D),
    text: Rgba::rgb(0x4A, 0x0E, 0x0E),
    text_muted: Rgba::rgb(0x6B, 0x2C, 0x2C),
    border: Rgba::rgb(0xA5, 0x67, 0x3F),
    move_highlight: Rgba::rgba(0xFF, 0xD7, 0x00, 200),
    selection_highlight: Rgba::rgba(0xFF, 0xE5, 0x4D, 150),
};

const VIM_BEACH: ColorScheme = ColorScheme {
    board_light: Rgba::rgb(0xF4, 0xE4, 0xC1),
    board_dark: Rgba::rgb(0x7F, 0xB0, 0x69),
    background: Rgba::rgb(0xE8, 0xD5, 0xB7),
    surface: Rgba::rgb(0xF0, 0xE5, 0xCF),
    text: Rgba::rgb(0x2C, 0x5F, 0x2D),
    text_muted: Rgba::rgb(0x4E, 0x7C, 0x4F),
    border: Rgba::rgb(0xB8, 0xA8, 0x90),
    move_highlight: Rgba::rgba(0xFF, 0xB3, 0xBA, 200),
    selection_highlight: Rgba::rgba(0x87, 0xCE, 0xEB, 150),
};

const CHEERFUL_DYSTOPIA: ColorScheme = ColorScheme {
    board_light: Rgba::rgb(0xD0, 0xD0, 0xD0),
    board_dark: Rgba::rgb(0xFF, 0x6E, 0xC7),
    background: Rgba::rgb(0xE5, 0xE5, 0xE5),
    surface: Rgba::rgb(0xF0, 0xF0, 0xF0),
    text: Rgba::rgb(0x33, 0x33, 0x33),
    text_muted: Rgba::rgb(0x66, 0x44, 0x88),
    border: Rgba::rgb(0xC0, 0xC0, 0xC0),
    move_highlight: Rgba::rgba(0x39, 0xFF, 0x14, 200),
    selection_highlight: Rgba::rgba(0xFF, 0x00, 0xFF, 150),
};

/// Named palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeId {
    #[default]
    Classic,
    RockClimbing,
    PizzaParty,
    VimBeach,
    CheerfulDystopia,
}

impl ThemeId {
    pub const ALL: [ThemeId; 5] = [
        ThemeId::Classic,
        ThemeId::RockClimbing,
        ThemeId::PizzaParty,
        ThemeId::VimBeach,
        ThemeId::CheerfulDystopia,
    ];

    /// Name shown in theme menus
    pub fn display_name(self) -> &'static str {
        match self {
            ThemeId::Classic => "Classic Enhanced",
            ThemeId::RockClimbing => "Rock Climbing & Chai",
            ThemeId::PizzaParty => "Pizza Party",
            ThemeId::VimBeach => "Vim Beach",
            ThemeId::CheerfulDystopia => "Cheerful Dystopia",
        }
    }

    pub fn scheme(self) -> &'static ColorScheme {
        match self {
            ThemeId::Classic => &CLASSIC,
            ThemeId::RockClimbing => &ROCK_CLIMBING,
            ThemeId::PizzaParty => &PIZZA_PARTY,
            ThemeId::VimBeach => &VIM_BEACH,
            ThemeId::CheerfulDystopia => &CHEERFUL_DYSTOPIA,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Handle returned by [`ThemeService::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ThemeCallback = Box<dyn FnMut(ThemeId, &ColorScheme) + Send + Sync>;

/// Current theme plus the callbacks to notify when it changes
#[derive(Resource)]
pub struct ThemeService {
    current: ThemeId,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, ThemeCallback)>,
}

impl Default for ThemeService {
    fn default() -> Self {
        Self::new(ThemeId::default())
    }
}

impl ThemeService {
    pub fn new(current: ThemeId) -> Self {
        Self {
            current,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> ThemeId {
        self.current
    }

    pub fn scheme(&self) -> &'static ColorScheme {
        self.current.scheme()
    }

    /// Register `callback`; it is invoked with the current scheme right away
    pub fn subscribe<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(ThemeId, &ColorScheme) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        callback(self.current, self.current.scheme());
        self.subscribers.push((id, Box::new(callback)));
        debug!("[THEME] Subscriber {:?} registered", id);
        id
    }

    /// Returns `false` if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Switch theme and notify every subscriber in subscription order
    pub fn switch_theme(&mut self, theme: ThemeId) {
        self.current = theme;
        info!("[THEME] Switched to {}", theme);
        let scheme = theme.scheme();
        for (_, callback) in &mut self.subscribers {
            callback(theme, scheme);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscription
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_subscribe_applies_current_scheme() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut service = ThemeService::new(ThemeId::VimBeach);

        let sink = Arc::clone(&seen);
        service.subscribe(move |theme, scheme| {
            sink.lock().expect("lock").push((theme, scheme.board_dark));
        });

        assert_eq!(
            *seen.lock().expect("lock"),
            vec![(ThemeId::VimBeach, Rgba::rgb(0x7F, 0xB0, 0x69))]
        );
    }

    #[test]
    fn test_switch_notifies_in_subscription_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut service = ThemeService::default();

        for label in ["board", "captured", "history"] {
            let sink = Arc::clone(&order);
            service.subscribe(move |theme, _| sink.lock().expect("lock").push((label, theme)));
        }
        order.lock().expect("lock").clear();

        service.switch_theme(ThemeId::PizzaParty);
        assert_eq!(
            *order.lock().expect("lock"),
            vec![
                ("board", ThemeId::PizzaParty),
                ("captured", ThemeId::PizzaParty),
                ("history", ThemeId::PizzaParty),
            ]
        );
        assert_eq!(service.current(), ThemeId::PizzaParty);
    }

    #[test]
    fn test_unsubscribe_and_clear() {
        let calls = Arc::new(Mutex::new(0));
        let mut service = ThemeService::default();

        let sink = Arc::clone(&calls);
        let id = service.subscribe(move |_, _| *sink.lock().expect("lock") += 1);
        service.subscribe(|_, _| {});
        assert_eq!(service.subscriber_count(), 2);

        assert!(service.unsubscribe(id));
        assert!(!service.unsubscribe(id));
        service.switch_theme(ThemeId::CheerfulDystopia);
        assert_eq!(*calls.lock().expect("lock"), 1);

        service.clear();
        assert_eq!(service.subscriber_count(), 0);
    }

    #[test]
    fn test_every_theme_has_translucent_highlights() {
        for theme in ThemeId::ALL {
            let scheme = theme.scheme();
            assert!(scheme.move_highlight.a < 255, "{theme}");
            assert!(scheme.selection_highlight.a < 255, "{theme}");
        }
    }
}
