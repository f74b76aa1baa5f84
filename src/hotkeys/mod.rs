//! Hotkey system
//!
//! Centralized hotkey management for the review screen.
//!
//! # Architecture
//!
//! - **HotkeyAction**: Enum of all possible actions that can be triggered by hotkeys
//! - **HotkeyContext**: Determines which hotkeys are active based on app state
//! - **handle_hotkey()**: Main dispatch function that maps key events to actions
//!
//! # Adding New Hotkeys
//!
//! 1. Add a variant to `HotkeyAction`
//! 2. Add the key binding in `handle_hotkey()`
//! 3. Handle the action in the results view's key handler

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Toggle playback.
    PlayPause,
    /// Jump back a few seconds.
    SeekBackward,
    /// Jump forward a few seconds.
    SeekForward,
    /// Release a pinned feedback marker.
    ClearSelection,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether a video is loaded for review
    pub review_active: bool,
    /// Whether an input field has focus (should suppress most hotkeys)
    pub input_focused: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (e.g., input field focused)
    Suppressed,
}

/// Maps a key event to an action, considering the current context.
///
/// Modifier chords are left to the webview so copy/paste keep working.
pub fn handle_hotkey(
    key: &Key,
    _shift: bool,
    ctrl: bool,
    alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    // Suppress hotkeys when typing in an input field
    if context.input_focused {
        return HotkeyResult::Suppressed;
    }
    if !context.review_active || ctrl || alt || meta {
        return HotkeyResult::NoMatch;
    }

    match key {
        Key::Character(c) if c == " " || c == "k" || c == "K" => {
            HotkeyResult::Action(HotkeyAction::PlayPause)
        }
        Key::ArrowLeft => HotkeyResult::Action(HotkeyAction::SeekBackward),
        Key::ArrowRight => HotkeyResult::Action(HotkeyAction::SeekForward),
        Key::Escape => HotkeyResult::Action(HotkeyAction::ClearSelection),
        _ => HotkeyResult::NoMatch,
    }
}
