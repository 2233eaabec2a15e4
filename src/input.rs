//! Keyboard handling for the kiosk: the order-id text field and controls.
//!
//! - Enter: submit the order id (field is cleared)
//! - F2 / Ctrl+S: the stop control, only while recording
//! - Esc: save the current order and close
//! - Ctrl+C: close (window close)

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Longest order id the field accepts.
pub const MAX_ORDER_ID_LEN: usize = 64;

/// What the UI should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskAction {
    /// Start a session for this text (may be blank; the controller decides)
    Submit(String),
    /// Stop control pressed
    Stop,
    /// Escape pressed
    Escape,
    /// Window close requested
    Close,
    /// Text field changed
    Edited,
    /// Key ignored
    None,
}

/// Single-line text field for order ids.
#[derive(Debug, Clone, Default)]
pub struct OrderInput {
    text: String,
}

impl OrderInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a character. Returns false when the field is full.
    pub fn push(&mut self, c: char) -> bool {
        if self.text.chars().count() >= MAX_ORDER_ID_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Take the contents, leaving the field empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

/// Handle a key event.
///
/// `stop_enabled` mirrors the stop control's enabled state: it is only
/// active while a session is recording.
pub fn handle_key_event(event: KeyEvent, input: &mut OrderInput, stop_enabled: bool) -> KioskAction {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return KioskAction::None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KioskAction::Close,
            KeyCode::Char('s') | KeyCode::Char('S') if stop_enabled => KioskAction::Stop,
            KeyCode::Char('u') | KeyCode::Char('U') if !input.is_empty() => {
                input.clear();
                KioskAction::Edited
            }
            _ => KioskAction::None,
        };
    }

    match code {
        KeyCode::Enter => KioskAction::Submit(input.take()),
        KeyCode::Esc => KioskAction::Escape,
        KeyCode::F(2) if stop_enabled => KioskAction::Stop,
        KeyCode::Backspace if input.backspace() => KioskAction::Edited,
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::ALT) && !c.is_control() => {
            if input.push(c) {
                KioskAction::Edited
            } else {
                KioskAction::None
            }
        }
        _ => KioskAction::None,
    }
}
