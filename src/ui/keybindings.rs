// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map digit/shifted-digit keys to panel number (1..2).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    if let KeyCode::Char(c) = k.code {
        match c {
            '1' | '!' => Some(1),
            '2' | '@' => Some(2),
            _ => None,
        }
    } else {
        None
    }
}

/// Player actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    TogglePause,
    Stop,
    Replay,
    Quit,
    TogglePanel(usize),
    None,
}

/// Convert a key event to a player action.
pub fn key_to_action(key: &KeyEvent) -> PlayerAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return PlayerAction::Quit;
    }
    if let Some(d) = map_key_to_digit(key) {
        return PlayerAction::TogglePanel(d);
    }

    match key.code {
        KeyCode::Char(' ') => PlayerAction::TogglePause,
        KeyCode::Char('s') => PlayerAction::Stop,
        KeyCode::Char('r') | KeyCode::Enter => PlayerAction::Replay,
        KeyCode::Char('q') | KeyCode::Esc => PlayerAction::Quit,
        _ => PlayerAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_playback_keys() {
        assert_eq!(key_to_action(&key(KeyCode::Char(' '))), PlayerAction::TogglePause);
        assert_eq!(key_to_action(&key(KeyCode::Char('s'))), PlayerAction::Stop);
        assert_eq!(key_to_action(&key(KeyCode::Esc)), PlayerAction::Quit);
        assert_eq!(key_to_action(&key(KeyCode::Char('x'))), PlayerAction::None);
    }

    #[test]
    fn digits_and_shifted_digits_toggle_panels() {
        assert_eq!(key_to_action(&key(KeyCode::Char('1'))), PlayerAction::TogglePanel(1));
        assert_eq!(key_to_action(&key(KeyCode::Char('@'))), PlayerAction::TogglePanel(2));
    }

    #[test]
    fn every_listed_key_is_bound() {
        let bound = [
            (KeyCode::Char(' '), PlayerAction::TogglePause),
            (KeyCode::Char('s'), PlayerAction::Stop),
            (KeyCode::Char('r'), PlayerAction::Replay),
            (KeyCode::Enter, PlayerAction::Replay),
            (KeyCode::Char('1'), PlayerAction::TogglePanel(1)),
            (KeyCode::Char('!'), PlayerAction::TogglePanel(1)),
            (KeyCode::Char('2'), PlayerAction::TogglePanel(2)),
            (KeyCode::Char('@'), PlayerAction::TogglePanel(2)),
            (KeyCode::Char('q'), PlayerAction::Quit),
            (KeyCode::Esc, PlayerAction::Quit),
        ];
        for (code, action) in bound {
            assert_eq!(key_to_action(&key(code)), action, "{code:?}");
        }
    }

    #[test]
    fn ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(&event), PlayerAction::Quit);
    }
}
