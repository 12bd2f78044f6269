//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::CursorLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::CursorRight)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameAction::CursorUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::CursorDown)
        }

        // Flip the card under the cursor
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Select),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key(KeyCode::Left), Some(GameAction::CursorLeft));
        assert_eq!(key(KeyCode::Right), Some(GameAction::CursorRight));
        assert_eq!(key(KeyCode::Up), Some(GameAction::CursorUp));
        assert_eq!(key(KeyCode::Down), Some(GameAction::CursorDown));
    }

    #[test]
    fn test_vim_and_wasd_keys() {
        assert_eq!(key(KeyCode::Char('h')), Some(GameAction::CursorLeft));
        assert_eq!(key(KeyCode::Char('L')), Some(GameAction::CursorRight));
        assert_eq!(key(KeyCode::Char('k')), Some(GameAction::CursorUp));
        assert_eq!(key(KeyCode::Char('J')), Some(GameAction::CursorDown));

        assert_eq!(key(KeyCode::Char('a')), Some(GameAction::CursorLeft));
        assert_eq!(key(KeyCode::Char('D')), Some(GameAction::CursorRight));
        assert_eq!(key(KeyCode::Char('w')), Some(GameAction::CursorUp));
        assert_eq!(key(KeyCode::Char('S')), Some(GameAction::CursorDown));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(GameAction::Select));
        assert_eq!(key(KeyCode::Enter), Some(GameAction::Select));
        assert_eq!(key(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
