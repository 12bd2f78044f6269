//! Key events driving a session through the cursor, as the binary does.

use crossterm::event::{KeyCode, KeyEvent};

use tui_memory::core::{EventLog, GameConfig, GameSession};
use tui_memory::input::{handle_key_event, Cursor};
use tui_memory::types::GameAction;

struct Harness {
    session: GameSession<EventLog>,
    cursor: Cursor,
}

impl Harness {
    fn new(layout: &[&str]) -> Self {
        let config = GameConfig::default().with_fixed_layout(layout);
        Self {
            cursor: Cursor::new(layout.len()),
            session: GameSession::new(config, EventLog::new()).unwrap(),
        }
    }

    fn press(&mut self, code: KeyCode) {
        match handle_key_event(KeyEvent::from(code)) {
            Some(GameAction::Select) => {
                let _ = self.session.select_card(self.cursor.index());
            }
            Some(GameAction::Restart) => {
                self.session.restart();
                self.cursor.reset();
            }
            Some(action) => {
                self.cursor.apply(action);
            }
            None => {}
        }
    }
}

#[test]
fn test_keyboard_game_on_two_by_two_grid() {
    // a b
    // b a
    let mut h = Harness::new(&["a", "b", "b", "a"]);

    h.press(KeyCode::Char(' '));
    h.press(KeyCode::Right);
    h.press(KeyCode::Down);
    h.press(KeyCode::Enter);
    assert_eq!(h.session.score().move_count, 1);
    h.session.tick(450);

    h.press(KeyCode::Char('k'));
    h.press(KeyCode::Char(' '));
    h.press(KeyCode::Char('h'));
    h.press(KeyCode::Char('j'));
    h.press(KeyCode::Char(' '));

    assert!(h.session.is_won());
    assert_eq!(h.session.score().move_count, 2);
}

#[test]
fn test_restart_key_resets_cursor_and_generation() {
    let mut h = Harness::new(&["a", "b", "b", "a"]);
    h.press(KeyCode::Right);
    h.press(KeyCode::Char('r'));

    assert_eq!(h.cursor.index(), 0);
    assert_eq!(h.session.generation(), 1);
}
