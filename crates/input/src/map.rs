//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Presses and terminal auto-repeats both trigger the action (keydown semantics);
/// releases never do. Letter keys are case-insensitive.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Char(c) => action_for_char(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Letter bindings: vim (hjkl) and WASD share the arrow roles.
fn action_for_char(c: char) -> Option<GameAction> {
    let action = match c {
        'h' | 'a' => GameAction::MoveLeft,
        'l' | 'd' => GameAction::MoveRight,
        'j' | 's' => GameAction::SoftDrop,
        'k' | 'w' => GameAction::Rotate,
        ' ' => GameAction::HardDrop,
        'c' => GameAction::Hold,
        _ => return None,
    };
    Some(action)
}

/// Check if key should quit the game (q, Esc or Ctrl-C).
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
