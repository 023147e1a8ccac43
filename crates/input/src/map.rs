//! Key mapping from terminal events to game actions.
//!
//! The same key can mean different things depending on the phase: Space flaps
//! while playing and starts a round otherwise.

use crate::types::{GameAction, GamePhase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a game action for the current phase.
pub fn handle_key_event(key: KeyEvent, phase: GamePhase) -> Option<GameAction> {
    // Terminals with enhanced keyboard reporting also send releases; only presses count.
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Char(' ')
        | KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => {
            if phase.is_playing() {
                Some(GameAction::Jump)
            } else {
                Some(GameAction::Start)
            }
        }

        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_flap_keys_jump_while_playing() {
        for code in [
            KeyCode::Char(' '),
            KeyCode::Up,
            KeyCode::Char('w'),
            KeyCode::Char('K'),
        ] {
            assert_eq!(
                handle_key_event(KeyEvent::from(code), GamePhase::Playing),
                Some(GameAction::Jump)
            );
        }
    }

    #[test]
    fn test_flap_keys_start_between_rounds() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' ')), GamePhase::Idle),
            Some(GameAction::Start)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up), GamePhase::Ended),
            Some(GameAction::Start)
        );
    }

    #[test]
    fn test_restart_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter), GamePhase::Ended),
            Some(GameAction::Start)
        );
        // Start while playing is ignored by the state machine, not here.
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r')), GamePhase::Playing),
            Some(GameAction::Start)
        );
    }

    #[test]
    fn test_unmapped_and_release_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('x')), GamePhase::Playing),
            None
        );
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release, GamePhase::Playing), None);
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
                GamePhase::Playing
            ),
            None
        );
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
        assert!(!should_quit(KeyEvent::from(KeyCode::Char(' '))));
    }
}
