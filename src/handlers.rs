//! Keyboard input handling for the job table.
//!
//! Contains the KeyAction enum telling the event loop what to do after a key
//! press, and the handler that applies navigation to the viewport.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::ViewportState;

/// Result of handling a key event.
/// Tells the main loop what action to take after the handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed; the next iteration refreshes the table
    None,
    /// Exit the application
    Quit,
    /// Ask to cancel the selected job (Ctrl+K)
    CancelJob,
    /// Show details for the selected job (Ctrl+L). For now this is a
    /// placeholder popup with the job id and name only.
    ShowInfo,
}

/// Handle a key press in the table view.
///
/// Up/Down move the selection and scroll the viewport; everything else is
/// mapped to a [`KeyAction`] for the loop to carry out.
pub fn handle_key(
    key: &KeyEvent,
    viewport: &mut ViewportState,
    row_count: usize,
    visible_height: usize,
) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') if !ctrl => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,

        KeyCode::Up => {
            viewport.move_up();
            KeyAction::None
        }
        KeyCode::Down => {
            viewport.move_down(row_count, visible_height);
            KeyAction::None
        }

        KeyCode::Char('k') if ctrl => KeyAction::CancelJob,
        KeyCode::Char('l') if ctrl => KeyAction::ShowInfo,

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ctrl, key};

    #[test]
    fn test_quit_keys() {
        let mut vp = ViewportState::default();
        assert_eq!(handle_key(&key(KeyCode::Char('q')), &mut vp, 0, 10), KeyAction::Quit);
        assert_eq!(handle_key(&ctrl('c'), &mut vp, 0, 10), KeyAction::Quit);
        assert_eq!(handle_key(&key(KeyCode::Char('Q')), &mut vp, 0, 10), KeyAction::None);
    }

    #[test]
    fn test_control_chords() {
        let mut vp = ViewportState::default();
        assert_eq!(handle_key(&ctrl('k'), &mut vp, 3, 10), KeyAction::CancelJob);
        assert_eq!(handle_key(&ctrl('l'), &mut vp, 3, 10), KeyAction::ShowInfo);
        assert_eq!(handle_key(&key(KeyCode::Char('k')), &mut vp, 3, 10), KeyAction::None);
        assert_eq!(handle_key(&ctrl('r'), &mut vp, 3, 10), KeyAction::None);
    }

    #[test]
    fn test_arrows_move_selection() {
        let mut vp = ViewportState::default();
        handle_key(&key(KeyCode::Down), &mut vp, 3, 10);
        handle_key(&key(KeyCode::Down), &mut vp, 3, 10);
        handle_key(&key(KeyCode::Down), &mut vp, 3, 10);
        assert_eq!(vp.current_row, 2);
        handle_key(&key(KeyCode::Up), &mut vp, 3, 10);
        assert_eq!(vp.current_row, 1);
    }

    #[test]
    fn test_arrows_on_empty_table() {
        let mut vp = ViewportState::default();
        handle_key(&key(KeyCode::Down), &mut vp, 0, 10);
        handle_key(&key(KeyCode::Up), &mut vp, 0, 10);
        assert_eq!(vp, ViewportState::default());
    }
}
