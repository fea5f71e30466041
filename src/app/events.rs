//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;
use crate::compose::{DraftSession, Trigger};

/// Handle a key press
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
            state.should_quit = true;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => submit(state),
        (KeyModifiers::CONTROL, KeyCode::Char('t')) => state.next_theme(),
        // Plain Ctrl or Alt chords are shortcuts; Ctrl+Alt together is AltGr
        (m, _) if m.contains(KeyModifiers::CONTROL) != m.contains(KeyModifiers::ALT) => {}

        (_, KeyCode::Char(c)) => edit(state, |d| d.insert_char(c)),
        (_, KeyCode::Enter) => edit(state, |d| d.insert_char('\n')),
        (_, KeyCode::Backspace) => edit(state, DraftSession::backspace),
        (_, KeyCode::Delete) => edit(state, DraftSession::delete),
        (_, KeyCode::Left) => state.draft.move_left(),
        (_, KeyCode::Right) => state.draft.move_right(),
        (_, KeyCode::Home) => state.draft.move_home(),
        (_, KeyCode::End) => state.draft.move_end(),
        _ => {}
    }
}

/// Handle pasted text
///
/// Tabs have no display width in the terminal, so they become spaces.
pub fn handle_paste(state: &mut AppState, text: &str) {
    let text = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "    ");
    edit(state, |d| d.insert_str(&text));
}

fn edit(state: &mut AppState, f: impl FnOnce(&mut DraftSession)) {
    f(&mut state.draft);
    state.clear_status();
}

fn submit(state: &mut AppState) {
    match state.flow.begin(&state.draft) {
        Trigger::Send(text) => {
            state.clear_status();
            state.pending_submit = Some(text);
        }
        // Blank drafts and busy flows are silently ignored
        Trigger::Blank | Trigger::Busy => {}
    }
}
