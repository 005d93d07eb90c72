//! Key classification for the list prompt.
//!
//! A physical key can mean different things depending on the mode (`j` moves
//! the cursor, but is text while searching). All of that is decided here, in
//! one place, so the precedence stays auditable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub(crate) fn delta(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpTarget {
    Top,
    Bottom,
}

/// Everything a key press can do to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    NewSearch,
    ToggleHelp,
    EnterSearch,
    ExitSearch,
    Select,
    Navigate(Direction),
    Jump(JumpTarget),
    SearchInput(char),
    SearchBackspace,
    NoOp,
}

/// Mode flags the classifier depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext {
    pub search_mode: bool,
    pub pending: bool,
}

/// Visible ASCII, space included.
fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

/// Map a key event to an action. First matching rule wins.
#[must_use]
pub fn classify(key: &KeyEvent, ctx: KeyContext) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let searching = ctx.search_mode;

    // Raw mode swallows SIGINT
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'C')) {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Char('q' | 'Q') if !searching && ctx.pending => return KeyAction::Quit,
        KeyCode::Char('n' | 'N') if !searching && ctx.pending => return KeyAction::NewSearch,
        KeyCode::Char('?') => return KeyAction::ToggleHelp,
        KeyCode::Char('/') if !searching => return KeyAction::EnterSearch,
        KeyCode::Esc if searching => return KeyAction::ExitSearch,
        KeyCode::Enter => return KeyAction::Select,
        _ => {}
    }

    if searching {
        match key.code {
            KeyCode::Backspace => return KeyAction::SearchBackspace,
            KeyCode::Char(c) if !ctrl && is_printable(c) => return KeyAction::SearchInput(c),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k' | 'K') => KeyAction::Navigate(Direction::Up),
        KeyCode::Down | KeyCode::Char('j' | 'J') => KeyAction::Navigate(Direction::Down),
        KeyCode::Char('g') if !shift && !searching => KeyAction::Jump(JumpTarget::Top),
        KeyCode::Char('G' | 'g') if !searching => KeyAction::Jump(JumpTarget::Bottom),
        _ => KeyAction::NoOp,
    }
}
