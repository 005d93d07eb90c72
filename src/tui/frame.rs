//! Rendering of a `PromptState` into a frame of styled lines.
//!
//! `render` is pure; painting the frame on a terminal is
//! [`crate::tui::terminal::FramePainter`]'s job, and tests read it back with
//! [`Frame::plain`].

use crate::tui::choice::Entry;
use crate::tui::prompt::{PromptState, Status};
use crate::tui::terminal::{LineBuilder, StyledLine, StyledSpan};
use crossterm::style::Color;

const POINTER: &str = "❯";
const POINTER_SMALL: &str = "›";
const RULE_WIDTH: usize = 60;

const KEYBINDINGS: &[(&str, &str)] = &[
    ("j/k (↓/↑)", "Navigate results"),
    ("g/G", "Jump to top/bottom"),
    ("/", "Start search/filter"),
    ("Esc", "Exit search mode"),
    ("Enter", "Select result"),
    ("n", "New search"),
    ("q", "Quit"),
    ("?", "Toggle this help"),
];

/// Whether the terminal cursor should be visible after painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorDirective {
    #[default]
    Hide,
    /// Restore the cursor and move past the frame; the prompt is finished.
    Show,
}

/// One rendered prompt, kept in named parts until it is painted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Full keybinding legend, empty unless toggled on.
    pub legend: Vec<StyledLine>,
    /// "Press ? for help", shown while the legend is hidden.
    pub hint: Option<StyledLine>,
    /// Status prefix and message.
    pub header: StyledLine,
    pub search_bar: Option<StyledLine>,
    pub body: Vec<StyledLine>,
    /// Result counter while searching.
    pub footer: Option<StyledLine>,
    pub cursor: CursorDirective,
}

impl Frame {
    /// All lines in display order.
    pub fn lines(&self) -> Vec<StyledLine> {
        let mut lines = self.legend.clone();
        if let Some(hint) = &self.hint {
            lines.push(hint.clone());
            lines.push(StyledLine::empty());
        }
        lines.push(self.header.clone());
        if let Some(search_bar) = &self.search_bar {
            lines.push(search_bar.clone());
            lines.push(StyledLine::empty());
        }
        lines.extend(self.body.iter().cloned());
        if let Some(footer) = &self.footer {
            lines.push(footer.clone());
        }
        lines
    }

    /// Frame as unstyled text, one line per row.
    pub fn plain(&self) -> String {
        self.lines()
            .iter()
            .map(StyledLine::plain)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render the prompt state.
pub fn render<V>(state: &PromptState<V>) -> Frame {
    let searching = state.search_mode();
    Frame {
        legend: if state.show_help() {
            legend()
        } else {
            Vec::new()
        },
        hint: (!state.show_help())
            .then(|| StyledLine::new(vec![StyledSpan::dim("Press ? for help")])),
        header: header(state.status(), state.message()),
        search_bar: searching.then(|| {
            StyledLine::new(vec![StyledSpan::colored(
                format!("Search: {}{POINTER_SMALL}", state.search_term()),
                Color::Yellow,
            )])
        }),
        body: body(state),
        footer: searching.then(|| {
            StyledLine::new(vec![StyledSpan::dim(format!(
                "Showing {} of {} results",
                state.filtered_len(),
                state.total_len()
            ))])
        }),
        cursor: if state.status().is_terminal() {
            CursorDirective::Show
        } else {
            CursorDirective::Hide
        },
    }
}

fn legend() -> Vec<StyledLine> {
    let rule = || StyledLine::new(vec![StyledSpan::dim("━".repeat(RULE_WIDTH))]);
    let mut lines = vec![
        rule(),
        StyledLine::new(vec![StyledSpan::colored("  Keybindings:", Color::Cyan)]),
    ];
    lines.extend(KEYBINDINGS.iter().map(|(keys, what)| {
        StyledLine::new(vec![StyledSpan::dim(format!("  {keys:<12}{what}"))])
    }));
    lines.push(rule());
    lines.push(StyledLine::empty());
    lines
}

fn header(status: Status, message: &str) -> StyledLine {
    let prefix = match status {
        Status::Pending => StyledSpan::colored("?", Color::Blue),
        Status::Done => StyledSpan::colored("✔", Color::Green),
        Status::Cancelled => StyledSpan::colored("✖", Color::Red),
        Status::NewSearch => StyledSpan::colored("↻", Color::Yellow),
    };
    LineBuilder::new()
        .styled(prefix)
        .raw(" ")
        .bold(message)
        .build()
}

fn body<V>(state: &PromptState<V>) -> Vec<StyledLine> {
    if state.filtered_len() == 0 {
        let mut lines = vec![StyledLine::new(vec![StyledSpan::colored(
            "  No results found",
            Color::Yellow,
        )])];
        if state.search_mode() {
            lines.push(StyledLine::new(vec![StyledSpan::dim(
                "  Press Backspace to modify search or Esc to clear",
            )]));
        }
        return lines;
    }

    state
        .visible_range()
        .filter_map(|index| state.entry_at(index).map(|entry| (index, entry)))
        .map(|(index, entry)| row(entry, index == state.cursor()))
        .collect()
}

fn row<V>(entry: &Entry<V>, active: bool) -> StyledLine {
    match entry {
        Entry::Separator(text) => StyledLine::new(vec![StyledSpan::dim(format!(" {text}"))]),
        Entry::Choice(choice) => match &choice.disabled {
            Some(disabled) => StyledLine::new(vec![StyledSpan::dim(format!(
                "  {} {}",
                choice.name,
                disabled.label()
            ))]),
            None if active => StyledLine::new(vec![StyledSpan::colored(
                format!("{POINTER} {}", choice.name),
                Color::Cyan,
            )]),
            None => StyledLine::raw(format!("  {}", choice.name)),
        },
    }
}
