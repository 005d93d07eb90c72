//! Blocking event loops for the prompts.
//!
//! Both loops are generic over the event source and writer so they can be
//! driven by scripted events in tests; `select` and `read_line` plug in
//! crossterm's stdin reader and stdout.

use crate::tui::choice::{Entry, PromptValue};
use crate::tui::frame;
use crate::tui::line_input::{LineEvent, LineInputState};
use crate::tui::prompt::{Outcome, PromptOptions, PromptState};
use crate::tui::terminal::{FramePainter, LineBuilder};
use crate::tui::util::display_width;
use crossterm::{
    cursor::{MoveToColumn, Show},
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::Color,
    terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, Write};

/// Raw mode for the lifetime of the guard; the cursor is restored on drop.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Show);
    }
}

fn stdin_events() -> impl Iterator<Item = io::Result<Event>> {
    std::iter::from_fn(|| Some(event::read()))
}

/// Key presses only; release events would double every keystroke on
/// terminals that report them.
fn as_press(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(key),
        _ => None,
    }
}

/// Show the list prompt on the terminal and block until it resolves.
pub fn select<V: Clone + PromptValue>(
    message: &str,
    entries: Vec<Entry<V>>,
    options: PromptOptions,
) -> io::Result<Outcome<V>> {
    let mut state = PromptState::new(message, entries).with_options(options);
    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    let size = terminal::size()?;
    drive_select(&mut state, stdin_events(), &mut stdout, size)?
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "terminal input closed"))
}

/// Feed `events` to the prompt, repainting after each one.
///
/// Returns `None` when the events run out before the prompt resolves.
pub fn drive_select<V, E, W>(
    state: &mut PromptState<V>,
    events: E,
    out: &mut W,
    size: (u16, u16),
) -> io::Result<Option<Outcome<V>>>
where
    V: Clone + PromptValue,
    E: IntoIterator<Item = io::Result<Event>>,
    W: Write,
{
    let (mut width, mut height) = size;
    let mut painter = FramePainter::new();
    painter.paint(out, &frame::render(state), width, height)?;

    for event in events {
        let event = event?;
        let outcome = match &event {
            Event::Resize(w, h) => {
                width = *w;
                height = *h;
                None
            }
            other => match as_press(other) {
                Some(key) => state.handle_key(key),
                None => continue,
            },
        };
        painter.paint(out, &frame::render(state), width, height)?;
        if let Some(outcome) = outcome {
            tracing::debug!(status = ?state.status(), "list prompt resolved");
            return Ok(Some(outcome));
        }
    }
    Ok(None)
}

/// Ask for a line of text. `None` when the user cancels.
pub fn read_line(message: &str) -> io::Result<Option<String>> {
    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    drive_line(message, stdin_events(), &mut stdout)
}

/// Line editing loop behind [`read_line`].
pub fn drive_line<E, W>(message: &str, events: E, out: &mut W) -> io::Result<Option<String>>
where
    E: IntoIterator<Item = io::Result<Event>>,
    W: Write,
{
    let mut input = LineInputState::new();
    paint_line(out, message, &input)?;

    for event in events {
        let event = event?;
        let Some(key) = as_press(&event) else {
            continue;
        };
        match input.handle_key(key) {
            LineEvent::Continue => paint_line(out, message, &input)?,
            LineEvent::Submit(text) => {
                write!(out, "\r\n")?;
                out.flush()?;
                return Ok(Some(text));
            }
            LineEvent::Cancel => {
                write!(out, "\r\n")?;
                out.flush()?;
                return Ok(None);
            }
        }
    }
    Ok(None)
}

#[allow(clippy::cast_possible_truncation)]
fn paint_line<W: Write>(out: &mut W, message: &str, input: &LineInputState) -> io::Result<()> {
    let line = LineBuilder::new()
        .colored("?", Color::Blue)
        .raw(" ")
        .bold(message)
        .raw(" ")
        .raw(input.text())
        .build();
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    line.write_to(out)?;

    let before_cursor: String = input.text().chars().take(input.cursor()).collect();
    let column = display_width(message) + 3 + display_width(&before_cursor);
    queue!(out, MoveToColumn(column.min(u16::MAX as usize) as u16))?;
    out.flush()
}
