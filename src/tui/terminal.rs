//! Styled text primitives and inline frame painting on top of crossterm.
//!
//! The prompt draws below the shell prompt instead of taking over the
//! alternate screen: each repaint moves back to the first row of the
//! previous frame, clears downward and writes the new frame.

use crate::tui::frame::{CursorDirective, Frame};
use crate::tui::util::{display_width, truncate_to_display_width};
use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    queue,
    style::{Attribute, Color, ContentStyle, StyledContent},
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use std::io::{self, Write};

/// A styled span of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledSpan {
    pub content: String,
    pub style: ContentStyle,
}

impl StyledSpan {
    pub fn new(content: impl Into<String>, style: ContentStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Create an unstyled span.
    pub fn raw(content: impl Into<String>) -> Self {
        Self::new(content, ContentStyle::new())
    }

    /// Create a span with foreground color.
    pub fn colored(content: impl Into<String>, color: Color) -> Self {
        Self::new(
            content,
            ContentStyle {
                foreground_color: Some(color),
                ..ContentStyle::default()
            },
        )
    }

    /// Create a dim span.
    pub fn dim(content: impl Into<String>) -> Self {
        Self::new(
            content,
            ContentStyle {
                attributes: Attribute::Dim.into(),
                ..ContentStyle::default()
            },
        )
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::new(
            content,
            ContentStyle {
                attributes: Attribute::Bold.into(),
                ..ContentStyle::default()
            },
        )
    }

    /// Write this span to a writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let styled = StyledContent::new(self.style, &self.content);
        write!(w, "{styled}")
    }
}

/// A line of styled text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self { spans }
    }

    pub fn empty() -> Self {
        Self { spans: Vec::new() }
    }

    /// Create a line from a single raw string.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            spans: vec![StyledSpan::raw(content)],
        }
    }

    pub fn push(&mut self, span: StyledSpan) {
        self.spans.push(span);
    }

    /// Text without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }

    /// Terminal columns occupied by this line.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| display_width(&s.content)).sum()
    }

    /// Copy of this line cut to at most `max_width` columns.
    #[must_use]
    pub fn truncated(&self, max_width: usize) -> Self {
        let mut remaining = max_width;
        let mut spans = Vec::with_capacity(self.spans.len());
        for span in &self.spans {
            if remaining == 0 {
                break;
            }
            let content = truncate_to_display_width(&span.content, remaining);
            remaining = remaining.saturating_sub(display_width(&content));
            spans.push(StyledSpan::new(content, span.style));
        }
        Self { spans }
    }

    /// Write this line to a writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for span in &self.spans {
            span.write_to(w)?;
        }
        Ok(())
    }
}

/// Builder for creating styled lines.
#[derive(Default)]
pub struct LineBuilder {
    line: StyledLine,
}

impl LineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw (unstyled) span.
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        self.line.push(StyledSpan::raw(content));
        self
    }

    /// Add a colored span.
    pub fn colored(mut self, content: impl Into<String>, color: Color) -> Self {
        self.line.push(StyledSpan::colored(content, color));
        self
    }

    /// Add a dim span.
    pub fn dim(mut self, content: impl Into<String>) -> Self {
        self.line.push(StyledSpan::dim(content));
        self
    }

    pub fn bold(mut self, content: impl Into<String>) -> Self {
        self.line.push(StyledSpan::bold(content));
        self
    }

    /// Add a styled span.
    pub fn styled(mut self, span: StyledSpan) -> Self {
        self.line.push(span);
        self
    }

    /// Build the line.
    pub fn build(self) -> StyledLine {
        self.line
    }
}

/// Repaints frames in place, remembering how many rows the last one used.
#[derive(Debug, Default)]
pub struct FramePainter {
    rows: u16,
}

impl FramePainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the previous frame with `frame`.
    ///
    /// Lines are cut to `width - 1` columns so nothing soft-wraps, and only
    /// the bottom `height` lines are drawn so the previous frame can always
    /// be reached with cursor movement.
    #[allow(clippy::cast_possible_truncation)]
    pub fn paint<W: Write>(
        &mut self,
        w: &mut W,
        frame: &Frame,
        width: u16,
        height: u16,
    ) -> io::Result<()> {
        queue!(w, BeginSynchronizedUpdate)?;
        self.clear(w)?;

        let lines = frame.lines();
        let skip = lines.len().saturating_sub(height.max(1) as usize);
        let max_width = width.saturating_sub(1) as usize;
        let mut rows = 0u16;
        for (i, line) in lines.iter().skip(skip).enumerate() {
            if i > 0 {
                write!(w, "\r\n")?;
            }
            line.truncated(max_width).write_to(w)?;
            rows += 1;
        }
        self.rows = rows;

        match frame.cursor {
            CursorDirective::Hide => queue!(w, Hide)?,
            CursorDirective::Show => {
                write!(w, "\r\n")?;
                queue!(w, Show)?;
                self.rows = 0;
            }
        }

        queue!(w, EndSynchronizedUpdate)?;
        w.flush()
    }

    /// Erase the last painted frame and park the cursor at its first row.
    pub fn clear<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        if self.rows > 1 {
            queue!(w, MoveUp(self.rows - 1))?;
        }
        queue!(w, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        self.rows = 0;
        Ok(())
    }
}
