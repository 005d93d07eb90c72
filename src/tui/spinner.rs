//! Spinner shown while a search request is in flight.

use crossterm::{
    cursor::{Hide, MoveToColumn, Show},
    queue,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(80);

/// Drive `work` to completion while animating `message` on `out`.
///
/// The spinner line is erased before the output is returned. Write errors
/// only cost the animation, never the result.
pub async fn spin<W, F>(out: &mut W, message: &str, work: F) -> F::Output
where
    W: Write,
    F: Future,
{
    tokio::pin!(work);
    let mut ticker = tokio::time::interval(TICK);
    let mut frame = 0usize;
    let _ = queue!(out, Hide);

    let output = loop {
        tokio::select! {
            biased;
            output = &mut work => break output,
            _ = ticker.tick() => {
                let _ = draw(out, FRAMES[frame % FRAMES.len()], message);
                frame += 1;
            }
        }
    };

    let _ = queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Show);
    let _ = out.flush();
    output
}

fn draw<W: Write>(out: &mut W, frame: &str, message: &str) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(out, "{} {}", frame.cyan(), message.dim())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_work_draws_nothing() {
        let mut out = Vec::new();
        let value = spin(&mut out, "Searching for arch...", async { 7 }).await;
        assert_eq!(value, 7);
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Searching"));
    }

    #[tokio::test]
    async fn slow_work_animates_then_clears() {
        let mut out = Vec::new();
        let value = spin(&mut out, "Searching for arch...", async {
            tokio::time::sleep(Duration::from_millis(250)).await;
            "done"
        })
        .await;
        assert_eq!(value, "done");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Searching for arch..."));
        assert!(text.contains(FRAMES[0]));
        assert!(text.contains(FRAMES[1]));
        // erased last
        assert!(text.ends_with("\x1b[?25h"));
    }
}
