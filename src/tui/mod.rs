//! Terminal prompts: the searchable list prompt, a line prompt and a
//! progress spinner.

pub mod choice;
pub mod frame;
pub mod keys;
pub mod line_input;
pub mod prompt;
mod run;
pub mod spinner;
pub mod terminal;
mod util;

pub use choice::{Choice, Disabled, Entry, PromptValue};
pub use frame::{Frame, render};
pub use keys::{KeyAction, classify};
pub use prompt::{Outcome, PromptOptions, PromptState, Status};
pub use run::{drive_line, drive_select, read_line, select};
pub use spinner::spin;

pub(crate) use util::sanitize_for_display;
