#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod search;
pub mod tui;
