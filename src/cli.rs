//! Command-line arguments.

use crate::config::Config;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Search a torrent index and copy the chosen magnet link to the clipboard
#[derive(Parser, Debug)]
#[command(name = "magpie", version, about)]
pub struct Cli {
    /// Search term; asked for interactively when omitted
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Rows visible at once in the result list
    #[arg(short = 'p', long = "page-size", value_name = "ROWS")]
    pub page_size: Option<NonZeroUsize>,

    /// Stop at the ends of the list instead of wrapping around
    #[arg(long = "no-loop")]
    pub no_loop: bool,

    /// Print the magnet link instead of copying it
    #[arg(long = "print")]
    pub print_only: bool,

    /// Config file (default: <config dir>/magpie/config.toml)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Query words joined with spaces, if any were given.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }

    /// Apply flag overrides on top of the loaded config.
    #[must_use]
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(page_size) = self.page_size {
            config.page_size = page_size.get();
        }
        if self.no_loop {
            config.loop_navigation = false;
        }
        if self.print_only {
            config.copy_to_clipboard = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments() {
        let cli = Cli::try_parse_from(["magpie"]).unwrap();
        assert_eq!(cli.query(), None);
        let config = cli.apply_overrides(Config::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn query_words_are_joined() {
        let cli = Cli::try_parse_from(["magpie", "linux", "mint"]).unwrap();
        assert_eq!(cli.query().as_deref(), Some("linux mint"));
    }

    #[test]
    fn flags_override_config() {
        let cli =
            Cli::try_parse_from(["magpie", "-p", "30", "--no-loop", "--print", "arch"]).unwrap();
        let config = cli.apply_overrides(Config::default());
        assert_eq!(config.page_size, 30);
        assert!(!config.loop_navigation);
        assert!(!config.copy_to_clipboard);
        assert_eq!(cli.query().as_deref(), Some("arch"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["magpie", "--page-size", "0"]).is_err());
    }
}
