use crate::error::{Error, Result};
use crate::tui::PromptOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// apibay's JSON search endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://apibay.org/q.php";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search endpoint; the query is sent as the `q` parameter.
    pub api_base_url: String,

    /// Rows visible at once in the result list. Default: 15.
    pub page_size: usize,

    /// Wrap around when moving past either end of the list.
    pub loop_navigation: bool,

    /// Longest accepted query, in characters. Default: 200.
    pub max_query_len: usize,

    /// Whole-request timeout in seconds. Default: 15.
    pub request_timeout_secs: u64,

    /// Copy the chosen magnet link; when false it is only printed.
    pub copy_to_clipboard: bool,

    /// Show results without seeders as disabled rows.
    pub disable_dead: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: crate::tui::prompt::DEFAULT_PAGE_SIZE,
            loop_navigation: true,
            max_query_len: 200,
            request_timeout_secs: 15,
            copy_to_clipboard: true,
            disable_dead: false,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("magpie").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".magpie/config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            page_size: self.page_size,
            wrap: self.loop_navigation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_size, 15);
        assert!(config.loop_navigation);
        assert_eq!(config.max_query_len, 200);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 20\nloop_navigation = false\nunknown = 1").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.page_size, 20);
        assert!(!config.loop_navigation);
        assert!(config.copy_to_clipboard);
        let options = config.prompt_options();
        assert_eq!(options.page_size, 20);
        assert!(!options.wrap);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = \"many\"").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 0").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));
    }
}
