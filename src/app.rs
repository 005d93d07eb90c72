//! The search loop: ask, fetch, pick, copy.

use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::Config;
use crate::error;
use crate::search::{self, IndexClient, SearchResult};
use crate::tui::{self, Entry, Outcome, PromptOptions};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tokio::runtime::Runtime;

const QUERY_MESSAGE: &str = "Which distro are you interested in?";
const RESULTS_MESSAGE: &str = "Choose a torrent";

/// What happened to the chosen magnet link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Copied,
    Printed,
    /// Copy failed; the link was printed instead.
    CopyFailed(String),
}

/// How the search loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finish {
    Picked(Delivery),
    /// The query prompt or the list prompt was dismissed.
    Cancelled,
    NoResults,
    InvalidQuery,
    SearchFailed,
}

impl Finish {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::InvalidQuery | Self::SearchFailed)
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// The interactive half of the loop.
pub trait Frontend {
    /// Ask for a search term; `None` when the user cancels.
    fn read_query(&mut self, message: &str) -> io::Result<Option<String>>;

    fn choose(
        &mut self,
        message: &str,
        entries: Vec<Entry<String>>,
        options: PromptOptions,
    ) -> io::Result<Outcome<String>>;
}

/// Prompts on the controlling terminal.
pub struct TerminalFrontend;

impl Frontend for TerminalFrontend {
    fn read_query(&mut self, message: &str) -> io::Result<Option<String>> {
        tui::read_line(message)
    }

    fn choose(
        &mut self,
        message: &str,
        entries: Vec<Entry<String>>,
        options: PromptOptions,
    ) -> io::Result<Outcome<String>> {
        tui::select(message, entries, options)
    }
}

/// Where search results come from.
pub trait ResultSource {
    fn search(&mut self, query: &str) -> error::Result<Vec<SearchResult>>;
}

/// The index client, driven on a runtime owned by the loop.
///
/// Prompts block on terminal reads, so only the request itself runs on
/// tokio.
pub struct LiveIndex {
    runtime: Runtime,
    client: IndexClient,
}

impl LiveIndex {
    pub fn new(client: IndexClient) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime, client })
    }
}

impl ResultSource for LiveIndex {
    fn search(&mut self, query: &str) -> error::Result<Vec<SearchResult>> {
        let message = format!("Searching for {query}...");
        let mut stderr = io::stderr();
        if stderr.is_terminal() {
            self.runtime
                .block_on(tui::spin(&mut stderr, &message, self.client.search(query)))
        } else {
            eprintln!("{}", message.dim());
            self.runtime.block_on(self.client.search(query))
        }
    }
}

/// Run searches on the terminal until the user picks a result, quits, or
/// something fails.
pub fn run(initial_query: Option<String>, config: Config) -> Result<ExitCode> {
    let client = IndexClient::from_config(&config).context("Failed to build HTTP client")?;
    let mut source = LiveIndex::new(client).context("Failed to start async runtime")?;
    let mut clipboard = SystemClipboard::new();
    let mut stdout = io::stdout();

    let finish = search_loop(
        initial_query,
        &config,
        &mut TerminalFrontend,
        &mut source,
        &mut clipboard,
        &mut stdout,
    )?;
    tracing::debug!(?finish, "search loop finished");
    Ok(finish.exit_code())
}

/// Ask, fetch, pick and deliver; `NewSearch` starts over with a new query
/// and a fresh prompt.
pub fn search_loop<F, S, W>(
    initial_query: Option<String>,
    config: &Config,
    frontend: &mut F,
    source: &mut S,
    clipboard: &mut dyn Clipboard,
    out: &mut W,
) -> Result<Finish>
where
    F: Frontend,
    S: ResultSource,
    W: Write,
{
    let mut next_query = initial_query;

    loop {
        let raw = match next_query.take() {
            Some(query) => query,
            None => match frontend
                .read_query(QUERY_MESSAGE)
                .context("Failed to read query")?
            {
                Some(query) => query,
                None => return Ok(Finish::Cancelled),
            },
        };

        let query = match search::validate_query(&raw, config.max_query_len) {
            Ok(query) => query,
            Err(e) => {
                eprintln!("{e}");
                return Ok(Finish::InvalidQuery);
            }
        };

        let results = match source.search(&query) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                eprintln!("{e}");
                return Ok(Finish::SearchFailed);
            }
        };

        if results.is_empty() {
            writeln!(out, "No results for {query}")?;
            return Ok(Finish::NoResults);
        }

        let entries: Vec<Entry<String>> = results
            .iter()
            .map(|r| search::to_choice(r, config.disable_dead).into())
            .collect();

        let outcome = frontend
            .choose(RESULTS_MESSAGE, entries, config.prompt_options())
            .context("Terminal error")?;
        tracing::debug!(?outcome, "prompt finished");

        match outcome {
            Outcome::Selected(magnet) => {
                let delivery = deliver(out, clipboard, config.copy_to_clipboard, &magnet)?;
                return Ok(Finish::Picked(delivery));
            }
            Outcome::Cancelled => return Ok(Finish::Cancelled),
            Outcome::NewSearch => {}
        }
    }
}

/// Copy or print the magnet link and report it on `out`.
pub fn deliver<W: Write>(
    out: &mut W,
    clipboard: &mut dyn Clipboard,
    copy: bool,
    magnet: &str,
) -> io::Result<Delivery> {
    if !copy {
        writeln!(out, "{magnet}")?;
        return Ok(Delivery::Printed);
    }

    match clipboard.set_text(magnet) {
        Ok(()) => {
            writeln!(out, "Copied {}", magnet.green())?;
            Ok(Delivery::Copied)
        }
        Err(e) => {
            let reason = e.to_string();
            eprintln!("Failed to copy to clipboard: {reason}");
            writeln!(out, "Magnet link: {magnet}")?;
            Ok(Delivery::CopyFailed(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::error::Error;
    use std::collections::VecDeque;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> crate::error::Result<()> {
            Err(Error::Config("no display".to_string()))
        }
    }

    const MAGNET: &str = "magnet:?xt=urn:btih:ABC&dn=x";

    /// Replays queries and prompt outcomes, recording what it was shown.
    #[derive(Default)]
    struct ScriptedFrontend {
        queries: VecDeque<Option<String>>,
        outcomes: VecDeque<Outcome<String>>,
        asked: usize,
        shown: Vec<Vec<String>>,
    }

    impl Frontend for ScriptedFrontend {
        fn read_query(&mut self, message: &str) -> io::Result<Option<String>> {
            assert_eq!(message, QUERY_MESSAGE);
            self.asked += 1;
            self.queries
                .pop_front()
                .ok_or_else(|| io::Error::other("no query scripted"))
        }

        fn choose(
            &mut self,
            message: &str,
            entries: Vec<Entry<String>>,
            _options: PromptOptions,
        ) -> io::Result<Outcome<String>> {
            assert_eq!(message, RESULTS_MESSAGE);
            self.shown.push(
                entries
                    .iter()
                    .filter_map(Entry::as_choice)
                    .map(|c| c.name.clone())
                    .collect(),
            );
            self.outcomes
                .pop_front()
                .ok_or_else(|| io::Error::other("no outcome scripted"))
        }
    }

    /// Answers searches in order, recording the queries.
    #[derive(Default)]
    struct ScriptedIndex {
        responses: VecDeque<error::Result<Vec<SearchResult>>>,
        queries: Vec<String>,
    }

    impl ResultSource for ScriptedIndex {
        fn search(&mut self, query: &str) -> error::Result<Vec<SearchResult>> {
            self.queries.push(query.to_string());
            self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn torrent(name: &str) -> SearchResult {
        SearchResult {
            info_hash: "ABC".to_string(),
            name: name.to_string(),
            seeders: "12".to_string(),
            leechers: "3".to_string(),
            size: "1024".to_string(),
            added: "1700000000".to_string(),
            id: None,
            num_files: None,
            username: None,
            status: None,
            category: None,
            imdb: None,
        }
    }

    struct Run {
        finish: Finish,
        frontend: ScriptedFrontend,
        index: ScriptedIndex,
        clipboard: MemoryClipboard,
        out: String,
    }

    fn run_scripted(
        initial: Option<&str>,
        config: &Config,
        mut frontend: ScriptedFrontend,
        mut index: ScriptedIndex,
    ) -> Run {
        let mut clipboard = MemoryClipboard::default();
        let mut out = Vec::new();
        let finish = search_loop(
            initial.map(str::to_string),
            config,
            &mut frontend,
            &mut index,
            &mut clipboard,
            &mut out,
        )
        .unwrap();
        Run {
            finish,
            frontend,
            index,
            clipboard,
            out: String::from_utf8(out).unwrap(),
        }
    }

    #[test]
    fn new_search_asks_again_with_a_fresh_prompt() {
        let frontend = ScriptedFrontend {
            queries: VecDeque::from([Some("debian".to_string())]),
            outcomes: VecDeque::from([
                Outcome::NewSearch,
                Outcome::Selected("magnet:?xt=urn:btih:DEB".to_string()),
            ]),
            ..ScriptedFrontend::default()
        };
        let index = ScriptedIndex {
            responses: VecDeque::from([
                Ok(vec![torrent("Ubuntu 24.04")]),
                Ok(vec![torrent("Debian 12"), torrent("Debian 11")]),
            ]),
            ..ScriptedIndex::default()
        };

        let run = run_scripted(Some("ubuntu"), &Config::default(), frontend, index);
        assert_eq!(run.finish, Finish::Picked(Delivery::Copied));
        assert!(run.finish.is_success());
        assert_eq!(run.index.queries, ["ubuntu", "debian"]);
        assert_eq!(run.frontend.asked, 1);
        assert_eq!(run.frontend.shown.len(), 2);
        assert_eq!(run.frontend.shown[0].len(), 1);
        assert_eq!(run.frontend.shown[1].len(), 2);
        assert!(run.frontend.shown[1][0].contains("Debian 12"));
        assert_eq!(
            run.clipboard.contents.as_deref(),
            Some("magnet:?xt=urn:btih:DEB")
        );
    }

    #[test]
    fn invalid_query_fails_without_searching() {
        let config = Config {
            max_query_len: 5,
            ..Config::default()
        };
        for query in ["   ", "far too long"] {
            let run = run_scripted(
                Some(query),
                &config,
                ScriptedFrontend::default(),
                ScriptedIndex::default(),
            );
            assert_eq!(run.finish, Finish::InvalidQuery);
            assert!(!run.finish.is_success());
            assert!(run.index.queries.is_empty());
        }
    }

    #[test]
    fn no_results_is_a_clean_exit() {
        let run = run_scripted(
            Some("  gentoo "),
            &Config::default(),
            ScriptedFrontend::default(),
            ScriptedIndex::default(),
        );
        assert_eq!(run.finish, Finish::NoResults);
        assert!(run.finish.is_success());
        assert_eq!(run.out, "No results for gentoo\n");
        assert!(run.frontend.shown.is_empty());
    }

    #[test]
    fn fetch_error_fails() {
        let index = ScriptedIndex {
            responses: VecDeque::from([Err(Error::Api {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })]),
            ..ScriptedIndex::default()
        };
        let run = run_scripted(Some("arch"), &Config::default(), ScriptedFrontend::default(), index);
        assert_eq!(run.finish, Finish::SearchFailed);
        assert!(!run.finish.is_success());
        assert!(run.frontend.shown.is_empty());
    }

    #[test]
    fn cancelling_either_prompt_is_a_clean_exit() {
        let frontend = ScriptedFrontend {
            queries: VecDeque::from([None]),
            ..ScriptedFrontend::default()
        };
        let run = run_scripted(None, &Config::default(), frontend, ScriptedIndex::default());
        assert_eq!(run.finish, Finish::Cancelled);
        assert!(run.index.queries.is_empty());

        let frontend = ScriptedFrontend {
            outcomes: VecDeque::from([Outcome::Cancelled]),
            ..ScriptedFrontend::default()
        };
        let index = ScriptedIndex {
            responses: VecDeque::from([Ok(vec![torrent("Fedora 40")])]),
            ..ScriptedIndex::default()
        };
        let run = run_scripted(Some("fedora"), &Config::default(), frontend, index);
        assert_eq!(run.finish, Finish::Cancelled);
        assert!(run.finish.is_success());
        assert!(run.clipboard.contents.is_none());
        assert!(run.out.is_empty());
    }

    #[test]
    fn print_only_skips_the_clipboard() {
        let config = Config {
            copy_to_clipboard: false,
            ..Config::default()
        };
        let frontend = ScriptedFrontend {
            outcomes: VecDeque::from([Outcome::Selected(MAGNET.to_string())]),
            ..ScriptedFrontend::default()
        };
        let index = ScriptedIndex {
            responses: VecDeque::from([Ok(vec![torrent("Mint 22")])]),
            ..ScriptedIndex::default()
        };
        let run = run_scripted(Some("mint"), &config, frontend, index);
        assert_eq!(run.finish, Finish::Picked(Delivery::Printed));
        assert_eq!(run.out, format!("{MAGNET}\n"));
        assert!(run.clipboard.contents.is_none());
    }

    #[test]
    fn live_index_blocks_on_its_own_runtime() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let _ = request.respond(tiny_http::Response::from_string("[]"));
            }
        });
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = IndexClient::with_client(http, format!("http://{addr}/q.php"));

        let mut index = LiveIndex::new(client).unwrap();
        assert!(index.search("void linux").unwrap().is_empty());
    }

    #[test]
    fn copies_when_enabled() {
        let mut out = Vec::new();
        let mut clipboard = MemoryClipboard::default();
        let delivery = deliver(&mut out, &mut clipboard, true, MAGNET).unwrap();
        assert_eq!(delivery, Delivery::Copied);
        assert_eq!(clipboard.contents.as_deref(), Some(MAGNET));
        assert!(String::from_utf8(out).unwrap().starts_with("Copied "));
    }

    #[test]
    fn prints_when_copy_disabled() {
        let mut out = Vec::new();
        let mut clipboard = MemoryClipboard::default();
        let delivery = deliver(&mut out, &mut clipboard, false, MAGNET).unwrap();
        assert_eq!(delivery, Delivery::Printed);
        assert!(clipboard.contents.is_none());
        assert_eq!(String::from_utf8(out).unwrap(), format!("{MAGNET}\n"));
    }

    #[test]
    fn falls_back_to_printing() {
        let mut out = Vec::new();
        let delivery = deliver(&mut out, &mut BrokenClipboard, true, MAGNET).unwrap();
        assert!(matches!(delivery, Delivery::CopyFailed(reason) if reason.contains("no display")));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Magnet link: {MAGNET}\n")
        );
    }
}
