use clap::Parser;
use magpie::cli::Cli;
use magpie::config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    magpie::logging::init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => cli.apply_overrides(c),
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    match magpie::app::run(cli.query(), config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
