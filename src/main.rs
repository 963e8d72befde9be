use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use snoop::{SearchModel, Snooper};
use snoop_core::config::Config;
use snoop_core::{OutputFormat, Sink};
use snoop_feeds::{FileSource, QuerySource, StdinSource};

#[derive(Parser)]
#[command(name = "snoop", about = "Snoop: report interesting queries from a query log")]
struct Cli {
    /// Query file, one query per line. Use `-` to read stdin.
    path: PathBuf,

    /// Config file to use instead of ~/.config/snoop/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for notifications: text or jsonl.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Keyword for every `contains` rule.
    #[arg(long)]
    keyword: Option<String>,

    /// Threshold for every `longer_than` rule.
    #[arg(long)]
    min_length: Option<usize>,

    /// Print a pass summary to stderr when done.
    #[arg(long)]
    summary: bool,

    /// Write debug logs to /tmp/snoop-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(keyword) = &cli.keyword {
        config.override_keyword(keyword);
    }
    if let Some(length) = cli.min_length {
        config.override_min_length(length);
    }
    let format = cli.format.unwrap_or(config.output.format);

    if cli.path.as_os_str() == "-" {
        search(StdinSource::new(), &config, format, cli.summary)
    } else {
        search(FileSource::new(&cli.path), &config, format, cli.summary)
    }
}

fn search<S: QuerySource>(
    source: S,
    config: &Config,
    format: OutputFormat,
    print_summary: bool,
) -> anyhow::Result<ExitCode> {
    let mut model = SearchModel::new(source);
    Snooper::attach(&mut model, &config.rules, &Sink::stdout(), format)?;

    let summary = match model.pretend_to_search() {
        Ok(summary) => summary,
        Err(err) => {
            tracing::error!(error = %err, "search pass aborted");
            return Err(err.into());
        }
    };

    if print_summary {
        eprintln!("snoop: {summary}");
    }
    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!(failures = summary.observer_failures, "observers failed during pass");
        Ok(ExitCode::from(2))
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load_from(path)?),
        None => Ok(Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to built-in config");
            Config::defaults()
        })),
    }
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/snoop-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("snoop debug log started: tail -f /tmp/snoop-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
