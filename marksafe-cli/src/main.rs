use std::io;

use clap::{Parser, Subcommand};

mod error;

mod subcommands {
    pub mod embed;
    pub mod escape;
}

/// Escape text for Markdown output and convert embedded media to Markdown
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Escape(subcommands::escape::Args),
    Embed(subcommands::embed::Args),
}

/// Log to stderr, only when `MARKSAFE_LOG` is set.
///
/// `info` reports elements no rule converted, `debug` adds each file read and
/// each rule that produced a replacement, `trace` adds every delimited span kept
/// verbatim.
fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let Ok(directives) = std::env::var("MARKSAFE_LOG") else {
        return;
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::IsTerminal::is_terminal(&io::stderr()))
        .with_timer(tracing_subscriber::fmt::time::Uptime::default())
        .with_filter(log_filter(&directives));

    tracing_subscriber::registry().with(layer).init();
}

/// Filter for the `MARKSAFE_LOG` directives. Directives that fail to parse are
/// skipped, and `info` applies when none are left.
fn log_filter(directives: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn main() -> miette::Result<()> {
    setup_logging();

    let cli = Cli::parse();
    match &cli.command {
        Command::Escape(args) => subcommands::escape::run(args)?,
        Command::Embed(args) => subcommands::embed::run(args)?,
    }

    Ok(())
}
