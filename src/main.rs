use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use readme_toc::{Config, DEFAULT_CONFIG_FILE, Mode, Outcome};
use tracing_subscriber::EnvFilter;

/// Exit code when `--check` finds an out-of-date document.
const EXIT_STALE: u8 = 4;

#[derive(Parser)]
#[command(name = "readme-toc")]
#[command(about = "Regenerate a README table of contents from a topic tree")]
struct Cli {
    /// Config file (defaults to ./readme-toc.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix for every generated link
    #[arg(long)]
    base_url: Option<String>,

    /// Topic tree file
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Document containing the TOC markers
    #[arg(long)]
    document: Option<PathBuf>,

    #[arg(long)]
    start_marker: Option<String>,

    #[arg(long)]
    end_marker: Option<String>,

    /// Fail if the document is out of date instead of rewriting it
    #[arg(long, conflicts_with = "print")]
    check: bool,

    /// Print the generated TOC instead of writing the document
    #[arg(long)]
    print: bool,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else if self.print {
            Mode::Print
        } else {
            Mode::Write
        }
    }

    fn apply_overrides(self, mut config: Config) -> Config {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(tree) = self.tree {
            config.tree_path = tree;
        }
        if let Some(document) = self.document {
            config.doc_path = document;
        }
        if let Some(marker) = self.start_marker {
            config.start_marker = marker;
        }
        if let Some(marker) = self.end_marker {
            config.end_marker = marker;
        }
        config
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mode = cli.mode();

    // Load config
    let loaded = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    };
    let config = match loaded {
        Ok(config) => cli.apply_overrides(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let report = match readme_toc::run(&config, mode) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let doc = config.doc_path.display();
    match report.outcome {
        Outcome::Updated => {
            println!("Updated table of contents in {} ({} entries)", doc, report.entries);
        }
        Outcome::Unchanged => {
            println!("Table of contents in {} is up to date", doc);
        }
        Outcome::Stale => {
            println!("Table of contents in {} is out of date", doc);
            return ExitCode::from(EXIT_STALE);
        }
        Outcome::Printed => {
            println!("{}", report.toc);
        }
    }

    ExitCode::SUCCESS
}
