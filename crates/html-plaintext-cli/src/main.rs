//! `html-plaintext`: convert HTML from a file or stdin to readable plain text.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use html_plaintext::{LinkAnnotation, PlainTextOptions, PlainTextService, DEFAULT_HR};
use log::{debug, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LinksArg {
    /// Annotate every absolute link
    Always,
    /// Skip links whose text already is the URL
    Deduplicated,
}

impl From<LinksArg> for LinkAnnotation {
    fn from(arg: LinksArg) -> Self {
        match arg {
            LinksArg::Always => LinkAnnotation::Always,
            LinksArg::Deduplicated => LinkAnnotation::Deduplicated,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "html-plaintext", version, about = "Convert HTML to readable plain text")]
struct Cli {
    /// Input HTML file; reads stdin when absent or "-"
    input: Option<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Link annotation policy
    #[arg(long, value_enum, default_value = "deduplicated")]
    links: LinksArg,

    /// Horizontal rule emitted for <hr>
    #[arg(long, default_value = DEFAULT_HR)]
    hr: String,

    /// Skip elements with this tag along with their content (repeatable)
    #[arg(long, value_name = "TAG")]
    ignore: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let html = read_input(cli.input.as_ref())?;

    let mut service = PlainTextService::with_options(PlainTextOptions {
        hr: cli.hr,
        link_annotation: cli.links.into(),
        ..Default::default()
    });
    for tag in &cli.ignore {
        service.ignore(tag);
    }

    let mut text = service
        .plain_text_html(&html)
        .context("failed to convert HTML")?;
    if !text.is_empty() {
        text.push('\n');
    }
    debug!("converted {} bytes of HTML to {} bytes of text", html.len(), text.len());

    match cli.output {
        Some(path) => {
            fs::write(&path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            info!("reading {}", path.display());
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
