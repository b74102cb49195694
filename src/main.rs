//! streamgrab - find downloadable formats for a YouTube video
//!
//! Paste a watch link, short link, embed link or bare video ID and get the
//! available renditions, best quality first.

use anyhow::{bail, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use streamgrab::backend::{ResolutionController, ResolutionState};
use streamgrab::cli::{self, Actions, InputSource};
use streamgrab::extractor::RapidApiClient;
use streamgrab::utils::ServiceConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "streamgrab", version, about)]
struct Args {
    /// YouTube URL or 11-character video ID; reads lines from stdin if omitted
    input: Option<String>,

    /// Take the input from the clipboard
    #[arg(long)]
    clipboard: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Open the embedded player for the video
    #[arg(long)]
    preview: bool,

    /// Open the N-th listed format (1-based) in the browser
    #[arg(long, value_name = "N")]
    open: Option<usize>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Configuration problems are deployment problems: report before any request
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("Configuration error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: ServiceConfig) -> Result<ExitCode> {
    let client = RapidApiClient::new(config)?;
    let controller = ResolutionController::new(Arc::new(client));
    let mut updates = controller.subscribe();

    let actions = Actions {
        json: args.json,
        preview: args.preview,
        open: args.open,
    };

    let input = match InputSource::select(args.input, args.clipboard) {
        InputSource::Argument(text) => text,
        InputSource::Clipboard => cli::read_clipboard()?,
        InputSource::Stdin => return run_interactive(&controller, &mut updates, &actions).await,
    };

    let state = cli::resolve_once(&controller, &mut updates, &input).await?;
    cli::present(&state, &actions)?;

    Ok(exit_code(&state))
}

async fn run_interactive(
    controller: &ResolutionController,
    updates: &mut tokio::sync::mpsc::UnboundedReceiver<ResolutionState>,
    actions: &Actions,
) -> Result<ExitCode> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = None;

    eprintln!("Paste a YouTube URL or ID (Ctrl-D to quit)");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let state = cli::resolve_once(controller, updates, &line).await?;
        if let Err(e) = cli::present(&state, actions) {
            eprintln!("{}", e);
        }
        last = Some(state);
    }

    match last {
        Some(state) => Ok(exit_code(&state)),
        None => bail!("no input given"),
    }
}

fn exit_code(state: &ResolutionState) -> ExitCode {
    match state {
        ResolutionState::Succeeded { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
