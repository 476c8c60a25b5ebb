use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use versesearch_core::{Config, NormalizedReference, Output, Session, Translation, VerseClient};

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "versesearch", version)]
#[command(about = "Look up Bible verses from bible-api.com, with search history and favorites")]
struct Cli {
    /// Verse reference to look up once, e.g. "John 3:16-18". Starts the TUI when omitted.
    reference: Vec<String>,

    /// Translation code: web, kjv, asv or bbe
    #[arg(short, long, value_parser = parse_translation)]
    translation: Option<Translation>,

    /// Append the lookup to the history file (one-shot mode only)
    #[arg(short, long)]
    save: bool,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_translation(s: &str) -> Result<Translation, String> {
    Translation::from_str(s).ok_or_else(|| {
        let codes: Vec<&str> = Translation::all().iter().map(|t| t.as_str()).collect();
        format!("unknown translation '{}', expected one of: {}", s, codes.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    let (logs_path, filter) = logging::resolve_path_and_filter(&config);
    logging::init(logs_path, filter)?;

    let translation = cli.translation.unwrap_or_else(|| config.translation());

    if !cli.reference.is_empty() {
        let found = lookup_once(&config, &cli.reference.join(" "), translation, cli.save).await?;
        if !found {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_tui(config, config_path, translation).await
}

/// Look up a single reference and print it. Returns whether verses were found.
async fn lookup_once(config: &Config, raw: &str, translation: Translation, save: bool) -> Result<bool> {
    let client = VerseClient::new(&config.api_base_url(), config.timeout())?;
    let mut session = Session::new(translation);

    match NormalizedReference::parse(raw) {
        Ok(reference) => {
            let result = client.fetch(&reference, translation).await;
            session.apply_lookup(&reference, translation, result);
        }
        Err(err) => session.reject_input(&err),
    }

    println!("{}", session.output().text().trim_end());

    if save && session.history().is_some() {
        let history_file = config.history_file();
        match history_file.append(session.history_entries()) {
            Ok(_) => eprintln!("{}", history_file.saved_message()),
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(matches!(session.output(), Output::Verses(_)))
}

async fn run_tui(config: Config, config_path: PathBuf, translation: Translation) -> Result<()> {
    let mut app = App::new(config, Some(config_path), translation)?;
    info!(translation = translation.as_str(), "starting TUI");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }

        app.poll_lookup().await;
    }
    Ok(())
}
