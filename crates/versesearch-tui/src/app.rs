use std::path::PathBuf;

use ratatui::widgets::ListState;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use versesearch_core::{
    Config, Error, HistoryFile, NormalizedReference, Session, Translation, VerseClient,
    VerseResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// A lookup running in the background
pub struct PendingLookup {
    pub reference: NormalizedReference,
    pub translation: Translation,
    pub task: JoinHandle<versesearch_core::Result<VerseResponse>>,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Reference input
    pub reference_input: String,
    pub reference_cursor: usize, // cursor position in reference_input (chars)

    // History, favorites, translation, theme, output pane
    pub session: Session,

    // Output pane scrolling (updated during render)
    pub output_scroll: u16,
    pub output_height: u16,
    pub output_lines: u16,

    // In-flight lookup; a new search is refused while this is set
    pub lookup: Option<PendingLookup>,
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Dismissible notice (favorites feedback, busy warning)
    pub popup: Option<String>,

    // Translation picker state
    pub show_translation_picker: bool,
    pub translation_picker_state: ListState,

    // Data
    pub client: VerseClient,
    pub history_file: HistoryFile,
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>, translation: Translation) -> anyhow::Result<Self> {
        let client = VerseClient::new(&config.api_base_url(), config.timeout())?;
        let history_file = config.history_file();

        Ok(Self {
            should_quit: false,
            input_mode: InputMode::Editing,

            reference_input: String::new(),
            reference_cursor: 0,

            session: Session::new(translation),

            output_scroll: 0,
            output_height: 0,
            output_lines: 0,

            lookup: None,
            animation_frame: 0,

            popup: None,

            show_translation_picker: false,
            translation_picker_state: ListState::default(),

            client,
            history_file,
            config,
            config_path,
        })
    }

    pub fn is_loading(&self) -> bool {
        self.lookup.is_some()
    }

    /// Kick off a lookup for the current input
    pub fn start_search(&mut self) {
        if self.is_loading() {
            self.popup = Some("A lookup is already in progress.".to_string());
            return;
        }

        let reference = match NormalizedReference::parse(&self.reference_input) {
            Ok(reference) => reference,
            Err(err) => {
                self.session.reject_input(&err);
                return;
            }
        };

        let translation = self.session.translation();
        info!(reference = %reference, translation = translation.as_str(), "starting lookup");

        let client = self.client.clone();
        let task_reference = reference.clone();
        let task = tokio::spawn(async move { client.fetch(&task_reference, translation).await });

        self.lookup = Some(PendingLookup {
            reference,
            translation,
            task,
        });
        self.output_scroll = 0;
    }

    /// Apply the result of a finished lookup, if any
    pub async fn poll_lookup(&mut self) {
        let finished = self
            .lookup
            .as_ref()
            .is_some_and(|pending| pending.task.is_finished());
        if !finished {
            return;
        }

        if let Some(pending) = self.lookup.take() {
            let result = match pending.task.await {
                Ok(result) => result,
                Err(e) => {
                    error!(error = %e, "lookup task did not complete");
                    Err(Error::Network(format!("lookup was interrupted ({})", e)))
                }
            };
            self.session
                .apply_lookup(&pending.reference, pending.translation, result);
            self.output_scroll = 0;
        }
    }

    pub fn clear_output(&mut self) {
        self.session.clear_output();
        self.output_scroll = 0;
    }

    pub fn view_history(&mut self) {
        self.session.show_history();
        self.output_scroll = 0;
    }

    pub fn view_favorites(&mut self) {
        self.session.show_favorites();
        self.output_scroll = 0;
    }

    pub fn save_history(&mut self) {
        match self.history_file.append(self.session.history_entries()) {
            Ok(count) => {
                info!(count, path = %self.history_file.path().display(), "saved history");
                self.session.set_notice(self.history_file.saved_message());
            }
            Err(e) => {
                error!(error = %e, "failed to save history");
                self.session.set_notice(e.to_string());
            }
        }
        self.output_scroll = 0;
    }

    pub fn add_favorite(&mut self) {
        let outcome = self.session.favorite_current();
        self.popup = Some(outcome.notice().to_string());
    }

    pub fn toggle_theme(&mut self) {
        self.session.toggle_theme();
    }

    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    pub fn cycle_translation(&mut self, forward: bool) {
        let translation = self.session.cycle_translation(forward);
        self.remember_translation(translation);
    }

    pub fn select_translation(&mut self, translation: Translation) {
        self.session.set_translation(translation);
        self.remember_translation(translation);
    }

    /// Persist the chosen translation as the default for next launch
    fn remember_translation(&mut self, translation: Translation) {
        self.config.default_translation = Some(translation.as_str().to_string());
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!(error = %e, "could not save default translation");
            }
        }
    }

    // Translation picker

    pub fn open_translation_picker(&mut self) {
        let current = Translation::all()
            .iter()
            .position(|t| *t == self.session.translation());
        self.translation_picker_state.select(current.or(Some(0)));
        self.show_translation_picker = true;
    }

    pub fn translation_picker_nav_down(&mut self) {
        let count = Translation::all().len();
        let i = self.translation_picker_state.selected().unwrap_or(0);
        self.translation_picker_state.select(Some((i + 1).min(count - 1)));
    }

    pub fn translation_picker_nav_up(&mut self) {
        let i = self.translation_picker_state.selected().unwrap_or(0);
        self.translation_picker_state.select(Some(i.saturating_sub(1)));
    }

    pub fn confirm_translation_picker(&mut self) {
        if let Some(i) = self.translation_picker_state.selected() {
            if let Some(translation) = Translation::all().get(i).copied() {
                self.select_translation(translation);
            }
        }
        self.show_translation_picker = false;
    }

    // Output scrolling

    fn max_scroll(&self) -> u16 {
        self.output_lines.saturating_sub(self.output_height)
    }

    pub fn scroll_down(&mut self) {
        self.output_scroll = (self.output_scroll + 1).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half = (self.output_height / 2).max(1);
        self.output_scroll = (self.output_scroll + half).min(self.max_scroll());
    }

    pub fn scroll_half_page_up(&mut self) {
        let half = (self.output_height / 2).max(1);
        self.output_scroll = self.output_scroll.saturating_sub(half);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
