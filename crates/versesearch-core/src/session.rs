//! UI-agnostic session state
//!
//! History, favorites, the selected translation, the theme flag and the
//! current output pane all live in [`Session`], which the presentation layer
//! owns. Lists are append-only for the lifetime of the process.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::parser::VerseResponse;
use crate::reference::NormalizedReference;
use crate::translation::Translation;

/// Line written after every history or favorites entry
pub const SEPARATOR_LINE: &str = "-----------------------------";

/// Display prefixes that mark a message rather than a verse result
pub const NON_VERSE_PREFIXES: [&str; 4] = [
    "Please enter a verse reference.",
    "Error",
    "Verse not found",
    "No search history",
];

/// One past lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub reference: String,
    pub translation: Translation,
    pub result: String,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]:\n{}", self.reference, self.translation.label(), self.result)
    }
}

/// What the output pane currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Empty,
    /// Result of a successful lookup
    Verses(String),
    /// History or favorites view
    Listing(String),
    /// Prompt, error or confirmation
    Notice(String),
}

impl Output {
    pub fn text(&self) -> &str {
        match self {
            Output::Empty => "",
            Output::Verses(text) | Output::Listing(text) | Output::Notice(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    Rejected,
}

impl FavoriteOutcome {
    pub fn notice(&self) -> &'static str {
        match self {
            FavoriteOutcome::Added => "Current verse(s) added to favorites.",
            FavoriteOutcome::Rejected => "There is no verse result to add to favorites.",
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    history: Vec<HistoryEntry>,
    favorites: Vec<String>,
    translation: Translation,
    theme: Theme,
    output: Output,
}

impl Session {
    pub fn new(translation: Translation) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn translation(&self) -> Translation {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Translation) {
        self.translation = translation;
    }

    pub fn cycle_translation(&mut self, forward: bool) -> Translation {
        self.translation = if forward {
            self.translation.next()
        } else {
            self.translation.prev()
        };
        self.translation
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.theme
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.output = Output::Notice(message.into());
    }

    pub fn clear_output(&mut self) {
        self.output = Output::Empty;
    }

    pub fn record_history(&mut self, reference: &str, translation: Translation, result: &str) {
        self.history.push(HistoryEntry {
            reference: reference.to_string(),
            translation,
            result: result.to_string(),
        });
    }

    /// Entries in insertion order, or `None` when nothing was searched yet
    pub fn history(&self) -> Option<std::slice::Iter<'_, HistoryEntry>> {
        if self.history.is_empty() {
            None
        } else {
            Some(self.history.iter())
        }
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Favorites in insertion order, or `None` when there are none
    pub fn favorites(&self) -> Option<std::slice::Iter<'_, String>> {
        if self.favorites.is_empty() {
            None
        } else {
            Some(self.favorites.iter())
        }
    }

    /// Store `text` as a favorite unless it is empty or an error/prompt message
    pub fn add_favorite(&mut self, text: &str) -> FavoriteOutcome {
        let text = text.trim();
        if text.is_empty() || NON_VERSE_PREFIXES.iter().any(|p| text.starts_with(p)) {
            debug!("rejected favorite: no verse result");
            return FavoriteOutcome::Rejected;
        }

        self.favorites.push(text.to_string());
        info!(count = self.favorites.len(), "added favorite");
        FavoriteOutcome::Added
    }

    /// Favorite whatever the output pane shows, if it is a lookup result
    pub fn favorite_current(&mut self) -> FavoriteOutcome {
        match &self.output {
            Output::Verses(text) => {
                let text = text.clone();
                self.add_favorite(&text)
            }
            _ => FavoriteOutcome::Rejected,
        }
    }

    /// Apply the outcome of a lookup to the output pane and history.
    ///
    /// Successful lookups are recorded. A body the parser could not read is
    /// recorded too, since the API did answer; status and network failures
    /// only show their message.
    pub fn apply_lookup(
        &mut self,
        reference: &NormalizedReference,
        translation: Translation,
        result: Result<VerseResponse>,
    ) {
        match result {
            Ok(response) => {
                let text = response.display();
                self.record_history(reference.display(), translation, &text);
                self.output = Output::Verses(text);
            }
            Err(err) => {
                let message = err.to_string();
                if err.reached_api() {
                    self.record_history(reference.display(), translation, &message);
                }
                self.output = Output::Notice(message);
            }
        }
    }

    /// Show the prompt for an empty or otherwise unusable reference
    pub fn reject_input(&mut self, err: &Error) {
        self.output = Output::Notice(err.to_string());
    }

    pub fn show_history(&mut self) {
        self.output = match self.history() {
            None => Output::Notice("No search history available.".to_string()),
            Some(entries) => Output::Listing(render_listing(
                "Search History:",
                entries.map(|e| e.to_string()),
            )),
        };
    }

    pub fn show_favorites(&mut self) {
        self.output = match self.favorites() {
            None => Output::Notice("No favorite verses have been added yet.".to_string()),
            Some(favorites) => {
                Output::Listing(render_listing("Favorite Verses:", favorites.cloned()))
            }
        };
    }
}

fn render_listing(title: &str, entries: impl Iterator<Item = String>) -> String {
    let mut text = format!("{}\n\n", title);
    for entry in entries {
        text.push_str(&entry);
        text.push('\n');
        text.push_str(SEPARATOR_LINE);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(s: &str) -> NormalizedReference {
        NormalizedReference::parse(s).unwrap()
    }

    fn single(reference: &str, text: &str) -> VerseResponse {
        VerseResponse::SingleVerse {
            reference: reference.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_history_preserves_insertion_order() {
        let mut session = Session::default();
        let refs = ["John 3:16", "Genesis 1:1", "Psalms 23:1"];
        for r in refs {
            session.record_history(r, Translation::Web, "text");
        }

        let recorded: Vec<&str> = session.history().unwrap().map(|e| e.reference.as_str()).collect();
        assert_eq!(recorded, refs);
    }

    #[test]
    fn test_history_iterator_is_restartable() {
        let mut session = Session::default();
        session.record_history("John 3:16", Translation::Kjv, "a");
        session.record_history("John 3:17", Translation::Kjv, "b");

        let iter = session.history().unwrap();
        assert_eq!(iter.clone().count(), 2);
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn test_empty_lists_signal_none() {
        let session = Session::default();
        assert!(session.history().is_none());
        assert!(session.favorites().is_none());
    }

    #[test]
    fn test_history_entry_format() {
        let entry = HistoryEntry {
            reference: "John 3:16".to_string(),
            translation: Translation::Kjv,
            result: "John 3:16 - For God so loved".to_string(),
        };
        assert_eq!(entry.to_string(), "John 3:16 [KJV]:\nJohn 3:16 - For God so loved");
    }

    #[test]
    fn test_add_favorite_rejects_empty_and_errors() {
        let mut session = Session::default();
        assert_eq!(session.add_favorite(""), FavoriteOutcome::Rejected);
        assert_eq!(session.add_favorite("   "), FavoriteOutcome::Rejected);
        assert_eq!(session.add_favorite("Error: x"), FavoriteOutcome::Rejected);
        assert_eq!(session.add_favorite("Verse not found or API error."), FavoriteOutcome::Rejected);
        assert_eq!(session.add_favorite("Please enter a verse reference."), FavoriteOutcome::Rejected);
        assert_eq!(session.add_favorite("No search history available."), FavoriteOutcome::Rejected);
        assert!(session.favorites().is_none());
    }

    #[test]
    fn test_add_favorite_stores_trimmed_text() {
        let mut session = Session::default();
        assert_eq!(session.add_favorite("John 3:16 - For God\n\n"), FavoriteOutcome::Added);
        let favorites: Vec<&str> = session.favorites().unwrap().map(String::as_str).collect();
        assert_eq!(favorites, vec!["John 3:16 - For God"]);
    }

    #[test]
    fn test_successful_lookup_records_history_and_output() {
        let mut session = Session::default();
        session.apply_lookup(
            &reference("John 3:16"),
            Translation::Web,
            Ok(single("John 3:16", " For God so loved ")),
        );

        assert_eq!(session.output(), &Output::Verses("John 3:16 - For God so loved".to_string()));
        let entries = session.history_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].to_string(), "John 3:16 [WEB]:\nJohn 3:16 - For God so loved");
    }

    #[test]
    fn test_failed_lookup_leaves_history_untouched() {
        let mut session = Session::default();
        session.apply_lookup(
            &reference("Nowhere 1:1"),
            Translation::Web,
            Err(Error::LookupFailed { status: 404 }),
        );
        session.apply_lookup(
            &reference("John 3:16"),
            Translation::Web,
            Err(Error::Network("refused".to_string())),
        );

        assert!(session.history().is_none());
        assert_eq!(
            session.output(),
            &Output::Notice("Error fetching verse: refused".to_string())
        );
    }

    #[test]
    fn test_malformed_lookup_is_shown_and_recorded() {
        let mut session = Session::default();
        session.apply_lookup(
            &reference("John 3:16"),
            Translation::Bbe,
            Err(Error::MalformedResponse("missing field `text`".to_string())),
        );

        assert_eq!(
            session.output().text(),
            "Error parsing verses: missing field `text`"
        );
        assert_eq!(session.history_entries().len(), 1);
    }

    #[test]
    fn test_favorite_current_only_accepts_verses() {
        let mut session = Session::default();
        assert_eq!(session.favorite_current(), FavoriteOutcome::Rejected);

        session.set_notice("Search history saved to verse_search_history.txt");
        assert_eq!(session.favorite_current(), FavoriteOutcome::Rejected);

        session.apply_lookup(&reference("John 3:16"), Translation::Web, Ok(single("John 3:16", "For God")));
        session.show_history();
        assert_eq!(session.favorite_current(), FavoriteOutcome::Rejected);

        session.apply_lookup(&reference("John 3:16"), Translation::Web, Ok(single("John 3:16", "For God")));
        assert_eq!(session.favorite_current(), FavoriteOutcome::Added);
        assert_eq!(session.favorites().unwrap().count(), 1);
    }

    #[test]
    fn test_show_history_renders_listing() {
        let mut session = Session::default();
        session.show_history();
        assert_eq!(session.output(), &Output::Notice("No search history available.".to_string()));

        session.record_history("John 3:16", Translation::Web, "John 3:16 - For God");
        session.show_history();
        assert_eq!(
            session.output().text(),
            "Search History:\n\nJohn 3:16 [WEB]:\nJohn 3:16 - For God\n-----------------------------\n"
        );
    }

    #[test]
    fn test_show_favorites_renders_listing() {
        let mut session = Session::default();
        session.show_favorites();
        assert_eq!(session.output().text(), "No favorite verses have been added yet.");

        session.add_favorite("Genesis 1:1 - In the beginning");
        session.show_favorites();
        assert!(matches!(session.output(), Output::Listing(_)));
        assert!(session.output().text().starts_with("Favorite Verses:\n\nGenesis 1:1"));
    }

    #[test]
    fn test_toggle_theme_and_clear() {
        let mut session = Session::new(Translation::Kjv);
        assert_eq!(session.translation(), Translation::Kjv);
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert_eq!(session.toggle_theme(), Theme::Light);

        session.set_notice("hello");
        session.clear_output();
        assert_eq!(session.output(), &Output::Empty);
    }

    #[test]
    fn test_reject_input_shows_prompt_without_history() {
        let mut session = Session::default();
        session.reject_input(&Error::EmptyReference);
        assert_eq!(session.output().text(), "Please enter a verse reference.");
        assert!(session.history().is_none());
    }
}
