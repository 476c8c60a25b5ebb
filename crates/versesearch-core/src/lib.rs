pub mod client;
pub mod config;
pub mod error;
pub mod parser;
pub mod persist;
pub mod reference;
pub mod session;
pub mod translation;

// Re-export main types for convenience
pub use client::VerseClient;
pub use config::Config;
pub use error::{Error, Result};
pub use parser::{VerseRecord, VerseResponse};
pub use persist::HistoryFile;
pub use reference::NormalizedReference;
pub use session::{FavoriteOutcome, HistoryEntry, Output, Session, Theme};
pub use translation::Translation;
