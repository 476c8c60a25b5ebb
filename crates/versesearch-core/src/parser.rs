//! Turns verse API response bodies into display text.
//!
//! The API answers with one of two shapes. When a `verses` list is present
//! every entry is rendered on its own line; otherwise the top-level
//! `reference` and `text` fields are used.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One verse as returned inside the `verses` list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerseRecord {
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

#[derive(Deserialize)]
struct SingleVerseBody {
    reference: String,
    text: String,
}

/// A successfully parsed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseResponse {
    SingleVerse { reference: String, text: String },
    VerseList(Vec<VerseRecord>),
}

impl VerseResponse {
    /// Render the human-readable result shown in the output pane
    pub fn display(&self) -> String {
        match self {
            VerseResponse::SingleVerse { reference, text } => {
                format!("{} - {}", reference, text.trim())
            }
            VerseResponse::VerseList(verses) => {
                let mut result = String::new();
                for v in verses {
                    result.push_str(&format!(
                        "{} {}:{} - {}\n\n",
                        v.book_name,
                        v.chapter,
                        v.verse,
                        v.text.trim()
                    ));
                }
                result
            }
        }
    }
}

pub fn parse(body: &str) -> Result<VerseResponse> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| Error::MalformedResponse("expected a JSON object".to_string()))?;

    match obj.get("verses") {
        Some(verses) => {
            let records: Vec<VerseRecord> = serde_json::from_value(verses.clone())
                .map_err(|e| Error::MalformedResponse(format!("invalid `verses` list: {}", e)))?;
            Ok(VerseResponse::VerseList(records))
        }
        None => {
            let single: SingleVerseBody = serde_json::from_value(value)
                .map_err(|e| Error::MalformedSingleVerse(e.to_string()))?;
            Ok(VerseResponse::SingleVerse {
                reference: single.reference,
                text: single.text,
            })
        }
    }
}
