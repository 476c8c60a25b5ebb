use crate::error::{Error, Result};

/// Separator the verse API expects between words of a reference in the URL path
pub const SEPARATOR: char = '+';

/// A user-typed verse reference, ready to be put in a request path.
///
/// No validation beyond emptiness happens here; the API answers malformed
/// references with its own error status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReference {
    display: String,
    query: String,
}

impl NormalizedReference {
    pub fn parse(raw: &str) -> Result<Self> {
        let display = raw.trim();
        if display.is_empty() {
            return Err(Error::EmptyReference);
        }

        let query = display
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string());

        Ok(Self {
            display: display.to_string(),
            query,
        })
    }

    /// The path fragment sent to the API, e.g. `John+3:16`
    pub fn as_query(&self) -> &str {
        &self.query
    }

    /// The trimmed text as the user typed it
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl std::fmt::Display for NormalizedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}
