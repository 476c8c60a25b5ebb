use thiserror::Error;

/// Everything that can go wrong during a single user action.
///
/// The `Display` text of each variant is what ends up in the output pane,
/// so the wording is user-facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Please enter a verse reference.")]
    EmptyReference,

    #[error("Error fetching verse: {0}")]
    Network(String),

    #[error("Verse not found or API error.\nResponse Code: {status}")]
    LookupFailed { status: u16 },

    #[error("Error parsing verses: {0}")]
    MalformedResponse(String),

    #[error("Error parsing single verse: {0}")]
    MalformedSingleVerse(String),

    #[error("Error saving history: {0}")]
    Io(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the remote API actually answered with a body.
    ///
    /// Such lookups still count as searches and are kept in history.
    pub fn reached_api(&self) -> bool {
        matches!(self, Error::MalformedResponse(_) | Error::MalformedSingleVerse(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failed_message_includes_status() {
        let err = Error::LookupFailed { status: 404 };
        assert_eq!(err.to_string(), "Verse not found or API error.\nResponse Code: 404");
    }

    #[test]
    fn test_only_malformed_response_reached_api() {
        assert!(Error::MalformedResponse("missing field `text`".into()).reached_api());
        assert!(Error::MalformedSingleVerse("missing field `text`".into()).reached_api());
        assert!(!Error::LookupFailed { status: 500 }.reached_api());
        assert!(!Error::Network("refused".into()).reached_api());
        assert!(!Error::EmptyReference.reached_api());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert_eq!(err.to_string(), "Error saving history: denied");
    }
}
