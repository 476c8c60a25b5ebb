use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::{self, VerseResponse};
use crate::reference::NormalizedReference;
use crate::translation::Translation;

pub const DEFAULT_BASE_URL: &str = "https://bible-api.com";

/// HTTP client for the public verse lookup API
#[derive(Clone)]
pub struct VerseClient {
    client: Client,
    base_url: String,
}

impl VerseClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, reference: &NormalizedReference, translation: Translation) -> String {
        format!(
            "{}/{}?translation={}",
            self.base_url,
            reference.as_query(),
            translation.as_str()
        )
    }

    /// Fetch the raw response body. Only HTTP 200 counts as success.
    pub async fn lookup(
        &self,
        reference: &NormalizedReference,
        translation: Translation,
    ) -> Result<String> {
        let url = self.url_for(reference, translation);
        debug!(%url, "looking up verse");

        let response = self.client.get(&url).send().await.map_err(network_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "verse lookup failed");
            return Err(Error::LookupFailed {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(network_error)
    }

    /// Lookup and parse in one step
    pub async fn fetch(
        &self,
        reference: &NormalizedReference,
        translation: Translation,
    ) -> Result<VerseResponse> {
        let body = self.lookup(reference, translation).await?;
        parser::parse(&body).inspect_err(|e| warn!(error = %e, "could not parse verse response"))
    }
}

fn network_error(err: reqwest::Error) -> Error {
    warn!(error = %err, "network error talking to verse API");
    let message = if err.is_timeout() {
        "The request timed out. The verse server might be slow right now.".to_string()
    } else if err.is_connect() {
        format!("Could not connect to the verse server. Please check your internet connection ({})", err)
    } else {
        err.to_string()
    };
    Error::Network(message)
}
