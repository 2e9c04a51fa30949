//! Error types for the Giphy search tool.
//!
//! Every variant renders as the exact message handed back to the calling
//! agent, so the tool boundary only ever needs `to_string()`.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, GiphyError>;

/// Errors that can occur during a GIF search.
#[derive(Error, Debug)]
pub enum GiphyError {
    /// No API key configured.
    #[error("ERROR: GIPHY_API_KEY is not set in Valves configuration.")]
    MissingApiKey,

    /// Empty search term.
    #[error("ERROR: No search query provided.")]
    EmptyQuery,

    /// Giphy rejected the key or the quota ran out.
    #[error("Error: Invalid API key or API quota exceeded. Please check your Giphy API key and quota.")]
    Forbidden,

    /// Any other non-success status.
    #[error("Error: Giphy API returned status {0}")]
    Status(u16),

    /// Search succeeded but returned nothing.
    #[error("ERROR: No GIFs found for query: {0}")]
    NoResults(String),

    /// HTTP request failed.
    #[error("Error occurred while searching Giphy: {0}")]
    Http(reqwest::Error),

    /// Failed to parse or serialize a payload.
    #[error("Error occurred while searching Giphy: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GiphyError {
    /// Drops the request URL, which carries the API key.
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl GiphyError {
    /// Whether this is an expected outcome of the caller's input or
    /// configuration rather than a provider or transport failure.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            GiphyError::MissingApiKey | GiphyError::EmptyQuery | GiphyError::NoResults(_)
        )
    }
}

impl From<serde_json::Error> for GiphyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
