//! Error taxonomy for the Spotify session client.
//!
//! Low-level helpers only attach context and hand the error back; deciding
//! what the user sees is the caller's job.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Client credentials or endpoints are missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The token endpoint refused the authorization code.
    #[error("authorization code exchange failed ({status}): {message}")]
    AuthExchange { status: StatusCode, message: String },

    /// A token was issued but the profile of its owner could not be loaded.
    #[error("failed to fetch user profile: {0}")]
    ProfileFetch(#[source] Box<Error>),

    /// An authenticated call returned a non-success status.
    #[error("Spotify API request failed ({status}): {message}")]
    ApiRequest { status: StatusCode, message: String },

    #[error("no access token in session, run `spotilink auth` first")]
    MissingToken,

    #[error("no user profile in session, run `spotilink auth` again")]
    MissingProfile,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status attached to the error, if the remote side produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::AuthExchange { status, .. } | Error::ApiRequest { status, .. } => Some(*status),
            Error::ProfileFetch(source) => source.status(),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Whether recovering from this error requires signing in again.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            Error::MissingToken | Error::MissingProfile | Error::AuthExchange { .. }
        ) || self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
