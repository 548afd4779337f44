//! # API Module
//!
//! HTTP endpoints of the local server that stands in for the browser side of
//! the OAuth flow.
//!
//! ## Endpoints
//!
//! - [`login`] - Redirects to Spotify's authorization endpoint
//! - [`callback`] - Receives the authorization code from Spotify
//! - [`home`] - Shows who is signed in, only reachable with a session
//! - [`health`] - Health check returning name and version
//!
//! Every endpoint except `/health` sits behind [`require_session`], which
//! applies [`crate::guard::guard`]: `/login` and `/callback` are always
//! reachable, everything else redirects to `/login` until a session exists.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//! use spotilink::{server, types::CallbackState};
//!
//! let state = Arc::new(Mutex::new(CallbackState::default()));
//! let app = server::router(state);
//! ```

mod callback;
mod health;
mod session;

pub use callback::callback;
pub use health::health;
pub use session::{home, login, require_session};
