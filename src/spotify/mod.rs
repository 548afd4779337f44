//! # Spotify Integration Module
//!
//! This module is the integration layer between spotilink and the Spotify Web
//! API: the OAuth authorization-code flow and typed helpers for the profile,
//! search and playlist endpoints.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, callback server)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + client secret)
//!     ├── Profile (me, top items, playlists)
//!     ├── Search (catalog, playlists by id or owner)
//!     └── Playlist Operations (create, update, cover)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the classic authorization-code grant:
//! 1. **Authorization Request**: the browser is sent to the authorization
//!    endpoint with the client id, redirect URI and the fixed scope set
//! 2. **Callback**: Spotify redirects back to the local server with a code
//! 3. **Token Exchange**: the code is posted to the token endpoint, the
//!    client authenticates with its id and secret as basic auth
//! 4. **Profile**: the profile of the token owner is fetched
//! 5. **Session**: token and profile are stored and persisted
//!
//! Tokens are not refreshed. Once Spotify starts answering 401 the user signs
//! in again.
//!
//! ## Helpers
//!
//! Helpers in [`profile`], [`search`] and [`playlist`] are stateless. Each one
//! borrows the [`crate::types::Session`] it runs for and the [`SpotifyApi`]
//! it talks through, issues its requests one after the other and returns the
//! parsed body. They do not retry.
//!
//! The composite playlist operations treat adding tracks and uploading the
//! cover as best effort: the playlist existing matters more than its
//! decorations.
//!
//! ## API Coverage
//!
//! ### Authentication
//! - `GET /authorize` - Browser redirect for user consent
//! - `POST /api/token` - Authorization code exchange
//!
//! ### User Data
//! - `GET /me`, `GET /me/top/artists`, `GET /me/top/tracks`, `GET /me/playlists`
//!
//! ### Search
//! - `GET /search`, `GET /playlists/{id}`, `GET /users/{user_id}/playlists`
//!
//! ### Playlist Operations
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `PUT /playlists/{playlist_id}` - Change details
//! - `POST|PUT /playlists/{playlist_id}/tracks` - Add or replace tracks
//! - `PUT /playlists/{playlist_id}/images` - Upload a JPEG cover
//!
//! ## Error Types
//!
//! Every helper returns [`crate::Res`]. A session without token yields
//! [`crate::Error::MissingToken`], a non-success answer
//! [`crate::Error::ApiRequest`] with Spotify's message. Cover uploads are the
//! exception and report through [`crate::types::CoverUpload`].

pub mod auth;
mod client;
pub mod playlist;
pub mod profile;
pub mod search;

pub use auth::AuthFlow;
pub use client::{SpotifyApi, bearer};
