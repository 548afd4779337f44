//! # CLI Module
//!
//! This module provides the command-line interface layer for spotilink. It
//! implements all user-facing commands and coordinates between the Spotify
//! helpers, the session store and user interaction.
//!
//! ## Command Categories
//!
//! ### Session
//!
//! - [`auth`] - Signs in through the browser and stores the session
//! - [`logout`] - Forgets the stored session
//! - [`serve`] - Runs the local login portal until interrupted
//!
//! ### Profile
//!
//! - [`whoami`] - Shows the signed-in user's profile
//! - [`top_artists`], [`top_tracks`] - The user's most listened items
//! - [`playlists`] - Followed or owned playlists
//!
//! ### Search
//!
//! - [`search`] - Catalog search for tracks, artists, albums or playlists
//!
//! ### Playlists
//!
//! - [`playlist_show`] - A playlist with its tracks
//! - [`playlist_create`] - Creates a playlist with songs and cover
//! - [`playlist_update`] - Changes details, songs or cover
//! - [`queue`] - Walks a playlist's tracks like a player would
//!
//! ## Sessions and the Guard
//!
//! Every command other than the session ones is mapped to a route and goes
//! through [`crate::guard::guard`] first. Without a session the command stops
//! and points to `spotilink auth` instead of sending a doomed request.
//!
//! ## Error Handling
//!
//! Library errors end up here. Fatal ones are printed with `error!`, which
//! exits, while partial failures of composite operations are shown as
//! warnings next to the successful steps.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotilink auth                               # Sign in with Spotify
//! spotilink whoami                             # Check who is signed in
//! spotilink search track "daft punk"           # Find tracks
//! spotilink playlist create --title Mix --find "one more time" --image cover.jpg
//! spotilink queue 37i9dQZF1DXcBWIGoYBM5M --skip 2
//! spotilink logout
//! ```

mod auth;
mod playlist;
mod profile;
mod queue;
mod search;
mod session;

pub use auth::auth;
pub use auth::logout;
pub use auth::serve;
pub use playlist::PlaylistInput;
pub use playlist::create as playlist_create;
pub use playlist::show as playlist_show;
pub use playlist::update as playlist_update;
pub use profile::playlists;
pub use profile::top_artists;
pub use profile::top_tracks;
pub use profile::whoami;
pub use queue::queue;
pub use search::search;
