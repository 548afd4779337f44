//! Navigation guard.
//!
//! Decides whether a navigation to `path` may go through given the current
//! authentication state. The decision is pure so it can sit in front of the
//! callback server's routes and the authenticated CLI commands alike.

pub const LOGIN_PATH: &str = "/login";
pub const CALLBACK_PATH: &str = "/callback";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(&'static str),
}

/// Login and callback pages are always reachable, everything else needs a
/// session.
pub fn guard(path: &str, is_authenticated: bool) -> Navigation {
    if path == LOGIN_PATH || path == CALLBACK_PATH || is_authenticated {
        Navigation::Allow
    } else {
        Navigation::Redirect(LOGIN_PATH)
    }
}
