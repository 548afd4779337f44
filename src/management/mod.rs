mod player;
mod session;

pub use player::PlayerQueue;
pub use session::SessionStore;
