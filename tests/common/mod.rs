#![allow(dead_code)]

use serde_json::{Value, json};
use spotilink::{
    config::AuthConfig,
    spotify::SpotifyApi,
    types::{Session, UserProfile},
};
use wiremock::MockServer;

pub const REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

pub fn auth_config(server: &MockServer) -> AuthConfig {
    AuthConfig {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: REDIRECT_URI.to_string(),
        auth_url: format!("{}/authorize", server.uri()),
        token_url: format!("{}/api/token", server.uri()),
        api_url: format!("{}/v1", server.uri()),
    }
}

pub fn api(server: &MockServer) -> SpotifyApi {
    SpotifyApi::new(format!("{}/v1", server.uri()))
}

pub fn user() -> UserProfile {
    UserProfile {
        id: "user-1".to_string(),
        display_name: Some("Ada".to_string()),
        email: None,
        country: None,
        product: None,
        followers: None,
        images: Vec::new(),
    }
}

pub fn signed_in() -> Session {
    Session {
        token: Some("access-123".to_string()),
        user: Some(user()),
    }
}

pub fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "duration_ms": 180000,
        "artists": [{ "id": "artist-1", "name": "Daft Punk" }],
        "album": { "id": "album-1", "name": "Discovery" }
    })
}

pub fn playlist_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "public": true,
        "collaborative": false,
        "snapshot_id": "snap-0",
        "owner": { "id": "user-1", "display_name": "Ada" },
        "tracks": { "total": 0 }
    })
}
