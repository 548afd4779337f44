use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Mutex;

use crate::{
    config::{self, AuthConfig},
    error, info,
    management::SessionStore,
    server::{self, wait_for_code},
    spotify::AuthFlow,
    success,
    types::{CallbackState, UserProfile},
    warning,
};

const MAX_WAIT: Duration = Duration::from_secs(120);

pub async fn auth() {
    let mut flow = load_flow().await;
    let shared_state = start_server(&flow).await;

    if let Err(e) = flow.login() {
        error!("Cannot start login: {}", e);
    }

    let pb = spinner("Waiting for authorization in the browser...");
    let outcome = wait_for_code(Arc::clone(&shared_state), Some(MAX_WAIT)).await;
    pb.finish_and_clear();

    match outcome {
        Some(Ok(code)) => match flow.handle_callback(&code).await {
            Ok(user) => {
                mark_signed_in(&shared_state, &user).await;
                success!("Authentication successful! Signed in as {}", display_name(&user));
            }
            Err(e) => error!("Authentication failed: {}", e),
        },
        Some(Err(reason)) => error!("Authorization was denied: {}", reason),
        None => error!("Authentication failed or timed out."),
    }
}

pub async fn logout() {
    let mut flow = load_flow().await;
    if !flow.is_authenticated() {
        info!("No active session");
    }

    match flow.logout().await {
        Ok(()) => success!("Signed out"),
        Err(e) => error!("Failed to remove session: {}", e),
    }
}

/// Runs the local server as a login portal until interrupted.
///
/// Every code arriving on `/callback` is redeemed, so signing in through
/// `http://<SERVER_ADDRESS>/login` works without `spotilink auth`.
pub async fn serve() {
    let mut flow = load_flow().await;
    let shared_state = start_server(&flow).await;

    match flow.prepare_login() {
        Ok(_) => info!(
            "Open http://{}/login in your browser to sign in",
            config::server_addr()
        ),
        Err(e) => error!("Cannot prepare login: {}", e),
    }

    loop {
        match wait_for_code(Arc::clone(&shared_state), None).await {
            Some(Ok(code)) => match flow.handle_callback(&code).await {
                Ok(user) => {
                    mark_signed_in(&shared_state, &user).await;
                    success!("Signed in as {}", display_name(&user));
                }
                Err(e) => warning!("Sign-in failed: {}", e),
            },
            Some(Err(reason)) => warning!("Authorization was denied: {}", reason),
            None => break,
        }
    }
}

async fn load_flow() -> AuthFlow {
    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };
    let store = SessionStore::load_or_reset().await;
    AuthFlow::new(config, store)
}

async fn start_server(flow: &AuthFlow) -> Arc<Mutex<CallbackState>> {
    let authorize_url = match flow.authorize_url() {
        Ok(url) => url.to_string(),
        Err(e) => error!("{}", e),
    };

    let shared_state = Arc::new(Mutex::new(CallbackState {
        authorize_url: Some(authorize_url),
        authenticated: flow.is_authenticated(),
        user: flow
            .store()
            .user()
            .map(|u| display_name(u).to_string()),
        ..CallbackState::default()
    }));

    let addr = config::server_addr();
    let listener = match server::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot start callback server on {}: {}", addr, e),
    };

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = server::serve(listener, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    shared_state
}

async fn mark_signed_in(shared_state: &Arc<Mutex<CallbackState>>, user: &UserProfile) {
    let mut state = shared_state.lock().await;
    state.authenticated = true;
    state.user = Some(display_name(user).to_string());
}

fn display_name(user: &UserProfile) -> &str {
    user.display_name.as_deref().unwrap_or(&user.id)
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
