use reqwest::Client;
use url::Url;

use crate::{
    Error, Res,
    config::AuthConfig,
    info,
    management::SessionStore,
    spotify::{SpotifyApi, profile},
    types::{Session, TokenExchangeResult, UserProfile},
    utils, warning,
};

/// Permissions requested at every login.
pub const LOGIN_SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-email",
    "playlist-read-private",
    "playlist-read-collaborative",
    "playlist-modify-public",
    "playlist-modify-private",
    "user-top-read",
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "streaming",
    "user-library-read",
    "user-library-modify",
    "ugc-image-upload",
];

/// A set of OAuth scopes. Duplicates are dropped, first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scopes(Vec<String>);

impl Scopes {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for scope in scopes {
            let scope = scope.into();
            if !unique.contains(&scope) {
                unique.push(scope);
            }
        }
        Self(unique)
    }

    pub fn login() -> Self {
        Self::new(LOGIN_SCOPES.iter().copied())
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.iter().any(|s| s == scope)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space separated, as the authorization endpoint expects them.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

/// Parameters of one trip to the authorization endpoint.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub response_type: &'static str,
    pub client_id: String,
    pub scope: Scopes,
    pub redirect_uri: String,
}

impl AuthorizationRequest {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            response_type: "code",
            client_id: config.client_id.clone(),
            scope: Scopes::login(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Renders the request onto `auth_url` with URL-encoded query parameters.
    pub fn to_url(&self, auth_url: &str) -> Res<Url> {
        let mut url = Url::parse(auth_url)
            .map_err(|e| Error::Config(format!("invalid authorization URL {}: {}", auth_url, e)))?;
        url.query_pairs_mut()
            .append_pair("response_type", self.response_type)
            .append_pair("client_id", &self.client_id)
            .append_pair("scope", &self.scope.joined())
            .append_pair("redirect_uri", &self.redirect_uri);
        Ok(url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    AwaitingCallback,
    Authenticated,
}

/// Drives the authorization-code flow and owns the session it produces.
///
/// ```text
/// Unauthenticated --login--> AwaitingCallback --handle_callback ok--> Authenticated
///                            AwaitingCallback --handle_callback err--> Unauthenticated
/// ```
///
/// The flow holds the only mutable handle to the [`SessionStore`]. Code that
/// needs the token borrows it through [`AuthFlow::session`].
pub struct AuthFlow {
    config: AuthConfig,
    client: Client,
    api: SpotifyApi,
    store: SessionStore,
    state: AuthState,
}

impl AuthFlow {
    pub fn new(config: AuthConfig, store: SessionStore) -> Self {
        Self::with_client(config, store, Client::new())
    }

    pub fn with_client(config: AuthConfig, store: SessionStore, client: Client) -> Self {
        let api = SpotifyApi::with_client(client.clone(), config.api_url.clone());
        let state = if store.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };

        Self {
            config,
            client,
            api,
            store,
            state,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn api(&self) -> &SpotifyApi {
        &self.api
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// URL of the authorization endpoint carrying this client's request.
    pub fn authorize_url(&self) -> Res<Url> {
        AuthorizationRequest::new(&self.config).to_url(&self.config.auth_url)
    }

    /// Builds the authorization URL and starts waiting for the callback,
    /// leaving the navigation itself to the caller.
    pub fn prepare_login(&mut self) -> Res<Url> {
        let url = self.authorize_url()?;
        info!("Using redirect URI: {}", self.config.redirect_uri);
        self.state = AuthState::AwaitingCallback;
        Ok(url)
    }

    /// Sends the user to the authorization endpoint in their browser.
    ///
    /// When no browser can be opened the URL is printed for manual
    /// navigation. The returned URL is the one navigated to.
    pub fn login(&mut self) -> Res<Url> {
        let url = self.prepare_login()?;
        if webbrowser::open(url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            );
        }
        Ok(url)
    }

    /// Redeems an authorization code and signs the user in.
    ///
    /// Exchanges `code` at the token endpoint, stores the access token, then
    /// fetches the profile of its owner and stores that as well. The call
    /// only succeeds once the session with both is persisted.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthExchange`] when the token endpoint rejects the code
    ///   (expired, already used, redirect URI mismatch). The session is not
    ///   touched.
    /// - [`Error::ProfileFetch`] when the profile call fails. The freshly
    ///   stored token is rolled back so the session never holds a token
    ///   without its profile. The failed request is kept as the source.
    /// - [`Error::Io`] / [`Error::Serde`] when the session cannot be saved.
    ///   The new sign-in is rolled back as well, since the next process
    ///   would not see it.
    ///
    /// Either way the flow falls back to the state of the session it had
    /// before the call.
    pub async fn handle_callback(&mut self, code: &str) -> Res<UserProfile> {
        let previous = self.store.session().clone();

        let exchange = match exchange_code(&self.client, &self.config, code).await {
            Ok(exchange) => exchange,
            Err(e) => {
                self.settle();
                return Err(e);
            }
        };
        self.store.set_token(exchange.access_token);

        let user = match profile::fetch_profile(&self.api, self.store.session()).await {
            Ok(user) => user,
            Err(e) => {
                self.store.restore(previous);
                self.settle();
                return Err(Error::ProfileFetch(Box::new(e)));
            }
        };
        self.store.set_user(user.clone());

        if let Err(e) = self.store.persist().await {
            self.store.restore(previous);
            self.settle();
            return Err(e);
        }
        self.state = AuthState::Authenticated;

        Ok(user)
    }

    /// Signs out: drops the session in memory and on disk.
    pub async fn logout(&mut self) -> Res<()> {
        self.store.clear();
        self.state = AuthState::Unauthenticated;
        self.store.forget().await
    }

    fn settle(&mut self) {
        self.state = if self.store.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
    }
}

/// Exchanges an authorization code for an access token.
///
/// Posts `grant_type=authorization_code&code=..&redirect_uri=..` as a form to
/// the token endpoint, authenticated with the client credentials as HTTP
/// basic auth.
///
/// # Errors
///
/// Returns [`Error::AuthExchange`] for any non-success answer and for a
/// success answer that carries no access token, [`Error::Http`] when the
/// endpoint cannot be reached.
pub async fn exchange_code(
    client: &Client,
    config: &AuthConfig,
    code: &str,
) -> Res<TokenExchangeResult> {
    let response = client
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::AuthExchange {
            status,
            message: utils::extract_error_message(&body).unwrap_or_else(|| status.to_string()),
        });
    }

    match serde_json::from_str::<TokenExchangeResult>(&body) {
        Ok(token) if !token.access_token.is_empty() => Ok(token),
        _ => Err(Error::AuthExchange {
            status,
            message: "token response carried no access_token".to_string(),
        }),
    }
}
