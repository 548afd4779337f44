use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{Error, Res, types::Session, utils};

/// HTTP client bound to a Spotify Web API base URL.
///
/// Holds no credentials. Every call borrows the [`Session`] it should be made
/// for, so the one component owning the session stays in charge of it.
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    client: Client,
    base_url: String,
}

impl SpotifyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the endpoint made of `segments` below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`
    /// or `?` stays a single path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Res<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        session: &Session,
        segments: &[&str],
    ) -> Res<RequestBuilder> {
        let token = bearer(session)?;
        Ok(self
            .client
            .request(method, self.endpoint(segments)?)
            .bearer_auth(token))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        session: &Session,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Res<T> {
        let response = self
            .request(Method::GET, session, segments)?
            .query(query)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json::<T>().await?)
    }

    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        session: &Session,
        segments: &[&str],
        body: &B,
    ) -> Res<T> {
        let response = self
            .request(method, session, segments)?
            .json(body)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json::<T>().await?)
    }

    /// Like [`SpotifyApi::send_json`] for endpoints answering with an empty body.
    pub(crate) async fn send_json_empty<B: Serialize>(
        &self,
        method: Method,
        session: &Session,
        segments: &[&str],
        body: &B,
    ) -> Res<()> {
        let response = self
            .request(method, session, segments)?
            .json(body)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// The session's access token, or [`Error::MissingToken`].
pub fn bearer(session: &Session) -> Res<&str> {
    session
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingToken)
}

/// Passes successful responses through and turns every other one into
/// [`Error::ApiRequest`], keeping Spotify's own message when it sent one.
pub(crate) async fn ensure_success(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::ApiRequest {
        status,
        message: utils::extract_error_message(&body).unwrap_or_else(|| status.to_string()),
    })
}
