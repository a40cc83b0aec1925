//! Shared HTTP client context for the finance API.
//!
//! One `ApiClient` is built per process and cloned into the session prober and
//! every resource service. It owns the connection pool and the session cookie.

pub mod cookie;

use std::sync::{Arc, RwLock};

use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ApiConfig;
use crate::error::CollaboratorError;
use cookie::SessionCookie;

pub type ApiResult<T> = Result<T, CollaboratorError>;

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| CollaboratorError::ClientBuild(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: parse_base_url(&config.base_url)?,
                session: RwLock::new(None),
            }),
        })
    }

    /// Restore a session id persisted by an earlier run
    pub fn with_session(self, sid: Option<String>) -> Self {
        self.set_session_id(sid);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn session_id(&self) -> Option<String> {
        self.inner
            .session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_session_id(&self, sid: Option<String>) {
        *self.inner.session.write().unwrap_or_else(|e| e.into_inner()) = sid;
    }

    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request(Method::GET, path)?;
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(payload);
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST where the response body is irrelevant to the caller
    pub async fn post_unit<B>(&self, path: &str, payload: Option<&B>) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(Method::POST, path)?;
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        self.execute(request).await.map(|_| ())
    }

    pub async fn patch_json<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path)?.json(payload);
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request).await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut request = self.inner.http.request(method, url);
        if let Some(sid) = self.session_id() {
            request = request.header(COOKIE, cookie::cookie_header(&sid));
        }
        Ok(request)
    }

    /// Send once and return the body text of a 2xx response
    async fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} {}", status.as_u16(), response.url().path());

        self.track_session_cookie(&response);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(CollaboratorError::from_response(status, &body));
        }

        Ok(body)
    }

    fn track_session_cookie(&self, response: &reqwest::Response) {
        for value in response.headers().get_all(SET_COOKIE) {
            let Ok(header) = value.to_str() else {
                continue;
            };
            match cookie::parse_set_cookie(header) {
                Some(SessionCookie::Set(sid)) => self.set_session_id(Some(sid)),
                Some(SessionCookie::Cleared) => {
                    tracing::debug!("API cleared the session cookie");
                    self.set_session_id(None);
                }
                None => {}
            }
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    // Url::join drops the last segment unless the path ends with a slash
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
