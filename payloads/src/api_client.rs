use crate::{
    CookieSource, Entity, ResourceService, XSRF_HEADER,
    requests::{self, FieldErrors, FormError},
    responses::{self, ErrorBody},
    xsrf_token,
};
use reqwest::{
    Method, RequestBuilder, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::{sync::Arc, time::Duration};

type ReqwestResult = Result<reqwest::Response, ClientError>;

pub const DEFAULT_HOST: &str = "https://sunwebsolution.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base url that resource paths are appended to, e.g.
    /// `https://example.com/api`.
    pub base_url: String,
    /// Absolute url of the endpoint that issues the XSRF-TOKEN cookie.
    pub csrf_cookie_url: String,
    /// Not enforced by browsers; native builds only.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_host(DEFAULT_HOST)
    }
}

impl ClientConfig {
    /// Derive the api and csrf-cookie urls from a host such as
    /// `http://127.0.0.1:8000`.
    pub fn for_host(host: &str) -> Self {
        let host = host.trim_end_matches('/');
        Self {
            base_url: format!("{host}/api"),
            csrf_cookie_url: format!("{host}/sanctum/csrf-cookie"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// An API client for interfacing with the backend.
///
/// Cheap to clone; clones share the connection pool and cookies.
#[derive(Clone)]
pub struct APIClient {
    pub config: ClientConfig,
    pub inner_client: reqwest::Client,
    cookies: Arc<dyn CookieSource>,
}

impl APIClient {
    /// Build the shared transport: JSON accept header, credentialed cookies
    /// and, on native targets, the request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let builder = reqwest::Client::builder().default_headers(headers);
        let (inner_client, cookies) = build_transport(builder, &config)?;
        Ok(Self {
            config,
            inner_client,
            cookies,
        })
    }

    /// CRUD operations for one kind of record.
    pub fn service<E: Entity>(&self) -> ResourceService<E> {
        ResourceService::new(self.clone())
    }

    /// The current url-decoded XSRF token, if the cookie has been issued.
    pub fn xsrf_token(&self) -> Option<String> {
        let url = Url::parse(&self.config.base_url).ok()?;
        xsrf_token(&self.cookies.cookie_string(&url)?)
    }
}

/// Helper methods for http actions
impl APIClient {
    pub(crate) fn format_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Start a request with the XSRF header and credentials attached.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.inner_client.request(method, url);
        if let Some(token) = self.xsrf_token() {
            request = request.header(XSRF_HEADER, token);
        }

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request
    }

    /// Send a request, logging and converting failures.
    pub(crate) async fn send(&self, request: RequestBuilder) -> ReqwestResult {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API Error: {e}");
                return Err(e.into());
            }
        };
        check_status(response).await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request =
            self.request(Method::POST, &self.format_url(path)).json(body);
        self.send(request).await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        let request = self.request(Method::POST, &self.format_url(path));
        self.send(request).await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.request(Method::GET, &self.format_url(path));
        self.send(request).await
    }
}

/// Authentication methods on the backend API
impl APIClient {
    /// Ask the API for a fresh XSRF-TOKEN cookie.
    pub async fn csrf_cookie(&self) -> Result<(), ClientError> {
        let request = self.request(Method::GET, &self.config.csrf_cookie_url);
        self.send(request).await?;
        Ok(())
    }

    pub async fn login(
        &self,
        credentials: &requests::LoginCredentials,
    ) -> Result<serde_json::Value, ClientError> {
        self.csrf_cookie().await?;
        let response = self.post("login", credentials).await?;
        ok_body_or_default(response).await
    }

    pub async fn logout(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.empty_post("logout").await?;
        ok_body_or_default(response).await
    }

    /// The account behind the current session.
    pub async fn current_user(&self) -> Result<responses::User, ClientError> {
        let response = self.empty_get("user").await?;
        ok_body(response).await
    }

    pub async fn register(
        &self,
        details: &requests::RegisterForm,
    ) -> Result<serde_json::Value, ClientError> {
        self.csrf_cookie().await?;
        let response = self.post("register", details).await?;
        ok_body_or_default(response).await
    }
}

/// Cookie jar shared between reqwest and the XSRF lookup.
#[cfg(not(target_arch = "wasm32"))]
fn build_transport(
    builder: reqwest::ClientBuilder,
    config: &ClientConfig,
) -> Result<(reqwest::Client, Arc<dyn CookieSource>), ClientError> {
    let jar = Arc::new(reqwest::cookie::Jar::default());
    let client = builder
        .cookie_provider(jar.clone())
        .timeout(config.timeout)
        .build()?;
    let cookies: Arc<dyn CookieSource> = jar;
    Ok((client, cookies))
}

/// The browser stores cookies; requests opt in with credentials: include.
#[cfg(target_arch = "wasm32")]
fn build_transport(
    builder: reqwest::ClientBuilder,
    _config: &ClientConfig,
) -> Result<(reqwest::Client, Arc<dyn CookieSource>), ClientError> {
    let cookies: Arc<dyn CookieSource> = Arc::new(crate::cookies::DocumentCookies);
    Ok((builder.build()?, cookies))
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// A 422 response. `errors` is the per-field message map when the API
    /// sent one.
    #[error("{}", .message.as_deref().unwrap_or("Validation error"))]
    Validation {
        message: Option<String>,
        errors: Option<FieldErrors>,
    },
    /// Any other non-2xx response.
    #[error("{}", describe_status(.status, .message))]
    APIError {
        status: StatusCode,
        message: Option<String>,
    },
    /// Required fields missing; raised before a request is made.
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("Network error. Please check your connection.")]
    Network(#[source] Arc<reqwest::Error>),
    #[error("Unexpected response body.")]
    Json(#[source] Arc<serde_json::Error>),
}

fn describe_status(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {status}"),
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(Arc::new(e))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(Arc::new(e))
    }
}

impl ClientError {
    /// HTTP status, when the server responded.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation { .. } => Some(StatusCode::UNPROCESSABLE_ENTITY),
            Self::APIError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// The `message` field of the server's error payload.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Validation { message, .. }
            | Self::APIError { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Log and convert a non-2xx response. The caller still sees every failure.
async fn check_status(response: reqwest::Response) -> ReqwestResult {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let text = response.text().await?;
    let body = serde_json::from_str::<ErrorBody>(&text).unwrap_or_default();

    tracing::error!(%status, %url, "API Error: {text}");
    match status {
        StatusCode::UNAUTHORIZED => tracing::warn!("Unauthorized access"),
        StatusCode::UNPROCESSABLE_ENTITY => {
            tracing::warn!("Validation error: {:?}", body.errors)
        }
        StatusCode::INTERNAL_SERVER_ERROR => tracing::error!(
            "Server error: {}",
            body.error.as_deref().unwrap_or("Unknown error")
        ),
        _ => {}
    }

    Err(if status == StatusCode::UNPROCESSABLE_ENTITY {
        ClientError::Validation {
            message: body.message,
            errors: body.errors,
        }
    } else {
        ClientError::APIError {
            status,
            message: body.message,
        }
    })
}

/// Deserialize a successful response into the desired type.
pub async fn ok_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!("Unexpected response body: {e}");
        e.into()
    })
}

/// Like [`ok_body`], but an empty body (e.g. 204) yields the default.
pub async fn ok_body_or_default<T: DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!("Unexpected response body: {e}");
        e.into()
    })
}
