use hyperbrowser_core::HyperbrowserError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;

/// Query pairs for a request. Pairs whose value is `None` are left out.
pub type Query<'a> = [(&'a str, Option<String>)];

/// Authenticated JSON transport shared by every service.
///
/// Cloning is cheap: the underlying reqwest client pools connections
/// behind an `Arc`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_base: String,
    api_key: String,
    timeout_ms: u64,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, HyperbrowserError> {
        let api_base = format!("{}/api", config.base_url.trim_end_matches('/'));
        Url::parse(&api_base).map_err(|e| {
            HyperbrowserError::ConfigError(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HyperbrowserError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base,
            api_key: config.api_key.clone(),
            timeout_ms: config.timeout.as_millis() as u64,
        })
    }

    pub fn url(&self, path: &str, query: &Query<'_>) -> Result<Url, HyperbrowserError> {
        let mut url = Url::parse(&format!("{}{}", self.api_base, path))
            .map_err(|e| HyperbrowserError::InvalidParams(format!("Invalid request path '{path}': {e}")))?;

        let present: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query<'_>,
    ) -> Result<T, HyperbrowserError> {
        self.request(Method::GET, path, None::<&()>, query).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, HyperbrowserError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), &[]).await
    }

    pub async fn put<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, HyperbrowserError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, body, &[]).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, HyperbrowserError> {
        self.request(Method::DELETE, path, None::<&()>, &[]).await
    }

    /// POST to an absolute URL handed out by the API, with the same
    /// authentication and error handling as relative paths.
    pub async fn post_url<T, B>(&self, url: &str, body: &B) -> Result<T, HyperbrowserError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = Url::parse(url)
            .map_err(|e| HyperbrowserError::InvalidParams(format!("Invalid endpoint URL '{url}': {e}")))?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// Send one request and decode its JSON body.
    ///
    /// A 2xx response with an empty body decodes as `{}`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &Query<'_>,
    ) -> Result<T, HyperbrowserError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        self.send(method, url, body).await
    }

    async fn send<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, HyperbrowserError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = body.map(|b| serde_json::to_vec(b)).transpose()?;

        tracing::debug!(%method, %url, "Sending API request");

        let mut request = self
            .client
            .request(method, url)
            .header("x-api-key", &self.api_key)
            .header(CONTENT_TYPE, "application/json");
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        let status_code = status.as_u16();
        let bytes = response.bytes().await.map_err(|e| self.map_error(e))?;

        if !status.is_success() {
            let message = error_message(&bytes, status_code);
            tracing::debug!(status_code, %message, "API request failed");
            return Err(HyperbrowserError::HttpError {
                message,
                status_code,
            });
        }

        let body: &[u8] = if bytes.trim_ascii().is_empty() {
            b"{}"
        } else {
            &bytes
        };
        serde_json::from_slice(body).map_err(|e| HyperbrowserError::ParseError {
            message: e.to_string(),
            status_code: Some(status_code),
        })
    }

    fn map_error(&self, e: reqwest::Error) -> HyperbrowserError {
        if e.is_timeout() {
            HyperbrowserError::Timeout(self.timeout_ms)
        } else if e.is_connect() {
            HyperbrowserError::NetworkError(format!("Connection failed: {e}"))
        } else {
            HyperbrowserError::NetworkError(e.to_string())
        }
    }
}

/// First non-empty of `message` / `error` in an error body.
fn error_message(body: &[u8], status_code: u16) -> String {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|e| {
            e.message
                .filter(|m| !m.is_empty())
                .or(e.error.filter(|m| !m.is_empty()))
        })
        .unwrap_or_else(|| format!("HTTP error! status: {status_code}"))
}
