//! Shared HTTP plumbing for the network-backed collaborators.
//!
//! The [`Geocoder`](snowday_core::Geocoder) and
//! [`ForecastProvider`](snowday_core::ForecastProvider) traits are synchronous
//! so the core stays embeddable in synchronous callers. [`JsonFetcher`]
//! bridges to `reqwest` by blocking on a Tokio runtime it owns, or on the
//! caller's multi-threaded runtime when one is already running.

use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use snowday_core::FetchError;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Default user agent for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = "snowday-engine/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error type for provider construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The configured base URL could not be parsed.
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, reason } => {
                write!(f, "invalid base URL {url:?}: {reason}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { .. } => None,
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Connection settings shared by the HTTP providers.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Base URL of the service, e.g. `"https://api.open-meteo.com"`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpProviderConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking JSON-over-HTTP client.
pub(crate) struct JsonFetcher {
    client: Client,
    runtime: Runtime,
    base_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for JsonFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFetcher")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl JsonFetcher {
    pub(crate) fn new(config: &HttpProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Base URL with `segments` appended to its path.
    pub(crate) fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Returns `Ok(None)` when the service answers 404.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>, FetchError> {
        self.block_on(self.get_json_async(url))
    }

    async fn get_json_async<T: DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<Option<T>, FetchError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("{url} answered 404");
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        let body = response
            .json::<T>()
            .await
            .map_err(|err| FetchError::ParseError {
                message: err.to_string(),
            })?;
        Ok(Some(body))
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::HttpError {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FetchError::NetworkError {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        // block_in_place needs a multi-threaded runtime; anything else runs
        // on the owned runtime.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ProviderBuildError> {
    let url = Url::parse(raw).map_err(|err| ProviderBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ProviderBuildError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: "expected an http or https URL".to_owned(),
        });
    }
    Ok(url)
}
