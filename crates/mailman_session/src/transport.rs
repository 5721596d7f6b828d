use std::fmt;
use std::time::Duration;

use mailman_core::FormPayload;
use reqwest::header::CONTENT_TYPE;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Status and undecoded body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    ClientBuild,
    Timeout,
    Network,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::ClientBuild => write!(f, "client setup failed"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One blocking round trip per call. Implementations keep cookies between
/// calls so the admin login carries over to later requests.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;

    /// POST `payload` as `application/x-www-form-urlencoded`, repeated keys
    /// included.
    fn post_form(&self, url: &Url, payload: &FormPayload) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| TransportError::new(TransportErrorKind::ClientBuild, err.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(map_reqwest_error)?;
        read_response(response)
    }

    fn post_form(&self, url: &Url, payload: &FormPayload) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .form(payload.pairs())
            .send()
            .map_err(map_reqwest_error)?;
        read_response(response)
    }
}

fn read_response(response: reqwest::blocking::Response) -> Result<RawResponse, TransportError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());
    let body = response.bytes().map_err(map_reqwest_error)?.to_vec();
    Ok(RawResponse {
        status,
        content_type,
        body,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, err.to_string());
    }
    TransportError::new(TransportErrorKind::Network, err.to_string())
}
