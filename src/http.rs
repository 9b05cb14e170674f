//! Outbound HTTP client.
//!
//! Business logic talks to [`HttpClient`]. [`ReqwestClient`] does the actual
//! request, and [`Traced`] wraps any client with spans without touching
//! requests or responses.

use bytes::Bytes;
use core::future::Future;
use core::time::Duration;
use tracing::{Instrument, Level, event, field};

use crate::config::InstrumentationConfig;
use crate::error::Error;

/// Timeout of an outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Response of a downstream call whose body is not read yet.
///
/// The body stream is released when this is consumed or dropped.
#[derive(Debug)]
pub struct DownstreamResponse {
    inner: reqwest::Response,
}

impl DownstreamResponse {
    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Reads the entire body.
    pub async fn into_bytes(self) -> Result<Bytes, Error> {
        self.inner.bytes().await
            .map_err(|e| Error::BodyReadFailure(e.to_string()))
    }
}

impl From<reqwest::Response> for DownstreamResponse {
    fn from(inner: reqwest::Response) -> Self {
        Self { inner }
    }
}

/// Client that issues GET requests.
pub trait HttpClient {
    /// Sends a GET request and returns once the response head arrives.
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<DownstreamResponse, Error>> + Send;
}

/// Plain `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with [`DEFAULT_TIMEOUT`].
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a client with a given timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::TransportFailure(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<DownstreamResponse, Error> {
        let res = self.client.get(url)
            .send().await
            .map_err(|e| Error::TransportFailure(e.to_string()))?;
        Ok(res.into())
    }
}

/// Client wrapped with a span per request.
#[derive(Clone, Debug)]
pub struct Traced<C> {
    inner: C,
    config: InstrumentationConfig,
}

impl<C> Traced<C> {
    /// Wraps a given client.
    pub fn new(inner: C, config: InstrumentationConfig) -> Self {
        Self { inner, config }
    }

    /// Returns the wrapped client.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> HttpClient for Traced<C>
where
    C: HttpClient + Sync,
{
    async fn get(&self, url: &str) -> Result<DownstreamResponse, Error> {
        if !self.config.enabled {
            return self.inner.get(url).await;
        }
        let span = tracing::info_span!(
            "http.request",
            http.method = "GET",
            http.url = url,
            http.status_code = field::Empty,
            peer.hostname = field::Empty,
            service = self.config.service.as_deref(),
            env = self.config.env.as_deref(),
        );
        if let Some(host) = url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
        {
            span.record("peer.hostname", host.as_str());
        }
        let time = std::time::Instant::now();
        let traced_span = span.clone();
        async move {
            let res = self.inner.get(url).await;
            match &res {
                Ok(res) => {
                    traced_span.record("http.status_code", res.status());
                    event!(
                        Level::INFO,
                        "downstream responded {} in {} μs",
                        res.status(),
                        time.elapsed().as_micros(),
                    );
                },
                Err(e) => {
                    event!(
                        Level::ERROR,
                        "downstream request failed in {} μs: {}",
                        time.elapsed().as_micros(),
                        e,
                    );
                },
            };
            res
        }
            .instrument(span)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve_once, unreachable_url};

    #[tokio::test]
    async fn reqwest_client_returns_status_and_body() {
        let url = serve_once(
            "HTTP/1.1 201 Created\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
        ).await;
        let client = ReqwestClient::new().unwrap();
        let res = client.get(&url).await.unwrap();
        assert_eq!(res.status(), 201);
        assert_eq!(&res.into_bytes().await.unwrap()[..], b"ok");
    }

    #[tokio::test]
    async fn reqwest_client_reports_unreachable_target() {
        let url = unreachable_url().await;
        let client = ReqwestClient::new().unwrap();
        let err = client.get(&url).await.unwrap_err();
        assert!(matches!(err, Error::TransportFailure(_)));
    }

    #[tokio::test]
    async fn truncated_body_is_body_read_failure() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
        ).await;
        let client = ReqwestClient::new().unwrap();
        let res = client.get(&url).await.unwrap();
        let err = res.into_bytes().await.unwrap_err();
        assert!(matches!(err, Error::BodyReadFailure(_)));
    }

    #[tokio::test]
    async fn traced_client_passes_response_through() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnope",
        ).await;
        let client = Traced::new(
            ReqwestClient::new().unwrap(),
            InstrumentationConfig::default(),
        );
        let res = client.get(&url).await.unwrap();
        assert_eq!(res.status(), 404);
        assert_eq!(&res.into_bytes().await.unwrap()[..], b"nope");
    }

    #[tokio::test]
    async fn disabled_traced_client_delegates() {
        let url = unreachable_url().await;
        let client = Traced::new(
            ReqwestClient::new().unwrap(),
            InstrumentationConfig {
                enabled: false,
                ..Default::default()
            },
        );
        let err = client.get(&url).await.unwrap_err();
        assert!(matches!(err, Error::TransportFailure(_)));
    }
}
