//! HTTP client for the prediction backend.
//!
//! Two endpoints are consumed, both `POST` with a JSON body:
//! `api/predict/fetch_headlines` and `api/predict/predict`. Responses are
//! decoded into typed values before they reach any UI state, so a
//! malformed body surfaces as [`BackendError::Malformed`] instead of
//! corrupting the dashboard.

use crate::models::{HeadlinesRequest, NewsSource, PredictRequest, Prediction};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

const HEADLINES_PATH: &str = "api/predict/fetch_headlines";
const PREDICT_PATH: &str = "api/predict/predict";

/// Longest slice of an error body kept for display.
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("{endpoint} returned an unexpected response: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The remote collaborator the dashboard talks to.
#[async_trait]
pub trait NewsBackend: Send + Sync {
    async fn fetch_headlines(&self, source: NewsSource) -> Result<Vec<String>, BackendError>;

    async fn predict(&self, text: &str) -> Result<Prediction, BackendError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        Self::with_builder(Client::builder(), base_url, timeout)
    }

    /// Client that never routes through a proxy from the environment.
    #[cfg(test)]
    pub(crate) fn without_proxy(
        base_url: Url,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_builder(Client::builder().no_proxy(), base_url, timeout)
    }

    fn with_builder(
        mut builder: reqwest::ClientBuilder,
        base_url: Url,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Append `path` to the base URL's path. Any query on the base URL is
    /// carried over; a fragment is dropped.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_fragment(None);
        // http(s) URLs always have a path to extend.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
        }
        url
    }

    async fn post_json<B, T>(&self, path: &'static str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let transport = |source| BackendError::Transport {
            endpoint: path,
            source,
        };

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;

        if !status.is_success() {
            let body = excerpt(&String::from_utf8_lossy(&bytes));
            warn!(%url, %status, "backend returned an error status");
            return Err(BackendError::Status {
                endpoint: path,
                status,
                body,
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| BackendError::Malformed {
            endpoint: path,
            source,
        })
    }
}

#[async_trait]
impl NewsBackend for HttpBackend {
    async fn fetch_headlines(&self, source: NewsSource) -> Result<Vec<String>, BackendError> {
        let headlines: Vec<String> = self
            .post_json(HEADLINES_PATH, &HeadlinesRequest { source })
            .await?;
        debug!(source = source.as_str(), count = headlines.len(), "fetched headlines");
        Ok(headlines)
    }

    async fn predict(&self, text: &str) -> Result<Prediction, BackendError> {
        let request = PredictRequest {
            text: text.to_string(),
        };
        let prediction: Prediction = self.post_json(PREDICT_PATH, &request).await?;
        debug!(label = %prediction.prediction, confidence = %prediction.confidence, "received prediction");
        Ok(prediction)
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{RawQuery, State},
        http::StatusCode as AxumStatus,
        routing::post,
        Json, Router,
    };
    use std::sync::Arc;
    use tokio::{net::TcpListener, sync::Mutex};

    #[derive(Clone, Default)]
    struct Recorded {
        bodies: Arc<Mutex<Vec<serde_json::Value>>>,
    }

    async fn spawn_backend(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn client(base: Url) -> HttpBackend {
        HttpBackend::without_proxy(base, Some(Duration::from_secs(5))).unwrap()
    }

    async fn record_and_reply_headlines(
        State(rec): State<Recorded>,
        Json(body): Json<serde_json::Value>,
    ) -> Json<Vec<String>> {
        rec.bodies.lock().await.push(body);
        Json(vec!["Headline A".to_string(), "Headline B".to_string()])
    }

    async fn record_and_reply_prediction(
        State(rec): State<Recorded>,
        Json(body): Json<serde_json::Value>,
    ) -> Json<serde_json::Value> {
        rec.bodies.lock().await.push(body);
        Json(serde_json::json!({"prediction": "Real", "confidence": "0.87"}))
    }

    #[tokio::test]
    async fn test_fetch_headlines_sends_source_and_keeps_order() {
        let rec = Recorded::default();
        let router = Router::new()
            .route("/api/predict/fetch_headlines", post(record_and_reply_headlines))
            .with_state(rec.clone());
        let backend = client(spawn_backend(router).await);

        let headlines = backend.fetch_headlines(NewsSource::Bbc).await.unwrap();
        assert_eq!(headlines, vec!["Headline A", "Headline B"]);

        let bodies = rec.bodies.lock().await;
        assert_eq!(bodies.as_slice(), &[serde_json::json!({"source": "bbc"})]);
    }

    #[tokio::test]
    async fn test_predict_sends_exact_text() {
        let rec = Recorded::default();
        let router = Router::new()
            .route("/api/predict/predict", post(record_and_reply_prediction))
            .with_state(rec.clone());
        let backend = client(spawn_backend(router).await);

        let prediction = backend.predict("Stocks rally today").await.unwrap();
        assert_eq!(prediction.prediction, "Real");
        assert_eq!(prediction.confidence.as_str(), "0.87");

        let bodies = rec.bodies.lock().await;
        assert_eq!(
            bodies.as_slice(),
            &[serde_json::json!({"text": "Stocks rally today"})]
        );
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let rec = Recorded::default();
        let router = Router::new()
            .route(
                "/space/api/predict/fetch_headlines",
                post(record_and_reply_headlines),
            )
            .with_state(rec.clone());
        let root = spawn_backend(router).await;
        let base = root.join("space").unwrap();
        assert!(!base.as_str().ends_with('/'));

        let headlines = client(base).fetch_headlines(NewsSource::Toi).await.unwrap();
        assert_eq!(headlines.len(), 2);
        assert_eq!(
            rec.bodies.lock().await.as_slice(),
            &[serde_json::json!({"source": "toi"})]
        );
    }

    #[tokio::test]
    async fn test_base_url_query_stays_out_of_the_path() {
        let queries: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let seen = Arc::clone(&queries);
        let router = Router::new().route(
            "/space/api/predict/predict",
            post(move |RawQuery(query): RawQuery| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().await.push(query);
                    Json(serde_json::json!({"prediction": "Real", "confidence": 0.5}))
                }
            }),
        );
        let root = spawn_backend(router).await;
        let base = root.join("space?token=abc#top").unwrap();

        let backend = client(base);
        assert_eq!(
            backend.endpoint(PREDICT_PATH).as_str(),
            format!("{root}space/api/predict/predict?token=abc")
        );

        let prediction = backend.predict("hi").await.unwrap();
        assert_eq!(prediction.confidence.as_str(), "0.5");
        assert_eq!(queries.lock().await.as_slice(), &[Some("token=abc".to_string())]);
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let backend = client(Url::parse("http://example.test/space/").unwrap());
        assert_eq!(
            backend.endpoint(HEADLINES_PATH).as_str(),
            "http://example.test/space/api/predict/fetch_headlines"
        );
        let bare = client(Url::parse("http://example.test").unwrap());
        assert_eq!(
            bare.endpoint(PREDICT_PATH).as_str(),
            "http://example.test/api/predict/predict"
        );
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/api/predict/predict",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "model not loaded") }),
        );
        let backend = client(spawn_backend(router).await);

        match backend.predict("anything").await {
            Err(BackendError::Status { status, body, .. }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "model not loaded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_headlines_are_rejected() {
        let router = Router::new().route(
            "/api/predict/fetch_headlines",
            post(|| async { Json(serde_json::json!({"headlines": ["nested"]})) }),
        );
        let backend = client(spawn_backend(router).await);

        let err = backend.fetch_headlines(NewsSource::Bbc).await.unwrap_err();
        assert!(matches!(err, BackendError::Malformed { endpoint: HEADLINES_PATH, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = client(Url::parse(&format!("http://{addr}")).unwrap());
        let err = backend.fetch_headlines(NewsSource::Bbc).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport { .. }));
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), BODY_EXCERPT_CHARS + 3);
        assert_eq!(excerpt("  short \n"), "short");
    }
}
