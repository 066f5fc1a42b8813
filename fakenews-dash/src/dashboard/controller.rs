//! Dashboard state and the operations that mutate it.
//!
//! Remote calls run on spawned tokio tasks. Each result comes back over a
//! channel as a [`Completion`] and is applied on the UI thread through
//! [`DashboardController::apply`]. The headline slot and the prediction
//! slot each keep a sequence counter; a completion only lands if it carries
//! the latest sequence issued for its slot, so a slow response can never
//! overwrite a newer one.

use crate::backend::{BackendError, NewsBackend};
use crate::models::{DisplayMode, NewsSource, Prediction, RequestStatus};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub source: NewsSource,
    pub display_mode: DisplayMode,
    pub input_text: String,
    pub headlines: Vec<String>,
    pub prediction: Option<Prediction>,
    pub headlines_status: RequestStatus,
    pub prediction_status: RequestStatus,
    pub last_refreshed: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum Completion {
    Headlines {
        seq: u64,
        source: NewsSource,
        result: Result<Vec<String>, BackendError>,
    },
    Prediction {
        seq: u64,
        result: Result<Prediction, BackendError>,
    },
}

pub struct DashboardController {
    backend: Arc<dyn NewsBackend>,
    state: DashboardState,
    completions: UnboundedSender<Completion>,
    headlines_seq: u64,
    prediction_seq: u64,
}

impl DashboardController {
    /// Build a controller and the receiver its completions arrive on.
    ///
    /// Nothing is fetched until [`mount`](Self::mount) is called.
    pub fn new(
        backend: Arc<dyn NewsBackend>,
        initial: DashboardState,
    ) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            backend,
            state: initial,
            completions: tx,
            headlines_seq: 0,
            prediction_seq: 0,
        };
        (controller, rx)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// First render: load headlines for whatever source is selected.
    pub fn mount(&mut self) {
        self.refresh_headlines();
    }

    pub fn set_source(&mut self, source: NewsSource) {
        if self.state.source == source {
            return;
        }
        info!(from = self.state.source.as_str(), to = source.as_str(), "source changed");
        self.state.source = source;
        self.refresh_headlines();
    }

    pub fn refresh_headlines(&mut self) {
        self.headlines_seq += 1;
        let seq = self.headlines_seq;
        let source = self.state.source;
        self.state.headlines_status = RequestStatus::Pending;
        debug!(seq, source = source.as_str(), "requesting headlines");

        let backend = Arc::clone(&self.backend);
        let tx = self.completions.clone();
        tokio::spawn(async move {
            let result = backend.fetch_headlines(source).await;
            // Receiver gone means the dashboard is shutting down.
            let _ = tx.send(Completion::Headlines {
                seq,
                source,
                result,
            });
        });
    }

    pub fn analyze_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.prediction_seq += 1;
        let seq = self.prediction_seq;
        self.state.prediction_status = RequestStatus::Pending;
        debug!(seq, chars = text.chars().count(), "requesting prediction");

        let backend = Arc::clone(&self.backend);
        let tx = self.completions.clone();
        tokio::spawn(async move {
            let result = backend.predict(&text).await;
            let _ = tx.send(Completion::Prediction { seq, result });
        });
    }

    pub fn analyze_input(&mut self) {
        let text = self.state.input_text.clone();
        self.analyze_text(text);
    }

    /// Analyze a headline by position. Out-of-range indices are ignored.
    pub fn analyze_headline(&mut self, index: usize) -> bool {
        match self.state.headlines.get(index) {
            Some(headline) => {
                let text = headline.clone();
                self.analyze_text(text);
                true
            }
            None => false,
        }
    }

    pub fn toggle_display_mode(&mut self) {
        self.state.display_mode = self.state.display_mode.toggled();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.state.input_text.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.state.input_text.pop();
    }

    /// Apply a finished request. Returns `false` when the completion was
    /// superseded by a newer request for the same slot and was dropped.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Headlines {
                seq,
                source,
                result,
            } => {
                if seq != self.headlines_seq {
                    debug!(seq, latest = self.headlines_seq, "dropping stale headlines response");
                    return false;
                }
                match result {
                    Ok(headlines) => {
                        info!(source = source.as_str(), count = headlines.len(), "headlines updated");
                        self.state.headlines = headlines;
                        self.state.headlines_status = RequestStatus::Succeeded;
                        self.state.last_refreshed = Some(Utc::now());
                    }
                    Err(err) => {
                        warn!(source = source.as_str(), error = %err, "headline fetch failed");
                        self.state.headlines_status = RequestStatus::Failed(err.to_string());
                    }
                }
                true
            }
            Completion::Prediction { seq, result } => {
                if seq != self.prediction_seq {
                    debug!(seq, latest = self.prediction_seq, "dropping stale prediction response");
                    return false;
                }
                match result {
                    Ok(prediction) => {
                        info!(label = %prediction.prediction, confidence = %prediction.confidence, "prediction updated");
                        self.state.prediction = Some(prediction);
                        self.state.prediction_status = RequestStatus::Succeeded;
                    }
                    Err(err) => {
                        warn!(error = %err, "prediction failed");
                        self.state.prediction_status = RequestStatus::Failed(err.to_string());
                    }
                }
                true
            }
        }
    }
}
