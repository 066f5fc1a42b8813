use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Upstream headline feed the backend should scrape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NewsSource {
    #[default]
    Bbc,
    Toi,
}

impl NewsSource {
    pub const ALL: [NewsSource; 2] = [NewsSource::Bbc, NewsSource::Toi];

    /// Wire value sent in the `source` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsSource::Bbc => "bbc",
            NewsSource::Toi => "toi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NewsSource::Bbc => "BBC",
            NewsSource::Toi => "Times of India",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            NewsSource::Bbc => NewsSource::Toi,
            NewsSource::Toi => NewsSource::Bbc,
        }
    }

    pub fn previous(&self) -> Self {
        // Only two feeds, so stepping back is the same as stepping forward.
        self.next()
    }
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlinesRequest {
    pub source: NewsSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Classifier verdict for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    pub confidence: Confidence,
}

/// Confidence exactly as the backend reported it.
///
/// The backend does not pin down a type, so the value is kept as display
/// text. JSON strings are taken verbatim and JSON numbers keep their
/// textual form; anything else is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Confidence(String);

impl Confidence {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Confidence(s)),
            serde_json::Value::Number(n) => Ok(Confidence(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "confidence must be a string or number, got {other}"
            ))),
        }
    }
}

/// Lifecycle of the most recent request issued for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}
