use serde::Serialize;
use thiserror::Error;

use crate::analytics::TaskGroup;
use crate::protocol::{TagAnalytics, TransactionInsights};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of one analytics query, ready to be rendered.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Tasks(Vec<TaskGroup>),
    Tags(Vec<TagAnalytics>),
    Transaction(Box<TransactionInsights>),
}

pub trait Reporter: Send + Sync {
    fn report(&self, report: &Report) -> Result<(), ReportError>;
}

mod json;
mod terminal;
pub use json::JsonReporter;
pub use terminal::{TerminalReporter, DEFAULT_ANOMALY_THRESHOLD};
