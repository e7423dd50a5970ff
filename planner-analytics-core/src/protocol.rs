use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::{TaskGroup, TaskRecord, Timestamped};
use crate::stats::{Measurable, SampleSummary, Statistics};

/// A planner task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
    /// Minutes spent on the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    /// Ids of the tags attached to the task.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Timestamped for Task {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TaskRecord for Task {
    fn is_completed(&self) -> bool {
        self.is_completed
    }

    fn execution_time(&self) -> Option<f64> {
        self.execution_time
    }
}

/// A user-defined tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub color: String,
}

/// Direction of a money transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("income"),
            TransactionKind::Expense => f.write_str("expense"),
        }
    }
}

/// Category a transaction is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub title: String,
}

/// A personal-finance transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub value: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, rename = "financesCategory")]
    pub category: Option<CategoryRef>,
    pub created_at: DateTime<Utc>,
}

impl Measurable for Transaction {
    fn measuring_value(&self) -> Option<f64> {
        Some(self.value)
    }
}

/// Most decimal places an `f64` can meaningfully be rounded to.
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Round `value` to `places` decimal places, at most [`MAX_DECIMAL_PLACES`].
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_DECIMAL_PLACES) as i32);
    (value * factor).round() / factor
}

/// Expected-value band of a transaction against one set of comparable transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Trimmed mean of the comparable transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// Deviation of the transaction from the mean, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_percent: Option<f64>,
    /// Why a figure could not be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Spread of the trimmed window, for terminal output only.
    #[serde(skip)]
    pub window: Option<SampleSummary>,
}

impl StatsSummary {
    /// Create a summary with both figures rounded to `places` decimals.
    pub fn computed(mean: f64, deviation_percent: f64, places: u32) -> Self {
        Self {
            mean: Some(round_to(mean, places)),
            deviation_percent: Some(round_to(deviation_percent, places)),
            error: None,
            window: None,
        }
    }

    /// Create a summary for a sample the statistics are undefined on.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            mean: None,
            deviation_percent: None,
            error: Some(error.into()),
            window: None,
        }
    }

    /// Summarise `value` against `stats`, keeping whatever figures are defined.
    pub fn from_statistics(stats: &Statistics, value: f64, places: u32) -> Self {
        let mean = match stats.compute_mean() {
            Ok(mean) => mean,
            Err(e) => return Self::unavailable(e.to_string()),
        };

        let mut summary = match stats.compute_deviation_percent(value) {
            Ok(deviation) => Self::computed(mean, deviation, places),
            Err(e) => Self {
                mean: Some(round_to(mean, places)),
                deviation_percent: None,
                error: Some(e.to_string()),
                window: None,
            },
        };
        summary.window = stats.summary().ok();
        summary
    }

    /// Whether the deviation is above `threshold_percent`.
    pub fn is_anomalous(&self, threshold_percent: f64) -> bool {
        self.deviation_percent
            .is_some_and(|deviation| deviation > threshold_percent)
    }
}

/// Statistics against transactions of the same type and of the same category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableStats {
    pub same_type: StatsSummary,
    /// `None` when the transaction has no category.
    pub same_category: Option<StatsSummary>,
}

/// All-time and current-month statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageValues {
    pub all_time: ComparableStats,
    pub month: ComparableStats,
}

/// A transaction together with its expected-value bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInsights {
    pub transaction: Transaction,
    pub average_values: AverageValues,
}

/// Day series of the tasks carrying one tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAnalytics {
    pub id: String,
    pub title: String,
    pub color: String,
    pub tasks: Vec<TaskGroup>,
}
