//! planner-analytics: task analytics and transaction insights
//!
//! This library answers analytics queries over a snapshot of planner records:
//! per-day task summaries (overall and per tag) narrowed to the current week,
//! month or year, and trimmed-mean comparisons of a finance transaction against
//! the user's similar transactions.

pub mod cli;
pub mod config;
pub mod service;
pub mod store;

// Re-export core types for convenience
pub use planner_analytics_core::protocol;
pub use planner_analytics_core::report::{
    JsonReporter, Report, ReportError, Reporter, TerminalReporter,
};
pub use planner_analytics_core::{Period, Statistics, WeekStart};

// Re-export main types from this crate
pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use service::{AnalyticsService, InsightsService, QueryContext, ServiceError};
pub use store::{DateRange, RecordStore, Snapshot, SnapshotStore, StoreError, TransactionFilter};
