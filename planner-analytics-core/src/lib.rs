//! Core types and algorithms for planner-analytics.
//!
//! This crate holds the pure parts of the analytics engine: the trimmed-mean
//! statistics used to judge finance transactions, the date bucketing and
//! period filtering of task series, the record and response types shared with
//! callers, and the reporters that render them.

pub mod analytics;
pub mod protocol;
pub mod report;
pub mod stats;

// Re-export main types for convenience
pub use analytics::{
    filter_by_period, group_by_date, grouped_tasks_info, summarize_group, DateBucket, Period,
    TaskGroup, TaskRecord, TasksInfo, TasksInfoByGroups, Timestamped, WeekStart,
};
pub use protocol::{
    AverageValues, CategoryRef, ComparableStats, StatsSummary, Tag, TagAnalytics, Task,
    Transaction, TransactionInsights, TransactionKind,
};
pub use report::{JsonReporter, Report, ReportError, Reporter, TerminalReporter};
pub use stats::{DatasetSize, Measurable, SampleSummary, Statistics, StatisticsError};
