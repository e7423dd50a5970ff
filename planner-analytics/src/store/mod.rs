use std::path::PathBuf;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc,
};
use planner_analytics_core::{Tag, Task, Transaction, TransactionKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Inclusive range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// From the first to the last millisecond of the calendar month holding `day`,
    /// with month boundaries taken in `offset`.
    pub fn month_of(day: NaiveDate, offset: FixedOffset) -> Self {
        let first = day - Days::new(u64::from(day.day0()));
        let next = first + Months::new(1);

        let start = local_midnight(first, offset);
        let end = local_midnight(next, offset) - TimeDelta::milliseconds(1);
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

fn local_midnight(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::default());
    let utc = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&utc)
}

/// Which of a user's transactions to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub user_id: String,
    pub kind: Option<TransactionKind>,
    pub category_id: Option<String>,
    pub period: Option<DateRange>,
}

impl TransactionFilter {
    /// All transactions of `user_id`.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: None,
            category_id: None,
            period: None,
        }
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn within(mut self, period: DateRange) -> Self {
        self.period = Some(period);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if transaction.user_id != self.user_id {
            return false;
        }
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(category_id) = &self.category_id {
            match &transaction.category {
                Some(category) if &category.id == category_id => {}
                _ => return false,
            }
        }
        if let Some(period) = &self.period {
            if !period.contains(transaction.created_at) {
                return false;
            }
        }
        true
    }
}

/// Read access to the records the analytics run over.
pub trait RecordStore: Send + Sync {
    fn tasks(&self, user_id: &str) -> Result<Vec<Task>, StoreError>;

    fn tags(&self, user_id: &str) -> Result<Vec<Tag>, StoreError>;

    fn tag(&self, user_id: &str, tag_id: &str) -> Result<Option<Tag>, StoreError>;

    /// Tasks of `user_id` that carry the tag `tag_id`.
    fn tag_tasks(&self, user_id: &str, tag_id: &str) -> Result<Vec<Task>, StoreError>;

    fn transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, StoreError>;

    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError>;
}

mod snapshot;
pub use snapshot::{Snapshot, SnapshotStore};
