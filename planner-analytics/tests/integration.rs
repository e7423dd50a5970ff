//! Integration tests for planner-analytics.
//!
//! These tests load a snapshot from disk and run every query through the
//! store, the services and the JSON response shapes.

use chrono::{FixedOffset, NaiveDate};
use planner_analytics::{
    AnalyticsService, Command, Config, InsightsService, Period, QueryContext, Report,
    ServiceError, SnapshotStore, StoreError,
};
use std::io::Write;
use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"{
    "tasks": [
        { "id": "t1", "userId": "user-1", "title": "Write report",
          "createdAt": "2025-01-13T05:52:25.460Z", "isCompleted": true,
          "executionTime": 30, "tags": ["work"] },
        { "id": "t2", "userId": "user-1", "title": "Review",
          "createdAt": "2025-01-13T11:00:00Z", "executionTime": 20, "tags": ["work"] },
        { "id": "t3", "userId": "user-1", "title": "Groceries",
          "createdAt": "2025-01-28T17:30:00Z", "tags": ["home"] },
        { "id": "t4", "userId": "user-1", "title": "Old task",
          "createdAt": "2024-11-02T09:00:00Z", "isCompleted": true, "executionTime": 60 },
        { "id": "t5", "userId": "user-2", "title": "Not mine",
          "createdAt": "2025-01-28T09:00:00Z" }
    ],
    "tags": [
        { "id": "work", "userId": "user-1", "title": "Work", "color": "RED" },
        { "id": "home", "userId": "user-1", "title": "Home", "color": "GREEN" }
    ],
    "transactions": [
        { "id": "f1", "userId": "user-1", "value": 100, "label": "Rent share",
          "type": "EXPENSE", "financesCategory": { "id": "c-home", "title": "Home" },
          "createdAt": "2025-01-03T10:00:00Z" },
        { "id": "f2", "userId": "user-1", "value": 50, "type": "EXPENSE",
          "financesCategory": { "id": "c-home", "title": "Home" },
          "createdAt": "2025-01-10T10:00:00Z" },
        { "id": "f3", "userId": "user-1", "value": 150, "type": "EXPENSE",
          "createdAt": "2024-12-10T10:00:00Z" },
        { "id": "f4", "userId": "user-1", "value": 2000, "type": "INCOME",
          "createdAt": "2025-01-01T10:00:00Z" }
    ]
}"#;

fn snapshot_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();
    file
}

fn context() -> QueryContext {
    QueryContext::new(
        NaiveDate::from_ymd_opt(2025, 1, 29).unwrap(),
        FixedOffset::east_opt(0).unwrap(),
    )
}

/// The per-day series of a user's tasks, as the JSON response body.
#[test]
fn test_tasks_analytics_json() {
    let file = snapshot_file();
    let store = SnapshotStore::load(file.path()).unwrap();
    let service = AnalyticsService::new(&store, context());

    let groups = service.tasks_analytics("user-1", None).unwrap();
    let json = serde_json::to_value(&groups).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            {
                "date": "02.11.2024",
                "tasks": {
                    "completed": { "count": 1, "executionTime": 60.0 },
                    "todo": { "count": 0, "executionTime": 0.0 },
                    "all": { "count": 1, "executionTime": 60.0 }
                }
            },
            {
                "date": "13.01.2025",
                "tasks": {
                    "completed": { "count": 1, "executionTime": 30.0 },
                    "todo": { "count": 1, "executionTime": 20.0 },
                    "all": { "count": 2, "executionTime": 50.0 }
                }
            },
            {
                "date": "28.01.2025",
                "tasks": {
                    "completed": { "count": 0, "executionTime": 0.0 },
                    "todo": { "count": 1, "executionTime": 0.0 },
                    "all": { "count": 1, "executionTime": 0.0 }
                }
            }
        ])
    );
}

/// Period filters are evaluated against the injected day.
#[test]
fn test_period_filters() {
    let file = snapshot_file();
    let store = SnapshotStore::load(file.path()).unwrap();
    let service = AnalyticsService::new(&store, context());

    let count = |period| service.tasks_analytics("user-1", Some(period)).unwrap().len();
    assert_eq!(count(Period::Week), 1);
    assert_eq!(count(Period::Month), 2);
    assert_eq!(count(Period::Year), 2);
    assert_eq!(count(Period::All), 3);
}

/// Tag series carry the tag's identity and its own day groups.
#[test]
fn test_tags_analytics_json() {
    let file = snapshot_file();
    let store = SnapshotStore::load(file.path()).unwrap();
    let service = AnalyticsService::new(&store, context());

    let tags = service.tags_analytics("user-1", Some(Period::Week)).unwrap();
    let json = serde_json::to_value(&tags).unwrap();

    assert_eq!(json[0]["id"], "work");
    assert_eq!(json[0]["color"], "RED");
    assert_eq!(json[0]["tasks"], serde_json::json!([]));
    assert_eq!(json[1]["id"], "home");
    assert_eq!(json[1]["tasks"][0]["date"], "28.01.2025");

    let single = service.tag_analytics("user-1", "home", Some(Period::Week)).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0], tags[1]);
}

/// Transaction insights, as the JSON response body.
#[test]
fn test_transaction_insights_json() {
    let file = snapshot_file();
    let store = SnapshotStore::load(file.path()).unwrap();
    let service = InsightsService::new(&store, context());

    let insights = service.transaction_insights("user-1", "f1").unwrap();
    let json = serde_json::to_value(&insights).unwrap();

    assert_eq!(json["transaction"]["id"], "f1");
    assert_eq!(json["transaction"]["type"], "EXPENSE");

    // Expenses: 100, 50, 150 -> mean 100
    let all_time = &json["averageValues"]["allTime"];
    assert_eq!(all_time["sameType"]["mean"], 100.0);
    assert_eq!(all_time["sameType"]["deviationPercent"], 0.0);
    // Home category: 100, 50 -> mean 75
    assert_eq!(all_time["sameCategory"]["mean"], 75.0);
    assert_eq!(all_time["sameCategory"]["deviationPercent"], 33.33);

    // January expenses: 100, 50 -> mean 75
    let month = &json["averageValues"]["month"];
    assert_eq!(month["sameType"]["mean"], 75.0);
    assert_eq!(month["sameCategory"]["mean"], 75.0);
}

/// A transaction without a category reports null category statistics.
#[test]
fn test_transaction_without_category() {
    let file = snapshot_file();
    let store = SnapshotStore::load(file.path()).unwrap();
    let service = InsightsService::new(&store, context());

    let insights = service.transaction_insights("user-1", "f3").unwrap();
    let json = serde_json::to_value(&insights).unwrap();

    assert!(json["averageValues"]["allTime"]["sameCategory"].is_null());
    assert!(json["averageValues"]["month"]["sameCategory"].is_null());
    assert_eq!(json["averageValues"]["allTime"]["sameType"]["deviationPercent"], 50.0);
}

/// Users never see each other's records.
#[test]
fn test_user_isolation() {
    let file = snapshot_file();
    let store = SnapshotStore::load(file.path()).unwrap();

    let analytics = AnalyticsService::new(&store, context());
    let groups = analytics.tasks_analytics("user-2", None).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].tasks.all.count, 1);

    assert!(analytics.tags_analytics("user-2", None).unwrap().is_empty());
    assert!(matches!(
        analytics.tag_analytics("user-2", "work", None),
        Err(ServiceError::TagNotFound(_))
    ));

    let insights = InsightsService::new(&store, context());
    assert!(matches!(
        insights.transaction_insights("user-2", "f1"),
        Err(ServiceError::TransactionNotFound(_))
    ));
}

/// Commands dispatch to the right service and report shape.
#[test]
fn test_command_execution() {
    let file = snapshot_file();
    let store = SnapshotStore::load(file.path()).unwrap();
    let config = Config::default();

    let report = Command::Tags { period: None }
        .execute(&store, "user-1", context(), config.analytics.default_period)
        .unwrap();
    assert!(matches!(report, Report::Tags(ref tags) if tags.len() == 2));

    let report = Command::Transaction {
        transaction_id: "f4".to_string(),
    }
    .execute(&store, "user-1", context(), config.analytics.default_period)
    .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    // Untagged: the report serialises as the bare response body
    assert_eq!(json["transaction"]["id"], "f4");
    assert_eq!(json["averageValues"]["allTime"]["sameType"]["mean"], 2000.0);
}

/// A missing or malformed snapshot is reported, not panicked on.
#[test]
fn test_snapshot_errors() {
    let missing = SnapshotStore::load(std::path::Path::new("/nonexistent/snapshot.json"));
    assert!(matches!(missing, Err(StoreError::Read { .. })));

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ \"tasks\": [ { \"id\": 1 } ] }").unwrap();
    let malformed = SnapshotStore::load(file.path());
    assert!(matches!(malformed, Err(StoreError::Parse(_))));
}

#[cfg(test)]
mod reporter_tests {
    use planner_analytics::{JsonReporter, Report, Reporter, TerminalReporter};

    #[test]
    fn test_reporters_with_empty_results() {
        let report = Report::Tasks(Vec::new());

        assert!(JsonReporter::new().report(&report).is_ok());
        assert!(TerminalReporter::without_colors().report(&report).is_ok());
    }
}
