use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};

use super::{DateBucket, TaskGroup, TaskRecord, TasksInfo, TasksInfoByGroups, Timestamped};

/// Group records by the calendar day of their creation time.
///
/// Days are taken in the time zone given by `offset`. Buckets come out in
/// ascending calendar order; records inside a bucket keep their input order.
pub fn group_by_date<'a, R, I>(records: I, offset: FixedOffset) -> Vec<DateBucket<&'a R>>
where
    R: Timestamped + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a R>> = BTreeMap::new();

    for record in records {
        let day = record.created_at().with_timezone(&offset).date_naive();
        buckets.entry(day).or_default().push(record);
    }

    buckets
        .into_iter()
        .map(|(date, records)| DateBucket { date, records })
        .collect()
}

/// Count and sum execution times of completed and outstanding tasks.
pub fn summarize_group<'a, R, I>(records: I) -> TasksInfoByGroups
where
    R: TaskRecord + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut completed = TasksInfo::default();
    let mut todo = TasksInfo::default();

    for record in records {
        let partition = if record.is_completed() {
            &mut completed
        } else {
            &mut todo
        };
        partition.count += 1;
        partition.execution_time += record.execution_time().unwrap_or(0.0);
    }

    TasksInfoByGroups {
        completed,
        todo,
        all: completed + todo,
    }
}

/// Group tasks by day and summarise every day.
pub fn grouped_tasks_info<'a, R, I>(records: I, offset: FixedOffset) -> Vec<TaskGroup>
where
    R: TaskRecord + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    group_by_date(records, offset)
        .into_iter()
        .map(|bucket| TaskGroup {
            date: bucket.date,
            tasks: summarize_group(bucket.records),
        })
        .collect()
}
