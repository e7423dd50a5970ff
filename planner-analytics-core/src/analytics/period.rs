use chrono::{Datelike, NaiveDate};

use super::{Period, TaskGroup, WeekStart};

/// Whether `date` lies in the same calendar week, month or year as `today`.
///
/// [`Period::All`] accepts every date.
pub fn is_within_period(
    date: NaiveDate,
    period: Period,
    today: NaiveDate,
    week_start: WeekStart,
) -> bool {
    match period {
        Period::All => true,
        Period::Week => {
            let start = week_start.weekday();
            date.week(start).first_day() == today.week(start).first_day()
        }
        Period::Month => date.year() == today.year() && date.month() == today.month(),
        Period::Year => date.year() == today.year(),
    }
}

/// Keep the groups that fall in the current `period`, relative to `today`.
pub fn filter_by_period(
    groups: Vec<TaskGroup>,
    period: Period,
    today: NaiveDate,
    week_start: WeekStart,
) -> Vec<TaskGroup> {
    if period == Period::All {
        return groups;
    }

    groups
        .into_iter()
        .filter(|group| is_within_period(group.date, period, today, week_start))
        .collect()
}
