use planner_analytics_core::{
    filter_by_period, grouped_tasks_info, Period, Tag, TagAnalytics, TaskGroup,
};
use tracing::debug;

use super::{QueryContext, ServiceError};
use crate::store::RecordStore;

/// Day series of task counts and execution times.
pub struct AnalyticsService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    context: QueryContext,
}

impl<'a, S: RecordStore + ?Sized> AnalyticsService<'a, S> {
    pub fn new(store: &'a S, context: QueryContext) -> Self {
        Self { store, context }
    }

    /// Per-day summary of all of the user's tasks.
    ///
    /// `None` leaves the series unfiltered, the same as [`Period::All`].
    pub fn tasks_analytics(
        &self,
        user_id: &str,
        period: Option<Period>,
    ) -> Result<Vec<TaskGroup>, ServiceError> {
        let tasks = self.store.tasks(user_id)?;
        let groups = self.narrow(grouped_tasks_info(&tasks, self.context.offset), period);

        debug!(
            user_id,
            tasks = tasks.len(),
            days = groups.len(),
            period = %period.unwrap_or_default(),
            "computed tasks analytics"
        );
        Ok(groups)
    }

    /// Per-day summary of the tasks under each of the user's tags.
    pub fn tags_analytics(
        &self,
        user_id: &str,
        period: Option<Period>,
    ) -> Result<Vec<TagAnalytics>, ServiceError> {
        let tags = self.store.tags(user_id)?;

        let mut analytics = Vec::with_capacity(tags.len());
        for tag in tags {
            analytics.push(self.tag_series(user_id, tag, period)?);
        }

        debug!(user_id, tags = analytics.len(), "computed tags analytics");
        Ok(analytics)
    }

    /// Per-day summary of the tasks under one tag.
    ///
    /// The result is a one-element list, in the same shape as
    /// [`tags_analytics`](Self::tags_analytics).
    pub fn tag_analytics(
        &self,
        user_id: &str,
        tag_id: &str,
        period: Option<Period>,
    ) -> Result<Vec<TagAnalytics>, ServiceError> {
        let tag = self
            .store
            .tag(user_id, tag_id)?
            .ok_or_else(|| ServiceError::TagNotFound(tag_id.to_string()))?;

        Ok(vec![self.tag_series(user_id, tag, period)?])
    }

    fn tag_series(
        &self,
        user_id: &str,
        tag: Tag,
        period: Option<Period>,
    ) -> Result<TagAnalytics, ServiceError> {
        let tasks = self.store.tag_tasks(user_id, &tag.id)?;
        let groups = self.narrow(grouped_tasks_info(&tasks, self.context.offset), period);

        Ok(TagAnalytics {
            id: tag.id,
            title: tag.title,
            color: tag.color,
            tasks: groups,
        })
    }

    fn narrow(&self, groups: Vec<TaskGroup>, period: Option<Period>) -> Vec<TaskGroup> {
        match period {
            Some(period) => filter_by_period(
                groups,
                period,
                self.context.today,
                self.context.week_start,
            ),
            None => groups,
        }
    }
}
