use planner_analytics_core::{
    AverageValues, ComparableStats, Statistics, StatsSummary, Transaction, TransactionInsights,
};
use tracing::{debug, warn};

use super::{QueryContext, ServiceError};
use crate::store::{DateRange, RecordStore, TransactionFilter};

/// Expected-value bands for finance transactions.
pub struct InsightsService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    context: QueryContext,
}

impl<'a, S: RecordStore + ?Sized> InsightsService<'a, S> {
    pub fn new(store: &'a S, context: QueryContext) -> Self {
        Self { store, context }
    }

    /// Compare a transaction against the user's other transactions.
    ///
    /// The comparison sets are transactions of the same type and, when the
    /// transaction has a category, of the same category. Each is taken once
    /// over all time and once over the current calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::TransactionNotFound`] if the user has no
    /// transaction with this id.
    pub fn transaction_insights(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionInsights, ServiceError> {
        let transaction = self
            .store
            .transaction(user_id, transaction_id)?
            .ok_or_else(|| ServiceError::TransactionNotFound(transaction_id.to_string()))?;

        let this_month = DateRange::month_of(self.context.today, self.context.offset);
        let same_type = TransactionFilter::for_user(user_id).with_kind(transaction.kind);
        let same_category = transaction
            .category
            .as_ref()
            .map(|category| TransactionFilter::for_user(user_id).with_category(&category.id));

        let all_time = ComparableStats {
            same_type: self.summarize(&same_type, &transaction)?,
            same_category: self.summarize_optional(same_category.as_ref(), &transaction)?,
        };
        let month = ComparableStats {
            same_type: self.summarize(&same_type.clone().within(this_month), &transaction)?,
            same_category: self.summarize_optional(
                same_category.map(|filter| filter.within(this_month)).as_ref(),
                &transaction,
            )?,
        };

        Ok(TransactionInsights {
            transaction,
            average_values: AverageValues { all_time, month },
        })
    }

    fn summarize_optional(
        &self,
        filter: Option<&TransactionFilter>,
        transaction: &Transaction,
    ) -> Result<Option<StatsSummary>, ServiceError> {
        filter
            .map(|filter| self.summarize(filter, transaction))
            .transpose()
    }

    fn summarize(
        &self,
        filter: &TransactionFilter,
        transaction: &Transaction,
    ) -> Result<StatsSummary, ServiceError> {
        let comparable = self.store.transactions(filter)?;
        let stats = Statistics::from_records(&comparable);
        let summary =
            StatsSummary::from_statistics(&stats, transaction.value, self.context.decimal_places);

        match &summary.error {
            Some(error) => warn!(
                transaction_id = %transaction.id,
                comparable = comparable.len(),
                %error,
                "statistics undefined for comparison set"
            ),
            None => debug!(
                transaction_id = %transaction.id,
                comparable = comparable.len(),
                trimmed = stats.trim_count(),
                mean = ?summary.mean,
                deviation_percent = ?summary.deviation_percent,
                "summarized comparison set"
            ),
        }
        Ok(summary)
    }
}
