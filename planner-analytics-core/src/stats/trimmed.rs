use statrs::statistics::Statistics as Descriptive;
use tracing::debug;

use super::{DatasetSize, Measurable, SampleSummary, StatisticsError};

/// Trimmed-mean statistics over a numeric sample.
///
/// The sample is copied and sorted ascending on construction. The mean is taken
/// over the sorted window `[trim, n - trim)`, where `trim` depends on the
/// [`DatasetSize`] of the sample, so a few extreme values at either end do not
/// drag the expected value around.
#[derive(Debug, Clone)]
pub struct Statistics {
    values: Vec<f64>,
    size: DatasetSize,
}

impl Statistics {
    /// Build statistics from any records, reading the measuring value with `accessor`.
    ///
    /// Missing and non-finite values are counted as `0.0`.
    pub fn new<T, F>(sample: &[T], accessor: F) -> Self
    where
        F: Fn(&T) -> Option<f64>,
    {
        Self::from_values(
            sample.iter().map(|record| {
                accessor(record)
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0)
            }),
        )
    }

    /// Build statistics from records that know their own measuring value.
    pub fn from_records<T: Measurable>(sample: &[T]) -> Self {
        Self::new(sample, T::measuring_value)
    }

    /// Build statistics from plain numbers.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.into_iter().collect();
        // sort_by is stable, equal values keep their input order
        values.sort_by(f64::total_cmp);

        let size = DatasetSize::classify(values.len());
        debug!(
            len = values.len(),
            ?size,
            trim = size.trim_count(values.len()),
            "classified sample"
        );

        Self { values, size }
    }

    /// Number of values in the sample.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sample has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Size class of the sample.
    pub fn dataset_size(&self) -> DatasetSize {
        self.size
    }

    /// Number of values dropped from each end of the sorted sample.
    pub fn trim_count(&self) -> usize {
        self.size.trim_count(self.values.len())
    }

    /// The sorted values the mean is computed over.
    fn window(&self) -> Result<&[f64], StatisticsError> {
        let trim = self.trim_count();
        let len = self.values.len();

        if len == 0 || 2 * trim >= len {
            return Err(StatisticsError::EmptySample);
        }

        Ok(&self.values[trim..len - trim])
    }

    /// Trimmed arithmetic mean of the sample.
    pub fn compute_mean(&self) -> Result<f64, StatisticsError> {
        let window = self.window()?;
        let sum: f64 = window.iter().sum();
        Ok(sum / window.len() as f64)
    }

    /// Distance of `value` from the trimmed mean, as a percentage of the mean.
    pub fn compute_deviation_percent(&self, value: f64) -> Result<f64, StatisticsError> {
        let mean = self.compute_mean()?;
        if mean == 0.0 {
            return Err(StatisticsError::ZeroMean);
        }

        let deviation = (value - mean).abs() / mean;
        Ok(deviation * 100.0)
    }

    /// Descriptive figures for the trimmed window.
    pub fn summary(&self) -> Result<SampleSummary, StatisticsError> {
        let window = self.window()?;

        Ok(SampleSummary {
            sample_count: self.values.len(),
            trim_count: self.trim_count(),
            min: Descriptive::min(window.iter()),
            max: Descriptive::max(window.iter()),
            std_dev: Descriptive::std_dev(window.iter()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        value: Option<f64>,
    }

    impl Measurable for Entry {
        fn measuring_value(&self) -> Option<f64> {
            self.value
        }
    }

    fn entries(values: &[f64]) -> Vec<Entry> {
        values.iter().map(|&v| Entry { value: Some(v) }).collect()
    }

    #[test]
    fn test_small_dataset_excludes_nothing() {
        let stats = Statistics::from_records(&entries(&[10.0, 20.0, 30.0, 40.0]));

        assert_eq!(stats.dataset_size(), DatasetSize::Small);
        assert_eq!(stats.trim_count(), 0);
        assert_eq!(stats.compute_mean().unwrap(), 25.0);
    }

    #[test]
    fn test_medium_dataset_trims_ten_percent() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let stats = Statistics::from_records(&entries(&values));

        assert_eq!(stats.dataset_size(), DatasetSize::Medium);
        assert_eq!(stats.trim_count(), 1);
        assert!((stats.compute_mean().unwrap() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_large_dataset_trims_five_percent() {
        let values: Vec<f64> = (1..=21).map(f64::from).collect();
        let stats = Statistics::from_values(values);

        assert_eq!(stats.dataset_size(), DatasetSize::Large);
        // ceil(0.05 * 21) = 2
        assert_eq!(stats.trim_count(), 2);
        assert!((stats.compute_mean().unwrap() - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_trimming_is_symmetric() {
        let stats = Statistics::from_values([
            1000.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, -1000.0,
        ]);

        // One value goes from each end: both outliers are dropped.
        assert!((stats.compute_mean().unwrap() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_unsorted_input_is_sorted_before_trimming() {
        let stats = Statistics::from_values([50.0, 10.0, 40.0, 20.0, 30.0]);

        // n = 5, trim = ceil(0.5) = 1, window = [20, 30, 40]
        assert!((stats.compute_mean().unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_deviation_percent() {
        let stats = Statistics::from_records(&entries(&[10.0, 20.0, 30.0, 40.0, 50.0]));

        let deviation = stats.compute_deviation_percent(45.0).unwrap();
        assert!((deviation - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_deviation_percent_below_mean_is_positive() {
        let stats = Statistics::from_values([10.0, 20.0, 30.0, 40.0, 50.0]);

        let deviation = stats.compute_deviation_percent(15.0).unwrap();
        assert!((deviation - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_mean_is_idempotent() {
        let stats = Statistics::from_values([3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);

        let first = stats.compute_mean().unwrap();
        let second = stats.compute_mean().unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_caller_sample_is_not_reordered() {
        let sample = entries(&[30.0, 10.0, 20.0]);
        let _stats = Statistics::from_records(&sample);

        let order: Vec<f64> = sample.iter().filter_map(|e| e.value).collect();
        assert_eq!(order, vec![30.0, 10.0, 20.0]);
    }

    #[test]
    fn test_missing_and_non_finite_values_count_as_zero() {
        let sample = vec![
            Entry { value: None },
            Entry { value: Some(10.0) },
            Entry { value: Some(f64::NAN) },
            Entry { value: Some(30.0) },
        ];
        let stats = Statistics::from_records(&sample);

        assert_eq!(stats.compute_mean().unwrap(), 10.0);
    }

    #[test]
    fn test_custom_accessor() {
        let pairs = [("a", 2.0), ("b", 4.0)];
        let stats = Statistics::new(&pairs, |(_, v)| Some(*v));

        assert_eq!(stats.compute_mean().unwrap(), 3.0);
    }

    #[test]
    fn test_empty_sample() {
        let stats = Statistics::from_values(Vec::new());

        assert!(stats.is_empty());
        assert_eq!(stats.dataset_size(), DatasetSize::Medium);
        assert_eq!(stats.compute_mean(), Err(StatisticsError::EmptySample));
        assert_eq!(
            stats.compute_deviation_percent(10.0),
            Err(StatisticsError::EmptySample)
        );
        assert!(stats.summary().is_err());
    }

    #[test]
    fn test_zero_mean() {
        let stats = Statistics::from_values([0.0, 0.0, 0.0]);

        assert_eq!(stats.compute_mean(), Ok(0.0));
        assert_eq!(
            stats.compute_deviation_percent(5.0),
            Err(StatisticsError::ZeroMean)
        );
    }

    #[test]
    fn test_dataset_size_bounds() {
        assert_eq!(DatasetSize::classify(1), DatasetSize::Small);
        assert_eq!(DatasetSize::classify(4), DatasetSize::Small);
        assert_eq!(DatasetSize::classify(5), DatasetSize::Medium);
        assert_eq!(DatasetSize::classify(20), DatasetSize::Medium);
        assert_eq!(DatasetSize::classify(21), DatasetSize::Large);
        assert_eq!(DatasetSize::classify(0), DatasetSize::Medium);
    }

    #[test]
    fn test_trim_never_empties_window() {
        for len in 1..200 {
            let size = DatasetSize::classify(len);
            assert!(2 * size.trim_count(len) < len, "len {len} trims everything");
        }
    }

    #[test]
    fn test_summary_of_window() {
        let stats = Statistics::from_values([10.0, 20.0, 30.0, 40.0, 50.0]);
        let summary = stats.summary().unwrap();

        assert_eq!(summary.sample_count, 5);
        assert_eq!(summary.trim_count, 1);
        assert_eq!(summary.min, 20.0);
        assert_eq!(summary.max, 40.0);
        assert!((summary.std_dev - 10.0).abs() < 1e-9);
    }
}
