use thiserror::Error;

/// Size class of a sample, which decides how aggressively it is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSize {
    /// 1 to 4 values.
    Small,
    /// 5 to 20 values. Also used for an empty sample.
    Medium,
    /// 21 values or more.
    Large,
}

impl DatasetSize {
    /// Classify a sample by its length.
    pub fn classify(len: usize) -> Self {
        match len {
            0 => DatasetSize::Medium,
            1..=4 => DatasetSize::Small,
            5..=20 => DatasetSize::Medium,
            _ => DatasetSize::Large,
        }
    }

    /// Fraction of the sample dropped from each end before averaging.
    pub fn exclusion_fraction(self) -> f64 {
        match self {
            DatasetSize::Small => 0.0,
            DatasetSize::Medium => 0.10,
            DatasetSize::Large => 0.05,
        }
    }

    /// Number of values dropped from each end of a sample of `len` values.
    pub fn trim_count(self, len: usize) -> usize {
        (self.exclusion_fraction() * len as f64).ceil() as usize
    }
}

/// Errors for statistics that are undefined on the given sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatisticsError {
    /// The sample has no values, so there is no mean.
    #[error("sample is empty")]
    EmptySample,
    /// The mean is zero, so a relative deviation is undefined.
    #[error("mean is zero, deviation percent is undefined")]
    ZeroMean,
}

/// Records that carry their own measuring value.
pub trait Measurable {
    /// The numeric value measured by the statistics engine. `None` counts as zero.
    fn measuring_value(&self) -> Option<f64>;
}

/// Descriptive figures for the trimmed window of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    /// Number of values in the whole sample.
    pub sample_count: usize,
    /// Number of values dropped from each end.
    pub trim_count: usize,
    /// Smallest value inside the window.
    pub min: f64,
    /// Largest value inside the window.
    pub max: f64,
    /// Sample standard deviation of the window (NaN with fewer than two values).
    pub std_dev: f64,
}

mod trimmed;
pub use trimmed::Statistics;
