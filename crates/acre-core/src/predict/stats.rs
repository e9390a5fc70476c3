//! Recurrence interval statistics

use chrono::NaiveDate;

/// Day gaps between consecutive dates and their dispersion
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalStats {
    /// `date[i + 1] - date[i]` in days, in chronological order
    pub intervals: Vec<i64>,
    /// Arithmetic mean of the intervals
    pub mean: f64,
    /// Population standard deviation of the intervals
    pub std_dev: f64,
    /// `std_dev / mean`, or 0 when the mean is 0
    pub coefficient_of_variation: f64,
}

impl IntervalStats {
    /// Compute statistics over dates that are already sorted ascending
    ///
    /// Returns `None` for fewer than two dates, since no interval exists.
    pub fn from_sorted_dates(dates: &[NaiveDate]) -> Option<Self> {
        if dates.len() < 2 {
            return None;
        }

        let intervals: Vec<i64> = dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .collect();

        let count = intervals.len() as f64;
        let mean = intervals.iter().sum::<i64>() as f64 / count;

        let variance = intervals
            .iter()
            .map(|&d| {
                let diff = d as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / count;
        let std_dev = variance.sqrt();

        // Same-day repeats only: no spread to speak of
        let coefficient_of_variation = if mean > 0.0 { std_dev / mean } else { 0.0 };

        Some(Self {
            intervals,
            mean,
            std_dev,
            coefficient_of_variation,
        })
    }

    /// Number of dates the statistics were computed from
    pub fn sample_count(&self) -> usize {
        self.intervals.len() + 1
    }
}
