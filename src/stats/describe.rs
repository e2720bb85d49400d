use super::StatsError;

// ---------------------------------------------------------------------------
// Running moments
// ---------------------------------------------------------------------------

/// Single-pass count / mean / variance / min / max using Welford's update.
/// NaN values are skipped so missing cells never poison the result.
#[derive(Debug, Clone)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.mean }
    }

    /// Sample variance (n - 1 denominator); NaN below two observations.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn sample_std(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// Standard error of the mean.
    pub fn sem(&self) -> f64 {
        self.sample_std() / (self.count as f64).sqrt()
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = RunningStats::new();
        for v in iter {
            stats.add(v);
        }
        stats
    }
}

// ---------------------------------------------------------------------------
// Percentiles
// ---------------------------------------------------------------------------

/// Percentile of already sorted, NaN-free data, `q` in `[0, 1]`, with linear
/// interpolation between the two closest ranks.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

// ---------------------------------------------------------------------------
// Column summary
// ---------------------------------------------------------------------------

/// The eight descriptive statistics printed for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Row labels, in print order.
    pub const STAT_NAMES: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn from_values(column: &str, values: &[f64]) -> Result<Self, StatsError> {
        let moments: RunningStats = values.iter().copied().collect();
        let (Some(min), Some(max)) = (moments.min(), moments.max()) else {
            return Err(StatsError::NoObservations {
                column: column.to_string(),
            });
        };

        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);
        let pct = |q: f64| percentile_sorted(&sorted, q).unwrap_or(f64::NAN);

        Ok(ColumnSummary {
            count: moments.len(),
            mean: moments.mean(),
            std: moments.sample_std(),
            min,
            q25: pct(0.25),
            q50: pct(0.50),
            q75: pct(0.75),
            max,
        })
    }

    /// Values in the same order as [`Self::STAT_NAMES`].
    pub fn as_row(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{BundledIris, DatasetSource};
    use crate::data::model::Measurement;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn welford_matches_textbook_values() {
        let stats: RunningStats = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert!(close(stats.mean(), 5.0));
        assert!(close(stats.sample_variance(), 32.0 / 7.0));
        assert_eq!(stats.min(), Some(2.0));
        assert_eq!(stats.max(), Some(9.0));
    }

    #[test]
    fn nan_is_skipped() {
        let stats: RunningStats = [1.0, f64::NAN, 3.0].into_iter().collect();
        assert_eq!(stats.len(), 2);
        assert!(close(stats.mean(), 2.0));
    }

    #[test]
    fn percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_sorted(&data, 0.0), Some(1.0));
        assert_eq!(percentile_sorted(&data, 0.5), Some(2.5));
        assert_eq!(percentile_sorted(&data, 1.0), Some(4.0));
        assert_eq!(percentile_sorted(&[], 0.5), None);
        assert_eq!(percentile_sorted(&data, 1.5), None);
    }

    #[test]
    fn all_missing_column_is_an_error() {
        let err = ColumnSummary::from_values("x", &[f64::NAN, f64::NAN]).unwrap_err();
        assert!(matches!(err, StatsError::NoObservations { .. }));
    }

    #[test]
    fn iris_sepal_length_summary() {
        let table = BundledIris.load().unwrap();
        let m = Measurement::SepalLength;
        let s = ColumnSummary::from_values(m.column_name(), &table.column(m)).unwrap();
        assert_eq!(s.count, 150);
        assert!(close(s.mean, 5.843333333333334));
        assert!(close(s.std, 0.828066127977863));
        assert_eq!(s.min, 4.3);
        assert!(close(s.q25, 5.1));
        assert!(close(s.q50, 5.8));
        assert!(close(s.q75, 6.4));
        assert_eq!(s.max, 7.9);
    }

    #[test]
    fn iris_petal_length_median_interpolates() {
        let table = BundledIris.load().unwrap();
        let m = Measurement::PetalLength;
        let s = ColumnSummary::from_values(m.column_name(), &table.column(m)).unwrap();
        assert!(close(s.q50, 4.35));
        assert!(close(s.std, 1.7652982332594664));
    }
}
