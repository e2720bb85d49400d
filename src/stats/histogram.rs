use std::f64::consts::PI;

use super::StatsError;
use super::describe::RunningStats;

// ---------------------------------------------------------------------------
// Equal-width histogram
// ---------------------------------------------------------------------------

/// Frequency counts over `bins` equal-width bins spanning `[min, max]`.
/// Every bin is half-open except the last, which also holds `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(column: &str, values: &[f64], bins: usize) -> Result<Self, StatsError> {
        if bins == 0 {
            return Err(StatsError::ZeroBins);
        }
        let stats: RunningStats = values.iter().copied().collect();
        let (Some(mut min), Some(mut max)) = (stats.min(), stats.max()) else {
            return Err(StatsError::NoObservations {
                column: column.to_string(),
            });
        };
        // A constant column still gets a non-degenerate range.
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0; bins];
        for v in values.iter().copied().filter(|v| !v.is_nan()) {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Histogram { min, max, counts })
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    pub fn bin_center(&self, idx: usize) -> f64 {
        self.min + (idx as f64 + 0.5) * self.bin_width()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Gaussian kernel density estimate
// ---------------------------------------------------------------------------

/// Scott's rule bandwidth: `n^(-1/5) * sample std`.
pub fn scott_bandwidth(stats: &RunningStats) -> f64 {
    (stats.len() as f64).powf(-0.2) * stats.sample_std()
}

/// Evaluate a Gaussian KDE of `values` on `points` evenly spaced grid
/// positions across `[lo, hi]`, multiplying the density by `scale`.
///
/// Passing `n * bin_width` as `scale` puts the curve on the same axis as
/// histogram counts.
pub fn kde_curve(
    column: &str,
    values: &[f64],
    lo: f64,
    hi: f64,
    points: usize,
    scale: f64,
) -> Result<Vec<[f64; 2]>, StatsError> {
    let samples: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let stats: RunningStats = samples.iter().copied().collect();
    let bandwidth = scott_bandwidth(&stats);
    if !(bandwidth.is_finite() && bandwidth > 0.0) {
        return Err(StatsError::DegenerateBandwidth {
            column: column.to_string(),
        });
    }

    let norm = 1.0 / (samples.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    let step = if points > 1 { (hi - lo) / (points - 1) as f64 } else { 0.0 };

    Ok((0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = samples
                .iter()
                .map(|&s| {
                    let z = (x - s) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            [x, density * scale]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{BundledIris, DatasetSource};
    use crate::data::model::Measurement;

    #[test]
    fn iris_sepal_width_bins() {
        let table = BundledIris.load().unwrap();
        let values = table.column(Measurement::SepalWidth);
        let hist = Histogram::new("sepal width (cm)", &values, 15).unwrap();

        assert_eq!(hist.counts.len(), 15);
        assert_eq!(hist.total(), 150);
        assert_eq!(hist.min, 2.0);
        assert_eq!(hist.max, 4.4);
        assert_eq!(
            hist.counts,
            vec![1, 7, 3, 13, 23, 10, 37, 13, 18, 10, 3, 8, 1, 2, 1]
        );
    }

    #[test]
    fn max_lands_in_last_bin() {
        let hist = Histogram::new("x", &[0.0, 1.0, 2.0], 2).unwrap();
        assert_eq!(hist.counts, vec![1, 2]);
        assert!((hist.bin_center(0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn constant_column_gets_a_range() {
        let hist = Histogram::new("x", &[3.0, 3.0], 4).unwrap();
        assert_eq!(hist.total(), 2);
        assert!(hist.max > hist.min);
    }

    #[test]
    fn zero_bins_rejected() {
        assert!(matches!(Histogram::new("x", &[1.0], 0), Err(StatsError::ZeroBins)));
    }

    #[test]
    fn kde_density_integrates_to_about_one() {
        let values: Vec<f64> = (0..200).map(|i| (i as f64 / 20.0).sin() * 3.0).collect();
        let curve = kde_curve("x", &values, -8.0, 8.0, 801, 1.0).unwrap();
        let step = 16.0 / 800.0;
        let area: f64 = curve.iter().map(|p| p[1] * step).sum();
        assert!((area - 1.0).abs() < 0.01, "area {area}");
    }

    #[test]
    fn kde_scales_to_counts() {
        let table = BundledIris.load().unwrap();
        let values = table.column(Measurement::SepalWidth);
        let hist = Histogram::new("w", &values, 15).unwrap();
        let scale = hist.total() as f64 * hist.bin_width();
        let curve = kde_curve("w", &values, hist.min, hist.max, 200, scale).unwrap();
        assert_eq!(curve.len(), 200);
        assert_eq!(curve[0][0], hist.min);
        let peak = curve.iter().map(|p| p[1]).fold(0.0, f64::max);
        // Same order of magnitude as the tallest bar (37).
        assert!(peak > 15.0 && peak < 40.0, "peak {peak}");
    }

    #[test]
    fn kde_needs_spread() {
        assert!(matches!(
            kde_curve("x", &[1.0, 1.0], 0.0, 2.0, 10, 1.0),
            Err(StatsError::DegenerateBandwidth { .. })
        ));
    }
}
