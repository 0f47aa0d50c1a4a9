// Box-and-whisker segments: quartile statistics per category

use super::SegmentGeometry;
use crate::config::{BoxPlotMode, EngineConfig, SeriesParams};
use crate::data_types::{Columns, DoubleRange};

/// Five-number summary of one category, plus mean and outliers.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStatistics {
    pub minimum: f64,
    pub maximum: f64,
    pub lower_quartile: f64,
    pub upper_quartile: f64,
    pub median: f64,
    pub average: f64,
    pub outliers: Vec<f64>,
}

impl BoxStatistics {
    fn empty() -> Self {
        Self {
            minimum: f64::NAN,
            maximum: f64::NAN,
            lower_quartile: f64::NAN,
            upper_quartile: f64::NAN,
            median: f64::NAN,
            average: f64::NAN,
            outliers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.median.is_nan()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxWhiskerGeometry {
    /// Category index.
    pub index: usize,
    pub left: f64,
    pub right: f64,
    pub center: f64,
    pub stats: BoxStatistics,
}

impl BoxWhiskerGeometry {
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn y_extent(&self) -> DoubleRange {
        self.stats
            .outliers
            .iter()
            .fold(DoubleRange::new(self.stats.minimum, self.stats.maximum), |r, &o| {
                r.include(o)
            })
    }
}

/// Median of an ascending slice.
///
/// The middle position is `round(n / 2)` rounded away from zero; even lengths
/// average the two values straddling it.
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let half = (n as f64 / 2.0).round() as usize;
    if n % 2 == 0 {
        (sorted[half - 1] + sorted[half]) / 2.0
    } else {
        sorted[half - 1]
    }
}

/// Quartile with rank `p * (n + 1)`.
pub fn exclusive_quartile(sorted: &[f64], percentile: f64) -> f64 {
    let n = sorted.len();
    match n {
        0 => return f64::NAN,
        1 => return sorted[0],
        _ => {}
    }
    let rank = percentile * (n as f64 + 1.0);
    let integer = rank.abs() as usize;
    let fraction = rank - integer as f64;
    if integer == 0 {
        sorted[0]
    } else if integer >= n - 1 {
        sorted[n - 1]
    } else {
        fraction * (sorted[integer] - sorted[integer - 1]) + sorted[integer - 1]
    }
}

/// Quartile with rank `p * (n - 1)`.
pub fn inclusive_quartile(sorted: &[f64], percentile: f64) -> f64 {
    let n = sorted.len();
    match n {
        0 => return f64::NAN,
        1 => return sorted[0],
        _ => {}
    }
    let rank = percentile * (n as f64 - 1.0);
    let integer = rank.abs() as usize;
    let fraction = rank - integer as f64;
    if integer >= n - 1 {
        sorted[n - 1]
    } else {
        fraction * (sorted[integer + 1] - sorted[integer]) + sorted[integer]
    }
}

/// Lower and upper quartile of an ascending slice.
pub fn quartiles(sorted: &[f64], mode: BoxPlotMode) -> (f64, f64) {
    let n = sorted.len();
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }
    match mode {
        BoxPlotMode::Exclusive => (exclusive_quartile(sorted, 0.25), exclusive_quartile(sorted, 0.75)),
        BoxPlotMode::Inclusive => (inclusive_quartile(sorted, 0.25), inclusive_quartile(sorted, 0.75)),
        BoxPlotMode::Normal => {
            if n == 1 {
                return (sorted[0], sorted[0]);
            }
            let half = n / 2;
            let upper_start = if n % 2 == 0 { half } else { half + 1 };
            (median(&sorted[..half]), median(&sorted[upper_start..]))
        }
    }
}

/// Statistics of one category. NaN samples are ignored; no valid sample gives all-NaN.
pub fn box_statistics(
    samples: &[f64],
    mode: BoxPlotMode,
    show_outliers: bool,
    iqr_factor: f64,
) -> BoxStatistics {
    let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return BoxStatistics::empty();
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let median = median(&sorted);
    let (lower_quartile, upper_quartile) = quartiles(&sorted, mode);
    let average = sorted.iter().sum::<f64>() / n as f64;

    let mut minimum = sorted[0];
    let mut maximum = sorted[n - 1];
    let mut outliers = Vec::new();

    if show_outliers {
        let range = iqr_factor * (upper_quartile - lower_quartile);
        let low_fence = lower_quartile - range;
        let high_fence = upper_quartile + range;

        for &v in &sorted {
            if v < low_fence {
                outliers.push(v);
            } else {
                minimum = v;
                break;
            }
        }
        for &v in sorted.iter().rev() {
            if v > high_fence {
                outliers.push(v);
            } else {
                maximum = v;
                break;
            }
        }
    }

    BoxStatistics {
        minimum,
        maximum,
        lower_quartile,
        upper_quartile,
        median,
        average,
        outliers,
    }
}

pub(crate) fn generate(
    columns: &Columns,
    params: &SeriesParams,
    config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let x = columns.x_positions(params.indexed);
    let slot = params.side_by_side.with_spacing(params.spacing);
    let settings = &params.box_whisker;

    x.iter()
        .zip(columns.primary_samples())
        .enumerate()
        .map(|(index, (&x, samples))| {
            SegmentGeometry::BoxWhisker(BoxWhiskerGeometry {
                index,
                left: x + slot.start,
                right: x + slot.end,
                center: x + slot.median(),
                stats: box_statistics(
                    samples,
                    settings.mode,
                    settings.show_outliers,
                    config.outlier_iqr_factor,
                ),
            })
        })
        .collect()
}
