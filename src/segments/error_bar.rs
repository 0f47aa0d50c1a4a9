// Error bar segments

use super::SegmentGeometry;
use crate::config::{
    EngineConfig, ErrorBarDirection, ErrorBarMode, ErrorBarParams, ErrorBarType, SeriesParams,
};
use crate::data_types::{Columns, DoubleRange};
use glam::DVec2;

/// An error interval drawn across the line `at`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorSpan {
    /// Fixed coordinate of the bar (y for horizontal bars, x for vertical ones).
    pub at: f64,
    pub low: f64,
    pub high: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorBarGeometry {
    pub index: usize,
    pub point: DVec2,
    pub horizontal: Option<ErrorSpan>,
    pub vertical: Option<ErrorSpan>,
}

impl ErrorBarGeometry {
    pub fn is_empty(&self) -> bool {
        self.point.is_nan() || (self.horizontal.is_none() && self.vertical.is_none())
    }

    pub fn y_extent(&self) -> DoubleRange {
        let mut range = DoubleRange::point(self.point.y);
        if let Some(v) = self.vertical {
            range = range.include(v.low).include(v.high);
        }
        range
    }
}

/// Mean and sample standard deviation of the non-NaN values.
pub fn mean_and_deviation(values: &[f64]) -> (f64, f64) {
    let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let n = valid.len();
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }
    let mean = valid.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return (mean, 0.0);
    }
    let variance = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, variance.sqrt())
}

fn span(center: f64, error: f64, direction: ErrorBarDirection, at: f64) -> Option<ErrorSpan> {
    if center.is_nan() || error.is_nan() || at.is_nan() {
        return None;
    }
    let error = error.abs();
    let (low, high) = match direction {
        ErrorBarDirection::Both => (center - error, center + error),
        ErrorBarDirection::Plus => (center, center + error),
        ErrorBarDirection::Minus => (center - error, center),
    };
    Some(ErrorSpan { at, low, high })
}

/// Error bars for every point. Custom errors are read from `custom`
/// (horizontal, vertical), one value per point.
pub fn error_bars(
    x: &[f64],
    y: &[f64],
    params: &ErrorBarParams,
    custom: (Option<&[f64]>, Option<&[f64]>),
) -> Vec<ErrorBarGeometry> {
    let (x_mean, x_sd) = mean_and_deviation(x);
    let (y_mean, y_sd) = mean_and_deviation(y);
    let count = x.len().min(y.len());
    let sqrt_n = (count as f64).sqrt();

    let show_horizontal = params.mode != ErrorBarMode::Vertical;
    let show_vertical = params.mode != ErrorBarMode::Horizontal;

    (0..count)
        .map(|i| {
            let (px, py) = (x[i], y[i]);
            let valid = !px.is_nan() && !py.is_nan();
            // (horizontal center, horizontal error, vertical center, vertical error)
            let (hc, he, vc, ve) = match params.error_type {
                ErrorBarType::Fixed => (px, params.horizontal_error, py, params.vertical_error),
                ErrorBarType::Percentage => (
                    px,
                    px * params.horizontal_error / 100.0,
                    py,
                    py * params.vertical_error / 100.0,
                ),
                ErrorBarType::StandardDeviation => (
                    x_mean,
                    x_sd * params.horizontal_error,
                    y_mean,
                    y_sd * params.vertical_error,
                ),
                ErrorBarType::StandardError => (
                    px,
                    x_sd / sqrt_n * params.horizontal_error,
                    py,
                    y_sd / sqrt_n * params.vertical_error,
                ),
                ErrorBarType::Custom => (
                    px,
                    custom.0.and_then(|c| c.get(i).copied()).unwrap_or(f64::NAN),
                    py,
                    custom.1.and_then(|c| c.get(i).copied()).unwrap_or(f64::NAN),
                ),
            };

            ErrorBarGeometry {
                index: i,
                point: DVec2::new(px, py),
                horizontal: if show_horizontal && valid {
                    span(hc, he, params.horizontal_direction, py)
                } else {
                    None
                },
                vertical: if show_vertical && valid {
                    span(vc, ve, params.vertical_direction, px)
                } else {
                    None
                },
            }
        })
        .collect()
}

pub(crate) fn generate(
    columns: &Columns,
    params: &SeriesParams,
    _config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let x = columns.x_positions(params.indexed);
    let settings = &params.error_bar;
    let custom = (
        settings.horizontal_error_path.as_deref().and_then(|p| columns.values(p)),
        settings.vertical_error_path.as_deref().and_then(|p| columns.values(p)),
    );
    error_bars(&x, columns.primary_values(), settings, custom)
        .into_iter()
        .map(SegmentGeometry::ErrorBar)
        .collect()
}
