// Pie and radial bar segments: angular sweeps

use super::SegmentGeometry;
use crate::config::{EngineConfig, SeriesParams};
use crate::data_types::Columns;

/// Angular segment. Angles are in degrees, clockwise from 3 o'clock.
/// Radii are fractions of the available radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularGeometry {
    pub index: usize,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub value: f64,
    /// Share of the total, in percent.
    pub percentage: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub is_empty: bool,
}

impl CircularGeometry {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle / 2.0
    }

    /// Whether `angle` (degrees, any turn) falls inside the sweep.
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.sweep_angle == 0.0 || self.is_empty {
            return false;
        }
        let (from, span) = if self.sweep_angle < 0.0 {
            (self.start_angle + self.sweep_angle, -self.sweep_angle)
        } else {
            (self.start_angle, self.sweep_angle)
        };
        (angle - from).rem_euclid(360.0) <= span
    }
}

/// Usable arc between two angles. A full turn is shortened by `nudge` degrees
/// so the last segment never closes onto the first.
pub fn effective_arc(start_angle: f64, end_angle: f64, nudge: f64) -> f64 {
    let arc = (end_angle - start_angle).clamp(-360.0, 360.0);
    if nudge > 0.0 && 360.0 - arc.abs() < nudge {
        (360.0 - nudge) * arc.signum()
    } else {
        arc
    }
}

fn magnitude(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.abs()
    }
}

/// Consecutive pie sweeps proportional to `|value|`. NaN counts as 0.
pub fn pie_sweeps(values: &[f64], start_angle: f64, end_angle: f64, nudge: f64) -> Vec<CircularGeometry> {
    let arc = effective_arc(start_angle, end_angle, nudge);
    let total: f64 = values.iter().copied().map(magnitude).sum();
    let mut angle = start_angle;

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let v = magnitude(value);
            let (sweep, percentage) = if total > 0.0 {
                (v * arc / total, v / total * 100.0)
            } else {
                (0.0, 0.0)
            };
            let segment = CircularGeometry {
                index,
                start_angle: angle,
                sweep_angle: sweep,
                value,
                percentage,
                inner_radius: 0.0,
                outer_radius: 1.0,
                is_empty: value.is_nan(),
            };
            angle += sweep;
            segment
        })
        .collect()
}

/// Ring layout of a radial bar series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialBarOptions {
    pub start_angle: f64,
    pub end_angle: f64,
    /// Value mapped to the full arc. Defaults to the sum of `|value|`.
    pub maximum: Option<f64>,
    pub inner_radius: f64,
    pub gap_ratio: f64,
    pub nudge: f64,
}

/// One concentric ring per value, first value outermost. Every bar starts at
/// `start_angle`; values above the maximum are clamped to it.
pub fn radial_bar_sweeps(values: &[f64], options: RadialBarOptions) -> Vec<CircularGeometry> {
    let arc = effective_arc(options.start_angle, options.end_angle, options.nudge);
    let total = match options.maximum {
        Some(max) if max > 0.0 => max,
        _ => values.iter().copied().map(magnitude).sum(),
    };

    let inner = options.inner_radius.clamp(0.0, 1.0);
    let ring = if values.is_empty() {
        0.0
    } else {
        (1.0 - inner) / values.len() as f64
    };
    let band = ring * (1.0 - options.gap_ratio.clamp(0.0, 1.0));

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let v = if options.maximum.is_some() {
                magnitude(value).min(total)
            } else {
                magnitude(value)
            };
            let (sweep, percentage) = if total > 0.0 {
                (v * arc / total, v / total * 100.0)
            } else {
                (0.0, 0.0)
            };
            let outer_radius = 1.0 - ring * index as f64;
            CircularGeometry {
                index,
                start_angle: options.start_angle,
                sweep_angle: sweep,
                value,
                percentage,
                inner_radius: outer_radius - band,
                outer_radius,
                is_empty: value.is_nan(),
            }
        })
        .collect()
}

pub(crate) fn generate_pie(
    columns: &Columns,
    params: &SeriesParams,
    config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let circular = &params.circular;
    pie_sweeps(
        columns.primary_values(),
        circular.start_angle,
        circular.end_angle,
        config.full_sweep_nudge,
    )
    .into_iter()
    .map(SegmentGeometry::Circular)
    .collect()
}

pub(crate) fn generate_radial_bar(
    columns: &Columns,
    params: &SeriesParams,
    config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let circular = &params.circular;
    let options = RadialBarOptions {
        start_angle: circular.start_angle,
        end_angle: circular.end_angle,
        maximum: circular.maximum,
        inner_radius: circular.inner_radius,
        gap_ratio: circular.gap_ratio,
        nudge: config.full_sweep_nudge,
    };
    radial_bar_sweeps(columns.primary_values(), options)
        .into_iter()
        .map(SegmentGeometry::Circular)
        .collect()
}
