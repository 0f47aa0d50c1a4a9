// Spline segments: cubic Bezier pieces between consecutive points

use super::SegmentGeometry;
use crate::config::{EngineConfig, SeriesParams, SplineType};
use crate::data_types::Columns;
use glam::DVec2;

const NAN_POINT: DVec2 = DVec2::new(f64::NAN, f64::NAN);

/// Bezier piece from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplineGeometry {
    pub index: usize,
    pub start: DVec2,
    pub control1: DVec2,
    pub control2: DVec2,
    pub end: DVec2,
}

impl SplineGeometry {
    /// A lone point, or a piece touching a NaN value.
    pub fn is_empty(&self) -> bool {
        self.start.is_nan() || self.end.is_nan() || self.control1.is_nan() || self.control2.is_nan()
    }

    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control1 * (3.0 * u * u * t)
            + self.control2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

/// Per-point coefficients of the chosen interpolation.
///
/// Natural and clamped splines return second derivatives; monotonic and
/// cardinal splines return first derivatives (tangent slopes).
pub fn spline_coefficients(x: &[f64], y: &[f64], spline_type: SplineType, tension: f64) -> Vec<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return vec![0.0; n];
    }
    match spline_type {
        SplineType::Natural => second_derivatives(&x[..n], &y[..n], None),
        SplineType::Clamped => {
            let first = (y[1] - y[0]) / (x[1] - x[0]);
            let last = (y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]);
            second_derivatives(&x[..n], &y[..n], Some((first, last)))
        }
        SplineType::Monotonic => monotonic_tangents(&x[..n], &y[..n]),
        SplineType::Cardinal => cardinal_tangents(&x[..n], &y[..n], tension),
    }
}

/// Tridiagonal solve for the second derivatives of a cubic spline. `end_slopes`
/// clamps the first derivative at both ends; `None` gives a natural spline.
fn second_derivatives(x: &[f64], y: &[f64], end_slopes: Option<(f64, f64)>) -> Vec<f64> {
    let n = x.len();
    let mut y2 = vec![0.0; n];
    let mut u = vec![0.0; n];

    if let Some((first, _)) = end_slopes {
        let h = x[1] - x[0];
        y2[0] = -0.5;
        u[0] = (3.0 / h) * ((y[1] - y[0]) / h - first);
    }

    for i in 1..n - 1 {
        let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
        let p = sig * y2[i - 1] + 2.0;
        y2[i] = (sig - 1.0) / p;
        let d = (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        u[i] = (6.0 * d / (x[i + 1] - x[i - 1]) - sig * u[i - 1]) / p;
    }

    let (qn, un) = match end_slopes {
        Some((_, last)) => {
            let h = x[n - 1] - x[n - 2];
            (0.5, (3.0 / h) * (last - (y[n - 1] - y[n - 2]) / h))
        }
        None => (0.0, 0.0),
    };
    y2[n - 1] = (un - qn * u[n - 2]) / (qn * y2[n - 2] + 1.0);

    for k in (0..n - 1).rev() {
        y2[k] = y2[k] * y2[k + 1] + u[k];
    }
    y2
}

/// Fritsch–Butland tangents: zero at local extrema, weighted harmonic mean of
/// the neighbouring secants elsewhere. Never overshoots the data.
fn monotonic_tangents(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let dx: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / dx[i]).collect();

    let mut m = vec![0.0; n];
    m[0] = slope[0];
    m[n - 1] = slope[n - 2];
    for i in 1..n - 1 {
        let (s0, s1) = (slope[i - 1], slope[i]);
        if s0 * s1 <= 0.0 {
            m[i] = 0.0;
        } else {
            let (h0, h1) = (dx[i - 1], dx[i]);
            m[i] = 3.0 * (h0 + h1) / ((2.0 * h1 + h0) / s0 + (h1 + 2.0 * h0) / s1);
        }
    }
    m
}

/// Cardinal tangents from the neighbouring points; one-sided at the ends.
fn cardinal_tangents(x: &[f64], y: &[f64], tension: f64) -> Vec<f64> {
    let n = x.len();
    let scale = 1.0 - tension;
    (0..n)
        .map(|i| {
            let (a, b) = if i == 0 {
                (0, 1)
            } else if i == n - 1 {
                (n - 2, n - 1)
            } else {
                (i - 1, i + 1)
            };
            scale * (y[b] - y[a]) / (x[b] - x[a])
        })
        .collect()
}

/// Bezier control points of a Hermite piece with end slopes `m1`, `m2`.
pub fn bezier_from_tangents(p1: DVec2, p2: DVec2, m1: f64, m2: f64) -> (DVec2, DVec2) {
    let third = (p2.x - p1.x) / 3.0;
    (
        DVec2::new(p1.x + third, p1.y + m1 * third),
        DVec2::new(p2.x - third, p2.y - m2 * third),
    )
}

/// Bezier control points of a cubic spline piece with second derivatives `d1`, `d2`.
pub fn bezier_from_second_derivatives(p1: DVec2, p2: DVec2, d1: f64, d2: f64) -> (DVec2, DVec2) {
    let h = p2.x - p1.x;
    let secant = (p2.y - p1.y) / h;
    let m1 = secant - h * (2.0 * d1 + d2) / 6.0;
    let m2 = secant + h * (d1 + 2.0 * d2) / 6.0;
    bezier_from_tangents(p1, p2, m1, m2)
}

/// Maximal index ranges of consecutive points with a finite x and y.
fn finite_runs(x: &[f64], y: &[f64]) -> Vec<std::ops::Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;
    for i in 0..x.len().min(y.len()) {
        let finite = !x[i].is_nan() && !y[i].is_nan();
        match (finite, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..x.len().min(y.len()));
    }
    runs
}

/// One Bezier piece per consecutive pair of points. The last point has no
/// forward piece; a single point yields one piece with NaN controls and end.
///
/// NaN values split the data into runs that are interpolated independently;
/// only the pieces touching a NaN point are empty.
pub fn spline_segments(x: &[f64], y: &[f64], spline_type: SplineType, tension: f64) -> Vec<SplineGeometry> {
    let n = x.len().min(y.len());
    match n {
        0 => return Vec::new(),
        1 => {
            return vec![SplineGeometry {
                index: 0,
                start: DVec2::new(x[0], y[0]),
                control1: NAN_POINT,
                control2: NAN_POINT,
                end: NAN_POINT,
            }]
        }
        _ => {}
    }

    let mut coefficients = vec![f64::NAN; n];
    for run in finite_runs(&x[..n], &y[..n]) {
        let solved = spline_coefficients(&x[run.clone()], &y[run.clone()], spline_type, tension);
        coefficients[run].copy_from_slice(&solved);
    }
    let uses_second_derivatives = matches!(spline_type, SplineType::Natural | SplineType::Clamped);

    (0..n - 1)
        .map(|i| {
            let p1 = DVec2::new(x[i], y[i]);
            let p2 = DVec2::new(x[i + 1], y[i + 1]);
            let (c1, c2) = if p1.is_nan() || p2.is_nan() {
                (NAN_POINT, NAN_POINT)
            } else if uses_second_derivatives {
                bezier_from_second_derivatives(p1, p2, coefficients[i], coefficients[i + 1])
            } else {
                bezier_from_tangents(p1, p2, coefficients[i], coefficients[i + 1])
            };
            SplineGeometry {
                index: i,
                start: p1,
                control1: c1,
                control2: c2,
                end: p2,
            }
        })
        .collect()
}

pub(crate) fn generate(
    columns: &Columns,
    params: &SeriesParams,
    config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let x = columns.x_positions(params.indexed);
    let tension = params.spline.tension.unwrap_or(config.cardinal_tension);
    spline_segments(&x, columns.primary_values(), params.spline.spline_type, tension)
        .into_iter()
        .map(SegmentGeometry::Spline)
        .collect()
}
