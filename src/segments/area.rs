// Area segments: one per contiguous run of valid values

use super::SegmentGeometry;
use crate::config::{EngineConfig, SeriesParams};
use crate::data_types::Columns;
use glam::DVec2;

/// A run of consecutive non-NaN points, or a single NaN boundary marker.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaGeometry {
    /// Index of the first point of the run.
    pub index: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl AreaGeometry {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// A single-point segment holding a NaN value, marking a gap at a series edge.
    pub fn is_gap_marker(&self) -> bool {
        self.y.len() == 1 && self.y[0].is_nan()
    }

    /// Indices of the data points covered by this segment.
    pub fn point_indices(&self) -> std::ops::Range<usize> {
        self.index..self.index + self.len()
    }

    pub fn stroke_points(&self) -> Vec<DVec2> {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| DVec2::new(x, y))
            .collect()
    }

    /// Closed fill polygon: the run followed by its mirror on the baseline.
    pub fn fill_polygon(&self, baseline: f64) -> Vec<DVec2> {
        if self.is_empty() || self.is_gap_marker() {
            return Vec::new();
        }
        let mut polygon = Vec::with_capacity(self.len() * 2 + 1);
        polygon.extend(self.stroke_points());
        polygon.extend(self.x.iter().rev().map(|&x| DVec2::new(x, baseline)));
        polygon.push(polygon[0]);
        polygon
    }
}

/// Splits the points into runs of valid y values.
///
/// A NaN ends the current run. A NaN at the first or last index also becomes
/// its own single-point segment so the host sees the gap boundary.
pub fn area_runs(x: &[f64], y: &[f64]) -> Vec<AreaGeometry> {
    let count = x.len().min(y.len());
    let mut runs = Vec::new();
    let mut current: Option<AreaGeometry> = None;

    for i in 0..count {
        if y[i].is_nan() {
            if let Some(run) = current.take() {
                runs.push(run);
            }
            if i == 0 || i == count - 1 {
                runs.push(AreaGeometry {
                    index: i,
                    x: vec![x[i]],
                    y: vec![f64::NAN],
                });
            }
            continue;
        }

        let run = current.get_or_insert_with(|| AreaGeometry {
            index: i,
            x: Vec::new(),
            y: Vec::new(),
        });
        run.x.push(x[i]);
        run.y.push(y[i]);
    }

    if let Some(run) = current {
        runs.push(run);
    }
    runs
}

pub(crate) fn generate(
    columns: &Columns,
    params: &SeriesParams,
    _config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let x = columns.x_positions(params.indexed);
    area_runs(&x, columns.primary_values())
        .into_iter()
        .map(SegmentGeometry::Area)
        .collect()
}
