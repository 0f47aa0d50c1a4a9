// Column (bar) segments

use super::SegmentGeometry;
use crate::config::{EngineConfig, SeriesParams};
use crate::data_types::Columns;
use serde::{Deserialize, Serialize};

/// Offset window of one series inside a shared category slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideBySideInfo {
    pub start: f64,
    pub end: f64,
}

impl Default for SideBySideInfo {
    fn default() -> Self {
        Self {
            start: -0.4,
            end: 0.4,
        }
    }
}

impl SideBySideInfo {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Slot of series `series_index` out of `series_count` clustered series.
    ///
    /// `slot_width` is the minimum distance between two categories and
    /// `width_factor` the fraction of it the cluster may fill.
    pub fn allocate(
        series_index: usize,
        series_count: usize,
        slot_width: f64,
        width_factor: f64,
    ) -> Self {
        let count = series_count.max(1) as f64;
        let total = slot_width * width_factor;
        let each = total / count;
        let start = -total / 2.0 + each * series_index as f64;
        Self {
            start,
            end: start + each,
        }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn median(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Shrinks the window by `spacing` (fraction of its width), half on each side.
    pub fn with_spacing(self, spacing: f64) -> Self {
        let inset = spacing.clamp(0.0, 1.0) * self.width() / 2.0;
        Self {
            start: self.start + inset,
            end: self.end - inset,
        }
    }
}

/// Rectangle of one column. `top` holds the value end, `bottom` the baseline end;
/// for negative values `top < bottom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnGeometry {
    pub index: usize,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub value: f64,
}

impl ColumnGeometry {
    pub fn is_empty(&self) -> bool {
        self.top.is_nan() || self.bottom.is_nan() || self.left.is_nan()
    }

    pub fn height(&self) -> f64 {
        (self.top - self.bottom).abs()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (lo, hi) = if self.top < self.bottom {
            (self.top, self.bottom)
        } else {
            (self.bottom, self.top)
        };
        x >= self.left && x <= self.right && y >= lo && y <= hi
    }
}

/// One rectangle per point: `(x + start, x + end, y, baseline)`.
pub fn column_rects(x: &[f64], y: &[f64], slot: SideBySideInfo, baseline: f64) -> Vec<ColumnGeometry> {
    x.iter()
        .zip(y)
        .enumerate()
        .map(|(index, (&x, &y))| ColumnGeometry {
            index,
            left: x + slot.start,
            right: x + slot.end,
            top: y,
            bottom: baseline,
            value: y,
        })
        .collect()
}

pub(crate) fn generate(
    columns: &Columns,
    params: &SeriesParams,
    _config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let x = columns.x_positions(params.indexed);
    let slot = params.side_by_side.with_spacing(params.spacing);
    column_rects(&x, columns.primary_values(), slot, params.baseline())
        .into_iter()
        .map(SegmentGeometry::Column)
        .collect()
}
