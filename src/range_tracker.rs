use crate::data_types::{Columns, DoubleRange, ValueKind};
use crate::segments::{ChartKind, SegmentGeometry};
use serde::{Deserialize, Serialize};

/// Padding behaviour of the x axis around the data range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisPadding {
    #[default]
    Auto,
    None,
}

/// Running x/y ranges of one series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeTracker {
    x: DoubleRange,
    y: DoubleRange,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn include_x(&mut self, x: f64) {
        self.x = self.x.include(x);
    }

    pub fn include_y(&mut self, y: f64) {
        self.y = self.y.include(y);
    }

    pub fn include_point(&mut self, x: f64, y: f64) {
        self.include_x(x);
        self.include_y(y);
    }

    pub fn x_range(&self) -> DoubleRange {
        self.x
    }

    pub fn y_range(&self) -> DoubleRange {
        self.y
    }

    /// Ranges of a series after generation. Kinds whose extents are not the raw
    /// y values (stacked, cumulative, statistical) are read from the segments.
    /// A logarithmic x column only contributes its positive values.
    pub fn track(
        kind: ChartKind,
        columns: &Columns,
        segments: &[SegmentGeometry],
        indexed: bool,
    ) -> Self {
        let mut tracker = Self::new();
        if columns.is_empty() {
            return tracker;
        }

        tracker.x = if indexed || kind.is_circular() {
            DoubleRange::new(0.0, (columns.len() - 1) as f64)
        } else if columns.x_kind() == Some(ValueKind::Logarithmic) {
            columns
                .x_positions(false)
                .iter()
                .filter(|&&x| x > 0.0)
                .fold(DoubleRange::EMPTY, |r, &x| r.include(x))
        } else {
            columns.x_range()
        };

        tracker.y = match kind {
            ChartKind::Waterfall
            | ChartKind::StackingColumn
            | ChartKind::BoxWhisker
            | ChartKind::ErrorBar => segments
                .iter()
                .fold(DoubleRange::EMPTY, |r, s| r.union(s.y_extent())),
            ChartKind::Pie | ChartKind::RadialBar => columns
                .primary_values()
                .iter()
                .fold(DoubleRange::EMPTY, |r, v| r.include(v.abs())),
            _ => DoubleRange::from_values(columns.primary_values()),
        };
        tracker
    }

    /// Y range as an axis should show it. Baseline-anchored kinds always include zero.
    pub fn actual_y_range(&self, kind: ChartKind) -> DoubleRange {
        let y = self.y;
        if y.is_empty() || !kind.is_baseline_anchored() {
            return y;
        }
        let start = if y.start > 0.0 { 0.0 } else { y.start };
        let end = if y.end < 0.0 { 0.0 } else { y.end };
        DoubleRange::new(start, end)
    }

    /// X range as an axis should show it. Side-by-side kinds are widened by half
    /// a slot on each side so edge bars are not clipped; with padding `None` the
    /// widening is applied and then removed again.
    pub fn actual_x_range(&self, kind: ChartKind, slot_width: f64, padding: AxisPadding) -> DoubleRange {
        let x = self.x;
        if x.is_empty() || !kind.is_side_by_side() {
            return x;
        }
        let half = slot_width / 2.0;
        let mut range = DoubleRange::new(x.start - half, x.end + half);
        if padding == AxisPadding::None {
            range = DoubleRange::new(range.start + half, range.end - half);
        }
        range
    }
}

/// Smallest distance between two consecutive distinct x values, 1 when there is none.
pub fn min_slot_width(x: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = x.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > f64::EPSILON)
        .fold(None, |min: Option<f64>, d| Some(min.map_or(d, |m| m.min(d))))
        .unwrap_or(1.0)
}
