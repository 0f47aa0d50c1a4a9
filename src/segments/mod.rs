// Segment generation, one module per chart kind

pub mod area;
pub mod box_whisker;
pub mod circular;
pub mod column;
pub mod error_bar;
pub mod spline;
pub mod stacking;
pub mod waterfall;

pub use area::AreaGeometry;
pub use box_whisker::{BoxStatistics, BoxWhiskerGeometry};
pub use circular::CircularGeometry;
pub use column::{ColumnGeometry, SideBySideInfo};
pub use error_bar::{ErrorBarGeometry, ErrorSpan};
pub use spline::SplineGeometry;
pub use waterfall::{WaterfallGeometry, WaterfallKind};

use crate::config::{EngineConfig, SeriesParams};
use crate::data_types::{Columns, DoubleRange};
use serde::{Deserialize, Serialize};

/// Closed set of supported chart kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Column,
    StackingColumn,
    Area,
    Spline,
    BoxWhisker,
    Waterfall,
    Pie,
    RadialBar,
    ErrorBar,
}

/// Pure segment generator of one chart kind.
pub type GenerateFn = fn(&Columns, &SeriesParams, &EngineConfig) -> Vec<SegmentGeometry>;

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::Column,
        ChartKind::StackingColumn,
        ChartKind::Area,
        ChartKind::Spline,
        ChartKind::BoxWhisker,
        ChartKind::Waterfall,
        ChartKind::Pie,
        ChartKind::RadialBar,
        ChartKind::ErrorBar,
    ];

    pub fn generator(self) -> GenerateFn {
        match self {
            ChartKind::Column => column::generate,
            ChartKind::StackingColumn => stacking::generate,
            ChartKind::Area => area::generate,
            ChartKind::Spline => spline::generate,
            ChartKind::BoxWhisker => box_whisker::generate,
            ChartKind::Waterfall => waterfall::generate,
            ChartKind::Pie => circular::generate_pie,
            ChartKind::RadialBar => circular::generate_radial_bar,
            ChartKind::ErrorBar => error_bar::generate,
        }
    }

    /// Y range of these kinds always includes zero.
    pub fn is_baseline_anchored(self) -> bool {
        matches!(
            self,
            ChartKind::Area | ChartKind::Column | ChartKind::Waterfall | ChartKind::StackingColumn
        )
    }

    /// Kinds that occupy a side-by-side slot within a category.
    pub fn is_side_by_side(self) -> bool {
        matches!(
            self,
            ChartKind::Column
                | ChartKind::StackingColumn
                | ChartKind::Waterfall
                | ChartKind::BoxWhisker
        )
    }

    pub fn is_circular(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::RadialBar)
    }
}

/// Generates the segment geometry of `kind` for `columns`.
pub fn generate(
    kind: ChartKind,
    columns: &Columns,
    params: &SeriesParams,
    config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    if columns.is_empty() {
        return Vec::new();
    }
    let segments = (kind.generator())(columns, params, config);
    tracing::debug!(?kind, points = columns.len(), segments = segments.len(), "Generated segments");
    segments
}

/// Geometry of one segment, tagged by chart kind.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentGeometry {
    Column(ColumnGeometry),
    Area(AreaGeometry),
    Spline(SplineGeometry),
    BoxWhisker(BoxWhiskerGeometry),
    Waterfall(WaterfallGeometry),
    Circular(CircularGeometry),
    ErrorBar(ErrorBarGeometry),
}

impl SegmentGeometry {
    /// Index of the data point (or category, or first run point) the segment belongs to.
    pub fn index(&self) -> usize {
        match self {
            SegmentGeometry::Column(g) => g.index,
            SegmentGeometry::Area(g) => g.index,
            SegmentGeometry::Spline(g) => g.index,
            SegmentGeometry::BoxWhisker(g) => g.index,
            SegmentGeometry::Waterfall(g) => g.index,
            SegmentGeometry::Circular(g) => g.index,
            SegmentGeometry::ErrorBar(g) => g.index,
        }
    }

    /// Segments with no drawable value (NaN data, empty categories, gap markers).
    pub fn is_empty(&self) -> bool {
        match self {
            SegmentGeometry::Column(g) => g.is_empty(),
            SegmentGeometry::Area(g) => g.is_gap_marker(),
            SegmentGeometry::Spline(g) => g.is_empty(),
            SegmentGeometry::BoxWhisker(g) => g.is_empty(),
            SegmentGeometry::Waterfall(g) => g.kind == WaterfallKind::Empty,
            SegmentGeometry::Circular(g) => g.is_empty,
            SegmentGeometry::ErrorBar(g) => g.is_empty(),
        }
    }

    /// Vertical extent contributed to the axis range.
    pub fn y_extent(&self) -> DoubleRange {
        match self {
            SegmentGeometry::Column(g) => DoubleRange::new(g.top, g.bottom),
            SegmentGeometry::Area(g) => DoubleRange::from_values(&g.y),
            SegmentGeometry::Spline(g) => DoubleRange::point(g.start.y).include(g.end.y),
            SegmentGeometry::BoxWhisker(g) => g.y_extent(),
            SegmentGeometry::Waterfall(g) => DoubleRange::new(g.y1, g.y2),
            SegmentGeometry::Circular(g) => DoubleRange::point(g.value),
            SegmentGeometry::ErrorBar(g) => g.y_extent(),
        }
    }

    /// Linear transition from `from` to `self`; geometries of another shape jump straight to `self`.
    pub fn interpolate(&self, from: &SegmentGeometry, t: f64) -> SegmentGeometry {
        let t = t.clamp(0.0, 1.0);
        match (from, self) {
            (SegmentGeometry::Column(a), SegmentGeometry::Column(b)) => {
                SegmentGeometry::Column(ColumnGeometry {
                    left: lerp(a.left, b.left, t),
                    right: lerp(a.right, b.right, t),
                    top: lerp(a.top, b.top, t),
                    bottom: lerp(a.bottom, b.bottom, t),
                    ..*b
                })
            }
            (SegmentGeometry::Waterfall(a), SegmentGeometry::Waterfall(b)) => {
                SegmentGeometry::Waterfall(WaterfallGeometry {
                    y1: lerp(a.y1, b.y1, t),
                    y2: lerp(a.y2, b.y2, t),
                    ..*b
                })
            }
            (SegmentGeometry::Circular(a), SegmentGeometry::Circular(b)) => {
                SegmentGeometry::Circular(CircularGeometry {
                    start_angle: lerp(a.start_angle, b.start_angle, t),
                    sweep_angle: lerp(a.sweep_angle, b.sweep_angle, t),
                    ..*b
                })
            }
            (SegmentGeometry::Spline(a), SegmentGeometry::Spline(b)) => {
                SegmentGeometry::Spline(SplineGeometry {
                    start: a.start.lerp(b.start, t),
                    control1: a.control1.lerp(b.control1, t),
                    control2: a.control2.lerp(b.control2, t),
                    end: a.end.lerp(b.end, t),
                    ..*b
                })
            }
            _ => self.clone(),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if a.is_nan() {
        b
    } else {
        a + (b - a) * t
    }
}
