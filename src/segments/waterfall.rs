// Waterfall segments: running totals with summary bars

use super::SegmentGeometry;
use crate::config::{EngineConfig, SeriesParams};
use crate::data_types::Columns;
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaterfallKind {
    Positive,
    Negative,
    Summary,
    /// NaN point, frozen at the previous bar.
    Empty,
}

/// One waterfall bar. `y2` is where the bar starts and `y1` where it ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterfallGeometry {
    pub index: usize,
    pub left: f64,
    pub right: f64,
    pub y1: f64,
    pub y2: f64,
    /// Source value of the point (NaN for empty points).
    pub value: f64,
    /// Running total after this point, relative to the baseline.
    pub sum: f64,
    /// For summary bars, the change accumulated since the previous summary.
    pub subtotal: f64,
    pub kind: WaterfallKind,
    /// Line from the previous bar's end to this bar, at the previous total.
    pub connector: Option<[DVec2; 2]>,
}

impl WaterfallGeometry {
    pub fn top(&self) -> f64 {
        self.y1.max(self.y2)
    }

    pub fn bottom(&self) -> f64 {
        self.y1.min(self.y2)
    }
}

/// Options of [`waterfall_bars`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterfallOptions {
    pub start: f64,
    pub end: f64,
    pub baseline: f64,
    pub allow_auto_sum: bool,
}

fn direction(value: f64) -> WaterfallKind {
    if value < 0.0 {
        WaterfallKind::Negative
    } else {
        WaterfallKind::Positive
    }
}

/// Builds the bars from the signed deltas `y` and optional summary flags.
///
/// Each bar starts where the previous one ended: the pair is threaded from the
/// previous segment rather than recomputed from the columns.
pub fn waterfall_bars(
    x: &[f64],
    y: &[f64],
    summaries: &[bool],
    options: WaterfallOptions,
) -> Vec<WaterfallGeometry> {
    let origin = options.baseline;
    let mut bars: Vec<WaterfallGeometry> = Vec::with_capacity(x.len());
    let mut total_at_last_summary = 0.0;

    for (index, (&x, &value)) in x.iter().zip(y).enumerate() {
        let summary = summaries.get(index).copied().unwrap_or(false);
        let left = x + options.start;
        let right = x + options.end;
        let prev = bars.last().copied();
        let running = prev.map_or(0.0, |p| p.sum);

        let (y1, y2, sum, kind) = match prev {
            _ if summary => {
                let literal = !options.allow_auto_sum && !value.is_nan();
                let sum = if literal { value } else { running };
                let start = match prev {
                    // Literal sum right after a negative summary: start from
                    // that summary's end instead of the baseline.
                    Some(p) if literal && p.kind == WaterfallKind::Summary && p.value < 0.0 => p.y1,
                    _ => origin,
                };
                (origin + sum, start, sum, WaterfallKind::Summary)
            }
            None if value.is_nan() => (origin, origin, 0.0, WaterfallKind::Empty),
            None => (origin + value, origin, value, direction(value)),
            Some(p) if value.is_nan() => (p.y1, p.y2, running, WaterfallKind::Empty),
            Some(_) => (
                origin + running + value,
                origin + running,
                running + value,
                direction(value),
            ),
        };

        let subtotal = if kind == WaterfallKind::Summary {
            let subtotal = sum - total_at_last_summary;
            total_at_last_summary = sum;
            subtotal
        } else {
            f64::NAN
        };

        let connector = match prev {
            Some(p) if kind != WaterfallKind::Empty => {
                let level = origin + p.sum;
                Some([DVec2::new(p.right, level), DVec2::new(left, level)])
            }
            _ => None,
        };

        bars.push(WaterfallGeometry {
            index,
            left,
            right,
            y1,
            y2,
            value: if summary { sum } else { value },
            sum,
            subtotal,
            kind,
            connector,
        });
    }
    bars
}

pub(crate) fn generate(
    columns: &Columns,
    params: &SeriesParams,
    _config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let x = columns.x_positions(params.indexed);
    let summaries = params
        .waterfall
        .summary_path
        .as_deref()
        .and_then(|path| columns.flags(path))
        .unwrap_or(&[]);
    let slot = params.side_by_side.with_spacing(params.spacing);

    let options = WaterfallOptions {
        start: slot.start,
        end: slot.end,
        baseline: params.baseline(),
        allow_auto_sum: params.waterfall.allow_auto_sum,
    };

    waterfall_bars(&x, columns.primary_values(), summaries, options)
        .into_iter()
        .map(SegmentGeometry::Waterfall)
        .collect()
}
