// Stacking column segments

use super::column::{ColumnGeometry, SideBySideInfo};
use super::SegmentGeometry;
use crate::config::{EngineConfig, SeriesParams};
use crate::data_types::Columns;

/// `(bottom, top)` extents for a group of stacked series, index aligned.
///
/// Positive values stack upward from the baseline and negative values
/// downward. NaN values contribute nothing and get a flat extent.
pub fn stack_extents(series: &[&[f64]], baseline: f64) -> Vec<Vec<(f64, f64)>> {
    let len = series.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut positive = vec![baseline; len];
    let mut negative = vec![baseline; len];

    series
        .iter()
        .map(|values| {
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    if v.is_nan() {
                        (positive[i], positive[i])
                    } else if v >= 0.0 {
                        let bottom = positive[i];
                        positive[i] += v;
                        (bottom, positive[i])
                    } else {
                        let bottom = negative[i];
                        negative[i] += v;
                        (bottom, negative[i])
                    }
                })
                .collect()
        })
        .collect()
}

/// Column rectangles spanning the supplied `(bottom, top)` extents.
pub fn stacked_rects(
    x: &[f64],
    extents: &[(f64, f64)],
    values: &[f64],
    slot: SideBySideInfo,
) -> Vec<ColumnGeometry> {
    x.iter()
        .zip(extents)
        .enumerate()
        .map(|(index, (&x, &(bottom, top)))| ColumnGeometry {
            index,
            left: x + slot.start,
            right: x + slot.end,
            top,
            bottom,
            value: values.get(index).copied().unwrap_or(top - bottom),
        })
        .collect()
}

pub(crate) fn generate(
    columns: &Columns,
    params: &SeriesParams,
    _config: &EngineConfig,
) -> Vec<SegmentGeometry> {
    let x = columns.x_positions(params.indexed);
    let values = columns.primary_values();
    let baseline = params.baseline();

    // Points the accumulator did not cover are drawn unstacked.
    let extents: Vec<(f64, f64)> = (0..x.len())
        .map(|i| {
            params.stack_extents.get(i).copied().unwrap_or_else(|| {
                (baseline, values.get(i).copied().unwrap_or(f64::NAN))
            })
        })
        .collect();

    let slot = params.side_by_side.with_spacing(params.spacing);
    stacked_rects(&x, &extents, values, slot)
        .into_iter()
        .map(SegmentGeometry::Column)
        .collect()
}
