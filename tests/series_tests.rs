use chart_series::config::SeriesParams;
use chart_series::data_types::{DoubleRange, Record, ValueKind};
use chart_series::ingest::Bindings;
use chart_series::labels::{CircularLayout, LabelPolicy, MonospaceMeasurer, Rect};
use chart_series::range_tracker::AxisPadding;
use chart_series::segments::{ChartKind, SegmentGeometry};
use chart_series::series::{ChartId, Series};
use chart_series::transform::IdentityAxis;
use chart_series::update::CollectionChange;
use glam::DVec2;

fn record(x: f64, y: f64) -> Record {
    Record::new().with("X", x).with("Y", y)
}

fn column_series() -> Series<Record> {
    let mut series = Series::new("revenue", ChartKind::Column, Bindings::new("X").with("Y", Default::default()))
        .with_style(3);
    series.set_source(vec![record(1.0, 10.0), record(2.0, 5.0), record(3.0, 8.0)]);
    series
}

fn top(geometry: &SegmentGeometry) -> f64 {
    match geometry {
        SegmentGeometry::Column(c) => c.top,
        other => panic!("Unexpected geometry {:?}", other),
    }
}

#[test]
fn test_attach_to_second_chart_fails() {
    let mut series = column_series();
    series.attach(ChartId(1)).unwrap();
    series.attach(ChartId(1)).unwrap();

    let err = series.attach(ChartId(2)).unwrap_err();
    assert!(err.to_string().contains("already attached"));
    assert_eq!(series.owner(), Some(ChartId(1)));

    series.detach();
    assert!(series.points().is_empty());
    assert!(series.segments().is_empty());
    series.attach(ChartId(2)).unwrap();
}

#[test]
fn test_recompute_only_when_dirty() {
    let mut series = column_series();
    assert!(series.is_dirty());
    assert!(series.recompute());
    assert!(!series.recompute());

    let segments = series.segments();
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|s| s.series == "revenue" && s.style == 3 && s.visible));
    assert!(segments.iter().all(|s| s.previous.is_none()));
}

#[test]
fn test_data_change_keeps_previous_geometry() {
    let mut series = column_series();
    series.recompute();

    series.apply_changes(vec![CollectionChange::Replace {
        index: 1,
        item: record(2.0, 15.0),
    }]);
    assert!(series.recompute());

    let segment = &series.segments()[1];
    assert_eq!(top(&segment.geometry), 15.0);
    assert_eq!(segment.previous.as_deref().map(top), Some(5.0));

    let halfway = series.interpolated(0.5);
    assert_eq!(top(&halfway[1]), 10.0);
    assert_eq!(top(&series.interpolated(1.0)[1]), 15.0);
}

#[test]
fn test_parameter_change_regenerates_wholesale() {
    let mut series = column_series();
    series.recompute();

    series.set_params(SeriesParams {
        crossing_value: Some(2.0),
        ..Default::default()
    });
    assert!(series.recompute());
    assert!(series.segments().iter().all(|s| s.previous.is_none()));

    // Same parameters again: nothing to do.
    series.set_params(series.params().clone());
    assert!(!series.recompute());
}

#[test]
fn test_ranges() {
    let mut series = column_series();
    series.recompute();

    assert_eq!(series.ranges().x_range(), DoubleRange::new(1.0, 3.0));
    assert_eq!(series.ranges().y_range(), DoubleRange::new(5.0, 10.0));
    assert_eq!(series.actual_y_range(), DoubleRange::new(0.0, 10.0));
    assert_eq!(series.actual_x_range(1.0, AxisPadding::Auto), DoubleRange::new(0.5, 3.5));
    assert_eq!(series.actual_x_range(1.0, AxisPadding::None), DoubleRange::new(1.0, 3.0));

    series.set_kind(ChartKind::Spline);
    series.recompute();
    assert_eq!(series.actual_y_range(), DoubleRange::new(5.0, 10.0));
    assert_eq!(series.actual_x_range(1.0, AxisPadding::Auto), DoubleRange::new(1.0, 3.0));
}

#[test]
fn test_selection_is_pruned_on_removal() {
    let mut series = column_series();
    series.recompute();

    assert!(!series.select(3));
    assert!(series.select(2));
    assert!(series.select(0));
    assert!(series.is_selected(2));

    series.apply_changes(vec![CollectionChange::Remove { index: 2 }]);
    series.recompute();
    assert!(!series.is_selected(2));
    assert_eq!(series.selected().collect::<Vec<_>>(), vec![0]);

    assert!(series.deselect(0));
    assert!(!series.deselect(0));
}

#[test]
fn test_series_hit_test() {
    let mut series = column_series();
    series.recompute();

    let hit = series
        .hit_test(DVec2::new(2.2, 0.0), DoubleRange::EMPTY, &IdentityAxis)
        .unwrap();
    assert_eq!(hit.index, 1);
    assert_eq!(hit.item.get("Y"), Some(&chart_series::Value::Number(5.0)));
}

#[test]
fn test_pie_data_labels() {
    let mut series: Series<Record> =
        Series::new("share", ChartKind::Pie, Bindings::new("X").with("Y", Default::default()));
    series.set_source(vec![record(0.0, 1.0), record(1.0, 3.0), record(2.0, f64::NAN)]);
    series.recompute();

    let measurer = MonospaceMeasurer::default();
    let layout = CircularLayout {
        center: DVec2::new(150.0, 150.0),
        radius: 80.0,
    };
    let labels = series.data_labels(layout, &measurer, LabelPolicy::Shift, Rect::new(0.0, 0.0, 300.0, 300.0));

    assert_eq!(labels.len(), 2, "Empty segments get no label");
    assert_eq!(labels[0].text, "1.00");
    assert_eq!(labels[1].text, "3.00");
    assert!(!series.segments()[2].visible);

    let mut columns = column_series();
    columns.recompute();
    assert!(columns
        .data_labels(layout, &measurer, LabelPolicy::Shift, Rect::new(0.0, 0.0, 300.0, 300.0))
        .is_empty());
}

#[test]
fn test_logarithmic_x_survives_rebuilds() {
    let mut series: Series<Record> =
        Series::new("decades", ChartKind::Spline, Bindings::new("X").with("Y", Default::default()));
    series.set_source(vec![record(0.0, 1.0), record(1.0, 2.0), record(10.0, 3.0), record(100.0, 4.0)]);
    series.set_logarithmic_x();
    series.recompute();

    assert_eq!(series.points().x_kind(), Some(ValueKind::Logarithmic));
    assert_eq!(series.ranges().x_range(), DoubleRange::new(1.0, 100.0));

    series.set_source(vec![record(0.5, 1.0), record(-3.0, 2.0), record(1000.0, 3.0)]);
    assert!(series.recompute());
    assert_eq!(series.points().x_kind(), Some(ValueKind::Logarithmic));
    assert_eq!(series.ranges().x_range(), DoubleRange::new(0.5, 1000.0));

    series.apply_changes(vec![CollectionChange::Reset {
        items: vec![record(2.0, 1.0), record(20.0, 2.0)],
    }]);
    series.recompute();
    assert_eq!(series.points().x_kind(), Some(ValueKind::Logarithmic));
    assert_eq!(series.ranges().x_range(), DoubleRange::new(2.0, 20.0));
}
