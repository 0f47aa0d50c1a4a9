use chart_series::config::{EngineConfig, SeriesParams, SplineType};
use chart_series::data_types::Columns;
use chart_series::segments::area::area_runs;
use chart_series::segments::column::column_rects;
use chart_series::segments::spline::{spline_coefficients, spline_segments};
use chart_series::segments::stacking::stack_extents;
use chart_series::segments::{generate, ChartKind, SegmentGeometry, SideBySideInfo};

fn columns(y: &[f64]) -> Columns {
    let x = (0..y.len()).map(|i| i as f64).collect();
    Columns::from_values(x, vec![("y", y.to_vec())])
}

#[test]
fn test_column_rectangles() {
    let rects = column_rects(&[1.0, 2.0], &[5.0, -3.0], SideBySideInfo::new(-0.25, 0.25), 0.0);

    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].left, 0.75);
    assert_eq!(rects[0].right, 1.25);
    assert_eq!(rects[0].top, 5.0);
    assert_eq!(rects[0].bottom, 0.0);
    assert_eq!(rects[1].height(), 3.0);
    assert!(rects[1].contains(2.0, -1.0));
    assert!(!rects[1].contains(2.0, 1.0));
}

#[test]
fn test_column_baseline_defaults_to_zero_for_nan_crossing() {
    let params = SeriesParams {
        crossing_value: Some(f64::NAN),
        ..Default::default()
    };
    let segments = generate(ChartKind::Column, &columns(&[2.0]), &params, &EngineConfig::default());
    match &segments[0] {
        SegmentGeometry::Column(c) => assert_eq!(c.bottom, 0.0),
        other => panic!("Unexpected geometry {:?}", other),
    }

    let params = SeriesParams {
        crossing_value: Some(1.5),
        ..Default::default()
    };
    let segments = generate(ChartKind::Column, &columns(&[2.0]), &params, &EngineConfig::default());
    match &segments[0] {
        SegmentGeometry::Column(c) => assert_eq!(c.bottom, 1.5),
        other => panic!("Unexpected geometry {:?}", other),
    }
}

#[test]
fn test_side_by_side_allocation() {
    let first = SideBySideInfo::allocate(0, 2, 1.0, 0.8);
    let second = SideBySideInfo::allocate(1, 2, 1.0, 0.8);

    assert!((first.start + 0.4).abs() < 1e-12);
    assert!((first.end - 0.0).abs() < 1e-12);
    assert!((second.start - 0.0).abs() < 1e-12);
    assert!((second.end - 0.4).abs() < 1e-12);
    assert!((first.with_spacing(0.5).width() - 0.2).abs() < 1e-12);
}

#[test]
fn test_stack_extents() {
    let a = [1.0, -2.0, 3.0];
    let b = [2.0, -1.0, f64::NAN];
    let extents = stack_extents(&[&a, &b], 0.0);

    assert_eq!(extents[0], vec![(0.0, 1.0), (0.0, -2.0), (0.0, 3.0)]);
    assert_eq!(extents[1], vec![(1.0, 3.0), (-2.0, -3.0), (3.0, 3.0)]);
}

#[test]
fn test_stacking_column_uses_supplied_extents() {
    let params = SeriesParams {
        stack_extents: vec![(1.0, 3.0)],
        ..Default::default()
    };
    let segments = generate(
        ChartKind::StackingColumn,
        &columns(&[2.0, 4.0]),
        &params,
        &EngineConfig::default(),
    );
    let rects: Vec<_> = segments
        .iter()
        .map(|s| match s {
            SegmentGeometry::Column(c) => (c.bottom, c.top),
            other => panic!("Unexpected geometry {:?}", other),
        })
        .collect();
    assert_eq!(rects, vec![(1.0, 3.0), (0.0, 4.0)]);
}

#[test]
fn test_area_run_splitting() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y = [1.0, f64::NAN, 2.0, 3.0, f64::NAN];
    let runs = area_runs(&x, &y);

    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].point_indices(), 0..1);
    assert_eq!(runs[0].y, vec![1.0]);
    assert_eq!(runs[1].point_indices(), 2..4);
    assert_eq!(runs[1].y, vec![2.0, 3.0]);
    assert_eq!(runs[2].index, 4);
    assert!(runs[2].is_gap_marker());
}

#[test]
fn test_area_leading_nan_marker_and_fill() {
    let runs = area_runs(&[0.0, 1.0, 2.0], &[f64::NAN, 4.0, 6.0]);
    assert_eq!(runs.len(), 2);
    assert!(runs[0].is_gap_marker());
    assert!(runs[0].fill_polygon(0.0).is_empty());

    let polygon = runs[1].fill_polygon(0.0);
    assert_eq!(polygon.len(), 5);
    assert_eq!(polygon[0], polygon[4]);
    assert_eq!(polygon[2].y, 0.0);
    assert_eq!(polygon[3].x, 1.0);
}

#[test]
fn test_spline_single_point() {
    let segments = spline_segments(&[1.0], &[2.0], SplineType::Natural, 0.5);
    assert_eq!(segments.len(), 1);
    let s = &segments[0];
    assert!(s.control1.is_nan());
    assert!(s.control2.is_nan());
    assert!(s.end.is_nan());
    assert!(s.is_empty());
}

#[test]
fn test_spline_segments_interpolate_points() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 2.0, 1.0, 3.0];
    for spline_type in [
        SplineType::Natural,
        SplineType::Monotonic,
        SplineType::Cardinal,
        SplineType::Clamped,
    ] {
        let segments = spline_segments(&x, &y, spline_type, 0.5);
        assert_eq!(segments.len(), 3);
        for (i, s) in segments.iter().enumerate() {
            assert_eq!(s.point_at(0.0).y, y[i]);
            assert!((s.point_at(1.0).y - y[i + 1]).abs() < 1e-12);
        }
    }
}

#[test]
fn test_spline_nan_breaks_only_adjacent_pieces() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let y = [1.0, 2.0, 3.0, f64::NAN, 5.0, 6.0, 7.0];
    for spline_type in [
        SplineType::Natural,
        SplineType::Clamped,
        SplineType::Monotonic,
        SplineType::Cardinal,
    ] {
        let segments = spline_segments(&x, &y, spline_type, 0.5);
        assert_eq!(segments.len(), 6);
        let empty: Vec<bool> = segments.iter().map(|s| s.is_empty()).collect();
        assert_eq!(empty, vec![false, false, true, true, false, false], "{:?}", spline_type);

        for i in [0, 1, 4, 5] {
            let s = &segments[i];
            assert_eq!(s.point_at(0.0).y, y[i]);
            assert!((s.point_at(1.0).y - y[i + 1]).abs() < 1e-12);
        }
    }
}

#[test]
fn test_spline_isolated_point_between_nans() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [f64::NAN, 2.0, f64::NAN, 4.0];
    let segments = spline_segments(&x, &y, SplineType::Natural, 0.5);
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|s| s.is_empty()));
}

#[test]
fn test_natural_spline_of_a_line_is_straight() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [1.0, 3.0, 5.0, 7.0];
    let coefficients = spline_coefficients(&x, &y, SplineType::Natural, 0.0);
    assert_eq!(coefficients.len(), 4);
    assert!(coefficients.iter().all(|c| c.abs() < 1e-12));

    let mid = spline_segments(&x, &y, SplineType::Natural, 0.0)[1].point_at(0.5);
    assert!((mid.y - 4.0).abs() < 1e-12);
}

#[test]
fn test_monotonic_spline_does_not_overshoot() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 10.0, 10.0, 0.0];
    let tangents = spline_coefficients(&x, &y, SplineType::Monotonic, 0.0);
    assert_eq!(tangents[1], 0.0);
    assert_eq!(tangents[2], 0.0);

    for s in spline_segments(&x, &y, SplineType::Monotonic, 0.0) {
        for step in 0..=10 {
            let p = s.point_at(step as f64 / 10.0);
            assert!(p.y <= 10.0 + 1e-9 && p.y >= -1e-9, "Overshoot at {:?}", p);
        }
    }
}

#[test]
fn test_cardinal_tension_scales_tangents() {
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 1.0, 4.0];
    let loose = spline_coefficients(&x, &y, SplineType::Cardinal, 0.0);
    let tight = spline_coefficients(&x, &y, SplineType::Cardinal, 0.5);
    assert_eq!(loose[1], 2.0);
    assert_eq!(tight[1], 1.0);
}

#[test]
fn test_empty_columns_generate_nothing() {
    let empty = Columns::from_values(Vec::new(), vec![("y", Vec::new())]);
    for kind in ChartKind::ALL {
        assert!(generate(kind, &empty, &SeriesParams::default(), &EngineConfig::default()).is_empty());
    }
}
