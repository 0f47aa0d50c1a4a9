use chart_series::config::{CircularParams, EngineConfig, SeriesParams};
use chart_series::data_types::Columns;
use chart_series::hit_test::hit_test_circular;
use chart_series::segments::circular::{effective_arc, pie_sweeps, radial_bar_sweeps, RadialBarOptions};
use chart_series::segments::{generate, ChartKind, SegmentGeometry};
use glam::DVec2;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_pie_sweep_total() {
    let segments = pie_sweeps(&[10.0, 20.0, 30.0, 40.0], 0.0, 360.0, 0.0001);

    let arc = 359.9999;
    let mut angle = 0.0;
    for (segment, value) in segments.iter().zip([10.0, 20.0, 30.0, 40.0]) {
        assert!(approx(segment.start_angle, angle));
        assert!(approx(segment.sweep_angle, value / 100.0 * arc));
        assert!(approx(segment.percentage, value));
        angle += segment.sweep_angle;
    }
    assert!(approx(segments[3].end_angle(), arc));
}

#[test]
fn test_pie_ignores_sign_and_nan() {
    let segments = pie_sweeps(&[-1.0, f64::NAN, 3.0], 90.0, 270.0, 0.0001);
    assert!(approx(segments[0].sweep_angle, 45.0));
    assert_eq!(segments[1].sweep_angle, 0.0);
    assert!(segments[1].is_empty);
    assert!(approx(segments[2].start_angle, 135.0));
    assert!(approx(segments[2].sweep_angle, 135.0));
}

#[test]
fn test_effective_arc() {
    assert!(approx(effective_arc(0.0, 360.0, 0.0001), 359.9999));
    assert!(approx(effective_arc(360.0, 0.0, 0.0001), -359.9999));
    assert_eq!(effective_arc(0.0, 180.0, 0.0001), 180.0);
    assert!(approx(effective_arc(0.0, 720.0, 0.0001), 359.9999));
}

#[test]
fn test_near_full_arc_is_nudged() {
    assert!(approx(effective_arc(0.0, 359.99995, 0.0001), 359.9999));
    assert!(approx(effective_arc(-90.0, 269.99998, 0.0001), 359.9999));
    assert!(approx(effective_arc(0.0, -359.99999, 0.0001), -359.9999));
    assert_eq!(effective_arc(0.0, 359.0, 0.0001), 359.0);
    assert_eq!(effective_arc(0.0, 360.0, 0.0), 360.0);
}

#[test]
fn test_radial_bar_clamps_to_maximum() {
    let options = RadialBarOptions {
        start_angle: 0.0,
        end_angle: 180.0,
        maximum: Some(100.0),
        inner_radius: 0.2,
        gap_ratio: 0.0,
        nudge: 0.0001,
    };
    let rings = radial_bar_sweeps(&[50.0, 150.0], options);

    assert!(approx(rings[0].sweep_angle, 90.0));
    assert!(approx(rings[1].sweep_angle, 180.0));
    assert!(rings.iter().all(|r| r.start_angle == 0.0));
    assert_eq!(rings[0].outer_radius, 1.0);
    assert!(approx(rings[0].inner_radius, 0.6));
    assert!(approx(rings[1].outer_radius, 0.6));
    assert!(approx(rings[1].inner_radius, 0.2));
}

#[test]
fn test_radial_bar_without_maximum_uses_total() {
    let params = SeriesParams {
        circular: CircularParams {
            end_angle: 360.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let columns = Columns::from_values(vec![0.0, 1.0], vec![("y", vec![1.0, 3.0])]);
    let segments = generate(ChartKind::RadialBar, &columns, &params, &EngineConfig::default());

    match &segments[1] {
        SegmentGeometry::Circular(c) => assert!(approx(c.sweep_angle, 0.75 * 359.9999)),
        other => panic!("Unexpected geometry {:?}", other),
    }
}

#[test]
fn test_circular_hit_test() {
    let segments = pie_sweeps(&[1.0, 1.0, 1.0, 1.0], 0.0, 360.0, 0.0001);
    let center = DVec2::new(100.0, 100.0);

    // Clockwise from 3 o'clock with y pointing down.
    assert_eq!(hit_test_circular(&segments, center, 50.0, DVec2::new(120.0, 110.0)), Some(0));
    assert_eq!(hit_test_circular(&segments, center, 50.0, DVec2::new(80.0, 110.0)), Some(1));
    assert_eq!(hit_test_circular(&segments, center, 50.0, DVec2::new(80.0, 90.0)), Some(2));
    assert_eq!(hit_test_circular(&segments, center, 50.0, DVec2::new(120.0, 90.0)), Some(3));
    assert_eq!(hit_test_circular(&segments, center, 50.0, DVec2::new(200.0, 100.0)), None);
}
