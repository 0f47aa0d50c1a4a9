use chart_series::scales::{ChartScale, ScaleMode};
use chart_series::transform::{AxisTransform, PlotTransform};
use glam::DVec2;

#[test]
fn test_chart_scale_linear() {
    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 500.0));

    assert_eq!(scale.map(0.0), 0.0);
    assert_eq!(scale.map(50.0), 250.0);
    assert_eq!(scale.map(100.0), 500.0);

    assert_eq!(scale.invert(0.0), 0.0);
    assert_eq!(scale.invert(250.0), 50.0);
    assert_eq!(scale.invert(500.0), 100.0);
}

#[test]
fn test_chart_scale_log() {
    let scale = ChartScale::new_log((1.0, 1000.0), (0.0, 300.0));
    assert_eq!(scale.mode(), ScaleMode::Log);

    assert!((scale.map(10.0) - 100.0).abs() < 1e-9);
    assert!((scale.invert(200.0) - 100.0).abs() < 1e-9);
    assert!(scale.map(0.0).is_nan());
    assert!(scale.map(-5.0).is_nan());
}

#[test]
fn test_log_scale_update_domain() {
    let mut scale = ChartScale::new_log((1.0, 1000.0), (0.0, 300.0));
    scale.update_domain(10.0, 1000.0);
    assert_eq!(scale.mode(), ScaleMode::Log);
    assert_eq!(scale.domain(), (10.0, 1000.0));
    assert!((scale.map(100.0) - 150.0).abs() < 1e-9);

    // Values beyond the domain are pinned to its edge.
    assert!((scale.map(1e6) - 300.0).abs() < 1e-9);

    // A non-positive domain is kept positive.
    let guarded = ChartScale::new_log((0.0, 100.0), (0.0, 100.0));
    assert!(guarded.domain().0 > 0.0);
    assert!(guarded.map(100.0).is_finite());
}

#[test]
fn test_scale_zero_domain() {
    let scale = ChartScale::new_linear((10.0, 10.0), (0.0, 100.0));
    let mapped = scale.map(10.0);
    assert!(mapped.is_finite());
    assert!((0.0..=100.0).contains(&mapped));
}

#[test]
fn test_update_domain_keeps_range() {
    let mut scale = ChartScale::new_linear((0.0, 10.0), (0.0, 100.0));
    scale.update_domain(0.0, 20.0);
    assert_eq!(scale.range(), (0.0, 100.0));
    assert_eq!(scale.map(10.0), 50.0);

    scale.update_range(0.0, 200.0);
    assert_eq!(scale.domain(), (0.0, 20.0));
    assert_eq!(scale.value_to_point(10.0), 100.0);
    assert_eq!(scale.point_to_value(100.0), 10.0);
}

#[test]
fn test_plot_transform() {
    let x_scale = ChartScale::new_linear((0.0, 100.0), (0.0, 200.0));
    let y_scale = ChartScale::new_linear((0.0, 100.0), (200.0, 0.0));
    let transform = PlotTransform::new(x_scale, y_scale, DVec2::new(10.0, 20.0));

    let origin = transform.data_to_screen(DVec2::new(0.0, 0.0));
    assert_eq!(origin, DVec2::new(10.0, 220.0));

    let center = transform.data_to_screen(DVec2::new(50.0, 50.0));
    assert_eq!(center, DVec2::new(110.0, 120.0));

    let restored = transform.screen_to_data(center);
    assert!((restored.x - 50.0).abs() < 0.001);
    assert!((restored.y - 50.0).abs() < 0.001);
}
