use chart_series::data_types::{PointSet, Record};
use chart_series::ingest::{build_columns, Bindings, ColumnBuilder};
use chart_series::update::{is_strictly_ascending, CollectionChange};

fn point(x: f64, y: f64) -> Record {
    Record::new().with("X", x).with("Y", y)
}

fn series(xs: &[f64]) -> PointSet<Record> {
    build_columns(xs.iter().map(|&x| point(x, x * 10.0)), "X", &["Y"])
}

fn assert_aligned(points: &PointSet<Record>) {
    let n = points.point_count();
    assert_eq!(points.items().len(), n);
    assert_eq!(points.columns().len(), n);
    for (_, column) in points.columns().y_columns() {
        assert_eq!(column.len(), n);
    }
}

#[test]
fn test_insert_replace_remove_keep_columns_aligned() {
    let mut points = series(&[1.0, 2.0, 3.0]);

    points.apply_batch(vec![
        CollectionChange::Insert { index: 3, item: point(4.0, 40.0) },
        CollectionChange::Insert { index: 0, item: point(0.0, 0.0) },
        CollectionChange::Replace { index: 2, item: point(2.0, 99.0) },
        CollectionChange::Remove { index: 1 },
    ]);

    assert_aligned(&points);
    assert_eq!(points.point_count(), 4);
    assert_eq!(points.columns().values("Y"), Some(&[0.0, 99.0, 30.0, 40.0][..]));
    assert!(points.is_linear());
}

#[test]
fn test_out_of_range_changes_are_ignored() {
    let mut points = series(&[1.0, 2.0]);
    points.apply(CollectionChange::Insert { index: 5, item: point(9.0, 9.0) });
    points.apply(CollectionChange::Replace { index: 2, item: point(9.0, 9.0) });
    points.apply(CollectionChange::Remove { index: 7 });

    assert_aligned(&points);
    assert_eq!(points.point_count(), 2);
}

#[test]
fn test_linear_flag_only_downgrades() {
    let mut points = series(&[1.0, 2.0, 3.0]);
    assert!(points.is_linear());

    points.insert(1, point(0.5, 0.0));
    assert!(!points.is_linear());

    // Removing the offending point does not restore the flag.
    points.remove(1);
    assert!(is_strictly_ascending(&points.columns().x_positions(false)));
    assert!(!points.is_linear());

    // Neither does a replace that is ascending again.
    points.replace(1, point(2.5, 0.0));
    assert!(!points.is_linear());
}

#[test]
fn test_insert_at_head_checks_previous_first() {
    let mut points = series(&[1.0, 2.0]);
    points.insert(0, point(3.0, 0.0));
    assert!(!points.is_linear());
}

#[test]
fn test_replace_checks_left_neighbour_only() {
    let mut points = series(&[1.0, 2.0, 3.0]);
    // Greater than its left neighbour, greater than its right one too.
    points.replace(1, point(10.0, 0.0));
    assert!(points.is_linear());

    points.replace(2, point(5.0, 0.0));
    assert!(!points.is_linear());
}

#[test]
fn test_insert_then_remove_round_trip() {
    let original = series(&[1.0, 2.0, 3.0, 4.0]);
    let mut points = original.clone();

    points.insert(2, point(0.5, -1.0));
    points.remove(2);

    assert_eq!(points.point_count(), original.point_count());
    assert_eq!(points.columns().x(), original.columns().x());
    assert_eq!(points.columns().values("Y"), original.columns().values("Y"));
    assert_eq!(points.items(), original.items());
    // The flag stays downgraded after the round trip.
    assert!(!points.is_linear());
}

#[test]
fn test_insert_into_empty_set_classifies_x() {
    let mut points: PointSet<Record> = PointSet::empty(Bindings::new("X").with("Y", Default::default()));
    assert_eq!(points.x_kind(), None);

    points.insert(0, Record::new().with("X", "first").with("Y", 1.0));
    points.insert(1, Record::new().with("X", "second").with("Y", 2.0));

    assert_aligned(&points);
    assert_eq!(points.columns().x().category(1), Some("second"));
}

#[test]
fn test_reset_rebuilds() {
    let mut points = series(&[3.0, 1.0]);
    assert!(!points.is_linear());

    points.apply(CollectionChange::Reset {
        items: vec![point(1.0, 1.0), point(2.0, 2.0)],
    });
    assert!(points.is_linear());
    assert_eq!(points.columns().values("Y"), Some(&[1.0, 2.0][..]));
}

#[test]
fn test_changes_without_bindings_are_ignored() {
    let mut points: PointSet<Record> = PointSet::default();
    points.insert(0, point(1.0, 1.0));
    assert!(points.is_empty());

    let built = ColumnBuilder::new("X").values("Y").build(vec![point(1.0, 1.0)]);
    assert!(built.bindings().is_some());
}
