//! chart_series: data binding, incremental columns and segment geometry for chart series

pub mod config;
pub mod data_types;
pub mod ingest;
pub mod labels;
pub mod path;
pub mod range_tracker;
pub mod scales;
pub mod segments;
pub mod series;
pub mod transform;
pub mod update;

pub use config::{EngineConfig, SeriesParams};
pub use data_types::{Bindable, Columns, DoubleRange, PointSet, Record, Value, ValueKind};
pub use hit_test::{hit_test, HitResult};
pub use ingest::{build_columns, Bindings, ColumnBuilder};
pub use labels::{resolve_collisions, LabelPolicy, TextMeasurer};
pub use path::PropertyPath;
pub use range_tracker::RangeTracker;
pub use segments::{generate, ChartKind, SegmentGeometry};
pub use series::{ChartId, Segment, Series};
pub use transform::AxisTransform;
pub use update::CollectionChange;
