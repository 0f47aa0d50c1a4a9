//! Per-series orchestration: ownership, change batching and lazy regeneration.

use crate::config::{EngineConfig, SeriesParams};
use crate::data_types::{Bindable, DoubleRange, PointSet};
use crate::hit_test::{hit_test, HitResult};
use crate::ingest::{Bindings, ColumnBuilder};
use crate::labels::{place_circular_labels, resolve_collisions, CircularLayout, DataLabel, LabelPolicy, Rect, TextMeasurer};
use crate::range_tracker::{AxisPadding, RangeTracker};
use crate::segments::{generate, ChartKind, SegmentGeometry};
use crate::transform::AxisTransform;
use crate::update::CollectionChange;
use eyre::{bail, Result};
use glam::DVec2;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChartId(pub usize);

/// One unit of drawable geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Id of the owning series.
    pub series: String,
    pub index: usize,
    pub geometry: SegmentGeometry,
    /// Palette index.
    pub style: usize,
    pub visible: bool,
    /// Geometry before the last data change, the start of a transition.
    pub previous: Option<Box<SegmentGeometry>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Invalidation {
    Data,
    Layout,
}

pub struct Series<T> {
    pub id: String,
    kind: ChartKind,
    params: SeriesParams,
    config: EngineConfig,
    bindings: Bindings,
    points: PointSet<T>,
    segments: Vec<Segment>,
    ranges: RangeTracker,
    selected: BTreeSet<usize>,
    owner: Option<ChartId>,
    dirty: Option<Invalidation>,
    style: usize,
    logarithmic_x: bool,
}

impl<T: Bindable> Series<T> {
    pub fn new(id: impl Into<String>, kind: ChartKind, bindings: Bindings) -> Self {
        Self {
            id: id.into(),
            kind,
            params: SeriesParams::default(),
            config: EngineConfig::default(),
            points: PointSet::empty(bindings.clone()),
            bindings,
            segments: Vec::new(),
            ranges: RangeTracker::new(),
            selected: BTreeSet::new(),
            owner: None,
            dirty: None,
            style: 0,
            logarithmic_x: false,
        }
    }

    pub fn with_params(mut self, params: SeriesParams) -> Self {
        self.set_params(params);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self.invalidate(Invalidation::Layout);
        self
    }

    pub fn with_style(mut self, style: usize) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn params(&self) -> &SeriesParams {
        &self.params
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn points(&self) -> &PointSet<T> {
        &self.points
    }

    pub fn owner(&self) -> Option<ChartId> {
        self.owner
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    fn invalidate(&mut self, reason: Invalidation) {
        self.dirty = self.dirty.max(Some(reason));
    }

    /// Binds the series to `chart`. A series belongs to at most one chart.
    pub fn attach(&mut self, chart: ChartId) -> Result<()> {
        match self.owner {
            Some(owner) if owner != chart => {
                bail!("series '{}' is already attached to chart {:?}", self.id, owner)
            }
            _ => {
                self.owner = Some(chart);
                self.invalidate(Invalidation::Layout);
                Ok(())
            }
        }
    }

    /// Releases the series from its chart and drops all derived state.
    pub fn detach(&mut self) {
        self.owner = None;
        self.points.clear();
        self.segments.clear();
        self.ranges.reset();
        self.selected.clear();
        self.dirty = None;
    }

    /// Replaces the bound items and rebuilds the columns.
    pub fn set_source(&mut self, items: impl IntoIterator<Item = T>) {
        self.points = ColumnBuilder::from_bindings(self.bindings.clone()).build(items);
        self.mark_logarithmic();
        self.invalidate(Invalidation::Data);
    }

    pub fn apply_changes(&mut self, changes: impl IntoIterator<Item = CollectionChange<T>>) {
        self.points.apply_batch(changes);
        self.mark_logarithmic();
        self.invalidate(Invalidation::Data);
    }

    pub fn set_params(&mut self, params: SeriesParams) {
        if self.params != params {
            self.params = params;
            self.invalidate(Invalidation::Layout);
        }
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        if self.kind != kind {
            self.kind = kind;
            self.invalidate(Invalidation::Layout);
        }
    }

    /// Marks the numeric x column as feeding a logarithmic axis. The mark
    /// survives later rebuilds of the columns.
    pub fn set_logarithmic_x(&mut self) {
        if !self.logarithmic_x {
            self.logarithmic_x = true;
            self.mark_logarithmic();
            self.invalidate(Invalidation::Layout);
        }
    }

    fn mark_logarithmic(&mut self) {
        if self.logarithmic_x {
            self.points.columns_mut().set_logarithmic();
        }
    }

    /// Regenerates segments and ranges if anything changed since the last
    /// call. Returns whether the segments changed.
    ///
    /// After a data change each new segment keeps the geometry it replaces as
    /// the start of a transition; parameter changes regenerate without one.
    pub fn recompute(&mut self) -> bool {
        let Some(reason) = self.dirty.take() else {
            return false;
        };

        let columns = self.points.columns();
        let geometries = generate(self.kind, columns, &self.params, &self.config);

        let mut previous: HashMap<usize, SegmentGeometry> = HashMap::new();
        if reason == Invalidation::Data {
            for segment in self.segments.drain(..) {
                previous.entry(segment.index).or_insert(segment.geometry);
            }
        }

        self.ranges = RangeTracker::track(self.kind, columns, &geometries, self.params.indexed);
        self.segments = geometries
            .into_iter()
            .map(|geometry| {
                let index = geometry.index();
                Segment {
                    series: self.id.clone(),
                    index,
                    visible: !geometry.is_empty(),
                    previous: previous.remove(&index).map(Box::new),
                    geometry,
                    style: self.style,
                }
            })
            .collect();

        let count = self.points.point_count();
        self.selected.retain(|&i| i < count);

        tracing::debug!(
            series = %self.id,
            kind = ?self.kind,
            ?reason,
            segments = self.segments.len(),
            "Recomputed series"
        );
        true
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment geometry at `progress` (0..=1) of the transition from the
    /// previous geometry.
    pub fn interpolated(&self, progress: f64) -> Vec<SegmentGeometry> {
        self.segments
            .iter()
            .map(|s| match &s.previous {
                Some(from) => s.geometry.interpolate(from, progress),
                None => s.geometry.clone(),
            })
            .collect()
    }

    pub fn ranges(&self) -> &RangeTracker {
        &self.ranges
    }

    pub fn actual_x_range(&self, slot_width: f64, padding: AxisPadding) -> DoubleRange {
        self.ranges.actual_x_range(self.kind, slot_width, padding)
    }

    pub fn actual_y_range(&self) -> DoubleRange {
        self.ranges.actual_y_range(self.kind)
    }

    pub fn hit_test(
        &self,
        query: DVec2,
        visible: DoubleRange,
        x_axis: &dyn AxisTransform,
    ) -> Option<HitResult<'_, T>> {
        hit_test(&self.points, query, visible, self.params.indexed, x_axis)
    }

    /// Selects the point at `index`. Returns false when there is no such point.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.points.point_count() {
            return false;
        }
        self.selected.insert(index);
        true
    }

    pub fn deselect(&mut self, index: usize) -> bool {
        self.selected.remove(&index)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Outward value labels of a pie or radial bar series, collisions resolved.
    /// Other kinds have no circular labels.
    pub fn data_labels(
        &self,
        layout: CircularLayout,
        measurer: &dyn TextMeasurer,
        policy: LabelPolicy,
        bounds: Rect,
    ) -> Vec<DataLabel> {
        if !self.kind.is_circular() {
            return Vec::new();
        }
        let arcs: Vec<_> = self
            .segments
            .iter()
            .filter_map(|s| match &s.geometry {
                SegmentGeometry::Circular(g) => Some(*g),
                _ => None,
            })
            .collect();

        let precision = self.config.label_precision;
        let mut labels = place_circular_labels(&arcs, layout, measurer, &self.config, |s| {
            format!("{:.*}", precision, s.value)
        });
        resolve_collisions(&mut labels, policy, bounds, measurer, &self.config);
        labels
    }
}
