//! Data ingestion: bound records to typed columns.

use crate::data_types::{
    Bindable, Columns, PointSet, Value, ValueKind, XValue, YColumn, YValue,
};
use crate::path::{is_complex_path, PropertyPath};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Storage shape of a y binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnShape {
    #[default]
    Values,
    Samples,
    Flags,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YBinding {
    pub path: PropertyPath,
    pub shape: ColumnShape,
}

/// How member values are looked up on each item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Every path is a plain member name: one `member` call per value.
    Simple,
    /// At least one path is dotted or indexed: walk it segment by segment.
    Complex,
}

impl ResolveStrategy {
    pub fn select<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        if paths.into_iter().any(is_complex_path) {
            ResolveStrategy::Complex
        } else {
            ResolveStrategy::Simple
        }
    }
}

/// The x path and y paths of a series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings {
    x: PropertyPath,
    ys: Vec<YBinding>,
    strategy: ResolveStrategy,
}

impl Bindings {
    pub fn new(x_path: &str) -> Self {
        let x = PropertyPath::parse(x_path);
        let strategy = ResolveStrategy::select([x.as_str()]);
        Self {
            x,
            ys: Vec::new(),
            strategy,
        }
    }

    pub fn with(mut self, path: &str, shape: ColumnShape) -> Self {
        self.ys.push(YBinding {
            path: PropertyPath::parse(path),
            shape,
        });
        self.strategy = ResolveStrategy::select(
            std::iter::once(self.x.as_str()).chain(self.ys.iter().map(|y| y.path.as_str())),
        );
        self
    }

    /// Forces a resolution strategy. Both strategies produce the same columns.
    pub fn with_strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn x_path(&self) -> &PropertyPath {
        &self.x
    }

    pub fn y_bindings(&self) -> &[YBinding] {
        &self.ys
    }

    pub fn strategy(&self) -> ResolveStrategy {
        self.strategy
    }

    pub(crate) fn empty_y_columns(&self) -> Vec<(String, YColumn)> {
        self.ys
            .iter()
            .map(|y| {
                let col = match y.shape {
                    ColumnShape::Values => YColumn::Values(Vec::new()),
                    ColumnShape::Samples => YColumn::Samples(Vec::new()),
                    ColumnShape::Flags => YColumn::Flags(Vec::new()),
                };
                (y.path.as_str().to_string(), col)
            })
            .collect()
    }

    /// Raw x value of `item`, with array leaves rejected.
    pub(crate) fn resolve_x<T: Bindable + ?Sized>(&self, item: &T) -> Option<Value> {
        self.resolve_scalar(&self.x, item)
    }

    pub(crate) fn resolve_ys<T: Bindable + ?Sized>(&self, item: &T) -> Vec<YValue> {
        self.ys
            .iter()
            .map(|y| match y.shape {
                ColumnShape::Values => YValue::Value(
                    self.resolve_scalar(&y.path, item)
                        .map(|v| v.to_f64())
                        .unwrap_or(f64::NAN),
                ),
                ColumnShape::Flags => YValue::Flag(
                    self.resolve_scalar(&y.path, item)
                        .map(|v| v.to_flag())
                        .unwrap_or(false),
                ),
                ColumnShape::Samples => YValue::Samples(
                    self.resolve_any(&y.path, item)
                        .map(|v| v.to_samples())
                        .unwrap_or_default(),
                ),
            })
            .collect()
    }

    fn resolve_scalar<T: Bindable + ?Sized>(&self, path: &PropertyPath, item: &T) -> Option<Value> {
        match self.strategy {
            ResolveStrategy::Simple => item.member(path.as_str()).filter(|v| !v.is_array()),
            ResolveStrategy::Complex => path.resolve(item),
        }
    }

    fn resolve_any<T: Bindable + ?Sized>(&self, path: &PropertyPath, item: &T) -> Option<Value> {
        match self.strategy {
            ResolveStrategy::Simple => item.member(path.as_str()),
            ResolveStrategy::Complex => path.resolve_samples(item),
        }
    }
}

/// Coerces a raw x value into the column representation of `kind`.
pub(crate) fn coerce_x(value: Option<&Value>, kind: ValueKind) -> XValue {
    if kind.is_categorical() {
        XValue::Category(value.map(Value::to_category).unwrap_or_default())
    } else {
        XValue::Numeric(value.map(Value::to_f64).unwrap_or(f64::NAN))
    }
}

/// Builds a [`PointSet`] from a data source in a single forward pass.
///
/// The first item is checked strictly: if its x value cannot be resolved (or is
/// an array) the result is empty. Every later item is coerced leniently, with
/// unresolvable values stored as NaN or an empty category.
#[derive(Clone, Debug)]
pub struct ColumnBuilder {
    bindings: Bindings,
}

impl ColumnBuilder {
    pub fn new(x_path: &str) -> Self {
        Self {
            bindings: Bindings::new(x_path),
        }
    }

    pub fn from_bindings(bindings: Bindings) -> Self {
        Self { bindings }
    }

    pub fn values(mut self, path: &str) -> Self {
        self.bindings = self.bindings.with(path, ColumnShape::Values);
        self
    }

    pub fn samples(mut self, path: &str) -> Self {
        self.bindings = self.bindings.with(path, ColumnShape::Samples);
        self
    }

    pub fn flags(mut self, path: &str) -> Self {
        self.bindings = self.bindings.with(path, ColumnShape::Flags);
        self
    }

    pub fn strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.bindings = self.bindings.with_strategy(strategy);
        self
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn build<T, I>(self, source: I) -> PointSet<T>
    where
        T: Bindable,
        I: IntoIterator<Item = T>,
    {
        let bindings = self.bindings;
        let mut source = source.into_iter().peekable();

        let kind = match source.peek() {
            None => {
                debug!("Empty data source, no points built");
                return PointSet::empty(bindings);
            }
            Some(first) => match bindings.resolve_x(first) {
                Some(v) if !v.is_null() => ValueKind::classify(&v),
                _ => {
                    warn!(
                        path = bindings.x_path().as_str(),
                        "X value of the first item could not be resolved, no points built"
                    );
                    return PointSet::empty(bindings);
                }
            },
        };

        let mut columns = Columns::new(Some(kind), bindings.empty_y_columns());
        let mut items = Vec::with_capacity(source.size_hint().0);

        for item in source {
            let x = coerce_x(bindings.resolve_x(&item).as_ref(), kind);
            let ys = bindings.resolve_ys(&item);
            columns.push(x, ys);
            columns.check_linear_at(columns.len() - 1);
            items.push(item);
        }

        debug!(
            points = items.len(),
            kind = ?kind,
            linear = columns.is_linear,
            "Built point set"
        );

        PointSet {
            bindings: Some(bindings),
            columns,
            items,
        }
    }
}

/// Builds scalar y columns for every path in `y_paths`.
pub fn build_columns<T, I>(source: I, x_path: &str, y_paths: &[&str]) -> PointSet<T>
where
    T: Bindable,
    I: IntoIterator<Item = T>,
{
    y_paths
        .iter()
        .fold(ColumnBuilder::new(x_path), |b, p| b.values(p))
        .build(source)
}
