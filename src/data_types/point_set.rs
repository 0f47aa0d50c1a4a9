use super::range::DoubleRange;
use super::value_kind::ValueKind;
use crate::ingest::Bindings;
use std::borrow::Cow;

/// X column storage. Categorical data keeps its text; everything else is numeric.
#[derive(Clone, Debug, PartialEq)]
pub enum XColumn {
    Numeric(Vec<f64>),
    Category(Vec<String>),
}

impl Default for XColumn {
    fn default() -> Self {
        XColumn::Numeric(Vec::new())
    }
}

impl XColumn {
    pub fn for_kind(kind: ValueKind) -> Self {
        if kind.is_categorical() {
            XColumn::Category(Vec::new())
        } else {
            XColumn::Numeric(Vec::new())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            XColumn::Numeric(v) => v.len(),
            XColumn::Category(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric value at `index`; categories have none.
    pub fn numeric(&self, index: usize) -> Option<f64> {
        match self {
            XColumn::Numeric(v) => v.get(index).copied(),
            XColumn::Category(_) => None,
        }
    }

    pub fn category(&self, index: usize) -> Option<&str> {
        match self {
            XColumn::Category(v) => v.get(index).map(String::as_str),
            XColumn::Numeric(_) => None,
        }
    }
}

/// A single coerced x value, ready to be stored.
#[derive(Clone, Debug, PartialEq)]
pub enum XValue {
    Numeric(f64),
    Category(String),
}

/// Y column storage, one per binding.
#[derive(Clone, Debug, PartialEq)]
pub enum YColumn {
    Values(Vec<f64>),
    /// One list of samples per point (box-and-whisker).
    Samples(Vec<Vec<f64>>),
    /// Auxiliary boolean column (waterfall summary flags).
    Flags(Vec<bool>),
}

impl YColumn {
    pub fn len(&self) -> usize {
        match self {
            YColumn::Values(v) => v.len(),
            YColumn::Samples(v) => v.len(),
            YColumn::Flags(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single coerced y value.
#[derive(Clone, Debug, PartialEq)]
pub enum YValue {
    Value(f64),
    Samples(Vec<f64>),
    Flag(bool),
}

/// Typed columnar view of a series' data, without the source items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Columns {
    pub(crate) x: XColumn,
    pub(crate) x_kind: Option<ValueKind>,
    pub(crate) ys: Vec<(String, YColumn)>,
    pub(crate) is_linear: bool,
}

impl Columns {
    pub(crate) fn new(x_kind: Option<ValueKind>, ys: Vec<(String, YColumn)>) -> Self {
        Self {
            x: x_kind.map(XColumn::for_kind).unwrap_or_default(),
            x_kind,
            ys,
            is_linear: true,
        }
    }

    /// Builds numeric columns directly, mostly useful for hosts that already hold typed data.
    pub fn from_values(x: Vec<f64>, ys: Vec<(&str, Vec<f64>)>) -> Self {
        let is_linear = x.windows(2).all(|w| ascends(w[0], w[1]));
        Self {
            x: XColumn::Numeric(x),
            x_kind: Some(ValueKind::Double),
            ys: ys
                .into_iter()
                .map(|(name, v)| (name.to_string(), YColumn::Values(v)))
                .collect(),
            is_linear,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn x(&self) -> &XColumn {
        &self.x
    }

    pub fn x_kind(&self) -> Option<ValueKind> {
        self.x_kind
    }

    pub fn is_linear(&self) -> bool {
        self.is_linear
    }

    /// Marks the x column as feeding a logarithmic axis.
    pub fn set_logarithmic(&mut self) {
        if matches!(self.x_kind, Some(ValueKind::Double)) {
            self.x_kind = Some(ValueKind::Logarithmic);
        }
    }

    /// X positions used for geometry. Categorical or `indexed` columns use the point index.
    pub fn x_positions(&self, indexed: bool) -> Cow<'_, [f64]> {
        match &self.x {
            XColumn::Numeric(v) if !indexed => Cow::Borrowed(v.as_slice()),
            _ => Cow::Owned((0..self.len()).map(|i| i as f64).collect()),
        }
    }

    pub fn y_columns(&self) -> impl Iterator<Item = (&str, &YColumn)> {
        self.ys.iter().map(|(name, col)| (name.as_str(), col))
    }

    pub fn y(&self, name: &str) -> Option<&YColumn> {
        self.ys.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn values(&self, name: &str) -> Option<&[f64]> {
        match self.y(name)? {
            YColumn::Values(v) => Some(v),
            _ => None,
        }
    }

    pub fn samples(&self, name: &str) -> Option<&[Vec<f64>]> {
        match self.y(name)? {
            YColumn::Samples(v) => Some(v),
            _ => None,
        }
    }

    pub fn flags(&self, name: &str) -> Option<&[bool]> {
        match self.y(name)? {
            YColumn::Flags(v) => Some(v),
            _ => None,
        }
    }

    /// First scalar y column, or an empty slice.
    pub fn primary_values(&self) -> &[f64] {
        self.ys
            .iter()
            .find_map(|(_, c)| match c {
                YColumn::Values(v) => Some(v.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// First samples column, or an empty slice.
    pub fn primary_samples(&self) -> &[Vec<f64>] {
        self.ys
            .iter()
            .find_map(|(_, c)| match c {
                YColumn::Samples(v) => Some(v.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Range of the numeric x column (or of the indices for categories).
    pub fn x_range(&self) -> DoubleRange {
        match &self.x {
            XColumn::Numeric(v) => DoubleRange::from_values(v),
            XColumn::Category(v) if v.is_empty() => DoubleRange::EMPTY,
            XColumn::Category(v) => DoubleRange::new(0.0, (v.len() - 1) as f64),
        }
    }

    pub(crate) fn push(&mut self, x: XValue, ys: Vec<YValue>) {
        let index = self.len();
        self.insert(index, x, ys);
    }

    pub(crate) fn insert(&mut self, index: usize, x: XValue, ys: Vec<YValue>) {
        match (&mut self.x, x) {
            (XColumn::Numeric(col), XValue::Numeric(v)) => col.insert(index, v),
            (XColumn::Category(col), XValue::Category(v)) => col.insert(index, v),
            (XColumn::Numeric(col), XValue::Category(_)) => col.insert(index, f64::NAN),
            (XColumn::Category(col), XValue::Numeric(v)) => col.insert(index, v.to_string()),
        }
        for ((_, col), value) in self.ys.iter_mut().zip(ys) {
            match (col, value) {
                (YColumn::Values(c), YValue::Value(v)) => c.insert(index, v),
                (YColumn::Samples(c), YValue::Samples(v)) => c.insert(index, v),
                (YColumn::Flags(c), YValue::Flag(v)) => c.insert(index, v),
                (YColumn::Values(c), _) => c.insert(index, f64::NAN),
                (YColumn::Samples(c), _) => c.insert(index, Vec::new()),
                (YColumn::Flags(c), _) => c.insert(index, false),
            }
        }
    }

    pub(crate) fn replace(&mut self, index: usize, x: XValue, ys: Vec<YValue>) {
        match (&mut self.x, x) {
            (XColumn::Numeric(col), XValue::Numeric(v)) => col[index] = v,
            (XColumn::Category(col), XValue::Category(v)) => col[index] = v,
            (XColumn::Numeric(col), XValue::Category(_)) => col[index] = f64::NAN,
            (XColumn::Category(col), XValue::Numeric(v)) => col[index] = v.to_string(),
        }
        for ((_, col), value) in self.ys.iter_mut().zip(ys) {
            match (col, value) {
                (YColumn::Values(c), YValue::Value(v)) => c[index] = v,
                (YColumn::Samples(c), YValue::Samples(v)) => c[index] = v,
                (YColumn::Flags(c), YValue::Flag(v)) => c[index] = v,
                (YColumn::Values(c), _) => c[index] = f64::NAN,
                (YColumn::Samples(c), _) => c[index] = Vec::new(),
                (YColumn::Flags(c), _) => c[index] = false,
            }
        }
    }

    pub(crate) fn remove(&mut self, index: usize) {
        match &mut self.x {
            XColumn::Numeric(col) => {
                col.remove(index);
            }
            XColumn::Category(col) => {
                col.remove(index);
            }
        }
        for (_, col) in self.ys.iter_mut() {
            match col {
                YColumn::Values(c) => {
                    c.remove(index);
                }
                YColumn::Samples(c) => {
                    c.remove(index);
                }
                YColumn::Flags(c) => {
                    c.remove(index);
                }
            }
        }
    }

    /// Applies the one-way linearity check for a value stored at `index`
    /// against its left neighbour.
    pub(crate) fn check_linear_at(&mut self, index: usize) {
        if !self.is_linear || index == 0 {
            return;
        }
        if let (Some(prev), Some(cur)) = (self.x.numeric(index - 1), self.x.numeric(index)) {
            if !ascends(prev, cur) {
                self.is_linear = false;
            }
        }
    }
}

/// Strict ascent test used for linearity. NaN on either side is a violation.
pub(crate) fn ascends(prev: f64, cur: f64) -> bool {
    cur > prev
}

/// Aggregate per-series state: typed columns plus the original items, index aligned.
#[derive(Clone, Debug)]
pub struct PointSet<T> {
    pub(crate) bindings: Option<Bindings>,
    pub(crate) columns: Columns,
    pub(crate) items: Vec<T>,
}

impl<T> Default for PointSet<T> {
    fn default() -> Self {
        Self {
            bindings: None,
            columns: Columns::default(),
            items: Vec::new(),
        }
    }
}

impl<T> PointSet<T> {
    /// An empty point set bound to `bindings`; the x kind is decided by the first insert.
    pub fn empty(bindings: Bindings) -> Self {
        let ys = bindings.empty_y_columns();
        Self {
            bindings: Some(bindings),
            columns: Columns::new(None, ys),
            items: Vec::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut Columns {
        &mut self.columns
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        self.bindings.as_ref()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn is_linear(&self) -> bool {
        self.columns.is_linear
    }

    pub fn x_kind(&self) -> Option<ValueKind> {
        self.columns.x_kind
    }

    /// Drops all points but keeps the bindings.
    pub fn clear(&mut self) {
        let ys = self
            .bindings
            .as_ref()
            .map(Bindings::empty_y_columns)
            .unwrap_or_default();
        self.columns = Columns::new(None, ys);
        self.items.clear();
    }
}

impl<T: PartialEq> PointSet<T> {
    /// Reverse lookup from an item to its index.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }
}
