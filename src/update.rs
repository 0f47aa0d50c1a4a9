//! Incremental updates of a point set from collection changes.

use crate::data_types::{
    point_set::ascends, Bindable, Columns, PointSet, ValueKind,
};
use crate::ingest::{coerce_x, ColumnBuilder};
use tracing::{trace, warn};

/// A single change of the backing collection, translated by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionChange<T> {
    Insert { index: usize, item: T },
    Replace { index: usize, item: T },
    Remove { index: usize },
    /// The collection was replaced wholesale.
    Reset { items: Vec<T> },
}

impl<T: Bindable> PointSet<T> {
    /// Applies one change in place. Invalid changes are skipped.
    pub fn apply(&mut self, change: CollectionChange<T>) {
        match change {
            CollectionChange::Insert { index, item } => self.insert(index, item),
            CollectionChange::Replace { index, item } => self.replace(index, item),
            CollectionChange::Remove { index } => self.remove(index),
            CollectionChange::Reset { items } => self.reset(items),
        }
    }

    /// Applies changes in order.
    pub fn apply_batch<I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = CollectionChange<T>>,
    {
        for change in changes {
            self.apply(change);
        }
    }

    /// Inserts `item` at `index` (appends when `index == point_count`).
    pub fn insert(&mut self, index: usize, item: T) {
        let Some(bindings) = self.bindings.as_ref() else {
            warn!("Insert on a point set without bindings ignored");
            return;
        };
        if index > self.items.len() {
            warn!(index, count = self.items.len(), "Insert index out of range ignored");
            return;
        }

        let raw_x = bindings.resolve_x(&item);
        let kind = match self.columns.x_kind {
            Some(kind) => kind,
            None => match raw_x.as_ref() {
                Some(v) if !v.is_null() && self.items.is_empty() => {
                    let kind = ValueKind::classify(v);
                    self.columns = Columns::new(Some(kind), bindings.empty_y_columns());
                    kind
                }
                _ => {
                    warn!("X value of the first inserted item could not be resolved");
                    return;
                }
            },
        };

        let x = coerce_x(raw_x.as_ref(), kind);
        let ys = bindings.resolve_ys(&item);
        let was_empty = self.items.is_empty();
        self.columns.insert(index, x, ys);
        self.items.insert(index, item);

        if index == 0 {
            // New head: compare the previous first element against it.
            if !was_empty {
                self.columns.check_linear_at(1);
            }
        } else {
            self.columns.check_linear_at(index);
        }
        trace!(index, count = self.items.len(), "Inserted point");
    }

    /// Overwrites the point at `index`. Only the left neighbour is rechecked for linearity.
    pub fn replace(&mut self, index: usize, item: T) {
        let Some(bindings) = self.bindings.as_ref() else {
            warn!("Replace on a point set without bindings ignored");
            return;
        };
        let Some(kind) = self.columns.x_kind else {
            return;
        };
        if index >= self.items.len() {
            warn!(index, count = self.items.len(), "Replace index out of range ignored");
            return;
        }

        let x = coerce_x(bindings.resolve_x(&item).as_ref(), kind);
        let ys = bindings.resolve_ys(&item);
        self.columns.replace(index, x, ys);
        self.items[index] = item;
        self.columns.check_linear_at(index);
        trace!(index, "Replaced point");
    }

    /// Removes the point at `index`. Linearity is not re-validated.
    pub fn remove(&mut self, index: usize) {
        if index >= self.items.len() {
            warn!(index, count = self.items.len(), "Remove index out of range ignored");
            return;
        }
        self.columns.remove(index);
        self.items.remove(index);
        trace!(index, count = self.items.len(), "Removed point");
    }

    /// Rebuilds every column from `items` with the current bindings.
    pub fn reset(&mut self, items: Vec<T>) {
        match self.bindings.take() {
            Some(bindings) => *self = ColumnBuilder::from_bindings(bindings).build(items),
            None => warn!("Reset on a point set without bindings ignored"),
        }
    }
}

/// Full linearity scan, independent of the incremental flag.
pub fn is_strictly_ascending(values: &[f64]) -> bool {
    values.windows(2).all(|w| ascends(w[0], w[1]))
}
