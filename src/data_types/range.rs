use serde::{Deserialize, Serialize};

/// Immutable `(start, end)` pair. `DoubleRange::EMPTY` is the identity for [`DoubleRange::union`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoubleRange {
    pub start: f64,
    pub end: f64,
}

impl Default for DoubleRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl DoubleRange {
    pub const EMPTY: DoubleRange = DoubleRange {
        start: f64::NAN,
        end: f64::NAN,
    };

    /// Builds a range, swapping the bounds if needed. NaN bounds give `EMPTY`.
    pub fn new(a: f64, b: f64) -> Self {
        if a.is_nan() || b.is_nan() {
            return Self::EMPTY;
        }
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn point(v: f64) -> Self {
        Self::new(v, v)
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_nan() || self.end.is_nan()
    }

    pub fn delta(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.end - self.start
        }
    }

    pub fn union(self, other: DoubleRange) -> DoubleRange {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        DoubleRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Extends the range to cover `v`. NaN values are ignored.
    pub fn include(self, v: f64) -> DoubleRange {
        if v.is_nan() {
            self
        } else {
            self.union(DoubleRange::point(v))
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        !self.is_empty() && v >= self.start && v <= self.end
    }

    /// Range computed over a slice, skipping NaN values.
    pub fn from_values(values: &[f64]) -> DoubleRange {
        values
            .iter()
            .fold(DoubleRange::EMPTY, |acc, &v| acc.include(v))
    }
}
