use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

const MS_PER_DAY: f64 = 86_400_000.0;

/// A dynamically typed value read from a bound record.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    DateTime(NaiveDateTime),
    TimeSpan(TimeDelta),
    /// Ordered, indexable collection (usable as a sample list).
    List(Vec<Value>),
    /// Raw array. Indexable, but never accepted as a scalar leaf.
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Element `index` of a list or array value.
    pub fn element(&self, index: usize) -> Option<&Value> {
        match self {
            Value::List(items) | Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Numeric coercion. Anything that has no numeric meaning becomes NaN.
    pub fn to_f64(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::DateTime(dt) => to_ole_date(dt),
            Value::TimeSpan(span) => span.num_milliseconds() as f64,
            Value::Null | Value::List(_) | Value::Array(_) | Value::Record(_) => f64::NAN,
        }
    }

    /// Text used for a categorical x value.
    pub fn to_category(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::DateTime(dt) => dt.to_string(),
            Value::TimeSpan(span) => span.to_string(),
            Value::List(_) | Value::Array(_) | Value::Record(_) => String::new(),
        }
    }

    /// Sample list for box-and-whisker style bindings.
    pub fn to_samples(&self) -> Vec<f64> {
        match self {
            Value::Null => Vec::new(),
            Value::List(items) | Value::Array(items) => items.iter().map(Value::to_f64).collect(),
            other => vec![other.to_f64()],
        }
    }

    pub fn to_flag(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Converts a date-time into an OLE automation serial day (days since 1899-12-30).
pub fn to_ole_date(dt: &NaiveDateTime) -> f64 {
    match ole_epoch() {
        Some(epoch) => (*dt - epoch).num_milliseconds() as f64 / MS_PER_DAY,
        None => f64::NAN,
    }
}

/// Inverse of [`to_ole_date`].
pub fn from_ole_date(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let epoch = ole_epoch()?;
    let ms = (days * MS_PER_DAY).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(ms)?)
}

fn ole_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::TimeSpan(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::List(v.into_iter().map(Value::Number).collect())
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Record(Record {
                fields: map.iter().map(|(k, v)| (k.clone(), Value::from(v))).collect(),
            }),
        }
    }
}

/// A named-field record, the default item type for bound data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Member access on a bound item.
///
/// This is the only place the engine looks inside user data; everything past
/// the path resolver works on typed columns.
pub trait Bindable {
    /// Value of the member called `name`, or `None` when there is no such member.
    fn member(&self, name: &str) -> Option<Value>;
}

impl Bindable for Record {
    fn member(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

impl Bindable for Value {
    fn member(&self, name: &str) -> Option<Value> {
        match self {
            Value::Record(record) => record.member(name),
            _ => None,
        }
    }
}

impl Bindable for serde_json::Value {
    fn member(&self, name: &str) -> Option<Value> {
        match self {
            serde_json::Value::Object(map) => map.get(name).map(Value::from),
            _ => None,
        }
    }
}

impl<T: Bindable + ?Sized> Bindable for &T {
    fn member(&self, name: &str) -> Option<Value> {
        (**self).member(name)
    }
}

impl<T: Bindable + ?Sized> Bindable for Rc<T> {
    fn member(&self, name: &str) -> Option<Value> {
        (**self).member(name)
    }
}

impl<T: Bindable + ?Sized> Bindable for Arc<T> {
    fn member(&self, name: &str) -> Option<Value> {
        (**self).member(name)
    }
}
