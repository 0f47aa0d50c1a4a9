use super::value::Value;
use serde::{Deserialize, Serialize};

/// Domain of a bound column, decided once from the first sampled value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueKind {
    String,
    #[default]
    Double,
    DateTime,
    TimeSpan,
    /// Numeric column feeding a logarithmic axis. Assigned by the host, never classified.
    Logarithmic,
}

impl ValueKind {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::TimeSpan(_) => ValueKind::TimeSpan,
            _ => ValueKind::Double,
        }
    }

    /// Categorical columns are positioned by index rather than by value.
    pub fn is_categorical(self) -> bool {
        self == ValueKind::String
    }
}
