pub mod point_set;
pub mod range;
pub mod value;
pub mod value_kind;

// Re-export everything for convenience
pub use point_set::*;
pub use range::*;
pub use value::*;
pub use value_kind::*;
