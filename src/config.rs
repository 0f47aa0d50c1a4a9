//! Engine constants and per-series parameters.

use crate::segments::column::SideBySideInfo;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Constants shared by every series of a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fraction of a category slot filled by side-by-side series.
    pub column_width: f64,
    /// Multiplier of the interquartile range beyond which a sample is an outlier.
    pub outlier_iqr_factor: f64,
    /// Degrees removed from a full 360° sweep.
    pub full_sweep_nudge: f64,
    /// Default cardinal spline tension (0 = Catmull-Rom tangents).
    pub cardinal_tension: f64,
    /// Space between a connector end and its label.
    pub label_gap: f64,
    /// Radial length of a label connector.
    pub connector_length: f64,
    /// Horizontal tail of a label connector.
    pub connector_tail: f64,
    /// Vertical space kept between shifted labels.
    pub label_spacing: f64,
    pub ellipsis: String,
    pub label_precision: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            column_width: 0.8,
            outlier_iqr_factor: 1.5,
            full_sweep_nudge: 0.0001,
            cardinal_tension: 0.5,
            label_gap: 4.0,
            connector_length: 10.0,
            connector_tail: 10.0,
            label_spacing: 2.0,
            ellipsis: "...".to_string(),
            label_precision: 2,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).wrap_err("invalid engine configuration")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplineType {
    #[default]
    Natural,
    Monotonic,
    Cardinal,
    Clamped,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineParams {
    pub spline_type: SplineType,
    /// Overrides [`EngineConfig::cardinal_tension`].
    pub tension: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoxPlotMode {
    #[default]
    Normal,
    Exclusive,
    Inclusive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxWhiskerParams {
    pub mode: BoxPlotMode,
    pub show_outliers: bool,
}

impl Default for BoxWhiskerParams {
    fn default() -> Self {
        Self {
            mode: BoxPlotMode::Normal,
            show_outliers: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallParams {
    /// Summary points show the running total instead of their own value.
    pub allow_auto_sum: bool,
    /// Flags column marking summary points.
    pub summary_path: Option<String>,
}

impl Default for WaterfallParams {
    fn default() -> Self {
        Self {
            allow_auto_sum: true,
            summary_path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircularParams {
    pub start_angle: f64,
    pub end_angle: f64,
    /// Value mapped to a full sweep (radial bar only).
    pub maximum: Option<f64>,
    /// Inner radius as a fraction of the radius (radial bar only).
    pub inner_radius: f64,
    /// Fraction of each ring left empty (radial bar only).
    pub gap_ratio: f64,
}

impl Default for CircularParams {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: 360.0,
            maximum: None,
            inner_radius: 0.4,
            gap_ratio: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorBarType {
    #[default]
    Fixed,
    Percentage,
    StandardDeviation,
    StandardError,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorBarMode {
    #[default]
    Both,
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorBarDirection {
    #[default]
    Both,
    Plus,
    Minus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBarParams {
    pub error_type: ErrorBarType,
    pub mode: ErrorBarMode,
    pub horizontal_direction: ErrorBarDirection,
    pub vertical_direction: ErrorBarDirection,
    pub horizontal_error: f64,
    pub vertical_error: f64,
    /// Per-point horizontal errors for [`ErrorBarType::Custom`].
    pub horizontal_error_path: Option<String>,
    /// Per-point vertical errors for [`ErrorBarType::Custom`].
    pub vertical_error_path: Option<String>,
}

impl Default for ErrorBarParams {
    fn default() -> Self {
        Self {
            error_type: ErrorBarType::Fixed,
            mode: ErrorBarMode::Both,
            horizontal_direction: ErrorBarDirection::Both,
            vertical_direction: ErrorBarDirection::Both,
            horizontal_error: 1.0,
            vertical_error: 1.0,
            horizontal_error_path: None,
            vertical_error_path: None,
        }
    }
}

/// Everything that shapes the geometry of one series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesParams {
    /// Position points by index instead of by x value (category axis).
    pub indexed: bool,
    pub side_by_side: SideBySideInfo,
    /// Fraction of the side-by-side slot left empty, split on both sides.
    pub spacing: f64,
    /// Baseline of bar-like geometry; `None` or NaN means 0.
    pub crossing_value: Option<f64>,
    /// `(bottom, top)` per point from the stacking accumulator.
    pub stack_extents: Vec<(f64, f64)>,
    pub spline: SplineParams,
    pub box_whisker: BoxWhiskerParams,
    pub waterfall: WaterfallParams,
    pub circular: CircularParams,
    pub error_bar: ErrorBarParams,
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self {
            indexed: false,
            side_by_side: SideBySideInfo::default(),
            spacing: 0.0,
            crossing_value: None,
            stack_extents: Vec::new(),
            spline: SplineParams::default(),
            box_whisker: BoxWhiskerParams::default(),
            waterfall: WaterfallParams::default(),
            circular: CircularParams::default(),
            error_bar: ErrorBarParams::default(),
        }
    }
}

impl SeriesParams {
    /// Baseline used by bar-like geometry.
    pub fn baseline(&self) -> f64 {
        match self.crossing_value {
            Some(v) if !v.is_nan() => v,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "label_gap": 8.0 }"#).unwrap();
        assert_eq!(config.label_gap, 8.0);
        assert_eq!(config.outlier_iqr_factor, 1.5);
        assert_eq!(config.ellipsis, "...");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(EngineConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_undefined_crossing_value() {
        let mut params = SeriesParams::default();
        assert_eq!(params.baseline(), 0.0);
        params.crossing_value = Some(f64::NAN);
        assert_eq!(params.baseline(), 0.0);
        params.crossing_value = Some(-5.0);
        assert_eq!(params.baseline(), -5.0);
    }
}
