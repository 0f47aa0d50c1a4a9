//! Axis coordinate services consumed by hit-testing

use crate::scales::ChartScale;
use glam::DVec2;

/// Value <-> pixel mapping of one axis, supplied by the host.
pub trait AxisTransform {
    fn value_to_point(&self, value: f64) -> f64;
    fn point_to_value(&self, point: f64) -> f64;
}

impl AxisTransform for ChartScale {
    fn value_to_point(&self, value: f64) -> f64 {
        self.map(value)
    }

    fn point_to_value(&self, point: f64) -> f64 {
        self.invert(point)
    }
}

/// Maps values to themselves; screen space equals value space.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityAxis;

impl AxisTransform for IdentityAxis {
    fn value_to_point(&self, value: f64) -> f64 {
        value
    }

    fn point_to_value(&self, point: f64) -> f64 {
        point
    }
}

/// Both axes of a plot area, positioned at `origin` in host coordinates.
#[derive(Clone)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub origin: DVec2,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, origin: DVec2) -> Self {
        Self {
            x_scale,
            y_scale,
            origin,
        }
    }

    pub fn data_to_screen(&self, point: DVec2) -> DVec2 {
        self.origin + DVec2::new(self.x_scale.map(point.x), self.y_scale.map(point.y))
    }

    pub fn screen_to_data(&self, point: DVec2) -> DVec2 {
        let local = point - self.origin;
        DVec2::new(self.x_scale.invert(local.x), self.y_scale.invert(local.y))
    }
}
