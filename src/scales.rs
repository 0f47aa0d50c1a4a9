use d3rs::scale::LogScale;
use d3rs::scale::{LinearScale, Scale as D3Scale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleMode {
    Linear,
    /// Base-10 logarithmic. Non-positive values map to NaN.
    Log,
}

/// Value <-> pixel scale of one axis.
#[derive(Clone)]
pub enum ChartScale {
    Linear(LinearScale),
    Log(LogScale),
}

fn linear_domain(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

fn log_domain(min: f64, max: f64) -> (f64, f64) {
    let min = if min > 0.0 { min } else { f64::MIN_POSITIVE };
    let max = if max > 0.0 { max } else { f64::MIN_POSITIVE };
    if (max - min).abs() < f64::EPSILON * min {
        (min / 10.0, max * 10.0)
    } else {
        (min, max)
    }
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d_min, d_max) = linear_domain(domain.0, domain.1);
        Self::Linear(LinearScale::new().domain(d_min, d_max).range(range.0, range.1))
    }

    pub fn new_log(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d_min, d_max) = log_domain(domain.0, domain.1);
        Self::Log(LogScale::new().domain(d_min, d_max).range(range.0, range.1))
    }

    pub fn mode(&self) -> ScaleMode {
        match self {
            Self::Linear(_) => ScaleMode::Linear,
            Self::Log(_) => ScaleMode::Log,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Log(s) => s.range(),
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        match self {
            Self::Linear(s) => s.scale(value),
            Self::Log(s) if value > 0.0 => s.scale(value),
            Self::Log(_) => f64::NAN,
        }
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(pixel).unwrap_or(f64::NAN),
            Self::Log(s) => s.invert(pixel).unwrap_or(f64::NAN),
        }
    }

    pub fn update_domain(&mut self, min: f64, max: f64) {
        match self {
            Self::Linear(s) => {
                let (d_min, d_max) = linear_domain(min, max);
                *s = s.domain(d_min, d_max);
            }
            Self::Log(s) => {
                let (d_min, d_max) = log_domain(min, max);
                *s = s.domain(d_min, d_max);
            }
        }
    }

    pub fn update_range(&mut self, min: f64, max: f64) {
        match self {
            Self::Linear(s) => *s = s.range(min, max),
            Self::Log(s) => *s = s.range(min, max),
        }
    }
}
