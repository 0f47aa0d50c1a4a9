//! Outward data labels of circular series and their collision handling.

use crate::config::EngineConfig;
use crate::segments::CircularGeometry;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, y growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Overlap test; rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Text measurement supplied by the host canvas.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> DVec2;
}

/// Fixed advance per character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 14.0,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> DVec2 {
        DVec2::new(text.chars().count() as f64 * self.char_width, self.line_height)
    }
}

/// Position of a label relative to the circle center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    RightTop,
    RightBottom,
    LeftTop,
    LeftBottom,
}

impl Quadrant {
    /// Quadrant of a direction at `angle` degrees, clockwise from 3 o'clock.
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        match (cos >= 0.0, sin >= 0.0) {
            (true, true) => Quadrant::RightBottom,
            (true, false) => Quadrant::RightTop,
            (false, true) => Quadrant::LeftBottom,
            (false, false) => Quadrant::LeftTop,
        }
    }

    pub fn is_right(self) -> bool {
        matches!(self, Quadrant::RightTop | Quadrant::RightBottom)
    }

    /// Vertical push direction for overlapping labels. Labels are walked in
    /// segment order, which runs downwards on the right and upwards on the left.
    fn shift_sign(self) -> f64 {
        if self.is_right() {
            1.0
        } else {
            -1.0
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataLabel {
    /// Index of the segment the label belongs to.
    pub index: usize,
    pub text: String,
    pub full_text: String,
    pub rect: Rect,
    /// Polyline from the arc edge to the label.
    pub connector: Vec<DVec2>,
    pub quadrant: Quadrant,
    pub visible: bool,
}

impl DataLabel {
    fn move_vertically(&mut self, delta: f64) {
        self.rect.y += delta;
        // The first connector point stays on the arc.
        for p in self.connector.iter_mut().skip(1) {
            p.y += delta;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelPolicy {
    /// Only trim labels to the plot bounds.
    None,
    #[default]
    Shift,
    Hide,
}

/// Circle geometry in host coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularLayout {
    pub center: DVec2,
    pub radius: f64,
}

/// Builds one outward label per non-empty segment.
pub fn place_circular_labels<F>(
    segments: &[CircularGeometry],
    layout: CircularLayout,
    measurer: &dyn TextMeasurer,
    config: &EngineConfig,
    format: F,
) -> Vec<DataLabel>
where
    F: Fn(&CircularGeometry) -> String,
{
    segments
        .iter()
        .filter(|s| !s.is_empty)
        .map(|segment| {
            let angle = segment.mid_angle();
            let (sin, cos) = angle.to_radians().sin_cos();
            let direction = DVec2::new(cos, sin);
            let quadrant = Quadrant::from_angle(angle);
            let side = if quadrant.is_right() { 1.0 } else { -1.0 };

            let edge = layout.center + direction * layout.radius * segment.outer_radius;
            let elbow = edge + direction * config.connector_length;
            let tail = elbow + DVec2::new(side * config.connector_tail, 0.0);

            let text = format(segment);
            let size = measurer.measure(&text);
            let x = if quadrant.is_right() {
                tail.x + config.label_gap
            } else {
                tail.x - config.label_gap - size.x
            };

            DataLabel {
                index: segment.index,
                full_text: text.clone(),
                text,
                rect: Rect::new(x, tail.y - size.y / 2.0, size.x, size.y),
                connector: vec![edge, elbow, tail],
                quadrant,
                visible: true,
            }
        })
        .collect()
}

/// Resolves overlapping labels under `policy`, then trims every visible label
/// to the horizontal extent of `bounds`.
pub fn resolve_collisions(
    labels: &mut [DataLabel],
    policy: LabelPolicy,
    bounds: Rect,
    measurer: &dyn TextMeasurer,
    config: &EngineConfig,
) {
    match policy {
        LabelPolicy::None => {}
        LabelPolicy::Shift => shift_labels(labels, config.label_spacing),
        LabelPolicy::Hide => hide_labels(labels),
    }

    for label in labels.iter_mut().filter(|l| l.visible) {
        trim_label(label, bounds, measurer, &config.ellipsis);
    }

    tracing::trace!(
        ?policy,
        labels = labels.len(),
        visible = labels.iter().filter(|l| l.visible).count(),
        "Resolved label collisions"
    );
}

fn shift_labels(labels: &mut [DataLabel], spacing: f64) {
    for quadrant in [
        Quadrant::RightTop,
        Quadrant::RightBottom,
        Quadrant::LeftBottom,
        Quadrant::LeftTop,
    ] {
        let mut members: Vec<usize> = (0..labels.len())
            .filter(|&i| labels[i].quadrant == quadrant && labels[i].visible)
            .collect();
        members.sort_by_key(|&i| labels[i].index);

        let sign = quadrant.shift_sign();
        for pair in members.windows(2) {
            let prev = labels[pair[0]].rect;
            let cur = labels[pair[1]].rect;
            let too_close = (cur.center_y() - prev.center_y()).abs() < cur.height;
            if !prev.intersects(&cur) && !too_close {
                continue;
            }
            let target = if sign > 0.0 {
                prev.bottom() + spacing
            } else {
                prev.y - spacing - cur.height
            };
            let delta = target - cur.y;
            // Only push outward; a label already past its neighbour stays.
            if delta * sign > 0.0 {
                labels[pair[1]].move_vertically(delta);
            }
        }
    }
}

fn hide_labels(labels: &mut [DataLabel]) {
    let mut last_visible: Option<usize> = None;
    for i in 0..labels.len() {
        if !labels[i].visible {
            continue;
        }
        match last_visible {
            Some(prev) if labels[prev].rect.intersects(&labels[i].rect) => {
                labels[i].visible = false;
            }
            _ => last_visible = Some(i),
        }
    }
}

/// Shortens the label text tail-first, appending `ellipsis`, until it fits
/// horizontally inside `bounds`. Labels that cannot hold the ellipsis are hidden.
pub fn trim_label(label: &mut DataLabel, bounds: Rect, measurer: &dyn TextMeasurer, ellipsis: &str) {
    let rect = label.rect;
    if rect.x >= bounds.x && rect.right() <= bounds.right() {
        return;
    }

    let right_side = label.quadrant.is_right();
    let available = if right_side {
        bounds.right() - rect.x.max(bounds.x)
    } else {
        rect.right().min(bounds.right()) - bounds.x
    };
    if measurer.measure(ellipsis).x > available {
        label.visible = false;
        return;
    }

    let chars: Vec<char> = label.full_text.chars().collect();
    let fits = |len: usize| {
        let candidate: String = chars[..len].iter().collect::<String>() + ellipsis;
        measurer.measure(&candidate).x <= available
    };

    // Longest prefix that still fits with the ellipsis.
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let text: String = chars[..lo].iter().collect::<String>() + ellipsis;
    let size = measurer.measure(&text);
    if right_side {
        label.rect.x = rect.x.max(bounds.x);
    } else {
        label.rect.x = rect.right().min(bounds.right()) - size.x;
    }
    label.rect.width = size.x;
    label.text = text;
}
