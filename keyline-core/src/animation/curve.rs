use crate::animation::anim::Keyframe;
use crate::animation::ease::Easing;
use crate::foundation::core::{BezPath, Point};

/// Fixed cubic-bezier handles on the unit square standing in for each easing.
///
/// These drive the curve preview only. The sampler applies the cubic
/// polynomials directly, so the preview is a close approximation of the
/// sampled curve, not an exact trace of it.
pub fn ease_control_points(ease: Easing) -> Option<(Point, Point)> {
    match ease {
        Easing::Linear => None,
        Easing::EaseIn => Some((Point::new(0.42, 0.0), Point::new(1.0, 1.0))),
        Easing::EaseOut => Some((Point::new(0.0, 0.0), Point::new(0.58, 1.0))),
        Easing::EaseInOut => Some((Point::new(0.42, 0.0), Point::new(0.58, 1.0))),
    }
}

/// Build a preview path for a keyframe track inside a `width` x `height` box.
///
/// Frames map to x left-to-right and values to y bottom-to-top (y grows
/// downward in screen space, so the normalized value is flipped). A track
/// spanning zero frames or zero value range is centered on that axis. Returns
/// `None` for fewer than two keys.
pub fn keyframe_curve_path(keys: &[Keyframe], width: f64, height: f64) -> Option<BezPath> {
    if keys.len() < 2 {
        return None;
    }

    let min_frame = keys[0].frame.0 as f64;
    let max_frame = keys[keys.len() - 1].frame.0 as f64;
    let frame_span = max_frame - min_frame;

    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;
    for k in keys {
        min_value = min_value.min(k.value);
        max_value = max_value.max(k.value);
    }
    let value_span = max_value - min_value;

    let to_screen = |k: &Keyframe| -> Point {
        let x = if frame_span == 0.0 {
            width / 2.0
        } else {
            ((k.frame.0 as f64 - min_frame) / frame_span) * width
        };
        let y = if value_span == 0.0 {
            height / 2.0
        } else {
            (1.0 - (k.value - min_value) / value_span) * height
        };
        Point::new(x, y)
    };

    let points: Vec<Point> = keys.iter().map(to_screen).collect();

    let mut path = BezPath::new();
    path.move_to(points[0]);
    for i in 0..keys.len() - 1 {
        let p0 = points[i];
        let p1 = points[i + 1];
        match ease_control_points(keys[i].ease) {
            None => path.line_to(p1),
            Some((b1, b2)) => {
                let c1 = Point::new(p0.x + (p1.x - p0.x) * b1.x, p0.y + (p1.y - p0.y) * b1.y);
                let c2 = Point::new(p0.x + (p1.x - p0.x) * b2.x, p0.y + (p1.y - p0.y) * b2.y);
                path.curve_to(c1, c2, p1);
            }
        }
    }
    Some(path)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
