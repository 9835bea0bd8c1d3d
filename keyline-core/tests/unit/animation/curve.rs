use super::*;
use kurbo::PathEl;

fn key(frame: i64, value: f64, ease: Easing) -> Keyframe {
    Keyframe::new(frame, value, ease)
}

#[test]
fn fewer_than_two_keys_yields_no_path() {
    assert!(keyframe_curve_path(&[], 100.0, 100.0).is_none());
    assert!(keyframe_curve_path(&[key(0, 1.0, Easing::Linear)], 100.0, 100.0).is_none());
}

#[test]
fn linear_segment_is_a_line() {
    let keys = [key(0, 0.0, Easing::Linear), key(10, 10.0, Easing::Linear)];
    let path = keyframe_curve_path(&keys, 100.0, 50.0).unwrap();
    let els: Vec<PathEl> = path.elements().to_vec();
    assert_eq!(
        els,
        vec![
            PathEl::MoveTo(Point::new(0.0, 50.0)),
            PathEl::LineTo(Point::new(100.0, 0.0)),
        ]
    );
}

#[test]
fn ease_in_segment_is_a_cubic_with_fixed_handles() {
    let keys = [key(0, 0.0, Easing::EaseIn), key(10, 10.0, Easing::Linear)];
    let path = keyframe_curve_path(&keys, 100.0, 100.0).unwrap();
    let els: Vec<PathEl> = path.elements().to_vec();
    assert_eq!(
        els,
        vec![
            PathEl::MoveTo(Point::new(0.0, 100.0)),
            PathEl::CurveTo(
                Point::new(42.0, 100.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 0.0),
            ),
        ]
    );
}

#[test]
fn flat_track_centers_vertically() {
    let keys = [key(0, 5.0, Easing::Linear), key(10, 5.0, Easing::Linear)];
    let path = keyframe_curve_path(&keys, 100.0, 80.0).unwrap();
    let els: Vec<PathEl> = path.elements().to_vec();
    assert_eq!(
        els,
        vec![
            PathEl::MoveTo(Point::new(0.0, 40.0)),
            PathEl::LineTo(Point::new(100.0, 40.0)),
        ]
    );
}

#[test]
fn zero_frame_span_centers_horizontally() {
    let keys = [key(5, 0.0, Easing::Linear), key(5, 10.0, Easing::Linear)];
    let path = keyframe_curve_path(&keys, 100.0, 80.0).unwrap();
    let els: Vec<PathEl> = path.elements().to_vec();
    assert_eq!(
        els,
        vec![
            PathEl::MoveTo(Point::new(50.0, 80.0)),
            PathEl::LineTo(Point::new(50.0, 0.0)),
        ]
    );
}

#[test]
fn control_points_cover_all_easings() {
    assert!(ease_control_points(Easing::Linear).is_none());
    let (p1, p2) = ease_control_points(Easing::EaseInOut).unwrap();
    assert_eq!(p1, Point::new(0.42, 0.0));
    assert_eq!(p2, Point::new(0.58, 1.0));
}
