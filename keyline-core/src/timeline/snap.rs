use crate::composition::model::Composition;
use crate::foundation::core::FrameIndex;
use crate::timeline::transform::FrameTransform;

/// Snap radius in pixels. Distances at exactly the threshold do not snap.
pub const SNAP_THRESHOLD_PX: f64 = 8.0;

/// Find the anchor nearest to a candidate frame position, if one lies inside
/// the snap threshold.
///
/// Distance is measured in pixels through the transform, so the reach of a
/// snap shrinks in frame terms as zoom grows. The running best is replaced
/// only on strictly smaller distance; earlier anchors win exact ties.
pub fn find_snap_point(
    candidate: f64,
    anchors: &[FrameIndex],
    transform: &FrameTransform,
) -> Option<FrameIndex> {
    let mut best: Option<FrameIndex> = None;
    let mut min_distance = SNAP_THRESHOLD_PX;
    for &anchor in anchors {
        let distance = transform
            .frames_to_pixels(candidate - anchor.as_f64())
            .abs();
        if distance < min_distance {
            min_distance = distance;
            best = Some(anchor);
        }
    }
    best
}

/// Collect the snap anchors for a drag: the playhead, frame zero, the
/// composition end, and both edges of every top-level layer outside the
/// current selection. Nested layers do not contribute anchors.
pub fn snap_anchors(
    comp: &Composition,
    playhead: FrameIndex,
    exclude: &[String],
) -> Vec<FrameIndex> {
    let mut anchors = vec![playhead, FrameIndex(0), comp.duration_in_frames];
    for id in comp.layers.roots() {
        if exclude.iter().any(|e| e == id) {
            continue;
        }
        if let Some(layer) = comp.layers.get(id) {
            anchors.push(layer.from);
            anchors.push(layer.range().end);
        }
    }
    anchors
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/snap.rs"]
mod tests;
