use crate::foundation::core::{Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Host-assigned pointer identifier, stable for the lifetime of a press.
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
/// What a tracked pointer movement means for the viewport.
pub enum PointerMotion {
    /// Single-pointer drag, reported as the pointer's client-space delta.
    /// Content follows the pointer, so scroll moves by the negated delta.
    Pan(Vec2),
    /// Two-pointer pinch: scale zoom by `ratio`, anchored at the client-space
    /// `midpoint` of the two pointers.
    Pinch {
        /// Current pointer distance over the previous one.
        ratio: f64,
        /// Client-space midpoint of the two pointers.
        midpoint: Point,
    },
}

#[derive(Clone, Debug, Default)]
/// Insertion-ordered registry of pointers pressed on the timeline surface.
///
/// One tracked pointer pans, two pinch-zoom, three or more park the gesture
/// while still tracking positions. The pinch reference distance is established
/// by the first sample with two pointers down and resets whenever the count
/// drops below two.
pub struct PointerTracker {
    points: Vec<(PointerId, Point)>,
    prev_pinch_dist: Option<f64>,
}

impl PointerTracker {
    /// An empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pointers currently down.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no pointers are down.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether a pointer id is tracked.
    pub fn contains(&self, id: PointerId) -> bool {
        self.points.iter().any(|(p, _)| *p == id)
    }

    /// Register a pointer press. Re-pressing a tracked id updates its
    /// position without changing its insertion slot.
    pub fn press(&mut self, id: PointerId, pos: Point) {
        match self.points.iter_mut().find(|(p, _)| *p == id) {
            Some(entry) => entry.1 = pos,
            None => self.points.push((id, pos)),
        }
    }

    /// Remove a pointer. Dropping below two pointers discards the pinch
    /// reference distance.
    pub fn release(&mut self, id: PointerId) {
        self.points.retain(|(p, _)| *p != id);
        if self.points.len() < 2 {
            self.prev_pinch_dist = None;
        }
    }

    /// Record a pointer move and translate it into a viewport motion.
    ///
    /// Unknown ids are ignored. The first move with exactly two pointers only
    /// establishes the pinch reference and reports nothing.
    pub fn move_to(&mut self, id: PointerId, pos: Point) -> Option<PointerMotion> {
        let idx = self.points.iter().position(|(p, _)| *p == id)?;
        let old = self.points[idx].1;
        self.points[idx].1 = pos;

        match self.points.len() {
            1 => Some(PointerMotion::Pan(pos - old)),
            2 => {
                let a = self.points[0].1;
                let b = self.points[1].1;
                let dist = (a - b).hypot();
                let motion = self.prev_pinch_dist.map(|prev| PointerMotion::Pinch {
                    ratio: dist / prev,
                    midpoint: Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
                });
                self.prev_pinch_dist = Some(dist);
                motion
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/gesture.rs"]
mod tests;
