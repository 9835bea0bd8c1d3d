use crate::foundation::core::Rect;

/// Width of the edge bands that arm auto-scroll, in pixels.
pub const EDGE_BAND_PX: f64 = 60.0;
/// Horizontal scroll applied per tick while auto-scroll is armed.
pub const SCROLL_STEP_PX: f64 = 15.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Edge-band auto-scroll for playhead scrubbing.
///
/// The direction is latched only by pointer-move events; a stationary pointer
/// inside a band keeps scrolling at the latched direction until a move leaves
/// the band or the drag ends.
pub struct AutoScroller {
    direction: i8,
}

impl AutoScroller {
    /// An idle scroller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch the scroll direction from a pointer position against the
    /// timeline bounds: `-1` inside the left band, `+1` inside the right
    /// band, `0` elsewhere.
    pub fn update_direction(&mut self, client_x: f64, bounds: Rect) {
        self.direction = if client_x < bounds.x0 + EDGE_BAND_PX {
            -1
        } else if client_x > bounds.x1 - EDGE_BAND_PX {
            1
        } else {
            0
        };
    }

    /// Disarm.
    pub fn stop(&mut self) {
        self.direction = 0;
    }

    /// Latched direction: `-1`, `0`, or `+1`.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Whether a tick would scroll.
    pub fn is_active(&self) -> bool {
        self.direction != 0
    }

    /// Signed horizontal scroll for one tick; zero when idle.
    pub fn step(&self) -> f64 {
        f64::from(self.direction) * SCROLL_STEP_PX
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/autoscroll.rs"]
mod tests;
