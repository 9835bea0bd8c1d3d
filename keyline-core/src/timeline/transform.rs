use crate::foundation::core::{Rect, Vec2};

/// Lowest allowed zoom, in pixels per frame.
pub const MIN_ZOOM: f64 = 0.5;
/// Highest allowed zoom, in pixels per frame.
pub const MAX_ZOOM: f64 = 50.0;

const DEFAULT_ZOOM: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
/// The frame/pixel mapping of the timeline: `px = frame * zoom`.
///
/// Zoom is kept inside `[MIN_ZOOM, MAX_ZOOM]` on every change; non-finite
/// input is dropped rather than clamped. Serializes as the bare zoom value.
pub struct FrameTransform {
    zoom: f64,
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self { zoom: DEFAULT_ZOOM }
    }
}

impl From<f64> for FrameTransform {
    fn from(zoom: f64) -> Self {
        Self::new(zoom)
    }
}

impl From<FrameTransform> for f64 {
    fn from(t: FrameTransform) -> f64 {
        t.zoom
    }
}

impl FrameTransform {
    /// A transform at the given zoom, clamped into range. Non-finite input
    /// falls back to the default zoom.
    pub fn new(zoom: f64) -> Self {
        if zoom.is_finite() {
            Self {
                zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            }
        } else {
            Self::default()
        }
    }

    /// Current zoom in pixels per frame.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom, clamped into range. Non-finite input leaves the zoom
    /// unchanged.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Multiply the zoom by a factor, clamped into range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Convert a (possibly fractional) frame distance to pixels.
    pub fn frames_to_pixels(&self, frames: f64) -> f64 {
        frames * self.zoom
    }

    /// Convert a pixel distance to a fractional frame distance.
    pub fn pixels_to_frames(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The visible window onto the timeline: transform, scroll offset, and the
/// host-reported client bounds of the scrolling area.
///
/// Bounds are transient display state and are skipped by serde; hosts set
/// them whenever layout changes.
pub struct Viewport {
    /// Frame/pixel mapping.
    pub transform: FrameTransform,
    /// Scroll offset in pixels, non-negative on both axes.
    pub scroll: Vec2,
    /// Client rectangle of the scrollable timeline area.
    #[serde(skip)]
    pub bounds: Rect,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            transform: FrameTransform::default(),
            scroll: Vec2::ZERO,
            bounds: Rect::ZERO,
        }
    }
}

impl Viewport {
    /// A viewport at default zoom with zero scroll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current client bounds of the timeline area.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Add a scroll delta, clamping both axes at zero.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll += delta;
        self.clamp_scroll();
    }

    /// The fractional frame under a client-space x position.
    pub fn frame_at_x(&self, client_x: f64) -> f64 {
        self.transform
            .pixels_to_frames(client_x - self.bounds.x0 + self.scroll.x)
    }

    /// Change zoom while keeping the frame under `anchor_client_x` at the
    /// same screen position.
    pub fn zoom_anchored(&mut self, new_zoom: f64, anchor_client_x: f64) {
        let anchor_px = anchor_client_x - self.bounds.x0;
        let anchor_frame = self
            .transform
            .pixels_to_frames(self.scroll.x + anchor_px);
        self.transform.set_zoom(new_zoom);
        self.scroll.x = self.transform.frames_to_pixels(anchor_frame) - anchor_px;
        self.clamp_scroll();
    }

    /// Change zoom anchored at the horizontal center of the viewport. Used by
    /// keyboard and slider zoom, where no cursor position exists.
    pub fn zoom_about_center(&mut self, new_zoom: f64) {
        self.zoom_anchored(new_zoom, self.bounds.x0 + self.bounds.width() / 2.0);
    }

    fn clamp_scroll(&mut self) {
        self.scroll.x = self.scroll.x.max(0.0);
        self.scroll.y = self.scroll.y.max(0.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/transform.rs"]
mod tests;
