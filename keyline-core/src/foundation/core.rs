use crate::foundation::error::{KeylineError, KeylineResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub i64);

impl FrameIndex {
    pub fn round_from(value: f64) -> Self {
        Self(value.round() as i64)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> KeylineResult<Self> {
        if start.0 > end.0 {
            return Err(KeylineError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> i64 {
        self.end.0 - self.start.0
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        if self.is_empty() {
            return self.start;
        }
        let max_inclusive = self.end.0 - 1;
        FrameIndex(f.0.clamp(self.start.0, max_inclusive))
    }

    pub fn shift(self, delta: i64) -> Self {
        Self {
            start: FrameIndex(self.start.0.saturating_add(delta)),
            end: FrameIndex(self.end.0.saturating_add(delta)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(pub u32); // must be > 0

impl Fps {
    pub fn new(fps: u32) -> KeylineResult<Self> {
        if fps == 0 {
            return Err(KeylineError::validation("Fps must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    pub fn frame_duration_secs(self) -> f64 {
        1.0 / self.as_f64()
    }

    pub fn frames_to_secs(self, frames: i64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> i64 {
        (secs * self.as_f64()).floor().max(0.0) as i64
    }
}

/// Display form of a playhead position: `"{frame}f / {seconds:.2}s"`.
pub fn format_timecode(frame: FrameIndex, fps: Fps) -> String {
    format!("{}f / {:.2}s", frame.0, fps.frames_to_secs(frame.0))
}
