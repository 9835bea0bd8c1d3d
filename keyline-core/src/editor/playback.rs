use std::time::Duration;

use crate::foundation::core::Fps;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Play/pause state for the editor.
pub struct Transport {
    /// Whether playback is running.
    pub playing: bool,
}

impl Transport {
    /// A paused transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip between playing and paused.
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Pause.
    pub fn stop(&mut self) {
        self.playing = false;
    }
}

/// Wall-clock interval between playback ticks at `fps`. Callers keep `fps`
/// positive, as [`Fps`] requires.
pub fn tick_interval(fps: Fps) -> Duration {
    Duration::from_secs_f64(fps.frame_duration_secs())
}

#[cfg(test)]
#[path = "../../tests/unit/editor/playback.rs"]
mod tests;
