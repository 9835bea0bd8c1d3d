//! Editor state around the timeline: selection, playback transport, the
//! render queue, and the session facade that owns them all.

pub mod playback;
pub mod render_queue;
pub mod selection;
pub mod session;
