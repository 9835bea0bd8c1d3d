//! The timeline interaction engine: frame/pixel mapping, snapping, pointer
//! gestures, and the drag state machine.

pub mod autoscroll;
pub mod gesture;
pub mod interaction;
pub mod snap;
pub mod transform;
