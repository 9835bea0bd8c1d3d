//! Keyline is the headless core of a keyframe animation editor.
//!
//! Keyline owns the two halves of timeline editing that must be exact: the
//! interaction engine that turns pointer and keyboard input into frame-accurate
//! edits (`TimelineController`), and the interpolation engine that turns
//! keyframe tracks into property values (`sample_keyframes`). Presentation is a
//! host concern; the crate never draws.
//!
//! # Editing loop overview
//!
//! 1. **Model**: `Composition` holds a `LayerArena` of immutable layer records
//!    plus duration and frame rate
//! 2. **Sample**: `Property + FrameIndex -> Value` (constant or keyframed with
//!    per-segment easing)
//! 3. **Interact**: pointer events drive a `Gesture` state machine through
//!    `TimelineController`, against a host-provided `TimelineHost`
//! 4. **Commit**: every edit produces a new `Composition` sharing all untouched
//!    layer records with its predecessor
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Interaction never fails**: out-of-range input is clamped or ignored,
//!   never surfaced as an error mid-gesture.
//! - **Structural sharing**: commits clone one arena slot; sibling records stay
//!   pointer-identical across an edit.
//! - **Single-threaded**: the engine is event-driven state, owned and ticked by
//!   the host loop.
//!
//! # Getting started
//!
//! - For end-user usage, see the repository README.
//! - For a detailed, standalone walkthrough of the API and architecture, see [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod composition;
mod editor;
mod foundation;
mod timeline;

/// High-level, standalone documentation for Keyline’s concepts and architecture.
pub mod guide;

pub use animation::anim::{Keyframe, Property, Value, sample_keyframes};
pub use animation::curve::{ease_control_points, keyframe_curve_path};
pub use animation::ease::Easing;
pub use composition::demo::demo_project;
pub use composition::model::{
    Composition, FlatLayer, Layer, LayerArena, LayerKind, PropertyKey, load_project,
};
pub use editor::playback::{Transport, tick_interval};
pub use editor::render_queue::{
    RenderArtifact, RenderDispatcher, RenderJob, RenderOutcome, RenderQueue,
};
pub use editor::selection::{SelectMode, Selection};
pub use editor::session::{EditorKey, EditorSession};
pub use foundation::core::{
    BezPath, Fps, FrameIndex, FrameRange, Point, Rect, Vec2, format_timecode,
};
pub use foundation::error::{KeylineError, KeylineResult};
pub use timeline::autoscroll::{AutoScroller, EDGE_BAND_PX, SCROLL_STEP_PX};
pub use timeline::gesture::{PointerId, PointerMotion, PointerTracker};
pub use timeline::interaction::{
    DragKind, DragState, EDGE_GRIP_PX, Gesture, KEY_ZOOM_STEP, LayerZone, Modifiers,
    PointerButton, PointerEvent, TimelineController, TimelineHost, layer_zone_at,
};
pub use timeline::snap::{SNAP_THRESHOLD_PX, find_snap_point, snap_anchors};
pub use timeline::transform::{FrameTransform, MAX_ZOOM, MIN_ZOOM, Viewport};
