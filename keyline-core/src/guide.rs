//! # Keyline guide (v0.1.0)
//!
//! This module is a standalone, end-to-end walkthrough of Keyline’s architecture and public API.
//! It is intentionally detailed so host frontends (and future phases of the editor) can build on a
//! shared mental model of what “an edit” means in this codebase.
//!
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//! If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Composition`](crate::Composition): one timeline document (layer tree + duration + frame rate)
//! - [`LayerArena`](crate::LayerArena): flat layer storage behind `Arc`, tree shape by id lists
//! - [`Property`](crate::Property) / [`Value`](crate::Value): a static or keyframed channel and its sample
//! - [`FrameIndex`](crate::FrameIndex): a 0-based frame index on the composition clock
//! - [`Viewport`](crate::Viewport): the zoom/scroll mapping between frames and client pixels
//! - [`TimelineController`](crate::TimelineController): the pointer gesture state machine
//! - [`TimelineHost`](crate::TimelineHost): what the controller needs from the surrounding editor
//! - [`EditorSession`](crate::EditorSession): a complete host (selection, playback, render queue)
//!
//! Timeline editing is explicitly staged:
//!
//! 1. Hit-test input against bar geometry: [`layer_zone_at`](crate::layer_zone_at)
//! 2. Tick the gesture: [`TimelineController::pointer_move`](crate::TimelineController::pointer_move)
//! 3. Commit the result: [`TimelineHost::commit`](crate::TimelineHost::commit) receives a whole new
//!    [`Composition`](crate::Composition)
//!
//! [`EditorSession`](crate::EditorSession) wires all three stages together and is the recommended
//! entry point; the lower layers stay public for hosts that need custom wiring.
//!
//! ---
//!
//! ## “Edits are commits” (and why)
//!
//! Keyline never mutates a layer in place. Every edit goes through the update-by-id operations on
//! [`Composition`](crate::Composition) — [`with_layer_window`](crate::Composition::with_layer_window),
//! [`with_value_at`](crate::Composition::with_value_at),
//! [`with_keyframing_toggled`](crate::Composition::with_keyframing_toggled) and friends — each of
//! which returns a new `Composition` that replaces exactly one arena record and shares every other
//! record with its predecessor (`Arc` clones, no deep copies).
//!
//! This buys three things:
//!
//! - a drag can commit on **every pointer move** without measurable copying
//! - hosts can keep old snapshots for undo by holding the previous `Composition`
//! - change detection is pointer identity: an untouched layer record is literally the same `Arc`
//!
//! The companion rule is that **interaction never fails**: out-of-range input is clamped or
//! ignored mid-gesture, never surfaced as an error. Validation happens once, at load
//! ([`Composition::validate`](crate::Composition::validate)), so gesture code can assume a
//! well-formed document.
//!
//! ---
//!
//! ## Frames and pixels
//!
//! [`FrameTransform`](crate::FrameTransform) is the scale: zoom is **pixels per frame**, clamped
//! between [`MIN_ZOOM`](crate::MIN_ZOOM) and [`MAX_ZOOM`](crate::MAX_ZOOM).
//! [`Viewport`](crate::Viewport) adds the scroll offset and the on-screen bounds, giving the
//! client-space conversion gestures actually use:
//! [`frame_at_x`](crate::Viewport::frame_at_x).
//!
//! Zooming preserves an anchor:
//!
//! - [`zoom_anchored`](crate::Viewport::zoom_anchored): the frame under the cursor stays put
//!   (wheel + ctrl, pinch midpoint)
//! - [`zoom_about_center`](crate::Viewport::zoom_about_center): keyboard zoom in steps of
//!   [`KEY_ZOOM_STEP`](crate::KEY_ZOOM_STEP) about the viewport center
//!
//! Scroll has a floor at zero (frame 0 never scrolls past the left edge). All geometry stays `f64`
//! through a gesture; frames are rounded only at the commit or seek boundary.
//!
//! ---
//!
//! ## Gestures: one pointer, one state
//!
//! [`Gesture`](crate::Gesture) is the controller’s single state value:
//!
//! - `Idle`
//! - `Moving` / `Trimming`: a layer drag, carrying [`DragState`](crate::DragState)
//! - `ScrubbingPlayhead`: the playhead follows the pointer
//! - `PanZoom`: background pointers tracked by [`PointerTracker`](crate::PointerTracker)
//!
//! Which drag starts is decided by where the press lands on the bar:
//! [`layer_zone_at`](crate::layer_zone_at) splits it into a body and two edge grips of
//! [`EDGE_GRIP_PX`](crate::EDGE_GRIP_PX) each, and [`DragKind`](crate::DragKind) follows the
//! zone. A press also selects the layer if it was not already selected; locked layers ignore
//! presses entirely.
//!
//! Every drag tick recomputes from the **press-time window**, not from the previous tick:
//!
//! 1. pointer delta in frames (fractional)
//! 2. snapping (see below)
//! 3. minimum duration of one frame
//! 4. clamping into the composition range (a move shifts both edges, a trim pins its own)
//! 5. round and commit
//!
//! So a drag is stateless between ticks and cannot accumulate rounding drift.
//!
//! Scrubbing seeks immediately on press, clamped to the last frame. Holding the pointer inside an
//! edge band of the viewport latches an [`AutoScroller`](crate::AutoScroller); host-driven
//! [`autoscroll_tick`](crate::TimelineController::autoscroll_tick)s scroll the view and re-seek
//! under the stationary pointer, so the playhead keeps walking while the hand stays still.
//!
//! Background pointers pan (one) or pinch-zoom about the finger midpoint (two). A second finger on
//! the background keeps panning even while another pointer drags a layer: the drag math reads only
//! client-x and zoom, so it is unaffected by scroll.
//!
//! ---
//!
//! ## Snapping
//!
//! [`snap_anchors`](crate::snap_anchors) collects the magnetic frames for a drag: the playhead,
//! frame zero, the composition end, and both edges of every top-level layer outside the current
//! selection. Nested layers do not contribute.
//!
//! [`find_snap_point`](crate::find_snap_point) picks the nearest anchor within
//! [`SNAP_THRESHOLD_PX`](crate::SNAP_THRESHOLD_PX). The distance is measured in **pixels** through
//! the transform, so the reach of a snap shrinks in frame terms as you zoom in.
//!
//! A move tries to snap its start edge and falls back to the end edge; a trim snaps only the edge
//! being dragged. The matched anchor is surfaced as
//! [`snap_indicator`](crate::TimelineController::snap_indicator) for the host to draw a guide
//! line, and clears when the drag ends.
//!
//! ---
//!
//! ## Selection and visible rows
//!
//! [`Selection`](crate::Selection) is an ordered id list with three application modes
//! ([`SelectMode`](crate::SelectMode)):
//!
//! - `Replace`: plain click
//! - `Toggle`: ctrl-click appends or removes
//! - `Range`: shift-click extends from the **most recently selected** id
//!
//! Range endpoints are located in the collapse-aware row order produced by
//! [`LayerArena::flatten`](crate::LayerArena::flatten) — the same order the layer list renders —
//! and the span is unioned into the selection preserving first-occurrence order. If the anchor or
//! the target is not among the visible rows (collapsed away, for instance), the range falls back
//! to `Replace`.
//!
//! ---
//!
//! ## Playback and timecode
//!
//! [`Transport`](crate::Transport) is a play/pause flag; the host owns the clock. Run a timer at
//! [`tick_interval`](crate::tick_interval) and call
//! [`tick_playback`](crate::EditorSession::tick_playback) on each fire: the playhead advances one
//! frame and wraps at the composition end without stopping. Keyboard transport is mapped through
//! [`EditorKey`](crate::EditorKey) and [`handle_key`](crate::EditorSession::handle_key).
//!
//! [`format_timecode`](crate::format_timecode) renders the playhead as `"45f / 1.50s"` for status
//! displays.
//!
//! ---
//!
//! ## Driving a session
//!
//! The following example loads the bundled demo project, scrubs the ruler, samples an animated
//! property, then drags a layer — all through [`EditorSession`](crate::EditorSession).
//!
//! ```rust,no_run
//! use keyline::{
//!     EditorSession, FrameIndex, LayerZone, Point, PointerEvent, PointerId, PropertyKey, Rect,
//!     demo_project,
//! };
//!
//! # fn main() -> keyline::KeylineResult<()> {
//! let mut session = EditorSession::new(demo_project())?;
//!
//! // The host owns layout: tell the timeline where it lives in client space.
//! session
//!     .timeline_mut()
//!     .viewport
//!     .set_bounds(Rect::new(0.0, 0.0, 960.0, 320.0));
//!
//! // Scrub the ruler. A press seeks immediately; at the default zoom of five
//! // pixels per frame, client x 225 is frame 45.
//! let press = PointerEvent::primary(PointerId(1), Point::new(225.0, 8.0));
//! session.pointer_down_on_ruler(&press);
//! session.pointer_up(&press);
//! assert_eq!(session.playhead(), FrameIndex(45));
//!
//! // Sample the title's opacity at the playhead: frame 45 sits on the top of
//! // its fade-in, local frame 30.
//! let title = session.active().layer("title-text").expect("demo layer");
//! let opacity = title
//!     .property_value(PropertyKey::Opacity, session.playhead())
//!     .and_then(|v| v.as_number());
//! assert_eq!(opacity, Some(1.0));
//!
//! // Drag the layer body 50 px to the right: ten frames at this zoom. Each
//! // pointer move commits a fresh composition.
//! let grab = PointerEvent::primary(PointerId(2), Point::new(200.0, 120.0));
//! session.pointer_down_on_layer(&grab, "title-text", LayerZone::Body);
//! session.pointer_move(&PointerEvent::primary(PointerId(2), Point::new(250.0, 120.0)));
//! session.pointer_up(&PointerEvent::primary(PointerId(2), Point::new(250.0, 120.0)));
//!
//! let moved = session.active().layer("title-text").expect("demo layer");
//! assert_eq!(moved.from, FrameIndex(25));
//! assert_eq!(moved.duration, FrameIndex(150));
//! # Ok(())
//! # }
//! ```
//!
//! Notes:
//!
//! - [`EditorSession::new`](crate::EditorSession::new) validates every composition up front.
//! - [`demo_project`](crate::demo_project) doubles as a fixture for tests and the CLI.
//! - A real frontend forwards its pointer events verbatim; nothing here is synthetic-only.
//!
//! ---
//!
//! ## Render queue: dispatch is host-provided
//!
//! Keyline does not render pixels. The render surface is a queue of composition ids plus a wire
//! shape:
//!
//! - [`RenderQueue`](crate::RenderQueue): ordered, toggled membership
//! - [`RenderJob`](crate::RenderJob): the camelCase job payload
//!   (`compositionId` / `durationInFrames` / `fps`)
//! - [`RenderDispatcher`](crate::RenderDispatcher): implemented by the host (HTTP client, worker
//!   pool, test fake)
//! - [`RenderOutcome`](crate::RenderOutcome): artifacts in completion order, plus the first error
//!
//! [`RenderQueue::run`](crate::RenderQueue::run) dispatches strictly in queue order and stops at
//! the first failure, keeping the artifacts already produced. The queue itself is not consumed by
//! a run, so a failed batch can be retried after the host fixes the cause.
//!
//! ---
//!
//! ## Curve geometry for hosts
//!
//! Keyline computes curve geometry; hosts draw it.
//!
//! - [`ease_control_points`](crate::ease_control_points): the cubic-bezier control points behind
//!   an [`Easing`](crate::Easing), or `None` for `Linear`
//! - [`keyframe_curve_path`](crate::keyframe_curve_path): a whole keyframe track as a
//!   [`BezPath`](crate::BezPath) scaled into a widget-sized box, ready for any 2D canvas
//!
//! Both return geometry in local widget coordinates with y down, matching the conventions of the
//! timeline viewport.
