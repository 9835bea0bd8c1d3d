use crate::composition::model::Composition;
use crate::foundation::core::{FrameIndex, Point, Vec2};
use crate::timeline::autoscroll::AutoScroller;
use crate::timeline::gesture::{PointerId, PointerMotion, PointerTracker};
use crate::timeline::snap::{find_snap_point, snap_anchors};
use crate::timeline::transform::Viewport;

/// Width of the trim grips at either end of a layer bar, in pixels.
pub const EDGE_GRIP_PX: f64 = 8.0;

/// Zoom factor applied per keyboard zoom step.
pub const KEY_ZOOM_STEP: f64 = 1.25;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Keyboard modifiers carried on a pointer event.
pub struct Modifiers {
    /// Control, or the platform command key.
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which button a pointer event reports.
pub enum PointerButton {
    /// Left button, or the primary touch contact.
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// One pointer event, already routed to a timeline region by the host.
pub struct PointerEvent {
    /// Host-assigned pointer id.
    pub id: PointerId,
    /// Client-space position.
    pub pos: Point,
    /// Button for the press or release; moves carry the pressed button.
    pub button: PointerButton,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A primary-button event without modifiers.
    pub fn primary(id: PointerId, pos: Point) -> Self {
        Self {
            id,
            pos,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Region of a layer bar under the pointer.
pub enum LayerZone {
    /// Interior of the bar.
    Body,
    /// Grip at the left edge.
    TrimStart,
    /// Grip at the right edge.
    TrimEnd,
}

/// Classify a client-space x position against a layer bar spanning
/// `bar_x0..bar_x1`. The trim grips extend [`EDGE_GRIP_PX`] to either side of
/// each edge, so a bar can be grabbed slightly outside itself; positions
/// beyond the grips return `None`.
pub fn layer_zone_at(client_x: f64, bar_x0: f64, bar_x1: f64) -> Option<LayerZone> {
    if client_x < bar_x0 - EDGE_GRIP_PX || client_x > bar_x1 + EDGE_GRIP_PX {
        return None;
    }
    if (client_x - bar_x0).abs() < EDGE_GRIP_PX {
        Some(LayerZone::TrimStart)
    } else if (client_x - bar_x1).abs() < EDGE_GRIP_PX {
        Some(LayerZone::TrimEnd)
    } else if client_x >= bar_x0 && client_x <= bar_x1 {
        Some(LayerZone::Body)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a layer drag changes.
pub enum DragKind {
    /// Slide the whole bar, preserving its duration.
    Move,
    /// Drag the left edge, leaving the right edge fixed.
    TrimStart,
    /// Drag the right edge, leaving the left edge fixed.
    TrimEnd,
}

impl From<LayerZone> for DragKind {
    fn from(zone: LayerZone) -> Self {
        match zone {
            LayerZone::Body => DragKind::Move,
            LayerZone::TrimStart => DragKind::TrimStart,
            LayerZone::TrimEnd => DragKind::TrimEnd,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// State captured when a layer drag begins.
///
/// The layer's window is recorded at press time; every tick recomputes the
/// new window from this baseline plus the total pointer travel, so ticks
/// never accumulate rounding error.
pub struct DragState {
    /// Id of the dragged layer.
    pub layer_id: String,
    /// Pointer that owns the drag.
    pub pointer: PointerId,
    /// What the drag changes.
    pub kind: DragKind,
    /// Client-space x of the initiating press.
    pub origin_x: f64,
    /// Layer start frame at press time.
    pub from: FrameIndex,
    /// Layer duration at press time.
    pub duration: FrameIndex,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// The controller's current gesture. At most one is in progress.
pub enum Gesture {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A layer bar is being moved along the track.
    Moving(DragState),
    /// One edge of a layer bar is being trimmed.
    Trimming(DragState),
    /// Pointers on the track background are panning or pinch-zooming.
    PanZoom,
    /// The playhead is being scrubbed from the ruler.
    ScrubbingPlayhead {
        /// Pointer that owns the scrub.
        pointer: PointerId,
        /// Latest client-space x, re-read by auto-scroll ticks while the
        /// pointer rests in an edge band.
        last_client_x: f64,
    },
}

/// The application state the timeline acts on.
///
/// The controller reads the composition, playhead, and selection through this
/// trait and pushes edits back as whole values: a drag commits a fresh
/// [`Composition`] on every tick, a scrub seeks, selection changes replace the
/// selected set. None of these calls can fail; a host applies them or drops
/// them, and the next tick starts from whatever state it reports.
pub trait TimelineHost {
    /// The composition being edited.
    fn composition(&self) -> &Composition;
    /// Current playhead frame.
    fn playhead(&self) -> FrameIndex;
    /// Ids of the selected layers.
    fn selected_ids(&self) -> &[String];
    /// Replace the composition with an edited value.
    fn commit(&mut self, composition: Composition);
    /// Move the playhead.
    fn seek(&mut self, frame: FrameIndex);
    /// Make `id` the sole selected layer.
    fn select_sole(&mut self, id: &str);
    /// Empty the selection.
    fn clear_selection(&mut self);
}

#[derive(Clone, Debug, Default)]
/// Gesture state machine for the timeline panel.
///
/// Hosts translate raw input into calls on this type: pointer downs are
/// routed by the region they land on (a layer bar, the frame ruler, or the
/// track background), while moves, releases, and wheel events are forwarded
/// undistinguished. The controller owns the [`Viewport`] and mutates it for
/// pan and zoom; everything else flows out through [`TimelineHost`].
pub struct TimelineController {
    /// Visible window onto the timeline.
    pub viewport: Viewport,
    gesture: Gesture,
    pointers: PointerTracker,
    snap_indicator: Option<FrameIndex>,
    autoscroll: AutoScroller,
}

impl TimelineController {
    /// A controller with a default viewport and no gesture in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture currently in progress.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Frame to draw the snap guide at, while a drag is snapped.
    pub fn snap_indicator(&self) -> Option<FrameIndex> {
        self.snap_indicator
    }

    /// Latched auto-scroll direction: `-1`, `0`, or `+1`.
    pub fn autoscroll_direction(&self) -> i8 {
        self.autoscroll.direction()
    }

    /// Press on a layer bar. Locked layers ignore the press entirely; an
    /// unselected layer becomes the sole selection before the drag starts.
    pub fn pointer_down_on_layer<H: TimelineHost>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        layer_id: &str,
        zone: LayerZone,
    ) {
        if event.button != PointerButton::Primary {
            return;
        }
        let Some(layer) = host.composition().layer(layer_id) else {
            return;
        };
        if layer.locked {
            return;
        }
        let (from, duration) = (layer.from, layer.duration);
        if !host.selected_ids().iter().any(|id| id == layer_id) {
            host.select_sole(layer_id);
        }
        let kind = DragKind::from(zone);
        tracing::debug!(layer = layer_id, ?kind, "drag start");
        let drag = DragState {
            layer_id: layer_id.to_owned(),
            pointer: event.id,
            kind,
            origin_x: event.pos.x,
            from,
            duration,
        };
        self.gesture = match kind {
            DragKind::Move => Gesture::Moving(drag),
            DragKind::TrimStart | DragKind::TrimEnd => Gesture::Trimming(drag),
        };
    }

    /// Press on the frame ruler: seek to the frame under the pointer and
    /// start scrubbing.
    pub fn pointer_down_on_ruler<H: TimelineHost>(&mut self, host: &mut H, event: &PointerEvent) {
        if event.button != PointerButton::Primary {
            return;
        }
        self.gesture = Gesture::ScrubbingPlayhead {
            pointer: event.id,
            last_client_x: event.pos.x,
        };
        self.scrub_to(host, event.pos.x);
    }

    /// Press on the empty track background: the pointer joins the pan/pinch
    /// tracker. The first such pointer puts the controller in pan/zoom; extra
    /// fingers landing during a layer drag or scrub still pan underneath it.
    pub fn pointer_down_on_track(&mut self, event: &PointerEvent) {
        if event.button != PointerButton::Primary {
            return;
        }
        self.pointers.press(event.id, event.pos);
        if matches!(self.gesture, Gesture::Idle) {
            self.gesture = Gesture::PanZoom;
        }
    }

    /// Pointer move. Routed by who owns the pointer: the active scrub or
    /// drag if it is theirs, otherwise the pan/pinch tracker.
    pub fn pointer_move<H: TimelineHost>(&mut self, host: &mut H, event: &PointerEvent) {
        match &mut self.gesture {
            Gesture::ScrubbingPlayhead {
                pointer,
                last_client_x,
            } if *pointer == event.id => {
                *last_client_x = event.pos.x;
                self.autoscroll
                    .update_direction(event.pos.x, self.viewport.bounds);
                self.scrub_to(host, event.pos.x);
            }
            Gesture::Moving(drag) | Gesture::Trimming(drag) if drag.pointer == event.id => {
                let drag = drag.clone();
                self.drag_tick(host, &drag, event.pos.x);
            }
            _ => {
                if let Some(motion) = self.pointers.move_to(event.id, event.pos) {
                    self.apply_motion(motion);
                }
            }
        }
    }

    /// Pointer release anywhere but the track background.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        self.finish_pointer(event.id);
    }

    /// Pointer release on the empty track background. Without Control or
    /// Shift held this clears the selection, so a plain click on empty track
    /// deselects everything.
    pub fn pointer_up_on_track<H: TimelineHost>(&mut self, host: &mut H, event: &PointerEvent) {
        if !event.modifiers.ctrl && !event.modifiers.shift {
            host.clear_selection();
        }
        self.finish_pointer(event.id);
    }

    /// Wheel input over the timeline. Only Control (or command) wheel zooms;
    /// plain wheel is left to the host's scroll container.
    pub fn wheel(&mut self, event: &PointerEvent, delta_y: f64) {
        if !event.modifiers.ctrl {
            return;
        }
        let zoom = self.viewport.transform.zoom();
        self.viewport
            .zoom_anchored(zoom - delta_y * 0.01 * zoom, event.pos.x);
    }

    /// Keyboard zoom in, one step, anchored at the viewport center.
    pub fn zoom_in(&mut self) {
        let zoom = self.viewport.transform.zoom();
        self.viewport.zoom_about_center(zoom * KEY_ZOOM_STEP);
    }

    /// Keyboard zoom out, one step, anchored at the viewport center.
    pub fn zoom_out(&mut self) {
        let zoom = self.viewport.transform.zoom();
        self.viewport.zoom_about_center(zoom / KEY_ZOOM_STEP);
    }

    /// One auto-scroll tick. While a scrub holds the pointer in an edge
    /// band, each tick shifts the viewport and re-seeks under the stationary
    /// pointer, so the playhead keeps walking at the scroll rate.
    pub fn autoscroll_tick<H: TimelineHost>(&mut self, host: &mut H) {
        if !self.autoscroll.is_active() {
            return;
        }
        let Gesture::ScrubbingPlayhead { last_client_x, .. } = self.gesture else {
            return;
        };
        self.viewport
            .scroll_by(Vec2::new(self.autoscroll.step(), 0.0));
        self.scrub_to(host, last_client_x);
    }

    fn scrub_to<H: TimelineHost>(&self, host: &mut H, client_x: f64) {
        let frame = FrameIndex::round_from(self.viewport.frame_at_x(client_x));
        host.seek(host.composition().clamp_frame(frame));
    }

    /// One layer-drag tick. The new window is derived from the press-time
    /// baseline in a fixed order: apply the pointer delta, snap, enforce the
    /// one-frame minimum duration, clamp into the composition, round, commit.
    fn drag_tick<H: TimelineHost>(&mut self, host: &mut H, drag: &DragState, client_x: f64) {
        let mut start = drag.from.as_f64();
        let mut end = start + drag.duration.as_f64();
        let delta = self
            .viewport
            .transform
            .pixels_to_frames(client_x - drag.origin_x);
        match drag.kind {
            DragKind::Move => {
                start += delta;
                end += delta;
            }
            DragKind::TrimStart => start += delta,
            DragKind::TrimEnd => end += delta,
        }

        let (next, indicator) = {
            let comp = host.composition();
            let anchors = snap_anchors(comp, host.playhead(), host.selected_ids());
            let transform = &self.viewport.transform;
            let mut indicator = None;
            match drag.kind {
                DragKind::Move => {
                    // Snap whichever edge reaches an anchor first, start
                    // before end, and slide the whole bar to it.
                    let duration = end - start;
                    if let Some(snapped) = find_snap_point(start, &anchors, transform) {
                        start = snapped.as_f64();
                        indicator = Some(snapped);
                    } else if let Some(snapped) = find_snap_point(end, &anchors, transform) {
                        start = snapped.as_f64() - duration;
                        indicator = Some(snapped);
                    }
                    end = start + duration;
                }
                DragKind::TrimStart => {
                    if let Some(snapped) = find_snap_point(start, &anchors, transform) {
                        start = snapped.as_f64();
                        indicator = Some(snapped);
                    }
                }
                DragKind::TrimEnd => {
                    if let Some(snapped) = find_snap_point(end, &anchors, transform) {
                        end = snapped.as_f64();
                        indicator = Some(snapped);
                    }
                }
            }

            if end < start + 1.0 {
                if drag.kind == DragKind::TrimStart {
                    start = end - 1.0;
                } else {
                    end = start + 1.0;
                }
            }
            if start < 0.0 {
                if drag.kind == DragKind::Move {
                    end -= start;
                    start = 0.0;
                } else {
                    start = 0.0;
                }
            }
            let total = comp.duration_in_frames.as_f64();
            if end > total {
                if drag.kind == DragKind::Move {
                    start -= end - total;
                    end = total;
                    if start < 0.0 {
                        start = 0.0;
                    }
                } else {
                    end = total;
                }
            }

            let from = FrameIndex::round_from(start);
            let duration = FrameIndex::round_from(end - start);
            (comp.with_layer_window(&drag.layer_id, from, duration), indicator)
        };
        if let Some(frame) = indicator {
            tracing::trace!(frame = frame.0, "snapped");
        }
        self.snap_indicator = indicator;
        host.commit(next);
    }

    fn apply_motion(&mut self, motion: PointerMotion) {
        match motion {
            PointerMotion::Pan(delta) => self.viewport.scroll_by(-delta),
            PointerMotion::Pinch { ratio, midpoint } => {
                let zoom = self.viewport.transform.zoom();
                self.viewport.zoom_anchored(zoom * ratio, midpoint.x);
            }
        }
    }

    fn finish_pointer(&mut self, id: PointerId) {
        self.pointers.release(id);
        match &self.gesture {
            Gesture::ScrubbingPlayhead { pointer, .. } if *pointer == id => {
                self.gesture = Gesture::Idle;
                self.autoscroll.stop();
            }
            Gesture::Moving(drag) | Gesture::Trimming(drag) if drag.pointer == id => {
                tracing::debug!(layer = %drag.layer_id, "drag end");
                self.gesture = Gesture::Idle;
                self.snap_indicator = None;
            }
            Gesture::PanZoom if self.pointers.is_empty() => {
                self.gesture = Gesture::Idle;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/interaction.rs"]
mod tests;
