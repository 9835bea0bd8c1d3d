use std::collections::HashSet;

use crate::animation::anim::Value;
use crate::animation::ease::Easing;
use crate::composition::model::{Composition, FlatLayer, PropertyKey};
use crate::editor::playback::Transport;
use crate::editor::render_queue::{RenderDispatcher, RenderOutcome, RenderQueue};
use crate::editor::selection::{SelectMode, Selection};
use crate::foundation::core::{FrameIndex, format_timecode};
use crate::foundation::error::{KeylineError, KeylineResult};
use crate::timeline::interaction::{LayerZone, PointerEvent, TimelineController, TimelineHost};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Editor commands, mapped from raw key events by the host.
pub enum EditorKey {
    /// Space.
    TogglePlayback,
    /// Left arrow.
    PrevFrame,
    /// Right arrow.
    NextFrame,
    /// Home.
    GoToStart,
    /// End.
    GoToEnd,
    /// Plus / equals.
    ZoomIn,
    /// Minus.
    ZoomOut,
}

/// The editing state for one open project.
///
/// The session owns the project, the playhead, selection, transport, the
/// timeline controller, and the render queue, and wires them together: raw
/// timeline input is forwarded to the controller with the session standing in
/// as its [`TimelineHost`], property edits go through the immutable
/// composition ops at the playhead's local frame, and playback ticks advance
/// the playhead. Everything here is single-threaded by design; drive it from
/// one place and it cannot fail mid-gesture.
#[derive(Clone, Debug)]
pub struct EditorSession {
    project: Vec<Composition>,
    // always in bounds: set only from found positions, and compositions are
    // never removed from the project
    active_index: usize,
    frame: FrameIndex,
    transport: Transport,
    selection: Selection,
    collapsed: HashSet<String>,
    timeline: TimelineController,
    render_queue: RenderQueue,
}

impl EditorSession {
    /// Build a session over a project. Every composition is validated and
    /// the first one becomes active.
    pub fn new(project: Vec<Composition>) -> KeylineResult<Self> {
        if project.is_empty() {
            return Err(KeylineError::validation(
                "a project needs at least one composition",
            ));
        }
        for comp in &project {
            comp.validate()?;
        }
        Ok(Self {
            project,
            active_index: 0,
            frame: FrameIndex(0),
            transport: Transport::new(),
            selection: Selection::new(),
            collapsed: HashSet::new(),
            timeline: TimelineController::new(),
            render_queue: RenderQueue::new(),
        })
    }

    /// All compositions in the project.
    pub fn project(&self) -> &[Composition] {
        &self.project
    }

    /// The composition being edited.
    pub fn active(&self) -> &Composition {
        &self.project[self.active_index]
    }

    /// Current playhead frame.
    pub fn playhead(&self) -> FrameIndex {
        self.frame
    }

    /// Play/pause state.
    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// The current layer selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Ids of groups whose children are hidden in the layer list.
    pub fn collapsed(&self) -> &HashSet<String> {
        &self.collapsed
    }

    /// The timeline gesture controller.
    pub fn timeline(&self) -> &TimelineController {
        &self.timeline
    }

    /// Mutable access to the timeline controller, e.g. for viewport bounds.
    pub fn timeline_mut(&mut self) -> &mut TimelineController {
        &mut self.timeline
    }

    /// Compositions marked for rendering.
    pub fn render_queue(&self) -> &RenderQueue {
        &self.render_queue
    }

    /// Current playhead as a display timecode.
    pub fn timecode(&self) -> String {
        format_timecode(self.frame, self.active().fps)
    }

    /// The active composition's layer rows in display order, with children
    /// of collapsed groups hidden.
    pub fn flattened_layers(&self) -> Vec<FlatLayer<'_>> {
        self.active().layers.flatten(&self.collapsed)
    }

    /// Switch the active composition. Resets the playhead and selection and
    /// stops playback; an unknown id changes nothing.
    pub fn activate_composition(&mut self, id: &str) {
        let Some(index) = self.project.iter().position(|comp| comp.id == id) else {
            return;
        };
        tracing::debug!(comp = %id, "activating composition");
        self.active_index = index;
        self.frame = FrameIndex(0);
        self.selection.clear();
        self.transport.stop();
    }

    /// Move the playhead, clamped into the active composition.
    pub fn seek(&mut self, frame: FrameIndex) {
        self.frame = self.active().clamp_frame(frame);
    }

    /// Click a layer row with a selection mode.
    pub fn select_layer(&mut self, id: &str, mode: SelectMode) {
        let order: Vec<String> = self
            .flattened_layers()
            .iter()
            .map(|row| row.layer.id.clone())
            .collect();
        self.selection.apply(id, mode, &order);
    }

    /// Deselect every layer.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Collapse or expand a group's children in the layer list.
    pub fn toggle_collapsed(&mut self, id: &str) {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.to_owned());
        }
    }

    /// Run one editor command.
    pub fn handle_key(&mut self, key: EditorKey) {
        match key {
            EditorKey::TogglePlayback => self.transport.toggle(),
            EditorKey::PrevFrame => self.seek(FrameIndex(self.frame.0 - 1)),
            EditorKey::NextFrame => self.seek(FrameIndex(self.frame.0 + 1)),
            EditorKey::GoToStart => self.seek(FrameIndex(0)),
            EditorKey::GoToEnd => {
                let end = self.active().duration_in_frames;
                self.seek(FrameIndex(end.0 - 1));
            }
            EditorKey::ZoomIn => self.timeline.zoom_in(),
            EditorKey::ZoomOut => self.timeline.zoom_out(),
        }
    }

    /// Advance one frame while playing, wrapping at the end of the active
    /// composition. Call once per [`tick_interval`].
    ///
    /// [`tick_interval`]: crate::editor::playback::tick_interval
    pub fn tick_playback(&mut self) {
        if !self.transport.playing {
            return;
        }
        let duration = self.active().duration_in_frames.0;
        self.frame = FrameIndex((self.frame.0 + 1) % duration);
    }

    /// Jump the playhead to a keyframe given in a layer's local clock.
    pub fn seek_to_keyframe(&mut self, layer_id: &str, local_frame: FrameIndex) {
        let Some(layer) = self.active().layer(layer_id) else {
            return;
        };
        let absolute = FrameIndex(layer.from.0 + local_frame.0);
        self.seek(absolute);
    }

    /// Flip a layer's visibility.
    pub fn toggle_visibility(&mut self, layer_id: &str) {
        let next = self.active().with_visibility_toggled(layer_id);
        self.commit_active(next);
    }

    /// Flip a layer's edit lock.
    pub fn toggle_locked(&mut self, layer_id: &str) {
        let next = self.active().with_locked_toggled(layer_id);
        self.commit_active(next);
    }

    /// Write a property value at the playhead. Keyframed channels get the
    /// value written into a key at the playhead's local frame; static
    /// channels just replace their value.
    pub fn set_property_value(&mut self, layer_id: &str, key: PropertyKey, value: Value) {
        let Some(local) = self.local_frame_of(layer_id) else {
            return;
        };
        let next = self.active().with_value_at(layer_id, key, local, value);
        self.commit_active(next);
    }

    /// Switch a channel between static and keyframed at the playhead.
    pub fn toggle_keyframing(&mut self, layer_id: &str, key: PropertyKey) {
        let Some(local) = self.local_frame_of(layer_id) else {
            return;
        };
        let next = self.active().with_keyframing_toggled(layer_id, key, local);
        self.commit_active(next);
    }

    /// Retag the easing of one keyframe, addressed by its layer-local frame.
    pub fn set_keyframe_easing(
        &mut self,
        layer_id: &str,
        key: PropertyKey,
        local_frame: FrameIndex,
        easing: Easing,
    ) {
        let next = self
            .active()
            .with_keyframe_easing(layer_id, key, local_frame, easing);
        self.commit_active(next);
    }

    /// Add a composition to the render queue, or remove it if queued.
    pub fn toggle_render_queue(&mut self, id: &str) {
        self.render_queue.toggle(id);
    }

    /// Drain the render queue through a dispatcher. The queue itself is kept
    /// as marked, so a failed run can be retried.
    pub fn run_render_queue<D: RenderDispatcher>(&self, dispatcher: &mut D) -> RenderOutcome {
        self.render_queue.run(&self.project, dispatcher)
    }

    /// Pointer press on a layer bar.
    pub fn pointer_down_on_layer(&mut self, event: &PointerEvent, layer_id: &str, zone: LayerZone) {
        let (timeline, mut host) = self.timeline_io();
        timeline.pointer_down_on_layer(&mut host, event, layer_id, zone);
    }

    /// Pointer press on the frame ruler.
    pub fn pointer_down_on_ruler(&mut self, event: &PointerEvent) {
        let (timeline, mut host) = self.timeline_io();
        timeline.pointer_down_on_ruler(&mut host, event);
    }

    /// Pointer press on the empty track background.
    pub fn pointer_down_on_track(&mut self, event: &PointerEvent) {
        self.timeline.pointer_down_on_track(event);
    }

    /// Pointer move anywhere over the timeline.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        let (timeline, mut host) = self.timeline_io();
        timeline.pointer_move(&mut host, event);
    }

    /// Pointer release anywhere but the track background.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        self.timeline.pointer_up(event);
    }

    /// Pointer release on the empty track background.
    pub fn pointer_up_on_track(&mut self, event: &PointerEvent) {
        let (timeline, mut host) = self.timeline_io();
        timeline.pointer_up_on_track(&mut host, event);
    }

    /// Wheel input over the timeline.
    pub fn wheel(&mut self, event: &PointerEvent, delta_y: f64) {
        self.timeline.wheel(event, delta_y);
    }

    /// One timeline auto-scroll tick; a no-op unless a scrub armed it.
    pub fn autoscroll_tick(&mut self) {
        let (timeline, mut host) = self.timeline_io();
        timeline.autoscroll_tick(&mut host);
    }

    fn commit_active(&mut self, comp: Composition) {
        self.project[self.active_index] = comp;
    }

    fn local_frame_of(&self, layer_id: &str) -> Option<FrameIndex> {
        self.active()
            .layer(layer_id)
            .map(|layer| layer.local_frame(self.frame))
    }

    fn timeline_io(&mut self) -> (&mut TimelineController, SessionHost<'_>) {
        (
            &mut self.timeline,
            SessionHost {
                project: &mut self.project,
                active_index: self.active_index,
                frame: &mut self.frame,
                selection: &mut self.selection,
            },
        )
    }
}

/// Split borrow of the session handed to the timeline controller, so the
/// controller can mutate editor state while the session also holds it.
struct SessionHost<'a> {
    project: &'a mut [Composition],
    active_index: usize,
    frame: &'a mut FrameIndex,
    selection: &'a mut Selection,
}

impl TimelineHost for SessionHost<'_> {
    fn composition(&self) -> &Composition {
        &self.project[self.active_index]
    }

    fn playhead(&self) -> FrameIndex {
        *self.frame
    }

    fn selected_ids(&self) -> &[String] {
        self.selection.ids()
    }

    fn commit(&mut self, composition: Composition) {
        self.project[self.active_index] = composition;
    }

    fn seek(&mut self, frame: FrameIndex) {
        *self.frame = self.composition().clamp_frame(frame);
    }

    fn select_sole(&mut self, id: &str) {
        self.selection.select_sole(id);
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
