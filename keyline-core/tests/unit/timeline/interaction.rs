use super::*;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::composition::model::{Layer, LayerArena, LayerKind};
use crate::foundation::core::{Fps, Rect};

struct TestHost {
    comp: Composition,
    playhead: FrameIndex,
    selected: Vec<String>,
    commits: usize,
    seeks: Vec<FrameIndex>,
}

impl TimelineHost for TestHost {
    fn composition(&self) -> &Composition {
        &self.comp
    }

    fn playhead(&self) -> FrameIndex {
        self.playhead
    }

    fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    fn commit(&mut self, composition: Composition) {
        self.comp = composition;
        self.commits += 1;
    }

    fn seek(&mut self, frame: FrameIndex) {
        self.playhead = frame;
        self.seeks.push(frame);
    }

    fn select_sole(&mut self, id: &str) {
        self.selected = vec![id.to_owned()];
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

fn bar(id: &str, from: i64, duration: i64) -> Layer {
    Layer {
        id: id.to_owned(),
        name: id.to_owned(),
        kind: LayerKind::Shape,
        from: FrameIndex(from),
        duration: FrameIndex(duration),
        visible: true,
        locked: false,
        children: Vec::new(),
        properties: BTreeMap::new(),
    }
}

/// Layers `a` (20..60) and `b` (100..150) in a 200-frame composition.
fn host_with_duration(duration: i64) -> TestHost {
    let mut layers = LayerArena::new();
    layers.push_root(bar("a", 20, 40));
    layers.push_root(bar("b", 100, 50));
    TestHost {
        comp: Composition {
            id: "c".to_owned(),
            name: "c".to_owned(),
            duration_in_frames: FrameIndex(duration),
            fps: Fps(30),
            layers,
        },
        playhead: FrameIndex(0),
        selected: Vec::new(),
        commits: 0,
        seeks: Vec::new(),
    }
}

fn host() -> TestHost {
    host_with_duration(200)
}

/// Controller at zoom 1 (one pixel per frame) over a 1000px-wide view.
fn controller() -> TimelineController {
    let mut ctl = TimelineController::new();
    ctl.viewport.transform.set_zoom(1.0);
    ctl.viewport.set_bounds(Rect::new(0.0, 0.0, 1000.0, 400.0));
    ctl
}

fn ev(id: u64, x: f64) -> PointerEvent {
    PointerEvent::primary(PointerId(id), Point::new(x, 50.0))
}

fn window(host: &TestHost, id: &str) -> (i64, i64) {
    let layer = host.comp.layer(id).unwrap();
    (layer.from.0, layer.duration.0)
}

#[test]
fn zones_split_a_bar_into_grips_and_body() {
    assert_eq!(layer_zone_at(93.0, 100.0, 200.0), Some(LayerZone::TrimStart));
    assert_eq!(layer_zone_at(107.9, 100.0, 200.0), Some(LayerZone::TrimStart));
    assert_eq!(layer_zone_at(108.0, 100.0, 200.0), Some(LayerZone::Body));
    assert_eq!(layer_zone_at(150.0, 100.0, 200.0), Some(LayerZone::Body));
    assert_eq!(layer_zone_at(195.0, 100.0, 200.0), Some(LayerZone::TrimEnd));
    assert_eq!(layer_zone_at(207.0, 100.0, 200.0), Some(LayerZone::TrimEnd));
    assert_eq!(layer_zone_at(91.9, 100.0, 200.0), None);
    assert_eq!(layer_zone_at(208.1, 100.0, 200.0), None);
}

#[test]
fn the_start_grip_wins_on_a_narrow_bar() {
    assert_eq!(layer_zone_at(105.0, 100.0, 110.0), Some(LayerZone::TrimStart));
}

#[test]
fn press_selects_the_layer_and_starts_a_move() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 30.0), "a", LayerZone::Body);
    assert_eq!(host.selected, vec!["a".to_owned()]);
    match ctl.gesture() {
        Gesture::Moving(drag) => {
            assert_eq!(drag.layer_id, "a");
            assert_eq!(drag.kind, DragKind::Move);
            assert_eq!(drag.origin_x, 30.0);
            assert_eq!(drag.from, FrameIndex(20));
            assert_eq!(drag.duration, FrameIndex(40));
        }
        other => panic!("expected a move, got {other:?}"),
    }
}

#[test]
fn press_on_an_already_selected_layer_keeps_the_selection() {
    let mut host = host();
    host.selected = vec!["b".to_owned(), "a".to_owned()];
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 30.0), "a", LayerZone::Body);
    assert_eq!(host.selected, vec!["b".to_owned(), "a".to_owned()]);
}

#[test]
fn locked_layers_ignore_presses() {
    let mut host = host();
    let locked = host.comp.with_locked_toggled("a");
    host.comp = locked;
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 30.0), "a", LayerZone::Body);
    assert_eq!(*ctl.gesture(), Gesture::Idle);
    assert!(host.selected.is_empty());
}

#[test]
fn only_the_primary_button_starts_a_drag() {
    let mut host = host();
    let mut ctl = controller();
    let mut press = ev(1, 30.0);
    press.button = PointerButton::Secondary;
    ctl.pointer_down_on_layer(&mut host, &press, "a", LayerZone::Body);
    assert_eq!(*ctl.gesture(), Gesture::Idle);
}

#[test]
fn trim_grips_start_a_trim() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 20.0), "a", LayerZone::TrimStart);
    assert!(matches!(
        ctl.gesture(),
        Gesture::Trimming(drag) if drag.kind == DragKind::TrimStart
    ));
}

#[test]
fn move_commits_every_tick_and_shares_untouched_records() {
    let mut host = host();
    let before: Arc<Layer> = Arc::clone(host.comp.layers.record("b").unwrap());
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 30.0), "a", LayerZone::Body);
    ctl.pointer_move(&mut host, &ev(1, 35.0));
    assert_eq!(window(&host, "a"), (25, 40));
    ctl.pointer_move(&mut host, &ev(1, 36.0));
    assert_eq!(window(&host, "a"), (26, 40));
    assert_eq!(host.commits, 2);
    assert!(Arc::ptr_eq(&before, host.comp.layers.record("b").unwrap()));
}

#[test]
fn each_tick_starts_from_the_press_time_window() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 30.0), "a", LayerZone::Body);
    ctl.pointer_move(&mut host, &ev(1, 500.0));
    assert_eq!(window(&host, "a"), (160, 40));
    // returning near the origin lands where the total travel says, with no
    // drift from the clamped tick before it
    ctl.pointer_move(&mut host, &ev(1, 31.0));
    assert_eq!(window(&host, "a"), (21, 40));
}

#[test]
fn move_clamps_into_the_composition_and_keeps_duration() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 30.0), "a", LayerZone::Body);
    ctl.pointer_move(&mut host, &ev(1, 0.0));
    assert_eq!(window(&host, "a"), (0, 40));
    ctl.pointer_move(&mut host, &ev(1, 1000.0));
    assert_eq!(window(&host, "a"), (160, 40));
}

#[test]
fn trim_end_never_goes_below_one_frame() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 60.0), "a", LayerZone::TrimEnd);
    ctl.pointer_move(&mut host, &ev(1, 0.0));
    assert_eq!(window(&host, "a"), (20, 1));
}

#[test]
fn trim_start_collapses_toward_the_end_edge() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 20.0), "a", LayerZone::TrimStart);
    ctl.pointer_move(&mut host, &ev(1, 300.0));
    assert_eq!(window(&host, "a"), (59, 1));
}

#[test]
fn trim_start_clamps_at_frame_zero() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 20.0), "a", LayerZone::TrimStart);
    ctl.pointer_move(&mut host, &ev(1, -50.0));
    assert_eq!(window(&host, "a"), (0, 60));
}

#[test]
fn trim_end_clamps_at_the_composition_end() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 150.0), "b", LayerZone::TrimEnd);
    ctl.pointer_move(&mut host, &ev(1, 500.0));
    assert_eq!(window(&host, "b"), (100, 100));
}

#[test]
fn move_snaps_the_start_edge_to_an_unselected_neighbour() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 25.0), "a", LayerZone::Body);
    // start lands at 97, three pixels short of b's start
    ctl.pointer_move(&mut host, &ev(1, 102.0));
    assert_eq!(window(&host, "a"), (100, 40));
    assert_eq!(ctl.snap_indicator(), Some(FrameIndex(100)));
}

#[test]
fn move_snaps_the_end_edge_when_the_start_misses() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 25.0), "a", LayerZone::Body);
    // start 55 is far from every anchor, end 95 is five pixels from 100
    ctl.pointer_move(&mut host, &ev(1, 60.0));
    assert_eq!(window(&host, "a"), (60, 40));
    assert_eq!(ctl.snap_indicator(), Some(FrameIndex(100)));
}

#[test]
fn selected_layers_contribute_no_anchors() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 25.0), "a", LayerZone::Body);
    // 22 would snap back to a's own start at 20 if a were an anchor
    ctl.pointer_move(&mut host, &ev(1, 27.0));
    assert_eq!(window(&host, "a"), (22, 40));
    assert_eq!(ctl.snap_indicator(), None);
}

#[test]
fn trims_snap_their_own_edge() {
    let mut host = host();
    host.playhead = FrameIndex(40);
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 20.0), "a", LayerZone::TrimStart);
    ctl.pointer_move(&mut host, &ev(1, 37.0));
    assert_eq!(window(&host, "a"), (40, 20));
    assert_eq!(ctl.snap_indicator(), Some(FrameIndex(40)));

    let mut host = self::host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 150.0), "b", LayerZone::TrimEnd);
    ctl.pointer_move(&mut host, &ev(1, 197.0));
    assert_eq!(window(&host, "b"), (100, 100));
    assert_eq!(ctl.snap_indicator(), Some(FrameIndex(200)));
}

#[test]
fn the_snap_indicator_follows_the_drag_and_release_clears_it() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 25.0), "a", LayerZone::Body);
    ctl.pointer_move(&mut host, &ev(1, 102.0));
    assert_eq!(ctl.snap_indicator(), Some(FrameIndex(100)));
    ctl.pointer_move(&mut host, &ev(1, 80.0));
    assert_eq!(ctl.snap_indicator(), None);
    ctl.pointer_move(&mut host, &ev(1, 102.0));
    ctl.pointer_up(&ev(1, 102.0));
    assert_eq!(ctl.snap_indicator(), None);
    assert_eq!(*ctl.gesture(), Gesture::Idle);
    // the last committed window survives the release
    assert_eq!(window(&host, "a"), (100, 40));
}

#[test]
fn ruler_press_seeks_immediately_and_keeps_scrubbing() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_ruler(&mut host, &ev(1, 37.4));
    assert_eq!(host.playhead, FrameIndex(37));
    assert!(matches!(
        ctl.gesture(),
        Gesture::ScrubbingPlayhead { pointer, .. } if *pointer == PointerId(1)
    ));
    ctl.pointer_move(&mut host, &ev(1, 52.6));
    assert_eq!(host.playhead, FrameIndex(53));
    assert_eq!(host.seeks.len(), 2);
}

#[test]
fn scrubbing_clamps_to_the_composition_range() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_ruler(&mut host, &ev(1, -30.0));
    assert_eq!(host.playhead, FrameIndex(0));
    ctl.pointer_move(&mut host, &ev(1, 10_000.0));
    assert_eq!(host.playhead, FrameIndex(199));
}

#[test]
fn edge_bands_latch_autoscroll_and_ticks_walk_the_playhead() {
    let mut host = host_with_duration(5_000);
    let mut ctl = controller();
    ctl.pointer_down_on_ruler(&mut host, &ev(1, 500.0));
    assert_eq!(ctl.autoscroll_direction(), 0);
    ctl.pointer_move(&mut host, &ev(1, 950.0));
    assert_eq!(ctl.autoscroll_direction(), 1);
    assert_eq!(host.playhead, FrameIndex(950));
    // the pointer holds still; each tick scrolls 15px and re-seeks under it
    ctl.autoscroll_tick(&mut host);
    assert_eq!(host.playhead, FrameIndex(965));
    ctl.autoscroll_tick(&mut host);
    assert_eq!(host.playhead, FrameIndex(980));
    assert_eq!(ctl.viewport.scroll.x, 30.0);
    ctl.pointer_up(&ev(1, 950.0));
    assert_eq!(*ctl.gesture(), Gesture::Idle);
    assert_eq!(ctl.autoscroll_direction(), 0);
}

#[test]
fn leaving_the_band_stops_the_scroll() {
    let mut host = host_with_duration(5_000);
    let mut ctl = controller();
    ctl.pointer_down_on_ruler(&mut host, &ev(1, 950.0));
    ctl.pointer_move(&mut host, &ev(1, 950.0));
    assert_eq!(ctl.autoscroll_direction(), 1);
    ctl.pointer_move(&mut host, &ev(1, 500.0));
    assert_eq!(ctl.autoscroll_direction(), 0);
    let scroll = ctl.viewport.scroll.x;
    ctl.autoscroll_tick(&mut host);
    assert_eq!(ctl.viewport.scroll.x, scroll);
}

#[test]
fn leftward_autoscroll_stops_at_scroll_zero() {
    let mut host = host_with_duration(5_000);
    let mut ctl = controller();
    ctl.pointer_down_on_ruler(&mut host, &ev(1, 10.0));
    ctl.pointer_move(&mut host, &ev(1, 10.0));
    assert_eq!(ctl.autoscroll_direction(), -1);
    ctl.autoscroll_tick(&mut host);
    assert_eq!(ctl.viewport.scroll.x, 0.0);
    assert_eq!(host.playhead, FrameIndex(10));
}

#[test]
fn one_background_pointer_pans_the_view() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_track(&ev(7, 100.0));
    assert_eq!(*ctl.gesture(), Gesture::PanZoom);
    // content follows the pointer, so dragging left scrolls right
    ctl.pointer_move(&mut host, &PointerEvent::primary(PointerId(7), Point::new(90.0, 30.0)));
    assert_eq!(ctl.viewport.scroll.x, 10.0);
    assert_eq!(ctl.viewport.scroll.y, 20.0);
    ctl.pointer_up_on_track(&mut host, &ev(7, 90.0));
    assert_eq!(*ctl.gesture(), Gesture::Idle);
}

#[test]
fn panning_cannot_scroll_before_the_origin() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_track(&ev(7, 100.0));
    ctl.pointer_move(&mut host, &ev(7, 400.0));
    assert_eq!(ctl.viewport.scroll.x, 0.0);
}

#[test]
fn two_background_pointers_pinch_zoom_about_their_midpoint() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_track(&ev(1, 100.0));
    ctl.pointer_down_on_track(&ev(2, 200.0));
    // first two-pointer sample only establishes the reference distance
    ctl.pointer_move(&mut host, &ev(2, 200.0));
    assert_eq!(ctl.viewport.transform.zoom(), 1.0);
    ctl.pointer_move(&mut host, &ev(2, 300.0));
    assert_eq!(ctl.viewport.transform.zoom(), 2.0);
    // the frame under the midpoint stays put
    assert_eq!(ctl.viewport.scroll.x, 200.0);
    assert_eq!(ctl.viewport.frame_at_x(200.0), 200.0);
}

#[test]
fn wheel_zoom_needs_ctrl_and_anchors_at_the_cursor() {
    let mut ctl = controller();
    ctl.wheel(&ev(1, 100.0), -100.0);
    assert_eq!(ctl.viewport.transform.zoom(), 1.0);
    let mut with_ctrl = ev(1, 100.0);
    with_ctrl.modifiers.ctrl = true;
    ctl.wheel(&with_ctrl, -100.0);
    assert_eq!(ctl.viewport.transform.zoom(), 2.0);
    assert_eq!(ctl.viewport.frame_at_x(100.0), 100.0);
}

#[test]
fn keyboard_zoom_steps_about_the_viewport_center() {
    let mut ctl = controller();
    ctl.zoom_in();
    assert_eq!(ctl.viewport.transform.zoom(), 1.25);
    // the center frame is pinned, so stepping back restores the view
    assert_eq!(ctl.viewport.frame_at_x(500.0), 500.0);
    ctl.zoom_out();
    assert_eq!(ctl.viewport.transform.zoom(), 1.0);
    assert_eq!(ctl.viewport.scroll.x, 0.0);
}

#[test]
fn background_release_without_modifiers_clears_the_selection() {
    let mut host = host();
    host.selected = vec!["a".to_owned()];
    let mut ctl = controller();
    ctl.pointer_down_on_track(&ev(7, 400.0));
    ctl.pointer_up_on_track(&mut host, &ev(7, 400.0));
    assert!(host.selected.is_empty());
}

#[test]
fn modified_background_release_keeps_the_selection() {
    let mut host = host();
    host.selected = vec!["a".to_owned()];
    let mut ctl = controller();
    ctl.pointer_down_on_track(&ev(7, 400.0));
    let mut release = ev(7, 400.0);
    release.modifiers.shift = true;
    ctl.pointer_up_on_track(&mut host, &release);
    assert_eq!(host.selected, vec!["a".to_owned()]);
}

#[test]
fn a_second_finger_can_pan_under_a_layer_drag() {
    let mut host = host();
    let mut ctl = controller();
    ctl.pointer_down_on_layer(&mut host, &ev(1, 30.0), "a", LayerZone::Body);
    ctl.pointer_down_on_track(&ev(2, 600.0));
    assert!(matches!(ctl.gesture(), Gesture::Moving(_)));
    ctl.pointer_move(&mut host, &ev(2, 590.0));
    assert_eq!(ctl.viewport.scroll.x, 10.0);
    // the drag still belongs to the first pointer
    ctl.pointer_move(&mut host, &ev(1, 35.0));
    assert_eq!(window(&host, "a"), (25, 40));
}
