use anyhow::Context as _;
use keyline::{EditorSession, LayerZone, Point, PointerEvent, PointerId, Rect, demo_project};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut session = EditorSession::new(demo_project())?;
    session
        .timeline_mut()
        .viewport
        .set_bounds(Rect::new(0.0, 0.0, 960.0, 320.0));

    // Press on the title bar, drag 50 px right (10 frames at the default
    // zoom), release. Every move tick commits a fresh composition.
    let id = PointerId(1);
    session.pointer_down_on_layer(
        &PointerEvent::primary(id, Point::new(100.0, 40.0)),
        "title-text",
        LayerZone::Body,
    );
    session.pointer_move(&PointerEvent::primary(id, Point::new(150.0, 40.0)));
    session.pointer_up(&PointerEvent::primary(id, Point::new(150.0, 40.0)));

    let layer = session
        .active()
        .layer("title-text")
        .context("demo layer missing")?;
    println!(
        "title-text now spans {}..{}",
        layer.from.0,
        layer.range().end.0
    );

    // Scrub the ruler to frame 45 and read the clock.
    session.pointer_down_on_ruler(&PointerEvent::primary(id, Point::new(225.0, 8.0)));
    session.pointer_up(&PointerEvent::primary(id, Point::new(225.0, 8.0)));
    println!("playhead at {}", session.timecode());

    Ok(())
}
