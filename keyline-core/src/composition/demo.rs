use std::collections::BTreeMap;

use crate::{
    animation::anim::{Keyframe, Property, Value},
    animation::ease::Easing,
    composition::model::{Composition, Layer, LayerArena, LayerKind, PropertyKey},
    foundation::core::{Fps, FrameIndex},
};

fn number(n: f64) -> Property {
    Property::Static(Value::Number(n))
}

fn text(s: &str) -> Property {
    Property::Static(Value::Text(s.to_owned()))
}

fn track(keys: &[(i64, f64)]) -> Property {
    Property::Animated(
        keys.iter()
            .map(|&(frame, value)| Keyframe::new(frame, value, Easing::Linear))
            .collect(),
    )
}

fn layer(id: &str, name: &str, kind: LayerKind, from: i64, duration: i64) -> Layer {
    Layer {
        id: id.to_owned(),
        name: name.to_owned(),
        kind,
        from: FrameIndex(from),
        duration: FrameIndex(duration),
        visible: true,
        locked: false,
        children: Vec::new(),
        properties: BTreeMap::new(),
    }
}

/// Build the bundled two-composition sample project.
///
/// `MainScene` is a 180-frame title card: a full-frame background shape plus a
/// group of two text layers with opacity fade tracks. `SecondComp` is a
/// 120-frame scale pop-in. The data doubles as a fixture for tests and for the
/// `demo` CLI subcommand.
pub fn demo_project() -> Vec<Composition> {
    let mut bg = layer("bg-shape", "Background", LayerKind::Shape, 0, 180);
    bg.properties = BTreeMap::from([
        (PropertyKey::X, number(960.0)),
        (PropertyKey::Y, number(540.0)),
        (PropertyKey::Opacity, number(1.0)),
        (PropertyKey::Scale, number(1.0)),
        (PropertyKey::Shape, text("rect")),
        (PropertyKey::Color, text("#ecf0f1")),
        (PropertyKey::Width, number(1920.0)),
        (PropertyKey::Height, number(1080.0)),
    ]);

    let mut title = layer("title-text", "Main Title", LayerKind::Text, 15, 150);
    title.properties = BTreeMap::from([
        (PropertyKey::X, number(960.0)),
        (PropertyKey::Y, number(450.0)),
        (PropertyKey::Scale, number(1.0)),
        (
            PropertyKey::Opacity,
            track(&[(0, 0.0), (30, 1.0), (120, 1.0), (150, 0.0)]),
        ),
        (PropertyKey::Text, text("It Finally Works!")),
        (PropertyKey::Color, text("#2c3e50")),
        (PropertyKey::FontSize, number(120.0)),
    ]);

    let mut subtitle = layer("subtitle-text", "Subtitle", LayerKind::Text, 45, 120);
    subtitle.properties = BTreeMap::from([
        (PropertyKey::X, number(960.0)),
        (PropertyKey::Y, number(600.0)),
        (PropertyKey::Scale, number(1.0)),
        (
            PropertyKey::Opacity,
            track(&[(0, 0.0), (30, 1.0), (90, 1.0), (120, 0.0)]),
        ),
        (
            PropertyKey::Text,
            text("With Editable Properties & Keyframes"),
        ),
        (PropertyKey::Color, text("#3498db")),
        (PropertyKey::FontSize, number(60.0)),
    ]);

    let mut titles = layer("title-group", "Titles", LayerKind::Group, 0, 180);
    titles.children = vec!["title-text".to_owned(), "subtitle-text".to_owned()];

    let mut main_layers = LayerArena::new();
    main_layers.push_root(bg);
    main_layers.push_root(titles);
    main_layers.push(title);
    main_layers.push(subtitle);

    let main = Composition {
        id: "MainScene".to_owned(),
        name: "Main Scene".to_owned(),
        duration_in_frames: FrameIndex(180),
        fps: Fps(30),
        layers: main_layers,
    };

    let mut square = layer("shape-1", "Blue Square", LayerKind::Shape, 0, 120);
    square.properties = BTreeMap::from([
        (PropertyKey::X, number(960.0)),
        (PropertyKey::Y, number(540.0)),
        (PropertyKey::Scale, track(&[(0, 0.0), (30, 1.0)])),
        (PropertyKey::Opacity, number(1.0)),
        (PropertyKey::Shape, text("rect")),
        (PropertyKey::Color, text("#3498db")),
        (PropertyKey::Width, number(300.0)),
        (PropertyKey::Height, number(300.0)),
    ]);

    let mut second_layers = LayerArena::new();
    second_layers.push_root(square);

    let second = Composition {
        id: "SecondComp".to_owned(),
        name: "Second Composition".to_owned(),
        duration_in_frames: FrameIndex(120),
        fps: Fps(30),
        layers: second_layers,
    };

    vec![main, second]
}

#[cfg(test)]
#[path = "../../tests/unit/composition/demo.rs"]
mod tests;
