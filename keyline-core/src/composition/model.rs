use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::{
    animation::anim::{Property, Value},
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{KeylineError, KeylineResult},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
/// The fixed set of channels a layer can carry.
///
/// Numeric channels can be keyframed; the string-typed ones (`Text`, `Color`,
/// `Shape`) are always static.
pub enum PropertyKey {
    /// Horizontal position in canvas pixels.
    X,
    /// Vertical position in canvas pixels.
    Y,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Uniform scale factor.
    Scale,
    /// Text content of a text layer.
    Text,
    /// Fill color as a hex string.
    Color,
    /// Font size in pixels for text layers.
    FontSize,
    /// Shape kind name for shape layers.
    Shape,
    /// Width in pixels for shape layers.
    Width,
    /// Height in pixels for shape layers.
    Height,
}

impl PropertyKey {
    /// Every key, in display order.
    pub const ALL: [PropertyKey; 10] = [
        Self::X,
        Self::Y,
        Self::Opacity,
        Self::Scale,
        Self::Text,
        Self::Color,
        Self::FontSize,
        Self::Shape,
        Self::Width,
        Self::Height,
    ];

    /// Whether this channel accepts keyframes.
    pub fn is_animatable(self) -> bool {
        !matches!(self, Self::Text | Self::Color | Self::Shape)
    }

    /// The document name of this key (`"fontSize"`, not `FontSize`).
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Text => "text",
            Self::Color => "color",
            Self::FontSize => "fontSize",
            Self::Shape => "shape",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    /// Parse a document name back into a key.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// What a layer renders as. Hosts interpret the kind; the core only gates
/// editing rules on `Group`.
pub enum LayerKind {
    /// A text layer.
    Text,
    /// A vector shape layer.
    Shape,
    /// A grouping layer holding child layers.
    Group,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single timeline layer.
///
/// Layers are stored behind [`std::sync::Arc`] in a [`LayerArena`] and never
/// mutated in place; edits go through the update-by-id operations on
/// [`Composition`], which replace one record and leave every other record
/// pointer-identical.
pub struct Layer {
    /// Stable identifier, unique within a composition.
    pub id: String,
    /// Display name for the layer list.
    pub name: String,
    /// Layer kind.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// First composition frame covered by the layer.
    pub from: FrameIndex,
    /// Layer length in frames. Interaction keeps this >= 1.
    pub duration: FrameIndex,
    /// Whether the layer is rendered. Hidden layers stay editable.
    #[serde(rename = "isVisible", default = "default_true")]
    pub visible: bool,
    /// Locked layers ignore drag and property edits.
    #[serde(rename = "isLocked", default)]
    pub locked: bool,
    /// Child layer ids, in stacking order. Only groups have children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// Property channels keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<PropertyKey, Property>,
}

fn default_true() -> bool {
    true
}

impl Layer {
    /// The half-open composition-frame window `[from, from + duration)`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: self.from,
            end: FrameIndex(self.from.0 + self.duration.0),
        }
    }

    /// Convert a composition frame to this layer's local clock.
    pub fn local_frame(&self, frame: FrameIndex) -> FrameIndex {
        FrameIndex(frame.0 - self.from.0)
    }

    /// Whether this is a grouping layer.
    pub fn is_group(&self) -> bool {
        self.kind == LayerKind::Group
    }

    /// Look up a property channel.
    pub fn property(&self, key: PropertyKey) -> Option<&Property> {
        self.properties.get(&key)
    }

    /// Resolve a property at a composition frame, or `None` if the layer does
    /// not carry the channel.
    pub fn property_value(&self, key: PropertyKey, frame: FrameIndex) -> Option<Value> {
        self.properties
            .get(&key)
            .map(|p| p.value_at(self.local_frame(frame)))
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "ArenaDoc", into = "ArenaDoc")]
/// Flat layer storage with O(1) lookup by id.
///
/// Records live behind [`Arc`] so that cloning the arena is cheap and an edit
/// to one layer leaves every other record shared with the previous arena.
/// Tree structure is expressed by [`Layer::children`] id lists plus the
/// ordered root list; serialization flattens to `{ roots, records }`.
pub struct LayerArena {
    records: Vec<Arc<Layer>>,
    index: HashMap<String, usize>,
    roots: Vec<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct ArenaDoc {
    #[serde(default)]
    roots: Vec<String>,
    #[serde(default)]
    records: Vec<Layer>,
}

impl From<ArenaDoc> for LayerArena {
    fn from(doc: ArenaDoc) -> Self {
        let mut arena = LayerArena::default();
        for layer in doc.records {
            arena.push(layer);
        }
        arena.roots = doc.roots;
        arena
    }
}

impl From<LayerArena> for ArenaDoc {
    fn from(arena: LayerArena) -> Self {
        ArenaDoc {
            roots: arena.roots.clone(),
            records: arena.records.iter().map(|r| (**r).clone()).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
/// One row of the flattened layer list.
pub struct FlatLayer<'a> {
    /// The layer record.
    pub layer: &'a Arc<Layer>,
    /// Nesting depth below the root list.
    pub depth: usize,
}

impl LayerArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (roots and children alike).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the arena holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Top-level layer ids in stacking order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Every record in insertion order.
    pub fn records(&self) -> &[Arc<Layer>] {
        &self.records
    }

    /// Add a record without making it a root. Children are referenced from
    /// their parent's id list.
    pub fn push(&mut self, layer: Layer) {
        let idx = self.records.len();
        self.index.insert(layer.id.clone(), idx);
        self.records.push(Arc::new(layer));
    }

    /// Add a record and append it to the root list.
    pub fn push_root(&mut self, layer: Layer) {
        let id = layer.id.clone();
        self.push(layer);
        self.roots.push(id);
    }

    /// Shared handle to a record.
    pub fn record(&self, id: &str) -> Option<&Arc<Layer>> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Borrow a layer by id.
    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.record(id).map(|r| r.as_ref())
    }

    /// Replace the record with the same id, leaving all other records
    /// untouched. Returns `false` (and changes nothing) for an unknown id.
    pub(crate) fn replace(&mut self, layer: Layer) -> bool {
        match self.index.get(&layer.id) {
            Some(&i) => {
                self.records[i] = Arc::new(layer);
                true
            }
            None => false,
        }
    }

    /// Depth-first flattening of the layer tree in stacking order.
    ///
    /// Groups appear as their own rows. Children of groups listed in
    /// `collapsed` are skipped; unknown child ids are skipped silently.
    pub fn flatten(&self, collapsed: &HashSet<String>) -> Vec<FlatLayer<'_>> {
        fn walk<'a>(
            arena: &'a LayerArena,
            id: &str,
            depth: usize,
            collapsed: &HashSet<String>,
            out: &mut Vec<FlatLayer<'a>>,
        ) {
            let Some(record) = arena.record(id) else {
                return;
            };
            out.push(FlatLayer {
                layer: record,
                depth,
            });
            if record.is_group() && !collapsed.contains(id) {
                for child in &record.children {
                    walk(arena, child, depth + 1, collapsed, out);
                }
            }
        }

        let mut out = Vec::with_capacity(self.records.len());
        for id in &self.roots {
            walk(self, id, 0, collapsed, &mut out);
        }
        out
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A complete timeline composition.
///
/// A composition is a pure data model: duration, frame rate, and the layer
/// arena. It can be built programmatically (see [`crate::demo_project`]) or
/// serialized/deserialized via Serde (JSON). All editing goes through the
/// immutable update-by-id operations defined alongside this type.
pub struct Composition {
    /// Stable identifier; also used as the render-job id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Total composition duration in frames.
    #[serde(rename = "durationInFrames")]
    pub duration_in_frames: FrameIndex,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Layer storage.
    pub layers: LayerArena,
}

impl Composition {
    /// The half-open frame window `[0, duration)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: self.duration_in_frames,
        }
    }

    /// Clamp a frame to the playable window `[0, duration - 1]`.
    pub fn clamp_frame(&self, frame: FrameIndex) -> FrameIndex {
        self.frame_range().clamp(frame)
    }

    /// Borrow a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// Check the structural invariants of the model.
    ///
    /// Interaction paths never call this; they clamp instead. Loaders and
    /// hosts call it at document boundaries.
    pub fn validate(&self) -> KeylineResult<()> {
        if self.id.trim().is_empty() {
            return Err(KeylineError::validation("composition id must be non-empty"));
        }
        if self.fps.0 == 0 {
            return Err(KeylineError::validation("fps must be > 0"));
        }
        if self.duration_in_frames.0 <= 0 {
            return Err(KeylineError::validation("duration must be > 0 frames"));
        }
        if self.layers.index.len() != self.layers.records.len() {
            return Err(KeylineError::validation("layer ids must be unique"));
        }

        for id in &self.layers.roots {
            if self.layers.get(id).is_none() {
                return Err(KeylineError::validation(format!(
                    "root list references missing layer '{id}'"
                )));
            }
        }

        for record in &self.layers.records {
            validate_layer(record, self.duration_in_frames)?;
            for child in &record.children {
                if self.layers.get(child).is_none() {
                    return Err(KeylineError::validation(format!(
                        "layer '{}' references missing child '{child}'",
                        record.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Load one composition from a JSON file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> KeylineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KeylineError::validation(format!("open composition JSON '{}': {e}", path.display()))
        })?;
        let comp: Composition = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| KeylineError::serde(format!("parse composition JSON: {e}")))?;
        comp.validate()?;
        Ok(comp)
    }
}

fn validate_layer(layer: &Layer, comp_duration: FrameIndex) -> KeylineResult<()> {
    if layer.id.trim().is_empty() {
        return Err(KeylineError::validation("layer id must be non-empty"));
    }
    if layer.duration.0 < 1 {
        return Err(KeylineError::validation(format!(
            "layer '{}' duration must be >= 1 frame",
            layer.id
        )));
    }
    if layer.from.0 < 0 {
        return Err(KeylineError::validation(format!(
            "layer '{}' must not start before frame 0",
            layer.id
        )));
    }
    if layer.from.0 + layer.duration.0 > comp_duration.0 {
        return Err(KeylineError::validation(format!(
            "layer '{}' window exceeds composition duration",
            layer.id
        )));
    }
    if !layer.children.is_empty() && !layer.is_group() {
        return Err(KeylineError::validation(format!(
            "layer '{}' has children but is not a group",
            layer.id
        )));
    }

    for (key, prop) in &layer.properties {
        match prop {
            Property::Static(Value::Number(n)) => {
                if !n.is_finite() {
                    return Err(KeylineError::validation(format!(
                        "layer '{}' property '{}' must be finite",
                        layer.id,
                        key.name()
                    )));
                }
            }
            Property::Static(Value::Text(_)) => {}
            Property::Animated(keys) => {
                if !key.is_animatable() {
                    return Err(KeylineError::validation(format!(
                        "layer '{}' property '{}' cannot be keyframed",
                        layer.id,
                        key.name()
                    )));
                }
                if !keys.windows(2).all(|w| w[0].frame.0 < w[1].frame.0) {
                    return Err(KeylineError::validation(format!(
                        "layer '{}' property '{}' keyframes must be strictly ascending by frame",
                        layer.id,
                        key.name()
                    )));
                }
                for k in keys {
                    if k.frame.0 < 0 {
                        return Err(KeylineError::validation(format!(
                            "layer '{}' property '{}' keyframe frame must be >= 0",
                            layer.id,
                            key.name()
                        )));
                    }
                    if !k.value.is_finite() {
                        return Err(KeylineError::validation(format!(
                            "layer '{}' property '{}' keyframe value must be finite",
                            layer.id,
                            key.name()
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Load a project file (a JSON array of compositions) and validate each entry.
#[tracing::instrument]
pub fn load_project(path: &Path) -> KeylineResult<Vec<Composition>> {
    let f = File::open(path).map_err(|e| {
        KeylineError::validation(format!("open project JSON '{}': {e}", path.display()))
    })?;
    let comps: Vec<Composition> = serde_json::from_reader(BufReader::new(f))
        .map_err(|e| KeylineError::serde(format!("parse project JSON: {e}")))?;
    for comp in &comps {
        comp.validate()?;
    }
    tracing::debug!(compositions = comps.len(), "loaded project");
    Ok(comps)
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
