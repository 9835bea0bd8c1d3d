use crate::animation::ease::Easing;
use crate::foundation::core::FrameIndex;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub frame: FrameIndex, // local to the owning layer's start
    pub value: f64,
    /// Easing applied over the segment toward the next key.
    #[serde(rename = "interpolation", default)]
    pub ease: Easing,
}

impl Keyframe {
    pub fn new(frame: i64, value: f64, ease: Easing) -> Self {
        Self {
            frame: FrameIndex(frame),
            value,
            ease,
        }
    }
}

/// Sample a sorted keyframe track at a layer-local frame.
///
/// - no keys: `0.0`
/// - before the first key: the first key's value
/// - at or after the last key: the last key's value
/// - between two keys: the earlier key's easing applied to the normalized
///   position, then a linear mix of the two values
pub fn sample_keyframes(keys: &[Keyframe], local: FrameIndex) -> f64 {
    if keys.is_empty() {
        return 0.0;
    }

    let f = local.0;
    let idx = keys.partition_point(|k| k.frame.0 <= f);

    if idx == 0 {
        return keys[0].value;
    }
    if idx >= keys.len() {
        return keys[keys.len() - 1].value;
    }

    let a = &keys[idx - 1];
    let b = &keys[idx];
    let denom = b.frame.0 - a.frame.0;
    if denom == 0 {
        return a.value;
    }

    let t = ((f - a.frame.0) as f64) / (denom as f64);
    let te = a.ease.apply(t);
    a.value + (b.value - a.value) * te
}

/// A concrete property value: scalar for animatable channels, text for the
/// string-typed ones (text content, color, shape name).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// A layer property: either a single static value or a keyframed track.
///
/// The two states are exclusive by construction. An `Animated` track with an
/// empty key list samples to `0.0`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Property {
    #[serde(rename = "value")]
    Static(Value),
    #[serde(rename = "keyframes")]
    Animated(Vec<Keyframe>),
}

impl Property {
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }

    /// Resolve the property at a layer-local frame.
    pub fn value_at(&self, local: FrameIndex) -> Value {
        match self {
            Self::Static(v) => v.clone(),
            Self::Animated(keys) => Value::Number(sample_keyframes(keys, local)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
