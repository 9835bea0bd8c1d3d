use crate::{
    animation::anim::{Keyframe, Property, Value, sample_keyframes},
    animation::ease::Easing,
    composition::model::{Composition, Layer, PropertyKey},
    foundation::core::FrameIndex,
};

/// Immutable update-by-id editing.
///
/// Every operation returns a new [`Composition`]. The edited layer's record is
/// replaced; all other records are shared with the receiver (pointer-identical
/// `Arc`s). An unknown layer id, or a channel the layer does not carry, yields
/// a composition equal to the receiver. Operations never fail.
impl Composition {
    /// Apply an edit closure to one layer.
    ///
    /// The closure must not change the layer id; an edit that does is
    /// discarded.
    pub fn with_layer(&self, id: &str, edit: impl FnOnce(&mut Layer)) -> Composition {
        let mut next = self.clone();
        let Some(mut layer) = next.layers.get(id).cloned() else {
            return next;
        };
        edit(&mut layer);
        next.layers.replace(layer);
        next
    }

    /// Set a layer's timeline window. Callers keep `duration >= 1`; the drag
    /// logic clamps before committing.
    pub fn with_layer_window(
        &self,
        id: &str,
        from: FrameIndex,
        duration: FrameIndex,
    ) -> Composition {
        self.with_layer(id, |layer| {
            layer.from = from;
            layer.duration = duration;
        })
    }

    /// Flip a layer's visibility flag.
    pub fn with_visibility_toggled(&self, id: &str) -> Composition {
        self.with_layer(id, |layer| layer.visible = !layer.visible)
    }

    /// Flip a layer's locked flag.
    pub fn with_locked_toggled(&self, id: &str) -> Composition {
        self.with_layer(id, |layer| layer.locked = !layer.locked)
    }

    /// Replace a property channel wholesale, adding it if absent.
    pub fn with_property(&self, id: &str, key: PropertyKey, property: Property) -> Composition {
        self.with_layer(id, |layer| {
            layer.properties.insert(key, property);
        })
    }

    /// Write a value into a channel at a layer-local frame.
    ///
    /// Static channels replace their value. Keyframed channels update the key
    /// at exactly `local` when one exists, otherwise insert a linear key at
    /// `max(0, local)` and keep the track sorted. Writing a text value into a
    /// keyframed channel changes nothing.
    pub fn with_value_at(
        &self,
        id: &str,
        key: PropertyKey,
        local: FrameIndex,
        value: Value,
    ) -> Composition {
        self.with_layer(id, |layer| {
            let Some(prop) = layer.properties.get_mut(&key) else {
                return;
            };
            match prop {
                Property::Static(v) => *v = value,
                Property::Animated(keys) => {
                    let Value::Number(n) = value else {
                        return;
                    };
                    let mut matched = false;
                    for k in keys.iter_mut() {
                        if k.frame == local {
                            k.value = n;
                            matched = true;
                        }
                    }
                    if !matched {
                        keys.push(Keyframe {
                            frame: FrameIndex(local.0.max(0)),
                            value: n,
                            ease: Easing::Linear,
                        });
                        keys.sort_by_key(|k| k.frame);
                    }
                }
            }
        })
    }

    /// Switch a channel between static and keyframed at a layer-local frame.
    ///
    /// A keyframed channel freezes to a static value sampled at `local`. A
    /// static numeric channel becomes a track seeded with one linear key at
    /// `max(0, local)` carrying the current value; an empty track is seeded
    /// the same way from its sampled value. Text channels are left unchanged.
    pub fn with_keyframing_toggled(
        &self,
        id: &str,
        key: PropertyKey,
        local: FrameIndex,
    ) -> Composition {
        self.with_layer(id, |layer| {
            let Some(prop) = layer.properties.get_mut(&key) else {
                return;
            };
            let seed = |value: f64| {
                Property::Animated(vec![Keyframe {
                    frame: FrameIndex(local.0.max(0)),
                    value,
                    ease: Easing::Linear,
                }])
            };
            let next = match &*prop {
                Property::Animated(keys) if !keys.is_empty() => {
                    Property::Static(Value::Number(sample_keyframes(keys, local)))
                }
                Property::Animated(_) => seed(0.0),
                Property::Static(Value::Number(n)) => seed(*n),
                Property::Static(Value::Text(_)) => return,
            };
            *prop = next;
        })
    }

    /// Retag the easing of the keyframe at exactly `local` in a channel.
    /// Without a matching keyframe the layer is unchanged.
    pub fn with_keyframe_easing(
        &self,
        id: &str,
        key: PropertyKey,
        local: FrameIndex,
        ease: Easing,
    ) -> Composition {
        self.with_layer(id, |layer| {
            let Some(Property::Animated(keys)) = layer.properties.get_mut(&key) else {
                return;
            };
            for k in keys.iter_mut() {
                if k.frame == local {
                    k.ease = ease;
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/mutate.rs"]
mod tests;
