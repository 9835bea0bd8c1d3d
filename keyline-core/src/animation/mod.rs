//! Keyframe tracks, easing, sampling, and curve previews.
#![allow(missing_docs)]

pub mod anim;
pub mod curve;
pub mod ease;
