//! Keyframe data model and interpolation for Lottie animation properties.
//!
//! Property JSON is read through a [`lottie_data::TokenReader`] into
//! [`AnimatableValue`]s (scalars, colors, shapes) or [`PositionValue`]s
//! (positions along a motion path). Each one can be sampled directly by
//! progress or turned into a [`KeyframeAnimation`] provider that also knows
//! its start delay and duration on the composition clock.

pub mod animatable;
pub mod animation;
pub mod composition;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod parser;
pub mod path;
pub mod shape;

pub use animatable::{remap_100_to_255, AnimatableValue, Interpolatable};
pub use animation::{KeyframeAnimation, StaticKeyframeAnimation, ValueKeyframeAnimation};
pub use composition::CompositionContext;
pub use easing::Easing;
pub use error::{LottieError, Result};
pub use keyframe::Keyframe;
pub use parser::{
    ColorParser, FloatParser, IntegerParser, PointParser, ShapeDataParser, ValueParser,
};
pub use path::{
    AnimatablePathValue, PathKeyframeAnimation, PositionValue, SegmentedPath,
    SplitDimensionAnimation, SplitDimensionPathValue,
};
pub use shape::ShapeData;
