use crate::animation::{KeyframeAnimation, StaticKeyframeAnimation, ValueKeyframeAnimation};
use crate::composition::CompositionContext;
use crate::error::{LottieError, Result};
use crate::keyframe::{parse_raw_keyframe, resolve_keyframes, FrameRange, Keyframe};
use crate::parser::{IntegerParser, ValueParser};
use crate::shape::ShapeData;
use glam::{Vec2, Vec4};
use lottie_data::{TokenKind, TokenReader};
use tracing::{debug, trace};

pub trait Interpolatable:
    Sized + Clone + Default + Send + Sync + std::fmt::Debug + 'static
{
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolatable for i32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let from = *self as f64;
        (from + (*other as f64 - from) * t as f64).round() as i32
    }
}

impl Interpolatable for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::lerp(*self, *other, t)
    }
}

// Colors
impl Interpolatable for Vec4 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec4::lerp(*self, *other, t)
    }
}

impl Interpolatable for ShapeData {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if t <= 0.0 {
            return self.clone();
        }
        if t >= 1.0 {
            return other.clone();
        }

        // Shapes with different vertex counts only morph their common prefix.
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        let min_verts = self.vertices.len().min(other.vertices.len());

        let tangent = |list: &[Vec2], i: usize| list.get(i).copied().unwrap_or(Vec2::ZERO);
        let mut shape = ShapeData {
            closed: self.closed,
            vertices: Vec::with_capacity(min_verts),
            in_tangents: Vec::with_capacity(min_verts),
            out_tangents: Vec::with_capacity(min_verts),
        };
        for i in 0..min_verts {
            shape
                .vertices
                .push(self.vertices[i].lerp(other.vertices[i], t));
            shape.in_tangents.push(
                tangent(&self.in_tangents, i).lerp(tangent(&other.in_tangents, i), t),
            );
            shape.out_tangents.push(
                tangent(&self.out_tangents, i).lerp(tangent(&other.out_tangents, i), t),
            );
        }
        shape
    }
}

/// Remaps an integer written on a 0..100 scale to 0..255.
/// Results outside the `i32` range saturate.
pub fn remap_100_to_255(value: i32) -> i32 {
    (value as i64 * 255 / 100).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// A property value that is either static or driven by keyframes.
///
/// Keyframes are empty if and only if the value is static. All fields are
/// fixed once parsing returns, so evaluation only needs `&self`.
#[derive(Debug, Clone)]
pub struct AnimatableValue<T> {
    initial_value: T,
    keyframes: Vec<Keyframe<T>>,
    key_times: Vec<f32>,
    duration_ms: i64,
    start_delay_ms: i64,
}

impl<T: Interpolatable> AnimatableValue<T> {
    pub fn new_static(value: T) -> Self {
        Self {
            initial_value: value,
            keyframes: Vec::new(),
            key_times: Vec::new(),
            duration_ms: 0,
            start_delay_ms: 0,
        }
    }

    /// Parses a property object such as `{"a": 1, "k": [...], "ix": 3}`.
    /// Only `k` is read; a second `k` is skipped.
    pub fn parse<P>(
        reader: &mut dyn TokenReader,
        parser: &P,
        ctx: &CompositionContext,
        scaled: bool,
    ) -> Result<Self>
    where
        P: ValueParser<Output = T>,
    {
        let mut value = None;
        reader.begin_object()?;
        while reader.has_next() {
            let name = reader.next_name()?;
            if name == "k" && value.is_none() {
                value = Some(Self::parse_value(reader, parser, ctx, scaled)?);
            } else {
                trace!(key = %name, "skipping property key");
                reader.skip_value()?;
            }
        }
        reader.end_object()?;
        value.ok_or(LottieError::MissingRequiredKey { key: "k" })
    }

    /// Parses the value of a `k` key: a static value or an array of keyframes.
    pub fn parse_value<P>(
        reader: &mut dyn TokenReader,
        parser: &P,
        ctx: &CompositionContext,
        scaled: bool,
    ) -> Result<Self>
    where
        P: ValueParser<Output = T>,
    {
        let scale = ctx.scale_for(scaled);
        if reader.peek() != TokenKind::BeginArray {
            return Ok(Self::new_static(parser.parse(reader, scale)?));
        }

        reader.begin_array()?;
        if reader.peek() == TokenKind::EndArray {
            // No keyframes at all: a static default.
            reader.end_array()?;
            return Ok(Self::new_static(T::default()));
        }
        if reader.peek() != TokenKind::BeginObject {
            // A static value written as an array, e.g. `[100]` or `[10, 20]`.
            let value = parser.from_elements(reader, scale)?;
            while reader.has_next() {
                reader.skip_value()?;
            }
            reader.end_array()?;
            return Ok(Self::new_static(value));
        }

        let mut raws = Vec::new();
        while reader.has_next() {
            raws.push(parse_raw_keyframe(reader, parser, scale)?);
        }
        reader.end_array()?;

        let range = FrameRange::from_keyframes(&raws)?;
        let keyframes = resolve_keyframes(raws)?;
        let value = Self::from_keyframes(keyframes, range, ctx);
        debug!(
            keyframes = value.keyframes.len(),
            duration_ms = value.duration_ms,
            start_delay_ms = value.start_delay_ms,
            "parsed keyframed value"
        );
        Ok(value)
    }

    fn from_keyframes(
        keyframes: Vec<Keyframe<T>>,
        range: FrameRange,
        ctx: &CompositionContext,
    ) -> Self {
        let key_times = keyframes
            .iter()
            .map(|kf| range.percentage(kf.start_frame()))
            .collect();
        let initial_value = keyframes[0].start_value().clone();
        Self {
            initial_value,
            keyframes,
            key_times,
            duration_ms: ctx.span_ms(range.duration_frames()),
            start_delay_ms: ctx.frames_to_ms(range.start),
        }
    }

    pub fn initial_value(&self) -> &T {
        &self.initial_value
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    /// Position of each keyframe within the animation, in [0, 1].
    pub fn key_times(&self) -> &[f32] {
        &self.key_times
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub fn start_delay_ms(&self) -> i64 {
        self.start_delay_ms
    }

    pub fn has_animation(&self) -> bool {
        !self.keyframes.is_empty()
    }

    /// Value at `progress` through the animation. Out-of-range progress is clamped.
    pub fn evaluate(&self, progress: f32) -> T {
        let (first, last) = match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.initial_value.clone(),
        };

        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if progress <= 0.0 {
            return first.start_value().clone();
        }
        if progress >= 1.0 {
            return last.resolved_end_value().clone();
        }

        // Interval [idx-1, idx] contains progress.
        let idx = self.key_times.partition_point(|&t| t <= progress);
        if idx == 0 {
            return first.start_value().clone();
        }
        if idx >= self.key_times.len() {
            return last.resolved_end_value().clone();
        }

        let keyframe = &self.keyframes[idx - 1];
        if keyframe.is_hold() {
            return keyframe.start_value().clone();
        }
        let span = self.key_times[idx] - self.key_times[idx - 1];
        if span <= 0.0 {
            return keyframe.start_value().clone();
        }
        let local = (progress - self.key_times[idx - 1]) / span;
        let eased = keyframe.easing().ease(local);
        keyframe
            .start_value()
            .lerp(keyframe.resolved_end_value(), eased)
    }

    /// Applies `f` to the initial value and to every keyframe value.
    pub fn map_values(self, f: impl Fn(&T) -> T) -> Self {
        Self {
            initial_value: f(&self.initial_value),
            keyframes: self.keyframes.iter().map(|kf| kf.map(&f)).collect(),
            key_times: self.key_times,
            duration_ms: self.duration_ms,
            start_delay_ms: self.start_delay_ms,
        }
    }

    /// A constant provider for static values, a time-driven one otherwise.
    pub fn build_animation(&self) -> Box<dyn KeyframeAnimation<T>> {
        if !self.has_animation() {
            return Box::new(StaticKeyframeAnimation::new(self.initial_value.clone()));
        }
        Box::new(ValueKeyframeAnimation::new(self.clone()))
    }
}

impl AnimatableValue<i32> {
    /// Integer property parse with the optional 0..100 to 0..255 remap
    /// applied after all values are read.
    pub fn parse_integer(
        reader: &mut dyn TokenReader,
        ctx: &CompositionContext,
        scaled: bool,
        remap: bool,
    ) -> Result<Self> {
        let value = Self::parse(reader, &IntegerParser, ctx, scaled)?;
        if remap {
            return Ok(value.map_values(|v| remap_100_to_255(*v)));
        }
        Ok(value)
    }
}
