use crate::easing::Easing;
use crate::error::{LottieError, Result};
use crate::parser::ValueParser;
use glam::Vec2;
use lottie_data::{json, TokenReader};
use tracing::{trace, warn};

/// One time-bounded segment of an animated value.
///
/// Built once while parsing and never mutated afterwards. A hold keyframe
/// ends at its own start value and snaps to the next keyframe instead of
/// interpolating.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe<T> {
    start_value: T,
    end_value: Option<T>,
    start_frame: i64,
    easing: Easing,
    is_hold: bool,
}

impl<T: Clone> Keyframe<T> {
    pub(crate) fn new(
        start_value: T,
        end_value: Option<T>,
        start_frame: i64,
        easing: Easing,
        is_hold: bool,
    ) -> Self {
        if is_hold {
            let end_value = Some(start_value.clone());
            return Self {
                start_value,
                end_value,
                start_frame,
                easing: Easing::Linear,
                is_hold,
            };
        }
        Self {
            start_value,
            end_value,
            start_frame,
            easing,
            is_hold,
        }
    }

    pub fn start_value(&self) -> &T {
        &self.start_value
    }

    pub fn end_value(&self) -> Option<&T> {
        self.end_value.as_ref()
    }

    /// End value, or the start value for a keyframe that ends where it starts.
    pub fn resolved_end_value(&self) -> &T {
        self.end_value.as_ref().unwrap_or(&self.start_value)
    }

    pub fn start_frame(&self) -> i64 {
        self.start_frame
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_hold(&self) -> bool {
        self.is_hold
    }

    pub(crate) fn map(&self, f: &impl Fn(&T) -> T) -> Self {
        Self {
            start_value: f(&self.start_value),
            end_value: self.end_value.as_ref().map(f),
            start_frame: self.start_frame,
            easing: self.easing,
            is_hold: self.is_hold,
        }
    }
}

/// A keyframe object exactly as it appeared in the document, before start
/// and end values are resolved against its neighbours.
#[derive(Debug, Clone)]
pub(crate) struct RawKeyframe<T> {
    pub frame: Option<i64>,
    pub start: Option<T>,
    pub end: Option<T>,
    pub out_handle: Option<Vec2>,
    pub in_handle: Option<Vec2>,
    pub out_tangent: Option<Vec2>,
    pub in_tangent: Option<Vec2>,
    pub hold: bool,
}

impl<T> RawKeyframe<T> {
    pub fn easing(&self) -> Easing {
        Easing::from_handles(self.out_handle, self.in_handle)
    }
}

/// Reads one keyframe object. `s` and `e` go through `parser`; the timing
/// handles `o` and `i` are never scaled.
pub(crate) fn parse_raw_keyframe<P: ValueParser>(
    reader: &mut dyn TokenReader,
    parser: &P,
    scale: f32,
) -> Result<RawKeyframe<P::Output>> {
    let mut raw = RawKeyframe {
        frame: None,
        start: None,
        end: None,
        out_handle: None,
        in_handle: None,
        out_tangent: None,
        in_tangent: None,
        hold: false,
    };
    reader.begin_object()?;
    while reader.has_next() {
        let name = reader.next_name()?;
        match name.as_str() {
            "t" => raw.frame = Some(reader.next_long()?),
            "s" => raw.start = Some(parser.parse(reader, scale)?),
            "e" => raw.end = Some(parser.parse(reader, scale)?),
            "o" => raw.out_handle = Some(Vec2::from(json::point(reader, 1.0)?)),
            "i" => raw.in_handle = Some(Vec2::from(json::point(reader, 1.0)?)),
            "to" => raw.out_tangent = Some(Vec2::from(json::point(reader, scale)?)),
            "ti" => raw.in_tangent = Some(Vec2::from(json::point(reader, scale)?)),
            "h" => raw.hold = reader.next_int()? == 1,
            _ => {
                trace!(key = %name, "skipping unknown keyframe key");
                reader.skip_value()?;
            }
        }
    }
    reader.end_object()?;
    Ok(raw)
}

/// First and last explicitly keyed frames of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    pub fn from_keyframes<T>(raws: &[RawKeyframe<T>]) -> Result<Self> {
        let mut keyed = raws.iter().filter_map(|raw| raw.frame);
        let start = keyed.next().unwrap_or(0);
        let end = keyed.last().unwrap_or(start);
        if end <= start {
            return Err(LottieError::InvalidDuration {
                start_frame: start,
                end_frame: end,
            });
        }
        Ok(Self { start, end })
    }

    pub fn duration_frames(&self) -> i64 {
        self.end - self.start
    }

    /// Position of `frame` within the range, 0 at the first keyed frame.
    pub fn percentage(&self, frame: i64) -> f32 {
        (frame - self.start) as f32 / self.duration_frames() as f32
    }
}

/// Frames for every keyframe. A keyframe without `t` shares its
/// predecessor's frame; a frame earlier than its predecessor is raised to it.
pub(crate) fn resolve_frames<T>(raws: &[RawKeyframe<T>]) -> Vec<i64> {
    let mut frames = Vec::with_capacity(raws.len());
    let mut previous = 0;
    for (index, raw) in raws.iter().enumerate() {
        let mut frame = raw.frame.unwrap_or(previous);
        if index > 0 && frame < previous {
            warn!(frame, previous, "keyframe out of order, clamping");
            frame = previous;
        }
        frames.push(frame);
        previous = frame;
    }
    frames
}

/// Resolves start and end values against neighbouring keyframes.
///
/// A missing `s` continues from the previous keyframe's end. A missing `e`
/// runs to the next keyframe's start; on the last keyframe it stays absent.
pub(crate) fn resolve_keyframes<T: Clone>(raws: Vec<RawKeyframe<T>>) -> Result<Vec<Keyframe<T>>> {
    let frames = resolve_frames(&raws);
    let next_starts: Vec<Option<T>> = raws
        .iter()
        .skip(1)
        .map(|raw| raw.start.clone())
        .chain(std::iter::once(None))
        .collect();

    let mut keyframes: Vec<Keyframe<T>> = Vec::with_capacity(raws.len());
    for ((raw, frame), next_start) in raws.into_iter().zip(frames).zip(next_starts) {
        let easing = raw.easing();
        let start = match raw.start {
            Some(start) => start,
            None => match keyframes.last() {
                Some(previous) => previous.resolved_end_value().clone(),
                None => return Err(LottieError::MissingRequiredKey { key: "s" }),
            },
        };
        let end = raw.end.or(next_start);
        keyframes.push(Keyframe::new(start, end, frame, easing, raw.hold));
    }
    Ok(keyframes)
}
