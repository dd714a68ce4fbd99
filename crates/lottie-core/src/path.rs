//! Animated 2D positions.
//!
//! A keyframed position is assembled into one continuous path: every
//! keyframe interval becomes a line or cubic segment with its own easing, and
//! progress picks a segment by its time markers, then walks the segment by
//! arc length. Positions split into independently animated `x` and `y`
//! properties skip path assembly and are evaluated per axis.

use crate::animatable::AnimatableValue;
use crate::animation::{KeyframeAnimation, StaticKeyframeAnimation};
use crate::composition::CompositionContext;
use crate::easing::Easing;
use crate::error::{LottieError, Result};
use crate::keyframe::{parse_raw_keyframe, resolve_frames, FrameRange, RawKeyframe};
use crate::parser::{FloatParser, PointParser, ValueParser};
use crate::shape::to_point;
use glam::Vec2;
use kurbo::{BezPath, CubicBez, Line, ParamCurve, ParamCurveArclen, PathSeg, Point};
use lottie_data::{TokenKind, TokenReader};
use tracing::{debug, trace};

/// Offset of the extra time marker placed just before the keyframe that
/// follows a hold, so the jump between the two values takes no visible time.
pub const HOLD_EPSILON: f32 = 0.00001;

const ARCLEN_ACCURACY: f64 = 1e-3;

/// A path made of one move followed by line and cubic segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentedPath {
    start: Point,
    cursor: Point,
    segments: Vec<PathSeg>,
}

impl SegmentedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Vec2) {
        self.start = to_point(point);
        self.cursor = self.start;
    }

    pub fn line_to(&mut self, point: Vec2) {
        let end = to_point(point);
        self.segments.push(PathSeg::Line(Line::new(self.cursor, end)));
        self.cursor = end;
    }

    pub fn cubic_to(&mut self, cp1: Vec2, cp2: Vec2, point: Vec2) {
        let end = to_point(point);
        self.segments.push(PathSeg::Cubic(CubicBez::new(
            self.cursor,
            to_point(cp1),
            to_point(cp2),
            end,
        )));
        self.cursor = end;
    }

    pub fn has_segments(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSeg] {
        &self.segments
    }

    pub fn start_point(&self) -> Vec2 {
        to_vec2(self.start)
    }

    pub fn end_point(&self) -> Vec2 {
        to_vec2(self.cursor)
    }

    /// Point `fraction` of the way along segment `index`, measured by arc length.
    pub fn point_on_segment(&self, index: usize, fraction: f32) -> Vec2 {
        let Some(segment) = self.segments.get(index) else {
            return self.end_point();
        };
        let length = segment.arclen(ARCLEN_ACCURACY);
        if length <= f64::EPSILON {
            return to_vec2(segment.end());
        }
        let fraction = fraction.clamp(0.0, 1.0) as f64;
        let t = segment.inv_arclen(length * fraction, ARCLEN_ACCURACY);
        to_vec2(segment.eval(t))
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut bp = BezPath::new();
        bp.move_to(self.start);
        for segment in &self.segments {
            match segment {
                PathSeg::Line(line) => bp.line_to(line.p1),
                PathSeg::Quad(quad) => bp.quad_to(quad.p1, quad.p2),
                PathSeg::Cubic(cubic) => bp.curve_to(cubic.p1, cubic.p2, cubic.p3),
            }
        }
        bp
    }
}

fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.x as f32, point.y as f32)
}

/// State carried from one keyframe to the next while assembling the path.
#[derive(Debug, Default)]
struct PathAssembly {
    path: SegmentedPath,
    easings: Vec<Easing>,
    key_times: Vec<f32>,
    /// Start point of a hold keyframe, reached by a straight segment once the
    /// next keyframe is known.
    pending_vertex: Option<Vec2>,
    /// After a hold, the next keyframe's start vertex is emitted explicitly.
    emit_start: bool,
    /// After a hold, a marker is inserted just before the next keyframe.
    pad_next: bool,
    previous_end: Option<Vec2>,
}

impl PathAssembly {
    fn push_key_time(&mut self, time: f32) {
        let floor = self.key_times.last().copied().unwrap_or(f32::MIN);
        self.key_times.push(time.max(floor));
    }

    fn push_linear(&mut self, point: Vec2) {
        self.path.line_to(point);
        self.easings.push(Easing::Linear);
    }

    fn push_segment(&mut self, raw: &RawKeyframe<Vec2>, start: Vec2, end: Vec2) {
        match (raw.out_tangent, raw.in_tangent) {
            (Some(to), Some(ti)) if to != Vec2::ZERO && ti != Vec2::ZERO => {
                self.path.cubic_to(start + to, end + ti, end)
            }
            _ => self.path.line_to(end),
        }
        self.easings.push(raw.easing());
    }

    fn step(
        &mut self,
        index: usize,
        raw: &RawKeyframe<Vec2>,
        time: f32,
        next_start: Option<Vec2>,
        is_last: bool,
    ) -> Result<()> {
        let start = raw
            .start
            .or(self.previous_end)
            .ok_or(LottieError::MalformedValue {
                expected: PointParser::EXPECTED,
                found: TokenKind::EndObject,
            })?;

        if index == 0 {
            self.path.move_to(start);
        } else {
            if let Some(vertex) = self.pending_vertex.take() {
                self.push_linear(vertex);
            }
            if self.emit_start {
                self.push_linear(start);
                self.emit_start = false;
            }
        }

        if self.pad_next {
            self.push_key_time(time - HOLD_EPSILON);
            self.pad_next = false;
        }

        // A final keyframe only moves on when it declares its own end, and that
        // segment closes at progress 1.
        let end = match (raw.hold, is_last) {
            (true, _) => None,
            (false, true) => raw.end,
            (false, false) => Some(raw.end.or(next_start).unwrap_or(start)),
        };
        match end {
            Some(end) => {
                self.push_segment(raw, start, end);
                self.previous_end = Some(end);
            }
            None => self.previous_end = Some(start),
        }

        self.push_key_time(time);
        if is_last && end.is_some() {
            self.push_key_time(1.0);
        }

        if raw.hold {
            self.pending_vertex = Some(start);
            self.emit_start = true;
            self.pad_next = true;
        }
        Ok(())
    }
}

/// An animated position assembled into a single path.
#[derive(Debug, Clone)]
pub struct AnimatablePathValue {
    initial_point: Vec2,
    path: SegmentedPath,
    easings: Vec<Easing>,
    key_times: Vec<f32>,
    keyframe_count: usize,
    duration_ms: i64,
    start_delay_ms: i64,
}

impl AnimatablePathValue {
    pub fn new_static(point: Vec2) -> Self {
        Self {
            initial_point: point,
            path: SegmentedPath::new(),
            easings: Vec::new(),
            key_times: Vec::new(),
            keyframe_count: 0,
            duration_ms: 0,
            start_delay_ms: 0,
        }
    }

    /// Parses a property object; `k` is required.
    pub fn parse(reader: &mut dyn TokenReader, ctx: &CompositionContext) -> Result<Self> {
        let mut value = None;
        reader.begin_object()?;
        while reader.has_next() {
            let name = reader.next_name()?;
            if name == "k" && value.is_none() {
                value = Some(Self::parse_value(reader, ctx)?);
            } else {
                reader.skip_value()?;
            }
        }
        reader.end_object()?;
        value.ok_or(LottieError::MissingRequiredKey { key: "k" })
    }

    /// Parses the value of `k`: a static point or an array of keyframes.
    pub fn parse_value(reader: &mut dyn TokenReader, ctx: &CompositionContext) -> Result<Self> {
        let scale = ctx.scale;
        if reader.peek() != TokenKind::BeginArray {
            return Ok(Self::new_static(PointParser.parse(reader, scale)?));
        }

        reader.begin_array()?;
        match reader.peek() {
            TokenKind::EndArray => {
                reader.end_array()?;
                return Ok(Self::new_static(Vec2::ZERO));
            }
            TokenKind::BeginObject => {}
            _ => {
                let point = PointParser.from_elements(reader, scale)?;
                while reader.has_next() {
                    reader.skip_value()?;
                }
                reader.end_array()?;
                return Ok(Self::new_static(point));
            }
        }

        let mut raws = Vec::new();
        while reader.has_next() {
            raws.push(parse_raw_keyframe(reader, &PointParser, scale)?);
        }
        reader.end_array()?;
        Self::from_keyframes(&raws, ctx)
    }

    fn from_keyframes(raws: &[RawKeyframe<Vec2>], ctx: &CompositionContext) -> Result<Self> {
        let range = FrameRange::from_keyframes(raws)?;
        let frames = resolve_frames(raws);

        let mut assembly = PathAssembly::default();
        for (index, (raw, frame)) in raws.iter().zip(&frames).enumerate() {
            let next_start = raws.get(index + 1).and_then(|next| next.start);
            let is_last = index + 1 == raws.len();
            assembly.step(index, raw, range.percentage(*frame), next_start, is_last)?;
        }

        let initial_point = assembly.path.start_point();
        let value = Self {
            initial_point,
            path: assembly.path,
            easings: assembly.easings,
            key_times: assembly.key_times,
            keyframe_count: raws.len(),
            duration_ms: ctx.span_ms(range.duration_frames()),
            start_delay_ms: ctx.frames_to_ms(range.start),
        };
        debug!(
            keyframes = value.keyframe_count,
            segments = value.path.segments().len(),
            duration_ms = value.duration_ms,
            start_delay_ms = value.start_delay_ms,
            "assembled keyframed path"
        );
        Ok(value)
    }

    pub fn initial_point(&self) -> Vec2 {
        self.initial_point
    }

    pub fn path(&self) -> &SegmentedPath {
        &self.path
    }

    /// One easing per path segment.
    pub fn easings(&self) -> &[Easing] {
        &self.easings
    }

    /// Time markers bounding the segments, including hold padding markers.
    pub fn key_times(&self) -> &[f32] {
        &self.key_times
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframe_count
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub fn start_delay_ms(&self) -> i64 {
        self.start_delay_ms
    }

    pub fn has_animation(&self) -> bool {
        self.path.has_segments()
    }

    pub fn evaluate(&self, progress: f32) -> Vec2 {
        if !self.has_animation() {
            return self.initial_point;
        }
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if progress >= 1.0 {
            return self.path.end_point();
        }

        // Segment k spans markers k and k + 1.
        let idx = self.key_times.partition_point(|&t| t <= progress);
        if idx == 0 {
            return self.path.start_point();
        }
        if idx >= self.key_times.len() {
            return self.path.end_point();
        }
        let segment = idx - 1;
        let span = self.key_times[idx] - self.key_times[segment];
        if span <= 0.0 {
            return self.path.point_on_segment(segment, 1.0);
        }
        let local = (progress - self.key_times[segment]) / span;
        let eased = self
            .easings
            .get(segment)
            .copied()
            .unwrap_or_default()
            .ease(local);
        self.path.point_on_segment(segment, eased)
    }

    pub fn build_animation(&self) -> Box<dyn KeyframeAnimation<Vec2>> {
        if !self.has_animation() {
            return Box::new(StaticKeyframeAnimation::new(self.initial_point));
        }
        Box::new(PathKeyframeAnimation {
            value: self.clone(),
        })
    }
}

/// Time-driven provider moving along an assembled path.
#[derive(Debug, Clone)]
pub struct PathKeyframeAnimation {
    value: AnimatablePathValue,
}

impl KeyframeAnimation<Vec2> for PathKeyframeAnimation {
    fn value_at(&self, progress: f32) -> Vec2 {
        self.value.evaluate(progress)
    }

    fn start_delay_ms(&self) -> i64 {
        self.value.start_delay_ms()
    }

    fn duration_ms(&self) -> i64 {
        self.value.duration_ms()
    }
}

/// A position whose `x` and `y` are animated independently.
#[derive(Debug, Clone)]
pub struct SplitDimensionPathValue {
    x: AnimatableValue<f32>,
    y: AnimatableValue<f32>,
}

impl SplitDimensionPathValue {
    pub fn new(x: AnimatableValue<f32>, y: AnimatableValue<f32>) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> &AnimatableValue<f32> {
        &self.x
    }

    pub fn y(&self) -> &AnimatableValue<f32> {
        &self.y
    }

    pub fn initial_point(&self) -> Vec2 {
        Vec2::new(*self.x.initial_value(), *self.y.initial_value())
    }

    pub fn has_animation(&self) -> bool {
        self.x.has_animation() || self.y.has_animation()
    }

    /// Both axes are sampled at the same progress.
    pub fn evaluate(&self, progress: f32) -> Vec2 {
        Vec2::new(self.x.evaluate(progress), self.y.evaluate(progress))
    }

    pub fn duration_ms(&self) -> i64 {
        self.x.duration_ms().max(self.y.duration_ms())
    }

    pub fn start_delay_ms(&self) -> i64 {
        match (self.x.has_animation(), self.y.has_animation()) {
            (true, true) => self.x.start_delay_ms().min(self.y.start_delay_ms()),
            (true, false) => self.x.start_delay_ms(),
            (false, true) => self.y.start_delay_ms(),
            (false, false) => 0,
        }
    }

    pub fn build_animation(&self) -> Box<dyn KeyframeAnimation<Vec2>> {
        if !self.has_animation() {
            return Box::new(StaticKeyframeAnimation::new(self.initial_point()));
        }
        Box::new(SplitDimensionAnimation {
            value: self.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SplitDimensionAnimation {
    value: SplitDimensionPathValue,
}

impl KeyframeAnimation<Vec2> for SplitDimensionAnimation {
    fn value_at(&self, progress: f32) -> Vec2 {
        self.value.evaluate(progress)
    }

    fn start_delay_ms(&self) -> i64 {
        self.value.start_delay_ms()
    }

    fn duration_ms(&self) -> i64 {
        self.value.duration_ms()
    }
}

/// A position property, either one path or two per-axis values.
#[derive(Debug, Clone)]
pub enum PositionValue {
    Path(AnimatablePathValue),
    Split(SplitDimensionPathValue),
}

impl PositionValue {
    /// Parses a position property object. `k` selects the path form; without
    /// it the property must carry both `x` and `y`.
    pub fn parse(reader: &mut dyn TokenReader, ctx: &CompositionContext) -> Result<Self> {
        let mut path = None;
        let mut x = None;
        let mut y = None;
        reader.begin_object()?;
        while reader.has_next() {
            let name = reader.next_name()?;
            match name.as_str() {
                "k" if path.is_none() => {
                    path = Some(AnimatablePathValue::parse_value(reader, ctx)?);
                }
                "x" if x.is_none() => {
                    x = Some(AnimatableValue::parse(reader, &FloatParser, ctx, true)?);
                }
                "y" if y.is_none() => {
                    y = Some(AnimatableValue::parse(reader, &FloatParser, ctx, true)?);
                }
                _ => {
                    trace!(key = %name, "skipping position key");
                    reader.skip_value()?;
                }
            }
        }
        reader.end_object()?;

        if let Some(path) = path {
            return Ok(PositionValue::Path(path));
        }
        match (x, y) {
            (Some(x), Some(y)) => {
                debug!("position has no \"k\", using split dimensions");
                Ok(PositionValue::Split(SplitDimensionPathValue::new(x, y)))
            }
            _ => Err(LottieError::MissingRequiredKey { key: "k" }),
        }
    }

    pub fn initial_point(&self) -> Vec2 {
        match self {
            PositionValue::Path(path) => path.initial_point(),
            PositionValue::Split(split) => split.initial_point(),
        }
    }

    pub fn has_animation(&self) -> bool {
        match self {
            PositionValue::Path(path) => path.has_animation(),
            PositionValue::Split(split) => split.has_animation(),
        }
    }

    pub fn evaluate(&self, progress: f32) -> Vec2 {
        match self {
            PositionValue::Path(path) => path.evaluate(progress),
            PositionValue::Split(split) => split.evaluate(progress),
        }
    }

    pub fn build_animation(&self) -> Box<dyn KeyframeAnimation<Vec2>> {
        match self {
            PositionValue::Path(path) => path.build_animation(),
            PositionValue::Split(split) => split.build_animation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottie_data::JsonTokenReader;
    use serde_json::json;

    fn ctx() -> CompositionContext {
        CompositionContext::new(30.0, 1.0)
    }

    fn parse_path(k: serde_json::Value) -> Result<AnimatablePathValue> {
        let mut reader = JsonTokenReader::new(&json!({ "a": 1, "k": k }));
        AnimatablePathValue::parse(&mut reader, &ctx())
    }

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-2,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_static_point() {
        let value = parse_path(json!([100, 50, 0])).unwrap();
        assert!(!value.has_animation());
        assert_eq!(value.initial_point(), Vec2::new(100.0, 50.0));
        assert_eq!(value.evaluate(0.7), Vec2::new(100.0, 50.0));
        assert!(value.build_animation().is_static());
    }

    #[test]
    fn test_empty_keyframes_are_static() {
        let value = parse_path(json!([])).unwrap();
        assert!(!value.has_animation());
        assert!(value.path().segments().is_empty());
    }

    #[test]
    fn test_linear_segments() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0], "e": [100, 0]},
            {"t": 15, "s": [100, 0], "e": [100, 100]},
            {"t": 30}
        ]))
        .unwrap();
        assert_eq!(value.duration_ms(), 1000);
        assert_eq!(value.path().segments().len(), 2);
        assert_eq!(value.easings().len(), 2);
        assert_eq!(value.key_times(), &[0.0, 0.5, 1.0]);
        assert_close(value.evaluate(0.0), Vec2::ZERO);
        assert_close(value.evaluate(0.25), Vec2::new(50.0, 0.0));
        assert_close(value.evaluate(0.75), Vec2::new(100.0, 50.0));
        assert_close(value.evaluate(1.0), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_modern_format_without_end_values() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0]},
            {"t": 30, "s": [60, 0]}
        ]))
        .unwrap();
        assert_eq!(value.path().segments().len(), 1);
        assert_close(value.evaluate(0.5), Vec2::new(30.0, 0.0));
    }

    #[test]
    fn test_last_keyframe_end_value_is_reached() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0], "e": [10, 0]},
            {"t": 10, "s": [10, 0], "e": [20, 0]}
        ]))
        .unwrap();
        assert_eq!(value.path().segments().len(), 2);
        assert_eq!(value.easings().len(), 2);
        assert_eq!(value.key_times(), &[0.0, 1.0, 1.0]);
        assert_close(value.evaluate(0.5), Vec2::new(5.0, 0.0));
        assert_eq!(value.evaluate(1.0), Vec2::new(20.0, 0.0));

        // Same data as a plain value ends in the same place.
        let mut reader = JsonTokenReader::new(&json!({"k": [
            {"t": 0, "s": [0], "e": [10]},
            {"t": 10, "s": [10], "e": [20]}
        ]}));
        let scalar = AnimatableValue::parse(&mut reader, &FloatParser, &ctx(), true).unwrap();
        assert_eq!(scalar.evaluate(1.0), value.evaluate(1.0).x);
    }

    #[test]
    fn test_last_hold_ignores_end_value() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0]},
            {"t": 10, "s": [10, 0], "e": [99, 99], "h": 1}
        ]))
        .unwrap();
        assert_eq!(value.key_times().len(), value.path().segments().len() + 1);
        assert_eq!(value.evaluate(1.0), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_tangents_make_cubic_segment() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0], "e": [100, 0], "to": [0, 50], "ti": [0, 50]},
            {"t": 30}
        ]))
        .unwrap();
        match value.path().segments()[0] {
            PathSeg::Cubic(cubic) => {
                assert_eq!(cubic.p1, Point::new(0.0, 50.0));
                assert_eq!(cubic.p2, Point::new(100.0, 50.0));
                assert_eq!(cubic.p3, Point::new(100.0, 0.0));
            }
            other => panic!("expected a cubic, got {other:?}"),
        }
        // The midpoint by arc length of a symmetric arch is its apex.
        let mid = value.evaluate(0.5);
        assert!((mid.x - 50.0).abs() < 0.5);
        assert!(mid.y > 30.0);
    }

    #[test]
    fn test_zero_tangents_make_line() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0], "e": [10, 0], "to": [0, 0], "ti": [5, 5]},
            {"t": 30}
        ]))
        .unwrap();
        assert!(matches!(value.path().segments()[0], PathSeg::Line(_)));
    }

    #[test]
    fn test_segment_easing_from_handles() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0], "e": [100, 0], "o": {"x": 0.5, "y": 0}, "i": {"x": 0.5, "y": 1}},
            {"t": 30}
        ]))
        .unwrap();
        assert!(matches!(value.easings()[0], Easing::CubicBezier { .. }));
        assert!(value.evaluate(0.25).x < 25.0);
        let mid = value.evaluate(0.5);
        assert!((mid.x - 50.0).abs() < 0.5);
        assert_eq!(mid.y, 0.0);
    }

    #[test]
    fn test_hold_inserts_padding_marker() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0], "e": [100, 0]},
            {"t": 10, "s": [100, 0], "h": 1},
            {"t": 20, "s": [0, 100], "e": [50, 50]},
            {"t": 30}
        ]))
        .unwrap();

        let times = value.key_times();
        assert_eq!(times.len(), value.keyframe_count() + 1);
        assert_eq!(value.path().segments().len(), value.easings().len());
        assert_eq!(times.len(), value.path().segments().len() + 1);
        let pad = times[2];
        assert!(pad > times[1]);
        assert!(pad < times[3]);
        assert!((times[3] - pad - HOLD_EPSILON).abs() < 1e-6);

        // Holds until the next keyframe, then jumps.
        assert_close(value.evaluate(0.4), Vec2::new(100.0, 0.0));
        assert_close(value.evaluate(0.66), Vec2::new(100.0, 0.0));
        assert_close(value.evaluate(times[3]), Vec2::new(0.0, 100.0));
        assert_close(value.evaluate(5.0 / 6.0), Vec2::new(25.0, 75.0));
        assert_close(value.evaluate(1.0), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_first_keyframe_hold() {
        let value = parse_path(json!([
            {"t": 0, "s": [10, 10], "h": 1},
            {"t": 10, "s": [20, 20]}
        ]))
        .unwrap();
        assert!(value.has_animation());
        assert_close(value.evaluate(0.5), Vec2::new(10.0, 10.0));
        assert_close(value.evaluate(0.999), Vec2::new(10.0, 10.0));
        assert_close(value.evaluate(1.0), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_markers_strictly_increase_without_holds() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0]},
            {"t": 3, "s": [1, 0]},
            {"t": 9, "s": [2, 0]},
            {"t": 30, "s": [3, 0]}
        ]))
        .unwrap();
        assert!(value.key_times().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_first_vertex_is_malformed() {
        assert!(matches!(
            parse_path(json!([{"t": 0}, {"t": 10, "s": [1, 1]}])),
            Err(LottieError::MalformedValue {
                expected: "point",
                ..
            })
        ));
        assert!(matches!(
            parse_path(json!([{"t": 0, "s": "here"}, {"t": 10, "s": [1, 1]}])),
            Err(LottieError::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_path_requires_k() {
        let mut reader = JsonTokenReader::new(&json!({"a": 0}));
        assert!(matches!(
            AnimatablePathValue::parse(&mut reader, &ctx()),
            Err(LottieError::MissingRequiredKey { key: "k" })
        ));
    }

    #[test]
    fn test_scaled_path() {
        let mut reader = JsonTokenReader::new(&json!({"k": [
            {"t": 0, "s": [1, 2]},
            {"t": 30, "s": [3, 4]}
        ]}));
        let value =
            AnimatablePathValue::parse(&mut reader, &CompositionContext::new(30.0, 2.0)).unwrap();
        assert_eq!(value.initial_point(), Vec2::new(2.0, 4.0));
        assert_close(value.evaluate(1.0), Vec2::new(6.0, 8.0));
    }

    #[test]
    fn test_split_dimension_position() {
        let mut reader = JsonTokenReader::new(&json!({
            "s": true,
            "x": {"a": 1, "k": [{"t": 0, "s": [0]}, {"t": 30, "s": [100]}]},
            "y": {"a": 0, "k": 40}
        }));
        let position = PositionValue::parse(&mut reader, &ctx()).unwrap();
        let PositionValue::Split(split) = &position else {
            panic!("expected split dimensions");
        };
        assert_eq!(split.duration_ms(), 1000);
        assert_eq!(split.start_delay_ms(), 0);
        assert_eq!(position.initial_point(), Vec2::new(0.0, 40.0));
        assert_eq!(position.evaluate(0.5), Vec2::new(50.0, 40.0));

        let animation = position.build_animation();
        assert!(!animation.is_static());
        assert_eq!(animation.value_at(1.0), Vec2::new(100.0, 40.0));
    }

    #[test]
    fn test_position_prefers_path() {
        let mut reader = JsonTokenReader::new(&json!({"x": {"k": 1}, "k": [5, 6]}));
        let position = PositionValue::parse(&mut reader, &ctx()).unwrap();
        assert!(matches!(position, PositionValue::Path(_)));
        assert_eq!(position.initial_point(), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_position_without_k_or_axes() {
        let mut reader = JsonTokenReader::new(&json!({"x": {"k": 1}}));
        assert!(matches!(
            PositionValue::parse(&mut reader, &ctx()),
            Err(LottieError::MissingRequiredKey { key: "k" })
        ));
    }

    #[test]
    fn test_to_bez_path() {
        let value = parse_path(json!([
            {"t": 0, "s": [0, 0], "e": [10, 0]},
            {"t": 30}
        ]))
        .unwrap();
        let bp = value.path().to_bez_path();
        assert_eq!(bp.elements().len(), 2);
    }
}
