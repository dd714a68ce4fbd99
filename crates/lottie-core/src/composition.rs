use lottie_data::model::CompositionHeader;
use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_FRAME_RATE: f32 = 60.0;

/// Read-only settings of the owning composition, consumed while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionContext {
    /// Frames per second used to convert keyframe frames to milliseconds.
    pub frame_rate: f32,
    /// Factor applied to values measured in pixels.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Default for CompositionContext {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            scale: 1.0,
        }
    }
}

impl CompositionContext {
    /// A frame rate that is not a positive finite number is replaced by the
    /// default of 60.
    pub fn new(frame_rate: f32, scale: f32) -> Self {
        let frame_rate = if is_valid_frame_rate(frame_rate) {
            frame_rate
        } else {
            warn!(frame_rate, "invalid frame rate, using default");
            DEFAULT_FRAME_RATE
        };
        Self { frame_rate, scale }
    }

    pub fn from_header(header: &CompositionHeader) -> Self {
        Self::new(header.fr, 1.0)
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Scale for a value: the composition scale for pixel values, 1 otherwise.
    pub fn scale_for(&self, scaled: bool) -> f32 {
        if scaled {
            self.scale
        } else {
            1.0
        }
    }

    /// Frame rate used for time conversion. Contexts deserialized with an
    /// unusable rate fall back to the default.
    pub fn effective_frame_rate(&self) -> f32 {
        if is_valid_frame_rate(self.frame_rate) {
            self.frame_rate
        } else {
            DEFAULT_FRAME_RATE
        }
    }

    /// Wall-clock milliseconds covered by `frames`, truncated.
    pub fn frames_to_ms(&self, frames: i64) -> i64 {
        (frames as f64 / self.effective_frame_rate() as f64 * 1000.0) as i64
    }

    /// Length of a keyframe span. A non-empty span lasts at least 1 ms even
    /// when truncation would round it away.
    pub fn span_ms(&self, frames: i64) -> i64 {
        if frames <= 0 {
            return 0;
        }
        self.frames_to_ms(frames).max(1)
    }
}

fn is_valid_frame_rate(frame_rate: f32) -> bool {
    frame_rate.is_finite() && frame_rate > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_to_ms_truncates() {
        let ctx = CompositionContext::new(30.0, 1.0);
        assert_eq!(ctx.frames_to_ms(30), 1000);
        assert_eq!(ctx.frames_to_ms(1), 33);
        assert_eq!(ctx.frames_to_ms(0), 0);
    }

    #[test]
    fn test_invalid_frame_rate_falls_back() {
        for rate in [0.0, -24.0, f32::NAN, f32::INFINITY] {
            let ctx = CompositionContext::new(rate, 1.0);
            assert_eq!(ctx.frame_rate, 60.0);
            assert_eq!(ctx.frames_to_ms(60), 1000);
        }

        let ctx: CompositionContext = serde_json::from_str(r#"{"frame_rate": 0}"#).unwrap();
        assert_eq!(ctx.effective_frame_rate(), 60.0);
        assert_eq!(ctx.span_ms(30), 500);
    }

    #[test]
    fn test_span_ms_never_truncates_to_zero() {
        let ctx = CompositionContext::new(10_000.0, 1.0);
        assert_eq!(ctx.frames_to_ms(1), 0);
        assert_eq!(ctx.span_ms(1), 1);
        assert_eq!(ctx.span_ms(0), 0);
        assert_eq!(ctx.span_ms(20_000), 2000);
    }

    #[test]
    fn test_from_header() {
        let header = CompositionHeader::from_json_str(
            r#"{"fr": 24, "ip": 0, "op": 48, "w": 10, "h": 10}"#,
        )
        .unwrap();
        let ctx = CompositionContext::from_header(&header).with_scale(2.0);
        assert_eq!(ctx.frame_rate, 24.0);
        assert_eq!(ctx.scale_for(true), 2.0);
        assert_eq!(ctx.scale_for(false), 1.0);
    }

    #[test]
    fn test_scale_defaults_when_deserialized() {
        let ctx: CompositionContext = serde_json::from_str(r#"{"frame_rate": 25}"#).unwrap();
        assert_eq!(ctx, CompositionContext::new(25.0, 1.0));
    }
}
