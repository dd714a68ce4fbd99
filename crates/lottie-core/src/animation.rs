//! Providers handed to the rendering layer. Each one maps progress through
//! its animation to a value and reports when, in wall-clock time, it runs.

use crate::animatable::{AnimatableValue, Interpolatable};

pub trait KeyframeAnimation<T>: Send + Sync {
    /// Value at `progress` in [0, 1]; values outside are clamped.
    fn value_at(&self, progress: f32) -> T;

    fn start_delay_ms(&self) -> i64;

    fn duration_ms(&self) -> i64;

    fn is_static(&self) -> bool {
        false
    }

    /// Value at `time_ms` on the composition clock, before progress
    /// normalization: the start delay is subtracted and the remainder divided
    /// by the duration.
    fn value_at_time(&self, time_ms: i64) -> T {
        let duration = self.duration_ms();
        if duration <= 0 {
            return self.value_at(0.0);
        }
        let progress = (time_ms - self.start_delay_ms()) as f32 / duration as f32;
        self.value_at(progress.clamp(0.0, 1.0))
    }
}

/// Constant provider for values without keyframes.
#[derive(Debug, Clone)]
pub struct StaticKeyframeAnimation<T> {
    value: T,
}

impl<T> StaticKeyframeAnimation<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Send + Sync> KeyframeAnimation<T> for StaticKeyframeAnimation<T> {
    fn value_at(&self, _progress: f32) -> T {
        self.value.clone()
    }

    fn start_delay_ms(&self) -> i64 {
        0
    }

    fn duration_ms(&self) -> i64 {
        0
    }

    fn is_static(&self) -> bool {
        true
    }
}

/// Time-driven provider interpolating between keyframe values.
#[derive(Debug, Clone)]
pub struct ValueKeyframeAnimation<T> {
    value: AnimatableValue<T>,
}

impl<T: Interpolatable> ValueKeyframeAnimation<T> {
    pub fn new(value: AnimatableValue<T>) -> Self {
        Self { value }
    }
}

impl<T: Interpolatable> KeyframeAnimation<T> for ValueKeyframeAnimation<T> {
    fn value_at(&self, progress: f32) -> T {
        self.value.evaluate(progress)
    }

    fn start_delay_ms(&self) -> i64 {
        self.value.start_delay_ms()
    }

    fn duration_ms(&self) -> i64 {
        self.value.duration_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::CompositionContext;
    use crate::parser::FloatParser;
    use lottie_data::JsonTokenReader;
    use serde_json::json;

    #[test]
    fn test_value_at_time_applies_delay() {
        let mut reader = JsonTokenReader::new(&json!({"k": [
            {"t": 10, "s": [0]},
            {"t": 20, "s": [100]}
        ]}));
        let value = AnimatableValue::parse(
            &mut reader,
            &FloatParser,
            &CompositionContext::new(10.0, 1.0),
            false,
        )
        .unwrap();
        let animation = ValueKeyframeAnimation::new(value);
        assert_eq!(animation.start_delay_ms(), 1000);
        assert_eq!(animation.duration_ms(), 1000);
        assert_eq!(animation.value_at_time(0), 0.0);
        assert_eq!(animation.value_at_time(1500), 50.0);
        assert_eq!(animation.value_at_time(5000), 100.0);
    }

    #[test]
    fn test_static_ignores_time() {
        let animation = StaticKeyframeAnimation::new(3.5f32);
        assert!(animation.is_static());
        assert_eq!(animation.value_at_time(12_000), 3.5);
    }

    #[test]
    fn test_providers_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn KeyframeAnimation<f32>>();
        assert_send_sync::<ValueKeyframeAnimation<glam::Vec2>>();
    }
}
