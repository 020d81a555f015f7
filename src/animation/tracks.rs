use crate::animation::values::{BlendFn, Interpolatable};
use crate::errors::{ArmatureError, Result};

/// A sparse time→value curve: sorted keyframe times, parallel values, and a
/// blend strategy applied between bracketing keyframes.
///
/// Tracks are immutable after construction and queried with [`sample`].
///
/// # Looping
///
/// Every track loops with a period equal to its last keyframe time: the query
/// time is wrapped by Euclidean modulo before bracketing, so
/// `sample(t) == sample(t + k * duration)` for any integer `k`. This is a
/// deliberate looping policy, not a clamp. Negative query times are legal and
/// wrap into `[0, duration)` the same way.
///
/// [`sample`]: KeyframeTrack::sample
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    blend: BlendFn<T>,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track from `(time, value)` pairs, blending linearly.
    ///
    /// Pairs may arrive in any order; they are sorted by time. Fails on an
    /// empty key set, a non-finite time, or two keys sharing a time.
    pub fn new(keys: impl IntoIterator<Item = (f32, T)>) -> Result<Self> {
        Self::with_blend(keys, T::interpolate_linear)
    }

    /// Builds a track with an explicit blend strategy, e.g.
    /// [`step`](crate::animation::step) or a custom easing function.
    pub fn with_blend(
        keys: impl IntoIterator<Item = (f32, T)>,
        blend: BlendFn<T>,
    ) -> Result<Self> {
        let mut keys: Vec<(f32, T)> = keys.into_iter().collect();
        if keys.is_empty() {
            return Err(ArmatureError::EmptyTrack);
        }
        for &(time, _) in &keys {
            if !time.is_finite() {
                return Err(ArmatureError::NonFiniteKeyTime(time));
            }
        }

        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in keys.windows(2) {
            if pair[0].0 >= pair[1].0 {
                return Err(ArmatureError::DuplicateKeyTime(pair[1].0));
            }
        }

        let (times, values) = keys.into_iter().unzip();
        Ok(Self {
            times,
            values,
            blend,
        })
    }

    /// Sorted keyframe times.
    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Keyframe values, parallel to [`times`](KeyframeTrack::times).
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Last keyframe time, which is also the track's looping period.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Computes the interpolated value at `time`.
    ///
    /// See the type-level docs for the looping policy. A single-key track
    /// returns its value for every query time.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        let last = self.times.len() - 1;
        if last == 0 {
            return self.values[0];
        }

        let period = self.times[last];
        if period <= 0.0 {
            // All keys at or below time zero: nothing to loop over.
            return self.values[last];
        }

        let time = time.rem_euclid(period);
        if time < self.times[0] {
            return self.values[0];
        }

        // First index with times[next] > time; the clamp guards non-finite
        // query times, which compare false everywhere.
        let next = self.times.partition_point(|&t| t <= time).clamp(1, last);
        let (t0, t1) = (self.times[next - 1], self.times[next]);
        let fraction = (time - t0) / (t1 - t0);
        (self.blend)(self.values[next - 1], self.values[next], fraction)
    }
}
