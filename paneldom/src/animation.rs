use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::transitions::TransitionConfig;

/// A single in-flight value animation.
#[derive(Debug, Clone)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    config: TransitionConfig,
}

impl Tween {
    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        if self.config.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).min(1.0)
        }
    }

    fn value_at(&self, now: Instant) -> f32 {
        let eased = self.config.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    fn finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Config for a tween that interrupts this one at `from`.
    ///
    /// The duration is scaled by the distance left to `target` relative to
    /// this tween's span, so a reversal runs at the original speed.
    fn remaining_config(
        &self,
        from: f32,
        target: f32,
        config: TransitionConfig,
    ) -> TransitionConfig {
        let span = (self.to - self.from).abs();
        let fraction = ((target - from).abs() / span).clamp(0.0, 1.0);
        if span <= f32::EPSILON || !fraction.is_finite() {
            return config;
        }
        TransitionConfig {
            duration: config.duration.mul_f32(fraction),
            ..config
        }
    }
}

/// Keyed scalar animations that persist across rebuilds.
///
/// Callers describe where a value should end up every frame via
/// [`AnimationState::drive`]; a changed target starts a tween from wherever
/// the value currently is. Interrupting a running tween keeps its speed: the
/// new tween only gets the share of the duration its distance needs.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Last target requested per key.
    targets: HashMap<String, f32>,
    /// Currently active tweens per key.
    active: HashMap<String, Tween>,
    /// Reduced motion flag - when true, values jump straight to their target.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    /// Returns true if any tween is still running at `now`.
    pub fn has_active_transitions(&self, now: Instant) -> bool {
        self.active.values().any(|tween| !tween.finished(now))
    }

    /// Returns true while any tween has not yet been settled by a
    /// [`drive`](Self::drive) call, even if its duration has elapsed.
    pub fn has_pending(&self) -> bool {
        !self.active.is_empty()
    }

    /// Returns true if the tween for `key` is still running at `now`.
    pub fn is_animating(&self, key: &str, now: Instant) -> bool {
        self.active
            .get(key)
            .is_some_and(|tween| !tween.finished(now))
    }

    /// Current value for `key` heading toward `target`.
    ///
    /// The first time a key is seen it settles on the target immediately.
    pub fn drive(&mut self, key: &str, target: f32, config: TransitionConfig, now: Instant) -> f32 {
        match self.targets.insert(key.to_string(), target) {
            None => {
                self.active.remove(key);
                return target;
            }
            Some(previous) if previous != target => {
                if self.reduced_motion || config.duration.is_zero() {
                    self.active.remove(key);
                    return target;
                }
                let (from, config) = match self.active.get(key) {
                    Some(tween) => {
                        let from = tween.value_at(now);
                        (from, tween.remaining_config(from, target, config))
                    }
                    None => (previous, config),
                };
                log::trace!(
                    "tween start: {key} {from:.3} -> {target:.3} over {:?}",
                    config.duration
                );
                self.active.insert(
                    key.to_string(),
                    Tween {
                        from,
                        to: target,
                        start: now,
                        config,
                    },
                );
            }
            Some(_) => {}
        }

        match self.active.get(key) {
            Some(tween) if !tween.finished(now) => tween.value_at(now),
            Some(_) => {
                self.active.remove(key);
                target
            }
            None => target,
        }
    }

    /// Current value for `key` without changing its target.
    pub fn value(&self, key: &str, now: Instant) -> Option<f32> {
        match self.active.get(key) {
            Some(tween) => Some(tween.value_at(now)),
            None => self.targets.get(key).copied(),
        }
    }

    /// Drop state for keys that were not driven in the latest build.
    pub fn retain(&mut self, live: &HashSet<String>) {
        self.targets.retain(|key, _| live.contains(key));
        self.active.retain(|key, _| live.contains(key));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::transitions::Easing;

    fn linear(ms: u64) -> TransitionConfig {
        TransitionConfig::new(Duration::from_millis(ms), Easing::Linear)
    }

    #[test]
    fn first_drive_settles_on_target() {
        let mut state = AnimationState::new();
        let now = Instant::now();
        assert_eq!(state.drive("a", 1.0, linear(100), now), 1.0);
        assert!(!state.has_active_transitions(now));
    }

    #[test]
    fn interrupted_tween_starts_from_current_value() {
        let mut state = AnimationState::new();
        let t0 = Instant::now();
        state.drive("a", 0.0, linear(100), t0);
        state.drive("a", 1.0, linear(100), t0);

        let mid = t0 + Duration::from_millis(50);
        let halfway = state.drive("a", 1.0, linear(100), mid);
        assert!((halfway - 0.5).abs() < 0.01);

        // Reverse at the halfway point
        let back = state.drive("a", 0.0, linear(100), mid);
        assert!((back - 0.5).abs() < 0.01);
        let later = state.drive("a", 0.0, linear(100), mid + Duration::from_millis(25));
        assert!((later - 0.25).abs() < 0.01);
    }

    #[test]
    fn reversal_takes_time_proportional_to_distance() {
        let mut state = AnimationState::new();
        let t0 = Instant::now();
        state.drive("a", 0.0, linear(100), t0);
        state.drive("a", 1.0, linear(100), t0);

        let early = t0 + Duration::from_millis(10);
        state.drive("a", 0.0, linear(100), early);
        assert!(state.is_animating("a", early + Duration::from_millis(5)));
        assert!(!state.is_animating("a", early + Duration::from_millis(11)));
        assert_eq!(state.drive("a", 0.0, linear(100), early + Duration::from_millis(11)), 0.0);
    }
}
