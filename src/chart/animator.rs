//! Decay-rate value animation
//!
//! Each tick moves every displayed value a fixed fraction of the remaining
//! distance to its target, snapping once the distance drops below epsilon so
//! the animation terminates instead of approaching forever.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Tuning for a decay-rate animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// Fraction of the remaining distance covered per tick
    pub rate: f64,
    /// Distance below which a value snaps to its target
    pub epsilon: f64,
    /// Tick period
    #[serde(with = "duration_ms")]
    pub tick: Duration,
}

impl AnimatorConfig {
    pub fn new(rate: f64, epsilon: f64) -> Self {
        Self {
            rate: rate.clamp(f64::EPSILON, 1.0),
            epsilon: epsilon.max(0.0),
            ..Self::default()
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            rate: 0.1,
            epsilon: 0.5,
            tick: Duration::from_millis(50),
        }
    }
}

/// One interpolation step: `current += (target - current) * rate`, with snap.
///
/// A step too small to change `current` also snaps, so a zero epsilon still
/// settles instead of stalling one ulp short of the target.
pub fn step_toward(current: f64, target: f64, config: &AnimatorConfig) -> f64 {
    let diff = target - current;
    if diff.abs() < config.epsilon {
        return target;
    }
    let next = current + diff * config.rate;
    if next == current {
        target
    } else {
        next
    }
}

/// Index-keyed animated value set
#[derive(Debug, Clone)]
pub struct Animator {
    config: AnimatorConfig,
    targets: Vec<f64>,
    displayed: Vec<f64>,
}

impl Animator {
    /// Create an animator with no display history; the first tick zero-fills
    pub fn new(targets: Vec<f64>, config: AnimatorConfig) -> Self {
        Self {
            config,
            targets,
            displayed: Vec::new(),
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Currently displayed values (empty until the first tick)
    pub fn displayed(&self) -> &[f64] {
        &self.displayed
    }

    /// Displayed value at `index`, 0 when not yet initialised
    pub fn value(&self, index: usize) -> f64 {
        self.displayed.get(index).copied().unwrap_or(0.0)
    }

    /// Swap the target set.
    ///
    /// Equal length keeps the displayed values so the animation continues
    /// from wherever it currently is. A length change drops the history and
    /// the next tick grows from zero again.
    pub fn set_targets(&mut self, targets: Vec<f64>) {
        if targets.len() != self.displayed.len() {
            self.displayed.clear();
        }
        self.targets = targets;
    }

    /// Advance one tick. Returns `true` if any displayed value changed.
    pub fn tick(&mut self) -> bool {
        if self.displayed.len() != self.targets.len() {
            self.displayed = vec![0.0; self.targets.len()];
            return !self.targets.is_empty();
        }

        let mut changed = false;
        for (current, &target) in self.displayed.iter_mut().zip(&self.targets) {
            let next = step_toward(*current, target, &self.config);
            if next != *current {
                *current = next;
                changed = true;
            }
        }
        changed
    }

    /// True once every displayed value equals its target
    pub fn is_settled(&self) -> bool {
        self.displayed.len() == self.targets.len()
            && self
                .displayed
                .iter()
                .zip(&self.targets)
                .all(|(current, target)| current == target)
    }

    /// Tick until settled or `max_ticks` is reached; returns ticks taken
    pub fn run_to_rest(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.is_settled() && ticks < max_ticks {
            self.tick();
            ticks += 1;
        }
        ticks
    }
}

/// String-keyed animated value set; keys without history start at zero
#[derive(Debug, Clone, Default)]
pub struct KeyedAnimator {
    config: AnimatorConfig,
    targets: Vec<(String, f64)>,
    displayed: HashMap<String, f64>,
}

impl KeyedAnimator {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
            displayed: HashMap::new(),
        }
    }

    /// Replace the targets; displayed values for surviving keys are kept
    pub fn set_targets<I, K>(&mut self, targets: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.targets = targets.into_iter().map(|(k, v)| (k.into(), v)).collect();
    }

    pub fn value(&self, key: &str) -> f64 {
        self.displayed.get(key).copied().unwrap_or(0.0)
    }

    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for (key, target) in &self.targets {
            let current = self.value(key);
            let next = step_toward(current, *target, &self.config);
            if next != current || !self.displayed.contains_key(key) {
                self.displayed.insert(key.clone(), next);
                changed = true;
            }
        }
        changed
    }

    pub fn is_settled(&self) -> bool {
        self.targets
            .iter()
            .all(|(key, target)| self.displayed.get(key) == Some(target))
    }
}

/// Anything advanced by a fixed-period animation timer
pub trait Animate {
    /// Advance one tick; `true` if anything changed
    fn tick(&mut self) -> bool;

    fn is_settled(&self) -> bool;
}

impl Animate for Animator {
    fn tick(&mut self) -> bool {
        Animator::tick(self)
    }

    fn is_settled(&self) -> bool {
        Animator::is_settled(self)
    }
}

impl Animate for KeyedAnimator {
    fn tick(&mut self) -> bool {
        KeyedAnimator::tick(self)
    }

    fn is_settled(&self) -> bool {
        KeyedAnimator::is_settled(self)
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_zero_fills() {
        let mut animator = Animator::new(vec![10.0, 20.0], AnimatorConfig::default());
        assert!(animator.displayed().is_empty());
        animator.tick();
        assert_eq!(animator.displayed(), &[0.0, 0.0]);
    }

    #[test]
    fn test_converges_from_zero() {
        let config = AnimatorConfig::new(0.1, 0.5);
        let mut animator = Animator::new(vec![0.0, 100.0], config);
        let ticks = animator.run_to_rest(500);
        assert!(ticks < 500);
        assert!((animator.value(0) - 0.0).abs() < 0.5);
        assert!((animator.value(1) - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_idempotent_at_rest() {
        let mut animator = Animator::new(vec![3.0, 7.0, 11.0], AnimatorConfig::default());
        animator.run_to_rest(1000);
        assert!(animator.is_settled());

        let before = animator.displayed().to_vec();
        assert!(!animator.tick());
        assert_eq!(animator.displayed(), before.as_slice());
    }

    #[test]
    fn test_step_moves_fraction_of_distance() {
        let config = AnimatorConfig::new(0.1, 0.5);
        assert!((step_toward(0.0, 100.0, &config) - 10.0).abs() < 1e-9);
        assert_eq!(step_toward(99.8, 100.0, &config), 100.0);
    }

    #[test]
    fn test_zero_epsilon_still_settles() {
        let mut animator = Animator::new(vec![1.0e9, 35_000.0], AnimatorConfig::new(0.1, 0.0));
        let ticks = animator.run_to_rest(10_000);
        assert!(ticks < 10_000);
        assert!(animator.is_settled());
        assert_eq!(animator.displayed(), &[1.0e9, 35_000.0]);
    }

    #[test]
    fn test_retarget_equal_length_keeps_displayed() {
        let mut animator = Animator::new(vec![100.0, 100.0], AnimatorConfig::default());
        for _ in 0..10 {
            animator.tick();
        }
        let mid = animator.value(0);
        assert!(mid > 0.0 && mid < 100.0);

        animator.set_targets(vec![10.0, 10.0]);
        assert_eq!(animator.value(0), mid);
        animator.tick();
        assert!(animator.value(0) < mid);
        assert!(animator.value(0) > 10.0);
    }

    #[test]
    fn test_retarget_new_length_regrows_from_zero() {
        let mut animator = Animator::new(vec![50.0], AnimatorConfig::default());
        animator.run_to_rest(1000);
        animator.set_targets(vec![5.0, 6.0]);
        animator.tick();
        assert_eq!(animator.displayed(), &[0.0, 0.0]);
    }

    #[test]
    fn test_empty_targets_settle_immediately() {
        let mut animator = Animator::new(Vec::new(), AnimatorConfig::default());
        assert!(animator.is_settled());
        assert!(!animator.tick());
    }

    #[test]
    fn test_keyed_missing_keys_start_at_zero() {
        let mut keyed = KeyedAnimator::new(AnimatorConfig::new(0.1, 0.1));
        keyed.set_targets([("views", 1000.0), ("likes", 50.0)]);
        keyed.tick();
        assert!((keyed.value("views") - 100.0).abs() < 1e-9);
        assert!((keyed.value("likes") - 5.0).abs() < 1e-9);

        keyed.set_targets([("views", 1000.0), ("engagement", 4.2)]);
        keyed.tick();
        assert!((keyed.value("views") - 190.0).abs() < 1e-9);
        assert!((keyed.value("engagement") - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_keyed_settles() {
        let mut keyed = KeyedAnimator::new(AnimatorConfig::new(0.1, 0.1));
        keyed.set_targets([("a", 12.5)]);
        for _ in 0..1000 {
            keyed.tick();
        }
        assert!(keyed.is_settled());
        assert_eq!(keyed.value("a"), 12.5);
    }
}
