//! Safety signal scheduling
//!
//! The signal alternates between SAFE and DANGER. Each flip draws the next
//! flip time uniformly from the level's switch window.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;

/// Current safety signal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Movement allowed (green)
    Safe,
    /// Movement ends the attempt (red)
    Danger,
}

impl Phase {
    /// The other phase
    pub fn flipped(self) -> Self {
        match self {
            Phase::Safe => Phase::Danger,
            Phase::Danger => Phase::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Safe => "GREEN",
            Phase::Danger => "RED",
        }
    }
}

/// Source of switch intervals
///
/// Implementations must return a value in `min..=max`.
pub trait IntervalSource {
    fn interval_ms(&mut self, min: u32, max: u32) -> u32;
}

/// Seeded PCG interval source (reproducible per run seed)
#[derive(Debug, Clone)]
pub struct SeededIntervals {
    rng: Pcg32,
}

impl SeededIntervals {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl IntervalSource for SeededIntervals {
    fn interval_ms(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(lo..=hi)
    }
}

/// Interval source that replays queued values
///
/// Values are clamped into the requested window. When the queue runs dry the
/// window minimum is returned.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIntervals {
    queue: VecDeque<u32>,
}

impl ScriptedIntervals {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: values.into_iter().collect(),
        }
    }

    pub fn push(&mut self, value: u32) {
        self.queue.push_back(value);
    }
}

impl IntervalSource for ScriptedIntervals {
    fn interval_ms(&mut self, min: u32, max: u32) -> u32 {
        match self.queue.pop_front() {
            Some(v) => v.clamp(min, max.max(min)),
            None => min,
        }
    }
}

/// Signal phase and the timestamp of its next flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalState {
    pub phase: Phase,
    /// Absolute time of the next flip (ms)
    pub next_flip_at: u64,
}

impl SignalState {
    /// Fresh signal for a new attempt: SAFE, next flip drawn from `now`
    pub fn start(now: u64, profile: &DifficultyProfile, rng: &mut impl IntervalSource) -> Self {
        Self {
            phase: Phase::Safe,
            next_flip_at: now + draw(profile, rng),
        }
    }

    /// Flip if `now` has reached the scheduled time. Returns true on a flip.
    ///
    /// Callers tick at most once per frame; one crossing yields one flip.
    pub fn tick(&mut self, now: u64, profile: &DifficultyProfile, rng: &mut impl IntervalSource) -> bool {
        if now < self.next_flip_at {
            return false;
        }
        self.phase = self.phase.flipped();
        self.next_flip_at = now + draw(profile, rng);
        true
    }

    pub fn is_safe(&self) -> bool {
        self.phase == Phase::Safe
    }

    /// Force a phase (testing / scripted demos); does not reschedule
    pub fn force_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

fn draw(profile: &DifficultyProfile, rng: &mut impl IntervalSource) -> u64 {
    // Window minimum is always positive, so the next flip is strictly in the future
    rng.interval_ms(profile.min_switch_ms, profile.max_switch_ms).max(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::profile_for;
    use proptest::prelude::*;

    #[test]
    fn test_start_is_safe() {
        let p = profile_for(1);
        let mut rng = ScriptedIntervals::new([1000]);
        let s = SignalState::start(500, &p, &mut rng);
        assert_eq!(s.phase, Phase::Safe);
        assert_eq!(s.next_flip_at, 1500);
    }

    #[test]
    fn test_tick_flips_once_per_crossing() {
        let p = profile_for(1);
        let mut rng = ScriptedIntervals::new([1000, 1200]);
        let mut s = SignalState::start(0, &p, &mut rng);

        assert!(!s.tick(999, &p, &mut rng));
        assert_eq!(s.phase, Phase::Safe);

        assert!(s.tick(1016, &p, &mut rng));
        assert_eq!(s.phase, Phase::Danger);
        assert_eq!(s.next_flip_at, 1016 + 1200);

        // Same timestamp again does not flip a second time
        assert!(!s.tick(1016, &p, &mut rng));
        assert_eq!(s.phase, Phase::Danger);
    }

    #[test]
    fn test_scripted_values_clamped() {
        let mut rng = ScriptedIntervals::new([10, 99_999]);
        assert_eq!(rng.interval_ms(300, 700), 300);
        assert_eq!(rng.interval_ms(300, 700), 700);
        assert_eq!(rng.interval_ms(300, 700), 300);
    }

    #[test]
    fn test_seeded_determinism() {
        let mut a = SeededIntervals::new(42);
        let mut b = SeededIntervals::new(42);
        for _ in 0..32 {
            assert_eq!(a.interval_ms(280, 650), b.interval_ms(280, 650));
        }
    }

    proptest! {
        #[test]
        fn seeded_draws_stay_in_window(seed in any::<u64>(), level in 1u32..30) {
            let p = profile_for(level);
            let mut rng = SeededIntervals::new(seed);
            for _ in 0..16 {
                let v = rng.interval_ms(p.min_switch_ms, p.max_switch_ms);
                prop_assert!(v >= p.min_switch_ms && v <= p.max_switch_ms);
            }
        }

        #[test]
        fn phase_alternates_on_every_flip(seed in any::<u64>(), steps in prop::collection::vec(1u64..2000, 1..200)) {
            let p = profile_for(5);
            let mut rng = SeededIntervals::new(seed);
            let mut s = SignalState::start(0, &p, &mut rng);
            let mut now = 0;
            let mut last = s.phase;
            for dt in steps {
                now += dt;
                let before = s.next_flip_at;
                if s.tick(now, &p, &mut rng) {
                    prop_assert_ne!(s.phase, last);
                    prop_assert!(s.next_flip_at > now);
                    last = s.phase;
                } else {
                    prop_assert_eq!(s.next_flip_at, before);
                    prop_assert_eq!(s.phase, last);
                }
            }
        }
    }
}
