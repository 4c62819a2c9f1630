//! Per-frame level simulation
//!
//! Advances one level attempt by exactly one frame.

use super::signal::{IntervalSource, Phase, SignalState};
use super::state::{FailureCause, FrameInput, GameEvent, Outcome, RunState};
use crate::clock::FrameTime;
use crate::consts::*;
use crate::heartbeat_period_ms;

/// Advance the attempt by one frame and report what happened
///
/// Call exactly once per rendered frame while the Game screen is active.
pub fn advance(
    run: &mut RunState,
    signal: &mut SignalState,
    input: &FrameInput,
    time: FrameTime,
    rng: &mut impl IntervalSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Frozen until the screen machine leaves Game
    if run.completed {
        return events;
    }

    run.level_elapsed_ms += time.dt_ms;

    run.heartbeat_elapsed_ms += time.dt_ms;
    if run.heartbeat_elapsed_ms >= heartbeat_period_ms(run.level) {
        run.heartbeat_elapsed_ms = 0;
        events.push(GameEvent::Heartbeat { level: run.level });
    }

    let profile = run.profile();
    if signal.tick(time.now_ms, &profile, rng) {
        log::debug!("Signal -> {}", signal.phase.as_str());
        events.push(GameEvent::SignalFlipped(signal.phase));
    }

    if !run.is_terminal() && input.moving {
        match signal.phase {
            Phase::Safe => run.progress += profile.advance_speed,
            Phase::Danger => {
                run.outcome = Outcome::Failed(FailureCause::Caught);
                events.push(GameEvent::PlayerCaught);
            }
        }
    }

    if !run.is_terminal() && run.time_left_ms() == 0 {
        run.outcome = Outcome::Failed(FailureCause::TimeExpired);
        events.push(GameEvent::TimeExpired);
    }

    if !run.is_terminal() && run.reached_finish() {
        run.outcome = Outcome::Cleared;
        run.transitioning = true;
        run.fade_progress = 0;
        log::info!("Level {} cleared", run.level);
        events.push(GameEvent::LevelCleared { level: run.level });
    }

    if run.cleared() && run.transitioning {
        run.fade_progress = (run.fade_progress + FADE_STEP).min(FADE_MAX);
        if run.fade_progress >= FADE_MAX {
            if run.is_final_level() {
                run.transitioning = false;
                run.completed = true;
                log::info!("Run completed");
                events.push(GameEvent::RunCompleted);
            } else {
                let next = run.level + 1;
                *run = RunState::new(next);
                *signal = SignalState::start(time.now_ms, &run.profile(), rng);
                log::info!("Advanced to level {}", next);
                events.push(GameEvent::LevelAdvanced { level: next });
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameClock;
    use crate::sim::signal::{ScriptedIntervals, SeededIntervals};
    use proptest::prelude::*;

    const MOVE: FrameInput = FrameInput { moving: true };
    const STILL: FrameInput = FrameInput { moving: false };

    fn setup(level: u32, first_interval: u32) -> (RunState, SignalState, ScriptedIntervals, FrameClock) {
        let mut rng = ScriptedIntervals::new([first_interval]);
        let run = RunState::new(level);
        let signal = SignalState::start(0, &run.profile(), &mut rng);
        (run, signal, rng, FrameClock::new())
    }

    #[test]
    fn test_safe_movement_advances() {
        let (mut run, mut signal, mut rng, mut clock) = setup(1, 1600);

        advance(&mut run, &mut signal, &MOVE, clock.tick(), &mut rng);
        assert_eq!(run.progress, 4.0);

        advance(&mut run, &mut signal, &STILL, clock.tick(), &mut rng);
        assert_eq!(run.progress, 4.0);
        assert_eq!(run.level_elapsed_ms, clock.now_ms());
    }

    #[test]
    fn test_caught_on_danger_freezes_attempt() {
        let (mut run, mut signal, mut rng, mut clock) = setup(1, 1600);
        advance(&mut run, &mut signal, &MOVE, clock.tick(), &mut rng);
        let before = run.progress;

        signal.force_phase(Phase::Danger);
        let events = advance(&mut run, &mut signal, &MOVE, clock.tick(), &mut rng);
        assert!(run.failed());
        assert_eq!(run.outcome, Outcome::Failed(FailureCause::Caught));
        assert!(events.contains(&GameEvent::PlayerCaught));

        signal.force_phase(Phase::Safe);
        for _ in 0..30 {
            let events = advance(&mut run, &mut signal, &MOVE, clock.tick(), &mut rng);
            assert!(!events.contains(&GameEvent::PlayerCaught));
            assert_eq!(run.progress, before);
        }
    }

    #[test]
    fn test_flip_applies_before_movement() {
        let (mut run, mut signal, mut rng, mut clock) = setup(1, 945);
        // Stand still until the frame that crosses the flip time
        while clock.now_ms() + 17 < signal.next_flip_at {
            advance(&mut run, &mut signal, &STILL, clock.tick(), &mut rng);
        }
        loop {
            let events = advance(&mut run, &mut signal, &MOVE, clock.tick(), &mut rng);
            if events.iter().any(|e| matches!(e, GameEvent::SignalFlipped(Phase::Danger))) {
                assert!(events.contains(&GameEvent::PlayerCaught));
                break;
            }
            assert!(!run.failed());
        }
    }

    #[test]
    fn test_time_expired_fires_once() {
        let (mut run, mut signal, mut rng, _) = setup(1, 1600);
        run.level_elapsed_ms = LEVEL_TIME_LIMIT_MS - 10;

        let t = FrameTime { now_ms: 100, dt_ms: 16 };
        let events = advance(&mut run, &mut signal, &STILL, t, &mut rng);
        assert_eq!(run.outcome, Outcome::Failed(FailureCause::TimeExpired));
        assert!(events.contains(&GameEvent::TimeExpired));

        let t = FrameTime { now_ms: 116, dt_ms: 16 };
        let events = advance(&mut run, &mut signal, &MOVE, t, &mut rng);
        assert!(!events.contains(&GameEvent::TimeExpired));
        assert!(!events.contains(&GameEvent::PlayerCaught));
    }

    #[test]
    fn test_time_expired_during_danger_without_moving() {
        let (mut run, mut signal, mut rng, _) = setup(1, 1600);
        signal.force_phase(Phase::Danger);
        run.level_elapsed_ms = LEVEL_TIME_LIMIT_MS;
        let events = advance(&mut run, &mut signal, &STILL, FrameTime { now_ms: 50, dt_ms: 16 }, &mut rng);
        assert!(run.failed());
        assert_eq!(events, vec![GameEvent::TimeExpired]);
    }

    #[test]
    fn test_clear_then_advance_level() {
        let (mut run, mut signal, mut rng, mut clock) = setup(1, 1600);
        rng.push(1000);
        run.progress = FINISH_DISTANCE - 2.0;

        let events = advance(&mut run, &mut signal, &MOVE, clock.tick(), &mut rng);
        assert!(run.cleared());
        assert!(run.transitioning);
        assert!(events.contains(&GameEvent::LevelCleared { level: 1 }));
        let cleared_at = run.progress;

        let mut advanced_at = None;
        for _ in 0..60 {
            let t = clock.tick();
            let events = advance(&mut run, &mut signal, &MOVE, t, &mut rng);
            if events.contains(&GameEvent::LevelAdvanced { level: 2 }) {
                advanced_at = Some(t.now_ms);
                break;
            }
            // Fading attempt does not move
            assert_eq!(run.progress, cleared_at);
        }

        let now = advanced_at.expect("fade should complete");
        assert_eq!(run.level, 2);
        assert_eq!(run.progress, 0.0);
        assert_eq!(run.outcome, Outcome::InProgress);
        assert_eq!(run.fade_progress, 0);
        assert_eq!(signal.phase, Phase::Safe);
        assert_eq!(signal.next_flip_at, now + 1000);
    }

    #[test]
    fn test_fade_takes_fifty_one_frames() {
        let (mut run, mut signal, mut rng, mut clock) = setup(1, 1600);
        run.progress = FINISH_DISTANCE;
        let mut frames = 0;
        loop {
            frames += 1;
            let events = advance(&mut run, &mut signal, &STILL, clock.tick(), &mut rng);
            if events.iter().any(|e| matches!(e, GameEvent::LevelAdvanced { .. })) {
                break;
            }
        }
        assert_eq!(frames, 51);
    }

    #[test]
    fn test_final_level_completes_once() {
        let (mut run, mut signal, mut rng, mut clock) = setup(MAX_LEVEL, 700);
        run.progress = FINISH_DISTANCE;

        let mut completions = 0;
        for _ in 0..200 {
            let events = advance(&mut run, &mut signal, &STILL, clock.tick(), &mut rng);
            completions += events.iter().filter(|e| **e == GameEvent::RunCompleted).count();
        }
        assert_eq!(completions, 1);
        assert!(run.completed);
        assert_eq!(run.level, MAX_LEVEL);
    }

    #[test]
    fn test_heartbeat_cadence() {
        let (mut run, mut signal, mut rng, _) = setup(1, 1600);
        let mut beats = 0;
        let mut now = 0;
        for _ in 0..105 {
            now += 10;
            let events = advance(&mut run, &mut signal, &STILL, FrameTime { now_ms: now, dt_ms: 10 }, &mut rng);
            beats += events.iter().filter(|e| matches!(e, GameEvent::Heartbeat { level: 1 })).count();
        }
        // 1050 ms at a 210 ms period
        assert_eq!(beats, 5);
    }

    proptest! {
        #[test]
        fn progress_monotone_and_frozen_when_terminal(
            seed in any::<u64>(),
            inputs in prop::collection::vec(any::<bool>(), 1..400),
        ) {
            let mut rng = SeededIntervals::new(seed);
            let mut run = RunState::new(1);
            let mut signal = SignalState::start(0, &run.profile(), &mut rng);
            let mut clock = FrameClock::new();

            for moving in inputs {
                let before = run.progress;
                let was_terminal = run.is_terminal();
                let level = run.level;
                advance(&mut run, &mut signal, &FrameInput { moving }, clock.tick(), &mut rng);
                if run.level == level {
                    prop_assert!(run.progress >= before);
                    if was_terminal {
                        prop_assert_eq!(run.progress, before);
                    }
                }
                prop_assert!(!(run.failed() && run.cleared()));
            }
        }

        #[test]
        fn danger_with_movement_always_fails(seed in any::<u64>(), warmup in 0usize..50) {
            let mut rng = SeededIntervals::new(seed);
            let mut run = RunState::new(1);
            let mut signal = SignalState::start(0, &run.profile(), &mut rng);
            let mut clock = FrameClock::new();
            for _ in 0..warmup {
                advance(&mut run, &mut signal, &STILL, clock.tick(), &mut rng);
            }
            signal.force_phase(Phase::Danger);
            signal.next_flip_at = u64::MAX;
            advance(&mut run, &mut signal, &MOVE, clock.tick(), &mut rng);
            prop_assert_eq!(run.outcome, Outcome::Failed(FailureCause::Caught));
        }
    }
}
