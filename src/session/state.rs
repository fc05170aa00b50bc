use anyhow::{bail, Result};
use serde::Serialize;

use super::cues::StepKind;
use super::sequence::StepSequence;

/// What a single tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not active; nothing changed.
    Idle,
    /// One second consumed within the current step.
    Ticked,
    /// The current step's budget ran out and the next step was loaded at its
    /// full duration, in the same transition.
    StepAdvanced,
    /// The last step's budget ran out; the session is finished.
    Completed,
}

/// Live, mutable run of a `StepSequence`. Created when a session screen
/// mounts, discarded on teardown; never persisted. Mutated only through the
/// operations below — the view reads snapshots and nothing else.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_step_index: usize,
    pub time_remaining_secs: u32,
    pub is_running: bool,
    pub is_paused: bool,
    /// Index into the current step's cue phase labels. Cosmetic only.
    #[serde(skip)]
    pub cue_phase: usize,
}

impl SessionState {
    pub fn new<K: StepKind>(sequence: &StepSequence<K>) -> Self {
        Self {
            current_step_index: 0,
            time_remaining_secs: sequence.step(0).duration_secs,
            is_running: false,
            is_paused: false,
            cue_phase: 0,
        }
    }

    /// True while the countdown should be ticking.
    pub fn is_active(&self) -> bool {
        self.is_running && !self.is_paused
    }

    /// Consume one second of the current step. A tick that would take the
    /// remaining time past zero instead performs the step transition (or
    /// terminal completion) atomically: an observer never sees a zero
    /// remainder on a non-terminal step, and never a negative value.
    pub fn tick<K: StepKind>(&mut self, sequence: &StepSequence<K>) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Idle;
        }

        if self.time_remaining_secs > 1 {
            self.time_remaining_secs -= 1;
            return TickOutcome::Ticked;
        }

        // Budget exhausted on this tick.
        if self.current_step_index < sequence.last_index() {
            self.current_step_index += 1;
            self.time_remaining_secs = sequence.step(self.current_step_index).duration_secs;
            TickOutcome::StepAdvanced
        } else {
            self.time_remaining_secs = 0;
            self.is_running = false;
            TickOutcome::Completed
        }
    }

    /// Begin (or resume after a reset) the countdown. Idempotent while
    /// already running.
    pub fn start(&mut self) {
        self.is_running = true;
        self.is_paused = false;
    }

    /// Toggle suspension. Does nothing when no session is running.
    pub fn toggle_pause(&mut self) {
        if self.is_running {
            self.is_paused = !self.is_paused;
        }
    }

    /// Return to the first step at full duration, stopped. Always succeeds.
    pub fn reset<K: StepKind>(&mut self, sequence: &StepSequence<K>) {
        self.current_step_index = 0;
        self.time_remaining_secs = sequence.step(0).duration_secs;
        self.is_running = false;
        self.is_paused = false;
        self.cue_phase = 0;
    }

    /// Advance to the next step at its full duration, leaving the
    /// running/paused flags untouched. No-op on the last step.
    pub fn skip_to_next<K: StepKind>(&mut self, sequence: &StepSequence<K>) -> bool {
        if self.current_step_index >= sequence.last_index() {
            return false;
        }
        self.current_step_index += 1;
        self.time_remaining_secs = sequence.step(self.current_step_index).duration_secs;
        true
    }

    /// Jump to an arbitrary step (backward or forward) at its full duration.
    /// Out-of-range indices are rejected without touching state.
    pub fn jump_to_step<K: StepKind>(
        &mut self,
        sequence: &StepSequence<K>,
        index: usize,
    ) -> Result<()> {
        if index >= sequence.len() {
            bail!(
                "step index {index} out of range for sequence of {} steps",
                sequence.len()
            );
        }
        self.current_step_index = index;
        self.time_remaining_secs = sequence.step(index).duration_secs;
        Ok(())
    }

    /// Elapsed share of the current step, 0–100. Recomputed on every read.
    pub fn step_progress_percent<K: StepKind>(&self, sequence: &StepSequence<K>) -> f64 {
        let duration = sequence.step(self.current_step_index).duration_secs;
        f64::from(duration - self.time_remaining_secs) / f64::from(duration) * 100.0
    }

    /// Elapsed share of the whole sequence, weighting every step equally.
    pub fn overall_progress_percent<K: StepKind>(&self, sequence: &StepSequence<K>) -> f64 {
        let step_progress = self.step_progress_percent(sequence);
        (self.current_step_index as f64 * 100.0 + step_progress) / sequence.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::cues::ExerciseKind;
    use crate::session::sequence::Step;

    fn sequence(durations: &[u32]) -> StepSequence<ExerciseKind> {
        let steps = durations
            .iter()
            .enumerate()
            .map(|(i, &secs)| {
                Step::new(
                    format!("step {i}"),
                    secs,
                    "hold steady",
                    "🧘",
                    ExerciseKind::Focus,
                )
            })
            .collect();
        StepSequence::new("Test", "test sequence", steps).unwrap()
    }

    #[test]
    fn initial_state_is_stopped_at_first_step() {
        let seq = sequence(&[30, 45, 20]);
        let state = SessionState::new(&seq);
        assert_eq!(state.current_step_index, 0);
        assert_eq!(state.time_remaining_secs, 30);
        assert!(!state.is_running);
        assert!(!state.is_paused);
    }

    #[test]
    fn tick_does_nothing_while_stopped_or_paused() {
        let seq = sequence(&[30]);
        let mut state = SessionState::new(&seq);
        assert_eq!(state.tick(&seq), TickOutcome::Idle);
        assert_eq!(state.time_remaining_secs, 30);

        state.start();
        state.toggle_pause();
        assert_eq!(state.tick(&seq), TickOutcome::Idle);
        assert_eq!(state.time_remaining_secs, 30);
    }

    #[test]
    fn three_step_scenario_completes_in_exactly_95_ticks() {
        let seq = sequence(&[30, 45, 20]);
        let mut state = SessionState::new(&seq);
        state.start();

        for _ in 0..30 {
            state.tick(&seq);
        }
        assert_eq!(state.current_step_index, 1);
        assert_eq!(state.time_remaining_secs, 45);

        for _ in 0..45 {
            state.tick(&seq);
        }
        assert_eq!(state.current_step_index, 2);
        assert_eq!(state.time_remaining_secs, 20);

        for _ in 0..19 {
            assert_eq!(state.tick(&seq), TickOutcome::Ticked);
        }
        assert_eq!(state.tick(&seq), TickOutcome::Completed);
        assert!(!state.is_running);
        assert_eq!(state.current_step_index, 2);
        assert_eq!(state.time_remaining_secs, 0);
    }

    #[test]
    fn ticking_sum_of_durations_always_completes() {
        for durations in [&[1u32][..], &[1, 1], &[5, 3, 8], &[30, 45, 20], &[2, 90]] {
            let seq = sequence(durations);
            let mut state = SessionState::new(&seq);
            state.start();

            let total: u32 = durations.iter().sum();
            for _ in 0..total {
                state.tick(&seq);
            }
            assert!(!state.is_running, "durations {durations:?}");
            assert_eq!(state.current_step_index, durations.len() - 1);
            assert_eq!(state.time_remaining_secs, 0);
        }
    }

    #[test]
    fn observer_never_sees_zero_remaining_on_non_terminal_step() {
        let seq = sequence(&[3, 2]);
        let mut state = SessionState::new(&seq);
        state.start();

        for _ in 0..5 {
            state.tick(&seq);
            if state.time_remaining_secs == 0 {
                assert_eq!(state.current_step_index, seq.last_index());
                assert!(!state.is_running);
            }
        }
    }

    #[test]
    fn pause_twice_restores_original_flag() {
        let seq = sequence(&[10]);
        let mut state = SessionState::new(&seq);
        state.start();
        assert!(!state.is_paused);

        state.toggle_pause();
        assert!(state.is_paused);
        state.toggle_pause();
        assert!(!state.is_paused);
    }

    #[test]
    fn pause_is_inert_while_stopped() {
        let seq = sequence(&[10]);
        let mut state = SessionState::new(&seq);
        state.toggle_pause();
        assert!(!state.is_paused);
    }

    #[test]
    fn reset_restores_initial_state_from_anywhere() {
        let seq = sequence(&[30, 45, 20]);
        let mut state = SessionState::new(&seq);
        state.start();
        for _ in 0..50 {
            state.tick(&seq);
        }
        state.toggle_pause();

        state.reset(&seq);
        assert_eq!(state.current_step_index, 0);
        assert_eq!(state.time_remaining_secs, 30);
        assert!(!state.is_running);
        assert!(!state.is_paused);
    }

    #[test]
    fn skip_on_last_step_is_a_no_op() {
        let seq = sequence(&[10]);
        let mut state = SessionState::new(&seq);
        assert!(!state.skip_to_next(&seq));
        assert_eq!(state.current_step_index, 0);
        assert_eq!(state.time_remaining_secs, 10);
    }

    #[test]
    fn skip_advances_without_touching_flags() {
        let seq = sequence(&[30, 45, 20]);
        let mut state = SessionState::new(&seq);
        state.start();
        state.toggle_pause();

        assert!(state.skip_to_next(&seq));
        assert_eq!(state.current_step_index, 1);
        assert_eq!(state.time_remaining_secs, 45);
        assert!(state.is_running);
        assert!(state.is_paused);
    }

    #[test]
    fn jump_loads_full_duration_in_both_directions() {
        let seq = sequence(&[30, 45, 20]);
        let mut state = SessionState::new(&seq);
        state.start();
        for _ in 0..40 {
            state.tick(&seq);
        }

        state.jump_to_step(&seq, 2).unwrap();
        assert_eq!(state.time_remaining_secs, 20);
        state.jump_to_step(&seq, 0).unwrap();
        assert_eq!(state.time_remaining_secs, 30);
    }

    #[test]
    fn jump_out_of_range_is_rejected_untouched() {
        let seq = sequence(&[30, 45]);
        let mut state = SessionState::new(&seq);
        state.start();
        state.tick(&seq);

        assert!(state.jump_to_step(&seq, 2).is_err());
        assert_eq!(state.current_step_index, 0);
        assert_eq!(state.time_remaining_secs, 29);
    }

    #[test]
    fn overall_progress_is_monotonic_under_ticks() {
        let seq = sequence(&[4, 7, 3]);
        let mut state = SessionState::new(&seq);
        state.start();

        let mut last = state.overall_progress_percent(&seq);
        while state.is_running {
            state.tick(&seq);
            let now = state.overall_progress_percent(&seq);
            assert!(now >= last, "progress went backward: {last} -> {now}");
            last = now;
        }
        assert!((last - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_formulas_match_definition() {
        let seq = sequence(&[30, 45, 20]);
        let mut state = SessionState::new(&seq);
        state.start();
        for _ in 0..15 {
            state.tick(&seq);
        }

        assert!((state.step_progress_percent(&seq) - 50.0).abs() < 1e-9);
        assert!((state.overall_progress_percent(&seq) - 50.0 / 3.0).abs() < 1e-9);
    }
}
