use anyhow::{bail, Result};
use serde::Serialize;

use super::cues::StepKind;

/// One timed unit of guidance within a session: a pose, a breathing phase,
/// a focus prompt. The `cue` glyph and `kind` only drive presentation;
/// `duration_secs` is the step's entire behavioral surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step<K> {
    pub name: String,
    pub duration_secs: u32,
    pub instruction: String,
    pub cue: String,
    pub kind: K,
    /// Body region label used by stretch routines; absent elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_area: Option<String>,
}

impl<K: StepKind> Step<K> {
    pub fn new(
        name: impl Into<String>,
        duration_secs: u32,
        instruction: impl Into<String>,
        cue: impl Into<String>,
        kind: K,
    ) -> Self {
        Self {
            name: name.into(),
            duration_secs,
            instruction: instruction.into(),
            cue: cue.into(),
            kind,
            target_area: None,
        }
    }

    pub fn with_target_area(mut self, target_area: impl Into<String>) -> Self {
        self.target_area = Some(target_area.into());
        self
    }
}

/// Ordered, immutable list of steps composing one guided session.
/// Insertion order is playback order. Validated on construction so the
/// tick loop never has to handle an empty or zero-length step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSequence<K> {
    title: String,
    description: String,
    steps: Vec<Step<K>>,
}

impl<K: StepKind> StepSequence<K> {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<Step<K>>,
    ) -> Result<Self> {
        let title = title.into();
        if steps.is_empty() {
            bail!("sequence '{title}' must contain at least one step");
        }
        for step in &steps {
            if step.duration_secs == 0 {
                bail!(
                    "step '{}' in sequence '{title}' has zero duration",
                    step.name
                );
            }
        }

        Ok(Self {
            title,
            description: description.into(),
            steps,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn steps(&self) -> &[Step<K>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> &Step<K> {
        &self.steps[index]
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Total time budget across all steps, in seconds.
    pub fn total_secs(&self) -> u32 {
        self.steps.iter().map(|step| step.duration_secs).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::cues::ExerciseKind;

    fn step(name: &str, duration: u32) -> Step<ExerciseKind> {
        Step::new(name, duration, "breathe", "🧘", ExerciseKind::Relaxation)
    }

    #[test]
    fn rejects_empty_sequence() {
        let result = StepSequence::<ExerciseKind>::new("Empty", "nothing here", vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_duration_step() {
        let result = StepSequence::new("Bad", "has a zero step", vec![step("ok", 30), step("zero", 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn total_secs_sums_all_steps() {
        let seq = StepSequence::new("Sum", "", vec![step("a", 30), step("b", 45), step("c", 20)])
            .unwrap();
        assert_eq!(seq.total_secs(), 95);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.last_index(), 2);
    }
}
