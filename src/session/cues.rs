use serde::{Deserialize, Serialize};

/// Rotation recipe for the cosmetic cue shown alongside a step: a fixed set
/// of phase labels cycled at a fixed interval. Purely presentational; the
/// cue timer never touches the countdown or the step index.
#[derive(Debug, Clone, Copy)]
pub struct CueLoop {
    pub interval_ms: u64,
    pub phases: &'static [&'static str],
}

impl CueLoop {
    /// A static cue never rotates, so it needs no cue timer.
    pub fn is_static(&self) -> bool {
        self.phases.len() <= 1
    }

    pub fn label(&self, phase: usize) -> &'static str {
        self.phases[phase % self.phases.len()]
    }
}

/// Classification attached to each step. Implementations are closed enums so
/// the cue lookup is exhaustive; adding a variant without a cue mapping is a
/// compile error.
pub trait StepKind: Copy + Send + Sync + 'static {
    fn label(&self) -> &'static str;
    fn cue_loop(&self) -> CueLoop;
}

/// Step classification for exercise and meditation routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseKind {
    Breathing,
    Movement,
    Focus,
    Relaxation,
}

impl StepKind for ExerciseKind {
    fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Breathing => "breathing",
            ExerciseKind::Movement => "movement",
            ExerciseKind::Focus => "focus",
            ExerciseKind::Relaxation => "relaxation",
        }
    }

    fn cue_loop(&self) -> CueLoop {
        match self {
            // 2-second breathing cycle
            ExerciseKind::Breathing => CueLoop {
                interval_ms: 2000,
                phases: &["Breathe In", "Breathe Out"],
            },
            // 1.5-second movement cycle
            ExerciseKind::Movement => CueLoop {
                interval_ms: 1500,
                phases: &["Move", "Hold"],
            },
            ExerciseKind::Focus => CueLoop {
                interval_ms: 0,
                phases: &["Focus & Concentrate"],
            },
            ExerciseKind::Relaxation => CueLoop {
                interval_ms: 0,
                phases: &["Relax & Release"],
            },
        }
    }
}

/// Difficulty tier, used both as the step kind for yoga poses and as the
/// routine-level tier shown on exercise cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl StepKind for Difficulty {
    fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    // Yoga poses share one slow breath cycle regardless of tier.
    fn cue_loop(&self) -> CueLoop {
        match self {
            Difficulty::Easy | Difficulty::Medium | Difficulty::Hard => CueLoop {
                interval_ms: 3000,
                phases: &["Breathe In", "Hold", "Breathe Out"],
            },
        }
    }
}

/// How far a stretch should be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StretchIntensity {
    Light,
    Moderate,
    Deep,
}

impl StepKind for StretchIntensity {
    fn label(&self) -> &'static str {
        match self {
            StretchIntensity::Light => "light",
            StretchIntensity::Moderate => "moderate",
            StretchIntensity::Deep => "deep",
        }
    }

    fn cue_loop(&self) -> CueLoop {
        match self {
            StretchIntensity::Light | StretchIntensity::Moderate | StretchIntensity::Deep => {
                CueLoop {
                    interval_ms: 0,
                    phases: &["Deepening stretch..."],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_cues_cycle_through_phases() {
        let cue = ExerciseKind::Breathing.cue_loop();
        assert!(!cue.is_static());
        assert_eq!(cue.label(0), "Breathe In");
        assert_eq!(cue.label(1), "Breathe Out");
        assert_eq!(cue.label(2), "Breathe In");
    }

    #[test]
    fn static_cues_never_rotate() {
        let cue = ExerciseKind::Focus.cue_loop();
        assert!(cue.is_static());
        assert_eq!(cue.label(0), cue.label(17));
    }

    #[test]
    fn yoga_breath_cycle_has_three_phases() {
        let cue = Difficulty::Medium.cue_loop();
        assert_eq!(cue.phases.len(), 3);
        assert_eq!(cue.interval_ms, 3000);
    }
}
