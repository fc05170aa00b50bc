//! Static routine registry: every guided session the app can run, with the
//! step tables that drive the session core. Content is fixed at startup;
//! sequences are validated once while the catalog is built.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tauri::State;

use crate::session::{
    controller::StepView,
    cues::{Difficulty, ExerciseKind, StretchIntensity},
    sequence::{Step, StepSequence},
};
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoutineFamily {
    Breathing,
    Meditation,
    Yoga,
    Stretch,
    Exercise,
}

/// Which shelf an exercise routine sits on in the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseCategory {
    StressRelief,
    Concentration,
    Both,
}

/// A routine's step table, tagged by kind family.
#[derive(Debug, Clone)]
pub enum RoutineSteps {
    Exercise(Arc<StepSequence<ExerciseKind>>),
    Yoga(Arc<StepSequence<Difficulty>>),
    Stretch(Arc<StepSequence<StretchIntensity>>),
}

impl RoutineSteps {
    pub fn title(&self) -> &str {
        match self {
            RoutineSteps::Exercise(seq) => seq.title(),
            RoutineSteps::Yoga(seq) => seq.title(),
            RoutineSteps::Stretch(seq) => seq.title(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            RoutineSteps::Exercise(seq) => seq.description(),
            RoutineSteps::Yoga(seq) => seq.description(),
            RoutineSteps::Stretch(seq) => seq.description(),
        }
    }

    pub fn step_count(&self) -> usize {
        match self {
            RoutineSteps::Exercise(seq) => seq.len(),
            RoutineSteps::Yoga(seq) => seq.len(),
            RoutineSteps::Stretch(seq) => seq.len(),
        }
    }

    pub fn total_secs(&self) -> u32 {
        match self {
            RoutineSteps::Exercise(seq) => seq.total_secs(),
            RoutineSteps::Yoga(seq) => seq.total_secs(),
            RoutineSteps::Stretch(seq) => seq.total_secs(),
        }
    }

    /// Flatten the step table into the non-generic display shape.
    pub fn step_views(&self) -> Vec<StepView> {
        fn views<K: crate::session::cues::StepKind>(seq: &StepSequence<K>) -> Vec<StepView> {
            seq.steps()
                .iter()
                .map(|step| StepView {
                    name: step.name.clone(),
                    duration_secs: step.duration_secs,
                    instruction: step.instruction.clone(),
                    cue: step.cue.clone(),
                    kind: step.kind.label(),
                    target_area: step.target_area.clone(),
                })
                .collect()
        }

        match self {
            RoutineSteps::Exercise(seq) => views(seq),
            RoutineSteps::Yoga(seq) => views(seq),
            RoutineSteps::Stretch(seq) => views(seq),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Routine {
    pub id: &'static str,
    pub family: RoutineFamily,
    pub duration_label: &'static str,
    pub icon: &'static str,
    pub category: Option<ExerciseCategory>,
    pub difficulty: Option<Difficulty>,
    pub benefits: Vec<&'static str>,
    pub instructions: Vec<&'static str>,
    pub steps: RoutineSteps,
}

/// Card-level view of a routine, without the step table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSummary {
    pub id: &'static str,
    pub family: RoutineFamily,
    pub title: String,
    pub description: String,
    pub duration_label: &'static str,
    pub icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ExerciseCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub step_count: usize,
    pub total_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineDetail {
    #[serde(flatten)]
    pub summary: RoutineSummary,
    pub benefits: Vec<&'static str>,
    pub instructions: Vec<&'static str>,
    pub steps: Vec<StepView>,
}

impl Routine {
    pub fn summary(&self) -> RoutineSummary {
        RoutineSummary {
            id: self.id,
            family: self.family,
            title: self.steps.title().to_string(),
            description: self.steps.description().to_string(),
            duration_label: self.duration_label,
            icon: self.icon,
            category: self.category,
            difficulty: self.difficulty,
            step_count: self.steps.step_count(),
            total_secs: self.steps.total_secs(),
        }
    }

    pub fn detail(&self) -> RoutineDetail {
        RoutineDetail {
            summary: self.summary(),
            benefits: self.benefits.clone(),
            instructions: self.instructions.clone(),
            steps: self.steps.step_views(),
        }
    }
}

pub struct Catalog {
    routines: Vec<Routine>,
}

impl Catalog {
    pub fn build() -> Result<Self> {
        let routines = vec![
            breathing_guide(10)?,
            mindfulness_meditation()?,
            body_scan()?,
            loving_kindness()?,
            morning_energizer()?,
            stress_relief_flow()?,
            gentle_stretching()?,
            progressive_muscle_relaxation()?,
            focus_pyramid()?,
            stress_relief_stretching()?,
            mindful_walking()?,
            box_breathing_focus()?,
            gratitude_practice()?,
        ];
        Ok(Self { routines })
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    pub fn get(&self, id: &str) -> Option<&Routine> {
        self.routines.iter().find(|routine| routine.id == id)
    }

    pub fn summaries(&self) -> Vec<RoutineSummary> {
        self.routines.iter().map(Routine::summary).collect()
    }
}

fn exercise_steps(
    title: &'static str,
    description: &'static str,
    steps: Vec<Step<ExerciseKind>>,
) -> Result<RoutineSteps> {
    Ok(RoutineSteps::Exercise(Arc::new(StepSequence::new(
        title,
        description,
        steps,
    )?)))
}

/// The 4-4-4-4 box pattern expanded to a fixed cycle count, so the guide
/// terminates like every other sequence instead of looping forever.
fn breathing_guide(cycles: u32) -> Result<Routine> {
    let mut steps = Vec::with_capacity(cycles as usize * 4);
    for cycle in 1..=cycles {
        let tag = format!("({cycle}/{cycles})");
        steps.push(Step::new(
            format!("Inhale {tag}"),
            4,
            "Inhale slowly for 4 seconds",
            "🌬️",
            ExerciseKind::Breathing,
        ));
        steps.push(Step::new(
            format!("Hold {tag}"),
            4,
            "Hold your breath for 4 seconds",
            "⏸️",
            ExerciseKind::Breathing,
        ));
        steps.push(Step::new(
            format!("Exhale {tag}"),
            4,
            "Exhale slowly for 4 seconds",
            "💨",
            ExerciseKind::Breathing,
        ));
        steps.push(Step::new(
            format!("Rest {tag}"),
            4,
            "Pause for 4 seconds before the next breath",
            "🧘",
            ExerciseKind::Relaxation,
        ));
    }

    Ok(Routine {
        id: "breathing-guide",
        family: RoutineFamily::Breathing,
        duration_label: "3 min",
        icon: "🌬️",
        category: Some(ExerciseCategory::StressRelief),
        difficulty: Some(Difficulty::Easy),
        benefits: vec![
            "Activates the parasympathetic nervous system",
            "Reduces stress and anxiety",
        ],
        instructions: vec![
            "Inhale slowly for 4 seconds",
            "Hold your breath for 4 seconds",
            "Exhale slowly for 4 seconds",
            "Pause for 4 seconds before repeating",
        ],
        steps: RoutineSteps::Exercise(Arc::new(StepSequence::new(
            "Breathing Exercise",
            "Interactive breathing guide with visual cues",
            steps,
        )?)),
    })
}

fn mindfulness_meditation() -> Result<Routine> {
    Ok(Routine {
        id: "mindfulness-meditation",
        family: RoutineFamily::Meditation,
        duration_label: "10 min",
        icon: "🧘‍♀️",
        category: None,
        difficulty: None,
        benefits: vec![],
        instructions: vec![],
        steps: exercise_steps(
            "Mindfulness Meditation",
            "Focus on the present moment and observe your thoughts without judgment",
            vec![
                Step::new("Settling In", 60, "Find a comfortable seated position. Close your eyes gently.", "🧘‍♀️", ExerciseKind::Relaxation),
                Step::new("Breath Awareness", 180, "Focus on your natural breath. Notice each inhale and exhale.", "🌬️", ExerciseKind::Breathing),
                Step::new("Thought Observation", 240, "When thoughts arise, acknowledge them without judgment and return to breath.", "💭", ExerciseKind::Focus),
                Step::new("Body Awareness", 120, "Expand awareness to include bodily sensations.", "✨", ExerciseKind::Focus),
                Step::new("Loving Presence", 60, "Rest in open, loving awareness. Simply be present.", "💝", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

fn body_scan() -> Result<Routine> {
    Ok(Routine {
        id: "body-scan",
        family: RoutineFamily::Meditation,
        duration_label: "15 min",
        icon: "✨",
        category: None,
        difficulty: None,
        benefits: vec![],
        instructions: vec![],
        steps: exercise_steps(
            "Body Scan",
            "Progressive relaxation focusing on different parts of your body",
            vec![
                Step::new("Ground & Center", 60, "Lie down comfortably. Take three deep breaths.", "🛌", ExerciseKind::Breathing),
                Step::new("Feet & Legs", 180, "Focus on your feet, ankles, calves, and thighs. Release tension.", "🦵", ExerciseKind::Relaxation),
                Step::new("Torso Scan", 240, "Move attention to hips, abdomen, chest. Soften each area.", "🫁", ExerciseKind::Relaxation),
                Step::new("Arms & Hands", 180, "Notice shoulders, arms, hands. Let them completely relax.", "🤲", ExerciseKind::Relaxation),
                Step::new("Head & Face", 180, "Relax forehead, eyes, jaw. Release all facial tension.", "😌", ExerciseKind::Relaxation),
                Step::new("Whole Body", 120, "Feel your entire body as one unified, relaxed being.", "✨", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

fn loving_kindness() -> Result<Routine> {
    Ok(Routine {
        id: "loving-kindness",
        family: RoutineFamily::Meditation,
        duration_label: "12 min",
        icon: "💝",
        category: None,
        difficulty: None,
        benefits: vec![],
        instructions: vec![],
        steps: exercise_steps(
            "Loving Kindness",
            "Cultivate compassion and positive feelings towards yourself and others",
            vec![
                Step::new("Self Love", 180, "Send loving wishes to yourself: 'May I be happy, may I be peaceful.'", "💝", ExerciseKind::Focus),
                Step::new("Loved Ones", 180, "Bring someone you love to mind. Send them warm wishes.", "🤗", ExerciseKind::Focus),
                Step::new("Neutral Person", 120, "Think of someone neutral. Extend the same loving wishes.", "👤", ExerciseKind::Focus),
                Step::new("Difficult Person", 120, "Gently include someone challenging. Wish them well.", "🕊️", ExerciseKind::Focus),
                Step::new("All Beings", 120, "Expand to include all living beings everywhere.", "🌍", ExerciseKind::Focus),
                Step::new("Integration", 60, "Rest in the warm glow of universal loving kindness.", "☀️", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

fn morning_energizer() -> Result<Routine> {
    Ok(Routine {
        id: "morning-energizer",
        family: RoutineFamily::Yoga,
        duration_label: "20 min",
        icon: "🌅",
        category: None,
        difficulty: None,
        benefits: vec![],
        instructions: vec![],
        steps: RoutineSteps::Yoga(Arc::new(StepSequence::new(
            "Morning Energizer",
            "Gentle yoga poses to start your day with energy and calm",
            vec![
                Step::new("Child's Pose", 60, "Kneel and sit back on your heels, arms extended forward.", "🧘‍♀️", Difficulty::Easy),
                Step::new("Cat-Cow Stretch", 90, "On hands and knees, alternate between arching and rounding your spine.", "🐱", Difficulty::Easy),
                Step::new("Downward Dog", 120, "Form an inverted V-shape, stretching through your spine.", "🐕", Difficulty::Medium),
                Step::new("Standing Forward Fold", 90, "Bend forward from your hips, let your arms hang freely.", "🙇‍♀️", Difficulty::Easy),
                Step::new("Warrior I", 120, "Step back into a lunge, raise arms overhead with confidence.", "🏹", Difficulty::Medium),
                Step::new("Tree Pose", 90, "Balance on one foot, place other foot on inner thigh.", "🌳", Difficulty::Medium),
                Step::new("Savasana", 180, "Lie flat, completely relax, and integrate your practice.", "😴", Difficulty::Easy),
            ],
        )?)),
    })
}

fn stress_relief_flow() -> Result<Routine> {
    Ok(Routine {
        id: "stress-relief-flow",
        family: RoutineFamily::Yoga,
        duration_label: "25 min",
        icon: "🌊",
        category: None,
        difficulty: None,
        benefits: vec![],
        instructions: vec![],
        steps: RoutineSteps::Yoga(Arc::new(StepSequence::new(
            "Stress Relief Flow",
            "Flowing movements designed to release tension and anxiety",
            vec![
                Step::new("Gentle Neck Rolls", 60, "Slowly roll your head to release neck tension.", "🔄", Difficulty::Easy),
                Step::new("Shoulder Shrugs", 60, "Lift shoulders to ears, then release with a sigh.", "🤷‍♀️", Difficulty::Easy),
                Step::new("Spinal Waves", 120, "Create gentle waves through your spine, seated or standing.", "🌊", Difficulty::Easy),
                Step::new("Pigeon Pose", 180, "Open your hips deeply, breathe into any resistance.", "🕊️", Difficulty::Medium),
                Step::new("Seated Twist", 120, "Gently rotate your spine, releasing tension from your back.", "🌪️", Difficulty::Easy),
                Step::new("Legs Up Wall", 300, "Lie with legs up against a wall, completely surrender.", "🧘‍♀️", Difficulty::Easy),
                Step::new("Final Rest", 240, "Rest in complete stillness, feeling stress melt away.", "😌", Difficulty::Easy),
            ],
        )?)),
    })
}

fn gentle_stretching() -> Result<Routine> {
    Ok(Routine {
        id: "gentle-stretching",
        family: RoutineFamily::Stretch,
        duration_label: "15 min",
        icon: "🌙",
        category: None,
        difficulty: None,
        benefits: vec![],
        instructions: vec![],
        steps: RoutineSteps::Stretch(Arc::new(StepSequence::new(
            "Gentle Stretching",
            "Relaxing stretches to prepare your body and mind for rest",
            vec![
                Step::new("Neck Side Stretch", 45, "Gently tilt head to each side, feeling the stretch along your neck.", "👤", StretchIntensity::Light)
                    .with_target_area("Neck & Shoulders"),
                Step::new("Shoulder Rolls", 60, "Roll shoulders backwards in large, slow circles.", "🔄", StretchIntensity::Light)
                    .with_target_area("Shoulders"),
                Step::new("Seated Spinal Twist", 90, "Sit cross-legged, gently twist your torso to each side.", "🌪️", StretchIntensity::Moderate)
                    .with_target_area("Spine & Core"),
                Step::new("Forward Fold", 120, "Sitting with legs extended, gently reach toward your toes.", "🙇‍♀️", StretchIntensity::Moderate)
                    .with_target_area("Hamstrings & Back"),
                Step::new("Hip Flexor Stretch", 90, "In a lunge position, feel the stretch in your hip flexors.", "🦵", StretchIntensity::Moderate)
                    .with_target_area("Hips & Thighs"),
                Step::new("Calf Stretch", 60, "Place hands against wall, step back and stretch your calves.", "🧘‍♂️", StretchIntensity::Light)
                    .with_target_area("Calves"),
                Step::new("Gentle Backbend", 75, "Lie on your back, gently arch into a supported backbend.", "🌙", StretchIntensity::Light)
                    .with_target_area("Chest & Spine"),
                Step::new("Final Relaxation", 180, "Lie in comfortable position, let your whole body soften.", "😴", StretchIntensity::Light)
                    .with_target_area("Full Body"),
            ],
        )?)),
    })
}

fn progressive_muscle_relaxation() -> Result<Routine> {
    Ok(Routine {
        id: "progressive-muscle-relaxation",
        family: RoutineFamily::Exercise,
        duration_label: "10-15 min",
        icon: "🧘‍♂️",
        category: Some(ExerciseCategory::StressRelief),
        difficulty: Some(Difficulty::Easy),
        benefits: vec![
            "Reduces muscle tension",
            "Lowers stress hormones",
            "Improves sleep quality",
        ],
        instructions: vec![
            "Find a comfortable position lying down or sitting",
            "Start with your toes - tense for 5 seconds, then release",
            "Move up through each muscle group: calves, thighs, abdomen",
            "Continue with arms, shoulders, neck, and face",
            "Notice the contrast between tension and relaxation",
            "End with 2-3 minutes of deep breathing",
        ],
        steps: exercise_steps(
            "Progressive Muscle Relaxation",
            "Systematically tense and release muscle groups to reduce physical tension",
            vec![
                Step::new("Preparation", 60, "Find a comfortable position and close your eyes", "🧘‍♂️", ExerciseKind::Relaxation),
                Step::new("Feet Tension", 45, "Tense your feet and toes, hold for 5 seconds", "🦶", ExerciseKind::Movement),
                Step::new("Leg Tension", 45, "Tense your calves and thighs, feel the tension", "🦵", ExerciseKind::Movement),
                Step::new("Core Tension", 45, "Tighten your abdomen and lower back muscles", "💪", ExerciseKind::Movement),
                Step::new("Arm Tension", 45, "Make fists and tense your arms and shoulders", "💪", ExerciseKind::Movement),
                Step::new("Face Tension", 45, "Scrunch your face muscles, then release", "😤", ExerciseKind::Movement),
                Step::new("Full Body Release", 90, "Release all tension and breathe deeply", "😌", ExerciseKind::Relaxation),
                Step::new("Final Relaxation", 120, "Enjoy the feeling of complete relaxation", "🕯️", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

fn focus_pyramid() -> Result<Routine> {
    Ok(Routine {
        id: "focus-pyramid",
        family: RoutineFamily::Exercise,
        duration_label: "5-10 min",
        icon: "🎯",
        category: Some(ExerciseCategory::Concentration),
        difficulty: Some(Difficulty::Medium),
        benefits: vec![
            "Improves focus span",
            "Enhances working memory",
            "Reduces mind wandering",
        ],
        instructions: vec![
            "Choose a simple object (pen, book, etc.)",
            "Focus on the object for 30 seconds",
            "Add details: color, texture, weight",
            "Increase focus time to 1 minute, then 2 minutes",
            "When mind wanders, gently return attention to object",
            "Build up to 5-10 minutes of sustained focus",
        ],
        steps: exercise_steps(
            "Focus Pyramid Exercise",
            "Build concentration skills through structured attention training",
            vec![
                Step::new("Object Selection", 30, "Choose a simple object to focus on", "👁️", ExerciseKind::Focus),
                Step::new("Initial Focus", 30, "Look at the object, notice its basic shape", "🎯", ExerciseKind::Focus),
                Step::new("Detail Observation", 60, "Observe color, texture, and shadows", "🔍", ExerciseKind::Focus),
                Step::new("Deep Focus Level 1", 60, "Maintain attention for 1 minute", "🧠", ExerciseKind::Focus),
                Step::new("Deep Focus Level 2", 120, "Extend focus to 2 minutes", "🎯", ExerciseKind::Focus),
                Step::new("Advanced Focus", 180, "Challenge yourself with 3 minutes", "💎", ExerciseKind::Focus),
                Step::new("Integration", 60, "Reflect on your focus experience", "🧘", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

fn stress_relief_stretching() -> Result<Routine> {
    Ok(Routine {
        id: "stress-relief-stretching",
        family: RoutineFamily::Exercise,
        duration_label: "8-12 min",
        icon: "🤸‍♀️",
        category: Some(ExerciseCategory::StressRelief),
        difficulty: Some(Difficulty::Easy),
        benefits: vec![
            "Releases muscle tension",
            "Improves circulation",
            "Calms nervous system",
        ],
        instructions: vec![
            "Neck rolls: Slowly roll head in circles (5 each direction)",
            "Shoulder shrugs: Lift shoulders to ears, hold 5 seconds, release",
            "Cat-cow stretch: On hands and knees, arch and round spine",
            "Seated spinal twist: Gentle rotation left and right",
            "Ankle circles: Improve circulation in legs",
            "End with gentle deep breathing",
        ],
        steps: exercise_steps(
            "Stress-Relief Stretching",
            "Gentle stretches to release tension in common stress areas",
            vec![
                Step::new("Warm-up Breathing", 30, "Take 5 deep breaths to center yourself", "🫁", ExerciseKind::Breathing),
                Step::new("Neck Circles", 45, "Slowly roll your neck in circles", "🔄", ExerciseKind::Movement),
                Step::new("Shoulder Rolls", 45, "Roll shoulders backward and forward", "🤸‍♀️", ExerciseKind::Movement),
                Step::new("Side Stretch", 60, "Stretch your arms overhead and lean side to side", "🙆‍♀️", ExerciseKind::Movement),
                Step::new("Spinal Twist", 60, "Gentle seated twist to both sides", "🌪️", ExerciseKind::Movement),
                Step::new("Leg Stretch", 45, "Stretch your legs and rotate ankles", "🦵", ExerciseKind::Movement),
                Step::new("Cool Down", 60, "Return to center and breathe deeply", "😌", ExerciseKind::Breathing),
            ],
        )?,
    })
}

fn mindful_walking() -> Result<Routine> {
    Ok(Routine {
        id: "mindful-walking",
        family: RoutineFamily::Exercise,
        duration_label: "10-20 min",
        icon: "🚶‍♀️",
        category: Some(ExerciseCategory::Both),
        difficulty: Some(Difficulty::Easy),
        benefits: vec![
            "Reduces stress",
            "Improves focus",
            "Boosts mood",
            "Increases energy",
        ],
        instructions: vec![
            "Find a quiet path or space for walking",
            "Start walking at a slower pace than usual",
            "Focus on the sensation of feet touching ground",
            "Notice your breathing rhythm with steps",
            "Observe surroundings without judgment",
            "When mind wanders, return focus to walking sensations",
        ],
        steps: exercise_steps(
            "Mindful Walking",
            "Combine physical movement with mindfulness for dual benefits",
            vec![
                Step::new("Standing Preparation", 60, "Stand still and feel your feet on the ground", "🧍‍♀️", ExerciseKind::Focus),
                Step::new("First Steps", 120, "Begin walking very slowly", "🚶‍♀️", ExerciseKind::Movement),
                Step::new("Foot Awareness", 180, "Focus on how each foot touches the ground", "👟", ExerciseKind::Focus),
                Step::new("Breathing & Walking", 240, "Coordinate breathing with your steps", "🫁", ExerciseKind::Breathing),
                Step::new("Environmental Awareness", 180, "Notice sounds, smells, and sights around you", "👁️", ExerciseKind::Focus),
                Step::new("Mindful Pace", 300, "Continue at your mindful pace", "🚶‍♀️", ExerciseKind::Movement),
                Step::new("Finishing Steps", 60, "Gradually slow down and come to a stop", "🛑", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

fn box_breathing_focus() -> Result<Routine> {
    Ok(Routine {
        id: "box-breathing-focus",
        family: RoutineFamily::Exercise,
        duration_label: "5-8 min",
        icon: "💨",
        category: Some(ExerciseCategory::Concentration),
        difficulty: Some(Difficulty::Medium),
        benefits: vec![
            "Improves focus",
            "Reduces anxiety",
            "Enhances decision-making",
        ],
        instructions: vec![
            "Sit comfortably with straight posture",
            "Breathe in for 4 counts",
            "Hold breath for 4 counts",
            "Exhale for 4 counts",
            "Hold empty lungs for 4 counts",
            "Repeat for 5-10 cycles, maintaining focus on counting",
        ],
        steps: exercise_steps(
            "Box Breathing Focus",
            "Use structured breathing to enhance concentration and calmness",
            vec![
                Step::new("Posture Setup", 30, "Sit comfortably with straight spine", "🧘‍♂️", ExerciseKind::Focus),
                Step::new("Practice Round", 60, "Try one complete box breathing cycle", "🔄", ExerciseKind::Breathing),
                Step::new("Breathe In (4 counts)", 32, "Inhale slowly for 4 counts", "⬆️", ExerciseKind::Breathing),
                Step::new("Hold (4 counts)", 32, "Hold your breath for 4 counts", "⏸️", ExerciseKind::Breathing),
                Step::new("Breathe Out (4 counts)", 32, "Exhale slowly for 4 counts", "⬇️", ExerciseKind::Breathing),
                Step::new("Hold Empty (4 counts)", 32, "Hold empty lungs for 4 counts", "⏹️", ExerciseKind::Breathing),
                Step::new("Continuous Cycles", 240, "Continue the 4-4-4-4 pattern", "🔄", ExerciseKind::Breathing),
                Step::new("Final Integration", 60, "Return to natural breathing", "😌", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

fn gratitude_practice() -> Result<Routine> {
    Ok(Routine {
        id: "gratitude-practice",
        family: RoutineFamily::Exercise,
        duration_label: "5-7 min",
        icon: "😊",
        category: Some(ExerciseCategory::StressRelief),
        difficulty: Some(Difficulty::Easy),
        benefits: vec![
            "Reduces negative thinking",
            "Improves mood",
            "Builds resilience",
        ],
        instructions: vec![
            "Sit quietly and take 3 deep breaths",
            "Think of 3 things you're grateful for today",
            "Reflect on each item for 30 seconds",
            "Think of 1 personal strength you have",
            "Recall 1 positive interaction from recent days",
            "End by setting a positive intention for the day",
        ],
        steps: exercise_steps(
            "Gratitude & Positivity Practice",
            "Mental exercise to shift focus from stress to positive aspects",
            vec![
                Step::new("Centering Breaths", 45, "Take 3 deep, calming breaths", "🫁", ExerciseKind::Breathing),
                Step::new("Gratitude Item 1", 60, "Think of something you're grateful for", "🙏", ExerciseKind::Focus),
                Step::new("Gratitude Item 2", 60, "Reflect on a second thing you appreciate", "💝", ExerciseKind::Focus),
                Step::new("Gratitude Item 3", 60, "Consider a third blessing in your life", "✨", ExerciseKind::Focus),
                Step::new("Personal Strength", 60, "Acknowledge one of your strengths", "💪", ExerciseKind::Focus),
                Step::new("Positive Memory", 60, "Recall a recent positive interaction", "😊", ExerciseKind::Focus),
                Step::new("Positive Intention", 60, "Set a positive intention for today", "🌟", ExerciseKind::Focus),
                Step::new("Closing Gratitude", 30, "End with a feeling of appreciation", "🤗", ExerciseKind::Relaxation),
            ],
        )?,
    })
}

#[tauri::command]
pub fn list_routines(state: State<'_, AppState>) -> Vec<RoutineSummary> {
    state.catalog.summaries()
}

#[tauri::command]
pub fn get_routine(state: State<'_, AppState>, routine_id: String) -> Result<RoutineDetail, String> {
    state
        .catalog
        .get(&routine_id)
        .map(Routine::detail)
        .ok_or_else(|| anyhow!("unknown routine '{routine_id}'").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds_with_valid_sequences() {
        let catalog = Catalog::build().unwrap();
        assert_eq!(catalog.routines().len(), 13);

        for routine in catalog.routines() {
            assert!(routine.steps.step_count() > 0, "{} is empty", routine.id);
            for step in routine.steps.step_views() {
                assert!(step.duration_secs > 0, "{} has a zero step", routine.id);
            }
        }
    }

    #[test]
    fn routine_ids_are_unique() {
        let catalog = Catalog::build().unwrap();
        let mut ids: Vec<_> = catalog.routines().iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.routines().len());
    }

    #[test]
    fn breathing_guide_expands_cycles_into_terminal_steps() {
        let catalog = Catalog::build().unwrap();
        let guide = catalog.get("breathing-guide").unwrap();
        assert_eq!(guide.steps.step_count(), 40);
        assert_eq!(guide.steps.total_secs(), 160);
    }

    #[test]
    fn exercise_routines_carry_category_and_tier() {
        let catalog = Catalog::build().unwrap();
        for routine in catalog.routines() {
            if routine.family == RoutineFamily::Exercise {
                assert!(routine.category.is_some(), "{}", routine.id);
                assert!(routine.difficulty.is_some(), "{}", routine.id);
            }
        }
    }

    #[test]
    fn stretch_steps_all_name_a_target_area() {
        let catalog = Catalog::build().unwrap();
        let routine = catalog.get("gentle-stretching").unwrap();
        for step in routine.steps.step_views() {
            assert!(step.target_area.is_some(), "{} missing target", step.name);
        }
    }
}
