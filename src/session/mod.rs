pub mod commands;
pub mod controller;
pub mod cues;
pub mod sequence;
pub mod state;

pub use commands::ActiveSession;
pub use controller::{SessionController, SessionSnapshot};
pub use sequence::{Step, StepSequence};
pub use state::{SessionState, TickOutcome};
