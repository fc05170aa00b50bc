pub mod engine;
pub mod sources;

pub use engine::{AudioEngineHandle, SoundSource};
