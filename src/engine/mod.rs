pub mod distractor;
pub mod pending;
pub mod session;
pub mod shuffle;
pub mod trainer;

pub use trainer::{AnswerOutcome, PromptView, Trainer, TrainerMode, TrainerState};
