pub mod prediction;
pub mod followup;

pub use prediction::PredictionOrchestrator;
pub use followup::{build_followup_prompt, FollowUpOrchestrator};
