//! Effects produced by state transitions

/// Effects to be executed after state transition
#[derive(Debug, Clone)]
pub enum Effect {
    /// Query the answering service (spawns as background task)
    FetchAnswer {
        question_id: String,
        question: String,
    },
}
