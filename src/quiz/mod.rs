//! Quiz engine
//!
//! Everything needed to drive one quiz attempt: configuration and its
//! validation, the session state machine, the custom multi-topic composer,
//! and the countdown timer task.

pub mod composer;
pub mod config;
pub mod session;
pub mod timer;

pub use composer::QuizComposer;
pub use config::{Difficulty, QuizConfig, QuizTarget};
pub use session::{QuizPhase, QuizSession, SubmissionPayload, Tick};
pub use timer::{QuizTimer, TimerTick};

use thiserror::Error;

/// Local validation failures; these never reach the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Question count outside the offered set
    #[error("{0} questions is not offered; choose 3, 5, 8, or 10")]
    InvalidQuestionCount(usize),

    /// Custom quiz needs at least two distinct topics
    #[error("Select at least 2 topics for a custom quiz ({selected} selected)")]
    TooFewTopics {
        /// How many topics are currently selected
        selected: usize,
    },

    /// A generation request is already in flight
    #[error("Quiz generation is already in progress")]
    RequestInFlight,

    /// The operation is not valid in the session's current phase
    #[error("Not available right now")]
    WrongPhase,
}
