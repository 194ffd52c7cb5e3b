//! # Healthscan Core - The Logic
//!
//! Deterministic engine behind the business health scan: a thirteen-question
//! questionnaire scored into one of four bands and routed to a single
//! call-to-action.
//!
//! ## Layout
//!
//! ```text
//! questions ──► answers ──► scoring ──► routing ──► RecommendationResult
//!                  ▲
//!                  │ restore / save (best effort)
//!               wizard ◄── formats ◄── storage (StateSlot)
//! ```
//!
//! Everything here is synchronous and free of I/O except the `storage`
//! slots, which are plain key-value backends. Wall-clock time enters only
//! through the [`wizard::Clock`] seam so scoring and state transitions stay
//! reproducible.

pub mod answers;
pub mod formats;
pub mod questions;
pub mod routing;
pub mod scoring;
pub mod storage;
pub mod wizard;

pub use answers::AnswerSet;
pub use questions::{Answer, Choice, Question, QuestionId, Section, catalog, question};
pub use routing::{CtaConfig, CtaDestination, Route};
pub use scoring::{Band, Flag, HardStop, RecommendationResult, ScoreComponents, compute_result};
pub use storage::{MemorySlot, RedbSlot, StateSlot};
pub use wizard::{Clock, FixedClock, ScanSession, Screen};

use thiserror::Error;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors raised by the health scan core.
///
/// Scoring itself never fails; these cover the input boundary (labels and
/// keys), the step validation rule, and the storage collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A label that is not one of the allowed options for the question.
    #[error("'{label}' is not a valid answer for {question}")]
    InvalidLabel {
        question: QuestionId,
        label: String,
    },

    /// A question key outside `q1`..`q13`.
    #[error("unknown question key: {0}")]
    UnknownQuestion(String),

    /// The current step's question has not been answered yet.
    #[error("Please answer the question to continue.")]
    MissingAnswer(QuestionId),

    /// The key-value slot failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ScanError {
    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}
