//! # Wizard Module
//!
//! The answer store and step machine behind the one-question-per-screen
//! flow.
//!
//! ```text
//! step 0 ── q1
//!  ...
//! step 12 ─ q13          advance() validates the current answer
//! step 13 ─ recommendation (computed fresh on every screen())
//!             advance() / restart() → step 0, answers kept
//!             reset()               → step 0, answers cleared, slot wiped
//! ```
//!
//! Every mutation saves the state to the injected [`StateSlot`]. Saving is
//! best effort: a failure never aborts the operation, it is parked for the
//! caller to collect with [`ScanSession::take_persist_error`].

use crate::ScanError;
use crate::answers::AnswerSet;
use crate::formats::{MAX_STEP, PersistedRecord, decode_record, encode_record};
use crate::questions::{Question, QuestionId, question};
use crate::routing::CtaConfig;
use crate::scoring::{RecommendationResult, compute_result};
use crate::storage::StateSlot;

/// Question screens plus the recommendation screen.
pub const TOTAL_SCREENS: usize = 14;

/// Step index of the recommendation screen.
pub const RECOMMENDATION_STEP: usize = MAX_STEP;

// =============================================================================
// CLOCK
// =============================================================================

/// Source of the `savedAt` timestamp.
pub trait Clock {
    /// Current time as an RFC 3339 string.
    fn now(&self) -> String;
}

/// A clock that always returns the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl Default for FixedClock {
    fn default() -> Self {
        Self("1970-01-01T00:00:00Z".to_string())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

// =============================================================================
// SCREEN
// =============================================================================

/// What the current step shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Question(&'static Question),
    Recommendation(RecommendationResult),
}

// =============================================================================
// SESSION
// =============================================================================

/// Live wizard state bound to a storage slot.
#[derive(Debug)]
pub struct ScanSession<S: StateSlot, C: Clock> {
    step: usize,
    answers: AnswerSet,
    slot: S,
    clock: C,
    cta: CtaConfig,
    persist_error: Option<ScanError>,
}

impl<S: StateSlot, C: Clock> ScanSession<S, C> {
    /// Start a session, restoring whatever the slot holds.
    ///
    /// A missing, unreadable or malformed record yields a fresh session.
    pub fn open(slot: S, clock: C) -> Self {
        let mut session = Self {
            step: 0,
            answers: AnswerSet::new(),
            slot,
            clock,
            cta: CtaConfig::default(),
            persist_error: None,
        };

        match session.slot.get() {
            Ok(Some(raw)) => {
                if let Some(restored) = decode_record(&raw) {
                    restored.apply(&mut session.step, &mut session.answers);
                }
            }
            Ok(None) => {}
            Err(e) => session.persist_error = Some(e),
        }

        session
    }

    /// Use custom CTA destinations for the recommendation screen.
    #[must_use]
    pub fn with_cta(mut self, cta: CtaConfig) -> Self {
        self.cta = cta;
        self
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn slot(&self) -> &S {
        &self.slot
    }

    #[must_use]
    pub fn cta(&self) -> &CtaConfig {
        &self.cta
    }

    /// Current label for a question, `""` when unanswered.
    #[must_use]
    pub fn get(&self, id: QuestionId) -> &'static str {
        self.answers.label(id)
    }

    /// Record an answer and save.
    ///
    /// Invalid labels are rejected without touching state or storage.
    pub fn set(&mut self, id: QuestionId, label: &str) -> Result<(), ScanError> {
        self.answers.set(id, label)?;
        self.save();
        Ok(())
    }

    /// Immutable copy of the answers for scoring.
    #[must_use]
    pub fn snapshot_for_scoring(&self) -> AnswerSet {
        self.answers.clone()
    }

    /// Score the current answers.
    #[must_use]
    pub fn recommendation(&self) -> RecommendationResult {
        compute_result(&self.snapshot_for_scoring(), &self.cta)
    }

    #[must_use]
    pub fn is_on_recommendation(&self) -> bool {
        self.step == RECOMMENDATION_STEP
    }

    /// The question asked at the current step, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&'static Question> {
        QuestionId::from_index(self.step).map(question)
    }

    /// What to show for the current step.
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self.current_question() {
            Some(q) => Screen::Question(q),
            None => Screen::Recommendation(self.recommendation()),
        }
    }

    /// Move forward one screen.
    ///
    /// On a question screen the question must be answered first, otherwise
    /// [`ScanError::MissingAnswer`] is returned and nothing changes. On the
    /// recommendation screen this goes back to the first question.
    pub fn advance(&mut self) -> Result<(), ScanError> {
        if self.is_on_recommendation() {
            self.restart();
            return Ok(());
        }
        if let Some(q) = self.current_question() {
            if !self.answers.is_answered(q.id) {
                return Err(ScanError::MissingAnswer(q.id));
            }
        }
        self.step += 1;
        self.save();
        Ok(())
    }

    /// Move back one screen. Returns `false` on the first screen.
    pub fn back(&mut self) -> bool {
        if self.step == 0 {
            return false;
        }
        self.step -= 1;
        self.save();
        true
    }

    /// Return to the first question, keeping every answer.
    pub fn restart(&mut self) {
        self.step = 0;
        self.save();
    }

    /// Clear every answer, wipe storage, and start over.
    pub fn reset(&mut self) {
        if let Err(e) = self.slot.remove() {
            self.persist_error = Some(e);
        }
        self.step = 0;
        self.answers.clear_all();
        self.save();
    }

    /// Percentage shown in the progress bar, rounded half up.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let done = (self.step + 1) * 100;
        ((done + TOTAL_SCREENS / 2) / TOTAL_SCREENS) as u8
    }

    /// Label for the forward button.
    #[must_use]
    pub fn continue_label(&self) -> &'static str {
        match self.step {
            12 => "See Recommendation",
            RECOMMENDATION_STEP => "Update Answers",
            _ => "Continue",
        }
    }

    /// Take the most recent storage failure, if any.
    pub fn take_persist_error(&mut self) -> Option<ScanError> {
        self.persist_error.take()
    }

    /// Give back the slot, e.g. to inspect what was stored.
    pub fn into_slot(self) -> S {
        self.slot
    }

    fn save(&mut self) {
        let record = PersistedRecord::new(self.step, self.answers.clone(), self.clock.now());
        let result = encode_record(&record).and_then(|raw| self.slot.set(&raw));
        if let Err(e) = result {
            self.persist_error = Some(e);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
