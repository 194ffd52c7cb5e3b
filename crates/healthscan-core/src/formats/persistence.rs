//! Persisted wizard state.
//!
//! Wire format (one JSON object under [`STORAGE_KEY`]):
//!
//! ```text
//! {"step": 4, "answers": {"q1": "5+ years", ..., "q13": ""}, "savedAt": "2026-01-01T00:00:00Z"}
//! ```
//!
//! Decoding never fails. A record that is not JSON, or whose root is not an
//! object, is treated as absent; otherwise `step` and each answer are taken
//! only if they are well-typed and valid, and everything else keeps its
//! default. Some JSON writers emit integers as `3.0`, so a whole-number
//! float is a valid step.

use crate::ScanError;
use crate::answers::AnswerSet;
use crate::questions::{Answer, QuestionId};
use serde::Serialize;
use serde_json::Value;

/// Key of the single storage slot.
pub const STORAGE_KEY: &str = "boltzmenn_health_scan_v1";

/// Highest valid step: the recommendation screen.
pub const MAX_STEP: usize = 13;

/// The record written on every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    pub step: usize,
    pub answers: AnswerSet,
    pub saved_at: String,
}

impl PersistedRecord {
    #[must_use]
    pub fn new(step: usize, answers: AnswerSet, saved_at: impl Into<String>) -> Self {
        Self {
            step,
            answers,
            saved_at: saved_at.into(),
        }
    }
}

/// Encode a record as compact JSON.
pub fn encode_record(record: &PersistedRecord) -> Result<String, ScanError> {
    serde_json::to_string(record).map_err(|e| ScanError::Serialization(e.to_string()))
}

/// The usable parts of a stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredState {
    pub step: Option<usize>,
    pub answers: Vec<Answer>,
    pub saved_at: Option<String>,
}

impl RestoredState {
    /// Merge into live state; fields that were not restored are untouched.
    pub fn apply(self, step: &mut usize, answers: &mut AnswerSet) {
        if let Some(restored) = self.step {
            *step = restored;
        }
        for answer in self.answers {
            answers.set_answer(answer);
        }
    }
}

/// A step in `0..=MAX_STEP`, written either as an integer or as a float
/// with no fractional part (`3.0`).
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
fn whole_step(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok().filter(|n| *n <= MAX_STEP);
    }
    let n = value.as_f64()?;
    (0..=MAX_STEP).find(|step| *step as f64 == n)
}

/// Best-effort decode of a stored record.
#[must_use]
pub fn decode_record(raw: &str) -> Option<RestoredState> {
    let root: Value = serde_json::from_str(raw).ok()?;
    let record = root.as_object()?;

    let step = record.get("step").and_then(whole_step);

    let answers = record
        .get("answers")
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(key, value)| {
                    let id = QuestionId::parse_key(key)?;
                    let label = value.as_str()?;
                    Answer::parse(id, label).ok()
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let saved_at = record
        .get("savedAt")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(RestoredState {
        step,
        answers,
        saved_at,
    })
}

// =============================================================================
// TESTS
// =============================================================================
