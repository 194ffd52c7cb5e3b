//! # Answers Module
//!
//! The thirteen-slot answer set. Every question always has a slot; an empty
//! slot is the "unanswered" sentinel and serializes as `""`.

use crate::ScanError;
use crate::questions::{
    Answer, BreakdownFrequency, CashRunway, CustomerSource, FinanceTracking, FounderDependency,
    FundingIntent, FundsPlan, OperatingHistory, ProfitVisibility, QuestionId, Role, RoleClarity,
    SalesPredictability, SalesProcess,
};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers keyed by question, `None` meaning unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AnswerSet {
    slots: [Option<Answer>; 13],
}

impl AnswerSet {
    /// An answer set with every question unanswered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<Answer> {
        self.slots[id.index()]
    }

    /// The stored label, or `""` when unanswered.
    #[must_use]
    pub fn label(&self, id: QuestionId) -> &'static str {
        self.get(id).map_or("", Answer::label)
    }

    /// Set an answer from its label.
    ///
    /// An empty label clears the slot. Labels that are not allowed for the
    /// question are rejected and the set is left unchanged.
    pub fn set(&mut self, id: QuestionId, label: &str) -> Result<(), ScanError> {
        if label.is_empty() {
            self.clear(id);
            return Ok(());
        }
        let answer = Answer::parse(id, label)?;
        self.slots[id.index()] = Some(answer);
        Ok(())
    }

    /// Store an already-typed answer in its question's slot.
    pub fn set_answer(&mut self, answer: Answer) {
        self.slots[answer.question().index()] = Some(answer);
    }

    pub fn clear(&mut self, id: QuestionId) {
        self.slots[id.index()] = None;
    }

    /// Clear every slot.
    pub fn clear_all(&mut self) {
        self.slots = [None; 13];
    }

    #[must_use]
    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn first_unanswered(&self) -> Option<QuestionId> {
        QuestionId::ALL.into_iter().find(|id| !self.is_answered(*id))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.first_unanswered().is_none()
    }

    /// `(key, label)` pairs for every question, in order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &'static str)> + '_ {
        QuestionId::ALL.into_iter().map(|id| (id, self.label(id)))
    }

    // -------------------------------------------------------------------------
    // Typed accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn operating_history(&self) -> Option<OperatingHistory> {
        match self.get(QuestionId::Q1) {
            Some(Answer::OperatingHistory(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self.get(QuestionId::Q2) {
            Some(Answer::Role(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn profit_visibility(&self) -> Option<ProfitVisibility> {
        match self.get(QuestionId::Q3) {
            Some(Answer::ProfitVisibility(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn finance_tracking(&self) -> Option<FinanceTracking> {
        match self.get(QuestionId::Q4) {
            Some(Answer::FinanceTracking(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn cash_runway(&self) -> Option<CashRunway> {
        match self.get(QuestionId::Q5) {
            Some(Answer::CashRunway(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn sales_predictability(&self) -> Option<SalesPredictability> {
        match self.get(QuestionId::Q6) {
            Some(Answer::SalesPredictability(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn customer_source(&self) -> Option<CustomerSource> {
        match self.get(QuestionId::Q7) {
            Some(Answer::CustomerSource(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn sales_process(&self) -> Option<SalesProcess> {
        match self.get(QuestionId::Q8) {
            Some(Answer::SalesProcess(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn founder_dependency(&self) -> Option<FounderDependency> {
        match self.get(QuestionId::Q9) {
            Some(Answer::FounderDependency(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn role_clarity(&self) -> Option<RoleClarity> {
        match self.get(QuestionId::Q10) {
            Some(Answer::RoleClarity(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn breakdown_frequency(&self) -> Option<BreakdownFrequency> {
        match self.get(QuestionId::Q11) {
            Some(Answer::BreakdownFrequency(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn funding_intent(&self) -> Option<FundingIntent> {
        match self.get(QuestionId::Q12) {
            Some(Answer::FundingIntent(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn funds_plan(&self) -> Option<FundsPlan> {
        match self.get(QuestionId::Q13) {
            Some(Answer::FundsPlan(c)) => Some(c),
            _ => None,
        }
    }
}

// =============================================================================
// SERDE
// =============================================================================

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(QuestionId::ALL.len()))?;
        for (id, label) in self.iter() {
            map.serialize_entry(id.key(), label)?;
        }
        map.end()
    }
}

/// Strict decoding: unknown keys and invalid labels are errors, missing keys
/// and `""` are unanswered. Persisted state uses the lenient path in
/// [`crate::formats`] instead.
impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut answers = AnswerSet::new();
        for (key, label) in &raw {
            let id = QuestionId::parse_key(key)
                .ok_or_else(|| de::Error::custom(ScanError::UnknownQuestion(key.clone())))?;
            answers.set(id, label).map_err(de::Error::custom)?;
        }
        Ok(answers)
    }
}

// =============================================================================
// TESTS
// =============================================================================
