//! Property tests for the scoring engine.
//!
//! Answer sets are generated by picking, per question, either nothing or one
//! of its allowed options.

#![allow(clippy::unwrap_used)]

use healthscan_core::questions::FundsPlan;
use healthscan_core::scoring::{
    FINANCIAL_CLARITY_MAX, FOUNDER_DEPENDENCY_MAX, GROWTH_INTENT_MAX, OPERATIONS_AND_TEAM_MAX,
    SALES_CONSISTENCY_MAX, compute_result_default,
};
use healthscan_core::{AnswerSet, Band, HardStop, QuestionId, Route};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// One optional option index per question.
fn answer_set() -> impl Strategy<Value = AnswerSet> {
    let per_question: Vec<_> = QuestionId::ALL
        .iter()
        .map(|id| proptest::option::of(0..id.options().len()))
        .collect();

    per_question.prop_map(|picks| {
        let mut answers = AnswerSet::new();
        for (id, pick) in QuestionId::ALL.iter().zip(picks) {
            if let Some(index) = pick {
                answers.set_answer(id.options()[index]);
            }
        }
        answers
    })
}

/// Fully answered sets only.
fn complete_answer_set() -> impl Strategy<Value = AnswerSet> {
    let per_question: Vec<_> = QuestionId::ALL
        .iter()
        .map(|id| 0..id.options().len())
        .collect();

    per_question.prop_map(|picks| {
        let mut answers = AnswerSet::new();
        for (id, index) in QuestionId::ALL.iter().zip(picks) {
            answers.set_answer(id.options()[index]);
        }
        answers
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn total_is_sum_of_bounded_components(answers in answer_set()) {
        let result = compute_result_default(&answers);
        let c = result.components;

        prop_assert!(c.financial_clarity <= FINANCIAL_CLARITY_MAX);
        prop_assert!(c.sales_consistency <= SALES_CONSISTENCY_MAX);
        prop_assert!(c.operations_and_team <= OPERATIONS_AND_TEAM_MAX);
        prop_assert!(c.founder_dependency_derived <= FOUNDER_DEPENDENCY_MAX);
        prop_assert!(c.growth_intent <= GROWTH_INTENT_MAX);

        prop_assert_eq!(
            result.total,
            c.financial_clarity
                + c.sales_consistency
                + c.operations_and_team
                + c.founder_dependency_derived
                + c.growth_intent
        );
        prop_assert!(result.total <= 100);
    }

    #[test]
    fn band_matches_thresholds(answers in answer_set()) {
        let result = compute_result_default(&answers);
        let expected = match result.total {
            t if t <= 39 => Band::Band1,
            t if t <= 59 => Band::Band2,
            t if t <= 74 => Band::Band3,
            _ => Band::Band4,
        };
        prop_assert_eq!(result.band, expected);
    }

    #[test]
    fn hard_stop_iff_no_funds_plan(answers in answer_set()) {
        let result = compute_result_default(&answers);
        let no_plan = answers.funds_plan() == Some(FundsPlan::No);

        prop_assert_eq!(result.hard_stops.contains(&HardStop::NoUseOfFundsPlan), no_plan);
        prop_assert_eq!(result.route == Route::PrepareFinances, no_plan);
    }

    #[test]
    fn scoring_is_deterministic(answers in answer_set()) {
        let first = compute_result_default(&answers);
        let second = compute_result_default(&answers.clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unanswering_never_raises_the_score(answers in complete_answer_set(), drop in 0usize..13) {
        let full = compute_result_default(&answers);
        let mut partial = answers.clone();
        partial.clear(QuestionId::from_index(drop).unwrap());

        let reduced = compute_result_default(&partial);
        prop_assert!(reduced.total <= full.total);
    }

    #[test]
    fn unanswered_set_is_band_one(_seed in 0u8..4) {
        let result = compute_result_default(&AnswerSet::new());
        prop_assert_eq!(result.total, 0);
        prop_assert_eq!(result.band, Band::Band1);
        prop_assert!(result.hard_stops.is_empty());
    }
}

#[test]
fn maximum_is_exactly_one_hundred() {
    let best = QuestionId::ALL
        .iter()
        .map(|id| {
            id.options()
                .into_iter()
                .map(|option| {
                    let mut answers = AnswerSet::new();
                    answers.set_answer(option);
                    (option, compute_result_default(&answers).total)
                })
                .max_by_key(|(_, total)| *total)
                .unwrap()
                .0
        })
        .fold(AnswerSet::new(), |mut answers, option| {
            answers.set_answer(option);
            answers
        });

    assert_eq!(compute_result_default(&best).total, 100);
}
