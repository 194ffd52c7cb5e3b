//! # Scoring Module
//!
//! The recommendation engine: five sub-scores summed into a 0-100 total,
//! banded by fixed thresholds, then routed.
//!
//! | Sub-score                    | Questions   | Max |
//! |------------------------------|-------------|-----|
//! | financial clarity            | q3, q4, q5  | 30  |
//! | sales consistency            | q6, q7, q8  | 25  |
//! | operations and team          | q9, q10, q11| 20  |
//! | founder dependency (derived) | q9, q11     | 15  |
//! | growth intent                | q12, q13    | 10  |
//!
//! Unanswered questions score 0. `compute_result` is total: it is defined for
//! every `AnswerSet`, including an empty one, and never fails.

use crate::answers::AnswerSet;
use crate::questions::{
    BreakdownFrequency, CashRunway, CustomerSource, FinanceTracking, FounderDependency,
    FundingIntent, FundsPlan, OperatingHistory, ProfitVisibility, RoleClarity, SalesPredictability,
    SalesProcess,
};
use crate::routing::{CtaConfig, CtaDestination, Route};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FINANCIAL_CLARITY_MAX: u32 = 30;
pub const SALES_CONSISTENCY_MAX: u32 = 25;
pub const OPERATIONS_AND_TEAM_MAX: u32 = 20;
pub const FOUNDER_DEPENDENCY_MAX: u32 = 15;
pub const GROWTH_INTENT_MAX: u32 = 10;

// =============================================================================
// POINT TABLES
// =============================================================================

impl ProfitVisibility {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::YesClearly => 10,
            Self::RoughIdea => 5,
            Self::NotReally => 2,
            Self::No => 0,
        }
    }
}

impl FinanceTracking {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::AccountingSoftware => 10,
            Self::Spreadsheets => 6,
            Self::BankAlertsOnly => 2,
            Self::Inconsistent => 0,
        }
    }
}

impl CashRunway {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Yes => 10,
            Self::Maybe => 5,
            Self::No => 0,
        }
    }
}

impl SalesPredictability {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::VeryPredictable => 10,
            Self::SomewhatPredictable => 6,
            Self::Inconsistent => 2,
            Self::CompletelyUnpredictable => 0,
        }
    }
}

impl CustomerSource {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::RepeatCustomers => 5,
            Self::Referrals => 4,
            Self::MarketingCampaigns => 3,
            Self::WalkIns => 1,
        }
    }
}

impl SalesProcess {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Documented => 10,
            Self::InformalButConsistent => 6,
            Self::InMyHead => 2,
            Self::No => 0,
        }
    }
}

impl FounderDependency {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::RunsWithoutMe => 10,
            Self::NeedsMeOccasionally => 6,
            Self::NeedsMeDaily => 2,
            Self::CompletelyDependsOnMe => 0,
        }
    }
}

impl RoleClarity {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Yes => 5,
            Self::Somewhat => 3,
            Self::No => 0,
        }
    }
}

impl BreakdownFrequency {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Rarely => 5,
            Self::Sometimes => 3,
            Self::Often => 0,
        }
    }
}

impl FundingIntent {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Yes => 5,
            Self::Maybe => 3,
            Self::No => 1,
        }
    }
}

impl FundsPlan {
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::YesClearly => 5,
            Self::RoughIdea => 3,
            Self::No => 0,
        }
    }
}

// =============================================================================
// SUB-SCORERS
// =============================================================================

/// q3 + q4 + q5, out of 30.
#[must_use]
pub fn financial_clarity(answers: &AnswerSet) -> u32 {
    answers.profit_visibility().map_or(0, ProfitVisibility::points)
        + answers.finance_tracking().map_or(0, FinanceTracking::points)
        + answers.cash_runway().map_or(0, CashRunway::points)
}

/// q6 + q7 + q8, out of 25.
#[must_use]
pub fn sales_consistency(answers: &AnswerSet) -> u32 {
    answers.sales_predictability().map_or(0, SalesPredictability::points)
        + answers.customer_source().map_or(0, CustomerSource::points)
        + answers.sales_process().map_or(0, SalesProcess::points)
}

/// q9 + q10 + q11, out of 20.
#[must_use]
pub fn operations_and_team(answers: &AnswerSet) -> u32 {
    answers.founder_dependency().map_or(0, FounderDependency::points)
        + answers.role_clarity().map_or(0, RoleClarity::points)
        + answers.breakdown_frequency().map_or(0, BreakdownFrequency::points)
}

/// q12 + q13, out of 10.
#[must_use]
pub fn growth_intent(answers: &AnswerSet) -> u32 {
    answers.funding_intent().map_or(0, FundingIntent::points)
        + answers.funds_plan().map_or(0, FundsPlan::points)
}

/// How much the business leans on its founder (q9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyTier {
    Low,
    Medium,
    High,
}

impl From<FounderDependency> for DependencyTier {
    fn from(value: FounderDependency) -> Self {
        match value {
            FounderDependency::RunsWithoutMe => Self::Low,
            FounderDependency::NeedsMeOccasionally => Self::Medium,
            FounderDependency::NeedsMeDaily | FounderDependency::CompletelyDependsOnMe => {
                Self::High
            }
        }
    }
}

/// How often operations break down (q11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownTier {
    Rare,
    Sometimes,
    Often,
}

impl From<BreakdownFrequency> for BreakdownTier {
    fn from(value: BreakdownFrequency) -> Self {
        match value {
            BreakdownFrequency::Rarely => Self::Rare,
            BreakdownFrequency::Sometimes => Self::Sometimes,
            BreakdownFrequency::Often => Self::Often,
        }
    }
}

/// Founder-dependency bonus from the q9 and q11 tiers, out of 15.
///
/// Rules are checked in order and the first match wins.
#[must_use]
pub fn founder_dependency_bonus(
    dependency: Option<DependencyTier>,
    breakdown: Option<BreakdownTier>,
) -> u32 {
    use BreakdownTier::{Rare, Sometimes};
    use DependencyTier::{Low, Medium};

    match (dependency, breakdown) {
        (Some(Low), Some(Rare)) => 15,
        (Some(Medium), Some(Sometimes | Rare)) | (Some(Low), Some(Sometimes)) => 8,
        // High dependency, frequent breakdowns, or a missing answer.
        _ => 0,
    }
}

/// Derived founder-dependency score for an answer set.
#[must_use]
pub fn founder_dependency_derived(answers: &AnswerSet) -> u32 {
    founder_dependency_bonus(
        answers.founder_dependency().map(DependencyTier::from),
        answers.breakdown_frequency().map(BreakdownTier::from),
    )
}

// =============================================================================
// COMPONENTS AND BANDS
// =============================================================================

/// The five sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub financial_clarity: u32,
    pub sales_consistency: u32,
    pub operations_and_team: u32,
    pub founder_dependency_derived: u32,
    pub growth_intent: u32,
}

impl ScoreComponents {
    #[must_use]
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            financial_clarity: financial_clarity(answers),
            sales_consistency: sales_consistency(answers),
            operations_and_team: operations_and_team(answers),
            founder_dependency_derived: founder_dependency_derived(answers),
            growth_intent: growth_intent(answers),
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.financial_clarity
            + self.sales_consistency
            + self.operations_and_team
            + self.founder_dependency_derived
            + self.growth_intent
    }
}

/// Outcome band from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "BAND_1")]
    Band1,
    #[serde(rename = "BAND_2")]
    Band2,
    #[serde(rename = "BAND_3")]
    Band3,
    #[serde(rename = "BAND_4")]
    Band4,
}

impl Band {
    /// `<=39`, `40..=59`, `60..=74`, `>=75`.
    #[must_use]
    pub const fn from_total(total: u32) -> Self {
        match total {
            0..=39 => Self::Band1,
            40..=59 => Self::Band2,
            60..=74 => Self::Band3,
            _ => Self::Band4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Band1 => "BAND_1",
            Self::Band2 => "BAND_2",
            Self::Band3 => "BAND_3",
            Self::Band4 => "BAND_4",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing overrides that take precedence over the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HardStop {
    /// q13 == "No".
    NoUseOfFundsPlan,
}

impl HardStop {
    #[must_use]
    pub fn detect(answers: &AnswerSet) -> Vec<HardStop> {
        let mut stops = Vec::new();
        if answers.funds_plan() == Some(FundsPlan::No) {
            stops.push(Self::NoUseOfFundsPlan);
        }
        stops
    }
}

/// Informational flags that refine routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    /// q1 == "Less than 1 year".
    ShortHistory,
}

impl Flag {
    #[must_use]
    pub fn detect(answers: &AnswerSet) -> Vec<Flag> {
        let mut flags = Vec::new();
        if answers.operating_history() == Some(OperatingHistory::LessThanOneYear) {
            flags.push(Self::ShortHistory);
        }
        flags
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// A freshly computed recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub total: u32,
    pub band: Band,
    pub components: ScoreComponents,
    pub hard_stops: Vec<HardStop>,
    pub flags: Vec<Flag>,
    pub route: Route,
    pub message: String,
    pub cta_text: String,
    pub cta_url: String,
}

impl RecommendationResult {
    #[must_use]
    pub fn is_hard_stopped(&self) -> bool {
        !self.hard_stops.is_empty()
    }

    #[must_use]
    pub fn destination(&self) -> CtaDestination {
        self.route.destination()
    }
}

/// Score, band and route an answer set.
#[must_use]
pub fn compute_result(answers: &AnswerSet, cta: &CtaConfig) -> RecommendationResult {
    let components = ScoreComponents::from_answers(answers);
    let total = components.total();
    let hard_stops = HardStop::detect(answers);
    let flags = Flag::detect(answers);
    let band = Band::from_total(total);
    let route = Route::select(&hard_stops, band, &flags);

    RecommendationResult {
        total,
        band,
        components,
        hard_stops,
        flags,
        route,
        message: route.message().to_string(),
        cta_text: route.cta_text().to_string(),
        cta_url: cta.url(route.destination()).to_string(),
    }
}

/// [`compute_result`] with the built-in CTA destinations.
#[must_use]
pub fn compute_result_default(answers: &AnswerSet) -> RecommendationResult {
    compute_result(answers, &CtaConfig::default())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::questions::{Answer, QuestionId};
    use crate::routing::{DEFAULT_FINANCE_CLARITY_URL, DEFAULT_FUNDING_READINESS_URL};

    fn answers_from(pairs: &[(QuestionId, &str)]) -> AnswerSet {
        let mut answers = AnswerSet::new();
        for (id, label) in pairs {
            answers.set(*id, label).unwrap();
        }
        answers
    }

    fn strongest() -> AnswerSet {
        answers_from(&[
            (QuestionId::Q1, "5+ years"),
            (QuestionId::Q2, "Founder / Owner"),
            (QuestionId::Q3, "Yes, clearly"),
            (QuestionId::Q4, "Proper accounting software"),
            (QuestionId::Q5, "Yes"),
            (QuestionId::Q6, "Very predictable"),
            (QuestionId::Q7, "Repeat customers"),
            (QuestionId::Q8, "Yes, documented"),
            (QuestionId::Q9, "Can run without me"),
            (QuestionId::Q10, "Yes"),
            (QuestionId::Q11, "Rarely"),
            (QuestionId::Q12, "Yes"),
            (QuestionId::Q13, "Yes, clearly"),
        ])
    }

    #[test]
    fn empty_answers_score_zero_in_band_one() {
        let result = compute_result_default(&AnswerSet::new());
        assert_eq!(result.total, 0);
        assert_eq!(result.band, Band::Band1);
        assert!(!result.is_hard_stopped());
        assert_eq!(result.route, Route::ClarityAndStructure);
    }

    #[test]
    fn strongest_answers_score_one_hundred() {
        let result = compute_result_default(&strongest());
        assert_eq!(
            result.components,
            ScoreComponents {
                financial_clarity: 30,
                sales_consistency: 25,
                operations_and_team: 20,
                founder_dependency_derived: 15,
                growth_intent: 10,
            }
        );
        assert_eq!(result.total, 100);
        assert_eq!(result.band, Band::Band4);
        assert!(result.flags.is_empty());
        assert_eq!(result.route, Route::MayBeReadyForFunding);
        assert!(result.message.contains("may be ready for structured funding"));
        assert_eq!(result.cta_text, "Start the Capital Assessment →");
        assert_eq!(result.cta_url, DEFAULT_FUNDING_READINESS_URL);
    }

    #[test]
    fn no_funds_plan_overrides_band_four() {
        let mut answers = strongest();
        answers.set(QuestionId::Q13, "No").unwrap();

        let result = compute_result_default(&answers);
        assert_eq!(result.components.growth_intent, 5);
        assert_eq!(result.total, 95);
        assert_eq!(result.band, Band::Band4);
        assert_eq!(result.hard_stops, vec![HardStop::NoUseOfFundsPlan]);
        assert_eq!(result.route, Route::PrepareFinances);
        assert_eq!(result.cta_url, DEFAULT_FINANCE_CLARITY_URL);
    }

    #[test]
    fn short_history_in_band_four() {
        let mut answers = strongest();
        answers.set(QuestionId::Q1, "Less than 1 year").unwrap();

        let result = compute_result_default(&answers);
        assert_eq!(result.flags, vec![Flag::ShortHistory]);
        assert_eq!(result.route, Route::StrongNeedsDeeperCheck);
        assert_eq!(result.cta_text, "Run the Funding Readiness Check →");
        assert_eq!(result.cta_url, DEFAULT_FUNDING_READINESS_URL);
    }

    /// Every scored option and its points; q1 and q2 carry no points.
    const POINT_TABLE: [(QuestionId, &str, u32); 47] = [
        (QuestionId::Q1, "Less than 1 year", 0),
        (QuestionId::Q1, "1–3 years", 0),
        (QuestionId::Q1, "3–5 years", 0),
        (QuestionId::Q1, "5+ years", 0),
        (QuestionId::Q2, "Founder / Owner", 0),
        (QuestionId::Q2, "Co-founder", 0),
        (QuestionId::Q2, "Managing Director", 0),
        (QuestionId::Q2, "Operations Lead", 0),
        (QuestionId::Q3, "Yes, clearly", 10),
        (QuestionId::Q3, "Rough idea", 5),
        (QuestionId::Q3, "Not really", 2),
        (QuestionId::Q3, "No", 0),
        (QuestionId::Q4, "Proper accounting software", 10),
        (QuestionId::Q4, "Spreadsheets", 6),
        (QuestionId::Q4, "Bank alerts only", 2),
        (QuestionId::Q4, "I don’t track consistently", 0),
        (QuestionId::Q5, "Yes", 10),
        (QuestionId::Q5, "Maybe", 5),
        (QuestionId::Q5, "No", 0),
        (QuestionId::Q6, "Very predictable", 10),
        (QuestionId::Q6, "Somewhat predictable", 6),
        (QuestionId::Q6, "Inconsistent", 2),
        (QuestionId::Q6, "Completely unpredictable", 0),
        (QuestionId::Q7, "Repeat customers", 5),
        (QuestionId::Q7, "Referrals", 4),
        (QuestionId::Q7, "Marketing campaigns", 3),
        (QuestionId::Q7, "Walk-ins / random", 1),
        (QuestionId::Q8, "Yes, documented", 10),
        (QuestionId::Q8, "Informal but consistent", 6),
        (QuestionId::Q8, "In my head", 2),
        (QuestionId::Q8, "No", 0),
        (QuestionId::Q9, "Can run without me", 10),
        (QuestionId::Q9, "Needs me occasionally", 6),
        (QuestionId::Q9, "Needs me daily", 2),
        (QuestionId::Q9, "Completely depends on me", 0),
        (QuestionId::Q10, "Yes", 5),
        (QuestionId::Q10, "Somewhat", 3),
        (QuestionId::Q10, "No", 0),
        (QuestionId::Q11, "Rarely", 5),
        (QuestionId::Q11, "Sometimes", 3),
        (QuestionId::Q11, "Often", 0),
        (QuestionId::Q12, "Yes", 5),
        (QuestionId::Q12, "Maybe", 3),
        (QuestionId::Q12, "No", 1),
        (QuestionId::Q13, "Yes, clearly", 5),
        (QuestionId::Q13, "Rough idea", 3),
        (QuestionId::Q13, "No", 0),
    ];

    #[test]
    fn every_option_scores_its_table_value() {
        // A lone answer never triggers the founder bonus, which needs q9 and q11.
        for (id, label, points) in POINT_TABLE {
            let result = compute_result_default(&answers_from(&[(id, label)]));
            assert_eq!(result.total, points, "{id} = {label:?}");
        }
    }

    #[test]
    fn point_table_covers_every_option() {
        let options: usize = QuestionId::ALL.iter().map(|id| id.options().len()).sum();
        assert_eq!(POINT_TABLE.len(), options);
        for (id, label, _) in POINT_TABLE {
            assert!(Answer::parse(id, label).is_ok(), "{id} = {label:?}");
        }
    }

    #[test]
    fn sub_scores_land_in_their_own_component() {
        let answers = answers_from(&[
            (QuestionId::Q4, "Spreadsheets"),
            (QuestionId::Q7, "Walk-ins / random"),
            (QuestionId::Q10, "Somewhat"),
            (QuestionId::Q12, "No"),
        ]);
        assert_eq!(
            ScoreComponents::from_answers(&answers),
            ScoreComponents {
                financial_clarity: 6,
                sales_consistency: 1,
                operations_and_team: 3,
                founder_dependency_derived: 0,
                growth_intent: 1,
            }
        );
    }

    #[test]
    fn band_boundaries() {
        let cases = [
            (0, Band::Band1),
            (39, Band::Band1),
            (40, Band::Band2),
            (59, Band::Band2),
            (60, Band::Band3),
            (74, Band::Band3),
            (75, Band::Band4),
            (100, Band::Band4),
        ];
        for (total, band) in cases {
            assert_eq!(Band::from_total(total), band, "total {total}");
        }
    }

    #[test]
    fn founder_dependency_rule_order() {
        use BreakdownTier::{Often, Rare, Sometimes};
        use DependencyTier::{High, Low, Medium};

        assert_eq!(founder_dependency_bonus(Some(Low), Some(Rare)), 15);
        // Medium + Rare falls to the second rule, not the first.
        assert_eq!(founder_dependency_bonus(Some(Medium), Some(Rare)), 8);
        assert_eq!(founder_dependency_bonus(Some(Medium), Some(Sometimes)), 8);
        assert_eq!(founder_dependency_bonus(Some(Low), Some(Sometimes)), 8);
        assert_eq!(founder_dependency_bonus(Some(High), Some(Rare)), 0);
        assert_eq!(founder_dependency_bonus(Some(Low), Some(Often)), 0);
        assert_eq!(founder_dependency_bonus(Some(Medium), Some(Often)), 0);
        assert_eq!(founder_dependency_bonus(Some(Low), None), 0);
        assert_eq!(founder_dependency_bonus(None, Some(Rare)), 0);
    }

    #[test]
    fn band_two_and_three_routes() {
        // financial 30 + sales 25 = 55
        let band_two = answers_from(&[
            (QuestionId::Q3, "Yes, clearly"),
            (QuestionId::Q4, "Proper accounting software"),
            (QuestionId::Q5, "Yes"),
            (QuestionId::Q6, "Very predictable"),
            (QuestionId::Q7, "Repeat customers"),
            (QuestionId::Q8, "Yes, documented"),
        ]);
        let result = compute_result_default(&band_two);
        assert_eq!(result.total, 55);
        assert_eq!(result.route, Route::FixSystems);

        // 55 + q9 "Needs me occasionally" (6) + q11 "Sometimes" (3) + bonus 8 = 72
        let mut band_three = band_two;
        band_three.set(QuestionId::Q9, "Needs me occasionally").unwrap();
        band_three.set(QuestionId::Q11, "Sometimes").unwrap();
        let result = compute_result_default(&band_three);
        assert_eq!(result.total, 72);
        assert_eq!(result.route, Route::PendingDeeperChecks);
    }

    #[test]
    fn result_serializes_with_wire_names() {
        let result = compute_result_default(&AnswerSet::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["band"], "BAND_1");
        assert_eq!(json["ctaUrl"], "https://boltzmenn.com/strategy-session");
        assert!(json.get("ctaText").is_some());
    }
}
