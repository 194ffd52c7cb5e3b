//! # Questions Module
//!
//! The fixed questionnaire: thirteen single-select questions in five
//! sections, and one closed label enum per question.
//!
//! Labels are matched exactly, except that typographic apostrophes and
//! dashes are folded to their ASCII forms first, so `"I don't track
//! consistently"` and `"I don’t track consistently"` name the same option.
//! Canonical labels keep the typographic form.

use crate::ScanError;
use std::fmt;

// =============================================================================
// CHOICE TRAIT
// =============================================================================

/// A closed set of answer labels for one question.
pub trait Choice: Copy + Sized + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// The canonical label shown to the user and written to storage.
    fn label(self) -> &'static str;

    /// Parse a label, tolerating ASCII stand-ins for typographic marks.
    fn from_label(label: &str) -> Option<Self> {
        let wanted = normalize_label(label);
        Self::ALL
            .iter()
            .copied()
            .find(|choice| normalize_label(choice.label()) == wanted)
    }
}

/// Fold typographic apostrophes and dashes to ASCII.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' => '\'',
            '\u{2013}' => '-',
            other => other,
        })
        .collect()
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

// =============================================================================
// LABEL ENUMS (one per question)
// =============================================================================

choice_enum! {
    /// q1: how long the business has been operating.
    OperatingHistory {
        LessThanOneYear => "Less than 1 year",
        OneToThreeYears => "1–3 years",
        ThreeToFiveYears => "3–5 years",
        FivePlusYears => "5+ years",
    }
}

choice_enum! {
    /// q2: the respondent's role. Informational only, never scored.
    Role {
        FounderOwner => "Founder / Owner",
        CoFounder => "Co-founder",
        ManagingDirector => "Managing Director",
        OperationsLead => "Operations Lead",
    }
}

choice_enum! {
    /// q3: does the owner know monthly profit, not just revenue.
    ProfitVisibility {
        YesClearly => "Yes, clearly",
        RoughIdea => "Rough idea",
        NotReally => "Not really",
        No => "No",
    }
}

choice_enum! {
    /// q4: how finances are tracked.
    FinanceTracking {
        AccountingSoftware => "Proper accounting software",
        Spreadsheets => "Spreadsheets",
        BankAlertsOnly => "Bank alerts only",
        Inconsistent => "I don’t track consistently",
    }
}

choice_enum! {
    /// q5: three months of expenses covered without new income.
    CashRunway {
        Yes => "Yes",
        Maybe => "Maybe",
        No => "No",
    }
}

choice_enum! {
    /// q6: predictability of monthly sales.
    SalesPredictability {
        VeryPredictable => "Very predictable",
        SomewhatPredictable => "Somewhat predictable",
        Inconsistent => "Inconsistent",
        CompletelyUnpredictable => "Completely unpredictable",
    }
}

choice_enum! {
    /// q7: where most customers come from.
    CustomerSource {
        Referrals => "Referrals",
        RepeatCustomers => "Repeat customers",
        MarketingCampaigns => "Marketing campaigns",
        WalkIns => "Walk-ins / random",
    }
}

choice_enum! {
    /// q8: whether a defined sales process exists.
    SalesProcess {
        Documented => "Yes, documented",
        InformalButConsistent => "Informal but consistent",
        InMyHead => "In my head",
        No => "No",
    }
}

choice_enum! {
    /// q9: how dependent the business is on the founder.
    FounderDependency {
        RunsWithoutMe => "Can run without me",
        NeedsMeOccasionally => "Needs me occasionally",
        NeedsMeDaily => "Needs me daily",
        CompletelyDependsOnMe => "Completely depends on me",
    }
}

choice_enum! {
    /// q10: staff have clear roles and accountability.
    RoleClarity {
        Yes => "Yes",
        Somewhat => "Somewhat",
        No => "No",
    }
}

choice_enum! {
    /// q11: how often things break because nobody followed up.
    BreakdownFrequency {
        Rarely => "Rarely",
        Sometimes => "Sometimes",
        Often => "Often",
    }
}

choice_enum! {
    /// q12: considering funding in the next 6-12 months.
    FundingIntent {
        Yes => "Yes",
        Maybe => "Maybe",
        No => "No",
    }
}

choice_enum! {
    /// q13: knows exactly how funding received today would be used.
    FundsPlan {
        YesClearly => "Yes, clearly",
        RoughIdea => "Rough idea",
        No => "No",
    }
}

// =============================================================================
// QUESTION IDS
// =============================================================================

/// Identifier of one of the thirteen questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
    Q11,
    Q12,
    Q13,
}

impl QuestionId {
    /// All questions in presentation order.
    pub const ALL: [QuestionId; 13] = [
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Q5,
        Self::Q6,
        Self::Q7,
        Self::Q8,
        Self::Q9,
        Self::Q10,
        Self::Q11,
        Self::Q12,
        Self::Q13,
    ];

    /// Zero-based position, which is also the wizard step that asks it.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Question asked at a zero-based position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Storage key (`"q1"`..`"q13"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
            Self::Q5 => "q5",
            Self::Q6 => "q6",
            Self::Q7 => "q7",
            Self::Q8 => "q8",
            Self::Q9 => "q9",
            Self::Q10 => "q10",
            Self::Q11 => "q11",
            Self::Q12 => "q12",
            Self::Q13 => "q13",
        }
    }

    /// Inverse of [`QuestionId::key`].
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// The section this question belongs to.
    #[must_use]
    pub fn section(self) -> Section {
        match self {
            Self::Q1 | Self::Q2 => Section::BusinessBasics,
            Self::Q3 | Self::Q4 | Self::Q5 => Section::FinanceAndCashFlow,
            Self::Q6 | Self::Q7 | Self::Q8 => Section::SalesConsistency,
            Self::Q9 | Self::Q10 | Self::Q11 => Section::OperationsAndTeam,
            Self::Q12 | Self::Q13 => Section::GrowthAndFundingReadiness,
        }
    }

    /// The allowed answers, in display order.
    #[must_use]
    pub fn options(self) -> Vec<Answer> {
        fn wrap<T: Choice>(f: fn(T) -> Answer) -> Vec<Answer> {
            T::ALL.iter().copied().map(f).collect()
        }

        match self {
            Self::Q1 => wrap(Answer::OperatingHistory),
            Self::Q2 => wrap(Answer::Role),
            Self::Q3 => wrap(Answer::ProfitVisibility),
            Self::Q4 => wrap(Answer::FinanceTracking),
            Self::Q5 => wrap(Answer::CashRunway),
            Self::Q6 => wrap(Answer::SalesPredictability),
            Self::Q7 => wrap(Answer::CustomerSource),
            Self::Q8 => wrap(Answer::SalesProcess),
            Self::Q9 => wrap(Answer::FounderDependency),
            Self::Q10 => wrap(Answer::RoleClarity),
            Self::Q11 => wrap(Answer::BreakdownFrequency),
            Self::Q12 => wrap(Answer::FundingIntent),
            Self::Q13 => wrap(Answer::FundsPlan),
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// ANSWER
// =============================================================================

/// A valid answer to one specific question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    OperatingHistory(OperatingHistory),
    Role(Role),
    ProfitVisibility(ProfitVisibility),
    FinanceTracking(FinanceTracking),
    CashRunway(CashRunway),
    SalesPredictability(SalesPredictability),
    CustomerSource(CustomerSource),
    SalesProcess(SalesProcess),
    FounderDependency(FounderDependency),
    RoleClarity(RoleClarity),
    BreakdownFrequency(BreakdownFrequency),
    FundingIntent(FundingIntent),
    FundsPlan(FundsPlan),
}

impl Answer {
    /// Parse `label` as an answer to `question`.
    pub fn parse(question: QuestionId, label: &str) -> Result<Self, ScanError> {
        fn lift<T: Choice>(label: &str, f: fn(T) -> Answer) -> Option<Answer> {
            T::from_label(label).map(f)
        }

        let parsed = match question {
            QuestionId::Q1 => lift(label, Self::OperatingHistory),
            QuestionId::Q2 => lift(label, Self::Role),
            QuestionId::Q3 => lift(label, Self::ProfitVisibility),
            QuestionId::Q4 => lift(label, Self::FinanceTracking),
            QuestionId::Q5 => lift(label, Self::CashRunway),
            QuestionId::Q6 => lift(label, Self::SalesPredictability),
            QuestionId::Q7 => lift(label, Self::CustomerSource),
            QuestionId::Q8 => lift(label, Self::SalesProcess),
            QuestionId::Q9 => lift(label, Self::FounderDependency),
            QuestionId::Q10 => lift(label, Self::RoleClarity),
            QuestionId::Q11 => lift(label, Self::BreakdownFrequency),
            QuestionId::Q12 => lift(label, Self::FundingIntent),
            QuestionId::Q13 => lift(label, Self::FundsPlan),
        };

        parsed.ok_or_else(|| ScanError::InvalidLabel {
            question,
            label: label.to_string(),
        })
    }

    /// The question this answer belongs to.
    #[must_use]
    pub fn question(self) -> QuestionId {
        match self {
            Self::OperatingHistory(_) => QuestionId::Q1,
            Self::Role(_) => QuestionId::Q2,
            Self::ProfitVisibility(_) => QuestionId::Q3,
            Self::FinanceTracking(_) => QuestionId::Q4,
            Self::CashRunway(_) => QuestionId::Q5,
            Self::SalesPredictability(_) => QuestionId::Q6,
            Self::CustomerSource(_) => QuestionId::Q7,
            Self::SalesProcess(_) => QuestionId::Q8,
            Self::FounderDependency(_) => QuestionId::Q9,
            Self::RoleClarity(_) => QuestionId::Q10,
            Self::BreakdownFrequency(_) => QuestionId::Q11,
            Self::FundingIntent(_) => QuestionId::Q12,
            Self::FundsPlan(_) => QuestionId::Q13,
        }
    }

    /// Canonical label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OperatingHistory(c) => c.label(),
            Self::Role(c) => c.label(),
            Self::ProfitVisibility(c) => c.label(),
            Self::FinanceTracking(c) => c.label(),
            Self::CashRunway(c) => c.label(),
            Self::SalesPredictability(c) => c.label(),
            Self::CustomerSource(c) => c.label(),
            Self::SalesProcess(c) => c.label(),
            Self::FounderDependency(c) => c.label(),
            Self::RoleClarity(c) => c.label(),
            Self::BreakdownFrequency(c) => c.label(),
            Self::FundingIntent(c) => c.label(),
            Self::FundsPlan(c) => c.label(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// SECTIONS AND CATALOG
// =============================================================================

/// The five labelled groups the questions are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    BusinessBasics,
    FinanceAndCashFlow,
    SalesConsistency,
    OperationsAndTeam,
    GrowthAndFundingReadiness,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::BusinessBasics,
        Self::FinanceAndCashFlow,
        Self::SalesConsistency,
        Self::OperationsAndTeam,
        Self::GrowthAndFundingReadiness,
    ];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::BusinessBasics => 'A',
            Self::FinanceAndCashFlow => 'B',
            Self::SalesConsistency => 'C',
            Self::OperationsAndTeam => 'D',
            Self::GrowthAndFundingReadiness => 'E',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BusinessBasics => "Business Basics",
            Self::FinanceAndCashFlow => "Finance & Cash Flow",
            Self::SalesConsistency => "Sales Consistency",
            Self::OperationsAndTeam => "Operations & Team",
            Self::GrowthAndFundingReadiness => "Growth & Funding Readiness",
        }
    }

    /// Heading shown above each question, e.g. `Section A — Business Basics`.
    #[must_use]
    pub fn title(self) -> String {
        format!("Section {} — {}", self.letter(), self.name())
    }

    /// Questions in this section, in order.
    #[must_use]
    pub fn questions(self) -> Vec<QuestionId> {
        QuestionId::ALL
            .into_iter()
            .filter(|id| id.section() == self)
            .collect()
    }
}

/// One screen of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
}

impl Question {
    const fn new(id: QuestionId, title: &'static str) -> Self {
        Self {
            id,
            title,
            subtitle: None,
        }
    }

    const fn with_subtitle(mut self, subtitle: &'static str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.id.section()
    }

    #[must_use]
    pub fn options(&self) -> Vec<Answer> {
        self.id.options()
    }
}

static CATALOG: [Question; 13] = [
    Question::new(QuestionId::Q1, "How long has your business been operating?"),
    Question::new(QuestionId::Q2, "Which best describes your current role?")
        .with_subtitle("This helps interpret your answers properly."),
    Question::new(QuestionId::Q3, "Do you know your monthly profit, not just revenue?"),
    Question::new(QuestionId::Q4, "How do you currently track your finances?"),
    Question::new(
        QuestionId::Q5,
        "Can your business cover expenses for the next 3 months without new income?",
    ),
    Question::new(QuestionId::Q6, "How predictable are your monthly sales?"),
    Question::new(QuestionId::Q7, "Where do most of your customers come from?"),
    Question::new(QuestionId::Q8, "Do you have a defined sales process?"),
    Question::new(QuestionId::Q9, "How dependent is the business on you personally?"),
    Question::new(QuestionId::Q10, "Do your staff have clear roles and accountability?"),
    Question::new(
        QuestionId::Q11,
        "How often do things break because “someone forgot” or “no one followed up”?",
    ),
    Question::new(QuestionId::Q12, "Are you considering funding in the next 6–12 months?"),
    Question::new(
        QuestionId::Q13,
        "If you received funding today, do you know exactly how it would be used?",
    ),
];

/// The full questionnaire, in presentation order.
#[must_use]
pub fn catalog() -> &'static [Question; 13] {
    &CATALOG
}

/// Catalog entry for one question.
#[must_use]
pub fn question(id: QuestionId) -> &'static Question {
    &CATALOG[id.index()]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_roundtrip_and_reject_unknown() {
        for id in QuestionId::ALL {
            assert_eq!(QuestionId::parse_key(id.key()), Some(id));
        }
        assert_eq!(QuestionId::parse_key("q0"), None);
        assert_eq!(QuestionId::parse_key("q14"), None);
        assert_eq!(QuestionId::parse_key("Q1"), None);
    }

    #[test]
    fn catalog_is_indexed_by_question() {
        for (index, entry) in catalog().iter().enumerate() {
            assert_eq!(entry.id.index(), index);
            assert_eq!(question(entry.id).id, entry.id);
        }
    }

    #[test]
    fn sections_partition_questions() {
        let counts: Vec<usize> = Section::ALL.iter().map(|s| s.questions().len()).collect();
        assert_eq!(counts, vec![2, 3, 3, 3, 2]);
        assert_eq!(
            Section::FinanceAndCashFlow.title(),
            "Section B — Finance & Cash Flow"
        );
    }

    #[test]
    fn typographic_labels_accept_ascii_forms() {
        assert_eq!(
            FinanceTracking::from_label("I don't track consistently"),
            Some(FinanceTracking::Inconsistent)
        );
        assert_eq!(
            FinanceTracking::from_label("I don’t track consistently"),
            Some(FinanceTracking::Inconsistent)
        );
        assert_eq!(
            OperatingHistory::from_label("1-3 years"),
            Some(OperatingHistory::OneToThreeYears)
        );
    }

    #[test]
    fn labels_are_exact_otherwise() {
        assert_eq!(CashRunway::from_label("yes"), None);
        assert_eq!(CashRunway::from_label(" Yes"), None);
        assert_eq!(CashRunway::from_label(""), None);
    }

    #[test]
    fn parse_is_scoped_to_the_question() {
        // "Rough idea" is valid for q3 and q13 but not for q5.
        assert!(Answer::parse(QuestionId::Q3, "Rough idea").is_ok());
        assert!(Answer::parse(QuestionId::Q13, "Rough idea").is_ok());

        let err = Answer::parse(QuestionId::Q5, "Rough idea");
        assert_eq!(
            err,
            Err(ScanError::InvalidLabel {
                question: QuestionId::Q5,
                label: "Rough idea".to_string(),
            })
        );
    }

    #[test]
    fn options_follow_display_order() {
        let labels: Vec<&str> = QuestionId::Q7.options().iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Referrals",
                "Repeat customers",
                "Marketing campaigns",
                "Walk-ins / random"
            ]
        );
        for id in QuestionId::ALL {
            for option in id.options() {
                assert_eq!(option.question(), id);
                assert_eq!(Answer::parse(id, option.label()), Ok(option));
            }
        }
    }
}
