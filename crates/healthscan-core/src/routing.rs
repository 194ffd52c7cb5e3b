//! # Routing Module
//!
//! Maps a scored outcome to exactly one recommendation: a message, a CTA
//! label and a destination URL.
//!
//! Precedence, first match wins:
//! 1. any hard stop
//! 2. `BAND_1`
//! 3. `BAND_2`
//! 4. `BAND_3`
//! 5. `BAND_4` with `SHORT_HISTORY`
//! 6. `BAND_4`

use crate::scoring::{Band, Flag, HardStop};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use url::Url;

// =============================================================================
// DESTINATIONS
// =============================================================================

/// Where a call-to-action points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaDestination {
    Solutions,
    FinanceClarity,
    FundingReadiness,
    StrategySession,
    CapitalAssessment,
}

pub const DEFAULT_SOLUTIONS_URL: &str = "https://boltzmenn.com/solutions";
pub const DEFAULT_FINANCE_CLARITY_URL: &str = "https://boltzmenn.com/finance-clarity";
pub const DEFAULT_FUNDING_READINESS_URL: &str = "https://boltzmenn.com/funding-readiness";
pub const DEFAULT_STRATEGY_SESSION_URL: &str = "https://boltzmenn.com/strategy-session";

/// Configured CTA URLs.
///
/// Unset fields use the built-in destinations. `capital_assessment` has no
/// URL of its own by default and resolves to the funding-readiness page
/// until one is configured. Values must be absolute `http`/`https` URLs;
/// anything else fails to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CtaConfig {
    #[serde(deserialize_with = "web_url", skip_serializing_if = "Option::is_none")]
    pub solutions: Option<Url>,
    #[serde(deserialize_with = "web_url", skip_serializing_if = "Option::is_none")]
    pub finance_clarity: Option<Url>,
    #[serde(deserialize_with = "web_url", skip_serializing_if = "Option::is_none")]
    pub funding_readiness: Option<Url>,
    #[serde(deserialize_with = "web_url", skip_serializing_if = "Option::is_none")]
    pub strategy_session: Option<Url>,
    #[serde(deserialize_with = "web_url", skip_serializing_if = "Option::is_none")]
    pub capital_assessment: Option<Url>,
}

impl CtaConfig {
    /// Resolve a destination to its URL.
    #[must_use]
    pub fn url(&self, destination: CtaDestination) -> &str {
        fn or_default<'a>(url: Option<&'a Url>, fallback: &'a str) -> &'a str {
            url.map_or(fallback, Url::as_str)
        }

        match destination {
            CtaDestination::Solutions => or_default(self.solutions.as_ref(), DEFAULT_SOLUTIONS_URL),
            CtaDestination::FinanceClarity => {
                or_default(self.finance_clarity.as_ref(), DEFAULT_FINANCE_CLARITY_URL)
            }
            CtaDestination::FundingReadiness => self.funding_readiness_url(),
            CtaDestination::StrategySession => {
                or_default(self.strategy_session.as_ref(), DEFAULT_STRATEGY_SESSION_URL)
            }
            CtaDestination::CapitalAssessment => {
                or_default(self.capital_assessment.as_ref(), self.funding_readiness_url())
            }
        }
    }

    fn funding_readiness_url(&self) -> &str {
        self.funding_readiness
            .as_ref()
            .map_or(DEFAULT_FUNDING_READINESS_URL, Url::as_str)
    }
}

/// Parse one configured CTA value as an absolute web URL.
fn web_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let url = Url::parse(&raw)
        .map_err(|e| de::Error::custom(format!("invalid CTA URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        other => Err(de::Error::custom(format!(
            "CTA URL '{raw}' must use http or https, not {other}"
        ))),
    }
}

// =============================================================================
// ROUTES
// =============================================================================

/// The six possible recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Hard stop: no plan for the use of funds.
    PrepareFinances,
    /// `BAND_1`.
    ClarityAndStructure,
    /// `BAND_2`.
    FixSystems,
    /// `BAND_3`.
    PendingDeeperChecks,
    /// `BAND_4`, trading for less than a year.
    StrongNeedsDeeperCheck,
    /// `BAND_4`.
    MayBeReadyForFunding,
}

impl Route {
    /// Pick the route for a scored outcome.
    #[must_use]
    pub fn select(hard_stops: &[HardStop], band: Band, flags: &[Flag]) -> Self {
        if hard_stops.contains(&HardStop::NoUseOfFundsPlan) {
            return Self::PrepareFinances;
        }
        match band {
            Band::Band1 => Self::ClarityAndStructure,
            Band::Band2 => Self::FixSystems,
            Band::Band3 => Self::PendingDeeperChecks,
            Band::Band4 if flags.contains(&Flag::ShortHistory) => Self::StrongNeedsDeeperCheck,
            Band::Band4 => Self::MayBeReadyForFunding,
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::PrepareFinances => {
                "Taking funding right now would put your business under pressure. Financial clarity comes first."
            }
            Self::ClarityAndStructure => {
                "Your next step isn’t funding or scale. It’s clarity and structure."
            }
            Self::FixSystems => {
                "Your business isn’t broken — but it is unstructured. Fixing systems should come before growth or funding."
            }
            Self::PendingDeeperChecks => {
                "Your business shows signs of readiness, pending deeper checks."
            }
            Self::StrongNeedsDeeperCheck => {
                "Your business looks strong, but we need a deeper readiness check before any capital conversation."
            }
            Self::MayBeReadyForFunding => {
                "Your business may be ready for structured funding — pending a deeper assessment."
            }
        }
    }

    #[must_use]
    pub const fn cta_text(self) -> &'static str {
        match self {
            Self::PrepareFinances => "Prepare for Funding →",
            Self::ClarityAndStructure => "Book a Strategy Session →",
            Self::FixSystems => "See How We Fix This →",
            Self::PendingDeeperChecks | Self::StrongNeedsDeeperCheck => {
                "Run the Funding Readiness Check →"
            }
            Self::MayBeReadyForFunding => "Start the Capital Assessment →",
        }
    }

    #[must_use]
    pub const fn destination(self) -> CtaDestination {
        match self {
            Self::PrepareFinances => CtaDestination::FinanceClarity,
            Self::ClarityAndStructure => CtaDestination::StrategySession,
            Self::FixSystems => CtaDestination::Solutions,
            Self::PendingDeeperChecks | Self::StrongNeedsDeeperCheck => {
                CtaDestination::FundingReadiness
            }
            Self::MayBeReadyForFunding => CtaDestination::CapitalAssessment,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
