use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal traffic risk classes, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Extreme,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }

    /// Classifies a score into five intervals whose upper bounds are inclusive.
    ///
    /// `NaN` is reported as [`RiskLevel::Extreme`]: an undefined score gets the
    /// most conservative level. Infinities follow their sign.
    pub fn from_score(score: f64) -> Self {
        if score.is_nan() {
            Self::Extreme
        } else if score <= 1.0 {
            Self::Low
        } else if score <= 2.0 {
            Self::Medium
        } else if score <= 3.0 {
            Self::High
        } else if score <= 4.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn map_score_to_level(score: f64) -> RiskLevel {
    RiskLevel::from_score(score)
}
