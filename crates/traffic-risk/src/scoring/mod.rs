//! Deterministic traffic risk scoring.
//!
//! The engine turns already-resolved signals into a numeric score, an ordinal
//! [`RiskLevel`], and ordered reasons. It performs no I/O and keeps no state,
//! so it can be shared freely across concurrent requests.

mod level;
mod reasoning;
mod rules;

pub use level::{map_score_to_level, RiskLevel};
pub use reasoning::generate_reasoning;
pub use rules::compute_score;

use crate::signals::SignalSnapshot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stateless evaluator combining score, level, and reasoning for one date.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, date: NaiveDate, signals: &SignalSnapshot) -> ScoreResult {
        let score = compute_score(
            date,
            &signals.agenda,
            &signals.weather,
            &signals.holidays,
            signals.mentions,
        );
        let level = map_score_to_level(score);
        let reasons = generate_reasoning(
            date,
            &signals.agenda,
            &signals.weather,
            &signals.holidays,
            score,
        );

        ScoreResult {
            score,
            level,
            reasons,
        }
    }
}

/// Engine output for a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub level: RiskLevel,
    pub reasons: Vec<String>,
}
