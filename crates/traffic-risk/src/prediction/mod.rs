//! Request layer around the scoring engine: signal collection, payloads, and routes.

pub mod router;
pub mod service;
pub mod views;

pub use router::{prediction_router, PredictionQuery};
pub use service::PredictionService;
pub use views::{EvidenceItem, EvidenceResponse, PredictionResponse, DEFAULT_PEAK_HOURS};

use chrono::NaiveDate;
use serde::Deserialize;

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
