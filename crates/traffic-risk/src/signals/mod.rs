//! Signal records consumed by the scoring engine.
//!
//! Every record is built fresh per request by a [`crate::providers::SignalProvider`]
//! and read without mutation by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Holiday `type` tag for religious observances, which never suppress traffic.
pub const OBSERVANCE_HOLIDAY_TYPE: &str = "hebcal";

/// Agenda kinds that denote a public gathering on the street.
pub const GATHERING_KINDS: [&str; 4] = ["marcha", "concentración", "manifestación", "protesta"];

/// One scheduled public gathering taken from the city agenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaEvent {
    pub kind: String,
    #[serde(default)]
    pub expected_attendance: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_ts: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_ts: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub pages: Vec<u32>,
}

impl AgendaEvent {
    pub fn new(kind: impl Into<String>, expected_attendance: u32) -> Self {
        Self {
            kind: kind.into(),
            expected_attendance,
            start_ts: None,
            end_ts: None,
            description: None,
            source: None,
            pages: Vec::new(),
        }
    }

    /// True when the kind (case-insensitively) names a march, rally, or protest.
    pub fn is_gathering(&self) -> bool {
        let kind = self.kind.to_lowercase();
        GATHERING_KINDS.contains(&kind.as_str())
    }
}

/// Forecast for a single hour of the target date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherHour {
    pub hour: u8,
    pub pop: f64,
    #[serde(default)]
    pub rain_mm: f64,
    #[serde(default)]
    pub wind_kph: f64,
}

impl WeatherHour {
    pub fn new(hour: u8, pop: f64, rain_mm: f64, wind_kph: f64) -> Self {
        Self {
            hour,
            pop,
            rain_mm,
            wind_kph,
        }
    }
}

/// A holiday or observance falling on the target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
}

impl Holiday {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            source: source.into(),
        }
    }

    pub fn is_observance(&self) -> bool {
        self.kind == OBSERVANCE_HOLIDAY_TYPE
    }
}

/// Already-resolved signals for a single prediction request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub agenda: Vec<AgendaEvent>,
    pub weather: Vec<WeatherHour>,
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub mentions: u32,
}

impl SignalSnapshot {
    pub fn gatherings(&self) -> impl Iterator<Item = &AgendaEvent> {
        self.agenda.iter().filter(|event| event.is_gathering())
    }
}
