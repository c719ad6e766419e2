use crate::scoring::{RiskLevel, ScoreResult};
use crate::signals::{AgendaEvent, Holiday, SignalSnapshot, WeatherHour};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Usual rush-hour windows reported with every prediction.
pub const DEFAULT_PEAK_HOURS: [&str; 2] = ["07:00-10:00", "15:00-19:00"];

const AGENDA_EVIDENCE_TYPE: &str = "agenda";
const UNNAMED_EVENT_TITLE: &str = "event";

/// Generic evidence record backing a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default)]
    pub pages: Vec<u32>,
}

impl EvidenceItem {
    pub fn from_agenda(event: &AgendaEvent) -> Self {
        let title = if event.kind.trim().is_empty() {
            UNNAMED_EVENT_TITLE.to_string()
        } else {
            event.kind.clone()
        };

        Self {
            kind: AGENDA_EVIDENCE_TYPE.to_string(),
            title,
            url: event.source.clone().unwrap_or_default(),
            when: event.start_ts.map(|start| start.to_rfc3339()),
            pages: event.pages.clone(),
        }
    }

    /// Evidence for every gathering in the snapshot's agenda.
    pub fn collect(signals: &SignalSnapshot) -> Vec<Self> {
        signals.gatherings().map(Self::from_agenda).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub date: NaiveDate,
    pub city: String,
    pub level: RiskLevel,
    pub score: f64,
    pub peak_hours: Vec<String>,
    pub reasons: Vec<String>,
    pub evidence: Vec<EvidenceItem>,
    pub signal_source: String,
}

impl PredictionResponse {
    pub fn new(
        date: NaiveDate,
        city: impl Into<String>,
        result: ScoreResult,
        signals: &SignalSnapshot,
        signal_source: &str,
    ) -> Self {
        Self {
            date,
            city: city.into(),
            level: result.level,
            score: result.score,
            peak_hours: DEFAULT_PEAK_HOURS.iter().map(|window| window.to_string()).collect(),
            reasons: result.reasons,
            evidence: EvidenceItem::collect(signals),
            signal_source: signal_source.to_string(),
        }
    }
}

/// Evidence plus the raw signals used for a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceResponse {
    pub date: NaiveDate,
    pub city: String,
    pub evidence: Vec<EvidenceItem>,
    pub agenda: Vec<AgendaEvent>,
    pub weather: Vec<WeatherHour>,
    pub holidays: Vec<Holiday>,
}

impl EvidenceResponse {
    pub fn new(date: NaiveDate, city: impl Into<String>, signals: SignalSnapshot) -> Self {
        Self {
            date,
            city: city.into(),
            evidence: EvidenceItem::collect(&signals),
            agenda: signals.agenda,
            weather: signals.weather,
            holidays: signals.holidays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn agenda_projection_fills_defaults() {
        let mut event = AgendaEvent::new("  ", 300);
        event.pages = vec![3, 4];
        let item = EvidenceItem::from_agenda(&event);
        assert_eq!(item.kind, "agenda");
        assert_eq!(item.title, "event");
        assert_eq!(item.url, "");
        assert_eq!(item.pages, vec![3, 4]);
        assert!(item.when.is_none());
    }

    #[test]
    fn agenda_projection_keeps_source_and_start() {
        let mut event = AgendaEvent::new("marcha", 2_000);
        event.source = Some("https://ssc.cdmx.gob.mx/agenda.pdf".to_string());
        event.start_ts = Some(Utc
            .with_ymd_and_hms(2025, 9, 26, 16, 0, 0)
            .single()
            .expect("valid timestamp"));
        let item = EvidenceItem::from_agenda(&event);
        assert_eq!(item.title, "marcha");
        assert_eq!(item.url, "https://ssc.cdmx.gob.mx/agenda.pdf");
        assert_eq!(item.when.as_deref(), Some("2025-09-26T16:00:00+00:00"));
    }

    #[test]
    fn only_gatherings_become_evidence() {
        let signals = SignalSnapshot {
            agenda: vec![
                AgendaEvent::new("protesta", 50),
                AgendaEvent::new("concierto", 20_000),
            ],
            ..SignalSnapshot::default()
        };
        let evidence = EvidenceItem::collect(&signals);
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].title, "protesta");

        let json = serde_json::to_value(&evidence[0]).expect("evidence serializes");
        assert_eq!(json["type"], "agenda");
    }
}
