use super::views::{EvidenceResponse, PredictionResponse};
use crate::providers::{SignalError, SignalProvider};
use crate::scoring::ScoringEngine;
use crate::signals::SignalSnapshot;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// Collects signals through the injected provider and scores them.
#[derive(Clone)]
pub struct PredictionService {
    provider: Arc<dyn SignalProvider>,
    engine: ScoringEngine,
}

impl PredictionService {
    pub fn new(provider: Arc<dyn SignalProvider>) -> Self {
        Self {
            provider,
            engine: ScoringEngine::new(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fetches every signal concurrently.
    ///
    /// A failing signal is logged and replaced by its neutral value, so a
    /// prediction can always be produced.
    pub async fn collect(&self, date: NaiveDate) -> SignalSnapshot {
        let provider = self.provider.as_ref();
        let (agenda, weather, holidays, mentions) = tokio::join!(
            provider.agenda(date),
            provider.weather(date),
            provider.holidays(date),
            provider.mentions(date),
        );

        SignalSnapshot {
            agenda: self.or_neutral("agenda", agenda),
            weather: self.or_neutral("weather", weather),
            holidays: self.or_neutral("holidays", holidays),
            mentions: self.or_neutral("mentions", mentions),
        }
    }

    /// Fetches every signal concurrently, failing on the first unavailable one.
    pub async fn try_collect(&self, date: NaiveDate) -> Result<SignalSnapshot, SignalError> {
        let provider = self.provider.as_ref();
        let (agenda, weather, holidays, mentions) = tokio::try_join!(
            provider.agenda(date),
            provider.weather(date),
            provider.holidays(date),
            provider.mentions(date),
        )?;

        Ok(SignalSnapshot {
            agenda,
            weather,
            holidays,
            mentions,
        })
    }

    pub async fn predict(&self, date: NaiveDate, city: &str) -> PredictionResponse {
        let signals = self.collect(date).await;
        self.predict_from(date, city, &signals)
    }

    /// Scores an already collected snapshot.
    pub fn predict_from(
        &self,
        date: NaiveDate,
        city: &str,
        signals: &SignalSnapshot,
    ) -> PredictionResponse {
        let result = self.engine.assess(date, signals);
        info!(
            %date,
            city,
            score = result.score,
            level = %result.level,
            provider = self.provider.name(),
            "traffic risk predicted"
        );
        PredictionResponse::new(date, city, result, signals, self.provider.name())
    }

    /// Raw signals for a date; unlike predictions, upstream failures are reported.
    pub async fn evidence(
        &self,
        date: NaiveDate,
        city: &str,
    ) -> Result<EvidenceResponse, SignalError> {
        let signals = self.try_collect(date).await?;
        Ok(EvidenceResponse::new(date, city, signals))
    }

    fn or_neutral<T: Default>(&self, signal: &'static str, result: Result<T, SignalError>) -> T {
        result.unwrap_or_else(|err| {
            warn!(
                signal,
                provider = self.provider.name(),
                error = %err,
                "signal unavailable; using neutral value"
            );
            T::default()
        })
    }
}
