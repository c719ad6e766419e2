use super::{SignalError, SignalProvider};
use crate::signals::{AgendaEvent, Holiday, WeatherHour};
use async_trait::async_trait;
use chrono::NaiveDate;

const CALM_WIND_KPH: f64 = 10.0;

/// Offline provider: no gatherings, a dry and calm day, and no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubSignalProvider;

#[async_trait]
impl SignalProvider for StubSignalProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn agenda(&self, _date: NaiveDate) -> Result<Vec<AgendaEvent>, SignalError> {
        Ok(Vec::new())
    }

    async fn weather(&self, _date: NaiveDate) -> Result<Vec<WeatherHour>, SignalError> {
        Ok((0..24)
            .map(|hour| WeatherHour::new(hour, 0.0, 0.0, CALM_WIND_KPH))
            .collect())
    }

    async fn holidays(&self, _date: NaiveDate) -> Result<Vec<Holiday>, SignalError> {
        Ok(Vec::new())
    }
}
