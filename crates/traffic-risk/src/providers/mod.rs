//! Signal acquisition behind a single swappable capability.
//!
//! The prediction service only sees [`SignalProvider`]; whether signals come
//! from static defaults or third-party APIs is decided when the service is built.

mod live;
mod stub;

pub use live::LiveSignalProvider;
pub use stub::StubSignalProvider;

use crate::signals::{AgendaEvent, Holiday, WeatherHour};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of the agenda, weather, holiday, and mention signals for a date.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn agenda(&self, date: NaiveDate) -> Result<Vec<AgendaEvent>, SignalError>;

    async fn weather(&self, date: NaiveDate) -> Result<Vec<WeatherHour>, SignalError>;

    async fn holidays(&self, date: NaiveDate) -> Result<Vec<Holiday>, SignalError>;

    /// Social media mentions for the date; providers without a feed report none.
    async fn mentions(&self, _date: NaiveDate) -> Result<u32, SignalError> {
        Ok(0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("{signal} request failed: {source}")]
    Http {
        signal: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{signal} endpoint returned status {status}")]
    Status {
        signal: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{signal} client could not be built: {source}")]
    Client {
        signal: &'static str,
        #[source]
        source: reqwest::Error,
    },
}
