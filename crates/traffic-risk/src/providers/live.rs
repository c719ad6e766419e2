use super::{SignalError, SignalProvider};
use crate::config::LiveSignalConfig;
use crate::signals::{AgendaEvent, Holiday, WeatherHour, OBSERVANCE_HOLIDAY_TYPE};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const METERS_PER_SECOND_TO_KPH: f64 = 3.6;
const DEFAULT_HOLIDAY_TYPE: &str = "public";
const NAGER_SOURCE: &str = "nager";

/// Provider backed by the agenda feed, OpenWeatherMap, Nager.Date, and Hebcal.
pub struct LiveSignalProvider {
    client: Client,
    config: LiveSignalConfig,
}

impl LiveSignalProvider {
    pub fn new(config: LiveSignalConfig) -> Result<Self, SignalError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| SignalError::Client {
                signal: "http",
                source,
            })?;
        Ok(Self { client, config })
    }

    async fn fetch_json<T: DeserializeOwned>(
        signal: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<T>, SignalError> {
        let response = request
            .send()
            .await
            .map_err(|source| SignalError::Http { signal, source })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SignalError::Status { signal, status });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|source| SignalError::Http { signal, source })
    }

    async fn public_holidays(&self, date: NaiveDate) -> Result<Vec<Holiday>, SignalError> {
        let settings = &self.config.holidays;
        let url = format!(
            "{}/PublicHolidays/{}/{}",
            settings.nager_base_url.trim_end_matches('/'),
            date.year(),
            settings.country_code
        );
        let entries: Vec<NagerHoliday> = Self::fetch_json("holidays", self.client.get(url))
            .await?
            .unwrap_or_default();

        Ok(entries
            .into_iter()
            .filter(|entry| entry.date == date)
            .map(|entry| {
                let kind = entry
                    .types
                    .first()
                    .map(|kind| kind.to_ascii_lowercase())
                    .unwrap_or_else(|| DEFAULT_HOLIDAY_TYPE.to_string());
                let name = if entry.local_name.is_empty() {
                    entry.name
                } else {
                    entry.local_name
                };
                Holiday::new(name, kind, NAGER_SOURCE)
            })
            .collect())
    }

    async fn observances(&self, date: NaiveDate) -> Result<Vec<Holiday>, SignalError> {
        let day = date.format("%Y-%m-%d").to_string();
        let request = self.client.get(&self.config.holidays.hebcal_base_url).query(&[
            ("v", "1"),
            ("cfg", "json"),
            ("maj", "on"),
            ("start", day.as_str()),
            ("end", day.as_str()),
        ]);
        let calendar: HebcalCalendar = Self::fetch_json("observances", request)
            .await?
            .unwrap_or_default();

        Ok(calendar
            .items
            .into_iter()
            .filter(|item| item.date.starts_with(&day))
            .map(|item| Holiday::new(item.title, OBSERVANCE_HOLIDAY_TYPE, OBSERVANCE_HOLIDAY_TYPE))
            .collect())
    }
}

#[async_trait]
impl SignalProvider for LiveSignalProvider {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn agenda(&self, date: NaiveDate) -> Result<Vec<AgendaEvent>, SignalError> {
        let Some(feed_url) = self.config.agenda.feed_url.as_deref() else {
            debug!("no agenda feed configured; assuming no gatherings");
            return Ok(Vec::new());
        };

        let day = date.format("%Y-%m-%d").to_string();
        let request = self.client.get(feed_url).query(&[("date", day.as_str())]);
        let events: Vec<AgendaEvent> = Self::fetch_json("agenda", request)
            .await?
            .unwrap_or_default();
        debug!(count = events.len(), "agenda events fetched");
        Ok(events)
    }

    async fn weather(&self, date: NaiveDate) -> Result<Vec<WeatherHour>, SignalError> {
        let settings = &self.config.weather;
        let Some(api_key) = settings.api_key.as_deref() else {
            debug!("no weather api key configured; skipping forecast");
            return Ok(Vec::new());
        };

        let latitude = settings.latitude.to_string();
        let longitude = settings.longitude.to_string();
        let request = self.client.get(&settings.base_url).query(&[
            ("lat", latitude.as_str()),
            ("lon", longitude.as_str()),
            ("exclude", "current,minutely,daily,alerts"),
            ("units", "metric"),
            ("appid", api_key),
        ]);
        let forecast: OneCallForecast = Self::fetch_json("weather", request)
            .await?
            .unwrap_or_default();

        let hours = forecast.hours_on(date);
        debug!(count = hours.len(), "forecast hours fetched");
        Ok(hours)
    }

    async fn holidays(&self, date: NaiveDate) -> Result<Vec<Holiday>, SignalError> {
        let mut holidays = self.public_holidays(date).await?;
        if self.config.holidays.include_observances {
            holidays.extend(self.observances(date).await?);
        }
        Ok(holidays)
    }
}

#[derive(Debug, Default, Deserialize)]
struct OneCallForecast {
    #[serde(default)]
    timezone_offset: i64,
    #[serde(default)]
    hourly: Vec<OneCallHour>,
}

impl OneCallForecast {
    /// Hours falling on `date` in the forecast location's local time.
    fn hours_on(&self, date: NaiveDate) -> Vec<WeatherHour> {
        self.hourly
            .iter()
            .filter_map(|entry| {
                let local = DateTime::from_timestamp(entry.dt + self.timezone_offset, 0)?
                    .naive_utc();
                if local.date() != date {
                    return None;
                }
                let rain_mm = entry.rain.as_ref().map_or(0.0, |rain| rain.one_hour);
                Some(WeatherHour::new(
                    local.hour() as u8,
                    entry.pop,
                    rain_mm,
                    entry.wind_speed * METERS_PER_SECOND_TO_KPH,
                ))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OneCallHour {
    dt: i64,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    wind_speed: f64,
    #[serde(default)]
    rain: Option<RainVolume>,
}

#[derive(Debug, Deserialize)]
struct RainVolume {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NagerHoliday {
    date: NaiveDate,
    #[serde(default)]
    local_name: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HebcalCalendar {
    #[serde(default)]
    items: Vec<HebcalItem>,
}

#[derive(Debug, Deserialize)]
struct HebcalItem {
    title: String,
    date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_keeps_only_local_hours_of_target_date() {
        // 2025-09-24T05:00:00Z is 2025-09-23T23:00 in UTC-6.
        let payload = r#"{
            "timezone_offset": -21600,
            "hourly": [
                {"dt": 1758690000, "pop": 0.9, "wind_speed": 2.0},
                {"dt": 1758693600, "pop": 0.45, "wind_speed": 10.0, "rain": {"1h": 1.2}},
                {"dt": 1758697200, "wind_speed": 1.0}
            ]
        }"#;
        let forecast: OneCallForecast = serde_json::from_str(payload).expect("forecast parses");
        let date = NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date");

        let hours = forecast.hours_on(date);
        assert_eq!(hours.len(), 2);
        assert_eq!(hours[0].hour, 0);
        assert_eq!(hours[0].pop, 0.45);
        assert_eq!(hours[0].rain_mm, 1.2);
        assert!((hours[0].wind_kph - 36.0).abs() < 1e-9);
        assert_eq!(hours[1].hour, 1);
        assert_eq!(hours[1].pop, 0.0);
    }
}
