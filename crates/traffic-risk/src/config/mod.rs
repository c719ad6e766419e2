use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
const DEFAULT_NAGER_URL: &str = "https://date.nager.at/api/v3";
const DEFAULT_HEBCAL_URL: &str = "https://www.hebcal.com/hebcal";
/// Zócalo, Mexico City.
const DEFAULT_LATITUDE: f64 = 19.4326;
const DEFAULT_LONGITUDE: f64 = -99.1332;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Which signal provider backs predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMode {
    Stub,
    Live,
}

impl SignalMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "live" => Ok(Self::Live),
            _ => Err(ConfigError::InvalidSignalMode {
                value: value.to_string(),
            }),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub signal_mode: SignalMode,
    pub signals: LiveSignalConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let signal_mode =
            SignalMode::parse(&env::var("SIGNAL_MODE").unwrap_or_else(|_| "stub".to_string()))?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            signal_mode,
            signals: LiveSignalConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Everything the live signal provider needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct LiveSignalConfig {
    pub timeout: Duration,
    pub agenda: AgendaFeedConfig,
    pub weather: WeatherApiConfig,
    pub holidays: HolidayApiConfig,
}

impl LiveSignalConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout = match optional_var("SIGNAL_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber { key: "SIGNAL_TIMEOUT_SECS" })?,
            ),
            None => defaults.timeout,
        };

        Ok(Self {
            timeout,
            agenda: AgendaFeedConfig {
                feed_url: optional_var("AGENDA_FEED_URL"),
            },
            weather: WeatherApiConfig {
                api_key: optional_var("OPENWEATHER_API_KEY"),
                base_url: optional_var("OPENWEATHER_BASE_URL")
                    .unwrap_or(defaults.weather.base_url),
                latitude: coordinate("WEATHER_LAT", defaults.weather.latitude)?,
                longitude: coordinate("WEATHER_LON", defaults.weather.longitude)?,
            },
            holidays: HolidayApiConfig {
                country_code: optional_var("HOLIDAY_COUNTRY")
                    .unwrap_or(defaults.holidays.country_code),
                nager_base_url: optional_var("NAGER_BASE_URL")
                    .unwrap_or(defaults.holidays.nager_base_url),
                hebcal_base_url: optional_var("HEBCAL_BASE_URL")
                    .unwrap_or(defaults.holidays.hebcal_base_url),
                include_observances: match optional_var("HEBCAL_ENABLED") {
                    Some(raw) => parse_flag(&raw)?,
                    None => defaults.holidays.include_observances,
                },
            },
        })
    }
}

impl Default for LiveSignalConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            agenda: AgendaFeedConfig { feed_url: None },
            weather: WeatherApiConfig {
                api_key: None,
                base_url: DEFAULT_OPENWEATHER_URL.to_string(),
                latitude: DEFAULT_LATITUDE,
                longitude: DEFAULT_LONGITUDE,
            },
            holidays: HolidayApiConfig {
                country_code: "MX".to_string(),
                nager_base_url: DEFAULT_NAGER_URL.to_string(),
                hebcal_base_url: DEFAULT_HEBCAL_URL.to_string(),
                include_observances: true,
            },
        }
    }
}

/// JSON agenda feed returning the gatherings for `?date=YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct AgendaFeedConfig {
    pub feed_url: Option<String>,
}

/// OpenWeatherMap One Call settings for a fixed forecast location.
#[derive(Debug, Clone)]
pub struct WeatherApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct HolidayApiConfig {
    pub country_code: String,
    pub nager_base_url: String,
    pub hebcal_base_url: String,
    pub include_observances: bool,
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn coordinate(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match optional_var(key) {
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber { key }),
        None => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: "HEBCAL_ENABLED",
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSignalMode { value: String },
    InvalidNumber { key: &'static str },
    InvalidFlag { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSignalMode { value } => {
                write!(f, "SIGNAL_MODE must be 'stub' or 'live', got '{value}'")
            }
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a valid number"),
            ConfigError::InvalidFlag { key } => write!(f, "{key} must be true or false"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSignalMode { .. }
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}
