use crate::signals::{AgendaEvent, Holiday, WeatherHour};
use chrono::{Datelike, NaiveDate};

pub(crate) const FRIDAY: u32 = 4;
pub(crate) const THURSDAY: u32 = 3;
const FIRST_WEEKEND_DAY: u32 = 5;

const DEFAULT_BASELINE: f64 = 0.5;
const WIND_THRESHOLD_KPH: f64 = 35.0;
const WIND_WEIGHT: f64 = 0.3;
const HOLIDAY_WEIGHT: f64 = 1.0;
/// Rain probability from which a rain reason is reported.
pub(crate) const RAIN_REASON_POP: f64 = 0.4;

/// Monday-indexed weekday (Monday = 0 .. Sunday = 6).
pub(crate) fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

pub(crate) fn baseline_weight(weekday: u32) -> f64 {
    match weekday {
        0 => 0.8,
        1 => 0.6,
        2 => 0.8,
        3 => 1.0,
        4 => 2.0,
        5 => 0.4,
        6 => 0.2,
        _ => DEFAULT_BASELINE,
    }
}

pub(crate) fn is_weekend(weekday: u32) -> bool {
    weekday >= FIRST_WEEKEND_DAY
}

pub(crate) fn gathering_weight(event: &AgendaEvent) -> f64 {
    if !event.is_gathering() {
        return 0.0;
    }
    match event.expected_attendance {
        attendance if attendance >= 1000 => 1.0,
        attendance if attendance >= 100 => 0.6,
        _ => 0.0,
    }
}

pub(crate) fn gathering_count(events: &[AgendaEvent]) -> usize {
    events.iter().filter(|event| event.is_gathering()).count()
}

/// Highest precipitation probability; NaN entries are skipped and no data yields 0.
pub(crate) fn max_pop(weather: &[WeatherHour]) -> f64 {
    weather.iter().map(|hour| hour.pop).fold(0.0, f64::max)
}

pub(crate) fn max_wind(weather: &[WeatherHour]) -> f64 {
    weather.iter().map(|hour| hour.wind_kph).fold(0.0, f64::max)
}

pub(crate) fn rain_weight(max_pop: f64) -> f64 {
    if max_pop >= 0.7 {
        1.5
    } else if max_pop >= 0.4 {
        1.0
    } else if max_pop >= 0.2 {
        0.5
    } else {
        0.0
    }
}

pub(crate) fn wind_weight(max_wind: f64) -> f64 {
    if max_wind > WIND_THRESHOLD_KPH {
        WIND_WEIGHT
    } else {
        0.0
    }
}

/// Holidays only thin out traffic on working days, and observances never do.
pub(crate) fn holiday_suppresses(weekday: u32, holidays: &[Holiday]) -> bool {
    !is_weekend(weekday) && holidays.iter().any(|holiday| !holiday.is_observance())
}

pub(crate) fn mention_weight(mentions: u32) -> f64 {
    if mentions >= 10 {
        0.8
    } else if mentions >= 3 {
        0.5
    } else {
        0.0
    }
}

/// Sums the weekday baseline and every signal adjustment for `date`.
///
/// Terms are accumulated in a fixed order starting from `0.0` so the same
/// inputs always produce the same bits. The result is neither clamped nor rounded.
pub fn compute_score(
    date: NaiveDate,
    events: &[AgendaEvent],
    weather: &[WeatherHour],
    holidays: &[Holiday],
    mentions: u32,
) -> f64 {
    let weekday = weekday_index(date);
    let mut score = 0.0;

    score += baseline_weight(weekday);
    for event in events {
        score += gathering_weight(event);
    }
    score += rain_weight(max_pop(weather));
    score += wind_weight(max_wind(weather));
    if holiday_suppresses(weekday, holidays) {
        score -= HOLIDAY_WEIGHT;
    }
    score += mention_weight(mentions);

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::OBSERVANCE_HOLIDAY_TYPE as OBSERVANCE;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn weekday_index_is_monday_based() {
        assert_eq!(weekday_index(date(2025, 9, 22)), 0);
        assert_eq!(weekday_index(date(2025, 9, 26)), FRIDAY);
        assert_eq!(weekday_index(date(2025, 9, 28)), 6);
    }

    #[test]
    fn out_of_range_weekday_falls_back_to_default_baseline() {
        assert_eq!(baseline_weight(7), 0.5);
        assert_eq!(baseline_weight(u32::MAX), 0.5);
    }

    #[test]
    fn gathering_weight_steps_on_attendance() {
        assert_eq!(gathering_weight(&AgendaEvent::new("marcha", 99)), 0.0);
        assert_eq!(gathering_weight(&AgendaEvent::new("marcha", 100)), 0.6);
        assert_eq!(gathering_weight(&AgendaEvent::new("marcha", 999)), 0.6);
        assert_eq!(gathering_weight(&AgendaEvent::new("marcha", 1000)), 1.0);
        assert_eq!(gathering_weight(&AgendaEvent::new("feria", 50_000)), 0.0);
    }

    #[test]
    fn rain_weight_takes_highest_threshold() {
        assert_eq!(rain_weight(0.0), 0.0);
        assert_eq!(rain_weight(0.19), 0.0);
        assert_eq!(rain_weight(0.2), 0.5);
        assert_eq!(rain_weight(0.4), 1.0);
        assert_eq!(rain_weight(0.7), 1.5);
        assert_eq!(rain_weight(1.0), 1.5);
    }

    #[test]
    fn wind_threshold_is_strict() {
        assert_eq!(wind_weight(35.0), 0.0);
        assert_eq!(wind_weight(35.1), 0.3);
    }

    #[test]
    fn maxima_ignore_nan_and_default_to_zero() {
        assert_eq!(max_pop(&[]), 0.0);
        assert_eq!(max_wind(&[]), 0.0);
        let weather = [
            WeatherHour::new(0, f64::NAN, 0.0, f64::NAN),
            WeatherHour::new(1, 0.3, 0.0, 12.0),
        ];
        assert_eq!(max_pop(&weather), 0.3);
        assert_eq!(max_wind(&weather), 12.0);
    }

    #[test]
    fn mention_weight_steps() {
        assert_eq!(mention_weight(0), 0.0);
        assert_eq!(mention_weight(2), 0.0);
        assert_eq!(mention_weight(3), 0.5);
        assert_eq!(mention_weight(9), 0.5);
        assert_eq!(mention_weight(10), 0.8);
    }

    #[test]
    fn holiday_suppression_requires_weekday_and_non_observance() {
        let public = vec![Holiday::new("Año Nuevo", "public", "nager")];
        let observance = vec![Holiday::new("Pesach I", OBSERVANCE, "hebcal")];
        assert!(holiday_suppresses(2, &public));
        assert!(holiday_suppresses(FRIDAY, &public));
        assert!(!holiday_suppresses(5, &public));
        assert!(!holiday_suppresses(2, &observance));
        assert!(!holiday_suppresses(2, &[]));
    }
}
