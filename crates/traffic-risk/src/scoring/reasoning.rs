use super::rules::{
    gathering_count, holiday_suppresses, is_weekend, max_pop, weekday_index, FRIDAY,
    RAIN_REASON_POP, THURSDAY,
};
use crate::signals::{AgendaEvent, Holiday, WeatherHour};
use chrono::NaiveDate;

pub const FRIDAY_REASON: &str = "It's Friday, which usually increases homeward commute traffic.";
pub const THURSDAY_REASON: &str = "It's Thursday, with a moderate effect on commuter traffic.";
pub const WEEKEND_REASON: &str = "It's the weekend, when commuter traffic is usually lighter.";
pub const RAIN_REASON: &str = "Rain is likely, which increases traffic.";
pub const HOLIDAY_REASON: &str = "It's a public holiday, which may reduce commuter traffic.";

/// Explains the active score factors, in evaluation order
/// (weekday, gatherings, weather, holiday).
///
/// Factors are re-derived from the same predicates as
/// [`compute_score`](super::compute_score) rather than from `score`, which is
/// accepted only so callers can pass the full assessment context.
pub fn generate_reasoning(
    date: NaiveDate,
    events: &[AgendaEvent],
    weather: &[WeatherHour],
    holidays: &[Holiday],
    _score: f64,
) -> Vec<String> {
    let mut reasons = Vec::new();
    let weekday = weekday_index(date);

    if weekday == FRIDAY {
        reasons.push(FRIDAY_REASON.to_string());
    } else if weekday == THURSDAY {
        reasons.push(THURSDAY_REASON.to_string());
    } else if is_weekend(weekday) {
        reasons.push(WEEKEND_REASON.to_string());
    }

    let gatherings = gathering_count(events);
    if gatherings > 0 {
        reasons.push(format!(
            "{gatherings} protest(s) or demonstration(s) scheduled that may affect mobility."
        ));
    }

    if max_pop(weather) >= RAIN_REASON_POP {
        reasons.push(RAIN_REASON.to_string());
    }

    if holiday_suppresses(weekday, holidays) {
        reasons.push(HOLIDAY_REASON.to_string());
    }

    reasons
}
