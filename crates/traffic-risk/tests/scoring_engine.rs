use chrono::{Duration, NaiveDate};
use traffic_risk::scoring::{
    compute_score, generate_reasoning, map_score_to_level, RiskLevel, ScoringEngine,
};
use traffic_risk::signals::{AgendaEvent, Holiday, SignalSnapshot, WeatherHour};

/// Monday 2025-09-22; `monday() + Duration::days(n)` walks the week.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 22).expect("valid monday")
}

fn day(offset: i64) -> NaiveDate {
    monday() + Duration::days(offset)
}

fn full_day(pop: f64, wind_kph: f64) -> Vec<WeatherHour> {
    (0..24)
        .map(|hour| WeatherHour::new(hour, pop, 0.0, wind_kph))
        .collect()
}

fn public_holiday() -> Holiday {
    Holiday::new("Día de la Independencia", "public", "nager")
}

#[test]
fn empty_signals_score_exactly_the_weekday_baseline() {
    let baselines = [0.8, 0.6, 0.8, 1.0, 2.0, 0.4, 0.2];
    for (offset, expected) in baselines.iter().enumerate() {
        let score = compute_score(day(offset as i64), &[], &[], &[], 0);
        assert_eq!(score, *expected, "baseline for weekday {offset}");
    }
}

#[test]
fn large_march_adds_exactly_one_point() {
    for offset in 0..7 {
        let date = day(offset);
        let baseline = compute_score(date, &[], &[], &[], 0);
        let events = vec![AgendaEvent::new("marcha", 1000)];
        assert_eq!(compute_score(date, &events, &[], &[], 0), baseline + 1.0);
    }
}

#[test]
fn every_qualifying_gathering_counts() {
    let events = vec![
        AgendaEvent::new("marcha", 1500),
        AgendaEvent::new("Protesta", 400),
        AgendaEvent::new("concentración", 20),
        AgendaEvent::new("feria", 9000),
    ];
    let score = compute_score(day(1), &events, &[], &[], 0);
    assert!((score - (0.6 + 1.0 + 0.6)).abs() < 1e-12);
}

#[test]
fn heavy_rain_adds_one_and_a_half_and_wind_adds_more() {
    let date = day(0);
    let baseline = compute_score(date, &[], &[], &[], 0);

    let calm = compute_score(date, &[], &full_day(0.8, 5.0), &[], 0);
    assert_eq!(calm, baseline + 1.5);

    let windy = compute_score(date, &[], &full_day(0.8, 40.0), &[], 0);
    assert_eq!(windy, baseline + 1.5 + 0.3);
}

#[test]
fn sparse_forecast_uses_its_wettest_hour() {
    let weather = vec![
        WeatherHour::new(6, 0.1, 0.0, 3.0),
        WeatherHour::new(18, 0.45, 1.5, 8.0),
    ];
    let score = compute_score(day(0), &[], &weather, &[], 0);
    assert_eq!(score, 0.8 + 1.0);
}

#[test]
fn public_holiday_only_suppresses_working_days() {
    let holidays = vec![public_holiday()];

    let wednesday = day(2);
    assert_eq!(
        compute_score(wednesday, &[], &[], &holidays, 0),
        compute_score(wednesday, &[], &[], &[], 0) - 1.0
    );

    let saturday = day(5);
    assert_eq!(
        compute_score(saturday, &[], &[], &holidays, 0),
        compute_score(saturday, &[], &[], &[], 0)
    );
}

#[test]
fn observances_never_suppress() {
    let holidays = vec![Holiday::new("Yom Kippur", "hebcal", "hebcal")];
    for offset in 0..7 {
        let date = day(offset);
        assert_eq!(
            compute_score(date, &[], &[], &holidays, 0),
            compute_score(date, &[], &[], &[], 0)
        );
    }
}

#[test]
fn holiday_suppression_applies_once_per_call() {
    let holidays = vec![
        public_holiday(),
        Holiday::new("Bank holiday", "bank", "nager"),
        Holiday::new("Yom Kippur", "hebcal", "hebcal"),
    ];
    let score = compute_score(day(2), &[], &[], &holidays, 0);
    assert!((score - (0.8 - 1.0)).abs() < 1e-12);
}

#[test]
fn mentions_raise_the_score() {
    let date = day(0);
    assert_eq!(compute_score(date, &[], &[], &[], 2), 0.8);
    assert_eq!(compute_score(date, &[], &[], &[], 3), 0.8 + 0.5);
    assert_eq!(compute_score(date, &[], &[], &[], 25), 0.8 + 0.8);
}

#[test]
fn identical_inputs_produce_identical_bits() {
    let events = vec![AgendaEvent::new("manifestación", 700)];
    let weather = full_day(0.35, 36.0);
    let first = compute_score(day(3), &events, &weather, &[], 4);
    let second = compute_score(day(3), &events, &weather, &[], 4);
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn reasons_track_score_predicates() {
    let date = day(2);
    let quiet = generate_reasoning(date, &[], &[], &[], 0.8);
    assert!(quiet.is_empty());

    let events = vec![AgendaEvent::new("marcha", 10)];
    let weather = full_day(0.4, 0.0);
    let holidays = vec![public_holiday()];
    let score = compute_score(date, &events, &weather, &holidays, 50);
    let reasons = generate_reasoning(date, &events, &weather, &holidays, score);
    assert_eq!(reasons.len(), 3);
    assert!(reasons[0].starts_with("1 protest(s)"));
    assert!(reasons[1].contains("Rain"));
    assert!(reasons[2].contains("holiday"));
}

#[test]
fn friday_protest_scenario_is_high() {
    let friday = day(4);
    let signals = SignalSnapshot {
        agenda: vec![AgendaEvent::new("protesta", 5000)],
        weather: full_day(0.1, 5.0),
        holidays: Vec::new(),
        mentions: 0,
    };

    let result = ScoringEngine::new().assess(friday, &signals);
    assert_eq!(result.score, 3.0);
    assert_eq!(result.level, RiskLevel::High);
    assert_eq!(result.reasons.len(), 2);
    assert!(result.reasons[0].contains("Friday"));
    assert!(result.reasons[1].starts_with("1 protest(s)"));
}

#[test]
fn sunday_holiday_scenario_is_low() {
    let sunday = day(6);
    let signals = SignalSnapshot {
        holidays: vec![public_holiday()],
        ..SignalSnapshot::default()
    };

    let result = ScoringEngine::new().assess(sunday, &signals);
    assert_eq!(result.score, 0.2);
    assert_eq!(result.level, RiskLevel::Low);
    assert_eq!(result.reasons.len(), 1);
    assert!(result.reasons[0].contains("weekend"));
}

#[test]
fn friday_public_holiday_is_suppressed() {
    let friday = day(4);
    let signals = SignalSnapshot {
        holidays: vec![public_holiday()],
        ..SignalSnapshot::default()
    };

    let result = ScoringEngine::new().assess(friday, &signals);
    assert_eq!(result.score, 1.0);
    assert_eq!(result.level, RiskLevel::Low);
    assert_eq!(result.reasons.len(), 2);
    assert!(result.reasons[0].contains("Friday"));
    assert!(result.reasons[1].contains("holiday"));
}

#[test]
fn stacked_signals_reach_extreme() {
    let friday = day(4);
    let events = vec![
        AgendaEvent::new("marcha", 10_000),
        AgendaEvent::new("manifestación", 3_000),
    ];
    let score = compute_score(friday, &events, &full_day(0.9, 50.0), &[], 12);
    assert_eq!(map_score_to_level(score), RiskLevel::Extreme);
}
