use crate::infra::build_provider;
use chrono::NaiveDate;
use clap::Args;
use traffic_risk::config::{AppConfig, SignalMode};
use traffic_risk::error::AppError;
use traffic_risk::prediction::{PredictionResponse, PredictionService};

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Target date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: NaiveDate,
    /// City echoed in the prediction
    #[arg(long, default_value = "cdmx")]
    pub(crate) city: String,
    /// Override the social media mention count for the date
    #[arg(long)]
    pub(crate) mentions: Option<u32>,
    /// Fetch live signals regardless of SIGNAL_MODE
    #[arg(long)]
    pub(crate) live: bool,
}

pub(crate) async fn run_prediction_report(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        date,
        city,
        mentions,
        live,
    } = args;

    let config = AppConfig::load()?;
    let mode = if live {
        SignalMode::Live
    } else {
        config.signal_mode
    };
    let service = PredictionService::new(build_provider(mode, &config.signals)?);

    let mut signals = service.collect(date).await;
    if let Some(count) = mentions {
        signals.mentions = count;
    }

    let prediction = service.predict_from(date, &city, &signals);
    for line in render_prediction(&prediction) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render_prediction(prediction: &PredictionResponse) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Traffic risk for {} on {} ({})",
            prediction.city,
            prediction.date,
            prediction.date.format("%A")
        ),
        format!(
            "Level: {} (score {:.2})",
            prediction.level, prediction.score
        ),
        format!("Signal source: {}", prediction.signal_source),
        format!("Peak hours: {}", prediction.peak_hours.join(", ")),
    ];

    if prediction.reasons.is_empty() {
        lines.push("\nReasons: none".to_string());
    } else {
        lines.push("\nReasons".to_string());
        lines.extend(prediction.reasons.iter().map(|reason| format!("- {reason}")));
    }

    if prediction.evidence.is_empty() {
        lines.push("\nEvidence: none".to_string());
    } else {
        lines.push("\nEvidence".to_string());
        for item in &prediction.evidence {
            let link = if item.url.is_empty() {
                String::new()
            } else {
                format!(" <{}>", item.url)
            };
            let pages = if item.pages.is_empty() {
                String::new()
            } else {
                let pages: Vec<String> = item.pages.iter().map(u32::to_string).collect();
                format!(" (pages {})", pages.join(", "))
            };
            lines.push(format!("- [{}] {}{}{}", item.kind, item.title, link, pages));
        }
    }

    lines
}
