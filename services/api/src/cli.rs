use crate::report::{run_prediction_report, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use traffic_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Traffic Risk Predictor",
    about = "Serve or query daily traffic risk predictions for Mexico City",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a one-off traffic risk prediction for a date
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_prediction_report(args).await,
    }
}
