//! scorecast CLI — fill in the student form and ask the model for a score.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use scorecast_core::FieldName;

mod commands;

#[derive(Parser)]
#[command(
    name = "scorecast",
    version,
    about = "Student performance predictor: submit lifestyle metrics, get an exam-score prediction"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Endpoint selection shared by every command that talks to the model.
#[derive(Args)]
struct EndpointArgs {
    /// Prediction endpoint URL (overrides config and SCORECAST_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One flag per form field. Omitted fields are left out of the request.
#[derive(Args)]
struct FieldArgs {
    /// Study hours per day (0-12)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    study_hours_per_day: Option<String>,

    /// Sleep hours (0-12)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    sleep_hours: Option<String>,

    /// Attendance percentage (0-100)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    attendance_percentage: Option<String>,

    /// Motivation level (0-10)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    motivation_level: Option<String>,

    /// Stress level (0-10)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    stress_level: Option<String>,

    /// Screen time in hours (0-12)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    screen_time: Option<String>,

    /// Visual, Auditory, Reading, or Kinesthetic
    #[arg(long, value_name = "STYLE")]
    learning_style: Option<String>,

    /// Quiet, Moderate, or Noisy
    #[arg(long, value_name = "ENV")]
    study_environment: Option<String>,
}

impl FieldArgs {
    /// The supplied flags as raw `(field, text)` edits, in form order.
    fn into_edits(self) -> Vec<(FieldName, String)> {
        [
            (FieldName::StudyHoursPerDay, self.study_hours_per_day),
            (FieldName::SleepHours, self.sleep_hours),
            (FieldName::AttendancePercentage, self.attendance_percentage),
            (FieldName::MotivationLevel, self.motivation_level),
            (FieldName::StressLevel, self.stress_level),
            (FieldName::ScreenTime, self.screen_time),
            (FieldName::LearningStyle, self.learning_style),
            (FieldName::StudyEnvironment, self.study_environment),
        ]
        .into_iter()
        .filter_map(|(name, raw)| raw.map(|raw| (name, raw)))
        .collect()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the given fields once and print the prediction
    Predict {
        #[command(flatten)]
        fields: FieldArgs,

        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Print the raw prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit the form line by line and submit from a prompt
    Interactive {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// List form fields with their ranges and defaults
    Fields,

    /// Create a starter config file
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scorecast=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Predict {
            fields,
            endpoint,
            json,
        } => {
            commands::predict::execute(
                fields.into_edits(),
                endpoint.endpoint,
                endpoint.config,
                json,
            )
            .await
        }
        Commands::Interactive { endpoint } => {
            commands::interactive::execute(endpoint.endpoint, endpoint.config).await
        }
        Commands::Fields => commands::fields::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
