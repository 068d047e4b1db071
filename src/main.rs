//! SmartPay command-line client
//!
//! Sends candidate profiles to the salary-prediction service and prints the
//! estimate with its range band.
//!
//! # Environment Variables
//! - `BACKEND_URL` - Base address of the prediction service
//! - `API_KEY` - Optional access key sent as `x-api-key`
//! - `BACKEND_TIMEOUT_SECS` - Request timeout (default: 20)
//! - `HISTORY_DISPLAY_LIMIT` - History entries printed after a batch (default: 8)
//! - `OBSERVABILITY_ENABLED` - Print a `METRICS_JSON:` line to stderr on exit (default: true)

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use smartpay::application::{LineFailure, PredictionClient, PredictionSession, replay_lines};
use smartpay::config::Config;
use smartpay::domain::errors::PredictionError;
use smartpay::domain::prediction::format_usd;
use smartpay::domain::profile::{
    CandidateProfile, CompanySize, Education, EmploymentType, ExperienceLevel, Gender,
    MaritalStatus, RemoteRatio,
};
use smartpay::infrastructure::observability::{Metrics, MetricsReporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "SmartPay salary prediction client", long_about = None)]
struct Cli {
    /// Override BACKEND_URL
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Override API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the salary for a single profile
    Predict(ProfileArgs),
    /// Replay a JSON-lines file of profiles through one session
    Batch {
        /// File with one JSON profile per line
        file: PathBuf,
    },
    /// Show the training dataset summary
    Analyze,
    /// Show the most important model features
    Explain,
    /// Query the service health endpoint
    Health,
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long, default_value_t = 25)]
    age: u8,

    #[arg(long, default_value = "Male")]
    gender: Gender,

    #[arg(long, default_value = "Bachelor's Degree")]
    education: Education,

    #[arg(long, default_value = "Never Married")]
    marital_status: MaritalStatus,

    /// junior, mid or senior
    #[arg(long, default_value = "mid")]
    experience_level: ExperienceLevel,

    /// FT, PT, CT or FL
    #[arg(long, default_value = "FT")]
    employment_type: EmploymentType,

    #[arg(long, default_value = "Data Engineer")]
    job_title: String,

    #[arg(long, default_value_t = 40)]
    hours_per_week: u8,

    #[arg(long, default_value = "US")]
    employee_residence: String,

    #[arg(long, default_value = "US")]
    company_location: String,

    /// 0, 25, 50, 75 or 100
    #[arg(long, default_value = "0")]
    remote_ratio: RemoteRatio,

    /// S, M or L
    #[arg(long, default_value = "M")]
    company_size: CompanySize,
}

impl From<ProfileArgs> for CandidateProfile {
    fn from(args: ProfileArgs) -> Self {
        CandidateProfile {
            age: args.age,
            gender: args.gender,
            education: args.education,
            marital_status: args.marital_status,
            experience_level: args.experience_level,
            employment_type: args.employment_type,
            job_title: args.job_title,
            hours_per_week: args.hours_per_week,
            employee_residence: args.employee_residence,
            company_location: args.company_location,
            remote_ratio: args.remote_ratio,
            company_size: args.company_size,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries results
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if cli.backend_url.is_some() || cli.api_key.is_some() {
        let base_url = cli
            .backend_url
            .or_else(|| config.backend.base_url.clone())
            .unwrap_or_default();
        let api_key = cli.api_key.or_else(|| config.backend.api_key.clone());
        config.backend = smartpay::config::BackendEnvConfig::new(&base_url, api_key.as_deref())
            .with_timeout(config.backend.timeout);
    }
    info!("SmartPay {} | {:?}", env!("CARGO_PKG_VERSION"), config.backend);

    let metrics = Metrics::new()?;
    let reporter = MetricsReporter::new(metrics.clone());
    let client = PredictionClient::from_config(&config.backend).with_metrics(metrics);
    let mut session = PredictionSession::new(client.clone());

    let outcome = match cli.command {
        Commands::Predict(args) => predict(&mut session, args.into()).await,
        Commands::Batch { file } => batch(&mut session, &file, config.history_display_limit).await,
        Commands::Analyze => analyze(&client).await,
        Commands::Explain => explain(&client).await,
        Commands::Health => health(&client).await,
    };

    if config.observability.enabled {
        reporter.report_once(session.history());
    }

    outcome
}

async fn predict(session: &mut PredictionSession, profile: CandidateProfile) -> Result<()> {
    profile.validate().context("Invalid profile")?;

    match session.submit(profile).await {
        Ok(result) => {
            println!("Predicted Salary: {} per year", format_usd(result.predicted));
            println!(
                "Expected Range:   {} - {}",
                format_usd(result.low),
                format_usd(result.high)
            );
            Ok(())
        }
        Err(e) => Err(report_failure(session.client(), e)),
    }
}

async fn batch(session: &mut PredictionSession, file: &Path, display_limit: usize) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read profiles from {}", file.display()))?;

    let report = replay_lines(session, &content).await;
    let skipped = report
        .failures
        .iter()
        .filter(|(_, f)| !matches!(f, LineFailure::Prediction(_)))
        .count();

    let history = session.history();
    println!(
        "Prediction History ({} recorded, {} failed, {} skipped)",
        history.len(),
        report.submitted() - report.recorded,
        skipped
    );
    if history.is_empty() {
        println!("No predictions yet.");
    }
    for entry in history.recent(display_limit) {
        println!(
            "  [{}] {}  range {} - {}",
            entry.short_id(),
            entry,
            format_usd(entry.result.low),
            format_usd(entry.result.high)
        );
    }

    Ok(())
}

async fn analyze(client: &PredictionClient) -> Result<()> {
    let summary = client
        .analyze()
        .await
        .map_err(|e| report_failure(client, e))?;
    println!("Records:        {}", summary.record_count);
    println!("Average salary: {}", format_usd(summary.average_salary));
    println!("Max salary:     {}", format_usd(summary.max_salary));
    Ok(())
}

async fn explain(client: &PredictionClient) -> Result<()> {
    let features = client
        .explain()
        .await
        .map_err(|e| report_failure(client, e))?;
    if features.is_empty() {
        println!("No feature importances reported.");
    }
    for feature in features {
        println!("{:<24} {:.4}", feature.feature, feature.importance);
    }
    Ok(())
}

async fn health(client: &PredictionClient) -> Result<()> {
    let status = client
        .health()
        .await
        .map_err(|e| report_failure(client, e))?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn report_failure(client: &PredictionClient, e: PredictionError) -> anyhow::Error {
    eprintln!("Prediction failed - {}", e);
    if let Some(base) = client.base_url() {
        if !matches!(e, PredictionError::Configuration { .. }) {
            eprintln!("Check backend: {}/health", base);
        }
    }
    if e.is_retryable() {
        eprintln!("The service could not be reached; try again.");
    }
    anyhow::Error::new(e)
}
