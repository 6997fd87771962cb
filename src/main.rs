//! MediPredict: disease risk prediction client
//!
//! Main entry point for the terminal application.
//!
//! ```text
//! medipredict                    # interactive TUI
//! medipredict health             # probe the backend and exit
//! medipredict sample <disease>   # submit the reference sample (diabetes|heart|parkinsons)
//! ```

use anyhow::{anyhow, bail, Result};
use std::io::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medipredict::adapters::sanitize::SanitizingMakeWriter;
use medipredict::config::LogConfig;
use medipredict::domain::{DiabetesInput, HeartDiseaseInput, ParkinsonsInput};
use medipredict::tui::App;
use medipredict::{predict_once, probe_backend, Config, Disease, PredictionInput};

fn init_logging(log: &LogConfig) -> Result<WorkerGuard> {
    // Writing logs to the terminal would corrupt the TUI (alternate screen):
    // interactive sessions log to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();

    let (writer, guard) = if log.mode.use_file(interactive) {
        if let Some(parent) = log.file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log.file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    Ok(guard)
}

fn submit_sample(config: &Config, disease: Disease) -> Result<()> {
    let result = match disease {
        Disease::Diabetes => predict_once(config, &DiabetesInput::sample())?,
        Disease::Heart => predict_once(config, &HeartDiseaseInput::sample())?,
        Disease::Parkinsons => predict_once(config, &ParkinsonsInput::sample())?,
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    let _guard = init_logging(&config.log)?;

    let mut args = std::env::args().skip(1);
    let command = args.next();

    match command.as_deref() {
        None => {
            tracing::info!(api = %config.api.base_url, "Starting MediPredict...");

            // Run the TUI application
            let mut app = App::new(&config);
            app.run()?;

            tracing::info!("MediPredict shutdown complete.");
        }
        Some("health") => {
            let status = probe_backend(&config)?;
            println!("{}: {}", status.status, status.message);
        }
        Some("sample") => {
            let slug = args
                .next()
                .ok_or_else(|| anyhow!("usage: medipredict sample <diabetes|heart|parkinsons>"))?;
            let disease = Disease::from_slug(&slug)
                .ok_or_else(|| anyhow!("Unknown disease {slug:?}; expected diabetes, heart or parkinsons"))?;
            submit_sample(&config, disease)?;
        }
        Some(other) => bail!("Unknown command {other:?}; expected `health` or `sample <disease>`"),
    }

    Ok(())
}
