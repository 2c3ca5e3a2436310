#![forbid(unsafe_code)]

use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use gradient_fader::config::AppConfig;
use gradient_fader::gui;

fn parse_log_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config is read before logging exists; report its failure afterwards
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    // LOG_LEVEL wins over the config file
    let log_level = parse_log_level(
        &std::env::var("LOG_LEVEL").unwrap_or_else(|_| config.log_level.clone()),
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(err) = config_error {
        error!(error = ?err, "Failed to load config, using defaults");
    }
    info!("config={:#?}", config);

    gui::run_gui(&config)?;
    Ok(())
}
