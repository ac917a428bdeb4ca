use anyhow::Result;
use gdpscraper::{config::CONFIG_FILE, pipeline::Pipeline, EtlConfig};
use std::io;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    // ─── 2) configure paths ──────────────────────────────────────────
    let config = EtlConfig::load_or_default(CONFIG_FILE)?;
    info!(url = %config.url, csv = %config.csv_path.display(), db = %config.db_path.display(), "config");

    // ─── 3) run the pipeline ─────────────────────────────────────────
    let pipeline = Pipeline::new(config);
    let stdout = io::stdout();
    if let Err(err) = pipeline.run(&mut stdout.lock()) {
        error!("ETL run failed: {:#}", err);
        if let Err(log_err) = pipeline
            .progress()
            .log(&format!("ETL process failed: {:#}", err))
        {
            error!("could not record failure: {:#}", log_err);
        }
        return Err(err);
    }

    info!("all done");
    Ok(())
}
