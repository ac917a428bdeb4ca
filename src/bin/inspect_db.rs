use anyhow::{bail, Context, Result};
use gdpscraper::{
    config::CONFIG_FILE,
    load::{open_db, quote_ident},
    query::{gdp_threshold_query, run_query},
    EtlConfig,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let config = EtlConfig::load_or_default(CONFIG_FILE)?;
    if !config.db_path.exists() {
        bail!("database {} not found; run gdpscraper first", config.db_path.display());
    }
    let conn = open_db(&config.db_path)?;

    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [&config.table_name],
            |r| r.get(0),
        )
        .context("checking for table")?;
    if !exists {
        bail!(
            "table {} missing from {}",
            config.table_name,
            config.db_path.display()
        );
    }

    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(&config.table_name)),
        [],
        |r| r.get(0),
    )?;
    info!(table = %config.table_name, rows = count, "table found");
    println!("{}: {} rows", config.table_name, count);

    let sql = gdp_threshold_query(&config.table_name, config.min_gdp_billions);
    print!("{}", run_query(&conn, &sql)?);
    Ok(())
}
