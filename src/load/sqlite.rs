// src/load/sqlite.rs

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::{fs, path::Path};
use tracing::{debug, info, instrument};

use crate::table::GdpTable;

/// Open (or create) the SQLite database file at `path`.
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database {}", path.display()))?;
    debug!(path = %path.display(), "opened database");
    Ok(conn)
}

/// Quote an SQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Replace `table_name` with the contents of `table`. Drop, create and
/// insert happen in one transaction.
#[instrument(level = "info", skip(table, conn), fields(rows = table.len()))]
pub fn load_to_db(
    table: &GdpTable<Option<f64>>,
    conn: &mut Connection,
    table_name: &str,
) -> Result<()> {
    let name = quote_ident(table_name);
    let country = quote_ident(&table.columns[0]);
    let gdp = quote_ident(&table.columns[1]);

    let tx = conn.transaction().context("starting load transaction")?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {name};
         CREATE TABLE {name} ({country} TEXT, {gdp} REAL);"
    ))
    .with_context(|| format!("recreating table {}", table_name))?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {name} ({country}, {gdp}) VALUES (?1, ?2)"
        ))?;
        for row in &table.rows {
            stmt.execute(params![row.country, row.gdp])
                .with_context(|| format!("inserting row for {}", row.country))?;
        }
    }
    tx.commit()
        .with_context(|| format!("committing table {}", table_name))?;

    info!(table = table_name, "loaded table");
    Ok(())
}
