// src/load/csv_file.rs

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{fs, path::Path};
use tracing::{info, instrument};

use crate::table::GdpTable;

/// Write the table to `path`, replacing any existing file. Header row, no
/// index column; a missing GDP value is an empty field.
#[instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display(), rows = table.len()))]
pub fn load_to_csv(table: &GdpTable<Option<f64>>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        let gdp = row.gdp.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([row.country.as_str(), gdp.as_str()])
            .with_context(|| format!("writing CSV row for {}", row.country))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing CSV file {}", path.display()))?;

    info!("wrote CSV");
    Ok(())
}

/// Read a CSV written by [`load_to_csv`] back into a table.
pub fn read_csv(path: impl AsRef<Path>) -> Result<GdpTable<Option<f64>>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening CSV file {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    if headers.len() != 2 {
        bail!(
            "{}: expected 2 columns, found {}",
            path.display(),
            headers.len()
        );
    }
    let mut table = GdpTable::new([&headers[0], &headers[1]]);

    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading CSV record {}", i + 1))?;
        let gdp = match record.get(1).map(str::trim) {
            None | Some("") => None,
            Some(v) => Some(
                v.parse::<f64>()
                    .with_context(|| format!("record {}: bad GDP value {:?}", i + 1, v))?,
            ),
        };
        table.push(record.get(0).unwrap_or_default(), gdp);
    }
    Ok(table)
}
