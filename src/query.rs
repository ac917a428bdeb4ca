// src/query.rs

use anyhow::{Context, Result};
use rusqlite::{types::Value, Connection};
use std::fmt;
use tracing::{info, instrument};

use crate::{load::quote_ident, table::GDP_BILLIONS_COLUMN};

/// Columns and rows of one executed statement, in result order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// The fixed report: every country at or above `min_billions`.
pub fn gdp_threshold_query(table_name: &str, min_billions: f64) -> String {
    format!(
        "SELECT * FROM {} WHERE {} >= {}",
        quote_ident(table_name),
        GDP_BILLIONS_COLUMN,
        min_billions
    )
}

#[instrument(level = "info", skip(conn))]
pub fn run_query(conn: &Connection, sql: &str) -> Result<QueryResult> {
    let mut stmt = conn
        .prepare(sql)
        .with_context(|| format!("preparing query {}", sql))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .with_context(|| format!("running query {}", sql))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("reading query rows")?;

    info!(rows = rows.len(), "query complete");
    Ok(QueryResult { columns, rows })
}

fn render(value: &Value, precision: Option<usize>) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => match precision {
            Some(p) => format!("{:.p$}", f),
            None => f.to_string(),
        },
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

fn decimals(f: f64) -> usize {
    let s = f.to_string();
    s.split_once('.').map_or(0, |(_, frac)| frac.len())
}

/// Shared decimal count for a column holding only REAL (or NULL) values,
/// at least one digit like a data-frame float column.
fn float_precision(rows: &[Vec<Value>], col: usize) -> Option<usize> {
    let mut precision = None;
    for value in rows.iter().filter_map(|r| r.get(col)) {
        match value {
            Value::Real(f) => {
                precision = Some(precision.unwrap_or(1).max(decimals(*f)));
            }
            Value::Null => {}
            _ => return None,
        }
    }
    precision
}

/// Right-aligned text table with a zero-based row index.
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precisions: Vec<Option<usize>> = (0..self.columns.len())
            .map(|i| float_precision(&self.rows, i))
            .collect();
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                r.iter()
                    .enumerate()
                    .map(|(i, v)| render(v, precisions.get(i).copied().flatten()))
                    .collect()
            })
            .collect();

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (name, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", name, w = *w)?;
        }
        writeln!(f)?;

        for (i, row) in cells.iter().enumerate() {
            write!(f, "{:>index_width$}", i)?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
