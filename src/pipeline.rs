// src/pipeline.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::io::Write;

use crate::{
    config::EtlConfig,
    extract::extract,
    load::{load_to_csv, load_to_db, open_db},
    progress::ProgressLog,
    query::{gdp_threshold_query, run_query, QueryResult},
    table::{COUNTRY_COLUMN, GDP_MILLIONS_COLUMN},
    transform::transform,
};

/// One extract → transform → load → query pass.
pub struct Pipeline {
    config: EtlConfig,
    client: Client,
    log: ProgressLog,
}

impl Pipeline {
    pub fn new(config: EtlConfig) -> Self {
        let log = ProgressLog::new(&config.log_path);
        Self {
            config,
            client: Client::new(),
            log,
        }
    }

    pub fn progress(&self) -> &ProgressLog {
        &self.log
    }

    /// Run every stage once, writing the query report to `out`.
    pub fn run(&self, out: &mut impl Write) -> Result<QueryResult> {
        let cfg = &self.config;
        self.log
            .log("Preliminaries complete. Initiating ETL process.")?;

        // ─── 1) extract ──────────────────────────────────────────────────
        let raw = extract(
            &self.client,
            &cfg.url,
            [COUNTRY_COLUMN, GDP_MILLIONS_COLUMN],
        )?;
        self.log
            .log("Data extraction complete. Initiating Transformation process.")?;

        // ─── 2) transform ────────────────────────────────────────────────
        let table = transform(raw)?;
        self.log
            .log("Data transformation complete. Initiating loading process.")?;

        // ─── 3) load ─────────────────────────────────────────────────────
        load_to_csv(&table, &cfg.csv_path)?;
        self.log.log("Data saved to CSV file.")?;

        let mut conn = open_db(&cfg.db_path)?;
        self.log.log("SQL Connection initiated.")?;

        load_to_db(&table, &mut conn, &cfg.table_name)?;
        self.log
            .log("Data loaded to Database as table. Running the query.")?;

        // ─── 4) query ────────────────────────────────────────────────────
        let sql = gdp_threshold_query(&cfg.table_name, cfg.min_gdp_billions);
        let result = run_query(&conn, &sql)?;
        write!(out, "{}", result)?;
        self.log.log("Process Complete.")?;

        conn.close()
            .map_err(|(_, e)| e)
            .context("closing database connection")?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fetch::test_server::serve_once, load::read_csv};
    use rusqlite::types::Value;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn page() -> String {
        r#"<html><body>
        <table><tbody><tr><td>a</td></tr></tbody></table>
        <table><tbody><tr><td>b</td></tr></tbody></table>
        <table><tbody>
          <tr><th>Country</th><th>Region</th><th>IMF</th></tr>
          <tr><td>World</td><td>—</td><td>105,568,776</td></tr>
          <tr><td><a href="/wiki/United_States">United States</a></td><td>Americas</td><td>26,854,599</td></tr>
          <tr><td><a href="/wiki/Russia">Russia</a></td><td>Europe</td><td>—</td></tr>
          <tr><td><a href="/wiki/Tuvalu">Tuvalu</a></td><td>Oceania</td><td>63</td></tr>
          <tr><td><a href="/wiki/India">India</a></td><td>Asia</td><td>3,732,224</td></tr>
        </tbody></table>
        </body></html>"#
            .to_string()
    }

    fn config(tmp: &TempDir, url: String) -> EtlConfig {
        EtlConfig {
            url,
            csv_path: tmp.path().join("Countries_by_GDP.csv"),
            db_path: tmp.path().join("World_Economies.db"),
            log_path: tmp.path().join("etl_project_log.txt"),
            ..EtlConfig::default()
        }
    }

    #[test]
    fn end_to_end_against_local_page() -> Result<()> {
        let tmp = tempdir()?;
        let cfg = config(&tmp, serve_once("200 OK", page()));
        let pipeline = Pipeline::new(cfg.clone());

        let mut out = Vec::new();
        let result = pipeline.run(&mut out)?;

        assert_eq!(
            result.rows,
            [
                vec![Value::Text("United States".into()), Value::Real(26854.6)],
                vec![Value::Text("India".into()), Value::Real(3732.22)],
            ]
        );
        let printed = String::from_utf8(out)?;
        assert!(printed.contains("United States"));
        assert!(!printed.contains("Tuvalu"));

        let csv = read_csv(&cfg.csv_path)?;
        assert_eq!(csv.columns, ["Country", "GDP_USD_billions"]);
        assert_eq!(csv.len(), 3);
        assert_eq!(csv.rows[1].gdp, Some(0.06));

        let log = fs::read_to_string(&cfg.log_path)?;
        let messages: Vec<&str> = log
            .lines()
            .filter_map(|l| l.split_once(" - ").map(|(_, m)| m))
            .collect();
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0], "Preliminaries complete. Initiating ETL process.");
        assert_eq!(messages[6], "Process Complete.");
        Ok(())
    }

    #[test]
    fn fetch_failure_stops_before_loading() {
        let tmp = tempdir().unwrap();
        let cfg = config(&tmp, serve_once("500 Internal Server Error", String::new()));
        let pipeline = Pipeline::new(cfg.clone());

        assert!(pipeline.run(&mut Vec::new()).is_err());
        assert!(!cfg.csv_path.exists());
        assert!(!cfg.db_path.exists());

        let log = fs::read_to_string(&cfg.log_path).unwrap();
        assert_eq!(log.lines().count(), 1);
    }
}
