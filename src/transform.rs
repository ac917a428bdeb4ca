// src/transform.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, instrument};

use crate::table::{GdpTable, GDP_BILLIONS_COLUMN};

/// Footnote references such as `[1]` or `[n 2]`.
static FOOTNOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("footnote regex should compile"));

/// Strip footnotes, thousands separators and the dollar sign.
pub fn clean_currency(raw: &str) -> String {
    FOOTNOTE
        .replace_all(raw, "")
        .replace([',', '$'], "")
        .trim()
        .to_string()
}

/// Millions → billions, rounded to two decimals with ties to even.
pub fn millions_to_billions(millions: f64) -> f64 {
    (millions / 1000.0 * 100.0).round_ties_even() / 100.0
}

/// Parse the raw GDP strings, rescale them to billions and rename the
/// column to match.
#[instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn transform(table: GdpTable<Option<String>>) -> Result<GdpTable<Option<f64>>> {
    let [country_col, _] = table.columns;
    let mut out = GdpTable::new([country_col.as_str(), GDP_BILLIONS_COLUMN]);

    for row in table.rows {
        let gdp = match row.gdp {
            Some(raw) => {
                let millions: f64 = clean_currency(&raw).parse().with_context(|| {
                    format!("parsing GDP value {:?} for {}", raw, row.country)
                })?;
                Some(millions_to_billions(millions))
            }
            None => None,
        };
        out.push(row.country, gdp);
    }

    info!(column = GDP_BILLIONS_COLUMN, "converted GDP to billions");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{COUNTRY_COLUMN, GDP_MILLIONS_COLUMN};

    fn raw(rows: &[(&str, Option<&str>)]) -> GdpTable<Option<String>> {
        let mut t = GdpTable::new([COUNTRY_COLUMN, GDP_MILLIONS_COLUMN]);
        for (country, gdp) in rows {
            t.push(*country, gdp.map(str::to_string));
        }
        t
    }

    #[test]
    fn cleans_currency_text() {
        assert_eq!(clean_currency("$1,234.00"), "1234.00");
        assert_eq!(clean_currency(" 26,854,599 "), "26854599");
        assert_eq!(clean_currency("3,052,225[n 1]"), "3052225");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(millions_to_billions(1234.0), 1.23);
        assert_eq!(millions_to_billions(26_854_599.0), 26854.6);
        assert_eq!(millions_to_billions(63.0), 0.06);
        assert_eq!(millions_to_billions(4_999.0), 5.0);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(millions_to_billions(125.0), 0.12);
        assert_eq!(millions_to_billions(12_345.0), 12.34);
    }

    #[test]
    fn wonderland_example() {
        let out = transform(raw(&[("Wonderland", Some("$1,234.00"))])).unwrap();
        assert_eq!(out.columns, ["Country", "GDP_USD_billions"]);
        assert_eq!(out.rows[0].country, "Wonderland");
        assert_eq!(out.rows[0].gdp, Some(1.23));
    }

    #[test]
    fn preserves_order_and_missing_values() {
        let out = transform(raw(&[
            ("A", Some("200,000")),
            ("B", None),
            ("C", Some("99,994")),
        ]))
        .unwrap();
        let got: Vec<(&str, Option<f64>)> = out
            .rows
            .iter()
            .map(|r| (r.country.as_str(), r.gdp))
            .collect();
        assert_eq!(got, [("A", Some(200.0)), ("B", None), ("C", Some(99.99))]);
    }

    #[test]
    fn malformed_value_names_the_country() {
        let err = transform(raw(&[("Atlantis", Some("n/a"))])).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Atlantis"));
        assert!(msg.contains("n/a"));
    }
}
