// src/extract.rs

use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, trace};

use crate::{fetch::fetch_page, table::GdpTable};

/// The GDP table is the third `tbody` on the page.
const TABLE_INDEX: usize = 2;
/// Marker the page uses for "no estimate".
const PLACEHOLDER: &str = "—";

/// Fetch `url` and pull the country/GDP rows out of it.
#[instrument(level = "info", skip(client, columns))]
pub fn extract(client: &Client, url: &str, columns: [&str; 2]) -> Result<GdpTable<Option<String>>> {
    let html = fetch_page(client, url)?;
    let table = parse_gdp_table(&html, columns)?;
    info!(rows = table.len(), "extracted GDP rows");
    Ok(table)
}

/// Parse the page into a record set of (country, raw GDP text).
///
/// A row is kept only when it has at least three cells, the first cell
/// contains a link, and the third cell is not the "—" placeholder. The
/// country is the link text; an empty third cell becomes `None`.
pub fn parse_gdp_table(html: &str, columns: [&str; 2]) -> Result<GdpTable<Option<String>>> {
    let document = Html::parse_document(html);
    let tbody_sel = Selector::parse("tbody").expect("tbody selector should parse");
    let tr_sel = Selector::parse("tr").expect("tr selector should parse");
    let td_sel = Selector::parse("td").expect("td selector should parse");
    let a_sel = Selector::parse("a").expect("anchor selector should parse");

    // html5ever inserts a tbody into tables written without one; those count too.
    let tables: Vec<ElementRef> = document.select(&tbody_sel).collect();
    let tbody = tables.get(TABLE_INDEX).ok_or_else(|| {
        anyhow!(
            "expected at least {} tbody elements, found {}",
            TABLE_INDEX + 1,
            tables.len()
        )
    })?;

    let mut out = GdpTable::new(columns);
    for row in tbody.select(&tr_sel) {
        let cells: Vec<ElementRef> = row.select(&td_sel).collect();
        if cells.len() < 3 {
            trace!(cells = cells.len(), "skipping short row");
            continue;
        }
        let Some(link) = cells[0].select(&a_sel).next() else {
            trace!("skipping row without a link");
            continue;
        };
        let gdp = cell_text(&cells[2]);
        if gdp == PLACEHOLDER {
            trace!("skipping row without an estimate");
            continue;
        }

        let country = cell_text(&link);
        debug!(%country, %gdp, "row");
        out.push(country, (!gdp.is_empty()).then_some(gdp));
    }
    Ok(out)
}

fn cell_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
