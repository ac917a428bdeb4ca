// src/table.rs

/// Name of the country column, fixed for every stage.
pub const COUNTRY_COLUMN: &str = "Country";
/// GDP column as extracted from the page (USD millions, raw text).
pub const GDP_MILLIONS_COLUMN: &str = "GDP_USD_millions";
/// GDP column after the unit conversion (USD billions).
pub const GDP_BILLIONS_COLUMN: &str = "GDP_USD_billions";

/// One country and its GDP value. `V` is the raw cell text during
/// extraction and the parsed number after the transform.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpRow<V> {
    pub country: String,
    pub gdp: V,
}

/// Ordered two-column record set: `columns[0]` names `country`,
/// `columns[1]` names `gdp`.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpTable<V> {
    pub columns: [String; 2],
    pub rows: Vec<GdpRow<V>>,
}

impl<V> GdpTable<V> {
    pub fn new(columns: [&str; 2]) -> Self {
        Self {
            columns: columns.map(str::to_string),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, country: impl Into<String>, gdp: V) {
        self.rows.push(GdpRow {
            country: country.into(),
            gdp,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
