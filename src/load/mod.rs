// src/load/mod.rs

pub mod csv_file;
pub mod sqlite;

pub use csv_file::{load_to_csv, read_csv};
pub use sqlite::{load_to_db, open_db, quote_ident};
