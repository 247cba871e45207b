// src/table.rs
//! Header + rows tables read from / written to CSV or TSV.
//!
//! Cells stay `String`s end to end so columns the pipeline does not know
//! about pass through byte-for-byte.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Delim {
    #[default]
    Csv,
    Tsv,
}

impl Delim {
    pub fn byte(self) -> u8 {
        match self { Delim::Csv => b',', Delim::Tsv => b'\t' }
    }

    pub fn ext(self) -> &'static str {
        match self { Delim::Csv => "csv", Delim::Tsv => "tsv" }
    }

    /// `.tsv` / `.tab` are tab separated, anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(e) if e == "tsv" || e == "tab" => Delim::Tsv,
            _ => Delim::Csv,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows dropped while reading (ragged or undecodable).
    pub skipped: usize,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`Table::column`], but a missing column is fatal.
    pub fn require(&self, table: &str, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| Error::MissingColumn {
            table: table.to_string(),
            column: name.to_string(),
        })
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// Read a whole table from disk. The first row is the header.
pub fn read_table(path: &Path, delim: Delim) -> Result<Table> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file, delim, path)
}

/// Read a table from any reader; `path` only labels errors and warnings.
///
/// Rows whose field count differs from the header, or that are not valid
/// UTF-8, are skipped with a warning. I/O errors are fatal.
pub fn read_from<R: Read>(reader: R, delim: Delim, path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delim.byte())
        .flexible(true)
        .from_reader(reader);

    let table_err = |source: csv::Error| Error::Table { path: path.to_path_buf(), source };

    let headers: Vec<String> = rdr
        .headers()
        .map_err(table_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (i, rec) in rdr.records().enumerate() {
        // line 1 is the header
        let line = i + 2;
        match rec {
            Ok(rec) if rec.len() == headers.len() => {
                rows.push(rec.iter().map(str::to_string).collect());
            }
            Ok(rec) => {
                warn!(
                    "{}:{line}: expected {} fields, found {}; row skipped",
                    path.display(), headers.len(), rec.len()
                );
                skipped += 1;
            }
            Err(e) if e.is_io_error() => return Err(table_err(e)),
            Err(e) => {
                warn!("{}:{line}: {e}; row skipped", path.display());
                skipped += 1;
            }
        }
    }

    Ok(Table { headers, rows, skipped })
}

/// Write header + rows to any writer.
pub fn write_to<'a, W, I>(writer: W, headers: &[String], rows: I, delim: Delim) -> csv::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a [String]>,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delim.byte())
        .from_writer(writer);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
