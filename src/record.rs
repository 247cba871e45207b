// src/record.rs
//! Inscription records as read from the upstream table.
//!
//! A record keeps every input cell in order so unknown columns pass through
//! untouched, and exposes the handful the pipeline reads as typed fields.
//! Columns this run is about to (re)write are dropped on the way in, which
//! is what makes re-annotating an annotated table a no-op.

use tracing::warn;

use crate::config::options::RecordColumns;
use crate::error::Result;
use crate::gazetteer::EntryId;
use crate::migrants::metadata::Metadata;
use crate::migrants::names::PersonNames;
use crate::table::Table;

/// Inclusive year range; negative years are BCE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl DateRange {
    /// Upstream writes years as integers, floats ("14.0") or "nan".
    pub fn parse(from: &str, to: &str) -> Option<Self> {
        let range = Self { from: parse_year(from), to: parse_year(to) };
        (range.from.is_some() || range.to.is_some()).then_some(range)
    }
}

fn parse_year(s: &str) -> Option<i32> {
    let v = s.trim().parse::<f64>().ok()?;
    (v.is_finite() && v.fract() == 0.0 && v.abs() < 10_000.0).then_some(v as i32)
}

#[derive(Clone, Debug, PartialEq)]
pub struct InscriptionRecord {
    pub id: String,
    pub text: String,
    pub findspot: Option<String>,
    pub dates: Option<DateRange>,
    pub keywords: Option<String>,
    /// Pass-through cells, in [`Schema::headers`] order.
    pub cells: Vec<String>,

    pub origin_candidate: Option<String>,
    pub is_migrant: bool,
    /// Gazetteer entry behind `origin_candidate`.
    pub origin: Option<EntryId>,
    pub metadata: Option<Metadata>,
    pub names: Option<PersonNames>,
}

impl InscriptionRecord {
    /// Bare record, mostly for tests and benches.
    pub fn new(id: impl Into<String>, text: impl Into<String>, findspot: Option<&str>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            findspot: findspot.map(str::to_string),
            dates: None,
            keywords: None,
            cells: Vec::new(),
            origin_candidate: None,
            is_migrant: false,
            origin: None,
            metadata: None,
            names: None,
        }
    }
}

/// Pass-through header of a record batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    pub headers: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Records {
    pub schema: Schema,
    pub records: Vec<InscriptionRecord>,
    /// Malformed rows dropped while reading, including the table reader's.
    pub skipped: usize,
}

impl Records {
    /// Build records from `table`.
    ///
    /// `id` and `text` columns are required. Columns named in `rewritten`
    /// are left out of the pass-through cells. Rows with an empty id are
    /// skipped with a warning.
    pub fn from_table(table: &Table, cols: &RecordColumns, rewritten: &[&str]) -> Result<Self> {
        let id_ix = table.require("input", &cols.id)?;
        let text_ix = table.require("input", &cols.text)?;
        let findspot_ix = table.column(&cols.findspot);
        let from_ix = table.column(&cols.time_from);
        let to_ix = table.column(&cols.time_to);
        let keywords_ix = table.column(&cols.keywords);

        if findspot_ix.is_none() {
            warn!("input has no '{}' column; findspots are unknown", cols.findspot);
        }

        let keep: Vec<usize> = (0..table.headers.len())
            .filter(|&i| !rewritten.contains(&table.headers[i].as_str()))
            .collect();
        let schema = Schema {
            headers: keep.iter().map(|&i| table.headers[i].clone()).collect(),
        };

        let mut records = Vec::with_capacity(table.rows.len());
        let mut skipped = table.skipped;

        for (n, row) in table.rows.iter().enumerate() {
            let cell = |ix: usize| row.get(ix).map(String::as_str).unwrap_or("");
            let opt = |ix: Option<usize>| {
                ix.map(cell).map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
            };

            let id = cell(id_ix).trim();
            if id.is_empty() {
                warn!("input row {}: empty '{}'; skipped", n + 2, cols.id);
                skipped += 1;
                continue;
            }

            records.push(InscriptionRecord {
                id: id.to_string(),
                text: cell(text_ix).to_string(),
                findspot: opt(findspot_ix),
                dates: DateRange::parse(
                    from_ix.map(cell).unwrap_or(""),
                    to_ix.map(cell).unwrap_or(""),
                ),
                keywords: opt(keywords_ix),
                cells: keep.iter().map(|&i| cell(i).to_string()).collect(),
                origin_candidate: None,
                is_migrant: false,
                origin: None,
                metadata: None,
                names: None,
            });
        }

        Ok(Self { schema, records, skipped })
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
