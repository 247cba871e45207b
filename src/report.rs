// src/report.rs
//! Report emitter: annotated records back to a table.
//!
//! Output columns are the pass-through input columns in their original
//! order, then, as enabled, the metadata columns, the personal-name columns
//! and the origin details, and always `origin_candidate` and `is_migrant`
//! last.

use std::path::{Path, PathBuf};

use crate::config::consts::{COL_MIGRANT, COL_ORIGIN, COL_ORIGIN_GEO_KEY, COL_ORIGIN_LAT, COL_ORIGIN_LONG};
use crate::config::options::AppOptions;
use crate::error::Result;
use crate::file::write_table_to_path;
use crate::gazetteer::Gazetteer;
use crate::migrants::metadata::{self, flag};
use crate::migrants::names;
use crate::record::{InscriptionRecord, Records};
use crate::table::Delim;

const ORIGIN_DETAILS: [&str; 3] = [COL_ORIGIN_GEO_KEY, COL_ORIGIN_LAT, COL_ORIGIN_LONG];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportLayout {
    pub metadata: bool,
    pub names: bool,
    pub origin_details: bool,
}

impl ReportLayout {
    pub fn from_options(opts: &AppOptions) -> Self {
        Self {
            metadata: opts.matching.metadata,
            names: opts.matching.names.is_some(),
            origin_details: opts.export.origin_details,
        }
    }

    /// Names of the columns this layout appends, in output order.
    pub fn appended(&self) -> Vec<&'static str> {
        let mut cols = Vec::new();
        if self.metadata {
            cols.extend(metadata::COLUMNS);
        }
        if self.names {
            cols.extend(names::COLUMNS);
        }
        if self.origin_details {
            cols.extend(ORIGIN_DETAILS);
        }
        cols.extend([COL_ORIGIN, COL_MIGRANT]);
        cols
    }

    pub fn headers(&self, records: &Records) -> Vec<String> {
        let mut h = records.schema.headers.clone();
        h.extend(self.appended().into_iter().map(str::to_string));
        h
    }

    pub fn row(&self, rec: &InscriptionRecord, gazetteer: &Gazetteer) -> Vec<String> {
        let mut row = Vec::with_capacity(rec.cells.len() + 12);
        row.extend(rec.cells.iter().cloned());

        if self.metadata {
            row.extend(rec.metadata.unwrap_or_default().cells());
        }
        if self.names {
            row.extend(rec.names.clone().unwrap_or_default().cells());
        }
        if self.origin_details {
            let entry = rec.origin.map(|id| gazetteer.entry(id));
            row.push(entry.map(|e| e.geo_key.clone()).unwrap_or_default());
            row.push(entry.and_then(|e| e.lat).map(|v| v.to_string()).unwrap_or_default());
            row.push(entry.and_then(|e| e.long).map(|v| v.to_string()).unwrap_or_default());
        }

        row.push(rec.origin_candidate.clone().unwrap_or_default());
        row.push(flag(rec.is_migrant));
        row
    }
}

/// Write every record accepted by `keep`, in input order.
pub fn emit<F>(
    path: &Path,
    delim: Delim,
    layout: ReportLayout,
    records: &Records,
    gazetteer: &Gazetteer,
    keep: F,
) -> Result<PathBuf>
where
    F: Fn(&InscriptionRecord) -> bool,
{
    let headers = layout.headers(records);
    let rows: Vec<Vec<String>> = records
        .records
        .iter()
        .filter(|r| keep(r))
        .map(|r| layout.row(r, gazetteer))
        .collect();
    write_table_to_path(path, &headers, rows.iter().map(Vec::as_slice), delim)
}
