// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use super::consts::*;
use crate::error::{Error, Result};
use crate::gazetteer::AmbiguityPolicy;
use crate::migrants::FindspotPolicy;
use crate::store;
use crate::table::Delim;

/// Everything one run needs. Built from defaults, then an optional TOML
/// file, then CLI flags (see `cli.rs`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub input: InputOptions,
    pub gazetteer: GazetteerOptions,
    pub matching: MatchOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    /// Read options from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/* ---------------- Input ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputOptions {
    /// Explicit input table. When unset, the newest dated
    /// `EDCS_corrected_<date>.csv` in `data_dir` is used.
    pub path: Option<PathBuf>,
    pub data_dir: PathBuf,
    /// Delimiter override; otherwise guessed from the extension.
    pub format: Option<Delim>,
    pub columns: RecordColumns,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            path: None,
            data_dir: PathBuf::from("."),
            format: None,
            columns: RecordColumns::default(),
        }
    }
}

impl InputOptions {
    /// Resolve the input table, falling back to the dated-file lookup.
    pub fn resolve_path(&self, today: NaiveDate) -> Result<PathBuf> {
        match &self.path {
            Some(p) => Ok(p.clone()),
            None => store::find_latest_dated(&self.data_dir, INPUT_PREFIX, today, LOOKBACK_DAYS),
        }
    }

    pub fn delim_for(&self, path: &Path) -> Delim {
        self.format.unwrap_or_else(|| Delim::from_path(path))
    }
}

/// Header names of the record columns the pipeline reads.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordColumns {
    pub id: String,
    pub text: String,
    pub findspot: String,
    pub time_from: String,
    pub time_to: String,
    pub keywords: String,
}

impl Default for RecordColumns {
    fn default() -> Self {
        Self {
            id: COL_ID.into(),
            text: COL_TEXT.into(),
            findspot: COL_FINDSPOT.into(),
            time_from: COL_TIME_FROM.into(),
            time_to: COL_TIME_TO.into(),
            keywords: COL_KEYWORDS.into(),
        }
    }
}

/* ---------------- Gazetteer ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GazetteerOptions {
    pub path: PathBuf,
    pub format: Option<Delim>,
    pub columns: GazetteerColumns,
    /// Period letters a row must carry (any of) to be kept. Empty keeps all.
    pub periods: String,
    pub ambiguity: AmbiguityPolicy,
    /// Add "-ensis" origin adjectives derived from each name.
    pub derive_ethnics: bool,
    /// Names with no word at least this many chars long are not indexed.
    pub min_variant_len: usize,
    /// Write the processed gazetteer (cleaned names, derived forms).
    pub save: bool,
    pub save_out: Option<PathBuf>,
}

impl Default for GazetteerOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_GAZETTEER),
            format: None,
            columns: GazetteerColumns::default(),
            periods: ANCIENT_PERIODS.into(),
            ambiguity: AmbiguityPolicy::default(),
            derive_ethnics: false,
            min_variant_len: MIN_VARIANT_LEN,
            save: false,
            save_out: None,
        }
    }
}

impl GazetteerOptions {
    pub fn delim(&self) -> Delim {
        self.format.unwrap_or_else(|| Delim::from_path(&self.path))
    }

    /// Processed gazetteer path, if it should be written:
    /// `save_out`, else `<dir>/Pleiades_toponyms_<today>.<ext>`.
    pub fn save_path(&self, dir: &Path, today: NaiveDate, delim: Delim) -> Option<PathBuf> {
        if !self.save && self.save_out.is_none() {
            return None;
        }
        Some(match &self.save_out {
            Some(p) => p.clone(),
            None => store::dated_path(dir, TOPONYMS_PREFIX, today, delim),
        })
    }
}

/// Header names in the gazetteer source. Only `canonical` is required;
/// the rest are used when present.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GazetteerColumns {
    pub canonical: String,
    pub variants: String,
    pub geo_key: String,
    pub lat: String,
    pub long: String,
    pub periods: String,
}

impl Default for GazetteerColumns {
    fn default() -> Self {
        Self {
            canonical: COL_TITLE.into(),
            variants: COL_NAMES.into(),
            geo_key: COL_PID.into(),
            lat: COL_LAT.into(),
            long: COL_LONG.into(),
            periods: COL_PERIODS.into(),
        }
    }
}

/* ---------------- Matching ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchOptions {
    pub findspot_policy: FindspotPolicy,
    /// Append text_length / funerary / possible_migrant / probable_migrant.
    pub metadata: bool,
    /// PIR names table; when set, append name / contains_name / gender_main_pers.
    pub names: Option<PathBuf>,
    pub names_column: String,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            findspot_policy: FindspotPolicy::default(),
            metadata: false,
            names: None,
            names_column: COL_PIR_ANNOTATED.into(),
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    /// Output delimiter; defaults to the input's.
    pub format: Option<Delim>,
    pub out: Option<PathBuf>,
    /// Also write a table holding only the flagged rows.
    pub migrants: bool,
    pub migrants_out: Option<PathBuf>,
    /// Append origin_geo_key / origin_lat / origin_long.
    pub origin_details: bool,
}

impl ExportOptions {
    /// Master table path: explicit `out`, else `<dir>/EDCS_Master_<today>.<ext>`.
    pub fn out_path(&self, dir: &Path, today: NaiveDate, delim: Delim) -> PathBuf {
        match &self.out {
            Some(p) => p.clone(),
            None => store::dated_path(dir, MASTER_PREFIX, today, delim),
        }
    }

    /// Migrants-only table path, if that table is wanted.
    pub fn migrants_path(&self, dir: &Path, today: NaiveDate, delim: Delim) -> Option<PathBuf> {
        if !self.migrants && self.migrants_out.is_none() {
            return None;
        }
        Some(match &self.migrants_out {
            Some(p) => p.clone(),
            None => store::dated_path(dir, MIGRANTS_PREFIX, today, delim),
        })
    }
}
