// src/store.rs
//! Dated working files.
//!
//! Every stage of the workflow saves its table as `<prefix>_<YYYY-MM-DD>.<ext>`
//! and the next stage opens the newest one it can find.

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::config::consts::DATE_FMT;
use crate::error::{Error, Result};
use crate::table::Delim;

pub fn dated_name(prefix: &str, date: NaiveDate, delim: Delim) -> String {
    format!("{prefix}_{}.{}", date.format(DATE_FMT), delim.ext())
}

pub fn dated_path(dir: &Path, prefix: &str, date: NaiveDate, delim: Delim) -> PathBuf {
    dir.join(dated_name(prefix, date, delim))
}

/// Walk back from `today` one day at a time (today included) looking for
/// `<prefix>_<date>.csv`, then `.tsv`, in `dir`.
pub fn find_latest_dated(dir: &Path, prefix: &str, today: NaiveDate, days: u32) -> Result<PathBuf> {
    let mut date = today;
    for _ in 0..=days {
        for delim in [Delim::Csv, Delim::Tsv] {
            let p = dated_path(dir, prefix, date, delim);
            if p.is_file() {
                info!("Using {}", p.display());
                return Ok(p);
            }
        }
        date = match date.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    debug!("No {prefix} file in {} back to {date}", dir.display());
    Err(Error::NoInput {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
        days,
    })
}
