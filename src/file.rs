// src/file.rs

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::error::{Error, Result};
use crate::table::{self, Delim};

/// Create/truncate `path` and write header + rows. Parent directories are
/// created as needed. Any failure here is fatal for the run.
pub fn write_table_to_path<'a, I>(
    path: &Path,
    headers: &[String],
    rows: I,
    delim: Delim,
) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a [String]>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let write_err = |source| Error::Write { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(write_err)?;
    // csv errors on a writer are I/O failures or ragged rows; both abort.
    table::write_to(BufWriter::new(file), headers, rows, delim)
        .map_err(|e| write_err(std::io::Error::from(e)))?;

    info!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
