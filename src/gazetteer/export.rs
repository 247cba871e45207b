// src/gazetteer/export.rs
//! Processed gazetteer back to a table: one row per place, every spelling
//! (cleaned names and derived forms) in the variants column. Headers follow
//! the configured [`GazetteerColumns`], so the file loads again as is.

use std::path::{Path, PathBuf};

use super::Gazetteer;
use crate::config::options::GazetteerColumns;
use crate::error::Result;
use crate::file::write_table_to_path;
use crate::table::Delim;

pub fn headers(cols: &GazetteerColumns) -> Vec<String> {
    [&cols.geo_key, &cols.canonical, &cols.variants, &cols.lat, &cols.long]
        .into_iter()
        .cloned()
        .collect()
}

pub fn rows(gazetteer: &Gazetteer) -> Vec<Vec<String>> {
    let coord = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    gazetteer
        .entries()
        .iter()
        .map(|e| {
            vec![
                e.geo_key.clone(),
                e.canonical.clone(),
                e.variants.iter().map(String::as_str).collect::<Vec<_>>().join(", "),
                coord(e.lat),
                coord(e.long),
            ]
        })
        .collect()
}

pub fn save(gazetteer: &Gazetteer, cols: &GazetteerColumns, path: &Path, delim: Delim) -> Result<PathBuf> {
    let rows = rows(gazetteer);
    write_table_to_path(path, &headers(cols), rows.iter().map(Vec::as_slice), delim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::GazetteerOptions;
    use crate::gazetteer::loader::from_table;
    use crate::table::read_table;

    const SOURCE: &str = "\
pid,title,nameTransliterated,reprLat,reprLong,timePeriods
/places/423025,Roma,Roma,,,R
/places/423025,Roma,Romae,41.891775,12.486137,R
/places/285482,Lugdunum,Lugdun(um),45.76,4.83,R
";

    #[test]
    fn saved_gazetteer_loads_back_with_derived_forms() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("pleiades.csv");
        std::fs::write(&src, SOURCE).unwrap();

        let opts = GazetteerOptions { path: src.clone(), derive_ethnics: true, ..GazetteerOptions::default() };
        let (g, _) = from_table(&read_table(&src, Delim::Csv).unwrap(), &opts).unwrap();

        let out = dir.path().join("toponyms.tsv");
        save(&g, &opts.columns, &out, Delim::Tsv).unwrap();

        let table = read_table(&out, Delim::Tsv).unwrap();
        assert_eq!(table.headers, vec!["pid", "title", "nameTransliterated", "reprLat", "reprLong"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "/places/423025");
        assert_eq!(table.rows[0][2], "Roma, Romae, Romaensis, Romensis");
        assert_eq!(table.rows[0][3], "41.891775");

        let plain = GazetteerOptions { path: out.clone(), ..GazetteerOptions::default() };
        let (again, _) = from_table(&table, &plain).unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again.lookup("Romensis").unwrap().canonical, "Roma");
        assert_eq!(again.lookup("Lugdunensis").unwrap().lat, Some(45.76));
    }
}
