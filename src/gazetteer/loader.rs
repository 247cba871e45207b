// src/gazetteer/loader.rs
//! Gazetteer loading from a flat delimited table.
//!
//! Defaults fit the Pleiades names export (one row per attested name):
//! rows are grouped into places by `pid`, names are cleaned with
//! [`split_names`], rows outside the wanted periods are ignored and the
//! first coordinates seen for a place are kept. Rows without a canonical
//! name are skipped with a warning.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, warn};

use super::{ethnics, Gazetteer, GazetteerBuilder, ToponymEntry};
use crate::config::options::GazetteerOptions;
use crate::core::sanitize::{normalize_ws, split_names, strip_tags};
use crate::error::Result;
use crate::table::{read_table, Table};

/// What happened to the source rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    /// Malformed rows (ragged, undecodable, no canonical name).
    pub skipped: usize,
    /// Rows outside the wanted periods.
    pub filtered: usize,
    pub derived: usize,
}

/// Load and build the gazetteer described by `opts`.
pub fn load(opts: &GazetteerOptions) -> Result<(Gazetteer, LoadReport)> {
    let table = read_table(&opts.path, opts.delim())?;
    let (gazetteer, report) = from_table(&table, opts)?;
    info!(
        "Loaded gazetteer {}: {} places, {} names ({} rows, {} skipped, {} out of period)",
        opts.path.display(),
        gazetteer.len(),
        gazetteer.key_count(),
        report.rows,
        report.skipped,
        report.filtered
    );
    Ok((gazetteer, report))
}

/// Place being assembled from one or more rows.
struct Draft {
    canonical: String,
    geo_key: String,
    names: BTreeSet<String>,
    lat: Option<f64>,
    long: Option<f64>,
}

struct Cols {
    canonical: usize,
    variants: Option<usize>,
    geo_key: Option<usize>,
    lat: Option<usize>,
    long: Option<usize>,
    periods: Option<usize>,
}

/// Build from an already read table. `table.skipped` counts toward the report.
pub fn from_table(table: &Table, opts: &GazetteerOptions) -> Result<(Gazetteer, LoadReport)> {
    let c = &opts.columns;
    let cols = Cols {
        canonical: table.require("gazetteer", &c.canonical)?,
        variants: table.column(&c.variants),
        geo_key: table.column(&c.geo_key),
        lat: table.column(&c.lat),
        long: table.column(&c.long),
        periods: table.column(&c.periods),
    };

    let mut report = LoadReport {
        rows: table.rows.len() + table.skipped,
        skipped: table.skipped,
        ..LoadReport::default()
    };

    let mut drafts: Vec<Draft> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for (i, row) in table.rows.iter().enumerate() {
        let cell = |ix: Option<usize>| ix.and_then(|ix| row.get(ix)).map(|s| s.trim()).unwrap_or("");

        let canonical = normalize_ws(&strip_tags(cell(Some(cols.canonical))));
        if canonical.is_empty() {
            warn!("gazetteer row {}: no canonical name; skipped", i + 2);
            report.skipped += 1;
            continue;
        }

        if !in_periods(cell(cols.periods), &opts.periods) {
            report.filtered += 1;
            continue;
        }

        let geo_key = cell(cols.geo_key).to_string();
        let group = if geo_key.is_empty() { format!("name:{canonical}") } else { geo_key.clone() };

        let ix = *by_key.entry(group).or_insert_with(|| {
            drafts.push(Draft {
                canonical: canonical.clone(),
                geo_key,
                names: BTreeSet::new(),
                lat: None,
                long: None,
            });
            drafts.len() - 1
        });
        let draft = &mut drafts[ix];

        draft.names.insert(canonical);
        draft.names.extend(split_names(cell(cols.variants)));
        if draft.lat.is_none() || draft.long.is_none() {
            if let (Some(lat), Some(long)) = (parse_coord(cell(cols.lat)), parse_coord(cell(cols.long))) {
                draft.lat = Some(lat);
                draft.long = Some(long);
            }
        }
    }

    let mut builder = GazetteerBuilder::new(opts.ambiguity, opts.min_variant_len);
    for d in drafts {
        let mut entry = ToponymEntry::new(d.canonical, d.geo_key).with_variants(d.names);
        entry.lat = d.lat;
        entry.long = d.long;
        builder.push(entry)?;
    }

    if opts.derive_ethnics {
        for id in 0..builder.len() {
            let forms: Vec<String> = builder
                .entry(id)
                .variants
                .iter()
                .flat_map(|v| ethnics::derive(v))
                .collect();
            for form in forms {
                if builder.push_derived(id, form) {
                    report.derived += 1;
                }
            }
        }
        debug!("Derived {} -ensis forms", report.derived);
    }

    Ok((builder.build(), report))
}

/// Empty period cells and an empty wanted set keep the row.
fn in_periods(cell: &str, wanted: &str) -> bool {
    wanted.is_empty() || cell.is_empty() || cell.chars().any(|c| wanted.contains(c))
}

fn parse_coord(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{read_from, Delim};
    use std::path::Path;

    const PLEIADES: &str = "\
pid,title,nameTransliterated,reprLat,reprLong,timePeriods
/places/423025,Roma,Roma,,,RL
/places/423025,Roma,\"Romae, Urbs\",41.891775,12.486137,R
/places/285482,Lugdunum,Lugdun(um),45.76,4.83,HRL
/places/1,Troia,Ilion,,,A
,,Nomen nescio,,,R
/places/2,Emona,Emona,,,
";

    fn build(opts: &GazetteerOptions) -> (Gazetteer, LoadReport) {
        let t = read_from(PLEIADES.as_bytes(), Delim::Csv, Path::new("mem")).unwrap();
        from_table(&t, opts).unwrap()
    }

    #[test]
    fn rows_group_by_place() {
        let (g, report) = build(&GazetteerOptions::default());

        assert_eq!(g.len(), 3);
        let rome = g.lookup("urbs").unwrap();
        assert_eq!(rome.canonical, "Roma");
        assert!(rome.variants.contains("Romae"));
        assert_eq!(rome.lat, Some(41.891775));
        assert_eq!(g.lookup("Lugdun").unwrap().canonical, "Lugdunum");

        assert_eq!(report.rows, 6);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.filtered, 1);
    }

    #[test]
    fn period_filter_can_be_disabled() {
        let opts = GazetteerOptions { periods: String::new(), ..GazetteerOptions::default() };
        let (g, report) = build(&opts);
        assert_eq!(g.lookup("Ilion").unwrap().canonical, "Troia");
        assert_eq!(report.filtered, 0);
    }

    #[test]
    fn ethnics_are_optional() {
        let (g, _) = build(&GazetteerOptions::default());
        assert!(g.lookup("Lugdunensis").is_none());

        let opts = GazetteerOptions { derive_ethnics: true, ..GazetteerOptions::default() };
        let (g, report) = build(&opts);
        assert_eq!(g.lookup("lugdunensis").unwrap().canonical, "Lugdunum");
        assert_eq!(g.lookup("Romensis").unwrap().canonical, "Roma");
        assert!(report.derived > 0);
    }

    #[test]
    fn rows_without_place_id_group_by_title() {
        let t = read_from(
            "pid,title,nameTransliterated,reprLat,reprLong,timePeriods\n\
             ,Vicus Novus,Vicus Novus,,,R\n\
             ,Vicus Novus,Novus Vicus,46.1,14.5,R\n\
             ,Vicus Vetus,Vicus Vetus,,,R\n"
                .as_bytes(),
            Delim::Csv,
            Path::new("mem"),
        )
        .unwrap();
        let (g, report) = from_table(&t, &GazetteerOptions::default()).unwrap();

        assert_eq!(g.len(), 2);
        assert_eq!(report.skipped, 0);
        let novus = g.lookup("novus vicus").unwrap();
        assert_eq!(novus.canonical, "Vicus Novus");
        assert_eq!(novus.geo_key, "");
        assert!(novus.variants.contains("Vicus Novus") && novus.variants.contains("Novus Vicus"));
        assert_eq!(novus.lat, Some(46.1));
        assert_eq!(g.lookup("Vicus Vetus").unwrap().canonical, "Vicus Vetus");
    }

    #[test]
    fn missing_canonical_column_is_fatal() {
        let t = read_from("name\nRoma\n".as_bytes(), Delim::Csv, Path::new("mem")).unwrap();
        assert!(from_table(&t, &GazetteerOptions::default()).is_err());
    }
}
