// src/runner.rs
use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    config::{consts::TOP_ORIGINS, options::AppOptions},
    error::Result,
    gazetteer::{self, LoadReport},
    migrants::{MigrantIdentifier, metadata::MetadataRules, names::NameSet},
    progress::Progress,
    record::Records,
    report::{self, ReportLayout},
    table::read_table,
};

/// Summary of what one run read and produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub input: PathBuf,
    /// Records annotated and written.
    pub records: usize,
    /// Input rows dropped as malformed.
    pub skipped_rows: usize,
    pub gazetteer: LoadReport,
    pub places: usize,
    /// Records naming at least one gazetteer place.
    pub matched: usize,
    pub migrants: usize,
    pub files_written: Vec<PathBuf>,
    /// Most frequent origins among flagged records, count descending.
    pub top_origins: Vec<(String, usize)>,
}

/// Run the whole pass: load gazetteer and records, annotate, write.
///
/// `today` drives the dated file names. `progress` can be None (no updates)
/// or Some(&mut impl Progress).
pub fn run(
    opts: &AppOptions,
    today: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let input = opts.input.resolve_path(today)?;
    let in_delim = opts.input.delim_for(&input);

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Reading gazetteer {}", opts.gazetteer.path.display()));
    }
    let (gazetteer, gaz_report) = gazetteer::load(&opts.gazetteer)?;

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Reading inscriptions {}", input.display()));
    }
    let layout = ReportLayout::from_options(opts);
    let mut records = {
        let table = read_table(&input, in_delim)?;
        Records::from_table(&table, &opts.input.columns, &layout.appended())?
    };
    info!("Read {} inscriptions ({} rows skipped)", records.len(), records.skipped);

    let identifier = MigrantIdentifier::new(&gazetteer, opts.matching.findspot_policy);
    let rules = if opts.matching.metadata { Some(MetadataRules::new()?) } else { None };
    let names = match &opts.matching.names {
        Some(path) => Some(NameSet::load(path, &opts.matching.names_column)?),
        None => None,
    };

    if let Some(p) = progress.as_deref_mut() {
        p.begin(records.len());
    }
    for rec in records.records.iter_mut() {
        if let Some(rules) = &rules {
            rec.metadata = Some(rules.classify(rec));
        }
        if let Some(names) = &names {
            rec.names = Some(names.classify(&rec.text));
        }
        identifier.annotate(rec);
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&rec.id, rec.is_migrant);
        }
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let out_delim = opts.export.format.unwrap_or(in_delim);
    let dir = &opts.input.data_dir;
    let mut files_written = Vec::new();

    let master = opts.export.out_path(dir, today, out_delim);
    files_written.push(report::emit(&master, out_delim, layout, &records, &gazetteer, |_| true)?);

    if let Some(path) = opts.export.migrants_path(dir, today, out_delim) {
        files_written.push(report::emit(&path, out_delim, layout, &records, &gazetteer, |r| r.is_migrant)?);
    }

    if let Some(path) = opts.gazetteer.save_path(dir, today, out_delim) {
        files_written.push(gazetteer::export::save(&gazetteer, &opts.gazetteer.columns, &path, out_delim)?);
    }

    let matched = records.records.iter().filter(|r| r.origin.is_some()).count();
    let migrants = records.records.iter().filter(|r| r.is_migrant).count();
    debug!("{matched} records name a place, {migrants} flagged");

    Ok(RunSummary {
        input,
        records: records.len(),
        skipped_rows: records.skipped,
        gazetteer: gaz_report,
        places: gazetteer.len(),
        matched,
        migrants,
        files_written,
        top_origins: top_origins(&records, TOP_ORIGINS),
    })
}

fn top_origins(records: &Records, n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for rec in records.records.iter().filter(|r| r.is_migrant) {
        if let Some(o) = rec.origin_candidate.as_deref() {
            *counts.entry(o).or_default() += 1;
        }
    }
    let mut v: Vec<(String, usize)> = counts.into_iter().map(|(k, c)| (k.to_string(), c)).collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v.truncate(n);
    v
}
