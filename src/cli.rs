// src/cli.rs
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;

use crate::config::consts::PROGRESS_EVERY;
use crate::config::options::AppOptions;
use crate::error::Result;
use crate::gazetteer::AmbiguityPolicy;
use crate::migrants::FindspotPolicy;
use crate::progress::LogProgress;
use crate::runner::{self, RunSummary};
use crate::table::Delim;

/// Flag inscriptions that name an origin other than their findspot.
///
/// Settings come from the defaults, then `--config`, then these flags.
/// Every on/off setting has a `--no-` form to turn off what the file turns on.
#[derive(Debug, Default, Parser)]
#[command(name = "edcs_migrants", version, about)]
pub struct Cli {
    /// Input table [default: newest EDCS_corrected_<date>.csv in the data dir]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Gazetteer table [default: pleiades-names.csv]
    #[arg(short, long)]
    pub gazetteer: Option<PathBuf>,

    /// Annotated output [default: EDCS_Master_<today> in the data dir]
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Also write the flagged rows alone [default name: EDCS_Migrants_<today>]
    #[arg(long, overrides_with = "no_migrants")]
    pub migrants: bool,
    #[arg(long, overrides_with = "migrants")]
    pub no_migrants: bool,

    /// Path for the flagged-rows table (implies --migrants)
    #[arg(long)]
    pub migrants_out: Option<PathBuf>,

    /// Where dated files are looked up and written
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output delimiter [default: same as input]
    #[arg(long, value_enum)]
    pub format: Option<Delim>,

    #[arg(long, value_enum)]
    pub findspot_policy: Option<FindspotPolicy>,

    /// What to do with a name claimed by two places
    #[arg(long, value_enum)]
    pub ambiguity: Option<AmbiguityPolicy>,

    /// Append text_length, funerary, possible_migrant, probable_migrant
    #[arg(long, overrides_with = "no_metadata")]
    pub metadata: bool,
    #[arg(long, overrides_with = "metadata")]
    pub no_metadata: bool,

    /// PIR names table; appends name, contains_name, gender_main_pers
    #[arg(long)]
    pub names: Option<PathBuf>,

    /// Also match -ensis origin adjectives derived from place names
    #[arg(long, overrides_with = "no_derive_ethnics")]
    pub derive_ethnics: bool,
    #[arg(long, overrides_with = "derive_ethnics")]
    pub no_derive_ethnics: bool,

    /// Write the processed gazetteer [default name: Pleiades_toponyms_<today>]
    #[arg(long, overrides_with = "no_save_gazetteer")]
    pub save_gazetteer: bool,
    #[arg(long, overrides_with = "save_gazetteer")]
    pub no_save_gazetteer: bool,

    /// Path for the processed gazetteer (implies --save-gazetteer)
    #[arg(long)]
    pub gazetteer_out: Option<PathBuf>,

    /// Append origin_geo_key, origin_lat, origin_long
    #[arg(long, overrides_with = "no_origin_details")]
    pub origin_details: bool,
    #[arg(long, overrides_with = "origin_details")]
    pub no_origin_details: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    pub fn to_options(&self) -> Result<AppOptions> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::from_file(path)?,
            None => AppOptions::default(),
        };

        if let Some(p) = &self.input { opts.input.path = Some(p.clone()); }
        if let Some(p) = &self.data_dir { opts.input.data_dir = p.clone(); }
        if let Some(p) = &self.gazetteer { opts.gazetteer.path = p.clone(); }
        if let Some(a) = self.ambiguity { opts.gazetteer.ambiguity = a; }
        if let Some(on) = switch(self.derive_ethnics, self.no_derive_ethnics) { opts.gazetteer.derive_ethnics = on; }
        if let Some(on) = switch(self.save_gazetteer, self.no_save_gazetteer) { opts.gazetteer.save = on; }
        if let Some(p) = &self.gazetteer_out { opts.gazetteer.save_out = Some(p.clone()); }
        if let Some(f) = self.findspot_policy { opts.matching.findspot_policy = f; }
        if let Some(on) = switch(self.metadata, self.no_metadata) { opts.matching.metadata = on; }
        if let Some(p) = &self.names { opts.matching.names = Some(p.clone()); }
        if let Some(p) = &self.out { opts.export.out = Some(p.clone()); }
        if let Some(f) = self.format { opts.export.format = Some(f); }
        if let Some(on) = switch(self.migrants, self.no_migrants) { opts.export.migrants = on; }
        if let Some(p) = &self.migrants_out { opts.export.migrants_out = Some(p.clone()); }
        if let Some(on) = switch(self.origin_details, self.no_origin_details) { opts.export.origin_details = on; }

        Ok(opts)
    }
}

/// `--x` / `--no-x` pair: `None` leaves the setting alone.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn run(cli: &Cli) -> Result<RunSummary> {
    let opts = cli.to_options()?;
    let mut progress = LogProgress::new(PROGRESS_EVERY);
    let summary = runner::run(&opts, Local::now().date_naive(), Some(&mut progress))?;
    print_summary(&summary);
    Ok(summary)
}

pub fn print_summary(s: &RunSummary) {
    println!("Input:      {}", s.input.display());
    println!(
        "Gazetteer:  {} places ({} rows, {} skipped, {} out of period)",
        s.places, s.gazetteer.rows, s.gazetteer.skipped, s.gazetteer.filtered
    );
    println!("Records:    {} ({} rows skipped)", s.records, s.skipped_rows);
    println!("Matched:    {}", s.matched);
    println!("Migrants:   {}", s.migrants);
    for (origin, n) in &s.top_origins {
        println!("  {n:>6}  {origin}");
    }
    for p in &s.files_written {
        println!("Wrote {}", p.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "edcs_migrants",
            "-i", "in.csv",
            "--format", "tsv",
            "--findspot-policy", "ignore",
            "--ambiguity", "drop",
            "--migrants-out", "m.tsv",
            "--metadata",
        ]);
        let opts = cli.to_options().unwrap();

        assert_eq!(opts.input.path, Some(PathBuf::from("in.csv")));
        assert_eq!(opts.export.format, Some(Delim::Tsv));
        assert_eq!(opts.matching.findspot_policy, FindspotPolicy::Ignore);
        assert_eq!(opts.gazetteer.ambiguity, AmbiguityPolicy::Drop);
        assert_eq!(opts.export.migrants_out, Some(PathBuf::from("m.tsv")));
        assert!(opts.matching.metadata);
        assert!(!opts.export.origin_details);
    }

    #[test]
    fn no_flags_means_defaults() {
        let cli = Cli::parse_from(["edcs_migrants"]);
        assert_eq!(cli.to_options().unwrap(), AppOptions::default());
    }

    fn write_config(dir: &std::path::Path, text: &str) -> PathBuf {
        let path = dir.join("migrants.toml");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            r#"
            [gazetteer]
            ambiguity = "drop"
            derive_ethnics = true

            [matching]
            findspot_policy = "ignore"
            metadata = true

            [export]
            migrants = true
            "#,
        );
        let config = config.to_str().unwrap();

        let cli = Cli::parse_from(["edcs_migrants", "--config", config, "--findspot-policy", "suppress"]);
        let opts = cli.to_options().unwrap();
        // flag wins, untouched file values stay
        assert_eq!(opts.matching.findspot_policy, FindspotPolicy::Suppress);
        assert_eq!(opts.gazetteer.ambiguity, AmbiguityPolicy::Drop);
        assert!(opts.gazetteer.derive_ethnics && opts.matching.metadata && opts.export.migrants);
        // file values beat defaults
        assert_eq!(opts.gazetteer.periods, AppOptions::default().gazetteer.periods);

        let cli = Cli::parse_from([
            "edcs_migrants", "-c", config, "--no-metadata", "--no-derive-ethnics", "--no-migrants",
        ]);
        let opts = cli.to_options().unwrap();
        assert!(!opts.matching.metadata);
        assert!(!opts.gazetteer.derive_ethnics);
        assert!(!opts.export.migrants);
        assert_eq!(opts.matching.findspot_policy, FindspotPolicy::Ignore);
    }

    #[test]
    fn last_of_a_flag_pair_wins() {
        let cli = Cli::parse_from(["edcs_migrants", "--metadata", "--no-metadata"]);
        assert!(!cli.to_options().unwrap().matching.metadata);

        let cli = Cli::parse_from(["edcs_migrants", "--no-origin-details", "--origin-details"]);
        assert!(cli.to_options().unwrap().export.origin_details);
    }

    #[test]
    fn names_and_gazetteer_output_flags() {
        let cli = Cli::parse_from(["edcs_migrants", "--names", "pir.csv", "--gazetteer-out", "g.tsv"]);
        let opts = cli.to_options().unwrap();
        assert_eq!(opts.matching.names, Some(PathBuf::from("pir.csv")));
        assert_eq!(opts.gazetteer.save_out, Some(PathBuf::from("g.tsv")));
        assert!(!opts.gazetteer.save);
    }

    #[test]
    fn invalid_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "[matching]\nfindspot_policy = \"sometimes\"\n");

        let cli = Cli::parse_from(["edcs_migrants", "--config", config.to_str().unwrap()]);
        assert!(matches!(cli.to_options(), Err(Error::Config { .. })));

        let cli = Cli::parse_from(["edcs_migrants", "--config", "/nonexistent/migrants.toml"]);
        assert!(matches!(cli.to_options(), Err(Error::Read { .. })));
    }
}
