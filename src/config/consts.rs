// src/config/consts.rs

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Dated files: "<prefix>_<YYYY-MM-DD>.<ext>"
pub const INPUT_PREFIX: &str = "EDCS_corrected";
pub const MASTER_PREFIX: &str = "EDCS_Master";
pub const MIGRANTS_PREFIX: &str = "EDCS_Migrants";
pub const TOPONYMS_PREFIX: &str = "Pleiades_toponyms";
pub const DATE_FMT: &str = "%Y-%m-%d";
pub const LOOKBACK_DAYS: u32 = 365;

// Gazetteer
pub const DEFAULT_GAZETTEER: &str = "pleiades-names.csv";
pub const ANCIENT_PERIODS: &str = "HRL"; // Hellenistic, Roman, Late Antique
pub const MIN_VARIANT_LEN: usize = 3;

// Record columns (upstream extraction stage)
pub const COL_ID: &str = "edcs-id";
pub const COL_TEXT: &str = "cleantext";
pub const COL_FINDSPOT: &str = "findspot";
pub const COL_TIME_FROM: &str = "time_from";
pub const COL_TIME_TO: &str = "time_to";
pub const COL_KEYWORDS: &str = "keywords";

// Pleiades names export
pub const COL_TITLE: &str = "title";
pub const COL_NAMES: &str = "nameTransliterated";
pub const COL_PID: &str = "pid";
pub const COL_LAT: &str = "reprLat";
pub const COL_LONG: &str = "reprLong";
pub const COL_PERIODS: &str = "timePeriods";

// Personal names export (PIR)
pub const COL_PIR_ANNOTATED: &str = "annotated";

// Appended columns
pub const COL_TEXT_LENGTH: &str = "text_length";
pub const COL_FUNERARY: &str = "funerary";
pub const COL_POSSIBLE_MIGRANT: &str = "possible_migrant";
pub const COL_PROBABLE_MIGRANT: &str = "probable_migrant";
pub const COL_NAME: &str = "name";
pub const COL_CONTAINS_NAME: &str = "contains_name";
pub const COL_GENDER: &str = "gender_main_pers";
pub const COL_ORIGIN_GEO_KEY: &str = "origin_geo_key";
pub const COL_ORIGIN_LAT: &str = "origin_lat";
pub const COL_ORIGIN_LONG: &str = "origin_long";
pub const COL_ORIGIN: &str = "origin_candidate";
pub const COL_MIGRANT: &str = "is_migrant";

// Progress
pub const PROGRESS_EVERY: usize = 1000;
pub const TOP_ORIGINS: usize = 10;
