// src/migrants/metadata.rs
//! Cheap per-inscription indicators, computed from the text alone.
//!
//! `possible_migrant` only looks for origin vocabulary (`domo`, `origo`,
//! any `-ensis` adjective) and is independent of the gazetteer; the
//! toponym match in [`super::MigrantIdentifier`] is the stronger signal.

use regex::Regex;

use crate::config::consts::{
    COL_FUNERARY, COL_POSSIBLE_MIGRANT, COL_PROBABLE_MIGRANT, COL_TEXT_LENGTH,
};
use crate::error::Result;
use crate::record::InscriptionRecord;

pub const COLUMNS: [&str; 4] = [COL_TEXT_LENGTH, COL_FUNERARY, COL_POSSIBLE_MIGRANT, COL_PROBABLE_MIGRANT];

const FUNERARY: &str = r"faciend[a-z]+ curav[a-z]+|dis manibus|sit[a-z]+ est|bene merenti|vixit|ex testamento|sit tibi terra levis|requiesc[a-z]t";
const ORIGIN: &str = r"[a-z]+ensis|domo|origo";
const FUNERARY_KEYWORD: &str = "sepulcrales";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Length of the text in chars.
    pub text_length: usize,
    pub funerary: bool,
    pub possible_migrant: bool,
    pub probable_migrant: bool,
}

impl Metadata {
    /// Cells in [`COLUMNS`] order; flags as `1`/`0`.
    pub fn cells(&self) -> [String; 4] {
        [
            self.text_length.to_string(),
            flag(self.funerary),
            flag(self.possible_migrant),
            flag(self.probable_migrant),
        ]
    }
}

pub fn flag(b: bool) -> String {
    if b { "1".into() } else { "0".into() }
}

pub struct MetadataRules {
    funerary: Regex,
    origin: Regex,
}

impl MetadataRules {
    pub fn new() -> Result<Self> {
        Ok(Self { funerary: Regex::new(FUNERARY)?, origin: Regex::new(ORIGIN)? })
    }

    pub fn classify(&self, rec: &InscriptionRecord) -> Metadata {
        let text = rec.text.to_lowercase();
        let funerary = self.funerary.is_match(&text)
            || rec.keywords.as_deref().is_some_and(|k| k.contains(FUNERARY_KEYWORD));
        let possible_migrant = self.origin.is_match(&text);
        Metadata {
            text_length: rec.text.chars().count(),
            funerary,
            possible_migrant,
            probable_migrant: funerary && possible_migrant,
        }
    }
}
