// src/migrants/mod.rs
//! # Migrant identification
//!
//! Scans inscription text for gazetteer names and decides whether the
//! record names an origin other than its findspot.
//!
//! ## Matching
//! Text is case-folded and split into words exactly like gazetteer keys
//! (see [`crate::gazetteer::match_key`]), so a name only ever matches whole
//! words: `Roma` does not fire inside `Romanus`. Matches are collected
//! **leftmost-longest**: scanning left to right, the longest name starting at
//! the current word wins and the scan resumes after it, so
//! `Colonia Agrippina` beats a bare `Colonia` and matches never overlap.
//!
//! ## Choosing the origin
//! Under [`FindspotPolicy::Suppress`] matches that resolve to the findspot
//! are passed over and the first remaining one is the origin. If only the
//! findspot was named, it is still reported as `origin_candidate` but the
//! record is not flagged. Under [`FindspotPolicy::Ignore`] the first match
//! is the origin and always flags.
//!
//! Annotation overwrites whatever the record carried before, so applying it
//! twice gives the same result.

pub mod metadata;
pub mod names;

use serde::Deserialize;

use crate::core::Words;
use crate::core::sanitize::fold;
use crate::gazetteer::{match_key, EntryId, Gazetteer};
use crate::record::InscriptionRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FindspotPolicy {
    /// A name resolving to the findspot does not make a migrant.
    #[default]
    Suppress,
    /// Any matched name makes a migrant.
    Ignore,
}

/// One gazetteer name found in a text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub entry: EntryId,
    /// Word index of the first matched word.
    pub word: usize,
    /// Number of words matched.
    pub len: usize,
}

pub struct MigrantIdentifier<'g> {
    gazetteer: &'g Gazetteer,
    policy: FindspotPolicy,
}

impl<'g> MigrantIdentifier<'g> {
    pub fn new(gazetteer: &'g Gazetteer, policy: FindspotPolicy) -> Self {
        Self { gazetteer, policy }
    }

    pub fn gazetteer(&self) -> &'g Gazetteer { self.gazetteer }

    /// All non-overlapping leftmost-longest matches in `text`.
    pub fn matches(&self, text: &str) -> Vec<Match> {
        let max = self.gazetteer.max_words();
        if max == 0 {
            return Vec::new();
        }

        let folded = fold(text);
        let words: Vec<&str> = Words::new(&folded).map(|(_, _, w)| w).collect();

        let mut out = Vec::new();
        let mut key = String::new();
        let mut i = 0;
        'scan: while i < words.len() {
            for n in (1..=max.min(words.len() - i)).rev() {
                key.clear();
                for (k, w) in words[i..i + n].iter().enumerate() {
                    if k > 0 { key.push(' '); }
                    key.push_str(w);
                }
                if let Some(entry) = self.gazetteer.by_key(&key) {
                    out.push(Match { entry, word: i, len: n });
                    i += n;
                    continue 'scan;
                }
            }
            i += 1;
        }
        out
    }

    /// Set `origin_candidate`, `origin` and `is_migrant` on `rec`.
    pub fn annotate(&self, rec: &mut InscriptionRecord) {
        rec.origin_candidate = None;
        rec.origin = None;
        rec.is_migrant = false;

        let found = self.matches(&rec.text);
        let Some(first) = found.first() else {
            return;
        };

        let chosen = match self.policy {
            FindspotPolicy::Ignore => Some(first),
            FindspotPolicy::Suppress => {
                let home = rec.findspot.as_deref().map(|f| self.home_of(f));
                found.iter().find(|m| !home.as_ref().is_some_and(|h| h.is(m.entry, self.gazetteer)))
            }
        };

        let (entry, migrant) = match chosen {
            Some(m) => (m.entry, true),
            None => (first.entry, false),
        };
        rec.origin = Some(entry);
        rec.origin_candidate = Some(self.gazetteer.entry(entry).canonical.clone());
        rec.is_migrant = migrant;
    }

    fn home_of(&self, findspot: &str) -> Home {
        match self.gazetteer.resolve_place(findspot) {
            Some(id) => Home::Entry(id),
            None => Home::Name(match_key(findspot)),
        }
    }
}

/// A findspot, resolved to a gazetteer entry when possible.
enum Home {
    Entry(EntryId),
    /// Unknown to the gazetteer; compared against canonical names.
    Name(String),
}

impl Home {
    fn is(&self, id: EntryId, g: &Gazetteer) -> bool {
        match self {
            Home::Entry(home) => *home == id,
            Home::Name(key) => !key.is_empty() && *key == match_key(&g.entry(id).canonical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::{AmbiguityPolicy, GazetteerBuilder, ToponymEntry};

    fn gazetteer() -> Gazetteer {
        let mut b = GazetteerBuilder::new(AmbiguityPolicy::Error, 3);
        b.push(ToponymEntry::new("Rome", "/rome").with_variants(["Roma", "Romae"])).unwrap();
        b.push(ToponymEntry::new("Carthage", "/carthage").with_variants(["Carthago", "Carthagine"])).unwrap();
        b.push(ToponymEntry::new("Colonia", "/colonia")).unwrap();
        b.push(ToponymEntry::new("Colonia Agrippina", "/cologne")).unwrap();
        b.build()
    }

    fn annotate(g: &Gazetteer, policy: FindspotPolicy, text: &str, findspot: Option<&str>) -> InscriptionRecord {
        let mut rec = InscriptionRecord::new("E", text, findspot);
        MigrantIdentifier::new(g, policy).annotate(&mut rec);
        rec
    }

    #[test]
    fn longest_name_wins_at_a_position() {
        let g = gazetteer();
        let id = MigrantIdentifier::new(&g, FindspotPolicy::Suppress);
        let m = id.matches("miles natus Colonia Agrippina");
        assert_eq!(m.len(), 1);
        assert_eq!(g.entry(m[0].entry).canonical, "Colonia Agrippina");
        assert_eq!((m[0].word, m[0].len), (2, 2));
    }

    #[test]
    fn leftmost_name_wins_between_places() {
        let g = gazetteer();
        let rec = annotate(&g, FindspotPolicy::Ignore, "natus Carthagine mortuus Romae", None);
        assert_eq!(rec.origin_candidate.as_deref(), Some("Carthage"));
        assert!(rec.is_migrant);
    }

    #[test]
    fn names_match_whole_words_only() {
        let g = gazetteer();
        assert!(MigrantIdentifier::new(&g, FindspotPolicy::Ignore).matches("Romanus Romulus").is_empty());
    }

    #[test]
    fn findspot_is_passed_over() {
        let g = gazetteer();
        let rec = annotate(&g, FindspotPolicy::Suppress, "Carthagine natus Romae", Some("Carthago"));
        assert_eq!(rec.origin_candidate.as_deref(), Some("Rome"));
        assert!(rec.is_migrant);
    }

    #[test]
    fn only_findspot_named_is_not_a_migrant() {
        let g = gazetteer();
        let rec = annotate(&g, FindspotPolicy::Suppress, "civis Romae", Some("Roma"));
        assert_eq!(rec.origin_candidate.as_deref(), Some("Rome"));
        assert!(!rec.is_migrant);

        let rec = annotate(&g, FindspotPolicy::Ignore, "civis Romae", Some("Roma"));
        assert!(rec.is_migrant);
    }

    #[test]
    fn unknown_findspot_compares_by_name() {
        let g = gazetteer();
        // "Rome" is the canonical name but not an indexed variant spelling
        let mut b = GazetteerBuilder::new(AmbiguityPolicy::Error, 3);
        b.push(ToponymEntry { variants: ["Roma".to_string()].into(), ..ToponymEntry::new("Urbs Roma", "/r") })
            .unwrap();
        let g2 = b.build();
        let rec = annotate(&g2, FindspotPolicy::Suppress, "natus Roma", Some("urbs  roma"));
        assert!(!rec.is_migrant);

        let rec = annotate(&g, FindspotPolicy::Suppress, "natus Roma", Some("Ostia"));
        assert!(rec.is_migrant);
    }

    #[test]
    fn annotation_is_stable() {
        let g = gazetteer();
        let id = MigrantIdentifier::new(&g, FindspotPolicy::Suppress);
        let mut rec = InscriptionRecord::new("E", "natus Romae", Some("Carthago"));
        id.annotate(&mut rec);
        let once = rec.clone();
        id.annotate(&mut rec);
        assert_eq!(rec, once);

        rec.text = "hic situs est".into();
        id.annotate(&mut rec);
        assert_eq!(rec.origin_candidate, None);
        assert!(!rec.is_migrant);
    }

    #[test]
    fn empty_gazetteer_matches_nothing() {
        let g = Gazetteer::default();
        let rec = annotate(&g, FindspotPolicy::Suppress, "natus Romae", None);
        assert!(!rec.is_migrant);
    }
}
