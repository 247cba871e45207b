// src/gazetteer/mod.rs
//! # Toponym gazetteer
//!
//! A flat set of places ([`ToponymEntry`]) indexed by every name they are
//! attested under. The gazetteer is built once per run by [`loader`] and is
//! read-only afterwards; the migrant identifier borrows it.
//!
//! ## Keys
//! Names are indexed by their *match key*: case-folded, split into words
//! (see [`crate::core::Words`]) and re-joined with single spaces. Inscription
//! text is tokenised the same way, so `Colonia-Agrippina`, `colonia agrippina`
//! and `COLONIA  AGRIPPINA` all meet on `colonia agrippina`.
//!
//! ## Invariant
//! Every key maps to exactly one entry. When two places claim the same
//! attested name the [`AmbiguityPolicy`] decides: abort the run, or drop the
//! name from the index. Derived `-ensis` forms never abort: colliding ones are
//! simply not indexed.

pub mod ethnics;
pub mod export;
pub mod loader;

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::Words;
use crate::core::sanitize::{fold, split_names};
use crate::error::{Error, Result};

pub use loader::{LoadReport, load};

/// Index of an entry inside its [`Gazetteer`].
pub type EntryId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct ToponymEntry {
    pub canonical: String,
    pub variants: BTreeSet<String>,
    /// Opaque geographic key (Pleiades: the place path, e.g. `/places/423025`).
    pub geo_key: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

impl ToponymEntry {
    /// Entry with the canonical name as its only variant.
    pub fn new(canonical: impl Into<String>, geo_key: impl Into<String>) -> Self {
        let canonical = canonical.into();
        let mut variants = BTreeSet::new();
        variants.insert(canonical.clone());
        Self { canonical, variants, geo_key: geo_key.into(), lat: None, long: None }
    }

    pub fn with_variants<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants.extend(names.into_iter().map(Into::into));
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// A name claimed by two places is a configuration error.
    #[default]
    Error,
    /// Unindex the name, warn, and carry on.
    Drop,
}

/// Match key of a name or text span. Empty when it has no words.
pub fn match_key(s: &str) -> String {
    let folded = fold(s);
    let mut key = String::with_capacity(folded.len());
    for (_, _, w) in Words::new(&folded) {
        if !key.is_empty() { key.push(' '); }
        key.push_str(w);
    }
    key
}

#[derive(Clone, Debug, Default)]
pub struct Gazetteer {
    entries: Vec<ToponymEntry>,
    index: HashMap<String, EntryId>,
    /// Word count of the longest indexed key.
    max_words: usize,
}

impl Gazetteer {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Number of indexed names.
    pub fn key_count(&self) -> usize { self.index.len() }
    pub fn max_words(&self) -> usize { self.max_words }

    pub fn entries(&self) -> &[ToponymEntry] { &self.entries }
    pub fn entry(&self, id: EntryId) -> &ToponymEntry { &self.entries[id] }

    /// Look up an already computed match key.
    pub fn by_key(&self, key: &str) -> Option<EntryId> {
        self.index.get(key).copied()
    }

    /// Look up any spelling of a name.
    pub fn lookup(&self, name: &str) -> Option<&ToponymEntry> {
        self.by_key(&match_key(name)).map(|id| &self.entries[id])
    }

    /// Resolve a findspot cell to an entry: the whole cell first, then each
    /// of its `,` `/` `;` separated parts.
    pub fn resolve_place(&self, place: &str) -> Option<EntryId> {
        if let Some(id) = self.by_key(&match_key(place)) {
            return Some(id);
        }
        split_names(place).iter().find_map(|n| self.by_key(&match_key(n)))
    }
}

/// Builds a [`Gazetteer`] while enforcing the one-key-one-entry invariant.
pub struct GazetteerBuilder {
    policy: AmbiguityPolicy,
    min_len: usize,
    entries: Vec<ToponymEntry>,
    index: HashMap<String, EntryId>,
    /// Keys unindexed because of a collision; never re-admitted.
    dropped: HashSet<String>,
    /// Keys that only exist as derived forms.
    derived: HashSet<String>,
}

impl GazetteerBuilder {
    pub fn new(policy: AmbiguityPolicy, min_len: usize) -> Self {
        Self {
            policy,
            min_len,
            entries: Vec::new(),
            index: HashMap::new(),
            dropped: HashSet::new(),
            derived: HashSet::new(),
        }
    }

    /// Add a place and index its variants.
    pub fn push(&mut self, entry: ToponymEntry) -> Result<EntryId> {
        let id = self.entries.len();
        let keys: Vec<(String, String)> = entry
            .variants
            .iter()
            .map(|v| (match_key(v), v.clone()))
            .collect();
        self.entries.push(entry);

        for (key, variant) in keys {
            if !self.long_enough(&key) || self.dropped.contains(&key) {
                continue;
            }
            match self.index.get(&key).copied() {
                None => { self.index.insert(key, id); }
                Some(other) if other == id => {}
                Some(other) if self.derived.remove(&key) => {
                    debug!("'{variant}' replaces a derived form of '{}'", self.entries[other].canonical);
                    self.index.insert(key, id);
                }
                Some(other) => match self.policy {
                    AmbiguityPolicy::Error => {
                        return Err(Error::AmbiguousVariant {
                            variant,
                            first: self.entries[other].canonical.clone(),
                            second: self.entries[id].canonical.clone(),
                        });
                    }
                    AmbiguityPolicy::Drop => {
                        warn!(
                            "Name '{variant}' claimed by '{}' and '{}'; not indexed",
                            self.entries[other].canonical, self.entries[id].canonical
                        );
                        self.index.remove(&key);
                        self.dropped.insert(key);
                    }
                },
            }
        }
        Ok(id)
    }

    /// Index a heuristic form for `id`. Returns whether it was indexed.
    /// Any collision unindexes the key without error.
    pub fn push_derived(&mut self, id: EntryId, form: String) -> bool {
        let key = match_key(&form);
        if !self.long_enough(&key) || self.dropped.contains(&key) {
            return false;
        }
        match self.index.get(&key).copied() {
            None => {
                self.index.insert(key.clone(), id);
                self.derived.insert(key);
                self.entries[id].variants.insert(form);
                true
            }
            Some(other) if other == id => false,
            Some(other) => {
                if self.derived.remove(&key) {
                    debug!(
                        "Derived '{form}' collides between '{}' and '{}'; dropped",
                        self.entries[other].canonical, self.entries[id].canonical
                    );
                    self.index.remove(&key);
                    self.dropped.insert(key);
                }
                false
            }
        }
    }

    /// A key needs one word of at least `min_len` chars: `d m` and `d m s`
    /// are abbreviations, `colonia ulpia` is not.
    fn long_enough(&self, key: &str) -> bool {
        key.split(' ').any(|w| w.chars().count() >= self.min_len)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entry(&self, id: EntryId) -> &ToponymEntry { &self.entries[id] }

    pub fn build(self) -> Gazetteer {
        let max_words = self
            .index
            .keys()
            .map(|k| k.split(' ').count())
            .max()
            .unwrap_or(0);
        Gazetteer { entries: self.entries, index: self.index, max_words }
    }
}
