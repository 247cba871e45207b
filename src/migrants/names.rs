// src/migrants/names.rs
//! Personal names and the probable gender of the main person.
//!
//! Names are recognised against a set built from the Prosopographia Imperii
//! Romani export (its `annotated` column) plus common praenomina and nomina.
//! Capitalised words are brought back to a nominative guess before lookup:
//! `Iuliae` -> `Iulia`, `Iulio` / `Iuli` -> `Iulius`.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::config::consts::{COL_CONTAINS_NAME, COL_GENDER, COL_NAME};
use crate::core::sanitize::strip_tags;
use crate::error::Result;
use crate::migrants::metadata::flag;
use crate::table::{Delim, Table, read_table};

pub const COLUMNS: [&str; 3] = [COL_NAME, COL_CONTAINS_NAME, COL_GENDER];

const COMMON: &[&str] = &[
    "Aulus", "Appius", "Gaius", "Gnaeus", "Decimus", "Lucius", "Marcus", "Manius", "Publius",
    "Quintus", "Sergius", "Sextus", "Spurius", "Titus", "Tiberius", "Aelia", "Aelius", "Aurelia",
    "Aurelius", "Claudia", "Claudius", "Flavia", "Flavius", "Iulia", "Iulius", "Valeria",
    "Valerius", "Caius", "Cnaeus",
];
const NOT_NAMES: &[&str] = &["Dis", "Manibus"];
const PIR_NOISE: &[&str] = &["...", "..", "(", ")", "[", "]", "-", "?"];

const MALE_NAMES: &[&str] = &["Agrippa", "Aquila", "Caracalla", "Nerva", "Scaevola", "Seneca"];
const MALE_SUFFIXES: &[&str] = &["us", "os", "er"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    /// Both present, neither at least twice as frequent.
    Unclear,
}

impl Gender {
    /// Cell code: `0` male, `1` female, `2` unclear.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "0",
            Gender::Female => "1",
            Gender::Unclear => "2",
        }
    }
}

/// Names found in one inscription.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonNames {
    /// In order of appearance, repeats kept.
    pub names: Vec<String>,
    pub gender: Option<Gender>,
}

impl PersonNames {
    pub fn contains_name(&self) -> bool {
        !self.names.is_empty()
    }

    /// Cells in [`COLUMNS`] order; no gender is an empty cell.
    pub fn cells(&self) -> [String; 3] {
        [
            self.names.join(", "),
            flag(self.contains_name()),
            self.gender.map(|g| g.code().to_string()).unwrap_or_default(),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct NameSet {
    names: HashSet<String>,
}

impl NameSet {
    /// Built-in praenomina and common nomina only.
    pub fn common() -> Self {
        Self { names: COMMON.iter().map(|s| s.to_string()).collect() }
    }

    /// Read a PIR-style table and collect the names in `column`.
    pub fn load(path: &Path, column: &str) -> Result<Self> {
        let table = read_table(path, Delim::from_path(path))?;
        let set = Self::from_table(&table, column)?;
        info!("Loaded {} personal names from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn from_table(table: &Table, column: &str) -> Result<Self> {
        let ix = table.require("names", column)?;
        let mut set = Self::common();
        for row in &table.rows {
            if let Some(cell) = row.get(ix) {
                set.add_annotated(cell);
            }
        }
        Ok(set)
    }

    /// Add the names of one annotated PIR entry: capitalised words longer
    /// than three letters that are not abbreviations.
    pub fn add_annotated(&mut self, cell: &str) {
        let mut s = strip_tags(cell);
        for noise in PIR_NOISE {
            s = s.replace(noise, "");
        }
        for part in s.split_whitespace() {
            if part == "vel" || part.ends_with('.') || part.chars().count() <= 3 {
                continue;
            }
            if part.chars().next().is_some_and(char::is_uppercase) {
                self.names.insert(part.to_string());
            }
        }
    }

    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Known names in `text`, nominative guesses, in order of appearance.
    /// Words with non-ASCII letters (Greek) are passed over.
    pub fn find(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty() && w.is_ascii())
            .map(nominative)
            .filter(|w| self.names.contains(w))
            .collect()
    }

    pub fn classify(&self, text: &str) -> PersonNames {
        let names = self.find(text);
        let gender = gender(&names);
        PersonNames { names, gender }
    }
}

fn nominative(word: &str) -> String {
    let mut chars = word.chars();
    let capitalised = matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if a.is_uppercase() && b.is_lowercase()
    );
    if word.len() <= 2 || !capitalised || NOT_NAMES.contains(&word) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ae") {
        format!("{stem}a")
    } else if let Some(stem) = word.strip_suffix(['i', 'o']) {
        format!("{stem}us")
    } else {
        word.to_string()
    }
}

/// Majority gender of `names` by ending; one side must outnumber the other
/// two to one, else it is unclear. `None` when no name can be classified.
pub fn gender(names: &[String]) -> Option<Gender> {
    let (mut male, mut female) = (0usize, 0usize);
    for n in names.iter().map(String::as_str) {
        let is_male = MALE_NAMES.contains(&n)
            || MALE_SUFFIXES.iter().any(|s| n.ends_with(s))
            || (n.ends_with("is") && !n.ends_with("ensis"));
        if is_male {
            male += 1;
        } else if n.ends_with('a') || n.ends_with("oe") {
            female += 1;
        }
    }
    match (male, female) {
        (0, 0) => None,
        (_, 0) => Some(Gender::Male),
        (0, _) => Some(Gender::Female),
        (m, f) if m >= 2 * f => Some(Gender::Male),
        (m, f) if f >= 2 * m => Some(Gender::Female),
        _ => Some(Gender::Unclear),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::read_from;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pir_cells_yield_full_names_only() {
        let mut set = NameSet::default();
        set.add_annotated("<i>C.</i> Iulius Caesar vel Octavianus (?) [Aug]ustus");
        assert!(set.contains("Iulius"));
        assert!(set.contains("Caesar"));
        assert!(set.contains("Octavianus"));
        assert!(set.contains("Augustus"));
        assert!(!set.contains("C."));
        assert!(!set.contains("vel"));
    }

    #[test]
    fn inflected_forms_are_found() {
        let set = NameSet::common();
        assert_eq!(
            set.find("Dis Manibus Iuliae Marci filiae, Tito Flavio coniugi"),
            names(&["Iulia", "Marcus", "Titus", "Flavius"])
        );
        assert!(set.find("hic situs est").is_empty());
        assert!(set.find("Μάρκος").is_empty());
    }

    #[test]
    fn gender_by_majority() {
        assert_eq!(gender(&names(&["Titus", "Flavius"])), Some(Gender::Male));
        assert_eq!(gender(&names(&["Iulia", "Aelia", "Marcus"])), Some(Gender::Female));
        assert_eq!(gender(&names(&["Iulia", "Marcus"])), Some(Gender::Unclear));
        assert_eq!(gender(&names(&["Agrippa", "Nerva"])), Some(Gender::Male));
        assert_eq!(gender(&names(&["Aquileiensis"])), None);
        assert_eq!(gender(&[]), None);
    }

    #[test]
    fn cells_and_table_loading() {
        let t = read_from(
            "id,annotated\n1,L. Calpurnius Piso\n2,\n".as_bytes(),
            Delim::Csv,
            Path::new("mem"),
        )
        .unwrap();
        let set = NameSet::from_table(&t, "annotated").unwrap();
        assert!(set.contains("Calpurnius") && set.contains("Lucius"));

        let p = set.classify("Calpurnio Pisoni patri");
        assert_eq!(p.cells(), ["Calpurnius".to_string(), "1".into(), "0".into()]);
        assert_eq!(PersonNames::default().cells(), [String::new(), "0".into(), String::new()]);

        assert!(NameSet::from_table(&t, "name").is_err());
    }
}
