// tests/migrant_scenarios.rs
//
// Record-level behaviour of the migrant identifier against a small gazetteer.
//
use edcs_migrants::gazetteer::{AmbiguityPolicy, Gazetteer, GazetteerBuilder, ToponymEntry};
use edcs_migrants::migrants::{FindspotPolicy, MigrantIdentifier};
use edcs_migrants::record::InscriptionRecord;

fn gazetteer() -> Gazetteer {
    let mut b = GazetteerBuilder::new(AmbiguityPolicy::Error, 3);
    b.push(ToponymEntry::new("Rome", "/places/423025").with_variants(["Roma", "Romae"])).unwrap();
    b.push(ToponymEntry::new("Carthage", "/places/314921").with_variants(["Carthago"])).unwrap();
    b.push(ToponymEntry::new("Aquileia", "/places/187290").with_variants(["Aquileiensis"])).unwrap();
    b.build()
}

fn annotate(text: &str, findspot: &str) -> InscriptionRecord {
    let g = gazetteer();
    let mut rec = InscriptionRecord::new("EDCS-00000001", text, Some(findspot));
    MigrantIdentifier::new(&g, FindspotPolicy::default()).annotate(&mut rec);
    rec
}

#[test]
fn born_in_rome_found_in_carthage() {
    let rec = annotate("hic situs est natus Romae", "Carthago");
    assert_eq!(rec.origin_candidate.as_deref(), Some("Rome"));
    assert!(rec.is_migrant);
}

#[test]
fn no_toponym_no_flag() {
    let rec = annotate("hic situs est", "Carthago");
    assert!(!rec.is_migrant);
    assert_eq!(rec.origin_candidate, None);
}

#[test]
fn matching_ignores_case() {
    let mut b = GazetteerBuilder::new(AmbiguityPolicy::Error, 3);
    b.push(ToponymEntry::new("Rome", "/r").with_variants(["ROMA"])).unwrap();
    let g = b.build();

    let mut rec = InscriptionRecord::new("E", "miles natus roma vixit", Some("Carthago"));
    MigrantIdentifier::new(&g, FindspotPolicy::Suppress).annotate(&mut rec);
    assert_eq!(rec.origin_candidate.as_deref(), Some("Rome"));
    assert!(rec.is_migrant);
}

#[test]
fn ethnic_adjective_counts_as_origin() {
    let rec = annotate("D M Iulio domo Aquileiensi", "Roma");
    // "Aquileiensi" is a different word from "Aquileiensis"
    assert!(!rec.is_migrant);

    let rec = annotate("D M Iulio Aquileiensis", "Roma");
    assert_eq!(rec.origin_candidate.as_deref(), Some("Aquileia"));
    assert!(rec.is_migrant);
}

#[test]
fn empty_text_and_missing_findspot() {
    let g = gazetteer();
    let id = MigrantIdentifier::new(&g, FindspotPolicy::Suppress);

    let mut rec = InscriptionRecord::new("E", "", None);
    id.annotate(&mut rec);
    assert!(!rec.is_migrant);

    let mut rec = InscriptionRecord::new("E", "natus Romae", None);
    id.annotate(&mut rec);
    assert!(rec.is_migrant);
}
