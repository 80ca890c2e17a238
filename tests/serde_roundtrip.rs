//! Serialization scenarios: references render as identifier strings and
//! come back as lazily-resolvable identifiers.

mod common;

use common::{db_sequence, evidence, init_tracing, peptide};
use mzident::{CvSource, EntityRef, IdentDocument, IdentDocumentBuilder};

fn built_document() -> IdentDocument {
    let mut builder = IdentDocumentBuilder::new();
    let software = builder.add_analysis_software("Comet", "2024.01");
    builder.add_protocol(&software);
    let spectra = builder.add_spectra_data("/data/run01.mzML");
    builder.add_search_database("/data/uniprot.fasta");

    let db = db_sequence("P02768");
    let pep = peptide("AEFAEVSK");
    let item = builder.add_scored_item(&spectra, "scan=100", 12.5);
    {
        let mut item = item.borrow_mut();
        item.peptide.set_entity(pep.clone());
        item.add_peptide_evidence(EntityRef::resolved(evidence(&db, &pep, 35, 42)));
    }
    builder.into_document()
}

// === Scenario: resolved references serialize as identifier strings ===
#[test]
fn references_serialize_as_identifiers() {
    init_tracing();
    let document = built_document();
    let json = serde_json::to_value(&document).expect("serialize");

    let evidence = &json["sequence_collection"]["peptide_evidences"][0];
    assert_eq!(evidence["db_sequence"], "DBSeq1");
    assert_eq!(evidence["peptide"], "Pep_1");

    let run = &json["analysis_collection"]["spectrum_identifications"][0];
    assert_eq!(run["list"], "SIL_1");
    assert_eq!(run["input_spectra"][0], "SpecData_1");
}

// === Scenario: a deserialized document resolves lazily after rebuild ===
#[test]
fn deserialized_references_resolve_against_rebuilt_document() {
    let document = built_document();
    let json = serde_json::to_string(&document).expect("serialize");

    let mut restored: IdentDocument = serde_json::from_str(&json).expect("deserialize");
    // The derived translator is not serialized; hydrate it from the CV-list
    restored.rebuild_translator();
    assert_eq!(restored.translator().translate_file_ref("MS"), CvSource::PsiMs);

    let evidence = restored.sequence_collection.peptide_evidences[0].clone();
    {
        let ev = evidence.borrow();
        // Back in the unresolved state, identifier intact
        assert!(!ev.db_sequence.is_resolved());
        assert_eq!(ev.db_sequence.id(), Some("DBSeq1".to_string()));
    }

    let resolved = evidence
        .borrow_mut()
        .db_sequence
        .resolve(&restored)
        .expect("resolves against the restored collections");
    assert_eq!(resolved.borrow().accession, "P02768");
}
