//! The Document Context: root entity owning every top-level collection
//!
//! The document is the resolution context for the whole graph. Entities hold
//! no back-link to it; every operation that needs resolution receives the
//! document explicitly, through the per-entity [`DocLookup`] implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::AnalysisCollection;
use super::audit::{Organization, Person, Sample};
use super::data::{
    DataCollection, SearchDatabase, SourceFile, SpectraData, SpectrumIdentificationItem,
    SpectrumIdentificationList, SpectrumIdentificationResult,
};
use super::protocol::SpectrumIdentificationProtocol;
use super::refs::{DocLookup, Handle, Identified};
use super::sequence::{DbSequence, Peptide, PeptideEvidence};
use super::software::{AnalysisSoftware, BibliographicReference, Provider};
use crate::cv::{Cv, CvTranslator, BUNDLED_SOURCES};

/// Database sequences, peptides, and evidence linking the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceCollection {
    pub db_sequences: Vec<Handle<DbSequence>>,
    pub peptides: Vec<Handle<Peptide>>,
    pub peptide_evidences: Vec<Handle<PeptideEvidence>>,
}

/// Contacts and organizations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditCollection {
    pub persons: Vec<Handle<Person>>,
    pub organizations: Vec<Handle<Organization>>,
}

/// Protocol settings per identification run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisProtocolCollection {
    pub spectrum_identification_protocols: Vec<Handle<SpectrumIdentificationProtocol>>,
}

/// The root of the document model.
///
/// Created empty in fresh-document mode ([`IdentDocument::new`], with the
/// bundled CV-list) or hydrated from a parsed representation
/// ([`IdentDocument::with_cv_list`], with whatever CV-list the input
/// declares). A single long-lived aggregate: it is either being built or it
/// is complete, never partially torn down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentDocument {
    pub id: String,
    pub name: Option<String>,
    /// Exchange format version the document targets
    pub version: String,
    pub creation_date: DateTime<Utc>,
    pub cv_list: Vec<Cv>,
    /// Derived from `cv_list`; rebuilt, not serialized
    #[serde(skip)]
    translator: CvTranslator,
    pub analysis_software: Vec<Handle<AnalysisSoftware>>,
    pub provider: Option<Provider>,
    pub audit_collection: AuditCollection,
    pub samples: Vec<Handle<Sample>>,
    pub sequence_collection: SequenceCollection,
    pub analysis_collection: AnalysisCollection,
    pub analysis_protocol_collection: AnalysisProtocolCollection,
    pub data_collection: DataCollection,
    pub bibliographic_references: Vec<BibliographicReference>,
}

impl IdentDocument {
    /// Fresh-document mode: empty collections, bundled CV-list, fresh id.
    pub fn new() -> Self {
        let mut document = Self::empty(format!("MzIdentDoc_{}", Uuid::new_v4()));
        document.default_cv();
        document
    }

    /// Hydrate mode: translator built from the CV-list the input declares.
    pub fn with_cv_list(cv_list: Vec<Cv>) -> Self {
        let mut document = Self::empty(format!("MzIdentDoc_{}", Uuid::new_v4()));
        document.cv_list = cv_list;
        document.rebuild_translator();
        document
    }

    fn empty(id: String) -> Self {
        Self {
            id,
            name: None,
            version: "1.1.0".to_string(),
            creation_date: Utc::now(),
            cv_list: Vec::new(),
            translator: CvTranslator::default(),
            analysis_software: Vec::new(),
            provider: None,
            audit_collection: AuditCollection::default(),
            samples: Vec::new(),
            sequence_collection: SequenceCollection::default(),
            analysis_collection: AnalysisCollection::default(),
            analysis_protocol_collection: AnalysisProtocolCollection::default(),
            data_collection: DataCollection::default(),
            bibliographic_references: Vec::new(),
        }
    }

    /// Populate the CV-list from the bundled canonical CV-source table and
    /// rebuild the translator. The PATO entry is excluded by
    /// case-insensitive tag match: no identification-file param ever cites
    /// it.
    pub fn default_cv(&mut self) {
        self.cv_list = BUNDLED_SOURCES
            .iter()
            .filter(|source| !source.tag().eq_ignore_ascii_case("PATO"))
            .map(|source| Cv::from_source(*source))
            .collect();
        self.rebuild_translator();
    }

    /// Recompute the translator after the CV-list changed (including after
    /// deserialization, which does not carry the derived translator).
    pub fn rebuild_translator(&mut self) {
        self.translator = CvTranslator::from_cv_list(&self.cv_list);
    }

    /// The document's CV translator.
    pub fn translator(&self) -> &CvTranslator {
        &self.translator
    }

    // --- Lookups ---
    //
    // All lookups return `None` for a blank/whitespace identifier or a
    // missing entity; a partially-populated graph is an ordinary condition
    // during incremental hydration, not an error.

    pub fn find_analysis_software(&self, id: &str) -> Option<Handle<AnalysisSoftware>> {
        find_in(&self.analysis_software, id)
    }

    pub fn find_person(&self, id: &str) -> Option<Handle<Person>> {
        find_in(&self.audit_collection.persons, id)
    }

    pub fn find_organization(&self, id: &str) -> Option<Handle<Organization>> {
        find_in(&self.audit_collection.organizations, id)
    }

    pub fn find_sample(&self, id: &str) -> Option<Handle<Sample>> {
        find_in(&self.samples, id)
    }

    pub fn find_source_file(&self, id: &str) -> Option<Handle<SourceFile>> {
        find_in(&self.data_collection.inputs.source_files, id)
    }

    pub fn find_search_database(&self, id: &str) -> Option<Handle<SearchDatabase>> {
        find_in(&self.data_collection.inputs.search_databases, id)
    }

    pub fn find_spectra_data(&self, id: &str) -> Option<Handle<SpectraData>> {
        find_in(&self.data_collection.inputs.spectra_data, id)
    }

    pub fn find_db_sequence(&self, id: &str) -> Option<Handle<DbSequence>> {
        find_in(&self.sequence_collection.db_sequences, id)
    }

    pub fn find_peptide(&self, id: &str) -> Option<Handle<Peptide>> {
        find_in(&self.sequence_collection.peptides, id)
    }

    pub fn find_peptide_evidence(&self, id: &str) -> Option<Handle<PeptideEvidence>> {
        find_in(&self.sequence_collection.peptide_evidences, id)
    }

    pub fn find_protocol(&self, id: &str) -> Option<Handle<SpectrumIdentificationProtocol>> {
        find_in(
            &self.analysis_protocol_collection.spectrum_identification_protocols,
            id,
        )
    }

    pub fn find_identification_list(&self, id: &str) -> Option<Handle<SpectrumIdentificationList>> {
        find_in(
            &self.data_collection.analysis_data.spectrum_identification_lists,
            id,
        )
    }

    /// Result records are nested inside per-run lists.
    pub fn find_identification_result(
        &self,
        id: &str,
    ) -> Option<Handle<SpectrumIdentificationResult>> {
        if id.trim().is_empty() {
            return None;
        }
        for list in &self.data_collection.analysis_data.spectrum_identification_lists {
            let list = list.borrow();
            for result in &list.results {
                if result.borrow().id == id {
                    return Some(result.clone());
                }
            }
        }
        None
    }

    /// Scored items require a two-level scan: they are nested inside result
    /// records, which are nested inside per-run lists.
    pub fn find_identification_item(
        &self,
        id: &str,
    ) -> Option<Handle<SpectrumIdentificationItem>> {
        if id.trim().is_empty() {
            return None;
        }
        for list in &self.data_collection.analysis_data.spectrum_identification_lists {
            let list = list.borrow();
            for result in &list.results {
                let result = result.borrow();
                for item in &result.items {
                    if item.borrow().id == id {
                        return Some(item.clone());
                    }
                }
            }
        }
        None
    }
}

impl Default for IdentDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn find_in<E: Identified>(collection: &[Handle<E>], id: &str) -> Option<Handle<E>> {
    if id.trim().is_empty() {
        return None;
    }
    collection.iter().find(|e| e.borrow().id() == id).cloned()
}

impl DocLookup<AnalysisSoftware> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<AnalysisSoftware>> {
        self.find_analysis_software(id)
    }
}

impl DocLookup<Person> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<Person>> {
        self.find_person(id)
    }
}

impl DocLookup<Organization> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<Organization>> {
        self.find_organization(id)
    }
}

impl DocLookup<Sample> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<Sample>> {
        self.find_sample(id)
    }
}

impl DocLookup<SourceFile> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<SourceFile>> {
        self.find_source_file(id)
    }
}

impl DocLookup<SearchDatabase> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<SearchDatabase>> {
        self.find_search_database(id)
    }
}

impl DocLookup<SpectraData> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<SpectraData>> {
        self.find_spectra_data(id)
    }
}

impl DocLookup<DbSequence> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<DbSequence>> {
        self.find_db_sequence(id)
    }
}

impl DocLookup<Peptide> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<Peptide>> {
        self.find_peptide(id)
    }
}

impl DocLookup<PeptideEvidence> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<PeptideEvidence>> {
        self.find_peptide_evidence(id)
    }
}

impl DocLookup<SpectrumIdentificationProtocol> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<SpectrumIdentificationProtocol>> {
        self.find_protocol(id)
    }
}

impl DocLookup<SpectrumIdentificationList> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<SpectrumIdentificationList>> {
        self.find_identification_list(id)
    }
}

impl DocLookup<SpectrumIdentificationResult> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<SpectrumIdentificationResult>> {
        self.find_identification_result(id)
    }
}

impl DocLookup<SpectrumIdentificationItem> for IdentDocument {
    fn find(&self, id: &str) -> Option<Handle<SpectrumIdentificationItem>> {
        self.find_identification_item(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::CvSource;
    use crate::model::refs::handle;

    #[test]
    fn fresh_document_bundles_default_cv_without_pato() {
        let document = IdentDocument::new();
        assert!(!document.cv_list.is_empty());
        assert!(document
            .cv_list
            .iter()
            .all(|cv| !cv.id.eq_ignore_ascii_case("PATO")));
        // Translator is live for the bundled entries
        assert_eq!(document.translator().translate_file_ref("MS"), CvSource::PsiMs);
    }

    #[test]
    fn hydrate_mode_reflects_declared_cv_list_only() {
        let document = IdentDocument::with_cv_list(vec![Cv::from_source(CvSource::PsiMs)]);
        assert_eq!(document.translator().len(), 1);
        assert_eq!(
            document.translator().translate_file_ref("UO"),
            CvSource::Unknown
        );
    }

    #[test]
    fn blank_identifier_finds_nothing() {
        let mut document = IdentDocument::new();
        document
            .sequence_collection
            .peptides
            .push(handle(Peptide::new("Pep_1", "PEPTIDER")));

        assert!(document.find_peptide("").is_none());
        assert!(document.find_peptide("   ").is_none());
        assert!(document.find_peptide("Pep_2").is_none());
        assert!(document.find_peptide("Pep_1").is_some());
    }

    #[test]
    fn item_lookup_scans_lists_then_results() {
        let mut document = IdentDocument::new();

        let item = handle(SpectrumIdentificationItem::new("SIR_10_1"));
        let mut result = SpectrumIdentificationResult::new("SIR_10", "scan=10");
        result.items.push(item);
        let mut list = SpectrumIdentificationList::new("SIL_1");
        list.results.push(handle(result));
        document
            .data_collection
            .analysis_data
            .spectrum_identification_lists
            .push(handle(list));

        assert!(document.find_identification_item("SIR_10_1").is_some());
        assert!(document.find_identification_item("SIR_10_2").is_none());
        assert!(document.find_identification_result("SIR_10").is_some());
    }

    #[test]
    fn lookup_on_empty_collections_is_not_an_error() {
        let document = IdentDocument::new();
        assert!(document.find_search_database("SearchDB_1").is_none());
        assert!(document.find_identification_item("SIR_1_1").is_none());
    }
}
