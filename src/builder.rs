//! Incremental document builder with a single finalization pass
//!
//! The builder accumulates entities through a narrow API, assigning each a
//! cheap sequential identifier and attaching it to the document immediately.
//! Scored items are grouped under one result record per native spectrum
//! identifier. Consuming the builder runs finalize exactly once: the run
//! records are materialized, sequence/peptide/evidence records are
//! deduplicated and canonically renumbered, and the final collections are
//! wired into a self-consistent graph. A second finalize is unrepresentable
//! by construction.

use indexmap::IndexMap;
use tracing::debug;

use crate::cv::CvTerm;
use crate::model::{
    handle, AnalysisSoftware, DbSequence, EntityRef, Handle, Identified, IdentDocument, Peptide,
    PeptideEvidence, SearchDatabase, SourceFile, SpectraData, SpectrumIdentification,
    SpectrumIdentificationItem, SpectrumIdentificationList, SpectrumIdentificationProtocol,
    SpectrumIdentificationResult,
};
use crate::param::CvParam;

/// Builds an [`IdentDocument`] incrementally; see the module docs.
#[derive(Debug)]
pub struct IdentDocumentBuilder {
    document: IdentDocument,
    software_count: usize,
    database_count: usize,
    spectra_data_count: usize,
    source_file_count: usize,
    protocol_count: usize,
    /// Working map: native spectrum id -> accumulated result record
    results: IndexMap<String, Handle<SpectrumIdentificationResult>>,
}

impl IdentDocumentBuilder {
    /// Start a fresh document (bundled CV-list, empty collections).
    pub fn new() -> Self {
        Self {
            document: IdentDocument::new(),
            software_count: 0,
            database_count: 0,
            spectra_data_count: 0,
            source_file_count: 0,
            protocol_count: 0,
            results: IndexMap::new(),
        }
    }

    /// Read access to the document under construction.
    pub fn document(&self) -> &IdentDocument {
        &self.document
    }

    /// Mutable access for populating collections the narrow API does not
    /// cover (provider, contacts, samples, references).
    pub fn document_mut(&mut self) -> &mut IdentDocument {
        &mut self.document
    }

    /// Register an analysis software package. Ids run `AS_1`, `AS_2`, ...
    pub fn add_analysis_software(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Handle<AnalysisSoftware> {
        self.software_count += 1;
        let software = handle(
            AnalysisSoftware::new(format!("AS_{}", self.software_count))
                .with_name(name)
                .with_version(version),
        );
        self.document.analysis_software.push(software.clone());
        software
    }

    /// Register a search database input. Ids run `SearchDB_1`, ...
    pub fn add_search_database(&mut self, location: impl Into<String>) -> Handle<SearchDatabase> {
        self.database_count += 1;
        let database = handle(SearchDatabase::new(
            format!("SearchDB_{}", self.database_count),
            location,
        ));
        self.document
            .data_collection
            .inputs
            .search_databases
            .push(database.clone());
        database
    }

    /// Register a spectra source input. Ids run `SpecData_1`, ...
    pub fn add_spectra_data(&mut self, location: impl Into<String>) -> Handle<SpectraData> {
        self.spectra_data_count += 1;
        let spectra = handle(SpectraData::new(
            format!("SpecData_{}", self.spectra_data_count),
            location,
        ));
        self.document
            .data_collection
            .inputs
            .spectra_data
            .push(spectra.clone());
        spectra
    }

    /// Register a raw source file input. Ids run `SourceFile_1`, ...
    pub fn add_source_file(&mut self, location: impl Into<String>) -> Handle<SourceFile> {
        self.source_file_count += 1;
        let source = handle(SourceFile::new(
            format!("SourceFile_{}", self.source_file_count),
            location,
        ));
        self.document
            .data_collection
            .inputs
            .source_files
            .push(source.clone());
        source
    }

    /// Register the analysis settings for the identification run.
    /// Ids run `SIP_1`, ...
    pub fn add_protocol(
        &mut self,
        software: &Handle<AnalysisSoftware>,
    ) -> Handle<SpectrumIdentificationProtocol> {
        self.protocol_count += 1;
        let mut protocol =
            SpectrumIdentificationProtocol::new(format!("SIP_{}", self.protocol_count));
        protocol.software.set_entity(software.clone());
        let protocol = handle(protocol);
        self.document
            .analysis_protocol_collection
            .spectrum_identification_protocols
            .push(protocol.clone());
        protocol
    }

    /// Add one scored match for a spectrum.
    ///
    /// The first call for a native spectrum id creates the parent result
    /// record (`SIR_<suffix>`, carrying a scan-start-time param with its
    /// unit fixed to minutes); subsequent calls for the same id append
    /// another item (`<resultId>_<ordinal>`) to the same record instead of
    /// creating a duplicate. The returned item is for the caller to
    /// populate: rank, charge, peptide, and evidence links.
    pub fn add_scored_item(
        &mut self,
        spectra_data: &Handle<SpectraData>,
        native_id: &str,
        retention_time_minutes: f64,
    ) -> Handle<SpectrumIdentificationItem> {
        let result = match self.results.get(native_id) {
            Some(existing) => existing.clone(),
            None => {
                let mut result = SpectrumIdentificationResult::new(
                    format!("SIR_{}", native_id_suffix(native_id)),
                    native_id,
                );
                result.spectra_data.set_entity(spectra_data.clone());
                result.params.push_cv(
                    CvParam::new(CvTerm::ScanStartTime)
                        .with_value(retention_time_minutes.to_string())
                        .with_unit(CvTerm::Minute),
                );
                let result = handle(result);
                self.results.insert(native_id.to_string(), result.clone());
                result
            }
        };

        let ordinal = result.borrow().items.len() + 1;
        let item_id = format!("{}_{}", result.borrow().id, ordinal);
        let item = handle(SpectrumIdentificationItem::new(item_id));
        result.borrow_mut().items.push(item.clone());
        item
    }

    /// Consume the builder, finalize, and return the completed document.
    pub fn into_document(mut self) -> IdentDocument {
        self.finalize();
        self.document
    }

    fn finalize(&mut self) {
        // Step 1: materialize the run-level records and link every declared
        // input to them.
        let mut list = SpectrumIdentificationList::new("SIL_1");
        list.results = self.results.values().cloned().collect();
        let list = handle(list);

        let mut run = SpectrumIdentification::new("SpecIdent_1");
        run.list.set_entity(list.clone());
        if let Some(protocol) = self
            .document
            .analysis_protocol_collection
            .spectrum_identification_protocols
            .first()
        {
            run.protocol.set_entity(protocol.clone());
        }
        for spectra in &self.document.data_collection.inputs.spectra_data {
            run.input_spectra.push(EntityRef::resolved(spectra.clone()));
        }
        for database in &self.document.data_collection.inputs.search_databases {
            run.search_databases
                .push(EntityRef::resolved(database.clone()));
        }

        // Steps 2-5. Each pass walks every result -> item -> evidence link.
        // The evidence keys in the third pass depend on the canonical ids
        // assigned by the first two, so the order is load-bearing.
        let db_sequences = self.renumber_db_sequences();
        let peptides = self.renumber_peptides();
        let evidences = self.dedup_evidence();

        // Step 6: search-space size statistic.
        list.borrow_mut().num_sequences_searched = Some(db_sequences.len() as u64);

        debug!(
            results = self.results.len(),
            db_sequences = db_sequences.len(),
            peptides = peptides.len(),
            evidences = evidences.len(),
            "finalized identification document"
        );

        // Step 7: wire the final collections.
        self.document.sequence_collection.db_sequences = db_sequences;
        self.document.sequence_collection.peptides = peptides;
        self.document.sequence_collection.peptide_evidences = evidences;
        self.document
            .data_collection
            .analysis_data
            .spectrum_identification_lists
            .push(list);
        self.document
            .analysis_collection
            .spectrum_identifications
            .push(run);
    }

    /// Dedup db sequences by accession; first occurrence keeps and is
    /// renumbered `DBSeq<N>`, later occurrences redirect to the canonical
    /// handle.
    fn renumber_db_sequences(&mut self) -> Vec<Handle<DbSequence>> {
        let mut canonical: IndexMap<String, Handle<DbSequence>> = IndexMap::new();
        for result in self.results.values() {
            let result = result.borrow();
            for item in &result.items {
                let item = item.borrow();
                for evidence_ref in &item.peptide_evidence {
                    let Some(evidence) = evidence_ref.entity() else {
                        continue;
                    };
                    let db_sequence = evidence.borrow().db_sequence.entity();
                    let Some(db_sequence) = db_sequence else {
                        continue;
                    };
                    let accession = db_sequence.borrow().accession.clone();
                    let target = match canonical.get(&accession) {
                        Some(existing) => existing.clone(),
                        None => {
                            db_sequence
                                .borrow_mut()
                                .set_id(format!("DBSeq{}", canonical.len() + 1));
                            canonical.insert(accession, db_sequence.clone());
                            db_sequence
                        }
                    };
                    evidence.borrow_mut().db_sequence.set_entity(target);
                }
            }
        }
        canonical.into_values().collect()
    }

    /// Dedup peptides by (sequence, modification fingerprint); canonical ids
    /// run `Pep_<N>`. Both item and evidence peptide refs are redirected.
    fn renumber_peptides(&mut self) -> Vec<Handle<Peptide>> {
        let mut canonical: IndexMap<String, Handle<Peptide>> = IndexMap::new();
        let mut canonicalize = |peptide: Handle<Peptide>| -> Handle<Peptide> {
            let key = peptide.borrow().dedup_key();
            match canonical.get(&key) {
                Some(existing) => existing.clone(),
                None => {
                    peptide
                        .borrow_mut()
                        .set_id(format!("Pep_{}", canonical.len() + 1));
                    canonical.insert(key, peptide.clone());
                    peptide
                }
            }
        };

        for result in self.results.values() {
            let result = result.borrow();
            for item in &result.items {
                let item_peptide = item.borrow().peptide.entity();
                if let Some(peptide) = item_peptide {
                    let target = canonicalize(peptide);
                    item.borrow_mut().peptide.set_entity(target);
                }
                let item = item.borrow();
                for evidence_ref in &item.peptide_evidence {
                    let Some(evidence) = evidence_ref.entity() else {
                        continue;
                    };
                    let peptide = evidence.borrow().peptide.entity();
                    let Some(peptide) = peptide else {
                        continue;
                    };
                    let target = canonicalize(peptide);
                    evidence.borrow_mut().peptide.set_entity(target);
                }
            }
        }
        canonical.into_values().collect()
    }

    /// Collapse evidence records to one per composite key
    /// `PepEv_<dbSeqSuffix>_<pepSuffix>_<startOffset>`, built from the
    /// already-renumbered db-sequence and peptide ids.
    fn dedup_evidence(&mut self) -> Vec<Handle<PeptideEvidence>> {
        let mut canonical: IndexMap<String, Handle<PeptideEvidence>> = IndexMap::new();
        for result in self.results.values() {
            let result = result.borrow();
            for item in &result.items {
                let mut item = item.borrow_mut();
                for evidence_ref in item.peptide_evidence.iter_mut() {
                    let Some(evidence) = evidence_ref.entity() else {
                        continue;
                    };
                    let key = {
                        let evidence = evidence.borrow();
                        let db_suffix = evidence
                            .db_sequence
                            .id()
                            .map(|id| id_suffix(&id, "DBSeq"))
                            .unwrap_or_default();
                        let pep_suffix = evidence
                            .peptide
                            .id()
                            .map(|id| id_suffix(&id, "Pep_"))
                            .unwrap_or_default();
                        format!(
                            "PepEv_{}_{}_{}",
                            db_suffix,
                            pep_suffix,
                            evidence.start.unwrap_or(0)
                        )
                    };
                    match canonical.get(&key) {
                        Some(existing) => evidence_ref.set_entity(existing.clone()),
                        None => {
                            evidence.borrow_mut().set_id(key.clone());
                            canonical.insert(key, evidence);
                        }
                    }
                }
            }
        }
        canonical.into_values().collect()
    }
}

impl Default for IdentDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The scan-number portion of a native spectrum id: the text after the last
/// `=` for `key=value`-structured ids, else the whole id with whitespace
/// mapped to `_`.
fn native_id_suffix(native_id: &str) -> String {
    match native_id.rsplit_once('=') {
        Some((_, tail)) if !tail.trim().is_empty() => tail.trim().to_string(),
        _ => native_id
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_"),
    }
}

fn id_suffix(id: &str, prefix: &str) -> String {
    id.strip_prefix(prefix).unwrap_or(id).to_string()
}
