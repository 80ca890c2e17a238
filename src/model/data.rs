//! Data collection records: inputs and per-run identification output

use serde::{Deserialize, Serialize};

use super::refs::{impl_identified, EntityRef, Handle};
use super::sequence::{Peptide, PeptideEvidence};
use crate::param::{CvParam, Param, ParamGroup, ParamList};

/// A raw source file consumed upstream of the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub id: String,
    pub location: String,
    pub file_format: Option<CvParam>,
    pub params: ParamList,
}

impl SourceFile {
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            file_format: None,
            params: ParamList::new(),
        }
    }

    pub fn with_file_format(mut self, format: CvParam) -> Self {
        self.file_format = Some(format);
        self
    }
}

/// A sequence database the search ran against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDatabase {
    pub id: String,
    pub location: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub file_format: Option<CvParam>,
    pub database_name: Option<Param>,
    pub num_database_sequences: Option<u64>,
    pub num_residues: Option<u64>,
    pub params: ParamGroup,
}

impl SearchDatabase {
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            name: None,
            version: None,
            file_format: None,
            database_name: None,
            num_database_sequences: None,
            num_residues: None,
            params: ParamGroup::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_file_format(mut self, format: CvParam) -> Self {
        self.file_format = Some(format);
        self
    }

    pub fn with_database_name(mut self, name: impl Into<Param>) -> Self {
        self.database_name = Some(name.into());
        self
    }
}

/// A spectra source file the identifications were made from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectraData {
    pub id: String,
    pub location: String,
    pub file_format: Option<CvParam>,
    pub spectrum_id_format: Option<CvParam>,
}

impl SpectraData {
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            file_format: None,
            spectrum_id_format: None,
        }
    }

    pub fn with_file_format(mut self, format: CvParam) -> Self {
        self.file_format = Some(format);
        self
    }

    pub fn with_spectrum_id_format(mut self, format: CvParam) -> Self {
        self.spectrum_id_format = Some(format);
        self
    }
}

/// One scored peptide-spectrum match within a result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumIdentificationItem {
    pub id: String,
    pub rank: u32,
    pub charge_state: Option<i32>,
    pub experimental_mass_to_charge: Option<f64>,
    pub calculated_mass_to_charge: Option<f64>,
    pub peptide: EntityRef<Peptide>,
    pub passes_threshold: bool,
    pub peptide_evidence: Vec<EntityRef<PeptideEvidence>>,
    /// Score params and any further annotations
    pub params: ParamList,
}

impl SpectrumIdentificationItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rank: 1,
            charge_state: None,
            experimental_mass_to_charge: None,
            calculated_mass_to_charge: None,
            peptide: EntityRef::default(),
            passes_threshold: true,
            peptide_evidence: Vec::new(),
            params: ParamList::new(),
        }
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_charge_state(mut self, charge_state: i32) -> Self {
        self.charge_state = Some(charge_state);
        self
    }

    /// Attach an evidence link.
    pub fn add_peptide_evidence(&mut self, evidence: EntityRef<PeptideEvidence>) {
        self.peptide_evidence.push(evidence);
    }
}

/// All scored matches for one spectrum, keyed by its native identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumIdentificationResult {
    pub id: String,
    /// Native spectrum identifier in the source file's scheme
    pub spectrum_id: String,
    pub spectra_data: EntityRef<SpectraData>,
    pub items: Vec<Handle<SpectrumIdentificationItem>>,
    /// Result-level params (retention time et al.)
    pub params: ParamList,
}

impl SpectrumIdentificationResult {
    pub fn new(id: impl Into<String>, spectrum_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            spectrum_id: spectrum_id.into(),
            spectra_data: EntityRef::default(),
            items: Vec::new(),
            params: ParamList::new(),
        }
    }
}

/// The per-run list of result records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumIdentificationList {
    pub id: String,
    /// Search-space size statistic: the deduplicated database-sequence count
    pub num_sequences_searched: Option<u64>,
    pub results: Vec<Handle<SpectrumIdentificationResult>>,
}

impl SpectrumIdentificationList {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            num_sequences_searched: None,
            results: Vec::new(),
        }
    }
}

/// Inputs: everything the identification run consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub source_files: Vec<Handle<SourceFile>>,
    pub search_databases: Vec<Handle<SearchDatabase>>,
    pub spectra_data: Vec<Handle<SpectraData>>,
}

/// Analysis data: everything the identification run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub spectrum_identification_lists: Vec<Handle<SpectrumIdentificationList>>,
}

/// The document's data collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataCollection {
    pub inputs: Inputs,
    pub analysis_data: AnalysisData,
}

impl_identified!(
    SourceFile,
    SearchDatabase,
    SpectraData,
    SpectrumIdentificationItem,
    SpectrumIdentificationResult,
    SpectrumIdentificationList,
);
