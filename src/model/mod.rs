//! Document model: entity records, dual-state references, and the root
//! Document Context

mod analysis;
mod audit;
mod data;
mod document;
mod protocol;
mod refs;
mod sequence;
mod software;

pub use analysis::{AnalysisCollection, SpectrumIdentification};
pub use audit::{Organization, Person, Sample};
pub use data::{
    AnalysisData, DataCollection, Inputs, SearchDatabase, SourceFile, SpectraData,
    SpectrumIdentificationItem, SpectrumIdentificationList, SpectrumIdentificationResult,
};
pub use document::{
    AnalysisProtocolCollection, AuditCollection, IdentDocument, SequenceCollection,
};
pub use protocol::{Enzyme, SearchModification, SpectrumIdentificationProtocol};
pub use refs::{handle, DocLookup, EntityRef, Handle, Identified};
pub use sequence::{DbSequence, Modification, Peptide, PeptideEvidence};
pub use software::{AnalysisSoftware, BibliographicReference, Provider};
