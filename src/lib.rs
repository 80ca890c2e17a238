//! mzident: in-memory document model for mass-spectrometry identification files
//!
//! A graph of interlinked records (software, databases, spectra sources,
//! peptides, sequence evidence, protocol settings, scored results) that
//! round-trips to and from a textual serialization while presenting ergonomic
//! object references instead of raw identifier strings.
//!
//! # Core Concepts
//!
//! - **CV registry & translator**: canonical term ids mapped to
//!   accession/name/unit metadata, translated to and from each file's local
//!   CV-list prefix scheme
//! - **Dual-state references**: every cross-reference is an identifier string
//!   for serialization and a resolved entity handle for navigation, with lazy
//!   resolution against the owning document
//! - **Builder + finalize**: incremental accumulation, then one consolidating
//!   pass that deduplicates sequence/peptide/evidence records and assigns
//!   canonical identifiers
//!
//! # Example
//!
//! ```
//! use mzident::IdentDocumentBuilder;
//!
//! let mut builder = IdentDocumentBuilder::new();
//! let spectra = builder.add_spectra_data("/data/run01.mzML");
//! builder.add_scored_item(&spectra, "scan=100", 12.5);
//! let document = builder.into_document();
//! assert_eq!(document.analysis_collection.spectrum_identifications.len(), 1);
//! ```

pub mod builder;
pub mod cv;
pub mod model;
pub mod param;

pub use builder::IdentDocumentBuilder;
pub use cv::{Cv, CvSource, CvTerm, CvTranslator, TermInfo};
pub use model::{
    handle, AnalysisSoftware, BibliographicReference, DbSequence, DocLookup, EntityRef, Handle,
    IdentDocument, Identified, Modification, Organization, Peptide, PeptideEvidence, Person,
    Provider, Sample, SearchDatabase, SourceFile, SpectraData, SpectrumIdentification,
    SpectrumIdentificationItem, SpectrumIdentificationList, SpectrumIdentificationProtocol,
    SpectrumIdentificationResult,
};
pub use param::{CvParam, Param, ParamError, ParamGroup, ParamList, ParamResult, UserParam};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
