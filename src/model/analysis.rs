//! Analysis collection: which protocol produced which identification list

use serde::{Deserialize, Serialize};

use super::data::{SearchDatabase, SpectraData, SpectrumIdentificationList};
use super::protocol::SpectrumIdentificationProtocol;
use super::refs::{impl_identified, EntityRef};

/// One identification run: links a protocol, its inputs, and the produced
/// result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumIdentification {
    pub id: String,
    pub protocol: EntityRef<SpectrumIdentificationProtocol>,
    pub list: EntityRef<SpectrumIdentificationList>,
    /// One reference entry per spectra source used as input
    pub input_spectra: Vec<EntityRef<SpectraData>>,
    /// One reference entry per search database used as input
    pub search_databases: Vec<EntityRef<SearchDatabase>>,
}

impl SpectrumIdentification {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            protocol: EntityRef::default(),
            list: EntityRef::default(),
            input_spectra: Vec::new(),
            search_databases: Vec::new(),
        }
    }
}

/// The document's analysis collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisCollection {
    pub spectrum_identifications: Vec<SpectrumIdentification>,
}

impl_identified!(SpectrumIdentification);
