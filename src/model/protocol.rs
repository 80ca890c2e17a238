//! Analysis protocol records: search settings applied to an identification run

use serde::{Deserialize, Serialize};

use super::refs::{impl_identified, EntityRef};
use super::software::AnalysisSoftware;
use crate::param::{CvParam, Param, ParamGroup, ParamList};

/// A modification the search was configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchModification {
    /// Fixed (true) or variable (false)
    pub fixed_mod: bool,
    pub mass_delta: f64,
    pub residues: Vec<char>,
    pub cv_params: Vec<CvParam>,
}

impl SearchModification {
    pub fn fixed(mass_delta: f64) -> Self {
        Self {
            fixed_mod: true,
            mass_delta,
            ..Self::default()
        }
    }

    pub fn variable(mass_delta: f64) -> Self {
        Self {
            fixed_mod: false,
            mass_delta,
            ..Self::default()
        }
    }

    pub fn on_residue(mut self, residue: char) -> Self {
        self.residues.push(residue);
        self
    }

    pub fn with_cv_param(mut self, param: CvParam) -> Self {
        self.cv_params.push(param);
        self
    }
}

/// A cleavage enzyme declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enzyme {
    pub id: String,
    pub site_regexp: Option<String>,
    pub missed_cleavages: Option<u32>,
    pub semi_specific: Option<bool>,
    /// CV or user params naming the enzyme
    pub name: ParamList,
}

impl Enzyme {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            site_regexp: None,
            missed_cleavages: None,
            semi_specific: None,
            name: ParamList::new(),
        }
    }

    pub fn with_missed_cleavages(mut self, missed_cleavages: u32) -> Self {
        self.missed_cleavages = Some(missed_cleavages);
        self
    }

    pub fn with_site_regexp(mut self, site_regexp: impl Into<String>) -> Self {
        self.site_regexp = Some(site_regexp.into());
        self
    }
}

/// The settings one spectrum-identification run was performed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumIdentificationProtocol {
    pub id: String,
    pub software: EntityRef<AnalysisSoftware>,
    pub search_type: Option<Param>,
    pub additional_search_params: ParamList,
    pub modification_params: Vec<SearchModification>,
    pub enzymes: Vec<Enzyme>,
    pub fragment_tolerance: ParamGroup,
    pub parent_tolerance: ParamGroup,
    pub threshold: ParamList,
}

impl SpectrumIdentificationProtocol {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            software: EntityRef::default(),
            search_type: None,
            additional_search_params: ParamList::new(),
            modification_params: Vec::new(),
            enzymes: Vec::new(),
            fragment_tolerance: ParamGroup::new(),
            parent_tolerance: ParamGroup::new(),
            threshold: ParamList::new(),
        }
    }

    pub fn with_search_type(mut self, search_type: impl Into<Param>) -> Self {
        self.search_type = Some(search_type.into());
        self
    }

    pub fn with_enzyme(mut self, enzyme: Enzyme) -> Self {
        self.enzymes.push(enzyme);
        self
    }

    pub fn with_modification(mut self, modification: SearchModification) -> Self {
        self.modification_params.push(modification);
        self
    }
}

impl_identified!(Enzyme, SpectrumIdentificationProtocol);
