//! Sequence collection records: database sequences, peptides, evidence

use serde::{Deserialize, Serialize};

use super::data::SearchDatabase;
use super::refs::{impl_identified, EntityRef};
use crate::cv::CvTerm;
use crate::param::{CvParam, ParamList};

/// A protein (or nucleotide) sequence record from a search database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbSequence {
    pub id: String,
    /// Accession within the source database; dedup identity during finalize
    pub accession: String,
    pub search_database: EntityRef<SearchDatabase>,
    pub length: Option<usize>,
    pub seq: Option<String>,
    pub params: ParamList,
}

impl DbSequence {
    pub fn new(id: impl Into<String>, accession: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            accession: accession.into(),
            search_database: EntityRef::default(),
            length: None,
            seq: None,
            params: ParamList::new(),
        }
    }

    pub fn with_seq(mut self, seq: impl Into<String>) -> Self {
        let seq = seq.into();
        self.length = Some(seq.len());
        self.seq = Some(seq);
        self
    }
}

/// A modification attached to a peptide at a given location.
///
/// Location follows the exchange format's convention: 0 for the N-terminus,
/// `sequence length + 1` for the C-terminus, 1-based residue positions in
/// between.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub location: Option<usize>,
    pub residues: Vec<char>,
    pub monoisotopic_mass_delta: Option<f64>,
    pub avg_mass_delta: Option<f64>,
    pub cv_params: Vec<CvParam>,
}

impl Modification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_location(mut self, location: usize) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_monoisotopic_mass_delta(mut self, delta: f64) -> Self {
        self.monoisotopic_mass_delta = Some(delta);
        self
    }

    pub fn with_residue(mut self, residue: char) -> Self {
        self.residues.push(residue);
        self
    }

    pub fn with_cv_param(mut self, param: CvParam) -> Self {
        self.cv_params.push(param);
        self
    }

    /// The fingerprint token this modification contributes to its peptide's
    /// dedup key: for each CV param, the term's display name (or, for the
    /// generic unknown-modification term, the free-text value) followed by
    /// the attachment location.
    pub fn fingerprint(&self) -> String {
        let mut token = String::new();
        for param in &self.cv_params {
            if param.term == CvTerm::UnknownModification {
                token.push_str(param.value.as_deref().unwrap_or(""));
            } else {
                token.push_str(param.name());
            }
        }
        token.push('@');
        match self.location {
            Some(location) => token.push_str(&location.to_string()),
            None => token.push('?'),
        }
        token
    }
}

/// A peptide: sequence text plus its modification set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peptide {
    pub id: String,
    pub peptide_sequence: String,
    pub modifications: Vec<Modification>,
    pub params: ParamList,
}

impl Peptide {
    pub fn new(id: impl Into<String>, peptide_sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            peptide_sequence: peptide_sequence.into(),
            modifications: Vec::new(),
            params: ParamList::new(),
        }
    }

    pub fn with_modification(mut self, modification: Modification) -> Self {
        self.modifications.push(modification);
        self
    }

    /// Dedup key: sequence text plus the fingerprint of every modification
    /// in stored order. Two peptides with the same sequence but different
    /// modification sets stay distinct.
    pub fn dedup_key(&self) -> String {
        let mut key = self.peptide_sequence.clone();
        for modification in &self.modifications {
            key.push_str(&modification.fingerprint());
        }
        key
    }
}

/// Evidence that a peptide occurs at an offset within a database sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideEvidence {
    pub id: String,
    pub db_sequence: EntityRef<DbSequence>,
    pub peptide: EntityRef<Peptide>,
    /// 1-based start offset within the database sequence
    pub start: Option<usize>,
    /// 1-based inclusive end offset
    pub end: Option<usize>,
    /// Residue preceding the peptide, `-` at the sequence start
    pub pre: Option<char>,
    /// Residue following the peptide, `-` at the sequence end
    pub post: Option<char>,
    pub is_decoy: bool,
}

impl PeptideEvidence {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            db_sequence: EntityRef::default(),
            peptide: EntityRef::default(),
            start: None,
            end: None,
            pre: None,
            post: None,
            is_decoy: false,
        }
    }

    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_flanking(mut self, pre: char, post: char) -> Self {
        self.pre = Some(pre);
        self.post = Some(post);
        self
    }

    pub fn decoy(mut self) -> Self {
        self.is_decoy = true;
        self
    }
}

impl_identified!(DbSequence, Peptide, PeptideEvidence);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_modification_fingerprint_uses_term_name() {
        let m = Modification::new()
            .at_location(3)
            .with_cv_param(CvParam::new(CvTerm::Oxidation));
        assert_eq!(m.fingerprint(), "Oxidation@3");
    }

    #[test]
    fn unknown_modification_fingerprint_uses_value() {
        let m = Modification::new().at_location(1).with_cv_param(
            CvParam::new(CvTerm::UnknownModification).with_value("delta 79.97"),
        );
        assert_eq!(m.fingerprint(), "delta 79.97@1");
    }

    #[test]
    fn dedup_key_separates_modification_sets() {
        let plain = Peptide::new("a", "PEPTIDER");
        let oxidized = Peptide::new("b", "PEPTIDER").with_modification(
            Modification::new()
                .at_location(3)
                .with_cv_param(CvParam::new(CvTerm::Oxidation)),
        );
        assert_ne!(plain.dedup_key(), oxidized.dedup_key());

        let oxidized_again = Peptide::new("c", "PEPTIDER").with_modification(
            Modification::new()
                .at_location(3)
                .with_cv_param(CvParam::new(CvTerm::Oxidation)),
        );
        assert_eq!(oxidized.dedup_key(), oxidized_again.dedup_key());
    }

    #[test]
    fn dedup_key_separates_locations() {
        let at_three = Peptide::new("a", "PEPTIDER").with_modification(
            Modification::new()
                .at_location(3)
                .with_cv_param(CvParam::new(CvTerm::Phospho)),
        );
        let at_five = Peptide::new("b", "PEPTIDER").with_modification(
            Modification::new()
                .at_location(5)
                .with_cv_param(CvParam::new(CvTerm::Phospho)),
        );
        assert_ne!(at_three.dedup_key(), at_five.dedup_key());
    }
}
