//! Per-document translation between file-local CV prefixes and canonical sources

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

use super::source::{Cv, CvSource};
use super::term::{self, CvTerm};

/// Mapping between a document's file-local CV-list prefixes and the canonical
/// CV sources used by the registry.
///
/// Built once per document from its declared CV-list. Absence of a mapping
/// degrades to the unknown sentinel on every lookup, a deliberate leniency
/// policy, since many producers write nonstandard CV-list content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvTranslator {
    /// file-local prefix -> canonical source, in declaration order
    file_to_source: IndexMap<String, CvSource>,
    /// canonical source -> first declared prefix
    source_to_file: HashMap<CvSource, String>,
}

impl CvTranslator {
    /// Build a translator from the ordered CV-list a document declares.
    ///
    /// Entries whose source cannot be recognized are skipped: their prefix
    /// translates to [`CvSource::Unknown`] like any undeclared prefix.
    pub fn from_cv_list(cv_list: &[Cv]) -> Self {
        let mut translator = Self::default();
        for cv in cv_list {
            let source = CvSource::recognize(cv);
            if source == CvSource::Unknown {
                debug!(prefix = %cv.id, full_name = %cv.full_name, "skipping unrecognized CV-list entry");
                continue;
            }
            translator.file_to_source.insert(cv.id.clone(), source);
            translator
                .source_to_file
                .entry(source)
                .or_insert_with(|| cv.id.clone());
        }
        translator
    }

    /// Translate a file-local prefix to its canonical source.
    ///
    /// An undeclared prefix yields [`CvSource::Unknown`].
    pub fn translate_file_ref(&self, prefix: &str) -> CvSource {
        self.file_to_source
            .get(prefix)
            .copied()
            .unwrap_or(CvSource::Unknown)
    }

    /// Translate a canonical source back to the document's prefix for it.
    ///
    /// `None` when the document never declared the source.
    pub fn translate_source(&self, source: CvSource) -> Option<&str> {
        self.source_to_file.get(&source).map(String::as_str)
    }

    /// Look up a term by accession under a file-local prefix.
    ///
    /// Composes the prefix mapping with the registry's precomputed
    /// per-source accession index; any miss along the way yields
    /// [`CvTerm::Unknown`].
    pub fn term_by_accession(&self, accession: &str, prefix: &str) -> CvTerm {
        match self.translate_file_ref(prefix) {
            CvSource::Unknown => CvTerm::Unknown,
            source => term::term_by_accession(source, accession),
        }
    }

    /// Number of declared, recognized prefixes.
    pub fn len(&self) -> usize {
        self.file_to_source.len()
    }

    /// True when no prefix is mapped.
    pub fn is_empty(&self) -> bool {
        self.file_to_source.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> Vec<Cv> {
        vec![
            Cv::new("PSI-MS", "PSI-MS", ""),
            Cv::from_source(CvSource::UnitOntology),
            Cv::from_source(CvSource::Unimod),
        ]
    }

    #[test]
    fn round_trips_declared_prefixes() {
        let translator = CvTranslator::from_cv_list(&declared());
        assert_eq!(translator.translate_file_ref("PSI-MS"), CvSource::PsiMs);
        assert_eq!(translator.translate_source(CvSource::PsiMs), Some("PSI-MS"));
        assert_eq!(translator.translate_file_ref("UO"), CvSource::UnitOntology);
    }

    #[test]
    fn undeclared_prefix_degrades_to_unknown() {
        let translator = CvTranslator::from_cv_list(&declared());
        assert_eq!(translator.translate_file_ref("MOD"), CvSource::Unknown);
        assert_eq!(translator.translate_source(CvSource::PsiMod), None);
    }

    #[test]
    fn accession_lookup_through_local_prefix() {
        let translator = CvTranslator::from_cv_list(&declared());
        assert_eq!(
            translator.term_by_accession("MS:1000016", "PSI-MS"),
            CvTerm::ScanStartTime
        );
        assert_eq!(
            translator.term_by_accession("UNIMOD:4", "UNIMOD"),
            CvTerm::Carbamidomethyl
        );
    }

    #[test]
    fn accession_lookup_under_undeclared_prefix_is_unknown() {
        // CV-list omits UNIMOD entirely: any UNIMOD-prefixed lookup degrades
        let translator = CvTranslator::from_cv_list(&[Cv::from_source(CvSource::PsiMs)]);
        assert_eq!(
            translator.term_by_accession("UNIMOD:4", "UNIMOD"),
            CvTerm::Unknown
        );
    }

    #[test]
    fn unrecognized_entries_are_skipped_not_fatal() {
        let cvs = vec![
            Cv::new("XXX", "Some private ontology", "http://example.org/xxx.obo"),
            Cv::from_source(CvSource::PsiMs),
        ];
        let translator = CvTranslator::from_cv_list(&cvs);
        assert_eq!(translator.len(), 1);
        assert_eq!(translator.translate_file_ref("XXX"), CvSource::Unknown);
        assert_eq!(translator.translate_file_ref("MS"), CvSource::PsiMs);
    }
}
