//! Canonical CV sources and document-local CV-list records

use serde::{Deserialize, Serialize};

/// A canonical controlled-vocabulary source recognized by the registry.
///
/// Every registry term belongs to exactly one source. Documents refer to
/// sources through file-local prefixes declared in their CV-list; the
/// [`CvTranslator`](super::CvTranslator) maps between the two schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CvSource {
    /// PSI-MS, the mass-spectrometry ontology
    PsiMs,
    /// Unit Ontology, units of measure
    UnitOntology,
    /// UNIMOD protein modifications
    Unimod,
    /// PSI-MOD protein modifications
    PsiMod,
    /// Phenotype And Trait Ontology (bundled for completeness, never
    /// referenced by identification output)
    Pato,
    /// Sentinel for a source the registry does not know
    Unknown,
}

/// The bundled canonical CV-source table.
pub const BUNDLED_SOURCES: [CvSource; 5] = [
    CvSource::PsiMs,
    CvSource::UnitOntology,
    CvSource::Unimod,
    CvSource::PsiMod,
    CvSource::Pato,
];

impl CvSource {
    /// Canonical short tag (`"MS"`, `"UO"`, ...). Empty for [`CvSource::Unknown`].
    pub fn tag(&self) -> &'static str {
        match self {
            CvSource::PsiMs => "MS",
            CvSource::UnitOntology => "UO",
            CvSource::Unimod => "UNIMOD",
            CvSource::PsiMod => "MOD",
            CvSource::Pato => "PATO",
            CvSource::Unknown => "",
        }
    }

    /// Full vocabulary name as declared in exchange files.
    pub fn full_name(&self) -> &'static str {
        match self {
            CvSource::PsiMs => "Proteomics Standards Initiative Mass Spectrometry Vocabularies",
            CvSource::UnitOntology => "Unit Ontology",
            CvSource::Unimod => "UNIMOD",
            CvSource::PsiMod => "Proteomics Standards Initiative Protein Modifications",
            CvSource::Pato => "Phenotype And Trait Ontology",
            CvSource::Unknown => "",
        }
    }

    /// Canonical URI of the published vocabulary.
    pub fn uri(&self) -> &'static str {
        match self {
            CvSource::PsiMs => {
                "https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo"
            }
            CvSource::UnitOntology => {
                "https://raw.githubusercontent.com/bio-ontology-research-group/unit-ontology/master/unit.obo"
            }
            CvSource::Unimod => "http://www.unimod.org/obo/unimod.obo",
            CvSource::PsiMod => {
                "https://raw.githubusercontent.com/HUPO-PSI/psi-mod-CV/master/PSI-MOD.obo"
            }
            CvSource::Pato => "http://purl.obolibrary.org/obo/pato.obo",
            CvSource::Unknown => "",
        }
    }

    /// Recognize the canonical source a document-local CV-list entry declares.
    ///
    /// Matching is lenient: the entry's id, full name, or URI may identify the
    /// source, compared case-insensitively. Anything unrecognized maps to
    /// [`CvSource::Unknown`] rather than failing; producers frequently write
    /// nonstandard CV-list content.
    pub fn recognize(cv: &Cv) -> CvSource {
        for source in BUNDLED_SOURCES {
            if cv.id.eq_ignore_ascii_case(source.tag())
                || cv.full_name.eq_ignore_ascii_case(source.full_name())
                || cv.uri.eq_ignore_ascii_case(source.uri())
            {
                return source;
            }
        }
        // Common aliases seen in the wild
        if cv.id.eq_ignore_ascii_case("PSI-MS") || cv.full_name.eq_ignore_ascii_case("PSI-MS") {
            return CvSource::PsiMs;
        }
        if cv.id.eq_ignore_ascii_case("PSI-MOD") {
            return CvSource::PsiMod;
        }
        CvSource::Unknown
    }
}

/// A document-local CV-list entry: which vocabulary is in use, under what
/// local prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cv {
    /// File-local prefix other records cite (e.g. `"MS"`, `"PSI-MS"`)
    pub id: String,
    /// Full vocabulary name
    pub full_name: String,
    /// Location of the vocabulary definition
    pub uri: String,
    /// Declared vocabulary version, if any
    pub version: Option<String>,
}

impl Cv {
    /// Create a CV-list entry.
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            uri: uri.into(),
            version: None,
        }
    }

    /// Set the declared version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Build the canonical CV-list entry for a bundled source.
    pub fn from_source(source: CvSource) -> Self {
        Self::new(source.tag(), source.full_name(), source.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognize_by_tag_is_case_insensitive() {
        let cv = Cv::new("ms", "anything", "file:///local.obo");
        assert_eq!(CvSource::recognize(&cv), CvSource::PsiMs);
    }

    #[test]
    fn recognize_by_full_name() {
        let cv = Cv::new(
            "local0",
            "Unit Ontology",
            "file:///mirrors/unit.obo",
        );
        assert_eq!(CvSource::recognize(&cv), CvSource::UnitOntology);
    }

    #[test]
    fn recognize_psi_ms_alias() {
        let cv = Cv::new("PSI-MS", "PSI-MS", "");
        assert_eq!(CvSource::recognize(&cv), CvSource::PsiMs);
    }

    #[test]
    fn unrecognized_entry_degrades_to_unknown() {
        let cv = Cv::new("BTO", "BRENDA tissue ontology", "http://example.org/bto.obo");
        assert_eq!(CvSource::recognize(&cv), CvSource::Unknown);
    }
}
