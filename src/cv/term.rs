//! Process-wide CV term registry
//!
//! The registry is a compact table of the terms the document model itself
//! needs, not a rendering of the full ontologies. It is immutable, `'static`,
//! and read-only after load; the derived accession index is built once on
//! first use.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::source::CvSource;

/// Canonical term identifier.
///
/// A small, copyable id; accession, display name, source, and default unit
/// are all derived from the registry via [`term_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CvTerm {
    /// Sentinel for a term the registry does not know
    Unknown,

    // Spectrum / chromatography
    ScanStartTime,
    RetentionTime,

    // Units of measure
    Minute,
    Second,
    Dalton,
    Ppm,

    // File and identifier formats
    MzmlFormat,
    ThermoRawFormat,
    FastaFormat,
    ThermoNativeIdFormat,
    MultiplePeakListNativeIdFormat,

    // Search configuration
    MsMsSearch,
    NoThreshold,
    Trypsin,

    // Software
    Comet,
    MsGf,

    // Scores
    CometXCorr,
    SequestXCorr,
    MascotScore,
    MsGfRawScore,
    MsGfEValue,

    // Contact roles
    SoftwareVendor,
    Researcher,

    // Modifications
    UnknownModification,
    Carbamidomethyl,
    Oxidation,
    Phospho,
    Acetyl,
}

/// A registry entry: everything the model knows about one canonical term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermInfo {
    /// Canonical id
    pub id: CvTerm,
    /// Accession within the owning vocabulary (e.g. `"MS:1000016"`)
    pub accession: &'static str,
    /// Display name
    pub name: &'static str,
    /// Owning vocabulary
    pub source: CvSource,
    /// Default unit-of-measure term, where the vocabulary declares one
    pub unit: Option<CvTerm>,
}

/// The sentinel entry returned for any unrecognized term id.
pub const UNKNOWN_TERM: TermInfo = TermInfo {
    id: CvTerm::Unknown,
    accession: "",
    name: "",
    source: CvSource::Unknown,
    unit: None,
};

const fn ms(id: CvTerm, accession: &'static str, name: &'static str) -> TermInfo {
    TermInfo {
        id,
        accession,
        name,
        source: CvSource::PsiMs,
        unit: None,
    }
}

const fn ms_with_unit(
    id: CvTerm,
    accession: &'static str,
    name: &'static str,
    unit: CvTerm,
) -> TermInfo {
    TermInfo {
        id,
        accession,
        name,
        source: CvSource::PsiMs,
        unit: Some(unit),
    }
}

const fn uo(id: CvTerm, accession: &'static str, name: &'static str) -> TermInfo {
    TermInfo {
        id,
        accession,
        name,
        source: CvSource::UnitOntology,
        unit: None,
    }
}

const fn unimod(id: CvTerm, accession: &'static str, name: &'static str) -> TermInfo {
    TermInfo {
        id,
        accession,
        name,
        source: CvSource::Unimod,
        unit: None,
    }
}

static REGISTRY: &[TermInfo] = &[
    ms_with_unit(
        CvTerm::ScanStartTime,
        "MS:1000016",
        "scan start time",
        CvTerm::Second,
    ),
    ms_with_unit(
        CvTerm::RetentionTime,
        "MS:1000894",
        "retention time",
        CvTerm::Second,
    ),
    uo(CvTerm::Minute, "UO:0000031", "minute"),
    uo(CvTerm::Second, "UO:0000010", "second"),
    uo(CvTerm::Dalton, "UO:0000221", "dalton"),
    uo(CvTerm::Ppm, "UO:0000169", "parts per million"),
    ms(CvTerm::MzmlFormat, "MS:1000584", "mzML format"),
    ms(CvTerm::ThermoRawFormat, "MS:1000563", "Thermo RAW format"),
    ms(CvTerm::FastaFormat, "MS:1001348", "FASTA format"),
    ms(CvTerm::ThermoNativeIdFormat, "MS:1000768", "Thermo nativeID format"),
    ms(
        CvTerm::MultiplePeakListNativeIdFormat,
        "MS:1000774",
        "multiple peak list nativeID format",
    ),
    ms(CvTerm::MsMsSearch, "MS:1001083", "ms-ms search"),
    ms(CvTerm::NoThreshold, "MS:1001494", "no threshold"),
    ms(CvTerm::Trypsin, "MS:1001251", "Trypsin"),
    ms(CvTerm::Comet, "MS:1002251", "Comet"),
    ms(CvTerm::MsGf, "MS:1002048", "MS-GF"),
    ms(CvTerm::CometXCorr, "MS:1002252", "Comet:xcorr"),
    ms(CvTerm::SequestXCorr, "MS:1001155", "SEQUEST:xcorr"),
    ms(CvTerm::MascotScore, "MS:1001171", "Mascot:score"),
    ms(CvTerm::MsGfRawScore, "MS:1002049", "MS-GF:RawScore"),
    ms(CvTerm::MsGfEValue, "MS:1002053", "MS-GF:EValue"),
    ms(CvTerm::SoftwareVendor, "MS:1001267", "software vendor"),
    ms(CvTerm::Researcher, "MS:1001271", "researcher"),
    ms(CvTerm::UnknownModification, "MS:1001460", "unknown modification"),
    unimod(CvTerm::Carbamidomethyl, "UNIMOD:4", "Carbamidomethyl"),
    unimod(CvTerm::Oxidation, "UNIMOD:35", "Oxidation"),
    unimod(CvTerm::Phospho, "UNIMOD:21", "Phospho"),
    unimod(CvTerm::Acetyl, "UNIMOD:1", "Acetyl"),
];

/// Look up a term's registry entry.
///
/// Total over all term ids: an unrecognized id yields [`UNKNOWN_TERM`],
/// never a failure.
pub fn term_info(term: CvTerm) -> &'static TermInfo {
    REGISTRY.iter().find(|t| t.id == term).unwrap_or(&UNKNOWN_TERM)
}

fn accession_index() -> &'static HashMap<CvSource, HashMap<&'static str, CvTerm>> {
    static INDEX: OnceLock<HashMap<CvSource, HashMap<&'static str, CvTerm>>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut index: HashMap<CvSource, HashMap<&'static str, CvTerm>> = HashMap::new();
        for entry in REGISTRY {
            index
                .entry(entry.source)
                .or_default()
                .insert(entry.accession, entry.id);
        }
        index
    })
}

/// Look up a term by accession within a canonical source.
///
/// Requires an exact accession match; a miss yields [`CvTerm::Unknown`],
/// never a failure.
pub fn term_by_accession(source: CvSource, accession: &str) -> CvTerm {
    accession_index()
        .get(&source)
        .and_then(|by_accession| by_accession.get(accession))
        .copied()
        .unwrap_or(CvTerm::Unknown)
}

impl CvTerm {
    /// Accession string, empty for an unknown term.
    pub fn accession(&self) -> &'static str {
        term_info(*self).accession
    }

    /// Display name, empty for an unknown term.
    pub fn name(&self) -> &'static str {
        term_info(*self).name
    }

    /// Owning vocabulary.
    pub fn source(&self) -> CvSource {
        term_info(*self).source
    }

    /// Default unit-of-measure term, where the vocabulary declares one.
    pub fn default_unit(&self) -> Option<CvTerm> {
        term_info(*self).unit
    }
}
