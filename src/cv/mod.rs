//! Controlled-vocabulary sources, term registry, and per-document translation

mod source;
mod term;
mod translator;

pub use source::{Cv, CvSource, BUNDLED_SOURCES};
pub use term::{term_by_accession, term_info, CvTerm, TermInfo, UNKNOWN_TERM};
pub use translator::CvTranslator;
