//! Common test utilities for mzident integration scenarios
//!
//! Provides fixture constructors for sequence records and a tracing
//! subscriber hook for debugging test runs.

#![allow(dead_code)] // Each integration binary uses a subset of the helpers

use std::sync::Once;

use mzident::{
    handle, CvParam, CvTerm, DbSequence, Handle, Modification, Peptide, PeptideEvidence,
};

/// Install a fmt subscriber once per test binary. Output goes to the
/// per-test capture buffer; run with `--nocapture` to see it.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// A database sequence with a throwaway working id; finalize renumbers it.
pub fn db_sequence(accession: &str) -> Handle<DbSequence> {
    handle(DbSequence::new(format!("work-{accession}"), accession))
}

/// An unmodified peptide with a throwaway working id.
pub fn peptide(sequence: &str) -> Handle<Peptide> {
    handle(Peptide::new(format!("work-{sequence}"), sequence))
}

/// A peptide carrying one named modification at the given location.
pub fn modified_peptide(sequence: &str, term: CvTerm, location: usize) -> Handle<Peptide> {
    handle(
        Peptide::new(format!("work-{sequence}-{location}"), sequence).with_modification(
            Modification::new()
                .at_location(location)
                .with_cv_param(CvParam::new(term)),
        ),
    )
}

/// Evidence linking a peptide to a database sequence at an offset range.
pub fn evidence(
    db_sequence: &Handle<DbSequence>,
    peptide: &Handle<Peptide>,
    start: usize,
    end: usize,
) -> Handle<PeptideEvidence> {
    let mut ev = PeptideEvidence::new("work-ev").with_range(start, end);
    ev.db_sequence.set_entity(db_sequence.clone());
    ev.peptide.set_entity(peptide.clone());
    handle(ev)
}
