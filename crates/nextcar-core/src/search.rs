//! Inventory search.
//!
//! The filter runs locally over whatever the last fetch returned; it never
//! triggers a request.

use crate::types::ListingRecord;

/// Returns the records whose brand or model contains `term`, ignoring case.
///
/// A term that is blank after trimming keeps every record. Otherwise the
/// term is matched as typed, so surrounding spaces take part in the match.
/// Input order is preserved.
pub fn filter_listings(records: &[ListingRecord], term: &str) -> Vec<ListingRecord> {
    if term.trim().is_empty() {
        return records.to_vec();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches_term(record, &needle))
        .cloned()
        .collect()
}

fn matches_term(record: &ListingRecord, needle: &str) -> bool {
    record.marca.to_lowercase().contains(needle) || record.modelo.to_lowercase().contains(needle)
}
