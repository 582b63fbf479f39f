use super::model::EvEntry;

// ---------------------------------------------------------------------------
// Filter predicate: optional manufacturer selector
// ---------------------------------------------------------------------------

/// The active manufacturer selection. `None` means "no filter" (show all).
pub type Selector = Option<String>;

/// Return indices of entries that pass the selector, in input order.
///
/// * `None` → every index.
/// * `Some(make)` → entries whose manufacturer equals `make` exactly
///   (case-sensitive). Entries without a manufacturer never match, and an
///   unknown manufacturer simply yields no indices.
pub fn filtered_indices(entries: &[EvEntry], selector: Option<&str>) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| match selector {
            None => true,
            Some(make) => entry.manufacturer.as_deref() == Some(make),
        })
        .map(|(i, _)| i)
        .collect()
}

/// Borrow the entries selected by `indices`.
pub fn select<'a>(entries: &'a [EvEntry], indices: &[usize]) -> Vec<&'a EvEntry> {
    indices.iter().filter_map(|&i| entries.get(i)).collect()
}
