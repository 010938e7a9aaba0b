//! Expansion of id lists into stored records.

use std::collections::HashMap;

use crate::types::RecordId;

/// Replace each id in `ids` with its record from `records`.
///
/// Output follows the order of `ids`: a repeated id yields the record again,
/// an id without a record is dropped.
pub fn populate<T, F>(ids: &[RecordId], records: Vec<T>, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &RecordId,
{
    let by_id: HashMap<RecordId, T> = records
        .into_iter()
        .map(|record| (key(&record).clone(), record))
        .collect();

    ids.iter().filter_map(|id| by_id.get(id).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mentor;

    #[test]
    fn test_populate_follows_id_order() {
        let ids = vec![RecordId::new("b"), RecordId::new("a")];
        let records = vec![Mentor::new("a", None), Mentor::new("b", None)];

        let out = populate(&ids, records, |m| &m.id);
        let out: Vec<_> = out.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(out, vec!["b", "a"]);
    }

    #[test]
    fn test_populate_repeats_and_drops() {
        let ids = vec![RecordId::new("a"), RecordId::new("gone"), RecordId::new("a")];
        let records = vec![Mentor::new("a", Some("Alice".to_string()))];

        let out = populate(&ids, records, |m| &m.id);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|m| m.name.as_deref() == Some("Alice")));
    }
}
