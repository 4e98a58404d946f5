use super::snapshot::ResponseRecord;
use std::collections::HashMap;

/// Per-category response count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistogramEntry {
    pub answer_id: String,
    pub answer_text: String,
    pub count: u32,
}

/// Counts responses per `answer_id` and sorts the categories by lowercased id.
///
/// Counting is keyed by the exact id, so `"A"` and `"a"` are two categories that
/// merely sort next to each other. The text of a category is the text of its
/// first record; later duplicates only bump the count.
pub fn build_histogram(responses: &[ResponseRecord]) -> Vec<HistogramEntry> {
    let mut lookup: HashMap<&str, usize> = HashMap::with_capacity(responses.len());
    let mut entries: Vec<HistogramEntry> = Vec::new();

    for response in responses {
        match lookup.get(response.answer_id.as_str()) {
            Some(&idx) => entries[idx].count += 1,
            None => {
                lookup.insert(response.answer_id.as_str(), entries.len());
                entries.push(HistogramEntry {
                    answer_id: response.answer_id.clone(),
                    answer_text: response.answer_text.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable: ids that only differ in case keep first-seen order.
    entries.sort_by_cached_key(|entry| entry.answer_id.to_lowercase());
    entries
}

/// Largest count, or `None` for an empty histogram.
pub fn max_count(histogram: &[HistogramEntry]) -> Option<u32> {
    histogram.iter().map(|entry| entry.count).max()
}
