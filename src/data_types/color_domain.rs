use std::collections::HashMap;

/// Append-only, insertion-ordered set of category ids.
///
/// The position of an id is its palette slot, so ids are never removed or
/// reordered: a category keeps its color for the lifetime of the chart even
/// when later snapshots sort it elsewhere or drop it for a while.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorDomain {
    ids: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColorDomain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every id not seen before, in the order given.
    /// Returns how many ids were added.
    pub fn ensure<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let before = self.ids.len();
        for id in ids {
            if !self.contains(id) {
                self.index.insert(id.to_string(), self.ids.len());
                self.ids.push(id.to_string());
            }
        }
        self.ids.len() - before
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
