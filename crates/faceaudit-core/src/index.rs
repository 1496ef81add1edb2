//! Case-insensitive name index with one canonical spelling per key.

use crate::key::FoldedKey;
use std::collections::HashMap;

/// Lookup from folded name to the spelling shown to the user.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_key: HashMap<FoldedKey, String>,
    sorted: Vec<String>,
}

impl NameIndex {
    /// Index `names` in order, skipping empty entries.
    ///
    /// When several spellings fold to the same key, the one seen first in
    /// `names` becomes canonical. Later spellings never replace it.
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let by_key = names
            .into_iter()
            .filter(|name| !name.as_ref().is_empty())
            .fold(HashMap::new(), |mut acc, name| {
                let name = name.as_ref();
                acc.entry(FoldedKey::new(name))
                    .or_insert_with(|| name.to_string());
                acc
            });

        let mut sorted: Vec<String> = by_key.values().cloned().collect();
        sorted.sort();

        Self { by_key, sorted }
    }

    /// Canonical spelling for any casing of `raw`.
    pub fn canonical(&self, raw: &str) -> Option<&str> {
        self.by_key.get(&FoldedKey::new(raw)).map(String::as_str)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.by_key.contains_key(&FoldedKey::new(raw))
    }

    /// Canonical spellings, sorted case-sensitively.
    pub fn names(&self) -> &[String] {
        &self.sorted
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}
