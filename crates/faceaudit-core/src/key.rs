/// Case-folded comparison key for person names and filenames.
///
/// Built only through [`FoldedKey::new`], so every lookup map in the crate
/// folds its keys the same way. The folded text is never shown to users;
/// display code keeps the original spelling alongside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoldedKey(String);

impl FoldedKey {
    /// Fold `raw` with a full-string lowercase transform (no locale rules).
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
