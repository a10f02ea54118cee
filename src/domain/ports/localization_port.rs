/// Port for localized user-facing strings.
pub trait LocalizationPort: Send + Sync {
    /// Returns the localized string for a key, or the key itself when unknown.
    fn translate(&self, key: &str) -> String;
}
