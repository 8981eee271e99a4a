use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Literal option meaning "no restriction" in category pickers.
pub const ALL_OPTION: &str = "All";

/// Category membership predicate.
///
/// An empty selection means select-all, not select-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySelection(BTreeSet<String>);

impl CategorySelection {
    /// Selection that lets every row through.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to the given values. Blank entries are ignored and an
    /// `"All"` entry (any case) lifts the restriction entirely.
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = BTreeSet::new();
        for value in values {
            let value = value.as_ref().trim();
            if value.eq_ignore_ascii_case(ALL_OPTION) {
                return Self::any();
            }
            if !value.is_empty() {
                selected.insert(value.to_string());
            }
        }
        Self(selected)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether a row value passes. Absent values only pass an unrestricted
    /// selection.
    pub fn allows(&self, value: Option<&str>) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        value.is_some_and(|v| self.0.contains(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_allows_everything() {
        let any = CategorySelection::any();
        assert!(any.allows(Some("Cafe")));
        assert!(any.allows(None));
        assert!(CategorySelection::only(Vec::<String>::new()).is_unrestricted());
    }

    #[test]
    fn test_all_option_lifts_restriction() {
        assert!(CategorySelection::only(["Cafe", "all"]).is_unrestricted());
        assert!(CategorySelection::only(["All"]).is_unrestricted());
    }

    #[test]
    fn test_membership() {
        let cafes = CategorySelection::only(["Cafe", " Bar ", ""]);
        assert!(cafes.allows(Some("Cafe")));
        assert!(cafes.allows(Some("Bar")));
        assert!(!cafes.allows(Some("Buffet")));
        assert!(!cafes.allows(None));
        assert_eq!(cafes.values().collect::<Vec<_>>(), vec!["Bar", "Cafe"]);
    }
}
