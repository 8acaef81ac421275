//! Option data and selection values supplied by the caller.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::DropdownError;

/// A selectable entry (medicine, supplier, category, user...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Unique, stable key
    pub id: String,
    /// Display label, also what the search scores against
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl DropdownOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: None,
            description: None,
            updated_at: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }
}

/// An ordered sequence of options with unique, non-empty ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    options: Vec<DropdownOption>,
}

impl OptionList {
    /// Build a list, rejecting empty or duplicate ids.
    pub fn new(options: Vec<DropdownOption>) -> Result<Self, DropdownError> {
        let mut seen = HashSet::with_capacity(options.len());
        for (position, option) in options.iter().enumerate() {
            if option.id.is_empty() {
                return Err(DropdownError::EmptyOptionId { position });
            }
            if !seen.insert(option.id.as_str()) {
                return Err(DropdownError::duplicate_option_id(&option.id));
            }
        }
        Ok(Self { options })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DropdownOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DropdownOption> {
        self.options.iter()
    }
}

/// The caller-owned selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionValue {
    /// Single-select: at most one id
    Single(Option<String>),
    /// Multi-select (checkbox mode): a set of ids
    Multiple(BTreeSet<String>),
}

impl Default for SelectionValue {
    fn default() -> Self {
        SelectionValue::Single(None)
    }
}

impl SelectionValue {
    pub fn single(id: impl Into<String>) -> Self {
        SelectionValue::Single(Some(id.into()))
    }

    pub fn none() -> Self {
        SelectionValue::Single(None)
    }

    pub fn multiple<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectionValue::Multiple(ids.into_iter().map(Into::into).collect())
    }

    /// Check whether an option id is part of the selection.
    pub fn contains(&self, id: &str) -> bool {
        match self {
            SelectionValue::Single(selected) => selected.as_deref() == Some(id),
            SelectionValue::Multiple(set) => set.contains(id),
        }
    }

    /// True when nothing is selected (what required-field validation checks).
    pub fn is_empty(&self) -> bool {
        match self {
            SelectionValue::Single(selected) => selected.as_deref().is_none_or(str::is_empty),
            SelectionValue::Multiple(set) => set.is_empty(),
        }
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        match self {
            SelectionValue::Single(selected) => usize::from(selected.is_some()),
            SelectionValue::Multiple(set) => set.len(),
        }
    }

    /// Value produced by picking `id`: replaces a single selection, toggles
    /// membership in a multi-selection.
    pub fn with_toggled(&self, id: &str) -> SelectionValue {
        match self {
            SelectionValue::Single(_) => SelectionValue::single(id),
            SelectionValue::Multiple(set) => {
                let mut next = set.clone();
                if !next.remove(id) {
                    next.insert(id.to_string());
                }
                SelectionValue::Multiple(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_list_rejects_duplicates() {
        let err = OptionList::new(vec![
            DropdownOption::new("1", "Paracetamol"),
            DropdownOption::new("1", "Ibuprofen"),
        ])
        .unwrap_err();
        assert_eq!(err, DropdownError::duplicate_option_id("1"));
    }

    #[test]
    fn test_option_list_rejects_empty_id() {
        let err = OptionList::new(vec![
            DropdownOption::new("1", "Paracetamol"),
            DropdownOption::new("", "Nameless"),
        ])
        .unwrap_err();
        assert_eq!(err, DropdownError::EmptyOptionId { position: 1 });
    }

    #[test]
    fn test_option_list_lookup() {
        let list = OptionList::new(vec![
            DropdownOption::new("1", "Paracetamol").with_code("PCM-500"),
            DropdownOption::new("2", "Amoxicillin"),
        ])
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("1").and_then(|o| o.code.as_deref()), Some("PCM-500"));
        assert!(list.get("3").is_none());
    }

    #[test]
    fn test_option_deserializes_without_optional_fields() {
        let option: DropdownOption =
            serde_json::from_str(r#"{"id":"7","name":"Cetirizine"}"#).unwrap();
        assert_eq!(option, DropdownOption::new("7", "Cetirizine"));
    }

    #[test]
    fn test_single_selection() {
        let value = SelectionValue::single("2");
        assert!(value.contains("2"));
        assert!(!value.contains("1"));
        assert!(!value.is_empty());
        assert_eq!(value.with_toggled("1"), SelectionValue::single("1"));
        assert!(SelectionValue::none().is_empty());
        assert!(SelectionValue::Single(Some(String::new())).is_empty());
    }

    #[test]
    fn test_multiple_selection_toggles() {
        let value = SelectionValue::multiple(["1", "2"]);
        assert_eq!(value.len(), 2);
        assert_eq!(value.with_toggled("2"), SelectionValue::multiple(["1"]));
        assert_eq!(
            value.with_toggled("3"),
            SelectionValue::multiple(["1", "2", "3"])
        );
        assert!(SelectionValue::multiple(Vec::<String>::new()).is_empty());
    }
}
