//! ARIA attributes for the trigger, the list, its rows and the search box.
//!
//! Element ids are stable: the list is always `dropdown-options-list` and each
//! row is `dropdown-option-<option id>`.

use crate::constants::{OPTIONS_LIST_ID, OPTION_ID_PREFIX};

/// Element id of the row for `option_id`.
pub fn option_element_id(option_id: &str) -> String {
    format!("{}{}", OPTION_ID_PREFIX, option_id)
}

/// Attributes of one rendered element, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AriaAttributes {
    attrs: Vec<(&'static str, String)>,
}

impl AriaAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    fn with_flag(self, name: &'static str, value: bool) -> Self {
        self.with(name, if value { "true" } else { "false" })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attrs.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn trigger(expanded: bool) -> Self {
        Self::new()
            .with("role", "button")
            .with("aria-haspopup", "listbox")
            .with_flag("aria-expanded", expanded)
            .with("aria-controls", OPTIONS_LIST_ID)
    }

    pub fn listbox(multiselectable: bool) -> Self {
        let attrs = Self::new()
            .with("role", "listbox")
            .with("id", OPTIONS_LIST_ID);
        if multiselectable {
            attrs.with_flag("aria-multiselectable", true)
        } else {
            attrs
        }
    }

    pub fn option(option_id: &str, selected: bool) -> Self {
        Self::new()
            .with("role", "option")
            .with("id", option_element_id(option_id))
            .with_flag("aria-selected", selected)
    }

    /// Search box; `active` is the highlighted option id, if any.
    pub fn search_input(active: Option<&str>) -> Self {
        let attrs = Self::new()
            .with("role", "combobox")
            .with("aria-controls", OPTIONS_LIST_ID)
            .with("aria-autocomplete", "list");
        match active {
            Some(id) => attrs.with("aria-activedescendant", option_element_id(id)),
            None => attrs,
        }
    }
}
