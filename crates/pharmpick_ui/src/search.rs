//! Search term handling, scoring and filtering.
//!
//! The raw term follows every keystroke; a debounced copy trails it and is the
//! only thing that drives filtering. Scoring per option:
//!
//! | match                                   | score |
//! |-----------------------------------------|-------|
//! | lowercase name contains lowercase term  | 3     |
//! | term characters are a subsequence       | 1     |
//! | otherwise                               | excluded |
//!
//! Results sort by score (descending), then name (ascending, case-insensitive
//! first), then id, which makes the order total and independent of the order
//! the caller supplied the options in.

use std::cmp::Ordering;

use crate::constants::{SCORE_FUZZY, SCORE_SUBSTRING};
use crate::option::{DropdownOption, OptionList};

/// Derived search status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No term
    #[default]
    Idle,
    /// The raw term has not settled into the debounced term yet
    Typing,
    /// Settled term with at least one result
    Found,
    /// Settled term with no results
    NotFound,
}

/// Score an option name against a lowercase term. `None` means excluded.
pub fn score(name: &str, term_lower: &str) -> Option<u8> {
    let name_lower = name.to_lowercase();
    if name_lower.contains(term_lower) {
        Some(SCORE_SUBSTRING)
    } else if is_subsequence(term_lower, &name_lower) {
        Some(SCORE_FUZZY)
    } else {
        None
    }
}

/// Check whether the non-whitespace characters of `needle` appear in order in `haystack`.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle
        .chars()
        .filter(|c| !c.is_whitespace())
        .all(|wanted| hay.any(|c| c == wanted))
}

fn compare_ranked(a: (u8, &DropdownOption), b: (u8, &DropdownOption)) -> Ordering {
    b.0.cmp(&a.0)
        .then_with(|| a.1.name.to_lowercase().cmp(&b.1.name.to_lowercase()))
        .then_with(|| a.1.name.cmp(&b.1.name))
        .then_with(|| a.1.id.cmp(&b.1.id))
}

/// Indices of the options matching `term`, in result order.
///
/// A blank term matches everything in caller order.
pub fn rank(options: &[DropdownOption], term: &str) -> Vec<usize> {
    let term = term.trim();
    if term.is_empty() {
        return (0..options.len()).collect();
    }

    let term_lower = term.to_lowercase();
    let mut scored: Vec<(u8, usize)> = options
        .iter()
        .enumerate()
        .filter_map(|(i, option)| score(&option.name, &term_lower).map(|s| (s, i)))
        .collect();
    scored.sort_by(|a, b| compare_ranked((a.0, &options[a.1]), (b.0, &options[b.1])));
    scored.into_iter().map(|(_, i)| i).collect()
}

/// Filter and sort options for `term`.
pub fn filter_options<'a>(options: &'a [DropdownOption], term: &str) -> Vec<&'a DropdownOption> {
    rank(options, term).into_iter().map(|i| &options[i]).collect()
}

/// Status for a settled term.
///
/// `typing_enabled` is false when neither a search box nor type-ahead is
/// available; the status logic does not otherwise care where the term came from.
pub fn derive_status(term: &str, result_count: usize, typing_enabled: bool) -> SearchStatus {
    let term_empty = term.trim().is_empty();
    if !typing_enabled && term_empty {
        SearchStatus::Idle
    } else if !term_empty {
        if result_count > 0 {
            SearchStatus::Found
        } else {
            SearchStatus::NotFound
        }
    } else {
        SearchStatus::Idle
    }
}

/// Search state of one dropdown.
#[derive(Debug, Clone, Default)]
pub struct SearchFilterEngine {
    raw: String,
    debounced: String,
    typing_enabled: bool,
    /// Indices into the current option list, in result order
    filtered: Vec<usize>,
}

impl SearchFilterEngine {
    pub fn new(typing_enabled: bool) -> Self {
        Self {
            typing_enabled,
            ..Self::default()
        }
    }

    /// Term as typed, for display in the search box.
    pub fn raw_term(&self) -> &str {
        &self.raw
    }

    /// Term that currently drives filtering.
    pub fn debounced_term(&self) -> &str {
        &self.debounced
    }

    /// True while the raw term is waiting for the debounce.
    pub fn is_pending(&self) -> bool {
        self.raw != self.debounced
    }

    /// Update the raw term. Returns true if a debounce should be (re)started.
    pub fn on_term_change(&mut self, raw: impl Into<String>) -> bool {
        self.raw = raw.into();
        self.is_pending()
    }

    /// Append a type-ahead character. Returns the new raw term.
    pub fn push_char(&mut self, c: char) -> &str {
        self.raw.push(c);
        &self.raw
    }

    /// Remove the last character of the raw term. Returns false if it was empty.
    pub fn pop_char(&mut self) -> bool {
        self.raw.pop().is_some()
    }

    /// Copy the raw term into the debounced term and refilter.
    /// Returns true if the filtered list changed.
    pub fn settle(&mut self, options: &OptionList) -> bool {
        self.debounced = self.raw.clone();
        self.refilter(options)
    }

    /// Recompute the filtered list for the debounced term (e.g. new options).
    /// Returns true if the filtered list changed.
    pub fn refilter(&mut self, options: &OptionList) -> bool {
        let next = rank(options.as_slice(), &self.debounced);
        let changed = next != self.filtered;
        self.filtered = next;
        changed
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The filtered options, resolved against the list they were computed from.
    pub fn filtered<'a>(&self, options: &'a OptionList) -> Vec<&'a DropdownOption> {
        let slice = options.as_slice();
        self.filtered.iter().filter_map(|&i| slice.get(i)).collect()
    }

    /// Option at a filtered position.
    pub fn option_at<'a>(
        &self,
        options: &'a OptionList,
        index: usize,
    ) -> Option<&'a DropdownOption> {
        self.filtered
            .get(index)
            .and_then(|&i| options.as_slice().get(i))
    }

    /// Filtered position of an option id.
    pub fn position_of(&self, options: &OptionList, id: &str) -> Option<usize> {
        let slice = options.as_slice();
        self.filtered
            .iter()
            .position(|&i| slice.get(i).is_some_and(|o| o.id == id))
    }

    pub fn status(&self) -> SearchStatus {
        if self.is_pending() {
            SearchStatus::Typing
        } else {
            derive_status(&self.debounced, self.filtered.len(), self.typing_enabled)
        }
    }

    /// Whether the empty state should offer "add new". `Typing` with zero
    /// results already computed counts the same as `NotFound`.
    pub fn offers_add_new(&self) -> bool {
        if self.raw.trim().is_empty() {
            return false;
        }
        match self.status() {
            SearchStatus::NotFound => true,
            SearchStatus::Typing => self.filtered.is_empty(),
            SearchStatus::Idle | SearchStatus::Found => false,
        }
    }

    /// Clear both terms and show every option again.
    pub fn reset(&mut self, options: &OptionList) {
        self.raw.clear();
        self.debounced.clear();
        self.refilter(options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn meds() -> OptionList {
        OptionList::new(vec![
            DropdownOption::new("1", "Paracetamol"),
            DropdownOption::new("2", "Amoxicillin"),
        ])
        .unwrap()
    }

    fn names(options: &[&DropdownOption]) -> Vec<String> {
        options.iter().map(|o| o.name.clone()).collect()
    }

    #[test]
    fn test_substring_beats_fuzzy() {
        assert_eq!(score("Paracetamol", "para"), Some(3));
        assert_eq!(score("Paracetamol", "pcm"), Some(1));
        assert_eq!(score("Paracetamol", "zzz"), None);
    }

    #[test]
    fn test_subsequence_ignores_whitespace_in_term() {
        assert!(is_subsequence("am ox", "amoxicillin"));
        assert!(!is_subsequence("xo", "amoxicillin"));
        assert!(is_subsequence("", "anything"));
    }

    #[test]
    fn test_para_finds_paracetamol() {
        let list = meds();
        let mut engine = SearchFilterEngine::new(true);
        engine.on_term_change("para");
        engine.settle(&list);
        let filtered = engine.filtered(&list);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
        assert_eq!(engine.status(), SearchStatus::Found);
    }

    #[test]
    fn test_zzz_not_found() {
        let list = meds();
        let mut engine = SearchFilterEngine::new(true);
        engine.on_term_change("zzz");
        engine.settle(&list);
        assert!(engine.filtered(&list).is_empty());
        assert_eq!(engine.status(), SearchStatus::NotFound);
        assert!(engine.offers_add_new());
    }

    #[test]
    fn test_typing_until_settled() {
        let list = meds();
        let mut engine = SearchFilterEngine::new(true);
        engine.settle(&list);
        assert!(engine.on_term_change("amo"));
        assert_eq!(engine.status(), SearchStatus::Typing);
        // Filtering still reflects the old (empty) debounced term
        assert_eq!(engine.filtered_len(), 2);
        engine.settle(&list);
        assert_eq!(engine.status(), SearchStatus::Found);
        assert_eq!(engine.filtered_len(), 1);
    }

    #[test]
    fn test_typing_with_zero_results_offers_add_new() {
        let list = meds();
        let mut engine = SearchFilterEngine::new(true);
        engine.on_term_change("zzz");
        engine.settle(&list);
        engine.on_term_change("zzzz");
        assert_eq!(engine.status(), SearchStatus::Typing);
        assert!(engine.offers_add_new());
    }

    #[test]
    fn test_blank_term_never_offers_add_new() {
        let list = meds();
        let mut engine = SearchFilterEngine::new(true);
        engine.on_term_change("   ");
        engine.settle(&list);
        assert_eq!(engine.status(), SearchStatus::Idle);
        assert!(!engine.offers_add_new());
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(derive_status("", 3, false), SearchStatus::Idle);
        assert_eq!(derive_status("", 3, true), SearchStatus::Idle);
        assert_eq!(derive_status("a", 3, false), SearchStatus::Found);
        assert_eq!(derive_status("a", 0, true), SearchStatus::NotFound);
    }

    #[test]
    fn test_sort_score_then_name_then_id() {
        let options = vec![
            DropdownOption::new("a", "Cetirizine"),
            DropdownOption::new("b", "cefalexin"),
            DropdownOption::new("c", "Ceftriaxone"),
            DropdownOption::new("d", "Clotrimazole"),
            DropdownOption::new("e", "Cefalexin"),
        ];
        let result = filter_options(&options, "ce");
        assert_eq!(
            names(&result),
            vec!["Cefalexin", "cefalexin", "Ceftriaxone", "Cetirizine", "Clotrimazole"]
        );
        // Clotrimazole only matches as a subsequence, so it sorts last
        assert_eq!(result.last().map(|o| o.id.as_str()), Some("d"));
    }

    #[test]
    fn test_blank_term_keeps_caller_order() {
        let list = meds();
        assert_eq!(rank(list.as_slice(), "  "), vec![0, 1]);
    }

    #[test]
    fn test_position_lookup_and_reset() {
        let list = meds();
        let mut engine = SearchFilterEngine::new(false);
        engine.settle(&list);
        assert_eq!(engine.position_of(&list, "2"), Some(1));
        for c in "amox".chars() {
            engine.push_char(c);
        }
        engine.settle(&list);
        assert_eq!(engine.position_of(&list, "2"), Some(0));
        assert_eq!(engine.position_of(&list, "1"), None);
        engine.reset(&list);
        assert_eq!(engine.raw_term(), "");
        assert_eq!(engine.filtered_len(), 2);
        assert_eq!(engine.status(), SearchStatus::Idle);
    }

    /// Names from a tiny alphabet so matches, ties and case variants are common.
    fn arb_options() -> impl Strategy<Value = Vec<DropdownOption>> {
        prop::collection::vec("[a-cA-C ]{0,6}", 0..12).prop_map(|names| {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| DropdownOption::new(format!("o{i:02}"), name))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_filter_is_idempotent(options in arb_options(), term in "[a-cA-C ]{0,3}") {
            let once: Vec<DropdownOption> =
                filter_options(&options, &term).into_iter().cloned().collect();
            let twice: Vec<DropdownOption> =
                filter_options(&once, &term).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_results_strictly_ordered_and_complete(
            options in arb_options(),
            term in "[a-cA-C ]{0,3}",
        ) {
            let result = filter_options(&options, &term);
            let term_lower = term.trim().to_lowercase();
            if term_lower.is_empty() {
                prop_assert_eq!(result.len(), options.len());
            } else {
                let matching = options
                    .iter()
                    .filter(|o| score(&o.name, &term_lower).is_some())
                    .count();
                prop_assert_eq!(result.len(), matching);
                for pair in result.windows(2) {
                    let a = (score(&pair[0].name, &term_lower).unwrap_or(0), pair[0]);
                    let b = (score(&pair[1].name, &term_lower).unwrap_or(0), pair[1]);
                    prop_assert_eq!(compare_ranked(a, b), Ordering::Less);
                }
            }
        }

        #[test]
        fn test_order_independent_of_input_permutation(
            (options, shuffled) in arb_options()
                .prop_flat_map(|options| (Just(options.clone()), Just(options).prop_shuffle())),
            term in "[a-cA-C]{1,3}",
        ) {
            let ids = |opts: &[DropdownOption]| -> Vec<String> {
                filter_options(opts, &term).iter().map(|o| o.id.clone()).collect()
            };
            prop_assert_eq!(ids(&options), ids(&shuffled));
        }
    }
}
