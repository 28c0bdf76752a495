// src/state/selection.rs
use std::collections::BTreeSet;

/// A set of opaque ids with toggle semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and returns whether `id` is now present.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn insert(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { ids: iter.into_iter().map(Into::into).collect() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    Multi,
    /// At most one id; choosing the active id again clears it.
    Single,
}

/// Selection plus expand/collapse for a list of cards.
///
/// The two sets never touch each other: collapsing keeps the selection and
/// selecting leaves the expansion alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionModel {
    policy: SelectionPolicy,
    selected: SelectionSet,
    expanded: SelectionSet,
}

impl SelectionModel {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy, selected: SelectionSet::new(), expanded: SelectionSet::new() }
    }

    pub fn multi() -> Self {
        Self::new(SelectionPolicy::Multi)
    }

    pub fn single() -> Self {
        Self::new(SelectionPolicy::Single)
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.policy {
            SelectionPolicy::Multi => self.selected.toggle(id),
            SelectionPolicy::Single => {
                let was_active = self.selected.contains(id);
                self.selected.clear();
                if !was_active {
                    self.selected.insert(id);
                }
                !was_active
            }
        }
    }

    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        self.expanded.toggle(id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    /// The single active id. Under the multi policy, the first in order.
    pub fn active(&self) -> Option<&str> {
        self.selected.iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_select_replaces_then_clears() {
        let mut model = SelectionModel::single();
        assert!(model.toggle("a"));
        assert!(model.toggle("b"));
        assert!(!model.is_selected("a"));
        assert_eq!(model.active(), Some("b"));

        assert!(!model.toggle("b"));
        assert!(model.selected().is_empty());
    }

    #[test]
    fn multi_select_is_independent_per_id() {
        let mut model = SelectionModel::multi();
        model.toggle("a");
        model.toggle("b");
        model.toggle("a");
        assert!(!model.is_selected("a"));
        assert!(model.is_selected("b"));
    }

    #[test]
    fn expansion_and_selection_do_not_interact() {
        let mut model = SelectionModel::multi();
        model.toggle("card");
        model.toggle_expanded("card");
        model.toggle_expanded("card");
        assert!(model.is_selected("card"));
        assert!(!model.is_expanded("card"));

        model.toggle_expanded("other");
        model.toggle("other");
        model.toggle("other");
        assert!(model.is_expanded("other"));
    }

    proptest! {
        #[test]
        fn membership_follows_toggle_parity(ops in prop::collection::vec(0usize..4, 0..64)) {
            let ids = ["a", "b", "c", "d"];
            let mut set = SelectionSet::new();
            for &i in &ops {
                set.toggle(ids[i]);
            }
            for (i, id) in ids.iter().enumerate() {
                let toggles = ops.iter().filter(|&&op| op == i).count();
                prop_assert_eq!(set.contains(id), toggles % 2 == 1);
            }
        }

        #[test]
        fn single_policy_never_holds_two(ops in prop::collection::vec(0usize..4, 0..64)) {
            let ids = ["a", "b", "c", "d"];
            let mut model = SelectionModel::single();
            for &i in &ops {
                model.toggle(ids[i]);
                prop_assert!(model.selected().len() <= 1);
            }
        }
    }
}
