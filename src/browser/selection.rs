use crate::api::models::{Recipe, RecipeId};
use crate::{Error, Result};
use std::str::FromStr;
use tracing::debug;

/// What happens to the selection when a load replaces the item set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Drop the selection once its id is absent from the new items.
    #[default]
    ClearMissing,
    /// Keep the selection (and its recipe copy) whatever the new items are.
    Retain,
}

impl FromStr for SelectionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "clear-missing" | "clear_missing" | "clear" => Ok(SelectionPolicy::ClearMissing),
            "retain" | "keep" => Ok(SelectionPolicy::Retain),
            other => Err(Error::Validation(format!(
                "Unknown selection policy: {other}. Must be clear-missing or retain"
            ))),
        }
    }
}

/// The focused recipe for the detail panel and whether its secondary fields
/// (cook and prep time) are shown.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    policy: SelectionPolicy,
    selected: Option<Recipe>,
    expanded: bool,
}

impl SelectionState {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            selected: None,
            expanded: false,
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn selected(&self) -> Option<&Recipe> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<RecipeId> {
        self.selected.as_ref().map(|r| r.id)
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Focus a recipe. Expansion never carries over to a new selection.
    pub fn select(&mut self, recipe: &Recipe) {
        self.selected = Some(recipe.clone());
        self.expanded = false;
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.expanded = false;
    }

    /// Flip expansion. Returns `false` without effect when nothing is selected.
    pub fn toggle_expanded(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.expanded = !self.expanded;
        true
    }

    /// Apply the reconciliation policy after the item set was replaced.
    pub fn reconcile(&mut self, items: &[Recipe]) {
        let Some(id) = self.selected_id() else {
            return;
        };

        match self.policy {
            SelectionPolicy::Retain => {}
            SelectionPolicy::ClearMissing => {
                if !items.iter().any(|r| r.id == id) {
                    debug!("Selected recipe {} left the item set, clearing selection", id);
                    self.deselect();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: RecipeId) -> Recipe {
        serde_json::from_value(serde_json::json!({"id": id, "title": format!("Recipe {id}")}))
            .unwrap()
    }

    #[test]
    fn test_new_selection_collapses_expansion() {
        let mut state = SelectionState::default();
        state.select(&recipe(1));
        assert!(state.toggle_expanded());
        assert!(state.expanded());

        state.select(&recipe(2));
        assert_eq!(state.selected_id(), Some(2));
        assert!(!state.expanded());
    }

    #[test]
    fn test_toggle_requires_selection() {
        let mut state = SelectionState::default();
        assert!(!state.toggle_expanded());
        assert!(!state.expanded());
    }

    #[test]
    fn test_deselect_clears_everything() {
        let mut state = SelectionState::default();
        state.select(&recipe(1));
        state.toggle_expanded();
        state.deselect();
        assert!(state.selected().is_none());
        assert!(!state.expanded());
    }

    #[test]
    fn test_clear_missing_policy() {
        let mut state = SelectionState::new(SelectionPolicy::ClearMissing);
        state.select(&recipe(1));
        state.toggle_expanded();

        state.reconcile(&[recipe(1), recipe(2)]);
        assert_eq!(state.selected_id(), Some(1));
        assert!(state.expanded());

        state.reconcile(&[recipe(3)]);
        assert!(state.selected().is_none());
        assert!(!state.expanded());
    }

    #[test]
    fn test_retain_policy_keeps_stale_selection() {
        let mut state = SelectionState::new(SelectionPolicy::Retain);
        state.select(&recipe(1));
        state.reconcile(&[]);
        assert_eq!(state.selected_id(), Some(1));
        assert_eq!(state.selected().unwrap().title, "Recipe 1");
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "retain".parse::<SelectionPolicy>().unwrap(),
            SelectionPolicy::Retain
        );
        assert_eq!(
            "clear-missing".parse::<SelectionPolicy>().unwrap(),
            SelectionPolicy::ClearMissing
        );
        assert!("sometimes".parse::<SelectionPolicy>().is_err());
    }
}
