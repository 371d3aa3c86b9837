//! State for the address autocomplete dropdown.
//!
//! The frontend hook owns the timer and the fetch; this type owns what the
//! dropdown shows and how the keyboard moves through it.

use shared::{AddressSuggestion, CalculatorConfig};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutocompleteState {
    pub query: String,
    pub suggestions: Vec<AddressSuggestion>,
    pub highlighted: Option<usize>,
    pub open: bool,
    min_chars: usize,
}

impl AutocompleteState {
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            min_chars: config.autocomplete_min_chars,
            ..Self::default()
        }
    }

    /// Record new input. Returns the query to fetch, or `None` when the
    /// input is too short to search and the list has been cleared.
    pub fn set_query(&mut self, input: &str) -> Option<String> {
        self.query = input.to_string();
        let trimmed = input.trim();
        if trimmed.chars().count() < self.min_chars {
            self.clear();
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Apply a response; answers for a query the user has since changed are dropped
    pub fn receive(&mut self, for_query: &str, suggestions: Vec<AddressSuggestion>) -> bool {
        if self.query.trim() != for_query {
            return false;
        }
        self.open = !suggestions.is_empty();
        self.suggestions = suggestions;
        self.highlighted = None;
        true
    }

    pub fn highlight_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.open = true;
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.suggestions.len() => i + 1,
            _ => 0,
        });
    }

    pub fn highlight_previous(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.open = true;
        let last = self.suggestions.len() - 1;
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Pick the highlighted entry (Enter key)
    pub fn select_highlighted(&mut self) -> Option<AddressSuggestion> {
        let index = self.highlighted?;
        self.select(index)
    }

    /// Pick an entry by index (mouse click); fills the query and closes
    pub fn select(&mut self, index: usize) -> Option<AddressSuggestion> {
        let chosen = self.suggestions.get(index).cloned()?;
        self.query = chosen.address.clone();
        self.clear();
        Some(chosen)
    }

    /// Hide the list (Escape key, blur)
    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    fn clear(&mut self) {
        self.suggestions.clear();
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(address: &str) -> AddressSuggestion {
        AddressSuggestion {
            address: address.to_string(),
            place_id: None,
        }
    }

    fn loaded_state() -> AutocompleteState {
        let mut state = AutocompleteState::new();
        let query = state.set_query("12 El").unwrap();
        state.receive(
            &query,
            vec![suggestion("12 Elm Street"), suggestion("12 Elder Road"), suggestion("12 Elk Lane")],
        );
        state
    }

    #[test]
    fn test_short_query_does_not_fetch() {
        let mut state = AutocompleteState::new();
        assert_eq!(state.set_query("12"), None);
        assert_eq!(state.set_query("  12  "), None);
        assert_eq!(state.set_query("12 E"), Some("12 E".to_string()));
    }

    #[test]
    fn test_short_query_clears_list() {
        let mut state = loaded_state();
        assert!(state.open);

        state.set_query("1");
        assert!(state.suggestions.is_empty());
        assert!(!state.open);
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = AutocompleteState::new();
        state.set_query("12 Elm");
        state.set_query("12 Elm St");

        assert!(!state.receive("12 Elm", vec![suggestion("12 Elm Court")]));
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_keyboard_navigation_wraps() {
        let mut state = loaded_state();

        state.highlight_next();
        assert_eq!(state.highlighted, Some(0));
        state.highlight_previous();
        assert_eq!(state.highlighted, Some(2));
        state.highlight_next();
        assert_eq!(state.highlighted, Some(0));
    }

    #[test]
    fn test_select_highlighted_fills_query() {
        let mut state = loaded_state();
        state.highlight_next();
        state.highlight_next();

        let chosen = state.select_highlighted().unwrap();
        assert_eq!(chosen.address, "12 Elder Road");
        assert_eq!(state.query, "12 Elder Road");
        assert!(!state.open);
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_close_keeps_suggestions() {
        let mut state = loaded_state();
        state.close();
        assert!(!state.open);
        assert_eq!(state.suggestions.len(), 3);
        assert_eq!(state.select_highlighted(), None);
    }

    #[test]
    fn test_empty_response_stays_closed() {
        let mut state = AutocompleteState::new();
        let query = state.set_query("zzz zz").unwrap();
        assert!(state.receive(&query, vec![]));
        assert!(!state.open);
    }
}
