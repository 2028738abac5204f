//! The combined category + text filter.
//!
//! Visibility is recomputed over the full rendered card set on every filter
//! change; no incremental diffing, no card removal. The two mutation points
//! are category selection and search submission; page loads never trigger a
//! recomputation, so cards appended under an active filter arrive visible
//! until the next filter event.

use super::card::Card;

/// Category shown when no category filter is active.
pub const ALL_CATEGORIES: &str = "all";

/// The filter's owned state for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Selected category, `"all"` by default.
    pub category: String,
    /// Active search term: trimmed and lowercased at submission time.
    pub search_term: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
        }
    }
}

impl FilterState {
    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    /// Normalize and store a submitted search term.
    pub fn submit_search(&mut self, raw: &str) {
        self.search_term = raw.trim().to_lowercase();
    }

    /// The visibility predicate for one card.
    pub fn matches(&self, card: &Card) -> bool {
        let category_match = self.category == ALL_CATEGORIES
            || card.category.as_deref() == Some(self.category.as_str());

        let text_match = self.search_term.is_empty()
            || card.title.to_lowercase().contains(&self.search_term);

        category_match && text_match
    }
}

/// Recompute visibility of every rendered card. Idempotent: applying twice
/// with unchanged state is the same as applying once.
pub fn apply_filters(state: &FilterState, cards: &mut [Card]) {
    for card in cards.iter_mut() {
        card.visible = state.matches(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::card::build_card;
    use crate::storage::VideoRecord;

    fn card(id: &str, category: Option<&str>, title: &str) -> Card {
        build_card(
            &VideoRecord {
                id: id.to_string(),
                title: title.to_string(),
                category: category.map(str::to_string),
                image_url: None,
                channel_name: None,
                channel_image_url: None,
                view_count: Some(1),
            },
            2,
        )
    }

    fn visible_ids(cards: &[Card]) -> Vec<&str> {
        cards
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.id.as_str())
            .collect()
    }

    #[test]
    fn test_default_state_shows_everything() {
        let mut cards = vec![card("1", Some("a"), "Cats"), card("2", Some("b"), "Dogs")];
        apply_filters(&FilterState::default(), &mut cards);
        assert_eq!(visible_ids(&cards), vec!["1", "2"]);
    }

    #[test]
    fn test_category_hides_other_categories_regardless_of_term() {
        let mut cards = vec![card("1", Some("a"), "Cats"), card("2", Some("b"), "Dogs")];

        let mut state = FilterState::default();
        state.select_category("a");
        apply_filters(&state, &mut cards);
        assert_eq!(visible_ids(&cards), vec!["1"]);

        // Even a term matching the hidden card cannot resurrect it
        state.submit_search("dogs");
        apply_filters(&state, &mut cards);
        assert!(visible_ids(&cards).is_empty());
    }

    #[test]
    fn test_search_term_with_all_categories() {
        let mut cards = vec![card("1", Some("a"), "Cats"), card("2", Some("b"), "Dogs")];

        let mut state = FilterState::default();
        state.submit_search("dog");
        apply_filters(&state, &mut cards);
        assert_eq!(visible_ids(&cards), vec!["2"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut cards = vec![card("1", Some("a"), "Deep DIVE into Rust")];

        let mut state = FilterState::default();
        state.submit_search("  DiVe ");
        assert_eq!(state.search_term, "dive");
        apply_filters(&state, &mut cards);
        assert_eq!(visible_ids(&cards), vec!["1"]);
    }

    #[test]
    fn test_empty_title_fails_text_match_under_active_term() {
        let mut cards = vec![card("1", Some("a"), "")];

        let mut state = FilterState::default();
        state.submit_search("x");
        apply_filters(&state, &mut cards);
        assert!(visible_ids(&cards).is_empty());

        // ...but an empty term shows it again
        state.submit_search("");
        apply_filters(&state, &mut cards);
        assert_eq!(visible_ids(&cards), vec!["1"]);
    }

    #[test]
    fn test_card_without_category_only_matches_all() {
        let mut cards = vec![card("1", None, "Cats")];

        let mut state = FilterState::default();
        apply_filters(&state, &mut cards);
        assert_eq!(visible_ids(&cards), vec!["1"]);

        state.select_category("a");
        apply_filters(&state, &mut cards);
        assert!(visible_ids(&cards).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut cards = vec![
            card("1", Some("a"), "Cats"),
            card("2", Some("b"), "Dogs"),
            card("3", None, "Birds"),
        ];
        let mut state = FilterState::default();
        state.select_category("b");
        state.submit_search("do");

        apply_filters(&state, &mut cards);
        let first: Vec<bool> = cards.iter().map(|c| c.visible).collect();
        apply_filters(&state, &mut cards);
        let second: Vec<bool> = cards.iter().map(|c| c.visible).collect();
        assert_eq!(first, second);
    }
}
