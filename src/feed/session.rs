use std::collections::BTreeSet;
use uuid::Uuid;

use super::filter::filter_by_tags;
use super::gesture::{interpret_drag, SwipeOutcome};
use crate::state::data::Recipe;
use crate::state::favorites::FavoritesLedger;

/// A like/dislike decision on one card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Like,
    Dislike,
}

impl SwipeOutcome {
    /// The decision a drag commits to, `None` for a cancelled drag
    pub fn choice(self) -> Option<Choice> {
        match self {
            SwipeOutcome::Like => Some(Choice::Like),
            SwipeOutcome::Dislike => Some(Choice::Dislike),
            SwipeOutcome::Cancel => None,
        }
    }
}

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Showing the card at this index
    Active(usize),
    /// Every card has been decided
    Exhausted,
}

/// One recorded decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub recipe_id: Uuid,
    pub choice: Choice,
}

/// Single pass over a tag-filtered deck, one card at a time.
///
/// There is no going back. The only way out of `Exhausted` is a new
/// filter, which rebuilds the deck from the full source and starts over.
#[derive(Debug, Clone)]
pub struct SwipeSession {
    cards: Vec<Recipe>,
    position: usize,
    selected: BTreeSet<String>,
    decisions: Vec<Decision>,
}

impl SwipeSession {
    /// Start a session over the recipes in `source` matching `selected`
    pub fn new<'a>(
        source: impl IntoIterator<Item = &'a Recipe>,
        selected: BTreeSet<String>,
    ) -> Self {
        let mut session = Self {
            cards: Vec::new(),
            position: 0,
            selected: BTreeSet::new(),
            decisions: Vec::new(),
        };
        session.set_filter(source, selected);
        session
    }

    /// Replace the tag selection and start a fresh session, even if the
    /// selection or the resulting deck is unchanged. Tags are trimmed and
    /// blank ones dropped, since no recipe can carry a blank tag.
    pub fn set_filter<'a>(
        &mut self,
        source: impl IntoIterator<Item = &'a Recipe>,
        selected: BTreeSet<String>,
    ) {
        let selected: BTreeSet<String> = selected
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.cards = filter_by_tags(source, &selected)
            .into_iter()
            .cloned()
            .collect();
        self.selected = selected;
        self.position = 0;
        self.decisions.clear();

        tracing::debug!(
            "New swipe session: {} cards for tags {:?}",
            self.cards.len(),
            self.selected
        );
    }

    /// Add the tag if absent, remove it if present, then restart.
    /// A blank tag changes nothing.
    pub fn toggle_tag<'a>(&mut self, source: impl IntoIterator<Item = &'a Recipe>, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        let mut selected = self.selected.clone();
        if !selected.remove(tag) {
            selected.insert(tag.to_string());
        }
        self.set_filter(source, selected);
    }

    /// The card on top, `None` once exhausted
    pub fn current(&self) -> Option<&Recipe> {
        self.cards.get(self.position)
    }

    pub fn state(&self) -> SessionState {
        if self.position < self.cards.len() {
            SessionState::Active(self.position)
        } else {
            SessionState::Exhausted
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == SessionState::Exhausted
    }

    /// Cards not yet decided, including the current one
    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Size of the filtered deck
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Decisions made in this session, oldest first
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Decide on the current card and advance. A like goes into the
    /// favorites ledger. Deciding on an exhausted session does nothing.
    pub fn decide(&mut self, choice: Choice, favorites: &mut FavoritesLedger) -> Option<Decision> {
        let recipe = self.cards.get(self.position)?;

        if choice == Choice::Like {
            favorites.add(recipe);
        }

        let decision = Decision {
            recipe_id: recipe.id(),
            choice,
        };
        tracing::debug!("{:?} '{}'", choice, recipe.title());

        self.decisions.push(decision);
        self.position += 1;
        Some(decision)
    }

    /// Feed a released drag through `interpret_drag`. A cancelled drag
    /// leaves the session untouched.
    pub fn apply_drag(
        &mut self,
        dx: f32,
        threshold: f32,
        favorites: &mut FavoritesLedger,
    ) -> Option<Decision> {
        let choice = interpret_drag(dx, threshold).choice()?;
        self.decide(choice, favorites)
    }
}
