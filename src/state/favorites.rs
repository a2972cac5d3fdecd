//! Favorites ledger
//!
//! The single authority for "liked" state. Membership is by recipe id,
//! so adding the same recipe twice keeps one entry. A ledger may be backed
//! by a file of ids; the file is rewritten after every change.
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::data::Recipe;
use super::library::{read_json, write_json_atomic};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct FavoritesLedger {
    favorites: Vec<Recipe>,
    path: Option<PathBuf>,
}

impl FavoritesLedger {
    /// Ledger that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Ledger backed by `path`. Saved ids are matched against `catalog`;
    /// ids with no matching recipe are dropped. A missing or corrupt file
    /// starts an empty ledger.
    pub fn open<'a>(
        path: impl Into<PathBuf>,
        catalog: impl IntoIterator<Item = &'a Recipe>,
    ) -> Self {
        let path = path.into();
        let ids = load_ids(&path);

        let mut favorites: Vec<Recipe> = Vec::with_capacity(ids.len());
        let catalog: Vec<&Recipe> = catalog.into_iter().collect();
        for id in &ids {
            match catalog.iter().find(|r| r.id() == *id) {
                Some(recipe) if !favorites.iter().any(|f| f.id() == *id) => {
                    favorites.push((*recipe).clone())
                }
                Some(_) => {}
                None => tracing::debug!("Dropping favorite {} with no matching recipe", id),
            }
        }

        tracing::info!("❤️  Loaded {} favorites from {}", favorites.len(), path.display());

        Self {
            favorites,
            path: Some(path),
        }
    }

    /// Add a recipe unless one with the same id is already present.
    /// Returns true if it was added.
    pub fn add(&mut self, recipe: &Recipe) -> bool {
        if self.is_favorited(recipe) {
            return false;
        }
        self.favorites.push(recipe.clone());
        self.save();
        true
    }

    /// Remove every entry with the recipe's id. Returns true if any was removed.
    pub fn remove(&mut self, recipe: &Recipe) -> bool {
        self.remove_id(recipe.id())
    }

    /// Remove by id, e.g. after the recipe itself was deleted
    pub fn remove_id(&mut self, id: Uuid) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id() != id);
        let removed = self.favorites.len() != before;
        if removed {
            self.save();
        }
        removed
    }

    /// Flip favorite state; returns the new state
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        if self.is_favorited(recipe) {
            self.remove(recipe);
            false
        } else {
            self.add(recipe);
            true
        }
    }

    pub fn is_favorited(&self, recipe: &Recipe) -> bool {
        self.contains_id(recipe.id())
    }

    pub fn contains_id(&self, id: Uuid) -> bool {
        self.favorites.iter().any(|f| f.id() == id)
    }

    /// Favorites in the order they were liked
    pub fn recipes(&self) -> &[Recipe] {
        &self.favorites
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.favorites.iter().map(|f| f.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Write the id list if this ledger has a backing file
    fn save(&self) {
        let Some(path) = &self.path else { return };
        if let Err(e) = write_json_atomic(path, &self.ids()) {
            tracing::warn!("⚠️  Could not save favorites to {}: {}", path.display(), e);
        }
    }
}

fn load_ids(path: &Path) -> Vec<Uuid> {
    if !path.exists() {
        return Vec::new();
    }
    let loaded: Result<Vec<Uuid>> = read_json(path);
    loaded.unwrap_or_else(|e| {
        tracing::warn!("⚠️  Ignoring unreadable favorites file {}: {}", path.display(), e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::NewRecipe;
    use crate::state::seed::seed_recipes;
    use tempfile::TempDir;

    fn recipe(title: &str) -> Recipe {
        Recipe::create(NewRecipe::new(title, vec![1])).unwrap()
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut ledger = FavoritesLedger::in_memory();
        let r = recipe("Pie");

        assert!(ledger.add(&r));
        assert!(!ledger.add(&r));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.is_favorited(&r));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut ledger = FavoritesLedger::in_memory();
        let r = recipe("Pie");
        ledger.add(&r);

        assert!(ledger.remove(&r));
        assert!(!ledger.remove(&r));
        assert!(ledger.is_empty());
        assert!(!ledger.is_favorited(&r));
    }

    #[test]
    fn test_membership_is_by_id_not_title() {
        let mut ledger = FavoritesLedger::in_memory();
        let a = recipe("Pie");
        let b = recipe("Pie");
        ledger.add(&a);

        assert!(!ledger.is_favorited(&b));
        ledger.add(&b);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_toggle() {
        let mut ledger = FavoritesLedger::in_memory();
        let r = recipe("Cake");
        assert!(ledger.toggle(&r));
        assert!(!ledger.toggle(&r));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_keeps_like_order() {
        let mut ledger = FavoritesLedger::in_memory();
        let seeds = seed_recipes();
        ledger.add(&seeds[2]);
        ledger.add(&seeds[0]);
        assert_eq!(ledger.ids(), vec![seeds[2].id(), seeds[0].id()]);
    }

    #[test]
    fn test_file_backed_ledger_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");
        let seeds = seed_recipes();

        let mut ledger = FavoritesLedger::open(&path, &seeds);
        ledger.add(&seeds[1]);
        ledger.add(&seeds[0]);

        let reopened = FavoritesLedger::open(&path, &seeds);
        assert_eq!(reopened.ids(), vec![seeds[1].id(), seeds[0].id()]);
    }

    #[test]
    fn test_remove_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");
        let seeds = seed_recipes();

        let mut ledger = FavoritesLedger::open(&path, &seeds);
        ledger.add(&seeds[0]);
        ledger.add(&seeds[1]);
        assert!(ledger.remove(&seeds[0]));

        let reopened = FavoritesLedger::open(&path, &seeds);
        assert_eq!(reopened.ids(), vec![seeds[1].id()]);
    }

    #[test]
    fn test_unknown_ids_are_dropped_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");
        let seeds = seed_recipes();
        let gone = Uuid::new_v4();
        write_json_atomic(&path, &vec![gone, seeds[0].id(), seeds[0].id()]).unwrap();

        let ledger = FavoritesLedger::open(&path, &seeds);
        assert_eq!(ledger.ids(), vec![seeds[0].id()]);
    }

    #[test]
    fn test_corrupt_favorites_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "not json").unwrap();

        let ledger = FavoritesLedger::open(&path, &seed_recipes());
        assert!(ledger.is_empty());
    }
}
