use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::data::{NewRecipe, Recipe};
use super::seed::seed_recipes;
use crate::error::Result;

/// The RecipeStore owns every recipe collection.
///
/// Seed recipes are compiled in and recreated on each launch. User recipes
/// are the only collection written to disk, as one JSON array. All changes
/// to user recipes go through `add_recipe` and `delete_recipe`.
pub struct RecipeStore {
    recipes_path: PathBuf,
    seeds: Vec<Recipe>,
    user: Vec<Recipe>,
    loaded: bool,
}

impl RecipeStore {
    /// Create a store backed by `recipes_path`. Nothing is read until
    /// `initialize` is called.
    pub fn new(recipes_path: impl Into<PathBuf>) -> Self {
        Self {
            recipes_path: recipes_path.into(),
            seeds: Vec::new(),
            user: Vec::new(),
            loaded: false,
        }
    }

    /// Create and initialize a store in one step
    pub fn open(recipes_path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(recipes_path);
        store.initialize();
        store
    }

    /// Load user recipes from disk, then the bundled seed set.
    /// A missing or unreadable file leaves the user collection empty.
    pub fn initialize(&mut self) {
        self.user = self.load();
        self.seeds = seed_recipes();
        self.loaded = true;

        tracing::info!(
            "📚 Recipe store ready: {} seed, {} user recipes ({})",
            self.seeds.len(),
            self.user.len(),
            self.recipes_path.display()
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Path of the user recipe file
    pub fn path(&self) -> &Path {
        &self.recipes_path
    }

    pub fn seed_recipes(&self) -> &[Recipe] {
        &self.seeds
    }

    pub fn user_recipes(&self) -> &[Recipe] {
        &self.user
    }

    /// Seed recipes followed by user recipes in the order they were added
    pub fn all_recipes(&self) -> impl Iterator<Item = &Recipe> + '_ {
        self.seeds.iter().chain(self.user.iter())
    }

    /// Look up a recipe in either collection
    pub fn find(&self, id: Uuid) -> Option<&Recipe> {
        self.all_recipes().find(|r| r.id() == id)
    }

    /// Validate and store a new user recipe, then write the collection out.
    ///
    /// Only a validation error is returned; a failed write is logged and the
    /// in-memory collection stays authoritative.
    pub fn add_recipe(&mut self, fields: NewRecipe) -> Result<Recipe> {
        let recipe = Recipe::create(fields)?;
        self.user.push(recipe.clone());

        tracing::info!("➕ Added recipe '{}' ({})", recipe.title(), recipe.id());
        self.persist();

        Ok(recipe)
    }

    /// Remove a user recipe by id. Returns the removed recipe, or `None`
    /// (and writes nothing) if no user recipe has that id.
    pub fn delete_recipe(&mut self, id: Uuid) -> Option<Recipe> {
        let index = self.user.iter().position(|r| r.id() == id)?;
        let removed = self.user.remove(index);

        tracing::info!("🗑️  Deleted recipe '{}' ({})", removed.title(), id);
        self.persist();

        Some(removed)
    }

    /// Write all user recipes to disk, logging any failure
    pub fn persist(&self) {
        if let Err(e) = self.try_persist() {
            tracing::warn!(
                "⚠️  Could not save recipes to {}: {}",
                self.recipes_path.display(),
                e
            );
        }
    }

    /// Write all user recipes to disk in one atomic replace
    pub fn try_persist(&self) -> Result<()> {
        write_json_atomic(&self.recipes_path, &self.user)?;
        tracing::debug!(
            "Saved {} user recipes to {}",
            self.user.len(),
            self.recipes_path.display()
        );
        Ok(())
    }

    /// Read user recipes from disk. Any failure, including a single bad
    /// record, gives an empty collection.
    pub fn load(&self) -> Vec<Recipe> {
        if !self.recipes_path.exists() {
            tracing::info!("No saved recipes at {}", self.recipes_path.display());
            return Vec::new();
        }

        match read_json::<Vec<Recipe>>(&self.recipes_path) {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::warn!(
                    "⚠️  Ignoring unreadable recipe file {}: {}",
                    self.recipes_path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for RecipeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeStore")
            .field("recipes_path", &self.recipes_path)
            .field("seeds", &self.seeds.len())
            .field("user", &self.user.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}

/// Serialize `value` as JSON and swap it into `path` via a temp file in the
/// same directory, so readers never see a half-written file.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let json = serde_json::to_vec(value)?;
    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
