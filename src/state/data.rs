//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the persistence layer, the feed, and the presentation layer.
use chrono::{DateTime, Utc};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::photo;

/// Tags offered by the filter sheet and the authoring form
pub const TAG_VOCABULARY: [&str; 3] = ["Organic", "Low-Calorie", "Gluten-Free"];

/// Meal category of a recipe
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Snack,
    Dessert,
}

impl Category {
    /// Every category, in the order the picker shows them
    pub const ALL: [Category; 5] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Snack,
        Category::Dessert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Snack => "Snack",
            Category::Dessert => "Dessert",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Validation(format!("unknown category '{}'", wanted)))
    }
}

/// A single recipe card.
///
/// Recipes are immutable once built. Favorite status is not stored here;
/// it lives in the favorites ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    id: Uuid,
    title: String,
    /// Encoded photo (PNG/JPEG/...), base64 inside the JSON file
    #[serde(with = "base64_bytes")]
    image_bytes: Vec<u8>,
    instructions: String,
    ingredients: String,
    calories: String,
    prep_time: String,
    price: String,
    category: Category,
    /// Comma separated, stored exactly as typed
    tags: String,
    date_created: DateTime<Utc>,
}

impl Recipe {
    /// Build a recipe from authoring fields with a fresh id and timestamp.
    /// Fails if the title or photo is missing.
    pub fn create(fields: NewRecipe) -> Result<Self> {
        fields.validate()?;
        Ok(Self::with_identity(Uuid::new_v4(), Utc::now(), fields))
    }

    /// Build a recipe with a caller-chosen identity. Used for the bundled
    /// seed set, which must be identical on every run.
    pub(crate) fn with_identity(id: Uuid, date_created: DateTime<Utc>, fields: NewRecipe) -> Self {
        let NewRecipe {
            title,
            image_bytes,
            instructions,
            ingredients,
            calories,
            prep_time,
            price,
            category,
            tags,
        } = fields;

        Self {
            id,
            title,
            image_bytes,
            instructions,
            ingredients,
            calories,
            prep_time,
            price,
            category,
            tags,
            date_created,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_bytes(&self) -> &[u8] {
        &self.image_bytes
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn calories(&self) -> &str {
        &self.calories
    }

    pub fn prep_time(&self) -> &str {
        &self.prep_time
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Raw tag string as authored
    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }

    /// Parsed tag set (trimmed, unordered, empty entries dropped)
    pub fn tag_set(&self) -> BTreeSet<String> {
        parse_tags(&self.tags)
    }

    /// Trimmed tags in authored order, for display chips
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Decoded photo, or the placeholder if the payload is unreadable
    pub fn image(&self) -> DynamicImage {
        photo::decode_or_placeholder(&self.image_bytes)
    }

    /// Photo scaled to fit a `size` x `size` card
    pub fn thumbnail(&self, size: u32) -> DynamicImage {
        photo::thumbnail(&self.image_bytes, size)
    }
}

/// Fields supplied by the authoring flow.
///
/// Everything but `title` and `image_bytes` may stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRecipe {
    pub title: String,
    pub image_bytes: Vec<u8>,
    pub instructions: String,
    pub ingredients: String,
    pub calories: String,
    pub prep_time: String,
    pub price: String,
    pub category: Category,
    pub tags: String,
}

impl NewRecipe {
    pub fn new(title: impl Into<String>, image_bytes: Vec<u8>) -> Self {
        Self {
            title: title.into(),
            image_bytes,
            ..Self::default()
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = ingredients.into();
        self
    }

    pub fn calories(mut self, calories: impl Into<String>) -> Self {
        self.calories = calories.into();
        self
    }

    pub fn prep_time(mut self, prep_time: impl Into<String>) -> Self {
        self.prep_time = prep_time.into();
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Check the two required fields
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("a recipe needs a title".to_string()));
        }
        if self.image_bytes.is_empty() {
            return Err(Error::Validation("a recipe needs a photo".to_string()));
        }
        Ok(())
    }
}

/// Split a comma separated tag string into a set of trimmed labels.
/// Blank entries are dropped, so `""` parses to the empty set.
pub fn parse_tags(tags: &str) -> BTreeSet<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a tag set back into its stored form (", " separated, sorted)
pub fn join_tags(tags: &BTreeSet<String>) -> String {
    tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// serde adapter storing binary payloads as standard base64 strings
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(tags: &str) -> Recipe {
        Recipe::create(NewRecipe::new("Toast", vec![1, 2, 3]).tags(tags)).unwrap()
    }

    #[test]
    fn test_parse_tags_trims_whitespace() {
        let set = parse_tags("  Organic ,Low-Calorie  ,   Gluten-Free");
        let expected: BTreeSet<String> = ["Organic", "Low-Calorie", "Gluten-Free"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_empty_tags_parse_to_empty_set() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_parse_join_parse_is_stable() {
        for raw in ["Organic", "Organic, Low-Calorie", " b ,a,, c ", "", "Organic,Organic"] {
            let once = parse_tags(raw);
            let again = parse_tags(&join_tags(&once));
            assert_eq!(once, again, "tags {:?}", raw);
        }
    }

    #[test]
    fn test_tag_list_keeps_authored_order() {
        let recipe = sample("Vegan , Organic,  ");
        assert_eq!(recipe.tag_list(), vec!["Vegan", "Organic"]);
        assert_eq!(recipe.tags(), "Vegan , Organic,  ");
    }

    #[test]
    fn test_create_requires_title_and_image() {
        let err = Recipe::create(NewRecipe::new("   ", vec![1])).unwrap_err();
        assert!(err.is_validation());

        let err = Recipe::create(NewRecipe::new("Soup", Vec::new())).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_defaults() {
        let recipe = Recipe::create(NewRecipe::new("Soup", vec![9])).unwrap();
        assert_eq!(recipe.category(), Category::Dinner);
        assert_eq!(recipe.calories(), "");
        assert_eq!(recipe.price(), "");
        assert!(recipe.tag_set().is_empty());
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let a = sample("");
        let b = sample("");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("dessert".parse::<Category>().unwrap(), Category::Dessert);
        assert_eq!(" Lunch ".parse::<Category>().unwrap(), Category::Lunch);
        assert!("Brunch".parse::<Category>().is_err());
    }

    #[test]
    fn test_json_shape_uses_camel_case_and_base64() {
        let recipe = Recipe::create(
            NewRecipe::new("Toast", vec![0xde, 0xad, 0xbe, 0xef]).prep_time("5 minutes"),
        )
        .unwrap();
        let value = serde_json::to_value(&recipe).unwrap();

        assert_eq!(value["imageBytes"], "3q2+7w==");
        assert_eq!(value["prepTime"], "5 minutes");
        assert_eq!(value["category"], "Dinner");
        assert!(value.get("dateCreated").is_some());

        let restored: Recipe = serde_json::from_value(value).unwrap();
        assert_eq!(restored, recipe);
    }

    #[test]
    fn test_missing_field_fails_to_decode() {
        let recipe = sample("Organic");
        let mut value = serde_json::to_value(&recipe).unwrap();
        value.as_object_mut().unwrap().remove("price");
        assert!(serde_json::from_value::<Recipe>(value).is_err());
    }

    #[test]
    fn test_bad_image_bytes_use_placeholder() {
        let recipe = sample("");
        let img = recipe.image();
        assert_eq!(img.width(), 256);
    }
}
