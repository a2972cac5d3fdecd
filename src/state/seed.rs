//! Bundled recipes that seed the feed on every run.
//!
//! Ids, timestamps and photos are fixed so the set is identical each launch.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::data::{Category, NewRecipe, Recipe};
use crate::photo;

/// Creation time stamped on every seed recipe (2025-06-11T12:00:00Z)
const SEED_CREATED_AT: i64 = 1_749_643_200;

/// Edge length of the generated seed photos
const SEED_PHOTO_SIZE: u32 = 64;

/// Build the seed recipe set
pub fn seed_recipes() -> Vec<Recipe> {
    let created = DateTime::<Utc>::from_timestamp(SEED_CREATED_AT, 0).unwrap_or_default();

    vec![
        Recipe::with_identity(
            Uuid::from_u128(0x5eed_0001),
            created,
            NewRecipe::new("Spaghetti Carbonara", seed_photo([214, 170, 92]))
                .instructions(
                    "1. Boil pasta.\n2. Fry Bacon.\n3. Mix with eggs, cheese, and black pepper.\n4. Combine all ingredients and serve hot.",
                )
                .ingredients("Spaghetti, Eggs, Bacon, Cheese, Black pepper.")
                .calories("550")
                .prep_time("30 minutes")
                .category(Category::Dinner)
                .tags("Organic"),
        ),
        Recipe::with_identity(
            Uuid::from_u128(0x5eed_0002),
            created,
            NewRecipe::new("Breakfast Burrito", seed_photo([190, 120, 60]))
                .instructions(
                    "1. Scramble eggs.\n2. Fry bacon.\n3. Warm tortilla.\n4. Assemble burrito with eggs, bacon, cheese, and salsa.",
                )
                .ingredients(
                    "2 large eggs, 2 tablespoons salsa, 1 slice of bacon, 1 slice of cheese, 1 flour tortilla.",
                )
                .calories("460")
                .prep_time("15 minutes")
                .category(Category::Breakfast)
                .tags("Low-Calorie"),
        ),
        Recipe::with_identity(
            Uuid::from_u128(0x5eed_0003),
            created,
            NewRecipe::new("Spinach and Artichoke Ranch Dip", seed_photo([96, 140, 70]))
                .instructions(
                    "1. Blend spinach, artichoke hearts, sour cream, ranch dressing, and Parmesan cheese.\n2. Serve with tortilla chips or crackers.",
                )
                .ingredients("Spinach, Artichoke hearts, Sour cream, Ranch dressing, Parmesan cheese.")
                .calories("320")
                .prep_time("10 minutes")
                .category(Category::Snack)
                .tags("Vegetarian"),
        ),
    ]
}

/// Solid-color stand-in photo. An encoding failure leaves the payload
/// empty, which displays as the placeholder.
fn seed_photo(color: [u8; 3]) -> Vec<u8> {
    photo::solid_png(SEED_PHOTO_SIZE, SEED_PHOTO_SIZE, color).unwrap_or_else(|e| {
        tracing::warn!("Could not encode seed photo: {}", e);
        Vec::new()
    })
}
