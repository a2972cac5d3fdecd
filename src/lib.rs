//! FoodSwipe core
//!
//! Recipe cards to swipe through, a favorites list fed by likes, and
//! user-authored recipes saved to a local JSON file. Everything here is
//! UI-agnostic; a front-end holds the services and calls into them.

pub mod config;
pub mod error;
pub mod feed;
pub mod photo;
pub mod state;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use feed::filter::{filter_by_tags, matches_tags};
pub use feed::gesture::{interpret_drag, DragState, SwipeOutcome};
pub use feed::session::{Choice, Decision, SessionState, SwipeSession};
pub use state::data::{join_tags, parse_tags, Category, NewRecipe, Recipe, TAG_VOCABULARY};
pub use state::favorites::FavoritesLedger;
pub use state::library::RecipeStore;
