use std::collections::BTreeSet;

use crate::state::data::Recipe;

/// Keep the recipes whose tag set is exactly `selected`.
///
/// An empty selection keeps everything. Otherwise a recipe tagged
/// "Organic, Low-Calorie" does not match a selection of just "Organic":
/// the sets must be equal, not merely overlap. Input order is preserved.
pub fn filter_by_tags<'a, I>(recipes: I, selected: &BTreeSet<String>) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    recipes
        .into_iter()
        .filter(|recipe| matches_tags(recipe, selected))
        .collect()
}

/// Single-recipe form of `filter_by_tags`
pub fn matches_tags(recipe: &Recipe, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || recipe.tag_set() == *selected
}
