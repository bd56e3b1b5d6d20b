//! Plain-text shopping list export.

use crate::types::Ingredient;

/// Render one `quantity unit name` line per ingredient.
pub fn render_shopping_list(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(|ing| {
            [ing.quantity.trim(), ing.unit.trim(), ing.name.trim()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
