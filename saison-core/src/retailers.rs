//! Retailer search links for shopping list items.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::types::Ingredient;

const MIGROS_SEARCH_URL: &str = "https://www.migros.ch/en/search?query=";
const COOP_SEARCH_URL: &str = "https://www.coop.ch/en/search/?q=";

/// A number followed by a measurement unit, e.g. "200g", "2 cups".
///
/// The unit must end on a word boundary, so "2 large" or "200gr" are left
/// alone rather than losing a leading "l" or "g".
static QUANTITY_UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(?:kg|g|ml|l|cups|cup|tbsp|tsp|pieces|piece)\b")
        .expect("Invalid quantity regex")
});

/// Search pages for one ingredient at each retailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RetailerLinks {
    pub migros: String,
    pub coop: String,
}

/// A shopping list entry with its retailer links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub ingredient: Ingredient,
    pub search_term: String,
    pub links: RetailerLinks,
}

/// Strip embedded quantities so the retailer search sees only the product.
pub fn format_ingredient_for_search(ingredient: &str) -> String {
    let lowered = ingredient.to_lowercase();
    let stripped = QUANTITY_UNIT_REGEX.replace_all(&lowered, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn retailer_links(search_term: &str) -> RetailerLinks {
    let encoded = urlencoding::encode(search_term);
    RetailerLinks {
        migros: format!("{MIGROS_SEARCH_URL}{encoded}"),
        coop: format!("{COOP_SEARCH_URL}{encoded}"),
    }
}

pub fn shopping_items(ingredients: &[Ingredient]) -> Vec<ShoppingItem> {
    ingredients
        .iter()
        .map(|ingredient| {
            let search_term = format_ingredient_for_search(&ingredient.name);
            ShoppingItem {
                links: retailer_links(&search_term),
                ingredient: ingredient.clone(),
                search_term,
            }
        })
        .collect()
}
