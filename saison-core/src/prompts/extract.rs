//! Shopping ingredient extraction prompt.

use crate::types::RecipeSummary;

/// Prompt name for log fields.
pub const EXTRACTION_PROMPT_NAME: &str = "extract_ingredients";

/// Render the extraction prompt for one recipe.
///
/// The model is asked to drop pantry staples so the shopping list only holds
/// things worth buying.
pub fn build_extraction_prompt(recipe: &RecipeSummary) -> String {
    let recipe_json = serde_json::json!({
        "title": recipe.title,
        "ingredients": recipe.ingredients,
    });

    format!(
        r#"Extract ONLY the main ingredients from this recipe.
Ignore common pantry items like:
- Salt, pepper, basic spices
- Oil, butter (unless specific type needed)
- Water
- Basic seasonings

Recipe: {recipe_json}

Return as JSON array with objects containing:
- name: ingredient name
- quantity: amount needed
- unit: measurement unit

Focus on ingredients that need to be purchased at the supermarket.
Respond with ONLY the JSON array, no other text. Example format:
[{{"name": "leeks", "quantity": "2", "unit": "pieces"}}]"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ingredient;

    #[test]
    fn test_render_prompt() {
        let recipe = RecipeSummary {
            title: "Papet vaudois".to_string(),
            ingredients: vec![
                Ingredient::new("leeks", "600", "g"),
                Ingredient::new("salt", "1", "pinch"),
            ],
        };

        let prompt = build_extraction_prompt(&recipe);

        assert!(prompt.contains("Papet vaudois"));
        assert!(prompt.contains(r#""name":"leeks""#));
        assert!(prompt.contains("Salt, pepper"));
        assert!(prompt.contains("Oil, butter"));
        assert!(prompt.contains("Water"));
        assert!(prompt.contains("ONLY the JSON array"));
    }
}
