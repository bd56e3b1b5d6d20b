//! Recipe generation prompt.

use chrono::Month;

use crate::config::PipelineOptions;
use crate::types::Preferences;

/// Prompt name for log fields.
pub const GENERATION_PROMPT_NAME: &str = "generate_recipes";

const RECIPE_EXAMPLE: &str = r#"[
  {
    "title": "Älplermagronen",
    "description": "Alpine macaroni with potatoes, cheese and applesauce.",
    "servings": 2,
    "prepTime": 10,
    "cookingTime": 20,
    "ingredients": [
      {"name": "macaroni", "quantity": "200", "unit": "g"},
      {"name": "Gruyère", "quantity": "80", "unit": "g"}
    ],
    "instructions": ["Boil the potatoes and pasta.", "Stir in the cheese."],
    "seasonalNote": "Autumn apples make the applesauce."
  }
]"#;

/// Render the recipe generation prompt for the given preferences.
///
/// `month` biases the model toward produce that is in season.
pub fn build_generation_prompt(
    preferences: &Preferences,
    month: Month,
    options: &PipelineOptions,
) -> String {
    let month = month.name();
    let count = options.recipe_count.resolve(preferences);
    let dietary_needs = if preferences.dietary_needs.is_empty() {
        "None".to_string()
    } else {
        preferences.dietary_needs.join(", ")
    };

    let header = format!(
        r#"Generate {count} seasonal Swiss recipes for {month}.

User preferences:
- Household size: {household} people
- Meals per day: {meals}
- Maximum cooking time: {max_time} minutes
- Skill level: {skill}
- Dietary needs: {dietary_needs}

Requirements:
1. Use ingredients commonly found in Swiss supermarkets (Migros, Coop)
2. Emphasize seasonal, local Swiss produce for {month}
3. Provide clear, step-by-step instructions
4. Match the cooking time and skill level
5. Respect all dietary restrictions"#,
        household = preferences.household_size,
        meals = preferences.meals_per_day,
        max_time = preferences.cooking_time,
        skill = preferences.skill_level,
    );

    if !options.strict_schema {
        return format!(
            r#"{header}

For each recipe, provide:
- Title (in English)
- Description (1-2 sentences)
- Servings
- Prep time and cooking time
- List of ingredients with quantities
- Step-by-step instructions
- Why it's perfect for {month} in Switzerland

Format as JSON array with {count} recipes."#
        );
    }

    format!(
        r#"{header}
6. prepTime + cookingTime must not exceed {max_time} minutes for every recipe

Return exactly {count} recipes as a JSON array. Each recipe must be an object with exactly this shape:
{RECIPE_EXAMPLE}

Field rules:
- "servings", "prepTime" and "cookingTime" are integers (minutes for the times)
- "ingredients" is an array of objects with string "name", "quantity" and "unit"
- "instructions" is an array of strings, one per step
- "seasonalNote" explains why the recipe suits {month} in Switzerland

Respond with ONLY the JSON array. No introduction, no explanation, no markdown fences."#,
        max_time = preferences.cooking_time,
    )
}
