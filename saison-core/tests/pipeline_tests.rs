//! End-to-end tests for the planning pipeline.
//!
//! These run the real prompt, parse, normalize and consolidate steps against
//! canned model replies from `FakeProvider`.

use chrono::Month;
use saison_core::llm::FakeProvider;
use saison_core::{
    build_shopping_list, generate_recipes, Ingredient, ModelSettings, PipelineOptions,
    Preferences, RecipeCount, RecipeSummary,
};

const GENERATED_PLAN: &str = r#"Here is your plan for the month:

```json
[
  {
    "title": "Älplermagronen",
    "description": "Alpine macaroni with potatoes and cheese.",
    "servings": 4,
    "prepTime": 15,
    "cookingTime": 25,
    "ingredients": [
      {"name": "Macaroni", "quantity": "200", "unit": "g"},
      {"name": "Potatoes", "quantity": "300", "unit": "g"},
      {"name": "Gruyère", "quantity": "100", "unit": "g"}
    ],
    "instructions": ["Boil potatoes and pasta together.", "Layer with cheese."],
    "seasonalNote": "Stored potatoes are at their best."
  },
  {
    "title": "Papet vaudois",
    "prepTime": "20",
    "cookingTime": "40 minutes",
    "ingredients": [
      {"name": "Leeks", "quantity": "3", "unit": "pieces"},
      {"name": "potatoes", "quantity": "400", "unit": "g"},
      {"name": "Saucisse aux choux", "quantity": 1, "unit": ""}
    ],
    "instructions": ["Slice the leeks.", "Simmer with potatoes.", "Add the sausage."]
  },
  {
    "title": "Birchermüesli",
    "servings": "two",
    "ingredients": [{"name": "Oats", "quantity": "100", "unit": "g"}],
    "instructions": "Mix everything."
  }
]
```

Bon appétit!"#;

fn preferences() -> Preferences {
    serde_json::from_str(
        r#"{
            "householdSize": "2",
            "mealsPerDay": "2",
            "cookingTime": "30",
            "skillLevel": "beginner",
            "dietaryNeeds": []
        }"#,
    )
    .expect("valid preferences")
}

#[tokio::test]
async fn generation_yields_three_recipes_within_time() {
    let provider = FakeProvider::with_response("seasonal Swiss recipes", GENERATED_PLAN);

    let recipes = generate_recipes(
        &provider,
        &preferences(),
        Month::December,
        &PipelineOptions::default(),
        &ModelSettings::generation(),
    )
    .await
    .expect("generation succeeds");

    assert_eq!(recipes.len(), 3);
    for recipe in &recipes {
        assert!(
            recipe.prep_time + recipe.cooking_time <= 30,
            "{} takes {} minutes",
            recipe.title,
            recipe.total_minutes()
        );
        assert_eq!(recipe.servings, 2);
    }

    // 15 + 25 = 40 > 30: ratio 3/4.
    assert_eq!(recipes[0].prep_time, 11);
    assert_eq!(recipes[0].cooking_time, 18);
    // 20 + 40 = 60 > 30: ratio 1/2.
    assert_eq!(recipes[1].prep_time, 10);
    assert_eq!(recipes[1].cooking_time, 20);
    // Defaults 15 + 30 = 45 > 30: ratio 2/3.
    assert_eq!(recipes[2].prep_time, 10);
    assert_eq!(recipes[2].cooking_time, 20);
    assert!(recipes[2].instructions.is_empty());

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("Household size: 2 people"));
    assert!(prompt.contains("Maximum cooking time: 30 minutes"));
    assert!(prompt.contains("December"));
}

#[tokio::test]
async fn generation_honours_per_meal_count_in_prompt() {
    let provider = FakeProvider::with_response("seasonal Swiss recipes", GENERATED_PLAN);
    let options = PipelineOptions {
        recipe_count: RecipeCount::PerMeal { days: 5 },
        ..PipelineOptions::default()
    };

    generate_recipes(
        &provider,
        &preferences(),
        Month::April,
        &options,
        &ModelSettings::generation(),
    )
    .await
    .expect("generation succeeds");

    assert!(provider.prompts()[0].contains("Generate 10 seasonal Swiss recipes"));
}

#[tokio::test]
async fn shopping_list_from_generated_recipes() {
    let mut provider = FakeProvider::with_response("seasonal Swiss recipes", GENERATED_PLAN);
    provider.add_response(
        "Älplermagronen",
        r#"[{"name": "Macaroni", "quantity": "200", "unit": "g"}, {"name": "Potatoes", "quantity": "300", "unit": "g"}, {"name": "Gruyère", "quantity": "100", "unit": "g"}]"#,
    );
    // The Papet extraction reply is unusable, so its own ingredients are used.
    provider.add_response("Papet vaudois", "Sorry, I can't do that.");

    let recipes = generate_recipes(
        &provider,
        &preferences(),
        Month::December,
        &PipelineOptions::default(),
        &ModelSettings::generation(),
    )
    .await
    .expect("generation succeeds");

    let selected: Vec<RecipeSummary> = recipes.iter().take(2).map(RecipeSummary::from).collect();
    let list = build_shopping_list(&provider, &selected, &ModelSettings::extraction())
        .await
        .expect("shopping list succeeds");

    assert_eq!(
        list,
        vec![
            Ingredient::new("Macaroni", "200", "g"),
            Ingredient::new("Potatoes", "300 + 400", "g"),
            Ingredient::new("Gruyère", "100", "g"),
            Ingredient::new("Leeks", "3", "pieces"),
            Ingredient::new("Saucisse aux choux", "1", ""),
        ]
    );
}
