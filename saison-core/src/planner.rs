//! The two planning operations: generating recipes and building a shopping list.

use chrono::Month;
use futures::future::join_all;

use crate::config::PipelineOptions;
use crate::consolidate::consolidate;
use crate::error::{PlanError, ShapeError};
use crate::llm::{LlmError, LlmProvider, ModelSettings};
use crate::normalize::{normalize_ingredients, normalize_recipes, NormalizeConstraints};
use crate::parse::parse_json_array;
use crate::prompts::{
    build_extraction_prompt, build_generation_prompt, EXTRACTION_PROMPT_NAME,
    GENERATION_PROMPT_NAME,
};
use crate::types::{Ingredient, Preferences, Recipe, RecipeSummary};

/// Constraints the normalizer applies for a given household.
pub fn constraints_for(preferences: &Preferences, options: &PipelineOptions) -> NormalizeConstraints {
    NormalizeConstraints {
        max_total_minutes: options.rescale_time.then_some(preferences.cooking_time),
        servings: options
            .scale_servings_to_household
            .then_some(preferences.household_size)
            .filter(|&n| n > 0),
        accept_single_object: options.accept_single_object,
    }
}

/// Ask the model for a recipe plan and normalize whatever comes back.
///
/// One model call; every failure is returned to the caller.
pub async fn generate_recipes(
    provider: &dyn LlmProvider,
    preferences: &Preferences,
    month: Month,
    options: &PipelineOptions,
    settings: &ModelSettings,
) -> Result<Vec<Recipe>, PlanError> {
    let prompt = build_generation_prompt(preferences, month, options);

    tracing::debug!(
        prompt_name = GENERATION_PROMPT_NAME,
        provider = provider.provider_name(),
        model = %settings.model,
        "Generating recipes"
    );

    let text = provider.complete(&prompt, settings).await?;

    let value = parse_json_array(&text).inspect_err(|e| {
        tracing::error!(
            prompt_name = GENERATION_PROMPT_NAME,
            raw = %e.raw,
            "Failed to parse AI response"
        );
    })?;

    let recipes = normalize_recipes(value, &constraints_for(preferences, options))?;

    tracing::info!(count = recipes.len(), "Generated recipes");
    Ok(recipes)
}

/// Extract shopping ingredients from every recipe and merge them.
///
/// Extraction is best-effort per recipe: any failure for one recipe falls back
/// to that recipe's own ingredient list. Only a missing provider configuration
/// fails the whole operation.
pub async fn build_shopping_list(
    provider: &dyn LlmProvider,
    recipes: &[RecipeSummary],
    settings: &ModelSettings,
) -> Result<Vec<Ingredient>, PlanError> {
    if !provider.is_configured() {
        return Err(LlmError::NotConfigured(format!(
            "{} provider has no credentials",
            provider.provider_name()
        ))
        .into());
    }

    // join_all yields results in input order, not completion order.
    let extracted = join_all(
        recipes
            .iter()
            .map(|recipe| extract_or_fallback(provider, recipe, settings)),
    )
    .await;

    let extracted = extracted.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(consolidate(extracted))
}

async fn extract_or_fallback(
    provider: &dyn LlmProvider,
    recipe: &RecipeSummary,
    settings: &ModelSettings,
) -> Result<Vec<Ingredient>, PlanError> {
    match extract_ingredients(provider, recipe, settings).await {
        Ok(ingredients) => Ok(ingredients),
        Err(PlanError::Llm(e)) if e.is_not_configured() => Err(e.into()),
        Err(e) => {
            tracing::warn!(
                recipe = %recipe.title,
                error = %e,
                "Ingredient extraction failed, using recipe ingredients"
            );
            Ok(recipe.ingredients.clone())
        }
    }
}

/// Ask the model for the shopping-relevant ingredients of one recipe.
pub async fn extract_ingredients(
    provider: &dyn LlmProvider,
    recipe: &RecipeSummary,
    settings: &ModelSettings,
) -> Result<Vec<Ingredient>, PlanError> {
    let prompt = build_extraction_prompt(recipe);

    tracing::debug!(
        prompt_name = EXTRACTION_PROMPT_NAME,
        recipe = %recipe.title,
        model = %settings.model,
        "Extracting ingredients"
    );

    let text = provider.complete(&prompt, settings).await?;
    let value = parse_json_array(&text)?;

    normalize_ingredients(value).ok_or(PlanError::Shape(ShapeError::NotAnArray))
}
