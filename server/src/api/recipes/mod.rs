pub mod extract;
pub mod generate;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use saison_core::{Ingredient, Preferences, Recipe, RecipeSummary, SkillLevel};
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate::generate_recipes))
        .route("/extract", post(extract::extract_ingredients))
}

#[derive(OpenApi)]
#[openapi(
    paths(generate::generate_recipes, extract::extract_ingredients),
    components(schemas(
        Preferences,
        SkillLevel,
        Recipe,
        RecipeSummary,
        Ingredient,
        generate::GenerateRecipesResponse,
        extract::ExtractIngredientsRequest,
        extract::ExtractIngredientsResponse,
    ))
)]
pub struct ApiDoc;
