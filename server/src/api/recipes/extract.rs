use crate::api::ErrorResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use saison_core::{planner, Ingredient, RecipeSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExtractIngredientsRequest {
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExtractIngredientsResponse {
    pub ingredients: Vec<Ingredient>,
}

/// Build a consolidated shopping list from the selected recipes
///
/// Each recipe is sent to the model separately. A recipe whose extraction fails
/// contributes its own ingredient list instead.
#[utoipa::path(
    post,
    path = "/api/recipes/extract",
    tag = "recipes",
    request_body = ExtractIngredientsRequest,
    responses(
        (status = 200, description = "Consolidated ingredients", body = ExtractIngredientsResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
pub async fn extract_ingredients(
    State(ctx): State<AppState>,
    Json(request): Json<ExtractIngredientsRequest>,
) -> impl IntoResponse {
    match planner::build_shopping_list(
        ctx.llm.as_ref(),
        &request.recipes,
        &ctx.config.extraction,
    )
    .await
    {
        Ok(ingredients) => {
            (StatusCode::OK, Json(ExtractIngredientsResponse { ingredients })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, recipes = request.recipes.len(), "Ingredient extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to extract ingredients")),
            )
                .into_response()
        }
    }
}
