use crate::api::ErrorResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{Datelike, Month};
use saison_core::llm::LlmError;
use saison_core::{planner, PlanError, Preferences, Recipe};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateRecipesResponse {
    pub recipes: Vec<Recipe>,
}

/// Generate seasonal recipes for the current month
///
/// Stateless: the client keeps the returned recipes and posts the selected ones
/// back to `/api/recipes/extract`.
#[utoipa::path(
    post,
    path = "/api/recipes/generate",
    tag = "recipes",
    request_body = Preferences,
    responses(
        (status = 200, description = "Generated recipes", body = GenerateRecipesResponse),
        (status = 429, description = "Model rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_recipes(
    State(ctx): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> impl IntoResponse {
    let month = current_month();

    match planner::generate_recipes(
        ctx.llm.as_ref(),
        &preferences,
        month,
        &ctx.config.pipeline,
        &ctx.config.generation,
    )
    .await
    {
        Ok(recipes) => (StatusCode::OK, Json(GenerateRecipesResponse { recipes })).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Map a planning failure to the status and message the client sees.
pub fn error_response(err: &PlanError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match err {
        PlanError::Llm(LlmError::NotConfigured(msg)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("API key error: {}", msg),
        ),
        PlanError::Llm(LlmError::RateLimited { .. }) => (
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again later.".to_string(),
        ),
        PlanError::Parse(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to parse recipe data".to_string(),
        ),
        PlanError::Shape(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Invalid recipe format".to_string(),
        ),
        PlanError::Llm(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)),
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(error = %err, "Recipe generation rate limited");
    } else {
        tracing::error!(error = %err, "Recipe generation failed");
    }

    (status, Json(ErrorResponse::new(message)))
}

fn current_month() -> Month {
    let today = chrono::Local::now().date_naive();
    u8::try_from(today.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .unwrap_or(Month::January)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{app, json, post_json};
    use saison_core::error::{ParseError, ShapeError};
    use saison_core::llm::FakeProvider;
    use serde_json::json;

    fn preferences() -> serde_json::Value {
        json!({
            "householdSize": "4",
            "mealsPerDay": 2,
            "cookingTime": "45",
            "skillLevel": "intermediate",
            "dietaryNeeds": ["vegetarian"]
        })
    }

    #[tokio::test]
    async fn test_generate_returns_normalized_recipes() {
        let provider = FakeProvider::with_response(
            "seasonal Swiss recipes",
            r#"Here you go: [{"title": "Capuns", "prepTime": 40, "cookingTime": 50, "servings": 2,
                "ingredients": [{"name": "Chard", "quantity": 8, "unit": "leaves"}],
                "instructions": ["Wrap.", "Simmer."]}]"#,
        );

        let (status, body) =
            post_json(app(provider), "/api/recipes/generate", preferences()).await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        let recipe = &body["recipes"][0];
        assert_eq!(recipe["title"], "Capuns");
        assert_eq!(recipe["servings"], 4);
        assert_eq!(recipe["prepTime"], 20);
        assert_eq!(recipe["cookingTime"], 25);
        assert_eq!(recipe["ingredients"][0]["quantity"], "8");
    }

    #[tokio::test]
    async fn test_generate_unconfigured_provider() {
        let (status, body) = post_json(
            app(FakeProvider::unconfigured()),
            "/api/recipes/generate",
            preferences(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = json(&body)["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("API key error: "), "{error}");
    }

    #[tokio::test]
    async fn test_generate_rate_limited() {
        let mut provider = FakeProvider::new();
        provider.add_error(
            "seasonal",
            LlmError::RateLimited {
                retry_after_secs: None,
            },
        );

        let (status, body) = post_json(app(provider), "/api/recipes/generate", preferences()).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            json(&body)["error"],
            "Rate limit exceeded. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_generate_unparseable_reply() {
        let provider = FakeProvider::with_response("seasonal", "Grüezi! No recipes today.");

        let (status, body) = post_json(app(provider), "/api/recipes/generate", preferences()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["error"], "Failed to parse recipe data");
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_preferences() {
        let (status, _) = post_json(
            app(FakeProvider::default()),
            "/api/recipes/generate",
            json!({"householdSize": "lots"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_error_response_mapping() {
        let cases = [
            (
                PlanError::Shape(ShapeError::NotAnArray),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid recipe format",
            ),
            (
                PlanError::Parse(ParseError {
                    raw: "nope".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse recipe data",
            ),
            (
                PlanError::Llm(LlmError::ApiError {
                    status: 529,
                    message: "Overloaded".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error: API returned error: 529 - Overloaded",
            ),
        ];

        for (err, expected_status, expected_message) in cases {
            let (status, Json(body)) = error_response(&err);
            assert_eq!(status, expected_status);
            assert_eq!(body.error, expected_message);
        }
    }
}
