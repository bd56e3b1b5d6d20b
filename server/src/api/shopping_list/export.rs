use super::ShoppingListRequest;
use axum::{http::header, response::IntoResponse, Json};
use saison_core::render_shopping_list;

const EXPORT_FILENAME: &str = "shopping-list.txt";

/// Download the shopping list as a plain text file
#[utoipa::path(
    post,
    path = "/api/shopping-list/export",
    tag = "shopping_list",
    request_body = ShoppingListRequest,
    responses(
        (status = 200, description = "Shopping list, one item per line", content_type = "text/plain", body = String)
    )
)]
pub async fn export_shopping_list(Json(request): Json<ShoppingListRequest>) -> impl IntoResponse {
    let text = render_shopping_list(&request.ingredients);

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        text,
    )
}
