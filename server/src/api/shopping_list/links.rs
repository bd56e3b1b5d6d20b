use super::ShoppingListRequest;
use axum::{http::StatusCode, response::IntoResponse, Json};
use saison_core::{shopping_items, ShoppingItem};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShoppingLinksResponse {
    pub items: Vec<ShoppingItem>,
}

/// Attach Migros and Coop search links to each shopping list item
#[utoipa::path(
    post,
    path = "/api/shopping-list/links",
    tag = "shopping_list",
    request_body = ShoppingListRequest,
    responses(
        (status = 200, description = "Items with retailer search links", body = ShoppingLinksResponse)
    )
)]
pub async fn shopping_links(Json(request): Json<ShoppingListRequest>) -> impl IntoResponse {
    let items = shopping_items(&request.ingredients);
    (StatusCode::OK, Json(ShoppingLinksResponse { items }))
}
