pub mod export;
pub mod links;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use saison_core::{Ingredient, RetailerLinks, ShoppingItem};
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

/// Request body shared by the shopping list endpoints.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ShoppingListRequest {
    pub ingredients: Vec<Ingredient>,
}

/// Returns the router for /api/shopping-list endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/links", post(links::shopping_links))
        .route("/export", post(export::export_shopping_list))
}

#[derive(OpenApi)]
#[openapi(
    paths(links::shopping_links, export::export_shopping_list),
    components(schemas(
        ShoppingListRequest,
        ShoppingItem,
        RetailerLinks,
        links::ShoppingLinksResponse,
    ))
)]
pub struct ApiDoc;
