//! Route table.
//!
//! Handlers are independent; they share only [`AppState`].

pub mod descriptions;
pub mod greetings;
pub mod info;
pub mod items;
pub mod models;
pub mod pagination;
pub mod products;
pub mod unicorns;
pub mod uploads;

use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Every route served by the API.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(greetings::root))
        .route("/users/{user_id}", get(greetings::read_user))
        .route("/users/other/{user_id}", get(greetings::read_user))
        .route("/idk/{user_id}", get(greetings::idk))
        .route("/files/", get(greetings::read_file))
        .route("/files/{*file_path}", get(greetings::read_file))
        .route("/models/{model_name}", get(models::get_model))
        .route("/items/", get(items::read_items).post(items::create_item))
        .route("/items/{item_id}", put(items::update_item))
        .route("/items_multiple_q/{item_id}", get(items::read_items_multiple_q))
        .route("/json/items/{id}", put(items::save_json_item))
        .route("/patching_items/{item_id}", patch(items::patch_item))
        .route("/uploadfile/", post(uploads::create_upload_file))
        .route("/unicorns/{name}", get(unicorns::read_unicorn))
        .route("/cool/description", get(descriptions::cool_description))
        .route(
            "/cool/description_deprecated",
            get(descriptions::cool_description_deprecated),
        )
        .route("/paginated_items", get(pagination::item_projection))
        .route("/paginated_users/", get(pagination::echo_pagination))
        .route("/alternative_paginated_items", get(pagination::item_projection))
        .route("/alternative_paginated_users/", get(pagination::echo_pagination))
        .route("/query_params/items/", get(pagination::list_items))
        .route("/query_params_data_class/items/", get(pagination::list_items))
        .route("/products/{ean}", get(products::get_product))
        .route("/info", get(info::info))
        .route("/health", get(info::health))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::Http {
        status: StatusCode::METHOD_NOT_ALLOWED,
        detail: "Method Not Allowed".to_string(),
        headers: Vec::new(),
    }
}
