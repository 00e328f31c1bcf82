use axum::Json;
use serde::Serialize;

use crate::http::extract::Pagination;
use crate::models::ItemFake;
use crate::store::items::{fake_items, NamedItem};

/// Echo the parsed pagination parameters. Backs `/paginated_users/` and
/// `/alternative_paginated_users/`.
pub async fn echo_pagination(pagination: Pagination) -> Json<Pagination> {
    Json(pagination)
}

/// The pagination parameters read through the [`ItemFake`] shape. Backs
/// `/paginated_items` and `/alternative_paginated_items`.
///
/// No pagination key is an `ItemFake` field, so every field takes its
/// default. Bad `skip`/`limit` values are still rejected by the extractor.
pub async fn item_projection(_pagination: Pagination) -> Json<ItemFake> {
    Json(ItemFake::default())
}

#[derive(Debug, Serialize)]
pub struct ItemPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub items: Vec<NamedItem>,
}

/// Page through the fixed item list. Backs `/query_params/items/` and
/// `/query_params_data_class/items/`.
pub async fn list_items(pagination: Pagination) -> Json<ItemPage> {
    Json(ItemPage {
        q: pagination.query().map(str::to_owned),
        items: fake_items(pagination.skip, pagination.limit),
    })
}
