//! Item routes: body, query and path validation.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::error::{ApiError, Location};
use crate::http::extract::{ValidatedJson, ValidatedQuery};
use crate::http::server::AppState;
use crate::models::{EmbeddedItem, Item, ItemFake, ItemFakePatch, ItemsQuery};

/// `POST /items/`. Answers 201 with the item name as a JSON string.
pub async fn create_item(ValidatedJson(item): ValidatedJson<Item>) -> (StatusCode, Json<String>) {
    tracing::debug!(name = %item.name, price = item.price, "Item accepted");
    (StatusCode::CREATED, Json(item.name))
}

/// `GET /items/`
pub async fn read_items(ValidatedQuery(query): ValidatedQuery<ItemsQuery>) -> Json<Value> {
    let mut results = json!({
        "items": [{ "item_id": "Foo" }, { "item_id": "Bar" }],
    });
    if let Some(q) = query.q.filter(|q| !q.is_empty()) {
        results["q"] = Value::String(q);
    }
    Json(results)
}

#[derive(Debug, Serialize)]
pub struct MultipleQ {
    pub q: Option<Vec<String>>,
    pub hidden_q: Option<String>,
    pub item_id: i64,
}

/// `GET /items_multiple_q/{item_id}`. `q` may repeat; `item_id` must be positive.
pub async fn read_items_multiple_q(
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<MultipleQ>, ApiError> {
    let Path(item_id) = path?;
    if item_id <= 0 {
        return Err(ApiError::invalid(
            Location::Path,
            Some("item_id"),
            "Input should be greater than 0",
            "greater_than",
        ));
    }

    let Query(pairs) = query?;
    let mut q = Vec::new();
    let mut hidden_q = None;
    for (key, value) in pairs {
        match key.as_str() {
            "q" => q.push(value),
            "hidden_q" => hidden_q = Some(value),
            _ => {}
        }
    }

    Ok(Json(MultipleQ {
        q: (!q.is_empty()).then_some(q),
        hidden_q,
        item_id,
    }))
}

#[derive(Debug, Serialize)]
pub struct UpdatedItem {
    pub item_id: i64,
    pub item: Item,
}

/// `PUT /items/{item_id}` with the item embedded under an `item` key.
pub async fn update_item(
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(body): ValidatedJson<EmbeddedItem>,
) -> Result<Json<UpdatedItem>, ApiError> {
    let Path(item_id) = path?;
    Ok(Json(UpdatedItem {
        item_id,
        item: body.item,
    }))
}

/// `PUT /json/items/{id}`. Stores the record and answers `null`.
pub async fn save_json_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(item): ValidatedJson<ItemFake>,
) -> Json<()> {
    tracing::debug!(id = %id, "Saving item");
    state.items.save(id, item);
    Json(())
}

/// `PATCH /patching_items/{item_id}`
pub async fn patch_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    ValidatedJson(patch): ValidatedJson<ItemFakePatch>,
) -> Result<Json<ItemFake>, ApiError> {
    state
        .items
        .patch(&item_id, patch)
        .map(Json)
        .ok_or(ApiError::NotFound("Item not found"))
}
