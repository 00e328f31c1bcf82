use axum::extract::Path;
use axum::Json;
use serde_json::{json, Value};

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

/// `GET /users/{user_id}` and `GET /users/other/{user_id}`
pub async fn read_user(Path(user_id): Path<String>) -> Json<Value> {
    Json(json!({ "user_id": user_id }))
}

/// `GET /idk/{user_id}`
pub async fn idk(Path(user_id): Path<String>) -> Json<Value> {
    Json(json!({ "idk": user_id }))
}

/// `GET /files/{*file_path}`. The capture keeps embedded slashes, so
/// `/files//etc/hosts` yields `/etc/hosts`. Also mounted on `/files/`, where
/// there is no capture and the path is empty.
pub async fn read_file(file_path: Option<Path<String>>) -> Json<Value> {
    let file_path = file_path.map(|Path(path)| path).unwrap_or_default();
    Json(json!({ "file_path": file_path }))
}
