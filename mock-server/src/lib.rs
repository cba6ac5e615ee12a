//! In-process stand-in for the posts/users REST service.
//!
//! Serves fixed fixture data. Writes behave like the public service: they are
//! validated and echoed back with an id, but never persisted, so every read
//! returns the same record no matter what ran before it.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub mod fixtures;

pub use fixtures::{Fixtures, Post, User};

pub type Store = Arc<Fixtures>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

#[derive(Debug, Default, Deserialize)]
pub struct PostFilter {
    #[serde(rename = "userId")]
    pub user_id: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub username: Option<String>,
}

pub fn app() -> Router {
    let store: Store = Arc::new(Fixtures::seed());
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(replace_post).patch(update_post).delete(delete_post),
        )
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(replace_user).patch(update_user).delete(delete_user),
        )
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

/// Error responses carry an empty JSON object, as the public service does.
fn empty(status: StatusCode) -> (StatusCode, Json<Value>) {
    (status, Json(json!({})))
}

fn with_id(mut fields: Map<String, Value>, id: u32) -> Value {
    fields.insert("id".to_string(), Value::from(id));
    Value::Object(fields)
}

fn merged<T: Serialize>(record: &T, patch: Map<String, Value>, id: u32) -> ApiResult<Json<Value>> {
    let Value::Object(mut fields) =
        serde_json::to_value(record).map_err(|_| empty(StatusCode::INTERNAL_SERVER_ERROR))?
    else {
        return Err(empty(StatusCode::INTERNAL_SERVER_ERROR));
    };
    fields.extend(patch);
    Ok(Json(with_id(fields, id)))
}

// --- posts ---

async fn list_posts(State(store): State<Store>, Query(filter): Query<PostFilter>) -> Json<Vec<Post>> {
    let posts = store
        .posts
        .iter()
        .filter(|p| filter.user_id.is_none_or(|uid| p.user_id == uid))
        .cloned()
        .collect();
    Json(posts)
}

async fn get_post(State(store): State<Store>, Path(id): Path<u32>) -> ApiResult<Json<Post>> {
    store.post(id).cloned().map(Json).ok_or_else(|| empty(StatusCode::NOT_FOUND))
}

async fn create_post(
    State(store): State<Store>,
    Json(input): Json<Map<String, Value>>,
) -> (StatusCode, Json<Value>) {
    let id = store.posts.len() as u32 + 1;
    tracing::debug!(id, "echoing created post");
    (StatusCode::CREATED, Json(with_id(input, id)))
}

async fn replace_post(
    State(store): State<Store>,
    Path(id): Path<u32>,
    Json(input): Json<Map<String, Value>>,
) -> ApiResult<Json<Value>> {
    store.post(id).ok_or_else(|| empty(StatusCode::NOT_FOUND))?;
    Ok(Json(with_id(input, id)))
}

async fn update_post(
    State(store): State<Store>,
    Path(id): Path<u32>,
    Json(input): Json<Map<String, Value>>,
) -> ApiResult<Json<Value>> {
    let post = store.post(id).ok_or_else(|| empty(StatusCode::NOT_FOUND))?;
    merged(post, input, id)
}

async fn delete_post(State(store): State<Store>, Path(id): Path<u32>) -> ApiResult<Json<Value>> {
    store.post(id).ok_or_else(|| empty(StatusCode::NOT_FOUND))?;
    Ok(Json(json!({})))
}

// --- users ---

async fn list_users(State(store): State<Store>, Query(filter): Query<UserFilter>) -> Json<Vec<User>> {
    let users = store
        .users
        .iter()
        .filter(|u| filter.username.as_deref().is_none_or(|name| u.username == name))
        .cloned()
        .collect();
    Json(users)
}

async fn get_user(State(store): State<Store>, Path(id): Path<u32>) -> ApiResult<Json<User>> {
    store.user(id).cloned().map(Json).ok_or_else(|| empty(StatusCode::NOT_FOUND))
}

async fn create_user(
    State(store): State<Store>,
    Json(input): Json<Map<String, Value>>,
) -> (StatusCode, Json<Value>) {
    let id = store.users.len() as u32 + 1;
    tracing::debug!(id, "echoing created user");
    (StatusCode::CREATED, Json(with_id(input, id)))
}

async fn replace_user(
    State(store): State<Store>,
    Path(id): Path<u32>,
    Json(input): Json<Map<String, Value>>,
) -> ApiResult<Json<Value>> {
    store.user(id).ok_or_else(|| empty(StatusCode::NOT_FOUND))?;
    Ok(Json(with_id(input, id)))
}

async fn update_user(
    State(store): State<Store>,
    Path(id): Path<u32>,
    Json(input): Json<Map<String, Value>>,
) -> ApiResult<Json<Value>> {
    let user = store.user(id).ok_or_else(|| empty(StatusCode::NOT_FOUND))?;
    merged(user, input, id)
}

async fn delete_user(State(store): State<Store>, Path(id): Path<u32>) -> ApiResult<Json<Value>> {
    store.user(id).ok_or_else(|| empty(StatusCode::NOT_FOUND))?;
    Ok(Json(json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_camel_case_user_id() {
        let post = Fixtures::seed().posts[0].clone();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["id"], 1);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn company_serializes_catch_phrase_in_camel_case() {
        let user = Fixtures::seed().users[0].clone();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json["company"]["catchPhrase"].is_string());
        assert!(json["address"]["geo"]["lat"].is_string());
    }

    #[test]
    fn with_id_overrides_client_supplied_id() {
        let input: Map<String, Value> = serde_json::from_str(r#"{"id":5,"title":"t"}"#).unwrap();
        let value = with_id(input, 101);
        assert_eq!(value["id"], 101);
        assert_eq!(value["title"], "t");
    }

    #[test]
    fn merged_keeps_untouched_fields() {
        let fixtures = Fixtures::seed();
        let patch: Map<String, Value> = serde_json::from_str(r#"{"title":"patched"}"#).unwrap();
        let Json(value) = merged(fixtures.post(3).unwrap(), patch, 3).unwrap();
        assert_eq!(value["title"], "patched");
        assert_eq!(value["userId"], 1);
        assert_eq!(value["body"], fixtures.post(3).unwrap().body);
    }

    #[test]
    fn post_filter_reads_user_id_query_key() {
        let filter: PostFilter = serde_json::from_str(r#"{"userId":4}"#).unwrap();
        assert_eq!(filter.user_id, Some(4));
        let filter: PostFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.user_id.is_none());
    }
}
