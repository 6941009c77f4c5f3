//! PostgREST-shaped JSON table endpoint for the fact board.
//!
//! Exposes an axum [`Router`] backed by any [`til_core::store::FactStore`],
//! speaking the subset of the PostgREST protocol the board's clients use, so a
//! self-hosted server and a hosted Supabase table are interchangeable.
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/rest/v1", til_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod facts;
pub mod params;

use std::sync::Arc;

use axum::{Router, routing::get};
use til_core::store::FactStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FactStore + 'static,
{
  Router::new()
    .route(
      "/facts",
      get(facts::list::<S>)
        .post(facts::insert::<S>)
        .patch(facts::update::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use til_core::{
    category::Category,
    fact::{Fact, NewFact, VoteKind},
  };
  use til_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn seed(store: &SqliteStore, text: &str, category: Category, interesting: u32) -> Fact {
    let fact = store
      .insert_fact(NewFact {
        text: text.into(),
        source: "https://example.com".into(),
        category,
      })
      .await
      .unwrap();
    store
      .update_votes(fact.id, VoteKind::Interesting, interesting)
      .await
      .unwrap()
      .unwrap()
  }

  async fn send(
    store: Arc<SqliteStore>,
    method: &str,
    uri: &str,
    prefer: Option<&str>,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json");
    if let Some(p) = prefer {
      builder = builder.header("prefer", p);
    }
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let resp = api_router(store)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  fn texts(value: &Value) -> Vec<&str> {
    value
      .as_array()
      .unwrap()
      .iter()
      .map(|f| f["text"].as_str().unwrap())
      .collect()
  }

  // ── GET ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_orders_by_interesting_votes() {
    let store = make_store().await;
    seed(&store, "low", Category::Science, 1).await;
    seed(&store, "high", Category::Society, 9).await;

    let (status, body) = send(
      store,
      "GET",
      "/facts?select=*&order=votesInteresting.desc",
      None,
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), ["high", "low"]);
    assert_eq!(body[0]["votesInteresting"], json!(9));
    assert_eq!(body[0]["category"], json!("society"));
  }

  #[tokio::test]
  async fn list_filters_by_category() {
    let store = make_store().await;
    seed(&store, "a", Category::Science, 1).await;
    seed(&store, "b", Category::Society, 2).await;

    let (status, body) =
      send(store, "GET", "/facts?category=eq.science", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), ["a"]);
  }

  #[tokio::test]
  async fn list_by_id_returns_zero_or_one_row() {
    let store = make_store().await;
    let fact = seed(&store, "a", Category::Science, 1).await;

    let (_, hit) =
      send(store.clone(), "GET", &format!("/facts?id=eq.{}", fact.id), None, None).await;
    assert_eq!(texts(&hit), ["a"]);

    let (_, miss) = send(store, "GET", "/facts?id=eq.999", None, None).await;
    assert_eq!(miss, json!([]));
  }

  #[tokio::test]
  async fn list_rejects_unsupported_filters() {
    let store = make_store().await;
    let (status, body) =
      send(store.clone(), "GET", "/facts?category=like.sci*", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("eq."));

    let (status, _) = send(store, "GET", "/facts?votesFalse=gt.3", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── POST ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn insert_returns_representation() {
    let store = make_store().await;
    let (status, body) = send(
      store.clone(),
      "POST",
      "/facts?select=*",
      Some("return=representation"),
      Some(json!([{
        "text": "Lisbon is the capital of Portugal",
        "source": "https://en.wikipedia.org/wiki/Lisbon",
        "category": "society"
      }])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let rows: Vec<Fact> = serde_json::from_value(body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].votes_false, 0);
    assert_eq!(store.get_fact(rows[0].id).await.unwrap(), Some(rows[0].clone()));
  }

  #[tokio::test]
  async fn insert_without_prefer_returns_empty_201() {
    let store = make_store().await;
    let (status, body) = send(
      store.clone(),
      "POST",
      "/facts",
      None,
      Some(json!({
        "text": "A single object body",
        "source": "http://example.com",
        "category": "news"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, Value::Null);
    assert_eq!(store.count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn insert_validates_every_row_first() {
    let store = make_store().await;
    let (status, body) = send(
      store.clone(),
      "POST",
      "/facts",
      Some("return=representation"),
      Some(json!([
        { "text": "fine", "source": "https://example.com", "category": "news" },
        { "text": "x".repeat(201), "source": "https://example.com", "category": "news" }
      ])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("201"));
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn insert_rejects_non_http_source() {
    let store = make_store().await;
    let (status, _) = send(
      store,
      "POST",
      "/facts",
      None,
      Some(json!({ "text": "x", "source": "ftp://example.com", "category": "news" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn insert_without_category_is_a_json_400() {
    let store = make_store().await;
    let (status, body) = send(
      store.clone(),
      "POST",
      "/facts",
      None,
      Some(json!({ "text": "x", "source": "https://e.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("category"));

    let (status, body) = send(
      store.clone(),
      "POST",
      "/facts",
      None,
      Some(json!({ "text": "x", "source": "https://e.com", "category": "sports" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sports"));
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn malformed_requests_get_the_error_envelope() {
    let store = make_store().await;

    let (status, body) = send(store.clone(), "GET", "/facts?limit=abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(store.clone(), "GET", "/facts?votesFalse=gt.3", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(store, "PATCH", "/facts?id=eq.1", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn batch_with_control_character_stores_nothing() {
    let store = make_store().await;
    let (status, body) = send(
      store.clone(),
      "POST",
      "/facts",
      Some("return=representation"),
      Some(json!([
        { "text": "fine", "source": "https://example.com", "category": "news" },
        { "text": "\u{0}hidden", "source": "https://example.com", "category": "news" }
      ])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("control character"));
    assert_eq!(store.count().await.unwrap(), 0);
  }

  // ── PATCH ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_sets_one_vote_column() {
    let store = make_store().await;
    let fact = seed(&store, "a", Category::Science, 3).await;

    let (status, body) = send(
      store,
      "PATCH",
      &format!("/facts?id=eq.{}&select=*", fact.id),
      Some("return=representation"),
      Some(json!({ "votesMindblowing": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["votesMindblowing"], json!(1));
    assert_eq!(body[0]["votesInteresting"], json!(3));
  }

  #[tokio::test]
  async fn update_unknown_id_returns_empty_array() {
    let store = make_store().await;
    let (status, body) = send(
      store,
      "PATCH",
      "/facts?id=eq.404",
      Some("return=representation"),
      Some(json!({ "votesFalse": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn update_without_prefer_returns_204() {
    let store = make_store().await;
    let fact = seed(&store, "a", Category::Science, 0).await;
    let (status, _) = send(
      store.clone(),
      "PATCH",
      &format!("/facts?id=eq.{}", fact.id),
      None,
      Some(json!({ "votesFalse": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(store.get_fact(fact.id).await.unwrap().unwrap().votes_false, 2);
  }

  #[tokio::test]
  async fn update_refuses_text_edits_and_untargeted_writes() {
    let store = make_store().await;
    let fact = seed(&store, "a", Category::Science, 0).await;

    let (status, _) = send(
      store.clone(),
      "PATCH",
      &format!("/facts?id=eq.{}", fact.id),
      None,
      Some(json!({ "text": "rewritten" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      store.clone(),
      "PATCH",
      "/facts",
      None,
      Some(json!({ "votesFalse": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(store.get_fact(fact.id).await.unwrap().unwrap().text, "a");
  }
}
