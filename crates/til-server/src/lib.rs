//! HTTP server for the fact board.
//!
//! Serves the [`til_api`] table endpoint under `/rest/v1`, the same prefix a
//! hosted Supabase project uses, behind an optional API-key check.

pub mod auth;
pub mod error;
pub mod seed;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware};
use serde::Deserialize;
use til_core::store::FactStore;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_api_key};

/// Path prefix the table endpoint is mounted under.
pub const REST_PREFIX: &str = "/rest/v1";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `TIL_*`
/// environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// argon2 PHC hash of the API key; unset means no key is required.
  #[serde(default)]
  pub api_key_hash: Option<String>,
  /// Insert the sample facts when the table is empty.
  #[serde(default)]
  pub seed:         bool,
}

impl ServerConfig {
  /// Layer `file` (optional) and `TIL_*` environment variables over the
  /// built-in defaults.
  pub fn load(file: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("store_path", "til.db")?
      .add_source(config::File::from(file.into()).required(false))
      .add_source(config::Environment::with_prefix("TIL"))
      .build()?
      .try_deserialize()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the router needs.
#[derive(Clone)]
pub struct AppState<S: FactStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server's axum [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: FactStore + 'static,
{
  Router::new()
    .nest(REST_PREFIX, til_api::api_router(state.store))
    .layer(middleware::from_fn_with_state(state.auth, require_api_key))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use til_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_state(key: Option<&str>) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    seed::seed_if_empty(&store).await.unwrap();
    AppState {
      store: Arc::new(store),
      auth:  Arc::new(AuthConfig {
        key_hash: key.map(|k| auth::hash_key(k).unwrap()),
      }),
    }
  }

  async fn get(state: AppState<SqliteStore>, uri: &str, key: Option<&str>) -> StatusCode {
    let mut builder = Request::builder().uri(uri);
    if let Some(k) = key {
      builder = builder
        .header("apikey", k)
        .header(header::AUTHORIZATION, format!("Bearer {k}"));
    }
    router(state)
      .oneshot(builder.body(Body::empty()).unwrap())
      .await
      .unwrap()
      .status()
  }

  #[tokio::test]
  async fn open_server_serves_facts() {
    let state = make_state(None).await;
    assert_eq!(get(state, "/rest/v1/facts", None).await, StatusCode::OK);
  }

  #[tokio::test]
  async fn keyed_server_requires_key() {
    let state = make_state(Some("anon")).await;
    assert_eq!(
      get(state.clone(), "/rest/v1/facts", None).await,
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      get(state.clone(), "/rest/v1/facts", Some("wrong")).await,
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(get(state, "/rest/v1/facts", Some("anon")).await, StatusCode::OK);
  }

  #[tokio::test]
  async fn unknown_paths_are_404() {
    let state = make_state(None).await;
    assert_eq!(get(state, "/rest/v1/users", None).await, StatusCode::NOT_FOUND);
  }

  #[test]
  fn config_defaults_apply_without_a_file() {
    let cfg = ServerConfig::load("/nonexistent/til-config.toml").unwrap();
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("til.db"));
    assert!(cfg.api_key_hash.is_none());
  }
}
