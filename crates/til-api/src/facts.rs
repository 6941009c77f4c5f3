//! Handlers for the `/facts` table.
//!
//! | Method  | Path     | Notes |
//! |---------|----------|-------|
//! | `GET`   | `/facts` | `?category=eq.<name>`, `?id=eq.<id>`, `?order=<column>.<dir>`, `?limit=<n>` |
//! | `POST`  | `/facts` | Body: one [`NewFact`] or an array; returns 201 |
//! | `PATCH` | `/facts` | `?id=eq.<id>`; body: exactly one vote column |
//!
//! Writes echo the stored rows back only when the client sends
//! `Prefer: return=representation`.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode},
  response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use til_core::{
  category::Category,
  fact::{Fact, NewFact, VoteKind},
  store::FactStore,
  validate::FactDraft,
};

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiQuery},
  params::{TableParams, wants_representation},
};

fn written(headers: &HeaderMap, status: StatusCode, rows: Vec<Fact>) -> Response {
  if wants_representation(headers) {
    (status, Json(rows)).into_response()
  } else if status == StatusCode::CREATED {
    status.into_response()
  } else {
    StatusCode::NO_CONTENT.into_response()
  }
}

// ─── Select ───────────────────────────────────────────────────────────────────

/// `GET /facts[?category=eq.<name>][&id=eq.<id>][&order=<column>.<dir>][&limit=<n>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<TableParams>,
) -> Result<Json<Vec<Fact>>, ApiError>
where
  S: FactStore,
{
  let selection = params.selection()?;

  let facts = match selection.id {
    Some(id) => store
      .get_fact(id)
      .await
      .map_err(ApiError::store)?
      .into_iter()
      .filter(|f| selection.query.category.is_none_or(|c| c == f.category))
      .collect(),
    None => store
      .list_facts(selection.query)
      .await
      .map_err(ApiError::store)?,
  };

  Ok(Json(facts))
}

// ─── Insert ───────────────────────────────────────────────────────────────────

/// One row of a `POST` body. Every field may be absent so that a missing
/// text or category is reported by the form rules rather than as a parse
/// failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InsertRow {
  #[serde(default)]
  text:     String,
  #[serde(default)]
  source:   String,
  #[serde(default)]
  category: Option<Category>,
}

/// Parse a bare row or a batch, validating every row.
fn insert_rows(body: Value) -> Result<Vec<NewFact>, ApiError> {
  let rows = match body {
    Value::Array(rows) => rows,
    row => vec![row],
  };
  rows
    .into_iter()
    .enumerate()
    .map(|(i, row)| -> Result<NewFact, ApiError> {
      let row: InsertRow = serde_json::from_value(row)
        .map_err(|e| ApiError::BadRequest(format!("row {i}: {e}")))?;
      let draft = FactDraft {
        text:     row.text,
        source:   row.source,
        category: row.category,
      };
      Ok(draft.validate()?)
    })
    .collect()
}

/// `POST /facts` — every row is validated, then the batch is stored
/// atomically.
pub async fn insert<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<TableParams>,
  headers: HeaderMap,
  ApiJson(body): ApiJson<Value>,
) -> Result<Response, ApiError>
where
  S: FactStore,
{
  params.insertion()?;

  let rows = insert_rows(body)?;
  if rows.is_empty() {
    return Ok(written(&headers, StatusCode::CREATED, Vec::new()));
  }

  let inserted = store.insert_facts(rows).await.map_err(ApiError::store)?;
  for fact in &inserted {
    tracing::info!(id = fact.id, category = %fact.category, "fact shared");
  }

  Ok(written(&headers, StatusCode::CREATED, inserted))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// Extract the single `{"<vote column>": <count>}` pair from a PATCH body.
fn vote_assignment(body: &Map<String, Value>) -> Result<(VoteKind, u32), ApiError> {
  let mut entries = body.iter();
  let (Some((column, value)), None) = (entries.next(), entries.next()) else {
    return Err(ApiError::BadRequest(
      "updates must set exactly one vote column".to_owned(),
    ));
  };

  let kind = column.parse::<VoteKind>().map_err(|_| {
    ApiError::BadRequest(format!("column {column:?} cannot be updated"))
  })?;
  let count = value
    .as_u64()
    .and_then(|n| u32::try_from(n).ok())
    .ok_or_else(|| {
      ApiError::BadRequest(format!(
        "{column} must be a non-negative integer, got {value}"
      ))
    })?;

  Ok((kind, count))
}

/// `PATCH /facts?id=eq.<id>` — body: `{"votesInteresting": 25}`.
///
/// Responds with the updated row, or an empty array when no row matched.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<TableParams>,
  headers: HeaderMap,
  ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Response, ApiError>
where
  S: FactStore,
{
  let id = params.update_target()?;
  let (kind, count) = vote_assignment(&body)?;

  let updated = store
    .update_votes(id, kind, count)
    .await
    .map_err(ApiError::store)?;

  match &updated {
    Some(_) => tracing::debug!(id, column = %kind, count, "vote recorded"),
    None => tracing::debug!(id, "vote for unknown fact"),
  }

  Ok(written(&headers, StatusCode::OK, updated.into_iter().collect()))
}
