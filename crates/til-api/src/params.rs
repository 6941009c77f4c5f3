//! PostgREST-style query parameters for the `/facts` table.
//!
//! Only the subset the board needs is understood: `select=*`, equality
//! filters on `id` and `category`, a single `order` on a vote column, and
//! `limit`. Anything else is rejected rather than silently ignored.

use axum::http::{HeaderMap, header::HeaderName};
use serde::Deserialize;
use til_core::{
  category::Category,
  fact::{FactId, VoteKind},
  store::FactQuery,
};

use crate::error::ApiError;

static PREFER: HeaderName = HeaderName::from_static("prefer");

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableParams {
  /// Column projection; only `*` is supported.
  pub select:   Option<String>,
  /// `eq.<id>`
  pub id:       Option<String>,
  /// `eq.<category>`
  pub category: Option<String>,
  /// `<vote column>[.asc|.desc]`
  pub order:    Option<String>,
  pub limit:    Option<usize>,
}

/// A parsed read request.
#[derive(Debug, PartialEq, Eq)]
pub struct Selection {
  pub id:    Option<FactId>,
  pub query: FactQuery,
}

impl TableParams {
  fn check_select(&self) -> Result<(), ApiError> {
    match self.select.as_deref() {
      None | Some("*") => Ok(()),
      Some(other) => Err(ApiError::BadRequest(format!(
        "unsupported select {other:?}; only select=* is supported"
      ))),
    }
  }

  fn id_filter(&self) -> Result<Option<FactId>, ApiError> {
    self
      .id
      .as_deref()
      .map(|raw| {
        eq_operand("id", raw)?.parse().map_err(|_| {
          ApiError::BadRequest(format!("id filter {raw:?} is not an integer"))
        })
      })
      .transpose()
  }

  /// Parameters for `GET`.
  pub fn selection(&self) -> Result<Selection, ApiError> {
    self.check_select()?;

    let category = self
      .category
      .as_deref()
      .map(|raw| {
        eq_operand("category", raw)?
          .parse::<Category>()
          .map_err(|e| ApiError::BadRequest(e.to_string()))
      })
      .transpose()?;

    let (order, ascending) = match self.order.as_deref() {
      Some(raw) => parse_order(raw)?,
      None => (VoteKind::default(), false),
    };

    Ok(Selection {
      id:    self.id_filter()?,
      query: FactQuery {
        category,
        order,
        ascending,
        limit: self.limit,
      },
    })
  }

  /// Parameters for `POST`: nothing beyond `select`.
  pub fn insertion(&self) -> Result<(), ApiError> {
    self.check_select()?;
    if self.id.is_some()
      || self.category.is_some()
      || self.order.is_some()
      || self.limit.is_some()
    {
      return Err(ApiError::BadRequest(
        "inserts accept no filters".to_owned(),
      ));
    }
    Ok(())
  }

  /// Parameters for `PATCH`: exactly one row by id.
  pub fn update_target(&self) -> Result<FactId, ApiError> {
    self.check_select()?;
    if self.category.is_some() || self.order.is_some() || self.limit.is_some() {
      return Err(ApiError::BadRequest(
        "updates accept only an id filter".to_owned(),
      ));
    }
    self.id_filter()?.ok_or_else(|| {
      ApiError::BadRequest("updates must target one row with id=eq.<id>".to_owned())
    })
  }
}

/// Strip the `eq.` operator from a filter value.
fn eq_operand<'a>(column: &str, raw: &'a str) -> Result<&'a str, ApiError> {
  raw.strip_prefix("eq.").ok_or_else(|| {
    ApiError::BadRequest(format!(
      "unsupported filter {column}={raw}; only eq. is supported"
    ))
  })
}

/// Parse `votesFalse`, `votesFalse.asc` or `votesFalse.desc`. PostgREST sorts
/// ascending when no direction is given.
fn parse_order(raw: &str) -> Result<(VoteKind, bool), ApiError> {
  let (column, direction) = raw.split_once('.').unwrap_or((raw, "asc"));
  let kind = column
    .parse::<VoteKind>()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
  match direction {
    "asc" => Ok((kind, true)),
    "desc" => Ok((kind, false)),
    other => Err(ApiError::BadRequest(format!(
      "unsupported order direction {other:?}"
    ))),
  }
}

/// `true` if the client sent `Prefer: return=representation`.
pub fn wants_representation(headers: &HeaderMap) -> bool {
  headers
    .get_all(&PREFER)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(','))
    .any(|p| p.trim() == "return=representation")
}
