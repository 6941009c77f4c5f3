//! [`RestStore`] — a [`FactStore`] living behind a PostgREST table endpoint.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::json;
use til_core::{
  fact::{Fact, FactId, NewFact, VoteKind},
  store::{FactQuery, FactStore},
};

use crate::{Error, Result};

/// Connection settings for a hosted fact table.
#[derive(Debug, Clone)]
pub struct RestConfig {
  /// Project URL, e.g. `https://<project>.supabase.co` or
  /// `http://localhost:3000`.
  pub base_url: String,
  /// Anonymous API key; empty sends no credentials.
  pub api_key:  String,
  /// Table name under `/rest/v1`.
  pub table:    String,
}

impl RestConfig {
  pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      api_key:  api_key.into(),
      table:    "facts".to_owned(),
    }
  }
}

/// Async HTTP client for the fact table.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RestStore {
  client: Client,
  config: RestConfig,
}

impl RestStore {
  pub fn new(config: RestConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn path(&self) -> String { format!("/rest/v1/{}", self.config.table) }

  fn request(&self, method: Method) -> RequestBuilder {
    let url = format!(
      "{}{}",
      self.config.base_url.trim_end_matches('/'),
      self.path()
    );
    let req = self.client.request(method, url);
    if self.config.api_key.is_empty() {
      req
    } else {
      req
        .header("apikey", &self.config.api_key)
        .bearer_auth(&self.config.api_key)
    }
  }

  /// Turn a non-2xx response into [`Error::Status`], keeping the body for
  /// the user-facing message.
  async fn check(&self, method: &'static str, resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(method, status = %status, body = %body, "fact table request failed");
    Err(Error::Status {
      method,
      path: self.path(),
      status,
      body,
    })
  }

  async fn rows(&self, method: &'static str, req: RequestBuilder) -> Result<Vec<Fact>> {
    let resp = req.send().await?;
    let resp = self.check(method, resp).await?;
    Ok(resp.json().await?)
  }
}

// ─── FactStore impl ──────────────────────────────────────────────────────────

impl FactStore for RestStore {
  type Error = Error;

  /// `GET ?select=*&order=<column>.<dir>[&category=eq.<name>][&limit=<n>]`
  async fn list_facts(&self, query: FactQuery) -> Result<Vec<Fact>> {
    let direction = if query.ascending { "asc" } else { "desc" };
    let mut params = vec![
      ("select", "*".to_owned()),
      ("order", format!("{}.{direction}", query.order.column())),
    ];
    if let Some(category) = query.category {
      params.push(("category", format!("eq.{category}")));
    }
    if let Some(limit) = query.limit {
      params.push(("limit", limit.to_string()));
    }

    let facts = self
      .rows("GET", self.request(Method::GET).query(&params))
      .await?;
    tracing::debug!(count = facts.len(), "fetched facts");
    Ok(facts)
  }

  /// `GET ?select=*&id=eq.<id>`
  async fn get_fact(&self, id: FactId) -> Result<Option<Fact>> {
    let req = self
      .request(Method::GET)
      .query(&[("select", "*".to_owned()), ("id", format!("eq.{id}"))]);
    Ok(self.rows("GET", req).await?.into_iter().next())
  }

  /// `POST` a one-row batch and read back the stored row.
  async fn insert_fact(&self, input: NewFact) -> Result<Fact> {
    self
      .insert_facts(vec![input])
      .await?
      .into_iter()
      .next()
      .ok_or(Error::EmptyResponse("POST"))
  }

  /// `POST` the whole batch as one array; the table inserts it in a single
  /// statement.
  async fn insert_facts(&self, inputs: Vec<NewFact>) -> Result<Vec<Fact>> {
    let req = self
      .request(Method::POST)
      .query(&[("select", "*")])
      .header("prefer", "return=representation")
      .json(&inputs);
    self.rows("POST", req).await
  }

  /// `PATCH ?id=eq.<id>` with `{"<column>": count}`.
  async fn update_votes(
    &self,
    id: FactId,
    kind: VoteKind,
    count: u32,
  ) -> Result<Option<Fact>> {
    let req = self
      .request(Method::PATCH)
      .query(&[("id", format!("eq.{id}")), ("select", "*".to_owned())])
      .header("prefer", "return=representation")
      .json(&json!({ kind.column(): count }));
    Ok(self.rows("PATCH", req).await?.into_iter().next())
  }
}
