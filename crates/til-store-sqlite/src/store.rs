//! [`SqliteStore`] — the SQLite implementation of [`FactStore`].

use std::path::Path;

use chrono::{Datelike as _, Utc};
use rusqlite::OptionalExtension as _;

use til_core::{
  fact::{Fact, FactId, NewFact, VoteKind},
  store::{FactQuery, FactStore},
};

use crate::{
  Error,
  Result,
  encode::{FACT_COLUMNS, RawFact},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fact table backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of rows in the table.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM facts", [], |r| r.get(0))?)
      })
      .await?;
    Ok(usize::try_from(n).unwrap_or_default())
  }
}

// ─── FactStore impl ──────────────────────────────────────────────────────────

impl FactStore for SqliteStore {
  type Error = crate::Error;

  async fn list_facts(&self, query: FactQuery) -> Result<Vec<Fact>> {
    let category  = query.category.map(|c| c.name().to_owned());
    let direction = if query.ascending { "ASC" } else { "DESC" };
    // SQLite treats a negative LIMIT as "no limit".
    let limit     = query
      .limit
      .map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

    // The ORDER BY column comes from a closed enum, never from user input.
    let sql = format!(
      "SELECT {FACT_COLUMNS} FROM facts
       WHERE ?1 IS NULL OR category = ?1
       ORDER BY {column} {direction}, id ASC
       LIMIT ?2",
      column = query.order.column(),
    );

    let raws: Vec<RawFact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![category, limit], RawFact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFact::into_fact).collect()
  }

  async fn get_fact(&self, id: FactId) -> Result<Option<Fact>> {
    let raw: Option<RawFact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {FACT_COLUMNS} FROM facts WHERE id = ?1"),
              rusqlite::params![id],
              RawFact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFact::into_fact).transpose()
  }

  async fn insert_fact(&self, input: NewFact) -> Result<Fact> {
    self
      .insert_facts(vec![input])
      .await?
      .pop()
      .ok_or_else(|| Error::Database(rusqlite::Error::QueryReturnedNoRows.into()))
  }

  async fn insert_facts(&self, inputs: Vec<NewFact>) -> Result<Vec<Fact>> {
    for input in &inputs {
      input.validate().map_err(til_core::Error::from)?;
    }

    let created_in = Utc::now().year();

    let raws: Vec<RawFact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut rows = Vec::with_capacity(inputs.len());
        {
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO facts (text, source, category, createdIn)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {FACT_COLUMNS}"
          ))?;
          for input in &inputs {
            rows.push(stmt.query_row(
              rusqlite::params![
                input.text,
                input.source,
                input.category.name(),
                created_in
              ],
              RawFact::from_row,
            )?);
          }
        }
        tx.commit()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFact::into_fact).collect()
  }

  async fn update_votes(
    &self,
    id:    FactId,
    kind:  VoteKind,
    count: u32,
  ) -> Result<Option<Fact>> {
    let sql = format!(
      "UPDATE facts SET {column} = ?1 WHERE id = ?2 RETURNING {FACT_COLUMNS}",
      column = kind.column(),
    );

    let raw: Option<RawFact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![count, id], RawFact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFact::into_fact).transpose()
  }
}
