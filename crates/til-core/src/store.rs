//! The `FactStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (`til-store-sqlite` for a
//! local table, `til-store-rest` for a hosted one). Higher layers (`til-api`,
//! `til-cli`) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  category::{Category, CategoryFilter},
  fact::{Fact, FactId, NewFact, VoteKind},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`FactStore::list_facts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactQuery {
  /// Restrict to one category; `None` selects every row.
  pub category:  Option<Category>,
  /// Vote column to sort by. Ties are broken by ascending id.
  pub order:     VoteKind,
  /// Sort ascending instead of the default descending.
  pub ascending: bool,
  pub limit:     Option<usize>,
}

impl FactQuery {
  /// The query the fact list issues for a sidebar selection.
  pub fn for_filter(filter: CategoryFilter) -> Self {
    Self {
      category: filter.category(),
      ..Self::default()
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the table holding every fact.
///
/// Rows are only ever inserted or have a single vote column overwritten. The
/// store is the source of truth: every write returns the row as stored so the
/// caller can reconcile its local copy.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait FactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Select facts matching `query`, sorted by its vote column.
  fn list_facts(
    &self,
    query: FactQuery,
  ) -> impl Future<Output = Result<Vec<Fact>, Self::Error>> + Send + '_;

  /// Retrieve one fact by id. Returns `None` if not found.
  fn get_fact(
    &self,
    id: FactId,
  ) -> impl Future<Output = Result<Option<Fact>, Self::Error>> + Send + '_;

  /// Insert a fact and return the stored row. The store assigns the id, the
  /// creation year and zeroed vote counters.
  fn insert_fact(
    &self,
    input: NewFact,
  ) -> impl Future<Output = Result<Fact, Self::Error>> + Send + '_;

  /// Insert a batch of facts. Either every row is stored or none is; the
  /// stored rows come back in input order.
  fn insert_facts(
    &self,
    inputs: Vec<NewFact>,
  ) -> impl Future<Output = Result<Vec<Fact>, Self::Error>> + Send + '_;

  /// Overwrite one vote column of one row and return the updated row.
  /// Returns `None` if no row has `id`.
  fn update_votes(
    &self,
    id: FactId,
    kind: VoteKind,
    count: u32,
  ) -> impl Future<Output = Result<Option<Fact>, Self::Error>> + Send + '_;
}
