//! Fact types — the single record kind on the board.
//!
//! A fact is created once from a validated form submission and afterwards only
//! ever changes through single-column vote updates. The remote table assigns
//! the id, the creation year and the zeroed counters.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, category::Category};

/// Server-assigned row identifier.
pub type FactId = i64;

// ─── Votes ───────────────────────────────────────────────────────────────────

/// One of the three per-fact counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoteKind {
  /// 👍
  #[default]
  Interesting,
  /// 🤯
  Mindblowing,
  /// ⛔
  False,
}

impl VoteKind {
  pub const ALL: [Self; 3] = [Self::Interesting, Self::Mindblowing, Self::False];

  /// Column name in the `facts` table. Must match the serde renames on
  /// [`Fact`].
  pub fn column(self) -> &'static str {
    match self {
      Self::Interesting => "votesInteresting",
      Self::Mindblowing => "votesMindblowing",
      Self::False => "votesFalse",
    }
  }
}

impl fmt::Display for VoteKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.column())
  }
}

impl FromStr for VoteKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|k| k.column() == s)
      .ok_or_else(|| Error::UnknownVoteColumn(s.to_owned()))
  }
}

// ─── Fact ────────────────────────────────────────────────────────────────────

/// A row of the `facts` table as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
  pub id:                FactId,
  pub text:              String,
  pub source:            String,
  pub category:          Category,
  #[serde(default)]
  pub votes_interesting: u32,
  #[serde(default)]
  pub votes_mindblowing: u32,
  #[serde(default)]
  pub votes_false:       u32,
  /// Year the fact was shared; set by the store.
  pub created_in:        i32,
}

impl Fact {
  pub fn votes(&self, kind: VoteKind) -> u32 {
    match kind {
      VoteKind::Interesting => self.votes_interesting,
      VoteKind::Mindblowing => self.votes_mindblowing,
      VoteKind::False => self.votes_false,
    }
  }

  /// A fact is disputed when its false-votes outweigh the positive ones
  /// combined.
  pub fn is_disputed(&self) -> bool {
    u64::from(self.votes_interesting) + u64::from(self.votes_mindblowing)
      < u64::from(self.votes_false)
  }
}

// ─── NewFact ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::FactStore::insert_fact`]. Only the user-supplied
/// columns; everything else is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFact {
  pub text:     String,
  pub source:   String,
  pub category: Category,
}
