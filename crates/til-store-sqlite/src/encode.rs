//! Decoding helpers between SQLite rows and domain types.
//!
//! Categories are stored as their lowercase name, vote counters as plain
//! integers guarded by `CHECK` constraints.

use til_core::fact::Fact;

use crate::{Error, Result};

/// Column list shared by every `SELECT` and `RETURNING` clause. Order must
/// match [`RawFact::from_row`].
pub const FACT_COLUMNS: &str = "id, text, source, category, votesInteresting, \
                                votesMindblowing, votesFalse, createdIn";

/// A `facts` row exactly as SQLite hands it back.
pub struct RawFact {
  pub id:                i64,
  pub text:              String,
  pub source:            String,
  pub category:          String,
  pub votes_interesting: i64,
  pub votes_mindblowing: i64,
  pub votes_false:       i64,
  pub created_in:        i64,
}

impl RawFact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      text:              row.get(1)?,
      source:            row.get(2)?,
      category:          row.get(3)?,
      votes_interesting: row.get(4)?,
      votes_mindblowing: row.get(5)?,
      votes_false:       row.get(6)?,
      created_in:        row.get(7)?,
    })
  }

  pub fn into_fact(self) -> Result<Fact> {
    let id = self.id;
    let narrow = |value: i64, column: &str| {
      u32::try_from(value).map_err(|_| Error::CorruptRow {
        id,
        reason: format!("{column} = {value} is out of range"),
      })
    };

    Ok(Fact {
      id,
      text:              self.text,
      source:            self.source,
      category:          self.category.parse()?,
      votes_interesting: narrow(self.votes_interesting, "votesInteresting")?,
      votes_mindblowing: narrow(self.votes_mindblowing, "votesMindblowing")?,
      votes_false:       narrow(self.votes_false, "votesFalse")?,
      created_in:        i32::try_from(self.created_in).map_err(|_| {
        Error::CorruptRow {
          id,
          reason: format!("createdIn = {} is out of range", self.created_in),
        }
      })?,
    })
  }
}
