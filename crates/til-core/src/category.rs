//! Fact categories and the list filter built from them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator as _, IntoStaticStr};

use crate::{Error, Result};

// ─── Category ────────────────────────────────────────────────────────────────

/// The fixed set of labels a fact can be filed under. Declaration order is
/// display order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
  Technology,
  Science,
  Finance,
  Society,
  Entertainment,
  Health,
  History,
  News,
}

impl Category {
  /// Every category in display order.
  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }

  /// The lowercase name stored in the `category` column.
  pub fn name(self) -> &'static str { self.into() }

  /// Display color as a `#rrggbb` hex string.
  pub fn color(self) -> &'static str {
    match self {
      Self::Technology => "#3b82f6",
      Self::Science => "#16a34a",
      Self::Finance => "#ef4444",
      Self::Society => "#eab308",
      Self::Entertainment => "#db2777",
      Self::Health => "#14b8a6",
      Self::History => "#f97316",
      Self::News => "#8b5cf6",
    }
  }

  /// Display color decoded into `(r, g, b)`.
  pub fn rgb(self) -> (u8, u8, u8) {
    let hex = &self.color()[1..];
    let channel =
      |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or_default();
    (channel(0), channel(2), channel(4))
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Category {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::iter()
      .find(|c| c.name() == s)
      .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
  }
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Which slice of the fact list the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
  #[default]
  All,
  Only(Category),
}

impl CategoryFilter {
  /// The category to filter on, or `None` for everything.
  pub fn category(self) -> Option<Category> {
    match self {
      Self::All => None,
      Self::Only(c) => Some(c),
    }
  }

  /// `All` followed by every category, in sidebar order.
  pub fn choices() -> impl Iterator<Item = Self> {
    std::iter::once(Self::All).chain(Category::all().map(Self::Only))
  }
}

impl fmt::Display for CategoryFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("all"),
      Self::Only(c) => c.fmt(f),
    }
  }
}

impl FromStr for CategoryFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if s == "all" {
      Ok(Self::All)
    } else {
      s.parse().map(Self::Only)
    }
  }
}
