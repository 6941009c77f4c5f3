//! SQL schema for the SQLite fact table.
//!
//! Executed once at connection startup. Column names match the hosted table
//! so rows serialise identically from either backend.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are inserted once; afterwards only the vote columns are updated.
CREATE TABLE IF NOT EXISTS facts (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    text             TEXT    NOT NULL CHECK (length(text) BETWEEN 1 AND 200),
    source           TEXT    NOT NULL,
    category         TEXT    NOT NULL CHECK (category IN (
                       'technology', 'science', 'finance', 'society',
                       'entertainment', 'health', 'history', 'news')),
    votesInteresting INTEGER NOT NULL DEFAULT 0 CHECK (votesInteresting >= 0),
    votesMindblowing INTEGER NOT NULL DEFAULT 0 CHECK (votesMindblowing >= 0),
    votesFalse       INTEGER NOT NULL DEFAULT 0 CHECK (votesFalse >= 0),
    createdIn        INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS facts_category_idx ON facts(category);

PRAGMA user_version = 1;
";
