//! SQL schema for the response archive.
//!
//! [`SCHEMA`] is the idempotent baseline applied on every `sync`. Later
//! changes are listed in [`MIGRATIONS`] and gated on `PRAGMA user_version`.

/// Schema version written by the baseline.
pub const BASELINE_VERSION: i64 = 1;

/// Baseline DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Strictly append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS responses (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    method           TEXT    NOT NULL,   -- 'GET' | 'POST'
    endpoint         TEXT    NOT NULL,
    url              TEXT,
    url_hash         TEXT    NOT NULL,   -- hex sha256 of url ('' when NULL)
    request_headers  TEXT,
    request_body     TEXT,
    response_type    TEXT    NOT NULL,   -- 'JSON' | 'TEXT'
    status_code      INTEGER NOT NULL,
    response_headers TEXT,
    response_body    TEXT    NOT NULL,
    created_at       TEXT    NOT NULL    -- RFC 3339 UTC, microseconds
);

CREATE INDEX IF NOT EXISTS responses_created_idx  ON responses(created_at);
CREATE INDEX IF NOT EXISTS responses_endpoint_idx ON responses(method, endpoint, status_code);
";

/// A schema change applied once, in order, by `migrate`.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
  pub version: i64,
  pub sql:     &'static str,
}

pub const MIGRATIONS: &[Migration] = &[Migration {
  version: 2,
  sql:     "CREATE INDEX IF NOT EXISTS responses_url_hash_idx ON responses(url_hash);",
}];

/// Apply the baseline and stamp the version if the database is new.
pub fn sync_schema(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.execute_batch(SCHEMA)?;
  if schema_version(conn)? == 0 {
    conn.pragma_update(None, "user_version", BASELINE_VERSION)?;
  }
  Ok(())
}

pub fn schema_version(conn: &rusqlite::Connection) -> rusqlite::Result<i64> {
  conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Apply every migration newer than the stored version inside one
/// transaction. Returns how many ran.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> rusqlite::Result<usize> {
  let current = schema_version(conn)?;
  let pending: Vec<&Migration> =
    MIGRATIONS.iter().filter(|m| m.version > current).collect();
  if pending.is_empty() {
    return Ok(0);
  }

  let tx = conn.transaction()?;
  for migration in &pending {
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)?;
  }
  tx.commit()?;
  Ok(pending.len())
}
