//! [`ResponseDatabase`]: the SQLite implementation of [`ResponseArchive`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::{
  ArchiveConfig, ArchiveOptions, Error, Result,
  archive::ResponseArchive,
  encode::{RECORD_COLUMNS, RawEndpointCount, RawResponse, decode_status, encode_dt, truncate_dt, url_hash},
  model::{EndpointCount, EndpointDescriptor, EndpointFilter, NewResponse, PageRange, ResponseRecord},
  query::{Condition, retention_cutoff},
  schema::{run_migrations, sync_schema},
};

// ─── State ───────────────────────────────────────────────────────────────────

enum State {
  Uninitialized,
  Initialized(tokio_rusqlite::Connection),
  Closed,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An archive of API exchanges backed by a single SQLite database.
///
/// Starts out uninitialised; [`init`](Self::init) connects and
/// [`close`](Self::close) disconnects. Every data operation fails with
/// [`Error::NotInitialized`] outside that window.
pub struct ResponseDatabase {
  config: ArchiveConfig,
  state:  RwLock<State>,
}

impl ResponseDatabase {
  /// Resolve configuration from `options` and the process environment.
  ///
  /// Fails immediately on an invalid port; does not connect.
  pub fn new(options: ArchiveOptions) -> Result<Self> {
    Ok(Self::with_config(ArchiveConfig::from_env(options)?))
  }

  pub fn with_config(config: ArchiveConfig) -> Self {
    Self { config, state: RwLock::new(State::Uninitialized) }
  }

  pub fn config(&self) -> &ArchiveConfig { &self.config }

  pub fn is_initialized(&self) -> bool {
    matches!(*self.read_state(), State::Initialized(_))
  }

  /// Connect and synchronise the schema.
  ///
  /// Returns `true` on success or if already connected. A connection failure
  /// is reported as `false` so callers can carry on without archival.
  pub async fn init(&self) -> bool {
    if self.is_initialized() {
      return true;
    }

    match self.connect().await {
      Ok(conn) => {
        let mut state = self.write_state();
        // Another caller may have connected while we were awaiting.
        if !matches!(*state, State::Initialized(_)) {
          *state = State::Initialized(conn);
        }
        drop(state);
        self.print_debug("Responses database initialized", None);
        true
      }
      Err(err) => {
        self.print_debug("Responses database initialization failed", Some(&err));
        false
      }
    }
  }

  /// Apply pending schema migrations. Returns how many ran; `0` when the
  /// schema is already current.
  pub async fn migrate(&self) -> Result<usize> {
    let conn = self.connection()?;
    let applied = conn
      .call(|conn| Ok(run_migrations(conn)?))
      .await?;
    if applied > 0 {
      tracing::info!(applied, database = %self.config.database, "applied schema migrations");
    }
    Ok(applied)
  }

  /// Re-apply the idempotent baseline schema.
  pub async fn sync(&self) -> Result<()> {
    let conn = self.connection()?;
    conn.call(|conn| Ok(sync_schema(conn)?)).await?;
    Ok(())
  }

  /// Disconnect. A no-op unless initialised.
  pub async fn close(&self) -> Result<()> {
    let conn = {
      let mut state = self.write_state();
      match std::mem::replace(&mut *state, State::Closed) {
        State::Initialized(conn) => conn,
        previous => {
          *state = previous;
          return Ok(());
        }
      }
    };
    conn.close().await?;
    self.print_debug("Responses database closed", None);
    Ok(())
  }

  // ── Internals ─────────────────────────────────────────────────────────

  async fn connect(&self) -> Result<tokio_rusqlite::Connection> {
    tracing::debug!(config = ?self.config, "opening responses database");
    let conn = tokio_rusqlite::Connection::open(&self.config.database).await?;
    conn.call(|conn| Ok(sync_schema(conn)?)).await?;
    Ok(conn)
  }

  fn read_state(&self) -> RwLockReadGuard<'_, State> {
    self.state.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn write_state(&self) -> RwLockWriteGuard<'_, State> {
    self.state.write().unwrap_or_else(PoisonError::into_inner)
  }

  /// A handle to the open connection; cheap to clone.
  fn connection(&self) -> Result<tokio_rusqlite::Connection> {
    match &*self.read_state() {
      State::Initialized(conn) => Ok(conn.clone()),
      State::Uninitialized | State::Closed => Err(Error::NotInitialized),
    }
  }

  fn log_sql(&self, sql: &str) {
    if self.config.log_queries {
      tracing::debug!(target: "pxv_archive::sql", "{sql}");
    }
  }

  /// Lifecycle diagnostics, only emitted in development and test mode.
  fn print_debug(&self, text: &str, error: Option<&Error>) {
    if !self.config.diagnostics {
      return;
    }
    match error {
      Some(err) => tracing::error!(target: "pxv_archive", error = %err, "{text}"),
      None => tracing::debug!(target: "pxv_archive", "{text}"),
    }
  }

  /// Insert with an explicit creation time.
  pub(crate) async fn insert_response(
    &self,
    input: NewResponse,
    created_at: DateTime<Utc>,
  ) -> Result<ResponseRecord> {
    let conn = self.connection()?;

    let record = ResponseRecord {
      id:               0,
      url_hash:         url_hash(input.url.as_deref()),
      method:           input.method,
      endpoint:         input.endpoint,
      url:              input.url,
      request_headers:  input.request_headers,
      request_body:     input.request_body,
      response_type:    input.response_type,
      status_code:      input.status_code,
      response_headers: input.response_headers,
      response_body:    input.response_body,
      created_at:       truncate_dt(created_at),
    };

    let sql = "INSERT INTO responses (
         method, endpoint, url, url_hash, request_headers, request_body,
         response_type, status_code, response_headers, response_body, created_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
    self.log_sql(sql);

    let method_str        = record.method.as_str();
    let endpoint          = record.endpoint.clone();
    let url               = record.url.clone();
    let hash              = record.url_hash.clone();
    let request_headers   = record.request_headers.clone();
    let request_body      = record.request_body.clone();
    let response_type_str = record.response_type.as_str();
    let status_code       = i64::from(record.status_code);
    let response_headers  = record.response_headers.clone();
    let response_body     = record.response_body.clone();
    let created_at_str    = encode_dt(record.created_at);

    let id = conn
      .call(move |conn| {
        conn.execute(
          sql,
          rusqlite::params![
            method_str,
            endpoint,
            url,
            hash,
            request_headers,
            request_body,
            response_type_str,
            status_code,
            response_headers,
            response_body,
            created_at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(ResponseRecord { id, ..record })
  }
}

// ─── ResponseArchive impl ────────────────────────────────────────────────────

impl ResponseArchive for ResponseDatabase {
  type Error = Error;

  async fn add_response(&self, input: NewResponse) -> Result<ResponseRecord> {
    self.insert_response(input, Utc::now()).await
  }

  async fn get_responses(
    &self,
    filter: EndpointFilter,
    range: PageRange,
  ) -> Result<Vec<ResponseRecord>> {
    let conn = self.connection()?;
    let window = range.window()?;

    let Condition { sql: cond, mut params } =
      Condition::for_filter(&filter, retention_cutoff(Utc::now()));
    let mut sql =
      format!("SELECT {RECORD_COLUMNS} FROM responses WHERE {cond} ORDER BY id DESC");
    if let Some(window) = window {
      sql.push_str(" LIMIT ? OFFSET ?");
      params.push(rusqlite::types::Value::Integer(window.limit));
      params.push(rusqlite::types::Value::Integer(window.offset));
    }
    self.log_sql(&sql);

    let raws: Vec<RawResponse> = conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawResponse::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawResponse::into_record).collect()
  }

  async fn get_response_count(&self, filter: EndpointFilter) -> Result<u64> {
    let conn = self.connection()?;

    let Condition { sql: cond, params } =
      Condition::for_filter(&filter, retention_cutoff(Utc::now()));
    let sql = format!("SELECT COUNT(*) FROM responses WHERE {cond}");
    self.log_sql(&sql);

    let count: i64 = conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params_from_iter(params), |row| row.get(0))?)
      })
      .await?;

    Ok(u64::try_from(count).unwrap_or_default())
  }

  async fn get_endpoints(&self) -> Result<Vec<EndpointCount>> {
    let conn = self.connection()?;

    let Condition { sql: cond, params } =
      Condition::json_endpoints(retention_cutoff(Utc::now()));
    let sql = format!(
      "SELECT method, endpoint, status_code, COUNT(*) AS count
       FROM responses
       WHERE {cond}
       GROUP BY method, endpoint, status_code
       ORDER BY method, endpoint, status_code"
    );
    self.log_sql(&sql);

    let raws: Vec<RawEndpointCount> = conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawEndpointCount {
              method:      row.get(0)?,
              endpoint:    row.get(1)?,
              status_code: row.get(2)?,
              count:       row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| -> Result<EndpointCount> {
        Ok(EndpointCount {
          descriptor: EndpointDescriptor {
            method:      raw.method.parse()?,
            endpoint:    raw.endpoint,
            status_code: decode_status(raw.status_code)?,
          },
          count:      u64::try_from(raw.count).unwrap_or_default(),
        })
      })
      .collect()
  }
}
