//! Connection settings for the response archive.
//!
//! Resolved once, at construction, with the precedence
//! explicit option > `RESPONSE_DB_*` environment variable > built-in default.
//! A bad port fails here rather than on the first connection attempt.

use std::{collections::HashMap, fmt};

use serde::Deserialize;

use crate::{Error, Result};

/// Prefix of the environment variables read by [`ArchiveConfig::resolve`],
/// e.g. `RESPONSE_DB_PORT`.
pub const ENV_PREFIX: &str = "RESPONSE_DB";

/// `true` enables logging of every SQL statement the archive runs.
pub const PRINT_DB_LOGS_VAR: &str = "PRINT_DB_LOGS";

/// Deployment mode. Archive diagnostics are only emitted in `development`
/// and `test`.
pub const APP_ENV_VAR: &str = "APP_ENV";

pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_DATABASE: &str = "responses.db";

/// Caller-supplied overrides. Every field left `None` falls back to the
/// environment and then to the default.
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
  pub hostname: Option<String>,
  /// Kept as text so an invalid value can be reported as given.
  pub port:     Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
  pub database: Option<String>,
}

/// Fully resolved archive settings.
///
/// The SQLite backend opens `database` as a file path (`:memory:` works).
/// Host, port and credentials are validated and carried for logging and for
/// server-backed deployments.
#[derive(Clone)]
pub struct ArchiveConfig {
  pub hostname:    String,
  pub port:        u16,
  pub username:    Option<String>,
  pub password:    Option<String>,
  pub database:    String,
  pub log_queries: bool,
  pub diagnostics: bool,
}

impl fmt::Debug for ArchiveConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ArchiveConfig")
      .field("hostname", &self.hostname)
      .field("port", &self.port)
      .field("username", &self.username)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("database", &self.database)
      .field("log_queries", &self.log_queries)
      .field("diagnostics", &self.diagnostics)
      .finish()
  }
}

#[derive(Deserialize)]
struct RawSettings {
  hostname: String,
  #[serde(default)]
  port:     Option<String>,
  #[serde(default)]
  username: Option<String>,
  #[serde(default)]
  password: Option<String>,
  database: String,
}

impl ArchiveConfig {
  /// Resolve against the process environment.
  pub fn from_env(options: ArchiveOptions) -> Result<Self> {
    Self::resolve(options, std::env::vars().collect())
  }

  /// Resolve against an explicit environment map.
  pub fn resolve(options: ArchiveOptions, env: HashMap<String, String>) -> Result<Self> {
    let log_queries = env.get(PRINT_DB_LOGS_VAR).is_some_and(|v| v == "true");
    let diagnostics = env
      .get(APP_ENV_VAR)
      .is_some_and(|v| v == "development" || v == "test");

    let settings = config::Config::builder()
      .set_default("hostname", DEFAULT_HOSTNAME)?
      .set_default("database", DEFAULT_DATABASE)?
      .add_source(config::Environment::with_prefix(ENV_PREFIX).source(Some(env)))
      .set_override_option("hostname", options.hostname)?
      .set_override_option("port", options.port)?
      .set_override_option("username", options.username)?
      .set_override_option("password", options.password)?
      .set_override_option("database", options.database)?
      .build()?;

    let raw: RawSettings = settings.try_deserialize()?;

    Ok(Self {
      hostname: raw.hostname,
      port: parse_port(raw.port.as_deref())?,
      username: raw.username,
      password: raw.password,
      database: raw.database,
      log_queries,
      diagnostics,
    })
  }

  /// Settings for a private in-memory database, with diagnostics off.
  pub fn in_memory() -> Self {
    Self {
      hostname:    DEFAULT_HOSTNAME.to_owned(),
      port:        DEFAULT_PORT,
      username:    None,
      password:    None,
      database:    ":memory:".to_owned(),
      log_queries: false,
      diagnostics: false,
    }
  }
}

/// `None` means "use the default port". Anything else must be an integer in
/// `1..=65535`.
fn parse_port(port: Option<&str>) -> Result<u16> {
  let Some(text) = port else {
    return Ok(DEFAULT_PORT);
  };
  text
    .trim()
    .parse::<i64>()
    .ok()
    .filter(|p| *p > 0)
    .and_then(|p| u16::try_from(p).ok())
    .ok_or_else(|| Error::InvalidPort(text.to_owned()))
}
