//! `pxv-archive`: inspect a response archive.
//!
//! # Usage
//!
//! ```
//! pxv-archive endpoints
//! pxv-archive count --method GET --endpoint /v1/illust/detail --status 200
//! pxv-archive --database /var/lib/pxv/responses.db responses --page 1 --limit 20
//! pxv-archive migrate
//! ```
//!
//! Connection settings not given as flags come from `RESPONSE_DB_*`.

use anyhow::{Context as _, Result, bail};
use clap::{Args, Parser, Subcommand};
use pxv_archive::{
  ArchiveOptions, EndpointDescriptor, EndpointFilter, HttpMethod, PageRange,
  ResponseArchive, ResponseDatabase,
};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "pxv-archive", version, about = "Inspect archived API responses")]
struct Cli {
  #[arg(long, global = true)]
  hostname: Option<String>,

  #[arg(long, global = true)]
  port: Option<String>,

  #[arg(long, global = true)]
  username: Option<String>,

  #[arg(long, global = true)]
  password: Option<String>,

  /// Path of the SQLite archive (default: responses.db).
  #[arg(long, global = true, value_name = "PATH")]
  database: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every endpoint seen with a JSON response, with counts.
  Endpoints,

  /// Print matching records as JSON lines, newest first.
  Responses {
    #[command(flatten)]
    descriptor: DescriptorArgs,

    /// 1-indexed page number; requires --limit.
    #[arg(long)]
    page: Option<i64>,

    /// Page size; requires --page.
    #[arg(long)]
    limit: Option<i64>,
  },

  /// Print how many records match.
  Count {
    #[command(flatten)]
    descriptor: DescriptorArgs,
  },

  /// Apply pending schema migrations.
  Migrate,
}

/// Restrict to one `(method, endpoint, status)`; all three or none.
#[derive(Args, Debug)]
struct DescriptorArgs {
  #[arg(long, requires_all = ["endpoint", "status"])]
  method: Option<HttpMethod>,

  #[arg(long, requires_all = ["method", "status"])]
  endpoint: Option<String>,

  #[arg(long, requires_all = ["method", "endpoint"])]
  status: Option<u16>,
}

impl DescriptorArgs {
  fn filter(self) -> EndpointFilter {
    match (self.method, self.endpoint, self.status) {
      (Some(method), Some(endpoint), Some(status)) => {
        EndpointDescriptor::new(method, endpoint, status).into()
      }
      _ => EndpointFilter::All,
    }
  }
}

impl Cli {
  fn options(&self) -> ArchiveOptions {
    ArchiveOptions {
      hostname: self.hostname.clone(),
      port:     self.port.clone(),
      username: self.username.clone(),
      password: self.password.clone(),
      database: self.database.clone(),
    }
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let db = ResponseDatabase::new(cli.options()).context("invalid archive configuration")?;
  if !db.init().await {
    bail!("could not open responses database {:?}", db.config().database);
  }

  let outcome = run(&db, cli.command).await;
  db.close().await.context("closing responses database")?;
  outcome
}

async fn run(db: &ResponseDatabase, command: Command) -> Result<()> {
  match command {
    Command::Endpoints => {
      let endpoints = db.get_endpoints().await.context("listing endpoints")?;
      print_lines(&endpoints)?;
    }
    Command::Responses { descriptor, page, limit } => {
      let records = db
        .get_responses(descriptor.filter(), PageRange { page, limit })
        .await
        .context("listing responses")?;
      print_lines(&records)?;
    }
    Command::Count { descriptor } => {
      let count = db
        .get_response_count(descriptor.filter())
        .await
        .context("counting responses")?;
      println!("{count}");
    }
    Command::Migrate => {
      let applied = db.migrate().await.context("migrating schema")?;
      println!("applied {applied} migration(s)");
    }
  }
  Ok(())
}

/// One JSON document per line on stdout.
fn print_lines<T: Serialize>(items: &[T]) -> Result<()> {
  for item in items {
    println!("{}", serde_json::to_string(item)?);
  }
  Ok(())
}
