//! til-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the fact table over HTTP.
//!
//! # API key hash generation
//!
//! To generate the argon2 PHC string for `api_key_hash` in config.toml:
//!
//! ```
//! cargo run -p til-server -- --hash-key
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use til_server::{AppState, REST_PREFIX, ServerConfig, auth::{self, AuthConfig}, seed};
use til_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Today I Learned fact table server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for an API key entered on stdin and exit.
  #[arg(long)]
  hash_key: bool,

  /// Insert the sample facts if the table is empty.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a key and exit.
  if cli.hash_key {
    let key = read_stdin_line("API key: ")?;
    println!("{}", auth::hash_key(&key)?);
    return Ok(());
  }

  let server_cfg = ServerConfig::load(cli.config).context("failed to load configuration")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if cli.seed || server_cfg.seed {
    let inserted = seed::seed_if_empty(&store)
      .await
      .context("failed to seed sample facts")?;
    if inserted > 0 {
      tracing::info!(inserted, "seeded sample facts");
    }
  }

  if server_cfg.api_key_hash.is_none() {
    tracing::warn!("no api_key_hash configured; the fact table is open to anyone");
  }

  let state = AppState {
    store: Arc::new(store),
    auth:  Arc::new(AuthConfig {
      key_hash: server_cfg.api_key_hash.clone(),
    }),
  };

  let app = til_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}{REST_PREFIX}/facts");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read one line from stdin after printing `prompt`.
fn read_stdin_line(prompt: &str) -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("{prompt}");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
