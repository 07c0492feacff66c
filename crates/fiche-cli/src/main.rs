//! `fiche` — batch ingestion and analytics for the client-profile store.
//!
//! # Usage
//!
//! ```text
//! fiche ingest transcripts.csv
//! fiche kpis
//! fiche activations --reference-date 2026-04-30
//! fiche migrate
//! fiche cleanup
//! ```
//!
//! Configuration comes from `fiche.toml` (or `--config`), overridable with
//! `FICHE_`-prefixed environment variables.

mod ingest;
mod loader;

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fiche_activations::{ActivationEngine, ClientRecord};
use fiche_core::{
  lang::Lang,
  profile::ProfileDoc,
  store::{ClientFilter, ProfileStore},
};
use fiche_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "fiche", about = "Client-profile pipeline and store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "fiche.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Ingest a CSV / JSON / JSON-lines / text file of transcripts.
  Ingest {
    file: PathBuf,
    /// Batch identifier stamped on the snapshots (defaults to a UUID).
    #[arg(long)]
    batch_id: Option<String>,
  },
  /// Print KPI aggregates as JSON.
  Kpis,
  /// Print the budget × status matrix.
  Matrix,
  /// Print the most-attributed tags.
  TopTags {
    #[arg(long, default_value_t = 10)]
    limit: u32,
  },
  /// Run the activation engine over the latest profiles and print the
  /// weekly brief.
  Activations {
    /// Reference date for trigger computation (defaults to today).
    #[arg(long)]
    reference_date: Option<NaiveDate>,
  },
  /// Migrate a legacy flat-schema database in place.
  Migrate,
  /// Keep only the latest profile snapshot per client.
  Cleanup,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
  db_path:          PathBuf,
  json_dir:         PathBuf,
  language_default: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      db_path:          PathBuf::from("data/fiche.db"),
      json_dir:         PathBuf::from("output/profiles"),
      language_default: "FR".to_string(),
    }
  }
}

fn load_settings(path: &PathBuf) -> anyhow::Result<Settings> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.clone()).required(false))
    .add_source(config::Environment::with_prefix("FICHE"))
    .build()
    .context("invalid configuration")?;
  // An empty config resolves to the defaults.
  Ok(settings.try_deserialize().unwrap_or_default())
}

// ─── Main ────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("FICHE_LOG")
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings(&cli.config)?;

  if let Some(parent) = settings.db_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("cannot create {}", parent.display()))?;
  }

  match cli.command {
    Command::Ingest { file, batch_id } => {
      let store = SqliteStore::open(&settings.db_path).await?;
      let batch_id =
        batch_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
      let report = ingest::ingest_file(
        &store,
        &file,
        &settings.json_dir,
        Some(batch_id),
        &settings.language_default,
      )
      .await?;
      print!("{report}");
    }

    Command::Kpis => {
      let store = SqliteStore::open(&settings.db_path).await?;
      let report = store.kpis().await?;
      println!("{}", serde_json::to_string_pretty(&report)?);
      store.cache_stat("kpis", &serde_json::to_string(&report)?).await?;
    }

    Command::Matrix => {
      let store = SqliteStore::open(&settings.db_path).await?;
      for cell in store.budget_status_matrix().await? {
        println!("{}\t{}\t{}", cell.budget, cell.status, cell.clients);
      }
    }

    Command::TopTags { limit } => {
      let store = SqliteStore::open(&settings.db_path).await?;
      for tag in store.top_tags(limit).await? {
        println!(
          "{}\t{}/{}\t{}",
          tag.count,
          tag.category,
          tag.subcategory.as_deref().unwrap_or("-"),
          tag.tag_value
        );
      }
    }

    Command::Activations { reference_date } => {
      let store = SqliteStore::open(&settings.db_path).await?;
      let reference = reference_date.unwrap_or_else(|| Utc::now().date_naive());
      let batch = load_activation_batch(&store, reference).await?;
      let engine = ActivationEngine::new(reference);
      let activations = engine.run(&batch);
      println!("{}", engine.weekly_brief(&activations));
    }

    Command::Migrate => {
      let store = SqliteStore::open_unmigrated(&settings.db_path).await?;
      let report = store.migrate_legacy().await?;
      if report.already_migrated {
        println!("nothing to migrate");
      } else {
        println!(
          "migrated: {} clients, {} taggings, {} cached stats",
          report.legacy_clients, report.legacy_taggings, report.legacy_stats
        );
      }
    }

    Command::Cleanup => {
      let store = SqliteStore::open(&settings.db_path).await?;
      let removed = store.prune_snapshots().await?;
      println!("removed {removed} superseded snapshots");
    }
  }

  Ok(())
}

// ─── Activation batch assembly ───────────────────────────────────────────────

/// Rebuild the in-memory profile tree from a stored snapshot document.
fn doc_from_snapshot(profile_json: &str) -> anyhow::Result<ProfileDoc> {
  let mut value: serde_json::Value = serde_json::from_str(profile_json)?;
  if let Some(object) = value.as_object_mut() {
    object.remove("client_id");
    object.remove("metadata");
  }
  Ok(serde_json::from_value(value)?)
}

async fn load_activation_batch(
  store: &SqliteStore,
  reference: NaiveDate,
) -> anyhow::Result<Vec<ClientRecord>> {
  let ids = store
    .client_ids_page(&ClientFilter::default(), u32::MAX, 0)
    .await?;

  let mut batch = Vec::with_capacity(ids.len());
  for snapshot in store.get_profiles_by_ids(&ids).await? {
    let doc = doc_from_snapshot(&snapshot.profile_json)?;

    // The contextual signals (dates, trips, waitlists) live in the raw
    // text, not the tag set; re-derive them from the stored transcript.
    let context = match store.latest_transcript(&snapshot.client_id).await? {
      Some(transcript) => {
        let lang =
          transcript.language.as_deref().and_then(Lang::from_code);
        let cleaned = fiche_normalize::normalize(&transcript.text_raw, lang);
        fiche_extract::extract(&cleaned, lang, reference).context
      }
      None => Default::default(),
    };

    batch.push(ClientRecord { client_id: snapshot.client_id, doc, context });
  }
  Ok(batch)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn snapshot_document_round_trips_into_a_doc() {
    let json = r#"{
      "client_id": "CA-001",
      "metadata": {"profile_version": "2.0", "language": "FR",
                   "conversation_date": null, "duration": null},
      "identite": {"genre": "Femme", "age_brut": 45},
      "localisation": {"europe": ["Paris"]}
    }"#;
    let doc = doc_from_snapshot(json).unwrap();
    assert!(doc.get("identite").is_some());
    assert!(doc.get("client_id").is_none());

    let flat = doc.flatten();
    assert!(flat.iter().any(|f| f.value == "Paris"));
    assert!(flat.iter().any(|f| f.value == "45"));
  }

  #[test]
  fn settings_default_when_config_missing() {
    let settings = load_settings(&PathBuf::from("does-not-exist.toml")).unwrap();
    assert_eq!(settings.db_path, PathBuf::from("data/fiche.db"));
    assert_eq!(settings.language_default, "FR");
  }
}
