//! Batch ingestion: normalize → extract → persist → JSON mirror, with a
//! per-row failure boundary and a final report.

use std::{collections::BTreeMap, fmt, path::Path};

use anyhow::Context as _;
use chrono::Utc;
use fiche_core::{
  entity::{NewSource, NewTranscript, SourceType},
  lang::Lang,
  profile::{ClientProfile, ProfileMetadata},
  store::{ProfileStore, SaveOptions},
};
use fiche_store_sqlite::SqliteStore;
use fiche_taxonomy::TAXONOMY_VERSION;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::loader::{self, InputRecord};

// ─── Batch report ────────────────────────────────────────────────────────────

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct BatchReport {
  pub total:     usize,
  pub succeeded: usize,
  pub failed:    usize,
  /// Error message → occurrence count.
  pub failures:  BTreeMap<String, u32>,
  /// Per-row warnings ("CA-001: budget not extracted").
  pub warnings:  Vec<String>,
}

impl fmt::Display for BatchReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "rows: {}", self.total)?;
    writeln!(f, "succeeded: {}", self.succeeded)?;
    writeln!(f, "failed: {}", self.failed)?;
    if !self.failures.is_empty() {
      writeln!(f, "failures:")?;
      for (kind, count) in &self.failures {
        writeln!(f, "  {count}× {kind}")?;
      }
    }
    if !self.warnings.is_empty() {
      writeln!(f, "warnings:")?;
      for warning in &self.warnings {
        writeln!(f, "  {warning}")?;
      }
    }
    Ok(())
  }
}

// ─── Ingestion ───────────────────────────────────────────────────────────────

fn source_type_for(path: &Path) -> SourceType {
  match path.extension().and_then(|e| e.to_str()) {
    Some("csv") => SourceType::CsvRow,
    _ => SourceType::Manual,
  }
}

fn sha256_hex(raw: &str) -> String {
  hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Ingest one input file. The loader fails fast; everything after that is
/// per-row: a failing row is logged and counted, the rest continue.
pub async fn ingest_file(
  store: &SqliteStore,
  path: &Path,
  json_dir: &Path,
  batch_id: Option<String>,
  default_language: &str,
) -> anyhow::Result<BatchReport> {
  let records = loader::load(path)?;
  let source_type = source_type_for(path);
  let file_name = path
    .file_name()
    .and_then(|n| n.to_str())
    .unwrap_or("input")
    .to_string();

  std::fs::create_dir_all(json_dir)
    .with_context(|| format!("cannot create {}", json_dir.display()))?;

  let mut report = BatchReport { total: records.len(), ..Default::default() };
  let reference = Utc::now().date_naive();

  for record in records {
    match ingest_row(
      store,
      &record,
      source_type,
      &file_name,
      json_dir,
      batch_id.clone(),
      default_language,
      reference,
    )
    .await
    {
      Ok(warnings) => {
        report.succeeded += 1;
        for warning in warnings {
          report.warnings.push(format!("{}: {warning}", record.client_id));
        }
      }
      Err(error) => {
        warn!(client_id = %record.client_id, %error, "row failed");
        report.failed += 1;
        *report.failures.entry(error.to_string()).or_insert(0) += 1;
      }
    }
  }

  info!(
    total = report.total,
    succeeded = report.succeeded,
    failed = report.failed,
    "batch finished"
  );
  Ok(report)
}

#[allow(clippy::too_many_arguments)]
async fn ingest_row(
  store: &SqliteStore,
  record: &InputRecord,
  source_type: SourceType,
  file_name: &str,
  json_dir: &Path,
  batch_id: Option<String>,
  default_language: &str,
  reference: chrono::NaiveDate,
) -> anyhow::Result<Vec<&'static str>> {
  let language_code = if record.language.is_empty() {
    default_language
  } else {
    &record.language
  };
  let lang = Lang::from_code(language_code);

  let cleaned = fiche_normalize::normalize(&record.transcription, lang);
  let extraction = fiche_extract::extract(&cleaned, lang, reference);
  let warnings = extraction.warnings();

  let source = NewSource {
    source_type,
    source_ref: format!("{file_name}:{}", record.row),
    source_hash: sha256_hex(&record.transcription),
  };
  let saved_source = store.save_source(source.clone()).await?;

  store
    .save_transcript(NewTranscript {
      client_id: record.client_id.clone(),
      source_id: saved_source.source_id,
      language:  Some(language_code.to_string()),
      duration:  record.duration.clone(),
      text_raw:  record.transcription.clone(),
    })
    .await?;

  let profile = ClientProfile {
    client_id:    record.client_id.clone(),
    metadata:     ProfileMetadata {
      conversation_date: record.date.clone(),
      duration:          record.duration.clone(),
      language:          Some(language_code.to_string()),
      profile_version:   TAXONOMY_VERSION.to_string(),
    },
    doc:          extraction.doc,
    observations: extraction.observations,
  };

  let mirror = profile.to_json_pretty()?;
  store
    .save_profile(profile, SaveOptions { source: Some(source), rule: None, batch_id })
    .await?;

  // Human-inspectable mirror, one file per client.
  let mirror_path = json_dir.join(format!("{}.json", record.client_id));
  std::fs::write(&mirror_path, mirror)
    .with_context(|| format!("cannot write {}", mirror_path.display()))?;

  Ok(warnings)
}
