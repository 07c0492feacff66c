//! Persistent entities of the profile store.
//!
//! Every tag attribution is traceable: a [`Tagging`] references the client it
//! describes, the catalogued [`Tag`], the [`TagRule`] that produced it, and
//! the [`Source`] document it was derived from. Profile snapshots are
//! append-only and keyed by `(client_id, profile_version)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Client ──────────────────────────────────────────────────────────────────

/// A client, created on first observation and never deleted (only
/// superseded by newer snapshots).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
  pub client_id:  String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// How a source document entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
  CsvRow,
  VoiceRecording,
  Manual,
  Legacy,
}

impl SourceType {
  /// The string stored in the `source_type` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::CsvRow => "csv_row",
      Self::VoiceRecording => "voice_recording",
      Self::Manual => "manual",
      Self::Legacy => "legacy",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "csv_row" => Ok(Self::CsvRow),
      "voice_recording" => Ok(Self::VoiceRecording),
      "manual" => Ok(Self::Manual),
      "legacy" => Ok(Self::Legacy),
      other => Err(Error::UnknownSourceType(other.to_string())),
    }
  }
}

/// An ingest event. Unique by `(source_type, source_ref, source_hash)`, so
/// re-ingesting identical raw content collapses to one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
  pub source_id:   i64,
  pub source_type: SourceType,
  /// Opaque locator: file path + row number, recording id, etc.
  pub source_ref:  String,
  /// SHA-256 of the raw content, lowercase hex.
  pub source_hash: String,
  pub ingested_at: DateTime<Utc>,
}

/// Input to [`crate::store::ProfileStore::save_source`].
/// `ingested_at` is always set by the store.
#[derive(Debug, Clone)]
pub struct NewSource {
  pub source_type: SourceType,
  pub source_ref:  String,
  pub source_hash: String,
}

// ─── Transcript ──────────────────────────────────────────────────────────────

/// The raw text of a recorded conversation, linking a client to a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
  pub transcript_id: i64,
  pub client_id:     String,
  pub source_id:     i64,
  /// ISO language code as supplied by the loader (`FR`, `EN`, …).
  pub language:      Option<String>,
  pub duration:      Option<String>,
  pub text_raw:      String,
}

/// Input to [`crate::store::ProfileStore::save_transcript`].
#[derive(Debug, Clone)]
pub struct NewTranscript {
  pub client_id: String,
  pub source_id: i64,
  pub language:  Option<String>,
  pub duration:  Option<String>,
  pub text_raw:  String,
}

// ─── TagRule ─────────────────────────────────────────────────────────────────

/// A named extraction rule. Unique by `(rule_name, rule_version)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRule {
  pub rule_id:         i64,
  pub rule_name:       String,
  pub rule_version:    String,
  /// Opaque serialized configuration (JSON).
  pub rule_definition: String,
  pub is_active:       bool,
  pub created_at:      DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTagRule {
  pub rule_name:       String,
  pub rule_version:    String,
  pub rule_definition: String,
  pub is_active:       bool,
}

// ─── Tag ─────────────────────────────────────────────────────────────────────

/// A catalogued taxonomy entry. Unique by
/// `(category, subcategory, tag_value, tag_version)`; recurring values are
/// re-used, never duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
  pub tag_id:      i64,
  pub category:    String,
  /// `/`-separated path below the category, or `None` for a direct value.
  pub subcategory: Option<String>,
  pub tag_value:   String,
  pub tag_version: String,
}

// ─── Tagging ─────────────────────────────────────────────────────────────────

/// The attribution event binding a client to a taxonomy tag via a rule and a
/// source. Orphaned rows are forbidden at the schema level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tagging {
  pub tagging_id: i64,
  pub client_id:  String,
  pub tag_id:     i64,
  pub rule_id:    i64,
  pub source_id:  i64,
  /// Attribution confidence in `[0, 1]`. Deterministic rules emit 1.0.
  pub score:      f64,
  /// Matching text span or JSON payload supporting the attribution.
  pub evidence:   Option<String>,
  pub created_at: DateTime<Utc>,
}

// ─── ProfileSnapshot ─────────────────────────────────────────────────────────

/// An immutable serialized profile document, keyed by
/// `(client_id, profile_version)`. The client's current profile is the
/// snapshot with the greatest `generated_at`, ties broken by greatest
/// `profile_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshot {
  pub profile_id:      i64,
  pub client_id:       String,
  pub profile_version: String,
  pub profile_json:    String,
  pub generated_at:    DateTime<Utc>,
  pub source_batch_id: Option<String>,
}

impl ProfileSnapshot {
  /// Parse the stored document back into a JSON value.
  pub fn document(&self) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(&self.profile_json)?)
  }
}

// ─── StatsEntry ──────────────────────────────────────────────────────────────

/// A named aggregation result cached by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEntry {
  pub stat_name:   String,
  pub stat_value:  String,
  pub computed_at: DateTime<Utc>,
}
