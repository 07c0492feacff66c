//! Encoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; content hashes are lowercase SHA-256
//! hex.

use chrono::{DateTime, Utc};
use fiche_core::entity::{ProfileSnapshot, Source, SourceType, Transcript};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Hashing ─────────────────────────────────────────────────────────────────

/// SHA-256 of raw content, lowercase hex — the `source_hash` column.
pub fn content_hash(raw: &str) -> String {
  hex::encode(Sha256::digest(raw.as_bytes()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `client_profiles` row.
pub struct RawSnapshot {
  pub profile_id:      i64,
  pub client_id:       String,
  pub profile_version: String,
  pub profile_json:    String,
  pub generated_at:    String,
  pub source_batch_id: Option<String>,
}

impl RawSnapshot {
  pub fn into_snapshot(self) -> Result<ProfileSnapshot> {
    Ok(ProfileSnapshot {
      profile_id:      self.profile_id,
      client_id:       self.client_id,
      profile_version: self.profile_version,
      profile_json:    self.profile_json,
      generated_at:    decode_dt(&self.generated_at)?,
      source_batch_id: self.source_batch_id,
    })
  }
}

/// Raw strings read from a `sources` row.
pub struct RawSource {
  pub source_id:   i64,
  pub source_type: String,
  pub source_ref:  String,
  pub source_hash: String,
  pub ingested_at: String,
}

impl RawSource {
  pub fn into_source(self) -> Result<Source> {
    Ok(Source {
      source_id:   self.source_id,
      source_type: SourceType::parse(&self.source_type)?,
      source_ref:  self.source_ref,
      source_hash: self.source_hash,
      ingested_at: decode_dt(&self.ingested_at)?,
    })
  }
}

/// Raw strings read from a `transcripts` row.
pub struct RawTranscript {
  pub transcript_id: i64,
  pub client_id:     String,
  pub source_id:     i64,
  pub language:      Option<String>,
  pub duration:      Option<String>,
  pub text_raw:      String,
}

impl RawTranscript {
  pub fn into_transcript(self) -> Transcript {
    Transcript {
      transcript_id: self.transcript_id,
      client_id:     self.client_id,
      source_id:     self.source_id,
      language:      self.language,
      duration:      self.duration,
      text_raw:      self.text_raw,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dt_round_trip() {
    let now = Utc::now();
    let decoded = decode_dt(&encode_dt(now)).unwrap();
    assert_eq!(decoded, now);
  }

  #[test]
  fn content_hash_is_stable_hex() {
    let h = content_hash("bonjour");
    assert_eq!(h.len(), 64);
    assert_eq!(h, content_hash("bonjour"));
    assert_ne!(h, content_hash("bonsoir"));
  }
}
