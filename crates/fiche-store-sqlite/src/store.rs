//! [`SqliteStore`] — the SQLite implementation of
//! [`fiche_core::store::ProfileStore`].

use std::path::Path;

use chrono::Utc;
use fiche_core::{
  entity::{
    Client, NewSource, NewTagRule, NewTranscript, ProfileSnapshot, Source,
    SourceType, Tag, TagRule, Tagging, Transcript,
  },
  profile::ClientProfile,
  store::{ClientFilter, KpiReport, MatrixCell, ProfileStore, SaveOptions, TagCount},
};
use fiche_taxonomy::TAXONOMY_VERSION;
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawSnapshot, RawSource, RawTranscript, content_hash, encode_dt},
  query,
  schema::SCHEMA,
};

/// The rule attributed to taggings when the caller does not name one.
pub const DEFAULT_RULE_NAME: &str = "tag_extractor";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A profile store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    // Never lay the new schema over a legacy database: the legacy `clients`
    // table has an incompatible shape and must be renamed first.
    if self.has_legacy_schema().await? {
      return Err(Error::LegacySchema);
    }
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a client row. `None` if the client was never observed.
  pub async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
    let client_id = client_id.to_string();
    let row: Option<(String, String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT client_id, created_at, updated_at FROM clients
               WHERE client_id = ?1",
              rusqlite::params![client_id],
              |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?,
        )
      })
      .await?;
    row
      .map(|(client_id, created_at, updated_at)| {
        Ok(Client {
          client_id,
          created_at: crate::encode::decode_dt(&created_at)?,
          updated_at: crate::encode::decode_dt(&updated_at)?,
        })
      })
      .transpose()
  }

  /// Full traceability view: every tagging of a client together with its
  /// catalogued tag, newest first.
  pub async fn client_taggings(
    &self,
    client_id: &str,
  ) -> Result<Vec<(Tagging, Tag)>> {
    let client_id = client_id.to_string();
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT tg.tagging_id, tg.client_id, tg.tag_id, tg.rule_id,
                  tg.source_id, tg.score, tg.evidence, tg.created_at,
                  t.category, t.subcategory, t.tag_value, t.tag_version
           FROM taggings tg
           JOIN tags t ON t.tag_id = tg.tag_id
           WHERE tg.client_id = ?1
           ORDER BY tg.tagging_id DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![client_id], |row| {
            Ok((
              row.get::<_, i64>(0)?,
              row.get::<_, String>(1)?,
              row.get::<_, i64>(2)?,
              row.get::<_, i64>(3)?,
              row.get::<_, i64>(4)?,
              row.get::<_, f64>(5)?,
              row.get::<_, Option<String>>(6)?,
              row.get::<_, String>(7)?,
              row.get::<_, String>(8)?,
              row.get::<_, Option<String>>(9)?,
              row.get::<_, String>(10)?,
              row.get::<_, String>(11)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(tagging_id, client_id, tag_id, rule_id, source_id, score,
             evidence, created_at, category, subcategory, tag_value, tag_version)| {
        Ok((
          Tagging {
            tagging_id,
            client_id,
            tag_id,
            rule_id,
            source_id,
            score,
            evidence,
            created_at: crate::encode::decode_dt(&created_at)?,
          },
          Tag { tag_id, category, subcategory, tag_value, tag_version },
        ))
      })
      .collect()
  }

  /// Look up an extraction rule by name and version.
  pub async fn get_rule(
    &self,
    name: &str,
    version: &str,
  ) -> Result<Option<TagRule>> {
    let name = name.to_string();
    let version = version.to_string();
    let row: Option<(i64, String, String, String, i64, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT rule_id, rule_name, rule_version, rule_definition,
                      is_active, created_at
               FROM tag_rules WHERE rule_name = ?1 AND rule_version = ?2",
              rusqlite::params![name, version],
              |row| {
                Ok((
                  row.get(0)?,
                  row.get(1)?,
                  row.get(2)?,
                  row.get(3)?,
                  row.get(4)?,
                  row.get(5)?,
                ))
              },
            )
            .optional()?,
        )
      })
      .await?;
    row
      .map(|(rule_id, rule_name, rule_version, rule_definition, is_active, created_at)| {
        Ok(TagRule {
          rule_id,
          rule_name,
          rule_version,
          rule_definition,
          is_active: is_active != 0,
          created_at: crate::encode::decode_dt(&created_at)?,
        })
      })
      .transpose()
  }

  /// Latest raw transcript for a client, if any — used to re-derive the
  /// activation context without re-ingesting.
  pub async fn latest_transcript(
    &self,
    client_id: &str,
  ) -> Result<Option<Transcript>> {
    let client_id = client_id.to_string();
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT transcript_id, client_id, source_id, language, duration, text_raw
               FROM transcripts
               WHERE client_id = ?1
               ORDER BY transcript_id DESC
               LIMIT 1",
              rusqlite::params![client_id],
              |row| {
                Ok(RawTranscript {
                  transcript_id: row.get(0)?,
                  client_id:     row.get(1)?,
                  source_id:     row.get(2)?,
                  language:      row.get(3)?,
                  duration:      row.get(4)?,
                  text_raw:      row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.map(RawTranscript::into_transcript))
  }

  /// Whether the database still carries the legacy flat layout
  /// (a `clients` table with an embedded `date_conversation` column).
  pub(crate) async fn has_legacy_schema(&self) -> Result<bool> {
    let legacy = self
      .conn
      .call(|conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'clients'",
            [],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !exists {
          return Ok(false);
        }
        let mut stmt = conn.prepare("PRAGMA table_info(clients)")?;
        let columns = stmt
          .query_map([], |row| row.get::<_, String>(1))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(columns.iter().any(|c| c == "date_conversation"))
      })
      .await?;
    Ok(legacy)
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  // ── Write paths ───────────────────────────────────────────────────────────

  async fn save_profile(
    &self,
    profile: ClientProfile,
    options: SaveOptions,
  ) -> Result<ProfileSnapshot> {
    if profile.client_id.trim().is_empty() {
      return Err(Error::Core(fiche_core::Error::EmptyClientId));
    }
    if self.has_legacy_schema().await? {
      return Err(Error::LegacySchema);
    }

    let client_id = profile.client_id.clone();
    let profile_json = profile.to_json()?;
    let version = if profile.metadata.profile_version.is_empty() {
      TAXONOMY_VERSION.to_string()
    } else {
      profile.metadata.profile_version.clone()
    };
    let now_str = encode_dt(Utc::now());
    let batch_id = options.batch_id.clone();

    // Flatten the document and join each leaf to its observation.
    let leaves: Vec<(String, Option<String>, String, f64, Option<String>)> =
      profile
        .doc
        .flatten()
        .into_iter()
        .map(|flat| {
          let (score, evidence) = match profile.observation_for(&flat) {
            Some(obs) => (obs.score, obs.evidence.clone()),
            None => (1.0, None),
          };
          (flat.category, flat.subcategory, flat.value, score, evidence)
        })
        .collect();

    let source = options.source.unwrap_or_else(|| NewSource {
      source_type: SourceType::Manual,
      source_ref:  format!("profile:{client_id}"),
      source_hash: content_hash(&profile_json),
    });
    let rule = options.rule.unwrap_or_else(|| NewTagRule {
      rule_name:       DEFAULT_RULE_NAME.to_string(),
      rule_version:    TAXONOMY_VERSION.to_string(),
      rule_definition: format!(
        "{{\"engine\":\"keyword_dictionary\",\"taxonomy_version\":\"{TAXONOMY_VERSION}\"}}"
      ),
      is_active:       true,
    });

    let snapshot = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Client: create on first observation, bump updated_at after.
        tx.execute(
          "INSERT INTO clients (client_id, created_at, updated_at)
           VALUES (?1, ?2, ?2)
           ON CONFLICT (client_id) DO UPDATE SET updated_at = excluded.updated_at",
          rusqlite::params![client_id, now_str],
        )?;

        // Default source and rule are get-or-created.
        tx.execute(
          "INSERT OR IGNORE INTO sources (source_type, source_ref, source_hash, ingested_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            source.source_type.as_str(),
            source.source_ref,
            source.source_hash,
            now_str,
          ],
        )?;
        let source_id: i64 = tx.query_row(
          "SELECT source_id FROM sources
           WHERE source_type = ?1 AND source_ref = ?2 AND source_hash = ?3",
          rusqlite::params![
            source.source_type.as_str(),
            source.source_ref,
            source.source_hash,
          ],
          |row| row.get(0),
        )?;

        tx.execute(
          "INSERT OR IGNORE INTO tag_rules
             (rule_name, rule_version, rule_definition, is_active, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            rule.rule_name,
            rule.rule_version,
            rule.rule_definition,
            rule.is_active as i64,
            now_str,
          ],
        )?;
        let rule_id: i64 = tx.query_row(
          "SELECT rule_id FROM tag_rules WHERE rule_name = ?1 AND rule_version = ?2",
          rusqlite::params![rule.rule_name, rule.rule_version],
          |row| row.get(0),
        )?;

        // Snapshot: replace semantics on a (client, version) collision.
        tx.execute(
          "INSERT OR REPLACE INTO client_profiles
             (client_id, profile_version, profile_json, generated_at, source_batch_id)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![client_id, version, profile_json, now_str, batch_id],
        )?;
        let profile_id = tx.last_insert_rowid();

        // Re-derive the taggings for this (client, rule, source) triple.
        tx.execute(
          "DELETE FROM taggings WHERE client_id = ?1 AND rule_id = ?2 AND source_id = ?3",
          rusqlite::params![client_id, rule_id, source_id],
        )?;

        for (category, subcategory, value, score, evidence) in &leaves {
          tx.execute(
            "INSERT OR IGNORE INTO tags (category, subcategory, tag_value, tag_version)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![category, subcategory, value, TAXONOMY_VERSION],
          )?;
          let tag_id: i64 = tx.query_row(
            "SELECT tag_id FROM tags
             WHERE category = ?1 AND subcategory IS ?2 AND tag_value = ?3 AND tag_version = ?4",
            rusqlite::params![category, subcategory, value, TAXONOMY_VERSION],
            |row| row.get(0),
          )?;
          tx.execute(
            "INSERT INTO taggings
               (client_id, tag_id, rule_id, source_id, score, evidence, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
              client_id, tag_id, rule_id, source_id, score, evidence, now_str
            ],
          )?;
        }

        tx.commit()?;

        Ok(RawSnapshot {
          profile_id,
          client_id,
          profile_version: version,
          profile_json,
          generated_at: now_str,
          source_batch_id: batch_id,
        })
      })
      .await?;

    snapshot.into_snapshot()
  }

  async fn save_source(&self, input: NewSource) -> Result<Source> {
    let now_str = encode_dt(Utc::now());
    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO sources (source_type, source_ref, source_hash, ingested_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            input.source_type.as_str(),
            input.source_ref,
            input.source_hash,
            now_str,
          ],
        )?;
        conn.query_row(
          "SELECT source_id, source_type, source_ref, source_hash, ingested_at
           FROM sources
           WHERE source_type = ?1 AND source_ref = ?2 AND source_hash = ?3",
          rusqlite::params![
            input.source_type.as_str(),
            input.source_ref,
            input.source_hash,
          ],
          |row| {
            Ok(RawSource {
              source_id:   row.get(0)?,
              source_type: row.get(1)?,
              source_ref:  row.get(2)?,
              source_hash: row.get(3)?,
              ingested_at: row.get(4)?,
            })
          },
        )
        .map_err(Into::into)
      })
      .await?;
    raw.into_source()
  }

  async fn save_transcript(&self, input: NewTranscript) -> Result<Transcript> {
    let now_str = encode_dt(Utc::now());
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        // The transcript may arrive before the first profile write.
        tx.execute(
          "INSERT OR IGNORE INTO clients (client_id, created_at, updated_at)
           VALUES (?1, ?2, ?2)",
          rusqlite::params![input.client_id, now_str],
        )?;
        tx.execute(
          "INSERT OR IGNORE INTO transcripts
             (client_id, source_id, language, duration, text_raw)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            input.client_id,
            input.source_id,
            input.language,
            input.duration,
            input.text_raw,
          ],
        )?;
        let raw = tx.query_row(
          "SELECT transcript_id, client_id, source_id, language, duration, text_raw
           FROM transcripts WHERE client_id = ?1 AND source_id = ?2",
          rusqlite::params![input.client_id, input.source_id],
          |row| {
            Ok(RawTranscript {
              transcript_id: row.get(0)?,
              client_id:     row.get(1)?,
              source_id:     row.get(2)?,
              language:      row.get(3)?,
              duration:      row.get(4)?,
              text_raw:      row.get(5)?,
            })
          },
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;
    Ok(raw.into_transcript())
  }

  // ── Read paths ────────────────────────────────────────────────────────────

  async fn get_profile(&self, client_id: &str) -> Result<Option<ProfileSnapshot>> {
    let client_id = client_id.to_string();
    let raw: Option<RawSnapshot> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT profile_id, client_id, profile_version, profile_json,
                      generated_at, source_batch_id
               FROM client_profiles
               WHERE client_id = ?1
               ORDER BY generated_at DESC, profile_id DESC
               LIMIT 1",
              rusqlite::params![client_id],
              |row| {
                Ok(RawSnapshot {
                  profile_id:      row.get(0)?,
                  client_id:       row.get(1)?,
                  profile_version: row.get(2)?,
                  profile_json:    row.get(3)?,
                  generated_at:    row.get(4)?,
                  source_batch_id: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawSnapshot::into_snapshot).transpose()
  }

  async fn get_profiles_by_ids(
    &self,
    ids: &[String],
  ) -> Result<Vec<ProfileSnapshot>> {
    let ids = ids.to_vec();
    let raws: Vec<RawSnapshot> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT profile_id, client_id, profile_version, profile_json,
                  generated_at, source_batch_id
           FROM client_profiles
           WHERE client_id = ?1
           ORDER BY generated_at DESC, profile_id DESC
           LIMIT 1",
        )?;
        let mut out = Vec::with_capacity(ids.len());
        // One lookup per id, preserving request order.
        for id in &ids {
          let raw = stmt
            .query_row(rusqlite::params![id], |row| {
              Ok(RawSnapshot {
                profile_id:      row.get(0)?,
                profile_version: row.get(2)?,
                client_id:       row.get(1)?,
                profile_json:    row.get(3)?,
                generated_at:    row.get(4)?,
                source_batch_id: row.get(5)?,
              })
            })
            .optional()?;
          if let Some(raw) = raw {
            out.push(raw);
          }
        }
        Ok(out)
      })
      .await?;
    raws.into_iter().map(RawSnapshot::into_snapshot).collect()
  }

  async fn count_clients(&self, filter: &ClientFilter) -> Result<u64> {
    query::count_clients(self, filter).await
  }

  async fn client_ids_page(
    &self,
    filter: &ClientFilter,
    limit: u32,
    offset: u32,
  ) -> Result<Vec<String>> {
    query::client_ids_page(self, filter, limit, offset).await
  }

  async fn kpis(&self) -> Result<KpiReport> { query::kpis(self).await }

  async fn budget_status_matrix(&self) -> Result<Vec<MatrixCell>> {
    query::budget_status_matrix(self).await
  }

  async fn top_tags(&self, limit: u32) -> Result<Vec<TagCount>> {
    query::top_tags(self, limit).await
  }

  // ── Maintenance ───────────────────────────────────────────────────────────

  async fn prune_snapshots(&self) -> Result<u64> {
    let removed = self
      .conn
      .call(|conn| {
        let n = conn.execute(
          "DELETE FROM client_profiles
           WHERE profile_id NOT IN (
             SELECT profile_id FROM (
               SELECT profile_id,
                      ROW_NUMBER() OVER (
                        PARTITION BY client_id
                        ORDER BY generated_at DESC, profile_id DESC
                      ) AS rn
               FROM client_profiles
             ) ranked
             WHERE rn = 1
           )",
          [],
        )?;
        Ok(n as u64)
      })
      .await?;
    Ok(removed)
  }
}
