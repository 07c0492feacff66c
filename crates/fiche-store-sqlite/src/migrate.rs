//! Legacy-schema migration: rename-and-reload.
//!
//! The legacy layout stored one row per client with the profile JSON and a
//! flat `tags` table keyed by client. Migration renames those tables to
//! `legacy_*`, creates the new schema, synthesizes one `legacy_import` rule
//! plus a per-client legacy source, and reattributes historical tags as
//! taggings so nothing loses its provenance. Running it twice is a no-op.

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{content_hash, encode_dt},
  schema::SCHEMA,
  store::SqliteStore,
};

/// What a migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
  pub legacy_clients:  u64,
  pub legacy_taggings: u64,
  pub legacy_stats:    u64,
  pub already_migrated: bool,
}

fn table_exists(conn: &rusqlite::Connection, name: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        rusqlite::params![name],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn has_column(
  conn: &rusqlite::Connection,
  table: &str,
  column: &str,
) -> rusqlite::Result<bool> {
  let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
  let columns = stmt
    .query_map([], |row| row.get::<_, String>(1))?
    .collect::<rusqlite::Result<Vec<String>>>()?;
  Ok(columns.iter().any(|c| c == column))
}

impl SqliteStore {
  /// Open a store on a database that may still hold the legacy layout,
  /// without initialising the new schema first.
  pub async fn open_unmigrated(
    path: impl AsRef<std::path::Path>,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self { conn })
  }

  /// Migrate the legacy flat schema into the traceable layout.
  pub async fn migrate_legacy(&self) -> Result<MigrationReport> {
    let now_str = encode_dt(Utc::now());
    let report = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Rename legacy tables out of the way.
        let legacy_clients = table_exists(&tx, "clients")?
          && has_column(&tx, "clients", "date_conversation")?;
        if legacy_clients {
          tx.execute_batch("ALTER TABLE clients RENAME TO legacy_clients")?;
        }
        let legacy_tags = table_exists(&tx, "tags")?
          && has_column(&tx, "tags", "client_id")?;
        if legacy_tags {
          tx.execute_batch("ALTER TABLE tags RENAME TO legacy_tags")?;
        }
        let legacy_stats = table_exists(&tx, "statistics")?;
        if legacy_stats {
          tx.execute_batch("ALTER TABLE statistics RENAME TO legacy_statistics")?;
        }

        tx.execute_batch(SCHEMA)?;

        let mut report = MigrationReport {
          already_migrated: !legacy_clients
            && !legacy_tags
            && !legacy_stats
            && !table_exists(&tx, "legacy_clients")?,
          ..Default::default()
        };

        // One rule attributes every reattributed tagging.
        tx.execute(
          "INSERT OR IGNORE INTO tag_rules
             (rule_name, rule_version, rule_definition, is_active, created_at)
           VALUES ('legacy_import', 'v1', '{}', 0, ?1)",
          rusqlite::params![now_str],
        )?;
        let rule_id: i64 = tx.query_row(
          "SELECT rule_id FROM tag_rules
           WHERE rule_name = 'legacy_import' AND rule_version = 'v1'",
          [],
          |row| row.get(0),
        )?;

        if table_exists(&tx, "legacy_clients")? {
          let rows: Vec<(String, Option<String>, String)> = {
            let mut stmt = tx.prepare(
              "SELECT client_id, date_conversation, COALESCE(profile_json, '{}')
               FROM legacy_clients",
            )?;
            let rows = stmt
              .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
              })?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
          };

          for (client_id, date_conversation, profile_json) in rows {
            let created_at =
              date_conversation.filter(|d| !d.is_empty()).unwrap_or_else(|| now_str.clone());

            tx.execute(
              "INSERT OR IGNORE INTO clients (client_id, created_at, updated_at)
               VALUES (?1, ?2, ?2)",
              rusqlite::params![client_id, created_at],
            )?;
            let inserted = tx.execute(
              "INSERT OR IGNORE INTO client_profiles
                 (client_id, profile_version, profile_json, generated_at, source_batch_id)
               VALUES (?1, 'legacy_v1', ?2, ?3, 'legacy_import')",
              rusqlite::params![client_id, profile_json, created_at],
            )?;
            report.legacy_clients += inserted as u64;
            tx.execute(
              "INSERT OR IGNORE INTO sources
                 (source_type, source_ref, source_hash, ingested_at)
               VALUES ('legacy', ?1, ?2, ?3)",
              rusqlite::params![
                format!("legacy_clients:{client_id}"),
                content_hash(&profile_json),
                now_str,
              ],
            )?;
          }
        }

        if table_exists(&tx, "legacy_tags")? {
          let rows: Vec<(String, String, Option<String>, String)> = {
            let mut stmt = tx.prepare(
              "SELECT client_id, category, subcategory, tag_value FROM legacy_tags",
            )?;
            let rows = stmt
              .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
              })?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
          };

          for (client_id, category, subcategory, tag_value) in rows {
            // The legacy profile row may be missing; keep the tagging
            // attributable regardless.
            tx.execute(
              "INSERT OR IGNORE INTO clients (client_id, created_at, updated_at)
               VALUES (?1, ?2, ?2)",
              rusqlite::params![client_id, now_str],
            )?;

            let source_id: i64 = match tx
              .query_row(
                "SELECT source_id FROM sources
                 WHERE source_type = 'legacy' AND source_ref = ?1",
                rusqlite::params![format!("legacy_clients:{client_id}")],
                |row| row.get(0),
              )
              .optional()?
            {
              Some(id) => id,
              None => {
                tx.execute(
                  "INSERT OR IGNORE INTO sources
                     (source_type, source_ref, source_hash, ingested_at)
                   VALUES ('legacy', 'legacy_tags', ?1, ?2)",
                  rusqlite::params![
                    content_hash(&format!("{client_id}:{category}:{tag_value}")),
                    now_str,
                  ],
                )?;
                tx.query_row(
                  "SELECT source_id FROM sources
                   WHERE source_type = 'legacy' AND source_ref = 'legacy_tags'",
                  [],
                  |row| row.get(0),
                )?
              }
            };

            // Empty-string subcategories in the legacy table mean "none".
            let subcategory = subcategory.filter(|s| !s.is_empty());
            tx.execute(
              "INSERT OR IGNORE INTO tags (category, subcategory, tag_value, tag_version)
               VALUES (?1, ?2, ?3, 'legacy_v1')",
              rusqlite::params![category, subcategory, tag_value],
            )?;
            let tag_id: i64 = tx.query_row(
              "SELECT tag_id FROM tags
               WHERE category = ?1 AND subcategory IS ?2 AND tag_value = ?3
                 AND tag_version = 'legacy_v1'",
              rusqlite::params![category, subcategory, tag_value],
              |row| row.get(0),
            )?;

            // Idempotence: skip taggings that were already reattributed.
            let exists: bool = tx
              .query_row(
                "SELECT 1 FROM taggings
                 WHERE client_id = ?1 AND tag_id = ?2 AND rule_id = ?3",
                rusqlite::params![client_id, tag_id, rule_id],
                |_| Ok(true),
              )
              .optional()?
              .unwrap_or(false);
            if !exists {
              tx.execute(
                "INSERT INTO taggings
                   (client_id, tag_id, rule_id, source_id, score, evidence, created_at)
                 VALUES (?1, ?2, ?3, ?4, 1.0, NULL, ?5)",
                rusqlite::params![client_id, tag_id, rule_id, source_id, now_str],
              )?;
              report.legacy_taggings += 1;
            }
          }
        }

        if table_exists(&tx, "legacy_statistics")? {
          report.legacy_stats += tx.execute(
            "INSERT OR REPLACE INTO stats_cache (stat_name, stat_value, computed_at)
             SELECT stat_name, stat_value, ?1 FROM legacy_statistics",
            rusqlite::params![now_str],
          )? as u64;
        }

        tx.commit()?;
        Ok(report)
      })
      .await?;
    Ok(report)
  }
}
