//! Integration tests for `SqliteStore` against an in-memory database.

use fiche_core::{
  entity::{NewSource, NewTranscript, SourceType},
  profile::{ClientProfile, ProfileDoc, ProfileMetadata, TagObservation, TagValue},
  store::{ClientFilter, ProfileStore, SaveOptions},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn profile(client_id: &str, budget: &str, status: &str) -> ClientProfile {
  let mut doc = ProfileDoc::new();
  doc.set(
    "identite",
    TagValue::map([
      ("genre".to_string(), TagValue::from("Femme")),
      ("age".to_string(), TagValue::from("36-45")),
      ("statut_relationnel".to_string(), TagValue::from(status)),
    ]),
  );
  doc.set(
    "projet_achat",
    TagValue::map([("budget".to_string(), TagValue::from(budget))]),
  );
  doc.set(
    "style_personnel",
    TagValue::map([(
      "couleurs_preferees".to_string(),
      TagValue::List(vec!["Noir".to_string()]),
    )]),
  );
  doc.set(
    "localisation",
    TagValue::map([(
      "europe".to_string(),
      TagValue::List(vec!["Paris".to_string()]),
    )]),
  );

  ClientProfile {
    client_id:    client_id.to_string(),
    metadata:     ProfileMetadata {
      profile_version: "2.0".to_string(),
      language: Some("FR".to_string()),
      ..Default::default()
    },
    doc,
    observations: vec![TagObservation::new(
      "identite",
      Some("statut_relationnel".to_string()),
      status,
      "fidèle",
    )],
  }
}

// ─── Snapshots ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_profile() {
  let s = store().await;
  let saved = s
    .save_profile(profile("CA-001", "10-15k", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();
  assert_eq!(saved.client_id, "CA-001");
  assert_eq!(saved.profile_version, "2.0");

  let fetched = s.get_profile("CA-001").await.unwrap().unwrap();
  assert_eq!(fetched.profile_id, saved.profile_id);
  let doc = fetched.document().unwrap();
  assert_eq!(doc["identite"]["statut_relationnel"], "Fidèle");
}

#[tokio::test]
async fn get_profile_missing_returns_none() {
  let s = store().await;
  assert!(s.get_profile("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn version_collision_replaces_snapshot_and_keeps_created_at() {
  let s = store().await;
  s.save_profile(profile("CA-001", "10-15k", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();

  let created_at: String = s
    .conn
    .call(|conn| {
      conn
        .query_row(
          "SELECT created_at FROM clients WHERE client_id = 'CA-001'",
          [],
          |row| row.get(0),
        )
        .map_err(Into::into)
    })
    .await
    .unwrap();

  // Same version, different content: the snapshot is replaced in place.
  s.save_profile(profile("CA-001", "25k+", "VIP"), SaveOptions::default())
    .await
    .unwrap();

  let count: i64 = s
    .conn
    .call(|conn| {
      conn
        .query_row(
          "SELECT COUNT(*) FROM client_profiles WHERE client_id = 'CA-001'",
          [],
          |row| row.get(0),
        )
        .map_err(Into::into)
    })
    .await
    .unwrap();
  assert_eq!(count, 1);

  let latest = s.get_profile("CA-001").await.unwrap().unwrap();
  assert_eq!(latest.profile_version, "2.0");
  let doc = latest.document().unwrap();
  assert_eq!(doc["projet_achat"]["budget"], "25k+");

  let created_at_after: String = s
    .conn
    .call(|conn| {
      conn
        .query_row(
          "SELECT created_at FROM clients WHERE client_id = 'CA-001'",
          [],
          |row| row.get(0),
        )
        .map_err(Into::into)
    })
    .await
    .unwrap();
  assert_eq!(created_at, created_at_after);
}

#[tokio::test]
async fn latest_snapshot_wins_across_versions() {
  let s = store().await;
  s.save_profile(profile("CA-001", "5-10k", "Nouveau"), SaveOptions::default())
    .await
    .unwrap();

  let mut newer = profile("CA-001", "25k+", "VIP");
  newer.metadata.profile_version = "2.1".to_string();
  s.save_profile(newer, SaveOptions::default()).await.unwrap();

  let latest = s.get_profile("CA-001").await.unwrap().unwrap();
  assert_eq!(latest.profile_version, "2.1");
}

#[tokio::test]
async fn batched_lookup_preserves_request_order() {
  let s = store().await;
  for id in ["CA-003", "CA-001", "CA-002"] {
    s.save_profile(profile(id, "5-10k", "Fidèle"), SaveOptions::default())
      .await
      .unwrap();
  }

  let ids = vec![
    "CA-002".to_string(),
    "CA-009".to_string(), // unknown, skipped
    "CA-001".to_string(),
  ];
  let snapshots = s.get_profiles_by_ids(&ids).await.unwrap();
  let order: Vec<&str> =
    snapshots.iter().map(|p| p.client_id.as_str()).collect();
  assert_eq!(order, vec!["CA-002", "CA-001"]);
}

// ─── Taggings & traceability ─────────────────────────────────────────────────

#[tokio::test]
async fn taggings_reference_rule_source_and_tag() {
  let s = store().await;
  s.save_profile(profile("CA-001", "10-15k", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();

  let (taggings, orphans): (i64, i64) = s
    .conn
    .call(|conn| {
      let taggings: i64 =
        conn.query_row("SELECT COUNT(*) FROM taggings", [], |r| r.get(0))?;
      let orphans: i64 = conn.query_row(
        "SELECT COUNT(*) FROM taggings tg
         LEFT JOIN tags t ON t.tag_id = tg.tag_id
         LEFT JOIN tag_rules r ON r.rule_id = tg.rule_id
         LEFT JOIN sources s ON s.source_id = tg.source_id
         LEFT JOIN clients c ON c.client_id = tg.client_id
         WHERE t.tag_id IS NULL OR r.rule_id IS NULL
            OR s.source_id IS NULL OR c.client_id IS NULL",
        [],
        |r| r.get(0),
      )?;
      Ok((taggings, orphans))
    })
    .await
    .unwrap();

  // One tagging per flattened leaf (6 in the fixture profile).
  assert_eq!(taggings, 6);
  assert_eq!(orphans, 0);
}

#[tokio::test]
async fn observation_evidence_lands_on_the_tagging() {
  let s = store().await;
  s.save_profile(profile("CA-001", "10-15k", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();

  let taggings = s.client_taggings("CA-001").await.unwrap();
  let (tagging, tag) = taggings
    .iter()
    .find(|(_, tag)| tag.subcategory.as_deref() == Some("statut_relationnel"))
    .unwrap();

  assert_eq!(tag.tag_value, "Fidèle");
  assert_eq!(tagging.evidence.as_deref(), Some("fidèle"));
  assert_eq!(tagging.score, 1.0);

  // The default extraction rule backs the attribution.
  let rule = s
    .get_rule(crate::store::DEFAULT_RULE_NAME, "2.0")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(tagging.rule_id, rule.rule_id);
  assert!(rule.is_active);

  // And the client row exists with sane timestamps.
  let client = s.get_client("CA-001").await.unwrap().unwrap();
  assert_eq!(client.client_id, "CA-001");
  assert!(client.updated_at >= client.created_at);
}

#[tokio::test]
async fn recurring_tag_values_are_reused() {
  let s = store().await;
  s.save_profile(profile("CA-001", "10-15k", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();
  s.save_profile(profile("CA-002", "10-15k", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();

  let tag_rows: i64 = s
    .conn
    .call(|conn| {
      conn
        .query_row(
          "SELECT COUNT(*) FROM tags WHERE tag_value = 'Fidèle'",
          [],
          |row| row.get(0),
        )
        .map_err(Into::into)
    })
    .await
    .unwrap();
  assert_eq!(tag_rows, 1);
}

#[tokio::test]
async fn reingesting_identical_content_is_a_noop() {
  let s = store().await;
  let source = NewSource {
    source_type: SourceType::CsvRow,
    source_ref:  "clients.csv:42".to_string(),
    source_hash: crate::encode::content_hash("raw row content"),
  };

  for _ in 0..2 {
    let src = s.save_source(source.clone()).await.unwrap();
    s.save_transcript(NewTranscript {
      client_id: "CA-001".to_string(),
      source_id: src.source_id,
      language:  Some("FR".to_string()),
      duration:  None,
      text_raw:  "raw row content".to_string(),
    })
    .await
    .unwrap();
    s.save_profile(
      profile("CA-001", "10-15k", "Fidèle"),
      SaveOptions { source: Some(source.clone()), ..Default::default() },
    )
    .await
    .unwrap();
  }

  let (sources, transcripts, snapshots, taggings): (i64, i64, i64, i64) = s
    .conn
    .call(|conn| {
      Ok((
        conn.query_row("SELECT COUNT(*) FROM sources WHERE source_type = 'csv_row'", [], |r| r.get(0))?,
        conn.query_row("SELECT COUNT(*) FROM transcripts", [], |r| r.get(0))?,
        conn.query_row("SELECT COUNT(*) FROM client_profiles", [], |r| r.get(0))?,
        conn.query_row("SELECT COUNT(*) FROM taggings", [], |r| r.get(0))?,
      ))
    })
    .await
    .unwrap();

  assert_eq!(sources, 1);
  assert_eq!(transcripts, 1);
  assert_eq!(snapshots, 1);
  assert_eq!(taggings, 6);
}

// ─── Filters ─────────────────────────────────────────────────────────────────

async fn seeded_store() -> SqliteStore {
  let s = store().await;
  s.save_profile(profile("CA-001", "10-15k", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();
  s.save_profile(profile("CA-002", "25k+", "VIP"), SaveOptions::default())
    .await
    .unwrap();
  s.save_profile(profile("CB-003", "25k+", "Fidèle"), SaveOptions::default())
    .await
    .unwrap();
  s
}

#[tokio::test]
async fn filters_compose_as_conjunction() {
  let s = seeded_store().await;

  let by_status = ClientFilter {
    status: Some("Fidèle".to_string()),
    ..Default::default()
  };
  assert_eq!(s.count_clients(&by_status).await.unwrap(), 2);

  let by_both = ClientFilter {
    status: Some("Fidèle".to_string()),
    budget: Some("25k+".to_string()),
    ..Default::default()
  };
  assert_eq!(s.count_clients(&by_both).await.unwrap(), 1);
  assert_eq!(
    s.client_ids_page(&by_both, 10, 0).await.unwrap(),
    vec!["CB-003".to_string()]
  );
}

#[tokio::test]
async fn search_filter_matches_client_id_substring() {
  let s = seeded_store().await;
  let filter = ClientFilter {
    search: Some("CB".to_string()),
    ..Default::default()
  };
  assert_eq!(s.count_clients(&filter).await.unwrap(), 1);
}

#[tokio::test]
async fn city_and_any_tags_filters() {
  let s = seeded_store().await;

  let by_city = ClientFilter {
    city: Some("Paris".to_string()),
    ..Default::default()
  };
  assert_eq!(s.count_clients(&by_city).await.unwrap(), 3);

  let by_any = ClientFilter {
    any_tags: vec!["VIP".to_string(), "Inexistant".to_string()],
    ..Default::default()
  };
  assert_eq!(s.count_clients(&by_any).await.unwrap(), 1);
}

#[tokio::test]
async fn count_matches_unbounded_page_for_every_filter() {
  let s = seeded_store().await;
  let filters = [
    ClientFilter::default(),
    ClientFilter { status: Some("Fidèle".into()), ..Default::default() },
    ClientFilter { budget: Some("25k+".into()), ..Default::default() },
    ClientFilter { color: Some("Noir".into()), ..Default::default() },
    ClientFilter { search: Some("CA".into()), ..Default::default() },
  ];
  for filter in filters {
    let count = s.count_clients(&filter).await.unwrap();
    let page = s.client_ids_page(&filter, u32::MAX, 0).await.unwrap();
    assert_eq!(count as usize, page.len(), "filter {filter:?}");
  }
}

// ─── Analytics ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn kpis_pipeline_and_averages() {
  let s = seeded_store().await;
  let kpis = s.kpis().await.unwrap();

  assert_eq!(kpis.total_clients, 3);
  assert_eq!(kpis.segments.get("Fidèle"), Some(&2));
  assert_eq!(kpis.segments.get("VIP"), Some(&1));
  assert_eq!(kpis.budgets.get("10-15k"), Some(&1));
  assert_eq!(kpis.budgets.get("25k+"), Some(&2));
  // 12_500 + 35_000 + 35_000
  assert_eq!(kpis.pipeline_eur, 82_500);
  assert!((kpis.avg_basket_eur - 27_500.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn budget_status_matrix_groups_pairs() {
  let s = seeded_store().await;
  let matrix = s.budget_status_matrix().await.unwrap();

  let cell = matrix
    .iter()
    .find(|c| c.budget == "25k+" && c.status == "Fidèle")
    .unwrap();
  assert_eq!(cell.clients, 1);
  let vip = matrix
    .iter()
    .find(|c| c.budget == "25k+" && c.status == "VIP")
    .unwrap();
  assert_eq!(vip.clients, 1);
}

#[tokio::test]
async fn top_tags_ranks_by_tagging_count() {
  let s = seeded_store().await;
  let top = s.top_tags(3).await.unwrap();
  assert!(!top.is_empty());
  // Every fixture profile carries Paris and Noir; both appear with count 3.
  assert_eq!(top[0].count, 3);
  assert!(top.iter().all(|t| t.count <= 3));
}

// ─── Maintenance ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn prune_keeps_only_latest_snapshot_per_client() {
  let s = store().await;
  for version in ["2.0", "2.1", "2.2"] {
    let mut p = profile("CA-001", "10-15k", "Fidèle");
    p.metadata.profile_version = version.to_string();
    s.save_profile(p, SaveOptions::default()).await.unwrap();
  }

  let removed = s.prune_snapshots().await.unwrap();
  assert_eq!(removed, 2);

  let latest = s.get_profile("CA-001").await.unwrap().unwrap();
  assert_eq!(latest.profile_version, "2.2");
}

#[tokio::test]
async fn stats_cache_round_trip() {
  let s = store().await;
  s.cache_stat("kpis", "{\"total\":3}").await.unwrap();

  let entry = s.cached_stat("kpis").await.unwrap().unwrap();
  assert_eq!(entry.stat_name, "kpis");
  assert_eq!(entry.stat_value, "{\"total\":3}");

  assert!(s.cached_stat("missing").await.unwrap().is_none());
}

// ─── Legacy migration ────────────────────────────────────────────────────────

async fn legacy_store() -> SqliteStore {
  let conn = tokio_rusqlite::Connection::open_in_memory().await.unwrap();
  conn
    .call(|conn| {
      conn.execute_batch(
        "CREATE TABLE clients (
           client_id TEXT PRIMARY KEY,
           date_conversation TEXT,
           duration TEXT,
           language TEXT,
           profile_json TEXT
         );
         CREATE TABLE tags (
           id INTEGER PRIMARY KEY AUTOINCREMENT,
           client_id TEXT,
           category TEXT,
           subcategory TEXT,
           tag_value TEXT
         );
         CREATE TABLE statistics (
           stat_name TEXT PRIMARY KEY,
           stat_value TEXT
         );
         INSERT INTO clients VALUES
           ('CA-001', '2024-01-15T10:00:00+00:00', '12m', 'FR',
            '{\"identite\": {\"genre\": \"Femme\"}}');
         INSERT INTO tags (client_id, category, subcategory, tag_value) VALUES
           ('CA-001', 'identite', 'genre', 'Femme'),
           ('CA-001', 'projet_achat', 'budget', '10-15k');
         INSERT INTO statistics VALUES ('total_clients', '1');",
      )?;
      Ok(())
    })
    .await
    .unwrap();
  SqliteStore { conn }
}

#[tokio::test]
async fn migration_reattributes_legacy_data() {
  let s = legacy_store().await;
  let report = s.migrate_legacy().await.unwrap();

  assert_eq!(report.legacy_clients, 1);
  assert_eq!(report.legacy_taggings, 2);
  assert_eq!(report.legacy_stats, 1);

  let snapshot = s.get_profile("CA-001").await.unwrap().unwrap();
  assert_eq!(snapshot.profile_version, "legacy_v1");

  // Historical taggings carry the synthesized rule and source.
  let attributed: i64 = s
    .conn
    .call(|conn| {
      conn
        .query_row(
          "SELECT COUNT(*) FROM taggings tg
           JOIN tag_rules r ON r.rule_id = tg.rule_id
           JOIN sources s ON s.source_id = tg.source_id
           WHERE r.rule_name = 'legacy_import' AND s.source_type = 'legacy'",
          [],
          |row| row.get(0),
        )
        .map_err(Into::into)
    })
    .await
    .unwrap();
  assert_eq!(attributed, 2);
}

#[tokio::test]
async fn migration_is_idempotent() {
  let s = legacy_store().await;
  s.migrate_legacy().await.unwrap();
  let second = s.migrate_legacy().await.unwrap();

  assert_eq!(second.legacy_clients, 0);
  assert_eq!(second.legacy_taggings, 0);

  let taggings: i64 = s
    .conn
    .call(|conn| {
      conn
        .query_row("SELECT COUNT(*) FROM taggings", [], |r| r.get(0))
        .map_err(Into::into)
    })
    .await
    .unwrap();
  assert_eq!(taggings, 2);
}

#[tokio::test]
async fn writer_refuses_legacy_schema() {
  let s = legacy_store().await;
  let err = s
    .save_profile(profile("CA-009", "5-10k", "Nouveau"), SaveOptions::default())
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::LegacySchema));
}
