//! SQL-first analytics: filtered client listing, KPI aggregates, the
//! budget × status matrix, and the global top-tags ranking.
//!
//! Filter predicates compose as `EXISTS` sub-selects against
//! `taggings ⋈ tags`, so they always reflect the re-derived taggings of the
//! latest `save_profile` for each rule/source pair.

use std::collections::BTreeMap;

use fiche_core::{
  bucket::BudgetBucket,
  store::{ClientFilter, KpiReport, MatrixCell, TagCount},
};

use crate::{Result, store::SqliteStore};

// ─── Filter composition ──────────────────────────────────────────────────────

fn tag_exists(category: &str, subcategory: Option<&str>) -> String {
  let sub_clause = match subcategory {
    Some(sub) => format!("AND t.subcategory = '{sub}'"),
    None => String::new(),
  };
  format!(
    "EXISTS (SELECT 1 FROM taggings tg
             JOIN tags t ON t.tag_id = tg.tag_id
             WHERE tg.client_id = c.client_id
               AND t.category = '{category}' {sub_clause}
               AND t.tag_value = ?)"
  )
}

/// Build the WHERE clause and its positional parameters.
fn build_where(filter: &ClientFilter) -> (String, Vec<String>) {
  let mut conditions: Vec<String> = Vec::new();
  let mut params: Vec<String> = Vec::new();

  if let Some(status) = &filter.status {
    conditions.push(tag_exists("identite", Some("statut_relationnel")));
    params.push(status.clone());
  }
  if let Some(budget) = &filter.budget {
    conditions.push(tag_exists("projet_achat", Some("budget")));
    params.push(budget.clone());
  }
  if let Some(color) = &filter.color {
    conditions.push(tag_exists("style_personnel", Some("couleurs_preferees")));
    params.push(color.clone());
  }
  if let Some(city) = &filter.city {
    // Region is part of the subcategory path; match the value alone.
    conditions.push(tag_exists("localisation", None));
    params.push(city.clone());
  }
  if !filter.any_tags.is_empty() {
    let placeholders =
      vec!["?"; filter.any_tags.len()].join(", ");
    conditions.push(format!(
      "EXISTS (SELECT 1 FROM taggings tg
               JOIN tags t ON t.tag_id = tg.tag_id
               WHERE tg.client_id = c.client_id
                 AND t.tag_value IN ({placeholders}))"
    ));
    params.extend(filter.any_tags.iter().cloned());
  }
  if let Some(search) = &filter.search {
    conditions.push("c.client_id LIKE '%' || ? || '%'".to_string());
    params.push(search.clone());
  }

  let where_clause = if conditions.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conditions.join(" AND "))
  };
  (where_clause, params)
}

pub async fn count_clients(
  store: &SqliteStore,
  filter: &ClientFilter,
) -> Result<u64> {
  let (where_clause, params) = build_where(filter);
  let count = store
    .conn
    .call(move |conn| {
      let sql = format!("SELECT COUNT(*) FROM clients c {where_clause}");
      let count: i64 = conn.query_row(
        &sql,
        rusqlite::params_from_iter(params.iter()),
        |row| row.get(0),
      )?;
      Ok(count as u64)
    })
    .await?;
  Ok(count)
}

pub async fn client_ids_page(
  store: &SqliteStore,
  filter: &ClientFilter,
  limit: u32,
  offset: u32,
) -> Result<Vec<String>> {
  let (where_clause, params) = build_where(filter);
  let ids = store
    .conn
    .call(move |conn| {
      let sql = format!(
        "SELECT c.client_id FROM clients c {where_clause}
         ORDER BY c.updated_at DESC, c.client_id ASC
         LIMIT {limit} OFFSET {offset}"
      );
      let mut stmt = conn.prepare(&sql)?;
      let ids = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), |row| {
          row.get::<_, String>(0)
        })?
        .collect::<rusqlite::Result<Vec<String>>>()?;
      Ok(ids)
    })
    .await?;
  Ok(ids)
}

// ─── KPI aggregates ──────────────────────────────────────────────────────────

fn value_counts(
  conn: &rusqlite::Connection,
  category: &str,
  subcategory: &str,
) -> rusqlite::Result<BTreeMap<String, u64>> {
  let mut stmt = conn.prepare(
    "SELECT t.tag_value, COUNT(DISTINCT tg.client_id)
     FROM taggings tg
     JOIN tags t ON t.tag_id = tg.tag_id
     WHERE t.category = ?1 AND t.subcategory = ?2
     GROUP BY t.tag_value
     ORDER BY t.tag_value",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![category, subcategory], |row| {
      Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows.into_iter().collect())
}

pub async fn kpis(store: &SqliteStore) -> Result<KpiReport> {
  let report = store
    .conn
    .call(|conn| {
      let total_clients: i64 =
        conn.query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;
      let segments = value_counts(conn, "identite", "statut_relationnel")?;
      let budgets = value_counts(conn, "projet_achat", "budget")?;
      let genders = value_counts(conn, "identite", "genre")?;
      let ages = value_counts(conn, "identite", "age")?;
      Ok((total_clients as u64, segments, budgets, genders, ages))
    })
    .await?;

  let (total_clients, segments, budgets, genders, ages) = report;

  // Pipeline: bucket midpoint × count; clients with no extracted budget
  // contribute the lowest-bucket midpoint.
  let counted: u64 = budgets.values().sum();
  let mut pipeline_eur: u64 = budgets
    .iter()
    .filter_map(|(label, count)| {
      BudgetBucket::parse(label).map(|b| b.midpoint() * count)
    })
    .sum();
  pipeline_eur +=
    total_clients.saturating_sub(counted) * BudgetBucket::Under5k.midpoint();

  let avg_basket_eur = if total_clients > 0 {
    pipeline_eur as f64 / total_clients as f64
  } else {
    0.0
  };

  Ok(KpiReport {
    total_clients,
    segments,
    budgets,
    genders,
    ages,
    pipeline_eur,
    avg_basket_eur,
  })
}

// ─── Matrix & rankings ───────────────────────────────────────────────────────

pub async fn budget_status_matrix(
  store: &SqliteStore,
) -> Result<Vec<MatrixCell>> {
  let cells = store
    .conn
    .call(|conn| {
      let mut stmt = conn.prepare(
        "SELECT bt.tag_value AS budget, st.tag_value AS status,
                COUNT(DISTINCT btg.client_id)
         FROM taggings btg
         JOIN tags bt ON bt.tag_id = btg.tag_id
                     AND bt.category = 'projet_achat'
                     AND bt.subcategory = 'budget'
         JOIN taggings stg ON stg.client_id = btg.client_id
         JOIN tags st ON st.tag_id = stg.tag_id
                     AND st.category = 'identite'
                     AND st.subcategory = 'statut_relationnel'
         GROUP BY bt.tag_value, st.tag_value
         ORDER BY bt.tag_value, st.tag_value",
      )?;
      let cells = stmt
        .query_map([], |row| {
          Ok(MatrixCell {
            budget:  row.get(0)?,
            status:  row.get(1)?,
            clients: row.get::<_, i64>(2)? as u64,
          })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      Ok(cells)
    })
    .await?;
  Ok(cells)
}

pub async fn top_tags(store: &SqliteStore, limit: u32) -> Result<Vec<TagCount>> {
  let rows = store
    .conn
    .call(move |conn| {
      let mut stmt = conn.prepare(
        "SELECT t.category, t.subcategory, t.tag_value, COUNT(*) AS n
         FROM taggings tg
         JOIN tags t ON t.tag_id = tg.tag_id
         GROUP BY t.tag_id
         ORDER BY n DESC, t.category ASC, t.tag_value ASC
         LIMIT ?1",
      )?;
      let rows = stmt
        .query_map(rusqlite::params![limit as i64], |row| {
          Ok(TagCount {
            category:    row.get(0)?,
            subcategory: row.get(1)?,
            tag_value:   row.get(2)?,
            count:       row.get::<_, i64>(3)? as u64,
          })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      Ok(rows)
    })
    .await?;
  Ok(rows)
}

// ─── Stats cache ─────────────────────────────────────────────────────────────

impl SqliteStore {
  /// Store a named aggregation result (JSON) with its computation time.
  pub async fn cache_stat(&self, name: &str, value: &str) -> Result<()> {
    let name = name.to_string();
    let value = value.to_string();
    let now = crate::encode::encode_dt(chrono::Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO stats_cache (stat_name, stat_value, computed_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![name, value, now],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn cached_stat(
    &self,
    name: &str,
  ) -> Result<Option<fiche_core::entity::StatsEntry>> {
    let name = name.to_string();
    let row = self
      .conn
      .call(move |conn| {
        use rusqlite::OptionalExtension as _;
        Ok(
          conn
            .query_row(
              "SELECT stat_name, stat_value, computed_at
               FROM stats_cache WHERE stat_name = ?1",
              rusqlite::params![name],
              |row| {
                Ok((
                  row.get::<_, String>(0)?,
                  row.get::<_, String>(1)?,
                  row.get::<_, String>(2)?,
                ))
              },
            )
            .optional()?,
        )
      })
      .await?;
    row
      .map(|(stat_name, stat_value, computed_at)| {
        Ok(fiche_core::entity::StatsEntry {
          stat_name,
          stat_value,
          computed_at: crate::encode::decode_dt(&computed_at)?,
        })
      })
      .transpose()
  }
}
