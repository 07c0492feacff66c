//! The `ProfileStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `fiche-store-sqlite`).
//! Higher layers (`fiche-cli`) depend on this abstraction, not on any
//! concrete backend.

use std::{collections::BTreeMap, future::Future};

use crate::{
  entity::{NewSource, NewTagRule, NewTranscript, ProfileSnapshot, Source, Transcript},
  profile::ClientProfile,
};

// ─── Write options ───────────────────────────────────────────────────────────

/// Attribution for a [`ProfileStore::save_profile`] call.
///
/// When `source` or `rule` is `None`, the store ensures a default: a
/// `manual` source keyed by the SHA-256 of the profile JSON, and the active
/// extractor rule for the current taxonomy version.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
  pub source:   Option<NewSource>,
  pub rule:     Option<NewTagRule>,
  pub batch_id: Option<String>,
}

// ─── Query types ─────────────────────────────────────────────────────────────

/// Filter predicates for [`ProfileStore::count_clients`] and
/// [`ProfileStore::client_ids_page`]. Each set field is composed as an SQL
/// `EXISTS` sub-select against `taggings ⋈ tags`.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
  /// `identite/statut_relationnel` value.
  pub status:   Option<String>,
  /// `projet_achat/budget` value.
  pub budget:   Option<String>,
  /// `style_personnel/couleurs_preferees` value.
  pub color:    Option<String>,
  /// Clients carrying at least one of these tag values, any category.
  pub any_tags: Vec<String>,
  /// A city under `localisation`.
  pub city:     Option<String>,
  /// Substring match on `client_id`.
  pub search:   Option<String>,
}

impl ClientFilter {
  pub fn is_empty(&self) -> bool {
    self.status.is_none()
      && self.budget.is_none()
      && self.color.is_none()
      && self.any_tags.is_empty()
      && self.city.is_none()
      && self.search.is_none()
  }
}

/// KPI aggregates computed in SQL over the latest snapshot per client.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct KpiReport {
  pub total_clients: u64,
  /// `statut_relationnel` value → client count.
  pub segments:      BTreeMap<String, u64>,
  /// Budget bucket label → client count.
  pub budgets:       BTreeMap<String, u64>,
  pub genders:       BTreeMap<String, u64>,
  pub ages:          BTreeMap<String, u64>,
  /// Σ bucket midpoint × count, in euros.
  pub pipeline_eur:  u64,
  pub avg_basket_eur: f64,
}

/// One cell of the budget × status matrix.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MatrixCell {
  pub budget:  String,
  pub status:  String,
  pub clients: u64,
}

/// One row of the global top-tags ranking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TagCount {
  pub category:    String,
  pub subcategory: Option<String>,
  pub tag_value:   String,
  pub count:       u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a versioned, traceable profile store backend.
///
/// Snapshots are append-only (replace semantics on a `(client_id,
/// profile_version)` collision); taggings always reference a live client,
/// tag, rule, and source. Within one client, `save_profile` is a single
/// transactional unit.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Write paths ───────────────────────────────────────────────────────

  /// Upsert the client, write the snapshot, and re-derive its taggings
  /// from the flattened profile document. Returns the persisted snapshot.
  fn save_profile(
    &self,
    profile: ClientProfile,
    options: SaveOptions,
  ) -> impl Future<Output = Result<ProfileSnapshot, Self::Error>> + Send + '_;

  /// Record an ingest event. Idempotent on
  /// `(source_type, source_ref, source_hash)`.
  fn save_source(
    &self,
    input: NewSource,
  ) -> impl Future<Output = Result<Source, Self::Error>> + Send + '_;

  /// Attach a raw transcript to a client and source. Idempotent per
  /// `(client_id, source_id)`.
  fn save_transcript(
    &self,
    input: NewTranscript,
  ) -> impl Future<Output = Result<Transcript, Self::Error>> + Send + '_;

  // ── Read paths ────────────────────────────────────────────────────────

  /// The client's current profile: latest snapshot by
  /// `(generated_at DESC, profile_id DESC)`. `None` for unknown clients.
  fn get_profile<'a>(
    &'a self,
    client_id: &'a str,
  ) -> impl Future<Output = Result<Option<ProfileSnapshot>, Self::Error>> + Send + 'a;

  /// Batched latest-snapshot retrieval preserving request order. Unknown
  /// ids are skipped.
  fn get_profiles_by_ids<'a>(
    &'a self,
    ids: &'a [String],
  ) -> impl Future<Output = Result<Vec<ProfileSnapshot>, Self::Error>> + Send + 'a;

  /// Count clients matching `filter`.
  fn count_clients<'a>(
    &'a self,
    filter: &'a ClientFilter,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Page of matching client ids, ordered by `updated_at DESC` then id.
  fn client_ids_page<'a>(
    &'a self,
    filter: &'a ClientFilter,
    limit: u32,
    offset: u32,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'a;

  /// Segment / budget / gender / age counts plus the derived pipeline and
  /// average basket.
  fn kpis(
    &self,
  ) -> impl Future<Output = Result<KpiReport, Self::Error>> + Send + '_;

  /// Budget × status client counts via a single grouped join.
  fn budget_status_matrix(
    &self,
  ) -> impl Future<Output = Result<Vec<MatrixCell>, Self::Error>> + Send + '_;

  /// Most-attributed tags by global tagging count.
  fn top_tags(
    &self,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<TagCount>, Self::Error>> + Send + '_;

  // ── Maintenance ───────────────────────────────────────────────────────

  /// Delete all non-latest snapshots per client; returns the number of
  /// rows removed.
  fn prune_snapshots(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
