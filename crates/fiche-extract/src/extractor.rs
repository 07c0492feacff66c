//! Assembles the profile document, the persistence observations, and the
//! activation context from one cleaned transcript.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use fiche_core::{
  lang::Lang,
  profile::{ProfileDoc, TagObservation, TagValue},
};
use fiche_taxonomy::{
  category,
  cities,
  dict,
  scan::{Entries, KeywordMatch, scan_entries},
};

use crate::{
  context::{self, ExtractedContext},
  probes,
};

/// The full output of one extraction run.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
  pub doc:          ProfileDoc,
  pub observations: Vec<TagObservation>,
  pub context:      ExtractedContext,
}

impl Extraction {
  /// Warnings surfaced in batch reports.
  pub fn warnings(&self) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if self.doc.is_empty() {
      warnings.push("empty transcript");
      return warnings;
    }
    if self
      .doc
      .get(category::PROJET_ACHAT)
      .and_then(|v| match v {
        TagValue::Map(m) => m.get("budget"),
        _ => None,
      })
      .is_none()
    {
      warnings.push("budget not extracted");
    }
    warnings
  }
}

// ─── Section builder ─────────────────────────────────────────────────────────

/// Accumulates one top-level category and its observations.
struct Section<'a> {
  category:     &'static str,
  entries:      BTreeMap<String, TagValue>,
  observations: &'a mut Vec<TagObservation>,
}

impl<'a> Section<'a> {
  fn new(
    category: &'static str,
    observations: &'a mut Vec<TagObservation>,
  ) -> Self {
    Self { category, entries: BTreeMap::new(), observations }
  }

  fn observe(&mut self, subcategory: &str, value: &str, evidence: &str) {
    self.observations.push(TagObservation::new(
      self.category,
      Some(subcategory.to_string()),
      value,
      evidence,
    ));
  }

  /// Single value: first dictionary match wins.
  fn first(&mut self, key: &str, matches: &[KeywordMatch]) {
    if let Some(m) = matches.first() {
      self.entries.insert(key.to_string(), TagValue::from(m.canonical));
      self.observe(key, m.canonical, m.surface);
    }
  }

  /// Multi value: order-preserving de-duplicated list.
  fn list(&mut self, key: &str, matches: &[KeywordMatch]) {
    if matches.is_empty() {
      return;
    }
    let mut values: Vec<String> = Vec::new();
    for m in matches {
      if !values.iter().any(|v| v == m.canonical) {
        values.push(m.canonical.to_string());
        self.observe(key, m.canonical, m.surface);
      }
    }
    self.entries.insert(key.to_string(), TagValue::List(values));
  }

  fn scalar(&mut self, key: &str, value: TagValue, evidence: &str) {
    let rendered = match &value {
      TagValue::Text(s) => s.clone(),
      TagValue::Integer(n) => n.to_string(),
      TagValue::Number(x) => x.to_string(),
      _ => String::new(),
    };
    self.entries.insert(key.to_string(), value);
    self.observe(key, &rendered, evidence);
  }

  /// Nested groups (`sport/collectif`, `pieces_favorites/accessoires`).
  fn grouped(
    &mut self,
    key: &str,
    folded: &str,
    groups: &[(&'static str, Entries)],
  ) {
    let mut tree: BTreeMap<String, TagValue> = BTreeMap::new();
    for (path, entries) in groups {
      let matches = scan_entries(folded, entries);
      if matches.is_empty() {
        continue;
      }
      let mut values = Vec::new();
      for m in &matches {
        values.push(m.canonical.to_string());
        self.observe(&format!("{key}/{path}"), m.canonical, m.surface);
      }
      insert_at_path(&mut tree, path, TagValue::List(values));
    }
    if !tree.is_empty() {
      self.entries.insert(key.to_string(), TagValue::Map(tree));
    }
  }

  fn finish(self, doc: &mut ProfileDoc) {
    if !self.entries.is_empty() {
      doc.set(self.category, TagValue::Map(self.entries));
    }
  }
}

/// Insert `value` at a `/`-separated path, creating intermediate maps.
fn insert_at_path(
  tree: &mut BTreeMap<String, TagValue>,
  path: &str,
  value: TagValue,
) {
  match path.split_once('/') {
    None => {
      tree.insert(path.to_string(), value);
    }
    Some((head, rest)) => {
      let entry = tree
        .entry(head.to_string())
        .or_insert_with(|| TagValue::Map(BTreeMap::new()));
      if let TagValue::Map(inner) = entry {
        insert_at_path(inner, rest, value);
      }
    }
  }
}

// ─── Extraction ──────────────────────────────────────────────────────────────

/// Extract a tag set from normalized text.
///
/// Stateless and deterministic: the same `(cleaned, lang, reference)` always
/// produces the same document, observation list, and context. The language
/// hint only contributes the `langue_parlee` tag; every dictionary runs
/// regardless.
pub fn extract(
  cleaned: &str,
  lang: Option<Lang>,
  reference: NaiveDate,
) -> Extraction {
  if cleaned.trim().is_empty() {
    return Extraction::default();
  }

  let folded = cleaned.to_lowercase();
  let mut doc = ProfileDoc::new();
  let mut observations = Vec::new();
  let ctx = context::extract_context(&folded, reference);

  // ── Identité ──────────────────────────────────────────────────────────
  let mut identite = Section::new(category::IDENTITE, &mut observations);
  identite.first("genre", &scan_entries(&folded, dict::GENRE));
  if let Some(age) = probes::extract_age(&folded, reference.year()) {
    identite.scalar(
      "age",
      TagValue::from(age.bucket.as_str()),
      &age.evidence,
    );
    identite.scalar(
      "age_brut",
      TagValue::Integer(age.years as i64),
      &age.evidence,
    );
  }
  identite.first(
    "statut_relationnel",
    &scan_entries(&folded, dict::STATUT_RELATIONNEL),
  );
  identite.list(
    "situation_familiale",
    &scan_entries(&folded, dict::SITUATION_FAMILIALE),
  );
  if let Some((count, evidence)) = probes::extract_child_count(&folded) {
    identite.scalar(
      "nombre_enfants",
      TagValue::Integer(count as i64),
      &evidence,
    );
  }
  if let Some(lang) = lang {
    identite.scalar(
      "langue_parlee",
      TagValue::from(lang.canonical_name()),
      lang.code(),
    );
  }
  identite.list("profession", &scan_entries(&folded, dict::PROFESSION));
  identite.finish(&mut doc);

  // ── Localisation ──────────────────────────────────────────────────────
  let mut localisation =
    Section::new(category::LOCALISATION, &mut observations);
  let city_hits = cities::scan_cities(&folded);
  let mut by_region: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
  for hit in &city_hits {
    localisation.observe(hit.region, hit.city, hit.surface);
    by_region.entry(hit.region).or_default().push(hit.city.to_string());
  }
  for (region, cities) in by_region {
    localisation
      .entries
      .insert(region.to_string(), TagValue::List(cities));
  }
  localisation.finish(&mut doc);

  // ── Lifestyle ─────────────────────────────────────────────────────────
  let mut lifestyle = Section::new(category::LIFESTYLE, &mut observations);
  lifestyle.grouped("sport", &folded, dict::SPORT_GROUPS);
  lifestyle.list("musique", &scan_entries(&folded, dict::MUSIQUE));
  lifestyle.first("animaux", &scan_entries(&folded, dict::ANIMAUX));
  lifestyle.list("voyage", &scan_entries(&folded, dict::VOYAGE));
  lifestyle.list("art_culture", &scan_entries(&folded, dict::ART_CULTURE));
  lifestyle.list("gastronomie", &scan_entries(&folded, dict::GASTRONOMIE));
  lifestyle.finish(&mut doc);

  // ── Style personnel ───────────────────────────────────────────────────
  let mut style = Section::new(category::STYLE, &mut observations);
  style.list(
    "type_vetements",
    &scan_entries(&folded, dict::TYPE_VETEMENTS),
  );
  style.grouped("pieces_favorites", &folded, dict::PIECES_GROUPS);
  style.list("couleurs_preferees", &scan_entries(&folded, dict::COULEURS));
  style.list("matieres_preferees", &scan_entries(&folded, dict::MATIERES));
  style.first(
    "sensibilite_mode",
    &scan_entries(&folded, dict::SENSIBILITE_MODE),
  );
  style.list("tailles", &scan_entries(&folded, dict::TAILLES));
  style.finish(&mut doc);

  // ── Projet d'achat ────────────────────────────────────────────────────
  let mut projet = Section::new(category::PROJET_ACHAT, &mut observations);
  projet.list("motif", &scan_entries(&folded, dict::MOTIF));
  if let Some(budget) = probes::extract_budget(&folded) {
    projet.scalar(
      "budget",
      TagValue::from(budget.bucket.as_str()),
      &budget.evidence,
    );
    projet.scalar(
      "budget_brut",
      TagValue::Integer(budget.amount.round() as i64),
      &budget.evidence,
    );
  }
  projet.first("timing", &scan_entries(&folded, dict::TIMING));
  projet.list(
    "marques_preferees",
    &scan_entries(&folded, dict::MARQUES),
  );
  projet.first(
    "frequence_achat",
    &scan_entries(&folded, dict::FREQUENCE_ACHAT),
  );
  let proximity_boost = upcoming_within(&ctx, reference, 14);
  let urgency = probes::extract_urgency(&folded, proximity_boost);
  projet.scalar(
    "urgence_score",
    TagValue::Integer(urgency as i64),
    "weighted keyword score",
  );
  projet.finish(&mut doc);

  // ── Préférences & contraintes ─────────────────────────────────────────
  let mut preferences =
    Section::new(category::PREFERENCES, &mut observations);
  preferences.list("regime", &scan_entries(&folded, dict::REGIME));
  preferences.list("allergies", &scan_entries(&folded, dict::ALLERGIES));
  preferences.list("valeurs", &scan_entries(&folded, dict::VALEURS));
  preferences.finish(&mut doc);

  // ── Suivi CRM ─────────────────────────────────────────────────────────
  let mut suivi = Section::new(category::SUIVI, &mut observations);
  suivi.list("action", &scan_entries(&folded, dict::ACTIONS));
  suivi.first("echeance", &scan_entries(&folded, dict::ECHEANCES));
  suivi.first("canal_contact", &scan_entries(&folded, dict::CANAUX));
  suivi.finish(&mut doc);

  Extraction { doc, observations, context: ctx }
}

/// Whether any detected date or project lands within `days` of `reference`.
fn upcoming_within(
  ctx: &ExtractedContext,
  reference: NaiveDate,
  days: i64,
) -> bool {
  let close = |date: NaiveDate| {
    let delta = (date - reference).num_days();
    (0..=days).contains(&delta)
  };
  ctx
    .key_dates
    .iter()
    .filter_map(|d| d.estimated)
    .chain(ctx.life_projects.iter().filter_map(|p| p.estimated))
    .any(close)
}
