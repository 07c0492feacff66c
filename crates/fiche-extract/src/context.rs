//! Context-aware extraction: key dates, life projects, owned products,
//! waitlisted items, and cross-maison affinities.
//!
//! These feed the activation engine rather than the taxonomy tag set; the
//! types serialize straight into activation context payloads.

use chrono::{Datelike, Days, NaiveDate};
use fiche_taxonomy::{
  cities,
  dict,
  scan::{find_word, scan_entries},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vocab;

// ─── Key dates ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
  AnniversaireEpouse,
  AnniversaireMari,
  AnniversaireEnfant,
  AnniversaireMariage,
  Anniversaire,
  Naissance,
  Mariage,
  Noel,
  SaintValentin,
  FeteDesMeres,
  FeteDesPeres,
  Diplome,
}

impl DateKind {
  pub fn label(self) -> &'static str {
    match self {
      Self::AnniversaireEpouse => "Anniversaire de votre épouse",
      Self::AnniversaireMari => "Anniversaire de votre époux",
      Self::AnniversaireEnfant => "Anniversaire de votre enfant",
      Self::AnniversaireMariage => "Votre anniversaire de mariage",
      Self::Anniversaire => "Un anniversaire",
      Self::Naissance => "Une naissance",
      Self::Mariage => "Un mariage",
      Self::Noel => "Noël",
      Self::SaintValentin => "La Saint-Valentin",
      Self::FeteDesMeres => "La fête des mères",
      Self::FeteDesPeres => "La fête des pères",
      Self::Diplome => "Une remise de diplôme",
    }
  }
}

/// A detected key date with an estimated calendar date when one could be
/// read or inferred nearby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDate {
  pub kind:       DateKind,
  /// The raw date expression found near the trigger, if any.
  pub date_text:  Option<String>,
  pub estimated:  Option<NaiveDate>,
  pub confidence: f64,
}

static DATE_TRIGGERS: Lazy<Vec<(DateKind, Regex)>> = Lazy::new(|| {
  let patterns: &[(DateKind, &str)] = &[
    (
      DateKind::AnniversaireEpouse,
      r"anniversaire\s+(?:de\s+)?(?:ma\s+)?(?:femme|épouse)\b|birthday\s+of\s+my\s+wife|my\s+wife's\s+birthday",
    ),
    (
      DateKind::AnniversaireMari,
      r"anniversaire\s+(?:de\s+)?(?:mon\s+)?(?:mari|époux)\b|birthday\s+of\s+my\s+husband|my\s+husband's\s+birthday",
    ),
    (
      DateKind::AnniversaireEnfant,
      r"anniversaire\s+(?:de\s+)?(?:mon\s+fils|ma\s+fille|mon\s+enfant)\b|birthday\s+of\s+my\s+(?:son|daughter)\b",
    ),
    (
      DateKind::AnniversaireMariage,
      r"anniversaire\s+(?:de\s+)?(?:notre\s+)?mariage\b|wedding\s+anniversary",
    ),
    (DateKind::Naissance, r"naissance\s+de|baby\s*shower|nouveau[\-\s]né\b"),
    (
      DateKind::Mariage,
      r"(?:notre|son|leur|le|un)\s+mariage\b|se\s+mari(?:e|er)\b|getting\s+married|fiançailles",
    ),
    (DateKind::Noel, r"noël|christmas|natale|navidad|weihnachten"),
    (DateKind::SaintValentin, r"saint[\-\s]valentin|valentine"),
    (DateKind::FeteDesMeres, r"fête\s+des\s+mères|mother's\s+day"),
    (DateKind::FeteDesPeres, r"fête\s+des\s+pères|father's\s+day"),
    (DateKind::Diplome, r"diplôme|graduation|fin\s+d'études|laurea"),
    // Generic birthday last so the specific recipients win.
    (DateKind::Anniversaire, r"anniversaire|birthday|compleanno|cumpleaños"),
  ];
  patterns
    .iter()
    .map(|(kind, p)| (*kind, Regex::new(&format!("(?i){p}")).unwrap()))
    .collect()
});

static DATE_FR_MONTH: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"le\s+(\d{1,2})(?:er)?\s+(janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre)")
    .unwrap()
});
static DATE_NUMERIC: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}))?\b").unwrap());
static DATE_RELATIVE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"dans\s+(\d+)\s+(mois|semaines?|jours?)").unwrap()
});
static NEXT_MONTH: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?:le\s+)?mois\s+prochain|next\s+month").unwrap());
static NEXT_WEEK: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?:la\s+)?semaine\s+prochaine|next\s+week").unwrap()
});

fn month_number(name: &str) -> u32 {
  match name {
    "janvier" => 1,
    "février" => 2,
    "mars" => 3,
    "avril" => 4,
    "mai" => 5,
    "juin" => 6,
    "juillet" => 7,
    "août" => 8,
    "septembre" => 9,
    "octobre" => 10,
    "novembre" => 11,
    _ => 12,
  }
}

/// Resolve a day/month to the next occurrence relative to `reference`.
fn upcoming(day: u32, month: u32, reference: NaiveDate) -> Option<NaiveDate> {
  let year = if month >= reference.month() {
    reference.year()
  } else {
    reference.year() + 1
  };
  NaiveDate::from_ymd_opt(year, month, day)
}

/// Look for a concrete date expression inside `window`.
fn find_nearby_date(
  window: &str,
  reference: NaiveDate,
) -> Option<(String, NaiveDate)> {
  if let Some(caps) = DATE_FR_MONTH.captures(window) {
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2]);
    if let Some(date) = upcoming(day, month, reference) {
      return Some((caps[0].to_string(), date));
    }
  }
  if let Some(caps) = DATE_NUMERIC.captures(window) {
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    if (1..=31).contains(&day) && (1..=12).contains(&month) {
      let date = match caps.get(3) {
        Some(y) => NaiveDate::from_ymd_opt(y.as_str().parse().ok()?, month, day),
        None => upcoming(day, month, reference),
      };
      if let Some(date) = date {
        return Some((caps[0].to_string(), date));
      }
    }
  }
  if let Some(caps) = DATE_RELATIVE.captures(window) {
    let n: u64 = caps[1].parse().ok()?;
    let days = if caps[2].starts_with("mois") {
      n * 30
    } else if caps[2].starts_with("semaine") {
      n * 7
    } else {
      n
    };
    let date = reference.checked_add_days(Days::new(days))?;
    return Some((caps[0].to_string(), date));
  }
  if let Some(m) = NEXT_MONTH.find(window) {
    return Some((
      m.as_str().to_string(),
      reference.checked_add_days(Days::new(30))?,
    ));
  }
  if let Some(m) = NEXT_WEEK.find(window) {
    return Some((
      m.as_str().to_string(),
      reference.checked_add_days(Days::new(7))?,
    ));
  }
  None
}

fn window_around(text: &str, start: usize, end: usize) -> &str {
  let mut lo = start.saturating_sub(100);
  while !text.is_char_boundary(lo) {
    lo -= 1;
  }
  let mut hi = (end + 100).min(text.len());
  while !text.is_char_boundary(hi) {
    hi += 1;
  }
  &text[lo..hi]
}

/// Extract key dates from folded text. One result per date kind; the most
/// specific kind wins when triggers overlap (a wife's birthday is not also
/// reported as a generic birthday).
pub fn extract_key_dates(folded: &str, reference: NaiveDate) -> Vec<KeyDate> {
  let mut results: Vec<KeyDate> = Vec::new();
  let mut matched_spans: Vec<(usize, usize)> = Vec::new();

  for (kind, re) in DATE_TRIGGERS.iter() {
    let Some(m) = re.find(folded) else { continue };
    // The generic birthday trigger also fires inside every specific
    // anniversary phrase; skip overlapping spans.
    if matched_spans.iter().any(|(s, e)| m.start() < *e && m.end() > *s) {
      continue;
    }
    matched_spans.push((m.start(), m.end()));

    let window = window_around(folded, m.start(), m.end());
    let nearby = find_nearby_date(window, reference);
    let (date_text, estimated) = match nearby {
      Some((text, date)) => (Some(text), Some(date)),
      None => (None, None),
    };
    let confidence = if estimated.is_some() { 0.9 } else { 0.5 };
    results.push(KeyDate { kind: *kind, date_text, estimated, confidence });
  }

  results
}

// ─── Owned products ──────────────────────────────────────────────────────────

/// A product the client owns or talked about, enriched with brand, color,
/// and material when those were mentioned in the same transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMention {
  pub product:  String,
  pub brand:    Option<String>,
  pub color:    Option<String>,
  pub material: Option<String>,
}

pub fn extract_products(folded: &str) -> Vec<ProductMention> {
  let brands = scan_entries(folded, dict::MARQUES);
  let colors = scan_entries(folded, dict::COULEURS);
  let materials = scan_entries(folded, dict::MATIERES);

  let brand = brands.first().map(|m| m.canonical.to_string());
  let color = colors.first().map(|m| m.canonical.to_string());
  let material = materials.first().map(|m| m.canonical.to_string());

  let mut results = Vec::new();

  // Model names carry both the product and the maison.
  for (surface, (model, maison)) in vocab::MODELES {
    if find_word(folded, surface).is_some() {
      results.push(ProductMention {
        product:  (*model).to_string(),
        brand:    Some((*maison).to_string()),
        color:    color.clone(),
        material: material.clone(),
      });
    }
  }

  for hit in scan_entries(folded, vocab::PRODUITS) {
    results.push(ProductMention {
      product:  hit.canonical.to_string(),
      brand:    brand.clone(),
      color:    color.clone(),
      material: material.clone(),
    });
  }

  // A brand mention with no product still matters for affinity exclusion.
  if results.is_empty() && brand.is_some() {
    results.push(ProductMention {
      product: "non spécifié".to_string(),
      brand,
      color,
      material,
    });
  }

  results
}

// ─── Life projects ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
  Voyage,
  Evenement,
}

/// A planned trip or upcoming event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeProject {
  pub kind:      ProjectKind,
  /// Destination city for trips, event name otherwise.
  pub name:      String,
  pub timing:    Option<String>,
  pub estimated: Option<NaiveDate>,
}

static TIMING: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"demain|cette semaine|la semaine prochaine|le mois prochain|dans\s+\d+\s+(?:jours?|semaines?|mois)|bientôt|prochainement|next week|next month|soon",
  )
  .unwrap()
});

fn estimate_timing(
  timing: &str,
  reference: NaiveDate,
) -> Option<NaiveDate> {
  let days = if timing.contains("demain") {
    1
  } else if timing.contains("cette semaine") {
    3
  } else if timing.contains("semaine prochaine") || timing.contains("next week") {
    7
  } else if timing.contains("mois prochain") || timing.contains("next month") {
    30
  } else if timing.contains("bientôt")
    || timing.contains("prochainement")
    || timing.contains("soon")
  {
    14
  } else if let Some(caps) = DATE_RELATIVE.captures(timing) {
    let n: u64 = caps[1].parse().ok()?;
    if caps[2].starts_with("mois") {
      n * 30
    } else if caps[2].starts_with("semaine") {
      n * 7
    } else {
      n
    }
  } else {
    return None;
  };
  reference.checked_add_days(Days::new(days))
}

/// Trips (a city inside a travel-context window) and events.
pub fn extract_life_projects(
  folded: &str,
  reference: NaiveDate,
) -> Vec<LifeProject> {
  let timing = TIMING.find(folded).map(|m| m.as_str().to_string());
  let estimated =
    timing.as_deref().and_then(|t| estimate_timing(t, reference));

  let mut results = Vec::new();

  let trigger_offsets: Vec<usize> = vocab::TRIP_TRIGGERS
    .iter()
    .filter_map(|t| find_word(folded, t))
    .collect();

  for city in cities::scan_cities(folded) {
    let in_window = trigger_offsets
      .iter()
      .any(|t| city.offset.abs_diff(*t) <= 120);
    if in_window {
      results.push(LifeProject {
        kind:      ProjectKind::Voyage,
        name:      city.city.replace('_', " "),
        timing:    timing.clone(),
        estimated,
      });
    }
  }

  for hit in scan_entries(folded, vocab::EVENEMENTS) {
    results.push(LifeProject {
      kind:      ProjectKind::Evenement,
      name:      hit.canonical.to_string(),
      timing:    timing.clone(),
      estimated,
    });
  }

  results
}

// ─── Pending (waitlisted) items ──────────────────────────────────────────────

/// A requested product that was out of stock or waitlisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingItem {
  pub product: String,
  pub brand:   Option<String>,
  pub size:    Option<String>,
  pub color:   Option<String>,
}

static SIZE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(?:en|taille|size)\s+(\d{2}|xs|s|m|l|xl|xxl)\b").unwrap()
});

pub fn extract_pending_items(folded: &str) -> Vec<PendingItem> {
  let is_rupture =
    vocab::RUPTURE_PHRASES.iter().any(|p| folded.contains(p));
  if !is_rupture {
    return Vec::new();
  }

  let size = SIZE.captures(folded).map(|caps| caps[1].to_uppercase());

  let products = extract_products(folded);
  if products.is_empty() {
    return vec![PendingItem {
      product: "non spécifié".to_string(),
      brand:   None,
      size,
      color:   None,
    }];
  }

  products
    .into_iter()
    .map(|p| PendingItem {
      product: p.product,
      brand:   p.brand,
      size:    size.clone(),
      color:   p.color,
    })
    .collect()
}

// ─── Cross-maison affinities ─────────────────────────────────────────────────

/// A candidate sister-maison recommendation scored by keyword density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affinity {
  pub key:      String,
  pub label:    String,
  pub maisons:  Vec<String>,
  pub score:    f64,
  pub keywords: Vec<String>,
}

/// Minimum score an affinity needs to survive.
pub const AFFINITY_THRESHOLD: f64 = 0.5;

pub fn extract_affinities(folded: &str) -> Vec<Affinity> {
  let mut results = Vec::new();
  for group in vocab::AFFINITES {
    let matched: Vec<String> = group
      .keywords
      .iter()
      .filter(|kw| find_word(folded, kw).is_some())
      .map(|kw| kw.to_string())
      .collect();
    if matched.is_empty() {
      continue;
    }
    let score = (0.5 + 0.15 * matched.len() as f64).min(1.0);
    if score < AFFINITY_THRESHOLD {
      continue;
    }
    results.push(Affinity {
      key:      group.key.to_string(),
      label:    group.label.to_string(),
      maisons:  group.maisons.iter().map(|m| m.to_string()).collect(),
      score,
      keywords: matched,
    });
  }
  results
}

// ─── Aggregate ───────────────────────────────────────────────────────────────

/// Everything the activation engine needs beyond the tag set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContext {
  pub key_dates:      Vec<KeyDate>,
  pub owned_products: Vec<ProductMention>,
  pub life_projects:  Vec<LifeProject>,
  pub pending_items:  Vec<PendingItem>,
  pub affinities:     Vec<Affinity>,
}

pub fn extract_context(folded: &str, reference: NaiveDate) -> ExtractedContext {
  if folded.trim().is_empty() {
    return ExtractedContext::default();
  }
  ExtractedContext {
    key_dates:      extract_key_dates(folded, reference),
    owned_products: extract_products(folded),
    life_projects:  extract_life_projects(folded, reference),
    pending_items:  extract_pending_items(folded),
    affinities:     extract_affinities(folded),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn ref_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 30).unwrap()
  }

  #[test]
  fn wedding_anniversary_with_explicit_date() {
    let dates = extract_key_dates(
      "notre anniversaire de mariage est le 12 mai",
      ref_date(),
    );
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].kind, DateKind::AnniversaireMariage);
    assert_eq!(
      dates[0].estimated,
      NaiveDate::from_ymd_opt(2026, 5, 12)
    );
    assert_eq!(dates[0].confidence, 0.9);
  }

  #[test]
  fn specific_recipient_suppresses_generic_birthday() {
    let dates =
      extract_key_dates("l'anniversaire de ma femme approche", ref_date());
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].kind, DateKind::AnniversaireEpouse);
  }

  #[test]
  fn month_before_reference_rolls_to_next_year() {
    let dates = extract_key_dates(
      "son anniversaire est le 3 janvier",
      ref_date(),
    );
    assert_eq!(
      dates[0].estimated,
      NaiveDate::from_ymd_opt(2027, 1, 3)
    );
  }

  #[test]
  fn relative_date_estimation() {
    let dates =
      extract_key_dates("le mariage de ma fille dans 2 mois", ref_date());
    let wedding =
      dates.iter().find(|d| d.kind == DateKind::Mariage).unwrap();
    assert_eq!(
      wedding.estimated,
      NaiveDate::from_ymd_opt(2026, 6, 29)
    );
  }

  #[test]
  fn trigger_without_date_keeps_low_confidence() {
    let dates = extract_key_dates("pour noël peut-être", ref_date());
    assert_eq!(dates[0].kind, DateKind::Noel);
    assert!(dates[0].estimated.is_none());
    assert_eq!(dates[0].confidence, 0.5);
  }

  #[test]
  fn model_name_resolves_product_and_maison() {
    let products = extract_products("je cherche la speedy en cuir noir");
    let speedy = products.iter().find(|p| p.product == "Speedy").unwrap();
    assert_eq!(speedy.brand.as_deref(), Some("Louis Vuitton"));
    assert_eq!(speedy.color.as_deref(), Some("Noir"));
    assert_eq!(speedy.material.as_deref(), Some("Cuir"));
  }

  #[test]
  fn trip_needs_a_travel_context_window() {
    let with_trip =
      extract_life_projects("nous partons en voyage à tokyo", ref_date());
    assert!(
      with_trip
        .iter()
        .any(|p| p.kind == ProjectKind::Voyage && p.name == "Tokyo")
    );

    let without =
      extract_life_projects("elle habite à tokyo depuis dix ans", ref_date());
    assert!(without.iter().all(|p| p.kind != ProjectKind::Voyage));
  }

  #[test]
  fn pending_item_scenario() {
    let items = extract_pending_items("vous n'avez plus la speedy en 35");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product, "Speedy");
    assert_eq!(items[0].brand.as_deref(), Some("Louis Vuitton"));
    assert_eq!(items[0].size.as_deref(), Some("35"));
  }

  #[test]
  fn no_rupture_phrase_no_pending_item() {
    assert!(extract_pending_items("je cherche la speedy en 35").is_empty());
  }

  #[test]
  fn affinity_scores_grow_with_keyword_density() {
    let one = extract_affinities("un bon champagne");
    let aff = one.iter().find(|a| a.key == "vins_spiritueux").unwrap();
    assert!((aff.score - 0.65).abs() < 1e-9);

    let two = extract_affinities("champagne et grand cru avec un sommelier");
    let aff = two.iter().find(|a| a.key == "vins_spiritueux").unwrap();
    assert!(aff.score > 0.9);
  }

  #[test]
  fn empty_text_yields_default_context() {
    assert_eq!(extract_context("", ref_date()), ExtractedContext::default());
  }
}
