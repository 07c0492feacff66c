//! Numeric probes: age, budget, urgency, family composition.
//!
//! All probes work on the case-folded normalized text. Patterns are
//! compiled once and never mutated.

use fiche_core::bucket::{AgeBucket, BudgetBucket};
use once_cell::sync::Lazy;
use regex::Regex;

// ─── Age ─────────────────────────────────────────────────────────────────────

/// An extracted age: the raw integer plus its bucket and the matching span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeHit {
  pub years:    u32,
  pub bucket:   AgeBucket,
  pub evidence: String,
}

static AGE_UNIT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(\d{1,3})\s*(?:ans|years?(?:\s+old)?|anni|años|jahre)\b").unwrap()
});
static AGE_PREFIX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(?:aged?|âgée? de|age)\s*:?\s*(\d{1,3})\b").unwrap()
});
static BIRTH_YEAR: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(?:née? en|born(?: in)?)\s*(19\d{2}|20\d{2})\b").unwrap()
});
static DECADE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"\b(?:(early|mid|late)[\s\-]*)?(twenties|thirties|forties|fifties|sixties|vingtaine|trentaine|quarantaine|cinquantaine|soixantaine)\b",
  )
  .unwrap()
});

fn decade_base(word: &str) -> u32 {
  match word {
    "twenties" | "vingtaine" => 20,
    "thirties" | "trentaine" => 30,
    "forties" | "quarantaine" => 40,
    "fifties" | "cinquantaine" => 50,
    _ => 60,
  }
}

/// Extract an age from folded text. The first plausible match wins; decade
/// words resolve to a representative year (`mid-thirties` → 35).
pub fn extract_age(folded: &str, reference_year: i32) -> Option<AgeHit> {
  for re in [&*AGE_UNIT, &*AGE_PREFIX] {
    for caps in re.captures_iter(folded) {
      let years: u32 = caps[1].parse().ok()?;
      if (15..=100).contains(&years) {
        return Some(AgeHit {
          years,
          bucket: AgeBucket::from_years(years),
          evidence: caps[0].to_string(),
        });
      }
    }
  }

  if let Some(caps) = BIRTH_YEAR.captures(folded) {
    let year: i32 = caps[1].parse().ok()?;
    let years = (reference_year - year).max(0) as u32;
    if (15..=100).contains(&years) {
      return Some(AgeHit {
        years,
        bucket: AgeBucket::from_years(years),
        evidence: caps[0].to_string(),
      });
    }
  }

  if let Some(caps) = DECADE.captures(folded) {
    let base = decade_base(&caps[2]);
    let years = match caps.get(1).map(|m| m.as_str()) {
      Some("early") => base + 2,
      Some("late") => base + 8,
      _ => base + 5,
    };
    return Some(AgeHit {
      years,
      bucket: AgeBucket::from_years(years),
      evidence: caps[0].to_string(),
    });
  }

  None
}

// ─── Budget ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetHit {
  pub amount:   f64,
  pub bucket:   BudgetBucket,
  pub evidence: String,
}

static UNLIMITED: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"\b(?:budget illimité|illimité|no limit|sans limite|pas de (?:limite de )?budget|budget flexible|unlimited budget|gros budget)\b",
  )
  .unwrap()
});
static RANGE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(\d[\d\s.,]*)\s*(?:à|-|–|to|et)\s*(\d[\d\s.,]*)\s*([k€$£¥])").unwrap()
});
static K_SUFFIX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(\d+(?:[.,]\d+)?)\s*k\b").unwrap());
static SYMBOL_AFTER: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(\d[\d\s.,]*)\s*([€$£¥])").unwrap());
static SYMBOL_BEFORE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"([€$£¥])\s*(\d[\d\s.,]*)").unwrap());
static CURRENCY_WORD: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(\d[\d\s.,]*)\s*(?:euros?|dollars?|pounds?|francs?)\b").unwrap()
});
static BUDGET_LABEL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(?:budget|presupuesto)\s*(?:de|di|:)?\s*(\d[\d\s.,]*)").unwrap()
});

/// Parse an amount with European (`5.000`) or US (`5,000`) thousands
/// separators, or a decimal part.
fn parse_amount(raw: &str) -> Option<f64> {
  let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
  let compact = compact.trim_matches(|c| c == '.' || c == ',').to_string();
  if compact.is_empty() {
    return None;
  }

  let has_dot = compact.contains('.');
  let has_comma = compact.contains(',');

  let normalized = if has_dot && has_comma {
    // The last separator is the decimal mark.
    let last_dot = compact.rfind('.').unwrap();
    let last_comma = compact.rfind(',').unwrap();
    if last_dot > last_comma {
      compact.replace(',', "")
    } else {
      compact.replace('.', "").replace(',', ".")
    }
  } else if has_dot || has_comma {
    let sep = if has_dot { '.' } else { ',' };
    let after = compact.rsplit(sep).next().unwrap();
    if after.len() == 3 {
      // Thousands separator.
      compact.replace(sep, "")
    } else {
      compact.replace(',', ".")
    }
  } else {
    compact
  };

  normalized.parse::<f64>().ok().filter(|v| *v > 0.0)
}

/// Extract a budget from folded text. All candidates are collected; the
/// largest wins (a range contributes its midpoint).
pub fn extract_budget(folded: &str) -> Option<BudgetHit> {
  if let Some(m) = UNLIMITED.find(folded) {
    return Some(BudgetHit {
      amount:   25_000.0,
      bucket:   BudgetBucket::Over25k,
      evidence: m.as_str().to_string(),
    });
  }

  // Ranges take the midpoint and win over any single-amount pattern that
  // would otherwise pick up one of their ends.
  let mut candidates: Vec<(f64, String)> = Vec::new();
  for caps in RANGE.captures_iter(folded) {
    let (Some(lo), Some(hi)) = (parse_amount(&caps[1]), parse_amount(&caps[2]))
    else {
      continue;
    };
    // A trailing "k" (as in "5-10k") scales both ends; bare small numbers
    // are read as thousands too.
    let scale = if &caps[3] == "k" { 1_000.0 } else { 1.0 };
    let lo = if lo * scale < 100.0 { lo * 1_000.0 } else { lo * scale };
    let hi = if hi * scale < 100.0 { hi * 1_000.0 } else { hi * scale };
    candidates.push(((lo + hi) / 2.0, caps[0].to_string()));
  }
  if let Some(hit) = pick_largest(candidates) {
    return Some(hit);
  }

  let mut candidates: Vec<(f64, String)> = Vec::new();
  for caps in K_SUFFIX.captures_iter(folded) {
    if let Some(v) = parse_amount(&caps[1]) {
      candidates.push((v * 1_000.0, caps[0].to_string()));
    }
  }
  for re in [&*SYMBOL_AFTER, &*CURRENCY_WORD] {
    for caps in re.captures_iter(folded) {
      if let Some(v) = parse_amount(&caps[1]) {
        candidates.push((v, caps[0].to_string()));
      }
    }
  }
  for caps in SYMBOL_BEFORE.captures_iter(folded) {
    if let Some(v) = parse_amount(&caps[2]) {
      candidates.push((v, caps[0].to_string()));
    }
  }
  for caps in BUDGET_LABEL.captures_iter(folded) {
    if let Some(v) = parse_amount(&caps[1]) {
      // "budget 15" almost certainly means thousands.
      let v = if v < 100.0 { v * 1_000.0 } else { v };
      candidates.push((v, caps[0].to_string()));
    }
  }

  pick_largest(candidates)
}

fn pick_largest(candidates: Vec<(f64, String)>) -> Option<BudgetHit> {
  candidates
    .into_iter()
    .max_by(|(a, _), (b, _)| a.total_cmp(b))
    .map(|(amount, evidence)| BudgetHit {
      amount,
      bucket: BudgetBucket::from_amount(amount),
      evidence,
    })
}

// ─── Urgency ─────────────────────────────────────────────────────────────────

const TIER5: &[&str] = &[
  "urgent", "urgence", "immédiatement", "tout de suite", "asap", "demain",
  "aujourd'hui", "cette semaine", "cassé", "perdu", "broken",
];
const TIER4: &[&str] = &[
  "mariage", "anniversaire", "avant le", "avant noël", "mois prochain",
  "besoin de", "il me faut", "deadline",
];
const TIER3: &[&str] = &[
  "cherche", "voudrais", "j'aime", "intéressé", "intéressée", "combien",
  "en stock", "disponible",
];
const TIER2: &[&str] =
  &["regarde", "hésite", "peut-être", "question", "me renseigne", "un jour"];

/// Weighted keyword scoring on 1..=5, saturating at 5.
/// `proximity_boost` is added when a concrete date sits within two weeks.
pub fn extract_urgency(folded: &str, proximity_boost: bool) -> u8 {
  let contains = |words: &[&str]| {
    words.iter().any(|w| fiche_taxonomy::scan::find_word(folded, w).is_some())
  };

  let mut score: u8 = 1;
  if contains(TIER2) {
    score = score.max(2);
  }
  if contains(TIER3) {
    score = score.max(3);
  }
  if contains(TIER4) {
    score = score.max(4);
  }
  if contains(TIER5) {
    score = 5;
  }
  if proximity_boost {
    score = (score + 1).min(5);
  }
  score
}

// ─── Family composition ──────────────────────────────────────────────────────

static CHILD_COUNT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(\d{1,2})\s*(?:enfants?|kids?|children|figli|hijos|kinder)\b")
    .unwrap()
});

/// "2 enfants" (after number-word resolution) → 2.
pub fn extract_child_count(folded: &str) -> Option<(u32, String)> {
  let caps = CHILD_COUNT.captures(folded)?;
  let count: u32 = caps[1].parse().ok()?;
  (count > 0 && count < 20).then(|| (count, caps[0].to_string()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn age_from_unit_patterns() {
    let hit = extract_age("cliente de 45 ans", 2026).unwrap();
    assert_eq!(hit.years, 45);
    assert_eq!(hit.bucket.as_str(), "36-45");

    assert_eq!(extract_age("she is 38 years old", 2026).unwrap().years, 38);
    assert_eq!(extract_age("ha 52 anni", 2026).unwrap().years, 52);
  }

  #[test]
  fn age_first_match_wins() {
    let hit = extract_age("45 ans, sa fille a 20 ans", 2026).unwrap();
    assert_eq!(hit.years, 45);
  }

  #[test]
  fn age_from_birth_year() {
    let hit = extract_age("née en 1980", 2026).unwrap();
    assert_eq!(hit.years, 46);
    assert_eq!(hit.bucket.as_str(), "46-55");
  }

  #[test]
  fn age_from_decade_words() {
    assert_eq!(extract_age("la quarantaine", 2026).unwrap().years, 45);
    assert_eq!(extract_age("in her early forties", 2026).unwrap().years, 42);
    assert_eq!(extract_age("late twenties", 2026).unwrap().years, 28);
  }

  #[test]
  fn age_rejects_implausible_values() {
    assert!(extract_age("il y a 8 ans", 2026).is_none());
    assert!(extract_age("dans 200 ans", 2026).is_none());
  }

  #[test]
  fn budget_symbol_and_separators() {
    let hit = extract_budget("budget 15.000€ pour un sac").unwrap();
    assert_eq!(hit.amount, 15_000.0);
    assert_eq!(hit.bucket.as_str(), "10-15k");

    assert_eq!(extract_budget("around $5,000").unwrap().amount, 5_000.0);
    assert_eq!(extract_budget("5.000,00€ max").unwrap().amount, 5_000.0);
  }

  #[test]
  fn budget_k_suffix_and_label() {
    assert_eq!(extract_budget("environ 8k").unwrap().amount, 8_000.0);
    assert_eq!(extract_budget("budget 12").unwrap().amount, 12_000.0);
    assert_eq!(extract_budget("presupuesto de 6000").unwrap().amount, 6_000.0);
  }

  #[test]
  fn budget_range_takes_midpoint() {
    let hit = extract_budget("entre 5 et 10 k€, on verra").unwrap();
    assert_eq!(hit.amount, 7_500.0);
    assert_eq!(hit.bucket.as_str(), "5-10k");
  }

  #[test]
  fn budget_unlimited_maps_to_top_bucket() {
    assert_eq!(
      extract_budget("budget illimité").unwrap().bucket.as_str(),
      "25k+"
    );
  }

  #[test]
  fn budget_currency_symbol_not_converted() {
    let eur = extract_budget("25000 €").unwrap();
    let usd = extract_budget("$ 25000").unwrap();
    assert_eq!(eur.bucket, usd.bucket);
  }

  #[test]
  fn urgency_tiers() {
    assert_eq!(extract_urgency("je regarde seulement", false), 2);
    assert_eq!(extract_urgency("je cherche un sac", false), 3);
    assert_eq!(extract_urgency("il me faut ça avant le mariage", false), 4);
    assert_eq!(extract_urgency("c'est urgent, demain", false), 5);
    assert_eq!(extract_urgency("bonjour merci", false), 1);
  }

  #[test]
  fn urgency_proximity_boost_saturates() {
    assert_eq!(extract_urgency("je cherche un sac", true), 4);
    assert_eq!(extract_urgency("urgent", true), 5);
  }

  #[test]
  fn child_count() {
    let (n, evidence) = extract_child_count("nous avons 2 enfants").unwrap();
    assert_eq!(n, 2);
    assert_eq!(evidence, "2 enfants");
    assert!(extract_child_count("sans enfant").is_none());
  }
}
