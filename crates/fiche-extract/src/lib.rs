//! Rule-based tag extractor.
//!
//! Maps normalized transcript text onto the fixed taxonomy through the
//! multilingual keyword dictionaries and a handful of regex probes (age,
//! budget, urgency, family), and derives the contextual signals the
//! activation engine consumes (key dates, trips, owned products, waitlisted
//! items, cross-maison affinities).
//!
//! The extractor is a pure function over `(cleaned_text, taxonomy_version)`;
//! every table is module-level read-only state built at first use.

pub mod context;
mod extractor;
mod probes;
pub mod vocab;

pub use context::{
  Affinity, DateKind, ExtractedContext, KeyDate, LifeProject, PendingItem,
  ProductMention, ProjectKind,
};
pub use extractor::{Extraction, extract};
pub use probes::{AgeHit, BudgetHit, extract_age, extract_budget, extract_urgency};

// ─── End-to-end scenario tests ───────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use fiche_core::{lang::Lang, profile::TagValue};

  use super::*;

  fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
  }

  fn leaf<'a>(
    extraction: &'a Extraction,
    category: &str,
    path: &[&str],
  ) -> Option<&'a TagValue> {
    let mut value = extraction.doc.get(category)?;
    for key in path {
      let TagValue::Map(map) = value else { return None };
      value = map.get(*key)?;
    }
    Some(value)
  }

  fn list_contains(value: Option<&TagValue>, expected: &str) -> bool {
    matches!(value, Some(TagValue::List(items)) if items.iter().any(|i| i == expected))
  }

  #[test]
  fn french_transcript_scenario() {
    let cleaned = fiche_normalize::normalize(
      "Cliente fidèle quarante-cinq ans à Paris, budget 15.000€ pour un sac \
       Louis Vuitton en cuir noir, urgent avant Noël.",
      Some(Lang::Fr),
    );
    let extraction = extract(&cleaned, Some(Lang::Fr), reference());

    assert_eq!(
      leaf(&extraction, "identite", &["age"]),
      Some(&TagValue::Text("36-45".into()))
    );
    assert_eq!(
      leaf(&extraction, "identite", &["age_brut"]),
      Some(&TagValue::Integer(45))
    );
    assert_eq!(
      leaf(&extraction, "identite", &["statut_relationnel"]),
      Some(&TagValue::Text("Fidèle".into()))
    );
    assert!(list_contains(
      leaf(&extraction, "localisation", &["europe"]),
      "Paris"
    ));
    assert_eq!(
      leaf(&extraction, "projet_achat", &["budget"]),
      Some(&TagValue::Text("10-15k".into()))
    );
    assert!(list_contains(
      leaf(&extraction, "projet_achat", &["marques_preferees"]),
      "Louis Vuitton"
    ));
    assert!(list_contains(
      leaf(&extraction, "style_personnel", &["matieres_preferees"]),
      "Cuir"
    ));
    assert!(list_contains(
      leaf(&extraction, "style_personnel", &["couleurs_preferees"]),
      "Noir"
    ));
    assert!(list_contains(
      leaf(&extraction, "projet_achat", &["motif"]),
      "Noël"
    ));

    let TagValue::Integer(urgency) =
      leaf(&extraction, "projet_achat", &["urgence_score"]).unwrap()
    else {
      panic!("urgency missing")
    };
    assert!(*urgency >= 4, "urgency was {urgency}");
  }

  #[test]
  fn observations_match_flattened_leaves() {
    let cleaned = fiche_normalize::normalize(
      "Cliente fidèle à Paris, elle aime le golf et le cuir noir.",
      Some(Lang::Fr),
    );
    let extraction = extract(&cleaned, Some(Lang::Fr), reference());

    // Every keyword-backed observation corresponds to a flattened leaf.
    let flat = extraction.doc.flatten();
    for obs in &extraction.observations {
      assert!(
        flat.iter().any(|f| {
          f.category == obs.category
            && f.subcategory == obs.subcategory
            && f.value == obs.value
        }),
        "observation without leaf: {obs:?}"
      );
    }
  }

  #[test]
  fn every_closed_leaf_is_taxonomy_allowed() {
    let cleaned = fiche_normalize::normalize(
      "Madame VIP de 45 ans à Paris, golf et yoga, champagne, sac Neverfull, \
       couleurs noir et beige, cachemire, budget 25k€, mariage en juin, \
       végétarienne, rappeler par WhatsApp dans un mois.",
      Some(Lang::Fr),
    );
    let extraction = extract(&cleaned, Some(Lang::Fr), reference());

    for flat in extraction.doc.flatten() {
      let sub = flat.subcategory.as_deref().unwrap_or("");
      assert!(
        fiche_taxonomy::is_allowed(&flat.category, sub, &flat.value),
        "leaf outside taxonomy: {flat:?}"
      );
    }
  }

  #[test]
  fn extraction_is_deterministic() {
    let cleaned = "Cliente fidèle à Paris, golf, cuir noir, budget 8k.";
    let a = extract(cleaned, None, reference());
    let b = extract(cleaned, None, reference());
    assert_eq!(a.doc, b.doc);
    assert_eq!(a.observations, b.observations);
    assert_eq!(a.context, b.context);
  }

  #[test]
  fn empty_text_extracts_nothing() {
    let extraction = extract("", None, reference());
    assert!(extraction.doc.is_empty());
    assert!(extraction.observations.is_empty());
    assert_eq!(extraction.warnings(), vec!["empty transcript"]);
  }

  #[test]
  fn missing_budget_is_a_warning() {
    let extraction = extract("Cliente fidèle à Paris.", None, reference());
    assert_eq!(extraction.warnings(), vec!["budget not extracted"]);
  }

  #[test]
  fn language_hint_sets_spoken_language_only() {
    let with_hint = extract("un sac noir", Some(Lang::It), reference());
    assert_eq!(
      leaf(&with_hint, "identite", &["langue_parlee"]),
      Some(&TagValue::Text("Italien".into()))
    );

    // Dictionaries are language-agnostic: the hint changes nothing else.
    let without = extract("un sac noir", None, reference());
    assert_eq!(
      leaf(&with_hint, "style_personnel", &["couleurs_preferees"]),
      leaf(&without, "style_personnel", &["couleurs_preferees"]),
    );
  }
}
