//! The taxonomy tree: `(category, subcategory)` → allowed values.
//!
//! Built once from the keyword dictionaries, the closed bucket enums, and
//! the city table. Numeric leaves (raw age, urgency score, child count) are
//! open: any primitive value is allowed there.

use std::collections::BTreeMap;

use fiche_core::bucket::{AgeBucket, BudgetBucket};
use once_cell::sync::Lazy;

use crate::{category, cities, dict, scan::Entries};

type Key = (&'static str, &'static str);

/// Leaves whose values are free-form primitives rather than a closed set.
const OPEN_LEAVES: &[Key] = &[
  (category::IDENTITE, "age_brut"),
  (category::IDENTITE, "nombre_enfants"),
  (category::IDENTITE, "langue_parlee"),
  (category::PROJET_ACHAT, "urgence_score"),
  (category::PROJET_ACHAT, "budget_brut"),
];

fn canonicals(entries: Entries) -> Vec<&'static str> {
  entries.iter().map(|(canonical, _)| *canonical).collect()
}

static TREE: Lazy<BTreeMap<Key, Vec<&'static str>>> = Lazy::new(|| {
  let mut tree: BTreeMap<Key, Vec<&'static str>> = BTreeMap::new();

  // Identité
  tree.insert((category::IDENTITE, "genre"), canonicals(dict::GENRE));
  tree.insert(
    (category::IDENTITE, "age"),
    vec![
      AgeBucket::From18To25.as_str(),
      AgeBucket::From26To35.as_str(),
      AgeBucket::From36To45.as_str(),
      AgeBucket::From46To55.as_str(),
      AgeBucket::Over56.as_str(),
    ],
  );
  tree.insert(
    (category::IDENTITE, "statut_relationnel"),
    canonicals(dict::STATUT_RELATIONNEL),
  );
  tree.insert(
    (category::IDENTITE, "situation_familiale"),
    canonicals(dict::SITUATION_FAMILIALE),
  );
  tree.insert((category::IDENTITE, "profession"), canonicals(dict::PROFESSION));

  // Localisation: one leaf per region, allowed values are its cities.
  for (region, cities) in cities::REGIONS {
    tree.insert(
      (category::LOCALISATION, region),
      cities.iter().map(|(city, _)| *city).collect(),
    );
  }

  // Lifestyle
  for (group, entries) in dict::SPORT_GROUPS {
    // Keys like "sport/individuel/outdoor" — the flattened leaf path.
    let key: &'static str =
      Box::leak(format!("sport/{group}").into_boxed_str());
    tree.insert((category::LIFESTYLE, key), canonicals(entries));
  }
  tree.insert((category::LIFESTYLE, "musique"), canonicals(dict::MUSIQUE));
  tree.insert((category::LIFESTYLE, "animaux"), canonicals(dict::ANIMAUX));
  tree.insert((category::LIFESTYLE, "voyage"), canonicals(dict::VOYAGE));
  tree.insert(
    (category::LIFESTYLE, "art_culture"),
    canonicals(dict::ART_CULTURE),
  );
  tree.insert(
    (category::LIFESTYLE, "gastronomie"),
    canonicals(dict::GASTRONOMIE),
  );

  // Style personnel
  tree.insert(
    (category::STYLE, "type_vetements"),
    canonicals(dict::TYPE_VETEMENTS),
  );
  for (group, entries) in dict::PIECES_GROUPS {
    let key: &'static str =
      Box::leak(format!("pieces_favorites/{group}").into_boxed_str());
    tree.insert((category::STYLE, key), canonicals(entries));
  }
  tree.insert(
    (category::STYLE, "couleurs_preferees"),
    canonicals(dict::COULEURS),
  );
  tree.insert(
    (category::STYLE, "matieres_preferees"),
    canonicals(dict::MATIERES),
  );
  tree.insert(
    (category::STYLE, "sensibilite_mode"),
    canonicals(dict::SENSIBILITE_MODE),
  );
  tree.insert((category::STYLE, "tailles"), canonicals(dict::TAILLES));

  // Projet d'achat
  tree.insert((category::PROJET_ACHAT, "motif"), canonicals(dict::MOTIF));
  tree.insert(
    (category::PROJET_ACHAT, "budget"),
    BudgetBucket::ALL.iter().map(|b| b.as_str()).collect(),
  );
  tree.insert((category::PROJET_ACHAT, "timing"), canonicals(dict::TIMING));
  tree.insert(
    (category::PROJET_ACHAT, "marques_preferees"),
    canonicals(dict::MARQUES),
  );
  tree.insert(
    (category::PROJET_ACHAT, "frequence_achat"),
    canonicals(dict::FREQUENCE_ACHAT),
  );

  // Préférences & contraintes
  tree.insert((category::PREFERENCES, "regime"), canonicals(dict::REGIME));
  tree.insert(
    (category::PREFERENCES, "allergies"),
    canonicals(dict::ALLERGIES),
  );
  tree.insert((category::PREFERENCES, "valeurs"), canonicals(dict::VALEURS));

  // Suivi CRM
  tree.insert((category::SUIVI, "action"), canonicals(dict::ACTIONS));
  tree.insert((category::SUIVI, "echeance"), canonicals(dict::ECHEANCES));
  tree.insert((category::SUIVI, "canal_contact"), canonicals(dict::CANAUX));

  tree
});

/// Allowed values for a `(category, subcategory)` pair, or `None` when the
/// pair is not a closed leaf.
pub fn allowed_values(
  category: &str,
  subcategory: &str,
) -> Option<&'static [&'static str]> {
  TREE
    .iter()
    .find(|((c, s), _)| *c == category && *s == subcategory)
    .map(|(_, values)| values.as_slice())
}

/// Whether `value` may appear under `(category, subcategory)`.
///
/// Open leaves (raw numbers) accept any value; unknown pairs are rejected.
pub fn is_allowed(category: &str, subcategory: &str, value: &str) -> bool {
  if OPEN_LEAVES
    .iter()
    .any(|(c, s)| *c == category && subcategory.starts_with(s))
  {
    return true;
  }
  match allowed_values(category, subcategory) {
    Some(values) => values.iter().any(|v| *v == value),
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dictionary_canonicals_are_allowed() {
    assert!(is_allowed("identite", "genre", "Femme"));
    assert!(is_allowed("style_personnel", "couleurs_preferees", "Noir"));
    assert!(is_allowed("projet_achat", "motif", "Noël"));
    assert!(is_allowed("lifestyle_centres_interet", "sport/individuel/outdoor", "Golf"));
  }

  #[test]
  fn bucket_labels_are_allowed() {
    for label in ["18-25", "26-35", "36-45", "46-55", "56+"] {
      assert!(is_allowed("identite", "age", label));
    }
    for label in ["<5k", "5-10k", "10-15k", "15-25k", "25k+"] {
      assert!(is_allowed("projet_achat", "budget", label));
    }
  }

  #[test]
  fn cities_are_allowed_under_their_region() {
    assert!(is_allowed("localisation", "europe", "Paris"));
    assert!(is_allowed("localisation", "moyen_orient_asie", "Tokyo"));
    assert!(!is_allowed("localisation", "europe", "Tokyo"));
  }

  #[test]
  fn open_leaves_accept_any_primitive() {
    assert!(is_allowed("identite", "age_brut", "45"));
    assert!(is_allowed("projet_achat", "urgence_score", "5"));
  }

  #[test]
  fn unknown_pairs_are_rejected() {
    assert!(!is_allowed("identite", "genre", "Inconnu"));
    assert!(!is_allowed("nope", "nope", "x"));
  }
}
