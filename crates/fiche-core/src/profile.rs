//! The in-memory profile document tree.
//!
//! A profile is a small tree of maps and lists keyed by taxonomy category.
//! The tree is immutable once built by the extractor; storage flattens every
//! leaf into a `(category, subcategory, value)` triple at write time, where
//! `subcategory` is the `/`-joined path below the top-level category.
//!
//! `BTreeMap` everywhere: iteration order is part of the contract (flattened
//! taggings, serialized JSON, and activation output must be byte-identical
//! across runs).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── TagValue ────────────────────────────────────────────────────────────────

/// A node of the profile document.
///
/// Untagged serde representation: the JSON mirror reads as a plain nested
/// document, not as an enum encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
  Text(String),
  Integer(i64),
  Number(f64),
  List(Vec<String>),
  Map(BTreeMap<String, TagValue>),
}

impl TagValue {
  /// Stringify a scalar leaf the way it is stored in the `tags` table.
  fn leaf_string(&self) -> Option<String> {
    match self {
      Self::Text(s) => Some(s.clone()),
      Self::Integer(n) => Some(n.to_string()),
      Self::Number(x) => Some(x.to_string()),
      Self::List(_) | Self::Map(_) => None,
    }
  }

  pub fn map(entries: impl IntoIterator<Item = (String, TagValue)>) -> Self {
    Self::Map(entries.into_iter().collect())
  }
}

impl From<&str> for TagValue {
  fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl From<String> for TagValue {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<Vec<String>> for TagValue {
  fn from(v: Vec<String>) -> Self { Self::List(v) }
}

impl From<i64> for TagValue {
  fn from(n: i64) -> Self { Self::Integer(n) }
}

// ─── FlatTag ─────────────────────────────────────────────────────────────────

/// One flattened leaf of a profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTag {
  pub category:    String,
  /// `/`-joined path below the category; `None` when the leaf sits directly
  /// under it.
  pub subcategory: Option<String>,
  pub value:       String,
}

// ─── ProfileDoc ──────────────────────────────────────────────────────────────

/// The profile document: top-level taxonomy categories mapped to value
/// trees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileDoc {
  sections: BTreeMap<String, TagValue>,
}

impl ProfileDoc {
  pub fn new() -> Self { Self::default() }

  /// Insert (or replace) a top-level category.
  pub fn set(&mut self, category: impl Into<String>, value: TagValue) {
    self.sections.insert(category.into(), value);
  }

  pub fn get(&self, category: &str) -> Option<&TagValue> {
    self.sections.get(category)
  }

  pub fn sections(&self) -> &BTreeMap<String, TagValue> { &self.sections }

  pub fn is_empty(&self) -> bool { self.sections.is_empty() }

  /// Walk the tree and emit one [`FlatTag`] per scalar leaf, lists
  /// contributing one leaf per element. Empty maps and lists emit nothing.
  pub fn flatten(&self) -> Vec<FlatTag> {
    let mut out = Vec::new();
    for (category, value) in &self.sections {
      flatten_into(&mut out, category, None, value);
    }
    out
  }
}

fn flatten_into(
  out: &mut Vec<FlatTag>,
  category: &str,
  path: Option<&str>,
  value: &TagValue,
) {
  match value {
    TagValue::Map(entries) => {
      for (key, child) in entries {
        let joined = match path {
          Some(p) => format!("{p}/{key}"),
          None => key.clone(),
        };
        flatten_into(out, category, Some(&joined), child);
      }
    }
    TagValue::List(items) => {
      for item in items {
        out.push(FlatTag {
          category:    category.to_string(),
          subcategory: path.map(str::to_string),
          value:       item.clone(),
        });
      }
    }
    leaf => {
      if let Some(value) = leaf.leaf_string() {
        out.push(FlatTag {
          category:    category.to_string(),
          subcategory: path.map(str::to_string),
          value,
        });
      }
    }
  }
}

// ─── TagObservation ──────────────────────────────────────────────────────────

/// The extractor's persistence tuple: one observed tag value with the score
/// and evidence that will back the resulting [`crate::entity::Tagging`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagObservation {
  pub category:    String,
  pub subcategory: Option<String>,
  pub value:       String,
  pub score:       f64,
  /// The matching text span (or a small JSON payload).
  pub evidence:    Option<String>,
}

impl TagObservation {
  pub fn new(
    category: impl Into<String>,
    subcategory: Option<String>,
    value: impl Into<String>,
    evidence: impl Into<String>,
  ) -> Self {
    Self {
      category: category.into(),
      subcategory,
      value: value.into(),
      score: 1.0,
      evidence: Some(evidence.into()),
    }
  }
}

// ─── ClientProfile ───────────────────────────────────────────────────────────

/// Conversation-level metadata carried on each snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileMetadata {
  pub conversation_date: Option<String>,
  pub duration:          Option<String>,
  pub language:          Option<String>,
  pub profile_version:   String,
}

/// A fully assembled profile, ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ClientProfile {
  pub client_id: String,
  pub metadata:  ProfileMetadata,
  #[serde(flatten)]
  pub doc:       ProfileDoc,
  /// Extraction tuples backing the taggings; not part of the JSON mirror.
  #[serde(skip)]
  pub observations: Vec<TagObservation>,
}

impl ClientProfile {
  /// Serialize the document (client id + metadata + sections) for the
  /// snapshot's `profile_json` column and the JSON mirror.
  pub fn to_json(&self) -> crate::Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn to_json_pretty(&self) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Find the observation matching a flattened leaf, if the extractor
  /// recorded one.
  pub fn observation_for(&self, flat: &FlatTag) -> Option<&TagObservation> {
    self.observations.iter().find(|o| {
      o.category == flat.category
        && o.subcategory == flat.subcategory
        && o.value == flat.value
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_doc() -> ProfileDoc {
    let mut doc = ProfileDoc::new();
    doc.set(
      "identite",
      TagValue::map([
        ("genre".to_string(), TagValue::from("Femme")),
        ("age".to_string(), TagValue::from("36-45")),
        ("age_brut".to_string(), TagValue::Integer(45)),
      ]),
    );
    doc.set(
      "localisation",
      TagValue::map([(
        "europe".to_string(),
        TagValue::List(vec!["Paris".to_string()]),
      )]),
    );
    doc.set(
      "style_personnel",
      TagValue::map([(
        "couleurs_preferees".to_string(),
        TagValue::List(vec!["Noir".to_string(), "Beige".to_string()]),
      )]),
    );
    doc
  }

  #[test]
  fn flatten_emits_one_leaf_per_value() {
    let flat = sample_doc().flatten();
    assert_eq!(flat.len(), 6);

    assert!(flat.contains(&FlatTag {
      category:    "identite".to_string(),
      subcategory: Some("genre".to_string()),
      value:       "Femme".to_string(),
    }));
    assert!(flat.contains(&FlatTag {
      category:    "localisation".to_string(),
      subcategory: Some("europe".to_string()),
      value:       "Paris".to_string(),
    }));
  }

  #[test]
  fn flatten_joins_nested_paths_with_slash() {
    let mut doc = ProfileDoc::new();
    doc.set(
      "lifestyle_centres_interet",
      TagValue::map([(
        "sport".to_string(),
        TagValue::map([(
          "individuel".to_string(),
          TagValue::List(vec!["Golf".to_string()]),
        )]),
      )]),
    );

    let flat = doc.flatten();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].subcategory.as_deref(), Some("sport/individuel"));
    assert_eq!(flat[0].value, "Golf");
  }

  #[test]
  fn flatten_skips_empty_containers() {
    let mut doc = ProfileDoc::new();
    doc.set("identite", TagValue::map([]));
    doc.set("suivi", TagValue::List(vec![]));
    assert!(doc.flatten().is_empty());
  }

  #[test]
  fn flatten_is_deterministic() {
    let a = sample_doc().flatten();
    let b = sample_doc().flatten();
    assert_eq!(a, b);
  }

  #[test]
  fn profile_json_flattens_sections_to_top_level() {
    let profile = ClientProfile {
      client_id:    "CA-001".to_string(),
      metadata:     ProfileMetadata {
        profile_version: "2.0".to_string(),
        ..Default::default()
      },
      doc:          sample_doc(),
      observations: vec![],
    };

    let value: serde_json::Value =
      serde_json::from_str(&profile.to_json().unwrap()).unwrap();
    assert_eq!(value["client_id"], "CA-001");
    assert_eq!(value["metadata"]["profile_version"], "2.0");
    assert_eq!(value["identite"]["genre"], "Femme");
    assert_eq!(value["localisation"]["europe"][0], "Paris");
  }
}
