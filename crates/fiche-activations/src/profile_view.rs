//! Read helpers over the profile document, shared by every generator.

use fiche_core::profile::{ProfileDoc, TagValue};

use crate::activation::Channel;

/// Borrowed view with the lookups the generators need.
#[derive(Clone, Copy)]
pub struct ProfileView<'a> {
  doc: &'a ProfileDoc,
}

impl<'a> ProfileView<'a> {
  pub fn new(doc: &'a ProfileDoc) -> Self { Self { doc } }

  fn leaf(&self, category: &str, key: &str) -> Option<&'a TagValue> {
    match self.doc.get(category)? {
      TagValue::Map(map) => map.get(key),
      _ => None,
    }
  }

  fn text(&self, category: &str, key: &str) -> Option<&'a str> {
    match self.leaf(category, key)? {
      TagValue::Text(s) => Some(s.as_str()),
      _ => None,
    }
  }

  fn list(&self, category: &str, key: &str) -> Vec<&'a str> {
    match self.leaf(category, key) {
      Some(TagValue::List(items)) => {
        items.iter().map(String::as_str).collect()
      }
      _ => Vec::new(),
    }
  }

  /// Civility derived from the gender tag; empty when unknown.
  pub fn civility(&self) -> &'static str {
    match self.text("identite", "genre") {
      Some("Femme") => "Madame",
      Some("Homme") => "Monsieur",
      _ => "",
    }
  }

  /// Preferred contact channel; `Email` when the profile is silent.
  pub fn channel(&self) -> Channel {
    self
      .text("suivi", "canal_contact")
      .and_then(Channel::parse)
      .unwrap_or_default()
  }

  pub fn colors(&self) -> Vec<&'a str> {
    self.list("style_personnel", "couleurs_preferees")
  }

  pub fn materials(&self) -> Vec<&'a str> {
    self.list("style_personnel", "matieres_preferees")
  }

  pub fn preferred_maisons(&self) -> Vec<&'a str> {
    self.list("projet_achat", "marques_preferees")
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use fiche_core::profile::{ProfileDoc, TagValue};

  use super::*;

  fn doc() -> ProfileDoc {
    let mut doc = ProfileDoc::new();
    let mut identite = BTreeMap::new();
    identite.insert("genre".to_string(), TagValue::from("Femme"));
    doc.set("identite", TagValue::Map(identite));

    let mut suivi = BTreeMap::new();
    suivi.insert("canal_contact".to_string(), TagValue::from("WhatsApp"));
    doc.set("suivi", TagValue::Map(suivi));
    doc
  }

  #[test]
  fn civility_and_channel() {
    let doc = doc();
    let view = ProfileView::new(&doc);
    assert_eq!(view.civility(), "Madame");
    assert_eq!(view.channel(), Channel::WhatsApp);
  }

  #[test]
  fn silent_profile_defaults() {
    let doc = ProfileDoc::new();
    let view = ProfileView::new(&doc);
    assert_eq!(view.civility(), "");
    assert_eq!(view.channel(), Channel::Email);
  }
}
