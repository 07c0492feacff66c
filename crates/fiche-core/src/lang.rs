//! Accepted language codes.
//!
//! The loader passes codes through verbatim; unknown codes fall back to
//! language-agnostic behavior (all filler dictionaries, all keyword tables).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Lang {
  Fr,
  En,
  It,
  Es,
  De,
  Pt,
  Ar,
  Zh,
  Ja,
  Ko,
  Ru,
}

impl Lang {
  /// Parse an ISO-ish code (`FR`, `en`, …). Unknown codes yield `None`.
  pub fn from_code(code: &str) -> Option<Self> {
    match code.trim().to_ascii_uppercase().as_str() {
      "FR" => Some(Self::Fr),
      "EN" => Some(Self::En),
      "IT" => Some(Self::It),
      "ES" => Some(Self::Es),
      "DE" => Some(Self::De),
      "PT" => Some(Self::Pt),
      "AR" => Some(Self::Ar),
      "ZH" => Some(Self::Zh),
      "JA" => Some(Self::Ja),
      "KO" => Some(Self::Ko),
      "RU" => Some(Self::Ru),
      _ => None,
    }
  }

  pub fn code(self) -> &'static str {
    match self {
      Self::Fr => "FR",
      Self::En => "EN",
      Self::It => "IT",
      Self::Es => "ES",
      Self::De => "DE",
      Self::Pt => "PT",
      Self::Ar => "AR",
      Self::Zh => "ZH",
      Self::Ja => "JA",
      Self::Ko => "KO",
      Self::Ru => "RU",
    }
  }

  /// Canonical display name used for the `identite/langue_parlee` tag.
  pub fn canonical_name(self) -> &'static str {
    match self {
      Self::Fr => "Français",
      Self::En => "Anglais",
      Self::It => "Italien",
      Self::Es => "Espagnol",
      Self::De => "Allemand",
      Self::Pt => "Portugais",
      Self::Ar => "Arabe",
      Self::Zh => "Chinois",
      Self::Ja => "Japonais",
      Self::Ko => "Coréen",
      Self::Ru => "Russe",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_codes_round_trip() {
    for code in ["FR", "EN", "IT", "ES", "DE", "PT", "AR", "ZH", "JA", "KO", "RU"] {
      let lang = Lang::from_code(code).unwrap();
      assert_eq!(lang.code(), code);
    }
  }

  #[test]
  fn unknown_codes_fall_through() {
    assert!(Lang::from_code("XX").is_none());
    assert!(Lang::from_code("").is_none());
  }

  #[test]
  fn codes_are_case_insensitive() {
    assert_eq!(Lang::from_code("fr"), Some(Lang::Fr));
    assert_eq!(Lang::from_code(" de "), Some(Lang::De));
  }
}
