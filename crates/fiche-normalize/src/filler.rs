//! Hesitation markers and verbal tics, per language.
//!
//! Removal is word-bounded and iterates to a fixed point (bounded at five
//! passes) so nested markers dissolve: "euh enfin euh" needs two passes.
//! A language hint restricts removal to that language's dictionary; with no
//! hint every dictionary applies.

use fiche_core::lang::Lang;
use once_cell::sync::Lazy;
use regex::Regex;

const FR: &[&str] = &[
  "euh", "heu", "hum", "hmm", "bah", "ben", "bref", "enfin", "en fait",
  "du coup", "tu vois", "vous savez", "on va dire", "voilà quoi",
  "c'est-à-dire",
];

const EN: &[&str] = &[
  "uh", "um", "uhm", "er", "erm", "like", "you know", "i mean", "sort of",
  "kind of",
];

const ES: &[&str] =
  &["este", "bueno", "o sea", "pues", "en plan", "digamos", "ya sabes"];

const IT: &[&str] = &["ehm", "cioè", "tipo", "diciamo", "insomma", "beh"];

const DE: &[&str] = &[
  "äh", "ähm", "halt", "na ja", "naja", "also", "quasi", "sozusagen",
  "weißt du",
];

const MAX_PASSES: usize = 5;

fn build(words: &[&[&str]]) -> Regex {
  // Longest first so "you know" wins over "you".
  let mut all: Vec<&str> = words.iter().flat_map(|w| w.iter().copied()).collect();
  all.sort_by_key(|w| std::cmp::Reverse(w.len()));
  let alternation =
    all.iter().map(|w| regex::escape(w)).collect::<Vec<_>>().join("|");
  Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}

static ALL: Lazy<Regex> = Lazy::new(|| build(&[FR, EN, ES, IT, DE]));
static FR_RE: Lazy<Regex> = Lazy::new(|| build(&[FR]));
static EN_RE: Lazy<Regex> = Lazy::new(|| build(&[EN]));
static ES_RE: Lazy<Regex> = Lazy::new(|| build(&[ES]));
static IT_RE: Lazy<Regex> = Lazy::new(|| build(&[IT]));
static DE_RE: Lazy<Regex> = Lazy::new(|| build(&[DE]));
static MULTI_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn regex_for(lang: Option<Lang>) -> &'static Regex {
  match lang {
    Some(Lang::Fr) => &FR_RE,
    Some(Lang::En) => &EN_RE,
    Some(Lang::Es) => &ES_RE,
    Some(Lang::It) => &IT_RE,
    Some(Lang::De) => &DE_RE,
    // No dictionary for the remaining codes; fall back to all of them so
    // mixed-language transcripts still come out clean.
    _ => &ALL,
  }
}

pub fn remove(text: &str, lang: Option<Lang>) -> String {
  let re = regex_for(lang);
  let mut current = text.to_string();

  for _ in 0..MAX_PASSES {
    let stripped = re.replace_all(&current, " ");
    let collapsed = MULTI_WS.replace_all(&stripped, " ").trim().to_string();
    if collapsed == current {
      break;
    }
    current = collapsed;
  }

  current
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn french_tics_removed() {
    assert_eq!(
      remove("euh je cherche du coup un sac tu vois", Some(Lang::Fr)),
      "je cherche un sac"
    );
  }

  #[test]
  fn multi_word_markers() {
    assert_eq!(remove("you know I want a watch", Some(Lang::En)), "I want a watch");
    assert_eq!(remove("o sea un bolso bueno grande", Some(Lang::Es)), "un bolso grande");
  }

  #[test]
  fn hint_restricts_dictionary() {
    // "also" is only a German tic; the English pass keeps it.
    assert_eq!(remove("I also want it", Some(Lang::En)), "I also want it");
    assert_eq!(remove("also ich suche", Some(Lang::De)), "ich suche");
  }

  #[test]
  fn no_hint_applies_every_dictionary() {
    let out = remove("euh well ehm äh bonjour", None);
    // "well" is not in the lists; everything else goes.
    assert_eq!(out, "well bonjour");
  }

  #[test]
  fn word_boundaries_protect_real_words() {
    // "humeur" contains "hum", "benjamin" contains "ben".
    assert_eq!(
      remove("de bonne humeur avec benjamin", Some(Lang::Fr)),
      "de bonne humeur avec benjamin"
    );
  }

  #[test]
  fn bounded_fixed_point() {
    assert_eq!(remove("euh euh euh euh euh euh", Some(Lang::Fr)), "");
  }
}
