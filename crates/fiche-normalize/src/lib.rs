//! Transcript normalizer.
//!
//! Pipeline (each step operates on the output of the prior one):
//!   raw &str
//!     └─ structural::clean()       → tags/mojibake/whitespace
//!          └─ redact::redact()     → PII replaced by fixed tokens
//!               └─ numbers::resolve() → "quarante-cinq ans" → "45 ans"
//!                    └─ filler::remove()  → hesitation markers dissolved
//!                         └─ polish::*    → repetitions, punctuation, dedup
//!
//! The whole pipeline is a pure function: no state, no panics, and
//! `normalize(normalize(x)) == normalize(x)` for every input. PII redaction
//! runs *before* filler removal so context words are still present, and
//! before number resolution so spelled-out card digits never turn into
//! digit runs.

mod filler;
mod numbers;
mod polish;
mod redact;
mod structural;

pub use redact::token;

use fiche_core::lang::Lang;

/// Normalize a raw transcript. `lang` only affects filler removal; `None`
/// applies every language's filler dictionary.
pub fn normalize(text: &str, lang: Option<Lang>) -> String {
  if text.trim().is_empty() {
    return String::new();
  }

  let cleaned = structural::clean(text);
  let cleaned = redact::redact(&cleaned);
  let cleaned = numbers::resolve(&cleaned);
  let cleaned = filler::remove(&cleaned, lang);
  let cleaned = polish::collapse_repetitions(&cleaned);
  let cleaned = polish::normalize_punctuation(&cleaned);
  polish::dedup_sentences(&cleaned)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_and_blank_input_yield_empty_output() {
    assert_eq!(normalize("", None), "");
    assert_eq!(normalize("   \n\t ", None), "");
  }

  #[test]
  fn multilingual_filler_scenario() {
    let out = normalize("na ja, also äh, ich suche eine Uhr", Some(Lang::De));
    assert_eq!(out, "Ich suche eine Uhr.");
  }

  #[test]
  fn pii_redaction_scenario() {
    let input = "Mon email est jean@example.com, carte 4532 1234 5678 9010, \
                 06 12 34 56 78, 12 rue de Rivoli 75001 Paris.";
    let out = normalize(input, Some(Lang::Fr));

    assert!(out.contains(token::EMAIL), "{out}");
    assert!(out.contains(token::CARD), "{out}");
    assert!(out.contains(token::PHONE), "{out}");
    assert!(out.contains(token::ADDRESS), "{out}");
    assert!(out.contains("Paris"), "{out}");
    assert!(!out.contains('@'));
    // No digit run of 13+ survives (spaces/dashes allowed inside).
    let digits: String =
      out.chars().map(|c| if c.is_ascii_digit() { c } else { ' ' }).collect();
    assert!(digits.split_whitespace().all(|run| run.len() < 13), "{out}");
  }

  #[test]
  fn spelled_out_numbers_become_digits() {
    let out = normalize("Cliente de quarante-cinq ans avec deux enfants", None);
    assert!(out.contains("45 ans"), "{out}");
    assert!(out.contains("2 enfants"), "{out}");
  }

  #[test]
  fn normalize_is_idempotent() {
    let inputs = [
      "euh bonjour je je cherche un sac noir !!",
      "Mon IBAN est FR7630006000011234567890189 merci",
      "na ja, also äh, ich suche eine Uhr",
      "Cliente fidèle quarante-cinq ans à Paris, budget 15.000€.",
      "Très bien. Très bien. On confirme demain ?",
      "<p>du coup euh 06 12 34 56 78</p>",
    ];
    for input in inputs {
      let once = normalize(input, None);
      let twice = normalize(&once, None);
      assert_eq!(once, twice, "not idempotent for {input:?}");
    }
  }

  #[test]
  fn repeated_sentences_are_kept_once() {
    let out = normalize("On se voit demain. On se voit demain. Parfait.", None);
    assert_eq!(out.matches("On se voit demain").count(), 1, "{out}");
  }

  #[test]
  fn language_hint_limits_filler_removal() {
    // "also" is a German tic; with an English hint it must survive.
    let out = normalize("I also like watches", Some(Lang::En));
    assert!(out.contains("also"), "{out}");
  }
}
