//! Late-stage cleanup: repetition collapse, punctuation normalization, and
//! consecutive-sentence dedup.

use once_cell::sync::Lazy;
use regex::Regex;

// ─── Repetition collapse ─────────────────────────────────────────────────────

fn norm_token(token: &str) -> String {
  token
    .chars()
    .filter(|c| c.is_alphanumeric())
    .flat_map(char::to_lowercase)
    .collect()
}

/// Coalesce immediate word, bi-gram, and tri-gram repetitions:
/// "je je cherche" → "je cherche", "très bien très bien" → "très bien".
pub fn collapse_repetitions(text: &str) -> String {
  let tokens: Vec<&str> = text.split_whitespace().collect();
  let mut out: Vec<&str> = Vec::with_capacity(tokens.len());
  let mut i = 0;

  'outer: while i < tokens.len() {
    for n in (1..=3).rev() {
      if out.len() >= n && i + n <= tokens.len() {
        let prev: Vec<String> =
          out[out.len() - n..].iter().map(|t| norm_token(t)).collect();
        let next: Vec<String> =
          tokens[i..i + n].iter().map(|t| norm_token(t)).collect();
        if prev == next && prev.iter().all(|w| !w.is_empty()) {
          i += n;
          continue 'outer;
        }
      }
    }
    out.push(tokens[i]);
    i += 1;
  }

  out.join(" ")
}

// ─── Punctuation ─────────────────────────────────────────────────────────────

static PUNCT_RUN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[.!?,;:](?:\s*[.!?,;:])+").unwrap());
static LEADING_PUNCT: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[.!?,;:\-\s]+").unwrap());
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\s+([.!?,;:])").unwrap());
static MULTI_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Reduce repeated punctuation to its first mark, trim stray leading
/// punctuation, capitalize the first letter, and close with a period when
/// no terminal mark is present.
pub fn normalize_punctuation(text: &str) -> String {
  let mut t = PUNCT_RUN
    .replace_all(text, |caps: &regex::Captures| {
      let first = caps.get(0).unwrap().as_str().chars().next().unwrap();
      format!("{first} ")
    })
    .into_owned();

  t = LEADING_PUNCT.replace(&t, "").into_owned();
  t = SPACE_BEFORE_PUNCT.replace_all(&t, "$1").into_owned();
  t = MULTI_WS.replace_all(&t, " ").trim().to_string();

  if t.is_empty() {
    return t;
  }

  let mut t = capitalize_first(&t);
  if !t.ends_with(['.', '!', '?']) {
    t.push('.');
  }
  t
}

fn capitalize_first(s: &str) -> String {
  // Uppercase the first alphabetic character, leaving any leading
  // redaction-token bracket untouched.
  let Some((idx, c)) = s.char_indices().find(|(_, c)| c.is_alphabetic()) else {
    return s.to_string();
  };
  if c.is_uppercase() {
    return s.to_string();
  }
  let mut out = String::with_capacity(s.len());
  out.push_str(&s[..idx]);
  out.extend(c.to_uppercase());
  out.push_str(&s[idx + c.len_utf8()..]);
  out
}

// ─── Sentence dedup ──────────────────────────────────────────────────────────

fn sentence_key(s: &str) -> String {
  s.chars()
    .filter(|c| c.is_alphanumeric())
    .flat_map(char::to_lowercase)
    .collect()
}

/// Keep only the first of identical adjacent sentences (compared after
/// casefold + symbol strip); each kept sentence starts with a capital.
pub fn dedup_sentences(text: &str) -> String {
  let mut sentences: Vec<String> = Vec::new();
  let mut current = String::new();
  for c in text.chars() {
    current.push(c);
    if matches!(c, '.' | '!' | '?') {
      let trimmed = current.trim();
      if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
      }
      current.clear();
    }
  }
  let tail = current.trim();
  if !tail.is_empty() {
    sentences.push(tail.to_string());
  }

  let mut out: Vec<String> = Vec::with_capacity(sentences.len());
  for sentence in sentences {
    let key = sentence_key(&sentence);
    if !key.is_empty()
      && out.last().map(|last| sentence_key(last)) == Some(key.clone())
    {
      continue;
    }
    out.push(capitalize_first(&sentence));
  }

  out.join(" ")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn word_and_phrase_repetitions_collapse() {
    assert_eq!(collapse_repetitions("je je cherche"), "je cherche");
    assert_eq!(
      collapse_repetitions("très bien très bien merci"),
      "très bien merci"
    );
    assert_eq!(
      collapse_repetitions("pour le mariage pour le mariage de ma fille"),
      "pour le mariage de ma fille"
    );
  }

  #[test]
  fn repetition_collapse_ignores_case_and_punctuation() {
    assert_eq!(collapse_repetitions("Oui, oui bien sûr"), "Oui, bien sûr");
  }

  #[test]
  fn punctuation_runs_reduce_to_first_mark() {
    assert_eq!(normalize_punctuation("c'est bon !!!"), "C'est bon!");
    assert_eq!(normalize_punctuation("vraiment ??"), "Vraiment?");
  }

  #[test]
  fn stray_leading_punctuation_trimmed() {
    assert_eq!(normalize_punctuation(", , ich suche"), "Ich suche.");
  }

  #[test]
  fn terminal_period_added_once() {
    assert_eq!(normalize_punctuation("bonjour"), "Bonjour.");
    assert_eq!(normalize_punctuation("Bonjour."), "Bonjour.");
  }

  #[test]
  fn adjacent_duplicate_sentences_kept_once() {
    assert_eq!(
      dedup_sentences("On confirme. on confirme ! Merci."),
      "On confirme. Merci."
    );
  }

  #[test]
  fn non_adjacent_duplicates_survive() {
    let out = dedup_sentences("Oui. Non. Oui.");
    assert_eq!(out, "Oui. Non. Oui.");
  }
}
