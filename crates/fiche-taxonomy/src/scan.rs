//! Keyword scanning over normalized text.
//!
//! Matching is case-folded, accent-sensitive, and word-boundary aware: a
//! surface form only matches when neither neighbour is alphanumeric, so
//! `art` never fires inside `quartier`. Offsets refer to the case-folded
//! text, which the normalizer guarantees is byte-stable for evidence spans.

/// One dictionary hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
  /// The canonical taxonomy value.
  pub canonical: &'static str,
  /// The surface form that matched, as written in the dictionary.
  pub surface:   &'static str,
  /// Byte offset of the match in the folded text.
  pub offset:    usize,
}

/// A flat dictionary: canonical value → multilingual surface forms
/// (all lowercase).
pub type Entries = &'static [(&'static str, &'static [&'static str])];

fn is_word_char(c: char) -> bool { c.is_alphanumeric() }

/// Find `needle` in `haystack` at a word boundary. Both sides must already
/// be case-folded.
pub fn find_word(haystack: &str, needle: &str) -> Option<usize> {
  if needle.is_empty() {
    return None;
  }
  let mut from = 0;
  while let Some(rel) = haystack[from..].find(needle) {
    let at = from + rel;
    let end = at + needle.len();
    let before_ok =
      haystack[..at].chars().next_back().is_none_or(|c| !is_word_char(c));
    let after_ok =
      haystack[end..].chars().next().is_none_or(|c| !is_word_char(c));
    if before_ok && after_ok {
      return Some(at);
    }
    from = end;
  }
  None
}

/// Scan `folded` text against a dictionary. At most one match per canonical
/// value (first surface form wins); canonical order follows the dictionary,
/// so repeated scans are deterministic.
pub fn scan_entries(folded: &str, entries: Entries) -> Vec<KeywordMatch> {
  let mut found = Vec::new();
  for (canonical, surfaces) in entries {
    for surface in *surfaces {
      if let Some(offset) = find_word(folded, surface) {
        found.push(KeywordMatch { canonical, surface, offset });
        break;
      }
    }
  }
  found
}

#[cfg(test)]
mod tests {
  use super::*;

  const COLORS: Entries = &[
    ("Noir", &["noir", "black", "nero"]),
    ("Blanc", &["blanc", "white"]),
  ];

  #[test]
  fn matches_at_word_boundaries_only() {
    assert!(find_word("un sac noir", "noir").is_some());
    assert!(find_word("noirceur", "noir").is_none());
    assert!(find_word("le noir.", "noir").is_some());
  }

  #[test]
  fn accent_sensitive() {
    assert!(find_word("le the vert", "thé").is_none());
    assert!(find_word("le thé vert", "thé").is_some());
  }

  #[test]
  fn one_match_per_canonical() {
    let hits = scan_entries("noir et black et blanc", COLORS);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].canonical, "Noir");
    assert_eq!(hits[0].surface, "noir");
    assert_eq!(hits[1].canonical, "Blanc");
  }

  #[test]
  fn multi_word_surfaces() {
    const BRANDS: Entries = &[("Louis Vuitton", &["louis vuitton", "lv"])];
    let hits = scan_entries("un sac louis vuitton", BRANDS);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].canonical, "Louis Vuitton");
  }
}
