//! Structural cleanup: markup, control characters, mojibake, quotes,
//! whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static CONTROL: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap());
static MULTI_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// UTF-8-read-as-Latin-1 artifacts, longest first so prefixes never win.
const MOJIBAKE: &[(&str, &str)] = &[
  ("â‚¬", "€"),
  ("â€™", "'"),
  ("â€˜", "'"),
  ("â€œ", "\""),
  ("â€\u{9d}", "\""),
  ("â€“", "-"),
  ("â€”", "-"),
  ("Ã©", "é"),
  ("Ã¨", "è"),
  ("Ãª", "ê"),
  ("Ã«", "ë"),
  ("Ã´", "ô"),
  ("Ã¶", "ö"),
  ("Ã®", "î"),
  ("Ã¯", "ï"),
  ("Ã»", "û"),
  ("Ã¼", "ü"),
  ("Ã¹", "ù"),
  ("Ã§", "ç"),
  ("Ã¤", "ä"),
  ("ÃŸ", "ß"),
  ("Ã‰", "É"),
  ("Ã€", "À"),
  ("Ã\u{a0}", "à"),
];

pub fn clean(text: &str) -> String {
  let mut t = SCRIPT_BLOCK.replace_all(text, " ").into_owned();
  t = HTML_TAG.replace_all(&t, " ").into_owned();
  t = CONTROL.replace_all(&t, " ").into_owned();

  // Only touch mojibake when artifacts are actually present: a legitimate
  // "Ã" in clean text is vanishingly rare, but don't pay the scan otherwise.
  if t.contains('Ã') || t.contains('â') {
    for (broken, fixed) in MOJIBAKE {
      if t.contains(broken) {
        t = t.replace(broken, fixed);
      }
    }
  }

  // Curly quotes to straight.
  t = t
    .replace(['\u{2019}', '\u{2018}'], "'")
    .replace(['\u{201c}', '\u{201d}'], "\"");

  MULTI_WS.replace_all(&t, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_markup_and_collapses_whitespace() {
    assert_eq!(
      clean("<p>Bonjour   <b>madame</b></p>\n\n"),
      "Bonjour madame"
    );
  }

  #[test]
  fn strips_script_blocks_entirely() {
    let out = clean("avant <script>alert('x')</script> après");
    assert_eq!(out, "avant après");
  }

  #[test]
  fn repairs_mojibake_when_detected() {
    assert_eq!(clean("prÃ©fÃ¨re le cafÃ©"), "préfère le café");
    assert_eq!(clean("budget 5000 â‚¬"), "budget 5000 €");
  }

  #[test]
  fn leaves_clean_accents_alone() {
    assert_eq!(clean("préfère déjà ça"), "préfère déjà ça");
  }

  #[test]
  fn normalizes_curly_quotes() {
    assert_eq!(clean("l\u{2019}étui \u{201c}noir\u{201d}"), "l'étui \"noir\"");
  }
}
