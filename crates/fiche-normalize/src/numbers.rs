//! French spelled-out cardinals → digits.
//!
//! Only phrases followed by a known unit are rewritten (`quarante-cinq ans`
//! → `45 ans`); a bare `mille` in running prose is left alone. Covers
//! composites up to the thousands, including the 70/80/90 constructions.

use once_cell::sync::Lazy;
use regex::Regex;

const NUMBER_WORDS: &str = "zéro|une|un|deux|trois|quatre|cinq|six|sept|huit|neuf|dix|onze|douze|treize|quatorze|quinze|seize|vingts|vingt|trente|quarante|cinquante|soixante|cents|cent|mille";

const UNITS: &str =
  "ans|an|années|année|enfants|enfant|euros|euro|mois|semaines|semaine|jours|jour|personnes|personne|invités|invitées|fois|heures|heure|minutes|minute";

static SPELLED: Lazy<Regex> = Lazy::new(|| {
  let pattern = format!(
    r"(?i)\b((?:(?:{NUMBER_WORDS})(?:[ \-]+et[ \-]+|[ \-]+))*(?:{NUMBER_WORDS}))[ ]+({UNITS})\b"
  );
  Regex::new(&pattern).unwrap()
});

fn word_value(word: &str) -> Option<u64> {
  Some(match word {
    "zéro" => 0,
    "un" | "une" => 1,
    "deux" => 2,
    "trois" => 3,
    "quatre" => 4,
    "cinq" => 5,
    "six" => 6,
    "sept" => 7,
    "huit" => 8,
    "neuf" => 9,
    "dix" => 10,
    "onze" => 11,
    "douze" => 12,
    "treize" => 13,
    "quatorze" => 14,
    "quinze" => 15,
    "seize" => 16,
    "vingt" | "vingts" => 20,
    "trente" => 30,
    "quarante" => 40,
    "cinquante" => 50,
    "soixante" => 60,
    _ => return None,
  })
}

/// Parse a sequence of lowercase number words.
/// `quatre vingt dix` → 90, `deux cent cinquante` → 250, `cinq mille` → 5000.
fn parse_words(words: &[&str]) -> Option<u64> {
  let mut total = 0u64;
  let mut current = 0u64;
  let mut i = 0;

  while i < words.len() {
    match words[i] {
      "et" => {}
      "cent" | "cents" => {
        current = if current == 0 { 100 } else { current * 100 };
      }
      "mille" => {
        total += if current == 0 { 1_000 } else { current * 1_000 };
        current = 0;
      }
      "quatre"
        if matches!(words.get(i + 1), Some(&"vingt") | Some(&"vingts")) =>
      {
        current += 80;
        i += 1;
      }
      word => current += word_value(word)?,
    }
    i += 1;
  }

  let value = total + current;
  (value > 0 && value < 1_000_000).then_some(value)
}

pub fn resolve(text: &str) -> String {
  SPELLED
    .replace_all(text, |caps: &regex::Captures| {
      let phrase = caps.get(1).unwrap().as_str();
      let unit = caps.get(2).unwrap().as_str();
      let lowered = phrase.to_lowercase();
      let words: Vec<&str> =
        lowered.split(|c: char| c == ' ' || c == '-').filter(|w| !w.is_empty()).collect();
      match parse_words(&words) {
        Some(n) => format!("{n} {unit}"),
        None => caps.get(0).unwrap().as_str().to_string(),
      }
    })
    .into_owned()
}
