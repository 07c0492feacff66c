//! PII redaction.
//!
//! Runs before filler removal and number resolution. Replacement order
//! matters: IBANs go first so their digit tails are never mistaken for card
//! numbers, emails and national ids are masked before the phone pass counts
//! digit runs, and street addresses are handled last so postal codes are
//! still visible to the address patterns.
//!
//! Every token is a fixed literal of the external contract; none contains a
//! digit or `@`, which is what makes the whole pipeline idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

/// The fixed redaction tokens.
pub mod token {
  pub const CARD: &str = "[PAIEMENT_CARTE]";
  pub const IBAN: &str = "[PAIEMENT_VIREMENT]";
  pub const PHONE: &str = "[TÉLÉPHONE_MASQUÉ]";
  pub const EMAIL: &str = "[EMAIL_MASQUÉ]";
  pub const ADDRESS: &str = "[ADRESSE_MASQUÉE]";
  pub const NATIONAL_ID: &str = "[ID_NATIONAL_MASQUÉ]";
  pub const PASSPORT: &str = "[PASSEPORT_MASQUÉ]";
  pub const FISCAL_ID: &str = "[ID_FISCAL_MASQUÉ]";
  pub const SECURE_ACCESS: &str = "[ACCÈS_SÉCURISÉ]";
  pub const HOUSING: &str = "[DÉTAILS_LOGEMENT_MASQUÉS]";
}

static IBAN: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b[A-Z]{2}\d{2}(?: ?[A-Z0-9]){11,31}\b").unwrap()
});

// 13–19 digits with optional single spaces/dashes between them.
static CARD: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b\d(?:[ \-]?\d){12,18}\b").unwrap());

static CVC: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)\b(?:cvc|cvv|cryptogramme)\s*:?\s*\d{3,4}\b").unwrap()
});

static EXPIRY: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)\bexp(?:\.|ire|iration)?\s*:?\s*(?:0[1-9]|1[0-2])\s*/\s*\d{2}\b")
    .unwrap()
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap()
});

// Italian codice fiscale before the looser passport shape.
static FISCAL_CODE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b[A-Z]{6}\d{2}[A-Z]\d{2}[A-Z]\d{3}[A-Z]\b").unwrap()
});
static SSN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap());
static DNI: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{8}[A-Z]\b").unwrap());
static PASSPORT: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b[A-Z]{2} ?\d{7}\b").unwrap());

// Phone candidates: any digit run with common separators. The replacement
// only fires when the candidate carries ≥ 9 digits, so prices, years, and
// postal codes pass through.
static PHONE_CANDIDATE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[+(]?\d[\d\s().\-/]*\d").unwrap());

static STREET_ROMANCE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)\b\d{1,4}\s*,?\s+(?:rue|avenue|boulevard|bd|place|quai|impasse|allée|chemin|cours|via|viale|corso|piazza|calle|avenida|paseo|plaza)\s+(?:(?:de|du|des|de la|del|della|di|la|le)\s+)?[A-Za-zÀ-ÿ'\-]+(?:\s+[A-Za-zÀ-ÿ'\-]+){0,2}(?:\s+\d{4,5})?",
  )
  .unwrap()
});
static STREET_EN: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"\b\d{1,4}\s+[A-Z][A-Za-z'\-]+\s+(?:Street|St\.|Road|Rd\.|Avenue|Ave\.?|Lane|Drive|Boulevard|Court|Place)\b",
  )
  .unwrap()
});
static STREET_DE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"\b[A-ZÄÖÜ][A-Za-zäöüß\-]*(?:straße|strasse|platz|weg|allee|gasse)\s+\d{1,4}\b",
  )
  .unwrap()
});

static GATE_CODE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)\b(?:code\s+porte|code\s+d'accès|digicode|gate\s+code|código\s+de\s+acceso)\s*:?\s*[A-Za-z0-9#*]+",
  )
  .unwrap()
});

// "carte bleue"-style mentions with a value, including values spelled out
// in words (those never reach the number-resolution step).
static CARD_CONTEXT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)\b(?:carte\s+bleue|carte\s+bancaire)\b[\s,:]*(?:num(?:éro)?\s*:?\s*)?(?:\d(?:[ \-]?\d){7,}|(?:(?:zéro|un|deux|trois|quatre|cinq|six|sept|huit|neuf)[ \-]+){7,}(?:zéro|un|deux|trois|quatre|cinq|six|sept|huit|neuf))",
  )
  .unwrap()
});

// Apartment / floor details only when the value carries a digit, so
// "appartement parisien" is left alone.
static HOUSING_DETAIL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)\b(?:appartement|apartment|apartamento|piso|étage|interno)\s+(?:n[°o]\s*)?[A-Za-z]?\d+[A-Za-z]?\b",
  )
  .unwrap()
});

pub fn redact(text: &str) -> String {
  let mut t = IBAN.replace_all(text, token::IBAN).into_owned();
  t = CARD_CONTEXT.replace_all(&t, token::CARD).into_owned();
  t = CARD.replace_all(&t, token::CARD).into_owned();
  t = CVC.replace_all(&t, "").into_owned();
  t = EXPIRY.replace_all(&t, "").into_owned();
  t = EMAIL.replace_all(&t, token::EMAIL).into_owned();
  t = FISCAL_CODE.replace_all(&t, token::FISCAL_ID).into_owned();
  t = SSN.replace_all(&t, token::NATIONAL_ID).into_owned();
  t = DNI.replace_all(&t, token::NATIONAL_ID).into_owned();
  t = PASSPORT.replace_all(&t, token::PASSPORT).into_owned();

  t = PHONE_CANDIDATE
    .replace_all(&t, |caps: &regex::Captures| {
      let m = caps.get(0).unwrap().as_str();
      let digits = m.chars().filter(|c| c.is_ascii_digit()).count();
      if digits >= 9 { token::PHONE.to_string() } else { m.to_string() }
    })
    .into_owned();

  t = STREET_ROMANCE.replace_all(&t, token::ADDRESS).into_owned();
  t = STREET_EN.replace_all(&t, token::ADDRESS).into_owned();
  t = STREET_DE.replace_all(&t, token::ADDRESS).into_owned();

  t = GATE_CODE.replace_all(&t, token::SECURE_ACCESS).into_owned();
  t = HOUSING_DETAIL.replace_all(&t, token::HOUSING).into_owned();

  t
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn iban_wins_over_card_digits() {
    let out = redact("virement FR76 3000 6000 0112 3456 7890 189 merci");
    assert!(out.contains(token::IBAN), "{out}");
    assert!(!out.contains(token::CARD), "{out}");
  }

  #[test]
  fn card_numbers_masked_with_or_without_separators() {
    assert!(redact("carte 4532123456789010").contains(token::CARD));
    assert!(redact("carte 4532 1234 5678 9010").contains(token::CARD));
    assert!(redact("carte 4532-1234-5678-9010").contains(token::CARD));
  }

  #[test]
  fn cvc_and_expiry_are_removed_entirely() {
    let out = redact("cvv 123 exp 09/27");
    assert!(!out.contains("123"), "{out}");
    assert!(!out.contains("09/27"), "{out}");
    assert!(!out.contains(token::CARD));
  }

  #[test]
  fn emails_masked_before_phone_counting() {
    let out = redact("écrire à jean.dupont+vip@example.com");
    assert_eq!(out, format!("écrire à {}", token::EMAIL));
  }

  #[test]
  fn phone_needs_at_least_nine_digits() {
    assert!(redact("06 12 34 56 78").contains(token::PHONE));
    assert!(redact("+33 6 12 34 56 78").contains(token::PHONE));
    // Price and postal code survive.
    let out = redact("budget 15.000 et code postal 75001");
    assert!(!out.contains(token::PHONE), "{out}");
  }

  #[test]
  fn national_ids_and_passports() {
    assert!(redact("ssn 123-45-6789").contains(token::NATIONAL_ID));
    assert!(redact("dni 12345678Z").contains(token::NATIONAL_ID));
    assert!(redact("passeport AB 1234567").contains(token::PASSPORT));
    assert!(redact("cf RSSMRA85T10A562S").contains(token::FISCAL_ID));
  }

  #[test]
  fn street_address_keeps_trailing_city() {
    let out = redact("j'habite 12 rue de Rivoli 75001 Paris.");
    assert!(out.contains(token::ADDRESS), "{out}");
    assert!(out.contains("Paris"), "{out}");
  }

  #[test]
  fn english_and_german_addresses() {
    assert!(redact("at 221 Baker Street in London").contains(token::ADDRESS));
    assert!(redact("in der Königstraße 12").contains(token::ADDRESS));
  }

  #[test]
  fn context_triggered_redaction() {
    assert!(redact("code porte 4512B").contains(token::SECURE_ACCESS));
    let spelled =
      "carte bleue quatre cinq trois deux un deux trois quatre cinq six";
    assert!(redact(spelled).contains(token::CARD));
    assert!(redact("livraison appartement 4B").contains(token::HOUSING));
    // No value, no redaction.
    assert!(!redact("un appartement parisien").contains(token::HOUSING));
  }

  #[test]
  fn redaction_is_idempotent() {
    let once = redact("appel au 06 12 34 56 78, carte 4532 1234 5678 9010");
    assert_eq!(redact(&once), once);
  }
}
