//! Taxonomy Registry — the immutable hierarchical tag vocabulary and the
//! multilingual keyword dictionaries behind it.
//!
//! Everything here is process-wide read-only state: the tables are `static`
//! and the derived lookup structures are built once behind `Lazy`. Nothing
//! is ever mutated after the first extraction.

pub mod cities;
pub mod dict;
pub mod scan;
pub mod tree;

pub use scan::{KeywordMatch, scan_entries};
pub use tree::{allowed_values, is_allowed};

/// Version stamped on every catalogued tag and default extraction rule.
pub const TAXONOMY_VERSION: &str = "2.0";

// ─── Category names ──────────────────────────────────────────────────────────

/// Top-level profile document categories, in canonical order.
pub mod category {
  pub const IDENTITE: &str = "identite";
  pub const LOCALISATION: &str = "localisation";
  pub const LIFESTYLE: &str = "lifestyle_centres_interet";
  pub const STYLE: &str = "style_personnel";
  pub const PROJET_ACHAT: &str = "projet_achat";
  pub const PREFERENCES: &str = "preferences_contraintes";
  pub const SUIVI: &str = "suivi";
}
