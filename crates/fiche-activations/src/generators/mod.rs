//! The six activation generators.
//!
//! Each generator is a pure function of
//! `(client_id, profile document, extracted context, reference date)`; the
//! engine runs them in this fixed order so batch output is byte-identical
//! across runs.

mod care_entretien;
mod cross_maison;
mod gifting_dates;
mod lifestyle_voyage;
mod next_best_product;
mod rupture_stock;

pub use care_entretien::generate_care_entretien;
pub use cross_maison::generate_cross_maison;
pub use gifting_dates::generate_gifting_dates;
pub use lifestyle_voyage::generate_lifestyle_voyage;
pub use next_best_product::generate_next_best_product;
pub use rupture_stock::generate_rupture_stock;

use chrono::NaiveDate;
use fiche_core::profile::ProfileDoc;
use fiche_extract::ExtractedContext;

use crate::activation::Activation;

/// Generator signature shared by the fixed set.
pub type Generator =
  fn(&str, &ProfileDoc, &ExtractedContext, NaiveDate) -> Vec<Activation>;

/// The fixed, ordered generator table.
pub const GENERATORS: &[(&str, Generator)] = &[
  ("lifestyle_voyage", generate_lifestyle_voyage),
  ("gifting_dates", generate_gifting_dates),
  ("next_best_product", generate_next_best_product),
  ("rupture_stock", generate_rupture_stock),
  ("care_entretien", generate_care_entretien),
  ("cross_maison", generate_cross_maison),
];
