//! Closed bucket enums for age and budget.
//!
//! The five labels of each enum are part of the external contract; every
//! non-null extracted age or budget maps to exactly one bucket.

use serde::{Deserialize, Serialize};

// ─── AgeBucket ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBucket {
  #[serde(rename = "18-25")]
  From18To25,
  #[serde(rename = "26-35")]
  From26To35,
  #[serde(rename = "36-45")]
  From36To45,
  #[serde(rename = "46-55")]
  From46To55,
  #[serde(rename = "56+")]
  Over56,
}

impl AgeBucket {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::From18To25 => "18-25",
      Self::From26To35 => "26-35",
      Self::From36To45 => "36-45",
      Self::From46To55 => "46-55",
      Self::Over56 => "56+",
    }
  }

  /// Bucket an age in years. Upper bounds are inclusive: 45 → `36-45`.
  pub fn from_years(years: u32) -> Self {
    match years {
      0..=25 => Self::From18To25,
      26..=35 => Self::From26To35,
      36..=45 => Self::From36To45,
      46..=55 => Self::From46To55,
      _ => Self::Over56,
    }
  }
}

// ─── BudgetBucket ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetBucket {
  #[serde(rename = "<5k")]
  Under5k,
  #[serde(rename = "5-10k")]
  From5To10k,
  #[serde(rename = "10-15k")]
  From10To15k,
  #[serde(rename = "15-25k")]
  From15To25k,
  #[serde(rename = "25k+")]
  Over25k,
}

impl BudgetBucket {
  pub const ALL: [Self; 5] = [
    Self::Under5k,
    Self::From5To10k,
    Self::From10To15k,
    Self::From15To25k,
    Self::Over25k,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Under5k => "<5k",
      Self::From5To10k => "5-10k",
      Self::From10To15k => "10-15k",
      Self::From15To25k => "15-25k",
      Self::Over25k => "25k+",
    }
  }

  /// Bucket an amount in the source currency's units.
  ///
  /// Band edges: `<5k` is strictly below 5 000; the 5-10k and 10-15k bands
  /// include their upper bound (15 000 → `10-15k`); 25 000 and above is
  /// `25k+`.
  pub fn from_amount(amount: f64) -> Self {
    if amount < 5_000.0 {
      Self::Under5k
    } else if amount <= 10_000.0 {
      Self::From5To10k
    } else if amount <= 15_000.0 {
      Self::From10To15k
    } else if amount < 25_000.0 {
      Self::From15To25k
    } else {
      Self::Over25k
    }
  }

  pub fn parse(label: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|b| b.as_str() == label)
  }

  /// Midpoint used by the KPI pipeline aggregate (in euros).
  pub fn midpoint(self) -> u64 {
    match self {
      Self::Under5k => 3_000,
      Self::From5To10k => 7_500,
      Self::From10To15k => 12_500,
      Self::From15To25k => 20_000,
      Self::Over25k => 35_000,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
