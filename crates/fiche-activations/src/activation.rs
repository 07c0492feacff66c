//! The activation record — the stable consumer contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Activation priority; the serialized literals are part of the contract.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
  #[serde(rename = "BASSE")]
  Basse,
  #[serde(rename = "MOYENNE")]
  Moyenne,
  #[serde(rename = "HAUTE")]
  Haute,
}

impl Priority {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Haute => "HAUTE",
      Self::Moyenne => "MOYENNE",
      Self::Basse => "BASSE",
    }
  }

  /// Weight used by the top-clients ranking.
  pub fn weight(self) -> u32 {
    match self {
      Self::Haute => 3,
      Self::Moyenne => 1,
      Self::Basse => 0,
    }
  }
}

/// The three activation themes.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Pillar {
  #[serde(rename = "Émotionnel")]
  Emotionnel,
  #[serde(rename = "Produit")]
  Produit,
  #[serde(rename = "Service")]
  Service,
}

impl Pillar {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Emotionnel => "Émotionnel",
      Self::Produit => "Produit",
      Self::Service => "Service",
    }
  }
}

/// Contact channels; `Email` is the default when the profile is silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Channel {
  #[default]
  Email,
  WhatsApp,
  #[serde(rename = "SMS")]
  Sms,
  #[serde(rename = "Téléphone")]
  Telephone,
}

impl Channel {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Email => "Email",
      Self::WhatsApp => "WhatsApp",
      Self::Sms => "SMS",
      Self::Telephone => "Téléphone",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "Email" => Some(Self::Email),
      "WhatsApp" => Some(Self::WhatsApp),
      "SMS" => Some(Self::Sms),
      "Téléphone" => Some(Self::Telephone),
      _ => None,
    }
  }
}

/// The six fixed generator types.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivationType {
  LifestyleVoyage,
  GiftingDates,
  NextBestProduct,
  RuptureStock,
  CareEntretien,
  CrossMaison,
}

impl ActivationType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::LifestyleVoyage => "lifestyle_voyage",
      Self::GiftingDates => "gifting_dates",
      Self::NextBestProduct => "next_best_product",
      Self::RuptureStock => "rupture_stock",
      Self::CareEntretien => "care_entretien",
      Self::CrossMaison => "cross_maison",
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Conversion odds and estimated value attached to each activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationKpis {
  pub probabilite_conversion: f64,
  pub valeur_estimee:         String,
}

/// A generated, dated, prioritized CRM action suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activation {
  pub client_id:       String,
  pub activation_type: ActivationType,
  pub pillar:          Pillar,
  pub priority:        Priority,
  /// ISO `YYYY-MM-DD`; absent when no date could be estimated.
  pub trigger_date:    Option<NaiveDate>,
  pub canal_prefere:   Channel,
  pub message_vendeur: String,
  pub context:         serde_json::Value,
  pub kpis:            ActivationKpis,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn priority_literals_and_weights() {
    assert_eq!(Priority::Haute.as_str(), "HAUTE");
    assert_eq!(Priority::Moyenne.as_str(), "MOYENNE");
    assert_eq!(Priority::Basse.as_str(), "BASSE");
    assert_eq!(Priority::Haute.weight(), 3);
    assert_eq!(Priority::Moyenne.weight(), 1);
  }

  #[test]
  fn serialized_shape_uses_contract_literals() {
    let activation = Activation {
      client_id:       "CA-001".into(),
      activation_type: ActivationType::GiftingDates,
      pillar:          Pillar::Emotionnel,
      priority:        Priority::Haute,
      trigger_date:    chrono::NaiveDate::from_ymd_opt(2026, 4, 30),
      canal_prefere:   Channel::Telephone,
      message_vendeur: "Bonjour".into(),
      context:         serde_json::json!({}),
      kpis:            ActivationKpis {
        probabilite_conversion: 0.55,
        valeur_estimee:         "300-1500€".into(),
      },
    };

    let value = serde_json::to_value(&activation).unwrap();
    assert_eq!(value["activation_type"], "gifting_dates");
    assert_eq!(value["pillar"], "Émotionnel");
    assert_eq!(value["priority"], "HAUTE");
    assert_eq!(value["trigger_date"], "2026-04-30");
    assert_eq!(value["canal_prefere"], "Téléphone");
  }
}
