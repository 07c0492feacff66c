//! Per-channel message rendering.
//!
//! Generators produce a default vendor message; this module reformats an
//! activation for a specific outbound channel (short for SMS, informal for
//! WhatsApp, subject + body for email).

use crate::activation::{Activation, ActivationType, Channel};

fn ctx<'a>(activation: &'a Activation, key: &str) -> &'a str {
  activation.context.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// Render `activation` for `channel`; `None` falls back to the record's
/// preferred channel.
pub fn format_message(
  activation: &Activation,
  channel: Option<Channel>,
) -> String {
  let channel = channel.unwrap_or(activation.canal_prefere);
  match (activation.activation_type, channel) {
    (ActivationType::LifestyleVoyage, Channel::Sms) => format!(
      "Voyage à {} bientôt ? Une sélection spéciale vous attend en boutique.",
      ctx(activation, "destination")
    ),
    (ActivationType::LifestyleVoyage, Channel::Email) => format!(
      "Objet: Votre voyage à {} — sélection personnalisée\n\n{}",
      ctx(activation, "destination"),
      activation.message_vendeur
    ),

    (ActivationType::GiftingDates, Channel::Sms) => {
      "Une date importante approche ! Idées cadeaux exclusives en boutique."
        .to_string()
    }
    (ActivationType::GiftingDates, Channel::Email) => format!(
      "Objet: Une date approche — idées cadeaux personnalisées\n\n{}",
      activation.message_vendeur
    ),

    (ActivationType::NextBestProduct, Channel::Sms) => format!(
      "Nouveau {} parfait avec votre {}. Réservé pour vous.",
      ctx(activation, "produit_suggere"),
      ctx(activation, "produit_existant")
    ),
    (ActivationType::NextBestProduct, Channel::Email) => format!(
      "Objet: Le complément parfait de votre {}\n\n{}",
      ctx(activation, "produit_existant"),
      activation.message_vendeur
    ),

    (ActivationType::RuptureStock, Channel::Sms) => format!(
      "Le/La {} est arrivé(e) ! Réservé(e) pour vous. Boutique ou livraison ?",
      ctx(activation, "description")
    ),
    (ActivationType::RuptureStock, Channel::Email) => format!(
      "Objet: Votre {} est de retour\n\n{}",
      ctx(activation, "description"),
      activation.message_vendeur
    ),

    (ActivationType::CareEntretien, Channel::Sms) => format!(
      "Entretien de votre {} ? {}. Prenez rendez-vous en boutique.",
      ctx(activation, "produit"),
      ctx(activation, "service")
    ),
    (ActivationType::CareEntretien, Channel::Email) => format!(
      "Objet: Prenez soin de votre {} — service d'entretien\n\n{}",
      ctx(activation, "produit"),
      activation.message_vendeur
    ),

    (ActivationType::CrossMaison, Channel::Sms) => format!(
      "Découvrez {} ! Sélection spéciale basée sur vos goûts.",
      ctx(activation, "maison_cible")
    ),
    (ActivationType::CrossMaison, Channel::Email) => format!(
      "Objet: Découvrez {} — recommandation personnalisée\n\n{}",
      ctx(activation, "maison_cible"),
      activation.message_vendeur
    ),

    // WhatsApp and Téléphone reuse the conversational default.
    _ => activation.message_vendeur.clone(),
  }
}
