//! Rupture de stock (pilier Produit): waitlisted items become back-in-stock
//! alerts. Always HAUTE, always WhatsApp — immediacy wins here.

use chrono::NaiveDate;
use fiche_core::profile::ProfileDoc;
use fiche_extract::ExtractedContext;
use serde_json::json;

use crate::{
  activation::{
    Activation, ActivationKpis, ActivationType, Channel, Pillar, Priority,
  },
  profile_view::ProfileView,
};

pub fn generate_rupture_stock(
  client_id: &str,
  doc: &ProfileDoc,
  context: &ExtractedContext,
  reference: NaiveDate,
) -> Vec<Activation> {
  let view = ProfileView::new(doc);
  let mut activations = Vec::new();

  for item in &context.pending_items {
    let mut description_parts: Vec<&str> = Vec::new();
    if let Some(brand) = &item.brand {
      description_parts.push(brand);
    }
    description_parts.push(&item.product);
    if let Some(color) = &item.color {
      description_parts.push(color);
    }
    let mut description = description_parts.join(" ");
    if let Some(size) = &item.size {
      description.push_str(&format!(" taille {size}"));
    }

    let civility = view.civility();
    activations.push(Activation {
      client_id: client_id.to_string(),
      activation_type: ActivationType::RuptureStock,
      pillar: Pillar::Produit,
      priority: Priority::Haute,
      trigger_date: Some(reference),
      canal_prefere: Channel::WhatsApp,
      message_vendeur: format!(
        "Bonne nouvelle {civility} ! Le/La {description} que vous cherchiez \
         vient d'arriver. Je me suis permis de vous le/la mettre de côté. \
         Souhaitez-vous passer le/la récupérer ou préférez-vous une \
         livraison ?"
      ),
      context: json!({
        "produit": item.product,
        "marque": item.brand,
        "taille": item.size,
        "couleur": item.color,
        "statut": "en_attente_retour_stock",
        "description": description,
      }),
      kpis: ActivationKpis {
        probabilite_conversion: 0.75,
        valeur_estimee:         "500-5000€".to_string(),
      },
    });
  }

  activations
}
