//! Next best product (pilier Produit): owned products matched against the
//! complementarity table, refined by the client's color/material/maison
//! preferences. Capped at three suggestions per client.

use chrono::NaiveDate;
use fiche_core::profile::ProfileDoc;
use fiche_extract::ExtractedContext;
use serde_json::json;

use crate::{
  activation::{Activation, ActivationKpis, ActivationType, Pillar, Priority},
  profile_view::ProfileView,
};

const MAX_SUGGESTIONS: usize = 3;

/// Product family → complements worth proposing alongside it.
const COMPLEMENTARITE: &[(&str, &[&str])] = &[
  ("sac", &["portefeuille", "ceinture", "foulard", "porte-clés"]),
  ("portefeuille", &["sac", "porte-cartes", "ceinture"]),
  ("ceinture", &["sac", "chaussures", "portefeuille"]),
  ("chaussures", &["ceinture", "sac", "chaussettes de luxe"]),
  ("costume", &["cravate", "chaussures", "boutons de manchette"]),
  ("montre", &["bracelet", "boutons de manchette", "écrin de voyage"]),
  ("lunettes", &["étui", "foulard", "chapeau"]),
  ("foulard", &["sac", "broche", "lunettes"]),
  ("cravate", &["costume", "pochette de costume", "boutons de manchette"]),
  ("bijou", &["montre", "foulard en soie", "coffret à bijoux"]),
  ("parfum", &["bougie parfumée", "lait pour le corps", "coffret parfum"]),
  ("chemise", &["cravate", "costume", "boutons de manchette"]),
  ("pull", &["foulard", "manteau", "chapeau"]),
  ("manteau", &["foulard", "gants", "chapeau"]),
  ("robe", &["pochette", "bijou", "chaussures"]),
  ("maroquinerie", &["portefeuille", "porte-clés", "étui"]),
];

/// Iconic models resolve to a product family for complement lookup.
const MODEL_FAMILIES: &[(&str, &str)] = &[
  ("Speedy", "sac"),
  ("Neverfull", "sac"),
  ("Keepall", "sac"),
  ("Alma", "sac"),
  ("Capucines", "sac"),
  ("Lady Dior", "sac"),
  ("Book Tote", "sac"),
  ("Saddle", "sac"),
  ("Antigona", "sac"),
  ("Baguette", "sac"),
  ("Peekaboo", "sac"),
  ("Puzzle", "sac"),
  ("Serpenti", "bijou"),
  ("Carrera", "montre"),
  ("Big Bang", "montre"),
  ("El Primero", "montre"),
];

fn family_of(product: &str) -> &str {
  MODEL_FAMILIES
    .iter()
    .find(|(model, _)| *model == product)
    .map(|(_, family)| *family)
    .unwrap_or(product)
}

fn complements_for(family: &str) -> &'static [&'static str] {
  COMPLEMENTARITE
    .iter()
    .find(|(f, _)| *f == family)
    .map(|(_, c)| *c)
    .unwrap_or(&[])
}

pub fn generate_next_best_product(
  client_id: &str,
  doc: &ProfileDoc,
  context: &ExtractedContext,
  reference: NaiveDate,
) -> Vec<Activation> {
  let view = ProfileView::new(doc);

  let mut owned: Vec<String> = Vec::new();
  for p in &context.owned_products {
    let family = family_of(&p.product).to_string();
    if family != "non spécifié" && !owned.contains(&family) {
      owned.push(family);
    }
  }
  if owned.is_empty() {
    return Vec::new();
  }

  let color = view.colors().first().map(|c| c.to_lowercase());
  let material = view.materials().first().map(|m| m.to_lowercase());
  let maison = view.preferred_maisons().first().copied().map(String::from);

  let mut seen: Vec<&str> = Vec::new();
  let mut activations = Vec::new();

  for family in &owned {
    let complements = complements_for(family);
    let priority = if complements.len() <= 2 {
      Priority::Haute
    } else {
      Priority::Moyenne
    };

    for complement in complements {
      if seen.contains(complement) || owned.iter().any(|o| o == complement) {
        continue;
      }
      seen.push(complement);

      let mut description = complement.to_string();
      if let Some(c) = &color {
        description.push_str(&format!(" {c}"));
      }
      if let Some(m) = &material {
        description.push_str(&format!(" en {m}"));
      }
      if let Some(b) = &maison {
        description.push_str(&format!(" {b}"));
      }

      let civility = view.civility();
      activations.push(Activation {
        client_id: client_id.to_string(),
        activation_type: ActivationType::NextBestProduct,
        pillar: Pillar::Produit,
        priority,
        trigger_date: Some(reference),
        canal_prefere: view.channel(),
        message_vendeur: format!(
          "Bonjour {civility}, je viens de recevoir un(e) {description} qui \
           s'accorderait parfaitement avec votre {family}. Même univers de \
           couleur et de matière. Souhaitez-vous le voir ?"
        ),
        context: json!({
          "produit_existant": family,
          "produit_suggere": complement,
          "couleur_match": color,
          "matiere_match": material,
          "maison_match": maison,
        }),
        kpis: ActivationKpis {
          probabilite_conversion: 0.45,
          valeur_estimee:         "400-2000€".to_string(),
        },
      });
    }
  }

  // Highest priority first, then cap.
  activations.sort_by(|a, b| b.priority.cmp(&a.priority));
  activations.truncate(MAX_SUGGESTIONS);
  activations
}
