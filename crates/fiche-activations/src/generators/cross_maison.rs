//! Cross-maison (pilier Service): affinity signals become sister-maison
//! recommendations, skipping maisons the client already prefers.

use chrono::NaiveDate;
use fiche_core::profile::ProfileDoc;
use fiche_extract::ExtractedContext;
use serde_json::json;

use crate::{
  activation::{Activation, ActivationKpis, ActivationType, Pillar, Priority},
  profile_view::ProfileView,
};

const SCORE_FLOOR: f64 = 0.5;
const SCORE_HIGH: f64 = 0.7;

fn proposition(affinity_key: &str, maison: &str) -> String {
  match affinity_key {
    "vins_spiritueux" => format!(
      "{maison} organise des dégustations privées exclusives. Je peux vous \
       réserver une place."
    ),
    "art_culture" => format!(
      "{maison} propose des visites privées et des éditions limitées. Un \
       moment unique."
    ),
    "horlogerie" => format!(
      "{maison} présente de nouvelles collections fascinantes. Je peux \
       organiser une présentation privée."
    ),
    "joaillerie" => {
      format!("{maison} propose des pièces d'exception à découvrir.")
    }
    "beaute_parfum" => format!(
      "{maison} a créé de nouvelles fragrances exclusives. Un univers \
       sensoriel à explorer."
    ),
    "voyage_luxe" => format!(
      "{maison} propose des séjours d'exception dans les plus beaux endroits \
       du monde."
    ),
    _ => format!("{maison} vous réserve des expériences exclusives."),
  }
}

pub fn generate_cross_maison(
  client_id: &str,
  doc: &ProfileDoc,
  context: &ExtractedContext,
  reference: NaiveDate,
) -> Vec<Activation> {
  let view = ProfileView::new(doc);
  let known: Vec<String> = view
    .preferred_maisons()
    .iter()
    .map(|m| m.to_lowercase())
    .collect();

  let mut activations = Vec::new();

  for affinity in &context.affinities {
    if affinity.score < SCORE_FLOOR {
      continue;
    }

    let new_maisons: Vec<&String> = affinity
      .maisons
      .iter()
      .filter(|m| !known.iter().any(|k| m.to_lowercase().contains(k)))
      .collect();
    let Some(target) = new_maisons.first() else { continue };

    let priority = if affinity.score >= SCORE_HIGH {
      Priority::Haute
    } else {
      Priority::Moyenne
    };

    let pitch = proposition(&affinity.key, target);
    let civility = view.civility();
    let keywords = affinity
      .keywords
      .iter()
      .take(2)
      .cloned()
      .collect::<Vec<_>>()
      .join(", ");

    activations.push(Activation {
      client_id: client_id.to_string(),
      activation_type: ActivationType::CrossMaison,
      pillar: Pillar::Service,
      priority,
      trigger_date: Some(reference),
      canal_prefere: view.channel(),
      message_vendeur: format!(
        "Bonjour {civility}, sachant votre goût pour {keywords}, je me suis \
         permis de vous recommander notre Maison sœur {target}. {pitch} \
         Puis-je organiser cela pour vous ?"
      ),
      context: json!({
        "affinite": affinity.label,
        "maison_cible": target,
        "toutes_maisons": new_maisons,
        "keywords": affinity.keywords,
        "confidence": affinity.score,
        "proposition": pitch,
      }),
      kpis: ActivationKpis {
        probabilite_conversion: (affinity.score * 0.4 * 100.0).round() / 100.0,
        valeur_estimee:         "200-5000€".to_string(),
      },
    });
  }

  activations
}
