//! Lifestyle & Voyage (pilier Émotionnel): a detected trip or event with an
//! estimated date becomes a concierge-style suggestion at J-21.

use chrono::{Days, NaiveDate};
use fiche_core::profile::ProfileDoc;
use fiche_extract::{ExtractedContext, ProjectKind};
use serde_json::json;

use crate::{
  activation::{Activation, ActivationKpis, ActivationType, Pillar, Priority},
  profile_view::ProfileView,
};

const LEAD_DAYS: u64 = 21;

fn voyage_service(destination: &str) -> &'static str {
  let d = destination.to_lowercase();
  if ["tokyo", "hong kong", "singapore", "seoul", "shanghai"]
    .iter()
    .any(|k| d.contains(k))
  {
    "Sélection voyage Asie: pièces légères, guide shopping"
  } else if ["dubai", "abu dhabi", "doha"].iter().any(|k| d.contains(k)) {
    "Sélection Moyen-Orient: tenues de soirée, accessoires prestige"
  } else if ["new york", "los angeles", "miami", "san francisco"]
    .iter()
    .any(|k| d.contains(k))
  {
    "Sélection USA: décontracté chic, sneakers premium"
  } else if ["milan", "rome"].iter().any(|k| d.contains(k)) {
    "Sélection Italie: élégance classique, cuir artisanal"
  } else {
    "Sélection voyage personnalisée selon votre destination"
  }
}

fn event_service(event: &str) -> &'static str {
  let e = event.to_lowercase();
  if e.contains("gala") {
    "Tenue de gala complète: smoking ou robe, accessoires, pochette"
  } else if e.contains("cocktail") {
    "Look cocktail: tenue semi-formelle, bijoux de soirée"
  } else if e.contains("vernissage") {
    "Style vernissage: look arty et sophistiqué"
  } else if e.contains("affaires") {
    "Business dinner: costume ou tailleur, montre, maroquinerie"
  } else {
    "Conseil événement personnalisé"
  }
}

pub fn generate_lifestyle_voyage(
  client_id: &str,
  doc: &ProfileDoc,
  context: &ExtractedContext,
  reference: NaiveDate,
) -> Vec<Activation> {
  let view = ProfileView::new(doc);
  let mut activations = Vec::new();

  for project in &context.life_projects {
    let service = match project.kind {
      ProjectKind::Voyage => voyage_service(&project.name),
      ProjectKind::Evenement => event_service(&project.name),
    };

    let (priority, trigger_date) = match project.estimated {
      Some(date) => {
        if (date - reference).num_days() < LEAD_DAYS as i64 {
          (Priority::Haute, Some(reference))
        } else {
          (Priority::Moyenne, date.checked_sub_days(Days::new(LEAD_DAYS)))
        }
      }
      None => (Priority::Moyenne, None),
    };

    let civility = view.civility();
    let message = match project.kind {
      ProjectKind::Voyage => format!(
        "Bonjour {civility}, j'espère que vos préparatifs pour {} avancent \
         bien ! Je me suis permis de vous préparer une sélection spéciale : \
         {service}. Souhaitez-vous que je vous la réserve pour un essayage ?",
        project.name
      ),
      ProjectKind::Evenement => format!(
        "Bonjour {civility}, j'ai noté votre {} à venir. Je vous propose : \
         {service}. N'hésitez pas à me contacter pour un rendez-vous privé.",
        project.name
      ),
    };

    activations.push(Activation {
      client_id: client_id.to_string(),
      activation_type: ActivationType::LifestyleVoyage,
      pillar: Pillar::Emotionnel,
      priority,
      trigger_date,
      canal_prefere: view.channel(),
      message_vendeur: message,
      context: json!({
        "type_projet": project.kind,
        "destination": project.name,
        "timing": project.timing,
        "service_propose": service,
      }),
      kpis: ActivationKpis {
        probabilite_conversion: 0.35,
        valeur_estimee:         "500-2000€".to_string(),
      },
    });
  }

  activations
}
