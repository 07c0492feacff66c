//! Gifting & dates clés (pilier Émotionnel): J-15 reminders with gift
//! suggestions refined by the client's color and material preferences.

use chrono::{Days, NaiveDate};
use fiche_core::profile::ProfileDoc;
use fiche_extract::{DateKind, ExtractedContext};
use serde_json::json;

use crate::{
  activation::{Activation, ActivationKpis, ActivationType, Pillar, Priority},
  profile_view::ProfileView,
};

const LEAD_DAYS: u64 = 15;

fn recipient(kind: DateKind) -> &'static str {
  match kind {
    DateKind::AnniversaireEpouse => "votre épouse",
    DateKind::AnniversaireMari => "votre époux",
    DateKind::AnniversaireEnfant => "votre enfant",
    DateKind::AnniversaireMariage => "vous deux",
    DateKind::Naissance => "l'heureux événement",
    DateKind::Mariage => "les mariés",
    DateKind::Noel => "vos proches",
    DateKind::SaintValentin => "votre moitié",
    DateKind::FeteDesMeres => "votre mère",
    DateKind::FeteDesPeres => "votre père",
    DateKind::Diplome => "le ou la diplômé(e)",
    DateKind::Anniversaire => "la personne concernée",
  }
}

fn base_suggestions(kind: DateKind) -> &'static [&'static str] {
  match kind {
    DateKind::AnniversaireEpouse => &["sac", "bijou", "foulard", "parfum"],
    DateKind::AnniversaireMari => &["ceinture", "portefeuille", "montre"],
    DateKind::AnniversaireEnfant => &["maroquinerie", "lunettes", "parfum"],
    DateKind::AnniversaireMariage => &["bijou", "montre", "voyage cadeau"],
    DateKind::Naissance => &["médaille", "bracelet enfant", "coffret naissance"],
    DateKind::Mariage => &["coffret cadeau", "foulard", "montre"],
    DateKind::Noel => &["parfum", "foulard", "maroquinerie"],
    DateKind::SaintValentin => &["bijou", "parfum", "foulard en soie"],
    DateKind::Diplome => &["montre", "stylo", "porte-documents"],
    _ => &["coffret cadeau", "parfum"],
  }
}

pub fn generate_gifting_dates(
  client_id: &str,
  doc: &ProfileDoc,
  context: &ExtractedContext,
  reference: NaiveDate,
) -> Vec<Activation> {
  let view = ProfileView::new(doc);
  let mut activations = Vec::new();

  for key_date in &context.key_dates {
    let (priority, trigger_date) = match key_date.estimated {
      Some(date) => {
        let days_until = (date - reference).num_days();
        if days_until <= 0 {
          (Priority::Basse, date.checked_sub_days(Days::new(LEAD_DAYS)))
        } else if days_until <= LEAD_DAYS as i64 {
          (Priority::Haute, Some(reference))
        } else {
          (Priority::Moyenne, date.checked_sub_days(Days::new(LEAD_DAYS)))
        }
      }
      None => (Priority::Moyenne, None),
    };

    // Refine suggestions with the profile's favorite color and material.
    let color = view.colors().first().copied();
    let material = view.materials().first().copied();
    let suggestions: Vec<String> = base_suggestions(key_date.kind)
      .iter()
      .take(3)
      .map(|s| {
        let mut suggestion = s.to_string();
        if let Some(c) = color {
          suggestion.push_str(&format!(" en {}", c.to_lowercase()));
        }
        if let Some(m) = material {
          suggestion.push_str(&format!(" ({m})"));
        }
        suggestion
      })
      .collect();

    let civility = view.civility();
    let label = key_date.kind.label();
    let to = recipient(key_date.kind);
    let message = format!(
      "Bonjour {civility}, {label} approche pour {to}. Je me suis permis de \
       préparer une sélection qui pourrait vous plaire : {}. Souhaitez-vous \
       que je vous la présente lors d'un rendez-vous privé ?",
      suggestions.join(", ")
    );

    activations.push(Activation {
      client_id: client_id.to_string(),
      activation_type: ActivationType::GiftingDates,
      pillar: Pillar::Emotionnel,
      priority,
      trigger_date,
      canal_prefere: view.channel(),
      message_vendeur: message,
      context: json!({
        "type_date": key_date.kind,
        "destinataire": to,
        "date_str": key_date.date_text,
        "date_estimee": key_date.estimated,
        "suggestions": suggestions,
      }),
      kpis: ActivationKpis {
        probabilite_conversion: 0.55,
        valeur_estimee:         "300-1500€".to_string(),
      },
    });
  }

  activations
}
