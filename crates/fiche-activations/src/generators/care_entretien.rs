//! Care & entretien (pilier Service): owned products with a known
//! maintenance interval get a BASSE-priority service reminder scheduled at
//! reference + interval.

use chrono::{Days, NaiveDate};
use fiche_core::profile::ProfileDoc;
use fiche_extract::ExtractedContext;
use serde_json::json;

use crate::{
  activation::{Activation, ActivationKpis, ActivationType, Pillar, Priority},
  profile_view::ProfileView,
};

struct CareRule {
  family:      &'static str,
  service:     &'static str,
  delay_months: u64,
  description: &'static str,
}

const CARE_RULES: &[CareRule] = &[
  CareRule {
    family:       "sac",
    service:      "Nettoyage professionnel et imperméabilisation du cuir",
    delay_months: 12,
    description:  "Un nettoyage et un traitement imperméabilisant prolongeront la vie de votre sac.",
  },
  CareRule {
    family:       "portefeuille",
    service:      "Rénovation cuir et retouche de teinture",
    delay_months: 18,
    description:  "Un portefeuille en cuir mérite un soin régulier pour garder sa souplesse.",
  },
  CareRule {
    family:       "chaussures",
    service:      "Ressemelage, cirage et patine artisanale",
    delay_months: 6,
    description:  "Pour que vos souliers gardent leur éclat, un soin complet en atelier.",
  },
  CareRule {
    family:       "montre",
    service:      "Révision complète du mouvement et polissage",
    delay_months: 24,
    description:  "Une révision régulière garantit la précision et la longévité de votre montre.",
  },
  CareRule {
    family:       "ceinture",
    service:      "Nettoyage cuir et remplacement de boucle si besoin",
    delay_months: 18,
    description:  "Un entretien de votre ceinture pour maintenir son aspect neuf.",
  },
  CareRule {
    family:       "bijou",
    service:      "Nettoyage aux ultrasons et vérification des sertis",
    delay_months: 12,
    description:  "Un nettoyage professionnel pour raviver l'éclat de vos bijoux.",
  },
  CareRule {
    family:       "foulard",
    service:      "Pressing spécialisé soie et cachemire",
    delay_months: 6,
    description:  "Un pressing spécialisé pour préserver la qualité de la fibre.",
  },
  CareRule {
    family:       "costume",
    service:      "Pressing haute couture et retouches si besoin",
    delay_months: 6,
    description:  "Un pressing spécialisé pour garder la coupe impeccable.",
  },
  CareRule {
    family:       "manteau",
    service:      "Nettoyage professionnel et imperméabilisation",
    delay_months: 12,
    description:  "Un entretien annuel pour préparer votre manteau à la saison.",
  },
  CareRule {
    family:       "maroquinerie",
    service:      "Nettoyage, nourrissage et réparation du cuir",
    delay_months: 12,
    description:  "Un traitement complet pour maintenir la qualité de votre maroquinerie.",
  },
];

pub fn generate_care_entretien(
  client_id: &str,
  doc: &ProfileDoc,
  context: &ExtractedContext,
  reference: NaiveDate,
) -> Vec<Activation> {
  let view = ProfileView::new(doc);
  let mut activations = Vec::new();
  let mut seen: Vec<&str> = Vec::new();

  for product in &context.owned_products {
    let Some(rule) =
      CARE_RULES.iter().find(|r| r.family == product.product)
    else {
      continue;
    };
    if seen.contains(&rule.family) {
      continue;
    }
    seen.push(rule.family);

    let trigger_date =
      reference.checked_add_days(Days::new(rule.delay_months * 30));

    let mut description = rule.family.to_string();
    if let Some(brand) = &product.brand {
      description = format!("{brand} {description}");
    }
    if let Some(color) = &product.color {
      description.push_str(&format!(" {color}"));
    }

    let civility = view.civility();
    activations.push(Activation {
      client_id: client_id.to_string(),
      activation_type: ActivationType::CareEntretien,
      pillar: Pillar::Service,
      priority: Priority::Basse,
      trigger_date,
      canal_prefere: view.channel(),
      message_vendeur: format!(
        "Bonjour {civility}, cela fait quelque temps que vous portez votre \
         {description}. {} Notre service : {}. Souhaitez-vous prendre \
         rendez-vous ?",
        rule.description, rule.service
      ),
      context: json!({
        "produit": rule.family,
        "marque": product.brand,
        "service": rule.service,
        "delai_mois": rule.delay_months,
      }),
      kpis: ActivationKpis {
        probabilite_conversion: 0.30,
        valeur_estimee:         "50-300€".to_string(),
      },
    });
  }

  activations
}
