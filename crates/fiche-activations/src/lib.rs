//! Activation engine — pure-function generators that read a profile and
//! its extracted context and emit prioritized, scheduled CRM actions.

mod activation;
mod engine;
pub mod generators;
mod profile_view;
pub mod templates;

pub use activation::{
  Activation, ActivationKpis, ActivationType, Channel, Pillar, Priority,
};
pub use engine::{ActivationEngine, ClientRecord, TopClient};

// ─── Scenario tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use fiche_core::{lang::Lang, profile::ProfileDoc};
  use fiche_extract::extract;

  use super::*;

  fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 30).unwrap()
  }

  fn record(text: &str) -> ClientRecord {
    let extraction = extract(text, Some(Lang::Fr), reference());
    ClientRecord {
      client_id: "CA-001".to_string(),
      doc:       extraction.doc,
      context:   extraction.context,
    }
  }

  #[test]
  fn gifting_scenario_inside_window_is_haute_and_triggers_today() {
    let record =
      record("notre anniversaire de mariage est le 12 mai, madame");
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);

    let gifting: Vec<_> = activations
      .iter()
      .filter(|a| a.activation_type == ActivationType::GiftingDates)
      .collect();
    assert_eq!(gifting.len(), 1);
    assert_eq!(gifting[0].priority, Priority::Haute);
    assert_eq!(gifting[0].trigger_date, Some(reference()));
    assert_eq!(gifting[0].pillar, Pillar::Emotionnel);
  }

  #[test]
  fn gifting_far_date_is_moyenne_with_j15_trigger() {
    let record = record("l'anniversaire de ma femme est le 15 août");
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);

    let gifting = activations
      .iter()
      .find(|a| a.activation_type == ActivationType::GiftingDates)
      .unwrap();
    assert_eq!(gifting.priority, Priority::Moyenne);
    assert_eq!(
      gifting.trigger_date,
      NaiveDate::from_ymd_opt(2026, 7, 31)
    );
  }

  #[test]
  fn rupture_stock_scenario() {
    let record = record("Vous n'avez plus la Speedy en 35 ?".to_lowercase().as_str());
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);

    let rupture = activations
      .iter()
      .find(|a| a.activation_type == ActivationType::RuptureStock)
      .unwrap();
    assert_eq!(rupture.priority, Priority::Haute);
    assert_eq!(rupture.canal_prefere, Channel::WhatsApp);
    assert_eq!(rupture.context["produit"], "Speedy");
    assert_eq!(rupture.context["taille"], "35");
  }

  #[test]
  fn voyage_within_three_weeks_is_haute() {
    let record =
      record("nous partons en voyage à tokyo la semaine prochaine");
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);

    let voyage = activations
      .iter()
      .find(|a| a.activation_type == ActivationType::LifestyleVoyage)
      .unwrap();
    assert_eq!(voyage.priority, Priority::Haute);
    assert_eq!(voyage.trigger_date, Some(reference()));
    assert_eq!(voyage.context["destination"], "Tokyo");
  }

  #[test]
  fn next_best_product_caps_at_three() {
    let record = record(
      "elle possède un sac, des chaussures, une montre et un foulard noir",
    );
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);

    let nbp: Vec<_> = activations
      .iter()
      .filter(|a| a.activation_type == ActivationType::NextBestProduct)
      .collect();
    assert!(!nbp.is_empty());
    assert!(nbp.len() <= 3);
    // Suggested complements are never products the client already owns.
    for a in &nbp {
      let suggested = a.context["produit_suggere"].as_str().unwrap();
      assert!(!["sac", "chaussures", "montre", "foulard"].contains(&suggested));
    }
  }

  #[test]
  fn cross_maison_skips_known_maisons() {
    let record = record(
      "passionnée de champagne et de grands crus, cliente ruinart fidèle",
    );
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);

    let cross = activations
      .iter()
      .find(|a| a.activation_type == ActivationType::CrossMaison)
      .unwrap();
    assert_ne!(cross.context["maison_cible"], "Ruinart");
  }

  #[test]
  fn care_entretien_schedules_reference_plus_interval() {
    let record = record("son sac monogram est superbe");
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);

    let care = activations
      .iter()
      .find(|a| a.activation_type == ActivationType::CareEntretien)
      .unwrap();
    assert_eq!(care.priority, Priority::Basse);
    // Bag interval: 12 months × 30 days.
    assert_eq!(
      care.trigger_date,
      reference().checked_add_days(chrono::Days::new(360))
    );
  }

  #[test]
  fn engine_output_is_deterministic() {
    let records = vec![
      record("voyage à tokyo la semaine prochaine, madame"),
      record("vous n'avez plus la speedy en 35"),
    ];
    let engine = ActivationEngine::new(reference());

    let a = serde_json::to_string(&engine.run(&records)).unwrap();
    let b = serde_json::to_string(&engine.run(&records)).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn top_clients_ranks_by_weighted_priority() {
    let mut batch = vec![
      record("vous n'avez plus la speedy en 35"), // HAUTE
    ];
    let mut calm = record("un sac beige");
    calm.client_id = "CA-002".to_string();
    batch.push(calm);

    let engine = ActivationEngine::new(reference());
    let activations = engine.run(&batch);
    let top = ActivationEngine::top_clients(&activations, 5);

    assert_eq!(top[0].client_id, "CA-001");
    assert!(top[0].score >= 3);
  }

  #[test]
  fn weekly_brief_mentions_counts_and_top_clients() {
    let engine = ActivationEngine::new(reference());
    let activations =
      engine.run(&[record("vous n'avez plus la speedy en 35, madame")]);
    let brief = engine.weekly_brief(&activations);

    assert!(brief.contains("Brief hebdomadaire — 30/04/2026"));
    assert!(brief.contains("haute priorité"));
    assert!(brief.contains("CA-001"));
  }

  #[test]
  fn empty_profile_generates_nothing() {
    let engine = ActivationEngine::new(reference());
    let record = ClientRecord {
      client_id: "CA-009".to_string(),
      doc:       ProfileDoc::new(),
      context:   Default::default(),
    };
    assert!(engine.run_for_client(&record).is_empty());
  }

  #[test]
  fn sms_template_is_short_form() {
    let record = record("vous n'avez plus la speedy en 35");
    let engine = ActivationEngine::new(reference());
    let activations = engine.run_for_client(&record);
    let rupture = activations
      .iter()
      .find(|a| a.activation_type == ActivationType::RuptureStock)
      .unwrap();

    let sms = templates::format_message(rupture, Some(Channel::Sms));
    assert!(sms.contains("Speedy"));
    assert!(sms.len() < rupture.message_vendeur.len());
  }
}
