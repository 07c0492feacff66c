//! The activation engine: runs the fixed generator set over a client batch
//! and aggregates the results.
//!
//! Output ordering is fully deterministic — batch order, then generator
//! order, then each generator's own ordering — so identical inputs and
//! reference date produce byte-identical output.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fiche_core::profile::ProfileDoc;
use fiche_extract::ExtractedContext;

use crate::{
  activation::{Activation, Pillar, Priority},
  generators::GENERATORS,
};

/// One client's input to the engine.
#[derive(Debug, Clone)]
pub struct ClientRecord {
  pub client_id: String,
  pub doc:       ProfileDoc,
  pub context:   ExtractedContext,
}

/// Ranking entry returned by [`ActivationEngine::top_clients`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopClient {
  pub client_id:   String,
  pub score:       u32,
  pub activations: usize,
}

pub struct ActivationEngine {
  reference_date: NaiveDate,
}

impl ActivationEngine {
  pub fn new(reference_date: NaiveDate) -> Self { Self { reference_date } }

  pub fn reference_date(&self) -> NaiveDate { self.reference_date }

  /// Run every generator over every client, in fixed order.
  pub fn run(&self, batch: &[ClientRecord]) -> Vec<Activation> {
    let mut activations = Vec::new();
    for record in batch {
      activations.extend(self.run_for_client(record));
    }
    activations
  }

  pub fn run_for_client(&self, record: &ClientRecord) -> Vec<Activation> {
    self.run_raw(&record.client_id, &record.doc, &record.context)
  }

  pub fn run_raw(
    &self,
    client_id: &str,
    doc: &ProfileDoc,
    context: &ExtractedContext,
  ) -> Vec<Activation> {
    let mut activations = Vec::new();
    for (_, generator) in GENERATORS {
      activations.extend(generator(client_id, doc, context, self.reference_date));
    }
    activations
  }

  // ── Aggregations ──────────────────────────────────────────────────────

  pub fn group_by_priority<'a>(
    activations: &'a [Activation],
  ) -> BTreeMap<Priority, Vec<&'a Activation>> {
    let mut groups: BTreeMap<Priority, Vec<&Activation>> = BTreeMap::new();
    for a in activations {
      groups.entry(a.priority).or_default().push(a);
    }
    groups
  }

  pub fn group_by_pillar<'a>(
    activations: &'a [Activation],
  ) -> BTreeMap<Pillar, Vec<&'a Activation>> {
    let mut groups: BTreeMap<Pillar, Vec<&Activation>> = BTreeMap::new();
    for a in activations {
      groups.entry(a.pillar).or_default().push(a);
    }
    groups
  }

  pub fn group_by_client<'a>(
    activations: &'a [Activation],
  ) -> BTreeMap<&'a str, Vec<&'a Activation>> {
    let mut groups: BTreeMap<&str, Vec<&Activation>> = BTreeMap::new();
    for a in activations {
      groups.entry(a.client_id.as_str()).or_default().push(a);
    }
    groups
  }

  /// Clients ranked by weighted priority (HAUTE = 3, MOYENNE = 1); ties
  /// break on client id so the ranking is stable.
  pub fn top_clients(activations: &[Activation], n: usize) -> Vec<TopClient> {
    let mut scored: Vec<TopClient> = Self::group_by_client(activations)
      .into_iter()
      .map(|(client_id, acts)| TopClient {
        client_id:   client_id.to_string(),
        score:       acts.iter().map(|a| a.priority.weight()).sum(),
        activations: acts.len(),
      })
      .collect();
    scored.sort_by(|a, b| {
      b.score.cmp(&a.score).then_with(|| a.client_id.cmp(&b.client_id))
    });
    scored.truncate(n);
    scored
  }

  /// A human-readable weekly summary: counts, pillar split, top clients,
  /// and the most urgent actions.
  pub fn weekly_brief(&self, activations: &[Activation]) -> String {
    if activations.is_empty() {
      return "Aucune activation générée.".to_string();
    }

    let by_priority = Self::group_by_priority(activations);
    let count = |p: Priority| by_priority.get(&p).map_or(0, Vec::len);
    let clients = Self::group_by_client(activations).len();

    let mut lines = vec![
      format!(
        "# Brief hebdomadaire — {}",
        self.reference_date.format("%d/%m/%Y")
      ),
      String::new(),
      "## Synthèse".to_string(),
      format!("- {} activations générées", activations.len()),
      format!("- {} haute priorité", count(Priority::Haute)),
      format!("- {} moyenne priorité", count(Priority::Moyenne)),
      format!("- {} basse priorité", count(Priority::Basse)),
      format!("- {clients} clients concernés"),
      String::new(),
      "## Répartition par pilier".to_string(),
    ];

    for (pillar, acts) in Self::group_by_pillar(activations) {
      lines.push(format!("- {} : {} activations", pillar.as_str(), acts.len()));
    }

    lines.push(String::new());
    lines.push("## Top clients à activer".to_string());
    for (rank, top) in
      Self::top_clients(activations, 5).into_iter().enumerate()
    {
      lines.push(format!(
        "{}. {} — {} activations (score {})",
        rank + 1,
        top.client_id,
        top.activations,
        top.score
      ));
    }

    if let Some(urgent) = by_priority.get(&Priority::Haute) {
      lines.push(String::new());
      lines.push(format!("## Actions urgentes ({})", urgent.len()));
      for a in urgent.iter().take(10) {
        let mut message: String =
          a.message_vendeur.chars().take(80).collect();
        if a.message_vendeur.chars().count() > 80 {
          message.push('…');
        }
        lines.push(format!(
          "- {} — {}: {}",
          a.client_id,
          a.activation_type.as_str(),
          message
        ));
      }
    }

    lines.join("\n")
  }
}
