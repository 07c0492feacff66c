//! Extraction vocabulary that is not part of the taxonomy registry:
//! product families, model names, trip/event triggers, and cross-maison
//! affinity groups.

use fiche_taxonomy::scan::Entries;

// ─── Products ────────────────────────────────────────────────────────────────

/// Product family → surface forms. The canonical value is the French family
/// name used in activation contexts and maintenance rules.
pub const PRODUITS: Entries = &[
  (
    "sac",
    &["sac", "sacs", "pochette", "clutch", "tote", "cabas", "handbag", "bag", "borsa", "bolso", "tasche"],
  ),
  ("portefeuille", &["portefeuille", "wallet", "porte-cartes", "card holder"]),
  ("ceinture", &["ceinture", "belt", "cintura", "gürtel"]),
  (
    "chaussures",
    &[
      "chaussures", "chaussure", "souliers", "bottines", "boots", "mocassins",
      "loafers", "sneakers", "baskets", "escarpins", "sandales", "shoes",
    ],
  ),
  ("montre", &["montre", "watch", "chronographe", "orologio", "uhr"]),
  (
    "bijou",
    &[
      "bijou", "bijoux", "bague", "collier", "bracelet", "boucles d'oreilles",
      "pendentif", "ring", "necklace", "earrings",
    ],
  ),
  ("lunettes", &["lunettes", "sunglasses", "lunettes de soleil", "occhiali"]),
  ("foulard", &["foulard", "écharpe", "châle", "carré de soie", "scarf"]),
  ("costume", &["costume", "blazer", "veste", "suit", "jacket", "tailleur"]),
  ("cravate", &["cravate", "tie", "noeud papillon"]),
  ("parfum", &["parfum", "perfume", "fragrance", "eau de toilette", "cologne"]),
  ("pull", &["pull", "pullover", "sweater"]),
  ("manteau", &["manteau", "trench", "parka", "doudoune", "coat"]),
  ("robe", &["robe", "dress", "robes"]),
  ("chemise", &["chemise", "shirt", "blouse"]),
  ("maroquinerie", &["maroquinerie", "porte-documents", "briefcase", "leather goods"]),
];

/// Iconic model names: surface → (proper-case model, maison). A model
/// mention identifies both the product and the brand.
pub const MODELES: &[(&str, (&str, &str))] = &[
  ("speedy", ("Speedy", "Louis Vuitton")),
  ("neverfull", ("Neverfull", "Louis Vuitton")),
  ("keepall", ("Keepall", "Louis Vuitton")),
  ("alma", ("Alma", "Louis Vuitton")),
  ("capucines", ("Capucines", "Louis Vuitton")),
  ("lady dior", ("Lady Dior", "Dior")),
  ("book tote", ("Book Tote", "Dior")),
  ("saddle", ("Saddle", "Dior")),
  ("antigona", ("Antigona", "Givenchy")),
  ("baguette", ("Baguette", "Fendi")),
  ("peekaboo", ("Peekaboo", "Fendi")),
  ("puzzle bag", ("Puzzle", "Loewe")),
  ("serpenti", ("Serpenti", "Bulgari")),
  ("carrera", ("Carrera", "TAG Heuer")),
  ("big bang", ("Big Bang", "Hublot")),
  ("el primero", ("El Primero", "Zenith")),
];

// ─── Trip & event triggers ───────────────────────────────────────────────────

/// Words opening a travel context window around a city mention.
pub const TRIP_TRIGGERS: &[&str] = &[
  "voyage", "voyager", "partir", "départ", "vacances", "trip", "travel",
  "flying", "viaje", "viaggio", "reise", "déplacement", "séjour", "week-end",
  "weekend",
];

/// Event vocabulary for life projects (non-travel).
pub const EVENEMENTS: Entries = &[
  ("Gala", &["gala", "soirée de gala", "charity event"]),
  ("Cocktail", &["cocktail", "réception", "reception"]),
  ("Vernissage", &["vernissage", "opening night"]),
  ("Festival", &["fashion week", "festival de cannes", "biennale"]),
  (
    "Dîner d'affaires",
    &["dîner d'affaires", "déjeuner d'affaires", "business dinner"],
  ),
];

// ─── Out-of-stock signals ────────────────────────────────────────────────────

pub const RUPTURE_PHRASES: &[&str] = &[
  "vous n'avez plus",
  "n'avez plus",
  "plus en stock",
  "plus disponible",
  "pas disponible",
  "en rupture",
  "rupture de stock",
  "out of stock",
  "sold out",
  "esaurito",
  "agotado",
  "ausverkauft",
  "liste d'attente",
  "waitlist",
  "waiting list",
];

// ─── Cross-maison affinity groups ────────────────────────────────────────────

pub struct AffinityGroup {
  pub key:      &'static str,
  pub label:    &'static str,
  pub keywords: &'static [&'static str],
  pub maisons:  &'static [&'static str],
}

pub const AFFINITES: &[AffinityGroup] = &[
  AffinityGroup {
    key:      "vins_spiritueux",
    label:    "Vins & Spiritueux",
    keywords: &[
      "champagne", "vin", "wine", "cognac", "whisky", "dégustation",
      "sommelier", "vignoble", "œnologie", "millésime", "grand cru",
    ],
    maisons:  &["Dom Pérignon", "Moët & Chandon", "Ruinart", "Krug", "Hennessy"],
  },
  AffinityGroup {
    key:      "art_culture",
    label:    "Art & Culture",
    keywords: &[
      "musée", "museum", "galerie", "gallery", "exposition", "peinture",
      "sculpture", "vernissage", "fondation", "art contemporain",
    ],
    maisons:  &["Fondation Louis Vuitton", "Artycapucines"],
  },
  AffinityGroup {
    key:      "horlogerie",
    label:    "Horlogerie",
    keywords: &[
      "montre", "watch", "chronographe", "mouvement", "complication",
      "tourbillon", "calibre", "horlogerie",
    ],
    maisons:  &["TAG Heuer", "Hublot", "Zenith"],
  },
  AffinityGroup {
    key:      "joaillerie",
    label:    "Joaillerie",
    keywords: &[
      "bijou", "bague", "collier", "bracelet", "diamant", "diamond",
      "émeraude", "saphir", "haute joaillerie",
    ],
    maisons:  &["Tiffany & Co.", "Bulgari", "Chaumet", "Fred"],
  },
  AffinityGroup {
    key:      "beaute_parfum",
    label:    "Beauté & Parfum",
    keywords: &[
      "parfum", "perfume", "fragrance", "maquillage", "makeup", "soin",
      "skincare", "cosmétique",
    ],
    maisons:  &["Guerlain", "Givenchy Beauty", "Dior Beauty"],
  },
  AffinityGroup {
    key:      "voyage_luxe",
    label:    "Voyage de Luxe",
    keywords: &[
      "palace", "yacht", "croisière", "jet privé", "first class", "resort",
      "concierge", "suite",
    ],
    maisons:  &["Cheval Blanc", "Belmond"],
  },
];
