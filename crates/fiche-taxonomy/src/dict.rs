//! Multilingual keyword dictionaries, one per keyword-backed taxonomy leaf.
//!
//! Surface forms are lowercase and accent-preserving, covering French,
//! English, Italian, Spanish, and German where the vocabulary differs.
//! Canonical values are the taxonomy's allowed values verbatim.

use crate::scan::Entries;

// ─── Identité ────────────────────────────────────────────────────────────────

pub const GENRE: Entries = &[
  (
    "Femme",
    &[
      "madame", "mme", "mademoiselle", "cliente", "épouse", "sa femme",
      "ma femme", "mrs", "miss", "wife", "signora", "moglie", "señora",
      "esposa", "frau", "ehefrau",
    ],
  ),
  (
    "Homme",
    &[
      "monsieur", "mon mari", "son mari", "époux", "mister", "husband",
      "gentleman", "signor", "marito", "señor", "marido", "herr", "ehemann",
    ],
  ),
];

pub const STATUT_RELATIONNEL: Entries = &[
  (
    "VIP",
    &[
      "vip", "client privilégié", "carte noire", "top client",
      "meilleur client", "platinum", "private client",
    ],
  ),
  (
    "Fidèle",
    &[
      "fidèle", "habitué", "habituée", "depuis des années", "loyal customer",
      "returning customer", "long-time", "fedele", "treue",
      "carte de fidélité",
    ],
  ),
  (
    "Nouveau",
    &[
      "nouveau client", "nouvelle cliente", "première fois", "première visite",
      "first time", "new customer", "jamais acheté", "primera vez", "neu",
    ],
  ),
  (
    "Régulier",
    &["régulier", "régulière", "plusieurs fois", "regular"],
  ),
  (
    "Occasionnel",
    &[
      "occasionnel", "occasionnelle", "rarement", "occasionally",
      "une fois par an", "once a year", "gelegentlich",
    ],
  ),
];

pub const SITUATION_FAMILIALE: Entries = &[
  (
    "Marié(e)",
    &[
      "marié", "mariée", "mon mari", "ma femme", "époux", "épouse",
      "married", "husband", "wife", "sposato", "sposata", "casado", "casada",
      "verheiratet",
    ],
  ),
  (
    "Couple",
    &[
      "en couple", "mon copain", "ma copine", "conjoint", "conjointe",
      "partenaire", "partner", "boyfriend", "girlfriend", "fiancé", "fiancée",
    ],
  ),
  (
    "Avec_enfants",
    &[
      "enfant", "enfants", "mon fils", "ma fille", "bébé", "famille",
      "children", "kids", "my son", "my daughter", "figli", "hijos", "kinder",
    ],
  ),
  (
    "Célibataire",
    &["célibataire", "single", "solo", "soltero", "soltera"],
  ),
];

pub const PROFESSION: Entries = &[
  (
    "Entrepreneur",
    &[
      "entrepreneur", "chef d'entreprise", "fondateur", "fondatrice", "ceo",
      "founder", "start-up", "startup", "imprenditore", "empresario",
      "unternehmer",
    ],
  ),
  (
    "Cadre",
    &[
      "cadre", "directeur", "directrice", "manager", "dirigeant",
      "executive", "direttore", "direktor", "vice president",
    ],
  ),
  (
    "Profession_libérale",
    &[
      "avocat", "avocate", "médecin", "chirurgien", "architecte", "notaire",
      "consultant", "lawyer", "doctor", "surgeon", "avvocato", "medico",
      "abogado", "arzt", "rechtsanwalt",
    ],
  ),
  (
    "Artiste",
    &[
      "artiste", "peintre", "sculpteur", "musicien", "musicienne",
      "designer", "créateur", "créatrice", "galeriste", "artist",
    ],
  ),
  (
    "Étudiant",
    &["étudiant", "étudiante", "student", "université", "stagiaire"],
  ),
];

// ─── Lifestyle ───────────────────────────────────────────────────────────────

/// Sport dictionaries grouped by the nested path under
/// `lifestyle_centres_interet/sport`.
pub const SPORT_GROUPS: &[(&str, Entries)] = &[
  (
    "collectif",
    &[
      ("Football", &["football", "foot", "soccer", "calcio", "fußball"]),
      ("Basketball", &["basketball", "basket", "nba"]),
      ("Rugby", &["rugby"]),
    ],
  ),
  (
    "individuel/raquette",
    &[
      ("Tennis", &["tennis", "roland garros", "wimbledon"]),
      ("Padel", &["padel"]),
    ],
  ),
  (
    "individuel/outdoor",
    &[
      ("Golf", &["golf", "golfeur", "golfeuse"]),
      ("Ski", &["ski", "skiing", "les alpes", "piste"]),
      ("Randonnée", &["randonnée", "hiking", "trek", "trekking"]),
    ],
  ),
  (
    "individuel/bien_etre",
    &[
      ("Yoga", &["yoga", "yogi"]),
      ("Pilates", &["pilates"]),
      ("Méditation", &["méditation", "meditation", "mindfulness"]),
    ],
  ),
  (
    "individuel/endurance",
    &[
      ("Running", &["running", "jogging", "marathon", "course à pied", "corsa"]),
      ("Cyclisme", &["cyclisme", "vélo", "cycling"]),
      ("Natation", &["natation", "swimming", "nuoto", "natación"]),
      ("Fitness", &["fitness", "musculation", "crossfit", "salle de sport"]),
    ],
  ),
];

pub const MUSIQUE: Entries = &[
  ("Classique", &["classique", "classical", "symphonie", "orchestre", "philharmonie"]),
  ("Opéra", &["opéra", "opera", "soprano", "oper"]),
  ("Jazz", &["jazz", "swing", "be-bop"]),
  ("Pop", &["pop music", "la pop", "chanson"]),
  ("Rock", &["rock", "metal"]),
  ("Electro", &["electro", "électro", "techno", "house music", "edm"]),
];

pub const ANIMAUX: Entries = &[
  ("Chien", &["chien", "chiot", "my dog", "mon chien", "cane", "perro", "hund"]),
  ("Chat", &["mon chat", "chaton", "my cat", "gatto", "gato", "katze"]),
  ("Cheval", &["cheval", "équitation", "horse", "cavallo", "caballo", "pferd"]),
  ("Aucun", &["pas d'animal", "no pet", "sans animal"]),
];

pub const VOYAGE: Entries = &[
  (
    "Luxe",
    &[
      "croisière", "yacht", "palace", "first class", "première classe",
      "jet privé", "private jet", "cinq étoiles", "5 étoiles",
    ],
  ),
  ("Aventure", &["safari", "aventure", "adventure", "expédition"]),
  (
    "Culturel",
    &["voyage culturel", "patrimoine", "city trip", "cultural trip"],
  ),
  ("Détente", &["spa", "wellness", "détente", "relaxation", "resort"]),
];

pub const ART_CULTURE: Entries = &[
  ("Peinture", &["peinture", "tableau", "painting", "pittura"]),
  ("Sculpture", &["sculpture", "sculpteur", "scultura"]),
  (
    "Musées",
    &[
      "musée", "museum", "museo", "galerie", "gallery", "galleria",
      "exposition", "vernissage", "exhibition",
    ],
  ),
  ("Mode", &["fashion week", "défilé", "haute couture", "runway"]),
];

pub const GASTRONOMIE: Entries = &[
  (
    "Fine_dining",
    &[
      "gastronomie", "gastronomique", "étoilé", "michelin", "fine dining",
      "chef", "tasting menu",
    ],
  ),
  ("Cuisine_locale", &["cuisine locale", "terroir", "local food", "trattoria"]),
  (
    "Vins_spiritueux",
    &[
      "vin", "vins", "wine", "champagne", "sommelier", "dégustation",
      "whisky", "cognac", "grand cru", "millésime",
    ],
  ),
  (
    "Vegan_healthy",
    &["healthy", "détox", "cuisine végétale", "plant-based"],
  ),
];

// ─── Style personnel ─────────────────────────────────────────────────────────

pub const TYPE_VETEMENTS: Entries = &[
  ("Casual", &["casual", "décontracté", "décontractée", "quotidien"]),
  ("Chic", &["chic", "élégant", "élégante", "raffiné", "raffinée", "habillé"]),
  ("Business", &["business", "bureau", "corporate", "tailleur de travail"]),
  ("Sportswear", &["sportswear", "athleisure", "streetwear"]),
  (
    "Haute_couture",
    &["haute couture", "sur mesure", "pièce unique", "bespoke"],
  ),
];

/// Favorite pieces grouped by the nested path under
/// `style_personnel/pieces_favorites`.
pub const PIECES_GROUPS: &[(&str, Entries)] = &[
  (
    "main",
    &[
      (
        "Sacs",
        &[
          "sac", "sacs", "sac à main", "handbag", "bag", "pochette",
          "clutch", "tote", "cabas", "borsa", "bolso", "tasche",
        ],
      ),
      (
        "Chaussures",
        &[
          "chaussure", "chaussures", "souliers", "escarpins", "mocassins",
          "bottines", "sneakers", "baskets", "shoes", "loafers", "scarpe",
          "zapatos", "schuhe",
        ],
      ),
      (
        "Manteaux",
        &["manteau", "trench", "parka", "doudoune", "coat", "cappotto", "mantel"],
      ),
      (
        "Robes_Costumes",
        &[
          "robe", "robes", "costume", "smoking", "tailleur", "dress",
          "suit", "tuxedo", "abito", "vestido", "anzug",
        ],
      ),
    ],
  ),
  (
    "accessoires",
    &[
      ("Chapeaux", &["chapeau", "casquette", "béret", "panama"]),
      ("Ceintures", &["ceinture", "belt", "cintura", "cinturón", "gürtel"]),
      (
        "Foulards",
        &["foulard", "carré de soie", "écharpe", "châle", "scarf", "sciarpa"],
      ),
      (
        "Lunettes",
        &["lunettes", "lunettes de soleil", "sunglasses", "occhiali", "gafas"],
      ),
      (
        "Bijoux",
        &[
          "bijou", "bijoux", "bague", "collier", "bracelet",
          "boucles d'oreilles", "jewelry", "necklace", "gioielli", "joyas",
          "schmuck",
        ],
      ),
      ("Gants", &["gants", "gloves", "guanti", "guantes", "handschuhe"]),
      (
        "Montres",
        &["montre", "montres", "chronographe", "watch", "orologio", "reloj", "uhr"],
      ),
    ],
  ),
];

pub const COULEURS: Entries = &[
  ("Noir", &["noir", "noire", "noirs", "black", "nero", "negro", "schwarz", "ébène"]),
  ("Beige", &["beige", "écru", "crème", "cream", "sable", "nude", "taupe"]),
  (
    "Bleu_marine",
    &["bleu marine", "navy", "marine", "bleu nuit", "dark blue", "blu"],
  ),
  ("Blanc", &["blanc", "blanche", "white", "ivoire", "ivory", "bianco", "blanco", "weiß"]),
  ("Cognac", &["cognac", "caramel", "camel", "tan", "marron clair"]),
  ("Bordeaux", &["bordeaux", "burgundy", "rouge sombre", "marsala"]),
  (
    "Rose_gold",
    &["rose gold", "or rose", "rosé gold", "pink gold", "oro rosa"],
  ),
  (
    "Gris",
    &["gris", "grise", "grey", "gray", "anthracite", "grigio", "grau", "argenté"],
  ),
  ("Rouge", &["rouge", "red", "vermillon", "rosso", "rojo", "rot"]),
];

pub const MATIERES: Entries = &[
  (
    "Cuir",
    &[
      "cuir", "leather", "veau", "agneau", "vachette", "pelle", "cuoio",
      "piel", "leder",
    ],
  ),
  ("Cachemire", &["cachemire", "cashmere", "kaschmir"]),
  ("Soie", &["soie", "silk", "satin", "seta", "seda", "seide"]),
  ("Laine", &["laine", "wool", "mérinos", "tweed", "lana", "wolle"]),
  ("Coton", &["coton", "cotton", "cotone", "algodón", "baumwolle"]),
  (
    "Matières_vegan",
    &["vegan", "végane", "simili cuir", "faux cuir", "cuir végétal"],
  ),
];

pub const SENSIBILITE_MODE: Entries = &[
  ("Tendance", &["tendance", "trendy", "à la mode", "avant-garde", "fashion forward"]),
  ("Intemporel", &["intemporel", "intemporelle", "timeless", "indémodable"]),
  ("Classique", &["sobre", "traditionnel", "traditionnelle", "classic"]),
];

pub const TAILLES: Entries = &[
  ("XS", &["taille xs", "size xs", "extra small"]),
  ("S", &["taille s", "size s", "small"]),
  ("M", &["taille m", "size m", "medium"]),
  ("L", &["taille l", "size l", "large"]),
  ("XL", &["taille xl", "size xl", "extra large"]),
  (
    "Sur_mesure",
    &["sur mesure", "made to measure", "su misura", "maßanfertigung"],
  ),
];

// ─── Projet d'achat ──────────────────────────────────────────────────────────

pub const MOTIF: Entries = &[
  (
    "Cadeau",
    &[
      "cadeau", "offrir", "surprise", "gift", "present for", "regalo",
      "geschenk", "pour ma femme", "pour mon mari",
    ],
  ),
  (
    "Mariage",
    &[
      "mariage", "wedding", "fiançailles", "cérémonie", "noces",
      "matrimonio", "boda", "hochzeit",
    ],
  ),
  (
    "Anniversaire",
    &[
      "anniversaire", "birthday", "compleanno", "cumpleaños", "geburtstag",
    ],
  ),
  (
    "Diplôme",
    &["diplôme", "graduation", "fin d'études", "laurea", "diplom"],
  ),
  ("Naissance", &["naissance", "bébé qui arrive", "baby shower", "nouveau-né"]),
  ("Noël", &["noël", "christmas", "natale", "navidad", "weihnachten"]),
  (
    "Saint_Valentin",
    &["saint-valentin", "saint valentin", "valentine", "san valentino"],
  ),
  (
    "Voyage",
    &["pour le voyage", "pour mon voyage", "valise", "avant de partir"],
  ),
  (
    "Achat_personnel",
    &[
      "pour moi", "me faire plaisir", "je me fais plaisir", "self-gift",
      "per me", "para mí", "für mich",
    ],
  ),
];

pub const TIMING: Entries = &[
  (
    "Urgent",
    &[
      "urgent", "urgence", "vite", "rapidement", "asap", "aujourd'hui",
      "demain", "cette semaine", "immédiatement", "immediately", "tout de suite",
    ],
  ),
  (
    "Date_fixée",
    &[
      "avant le", "pour le", "date précise", "deadline", "le mois prochain",
      "dans deux semaines", "dans 2 semaines",
    ],
  ),
  (
    "Long_terme",
    &[
      "pas pressé", "pas pressée", "no rush", "long terme",
      "je prends mon temps", "dans quelques mois",
    ],
  ),
];

pub const MARQUES: Entries = &[
  (
    "Louis Vuitton",
    &[
      "louis vuitton", "vuitton", "monogram", "damier", "speedy",
      "neverfull", "keepall", "alma", "capucines",
    ],
  ),
  (
    "Dior",
    &["dior", "lady dior", "book tote", "saddle", "miss dior", "sauvage"],
  ),
  ("Loro Piana", &["loro piana", "vicuña", "vicuna"]),
  ("Bulgari", &["bulgari", "bvlgari", "serpenti", "b.zero1"]),
  ("Givenchy", &["givenchy", "antigona", "l'interdit"]),
  ("Tiffany & Co.", &["tiffany", "blue box"]),
  ("Celine", &["celine", "céline", "triomphe"]),
  ("Fendi", &["fendi", "baguette", "peekaboo"]),
  ("Berluti", &["berluti"]),
  ("TAG Heuer", &["tag heuer", "carrera", "monaco chrono", "aquaracer"]),
  ("Hublot", &["hublot", "big bang", "classic fusion"]),
  ("Zenith", &["zenith", "el primero", "defy"]),
  ("Dom Pérignon", &["dom pérignon", "dom perignon"]),
  ("Moët & Chandon", &["moët", "moet", "moët & chandon"]),
  ("Ruinart", &["ruinart"]),
  ("Krug", &["krug"]),
  ("Hennessy", &["hennessy"]),
  ("Chaumet", &["chaumet", "joséphine"]),
  ("Fred", &["force 10"]),
  ("Rimowa", &["rimowa"]),
  ("Loewe", &["loewe", "puzzle bag"]),
];

pub const FREQUENCE_ACHAT: Entries = &[
  (
    "Régulière",
    &[
      "tous les mois", "plusieurs fois par an", "several times a year",
      "souvent chez vous", "monatlich",
    ],
  ),
  (
    "Occasionnelle",
    &["de temps en temps", "une ou deux fois par an", "once or twice a year"],
  ),
  ("Rare", &["très rarement", "exceptionnellement", "presque jamais"]),
];

// ─── Préférences & contraintes ───────────────────────────────────────────────

pub const REGIME: Entries = &[
  (
    "Végane",
    &["végane", "végan", "100% végétal", "plant-based", "vegano", "vegana"],
  ),
  (
    "Végétarien",
    &["végétarien", "végétarienne", "vegetarian", "vegetariano", "vegetarisch"],
  ),
  ("Pescetarien", &["pescétarien", "pescetarian", "pescetariano"]),
  ("Sans_gluten", &["sans gluten", "gluten-free", "coeliaque", "senza glutine"]),
  ("Sans_lactose", &["sans lactose", "lactose-free", "senza lattosio"]),
];

pub const ALLERGIES: Entries = &[
  ("Nickel", &["allergie au nickel", "allergique au nickel", "nickel allergy", "nichel"]),
  ("Latex", &["allergie au latex", "latex allergy"]),
  ("Gluten", &["allergie au gluten", "gluten allergy", "intolérance au gluten"]),
  ("Lactose", &["intolérance au lactose", "lactose intolerant", "lattosio"]),
  (
    "Fruits_à_coque",
    &["fruits à coque", "nut allergy", "allergie aux noix", "noci"],
  ),
  ("Parfums", &["allergique aux parfums", "fragrance allergy", "sensible aux parfums"]),
];

pub const VALEURS: Entries = &[
  (
    "Éthique_durable",
    &[
      "éthique", "éco-responsable", "durable", "sustainable", "commerce équitable",
      "fair trade", "cruelty-free", "sans fourrure",
    ],
  ),
  (
    "Qualité_savoir_faire",
    &[
      "savoir-faire", "artisanat", "fait main", "craftsmanship", "handmade",
      "made in france", "made in italy",
    ],
  ),
  (
    "Exclusivité",
    &[
      "exclusif", "exclusive", "série limitée", "édition limitée",
      "limited edition", "pièce rare",
    ],
  ),
];

// ─── Suivi CRM ───────────────────────────────────────────────────────────────

pub const ACTIONS: Entries = &[
  ("Rappeler", &["rappeler", "rappelez-moi", "recontacter", "call back", "call me back"]),
  ("Confirmer", &["confirmer", "confirmation", "confirm", "valider"]),
  ("Relancer", &["relancer", "relance", "follow up", "follow-up"]),
  (
    "Preview_privée",
    &[
      "preview privée", "avant-première", "présentation privée",
      "private preview", "rendez-vous privé",
    ],
  ),
];

pub const ECHEANCES: Entries = &[
  ("M+1", &["dans un mois", "le mois prochain", "in one month", "next month"]),
  ("M+2", &["dans deux mois", "dans 2 mois", "in two months"]),
  (
    "M+3+",
    &[
      "dans trois mois", "dans 3 mois", "in three months", "plus de 3 mois",
      "le trimestre prochain",
    ],
  ),
];

pub const CANAUX: Entries = &[
  ("Email", &["email", "e-mail", "par mail", "courriel", "por email"]),
  (
    "Téléphone",
    &["par téléphone", "appelez-moi", "un appel", "by phone", "per telefono"],
  ),
  ("WhatsApp", &["whatsapp", "whats app", "par whatsapp"]),
  ("SMS", &["par sms", "texto", "text message", "per sms"]),
];
