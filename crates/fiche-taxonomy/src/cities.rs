//! Geographic vocabulary: region → city → surface forms.
//!
//! Nested dictionaries yield a dict in the extracted tag set
//! (`localisation/<region>` → list of cities), unlike the flat tables which
//! yield lists.

use crate::scan::{Entries, find_word};

/// Region key → city dictionary.
pub const REGIONS: &[(&str, Entries)] = &[
  (
    "europe",
    &[
      ("Paris", &["paris", "parisien", "parisienne"]),
      ("Lyon", &["lyon", "lyonnais", "lyonnaise"]),
      ("Berlin", &["berlin", "berlinois"]),
      ("Munich", &["munich", "münchen"]),
      ("Milan", &["milan", "milano", "milanais"]),
      ("Rome", &["rome", "roma"]),
      ("Madrid", &["madrid", "madrilène"]),
      ("Barcelona", &["barcelona", "barcelone"]),
      ("London", &["london", "londres", "londonien"]),
      ("Genève", &["genève", "geneva"]),
      ("Zurich", &["zurich", "zürich"]),
      ("Monaco", &["monaco", "monte-carlo", "monte carlo"]),
      ("Amsterdam", &["amsterdam"]),
      ("Bruxelles", &["bruxelles", "brussels"]),
    ],
  ),
  (
    "amerique",
    &[
      ("New_York", &["new york", "nyc", "manhattan", "brooklyn"]),
      ("Los_Angeles", &["los angeles", "hollywood", "beverly hills"]),
      ("Miami", &["miami", "south beach"]),
      ("San_Francisco", &["san francisco", "bay area"]),
      ("Toronto", &["toronto"]),
      ("Montreal", &["montréal", "montreal"]),
    ],
  ),
  (
    "moyen_orient_asie",
    &[
      ("Dubai", &["dubai", "dubaï"]),
      ("Abu_Dhabi", &["abu dhabi", "abou dhabi"]),
      ("Doha", &["doha"]),
      ("Tokyo", &["tokyo", "tōkyō"]),
      ("Hong_Kong", &["hong kong", "hongkong"]),
      ("Singapore", &["singapore", "singapour"]),
      ("Shanghai", &["shanghai", "shanghaï"]),
      ("Seoul", &["seoul", "séoul"]),
    ],
  ),
  (
    "afrique",
    &[
      ("Casablanca", &["casablanca"]),
      ("Marrakech", &["marrakech", "marrakesh"]),
      ("Tunis", &["tunis"]),
      ("Le_Caire", &["le caire", "cairo"]),
      ("Johannesburg", &["johannesburg"]),
      ("Lagos", &["lagos"]),
      ("Nairobi", &["nairobi"]),
    ],
  ),
];

/// One detected city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityMatch {
  pub region:  &'static str,
  pub city:    &'static str,
  pub surface: &'static str,
  pub offset:  usize,
}

/// Scan case-folded text for every known city, region order preserved.
pub fn scan_cities(folded: &str) -> Vec<CityMatch> {
  let mut found = Vec::new();
  for (region, cities) in REGIONS {
    for (city, surfaces) in *cities {
      for surface in *surfaces {
        if let Some(offset) = find_word(folded, surface) {
          found.push(CityMatch { region, city, surface, offset });
          break;
        }
      }
    }
  }
  found
}
