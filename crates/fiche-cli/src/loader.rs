//! Input loading: CSV, JSON records, JSON-lines, and plain text, resolved
//! into the canonical record shape through a priority list of header
//! aliases.
//!
//! The loader fails fast on unparseable files or when every text column is
//! missing; per-row extraction problems are the ingester's business, not
//! the loader's. Empty transcripts are kept (the extractor skips them and
//! the report counts the warning).

use std::path::Path;

use anyhow::{Context as _, bail};

/// One canonical input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
  pub client_id:     String,
  pub date:          Option<String>,
  pub duration:      Option<String>,
  pub language:      String,
  pub length:        String,
  pub transcription: String,
  /// 1-based position in the source file, for source refs and reports.
  pub row:           usize,
}

// Alias priority lists; first present column wins.
const ID_ALIASES: &[&str] = &["ID", "client_id", "customer_id", "uuid", "id"];
const DATE_ALIASES: &[&str] = &["Date", "date", "source_date", "created_at"];
const DURATION_ALIASES: &[&str] = &["Duration", "duration", "durée", "duree"];
const LANGUAGE_ALIASES: &[&str] = &["Language", "language", "lang", "langue"];
const LENGTH_ALIASES: &[&str] = &["Length", "length", "taille"];
const TRANSCRIPTION_ALIASES: &[&str] = &[
  "Transcription", "transcription", "transcript", "text", "texte", "notes",
  "message",
];

const DEFAULT_LANGUAGE: &str = "FR";
const DEFAULT_LENGTH: &str = "medium";

fn default_id(row: usize) -> String { format!("ROW-{row}") }

/// Load any supported file into canonical records.
pub fn load(path: &Path) -> anyhow::Result<Vec<InputRecord>> {
  let extension = path
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase)
    .unwrap_or_default();

  match extension.as_str() {
    "csv" => load_csv(path),
    "json" => load_json(path),
    "jsonl" | "ndjson" => load_jsonl(path),
    "txt" | "text" => load_text(path),
    "xlsx" | "xls" => bail!(
      "spreadsheet input is not supported: export {} as CSV first",
      path.display()
    ),
    other => bail!("unsupported input format: {other:?}"),
  }
}

// ─── CSV ─────────────────────────────────────────────────────────────────────

fn resolve<'a>(headers: &'a [String], aliases: &[&str]) -> Option<usize> {
  aliases
    .iter()
    .find_map(|alias| headers.iter().position(|h| h.trim() == *alias))
}

fn load_csv(path: &Path) -> anyhow::Result<Vec<InputRecord>> {
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .from_path(path)
    .with_context(|| format!("cannot open {}", path.display()))?;

  let headers: Vec<String> =
    reader.headers()?.iter().map(str::to_string).collect();

  let id_col = resolve(&headers, ID_ALIASES);
  let date_col = resolve(&headers, DATE_ALIASES);
  let duration_col = resolve(&headers, DURATION_ALIASES);
  let language_col = resolve(&headers, LANGUAGE_ALIASES);
  let length_col = resolve(&headers, LENGTH_ALIASES);
  let Some(text_col) = resolve(&headers, TRANSCRIPTION_ALIASES) else {
    bail!(
      "no transcription column found in {} (looked for {:?})",
      path.display(),
      TRANSCRIPTION_ALIASES
    );
  };

  let mut records = Vec::new();
  for (index, row) in reader.records().enumerate() {
    let row = row.with_context(|| format!("row {} of {}", index + 1, path.display()))?;
    let get = |col: Option<usize>| {
      col.and_then(|c| row.get(c)).map(str::trim).filter(|v| !v.is_empty())
    };

    records.push(InputRecord {
      client_id:     get(id_col)
        .map(str::to_string)
        .unwrap_or_else(|| default_id(index + 1)),
      date:          get(date_col).map(str::to_string),
      duration:      get(duration_col).map(str::to_string),
      language:      get(language_col)
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
      length:        get(length_col)
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_LENGTH.to_string()),
      transcription: get(Some(text_col)).map(str::to_string).unwrap_or_default(),
      row:           index + 1,
    });
  }
  Ok(records)
}

// ─── JSON ────────────────────────────────────────────────────────────────────

fn record_from_value(
  value: &serde_json::Value,
  row: usize,
) -> anyhow::Result<InputRecord> {
  let object = value
    .as_object()
    .with_context(|| format!("record {row} is not a JSON object"))?;

  let pick = |aliases: &[&str]| {
    aliases.iter().find_map(|alias| {
      object.get(*alias).and_then(|v| match v {
        serde_json::Value::String(s) => {
          let s = s.trim();
          (!s.is_empty()).then(|| s.to_string())
        }
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
      })
    })
  };

  Ok(InputRecord {
    client_id:     pick(ID_ALIASES).unwrap_or_else(|| default_id(row)),
    date:          pick(DATE_ALIASES),
    duration:      pick(DURATION_ALIASES),
    language:      pick(LANGUAGE_ALIASES)
      .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
    length:        pick(LENGTH_ALIASES)
      .unwrap_or_else(|| DEFAULT_LENGTH.to_string()),
    transcription: pick(TRANSCRIPTION_ALIASES).unwrap_or_default(),
    row,
  })
}

fn load_json(path: &Path) -> anyhow::Result<Vec<InputRecord>> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("cannot read {}", path.display()))?;
  let value: serde_json::Value = serde_json::from_str(&raw)
    .with_context(|| format!("invalid JSON in {}", path.display()))?;

  let items = match value {
    serde_json::Value::Array(items) => items,
    object @ serde_json::Value::Object(_) => vec![object],
    _ => bail!("{} must contain a JSON array or object", path.display()),
  };

  items
    .iter()
    .enumerate()
    .map(|(i, v)| record_from_value(v, i + 1))
    .collect()
}

fn load_jsonl(path: &Path) -> anyhow::Result<Vec<InputRecord>> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("cannot read {}", path.display()))?;
  raw
    .lines()
    .filter(|line| !line.trim().is_empty())
    .enumerate()
    .map(|(i, line)| {
      let value: serde_json::Value = serde_json::from_str(line)
        .with_context(|| format!("invalid JSON on line {}", i + 1))?;
      record_from_value(&value, i + 1)
    })
    .collect()
}

// ─── Plain text ──────────────────────────────────────────────────────────────

/// A text file is one transcript; the stem becomes the client id.
fn load_text(path: &Path) -> anyhow::Result<Vec<InputRecord>> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("cannot read {}", path.display()))?;
  let client_id = path
    .file_stem()
    .and_then(|s| s.to_str())
    .map(str::to_string)
    .unwrap_or_else(|| default_id(1));

  Ok(vec![InputRecord {
    client_id,
    date: None,
    duration: None,
    language: DEFAULT_LANGUAGE.to_string(),
    length: DEFAULT_LENGTH.to_string(),
    transcription: raw.trim().to_string(),
    row: 1,
  }])
}

// ─── Tests ───────────────────────────────────────────────────────────────────
