//! SQL schema for the Fiche SQLite store.
//!
//! Executed at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS clients (
    client_id  TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Snapshots are append-only; a (client_id, profile_version) collision
-- replaces the row atomically.
CREATE TABLE IF NOT EXISTS client_profiles (
    profile_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id       TEXT NOT NULL REFERENCES clients(client_id),
    profile_version TEXT NOT NULL,
    profile_json    TEXT NOT NULL,
    generated_at    TEXT NOT NULL,
    source_batch_id TEXT,
    UNIQUE (client_id, profile_version)
);

-- Identical raw content ingested twice collapses to one row.
CREATE TABLE IF NOT EXISTS sources (
    source_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    source_type TEXT NOT NULL,   -- 'csv_row' | 'voice_recording' | 'manual' | 'legacy'
    source_ref  TEXT NOT NULL,
    source_hash TEXT NOT NULL,   -- SHA-256 hex of raw content
    ingested_at TEXT NOT NULL,
    UNIQUE (source_type, source_ref, source_hash)
);

CREATE TABLE IF NOT EXISTS transcripts (
    transcript_id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id     TEXT NOT NULL REFERENCES clients(client_id),
    source_id     INTEGER NOT NULL REFERENCES sources(source_id),
    language      TEXT,
    duration      TEXT,
    text_raw      TEXT NOT NULL,
    UNIQUE (client_id, source_id)
);

CREATE TABLE IF NOT EXISTS tag_rules (
    rule_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    rule_name       TEXT NOT NULL,
    rule_version    TEXT NOT NULL,
    rule_definition TEXT NOT NULL,
    is_active       INTEGER NOT NULL,
    created_at      TEXT NOT NULL,
    UNIQUE (rule_name, rule_version)
);

-- Catalogued taxonomy entries; recurring values are re-used.
CREATE TABLE IF NOT EXISTS tags (
    tag_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    category    TEXT NOT NULL,
    subcategory TEXT,            -- '/'-joined path below the category
    tag_value   TEXT NOT NULL,
    tag_version TEXT NOT NULL,
    UNIQUE (category, subcategory, tag_value, tag_version)
);

CREATE TABLE IF NOT EXISTS taggings (
    tagging_id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id  TEXT NOT NULL REFERENCES clients(client_id),
    tag_id     INTEGER NOT NULL REFERENCES tags(tag_id),
    rule_id    INTEGER NOT NULL REFERENCES tag_rules(rule_id),
    source_id  INTEGER NOT NULL REFERENCES sources(source_id),
    score      REAL NOT NULL,
    evidence   TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS stats_cache (
    stat_name   TEXT PRIMARY KEY,
    stat_value  TEXT NOT NULL,
    computed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_clients_updated_at   ON clients(updated_at);
CREATE INDEX IF NOT EXISTS idx_profiles_client_id   ON client_profiles(client_id);
CREATE INDEX IF NOT EXISTS idx_profiles_generated_at ON client_profiles(generated_at);
CREATE INDEX IF NOT EXISTS idx_sources_type_ref     ON sources(source_type, source_ref);
CREATE INDEX IF NOT EXISTS idx_rules_active         ON tag_rules(is_active);
CREATE INDEX IF NOT EXISTS idx_tags_category        ON tags(category);
CREATE INDEX IF NOT EXISTS idx_taggings_client_id   ON taggings(client_id);
CREATE INDEX IF NOT EXISTS idx_taggings_tag_id      ON taggings(tag_id);
CREATE INDEX IF NOT EXISTS idx_taggings_rule_id     ON taggings(rule_id);
";
