pub const SCHEMA: &str = r#"
-- Catalog entries. Populate is a destructive full replace, so bundle_id
-- carries no uniqueness constraint.
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    publisher_id TEXT,
    name TEXT,
    platform TEXT,       -- lowercased before storage
    store_id TEXT,
    bundle_id TEXT,
    app_version TEXT,
    is_published INTEGER,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_games_platform ON games(platform);
CREATE INDEX IF NOT EXISTS idx_games_name ON games(name);
"#;
