pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS source_profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    handle TEXT UNIQUE,
    title TEXT,
    member_count INTEGER DEFAULT 0,
    geo_ratio REAL DEFAULT 0,
    risk_score REAL DEFAULT 0,
    discovery_method TEXT,
    description TEXT,
    kind TEXT DEFAULT 'unknown',
    last_checked TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP,
    is_active BOOLEAN DEFAULT TRUE
);

CREATE TABLE IF NOT EXISTS flagged_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_handle TEXT,
    text TEXT,
    has_drug_signal BOOLEAN,
    has_geo_signal BOOLEAN,
    timestamp TEXT
);

CREATE INDEX IF NOT EXISTS idx_profiles_risk ON source_profiles(risk_score);
CREATE INDEX IF NOT EXISTS idx_messages_source ON flagged_messages(source_handle);
";
