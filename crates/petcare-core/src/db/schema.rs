//! SQLite schema definition.

/// Complete relational schema for the clinic core.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Access Groups (role table)
-- ============================================================================

CREATE TABLE IF NOT EXISTS access_groups (
    group_id TEXT PRIMARY KEY,
    role TEXT NOT NULL UNIQUE CHECK (role IN ('ADM', 'VET', 'CLI')),
    label TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Fixed role set, seeded once
INSERT OR IGNORE INTO access_groups (group_id, role, label) VALUES
    ('grp-admin', 'ADM', 'Administrador'),
    ('grp-vet',   'VET', 'Veterinario'),
    ('grp-tutor', 'CLI', 'Cliente');

-- ============================================================================
-- User Accounts
-- ============================================================================

CREATE TABLE IF NOT EXISTS user_accounts (
    account_id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    salt TEXT NOT NULL,
    display_name TEXT NOT NULL,
    group_id TEXT NOT NULL REFERENCES access_groups(group_id),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_accounts_group ON user_accounts(group_id);

-- ============================================================================
-- Clients (tax id -> internal patient key)
-- ============================================================================

CREATE TABLE IF NOT EXISTS clients (
    tax_id TEXT PRIMARY KEY CHECK (length(tax_id) = 11),
    patient_id TEXT NOT NULL UNIQUE,
    pet_name TEXT NOT NULL,
    account_id TEXT REFERENCES user_accounts(account_id),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_clients_account ON clients(account_id);
"#;
