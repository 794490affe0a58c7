//! SQL schema for the Dossier SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS experts (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name      TEXT NOT NULL,
    place_of_birth TEXT NOT NULL,
    date_of_birth  TEXT NOT NULL,   -- YYYY-MM-DD
    address        TEXT NOT NULL,
    email          TEXT NOT NULL,
    phone_number   TEXT NOT NULL,
    created_at     TEXT NOT NULL,   -- RFC 3339 UTC, microsecond precision
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS education (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id       INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    level           TEXT NOT NULL,
    major           TEXT NOT NULL,
    institution     TEXT NOT NULL,
    graduation_year INTEGER NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS work_experience (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id       INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    company_name    TEXT NOT NULL,
    position        TEXT NOT NULL,
    start_date      TEXT NOT NULL,
    end_date        TEXT,            -- NULL while still employed
    job_description TEXT NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS skills (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id         INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    skill_name        TEXT NOT NULL,
    proficiency_level TEXT NOT NULL
        CHECK (proficiency_level IN ('beginner', 'intermediate', 'advanced', 'expert')),
    created_at        TEXT NOT NULL,
    UNIQUE (expert_id, skill_name)
);

CREATE TABLE IF NOT EXISTS certifications (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id          INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    certification_name TEXT NOT NULL,
    issuing_body       TEXT NOT NULL,
    year_obtained      INTEGER NOT NULL,
    expiry_date        TEXT,
    created_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS projects (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id       INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    project_name    TEXT NOT NULL,
    role_in_project TEXT NOT NULL,
    start_date      TEXT NOT NULL,
    end_date        TEXT,            -- NULL while ongoing
    description     TEXT NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS documents (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id     INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    document_name TEXT NOT NULL,
    document_type TEXT NOT NULL
        CHECK (document_type IN ('cv', 'certificate', 'portfolio', 'other')),
    file_path     TEXT NOT NULL,
    file_size     INTEGER NOT NULL,
    mime_type     TEXT NOT NULL,
    uploaded_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS experts_created_idx        ON experts(created_at);
CREATE INDEX IF NOT EXISTS education_expert_idx       ON education(expert_id);
CREATE INDEX IF NOT EXISTS work_experience_expert_idx ON work_experience(expert_id);
CREATE INDEX IF NOT EXISTS certifications_expert_idx  ON certifications(expert_id);
CREATE INDEX IF NOT EXISTS projects_expert_idx        ON projects(expert_id);
CREATE INDEX IF NOT EXISTS documents_expert_idx       ON documents(expert_id);

PRAGMA user_version = 1;
";
