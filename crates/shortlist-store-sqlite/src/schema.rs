//! SQL schema for the Shortlist SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.
//!
//! The directory tables (`lecturers`, `candidates`, `courses`, `credentials`,
//! `skills`, `candidate_skills`, `prior_roles`) are shared with the
//! surrounding system. The review engine owns `applications`, `selections`
//! and `comments`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS lecturers (
    lecturer_id INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    surname     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS candidates (
    candidate_id INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    surname      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS courses (
    course_id   INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    lecturer_id INTEGER NOT NULL REFERENCES lecturers(lecturer_id)
);

-- One credential per (candidate, degree); the first declared level sticks.
CREATE TABLE IF NOT EXISTS credentials (
    candidate_id INTEGER NOT NULL
                 REFERENCES candidates(candidate_id) ON DELETE CASCADE,
    degree       TEXT NOT NULL,
    level        TEXT NOT NULL,
    PRIMARY KEY (candidate_id, degree)
);

CREATE TABLE IF NOT EXISTS skills (
    skill_id INTEGER PRIMARY KEY,
    name     TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS candidate_skills (
    candidate_id INTEGER NOT NULL
                 REFERENCES candidates(candidate_id) ON DELETE CASCADE,
    skill_id     INTEGER NOT NULL REFERENCES skills(skill_id) ON DELETE CASCADE,
    PRIMARY KEY (candidate_id, skill_id)
);

CREATE TABLE IF NOT EXISTS prior_roles (
    candidate_id INTEGER NOT NULL
                 REFERENCES candidates(candidate_id) ON DELETE CASCADE,
    course_id    INTEGER NOT NULL REFERENCES courses(course_id) ON DELETE CASCADE,
    PRIMARY KEY (candidate_id, course_id)
);

-- rank is unique across the whole table, not per course.
CREATE TABLE IF NOT EXISTS applications (
    application_id INTEGER PRIMARY KEY AUTOINCREMENT,
    candidate_id   INTEGER NOT NULL
                   REFERENCES candidates(candidate_id) ON DELETE CASCADE,
    course_id      INTEGER NOT NULL REFERENCES courses(course_id) ON DELETE CASCADE,
    availability   TEXT NOT NULL CHECK (availability IN ('part_time', 'full_time')),
    role           TEXT NOT NULL CHECK (role IN ('lab_assistant', 'tutor')),
    rank           INTEGER NOT NULL UNIQUE,
    submitted_at   TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    UNIQUE (candidate_id, course_id, role)
);

-- Existence of a row means \"selected\".
CREATE TABLE IF NOT EXISTS selections (
    lecturer_id    INTEGER NOT NULL
                   REFERENCES lecturers(lecturer_id) ON DELETE CASCADE,
    application_id INTEGER NOT NULL
                   REFERENCES applications(application_id) ON DELETE CASCADE,
    PRIMARY KEY (lecturer_id, application_id)
);

CREATE TABLE IF NOT EXISTS comments (
    lecturer_id    INTEGER NOT NULL
                   REFERENCES lecturers(lecturer_id) ON DELETE CASCADE,
    application_id INTEGER NOT NULL
                   REFERENCES applications(application_id) ON DELETE CASCADE,
    text           TEXT NOT NULL,
    updated_at     TEXT NOT NULL,
    PRIMARY KEY (lecturer_id, application_id)
);

CREATE INDEX IF NOT EXISTS courses_lecturer_idx      ON courses(lecturer_id);
CREATE INDEX IF NOT EXISTS applications_course_idx    ON applications(course_id);
CREATE INDEX IF NOT EXISTS applications_candidate_idx ON applications(candidate_id);
CREATE INDEX IF NOT EXISTS selections_application_idx ON selections(application_id);
CREATE INDEX IF NOT EXISTS comments_application_idx   ON comments(application_id);

PRAGMA user_version = 1;
";
