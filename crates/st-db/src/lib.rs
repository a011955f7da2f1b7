//! Storage layer for the study tracker.
//!
//! Provides persistence for subjects, study sessions, and goals using
//! `rusqlite`. The metrics engine in `st-core` never touches storage
//! directly; this crate implements the queries each engine operation needs
//! (exact-date match for the today view and streak walk, trailing-window
//! lower bound for the weekly view) and hands back typed records.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. For multi-threaded access use a `Mutex<Database>` or separate
//! instances per thread.
//!
//! # Schema
//!
//! Timestamps are stored as TEXT in ISO 8601 format (e.g.,
//! `2024-01-15T10:30:00Z`), always UTC, so lexicographic ordering matches
//! chronological ordering. `session_date` holds a midnight-truncated
//! timestamp and is queried by exact string equality.
//!
//! `study_sessions.subject_id` carries no foreign key: deleting a subject
//! leaves its sessions in place, and per-subject views skip the orphans.

use std::path::Path;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use uuid::Uuid;

use st_core::{
    DailySessions, Goal, GoalId, SessionId, StudySession, Subject, SubjectId, UserId,
    ValidationError, day_floor,
};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for record {record_id}: {timestamp}")]
    TimestampParse {
        record_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored record failed core-type validation (e.g., an empty ID).
    #[error("invalid stored record {record_id}")]
    InvalidRecord {
        record_id: String,
        #[source]
        source: ValidationError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS subjects (
                id TEXT PRIMARY KEY,
                owner_user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                color TEXT NOT NULL,
                icon TEXT NOT NULL,
                weekly_goal_hours REAL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_subjects_owner ON subjects(owner_user_id);

            -- session_date: midnight-truncated creation day, matched by exact equality
            -- subject_id: intentionally unconstrained (no cascade on subject deletion)
            CREATE TABLE IF NOT EXISTS study_sessions (
                id TEXT PRIMARY KEY,
                owner_user_id TEXT NOT NULL,
                subject_id TEXT NOT NULL,
                start_time TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                session_date TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_owner_date
                ON study_sessions(owner_user_id, session_date);
            CREATE INDEX IF NOT EXISTS idx_sessions_owner_start
                ON study_sessions(owner_user_id, start_time);

            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                owner_user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                target_date TEXT NOT NULL,
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_goals_owner ON goals(owner_user_id);
            ",
        )?;
        Ok(())
    }

    // ========== Subjects ==========

    /// Creates a subject owned by `owner` and returns the stored record.
    pub fn create_subject(
        &self,
        owner: &UserId,
        name: &str,
        color: &str,
        icon: &str,
        weekly_goal_hours: Option<f64>,
    ) -> Result<Subject, StoreError> {
        self.create_subject_at(owner, name, color, icon, weekly_goal_hours, Utc::now())
    }

    fn create_subject_at(
        &self,
        owner: &UserId,
        name: &str,
        color: &str,
        icon: &str,
        weekly_goal_hours: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<Subject, StoreError> {
        let id = parse_subject_id(Uuid::new_v4().to_string())?;
        self.conn.execute(
            "
            INSERT INTO subjects (id, owner_user_id, name, color, icon, weekly_goal_hours, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                id.as_str(),
                owner.as_str(),
                name,
                color,
                icon,
                weekly_goal_hours,
                format_timestamp(now),
            ],
        )?;
        tracing::debug!(subject = %id, owner = %owner, "subject created");
        Ok(Subject {
            id,
            owner: owner.clone(),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            weekly_goal_hours,
            created_at: now,
        })
    }

    /// Lists a user's subjects in creation order.
    pub fn subjects_for_user(&self, owner: &UserId) -> Result<Vec<Subject>, StoreError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, owner_user_id, name, color, icon, weekly_goal_hours, created_at
            FROM subjects
            WHERE owner_user_id = ?
            ORDER BY created_at ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([owner.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<f64>>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut subjects = Vec::new();
        for row in rows {
            let (id, owner, name, color, icon, weekly_goal_hours, created_at) = row?;
            subjects.push(Subject {
                created_at: parse_timestamp(&id, &created_at)?,
                id: parse_subject_id(id)?,
                owner: parse_user_id(owner)?,
                name,
                color,
                icon,
                weekly_goal_hours,
            });
        }
        Ok(subjects)
    }

    /// Deletes a subject owned by `owner`. Returns whether a row was removed.
    ///
    /// The subject's sessions are NOT deleted; they remain in the log and
    /// drop out of per-subject aggregates.
    pub fn delete_subject(&self, owner: &UserId, id: &SubjectId) -> Result<bool, StoreError> {
        let deleted = self.conn.execute(
            "DELETE FROM subjects WHERE id = ? AND owner_user_id = ?",
            params![id.as_str(), owner.as_str()],
        )?;
        Ok(deleted > 0)
    }

    /// Looks up one subject by ID, scoped to `owner`.
    pub fn subject(&self, owner: &UserId, id: &SubjectId) -> Result<Option<Subject>, StoreError> {
        let row = self
            .conn
            .query_row(
                "
                SELECT id, owner_user_id, name, color, icon, weekly_goal_hours, created_at
                FROM subjects
                WHERE id = ? AND owner_user_id = ?
                ",
                params![id.as_str(), owner.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, Option<f64>>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((id, owner, name, color, icon, weekly_goal_hours, created_at)) => {
                Ok(Some(Subject {
                    created_at: parse_timestamp(&id, &created_at)?,
                    id: parse_subject_id(id)?,
                    owner: parse_user_id(owner)?,
                    name,
                    color,
                    icon,
                    weekly_goal_hours,
                }))
            }
        }
    }

    // ========== Study sessions ==========

    /// Appends one immutable study session for `owner`.
    ///
    /// `start_time` and `created_at` are stamped with the current instant
    /// and `session_date` is that instant truncated to midnight UTC — the
    /// calendar day the session is filed under is always the day it was
    /// *recorded*, whatever day the studying notionally belonged to.
    pub fn log_session(
        &self,
        owner: &UserId,
        subject_id: &SubjectId,
        duration_minutes: i64,
    ) -> Result<StudySession, StoreError> {
        self.log_session_at(owner, subject_id, duration_minutes, Utc::now())
    }

    fn log_session_at(
        &self,
        owner: &UserId,
        subject_id: &SubjectId,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<StudySession, StoreError> {
        let id = parse_session_id(Uuid::new_v4().to_string())?;
        let session_date = day_floor(now);
        self.conn.execute(
            "
            INSERT INTO study_sessions
            (id, owner_user_id, subject_id, start_time, duration_minutes, session_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                id.as_str(),
                owner.as_str(),
                subject_id.as_str(),
                format_timestamp(now),
                duration_minutes,
                format_timestamp(session_date),
                format_timestamp(now),
            ],
        )?;
        tracing::debug!(
            session = %id,
            subject = %subject_id,
            duration_minutes,
            "session logged"
        );
        Ok(StudySession {
            id,
            owner: owner.clone(),
            subject_id: subject_id.clone(),
            start_time: now,
            duration_minutes,
            session_date,
            created_at: now,
        })
    }

    /// Sessions filed under today's date (exact `session_date` match).
    pub fn today_sessions(
        &self,
        owner: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<StudySession>, StoreError> {
        self.sessions_on_date(owner, day_floor(now))
    }

    /// Sessions whose stored `session_date` equals `date` exactly.
    ///
    /// `date` should be a midnight-UTC instant; anything else matches no
    /// rows, since `session_date` is always midnight-truncated at write time.
    pub fn sessions_on_date(
        &self,
        owner: &UserId,
        date: DateTime<Utc>,
    ) -> Result<Vec<StudySession>, StoreError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, owner_user_id, subject_id, start_time, duration_minutes, session_date, created_at
            FROM study_sessions
            WHERE owner_user_id = ? AND session_date = ?
            ORDER BY start_time ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(
            params![owner.as_str(), format_timestamp(date)],
            session_row,
        )?;
        collect_sessions(rows)
    }

    /// Sessions from the trailing week, measured from `start_time`.
    ///
    /// The lower bound is midnight seven days before `now` (inclusive) and
    /// there is deliberately no upper bound, so sessions recorded with a
    /// future `start_time` are included too.
    pub fn weekly_sessions(
        &self,
        owner: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<StudySession>, StoreError> {
        let week_ago = day_floor(now) - Duration::days(7);
        let mut stmt = self.conn.prepare(
            "
            SELECT id, owner_user_id, subject_id, start_time, duration_minutes, session_date, created_at
            FROM study_sessions
            WHERE owner_user_id = ? AND start_time >= ?
            ORDER BY start_time ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(
            params![owner.as_str(), format_timestamp(week_ago)],
            session_row,
        )?;
        collect_sessions(rows)
    }

    // ========== Goals ==========

    /// Creates a goal owned by `owner` and returns the stored record.
    pub fn create_goal(
        &self,
        owner: &UserId,
        title: &str,
        description: Option<&str>,
        target_date: DateTime<Utc>,
    ) -> Result<Goal, StoreError> {
        self.create_goal_at(owner, title, description, target_date, Utc::now())
    }

    fn create_goal_at(
        &self,
        owner: &UserId,
        title: &str,
        description: Option<&str>,
        target_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Goal, StoreError> {
        let id = parse_goal_id(Uuid::new_v4().to_string())?;
        self.conn.execute(
            "
            INSERT INTO goals (id, owner_user_id, title, description, target_date, is_completed, created_at)
            VALUES (?, ?, ?, ?, ?, 0, ?)
            ",
            params![
                id.as_str(),
                owner.as_str(),
                title,
                description,
                format_timestamp(target_date),
                format_timestamp(now),
            ],
        )?;
        Ok(Goal {
            id,
            owner: owner.clone(),
            title: title.to_string(),
            description: description.map(String::from),
            target_date,
            is_completed: false,
            created_at: now,
        })
    }

    /// Lists a user's goals in creation order.
    pub fn goals_for_user(&self, owner: &UserId) -> Result<Vec<Goal>, StoreError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, owner_user_id, title, description, target_date, is_completed, created_at
            FROM goals
            WHERE owner_user_id = ?
            ORDER BY created_at ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([owner.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, bool>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut goals = Vec::new();
        for row in rows {
            let (id, owner, title, description, target_date, is_completed, created_at) = row?;
            goals.push(Goal {
                target_date: parse_timestamp(&id, &target_date)?,
                created_at: parse_timestamp(&id, &created_at)?,
                id: parse_goal_id(id)?,
                owner: parse_user_id(owner)?,
                title,
                description,
                is_completed,
            });
        }
        Ok(goals)
    }

    /// Marks a goal completed. Returns whether a row was updated.
    pub fn complete_goal(&self, owner: &UserId, id: &GoalId) -> Result<bool, StoreError> {
        let updated = self.conn.execute(
            "UPDATE goals SET is_completed = 1 WHERE id = ? AND owner_user_id = ?",
            params![id.as_str(), owner.as_str()],
        )?;
        Ok(updated > 0)
    }
}

/// Per-day duration lookup for the streak walk.
impl DailySessions for Database {
    type Error = StoreError;

    fn minutes_on(&self, user: &UserId, date: DateTime<Utc>) -> Result<Vec<i64>, StoreError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT duration_minutes
            FROM study_sessions
            WHERE owner_user_id = ? AND session_date = ?
            ",
        )?;
        let rows = stmt.query_map(params![user.as_str(), format_timestamp(date)], |row| {
            row.get::<_, i64>(0)
        })?;
        let mut minutes = Vec::new();
        for row in rows {
            minutes.push(row?);
        }
        Ok(minutes)
    }
}

// ========== Row helpers ==========

type RawSessionRow = (String, String, String, String, i64, String, String);

fn session_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSessionRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn collect_sessions<I>(rows: I) -> Result<Vec<StudySession>, StoreError>
where
    I: Iterator<Item = rusqlite::Result<RawSessionRow>>,
{
    let mut sessions = Vec::new();
    for row in rows {
        let (id, owner, subject_id, start_time, duration_minutes, session_date, created_at) = row?;
        sessions.push(StudySession {
            start_time: parse_timestamp(&id, &start_time)?,
            session_date: parse_timestamp(&id, &session_date)?,
            created_at: parse_timestamp(&id, &created_at)?,
            id: parse_session_id(id)?,
            owner: parse_user_id(owner)?,
            subject_id: parse_subject_id(subject_id)?,
            duration_minutes,
        });
    }
    Ok(sessions)
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(record_id: &str, value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| StoreError::TimestampParse {
            record_id: record_id.to_string(),
            timestamp: value.to_string(),
            source,
        })
}

fn parse_user_id(raw: String) -> Result<UserId, StoreError> {
    UserId::new(raw.clone()).map_err(|source| StoreError::InvalidRecord {
        record_id: raw,
        source,
    })
}

fn parse_subject_id(raw: String) -> Result<SubjectId, StoreError> {
    SubjectId::new(raw.clone()).map_err(|source| StoreError::InvalidRecord {
        record_id: raw,
        source,
    })
}

fn parse_session_id(raw: String) -> Result<SessionId, StoreError> {
    SessionId::new(raw.clone()).map_err(|source| StoreError::InvalidRecord {
        record_id: raw,
        source,
    })
}

fn parse_goal_id(raw: String) -> Result<GoalId, StoreError> {
    GoalId::new(raw.clone()).map_err(|source| StoreError::InvalidRecord {
        record_id: raw,
        source,
    })
}
