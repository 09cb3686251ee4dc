use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::date;
use crate::models::Habit;

const ONBOARDING_KEY: &str = "has_completed_onboarding";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path` and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Open an in-memory database, used by tests and throwaway sessions
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS habits (
                id               TEXT PRIMARY KEY,
                name             TEXT NOT NULL,
                emoji            TEXT NOT NULL DEFAULT '',
                duration         INTEGER NOT NULL DEFAULT 1,
                reminder_enabled INTEGER NOT NULL DEFAULT 0,
                reminder_time    TEXT,
                streak           INTEGER NOT NULL DEFAULT 0,
                longest_streak   INTEGER NOT NULL DEFAULT 0,
                completed_today  INTEGER NOT NULL DEFAULT 0,
                last_completed   TEXT,
                position         INTEGER NOT NULL DEFAULT 0,
                created_at       TEXT NOT NULL,
                updated_at       TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key              TEXT PRIMARY KEY,
                value            TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_habits_position ON habits(position)",
            [],
        )?;

        Ok(())
    }

    /// Load all habits in display order.
    ///
    /// A row whose stored date no longer parses is skipped with a warning
    /// instead of failing the whole list; callers always get every
    /// decodable habit.
    pub fn load_habits(&self) -> Result<Vec<Habit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, emoji, duration, reminder_enabled, reminder_time,
                    streak, longest_streak, completed_today, last_completed,
                    created_at, updated_at
             FROM habits ORDER BY position ASC",
        )?;

        let rows = stmt.query_map([], Self::row_to_habit)?;

        let mut habits = Vec::new();
        for row in rows {
            let (mut habit, raw_last_completed) = row?;
            if let Some(raw) = raw_last_completed {
                match date::parse_date(&raw) {
                    Ok(parsed) => habit.last_completed = Some(parsed),
                    Err(e) => {
                        warn!(habit = %habit.name, value = %raw, error = %e,
                              "skipping habit with undecodable completion date");
                        continue;
                    }
                }
            }
            habits.push(habit);
        }

        Ok(habits)
    }

    /// Persist the full habit list, replacing whatever is stored.
    ///
    /// The list is the unit of persistence: positions are rewritten from
    /// the slice order and rows absent from the slice are removed.
    pub fn save_habits(&self, habits: &[Habit]) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM habits", [])?;
        for (position, habit) in habits.iter().enumerate() {
            tx.execute(
                "INSERT INTO habits (id, name, emoji, duration, reminder_enabled, reminder_time,
                                     streak, longest_streak, completed_today, last_completed,
                                     position, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                rusqlite::params![
                    habit.id,
                    habit.name,
                    habit.emoji,
                    habit.duration as i64,
                    if habit.reminder_enabled { 1 } else { 0 },
                    habit.reminder_time,
                    habit.streak as i64,
                    habit.longest_streak as i64,
                    if habit.completed_today { 1 } else { 0 },
                    habit.last_completed.map(date::format_date),
                    position as i64,
                    habit.created_at,
                    habit.updated_at
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Read the onboarding flag; false on first run
    pub fn load_onboarding(&self) -> Result<bool, DatabaseError> {
        let result = self.conn.query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            rusqlite::params![ONBOARDING_KEY],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(value == "true"),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Persist the onboarding flag under its own key
    pub fn save_onboarding(&self, completed: bool) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            rusqlite::params![ONBOARDING_KEY, if completed { "true" } else { "false" }],
        )?;
        Ok(())
    }

    /// Map a row to a Habit, returning the raw completion date text for
    /// the caller to decode
    fn row_to_habit(row: &rusqlite::Row) -> Result<(Habit, Option<String>), rusqlite::Error> {
        let habit = Habit {
            id: row.get(0)?,
            name: row.get(1)?,
            emoji: row.get(2)?,
            duration: row.get::<_, i64>(3)? as u8,
            reminder_enabled: row.get::<_, i64>(4)? != 0,
            reminder_time: row.get(5)?,
            streak: row.get::<_, i64>(6)? as u32,
            longest_streak: row.get::<_, i64>(7)? as u32,
            completed_today: row.get::<_, i64>(8)? != 0,
            last_completed: None,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        };
        let raw_last_completed: Option<String> = row.get(9)?;
        Ok((habit, raw_last_completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HabitDraft;

    fn sample(name: &str) -> Habit {
        Habit::new(HabitDraft {
            name: name.to_string(),
            emoji: "📖".to_string(),
            duration: 3,
            ..Default::default()
        })
    }

    #[test]
    fn test_fresh_database_is_empty() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load_habits().unwrap().is_empty());
        assert!(!db.load_onboarding().unwrap());
    }

    #[test]
    fn test_save_load_round_trip_preserves_order_and_fields() {
        let db = Database::open_in_memory().unwrap();

        let mut first = sample("Journal");
        first.streak = 4;
        first.longest_streak = 9;
        first.completed_today = true;
        first.last_completed = Some(crate::date::parse_date("2024-05-20").unwrap());
        let second = sample("Push-ups");

        db.save_habits(&[first.clone(), second.clone()]).unwrap();
        let loaded = db.load_habits().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, first.id);
        assert_eq!(loaded[0].streak, 4);
        assert_eq!(loaded[0].longest_streak, 9);
        assert!(loaded[0].completed_today);
        assert_eq!(loaded[0].last_completed, first.last_completed);
        assert_eq!(loaded[1].id, second.id);
        assert_eq!(loaded[1].name, "Push-ups");
        assert!(loaded[1].last_completed.is_none());
    }

    #[test]
    fn test_save_replaces_removed_rows() {
        let db = Database::open_in_memory().unwrap();
        let a = sample("a");
        let b = sample("b");

        db.save_habits(&[a.clone(), b]).unwrap();
        db.save_habits(&[a]).unwrap();

        assert_eq!(db.load_habits().unwrap().len(), 1);
    }

    #[test]
    fn test_undecodable_date_skips_row_not_list() {
        let db = Database::open_in_memory().unwrap();
        db.save_habits(&[sample("good"), sample("bad")]).unwrap();
        db.conn
            .execute(
                "UPDATE habits SET last_completed = 'yesterday-ish' WHERE name = 'bad'",
                [],
            )
            .unwrap();

        let loaded = db.load_habits().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "good");
    }

    #[test]
    fn test_onboarding_flag_round_trips() {
        let db = Database::open_in_memory().unwrap();
        db.save_onboarding(true).unwrap();
        assert!(db.load_onboarding().unwrap());
        db.save_onboarding(false).unwrap();
        assert!(!db.load_onboarding().unwrap());
    }
}
