//! SQLite-based plan storage.
//!
//! Provides persistent storage for:
//! - Daily check-ins
//! - Energy windows, one per date
//! - Generated tasks, replaced wholesale whenever a day is re-planned
//! - An audit trail of task status changes

use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::data_dir;
use crate::energy::{CheckIn, EnergyWindow, Slot};
use crate::error::{DatabaseError, Result};
use crate::task::{DailyTask, TaskStatus};

/// Source tag written next to heuristically estimated windows.
const WINDOW_SOURCE: &str = "heuristic_v1";

const TASK_COLUMNS: &str =
    "id, template_id, date, slot, type, title, duration_min, intensity, status";

/// A task row: the generated task plus the row id assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTask {
    pub task_id: String,
    #[serde(flatten)]
    pub task: DailyTask,
}

/// One entry in the task audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskEvent {
    pub task_id: String,
    pub event: String,
    pub status: TaskStatus,
}

/// SQLite database for plans.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/wellplan/wellplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("wellplan.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS checkins (
                date        TEXT PRIMARY KEY,
                sleep_hours REAL NOT NULL,
                wake_time   TEXT NOT NULL,
                energy      INTEGER NOT NULL,
                mood        INTEGER NOT NULL,
                notes       TEXT
            );

            CREATE TABLE IF NOT EXISTS energy_windows (
                date      TEXT PRIMARY KEY,
                morning   INTEGER NOT NULL,
                afternoon INTEGER NOT NULL,
                evening   INTEGER NOT NULL,
                source    TEXT NOT NULL DEFAULT 'heuristic_v1'
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id           TEXT PRIMARY KEY,
                template_id  TEXT NOT NULL,
                date         TEXT NOT NULL,
                slot         TEXT NOT NULL,
                type         TEXT NOT NULL,
                title        TEXT NOT NULL,
                duration_min INTEGER,
                intensity    TEXT,
                status       TEXT NOT NULL DEFAULT 'planned',
                position     INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS task_events (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                task_id    TEXT NOT NULL,
                event      TEXT NOT NULL,
                status     TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_date ON tasks(date, position);
            CREATE INDEX IF NOT EXISTS idx_task_events_task ON task_events(task_id);",
        )
    }

    /// Insert or replace the check-in for `date`.
    pub fn upsert_checkin(&self, date: NaiveDate, checkin: &CheckIn, notes: Option<&str>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO checkins (date, sleep_hours, wake_time, energy, mood, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(date) DO UPDATE SET
                sleep_hours = excluded.sleep_hours,
                wake_time = excluded.wake_time,
                energy = excluded.energy,
                mood = excluded.mood,
                notes = excluded.notes",
            params![
                date,
                checkin.sleep_hours,
                checkin.wake_time,
                checkin.energy,
                checkin.mood,
                notes
            ],
        )?;
        Ok(())
    }

    pub fn checkin(&self, date: NaiveDate) -> Result<Option<CheckIn>> {
        let checkin = self
            .conn
            .query_row(
                "SELECT sleep_hours, wake_time, energy, mood FROM checkins WHERE date = ?1",
                params![date],
                |row| {
                    Ok(CheckIn {
                        sleep_hours: row.get(0)?,
                        wake_time: row.get(1)?,
                        energy: row.get(2)?,
                        mood: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(checkin)
    }

    /// Insert or replace the window for its date.
    pub fn upsert_energy_window(&self, window: &EnergyWindow) -> Result<()> {
        self.conn.execute(
            "INSERT INTO energy_windows (date, morning, afternoon, evening, source)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                morning = excluded.morning,
                afternoon = excluded.afternoon,
                evening = excluded.evening,
                source = excluded.source",
            params![
                window.date,
                window.morning,
                window.afternoon,
                window.evening,
                WINDOW_SOURCE
            ],
        )?;
        Ok(())
    }

    pub fn energy_window(&self, date: NaiveDate) -> Result<Option<EnergyWindow>> {
        let window = self
            .conn
            .query_row(
                "SELECT date, morning, afternoon, evening FROM energy_windows WHERE date = ?1",
                params![date],
                window_from_row,
            )
            .optional()?;
        Ok(window)
    }

    /// Windows with `start <= date <= end`, oldest first.
    pub fn energy_windows_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<EnergyWindow>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, morning, afternoon, evening FROM energy_windows
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date ASC",
        )?;
        let windows = stmt
            .query_map(params![start, end], window_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(windows)
    }

    /// Replace every task stored for `date` with `tasks`.
    ///
    /// Delete and insert run in one transaction, so readers see either the
    /// old day or the new one. Each task gets a fresh row id.
    pub fn replace_day(&self, date: NaiveDate, tasks: &[DailyTask]) -> Result<Vec<StoredTask>> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM tasks WHERE date = ?1", params![date])?;

        let mut stored = Vec::with_capacity(tasks.len());
        {
            let mut insert = tx.prepare(
                "INSERT INTO tasks (id, template_id, date, slot, type, title, duration_min, intensity, status, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                let task_id = Uuid::new_v4().to_string();
                insert.execute(params![
                    task_id,
                    task.id,
                    date,
                    task.slot.as_str(),
                    task.task_type.as_str(),
                    task.title,
                    task.duration_min,
                    task.intensity.map(|i| i.as_str()),
                    task.status.as_str(),
                    position as i64,
                ])?;
                stored.push(StoredTask {
                    task_id,
                    task: DailyTask {
                        date,
                        ..task.clone()
                    },
                });
            }
        }
        tx.commit()?;

        info!(%date, removed, inserted = stored.len(), "replaced day plan");
        Ok(stored)
    }

    pub fn tasks_for_date(&self, date: NaiveDate) -> Result<Vec<StoredTask>> {
        self.tasks_between(date, date)
    }

    /// Tasks with `start <= date <= end`, by date then insertion order.
    pub fn tasks_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<StoredTask>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date ASC, position ASC"
        ))?;
        let tasks = stmt
            .query_map(params![start, end], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub fn task(&self, task_id: &str) -> Result<StoredTask> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![task_id],
                task_from_row,
            )
            .optional()?
            .ok_or_else(|| DatabaseError::TaskNotFound(task_id.to_string()).into())
    }

    /// Set a task's status and record the change in the audit trail.
    pub fn update_task_status(&self, task_id: &str, status: TaskStatus) -> Result<StoredTask> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![status.as_str(), task_id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::TaskNotFound(task_id.to_string()).into());
        }
        tx.execute(
            "INSERT INTO task_events (task_id, event, status, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![task_id, status.event_name(), status.as_str(), Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        info!(task_id, %status, "task status updated");
        self.task(task_id)
    }

    /// Move a task to another slot of the same day.
    pub fn move_task(&self, task_id: &str, slot: Slot) -> Result<StoredTask> {
        let changed = self.conn.execute(
            "UPDATE tasks SET slot = ?1 WHERE id = ?2",
            params![slot.as_str(), task_id],
        )?;
        if changed == 0 {
            return Err(DatabaseError::TaskNotFound(task_id.to_string()).into());
        }
        info!(task_id, %slot, "task moved");
        self.task(task_id)
    }

    /// Audit trail for a task, oldest first.
    pub fn task_events(&self, task_id: &str) -> Result<Vec<TaskEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT task_id, event, status FROM task_events WHERE task_id = ?1 ORDER BY id ASC",
        )?;
        let events = stmt
            .query_map(params![task_id], |row| {
                Ok(TaskEvent {
                    task_id: row.get(0)?,
                    event: row.get(1)?,
                    status: parse_column(row, 2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }
}

fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn window_from_row(row: &Row<'_>) -> rusqlite::Result<EnergyWindow> {
    Ok(EnergyWindow {
        date: row.get(0)?,
        morning: row.get(1)?,
        afternoon: row.get(2)?,
        evening: row.get(3)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<StoredTask> {
    let intensity = match row.get::<_, Option<String>>(7)? {
        Some(raw) => Some(raw.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };
    Ok(StoredTask {
        task_id: row.get(0)?,
        task: DailyTask {
            id: row.get(1)?,
            date: row.get(2)?,
            slot: parse_column(row, 3)?,
            task_type: parse_column(row, 4)?,
            title: row.get(5)?,
            duration_min: row.get(6)?,
            intensity,
            status: parse_column(row, 8)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::generate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    #[test]
    fn energy_window_upsert_replaces() {
        let db = Database::open_memory().unwrap();
        db.upsert_energy_window(&EnergyWindow::new(day(), 3, 4, 2)).unwrap();
        db.upsert_energy_window(&EnergyWindow::new(day(), 5, 5, 1)).unwrap();

        assert_eq!(
            db.energy_window(day()).unwrap(),
            Some(EnergyWindow::new(day(), 5, 5, 1))
        );
        assert_eq!(db.energy_windows_between(day(), day()).unwrap().len(), 1);
    }

    #[test]
    fn checkin_upsert_roundtrip() {
        let db = Database::open_memory().unwrap();
        let checkin = CheckIn {
            sleep_hours: 6.5,
            wake_time: "07:15".to_string(),
            energy: 3,
            mood: 4,
        };
        db.upsert_checkin(day(), &checkin, Some("slept ok")).unwrap();
        assert_eq!(db.checkin(day()).unwrap(), Some(checkin));
        assert_eq!(db.checkin(day().succ_opt().unwrap()).unwrap(), None);
    }

    #[test]
    fn replace_day_swaps_all_tasks() {
        let db = Database::open_memory().unwrap();
        let first = generate(&EnergyWindow::new(day(), 5, 2, 1), None);
        let stored = db.replace_day(day(), &first).unwrap();
        assert_eq!(stored.len(), first.len());

        let second = generate(&EnergyWindow::new(day(), 1, 2, 5), None);
        db.replace_day(day(), &second).unwrap();

        let loaded: Vec<DailyTask> = db
            .tasks_for_date(day())
            .unwrap()
            .into_iter()
            .map(|s| s.task)
            .collect();
        assert_eq!(loaded, second);
    }

    #[test]
    fn replace_day_leaves_other_dates_alone() {
        let db = Database::open_memory().unwrap();
        let tomorrow = day().succ_opt().unwrap();
        db.replace_day(day(), &generate(&EnergyWindow::baseline(day()), None))
            .unwrap();
        db.replace_day(tomorrow, &generate(&EnergyWindow::baseline(tomorrow), None))
            .unwrap();
        db.replace_day(day(), &[]).unwrap();

        assert!(db.tasks_for_date(day()).unwrap().is_empty());
        assert!(!db.tasks_for_date(tomorrow).unwrap().is_empty());
    }

    #[test]
    fn status_update_records_event() {
        let db = Database::open_memory().unwrap();
        let stored = db
            .replace_day(day(), &generate(&EnergyWindow::baseline(day()), None))
            .unwrap();
        let id = &stored[0].task_id;

        let updated = db.update_task_status(id, TaskStatus::Skipped).unwrap();
        assert_eq!(updated.task.status, TaskStatus::Skipped);
        db.update_task_status(id, TaskStatus::Done).unwrap();

        let events = db.task_events(id).unwrap();
        let names: Vec<_> = events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, vec!["status_update", "done"]);
    }

    #[test]
    fn unknown_task_is_not_found() {
        let db = Database::open_memory().unwrap();
        let err = db.update_task_status("missing", TaskStatus::Done).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Database(DatabaseError::TaskNotFound(_))
        ));
        assert!(db.move_task("missing", Slot::Evening).is_err());
        assert!(db.task_events("missing").unwrap().is_empty());
    }

    #[test]
    fn move_task_changes_slot() {
        let db = Database::open_memory().unwrap();
        let stored = db
            .replace_day(day(), &generate(&EnergyWindow::baseline(day()), None))
            .unwrap();
        let moved = db.move_task(&stored[0].task_id, Slot::Evening).unwrap();
        assert_eq!(moved.task.slot, Slot::Evening);
        assert_eq!(moved.task.title, stored[0].task.title);
    }
}
