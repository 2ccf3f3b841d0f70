use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::info;
use uuid::Uuid;

use nudge_core::types::{Reminder, ReminderId};

use crate::db::init_db;
use crate::error::{Result, StoreError};

/// Thread-safe, cloneable handle to the persisted reminder set.
///
/// Wraps a single SQLite connection in a `Mutex`. Cloning shares the
/// connection, so reminder-creation requests and fired delivery tasks can
/// insert/delete concurrently without corruption. For high-concurrency
/// deployments consider a connection pool, but a Mutex is sufficient here —
/// each reminder is reconciled independently and no cross-row transactions
/// are required.
#[derive(Clone)]
pub struct ReminderStore {
    db: Arc<Mutex<Connection>>,
}

impl ReminderStore {
    /// Wrap an open connection, initialising the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Persist a new reminder and return the full record with its assigned ID.
    pub fn insert(&self, hour: u8, minute: u8, message: &str) -> Result<Reminder> {
        if hour > 23 || minute > 59 {
            return Err(StoreError::InvalidTime { hour, minute });
        }

        let id = ReminderId::from(Uuid::new_v4().to_string());
        let now = chrono::Utc::now().to_rfc3339();

        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO reminders (id, hour, minute, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id.as_str(), hour, minute, message, now],
        )?;
        info!(reminder_id = %id, hour, minute, "reminder stored");

        Ok(Reminder {
            id,
            hour,
            minute,
            message: message.to_string(),
        })
    }

    /// Return every pending reminder. No ordering contract — callers must not
    /// assume FIFO by creation time.
    pub fn list_all(&self) -> Result<Vec<Reminder>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare("SELECT id, hour, minute, message FROM reminders")?;
        let rows = stmt.query_map([], |row| {
            Ok(Reminder {
                id: ReminderId::from(row.get::<_, String>(0)?),
                hour: row.get::<_, u8>(1)?,
                minute: row.get::<_, u8>(2)?,
                message: row.get::<_, String>(3)?,
            })
        })?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Delete a reminder by ID. Returns `NotFound` if no row is deleted.
    pub fn delete(&self, id: &ReminderId) -> Result<()> {
        let db = self.db.lock().unwrap();
        let n = db.execute("DELETE FROM reminders WHERE id = ?1", [id.as_str()])?;
        if n == 0 {
            return Err(StoreError::NotFound {
                id: id.to_string(),
            });
        }
        info!(reminder_id = %id, "reminder deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> ReminderStore {
        ReminderStore::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn insert_assigns_stable_id_and_lists_back() {
        let store = memory_store();
        let r = store.insert(10, 20, "reminder to check the oven").unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, r.id);
        assert_eq!(all[0].hour, 10);
        assert_eq!(all[0].minute, 20);
        assert_eq!(all[0].message, "reminder to check the oven");
    }

    #[test]
    fn delete_removes_the_row() {
        let store = memory_store();
        let r = store.insert(8, 0, "reminder to stretch").unwrap();
        store.delete(&r.id).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let store = memory_store();
        let err = store.delete(&ReminderId::from("no-such-row")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        let store = memory_store();
        assert!(matches!(
            store.insert(24, 0, "x"),
            Err(StoreError::InvalidTime { .. })
        ));
        assert!(matches!(
            store.insert(0, 60, "x"),
            Err(StoreError::InvalidTime { .. })
        ));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn ids_are_unique_across_inserts() {
        let store = memory_store();
        let a = store.insert(9, 0, "a").unwrap();
        let b = store.insert(9, 0, "a").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list_all().unwrap().len(), 2);
    }
}
