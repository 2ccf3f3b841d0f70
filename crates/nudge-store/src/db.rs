use rusqlite::Connection;

use crate::error::Result;

/// Initialise the reminders schema in `conn`.
///
/// Safe to call on every startup — uses `IF NOT EXISTS` throughout.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reminders (
            id          TEXT    NOT NULL PRIMARY KEY,
            hour        INTEGER NOT NULL,
            minute      INTEGER NOT NULL,
            message     TEXT    NOT NULL,
            created_at  TEXT    NOT NULL
        ) STRICT;
        ",
    )?;
    Ok(())
}
