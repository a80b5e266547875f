use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

pub const DB_FILE: &str = "portald.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value_json TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS label_overrides(
            segment TEXT PRIMARY KEY,
            label TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS portal_switch_log(
            id TEXT PRIMARY KEY,
            seq INTEGER NOT NULL,
            at TEXT NOT NULL,
            role TEXT NOT NULL,
            transition TEXT NOT NULL,
            from_portal TEXT NOT NULL,
            to_portal TEXT NOT NULL,
            from_location TEXT NOT NULL,
            navigated_to TEXT NOT NULL
        )",
        [],
    )?;
    ensure_switch_log_matched_prefix(conn)?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_portal_switch_log_seq ON portal_switch_log(seq)",
        [],
    )?;

    Ok(())
}

// Early workspaces logged switches without the matched route prefix.
fn ensure_switch_log_matched_prefix(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "portal_switch_log", "matched_prefix")? {
        return Ok(());
    }
    conn.execute(
        "ALTER TABLE portal_switch_log ADD COLUMN matched_prefix TEXT",
        [],
    )?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn settings_get_json(
    conn: &Connection,
    key: &str,
) -> anyhow::Result<Option<serde_json::Value>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value_json FROM settings WHERE key = ?",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => Ok(Some(serde_json::from_str(&s)?)),
        None => Ok(None),
    }
}

pub fn settings_set_json(
    conn: &Connection,
    key: &str,
    value: &serde_json::Value,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value_json) VALUES(?, ?)
         ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json",
        (key, serde_json::to_string(value)?),
    )?;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOverride {
    pub segment: String,
    pub label: String,
    pub updated_at: String,
}

pub fn label_overrides_list(conn: &Connection) -> anyhow::Result<Vec<LabelOverride>> {
    let mut stmt = conn.prepare(
        "SELECT segment, label, updated_at FROM label_overrides ORDER BY segment",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(LabelOverride {
                segment: row.get(0)?,
                label: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn label_override_upsert(
    conn: &Connection,
    segment: &str,
    label: &str,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO label_overrides(segment, label, updated_at) VALUES(?, ?, ?)
         ON CONFLICT(segment) DO UPDATE
         SET label = excluded.label, updated_at = excluded.updated_at",
        (segment, label, now_rfc3339()),
    )?;
    Ok(())
}

pub fn label_override_delete(conn: &Connection, segment: &str) -> anyhow::Result<bool> {
    let n = conn.execute("DELETE FROM label_overrides WHERE segment = ?", [segment])?;
    Ok(n > 0)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub at: String,
    pub role: String,
    pub transition: String,
    pub from_portal: String,
    pub to_portal: String,
    pub from_location: String,
    pub navigated_to: String,
    pub matched_prefix: Option<String>,
}

pub struct NewAuditRecord<'a> {
    pub role: &'a str,
    pub transition: &'a str,
    pub from_portal: &'a str,
    pub to_portal: &'a str,
    pub from_location: &'a str,
    pub navigated_to: &'a str,
    pub matched_prefix: Option<&'a str>,
}

/// Appends a record and trims the log to the newest `max_records`.
pub fn audit_append(
    conn: &Connection,
    rec: &NewAuditRecord<'_>,
    max_records: i64,
) -> anyhow::Result<String> {
    let id = Uuid::new_v4().to_string();
    let seq: i64 = conn.query_row(
        "SELECT COALESCE(MAX(seq), 0) + 1 FROM portal_switch_log",
        [],
        |row| row.get(0),
    )?;
    conn.execute(
        "INSERT INTO portal_switch_log(
            id, seq, at, role, transition, from_portal, to_portal,
            from_location, navigated_to, matched_prefix
         ) VALUES(?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            id,
            seq,
            now_rfc3339(),
            rec.role,
            rec.transition,
            rec.from_portal,
            rec.to_portal,
            rec.from_location,
            rec.navigated_to,
            rec.matched_prefix,
        ],
    )?;
    conn.execute(
        "DELETE FROM portal_switch_log WHERE seq <= ?",
        [seq - max_records],
    )?;
    Ok(id)
}

/// Newest first.
pub fn audit_list(conn: &Connection, limit: i64) -> anyhow::Result<Vec<AuditRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, at, role, transition, from_portal, to_portal,
                from_location, navigated_to, matched_prefix
         FROM portal_switch_log
         ORDER BY seq DESC
         LIMIT ?",
    )?;
    let rows = stmt
        .query_map([limit], |row| {
            Ok(AuditRecord {
                id: row.get(0)?,
                at: row.get(1)?,
                role: row.get(2)?,
                transition: row.get(3)?,
                from_portal: row.get(4)?,
                to_portal: row.get(5)?,
                from_location: row.get(6)?,
                navigated_to: row.get(7)?,
                matched_prefix: row.get(8)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
