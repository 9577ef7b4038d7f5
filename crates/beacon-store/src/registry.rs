// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Device registry - durable record of every device ever seen
//!
//! The registry is authoritative for history and presentation; the in-memory
//! liveness tracker is authoritative for "can we deliver a command right
//! now". The two are reconciled eventually, never atomically, so readers must
//! tolerate brief disagreement between `status` here and the tracker's view.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use beacon_core::DeviceId;

use crate::{Result, StoreError};

/// Last-known reachability recorded for a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }

    fn parse(s: &str) -> Result<Self> {
        match s {
            "online" => Ok(DeviceStatus::Online),
            "offline" => Ok(DeviceStatus::Offline),
            other => Err(StoreError::Corrupt(format!("unknown status '{}'", other))),
        }
    }
}

/// Durable device row. Identity is immutable once created; status and
/// last_seen are the only fields that change afterwards (plus the last-seen
/// source address).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub ip: String,
    pub client_descriptor: String,
    pub status: DeviceStatus,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Index row for an uploaded payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: i64,
    pub device_id: DeviceId,
    pub data_type: String,
    pub preview: String,
    pub stored_path: String,
    pub created_at: DateTime<Utc>,
}

/// Data-record fields supplied by the ingestion path
#[derive(Debug, Clone)]
pub struct NewDataRecord {
    pub device_id: DeviceId,
    pub data_type: String,
    pub preview: String,
    pub stored_path: String,
}

/// Durable device registry interface
pub trait DeviceRegistry: Send + Sync {
    /// Record a contact from a device: create the row on first sight, refresh
    /// address/status/last_seen on every later one. Idempotent per identity.
    fn upsert_seen(&self, id: &DeviceId, source_addr: &str, descriptor: &str) -> Result<Device>;

    /// Update status and last_seen. Unknown identity is a no-op, not an error.
    fn set_status(&self, id: &DeviceId, status: DeviceStatus) -> Result<()>;

    /// Remove a device row and all of its data records.
    fn delete(&self, id: &DeviceId) -> Result<()>;

    /// All devices, newest creation first.
    fn list(&self) -> Result<Vec<Device>>;

    /// Single device lookup.
    fn get(&self, id: &DeviceId) -> Result<Option<Device>>;

    /// Total number of registered devices.
    fn count(&self) -> Result<u64>;

    /// Index a stored payload.
    fn insert_data_record(&self, record: &NewDataRecord) -> Result<()>;

    /// Data records for one device, newest first.
    fn list_data_records(&self, id: &DeviceId) -> Result<Vec<DataRecord>>;

    /// Drop every device and data record.
    fn clear(&self) -> Result<()>;
}

/// SQLite-backed registry
pub struct SqliteRegistry {
    conn: Mutex<Connection>,
}

impl SqliteRegistry {
    /// Open (or create) the registry database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Self::init_schema(&conn)?;
        info!("Device registry opened: {}", path.as_ref().display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory registry for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS devices (
                 id                TEXT PRIMARY KEY,
                 ip                TEXT NOT NULL,
                 client_descriptor TEXT NOT NULL,
                 status            TEXT NOT NULL DEFAULT 'offline',
                 last_seen         TEXT NOT NULL,
                 created_at        TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS device_data (
                 id          INTEGER PRIMARY KEY AUTOINCREMENT,
                 device_id   TEXT NOT NULL,
                 data_type   TEXT NOT NULL,
                 preview     TEXT NOT NULL,
                 stored_path TEXT NOT NULL,
                 created_at  TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_device_data_device
                 ON device_data (device_id);",
        )?;
        Ok(())
    }

    fn read_device(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, String, String, String, String, String)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }

    fn to_device(raw: (String, String, String, String, String, String)) -> Result<Device> {
        let (id, ip, client_descriptor, status, last_seen, created_at) = raw;
        Ok(Device {
            id: DeviceId::parse(&id).map_err(|e| StoreError::Corrupt(e.to_string()))?,
            ip,
            client_descriptor,
            status: DeviceStatus::parse(&status)?,
            last_seen: parse_timestamp(&last_seen)?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp '{}': {}", raw, e)))
}

impl DeviceRegistry for SqliteRegistry {
    fn upsert_seen(&self, id: &DeviceId, source_addr: &str, descriptor: &str) -> Result<Device> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO devices (id, ip, client_descriptor, status, last_seen, created_at)
             VALUES (?1, ?2, ?3, 'online', ?4, ?4)
             ON CONFLICT(id) DO UPDATE SET
                 ip = excluded.ip,
                 status = 'online',
                 last_seen = excluded.last_seen",
            params![id.to_string(), source_addr, descriptor, now],
        )?;

        let raw = conn.query_row(
            "SELECT id, ip, client_descriptor, status, last_seen, created_at
             FROM devices WHERE id = ?1",
            params![id.to_string()],
            Self::read_device,
        )?;
        let device = Self::to_device(raw)?;

        // Both arms of the upsert report one changed row; first contact is
        // visible only through the timestamps the insert arm sets together.
        debug!(
            "Device seen: {} ({})",
            id,
            if device.created_at == device.last_seen {
                "registered"
            } else {
                "refreshed"
            }
        );
        Ok(device)
    }

    fn set_status(&self, id: &DeviceId, status: DeviceStatus) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "UPDATE devices SET status = ?1, last_seen = ?2 WHERE id = ?3",
            params![status.as_str(), Utc::now().to_rfc3339(), id.to_string()],
        )?;
        Ok(())
    }

    fn delete(&self, id: &DeviceId) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM device_data WHERE device_id = ?1",
            params![id.to_string()],
        )?;
        let removed = tx.execute("DELETE FROM devices WHERE id = ?1", params![id.to_string()])?;
        tx.commit()?;

        if removed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!("Device deleted from registry: {}", id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Device>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, ip, client_descriptor, status, last_seen, created_at
             FROM devices ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], Self::read_device)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Self::to_device).collect()
    }

    fn get(&self, id: &DeviceId) -> Result<Option<Device>> {
        let conn = self.conn.lock();
        let raw = conn
            .query_row(
                "SELECT id, ip, client_descriptor, status, last_seen, created_at
                 FROM devices WHERE id = ?1",
                params![id.to_string()],
                Self::read_device,
            )
            .optional()?;
        raw.map(Self::to_device).transpose()
    }

    fn count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM devices", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn insert_data_record(&self, record: &NewDataRecord) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO device_data (device_id, data_type, preview, stored_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.device_id.to_string(),
                record.data_type,
                record.preview,
                record.stored_path,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn list_data_records(&self, id: &DeviceId) -> Result<Vec<DataRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, device_id, data_type, preview, stored_path, created_at
             FROM device_data WHERE device_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let raw = stmt
            .query_map(params![id.to_string()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .map(|(rid, device_id, data_type, preview, stored_path, created_at)| {
                Ok(DataRecord {
                    id: rid,
                    device_id: DeviceId::parse(&device_id)
                        .map_err(|e| StoreError::Corrupt(e.to_string()))?,
                    data_type,
                    preview,
                    stored_path,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute_batch("DELETE FROM device_data; DELETE FROM devices;")?;
        info!("Registry cleared");
        Ok(())
    }
}
