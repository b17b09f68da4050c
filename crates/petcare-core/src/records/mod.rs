//! Clinical record store.
//!
//! Prescription histories live in their own schema-less database, one JSON
//! document per patient, keyed by the internal patient key. The store is
//! deliberately separate from the relational database: the write path
//! resolves a patient key there and appends here, with no transaction
//! spanning the two.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

use crate::models::{PrescriptionEntry, PrescriptionHistory};

/// Record store errors.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RecordResult<T> = Result<T, RecordError>;

/// Document table: the entries column is an opaque JSON array, no
/// per-field schema.
const RECORDS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS prescription_documents (
    patient_id TEXT PRIMARY KEY,
    entries TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Per-patient prescription document store.
pub struct PrescriptionStore {
    conn: Connection,
}

impl PrescriptionStore {
    /// Open the store at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> RecordResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> RecordResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> RecordResult<()> {
        self.conn.execute_batch(RECORDS_SCHEMA)?;
        Ok(())
    }

    /// Atomically create the patient's document with this entry, or append
    /// the entry to the existing document.
    ///
    /// The create-or-append is one SQL statement, never a read-modify-write
    /// pair in application code, so concurrent writers for the same patient
    /// cannot lose each other's entries. Documents only grow; nothing here
    /// overwrites or truncates an existing sequence.
    pub fn append_prescription(
        &self,
        patient_id: &str,
        entry: &PrescriptionEntry,
    ) -> RecordResult<()> {
        let entry_json = serde_json::to_string(entry)?;

        self.conn.execute(
            r#"
            INSERT INTO prescription_documents (patient_id, entries)
            VALUES (?1, json_array(json(?2)))
            ON CONFLICT(patient_id) DO UPDATE SET
                entries = json_insert(entries, '$[#]', json(?2)),
                updated_at = datetime('now')
            "#,
            params![patient_id, entry_json],
        )?;
        Ok(())
    }

    /// Load a patient's full history, if a document exists.
    pub fn history(&self, patient_id: &str) -> RecordResult<Option<PrescriptionHistory>> {
        let entries_json = self
            .conn
            .query_row(
                "SELECT entries FROM prescription_documents WHERE patient_id = ?",
                [patient_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        entries_json
            .map(|raw| {
                let entries: Vec<PrescriptionEntry> = serde_json::from_str(&raw)?;
                Ok(PrescriptionHistory {
                    patient_id: patient_id.to_string(),
                    entries,
                })
            })
            .transpose()
    }

    /// Number of documents in the store.
    pub fn document_count(&self) -> RecordResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM prescription_documents", [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }
}
