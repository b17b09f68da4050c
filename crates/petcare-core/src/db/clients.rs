//! Client/patient link database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::{ClientLink, TaxId};

impl Database {
    /// Register a client/pet link.
    pub fn insert_client(&self, client: &ClientLink) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO clients (tax_id, patient_id, pet_name, account_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                client.tax_id.as_str(),
                client.patient_id,
                client.pet_name,
                client.account_id,
                client.created_at,
            ],
        )?;
        Ok(())
    }

    /// Resolve a tax id to the internal patient key.
    ///
    /// The result is a per-request snapshot; callers must not cache it
    /// across requests.
    pub fn patient_for_tax_id(&self, tax_id: &TaxId) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT patient_id FROM clients WHERE tax_id = ?",
                [tax_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Patient key linked to a tutor account, if any.
    pub fn patient_for_account(&self, account_id: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT patient_id FROM clients WHERE account_id = ?",
                [account_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }
}
