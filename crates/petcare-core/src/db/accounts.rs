//! User account database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Role, UserAccount};

/// Credentials row returned by the login lookup.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub account_id: String,
    pub password_hash: String,
    pub salt: String,
    pub display_name: String,
    pub role: Role,
}

impl Database {
    /// Insert a new user account, linking it to its role group.
    pub fn insert_account(&self, account: &UserAccount) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO user_accounts (
                account_id, email, password_hash, salt, display_name, group_id, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                (SELECT group_id FROM access_groups WHERE role = ?6),
                ?7
            )
            "#,
            params![
                account.account_id,
                account.email,
                account.password_hash,
                account.salt,
                account.display_name,
                account.role.as_str(),
                account.created_at,
            ],
        )?;
        Ok(())
    }

    /// Look up stored credentials by email in a single query joining the
    /// role table. Returns None when no such account exists; the caller is
    /// responsible for keeping that case indistinguishable from a hash
    /// mismatch.
    pub fn credentials_for_email(&self, email: &str) -> DbResult<Option<StoredCredentials>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT u.account_id, u.password_hash, u.salt, u.display_name, g.role
                FROM user_accounts u
                JOIN access_groups g ON g.group_id = u.group_id
                WHERE u.email = ?
                "#,
                [email],
                |row| {
                    Ok(CredentialsRow {
                        account_id: row.get(0)?,
                        password_hash: row.get(1)?,
                        salt: row.get(2)?,
                        display_name: row.get(3)?,
                        role: row.get(4)?,
                    })
                },
            )
            .optional()?;

        row.map(|r| r.try_into()).transpose()
    }
}

/// Intermediate row struct for database mapping.
struct CredentialsRow {
    account_id: String,
    password_hash: String,
    salt: String,
    display_name: String,
    role: String,
}

impl TryFrom<CredentialsRow> for StoredCredentials {
    type Error = DbError;

    fn try_from(row: CredentialsRow) -> Result<Self, Self::Error> {
        let role = Role::from_wire(&row.role)
            .ok_or_else(|| DbError::Constraint(format!("Unknown role: {}", row.role)))?;
        Ok(StoredCredentials {
            account_id: row.account_id,
            password_hash: row.password_hash,
            salt: row.salt,
            display_name: row.display_name,
            role,
        })
    }
}
