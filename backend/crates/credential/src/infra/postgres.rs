//! PostgreSQL Credential Store

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::credential_record::CredentialRecord;
use crate::domain::repository::{CredentialStore, CredentialWriter};
use crate::domain::value_object::{
    CredentialId, role::Role, secret::SecretHash, username::Username,
};
use crate::error::{StoreError, StoreResult};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &Username) -> StoreResult<Option<CredentialRecord>> {
        // LIMIT 2 so a broken uniqueness constraint shows up instead of
        // silently picking one row
        let rows = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                credential_id,
                username,
                secret_hash,
                role,
                created_at
            FROM credentials
            WHERE username_canonical = $1
            LIMIT 2
            "#,
        )
        .bind(username.canonical())
        .fetch_all(&self.pool)
        .await?;

        single_record(rows, username)
    }
}

impl CredentialWriter for PgCredentialStore {
    async fn insert(&self, record: &CredentialRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO credentials (
                credential_id,
                username,
                username_canonical,
                secret_hash,
                role,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.username.original())
        .bind(record.username.canonical())
        .bind(record.secret_hash.as_phc_string())
        .bind(record.role.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_username(&self, username: &Username) -> StoreResult<bool> {
        let deleted = sqlx::query("DELETE FROM credentials WHERE username_canonical = $1")
            .bind(username.canonical())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// At most one row may match a canonical user name
fn single_record(
    rows: Vec<CredentialRow>,
    username: &Username,
) -> StoreResult<Option<CredentialRecord>> {
    let mut rows = rows.into_iter();
    match (rows.next(), rows.next()) {
        (None, _) => Ok(None),
        (Some(row), None) => row.into_record().map(Some),
        (Some(_), Some(_)) => Err(StoreError::Corrupted(format!(
            "multiple records for user name '{}'",
            username.canonical()
        ))),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    credential_id: Uuid,
    username: String,
    secret_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_record(self) -> StoreResult<CredentialRecord> {
        let secret_hash = SecretHash::from_phc_string(self.secret_hash).map_err(|e| {
            StoreError::Corrupted(format!(
                "invalid secret_hash for credential {}: {}",
                self.credential_id, e
            ))
        })?;

        Ok(CredentialRecord {
            id: CredentialId::from_uuid(self.credential_id),
            username: Username::from_db(self.username),
            secret_hash,
            role: Role::from_db(self.role),
            created_at: self.created_at,
        })
    }
}
