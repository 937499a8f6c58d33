use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::domains::wallet::models::{WalletRecord, WalletUpdate};
use crate::shared::errors::WalletError;

// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// 지갑 저장소 인터페이스
/// Wallet Store: one record per user id.
///
/// `insert` fails with `AlreadyExists` for a taken user id, `get_by_user_id`
/// returns `None` when absent, `update` fails with `NotFound` when absent and
/// `delete` reports whether anything was removed.
#[async_trait]
pub trait WalletStore: Send + Sync {
    async fn insert(&self, record: &WalletRecord) -> Result<(), WalletError>;

    async fn get_by_user_id(&self, user_id: i64) -> Result<Option<WalletRecord>, WalletError>;

    async fn update(&self, user_id: i64, update: &WalletUpdate) -> Result<WalletRecord, WalletError>;

    async fn delete(&self, user_id: i64) -> Result<bool, WalletError>;
}

// 지갑 레포지토리 (PostgreSQL)
// Wallet repository backed by the `wallets` table
#[derive(Clone)]
pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &PgRow) -> WalletRecord {
    WalletRecord {
        user_id: row.get("user_id"),
        private_key: row.get("private_key"),
        public_key: row.get("public_key"),
        keypair: row.get("keypair"),
        created_at: row.get("created_at"),
    }
}

fn database_error(context: &str, err: sqlx::Error) -> WalletError {
    WalletError::DatabaseError(format!("{}: {}", context, err))
}

#[async_trait]
impl WalletStore for WalletRepository {
    async fn insert(&self, record: &WalletRecord) -> Result<(), WalletError> {
        let result = sqlx::query(
            r#"
            INSERT INTO wallets (user_id, private_key, public_key, keypair, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.user_id)
        .bind(&record.private_key)
        .bind(&record.public_key)
        .bind(&record.keypair)
        .bind(record.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                info!(user_id = record.user_id, public_key = %record.public_key, "Wallet inserted");
                Ok(())
            }
            // PRIMARY KEY 위반 = 이미 지갑 있음
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(WalletError::AlreadyExists { user_id: record.user_id })
            }
            Err(e) => Err(database_error("Failed to insert wallet", e)),
        }
    }

    async fn get_by_user_id(&self, user_id: i64) -> Result<Option<WalletRecord>, WalletError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, private_key, public_key, keypair, created_at
            FROM wallets
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch wallet by user_id", e))?;

        Ok(row.as_ref().map(row_to_record))
    }

    async fn update(&self, user_id: i64, update: &WalletUpdate) -> Result<WalletRecord, WalletError> {
        if update.is_empty() {
            return self
                .get_by_user_id(user_id)
                .await?
                .ok_or(WalletError::NotFound { user_id });
        }

        let row = sqlx::query(
            r#"
            UPDATE wallets
            SET private_key = COALESCE($2, private_key),
                public_key  = COALESCE($3, public_key),
                keypair     = COALESCE($4, keypair)
            WHERE user_id = $1
            RETURNING user_id, private_key, public_key, keypair, created_at
            "#,
        )
        .bind(user_id)
        .bind(update.private_key.as_deref())
        .bind(update.public_key.as_deref())
        .bind(update.keypair.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to update wallet", e))?;

        row.as_ref()
            .map(row_to_record)
            .ok_or(WalletError::NotFound { user_id })
    }

    async fn delete(&self, user_id: i64) -> Result<bool, WalletError> {
        let result = sqlx::query("DELETE FROM wallets WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete wallet", e))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(user_id, "Wallet deleted");
        } else {
            debug!(user_id, "No wallet to delete");
        }
        Ok(deleted)
    }
}
