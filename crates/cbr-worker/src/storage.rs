//! PostgreSQL persistence for the two row sets.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::error::Result;
use crate::models::{CurrencyRow, QuoteRow};

/// Store seam for the rows produced by one cycle.
///
/// Each operation is one transaction-scoped write; the two operations are
/// independent and never share a transaction.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Append quote rows. Duplicate (currency, date) pairs are allowed and
    /// simply coexist.
    async fn insert_quotes(&self, rows: &[QuoteRow]) -> Result<()>;

    /// Write currency rows, overwriting the attributes of ids that already
    /// exist so the reference table reflects the latest cycle.
    async fn upsert_currencies(&self, rows: &[CurrencyRow]) -> Result<()>;
}

/// PostgreSQL-backed store.
///
/// The pool is built once at process start and shared across cycles; a
/// lost connection fails the current cycle's write and nothing else.
pub struct PgRateStore {
    pool: PgPool,
}

impl PgRateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateStore for PgRateStore {
    async fn insert_quotes(&self, rows: &[QuoteRow]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                "INSERT INTO cbr_data.quotes (currency, date, value) VALUES ($1, $2, $3)",
            )
            .bind(&row.currency)
            .bind(row.date)
            .bind(row.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Inserted {} quote rows", rows.len());

        Ok(())
    }

    async fn upsert_currencies(&self, rows: &[CurrencyRow]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO cbr_data.currencies (id, name_rus, code, nominal)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO UPDATE SET
                    name_rus = EXCLUDED.name_rus,
                    code = EXCLUDED.code,
                    nominal = EXCLUDED.nominal
                "#,
            )
            .bind(&row.id)
            .bind(&row.name_rus)
            .bind(&row.code)
            .bind(row.nominal)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Upserted {} currency rows", rows.len());

        Ok(())
    }
}
