//! Storage property tests against a live PostgreSQL instance.
//!
//! Ignored by default; run with a provisioned database:
//!
//! ```text
//! DATABASE_URL=postgresql://localhost/cbr cargo test -p cbr-worker -- --ignored
//! ```

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use cbr_worker::models::{CurrencyRow, QuoteRow};
use cbr_worker::storage::{PgRateStore, RateStore};

// Test rows use the T-prefixed id range so cleanup never touches real data.
const TEST_ID: &str = "T01010";

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for storage tests");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    sqlx::query("DELETE FROM cbr_data.currencies WHERE id LIKE 'T%'")
        .execute(&pool)
        .await
        .expect("cleanup currencies");
    sqlx::query("DELETE FROM cbr_data.quotes WHERE currency LIKE 'T%'")
        .execute(&pool)
        .await
        .expect("cleanup quotes");

    pool
}

fn currency(name: &str, nominal: i32) -> CurrencyRow {
    CurrencyRow {
        id: TEST_ID.to_string(),
        name_rus: name.to_string(),
        code: "AUD".to_string(),
        nominal,
    }
}

fn quote(value: f64) -> QuoteRow {
    QuoteRow {
        currency: TEST_ID.to_string(),
        date: NaiveDate::from_ymd_opt(2022, 6, 11).unwrap(),
        value,
    }
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL instance"]
async fn test_upsert_currencies_is_idempotent() {
    let pool = test_pool().await;
    let store = PgRateStore::new(pool.clone());

    store
        .upsert_currencies(&[currency("first name", 1)])
        .await
        .unwrap();
    store
        .upsert_currencies(&[currency("second name", 100)])
        .await
        .unwrap();

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM cbr_data.currencies WHERE id = $1")
            .bind(TEST_ID)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);

    let (name_rus, nominal): (String, i32) =
        sqlx::query_as("SELECT name_rus, nominal FROM cbr_data.currencies WHERE id = $1")
            .bind(TEST_ID)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name_rus, "second name");
    assert_eq!(nominal, 100);
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL instance"]
async fn test_insert_quotes_appends_without_dedup() {
    let pool = test_pool().await;
    let store = PgRateStore::new(pool.clone());

    let rows = vec![quote(41.1437), quote(41.1437)];
    store.insert_quotes(&rows).await.unwrap();
    store.insert_quotes(&rows).await.unwrap();

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM cbr_data.quotes WHERE currency = $1")
            .bind(TEST_ID)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 4);
}
