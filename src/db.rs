//! Database module
//!
//! Database connection and schema utilities.

use sqlx::PgPool;

/// Table holding every participant submission
pub const SUBMISSIONS_TABLE: &str = "participations";

/// Columns the service reads and writes, in CSV export order
pub const SUBMISSION_COLUMNS: [&str; 7] = [
    "id",
    "mode",
    "distance",
    "nbpassager",
    "impact",
    "raison",
    "created_at",
];

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Create the submissions table if it does not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participations (
            id BIGSERIAL PRIMARY KEY,
            mode VARCHAR(100) NOT NULL,
            distance DOUBLE PRECISION NOT NULL,
            nbpassager INTEGER NOT NULL,
            impact DOUBLE PRECISION NOT NULL,
            raison TEXT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema ensured: table '{}'", SUBMISSIONS_TABLE);
    Ok(())
}

/// Check that the submissions table exists with every expected column
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let columns: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT column_name::TEXT
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = $1
        "#,
    )
    .bind(SUBMISSIONS_TABLE)
    .fetch_all(pool)
    .await?;

    if columns.is_empty() {
        tracing::error!("Required table '{}' does not exist", SUBMISSIONS_TABLE);
        return Ok(false);
    }

    let missing: Vec<&str> = SUBMISSION_COLUMNS
        .iter()
        .copied()
        .filter(|expected| !columns.iter().any(|c| c == expected))
        .collect();

    if !missing.is_empty() {
        tracing::error!(
            "Table '{}' is missing columns: {}",
            SUBMISSIONS_TABLE,
            missing.join(", ")
        );
        return Ok(false);
    }

    Ok(true)
}
