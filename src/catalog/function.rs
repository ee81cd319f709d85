use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

/// True when at least one function with the given name exists in the schema.
/// Overloads are not distinguished; the audit functions are never overloaded.
pub async fn exists(pool: &PgPool, schema: &str, name: &str) -> Result<bool> {
    let found: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM pg_proc p
            JOIN pg_namespace n ON p.pronamespace = n.oid
            WHERE n.nspname = $1
              AND p.proname = $2
        )
        "#,
    )
    .bind(schema)
    .bind(name)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to look up function {}.{}", schema, name))?;

    debug!("function {}.{} exists: {}", schema, name, found);
    Ok(found)
}
