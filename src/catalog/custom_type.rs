use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

/// True when a type with the given name exists in the given schema.
/// Row types implicitly created for tables and views do not count.
pub async fn exists(pool: &PgPool, schema: &str, name: &str) -> Result<bool> {
    let found: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM pg_type t
            JOIN pg_namespace n ON t.typnamespace = n.oid
            WHERE n.nspname = $1
              AND t.typname = $2
              AND NOT EXISTS (
                  SELECT 1 FROM pg_class c
                  WHERE c.oid = t.typrelid AND c.relkind <> 'c'
              )
        )
        "#,
    )
    .bind(schema)
    .bind(name)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to look up type {}.{}", schema, name))?;

    debug!("type {}.{} exists: {}", schema, name, found);
    Ok(found)
}
