use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

/// True when a trigger with the given name is attached to `schema.table`.
/// Internal (constraint) triggers are ignored.
pub async fn exists(pool: &PgPool, schema: &str, table: &str, name: &str) -> Result<bool> {
    let found: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM pg_trigger t
            JOIN pg_class c ON t.tgrelid = c.oid
            JOIN pg_namespace n ON c.relnamespace = n.oid
            WHERE n.nspname = $1
              AND c.relname = $2
              AND t.tgname = $3
              AND NOT t.tgisinternal
        )
        "#,
    )
    .bind(schema)
    .bind(table)
    .bind(name)
    .fetch_one(pool)
    .await
    .with_context(|| {
        format!(
            "Failed to look up trigger {} on {}.{}",
            name, schema, table
        )
    })?;

    debug!("trigger {} on {}.{} exists: {}", name, schema, table, found);
    Ok(found)
}
