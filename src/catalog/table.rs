use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

/// Relation kinds that count as a live table
const TABLE_RELKINDS: &str = "{r,p}";

/// True when the qualified name resolves to a regular or partitioned table
pub async fn exists(pool: &PgPool, schema: &str, name: &str) -> Result<bool> {
    relation_exists(pool, schema, name, TABLE_RELKINDS)
        .await
        .with_context(|| format!("Failed to look up table {}.{}", schema, name))
        .inspect(|found| debug!("table {}.{} exists: {}", schema, name, found))
}

/// True when an index with the given name exists in the schema
pub async fn index_exists(pool: &PgPool, schema: &str, name: &str) -> Result<bool> {
    relation_exists(pool, schema, name, "{i}")
        .await
        .with_context(|| format!("Failed to look up index {}.{}", schema, name))
        .inspect(|found| debug!("index {}.{} exists: {}", schema, name, found))
}

async fn relation_exists(
    pool: &PgPool,
    schema: &str,
    name: &str,
    relkinds: &str,
) -> sqlx::Result<bool> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM pg_class c
            JOIN pg_namespace n ON c.relnamespace = n.oid
            WHERE n.nspname = $1
              AND c.relname = $2
              AND c.relkind::text = ANY($3::text[])
        )
        "#,
    )
    .bind(schema)
    .bind(name)
    .bind(relkinds)
    .fetch_one(pool)
    .await
}
