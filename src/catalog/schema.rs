use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

/// True when a namespace with the given name is registered
pub async fn exists(pool: &PgPool, name: &str) -> Result<bool> {
    let found: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM pg_namespace n
            WHERE n.nspname = $1
        )
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to look up schema {}", name))?;

    debug!("schema {} exists: {}", name, found);
    Ok(found)
}
