use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

/// Mask password in database URL for display
pub fn mask_url_password(url: &str) -> String {
    let Some((protocol, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    // user:pass@host keeps the user, hides the password
    if let Some((user_info, host_and_path)) = rest.rsplit_once('@')
        && let Some((username, _)) = user_info.split_once(':')
    {
        return format!("{}://{}:***@{}", protocol, username, host_and_path);
    }

    url.to_string()
}

/// Connect with a 5-second acquire timeout.
///
/// The `label` names the database role in error messages, next to the masked URL.
pub async fn connect_to_database(url: &str, label: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await
        .with_context(|| format!("Failed to connect to {} at {}", label, mask_url_password(url)))?;

    info!("Connected to {} at {}", label, mask_url_password(url));
    Ok(pool)
}
