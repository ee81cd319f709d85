use super::error_context::SqlErrorContext;
use crate::operations::SqlRenderer;
use crate::planner::MigrationCommand;
use anyhow::{Context, Result, anyhow};
use sqlx::{Executor, PgPool};
use tracing::{debug, info};

/// Run every statement of `command` inside one transaction.
///
/// The first failure rolls the transaction back, so the catalog is either fully
/// migrated or untouched. Returns the number of statements executed.
pub async fn apply_command(pool: &PgPool, command: &MigrationCommand) -> Result<usize> {
    if command.is_empty() {
        info!("Nothing to apply ({})", command.direction);
        return Ok(0);
    }

    let mut tx = pool
        .begin()
        .await
        .context("Failed to start migration transaction")?;

    let mut executed = 0;
    for step in &command.steps {
        let id = step.id();
        for rendered in step.to_sql() {
            debug!("Applying {}:\n{}", id, rendered.sql);
            if let Err(e) = tx.execute(rendered.sql.as_str()).await {
                tx.rollback()
                    .await
                    .context("Failed to roll back migration transaction")?;
                let ctx = SqlErrorContext::from_sqlx_error(&e, &rendered.sql);
                return Err(anyhow!("{}", ctx.format(&id.to_string(), &rendered.sql)));
            }
            executed += 1;
        }
    }

    tx.commit()
        .await
        .context("Failed to commit migration transaction")?;
    info!("Applied {} statement(s) ({})", executed, command.direction);
    Ok(executed)
}
