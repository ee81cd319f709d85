use super::select_tables;
use crate::catalog::{CatalogInspector, MemoryCatalog, Overlay, PgCatalog};
use crate::config::{Config, TrackedTable};
use crate::db::connect_to_database;
use crate::planner::{Direction, plan, plan_among};
use anyhow::Result;
use tracing::info;

/// Render the migration for the selected tables as one SQL script.
///
/// With `offline` no database is consulted: "up" assumes an empty database and
/// "down" assumes every configured table is installed.
pub async fn cmd_script(
    config: &Config,
    direction: Direction,
    table: Option<&str>,
    offline: bool,
) -> Result<String> {
    let models = select_tables(config, table)?;

    if offline {
        info!("Rendering {} script offline", direction);
        let mut catalog = MemoryCatalog::new();
        if direction == Direction::Down {
            for model in &config.tables {
                let up = plan(&catalog, model, Direction::Up).await?;
                catalog.apply(&up);
            }
        }
        return build_script(&catalog, &models, &config.tables, direction).await;
    }

    let pool = connect_to_database(&config.database.url, "audit database").await?;
    let catalog = PgCatalog::new(pool);
    let script = build_script(&catalog, &models, &config.tables, direction).await;
    catalog.pool().close().await;
    script
}

/// Plan each model in turn, later models seeing what earlier ones create or drop.
///
/// `tracked` is every configured table, so teardown keeps the audit objects a
/// table outside `models` still writes to.
pub async fn build_script<C: CatalogInspector>(
    catalog: &C,
    models: &[&TrackedTable],
    tracked: &[TrackedTable],
    direction: Direction,
) -> Result<String> {
    let mut overlay = Overlay::new(catalog);
    let mut sections = Vec::with_capacity(models.len());

    for model in models {
        let command = plan_among(&overlay, model, tracked, direction).await?;
        overlay.apply(&command);

        let header = format!("-- pgtrail {}: {}", direction, model.table);
        if command.is_empty() {
            sections.push(format!("{}\n-- nothing to do\n", header));
        } else {
            sections.push(format!("{}\n\n{}", header, command.to_script()));
        }
    }

    Ok(sections.join("\n"))
}
