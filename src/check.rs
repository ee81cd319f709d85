//! Health checks for an audit installation.
//!
//! Checks only read the catalog; they never produce DDL.

use crate::catalog::{CatalogInspector, DbObjectId};
use crate::config::{Config, TrackedTable};
use crate::constants::LOG_ACTION_FUNCTION;
use crate::planner::resolve_names;
use crate::templates;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Tracking status of one model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub enabled: bool,
    /// Both the row and the statement trigger are installed
    pub valid: bool,
}

/// Check the objects every tracked table relies on: the audit schema, the
/// `action_type` enum and the `log_action` function.
///
/// Returns one description per missing object; an empty list means healthy.
pub async fn check_general<C: CatalogInspector>(catalog: &C, schema: &str) -> Result<Vec<String>> {
    info!("Checking audit installation in schema {}", schema);

    let schema_spec = templates::schema::generate(catalog, schema).await?;
    let type_spec = templates::types::generate(catalog, schema).await?;
    let log_action = DbObjectId::Function {
        schema: schema.to_string(),
        name: LOG_ACTION_FUNCTION.to_string(),
    };
    let log_action_exists = catalog.exists(&log_action).await?;

    let mut missing = Vec::new();
    for (id, exists) in [
        (schema_spec.id, schema_spec.exists),
        (type_spec.id, type_spec.exists),
        (log_action, log_action_exists),
    ] {
        debug!("{} exists: {}", id, exists);
        if !exists {
            missing.push(format!("missing {}", id));
        }
    }
    Ok(missing)
}

/// Check one model. `None` means the model is not configured for tracking.
pub async fn check_model<C: CatalogInspector>(
    catalog: &C,
    model: Option<&TrackedTable>,
) -> Result<Option<ModelStatus>> {
    let Some(model) = model else {
        return Ok(None);
    };

    let names = resolve_names(model)?;
    let triggers = templates::triggers::generate(
        catalog,
        &names.source_schema,
        &names.source_table,
        &names.schema,
        &model.trigger_options,
    )
    .await?;

    let valid = triggers.iter().all(|t| t.exists);
    debug!(
        "{}.{} triggers valid: {}",
        names.source_schema, names.source_table, valid
    );
    Ok(Some(ModelStatus {
        enabled: true,
        valid,
    }))
}

/// Result of checking a whole configuration, as printed by `pgtrail check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub healthy: bool,
    /// Audit schemas inspected by the general check
    pub schemas: Vec<String>,
    /// Missing shared objects
    pub missing: Vec<String>,
    pub tables: Vec<TableHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableHealth {
    pub table: String,
    /// Null when the table is not tracked
    pub status: Option<ModelStatus>,
}

impl HealthReport {
    /// Run the general check plus one model check per requested table.
    ///
    /// The general check covers every audit schema the requested tables write
    /// to, or the configured `audit.schema` when there are none. `table` limits
    /// the model checks to a single name; a name that is not configured is
    /// reported with a null status.
    pub async fn collect<C: CatalogInspector>(
        catalog: &C,
        config: &Config,
        table: Option<&str>,
    ) -> Result<Self> {
        let models: Vec<&TrackedTable> = match table {
            Some(name) => config.tracked_table(name).into_iter().collect(),
            None => config.tables.iter().collect(),
        };

        let mut schemas: Vec<String> = Vec::new();
        for model in models {
            let schema = resolve_names(model)?.schema;
            if !schemas.contains(&schema) {
                schemas.push(schema);
            }
        }
        if schemas.is_empty() {
            schemas.push(config.audit.schema.clone());
        }

        let mut missing = Vec::new();
        for schema in &schemas {
            missing.extend(check_general(catalog, schema).await?);
        }

        let mut tables = Vec::new();
        match table {
            Some(name) => {
                let model = config.tracked_table(name);
                if model.is_none() {
                    warn!("Table '{}' is not tracked in the configuration", name);
                }
                let status = check_model(catalog, model).await?;
                tables.push(TableHealth {
                    table: name.to_string(),
                    status,
                });
            }
            None => {
                for model in &config.tables {
                    let status = check_model(catalog, Some(model)).await?;
                    tables.push(TableHealth {
                        table: model.table.to_string(),
                        status,
                    });
                }
            }
        }

        let healthy = missing.is_empty()
            && tables
                .iter()
                .all(|t| t.status.is_some_and(|s| s.enabled && s.valid));

        Ok(Self {
            healthy,
            schemas,
            missing,
            tables,
        })
    }
}
