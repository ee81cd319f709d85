//! Migration planning for one tracked table.
//!
//! The planner only decides what to run. It consults the catalog, emits the steps
//! for objects that are not yet in the requested state, and leaves execution to
//! the caller (normally inside a single transaction, see `db::executor`).

use crate::catalog::{CatalogInspector, DbObjectId};
use crate::config::TrackedTable;
use crate::constants::{DEFAULT_SCHEMA, ROW_TRIGGER_NAME, STATEMENT_TRIGGER_NAME};
use crate::operations::{MigrationStep, SqlRenderer};
use crate::render::{RenderedSql, Safety};
use crate::templates::{self, AuditObjectSpec};
use anyhow::{Result, bail};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Provision the audit objects
    Up,
    /// Remove the per-table audit objects
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// Ordered steps that take one tracked table fully up or fully down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationCommand {
    pub direction: Direction,
    pub steps: Vec<MigrationStep>,
}

impl MigrationCommand {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn statements(&self) -> Vec<RenderedSql> {
        self.steps.iter().flat_map(|step| step.to_sql()).collect()
    }

    pub fn has_destructive(&self) -> bool {
        self.statements()
            .iter()
            .any(|s| s.safety == Safety::Destructive)
    }

    /// All statements as one executable SQL script
    pub fn to_script(&self) -> String {
        let mut script = self
            .statements()
            .into_iter()
            .map(|s| s.sql)
            .collect::<Vec<_>>()
            .join("\n\n");
        if !script.is_empty() {
            script.push('\n');
        }
        script
    }
}

/// Schema-qualified names for everything a tracked table needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    /// Schema holding the type, the functions and both audit tables
    pub schema: String,
    pub audit_table: String,
    pub changeset_table: Option<String>,
    pub source_schema: String,
    pub source_table: String,
}

/// Resolve the audit schema shared by the audit and changeset tables.
///
/// An unqualified name takes the other table's schema, falling back to
/// `public`. Two different qualifiers are a configuration error.
pub fn resolve_names(model: &TrackedTable) -> Result<ResolvedNames> {
    let audit_schema = model.audit_table.schema.as_deref();
    let changeset_schema = model
        .changeset_table
        .as_ref()
        .and_then(|c| c.schema.as_deref());

    if let (Some(audit), Some(changeset)) = (audit_schema, changeset_schema)
        && audit != changeset
    {
        bail!(
            "Audit table '{}' and changeset table '{}' for {} must be in the same schema",
            model.audit_table,
            model
                .changeset_table
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            model.table
        );
    }

    let schema = audit_schema
        .or(changeset_schema)
        .unwrap_or(DEFAULT_SCHEMA)
        .to_string();

    Ok(ResolvedNames {
        schema,
        audit_table: model.audit_table.name.clone(),
        changeset_table: model.changeset_table.as_ref().map(|c| c.name.clone()),
        source_schema: model.table.schema_or(DEFAULT_SCHEMA).to_string(),
        source_table: model.table.name.clone(),
    })
}

/// Plan the steps that bring `model` to the requested state, as if it were the
/// only tracked table.
pub async fn plan<C: CatalogInspector>(
    catalog: &C,
    model: &TrackedTable,
    direction: Direction,
) -> Result<MigrationCommand> {
    plan_among(catalog, model, &[], direction).await
}

/// Plan the steps that bring `model` to the requested state.
///
/// Steps are gathered in creation order and, for `Down`, the groups are
/// reversed at the end so teardown runs in reverse dependency order. The shared
/// schema and `action_type` enum are only ever created, never dropped: other
/// tracked tables (or unrelated objects) may still use them.
///
/// `tracked` lists every configured table. While another of them still has
/// triggers writing into the same audit schema, `Down` drops only the triggers
/// of `model`; the audit tables and functions go with the last one.
pub async fn plan_among<C: CatalogInspector>(
    catalog: &C,
    model: &TrackedTable,
    tracked: &[TrackedTable],
    direction: Direction,
) -> Result<MigrationCommand> {
    let names = resolve_names(model)?;
    info!(
        "Planning audit migration ({}) for {}.{}",
        direction, names.source_schema, names.source_table
    );

    let users = match direction {
        Direction::Up => Vec::new(),
        Direction::Down => schema_users(catalog, &names, tracked).await?,
    };
    let keep_shared = !users.is_empty();
    if keep_shared {
        info!(
            "Keeping audit tables and functions in schema {}: still used by {}",
            names.schema,
            users.join(", ")
        );
    }

    let mut groups: Vec<Vec<MigrationStep>> = Vec::new();

    if direction == Direction::Up {
        let schema = templates::schema::generate(catalog, &names.schema).await?;
        let action_type = templates::types::generate(catalog, &names.schema).await?;
        for spec in [schema, action_type] {
            if !spec.exists {
                debug!("{} missing", spec.id);
                groups.push(spec.up);
            }
        }
    }

    if !keep_shared {
        let tables = templates::tables::generate(
            catalog,
            &names.schema,
            &names.audit_table,
            names.changeset_table.as_deref(),
        )
        .await?;
        for table in &tables {
            match direction {
                Direction::Up if !table.exists => {
                    debug!("{} missing", table.id());
                    groups.push(table.up());
                }
                Direction::Down if table.exists => {
                    debug!("{} present", table.id());
                    groups.push(table.down());
                }
                _ => {}
            }
        }

        let functions = templates::functions::generate(
            catalog,
            &names.schema,
            &names.audit_table,
            names.changeset_table.is_some(),
        )
        .await?;
        groups.extend(all_or_nothing(&functions, direction));
    }

    let triggers = templates::triggers::generate(
        catalog,
        &names.source_schema,
        &names.source_table,
        &names.schema,
        &model.trigger_options,
    )
    .await?;
    groups.extend(all_or_nothing(&triggers, direction));

    if direction == Direction::Down {
        groups.reverse();
    }

    let steps: Vec<MigrationStep> = groups.into_iter().flatten().collect();
    info!("Planned {} step(s)", steps.len());
    Ok(MigrationCommand { direction, steps })
}

/// Other tracked tables with an audit trigger still installed in the same audit schema
async fn schema_users<C: CatalogInspector>(
    catalog: &C,
    names: &ResolvedNames,
    tracked: &[TrackedTable],
) -> Result<Vec<String>> {
    let mut users = Vec::new();
    for other in tracked {
        let other = resolve_names(other)?;
        let same_source =
            other.source_schema == names.source_schema && other.source_table == names.source_table;
        if same_source || other.schema != names.schema {
            continue;
        }

        for trigger in [ROW_TRIGGER_NAME, STATEMENT_TRIGGER_NAME] {
            let id = DbObjectId::Trigger {
                schema: other.source_schema.clone(),
                table: other.source_table.clone(),
                name: trigger.to_string(),
            };
            if catalog.exists(&id).await? {
                users.push(format!("{}.{}", other.source_schema, other.source_table));
                break;
            }
        }
    }
    Ok(users)
}

/// Functions and triggers are regenerated as a unit rather than diffed one by one.
///
/// Up: anything missing re-emits every create, in order.
/// Down: anything present emits every drop, in reverse order.
fn all_or_nothing(specs: &[AuditObjectSpec], direction: Direction) -> Option<Vec<MigrationStep>> {
    match direction {
        Direction::Up if specs.iter().any(|s| !s.exists) => {
            Some(specs.iter().flat_map(|s| s.up.clone()).collect())
        }
        Direction::Down if specs.iter().any(|s| s.exists) => {
            Some(specs.iter().rev().flat_map(|s| s.down.clone()).collect())
        }
        _ => None,
    }
}
