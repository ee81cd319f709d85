use crate::catalog::QualifiedName;
use crate::config::{merge::Merge, types::*};
use crate::constants::{DEFAULT_AUDIT_TABLE, DEFAULT_SCHEMA};
use crate::planner::{ResolvedNames, resolve_names};
use crate::templates::TriggerOptions;
use anyhow::{Context, Result, anyhow};
use std::collections::{BTreeMap, BTreeSet};

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();
        let audit = self.resolve_audit(&defaults.audit);
        let tables = self.resolve_tables(&audit)?;

        Ok(Config {
            database: self.resolve_database(&defaults.database),
            audit,
            tables,
        })
    }

    fn resolve_database(&self, defaults: &Database) -> Database {
        let url = self
            .config_input
            .database
            .as_ref()
            .and_then(|d| d.url.as_ref())
            .cloned()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| defaults.url.clone());

        Database { url }
    }

    fn resolve_audit(&self, defaults: &Audit) -> Audit {
        Audit {
            schema: self
                .config_input
                .audit
                .as_ref()
                .and_then(|a| a.schema.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.schema.clone()),
        }
    }

    fn resolve_tables(&self, audit: &Audit) -> Result<Vec<TrackedTable>> {
        let inputs = self.config_input.tables.as_deref().unwrap_or_default();

        let mut seen_sources = BTreeSet::new();
        // audit schema -> the first model writing into it
        let mut schema_owners: BTreeMap<String, (String, ResolvedNames)> = BTreeMap::new();
        let mut tables = Vec::with_capacity(inputs.len());

        for input in inputs {
            let tracked = resolve_tracked_table(input, &audit.schema)
                .with_context(|| format!("Invalid configuration for table '{}'", input.table))?;
            let names = resolve_names(&tracked)
                .with_context(|| format!("Invalid configuration for table '{}'", input.table))?;

            let source = format!("{}.{}", names.source_schema, names.source_table);
            if !seen_sources.insert(source.clone()) {
                return Err(anyhow!("Table '{}' is tracked more than once", source));
            }

            match schema_owners.get(&names.schema) {
                Some((owner, existing)) => check_shared_schema(&source, &names, owner, existing)?,
                None => {
                    schema_owners.insert(names.schema.clone(), (source, names));
                }
            }

            tables.push(tracked);
        }

        Ok(tables)
    }
}

/// All tables writing into one audit schema share its `log_action`, which
/// inserts into a single audit table and links a single changeset table.
fn check_shared_schema(
    source: &str,
    names: &ResolvedNames,
    owner: &str,
    existing: &ResolvedNames,
) -> Result<()> {
    let schema = &names.schema;
    if names.audit_table != existing.audit_table {
        return Err(anyhow!(
            "Table '{}' writes to audit table '{}.{}', but '{}' already writes to '{}.{}'. \
             Tracked tables in audit schema '{}' must share one audit table",
            source,
            schema,
            names.audit_table,
            owner,
            schema,
            existing.audit_table,
            schema
        ));
    }

    if names.changeset_table != existing.changeset_table {
        let describe = |changeset: &Option<String>| match changeset {
            Some(name) => format!("changeset table '{}.{}'", schema, name),
            None => "no changeset table".to_string(),
        };
        return Err(anyhow!(
            "Table '{}' has {}, but '{}' has {}. \
             Tracked tables in audit schema '{}' must use the same changeset table",
            source,
            describe(&names.changeset_table),
            owner,
            describe(&existing.changeset_table),
            schema
        ));
    }

    Ok(())
}

fn resolve_tracked_table(input: &TrackedTableInput, audit_schema: &str) -> Result<TrackedTable> {
    let table = QualifiedName::parse(&input.table)?.with_default_schema(DEFAULT_SCHEMA);
    let mut audit_table =
        QualifiedName::parse(input.audit_table.as_deref().unwrap_or(DEFAULT_AUDIT_TABLE))?;
    let mut changeset_table = input
        .changeset_table
        .as_deref()
        .map(QualifiedName::parse)
        .transpose()?;

    // The configured audit schema only applies when the model names no schema at all
    let unqualified = audit_table.schema.is_none()
        && changeset_table.as_ref().is_none_or(|c| c.schema.is_none());
    if unqualified {
        audit_table = audit_table.with_default_schema(audit_schema);
        changeset_table = changeset_table.map(|c| c.with_default_schema(audit_schema));
    }

    let defaults = TriggerOptions::default();
    Ok(TrackedTable {
        table,
        audit_table,
        changeset_table,
        trigger_options: TriggerOptions {
            capture_query: input.capture_query.unwrap_or(defaults.capture_query),
            exclude_columns: input
                .exclude_columns
                .clone()
                .unwrap_or(defaults.exclude_columns),
            capture_session: input.capture_session.unwrap_or(defaults.capture_session),
        },
    })
}
