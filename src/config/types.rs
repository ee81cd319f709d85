use crate::catalog::QualifiedName;
use crate::constants::DEFAULT_SCHEMA;
use crate::templates::TriggerOptions;
use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub audit: Option<AuditInput>,
    pub tables: Option<Vec<TrackedTableInput>>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database: Database,
    pub audit: Audit,
    pub tables: Vec<TrackedTable>,
}

impl Config {
    /// Look up a tracked table by name; unqualified names mean `public`
    pub fn tracked_table(&self, name: &str) -> Option<&TrackedTable> {
        let wanted = QualifiedName::parse(name).ok()?.with_default_schema(DEFAULT_SCHEMA);
        self.tables
            .iter()
            .find(|t| t.table.with_default_schema(DEFAULT_SCHEMA) == wanted)
    }
}

// Database configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseInput {
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

// Audit installation settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditInput {
    pub schema: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Audit {
    /// Schema checked by the general health check, and used for tracked tables
    /// that qualify neither their audit nor their changeset table
    pub schema: String,
}

// Tracked tables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackedTableInput {
    pub table: String,
    pub audit_table: Option<String>,
    pub changeset_table: Option<String>,
    pub exclude_columns: Option<Vec<String>>,
    pub capture_query: Option<bool>,
    pub capture_session: Option<bool>,
}

/// One table whose changes are written to an audit table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTable {
    pub table: QualifiedName,
    pub audit_table: QualifiedName,
    pub changeset_table: Option<QualifiedName>,
    pub trigger_options: TriggerOptions,
}

impl TrackedTable {
    /// An unqualified source table is taken to be in `public`
    pub fn new(table: &str, audit_table: &str, changeset_table: Option<&str>) -> Result<Self> {
        Ok(Self {
            table: QualifiedName::parse(table)?.with_default_schema(DEFAULT_SCHEMA),
            audit_table: QualifiedName::parse(audit_table)?,
            changeset_table: changeset_table.map(QualifiedName::parse).transpose()?,
            trigger_options: TriggerOptions::default(),
        })
    }

    pub fn with_trigger_options(mut self, trigger_options: TriggerOptions) -> Self {
        self.trigger_options = trigger_options;
        self
    }
}

// CLI argument structures
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    #[arg(long, help = "Database URL (falls back to DATABASE_URL)")]
    pub database_url: Option<String>,
}

impl From<DatabaseArgs> for DatabaseInput {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            url: args.database_url,
        }
    }
}
