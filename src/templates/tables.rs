use crate::catalog::{CatalogInspector, DbObjectId};
use crate::constants::ACTION_TYPE_NAME;
use crate::operations::{
    ColumnDefinition, IndexOperation, IndexTarget, MigrationStep, TableOperation,
};
use crate::render::qualified_ident;
use anyhow::Result;

/// A named index on a generated table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: String,
    pub target: IndexTarget,
}

impl IndexSpec {
    /// Btree index named `<table>_<col>_..._idx`
    pub fn columns(table: &str, columns: &[&str]) -> Self {
        Self {
            name: format!("{}_{}_idx", table, columns.join("_")),
            target: IndexTarget::Columns(columns.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// Index named `<table>_<suffix>_idx` whose definition is given verbatim
    pub fn clause(table: &str, suffix: &str, clause: &str) -> Self {
        Self {
            name: format!("{}_{}_idx", table, suffix),
            target: IndexTarget::Clause(clause.to_string()),
        }
    }
}

/// A generated table: columns in declaration order plus its indexes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTableSpec {
    pub schema: String,
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexSpec>,
    pub exists: bool,
}

impl AuditTableSpec {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Table {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    /// Create the table, then each index in declared order
    pub fn up(&self) -> Vec<MigrationStep> {
        let mut steps = vec![MigrationStep::Table(TableOperation::Create {
            schema: self.schema.clone(),
            name: self.name.clone(),
            columns: self.columns.clone(),
        })];
        steps.extend(self.indexes.iter().map(|index| {
            MigrationStep::Index(IndexOperation::Create {
                schema: self.schema.clone(),
                table: self.name.clone(),
                name: index.name.clone(),
                target: index.target.clone(),
            })
        }));
        steps
    }

    /// Dropping the table takes its indexes with it
    pub fn down(&self) -> Vec<MigrationStep> {
        vec![MigrationStep::Table(TableOperation::Drop {
            schema: self.schema.clone(),
            name: self.name.clone(),
        })]
    }

    async fn inspect<C: CatalogInspector>(mut self, catalog: &C) -> Result<Self> {
        self.exists = catalog.exists(&self.id()).await?;
        Ok(self)
    }
}

/// Table grouping audit rows under one request or business transaction
pub fn changeset_table(schema: &str, name: &str) -> AuditTableSpec {
    AuditTableSpec {
        schema: schema.to_string(),
        name: name.to_string(),
        columns: vec![
            ColumnDefinition::new("id", "bigserial PRIMARY KEY"),
            ColumnDefinition::new("transaction_id", "bigint"),
            ColumnDefinition::new("user_id", "text"),
            ColumnDefinition::new("session_id", "text"),
            ColumnDefinition::new("request_date", "timestamptz NOT NULL DEFAULT now()"),
            ColumnDefinition::new("request_url", "text"),
            ColumnDefinition::new("request_addr", "inet"),
        ],
        indexes: vec![
            IndexSpec::columns(name, &["transaction_id"]),
            IndexSpec::columns(name, &["user_id"]),
            IndexSpec::columns(name, &["request_date"]),
        ],
        exists: false,
    }
}

/// The append-only table written by `log_action`.
///
/// With a changeset table every row may reference a changeset.
pub fn audit_table(schema: &str, name: &str, changeset: Option<&str>) -> AuditTableSpec {
    let mut columns = vec![
        ColumnDefinition::new("id", "bigserial PRIMARY KEY"),
        ColumnDefinition::new("schema_name", "text NOT NULL"),
        ColumnDefinition::new("table_name", "text NOT NULL"),
        ColumnDefinition::new("relid", "oid NOT NULL"),
        ColumnDefinition::new("session_user_name", "text"),
        ColumnDefinition::new("action_tstamp_tx", "timestamptz NOT NULL"),
        ColumnDefinition::new("action_tstamp_stm", "timestamptz NOT NULL"),
        ColumnDefinition::new("action_tstamp_clk", "timestamptz NOT NULL"),
        ColumnDefinition::new("transaction_id", "bigint"),
        ColumnDefinition::new("application_name", "text"),
        ColumnDefinition::new("client_addr", "inet"),
        ColumnDefinition::new("client_port", "integer"),
        ColumnDefinition::new("client_query", "text"),
        ColumnDefinition::new(
            "action",
            format!("{} NOT NULL", qualified_ident(schema, ACTION_TYPE_NAME)),
        ),
        ColumnDefinition::new("row_data", "jsonb"),
        ColumnDefinition::new("changed_fields", "jsonb"),
        ColumnDefinition::new("statement_only", "boolean NOT NULL"),
    ];
    let mut indexes = vec![
        IndexSpec::columns(name, &["relid"]),
        IndexSpec::columns(name, &["action_tstamp_stm"]),
        IndexSpec::columns(name, &["action"]),
    ];

    if let Some(changeset) = changeset {
        columns.push(ColumnDefinition::new(
            "changeset_id",
            format!("bigint REFERENCES {} (\"id\")", qualified_ident(schema, changeset)),
        ));
        indexes.push(IndexSpec::columns(name, &["changeset_id"]));
    }

    indexes.push(IndexSpec::clause(
        name,
        "row_data_gin",
        "USING gin (row_data jsonb_path_ops)",
    ));

    AuditTableSpec {
        schema: schema.to_string(),
        name: name.to_string(),
        columns,
        indexes,
        exists: false,
    }
}

/// Table specs in declared order: the changeset table (if any), then the audit table
pub async fn generate<C: CatalogInspector>(
    catalog: &C,
    schema: &str,
    audit: &str,
    changeset: Option<&str>,
) -> Result<Vec<AuditTableSpec>> {
    let mut specs = Vec::with_capacity(2);
    if let Some(changeset) = changeset {
        specs.push(changeset_table(schema, changeset).inspect(catalog).await?);
    }
    specs.push(audit_table(schema, audit, changeset).inspect(catalog).await?);
    Ok(specs)
}
