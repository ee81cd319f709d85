use super::AuditObjectSpec;
use crate::catalog::{CatalogInspector, DbObjectId};
use crate::constants::{LOG_ACTION_FUNCTION, ROW_TRIGGER_NAME, STATEMENT_TRIGGER_NAME};
use crate::operations::{
    MigrationStep, TriggerDefinition, TriggerEvent, TriggerLevel, TriggerOperation,
};
use crate::render::text_array_literal;
use anyhow::Result;

/// Per-table arguments handed to `log_action`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Record the client query text (TG_ARGV[0])
    pub capture_query: bool,
    /// Columns omitted from row_data and changed_fields (TG_ARGV[1])
    pub exclude_columns: Vec<String>,
    /// Record session user, application name and client address (TG_ARGV[2])
    pub capture_session: bool,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            capture_query: true,
            exclude_columns: Vec::new(),
            capture_session: true,
        }
    }
}

impl TriggerOptions {
    pub fn arguments(&self) -> Vec<String> {
        vec![
            self.capture_query.to_string(),
            text_array_literal(&self.exclude_columns),
            self.capture_session.to_string(),
        ]
    }
}

/// Row trigger first, then the statement trigger, both on `table_schema.table`
pub async fn generate<C: CatalogInspector>(
    catalog: &C,
    table_schema: &str,
    table: &str,
    function_schema: &str,
    options: &TriggerOptions,
) -> Result<Vec<AuditObjectSpec>> {
    let definitions = [
        (
            ROW_TRIGGER_NAME,
            vec![TriggerEvent::Insert, TriggerEvent::Update, TriggerEvent::Delete],
            TriggerLevel::Row,
        ),
        (
            STATEMENT_TRIGGER_NAME,
            vec![TriggerEvent::Truncate],
            TriggerLevel::Statement,
        ),
    ];

    let mut specs = Vec::with_capacity(definitions.len());
    for (name, events, level) in definitions {
        let id = DbObjectId::Trigger {
            schema: table_schema.to_string(),
            table: table.to_string(),
            name: name.to_string(),
        };
        let exists = catalog.exists(&id).await?;

        let trigger = TriggerDefinition {
            schema: table_schema.to_string(),
            table: table.to_string(),
            name: name.to_string(),
            events,
            level,
            function_schema: function_schema.to_string(),
            function_name: LOG_ACTION_FUNCTION.to_string(),
            arguments: options.arguments(),
        };

        specs.push(AuditObjectSpec {
            id,
            exists,
            up: vec![MigrationStep::Trigger(TriggerOperation::Create {
                trigger: Box::new(trigger),
            })],
            down: vec![MigrationStep::Trigger(TriggerOperation::Drop {
                schema: table_schema.to_string(),
                table: table.to_string(),
                name: name.to_string(),
            })],
        });
    }

    Ok(specs)
}
