use super::AuditObjectSpec;
use crate::catalog::{CatalogInspector, DbObjectId};
use crate::constants::{DELETE_KEYS_FUNCTION, DELETE_VALUES_FUNCTION, LOG_ACTION_FUNCTION};
use crate::operations::{FunctionOperation, MigrationStep};
use crate::render::audit_functions::{
    DELETE_KEYS_PARAMETERS, DELETE_VALUES_PARAMETERS, LOG_ACTION_PARAMETERS,
    render_delete_keys_function, render_delete_values_function, render_log_action_function,
};
use anyhow::Result;

/// The two JSON utilities followed by the trigger function that uses them.
///
/// The returned order is the creation order; teardown walks it backwards.
pub async fn generate<C: CatalogInspector>(
    catalog: &C,
    schema: &str,
    audit_table: &str,
    changeset_tracking: bool,
) -> Result<Vec<AuditObjectSpec>> {
    let definitions = [
        (
            DELETE_KEYS_FUNCTION,
            DELETE_KEYS_PARAMETERS,
            render_delete_keys_function(schema),
        ),
        (
            DELETE_VALUES_FUNCTION,
            DELETE_VALUES_PARAMETERS,
            render_delete_values_function(schema),
        ),
        (
            LOG_ACTION_FUNCTION,
            LOG_ACTION_PARAMETERS,
            render_log_action_function(schema, audit_table, changeset_tracking),
        ),
    ];

    let mut specs = Vec::with_capacity(definitions.len());
    for (name, parameter_types, definition) in definitions {
        let id = DbObjectId::Function {
            schema: schema.to_string(),
            name: name.to_string(),
        };
        let exists = catalog.exists(&id).await?;

        specs.push(AuditObjectSpec {
            id,
            exists,
            up: vec![MigrationStep::Function(FunctionOperation::Create {
                schema: schema.to_string(),
                name: name.to_string(),
                definition,
            })],
            down: vec![MigrationStep::Function(FunctionOperation::Drop {
                schema: schema.to_string(),
                name: name.to_string(),
                parameter_types: parameter_types.to_string(),
            })],
        });
    }

    Ok(specs)
}
