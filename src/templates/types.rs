use super::AuditObjectSpec;
use crate::catalog::{CatalogInspector, DbObjectId};
use crate::constants::{ACTION_TYPE_NAME, ACTION_TYPE_VALUES};
use crate::operations::{MigrationStep, TypeOperation};
use anyhow::Result;

/// The `action_type` enum recording which operation produced an audit row
pub async fn generate<C: CatalogInspector>(catalog: &C, schema: &str) -> Result<AuditObjectSpec> {
    let id = DbObjectId::Type {
        schema: schema.to_string(),
        name: ACTION_TYPE_NAME.to_string(),
    };
    let exists = catalog.exists(&id).await?;

    Ok(AuditObjectSpec {
        id,
        exists,
        up: vec![MigrationStep::Type(TypeOperation::CreateEnum {
            schema: schema.to_string(),
            name: ACTION_TYPE_NAME.to_string(),
            values: ACTION_TYPE_VALUES.iter().map(|v| v.to_string()).collect(),
        })],
        down: vec![MigrationStep::Type(TypeOperation::Drop {
            schema: schema.to_string(),
            name: ACTION_TYPE_NAME.to_string(),
        })],
    })
}
