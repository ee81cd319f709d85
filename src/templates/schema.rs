use super::AuditObjectSpec;
use crate::catalog::{CatalogInspector, DbObjectId};
use crate::operations::{MigrationStep, SchemaOperation};
use anyhow::Result;

pub async fn generate<C: CatalogInspector>(catalog: &C, schema: &str) -> Result<AuditObjectSpec> {
    let id = DbObjectId::Schema {
        name: schema.to_string(),
    };
    let exists = catalog.exists(&id).await?;

    Ok(AuditObjectSpec {
        id,
        exists,
        up: vec![MigrationStep::Schema(SchemaOperation::Create {
            name: schema.to_string(),
        })],
        down: vec![MigrationStep::Schema(SchemaOperation::Drop {
            name: schema.to_string(),
        })],
    })
}
