//! SQL rendering for function operations

use crate::catalog::id::DbObjectId;
use crate::operations::{FunctionOperation, SqlRenderer};
use crate::render::{RenderedSql, Safety, qualified_ident};

impl SqlRenderer for FunctionOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            FunctionOperation::Create { definition, .. } => vec![RenderedSql {
                sql: if definition.trim_end().ends_with(';') {
                    definition.clone()
                } else {
                    format!("{};", definition.trim_end())
                },
                safety: Safety::Safe,
            }],
            FunctionOperation::Drop {
                schema,
                name,
                parameter_types,
            } => vec![RenderedSql {
                sql: format!(
                    "DROP FUNCTION IF EXISTS {}({});",
                    qualified_ident(schema, name),
                    parameter_types
                ),
                safety: Safety::Destructive,
            }],
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            FunctionOperation::Create { schema, name, .. }
            | FunctionOperation::Drop { schema, name, .. } => DbObjectId::Function {
                schema: schema.clone(),
                name: name.clone(),
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, FunctionOperation::Drop { .. })
    }
}
