//! SQL rendering for type operations

use crate::catalog::id::DbObjectId;
use crate::operations::{SqlRenderer, TypeOperation};
use crate::render::{RenderedSql, Safety, escape_string, qualified_ident};
use itertools::Itertools;

impl SqlRenderer for TypeOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            TypeOperation::CreateEnum {
                schema,
                name,
                values,
            } => vec![RenderedSql {
                sql: format!(
                    "CREATE TYPE {} AS ENUM ({});",
                    qualified_ident(schema, name),
                    values.iter().map(|v| escape_string(v)).join(", ")
                ),
                safety: Safety::Safe,
            }],
            TypeOperation::Drop { schema, name } => vec![RenderedSql {
                sql: format!("DROP TYPE {};", qualified_ident(schema, name)),
                safety: Safety::Destructive,
            }],
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            TypeOperation::CreateEnum { schema, name, .. } | TypeOperation::Drop { schema, name } => {
                DbObjectId::Type {
                    schema: schema.clone(),
                    name: name.clone(),
                }
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TypeOperation::Drop { .. })
    }
}
