//! SQL rendering for index operations

use crate::catalog::id::DbObjectId;
use crate::operations::{IndexOperation, IndexTarget, SqlRenderer};
use crate::render::{RenderedSql, Safety, qualified_ident, quote_ident};
use itertools::Itertools;

impl SqlRenderer for IndexOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            IndexOperation::Create {
                schema,
                table,
                name,
                target,
            } => {
                let target_sql = match target {
                    IndexTarget::Columns(columns) => {
                        format!("({})", columns.iter().map(|c| quote_ident(c)).join(", "))
                    }
                    IndexTarget::Clause(clause) => clause.clone(),
                };
                vec![RenderedSql {
                    sql: format!(
                        "CREATE INDEX {} ON {} {};",
                        quote_ident(name),
                        qualified_ident(schema, table),
                        target_sql
                    ),
                    safety: Safety::Safe,
                }]
            }
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            IndexOperation::Create {
                schema,
                table,
                name,
                ..
            } => DbObjectId::Index {
                schema: schema.clone(),
                table: table.clone(),
                name: name.clone(),
            },
        }
    }
}
