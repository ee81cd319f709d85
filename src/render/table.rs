//! SQL rendering for table operations

use crate::catalog::id::DbObjectId;
use crate::operations::{SqlRenderer, TableOperation};
use crate::render::{RenderedSql, Safety, qualified_ident, quote_ident};

impl SqlRenderer for TableOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            TableOperation::Create {
                schema,
                name,
                columns,
            } => {
                let column_defs: Vec<String> = columns
                    .iter()
                    .map(|col| format!("    {} {}", quote_ident(&col.name), col.definition))
                    .collect();
                vec![RenderedSql {
                    sql: format!(
                        "CREATE TABLE {} (\n{}\n);",
                        qualified_ident(schema, name),
                        column_defs.join(",\n")
                    ),
                    safety: Safety::Safe,
                }]
            }
            TableOperation::Drop { schema, name } => vec![RenderedSql {
                sql: format!("DROP TABLE {};", qualified_ident(schema, name)),
                safety: Safety::Destructive,
            }],
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            TableOperation::Create { schema, name, .. } | TableOperation::Drop { schema, name } => {
                DbObjectId::Table {
                    schema: schema.clone(),
                    name: name.clone(),
                }
            }
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TableOperation::Drop { .. })
    }
}
