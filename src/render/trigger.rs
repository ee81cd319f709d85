//! SQL rendering for trigger operations

use crate::catalog::id::DbObjectId;
use crate::operations::{SqlRenderer, TriggerOperation};
use crate::render::{RenderedSql, Safety, escape_string, qualified_ident, quote_ident};
use itertools::Itertools;

impl SqlRenderer for TriggerOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            TriggerOperation::Create { trigger } => vec![RenderedSql {
                sql: format!(
                    "CREATE OR REPLACE TRIGGER {} AFTER {} ON {} FOR EACH {} EXECUTE FUNCTION {}({});",
                    quote_ident(&trigger.name),
                    trigger.events.iter().join(" OR "),
                    qualified_ident(&trigger.schema, &trigger.table),
                    trigger.level,
                    qualified_ident(&trigger.function_schema, &trigger.function_name),
                    trigger.arguments.iter().map(|a| escape_string(a)).join(", ")
                ),
                safety: Safety::Safe,
            }],
            TriggerOperation::Drop {
                schema,
                table,
                name,
            } => vec![RenderedSql {
                sql: format!(
                    "DROP TRIGGER IF EXISTS {} ON {};",
                    quote_ident(name),
                    qualified_ident(schema, table)
                ),
                safety: Safety::Destructive,
            }],
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            TriggerOperation::Create { trigger } => DbObjectId::Trigger {
                schema: trigger.schema.clone(),
                table: trigger.table.clone(),
                name: trigger.name.clone(),
            },
            TriggerOperation::Drop {
                schema,
                table,
                name,
            } => DbObjectId::Trigger {
                schema: schema.clone(),
                table: table.clone(),
                name: name.clone(),
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TriggerOperation::Drop { .. })
    }
}
