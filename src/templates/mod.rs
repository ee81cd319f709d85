//! DDL template generators for the fixed audit object graph.
//!
//! Every generator pairs the forward ("up") steps for one object kind with the
//! reverse ("down") steps and the object's current existence, as reported by a
//! [`CatalogInspector`](crate::catalog::CatalogInspector).

pub mod functions;
pub mod schema;
pub mod tables;
pub mod triggers;
pub mod types;

pub use tables::{AuditTableSpec, IndexSpec};
pub use triggers::TriggerOptions;

use crate::catalog::DbObjectId;
use crate::operations::MigrationStep;

/// One generated object with its forward and reverse steps.
///
/// `down` undoes exactly what `up` creates, in reverse order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditObjectSpec {
    pub id: DbObjectId,
    pub exists: bool,
    pub up: Vec<MigrationStep>,
    pub down: Vec<MigrationStep>,
}
