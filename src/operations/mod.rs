//! Migration operations for the audit object graph
//!
//! Each object kind gets its own operation enum; [`MigrationStep`] wraps them so
//! the planner can hand out one ordered, renderable list.

use crate::catalog::id::DbObjectId;
use crate::render::RenderedSql;

pub use function::*;
pub use index::*;
pub use schema::*;
pub use table::*;
pub use trigger::*;
pub use types::*;

pub mod function;
pub mod index;
pub mod schema;
pub mod table;
pub mod trigger;
pub mod types;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStep {
    Schema(SchemaOperation),
    Type(TypeOperation),
    Table(TableOperation),
    Index(IndexOperation),
    Function(FunctionOperation),
    Trigger(TriggerOperation),
}

/// Trait for rendering SQL from operations
pub trait SqlRenderer {
    fn to_sql(&self) -> Vec<RenderedSql>;
    fn db_object_id(&self) -> DbObjectId;
    fn is_destructive(&self) -> bool {
        false
    }
}

impl SqlRenderer for MigrationStep {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            MigrationStep::Schema(op) => op.to_sql(),
            MigrationStep::Type(op) => op.to_sql(),
            MigrationStep::Table(op) => op.to_sql(),
            MigrationStep::Index(op) => op.to_sql(),
            MigrationStep::Function(op) => op.to_sql(),
            MigrationStep::Trigger(op) => op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            MigrationStep::Schema(op) => op.db_object_id(),
            MigrationStep::Type(op) => op.db_object_id(),
            MigrationStep::Table(op) => op.db_object_id(),
            MigrationStep::Index(op) => op.db_object_id(),
            MigrationStep::Function(op) => op.db_object_id(),
            MigrationStep::Trigger(op) => op.db_object_id(),
        }
    }

    fn is_destructive(&self) -> bool {
        match self {
            MigrationStep::Schema(op) => op.is_destructive(),
            MigrationStep::Type(op) => op.is_destructive(),
            MigrationStep::Table(op) => op.is_destructive(),
            MigrationStep::Index(op) => op.is_destructive(),
            MigrationStep::Function(op) => op.is_destructive(),
            MigrationStep::Trigger(op) => op.is_destructive(),
        }
    }
}

impl MigrationStep {
    /// Returns the database object ID for this migration step
    pub fn id(&self) -> DbObjectId {
        self.db_object_id()
    }

    /// Returns true if this step removes its object
    pub fn is_drop(&self) -> bool {
        self.is_destructive()
    }

    /// Returns true if this step creates (or replaces) its object
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            MigrationStep::Schema(SchemaOperation::Create { .. })
                | MigrationStep::Type(TypeOperation::CreateEnum { .. })
                | MigrationStep::Table(TableOperation::Create { .. })
                | MigrationStep::Index(IndexOperation::Create { .. })
                | MigrationStep::Function(FunctionOperation::Create { .. })
                | MigrationStep::Trigger(TriggerOperation::Create { .. })
        )
    }
}
