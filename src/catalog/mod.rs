//! Read-only existence predicates against the PostgreSQL catalog.
//!
//! Every planner and health-check decision goes through [`CatalogInspector`], so the
//! same logic runs against a live database ([`PgCatalog`]), a simulated one
//! ([`MemoryCatalog`]) or a live database with pending changes layered on top
//! ([`Overlay`]).

pub mod custom_type;
pub mod function;
pub mod id;
pub mod memory;
pub mod schema;
pub mod table;
pub mod triggers;

pub use id::{DbObjectId, QualifiedName};
pub use memory::{MemoryCatalog, Overlay};

use anyhow::Result;
use sqlx::PgPool;

/// Answers "does this object exist right now?".
///
/// A missing object is `Ok(false)`; errors are reserved for failures talking to
/// the catalog itself and are propagated unchanged.
#[allow(async_fn_in_trait)]
pub trait CatalogInspector {
    async fn exists(&self, id: &DbObjectId) -> Result<bool>;
}

/// Catalog inspector backed by a live connection pool
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CatalogInspector for PgCatalog {
    async fn exists(&self, id: &DbObjectId) -> Result<bool> {
        match id {
            DbObjectId::Schema { name } => schema::exists(&self.pool, name).await,
            DbObjectId::Type { schema, name } => {
                custom_type::exists(&self.pool, schema, name).await
            }
            DbObjectId::Function { schema, name } => {
                function::exists(&self.pool, schema, name).await
            }
            DbObjectId::Table { schema, name } => table::exists(&self.pool, schema, name).await,
            DbObjectId::Index { schema, name, .. } => {
                table::index_exists(&self.pool, schema, name).await
            }
            DbObjectId::Trigger {
                schema,
                table,
                name,
            } => triggers::exists(&self.pool, schema, table, name).await,
        }
    }
}

impl<C: CatalogInspector> CatalogInspector for &C {
    async fn exists(&self, id: &DbObjectId) -> Result<bool> {
        (**self).exists(id).await
    }
}
