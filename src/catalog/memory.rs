//! Catalogs that track object existence in memory.

use super::{CatalogInspector, DbObjectId};
use crate::operations::MigrationStep;
use crate::planner::MigrationCommand;
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// The table a step drops, whose indexes and triggers disappear with it
fn dropped_table(step: &MigrationStep) -> Option<(String, String)> {
    match step.id() {
        DbObjectId::Table { schema, name } if step.is_drop() => Some((schema, name)),
        _ => None,
    }
}

/// A simulated catalog: the set of objects that exist.
///
/// Applying steps updates the set the way PostgreSQL would, including dropping
/// indexes and triggers together with their table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCatalog {
    objects: BTreeSet<DbObjectId>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(objects: impl IntoIterator<Item = DbObjectId>) -> Self {
        Self {
            objects: objects.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, id: DbObjectId) {
        self.objects.insert(id);
    }

    pub fn remove(&mut self, id: &DbObjectId) {
        self.objects.remove(id);
    }

    pub fn contains(&self, id: &DbObjectId) -> bool {
        self.objects.contains(id)
    }

    pub fn objects(&self) -> &BTreeSet<DbObjectId> {
        &self.objects
    }

    pub fn apply_step(&mut self, step: &MigrationStep) {
        let id = step.id();
        if step.is_create() {
            self.objects.insert(id);
        } else if step.is_drop() {
            if let Some((schema, table)) = dropped_table(step) {
                self.objects.retain(|o| !o.is_attached_to(&schema, &table));
            }
            self.objects.remove(&id);
        }
    }

    pub fn apply(&mut self, command: &MigrationCommand) {
        for step in &command.steps {
            self.apply_step(step);
        }
    }
}

impl CatalogInspector for MemoryCatalog {
    async fn exists(&self, id: &DbObjectId) -> Result<bool> {
        Ok(self.objects.contains(id))
    }
}

/// A catalog with pending, not yet executed steps layered over another one.
///
/// Used to plan several models in a row without touching the database: objects
/// created by an earlier plan are seen as existing by the next.
#[derive(Debug)]
pub struct Overlay<'a, C> {
    inner: &'a C,
    pending: BTreeMap<DbObjectId, bool>,
    /// Tables dropped by a pending step; their indexes and triggers are gone too
    dropped_tables: BTreeSet<(String, String)>,
}

impl<'a, C: CatalogInspector> Overlay<'a, C> {
    pub fn new(inner: &'a C) -> Self {
        Self {
            inner,
            pending: BTreeMap::new(),
            dropped_tables: BTreeSet::new(),
        }
    }

    pub fn apply(&mut self, command: &MigrationCommand) {
        for step in &command.steps {
            if step.is_create() {
                self.pending.insert(step.id(), true);
            } else if step.is_drop() {
                if let Some((schema, table)) = dropped_table(step) {
                    self.pending.retain(|id, _| !id.is_attached_to(&schema, &table));
                    self.dropped_tables.insert((schema, table));
                }
                self.pending.insert(step.id(), false);
            }
        }
    }
}

impl<C: CatalogInspector> CatalogInspector for Overlay<'_, C> {
    async fn exists(&self, id: &DbObjectId) -> Result<bool> {
        match self.pending.get(id) {
            Some(state) => {
                debug!("{} pending state: {}", id, state);
                Ok(*state)
            }
            None if self
                .dropped_tables
                .iter()
                .any(|(schema, table)| id.is_attached_to(schema, table)) =>
            {
                Ok(false)
            }
            None => self.inner.exists(id).await,
        }
    }
}
