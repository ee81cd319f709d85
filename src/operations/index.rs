//! Index operations
//!
//! Indexes on audit tables are only ever created; they disappear together with
//! their table.

/// What an index covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTarget {
    /// Plain btree index over the listed columns
    Columns(Vec<String>),
    /// Everything after `ON table`, rendered verbatim (e.g. `USING gin (row_data jsonb_path_ops)`)
    Clause(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOperation {
    Create {
        schema: String,
        table: String,
        name: String,
        target: IndexTarget,
    },
}
