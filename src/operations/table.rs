//! Table operations

/// One column of a generated table: its name and the full type/constraint clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub definition: String,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOperation {
    Create {
        schema: String,
        name: String,
        columns: Vec<ColumnDefinition>,
    },
    Drop {
        schema: String,
        name: String,
    },
}
