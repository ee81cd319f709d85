use anyhow::{Result, bail};
use std::fmt;

/// Identifier for every database object the audit installation manages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DbObjectId {
    Schema {
        name: String,
    },
    Type {
        schema: String,
        name: String,
    },
    Function {
        schema: String,
        name: String,
    },
    Table {
        schema: String,
        name: String,
    },
    Index {
        schema: String,
        table: String,
        name: String,
    },
    Trigger {
        schema: String,
        table: String,
        name: String,
    },
}

impl DbObjectId {
    /// Get the schema name for this object.
    /// For Schema the name is the schema itself.
    pub fn schema(&self) -> &str {
        match self {
            DbObjectId::Schema { name } => name.as_str(),
            DbObjectId::Type { schema, .. }
            | DbObjectId::Function { schema, .. }
            | DbObjectId::Table { schema, .. }
            | DbObjectId::Index { schema, .. }
            | DbObjectId::Trigger { schema, .. } => schema.as_str(),
        }
    }

    /// True when this object lives on (and disappears with) the given table
    pub fn is_attached_to(&self, schema: &str, table: &str) -> bool {
        match self {
            DbObjectId::Index {
                schema: s,
                table: t,
                ..
            }
            | DbObjectId::Trigger {
                schema: s,
                table: t,
                ..
            } => s == schema && t == table,
            _ => false,
        }
    }
}

impl fmt::Display for DbObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema { name } => write!(f, "schema {name}"),
            Self::Type { schema, name } => write!(f, "type {schema}.{name}"),
            Self::Function { schema, name } => write!(f, "function {schema}.{name}"),
            Self::Table { schema, name } => write!(f, "table {schema}.{name}"),
            Self::Index {
                schema,
                table,
                name,
            } => write!(f, "index {schema}.{name} on {table}"),
            Self::Trigger {
                schema,
                table,
                name,
            } => write!(f, "trigger {name} on {schema}.{table}"),
        }
    }
}

/// A table name as written in configuration: `name` or `schema.name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub schema: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let parts: Vec<&str> = input.split('.').collect();
        let (schema, name) = match parts.as_slice() {
            [name] => (None, *name),
            [schema, name] => (Some(*schema), *name),
            _ => bail!(
                "Invalid table name '{}': expected 'table' or 'schema.table'",
                input
            ),
        };

        if name.is_empty() || schema.is_some_and(str::is_empty) {
            bail!(
                "Invalid table name '{}': schema and table parts must not be empty",
                input
            );
        }

        Ok(Self {
            schema: schema.map(str::to_string),
            name: name.to_string(),
        })
    }

    pub fn qualified(schema: &str, name: &str) -> Self {
        Self {
            schema: Some(schema.to_string()),
            name: name.to_string(),
        }
    }

    pub fn schema_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.schema.as_deref().unwrap_or(default)
    }

    /// Qualify an unqualified name with the given schema
    pub fn with_default_schema(&self, default: &str) -> Self {
        Self {
            schema: Some(self.schema_or(default).to_string()),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
