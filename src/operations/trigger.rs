//! Trigger operations

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
    Truncate,
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            TriggerEvent::Insert => "INSERT",
            TriggerEvent::Update => "UPDATE",
            TriggerEvent::Delete => "DELETE",
            TriggerEvent::Truncate => "TRUNCATE",
        };
        f.write_str(keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerLevel {
    Row,
    Statement,
}

impl fmt::Display for TriggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerLevel::Row => f.write_str("ROW"),
            TriggerLevel::Statement => f.write_str("STATEMENT"),
        }
    }
}

/// An AFTER trigger bound to a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDefinition {
    pub schema: String,
    pub table: String,
    pub name: String,
    pub events: Vec<TriggerEvent>,
    pub level: TriggerLevel,
    pub function_schema: String,
    pub function_name: String,
    /// Literal arguments passed to the function (become TG_ARGV)
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOperation {
    Create {
        trigger: Box<TriggerDefinition>,
    },
    Drop {
        schema: String,
        table: String,
        name: String,
    },
}
