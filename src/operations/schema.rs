//! Schema operations

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOperation {
    Create { name: String },
    Drop { name: String },
}
