//! Type operations

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOperation {
    CreateEnum {
        schema: String,
        name: String,
        values: Vec<String>,
    },
    Drop {
        schema: String,
        name: String,
    },
}
