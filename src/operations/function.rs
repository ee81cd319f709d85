//! Function operations

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionOperation {
    Create {
        schema: String,
        name: String,
        /// Complete CREATE OR REPLACE FUNCTION statement
        definition: String,
    },
    Drop {
        schema: String,
        name: String,
        /// Argument types identifying the overload, e.g. `jsonb, text[]`
        parameter_types: String,
    },
}
