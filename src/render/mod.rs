pub mod audit_functions;
pub mod function;
pub mod index;
pub mod schema;
pub mod table;
pub mod trigger;
pub mod types;

use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Safety {
    Safe,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSql {
    pub safety: Safety,
    pub sql: String,
}

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `"schema"."name"`
pub fn qualified_ident(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(name))
}

pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Render a PostgreSQL text[] literal body, e.g. `{"a","b"}`, without the
/// surrounding string quotes
pub fn text_array_literal(items: &[String]) -> String {
    let elements = items
        .iter()
        .map(|item| format!("\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\"")))
        .join(",");
    format!("{{{}}}", elements)
}
