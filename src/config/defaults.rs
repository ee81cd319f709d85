use crate::config::types::*;
use crate::constants::DEFAULT_SCHEMA;

impl Default for Database {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/postgres".to_string(),
        }
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}
