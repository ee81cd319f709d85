//! End-to-end tests of the pgtrail binary through assert_cmd.
//!
//! Offline commands need no database; `migrate_end_to_end` uses DATABASE_URL.

pub mod migrate_end_to_end;
pub mod script;
