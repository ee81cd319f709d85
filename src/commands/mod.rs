pub mod check;
pub mod migrate;
pub mod script;

pub use check::{CheckFormat, cmd_check};
pub use migrate::{ExecutionMode, MigrateOutcome, cmd_migrate};
pub use script::{build_script, cmd_script};

use crate::config::{Config, TrackedTable};
use anyhow::{Result, bail};

/// The tracked tables a command should act on: all of them, or the single
/// table named with `--table`.
pub fn select_tables<'a>(config: &'a Config, table: Option<&str>) -> Result<Vec<&'a TrackedTable>> {
    match table {
        Some(name) => match config.tracked_table(name) {
            Some(model) => Ok(vec![model]),
            None => bail!("Table '{}' is not tracked in the configuration", name),
        },
        None if config.tables.is_empty() => {
            bail!("No tracked tables configured. Add a `tables:` section to pgtrail.yaml")
        }
        None => Ok(config.tables.iter().collect()),
    }
}
