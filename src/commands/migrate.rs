use super::select_tables;
use crate::catalog::{Overlay, PgCatalog};
use crate::config::{Config, TrackedTable};
use crate::db::{apply_command, connect_to_database};
use crate::planner::{Direction, MigrationCommand, plan_among};
use crate::prompts::confirm_destructive;
use crate::render::Safety;
use anyhow::{Context, Result};
use console::style;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Print the plan, change nothing
    DryRun,
    /// Apply without asking
    Force,
    /// Ask before destructive steps
    Interactive,
    /// Refuse destructive steps (non-interactive sessions without --force)
    RequireApproval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateOutcome {
    Applied { statements: usize },
    DryRun,
    Cancelled,
    /// Destructive steps were planned but not approved
    DestructiveRequired,
}

pub async fn cmd_migrate(
    config: &Config,
    direction: Direction,
    table: Option<&str>,
    mode: ExecutionMode,
) -> Result<MigrateOutcome> {
    let models = select_tables(config, table)?;
    let pool = connect_to_database(&config.database.url, "audit database").await?;
    let catalog = PgCatalog::new(pool);

    // Plan every model against the live catalog plus the steps planned before it,
    // so shared objects show up once
    let mut overlay = Overlay::new(&catalog);
    let mut preview = Vec::with_capacity(models.len());
    for model in &models {
        let command = plan_among(&overlay, model, &config.tables, direction).await?;
        overlay.apply(&command);
        preview.push((*model, command));
    }

    let destructive = preview.iter().any(|(_, c)| c.has_destructive());
    let outcome = match mode {
        ExecutionMode::DryRun => {
            print_plan(&preview);
            Some(MigrateOutcome::DryRun)
        }
        _ if preview.iter().all(|(_, c)| c.is_empty()) => {
            println!("✅ Audit objects already {}", state_label(direction));
            Some(MigrateOutcome::Applied { statements: 0 })
        }
        ExecutionMode::RequireApproval if destructive => {
            print_plan(&preview);
            eprintln!(
                "❌ {}",
                style("Destructive changes require confirmation. Re-run with --force to apply them")
                    .red()
            );
            Some(MigrateOutcome::DestructiveRequired)
        }
        ExecutionMode::Interactive if destructive => {
            print_plan(&preview);
            if confirm_destructive("Drop the audit objects listed above?")? {
                None
            } else {
                println!("❌ Migration cancelled by user");
                Some(MigrateOutcome::Cancelled)
            }
        }
        _ => None,
    };

    if let Some(outcome) = outcome {
        catalog.pool().close().await;
        return Ok(outcome);
    }

    // Re-plan against the live catalog right before each transaction: the
    // previous model's commit may have created shared objects
    let mut statements = 0;
    for model in &models {
        let command = plan_among(&catalog, model, &config.tables, direction).await?;
        statements += apply_command(catalog.pool(), &command)
            .await
            .with_context(|| format!("Failed to migrate {} for {}", direction, model.table))?;
        println!("✅ {} {}", model.table, state_label(direction));
    }

    catalog.pool().close().await;
    info!("Migration {} finished: {} statement(s)", direction, statements);
    Ok(MigrateOutcome::Applied { statements })
}

fn state_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "installed",
        Direction::Down => "removed",
    }
}

/// Print the planned statements of every model
pub fn print_plan(plan: &[(&TrackedTable, MigrationCommand)]) {
    println!("\n📋 {}", style("Audit Migration Plan").bold().underlined());

    for (model, command) in plan {
        println!(
            "\n{} {} {}",
            style(command.direction).cyan(),
            style(&model.table).bold(),
            style("─".repeat(40)).dim()
        );
        if command.is_empty() {
            println!("   {}", style("nothing to do").dim());
            continue;
        }
        for step in command.statements() {
            let label = match step.safety {
                Safety::Safe => style("SAFE").green(),
                Safety::Destructive => style("DESTRUCTIVE").red(),
            };
            let first_line = step.sql.lines().next().unwrap_or_default();
            println!("   {} {}", label, style(first_line).dim());
        }
    }
    println!();
}
