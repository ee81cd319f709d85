use crate::catalog::PgCatalog;
use crate::check::{HealthReport, TableHealth};
use crate::config::Config;
use crate::db::connect_to_database;
use anyhow::Result;
use console::style;
use tracing::info;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckFormat {
    /// Human-readable report
    Human,
    /// JSON for scripts and CI
    Json,
}

/// Check the audit installation. Returns whether everything is in place.
pub async fn cmd_check(config: &Config, table: Option<&str>, format: CheckFormat) -> Result<bool> {
    let pool = connect_to_database(&config.database.url, "audit database").await?;
    let catalog = PgCatalog::new(pool);

    info!("Checking audit installation");
    let report = HealthReport::collect(&catalog, config, table).await?;
    catalog.pool().close().await;

    match format {
        CheckFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        CheckFormat::Human => print_report(&report),
    }

    Ok(report.healthy)
}

pub fn print_report(report: &HealthReport) {
    println!(
        "🔍 {} ({} {})",
        style("Audit installation").bold(),
        if report.schemas.len() == 1 { "schema" } else { "schemas" },
        report.schemas.join(", ")
    );
    if report.missing.is_empty() {
        println!("   ✅ schema, action_type and log_action present");
    } else {
        for missing in &report.missing {
            println!("   ❌ {}", style(missing).red());
        }
    }

    if !report.tables.is_empty() {
        println!("\n📋 {}", style("Tracked tables").bold());
        for table in &report.tables {
            println!("   {}", describe_table(table));
        }
    }

    println!();
    if report.healthy {
        println!("{}", style("Audit logging is healthy").green());
    } else {
        println!(
            "{}",
            style("Audit logging is incomplete. Run `pgtrail migrate up` to install it").yellow()
        );
    }
}

fn describe_table(table: &TableHealth) -> String {
    match table.status {
        Some(status) if status.valid => format!("✅ {}", table.table),
        Some(_) => format!(
            "⚠️  {} {}",
            table.table,
            style("(audit triggers missing)").yellow()
        ),
        None => format!("❌ {} {}", table.table, style("(not tracked)").red()),
    }
}
