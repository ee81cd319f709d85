//! Error context extracted from PostgreSQL errors raised while executing
//! generated DDL.

use sqlx::postgres::{PgDatabaseError, PgErrorPosition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlErrorContext {
    pub message: String,
    /// Line within the failing statement, from the server's character position
    pub line_number: Option<usize>,
    pub detail: Option<String>,
    pub hint: Option<String>,
    /// PL/pgSQL context, e.g. the line of `log_action` that failed
    pub context: Option<String>,
    /// SQLSTATE, e.g. "42P01" for undefined_table
    pub code: Option<String>,
}

impl SqlErrorContext {
    pub fn from_sqlx_error(error: &sqlx::Error, sql: &str) -> Self {
        if let Some(db_error) = error.as_database_error()
            && let Some(pg_error) = db_error.try_downcast_ref::<PgDatabaseError>()
        {
            let line_number = pg_error
                .position()
                .map(|pos| match pos {
                    PgErrorPosition::Original(p) => p,
                    PgErrorPosition::Internal { position, .. } => position,
                })
                .map(|p| position_to_line(sql, p));

            return Self {
                message: pg_error.message().to_string(),
                line_number,
                detail: pg_error.detail().map(str::to_string),
                hint: pg_error.hint().map(str::to_string),
                context: pg_error.r#where().map(str::to_string),
                code: Some(pg_error.code().to_string()),
            };
        }

        Self {
            message: error.to_string(),
            line_number: None,
            detail: None,
            hint: None,
            context: None,
            code: None,
        }
    }

    /// Render the error for the statement labelled `label` (usually the object id)
    pub fn format(&self, label: &str, sql: &str) -> String {
        let mut msg = format!("SQL error while applying {}", label);
        if let Some(line) = self.line_number {
            msg.push_str(&format!(" at line {}", line));
        }
        if let Some(code) = &self.code {
            msg.push_str(&format!(" [{}]", code));
        }
        msg.push_str(":\n\n");
        msg.push_str(&format!("  {}\n", self.message));

        if let Some(detail) = &self.detail {
            msg.push_str(&format!("\n  Detail: {}", detail));
        }
        if let Some(hint) = &self.hint {
            msg.push_str(&format!("\n  Hint: {}", hint));
        }
        if let Some(ctx) = &self.context {
            msg.push_str(&format!("\n  Context: {}", ctx));
        }

        if let Some(line) = self.line_number {
            msg.push_str(&format!("\n\n{}", format_line_context(sql, line)));
        }

        msg
    }
}

/// Convert a 1-indexed character position to a line number
pub fn position_to_line(content: &str, position: usize) -> usize {
    content
        .chars()
        .take(position.saturating_sub(1))
        .filter(|c| *c == '\n')
        .count()
        + 1
}

/// Show the lines around `error_line`, marking the failing one
pub fn format_line_context(content: &str, error_line: usize) -> String {
    const CONTEXT_LINES: usize = 3;

    let lines: Vec<&str> = content.lines().collect();
    let error_idx = error_line.saturating_sub(1);
    let start_idx = error_idx.saturating_sub(CONTEXT_LINES);
    let end_idx = (error_idx + CONTEXT_LINES + 1).min(lines.len());

    let mut result = String::new();
    if start_idx > 0 {
        result.push_str(&format!("  ... [{} lines above]\n", start_idx));
    }
    for (idx, line) in lines.iter().enumerate().take(end_idx).skip(start_idx) {
        let line_num = idx + 1;
        let marker = if line_num == error_line { ">" } else { " " };
        result.push_str(&format!("  {} {:4} | {}\n", marker, line_num, line));
    }
    if end_idx < lines.len() {
        result.push_str(&format!("  ... [{} lines below]", lines.len() - end_idx));
    }

    result
}
