use crate::helpers::cli::CliTestHelper;
use anyhow::Result;
use predicates::prelude::*;

const CONFIG: &str = r#"
audit:
  schema: audit
tables:
  - table: orders
    changeset_table: changesets
    exclude_columns: [updated_at]
"#;

#[test]
fn test_offline_up_script() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.write_config(CONFIG)?;

    helper
        .command()
        .args(["script", "up", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-- pgtrail up: public.orders"))
        .stdout(predicate::str::contains("CREATE SCHEMA \"audit\";"))
        .stdout(predicate::str::contains(
            "CREATE TYPE \"audit\".\"action_type\" AS ENUM ('INSERT', 'SELECT', 'UPDATE', 'DELETE', 'TRUNCATE');",
        ))
        .stdout(predicate::str::contains("CREATE TABLE \"audit\".\"changesets\""))
        .stdout(predicate::str::contains(
            "EXECUTE FUNCTION \"audit\".\"log_action\"('true', '{\"updated_at\"}', 'true');",
        ));
    Ok(())
}

#[test]
fn test_offline_down_script() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.write_config(CONFIG)?;

    helper
        .command()
        .args(["script", "down", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "DROP TRIGGER IF EXISTS \"log_action_stmt_trigger\" ON \"public\".\"orders\";",
        ))
        .stdout(predicate::str::contains("DROP TABLE \"audit\".\"changesets\";"))
        .stdout(predicate::str::contains("DROP SCHEMA").not());
    Ok(())
}

#[test]
fn test_unknown_table_is_rejected() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.write_config(CONFIG)?;

    helper
        .command()
        .args(["script", "up", "--offline", "--table", "customers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table 'customers' is not tracked"));
    Ok(())
}

#[test]
fn test_invalid_direction_is_rejected() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.write_config(CONFIG)?;

    helper
        .command()
        .args(["script", "sideways", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'sideways'"));
    Ok(())
}

#[test]
fn test_config_error_is_reported() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.write_config(
        r#"
tables:
  - table: orders
    audit_table: s1.audit
    changeset_table: s2.changeset
"#,
    )?;

    helper
        .command()
        .args(["script", "up", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be in the same schema"));
    Ok(())
}

#[test]
fn test_offline_down_for_one_of_two_tables_keeps_shared_objects() -> Result<()> {
    let helper = CliTestHelper::new();
    helper.write_config(
        r#"
audit:
  schema: audit
tables:
  - table: orders
  - table: users
"#,
    )?;

    helper
        .command()
        .args(["script", "down", "--offline", "--table", "orders"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "DROP TRIGGER IF EXISTS \"log_action_row_trigger\" ON \"public\".\"orders\";",
        ))
        .stdout(predicate::str::contains("DROP TABLE").not())
        .stdout(predicate::str::contains("DROP FUNCTION").not());
    Ok(())
}
