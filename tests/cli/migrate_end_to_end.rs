use crate::helpers::cli::CliTestHelper;
use crate::helpers::harness::with_test_db;
use predicates::prelude::*;

fn config_for(url: &str) -> String {
    format!(
        r#"
database:
  url: {}
audit:
  schema: audit
tables:
  - table: orders
    changeset_table: changesets
"#,
        url
    )
}

#[tokio::test]
async fn test_migrate_up_check_and_down() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE orders (id int PRIMARY KEY, total numeric)").await;

        let helper = CliTestHelper::new();
        helper.write_config(&config_for(db.url())).unwrap();

        // not installed yet
        helper.command().arg("check").assert().code(1);

        helper
            .command()
            .args(["migrate", "up", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Audit Migration Plan"));
        helper.command().arg("check").assert().code(1);

        helper
            .command()
            .args(["migrate", "up"])
            .assert()
            .success()
            .stdout(predicate::str::contains("public.orders installed"));

        let output = helper
            .command()
            .args(["check", "--format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(report["healthy"], true);
        assert_eq!(report["tables"][0]["status"]["valid"], true);

        helper
            .command()
            .args(["migrate", "up"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already installed"));

        // destructive without a terminal requires --force
        helper.command().args(["migrate", "down"]).assert().code(2);

        helper
            .command()
            .args(["migrate", "down", "--force"])
            .assert()
            .success();

        let audit_table_exists: bool = db
            .scalar("SELECT to_regclass('audit.logged_actions') IS NOT NULL")
            .await;
        assert!(!audit_table_exists);
    })
    .await;
}
