use crate::helpers::harness::with_test_db;
use pgtrail::catalog::triggers;

async fn setup(db: &crate::helpers::harness::TestDatabase) {
    db.execute("CREATE SCHEMA sales").await;
    db.execute("CREATE TABLE sales.orders (id int)").await;
    db.execute("CREATE TABLE public.orders (id int)").await;
    db.execute(
        "CREATE FUNCTION noop() RETURNS trigger LANGUAGE plpgsql AS $$ BEGIN RETURN NULL; END $$",
    )
    .await;
    db.execute(
        "CREATE TRIGGER log_action_row_trigger AFTER INSERT ON sales.orders FOR EACH ROW EXECUTE FUNCTION noop()",
    )
    .await;
}

#[tokio::test]
async fn test_trigger_exists_on_table() {
    with_test_db(async |db| {
        setup(db).await;
        assert!(
            triggers::exists(db.pool(), "sales", "orders", "log_action_row_trigger")
                .await
                .unwrap()
        );
        assert!(
            !triggers::exists(db.pool(), "sales", "orders", "log_action_stmt_trigger")
                .await
                .unwrap()
        );
    })
    .await;
}

#[tokio::test]
async fn test_trigger_lookup_is_scoped_to_table() {
    with_test_db(async |db| {
        setup(db).await;
        assert!(
            !triggers::exists(db.pool(), "public", "orders", "log_action_row_trigger")
                .await
                .unwrap()
        );
    })
    .await;
}

#[tokio::test]
async fn test_missing_table_is_not_an_error() {
    with_test_db(async |db| {
        assert!(
            !triggers::exists(db.pool(), "public", "nope", "log_action_row_trigger")
                .await
                .unwrap()
        );
    })
    .await;
}
