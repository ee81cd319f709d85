use super::{create_orders, migrate, orders_model, orders_model_with};
use crate::helpers::harness::with_test_db;
use pgtrail::planner::Direction;
use pgtrail::templates::TriggerOptions;

#[tokio::test]
async fn test_insert_records_row_data() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;

        let action: String = db.scalar("SELECT action::text FROM audit.logged_actions").await;
        assert_eq!(action, "INSERT");
        let row_data: String = db
            .scalar("SELECT row_data::text FROM audit.logged_actions")
            .await;
        assert_eq!(row_data, r#"{"a": 1, "b": 2, "c": 3, "id": 1}"#);
        let table: String = db
            .scalar("SELECT schema_name || '.' || table_name FROM audit.logged_actions")
            .await;
        assert_eq!(table, "public.orders");
        let statement_only: bool = db
            .scalar("SELECT statement_only FROM audit.logged_actions")
            .await;
        assert!(!statement_only);
    })
    .await;
}

#[tokio::test]
async fn test_update_records_only_changed_fields() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;
        db.execute("UPDATE orders SET b = 9 WHERE id = 1").await;

        let changed: String = db
            .scalar("SELECT changed_fields::text FROM audit.logged_actions WHERE action = 'UPDATE'")
            .await;
        assert_eq!(changed, r#"{"b": 9}"#);

        let old_row: String = db
            .scalar("SELECT row_data::text FROM audit.logged_actions WHERE action = 'UPDATE'")
            .await;
        assert_eq!(old_row, r#"{"a": 1, "b": 2, "c": 3, "id": 1}"#);
    })
    .await;
}

#[tokio::test]
async fn test_update_of_excluded_column_is_not_logged() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(
            db,
            &orders_model_with(TriggerOptions {
                exclude_columns: vec!["b".to_string()],
                ..Default::default()
            }),
            Direction::Up,
        )
        .await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;
        db.execute("UPDATE orders SET b = 9 WHERE id = 1").await;

        let updates: i64 = db
            .scalar("SELECT count(*) FROM audit.logged_actions WHERE action = 'UPDATE'")
            .await;
        assert_eq!(updates, 0);

        let insert_row: String = db
            .scalar("SELECT row_data::text FROM audit.logged_actions WHERE action = 'INSERT'")
            .await;
        assert_eq!(insert_row, r#"{"a": 1, "c": 3, "id": 1}"#);
    })
    .await;
}

#[tokio::test]
async fn test_no_op_update_is_not_logged() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;
        db.execute("UPDATE orders SET b = 2 WHERE id = 1").await;

        let count: i64 = db.scalar("SELECT count(*) FROM audit.logged_actions").await;
        assert_eq!(count, 1);
    })
    .await;
}

#[tokio::test]
async fn test_delete_records_old_row() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;
        db.execute("DELETE FROM orders WHERE id = 1").await;

        let row_data: String = db
            .scalar("SELECT row_data::text FROM audit.logged_actions WHERE action = 'DELETE'")
            .await;
        assert_eq!(row_data, r#"{"a": 1, "b": 2, "c": 3, "id": 1}"#);
    })
    .await;
}

#[tokio::test]
async fn test_truncate_records_statement_row() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;
        db.execute("TRUNCATE orders").await;

        let statement_only: bool = db
            .scalar("SELECT statement_only FROM audit.logged_actions WHERE action = 'TRUNCATE'")
            .await;
        assert!(statement_only);
        let row_data: Option<String> = db
            .scalar("SELECT row_data::text FROM audit.logged_actions WHERE action = 'TRUNCATE'")
            .await;
        assert_eq!(row_data, None);
    })
    .await;
}

#[tokio::test]
async fn test_ids_come_from_audit_sequence() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3), (2, 1, 2, 3)").await;
        let distinct_ids: i64 = db
            .scalar("SELECT count(DISTINCT id) FROM audit.logged_actions")
            .await;
        assert_eq!(distinct_ids, 2);
    })
    .await;
}

#[tokio::test]
async fn test_before_trigger_is_rejected() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;
        db.execute(
            "CREATE TRIGGER misuse BEFORE INSERT ON orders FOR EACH ROW EXECUTE FUNCTION audit.log_action()",
        )
        .await;

        let err = db.execute_err("INSERT INTO orders VALUES (1, 1, 2, 3)").await;
        assert!(err.contains("AFTER trigger"), "{}", err);
    })
    .await;
}

#[tokio::test]
async fn test_changeset_id_from_session_setting() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(Some("audit.changesets")), Direction::Up).await;

        db.execute(
            "BEGIN;
             INSERT INTO audit.changesets (id, user_id) VALUES (42, 'alice');
             SET LOCAL audit.changeset_id = '42';
             INSERT INTO orders VALUES (1, 1, 2, 3);
             COMMIT;",
        )
        .await;
        db.execute("INSERT INTO orders VALUES (2, 1, 2, 3)").await;

        let linked: Option<i64> = db
            .scalar("SELECT changeset_id FROM audit.logged_actions WHERE row_data->>'id' = '1'")
            .await;
        assert_eq!(linked, Some(42));

        let unlinked: Option<i64> = db
            .scalar("SELECT changeset_id FROM audit.logged_actions WHERE row_data->>'id' = '2'")
            .await;
        assert_eq!(unlinked, None);
    })
    .await;
}

#[tokio::test]
async fn test_capture_flags() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(
            db,
            &orders_model_with(TriggerOptions {
                capture_query: false,
                capture_session: false,
                ..Default::default()
            }),
            Direction::Up,
        )
        .await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;

        let query: Option<String> = db.scalar("SELECT client_query FROM audit.logged_actions").await;
        assert_eq!(query, None);
        let session_user: Option<String> = db
            .scalar("SELECT session_user_name FROM audit.logged_actions")
            .await;
        assert_eq!(session_user, None);
        let tx: Option<i64> = db
            .scalar("SELECT transaction_id FROM audit.logged_actions")
            .await;
        assert!(tx.is_some());
    })
    .await;
}

#[tokio::test]
async fn test_default_flags_capture_query_and_session() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;

        let query: Option<String> = db.scalar("SELECT client_query FROM audit.logged_actions").await;
        assert!(query.unwrap().contains("INSERT INTO orders"));
        let session_user: Option<String> = db
            .scalar("SELECT session_user_name FROM audit.logged_actions")
            .await;
        assert!(session_user.is_some());
    })
    .await;
}

#[tokio::test]
async fn test_log_action_ignores_objects_in_public() {
    with_test_db(async |db| {
        create_orders(db).await;
        migrate(db, &orders_model(None), Direction::Up).await;

        let config: String = db
            .scalar(
                "SELECT array_to_string(p.proconfig, ';') FROM pg_proc p \
                 JOIN pg_namespace n ON n.oid = p.pronamespace \
                 WHERE n.nspname = 'audit' AND p.proname = 'log_action'",
            )
            .await;
        assert_eq!(config, "search_path=pg_catalog, pg_temp");

        // a lookalike in public must not be picked up by the definer function
        db.execute(
            "CREATE FUNCTION public.json_object_delete_keys(jsonb, text[]) RETURNS jsonb \
             LANGUAGE sql AS $$ SELECT '{\"hijacked\": true}'::jsonb $$",
        )
        .await;
        db.execute("INSERT INTO orders VALUES (1, 1, 2, 3)").await;

        let row_data: String = db
            .scalar("SELECT row_data::text FROM audit.logged_actions")
            .await;
        assert_eq!(row_data, r#"{"a": 1, "b": 2, "c": 3, "id": 1}"#);
    })
    .await;
}
