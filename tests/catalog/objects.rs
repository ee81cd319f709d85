use crate::helpers::harness::with_test_db;
use pgtrail::catalog::{CatalogInspector, DbObjectId, PgCatalog, custom_type, function, schema};

#[tokio::test]
async fn test_schema_exists() {
    with_test_db(async |db| {
        assert!(schema::exists(db.pool(), "public").await.unwrap());
        assert!(!schema::exists(db.pool(), "audit").await.unwrap());

        db.execute("CREATE SCHEMA audit").await;
        assert!(schema::exists(db.pool(), "audit").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_type_exists_is_schema_scoped() {
    with_test_db(async |db| {
        db.execute("CREATE SCHEMA audit").await;
        db.execute("CREATE TYPE audit.action_type AS ENUM ('INSERT')").await;

        assert!(custom_type::exists(db.pool(), "audit", "action_type").await.unwrap());
        assert!(!custom_type::exists(db.pool(), "public", "action_type").await.unwrap());
        assert!(!custom_type::exists(db.pool(), "audit", "other_type").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_table_row_type_is_not_a_custom_type() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE action_type (id int)").await;
        assert!(!custom_type::exists(db.pool(), "public", "action_type").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_function_exists() {
    with_test_db(async |db| {
        db.execute("CREATE SCHEMA audit").await;
        db.execute(
            "CREATE FUNCTION audit.log_action() RETURNS trigger LANGUAGE plpgsql AS $$ BEGIN RETURN NULL; END $$",
        )
        .await;

        assert!(function::exists(db.pool(), "audit", "log_action").await.unwrap());
        assert!(!function::exists(db.pool(), "public", "log_action").await.unwrap());
        assert!(!function::exists(db.pool(), "audit", "json_object_delete_keys").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_pg_catalog_dispatch() {
    with_test_db(async |db| {
        db.execute("CREATE SCHEMA audit").await;
        let catalog = PgCatalog::new(db.pool().clone());

        let schema_id = DbObjectId::Schema {
            name: "audit".to_string(),
        };
        let function_id = DbObjectId::Function {
            schema: "audit".to_string(),
            name: "log_action".to_string(),
        };
        assert!(catalog.exists(&schema_id).await.unwrap());
        assert!(!catalog.exists(&function_id).await.unwrap());
    })
    .await;
}
