use crate::helpers::harness::with_test_db;
use pgtrail::catalog::table;

#[tokio::test]
async fn test_table_exists() {
    with_test_db(async |db| {
        db.execute("CREATE SCHEMA audit").await;
        db.execute("CREATE TABLE audit.logged_actions (id bigserial PRIMARY KEY)").await;

        assert!(table::exists(db.pool(), "audit", "logged_actions").await.unwrap());
        assert!(!table::exists(db.pool(), "public", "logged_actions").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_views_and_sequences_are_not_tables() {
    with_test_db(async |db| {
        db.execute("CREATE VIEW logged_actions AS SELECT 1 AS id").await;
        db.execute("CREATE SEQUENCE changesets").await;

        assert!(!table::exists(db.pool(), "public", "logged_actions").await.unwrap());
        assert!(!table::exists(db.pool(), "public", "changesets").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_partitioned_table_counts_as_table() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE events (id int, at date) PARTITION BY RANGE (at)").await;
        assert!(table::exists(db.pool(), "public", "events").await.unwrap());
    })
    .await;
}

#[tokio::test]
async fn test_index_exists() {
    with_test_db(async |db| {
        db.execute("CREATE TABLE logged_actions (id int, relid oid)").await;
        db.execute("CREATE INDEX logged_actions_relid_idx ON logged_actions (relid)").await;

        assert!(
            table::index_exists(db.pool(), "public", "logged_actions_relid_idx")
                .await
                .unwrap()
        );
        assert!(
            !table::index_exists(db.pool(), "public", "logged_actions")
                .await
                .unwrap()
        );
        assert!(
            !table::exists(db.pool(), "public", "logged_actions_relid_idx")
                .await
                .unwrap()
        );
    })
    .await;
}
