use super::{create_orders, migrate, orders_model};
use crate::helpers::harness::with_test_db;
use pgtrail::catalog::PgCatalog;
use pgtrail::check::{ModelStatus, check_general, check_model};
use pgtrail::planner::Direction;

#[tokio::test]
async fn test_check_fresh_database() {
    with_test_db(async |db| {
        let catalog = PgCatalog::new(db.pool().clone());
        let missing = check_general(&catalog, "audit").await.unwrap();
        assert_eq!(missing.len(), 3);
        assert_eq!(missing[0], "missing schema audit");

        assert_eq!(check_model(&catalog, None).await.unwrap(), None);
    })
    .await;
}

#[tokio::test]
async fn test_check_after_install() {
    with_test_db(async |db| {
        create_orders(db).await;
        let model = orders_model(None);
        migrate(db, &model, Direction::Up).await;

        let catalog = PgCatalog::new(db.pool().clone());
        assert!(check_general(&catalog, "audit").await.unwrap().is_empty());
        assert_eq!(
            check_model(&catalog, Some(&model)).await.unwrap(),
            Some(ModelStatus {
                enabled: true,
                valid: true
            })
        );
    })
    .await;
}

#[tokio::test]
async fn test_check_detects_dropped_statement_trigger() {
    with_test_db(async |db| {
        create_orders(db).await;
        let model = orders_model(None);
        migrate(db, &model, Direction::Up).await;
        db.execute("DROP TRIGGER log_action_stmt_trigger ON public.orders").await;

        let catalog = PgCatalog::new(db.pool().clone());
        assert_eq!(
            check_model(&catalog, Some(&model)).await.unwrap(),
            Some(ModelStatus {
                enabled: true,
                valid: false
            })
        );

        // up repairs it
        migrate(db, &model, Direction::Up).await;
        assert!(check_model(&catalog, Some(&model)).await.unwrap().unwrap().valid);
    })
    .await;
}
