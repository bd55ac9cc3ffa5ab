use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, Database, DatabaseConnection};

use engine::{Engine, EngineError, TransactionDraft, TransactionQuery};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_file_db() -> (Engine, DatabaseConnection) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();

    (engine, db)
}

async fn insert_master(
    db: &DatabaseConnection,
    merchant_id: &str,
    amount_minor: i64,
    status: &str,
    created_at: DateTime<Utc>,
) -> i64 {
    let model = engine::transaction_masters::ActiveModel {
        txn_id: ActiveValue::NotSet,
        merchant_id: ActiveValue::Set(merchant_id.to_string()),
        amount_minor: ActiveValue::Set(amount_minor),
        currency: ActiveValue::Set("USD".to_string()),
        status: ActiveValue::Set(status.to_string()),
        created_at: ActiveValue::Set(created_at),
        local_txn_date_time: ActiveValue::Set(created_at),
        txn_date: ActiveValue::Set(created_at.date_naive()),
        card_type: ActiveValue::Set(Some("VISA".to_string())),
        card_last4: ActiveValue::Set(Some("4242".to_string())),
        acquirer: ActiveValue::Set(None),
        issuer: ActiveValue::Set(None),
    }
    .insert(db)
    .await
    .unwrap();
    model.txn_id
}

async fn insert_detail(
    db: &DatabaseConnection,
    master_txn_id: i64,
    detail_type: &str,
    amount_minor: i64,
) -> i64 {
    let model = engine::transaction_details::ActiveModel {
        txn_detail_id: ActiveValue::NotSet,
        master_txn_id: ActiveValue::Set(master_txn_id),
        detail_type: ActiveValue::Set(detail_type.to_string()),
        amount_minor: ActiveValue::Set(amount_minor),
        description: ActiveValue::Set(Some(format!("{detail_type} line"))),
    }
    .insert(db)
    .await
    .unwrap();
    model.txn_detail_id
}

fn query(merchant_id: &str) -> TransactionQuery {
    TransactionQuery {
        merchant_id: merchant_id.to_string(),
        size: 20,
        ..Default::default()
    }
}

#[tokio::test]
async fn listing_aggregates_the_whole_filtered_range() {
    let (engine, db) = engine_with_file_db().await;

    let now = Utc::now();
    insert_master(&db, "M1", 1000, "completed", now - ChronoDuration::minutes(3)).await;
    insert_master(&db, "M1", 500, "completed", now - ChronoDuration::minutes(2)).await;
    insert_master(&db, "M1", 200, "failed", now - ChronoDuration::minutes(1)).await;
    // Another merchant must never leak into M1's listing.
    insert_master(&db, "M2", 9999, "completed", now).await;

    let listing = engine.list_transactions(query("M1")).await.unwrap();

    assert_eq!(listing.merchant_id, "M1");
    assert_eq!(listing.summary.total_transactions, 3);
    assert_eq!(listing.summary.total_amount_minor, 1700);
    assert_eq!(listing.summary.currency, "USD");
    assert_eq!(listing.summary.by_status.get("completed"), Some(&2));
    assert_eq!(listing.summary.by_status.get("failed"), Some(&1));

    assert_eq!(listing.pagination.page, 0);
    assert_eq!(listing.pagination.page_size, 20);
    assert_eq!(listing.pagination.total_pages, 1);
    assert_eq!(listing.pagination.total_elements, 3);

    // Newest first.
    let statuses: Vec<&str> = listing
        .transactions
        .iter()
        .map(|tx| tx.master.status.as_str())
        .collect();
    assert_eq!(statuses, ["failed", "completed", "completed"]);

    let by_status_total: i64 = listing.summary.by_status.values().sum();
    assert_eq!(by_status_total, listing.summary.total_transactions);
}

#[tokio::test]
async fn details_are_grouped_per_master_and_default_to_empty() {
    let (engine, db) = engine_with_file_db().await;

    let now = Utc::now();
    let first = insert_master(&db, "M1", 1000, "completed", now - ChronoDuration::minutes(2)).await;
    let second = insert_master(&db, "M1", 500, "completed", now - ChronoDuration::minutes(1)).await;

    let fee = insert_detail(&db, first, "FEE", 30).await;
    let tax = insert_detail(&db, first, "TAX", 70).await;

    let listing = engine.list_transactions(query("M1")).await.unwrap();
    assert_eq!(listing.transactions.len(), 2);

    // Page is newest-first: `second` has no details, `first` has two.
    let newest = &listing.transactions[0];
    assert_eq!(newest.master.txn_id, second);
    assert!(newest.details.is_empty());

    let oldest = &listing.transactions[1];
    assert_eq!(oldest.master.txn_id, first);
    assert_eq!(oldest.details.len(), 2);
    // Ordered by detail id for stable output.
    let detail_ids: Vec<i64> = oldest.details.iter().map(|d| d.txn_detail_id).collect();
    assert_eq!(detail_ids, [fee, tax]);
    assert!(oldest.details.iter().all(|d| d.master_txn_id == first));
}

#[tokio::test]
async fn empty_page_keeps_full_range_totals() {
    let (engine, db) = engine_with_file_db().await;

    let now = Utc::now();
    for minutes in 1..=3 {
        insert_master(&db, "M1", 100, "completed", now - ChronoDuration::minutes(minutes)).await;
    }

    // Page index far past the data: the page is empty, but pagination and
    // summary still describe the whole filtered range.
    let listing = engine
        .list_transactions(TransactionQuery {
            page: 5,
            ..query("M1")
        })
        .await
        .unwrap();

    assert!(listing.transactions.is_empty());
    assert_eq!(listing.pagination.total_elements, 3);
    assert_eq!(listing.pagination.total_pages, 1);
    assert_eq!(listing.summary.total_transactions, 3);
}

#[tokio::test]
async fn no_matches_yields_zero_pages_and_an_empty_summary() {
    let (engine, db) = engine_with_file_db().await;

    insert_master(&db, "M1", 100, "completed", Utc::now()).await;

    let listing = engine
        .list_transactions(TransactionQuery {
            status: Some("refunded".to_string()),
            ..query("M1")
        })
        .await
        .unwrap();

    assert!(listing.transactions.is_empty());
    assert_eq!(listing.pagination.total_elements, 0);
    assert_eq!(listing.pagination.total_pages, 0);
    assert_eq!(listing.summary.total_transactions, 0);
    assert!(listing.summary.by_status.is_empty());
}

#[tokio::test]
async fn status_filter_is_case_insensitive() {
    let (engine, db) = engine_with_file_db().await;

    let now = Utc::now();
    insert_master(&db, "M1", 1000, "completed", now - ChronoDuration::minutes(2)).await;
    insert_master(&db, "M1", 500, "Completed", now - ChronoDuration::minutes(1)).await;
    insert_master(&db, "M1", 200, "failed", now).await;

    let listing = engine
        .list_transactions(TransactionQuery {
            status: Some("COMPLETED".to_string()),
            ..query("M1")
        })
        .await
        .unwrap();

    assert_eq!(listing.transactions.len(), 2);
    assert_eq!(listing.pagination.total_elements, 2);
    // Case-variant aggregate rows merge into one lowercase bucket.
    assert_eq!(listing.summary.by_status.len(), 1);
    assert_eq!(listing.summary.by_status.get("completed"), Some(&2));
    assert_eq!(listing.summary.total_amount_minor, 1500);
}

#[tokio::test]
async fn explicit_date_range_includes_the_whole_end_day() {
    let (engine, db) = engine_with_file_db().await;

    let inside_start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let inside_end = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap();
    let outside = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
    insert_master(&db, "M1", 100, "completed", inside_start).await;
    insert_master(&db, "M1", 200, "completed", inside_end).await;
    insert_master(&db, "M1", 400, "completed", outside).await;

    let listing = engine
        .list_transactions(TransactionQuery {
            start_date: Some("2024-01-10".to_string()),
            end_date: Some("2024-01-10".to_string()),
            ..query("M1")
        })
        .await
        .unwrap();

    assert_eq!(listing.range.start, inside_start);
    assert_eq!(
        listing.range.end_exclusive,
        Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap()
    );
    assert_eq!(listing.pagination.total_elements, 2);
    assert_eq!(listing.summary.total_amount_minor, 300);
}

#[tokio::test]
async fn unparsable_dates_fail_validation() {
    let (engine, _db) = engine_with_file_db().await;

    let err = engine
        .list_transactions(TransactionQuery {
            start_date: Some("not-a-date".to_string()),
            ..query("M1")
        })
        .await
        .expect_err("resolution must fail");

    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn zero_page_size_fails_validation() {
    let (engine, _db) = engine_with_file_db().await;

    let err = engine
        .list_transactions(TransactionQuery {
            size: 0,
            merchant_id: "M1".to_string(),
            ..Default::default()
        })
        .await
        .expect_err("size 0 must fail");

    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn equal_timestamps_paginate_deterministically() {
    let (engine, db) = engine_with_file_db().await;

    let instant = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(insert_master(&db, "M1", 100, "completed", instant).await);
    }

    let page_query = |page| TransactionQuery {
        start_date: Some("2024-01-10".to_string()),
        end_date: Some("2024-01-10".to_string()),
        page,
        size: 2,
        merchant_id: "M1".to_string(),
        ..Default::default()
    };

    let mut seen = Vec::new();
    for page in 0..3 {
        let listing = engine.list_transactions(page_query(page)).await.unwrap();
        assert_eq!(listing.pagination.total_pages, 3);
        seen.extend(listing.transactions.iter().map(|tx| tx.master.txn_id));
    }

    // Ties on created_at break by id ascending, so the pages tile the set
    // without overlap.
    assert_eq!(seen, ids);
}

#[tokio::test]
async fn create_discards_the_caller_id_and_defaults_status() {
    let (engine, _db) = engine_with_file_db().await;

    let created = engine
        .create_transaction(
            "M1",
            Some(TransactionDraft {
                txn_id: Some(999),
                amount_minor: 1250,
                currency: "USD".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

    assert_ne!(created.txn_id, 999);
    assert_eq!(created.merchant_id, "M1");
    assert_eq!(created.status, "PENDING");
    assert_eq!(created.txn_date, created.created_at.date_naive());

    // A second identical submission is accepted as an independent record.
    let again = engine
        .create_transaction(
            "M1",
            Some(TransactionDraft {
                amount_minor: 1250,
                currency: "USD".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
    assert_ne!(again.txn_id, created.txn_id);
}

#[tokio::test]
async fn create_keeps_supplied_fields() {
    let (engine, _db) = engine_with_file_db().await;

    let created_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap();
    let created = engine
        .create_transaction(
            "M1",
            Some(TransactionDraft {
                amount_minor: 700,
                currency: "EUR".to_string(),
                status: Some("completed".to_string()),
                created_at: Some(created_at),
                card_type: Some("AMEX".to_string()),
                card_last4: Some("0005".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

    assert_eq!(created.status, "completed");
    assert_eq!(created.created_at, created_at);
    assert_eq!(created.currency, "EUR");
    assert_eq!(created.card_type.as_deref(), Some("AMEX"));
}

#[tokio::test]
async fn create_without_a_body_fails_validation() {
    let (engine, _db) = engine_with_file_db().await;

    let err = engine
        .create_transaction("M1", None)
        .await
        .expect_err("missing draft must fail");

    assert_eq!(
        err,
        EngineError::Validation("transaction details are required".to_string())
    );
}
