use pretty_assertions::assert_eq;
use tabula::{errors::TypeMismatch, row, Kind, ModelId, Value};
use tabula_driver_sqlite::Sqlite;
use tests::{assert_empty, assert_err, assert_ok, setup, DriverOp, LoggingDriver};

async fn user(db: &tabula::Db) -> ModelId {
    let user = assert_ok!(
        db.define_model(
            "User",
            [("name", "text"), ("age", "numeric"), ("has_car", "boolean")],
        )
        .await
    );
    user.id
}

#[tokio::test]
async fn populate_and_list_in_insertion_order() {
    let db = setup::db().await;
    let id = user(&db).await;

    let count = assert_ok!(
        db.insert(
            id,
            vec![
                row! { "name" => "mohamed", "age" => 26, "has_car" => true },
                row! { "name" => "sara", "age" => 31, "has_car" => false },
                row! { "name" => "ali", "age" => 19, "has_car" => true },
            ],
        )
        .await
    );
    assert_eq!(count, 3);

    let projection = assert_ok!(db.project(id).await);
    assert_eq!(projection.len(), 3);

    let names: Vec<_> = projection
        .iter()
        .map(|row| row.get("name").cloned())
        .collect();
    assert_eq!(
        names,
        [
            Some(Value::from("mohamed")),
            Some(Value::from("sara")),
            Some(Value::from("ali")),
        ]
    );

    for row in &projection {
        assert!(matches!(row.get("name"), Some(Value::String(_))));
        assert!(matches!(row.get("age"), Some(Value::I64(_))));
        assert!(matches!(row.get("has_car"), Some(Value::Bool(_))));
        assert_eq!(row.names().collect::<Vec<_>>(), ["name", "age", "has_car"]);
    }
}

#[tokio::test]
async fn mismatched_batch_writes_nothing() {
    let driver = LoggingDriver::new(Sqlite::in_memory());
    let log = driver.log_handle();
    let db = setup::build(tabula::Db::builder(), driver).await;
    let id = user(&db).await;
    log.clear();

    let err = assert_err!(
        db.insert(
            id,
            vec![
                row! { "name" => "sara", "age" => 31, "has_car" => false },
                row! { "name" => 14, "age" => 26, "has_car" => true },
            ],
        )
        .await
    );

    assert!(err.is_row_conformance());
    assert!(err.is_type_mismatch());
    assert_eq!(
        err.type_mismatches(),
        [TypeMismatch {
            field_name: "name".to_string(),
            expected: Kind::Text,
        }]
    );

    // Rejected before reaching storage
    assert_empty!(log.ops());
    assert!(assert_ok!(db.project(id).await).is_empty());
}

#[tokio::test]
async fn batch_errors_are_accumulated() {
    let db = setup::db().await;
    let id = user(&db).await;

    let err = assert_err!(
        db.insert(
            id,
            vec![
                row! { "names" => "x", "age" => "26" },
                row! { "name" => 1, "age" => "27", "emails" => "y" },
                row! { "names" => "z", "has_car" => 1 },
            ],
        )
        .await
    );

    assert_eq!(err.unknown_fields(), ["names", "emails"]);
    assert_eq!(
        err.type_mismatches(),
        [
            TypeMismatch {
                field_name: "age".to_string(),
                expected: Kind::Numeric,
            },
            TypeMismatch {
                field_name: "name".to_string(),
                expected: Kind::Text,
            },
            TypeMismatch {
                field_name: "has_car".to_string(),
                expected: Kind::Boolean,
            },
        ]
    );
    assert_eq!(
        err.to_string(),
        "rows do not conform to the model; fields do NOT exist: names, emails; \
         fields with wrong value type: age (expected numeric), name (expected text), \
         has_car (expected boolean)"
    );
}

#[tokio::test]
async fn numeric_accepts_integers_only() {
    let db = setup::db().await;
    let id = user(&db).await;

    for value in [Value::from(1.5), Value::from(true), Value::Null] {
        let err = assert_err!(db.insert(id, vec![row! { "age" => value }]).await);
        assert!(err.is_type_mismatch());
    }

    assert_ok!(db.insert(id, vec![row! { "age" => -4 }]).await);
}

#[tokio::test]
async fn text_values_are_bounded_and_non_blank() {
    let mut builder = tabula::Db::builder();
    builder.text_max_length(5);
    let db = setup::build(builder, Sqlite::in_memory()).await;
    let id = user(&db).await;

    let err = assert_err!(db.insert(id, vec![row! { "name" => "" }]).await);
    assert!(err.is_blank_value());

    let err = assert_err!(db.insert(id, vec![row! { "name" => "mohamed" }]).await);
    assert!(err.is_value_too_long());

    assert_ok!(db.insert(id, vec![row! { "name" => "sara" }]).await);
}

#[tokio::test]
async fn empty_submissions_are_rejected() {
    let db = setup::db().await;
    let id = user(&db).await;

    let err = assert_err!(db.insert(id, vec![]).await);
    assert!(err.is_empty_row_set());

    let err = assert_err!(db.insert(id, vec![row! {}]).await);
    assert!(err.is_empty_row_set());
}

#[tokio::test]
async fn field_names_in_rows_are_case_insensitive() {
    let db = setup::db().await;
    let id = user(&db).await;

    assert_ok!(db.insert(id, vec![row! { "NAME" => "mohamed", "Age" => 26 }]).await);

    let rows = assert_ok!(db.project(id).await).to_rows();
    assert_eq!(
        rows,
        [row! { "name" => "mohamed", "age" => 26, "has_car" => Value::Null }]
    );
}

#[tokio::test]
async fn unknown_model() {
    let db = setup::db().await;

    let err = assert_err!(db.insert(ModelId(7), vec![row! { "name" => "x" }]).await);
    assert!(err.is_model_not_found());

    let err = assert_err!(db.project(ModelId(7)).await);
    assert!(err.is_model_not_found());
}

#[tokio::test]
async fn large_batches_are_written_in_one_go() {
    let driver = LoggingDriver::new(Sqlite::in_memory());
    let log = driver.log_handle();
    let db = setup::build(tabula::Db::builder(), driver).await;
    let id = user(&db).await;
    log.clear();

    let rows: Vec<_> = (0..20_000)
        .map(|i| row! { "name" => format!("user {i}"), "age" => i, "has_car" => i % 2 == 0 })
        .collect();
    assert_eq!(assert_ok!(db.insert(id, rows).await), 20_000);

    assert_eq!(
        log.ops(),
        [DriverOp::Insert {
            table: "tbl_user".to_string(),
            rows: 20_000,
        }]
    );

    let projection = assert_ok!(db.project(id).await);
    assert_eq!(projection.len(), 20_000);
    assert_eq!(
        projection.iter().last(),
        Some(row! { "name" => "user 19999", "age" => 19999, "has_car" => false })
    );
}
