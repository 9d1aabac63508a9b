use pretty_assertions::assert_eq;
use tabula::{errors::Rule, row, Kind};
use tabula_driver_sqlite::Sqlite;
use tests::{assert_empty, assert_err, assert_ok, setup, DriverOp, LoggingDriver};

#[tokio::test]
async fn failed_migration_keeps_registry_and_table() {
    let driver = LoggingDriver::new(Sqlite::in_memory());
    let log = driver.log_handle();
    let db = setup::build(tabula::Db::builder(), driver).await;

    let user = assert_ok!(
        db.define_model("user", [("name", "text"), ("age", "numeric")])
            .await
    );
    assert_ok!(db.insert(user.id, vec![row! { "name" => "sara", "age" => 31 }]).await);

    log.fail_migrations(true);
    log.clear();

    let err = assert_err!(
        db.replace_fields(user.id, [("name", "text"), ("age", "text"), ("city", "text")])
            .await
    );
    assert!(err.is_migration_failed());
    assert!(err.is_retryable_after_refetch());
    assert_eq!(err.report().rule, Rule::MigrationFailed);
    assert_eq!(
        err.to_string(),
        "migration of model `user` failed; state indeterminate, \
         re-fetch the model before retrying: injected failure"
    );

    assert_eq!(
        log.ops(),
        [DriverOp::Migrate {
            table: "tbl_user".to_string(),
            steps: 2,
        }]
    );

    // The registry still describes the old fields, and they still work
    let model = assert_ok!(db.get_model(user.id).await);
    assert_eq!(*model, *user);
    assert_ok!(db.insert(user.id, vec![row! { "age" => 32 }]).await);

    // Retrying after the re-fetch goes through
    log.fail_migrations(false);
    assert_ok!(
        db.replace_fields(user.id, [("name", "text"), ("age", "text"), ("city", "text")])
            .await
    );

    let model = assert_ok!(db.get_model(user.id).await);
    assert_eq!(model.field("age").map(|f| f.kind), Some(Kind::Text));

    let rows = assert_ok!(db.project(user.id).await).to_rows();
    assert_eq!(
        rows,
        [
            row! { "name" => "sara", "age" => "31", "city" => tabula::Value::Null },
            row! { "name" => tabula::Value::Null, "age" => "32", "city" => tabula::Value::Null },
        ]
    );
}

#[tokio::test]
async fn rejected_updates_never_reach_storage() {
    let driver = LoggingDriver::new(Sqlite::in_memory());
    let log = driver.log_handle();
    let db = setup::build(tabula::Db::builder(), driver).await;

    let user = assert_ok!(db.define_model("user", [("age", "numeric")]).await);
    log.clear();

    assert_err!(db.replace_fields(user.id, [("age", "numeric")]).await);
    assert_err!(db.replace_fields(user.id, [("age", "boolean")]).await);
    assert_err!(db.replace_fields(user.id, [("id", "numeric")]).await);

    assert_empty!(log.ops());
}

#[tokio::test]
async fn storage_rejection_on_define_is_materialization_failure() {
    let path = setup::temp_db_path("materialize");

    // A table with the name the model would map to, created behind the
    // engine's back
    {
        let connection = rusqlite::Connection::open(&path).unwrap();
        connection
            .execute_batch("CREATE TABLE \"tbl_user\" (x INTEGER)")
            .unwrap();
    }

    let db = setup::build(tabula::Db::builder(), Sqlite::open(&path)).await;

    let err = assert_err!(db.define_model("user", [("name", "text")]).await);
    assert!(err.is_materialization_failed());
    assert!(err.is_retryable_after_refetch());
    assert!(err.root().is_driver_operation_failed());
    assert_eq!(err.report().rule, Rule::MaterializationFailed);

    // The model was not registered, and another name still works
    assert_empty!(db.models().await);
    assert_ok!(db.define_model("member", [("name", "text")]).await);
}
