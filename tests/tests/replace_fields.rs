use pretty_assertions::assert_eq;
use tabula::{row, FieldsDiff, Kind, ModelId, Value};
use std::time::Duration;
use tabula_driver_sqlite::Sqlite;
use tests::{assert_err, assert_none, assert_ok, assert_some, setup, DriverOp, LoggingDriver};

async fn user(db: &tabula::Db) -> ModelId {
    let user = assert_ok!(
        db.define_model(
            "user",
            [("name", "text"), ("age", "numeric"), ("has_car", "boolean")],
        )
        .await
    );
    user.id
}

#[tokio::test]
async fn identical_field_list_is_no_change() {
    let db = setup::db().await;
    let id = user(&db).await;

    // Order and case do not matter
    let err = assert_err!(
        db.replace_fields(
            id,
            [("HAS_CAR", "Boolean"), ("Name", "TEXT"), ("age", "number")],
        )
        .await
    );
    assert!(err.is_no_change_requested());
}

#[tokio::test]
async fn retype_only_to_text() {
    let db = setup::db().await;
    let id = user(&db).await;

    let err = assert_err!(
        db.replace_fields(
            id,
            [("name", "text"), ("age", "boolean"), ("has_car", "boolean")],
        )
        .await
    );
    assert!(err.is_illegal_retype());
    assert_eq!(
        err.to_string(),
        "field kinds can only be changed to text .. age -> boolean"
    );

    // Unchanged after the rejected update
    let model = assert_ok!(db.get_model(id).await);
    assert_eq!(model.field("age").map(|f| f.kind), Some(Kind::Numeric));

    let diff = assert_ok!(
        db.replace_fields(
            id,
            [("name", "text"), ("age", "text"), ("has_car", "boolean")],
        )
        .await
    );
    assert!(diff.insertions.is_empty());
    assert!(diff.deletions.is_empty());
    assert_eq!(diff.retypes.len(), 1);
    assert_eq!(diff.retypes[0].name, "age");
    assert_eq!(diff.retypes[0].to, Kind::Text);

    let model = assert_ok!(db.get_model(id).await);
    assert_eq!(model.field("age").map(|f| f.kind), Some(Kind::Text));
}

#[tokio::test]
async fn new_fields_may_use_any_kind() {
    let db = setup::db().await;
    let id = user(&db).await;

    assert_ok!(
        db.replace_fields(
            id,
            [
                ("name", "text"),
                ("age", "numeric"),
                ("has_car", "boolean"),
                ("verified", "boolean"),
                ("score", "numeric"),
            ],
        )
        .await
    );

    let model = assert_ok!(db.get_model(id).await);
    let kinds: Vec<_> = model.fields.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        [
            Kind::Text,
            Kind::Numeric,
            Kind::Boolean,
            Kind::Boolean,
            Kind::Numeric
        ]
    );
}

#[tokio::test]
async fn add_and_drop_reshape_projections() {
    let db = setup::db().await;
    let id = user(&db).await;

    assert_ok!(
        db.insert(
            id,
            vec![row! { "name" => "mohamed", "age" => 26, "has_car" => true }],
        )
        .await
    );

    let diff = assert_ok!(
        db.replace_fields(
            id,
            [("name", "text"), ("age", "numeric"), ("address", "text")],
        )
        .await
    );
    assert_eq!(diff.insertions.len(), 1);
    assert_eq!(diff.insertions[0].name, "address");
    assert_eq!(diff.deletions, ["has_car"]);

    assert_ok!(
        db.insert(
            id,
            vec![row! { "name" => "sara", "age" => 30, "address" => "cairo" }],
        )
        .await
    );

    let rows = assert_ok!(db.project(id).await).to_rows();
    assert_eq!(
        rows,
        [
            row! { "name" => "mohamed", "age" => 26, "address" => Value::Null },
            row! { "name" => "sara", "age" => 30, "address" => "cairo" },
        ]
    );

    let projection = assert_ok!(db.project(id).await);
    let first = assert_some!(projection.iter().next());
    assert_none!(first.get("has_car"));

    // The dropped field is gone for writers too
    let err = assert_err!(db.insert(id, vec![row! { "has_car" => false }]).await);
    assert_eq!(err.unknown_fields(), ["has_car"]);
}

#[tokio::test]
async fn retype_to_text_converts_existing_values() {
    let db = setup::db().await;
    let id = user(&db).await;

    assert_ok!(
        db.insert(
            id,
            vec![
                row! { "name" => "mohamed", "age" => 26, "has_car" => true },
                row! { "name" => "sara", "has_car" => false },
            ],
        )
        .await
    );

    assert_ok!(
        db.replace_fields(
            id,
            [("name", "text"), ("age", "text"), ("has_car", "text")],
        )
        .await
    );

    let rows = assert_ok!(db.project(id).await).to_rows();
    assert_eq!(
        rows,
        [
            row! { "name" => "mohamed", "age" => "26", "has_car" => "true" },
            row! { "name" => "sara", "age" => Value::Null, "has_car" => "false" },
        ]
    );

    // Text rules now apply to the retyped field
    let err = assert_err!(db.insert(id, vec![row! { "age" => 27 }]).await);
    assert!(err.is_type_mismatch());
    assert_ok!(db.insert(id, vec![row! { "age" => "27" }]).await);
}

#[tokio::test]
async fn replace_fields_validates_input() {
    let db = setup::db().await;
    let id = user(&db).await;

    let err = assert_err!(db.replace_fields(ModelId(999), [("name", "text")]).await);
    assert!(err.is_model_not_found());

    let no_fields: Vec<(String, String)> = vec![];
    let err = assert_err!(db.replace_fields(id, no_fields).await);
    assert!(err.is_empty_field_set());

    let err = assert_err!(db.replace_fields(id, [("na#me", "text")]).await);
    assert!(err.is_invalid_character());

    let err = assert_err!(db.replace_fields(id, [("name", "json")]).await);
    assert!(err.is_unsupported_kind());
}

#[tokio::test]
async fn field_ids_are_kept_for_surviving_fields() {
    let db = setup::db().await;
    let id = user(&db).await;
    let before = assert_ok!(db.get_model(id).await);

    assert_ok!(
        db.replace_fields(id, [("age", "text"), ("name", "text"), ("city", "text")])
            .await
    );
    let after = assert_ok!(db.get_model(id).await);

    let id_of = |model: &tabula::Model, name: &str| model.field(name).map(|f| f.id);
    assert_eq!(id_of(&after, "name"), id_of(&before, "name"));
    assert_eq!(id_of(&after, "age"), id_of(&before, "age"));
    assert!(id_of(&after, "city").is_some());
    assert!(!before.fields.iter().any(|f| Some(f.id) == id_of(&after, "city")));

    // Survivors keep their order; additions come last
    let names: Vec<_> = after.fields.iter().map(|f| f.name.to_string()).collect();
    assert_eq!(names, ["name", "age", "city"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_on_one_model_are_serialized() {
    let db = setup::db().await;
    let id = user(&db).await;

    let add_city = {
        let db = db.clone();
        tokio::spawn(async move {
            db.replace_fields(
                id,
                [
                    ("name", "text"),
                    ("age", "numeric"),
                    ("has_car", "boolean"),
                    ("city", "text"),
                ],
            )
            .await
        })
    };

    let drop_has_car = {
        let db = db.clone();
        tokio::spawn(async move {
            db.replace_fields(id, [("name", "text"), ("age", "numeric")])
                .await
        })
    };

    let first: FieldsDiff = assert_ok!(assert_ok!(add_city.await));
    let second: FieldsDiff = assert_ok!(assert_ok!(drop_has_car.await));
    assert!(!first.is_empty());
    assert!(!second.is_empty());

    // Whichever ran last decided the fields, and the table matches them
    let model = assert_ok!(db.get_model(id).await);
    let names: Vec<_> = model.fields.iter().map(|f| f.name.to_string()).collect();
    assert!(
        names == ["name", "age"] || names == ["name", "age", "city"],
        "unexpected fields {names:?}"
    );

    let row: tabula::Row = model
        .fields
        .iter()
        .map(|field| match field.kind {
            Kind::Text => (field.name.to_string(), Value::from("x")),
            Kind::Numeric => (field.name.to_string(), Value::from(1)),
            Kind::Boolean => (field.name.to_string(), Value::from(true)),
        })
        .collect();
    assert_ok!(db.insert(id, vec![row.clone()]).await);

    let rows = assert_ok!(db.project(id).await).to_rows();
    assert_eq!(rows, [row]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reads_and_writes_wait_for_an_in_flight_migration() {
    let path = setup::temp_db_path("in-flight");
    let driver = LoggingDriver::new(Sqlite::open(&path));
    let log = driver.log_handle();

    let mut builder = tabula::Db::builder();
    builder.max_connections(4);
    let db = setup::build(builder, driver).await;

    let id = user(&db).await;
    assert_ok!(
        db.insert(id, vec![row! { "name" => "sara", "age" => 31, "has_car" => true }])
            .await
    );

    let gate = log.hold_migrations();
    log.clear();

    let update = {
        let db = db.clone();
        tokio::spawn(async move {
            db.replace_fields(id, [("name", "text"), ("age", "text"), ("city", "text")])
                .await
        })
    };
    gate.entered().await;

    // Only valid against the new fields: age is text and city exists
    let insert = {
        let db = db.clone();
        tokio::spawn(async move {
            db.insert(id, vec![row! { "name" => "omar", "age" => "40", "city" => "Cairo" }])
                .await
        })
    };
    let project = {
        let db = db.clone();
        tokio::spawn(async move { db.project(id).await })
    };

    // Connections are free, so only the model lock can be holding them back
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!insert.is_finished());
    assert!(!project.is_finished());
    assert_eq!(log.ops().len(), 1);
    assert!(matches!(log.ops()[0], DriverOp::Migrate { .. }));

    gate.release();

    assert_ok!(assert_ok!(update.await));
    assert_eq!(assert_ok!(assert_ok!(insert.await)), 1);

    let projection = assert_ok!(assert_ok!(project.await));
    let names: Vec<_> = projection
        .model()
        .fields
        .iter()
        .map(|f| f.name.to_string())
        .collect();
    assert_eq!(names, ["name", "age", "city"]);

    let rows = projection.to_rows();
    assert_eq!(rows[0].get("age"), Some(&Value::from("31")));
    assert_none!(rows[0].get("has_car"));

    let ops = log.ops();
    assert_eq!(ops.len(), 3);
    assert!(matches!(ops[0], DriverOp::Migrate { .. }));
}
