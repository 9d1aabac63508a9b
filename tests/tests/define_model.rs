use pretty_assertions::assert_eq;
use tabula::{Kind, ModelId};
use tabula_driver_sqlite::Sqlite;
use tests::{assert_empty, assert_err, assert_ok, setup};

fn field_kinds(model: &tabula::Model) -> Vec<(String, Kind)> {
    model
        .fields
        .iter()
        .map(|field| (field.name.to_string(), field.kind))
        .collect()
}

/// Reads `(name, declared type)` of every column of a SQLite table.
fn physical_columns(path: &std::path::Path, table: &str) -> Vec<(String, String)> {
    let connection = rusqlite::Connection::open(path).unwrap();
    let mut stmt = connection
        .prepare(&format!("PRAGMA table_info(\"{table}\")"))
        .unwrap();

    let columns = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    columns
}

#[tokio::test]
async fn define_then_refetch() {
    let db = setup::db().await;

    let user = assert_ok!(
        db.define_model(
            "User",
            [("name", "text"), ("age", "numeric"), ("has_car", "boolean")],
        )
        .await
    );

    assert_eq!(user.name, "user");
    assert_eq!(
        field_kinds(&user),
        [
            ("name".to_string(), Kind::Text),
            ("age".to_string(), Kind::Numeric),
            ("has_car".to_string(), Kind::Boolean),
        ]
    );

    let fetched = assert_ok!(db.get_model(user.id).await);
    assert_eq!(*fetched, *user);
}

#[tokio::test]
async fn physical_table_has_one_column_per_field() {
    let path = setup::temp_db_path("define");
    let db = setup::build(tabula::Db::builder(), Sqlite::open(&path)).await;

    let user = assert_ok!(
        db.define_model(
            "User",
            [("name", "text"), ("age", "numeric"), ("has_car", "boolean")],
        )
        .await
    );

    assert_eq!(
        physical_columns(&path, "tbl_user"),
        [
            ("id".to_string(), "INTEGER".to_string()),
            ("name".to_string(), "VARCHAR(255)".to_string()),
            ("age".to_string(), "INTEGER".to_string()),
            ("has_car".to_string(), "BOOLEAN".to_string()),
        ]
    );
    assert_eq!(db.table(&user).field_columns().len(), 3);
}

#[tokio::test]
async fn model_names_are_case_insensitive() {
    let db = setup::db().await;

    assert_ok!(db.define_model("User", [("name", "text")]).await);

    let err = assert_err!(db.define_model("USER", [("email", "text")]).await);
    assert!(err.is_duplicate_model_name());
    assert_eq!(err.to_string(), "a model named `user` already exists");
}

#[tokio::test]
async fn surrounding_whitespace_is_not_part_of_a_name() {
    let db = setup::db().await;

    let user = assert_ok!(db.define_model("user", [(" name ", "text")]).await);
    assert_eq!(field_kinds(&user), [("name".to_string(), Kind::Text)]);
    assert_eq!(db.table(&user).name, "tbl_user");

    let err = assert_err!(db.define_model(" User", [("email", "text")]).await);
    assert!(err.is_duplicate_model_name());

    let err = assert_err!(db.define_model("user ", [("email", "text")]).await);
    assert!(err.is_duplicate_model_name());

    let err = assert_err!(db.define_model("car", [("age", "numeric"), (" age", "text")]).await);
    assert!(err.is_duplicate_field_name());

    assert_eq!(db.models().await.len(), 1);
}

#[tokio::test]
async fn special_characters_are_rejected() {
    let db = setup::db().await;

    let err = assert_err!(db.define_model("User@Name", [("name", "text")]).await);
    assert!(err.is_invalid_character());
    assert_eq!(
        err.to_string(),
        "string should NOT include special characters --> @ in User@Name"
    );

    let err = assert_err!(db.define_model("user", [("e-mail", "text")]).await);
    assert!(err.is_invalid_character());
    assert_eq!(
        err.to_string(),
        "string should NOT include special characters --> - in e-mail"
    );

    // Nothing was created
    assert_empty!(db.models().await);
}

#[tokio::test]
async fn field_rules() {
    let db = setup::db().await;

    let no_fields: [(&str, &str); 0] = [];
    let err = assert_err!(db.define_model("user", no_fields).await);
    assert!(err.is_empty_field_set());

    let err = assert_err!(db.define_model("user", [("name", "date")]).await);
    assert!(err.is_unsupported_kind());

    let err = assert_err!(db.define_model("user", [("Name", "text"), ("name", "text")]).await);
    assert!(err.is_duplicate_field_name());

    let err = assert_err!(db.define_model("user", [("ID", "numeric")]).await);
    assert!(err.is_reserved_name());

    let err = assert_err!(db.define_model("user", [("   ", "text")]).await);
    assert!(err.is_blank_value());

    let long = "a".repeat(51);
    let err = assert_err!(db.define_model(&long, [("name", "text")]).await);
    assert!(err.is_value_too_long());

    assert_empty!(db.models().await);
}

#[tokio::test]
async fn kind_aliases_and_spaces_in_names() {
    let db = setup::db().await;

    let model = assert_ok!(
        db.define_model(
            "Fleet Car",
            [("Plate Number", "String"), ("seats", "NUMBER")],
        )
        .await
    );

    assert_eq!(model.name, "fleet car");
    assert_eq!(
        field_kinds(&model),
        [
            ("plate number".to_string(), Kind::Text),
            ("seats".to_string(), Kind::Numeric),
        ]
    );
    assert_eq!(db.table(&model).name, "tbl_fleet car");
}

#[tokio::test]
async fn unknown_model_id() {
    let db = setup::db().await;

    let err = assert_err!(db.get_model(ModelId(54)).await);
    assert!(err.is_model_not_found());
    assert_eq!(err.to_string(), "model not found: id=54");
}

#[tokio::test]
async fn models_are_listed_in_creation_order() {
    let db = setup::db().await;

    let user = assert_ok!(db.define_model("user", [("name", "text")]).await);
    let car = assert_ok!(db.define_model("car", [("plate", "text")]).await);
    assert_ne!(user.id, car.id);

    let summaries = db.list_models().await;
    let names: Vec<_> = summaries
        .iter()
        .map(|summary| (summary.model_id, summary.model_name.to_string()))
        .collect();
    assert_eq!(
        names,
        [(user.id, "user".to_string()), (car.id, "car".to_string())]
    );
}

#[tokio::test]
async fn catalog_survives_reconnect() {
    let path = setup::temp_db_path("reconnect");

    let (user_id, next_id) = {
        let db = setup::build(tabula::Db::builder(), Sqlite::open(&path)).await;
        let user = assert_ok!(
            db.define_model("user", [("name", "text"), ("age", "numeric")])
                .await
        );
        assert_ok!(
            db.insert(user.id, vec![tabula::row! { "name" => "Ann", "age" => 31 }])
                .await
        );
        let car = assert_ok!(db.define_model("car", [("plate", "text")]).await);
        (user.id, car.id)
    };

    let db = setup::build(tabula::Db::builder(), Sqlite::open(&path)).await;

    let user = assert_ok!(db.get_model(user_id).await);
    assert_eq!(
        field_kinds(&user),
        [
            ("name".to_string(), Kind::Text),
            ("age".to_string(), Kind::Numeric),
        ]
    );

    let rows = assert_ok!(db.project(user_id).await).to_rows();
    assert_eq!(rows, [tabula::row! { "name" => "Ann", "age" => 31 }]);

    // Ids keep counting from the persisted ones
    let bike = assert_ok!(db.define_model("bike", [("brand", "text")]).await);
    assert!(bike.id > next_id);

    let err = assert_err!(db.define_model("User", [("name", "text")]).await);
    assert!(err.is_duplicate_model_name());
}

#[tokio::test]
async fn table_name_prefix_is_configurable() {
    let path = setup::temp_db_path("prefix");

    let mut builder = tabula::Db::builder();
    builder.table_name_prefix("app_").text_max_length(40);
    let db = setup::build(builder, Sqlite::open(&path)).await;

    assert_ok!(db.define_model("user", [("name", "text")]).await);

    assert_eq!(
        physical_columns(&path, "app_user"),
        [
            ("id".to_string(), "INTEGER".to_string()),
            ("name".to_string(), "VARCHAR(40)".to_string()),
        ]
    );
}
