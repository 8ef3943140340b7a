use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_pool_enables_foreign_keys() {
    let test_db = common::TestDb::new("test_pool_enables_foreign_keys.db");
    let mut conn = test_db.pool().get().expect("pooled connection");

    // SQLite leaves foreign keys off by default; the pool customizer
    // must have switched them on for this connection.
    let pragma = sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeysPragma>(&mut conn)
        .expect("pragma readable");
    assert_eq!(pragma.foreign_keys, 1);
}

#[test]
fn test_fixture_removes_db_files() {
    let name = "test_fixture_removes_db_files.db";

    {
        let test_db = common::TestDb::new(name);
        assert!(test_db.pool().get().is_ok());
        assert!(std::path::Path::new(name).exists());
    }

    // The fixture cleans up the database and its WAL sidecars.
    for suffix in ["", "-wal", "-shm"] {
        assert!(!std::path::Path::new(&format!("{name}{suffix}")).exists());
    }
}
