use shopfloor_db::{create_pool, queries, run_migrations, DbRuntimeSettings};

#[test]
fn db_initialization_works() {
    let pool = create_pool(":memory:", DbRuntimeSettings::default()).expect("failed to create pool");
    let conn = pool.get().expect("failed to get connection");
    let applied = run_migrations(&conn).expect("failed to run migrations");
    assert_eq!(applied, 4);

    // Verify table set (excluding sqlite_sequence and internal tables)
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
        .expect("failed to prepare table listing query");
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .expect("failed to execute table listing query")
        .map(|r| r.expect("failed to read table name"))
        .collect();

    assert_eq!(
        tables,
        [
            "_shopfloor_migrations",
            "employees",
            "lines",
            "products",
            "work_orders"
        ]
    );
}

#[test]
fn on_disk_database_persists_between_pools() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("shopfloor.db");
    let db_path = db_path.to_str().expect("temp path should be valid UTF-8");

    {
        let pool = create_pool(db_path, DbRuntimeSettings::default()).expect("failed to create pool");
        let conn = pool.get().expect("failed to get connection");
        run_migrations(&conn).expect("failed to run migrations");
        conn.execute("INSERT INTO employees (name) VALUES ('Ana')", [])
            .expect("failed to seed employee");
    }

    // A second pool against the same file sees the committed row and
    // applies no further migrations.
    let pool = create_pool(db_path, DbRuntimeSettings::default()).expect("failed to reopen pool");
    let conn = pool.get().expect("failed to get connection");
    let applied = run_migrations(&conn).expect("failed to re-run migrations");
    assert_eq!(applied, 0);

    let employees = queries::list_employees(&conn).expect("failed to list employees");
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name, "Ana");
}

#[test]
fn pooled_connections_enforce_referential_integrity() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("shopfloor.db");
    let db_path = db_path.to_str().expect("temp path should be valid UTF-8");

    let pool = create_pool(db_path, DbRuntimeSettings::default()).expect("failed to create pool");
    let conn = pool.get().expect("failed to get connection");
    run_migrations(&conn).expect("failed to run migrations");

    // The write path lives outside this codebase, but the schema-level
    // constraint must reject a dangling reference regardless of which
    // pooled connection performs the write.
    let err = conn
        .execute(
            "INSERT INTO work_orders (order_number, quantity, status, line_id, product_id)
             VALUES ('WO-9999', 1, 'PLANNED', 42, 42)",
            [],
        )
        .expect_err("dangling foreign keys should be rejected");
    assert!(
        err.to_string().contains("FOREIGN KEY constraint failed"),
        "unexpected error: {err}"
    );
}
