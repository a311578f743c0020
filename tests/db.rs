mod common;

#[test]
fn test_pool_connects_to_migrated_db() {
    let test_db = common::TestDb::new("test_pool_connects.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}
