use notification_service::infrastructure::persistence::Database;
use std::ops::Deref;
use tempfile::TempDir;

/// Migrated SQLite database in its own temporary directory. The directory,
/// including WAL and SHM files, is removed when this is dropped.
pub struct TestDatabase {
    db: Database,
    _dir: TempDir,
}

impl TestDatabase {
    pub fn db(&self) -> Database {
        self.db.clone()
    }
}

impl Deref for TestDatabase {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

pub async fn setup_test_db() -> TestDatabase {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("notifications.db").display()
    );

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    TestDatabase { db, _dir: dir }
}
