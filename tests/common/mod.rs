//! Shared fixtures for the integration tests.

use std::path::PathBuf;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use storefront::db::{DbPool, establish_connection_pool};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A throwaway SQLite database: created and migrated on construction,
/// deleted again (WAL sidecars included) when the fixture drops.
pub struct TestDb {
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let path = PathBuf::from(name);
        let _ = std::fs::remove_file(&path); // leftovers from a crashed run

        let pool = establish_connection_pool(name).expect("pool over throwaway database");
        {
            let mut conn = pool.get().expect("connection from fresh pool");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("schema migrations apply cleanly");
        }

        Self { path, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut sidecar = self.path.clone().into_os_string();
            sidecar.push(suffix);
            let _ = std::fs::remove_file(sidecar);
        }
    }
}
