use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use leasedesk::db::{DbPool, establish_connection_pool};
use leasedesk::models::auth::AuthenticatedUser;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// File-backed SQLite database living in a temp directory for one test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(name);

        let pool = establish_connection_pool(path.to_str().expect("Invalid db path"))
            .expect("Failed to create pool");

        let mut conn = pool.get().expect("Failed to get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// A signed-in broker for hub 1 carrying the given roles.
#[allow(dead_code)]
pub fn test_user(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "1".to_string(),
        email: "broker@example.com".to_string(),
        name: "Test Broker".to_string(),
        hub_id: 1,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: 4102444800,
    }
}
