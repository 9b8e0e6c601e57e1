//! This module sets up the database for integration tests
//!
//! The integration test uses the same PostgreSQL container as the development environment.
//! But, it creates a separate test database for each test case.
//! The test database is named in the format `test_branch_db_<uuid>`,
//! where `<uuid>` is the UUID with hyphens replaced by underscores.
//! The test database is dropped when the test case ends.
use std::path::Path;

use sqlx::{Connection as _, Executor as _, PgConnection, PgPool};

use app::{create_pg_pool, load_app_settings, migrate};
use settings::{AppSettings, DatabaseSettings};

pub const TEST_DATABASE_PREFIX: &str = "test_branch_db_";

/// Loads the application settings in the workspace root
pub fn load_app_settings_for_testing() -> AppSettings {
    let dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set");
    let path = Path::new(&dir).join("..").join("app_settings.toml");
    load_app_settings(path.as_os_str().to_str().unwrap()).unwrap()
}

/// Creates and migrates a uniquely named test database
///
/// Returns the settings pointing to the test database and its connection pool.
pub async fn setup_database(mut settings: DatabaseSettings) -> (DatabaseSettings, PgPool) {
    settings.name = format!("{}{}", TEST_DATABASE_PREFIX, uuid::Uuid::new_v4()).replace('-', "_");

    let mut conn = connect_postgres_database(&settings).await;
    conn.execute(format!("CREATE DATABASE {};", settings.name).as_str())
        .await
        .unwrap();
    conn.close().await.unwrap();

    let pool = create_pg_pool(&settings).await.unwrap();
    migrate(&pool).await.unwrap();

    (settings, pool)
}

/// Drops the test database
pub async fn teardown_database(settings: &DatabaseSettings) {
    let mut conn = connect_postgres_database(settings).await;
    conn.execute(format!("DROP DATABASE IF EXISTS {} WITH (FORCE);", settings.name).as_str())
        .await
        .unwrap();
    conn.close().await.unwrap();
}

/// Connects to the **postgres** database
async fn connect_postgres_database(settings: &DatabaseSettings) -> PgConnection {
    let postgres_settings = DatabaseSettings {
        name: String::from("postgres"),
        ..settings.clone()
    };
    PgConnection::connect_with(&postgres_settings.connect_options())
        .await
        .unwrap()
}
