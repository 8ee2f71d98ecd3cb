use std::sync::Arc;

use poolstat_domain::DatabaseConfig;
use poolstat_infra::InstrumentedPool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tempfile::TempDir;

/// Temporary SQLite database behind an instrumented pool. Keeps the file
/// alive for the duration of a test.
pub struct TestDatabase {
    pub pool: Arc<InstrumentedPool<SqliteConnectionManager>>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a database whose pool holds `pool_size` connections.
    pub fn new(pool_size: u32) -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let config = DatabaseConfig {
            path: db_path.display().to_string(),
            pool_size,
            connection_timeout_secs: 2,
        };
        let manager = SqliteConnectionManager::file(&db_path);
        let pool = InstrumentedPool::build(manager, &config).expect("pool should be created");

        Self { pool: Arc::new(pool), _temp_dir: temp_dir }
    }
}

/// Value of an unlabelled sample in exposition text.
pub fn sample_value(text: &str, name: &str) -> Option<f64> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(' ')?.parse().ok())
}

/// Number of rows in `table`.
pub fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count query should succeed")
}
