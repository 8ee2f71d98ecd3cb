use poolstat_domain::{DatabaseConfig, ExporterConfig};
use tempfile::TempDir;

/// Configuration pointing at a database inside a fresh temp dir. The dir
/// must outlive the context built from the config.
pub fn test_config(namespace: &str, pool_size: u32) -> (ExporterConfig, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temporary test directory");
    let db_path = temp_dir.path().join("poolstat.db");

    let config = ExporterConfig {
        namespace: namespace.to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        database: DatabaseConfig {
            path: db_path.to_string_lossy().to_string(),
            pool_size,
            connection_timeout_secs: 2,
        },
        ..ExporterConfig::default()
    };

    (config, temp_dir)
}
