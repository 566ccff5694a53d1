use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    ConfigOverrides, DatabaseSettings, LoggingSettings, ServerSettings, StorageBackend,
};

/// The file read by [`load_config`].
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variables with this prefix override file values,
/// e.g. `STUDENTS__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "STUDENTS";

/// Loads the application configuration from the `config.toml` file.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE), &ConfigOverrides::default())
}

/// Loads the application configuration from the given file.
///
/// The file is optional: defaults apply for anything it leaves out, then
/// `STUDENTS__*` environment variables override both, and `overrides` (usually
/// command-line flags) override everything. `DATABASE_URL` is used when no URL
/// was configured any other way.
pub fn load_config_from(path: &Path, overrides: &ConfigOverrides) -> Result<Config, ConfigError> {
    let environment = config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true);
    build_config(path, environment, std::env::var("DATABASE_URL").ok(), overrides)
}

fn build_config(
    path: &Path,
    environment: config::Environment,
    database_url: Option<String>,
    overrides: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .set_default("database.backend", "postgres")?
        .set_default("database.max_connections", 10_i64)?
        .set_default("database.acquire_timeout_secs", 5_i64)?
        .set_default("logging.filter", "info")?
        .add_source(config::File::from(path).required(false))
        .add_source(environment)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let mut config = builder.try_deserialize::<Config>()?;
    if config.database.url.is_none() {
        config.database.url = database_url;
    }
    overrides.apply(&mut config);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::net::{IpAddr, Ipv4Addr};
    use tempfile::NamedTempFile;

    fn env_from(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_when_file_is_missing() {
        let config = build_config(
            Path::new("does-not-exist.toml"),
            env_from(&[]),
            Some("postgres://localhost/students".to_string()),
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout().as_secs(), 5);
        assert_eq!(config.logging.filter, "info");
        assert!(config.logging.directory.is_none());
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/students")
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            backend = "memory"

            [logging]
            filter = "debug"
            directory = "logs"
            "#,
        );

        let config =
            build_config(file.path(), env_from(&[]), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(
            config.logging.directory.as_deref(),
            Some(Path::new("logs"))
        );
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(
            r#"
            [server]
            port = 8080

            [database]
            backend = "memory"
            "#,
        );

        let config = build_config(
            file.path(),
            env_from(&[("STUDENTS__SERVER__PORT", "9090")]),
            None,
            &ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn configured_url_wins_over_database_url_fallback() {
        let file = write_config(
            r#"
            [database]
            url = "postgres://configured/students"
            "#,
        );

        let config = build_config(
            file.path(),
            env_from(&[]),
            Some("postgres://fallback/students".to_string()),
            &ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://configured/students")
        );
    }

    #[test]
    fn postgres_backend_requires_a_url() {
        let err = build_config(
            Path::new("does-not-exist.toml"),
            env_from(&[]),
            None,
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn overrides_win_and_are_validated_after_applying() {
        let overrides = ConfigOverrides {
            host: Some(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: Some(4000),
            backend: Some(StorageBackend::Memory),
        };
        let config = build_config(
            Path::new("does-not-exist.toml"),
            env_from(&[("STUDENTS__SERVER__PORT", "9090")]),
            None,
            &overrides,
        )
        .unwrap();

        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:4000");
        assert_eq!(config.database.backend, StorageBackend::Memory);
    }

    #[test]
    fn zero_connections_is_rejected() {
        let file = write_config(
            r#"
            [database]
            backend = "memory"
            max_connections = 0
            "#,
        );

        let err = build_config(file.path(), env_from(&[]), None, &ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
