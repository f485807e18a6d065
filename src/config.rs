use std::path::{Path, PathBuf};
use clap::{Arg, ArgMatches, Command};
use thiserror::Error;

pub const LOWEST_PORT: u32 = 49152;
pub const HIGHEST_PORT: u32 = 65535;

const DEFAULT_SUPPORT_EMAIL: &str = "support@localhost";
const DEFAULT_MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;
const DEFAULT_MAX_POINTS: usize = 100_000;

const ENV_PORT: &str = "LINECHART_PORT";
const ENV_IMAGE_DIR: &str = "LINECHART_IMAGE_DIR";
const ENV_BASE_URL: &str = "LINECHART_BASE_URL";
const ENV_SUPPORT_EMAIL: &str = "LINECHART_SUPPORT_EMAIL";
const ENV_WORKERS: &str = "LINECHART_WORKERS";
const ENV_MAX_BODY_BYTES: &str = "LINECHART_MAX_BODY_BYTES";
const ENV_MAX_POINTS: &str = "LINECHART_MAX_POINTS";

/// Startup configuration errors; each one terminates the process with its own exit code
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No port configured (--port or LINECHART_PORT)")]
    MissingPort,
    #[error("Port '{0}' must be an integer between 49152 and 65535")]
    InvalidPort(String),
    #[error("No image directory configured (--image-dir or LINECHART_IMAGE_DIR)")]
    MissingImageDirectory,
    #[error("The image directory setting is empty")]
    EmptyImageDirectory,
    #[error("Image directory '{0}' does not exist")]
    ImageDirectoryNotFound(String),
    #[error("Image directory '{0}' is not an absolute path")]
    RelativeImageDirectory(String),
    #[error("Invalid value '{value}' for {name}: expected a positive integer")]
    InvalidNumber { name: &'static str, value: String },
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::MissingPort => 101,
            ConfigError::InvalidPort(_) => 102,
            ConfigError::MissingImageDirectory => 103,
            ConfigError::EmptyImageDirectory => 104,
            ConfigError::ImageDirectoryNotFound(_) => 105,
            ConfigError::RelativeImageDirectory(_) => 106,
            ConfigError::InvalidNumber { .. } => 107,
        }
    }
}

/// Exit code used when the HTTP listener cannot be bound
pub const EXIT_BIND_FAILED: i32 = 99;

/// Immutable service configuration, built once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub image_directory: PathBuf,
    pub public_base_url: String,
    pub support_email: String,
    pub worker_threads: usize,
    pub max_body_bytes: u64,
    pub max_points: usize,
}

impl ServiceConfig {
    /// Minimal configuration with defaults for every tuning value
    pub fn new(port: u16, image_directory: impl Into<PathBuf>) -> Self {
        ServiceConfig {
            port,
            image_directory: image_directory.into(),
            public_base_url: default_base_url(port),
            support_email: DEFAULT_SUPPORT_EMAIL.to_string(),
            worker_threads: default_workers(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_points: DEFAULT_MAX_POINTS,
        }
    }

    /// Public URL under which a stored chart can be fetched
    pub fn result_link(&self, id: &uuid::Uuid) -> String {
        format!(
            "{}/charts/line/result/{}",
            self.public_base_url.trim_end_matches('/'),
            id
        )
    }
}

fn default_base_url(port: u16) -> String {
    format!("http://127.0.0.1:{}", port)
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Command-line interface
pub fn build_cli() -> Command {
    Command::new("linechart-service")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Microservice for line chart plotting")
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Listen port (49152-65535)"),
        )
        .arg(
            Arg::new("image-dir")
                .long("image-dir")
                .value_name("DIR")
                .help("Absolute, existing directory for rendered charts"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Public base URL used in result links"),
        )
        .arg(
            Arg::new("support-email")
                .long("support-email")
                .value_name("EMAIL")
                .help("Contact address shown in error messages"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .value_name("N")
                .help("Maximum number of charts rendered concurrently"),
        )
        .arg(
            Arg::new("max-body-bytes")
                .long("max-body-bytes")
                .value_name("BYTES")
                .help("Largest accepted request body"),
        )
        .arg(
            Arg::new("max-points")
                .long("max-points")
                .value_name("N")
                .help("Largest accepted number of points per series"),
        )
}

/// Load configuration from the environment (including a `.env` file loaded at startup) and the command line
pub fn load() -> Result<ServiceConfig, ConfigError> {
    let matches = build_cli().get_matches();
    resolve(&matches, |key| std::env::var(key).ok())
}

/// Combine command-line values with a key lookup; command-line values win
pub fn resolve<F>(matches: &ArgMatches, env: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let setting = |arg: &str, key: &str| -> Option<String> {
        matches
            .get_one::<String>(arg)
            .cloned()
            .or_else(|| env(key))
    };

    let port_raw = setting("port", ENV_PORT).ok_or(ConfigError::MissingPort)?;
    let port = parse_port(&port_raw)?;

    let image_raw = setting("image-dir", ENV_IMAGE_DIR).ok_or(ConfigError::MissingImageDirectory)?;
    let image_directory = check_image_directory(&image_raw)?;

    let mut config = ServiceConfig::new(port, image_directory);

    if let Some(url) = setting("base-url", ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
        config.public_base_url = url.trim().to_string();
    }

    if let Some(email) = setting("support-email", ENV_SUPPORT_EMAIL).filter(|e| !e.trim().is_empty()) {
        config.support_email = email.trim().to_string();
    }

    if let Some(raw) = setting("workers", ENV_WORKERS) {
        config.worker_threads = parse_positive("workers", &raw)? as usize;
    }

    if let Some(raw) = setting("max-body-bytes", ENV_MAX_BODY_BYTES) {
        config.max_body_bytes = parse_positive("max-body-bytes", &raw)?;
    }

    if let Some(raw) = setting("max-points", ENV_MAX_POINTS) {
        config.max_points = parse_positive("max-points", &raw)? as usize;
    }

    Ok(config)
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port: u32 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;

    if !(LOWEST_PORT..=HIGHEST_PORT).contains(&port) {
        return Err(ConfigError::InvalidPort(raw.to_string()));
    }

    Ok(port as u16)
}

fn check_image_directory(raw: &str) -> Result<PathBuf, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::EmptyImageDirectory);
    }

    let path = Path::new(raw);

    if !path.is_dir() {
        return Err(ConfigError::ImageDirectoryNotFound(raw.to_string()));
    }

    if path.is_relative() {
        return Err(ConfigError::RelativeImageDirectory(raw.to_string()));
    }

    Ok(path.to_path_buf())
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve_with(args: &[&str], env: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let mut argv = vec!["linechart-service"];
        argv.extend_from_slice(args);
        let matches = build_cli().try_get_matches_from(argv).expect("cli parse failed");

        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        resolve(&matches, |key| env.get(key).cloned())
    }

    #[test]
    fn test_cli_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dir_str = dir.path().to_str().expect("utf-8 path");

        let config = resolve_with(&["--port", "50001", "--image-dir", dir_str], &[]).expect("config");

        assert_eq!(config.port, 50001);
        assert_eq!(config.image_directory, dir.path());
        assert_eq!(config.public_base_url, "http://127.0.0.1:50001");
        assert_eq!(config.max_points, DEFAULT_MAX_POINTS);
        assert!(config.worker_threads >= 1);
    }

    #[test]
    fn test_env_values_and_cli_precedence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dir_str = dir.path().to_str().expect("utf-8 path");

        let config = resolve_with(
            &["--port", "60000"],
            &[
                (ENV_PORT, "50001"),
                (ENV_IMAGE_DIR, dir_str),
                (ENV_BASE_URL, "https://charts.example.com/"),
                (ENV_SUPPORT_EMAIL, "help@example.com"),
                (ENV_WORKERS, "3"),
            ],
        )
        .expect("config");

        assert_eq!(config.port, 60000);
        assert_eq!(config.worker_threads, 3);
        assert_eq!(config.support_email, "help@example.com");

        let id = uuid::Uuid::nil();
        assert_eq!(
            config.result_link(&id),
            "https://charts.example.com/charts/line/result/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_exit_codes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dir_str = dir.path().to_str().expect("utf-8 path");

        let code = |args: &[&str]| resolve_with(args, &[]).unwrap_err().exit_code();

        assert_eq!(code(&[]), 101);
        assert_eq!(code(&["--port", "abc"]), 102);
        assert_eq!(code(&["--port", "8080"]), 102);
        assert_eq!(code(&["--port", "70000"]), 102);
        assert_eq!(code(&["--port", "50001"]), 103);
        assert_eq!(code(&["--port", "50001", "--image-dir", ""]), 104);
        assert_eq!(code(&["--port", "50001", "--image-dir", "/no/such/dir/anywhere"]), 105);
        assert_eq!(code(&["--port", "50001", "--image-dir", "."]), 106);
        assert_eq!(
            code(&["--port", "50001", "--image-dir", dir_str, "--workers", "0"]),
            107
        );
        assert_eq!(
            code(&["--port", "50001", "--image-dir", dir_str, "--max-points", "lots"]),
            107
        );
    }

    #[test]
    fn test_port_bounds_are_inclusive() {
        assert_eq!(parse_port("49152").expect("low"), 49152);
        assert_eq!(parse_port("65535").expect("high"), 65535);
        assert!(parse_port("49151").is_err());
    }
}
