use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use student_registry::config::{Config, LogConfig};
use student_registry::{AppState, Server, StudentStore};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "student-registry")]
#[command(about = "In-memory student registry HTTP service")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Listening address, overrides the config file
    #[arg(long)]
    addr: Option<String>,

    /// Log level, overrides the config file (RUST_LOG still wins)
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(addr) = &args.addr {
        config.server_addr = addr.clone();
    }
    if let Some(level) = &args.log_level {
        config.log.level = level.clone();
    }
    Ok(config)
}

fn init_logging(log: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let Some(file) = &log.file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
        return Ok(None);
    };

    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("log file '{}' has no file name", file))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {:?}", dir))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .init();
    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let _log_guard = init_logging(&config.log)?;

    info!("Starting student registry");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(StudentStore::new());
    let state = AppState::new(store, &config.problem_base_uri);

    let server = Server::bind(&config.server_addr, state)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    info!("Server listening on: {}", server.local_addr());

    server.run().await.context("HTTP server failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_overrides_file_and_file_overrides_defaults() {
        let file = config_file(
            r#"
server_addr = "0.0.0.0:9000"

[log]
level = "debug"
"#,
        );
        let path = file.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "student-registry",
            "--config",
            path,
            "--addr",
            "127.0.0.1:1",
        ])
        .unwrap();

        let config = load_config(&args).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:1");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.problem_base_uri, "https://api.example.com/errors");
    }

    #[test]
    fn test_cli_log_level_overrides_file() {
        let file = config_file("[log]\nlevel = \"debug\"\n");
        let path = file.path().to_str().unwrap();
        let args =
            Args::try_parse_from(["student-registry", "-c", path, "--log-level", "warn"]).unwrap();

        let config = load_config(&args).unwrap();
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.server_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let args = Args::try_parse_from(["student-registry"]).unwrap();
        assert_eq!(load_config(&args).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let args =
            Args::try_parse_from(["student-registry", "--config", "/nonexistent/registry.toml"])
                .unwrap();
        assert!(load_config(&args).is_err());
    }
}
