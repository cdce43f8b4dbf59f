//! export-proxies CLI - system proxy settings as shell exports
//!
//! Prints `export` lines for stdout so that `eval "$(export-proxies)"` gives
//! command-line tools the same proxy as the operating system.

mod cli;
mod error;
mod output;

use clap::Parser;
use cli::Cli;
use error::Result;
use export_proxies::{ConfigSource, ProxySnapshot, SystemSource};
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging (stderr only, stdout must stay sourceable)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        error!("{}", e);
        eprintln!("export-proxies: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.from {
        Some(path) => {
            info!("Using proxy snapshot {}", path.display());
            let snapshot = ProxySnapshot::from_json_file(path)?;
            emit(cli, &snapshot, &snapshot, out)
        }
        None => {
            let source = SystemSource::open();
            info!("Using {}", source.name());
            let snapshot = source.snapshot()?;
            emit(cli, &source, snapshot, out)
        }
    }
}

fn emit(
    cli: &Cli,
    source: &dyn ConfigSource,
    snapshot: &ProxySnapshot,
    out: &mut impl Write,
) -> Result<()> {
    if cli.dump {
        output::write_snapshot(snapshot, out)
    } else {
        output::write_exports(source, out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use export_proxies::ProxyError;

    fn run_with(args: &[&str]) -> (Result<()>, String) {
        let cli = Cli::parse_from(args);
        let mut out = Vec::new();
        let result = run(&cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn snapshot_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_run_from_snapshot() {
        let file = snapshot_file(
            r#"{"socks": {"enabled": true, "host": "s.local", "port": 1080},
                "exceptions": ["*.internal", "10.0.0.1"]}"#,
        );
        let path = file.path().to_str().unwrap();
        let (result, text) = run_with(&["export-proxies", "--from", path]);
        result.unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("export ALL_PROXY=\"socks://s.local:1080\"\n"));
        assert!(text.ends_with("export No_Proxy=\".internal,10.0.0.1\"\n"));
    }

    #[test]
    fn test_run_dump_snapshot() {
        let file = snapshot_file(r#"{"http": {"enabled": true, "host": "h", "port": 80}}"#);
        let path = file.path().to_str().unwrap();
        let (result, text) = run_with(&["export-proxies", "--from", path, "--dump"]);
        result.unwrap();
        let snapshot = ProxySnapshot::from_json_str(&text).unwrap();
        assert_eq!(snapshot.http.host.as_deref(), Some("h"));
    }

    #[test]
    fn test_run_missing_snapshot_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let (result, text) = run_with(&["export-proxies", "--from", path.to_str().unwrap()]);
        assert!(matches!(
            result,
            Err(CliError::Proxy(ProxyError::ConfigUnavailable { .. }))
        ));
        assert!(text.is_empty());
    }

    #[test]
    fn test_run_system_store_is_consistent() {
        let (result, text) = run_with(&["export-proxies"]);
        if result.is_err() {
            assert!(text.is_empty());
        }
    }
}
