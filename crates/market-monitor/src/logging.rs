//! Logging setup.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Setup logging with the given level, optionally mirrored to a file.
///
/// `RUST_LOG` takes precedence over `level`. The returned guard flushes the
/// file sink on drop and must be held for the life of the program.
pub fn setup_logging(level: &str, json: bool, file: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let (layers, guard) = build_layers(json, file.map(Path::new));

    // Only the first call installs a global subscriber.
    let _ = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init();

    guard
}

/// Stderr layer in the requested format plus an optional plain-text file layer.
fn build_layers(json: bool, file: Option<&Path>) -> (Vec<BoxedLayer>, Option<WorkerGuard>) {
    let stderr = fmt::layer().with_writer(std::io::stderr);
    let mut layers: Vec<BoxedLayer> = vec![if json {
        stderr.json().boxed()
    } else {
        stderr.pretty().boxed()
    }];

    let guard = file.map(|path| {
        let (dir, name) = split_log_path(path);
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt::layer().with_ansi(false).with_writer(writer).boxed());
        guard
    });

    (layers, guard)
}

/// Directory and file name of a log path; bare names land in the working directory.
fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("market.log"));
    (dir, name)
}
