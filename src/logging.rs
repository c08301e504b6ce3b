// SPDX-License-Identifier: MIT
//
// File logging.
//
// stdout carries the frame, so logs can never go to the terminal. When
// `NILO_LOG` is set (an `EnvFilter` directive such as `debug` or
// `nilo_term=trace`), events are written to a file: `NILO_LOG_FILE` if
// given, otherwise `nilo.log` in the temp directory. Without `NILO_LOG`
// no subscriber is installed and every `tracing` macro is a no-op.
//
// The appender writes synchronously from the one editor thread; there is
// no background worker.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Filter directive variable. Logging is off unless this is set.
const LOG_ENV: &str = "NILO_LOG";

/// Optional log file path override.
const LOG_FILE_ENV: &str = "NILO_LOG_FILE";

const DEFAULT_LOG_FILE: &str = "nilo.log";

/// Install the file subscriber if `NILO_LOG` asks for one.
///
/// Failures (bad filter, unwritable file) leave logging off; they are never
/// worth refusing to start the editor over.
pub fn init() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };

    let path = log_path(env::var_os(LOG_FILE_ENV));
    let (dir, file_name) = split_path(&path);

    let Ok(appender) = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
    else {
        return;
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging started");
    }
}

/// Where the log goes: the override if present and non-empty, else the default.
fn log_path(overridden: Option<OsString>) -> PathBuf {
    match overridden {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => env::temp_dir().join(DEFAULT_LOG_FILE),
    }
}

/// Split a log path into the directory and the file name the appender wants.
fn split_path(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map_or_else(|| DEFAULT_LOG_FILE.to_owned(), |f| f.to_string_lossy().into_owned());
    (dir, file_name)
}
