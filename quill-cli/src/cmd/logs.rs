use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use chrono::Local;
use quill_sdk::PROJECT_NAME;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
	filter::{EnvFilter, LevelFilter},
	fmt,
	layer::SubscriberExt,
	util::SubscriberInitExt,
	Layer,
};

fn level(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	}
}

/// Opens a per-run log file in `logs_dir`, creating the directory first.
fn log_file(logs_dir: &Path) -> io::Result<(NonBlocking, WorkerGuard)> {
	fs::create_dir_all(logs_dir)?;
	let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S%.3f");
	let file_appender = tracing_appender::rolling::never(logs_dir, format!("{timestamp}.log"));
	Ok(tracing_appender::non_blocking(file_appender))
}

/// Logs to stderr at a level picked by `-v` (or `RUST_LOG`). When
/// `QUILL_LOG_DIR` is set, every event is also written to a per-run file
/// there; the returned guard flushes it on drop. A log directory that cannot
/// be created only costs the file output.
pub fn init(verbosity: u8) -> Option<WorkerGuard> {
	let filter = EnvFilter::builder()
		.with_default_directive(level(verbosity).into())
		.from_env_lossy();
	let stderr_layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.with_filter(filter);

	let var = format!("{}_LOG_DIR", PROJECT_NAME.to_uppercase());
	let logs_dir = env::var_os(var).filter(|dir| !dir.is_empty()).map(PathBuf::from);
	let mut skipped = None;
	let (file_layer, guard) = match logs_dir.as_deref().map(|dir| (dir, log_file(dir))) {
		Some((_, Ok((writer, guard)))) => {
			let layer = fmt::layer()
				.with_writer(writer)
				.with_ansi(false)
				.pretty()
				.with_filter(LevelFilter::TRACE);
			(Some(layer), Some(guard))
		}
		Some((dir, Err(error))) => {
			skipped = Some((dir.to_path_buf(), error));
			(None, None)
		}
		None => (None, None),
	};

	tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
	if let Some((dir, error)) = skipped {
		tracing::warn!(%error, dir = %dir.display(), "Could not create log directory, logging to stderr only.");
	}
	guard
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_raises_the_level() {
		assert_eq!(level(0), LevelFilter::WARN);
		assert_eq!(level(1), LevelFilter::INFO);
		assert_eq!(level(2), LevelFilter::DEBUG);
		assert_eq!(level(9), LevelFilter::TRACE);
	}

	#[test]
	fn log_file_creates_missing_directory() {
		let dir = tempfile::tempdir().unwrap();
		let logs_dir = dir.path().join("nested").join("logs");
		let (_writer, guard) = log_file(&logs_dir).unwrap();
		drop(guard);
		assert_eq!(fs::read_dir(&logs_dir).unwrap().count(), 1);
	}

	#[test]
	fn log_file_under_a_regular_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let blocker = dir.path().join("not-a-dir");
		fs::write(&blocker, "").unwrap();
		assert!(log_file(&blocker.join("logs")).is_err());
	}
}
