use std::{
	path::Path,
	process::{Command, Stdio},
};

use crate::error::Error;

/// Something able to open a file in an editor and wait for it to finish.
pub trait Launcher {
	fn launch(&self, editor: &str, path: &Path) -> Result<(), Error>;
}

/// Runs the editor as a child process sharing this process's terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
	fn launch(&self, editor: &str, path: &Path) -> Result<(), Error> {
		let status = Command::new(editor)
			.arg(path)
			.stdin(Stdio::inherit())
			.stdout(Stdio::inherit())
			.stderr(Stdio::inherit())
			.status()
			.map_err(|source| Error::EditorSpawn {
				source,
				editor: editor.to_string(),
			})?;

		if status.success() {
			Ok(())
		} else {
			Err(Error::EditorExit {
				editor: editor.to_string(),
				status,
			})
		}
	}
}

#[derive(Debug)]
pub enum EditorOutcome {
	Opened,
	Failed(Error),
}

/// Opens `path` with `editor`. Failures are logged and handed back as
/// [`EditorOutcome::Failed`], never as an `Err`.
pub fn open(launcher: &dyn Launcher, editor: &str, path: &Path) -> EditorOutcome {
	tracing::debug!(editor, path = %path.display(), "Launching editor.");
	match launcher.launch(editor, path) {
		Ok(()) => EditorOutcome::Opened,
		Err(error) => {
			tracing::error!(%error, path = %path.display(), "Editor failed, the note was kept.");
			EditorOutcome::Failed(error)
		}
	}
}
