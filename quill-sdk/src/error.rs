use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;

/// The error type for every fallible operation in quill.
#[derive(Error, Debug)]
pub enum Error {
	#[error("Error in configuration: {0}")]
	Config(#[from] ::config::ConfigError),

	#[error("Could not serialize configuration")]
	Serialize(#[from] toml::ser::Error),

	#[error("Config file already exists at {0:?}, use --force to overwrite it")]
	ConfigExists(PathBuf),

	#[error("Could not determine the home directory, set {}_CONFIG", crate::PROJECT_NAME.to_uppercase())]
	NoHomeDir,

	#[error("Setting `{0}` is empty, run `init` to configure it")]
	MissingSetting(&'static str),

	#[error("I/O error at {path:?}")]
	Io {
		#[source]
		source: std::io::Error,
		path: PathBuf,
	},

	#[error("Note already exists at {0:?}, use --force to overwrite it")]
	NoteExists(PathBuf),

	#[error("Template not found at {0:?}")]
	TemplateNotFound(PathBuf),

	#[error("Could not launch editor `{editor}`")]
	EditorSpawn {
		#[source]
		source: std::io::Error,
		editor: String,
	},

	#[error("Editor `{editor}` exited with {status}")]
	EditorExit { editor: String, status: ExitStatus },

	#[error("Error in prompt `{prompt}`")]
	Prompt {
		#[source]
		source: std::io::Error,
		prompt: String,
	},
}

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { source, path }
	}
}
