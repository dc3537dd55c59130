use anyhow::{Context, Result};
use clap::Parser;
use quill_sdk::{
	config::{Config, Setting, WriteMode},
	error::Error,
};

use crate::{
	cli::{CliPrompter, Prompter},
	cmd::{Cmd, Loaded},
};

/// Writes the config file. The file consists of:
///   - root_path: the directory holding notes_dir and templates_dir
///   - notes_dir: where note files are stored
///   - templates_dir: where template files are stored
///   - editor: the command used to open notes (vi, vim, nvim, emacs, code)
///   - file_type: the extension of notes and templates
#[derive(Parser, Debug)]
pub struct Init {
	/// Overwrite config file if it exists
	#[arg(long, short = 'f')]
	pub(crate) force: bool,
}

impl Cmd for Init {
	fn run(self, loaded: Loaded) -> Result<()> {
		let path = loaded.path.clone();
		self.execute(&CliPrompter::default(), loaded)?;
		println!("config written to {}", path.display());
		Ok(())
	}
}

impl Init {
	pub(crate) fn execute(&self, prompter: &dyn Prompter, loaded: Loaded) -> Result<Config> {
		let Loaded { path, mut config } = loaded;
		let mode = if self.force { WriteMode::Overwrite } else { WriteMode::Safe };

		// without --force an existing file fails before any prompt
		if mode == WriteMode::Safe && path.exists() {
			return Err(Error::ConfigExists(path).into());
		}

		let answers = Setting::ALL
			.into_iter()
			.map(|setting| prompter.ask(setting, config.get(setting)).map(|answer| (setting, answer)))
			.collect::<Result<Vec<_>, Error>>()?;
		config.merge(answers);

		config
			.save(&path, mode)
			.with_context(|| format!("could not write configuration to {}", path.display()))?;
		Ok(config)
	}
}
