use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use quill_sdk::config::Setting;

use crate::cmd::{Cmd, Loaded};

#[derive(Parser, Debug)]
pub struct ShowConfig {
	/// Only print the path of the config file
	#[arg(long, short = 'p')]
	path: bool,
}

impl Cmd for ShowConfig {
	fn run(self, loaded: Loaded) -> Result<()> {
		let Loaded { path, config } = loaded;
		if self.path {
			println!("{}", path.display());
			return Ok(());
		}

		let state = if path.exists() { "" } else { " (not created yet, run `quill init`)" };
		println!("{}: {}{}", "Config file".bold().underline(), path.display(), state.dimmed());
		for setting in Setting::ALL {
			println!("  {} = {}", setting.key(), config.get(setting).bright_purple());
		}
		println!("{}: {}", "Notes".bold().underline(), config.notes_path().display());
		println!("{}: {}", "Templates".bold().underline(), config.templates_path().display());
		Ok(())
	}
}
