use anyhow::Result;
use clap::Parser;
use quill_sdk::note::list_names;

use crate::cmd::{Cmd, Loaded};

#[derive(Parser, Debug)]
pub struct List {
	/// List templates instead of notes
	#[arg(long, short = 't')]
	templates: bool,
}

impl Cmd for List {
	fn run(self, loaded: Loaded) -> Result<()> {
		let config = &loaded.config;
		let dir = if self.templates {
			config.templates_path()
		} else {
			config.notes_path()
		};

		for name in list_names(&dir, &config.file_type)? {
			println!("{name}");
		}
		Ok(())
	}
}
