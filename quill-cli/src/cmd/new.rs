use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use colored::Colorize;
use quill_sdk::{
	editor::{Launcher, ProcessLauncher},
	note::{create_note, NoteOutcome, NoteRequest},
};

use crate::cmd::{Cmd, Loaded};

/// Create a new note with a given filename. If no filename is given, the
/// filename will be the timestamp.
#[derive(Parser, Debug)]
pub struct New {
	/// Name of the note, without extension
	filename: Option<String>,
	/// The template to use
	#[arg(long, short = 't')]
	template: Option<String>,
	/// Where the new note will be created
	#[arg(long, short = 'o', value_hint = ValueHint::DirPath)]
	output: Option<PathBuf>,
	/// Overwrite note if it already exists
	#[arg(long, short = 'f')]
	force: bool,
	/// Create the note without opening the editor
	#[arg(long)]
	no_edit: bool,
}

impl Cmd for New {
	fn run(self, loaded: Loaded) -> Result<()> {
		let request = NoteRequest {
			filename: self.filename,
			template: self.template,
			output: self.output,
			force: self.force,
		};
		let process = ProcessLauncher;
		let launcher: Option<&dyn Launcher> = if self.no_edit { None } else { Some(&process) };

		let outcome = create_note(&loaded.config, &request, launcher).context("could not create note")?;
		match outcome {
			NoteOutcome::Created(path) => println!("{}", path.display()),
			NoteOutcome::CreatedButEditorFailed { path, .. } => {
				println!("{} {}", path.display(), "(editor failed, note kept)".yellow());
			}
		}
		Ok(())
	}
}
