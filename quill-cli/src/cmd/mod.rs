use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use quill_sdk::config::Config;

use crate::cmd::{config::ShowConfig, init::Init, list::List, new::New};

mod config;
mod init;
mod list;
mod logs;
mod new;

#[derive(Subcommand)]
enum Command {
	/// Interactively write the configuration file
	Init(Init),
	/// Create a new note and open it in the editor
	New(New),
	/// Show the configuration in use
	Config(ShowConfig),
	/// List notes or templates
	List(List),
}

#[derive(Parser)]
#[command(about, author, version)]
pub struct App {
	#[command(subcommand)]
	command: Command,
	/// Config file to use instead of ~/.quill.toml
	#[arg(long, short = 'c', global = true, value_hint = ValueHint::FilePath)]
	config: Option<PathBuf>,
	/// Increase logging verbosity (-v, -vv, -vvv)
	#[arg(long, short = 'v', global = true, action = ArgAction::Count)]
	verbose: u8,
}

/// The configuration every command runs with, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Loaded {
	pub path: PathBuf,
	pub config: Config,
}

impl Loaded {
	fn new(path: Option<PathBuf>) -> anyhow::Result<Self> {
		let path = Config::resolve_path(path)?;
		let config = Config::load(&path).with_context(|| format!("could not load configuration from {}", path.display()))?;
		Ok(Self { path, config })
	}

	/// Like [`Loaded::new`], but a file that cannot be loaded yields the
	/// defaults. Used by `init --force`, which rewrites the file anyway.
	fn or_default(path: Option<PathBuf>) -> anyhow::Result<Self> {
		let path = Config::resolve_path(path)?;
		let config = Config::load(&path).unwrap_or_else(|error| {
			tracing::warn!(%error, path = %path.display(), "Ignoring unreadable configuration, starting from defaults.");
			Config::default()
		});
		Ok(Self { path, config })
	}
}

pub trait Cmd {
	fn run(self, loaded: Loaded) -> anyhow::Result<()>;
}

impl App {
	pub fn run(self) -> anyhow::Result<()> {
		let _guard = logs::init(self.verbose);
		let loaded = match &self.command {
			Command::Init(init) if init.force => Loaded::or_default(self.config)?,
			_ => Loaded::new(self.config)?,
		};
		tracing::debug!(path = %loaded.path.display(), exists = loaded.path.exists(), "Using configuration.");

		match self.command {
			Command::Init(init) => init.run(loaded),
			Command::New(new) => new.run(loaded),
			Command::Config(show) => show.run(loaded),
			Command::List(list) => list.run(loaded),
		}
	}
}
