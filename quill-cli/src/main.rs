use crate::cmd::App;
use anyhow::Result;
use clap::Parser;

mod cli;
mod cmd;

fn main() -> Result<()> {
	let app: App = App::parse();
	app.run()
}
