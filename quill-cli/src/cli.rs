use dialoguer::{theme::ColorfulTheme, Input};
use quill_sdk::{config::Setting, error::Error};

/// Asks the user for the value of a setting.
pub trait Prompter {
	fn ask(&self, setting: Setting, default: &str) -> Result<String, Error>;
}

/// Prompts on the terminal with dialoguer, the current value pre-filled.
#[derive(Default)]
pub struct CliPrompter {
	theme: ColorfulTheme,
}

fn label(setting: Setting) -> &'static str {
	match setting {
		Setting::RootPath => "Root Path",
		Setting::NotesDir => "Notes Dir",
		Setting::TemplatesDir => "Templates Dir",
		Setting::Editor => "Editor",
		Setting::FileType => "File Type",
	}
}

impl Prompter for CliPrompter {
	fn ask(&self, setting: Setting, default: &str) -> Result<String, Error> {
		Input::<String>::with_theme(&self.theme)
			.with_prompt(format!("{} ({})", label(setting), setting.help()))
			.default(default.to_string())
			.interact_text()
			.map_err(|source| Error::Prompt {
				source,
				prompt: setting.key().to_string(),
			})
	}
}
