use std::{
	env,
	fs::{self, OpenOptions},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};

use config::{Config as LayeredConfig, Environment, File, FileFormat, Map};
use quill_stdx::path::{clean_str, PathExt};
use serde::{Deserialize, Serialize};

use crate::{error::Error, PROJECT_NAME};

/// One of the recognized configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
	RootPath,
	NotesDir,
	TemplatesDir,
	Editor,
	FileType,
}

impl Setting {
	pub const ALL: [Setting; 5] = [
		Setting::RootPath,
		Setting::NotesDir,
		Setting::TemplatesDir,
		Setting::Editor,
		Setting::FileType,
	];

	pub fn key(self) -> &'static str {
		match self {
			Setting::RootPath => "root_path",
			Setting::NotesDir => "notes_dir",
			Setting::TemplatesDir => "templates_dir",
			Setting::Editor => "editor",
			Setting::FileType => "file_type",
		}
	}

	/// Whether answers for this setting are cleaned as paths before being stored.
	pub fn is_path(self) -> bool {
		matches!(self, Setting::RootPath | Setting::NotesDir | Setting::TemplatesDir)
	}

	pub fn help(self) -> &'static str {
		match self {
			Setting::RootPath => "The root path to quill. The notes_dir and templates_dir will be inside of this root path.",
			Setting::NotesDir => "The directory where note files will be stored.",
			Setting::TemplatesDir => "The directory where template files will be stored.",
			Setting::Editor => "The editor used to open notes: a single program callable from PATH, given the note path as its only argument (vi, vim, nvim, emacs, code).",
			Setting::FileType => "The extension of note and template files.",
		}
	}
}

/// How [`Config::save`] treats a file that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
	/// Refuse to touch an existing file.
	Safe,
	Overwrite,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
	pub root_path: String,
	pub notes_dir: String,
	pub templates_dir: String,
	pub editor: String,
	pub file_type: String,
}

impl Default for Config {
	fn default() -> Self {
		let editor = ["VISUAL", "EDITOR"]
			.iter()
			.find_map(|var| env::var(var).ok().filter(|value| !value.trim().is_empty()))
			.unwrap_or_else(|| "vi".to_string());

		Self {
			root_path: format!("~/{PROJECT_NAME}"),
			notes_dir: "notes".to_string(),
			templates_dir: "templates".to_string(),
			editor,
			file_type: "md".to_string(),
		}
	}
}

impl Config {
	/// Loads the configuration at `path`, layered over the defaults and under
	/// the `QUILL_*` environment variables. A missing file is not an error.
	pub fn load(path: &Path) -> Result<Self, Error> {
		Self::load_with_env(path, None)
	}

	/// Same as [`Config::load`], reading overrides from `env` instead of the
	/// process environment when it is given.
	pub fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> Result<Self, Error> {
		let environment = Environment::with_prefix(&PROJECT_NAME.to_uppercase()).source(env);
		let config = LayeredConfig::builder()
			.add_source(File::from(path.to_path_buf()).format(FileFormat::Toml).required(false))
			.add_source(environment)
			.build()?
			.try_deserialize::<Config>()?;

		tracing::debug!(path = %path.display(), ?config, "Configuration loaded.");
		Ok(config)
	}

	pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, Error> {
		if let Some(path) = path {
			return Ok(path.normalize());
		}

		let var = format!("{}_CONFIG", PROJECT_NAME.to_uppercase());
		if let Some(path) = env::var_os(&var).filter(|value| !value.is_empty()) {
			return Ok(PathBuf::from(path).normalize());
		}

		dirs::home_dir()
			.map(|home| home.join(format!(".{PROJECT_NAME}.toml")))
			.ok_or(Error::NoHomeDir)
	}

	pub fn save(&self, path: &Path, mode: WriteMode) -> Result<(), Error> {
		let contents = toml::to_string_pretty(self)?;

		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(Error::io(parent))?;
		}

		let mut options = OpenOptions::new();
		options.write(true);
		match mode {
			WriteMode::Safe => options.create_new(true),
			WriteMode::Overwrite => options.create(true).truncate(true),
		};

		let mut file = options.open(path).map_err(|source| match source.kind() {
			ErrorKind::AlreadyExists => Error::ConfigExists(path.to_path_buf()),
			_ => Error::Io {
				source,
				path: path.to_path_buf(),
			},
		})?;
		file.write_all(contents.as_bytes()).map_err(Error::io(path))?;

		tracing::info!(path = %path.display(), ?mode, "Configuration written.");
		Ok(())
	}

	pub fn get(&self, setting: Setting) -> &str {
		match setting {
			Setting::RootPath => &self.root_path,
			Setting::NotesDir => &self.notes_dir,
			Setting::TemplatesDir => &self.templates_dir,
			Setting::Editor => &self.editor,
			Setting::FileType => &self.file_type,
		}
	}

	/// Stores `value` under `setting`, cleaning it first if it is a path.
	pub fn set(&mut self, setting: Setting, value: &str) {
		let value = if setting.is_path() {
			clean_str(value)
		} else {
			value.trim().to_string()
		};

		match setting {
			Setting::RootPath => self.root_path = value,
			Setting::NotesDir => self.notes_dir = value,
			Setting::TemplatesDir => self.templates_dir = value,
			Setting::Editor => self.editor = value,
			Setting::FileType => self.file_type = value,
		}
	}

	/// Applies prompt answers. A blank answer keeps the current value.
	pub fn merge<I, S>(&mut self, answers: I)
	where
		I: IntoIterator<Item = (Setting, S)>,
		S: AsRef<str>,
	{
		for (setting, value) in answers {
			let value = value.as_ref();
			if !value.trim().is_empty() {
				self.set(setting, value);
			}
		}
	}

	/// Every setting must be non-empty before a note can be created.
	pub fn validate(&self) -> Result<(), Error> {
		match Setting::ALL.into_iter().find(|setting| self.get(*setting).trim().is_empty()) {
			Some(setting) => Err(Error::MissingSetting(setting.key())),
			None => Ok(()),
		}
	}

	pub fn root(&self) -> PathBuf {
		self.root_path.normalize()
	}

	pub fn notes_path(&self) -> PathBuf {
		self.root().join(self.notes_dir.expand_user()).normalize()
	}

	pub fn templates_path(&self) -> PathBuf {
		self.root().join(self.templates_dir.expand_user()).normalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use tempfile::tempdir;

	fn no_env() -> Option<Map<String, String>> {
		Some(Map::new())
	}

	fn sample() -> Config {
		Config {
			root_path: "/home/u/notes".into(),
			notes_dir: "daily".into(),
			templates_dir: "tpl".into(),
			editor: "nvim".into(),
			file_type: "md".into(),
		}
	}

	#[test]
	fn missing_file_falls_back_to_defaults() {
		let dir = tempdir().unwrap();
		let config = Config::load_with_env(&dir.path().join("absent.toml"), no_env()).unwrap();
		let defaults = Config::default();
		assert_eq!(config.root_path, defaults.root_path);
		assert_eq!(config.notes_dir, "notes");
		assert_eq!(config.templates_dir, "templates");
		assert_eq!(config.file_type, "md");
	}

	#[test]
	fn file_values_override_defaults() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("quill.toml");
		fs::write(&path, "root_path = \"/srv/notes\"\nnotes_dir = \"daily\"\neditor = \"nano\"\n").unwrap();

		let config = Config::load_with_env(&path, no_env()).unwrap();
		assert_eq!(config.root_path, "/srv/notes");
		assert_eq!(config.notes_dir, "daily");
		assert_eq!(config.editor, "nano");
		assert_eq!(config.templates_dir, "templates");
	}

	#[test]
	fn environment_overrides_file() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("quill.toml");
		fs::write(&path, "editor = \"nano\"\nfile_type = \"md\"\n").unwrap();

		let env = Map::from([
			("QUILL_EDITOR".to_string(), "emacs".to_string()),
			("QUILL_FILE_TYPE".to_string(), "org".to_string()),
		]);
		let config = Config::load_with_env(&path, Some(env)).unwrap();
		assert_eq!(config.editor, "emacs");
		assert_eq!(config.file_type, "org");
	}

	#[test]
	fn malformed_file_is_a_config_error() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("quill.toml");
		fs::write(&path, "root_path = [unclosed").unwrap();
		assert!(matches!(Config::load_with_env(&path, no_env()), Err(Error::Config(_))));
	}

	#[test]
	fn explicit_path_wins() {
		let path = Config::resolve_path(Some(PathBuf::from("/etc/./quill/config.toml"))).unwrap();
		assert_eq!(path, PathBuf::from("/etc/quill/config.toml"));
	}

	#[test]
	fn safe_save_refuses_existing_file() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("quill.toml");
		fs::write(&path, "editor = \"nano\"\n").unwrap();

		let err = sample().save(&path, WriteMode::Safe).unwrap_err();
		assert!(matches!(err, Error::ConfigExists(p) if p == path));
		assert_eq!(fs::read_to_string(&path).unwrap(), "editor = \"nano\"\n");
	}

	#[test]
	fn overwrite_replaces_and_reloads() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("nested").join("quill.toml");
		sample().save(&path, WriteMode::Safe).unwrap();

		let mut changed = sample();
		changed.editor = "code".into();
		changed.save(&path, WriteMode::Overwrite).unwrap();

		assert_eq!(Config::load_with_env(&path, no_env()).unwrap(), changed);
	}

	#[test]
	fn merge_cleans_path_answers_only() {
		let mut config = sample();
		config.merge([
			(Setting::RootPath, "/home/u//notes/./"),
			(Setting::NotesDir, "daily/../journal"),
			(Setting::Editor, " code "),
		]);
		assert_eq!(config.root_path, "/home/u/notes");
		assert_eq!(config.notes_dir, "journal");
		assert_eq!(config.editor, "code");
		assert_eq!(config.templates_dir, "tpl");
	}

	#[test]
	fn blank_answers_keep_current_values() {
		let mut config = sample();
		config.merge([(Setting::RootPath, ""), (Setting::Editor, "  "), (Setting::FileType, "org")]);
		assert_eq!(config.root_path, "/home/u/notes");
		assert_eq!(config.editor, "nvim");
		assert_eq!(config.file_type, "org");
	}

	#[test]
	fn validate_reports_first_empty_setting() {
		let mut config = sample();
		assert!(config.validate().is_ok());
		config.templates_dir = " ".into();
		assert!(matches!(config.validate(), Err(Error::MissingSetting("templates_dir"))));
	}

	#[test]
	fn derived_directories() {
		let config = sample();
		assert_eq!(config.notes_path(), PathBuf::from("/home/u/notes/daily"));
		assert_eq!(config.templates_path(), PathBuf::from("/home/u/notes/tpl"));
	}
}
