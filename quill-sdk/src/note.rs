use std::{
	fs::{self, File, OpenOptions},
	io::{self, ErrorKind, Write},
	path::{Component, Path, PathBuf},
};

use chrono::{DateTime, Local, SecondsFormat};
use quill_stdx::path::PathExt;

use crate::{
	config::Config,
	editor::{self, EditorOutcome, Launcher},
	error::Error,
};

/// What the user asked `new` to do.
#[derive(Debug, Default, Clone)]
pub struct NoteRequest {
	/// Base name of the note. Defaults to the current timestamp.
	pub filename: Option<String>,
	/// Template to seed the note with, by base name.
	pub template: Option<String>,
	/// Directory to create the note in. Defaults to the configured notes directory.
	pub output: Option<PathBuf>,
	/// Truncate an existing note instead of failing.
	pub force: bool,
}

#[derive(Debug)]
pub enum NoteOutcome {
	Created(PathBuf),
	CreatedButEditorFailed { path: PathBuf, error: Error },
}

impl NoteOutcome {
	pub fn path(&self) -> &Path {
		match self {
			NoteOutcome::Created(path) | NoteOutcome::CreatedButEditorFailed { path, .. } => path,
		}
	}
}

/// `dir/name.file_type`, cleaned. The result always stays under `dir`: a
/// rooted `name` is taken relative to it and `..` never climbs above it.
pub fn file_path(dir: &Path, name: &str, file_type: &str) -> PathBuf {
	let file = format!("{name}.{file_type}");
	let mut relative = PathBuf::new();
	for component in Path::new(&file).components() {
		match component {
			Component::Normal(part) => relative.push(part),
			Component::ParentDir => {
				relative.pop();
			}
			Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
		}
	}
	dir.normalize().join(relative)
}

/// The name given to notes created without an explicit filename.
pub fn timestamp(now: DateTime<Local>) -> String {
	now.to_rfc3339_opts(SecondsFormat::Secs, false)
}

impl NoteRequest {
	fn filename(&self) -> Option<&str> {
		self.filename.as_deref().map(str::trim).filter(|name| !name.is_empty())
	}

	fn template(&self) -> Option<&str> {
		self.template.as_deref().map(str::trim).filter(|name| !name.is_empty())
	}

	pub fn output_dir(&self, config: &Config) -> PathBuf {
		match self.output.as_deref().filter(|dir| !dir.as_os_str().is_empty()) {
			Some(dir) => dir.normalize(),
			None => config.notes_path(),
		}
	}

	/// Computes where the note goes without touching the file system.
	pub fn resolve(&self, config: &Config, now: DateTime<Local>) -> PathBuf {
		let name = self.filename().map_or_else(|| timestamp(now), str::to_string);
		file_path(&self.output_dir(config), &name, &config.file_type)
	}

	/// Creates the note file (and its directory), seeding it from the
	/// requested template. The editor is not involved.
	pub fn prepare(&self, config: &Config, now: DateTime<Local>) -> Result<PathBuf, Error> {
		let path = self.resolve(config, now);
		if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
			fs::create_dir_all(dir).map_err(Error::io(dir))?;
		}

		let mut note = self.open_note(&path)?;
		if let Some(template) = self.template() {
			seed_from_template(&mut note, &config.templates_path(), template, &config.file_type)?;
		}
		note.flush().map_err(Error::io(&path))?;

		tracing::info!(path = %path.display(), template = ?self.template(), "Note created.");
		Ok(path)
	}

	fn open_note(&self, path: &Path) -> Result<File, Error> {
		let mut options = OpenOptions::new();
		options.write(true);
		if self.force {
			options.create(true).truncate(true);
		} else {
			options.create_new(true);
		}

		options.open(path).map_err(|source| match source.kind() {
			ErrorKind::AlreadyExists => Error::NoteExists(path.to_path_buf()),
			_ => Error::Io {
				source,
				path: path.to_path_buf(),
			},
		})
	}
}

/// Streams the whole template `templates_dir/name.file_type` into `note`,
/// byte for byte. Returns the number of bytes copied.
pub fn seed_from_template<W: Write>(note: &mut W, templates_dir: &Path, name: &str, file_type: &str) -> Result<u64, Error> {
	let path = file_path(templates_dir, name, file_type);
	let mut template = File::open(&path).map_err(|source| match source.kind() {
		ErrorKind::NotFound => Error::TemplateNotFound(path.clone()),
		_ => Error::Io {
			source,
			path: path.clone(),
		},
	})?;

	let copied = io::copy(&mut template, note).map_err(Error::io(&path))?;
	tracing::debug!(template = %path.display(), bytes = copied, "Template copied.");
	Ok(copied)
}

/// Base names of the files in `dir` carrying the `file_type` extension, sorted.
/// A directory that does not exist yet holds no notes.
pub fn list_names(dir: &Path, file_type: &str) -> Result<Vec<String>, Error> {
	let entries = match fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
		Err(e) => return Err(Error::io(dir)(e)),
	};

	let mut names = Vec::new();
	for entry in entries {
		let path = entry.map_err(Error::io(dir))?.path();
		if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some(file_type) {
			continue;
		}
		if let Some(stem) = path.file_stem() {
			names.push(stem.to_string_lossy().into_owned());
		}
	}
	names.sort();
	Ok(names)
}

/// Creates the note described by `request` and opens it with the configured
/// editor when a launcher is given. Only configuration and file system errors
/// are returned as `Err`.
pub fn create_note(config: &Config, request: &NoteRequest, launcher: Option<&dyn Launcher>) -> Result<NoteOutcome, Error> {
	config.validate()?;
	let path = request.prepare(config, Local::now())?;

	let Some(launcher) = launcher else {
		return Ok(NoteOutcome::Created(path));
	};

	Ok(match editor::open(launcher, &config.editor, &path) {
		EditorOutcome::Opened => NoteOutcome::Created(path),
		EditorOutcome::Failed(error) => NoteOutcome::CreatedButEditorFailed { path, error },
	})
}
