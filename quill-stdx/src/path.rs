use std::{
	ffi::OsStr,
	path::{Path, PathBuf},
};

use path_clean::PathClean;

/// Path helpers shared by the configuration and note crates.
pub trait PathExt {
	/// Replaces a leading `~` component with the user's home directory.
	///
	/// `~user` forms and tildes in any other position are left untouched, as is
	/// the whole path when no home directory can be determined.
	fn expand_user(&self) -> PathBuf;

	/// Expands `~` and lexically removes redundant separators, `.` and `..`
	/// segments. The file system is never consulted.
	fn normalize(&self) -> PathBuf;
}

impl<T: AsRef<Path> + ?Sized> PathExt for T {
	fn expand_user(&self) -> PathBuf {
		let path = self.as_ref();
		let mut components = path.components();
		match (components.next(), dirs::home_dir()) {
			(Some(first), Some(mut home)) if first.as_os_str() == OsStr::new("~") => {
				home.extend(components);
				home
			}
			_ => path.to_path_buf(),
		}
	}

	fn normalize(&self) -> PathBuf {
		self.expand_user().clean()
	}
}

/// Cleans a path typed by the user, keeping it as a string so it can be
/// stored verbatim (a leading `~` survives).
pub fn clean_str(raw: &str) -> String {
	Path::new(raw.trim()).clean().to_string_lossy().into_owned()
}
